//! Interrupt line abstraction
//!
//! The AN block signals page exchanges through a dedicated interrupt line.
//! The platform owns the interrupt controller; the driver only needs to
//! claim the line once and mask it while negotiation work is pending.

use crate::error::Result;

/// A claimable, maskable interrupt line
///
/// `disable` and `enable` nest: the line is delivered again only once every
/// `disable` has been matched by an `enable`. All methods take `&self` so
/// the line can be masked from the interrupt handler while the worker owns
/// the PHY.
pub trait IrqLine {
    /// Claim the line and install the handler
    fn request(&self) -> Result<()>;

    /// Release the line
    fn free(&self);

    /// Mask delivery (nesting)
    fn disable(&self);

    /// Unmask delivery (nesting)
    fn enable(&self);
}

impl<T: IrqLine + ?Sized> IrqLine for &T {
    fn request(&self) -> Result<()> {
        (**self).request()
    }

    fn free(&self) {
        (**self).free();
    }

    fn disable(&self) {
        (**self).disable();
    }

    fn enable(&self) {
        (**self).enable();
    }
}
