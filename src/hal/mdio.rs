//! MDIO (Management Data Input/Output) HAL
//!
//! Clause 45 access to the PHY's MMDs. The bus implementation is supplied
//! by the platform; every access is a single 16-bit transfer that may fail.

use crate::error::Result;

/// Maximum valid PHY (port) address (5-bit field)
pub const MAX_PHY_ADDR: u8 = 31;

// =============================================================================
// MDIO Bus Trait
// =============================================================================

/// Trait for Clause 45 MDIO bus operations
///
/// This trait can be implemented by different backends, allowing
/// the PHY driver to work with various MDIO implementations.
pub trait MdioBus {
    /// Read register `reg` of MMD `mmd` on the PHY at `phy_addr`
    fn read(&mut self, phy_addr: u8, mmd: u8, reg: u16) -> Result<u16>;

    /// Write register `reg` of MMD `mmd` on the PHY at `phy_addr`
    fn write(&mut self, phy_addr: u8, mmd: u8, reg: u16, value: u16) -> Result<()>;

    /// Read-modify-write a register, returning the value written
    fn modify<F>(&mut self, phy_addr: u8, mmd: u8, reg: u16, f: F) -> Result<u16>
    where
        F: FnOnce(u16) -> u16,
    {
        let value = f(self.read(phy_addr, mmd, reg)?);
        self.write(phy_addr, mmd, reg, value)?;
        Ok(value)
    }
}

impl<T: MdioBus + ?Sized> MdioBus for &mut T {
    fn read(&mut self, phy_addr: u8, mmd: u8, reg: u16) -> Result<u16> {
        (**self).read(phy_addr, mmd, reg)
    }

    fn write(&mut self, phy_addr: u8, mmd: u8, reg: u16, value: u16) -> Result<()> {
        (**self).write(phy_addr, mmd, reg, value)
    }
}
