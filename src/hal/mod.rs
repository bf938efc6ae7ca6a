//! Hardware Abstraction Layer
//!
//! Traits the platform implements to give the driver access to the PHY,
//! plus the volatile implementation for memory-mapped SerDes windows.
//!
//! # Modules
//!
//! - [`mdio`]: Clause 45 MDIO bus for PMA/PCS/AN register access
//! - [`mmio`]: SerDes CMU and RXTX register windows
//! - [`irq`]: AN interrupt line
//!
//! # Delay Integration
//!
//! All types that require delays use `embedded_hal::delay::DelayNs` directly.
//! Pass any delay implementation from your platform HAL.

pub mod irq;
pub mod mdio;
pub mod mmio;

// Re-export commonly used types
pub use irq::IrqLine;
pub use mdio::MdioBus;
pub use mmio::{Field, MmioWindow, SerdesRegs};
