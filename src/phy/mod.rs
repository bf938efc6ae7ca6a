//! XGBE Backplane PHY
//!
//! The PHY layer talks to hardware only through the [`MdioBus`] and
//! [`SerdesRegs`] seams, so it runs unchanged on any platform that can
//! provide Clause 45 access and the SerDes register windows.
//!
//! # Layout
//!
//! - [`generic`]: framework-facing traits, [`LinkStatus`], [`Abilities`]
//! - [`xgbe`]: the [`XgbePhy`] context and its lifecycle
//! - [`mode`]: KR / KX mode controller
//! - [`autoneg`]: auto-negotiation state machine
//! - [`link`]: link monitor and status resolution
//!
//! # Example
//!
//! ```ignore
//! use ph_xgbe_phy::phy::XgbePhy;
//! use ph_xgbe_phy::serdes::SerdesCmu;
//!
//! static CMU: SerdesCmu<MmioWindow> = SerdesCmu::new(unsafe { MmioWindow::new(CMU_BASE) });
//!
//! let mut phy = XgbePhy::probe(0, mdio, lane, &CMU, delay, config)?;
//! phy.soft_reset()?;
//! phy.config_init()?;
//! phy.config_aneg()?;
//!
//! loop {
//!     let status = phy.read_status()?;
//!     if status.link {
//!         break;
//!     }
//! }
//! ```
//!
//! [`MdioBus`]: crate::hal::MdioBus
//! [`SerdesRegs`]: crate::hal::SerdesRegs

pub mod autoneg;
pub mod generic;
pub mod link;
pub mod mode;
pub mod xgbe;

pub use autoneg::{AnCycle, AnState, RxState};
pub use generic::{Abilities, AnWorker, LinkStatus, PhyDriver};
pub use mode::PhyMode;
pub use xgbe::{XgbePhy, matches};
