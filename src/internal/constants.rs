//! Centralized Constants
//!
//! Timing budgets and identification values shared by the mode controller,
//! the rate-change bracket and the PHY lifecycle.
//!
//! # Note
//!
//! Register bit definitions live in [`mmd_regs`](super::mmd_regs) and
//! [`serdes_regs`](super::serdes_regs).

// =============================================================================
// Identification
// =============================================================================

/// XGBE PHY identifier (PCS DEVID1:DEVID2)
pub const XGBE_PHY_ID: u32 = 0x7996_ced0;

/// Mask applied before comparing against [`XGBE_PHY_ID`] (ignores revision)
pub const XGBE_PHY_ID_MASK: u32 = 0xffff_fff0;

// =============================================================================
// Timing Constants
// =============================================================================

/// Number of CMU ready-bit polls after a rate change
pub const RATECHANGE_POLL_COUNT: u32 = 500;

/// Pause before each CMU ready-bit poll, in microseconds
pub const RATECHANGE_POLL_INTERVAL_US: u32 = 50;

/// Time the PCS is held in low power while latching a new mode, in microseconds
pub const PCS_POWER_CYCLE_US: u32 = 100;

/// Number of PCS soft reset polls
pub const SOFT_RESET_POLL_COUNT: u32 = 50;

/// Pause before each PCS soft reset poll, in milliseconds
pub const SOFT_RESET_POLL_INTERVAL_MS: u32 = 20;

// =============================================================================
// Sizes
// =============================================================================

/// Number of SerDes speed classes (1000, 2500, 10000)
pub const SPEED_CLASSES: usize = 3;

/// Highest CMU lane index (REG16 carries two rate-change bits per lane)
pub const MAX_SERDES_CHANNEL: u8 = 7;

/// Capacity of the deferred work queue (relay + negotiation worker)
pub const WORK_QUEUE_DEPTH: usize = 2;
