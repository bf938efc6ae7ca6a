//! Generic PHY Driver Traits
//!
//! This module defines the lifecycle interface the PHY framework drives,
//! the link status it consumes, and the capability set it advertises.

use bitflags::bitflags;

use crate::config::{Duplex, Speed};
use crate::error::Result;
use crate::phy::autoneg::AnCycle;

// =============================================================================
// Link Status
// =============================================================================

/// Ethernet link status information
///
/// Contains the negotiated or configured link parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStatus {
    /// Link is up
    pub link: bool,
    /// Link speed
    pub speed: Speed,
    /// Duplex mode
    pub duplex: Duplex,
    /// Symmetric pause resolved with the link partner
    pub pause: bool,
    /// Asymmetric pause resolved with the link partner
    pub asym_pause: bool,
}

impl LinkStatus {
    /// Create a link status without pause
    pub const fn new(link: bool, speed: Speed, duplex: Duplex) -> Self {
        Self {
            link,
            speed,
            duplex,
            pause: false,
            asym_pause: false,
        }
    }

    /// Link down, 10G full duplex
    pub const fn down() -> Self {
        Self::new(false, Speed::Mbps10000, Duplex::Full)
    }
}

impl Default for LinkStatus {
    fn default() -> Self {
        Self::down()
    }
}

// =============================================================================
// PHY Capabilities
// =============================================================================

bitflags! {
    /// Link modes and features the PHY supports or advertises
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Abilities: u32 {
        /// Auto-negotiation
        const AUTONEG = 1 << 0;
        /// Symmetric pause
        const PAUSE = 1 << 1;
        /// Asymmetric pause
        const ASYM_PAUSE = 1 << 2;
        /// Backplane medium
        const BACKPLANE = 1 << 3;
        /// 10GBASE-KR full duplex
        const KR_10000_FULL = 1 << 4;
        /// 1000BASE-KX full duplex
        const KX_1000_FULL = 1 << 5;
        /// 2500BASE-X full duplex
        const KX_2500_FULL = 1 << 6;
        /// 10GBASE-R FEC
        const FEC_10000 = 1 << 7;
    }
}

// =============================================================================
// PHY Driver Traits
// =============================================================================

/// Lifecycle callbacks invoked by the PHY framework
///
/// Every method runs with exclusive access to the PHY context; the
/// framework (or [`SharedXgbePhy`](crate::sync::SharedXgbePhy)) provides the
/// per-device lock.
pub trait PhyDriver {
    /// PHY address on the MDIO bus
    fn address(&self) -> u8;

    /// Reset the PCS and quiesce auto-negotiation
    fn soft_reset(&mut self) -> Result<()>;

    /// Discover abilities and program the initial mode
    fn config_init(&mut self) -> Result<()>;

    /// Start auto-negotiation, or apply the forced link settings
    fn config_aneg(&mut self) -> Result<()>;

    /// Whether the last negotiation cycle completed
    fn aneg_done(&self) -> bool;

    /// Refresh and return the link status
    fn read_status(&mut self) -> Result<LinkStatus>;

    /// Put the PCS into low power
    fn suspend(&mut self) -> Result<()>;

    /// Restore the PCS power state saved by `suspend`
    fn resume(&mut self) -> Result<()>;
}

/// Deferred auto-negotiation interrupt work
pub trait AnWorker {
    /// Process every pending AN interrupt event
    fn an_state_machine(&mut self) -> AnCycle;
}
