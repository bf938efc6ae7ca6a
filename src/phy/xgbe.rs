//! AMD XGBE Backplane PHY Driver
//!
//! The XGBE PHY is a Clause 45 10GbE backplane PHY: a PCS/PMA pair reached
//! over MDIO, a Clause 73 auto-negotiation block, and an analog SerDes
//! lane behind a chip-wide CMU.
//!
//! # Features
//!
//! - 10GBASE-KR with link training and optional FEC
//! - 1000BASE-KX or 2500BASE-KX (per speed set)
//! - KR/KX auto-negotiation with incompatible-link fallback
//! - Parallel detection
//! - Forced mode
//! - PCS low-power suspend/resume
//!
//! # Lifecycle
//!
//! `probe` → `soft_reset` → `config_init` → `config_aneg`, then
//! [`an_state_machine`](XgbePhy::an_state_machine) from interrupt context
//! (via [`SharedXgbePhy`](crate::sync::SharedXgbePhy)) and `read_status`
//! from the framework's poll loop.

use embedded_hal::delay::DelayNs;

use crate::config::{Duplex, PhyConfig, Speed, SpeedSet};
use crate::error::{ConfigError, IoError, Result};
use crate::hal::mdio::{MAX_PHY_ADDR, MdioBus};
use crate::hal::mmio::SerdesRegs;
use crate::internal::constants::{
    SOFT_RESET_POLL_COUNT, SOFT_RESET_POLL_INTERVAL_MS, XGBE_PHY_ID, XGBE_PHY_ID_MASK,
};
use crate::internal::log::{debug, info, warning};
use crate::internal::mmd_regs::{an, an_int, ctrl1, devs, fec, mmd, pma, reg};
use crate::phy::autoneg::{AnContext, AnCycle, AnState, RxState};
use crate::phy::generic::{Abilities, AnWorker, LinkStatus, PhyDriver};
use crate::phy::mode::PhyMode;
use crate::serdes::cmu::{RateChangeStatus, SerdesCmu};

/// Check whether the PHY at `addr` is an XGBE PHY (any revision)
///
/// Reads the identifier from the PCS MMD; used by the framework to bind
/// the driver before [`XgbePhy::probe`].
pub fn matches<M: MdioBus>(mdio: &mut M, addr: u8) -> Result<bool> {
    Ok(read_phy_id(mdio, addr)? & XGBE_PHY_ID_MASK == XGBE_PHY_ID)
}

fn read_phy_id<M: MdioBus>(mdio: &mut M, addr: u8) -> Result<u32> {
    let id1 = mdio.read(addr, mmd::PCS, reg::DEVID1)?;
    let id2 = mdio.read(addr, mmd::PCS, reg::DEVID2)?;
    Ok((u32::from(id1) << 16) | u32::from(id2))
}

// =============================================================================
// PHY Context
// =============================================================================

/// One XGBE PHY instance
///
/// Owns its MDIO access, its RXTX lane window and a delay source, and
/// borrows the chip-wide [`SerdesCmu`] it shares with the other lanes.
pub struct XgbePhy<'a, M, R, C, D> {
    pub(crate) addr: u8,
    pub(crate) mdio: M,
    pub(crate) lane: R,
    pub(crate) cmu: &'a SerdesCmu<C>,
    pub(crate) delay: D,
    pub(crate) config: PhyConfig,

    /// Abilities of this PHY, set by `config_init`
    pub(crate) supported: Abilities,
    pub(crate) advertising: Abilities,
    /// Framework link policy
    pub(crate) autoneg: bool,
    pub(crate) forced_speed: Speed,
    pub(crate) forced_duplex: Duplex,

    pub(crate) an: AnContext,
    pub(crate) fec_ability: u16,
    /// Devices-in-package bitmap (PCS DEVS1 | DEVS2 << 16)
    pub(crate) devices: u32,
    /// Last observed link state, for edge detection
    pub(crate) link: bool,
    pub(crate) status: LinkStatus,
    /// PCS control 1 saved across suspend
    pub(crate) lpm_ctrl: u16,

    pub(crate) last_rate_change: Option<RateChangeStatus>,
    pub(crate) last_an_cycle: AnCycle,
}

impl<'a, M, R, C, D> XgbePhy<'a, M, R, C, D>
where
    M: MdioBus,
    R: SerdesRegs,
    C: SerdesRegs,
    D: DelayNs,
{
    /// Bind to the PHY at `addr`
    ///
    /// Checks the PHY identifier and records which MMDs the package has.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidConfig`]: `addr` above 31
    /// - [`ConfigError::UnknownPhy`]: identifier is not an XGBE PHY
    /// - any MDIO failure
    pub fn probe(
        addr: u8,
        mdio: M,
        lane: R,
        cmu: &'a SerdesCmu<C>,
        delay: D,
        config: PhyConfig,
    ) -> Result<Self> {
        if addr > MAX_PHY_ADDR {
            return Err(ConfigError::InvalidConfig.into());
        }

        let mut phy = Self {
            addr,
            mdio,
            lane,
            cmu,
            delay,
            config,
            supported: Abilities::empty(),
            advertising: Abilities::empty(),
            autoneg: true,
            forced_speed: Speed::Mbps10000,
            forced_duplex: Duplex::Full,
            an: AnContext::new(),
            fec_ability: 0,
            devices: 0,
            link: true,
            status: LinkStatus::down(),
            lpm_ctrl: 0,
            last_rate_change: None,
            last_an_cycle: AnCycle::default(),
        };

        if !phy.verify_id()? {
            warning!("PHY {} is not an XGBE PHY", addr);
            return Err(ConfigError::UnknownPhy.into());
        }

        let devs1 = phy.read_mmd(mmd::PCS, reg::DEVS1)?;
        let devs2 = phy.read_mmd(mmd::PCS, reg::DEVS2)?;
        phy.devices = u32::from(devs1) | (u32::from(devs2) << 16);

        debug!(
            "XGBE PHY {} on SerDes lane {}",
            addr,
            phy.config.channel().index()
        );
        Ok(phy)
    }

    /// Read the PHY identifier from the PCS MMD
    pub fn phy_id(&mut self) -> Result<u32> {
        read_phy_id(&mut self.mdio, self.addr)
    }

    /// Check whether this is an XGBE PHY (any revision)
    pub fn verify_id(&mut self) -> Result<bool> {
        matches(&mut self.mdio, self.addr)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Reset the PCS, then disable AN and clear its interrupts
    ///
    /// # Errors
    ///
    /// [`IoError::Timeout`] if the reset bit is still set after 50 polls
    /// 20 ms apart.
    pub fn soft_reset(&mut self) -> Result<()> {
        self.modify_mmd(mmd::PCS, reg::CTRL1, |v| v | ctrl1::RESET)?;

        let mut in_reset = true;
        for _ in 0..SOFT_RESET_POLL_COUNT {
            self.delay.delay_ms(SOFT_RESET_POLL_INTERVAL_MS);
            if self.read_mmd(mmd::PCS, reg::CTRL1)? & ctrl1::RESET == 0 {
                in_reset = false;
                break;
            }
        }
        if in_reset {
            return Err(IoError::Timeout.into());
        }

        self.disable_an()?;
        self.write_mmd(mmd::AN, an::INT, 0)
    }

    /// Discover abilities, program the initial mode and arm AN interrupts
    pub fn config_init(&mut self) -> Result<()> {
        self.fec_ability = self.read_mmd(mmd::PMAPMD, pma::FEC_ABILITY)? & fec::MASK;

        let mut supported = Abilities::AUTONEG
            | Abilities::PAUSE
            | Abilities::ASYM_PAUSE
            | Abilities::BACKPLANE
            | Abilities::KR_10000_FULL;
        supported |= match self.config.speed_set() {
            SpeedSet::Kx1000Kr10000 => Abilities::KX_1000_FULL,
            SpeedSet::Kx2500Kr10000 => Abilities::KX_2500_FULL,
        };
        if self.fec_ability & fec::ENABLE != 0 {
            supported |= Abilities::FEC_10000;
        }
        self.supported = supported;
        self.advertising = supported;

        // Program the mode unconditionally so the SerDes matches the PCS
        let mode = self.preferred_mode()?;
        self.program_mode(mode)?;

        self.an_init()?;
        self.write_mmd(mmd::AN, an::INT_MASK, an_int::MASK)?;

        info!("PHY {} initialized in {:?} mode", self.addr, mode);
        Ok(())
    }

    /// Start auto-negotiation, or apply the forced speed when it is off
    pub fn config_aneg(&mut self) -> Result<()> {
        if !self.autoneg {
            return self.setup_forced();
        }

        if self.devices & devs::AN == 0 {
            return Err(ConfigError::AnUnavailable.into());
        }

        let mode = self.preferred_mode()?;
        self.set_mode(mode)?;

        self.disable_an()?;
        self.write_mmd(mmd::AN, an::INT, 0)?;
        self.an.reset();

        self.an_init()?;
        self.enable_parallel_detect()?;
        self.restart_an()
    }

    fn setup_forced(&mut self) -> Result<()> {
        // KX runs at the speed-set rate whichever KX speed was asked for
        let mode = match self.forced_speed {
            Speed::Mbps10000 => PhyMode::Kr,
            Speed::Mbps1000 | Speed::Mbps2500 => PhyMode::Kx,
        };
        if self.forced_duplex != Duplex::Full {
            return Err(ConfigError::UnsupportedDuplex.into());
        }

        self.disable_an()?;
        self.set_mode(mode)?;

        self.status.pause = false;
        self.status.asym_pause = false;
        Ok(())
    }

    /// Whether the last negotiation cycle ended in COMPLETE
    pub fn aneg_done(&self) -> bool {
        self.an.result == AnState::Complete
    }

    /// Save PCS control 1 and enter low power
    pub fn suspend(&mut self) -> Result<()> {
        let ctrl = self.read_mmd(mmd::PCS, reg::CTRL1)?;
        self.lpm_ctrl = ctrl;
        self.write_mmd(mmd::PCS, reg::CTRL1, ctrl | ctrl1::LPOWER)
    }

    /// Leave low power, restoring the saved PCS control 1
    pub fn resume(&mut self) -> Result<()> {
        self.lpm_ctrl &= !ctrl1::LPOWER;
        self.write_mmd(mmd::PCS, reg::CTRL1, self.lpm_ctrl)
    }

    // =========================================================================
    // Link Policy
    // =========================================================================

    /// Enable or disable auto-negotiation for the next `config_aneg`
    pub fn set_autoneg(&mut self, enable: bool) {
        self.autoneg = enable;
    }

    /// Force speed and duplex for the next `config_aneg` (disables AN)
    pub fn force_link(&mut self, speed: Speed, duplex: Duplex) {
        self.autoneg = false;
        self.forced_speed = speed;
        self.forced_duplex = duplex;
    }

    /// Restrict the supported abilities (e.g. from ethtool)
    ///
    /// Bits the PHY does not have are ignored.
    pub fn set_supported(&mut self, abilities: Abilities) {
        self.supported &= abilities;
        self.advertising &= self.supported;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// PHY address
    pub const fn address(&self) -> u8 {
        self.addr
    }

    /// Attach-time configuration
    pub const fn config(&self) -> &PhyConfig {
        &self.config
    }

    /// Supported abilities
    pub const fn supported(&self) -> Abilities {
        self.supported
    }

    /// Advertised abilities
    pub const fn advertising(&self) -> Abilities {
        self.advertising
    }

    /// Whether auto-negotiation is the configured policy
    pub const fn autoneg(&self) -> bool {
        self.autoneg
    }

    /// FEC ability bits read at `config_init`
    pub const fn fec_ability(&self) -> u16 {
        self.fec_ability
    }

    /// Current AN state
    pub const fn an_state(&self) -> AnState {
        self.an.state
    }

    /// Outcome of the last finished negotiation cycle
    pub const fn an_result(&self) -> AnState {
        self.an.result
    }

    /// Page-receive sub-state for `mode`
    pub const fn rx_state(&self, mode: PhyMode) -> RxState {
        self.an.rx(mode)
    }

    /// Page cycles seen in the current negotiation attempt
    pub const fn supported_count(&self) -> u32 {
        self.an.supported_count
    }

    /// Whether the link came up through parallel detection
    pub const fn parallel_detect(&self) -> bool {
        self.an.parallel_detect
    }

    /// Status reported by the last `read_status`
    pub const fn link_status(&self) -> LinkStatus {
        self.status
    }

    /// Outcome of the last SerDes rate change
    pub const fn last_rate_change(&self) -> Option<RateChangeStatus> {
        self.last_rate_change
    }

    /// Statistics of the last state machine invocation
    pub const fn last_an_cycle(&self) -> AnCycle {
        self.last_an_cycle
    }

    /// Release the hardware handles
    pub fn release(self) -> (M, R, D) {
        (self.mdio, self.lane, self.delay)
    }

    // =========================================================================
    // Register Access
    // =========================================================================

    pub(crate) fn read_mmd(&mut self, mmd: u8, reg: u16) -> Result<u16> {
        self.mdio.read(self.addr, mmd, reg)
    }

    pub(crate) fn write_mmd(&mut self, mmd: u8, reg: u16, value: u16) -> Result<()> {
        self.mdio.write(self.addr, mmd, reg, value)
    }

    pub(crate) fn modify_mmd<F>(&mut self, mmd: u8, reg: u16, f: F) -> Result<u16>
    where
        F: FnOnce(u16) -> u16,
    {
        self.mdio.modify(self.addr, mmd, reg, f)
    }
}

// =============================================================================
// PhyDriver Implementation
// =============================================================================

impl<M, R, C, D> PhyDriver for XgbePhy<'_, M, R, C, D>
where
    M: MdioBus,
    R: SerdesRegs,
    C: SerdesRegs,
    D: DelayNs,
{
    fn address(&self) -> u8 {
        self.addr
    }

    fn soft_reset(&mut self) -> Result<()> {
        XgbePhy::soft_reset(self)
    }

    fn config_init(&mut self) -> Result<()> {
        XgbePhy::config_init(self)
    }

    fn config_aneg(&mut self) -> Result<()> {
        XgbePhy::config_aneg(self)
    }

    fn aneg_done(&self) -> bool {
        XgbePhy::aneg_done(self)
    }

    fn read_status(&mut self) -> Result<LinkStatus> {
        XgbePhy::read_status(self)
    }

    fn suspend(&mut self) -> Result<()> {
        XgbePhy::suspend(self)
    }

    fn resume(&mut self) -> Result<()> {
        XgbePhy::resume(self)
    }
}

impl<M, R, C, D> AnWorker for XgbePhy<'_, M, R, C, D>
where
    M: MdioBus,
    R: SerdesRegs,
    C: SerdesRegs,
    D: DelayNs,
{
    fn an_state_machine(&mut self) -> AnCycle {
        XgbePhy::an_state_machine(self)
    }
}
