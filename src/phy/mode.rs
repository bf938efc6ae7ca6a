//! KR / KX mode controller
//!
//! The PHY runs either 10GBASE-KR (PCS type 10GBASE-R, 10G SerDes) or
//! 1000/2500BASE-KX (PCS type 10GBASE-X, 1G PLL). Switching mode rewrites
//! the PCS type and speed, power-cycles the PCS so it latches, then
//! reprograms the SerDes lane inside a CMU rate-change bracket.

use embedded_hal::delay::DelayNs;

use crate::config::{Speed, SpeedSet};
use crate::error::{ConfigError, Result};
use crate::hal::mdio::MdioBus;
use crate::hal::mmio::SerdesRegs;
use crate::internal::constants::PCS_POWER_CYCLE_US;
use crate::internal::log::debug;
use crate::internal::mmd_regs::{base_page, ctrl1, kr_pmd, mmd, pcs_ctrl2, pma, reg};
use crate::phy::generic::Abilities;
use crate::phy::xgbe::XgbePhy;
use crate::serdes::lane;
use crate::serdes::tuning::SpeedClass;

/// Backplane operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhyMode {
    /// 10GBASE-KR
    Kr,
    /// 1000BASE-KX or 2500BASE-KX, per speed set
    Kx,
}

impl PhyMode {
    /// Both modes, preferred first
    pub const ALL: [PhyMode; 2] = [PhyMode::Kr, PhyMode::Kx];

    /// The other mode
    pub const fn opposite(self) -> Self {
        match self {
            PhyMode::Kr => PhyMode::Kx,
            PhyMode::Kx => PhyMode::Kr,
        }
    }

    /// Technology ability bit for this mode in base page word 2
    pub const fn link_codeword(self) -> u16 {
        match self {
            PhyMode::Kr => base_page::TECH_KR,
            PhyMode::Kx => base_page::TECH_KX,
        }
    }

    /// Capability bits that make this mode usable
    pub const fn abilities(self) -> Abilities {
        match self {
            PhyMode::Kr => Abilities::KR_10000_FULL,
            PhyMode::Kx => Abilities::KX_1000_FULL.union(Abilities::KX_2500_FULL),
        }
    }

    /// Link speed in this mode
    pub const fn speed(self, speed_set: SpeedSet) -> Speed {
        match self {
            PhyMode::Kr => Speed::Mbps10000,
            PhyMode::Kx => speed_set.kx_speed(),
        }
    }

    /// SerDes speed class in this mode
    pub const fn speed_class(self, speed_set: SpeedSet) -> SpeedClass {
        self.speed(speed_set).class()
    }

    const fn pcs_type(self) -> u16 {
        match self {
            PhyMode::Kr => pcs_ctrl2::TYPE_10GBR,
            PhyMode::Kx => pcs_ctrl2::TYPE_10GBX,
        }
    }

    const fn pcs_speed(self) -> u16 {
        match self {
            PhyMode::Kr => ctrl1::SPEED_10G,
            PhyMode::Kx => ctrl1::SPEED_1G,
        }
    }

    /// Decode PCS control 2
    pub const fn from_pcs_ctrl2(value: u16) -> Self {
        if value & pcs_ctrl2::TYPE == pcs_ctrl2::TYPE_10GBR {
            PhyMode::Kr
        } else {
            PhyMode::Kx
        }
    }
}

impl<M, R, C, D> XgbePhy<'_, M, R, C, D>
where
    M: MdioBus,
    R: SerdesRegs,
    C: SerdesRegs,
    D: DelayNs,
{
    /// Mode the PCS is currently configured for
    pub fn current_mode(&mut self) -> Result<PhyMode> {
        let ctrl2 = self.read_mmd(mmd::PCS, reg::CTRL2)?;
        Ok(PhyMode::from_pcs_ctrl2(ctrl2))
    }

    /// Switch to `mode`; a no-op when already there
    ///
    /// A register failure aborts the switch where it happened; nothing is
    /// rolled back.
    pub fn set_mode(&mut self, mode: PhyMode) -> Result<()> {
        if self.current_mode()? == mode {
            return Ok(());
        }
        self.program_mode(mode)
    }

    /// Switch to the mode opposite the current one
    pub fn switch_mode(&mut self) -> Result<()> {
        let target = self.current_mode()?.opposite();
        self.set_mode(target)
    }

    /// Set or clear the KR training enable bit
    pub fn set_kr_training(&mut self, enable: bool) -> Result<()> {
        self.modify_mmd(mmd::PMAPMD, pma::KR_PMD_CTRL, |v| {
            if enable {
                v | kr_pmd::TRAINING_ENABLE
            } else {
                v & !kr_pmd::TRAINING_ENABLE
            }
        })?;
        Ok(())
    }

    /// Whether the supported set allows `mode`
    pub fn mode_supported(&self, mode: PhyMode) -> bool {
        self.supported.intersects(mode.abilities())
    }

    /// KR when supported, otherwise KX
    pub(crate) fn preferred_mode(&self) -> Result<PhyMode> {
        PhyMode::ALL
            .into_iter()
            .find(|&mode| self.mode_supported(mode))
            .ok_or_else(|| ConfigError::NoSupportedMode.into())
    }

    /// Unconditionally program `mode` into the PCS and SerDes lane
    pub(crate) fn program_mode(&mut self, mode: PhyMode) -> Result<()> {
        self.set_kr_training(false)?;

        self.modify_mmd(mmd::PCS, reg::CTRL2, |v| (v & !pcs_ctrl2::TYPE) | mode.pcs_type())?;
        self.modify_mmd(mmd::PCS, reg::CTRL1, |v| (v & !ctrl1::SPEEDSEL) | mode.pcs_speed())?;
        self.pcs_power_cycle()?;

        let class = mode.speed_class(self.config.speed_set());
        let tuning = self.config.tuning().lane(class);
        let channel = self.config.channel();
        let lane_regs = &mut self.lane;
        let ((), status) = self.cmu.rate_change(channel, &mut self.delay, || {
            lane::program(lane_regs, class, &tuning);
        });
        self.last_rate_change = Some(status);

        debug!("lane {} programmed for {:?}", channel.index(), mode);
        Ok(())
    }

    fn pcs_power_cycle(&mut self) -> Result<()> {
        let ctrl = self.modify_mmd(mmd::PCS, reg::CTRL1, |v| v | ctrl1::LPOWER)?;
        self.delay.delay_us(PCS_POWER_CYCLE_US);
        self.write_mmd(mmd::PCS, reg::CTRL1, ctrl & !ctrl1::LPOWER)
    }
}
