//! Link monitor
//!
//! Polled by the framework. PCS link status is latched low, so it is read
//! twice. A dead link under auto-negotiation gets one retry in the other
//! mode; a link that comes back restarts negotiation.

use embedded_hal::delay::DelayNs;

use crate::config::Duplex;
use crate::error::{ConfigError, Result};
use crate::hal::mdio::MdioBus;
use crate::hal::mmio::SerdesRegs;
use crate::internal::log::debug;
use crate::internal::mmd_regs::{an, base_page, devs, mmd, reg, stat1};
use crate::phy::autoneg::AnState;
use crate::phy::generic::LinkStatus;
use crate::phy::mode::PhyMode;
use crate::phy::xgbe::XgbePhy;

impl<M, R, C, D> XgbePhy<'_, M, R, C, D>
where
    M: MdioBus,
    R: SerdesRegs,
    C: SerdesRegs,
    D: DelayNs,
{
    /// Refresh the link state
    ///
    /// Reports link up while negotiation is in flight; the recorded link
    /// state is left alone so the exchange is not restarted.
    pub fn update_link(&mut self) -> Result<bool> {
        if self.an.state != AnState::Ready {
            self.status.link = true;
            return Ok(true);
        }

        let mut link = self.pcs_link()?;
        if !link && self.autoneg {
            self.switch_mode()?;
            link = self.pcs_link()?;
        }

        if link && !self.link {
            debug!("PHY {} link up, restarting AN", self.addr);
            self.config_aneg()?;
        }
        self.link = link;
        self.status.link = link;
        Ok(link)
    }

    fn pcs_link(&mut self) -> Result<bool> {
        // Latched low: the first read clears a stale failure
        self.read_mmd(mmd::PCS, reg::STAT1)?;
        Ok(self.read_mmd(mmd::PCS, reg::STAT1)? & stat1::LSTATUS != 0)
    }

    /// Refresh and return the link status
    ///
    /// With negotiation on, speed and pause only change once
    /// [`aneg_done`](Self::aneg_done); until then the previous status is
    /// returned with the new link state.
    pub fn read_status(&mut self) -> Result<LinkStatus> {
        self.update_link()?;

        if self.autoneg && !self.an.parallel_detect {
            if self.devices & devs::AN == 0 {
                return Err(ConfigError::AnUnavailable.into());
            }
            if !self.aneg_done() {
                return Ok(self.status);
            }

            let ad = self.read_mmd(mmd::AN, an::ADVERTISE)?;
            let lp = self.read_mmd(mmd::AN, an::LPA)?;
            let common = ad & lp;
            self.status.pause = common & base_page::PAUSE != 0;
            self.status.asym_pause = common & base_page::ASYM_PAUSE != 0;

            let ad_tech = self.read_mmd(mmd::AN, an::ADVERTISE + 1)?;
            let lp_tech = self.read_mmd(mmd::AN, an::LPA + 1)?;
            let mode = if ad_tech & lp_tech & base_page::TECH_KR != 0 {
                PhyMode::Kr
            } else {
                PhyMode::Kx
            };
            self.set_mode(mode)?;
            self.status.speed = mode.speed(self.config.speed_set());
        } else {
            let mode = self.current_mode()?;
            self.status.speed = mode.speed(self.config.speed_set());
            self.status.pause = false;
            self.status.asym_pause = false;
        }
        self.status.duplex = Duplex::Full;

        Ok(self.status)
    }
}
