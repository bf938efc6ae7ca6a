//! Clause 73 auto-negotiation state machine
//!
//! Driven from the AN interrupt register. Each invocation snapshots the
//! interrupt bits once and consumes them in priority order (page received,
//! incompatible link, complete); every event runs the state machine until
//! the state stops changing.
//!
//! KR and KX keep independent page-receive sub-states. Only the sub-state
//! of the mode the PCS is in advances on a page; an incompatible link
//! marks it failed and tries the other mode once.

use embedded_hal::delay::DelayNs;

use crate::error::Result;
use crate::hal::mdio::MdioBus;
use crate::hal::mmio::SerdesRegs;
use crate::internal::log::{debug, error, warning};
use crate::internal::mmd_regs::{
    an, an_int, base_page, ctrl1, fec, kr_ctrl, kr_pmd, mmd, pma, reg, xnp,
};
use crate::phy::generic::Abilities;
use crate::phy::mode::PhyMode;
use crate::phy::xgbe::XgbePhy;

// =============================================================================
// States
// =============================================================================

/// Negotiation phase
///
/// Ordered: every state from [`AnState::Complete`] on ends a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnState {
    /// Idle, waiting for the next interrupt
    Ready = 0,
    /// A page arrived from the link partner
    PageReceived,
    /// The partner does not support the current mode
    IncompatLink,
    /// Negotiation finished
    Complete,
    /// No common mode with the partner
    NoLink,
    /// Unexpected interrupt or register access failure
    Error,
}

impl AnState {
    /// Whether this state ends a negotiation cycle
    pub const fn is_terminal(self) -> bool {
        self as u8 >= AnState::Complete as u8
    }
}

/// Page-receive sub-state, one per mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxState {
    /// Waiting for the base page
    Bpa,
    /// Exchanging extended next pages
    Xnp,
    /// Pages done, training started
    Complete,
    /// Link partner cannot run this mode
    Error,
}

/// Work done by one state machine invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnCycle {
    /// Interrupt events consumed
    pub events: u32,
    /// State machine passes over all events
    pub passes: u32,
}

impl AnCycle {
    /// Whether the invocation found nothing to do
    pub const fn is_idle(&self) -> bool {
        self.events == 0
    }
}

// =============================================================================
// Negotiation Context
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AnContext {
    pub(crate) state: AnState,
    pub(crate) result: AnState,
    pub(crate) kr_rx: RxState,
    pub(crate) kx_rx: RxState,
    pub(crate) supported_count: u32,
    pub(crate) parallel_detect: bool,
}

impl AnContext {
    pub(crate) const fn new() -> Self {
        Self {
            state: AnState::Ready,
            result: AnState::Ready,
            kr_rx: RxState::Bpa,
            kx_rx: RxState::Bpa,
            supported_count: 0,
            parallel_detect: false,
        }
    }

    pub(crate) const fn rx(&self, mode: PhyMode) -> RxState {
        match mode {
            PhyMode::Kr => self.kr_rx,
            PhyMode::Kx => self.kx_rx,
        }
    }

    pub(crate) fn rx_mut(&mut self, mode: PhyMode) -> &mut RxState {
        match mode {
            PhyMode::Kr => &mut self.kr_rx,
            PhyMode::Kx => &mut self.kx_rx,
        }
    }

    /// Back to the start of a negotiation attempt
    pub(crate) fn reset(&mut self) {
        self.state = AnState::Ready;
        self.result = AnState::Ready;
        self.reset_rx();
    }

    pub(crate) fn reset_rx(&mut self) {
        self.kr_rx = RxState::Bpa;
        self.kx_rx = RxState::Bpa;
    }
}

/// Pick the highest-priority event out of an interrupt snapshot
const fn classify(int: u16) -> (AnState, u16) {
    if int & an_int::PAGE_RECEIVED != 0 {
        (AnState::PageReceived, an_int::PAGE_RECEIVED)
    } else if int & an_int::INCOMPAT_LINK != 0 {
        (AnState::IncompatLink, an_int::INCOMPAT_LINK)
    } else if int & an_int::COMPLETE != 0 {
        (AnState::Complete, an_int::COMPLETE)
    } else {
        (AnState::Error, 0)
    }
}

// =============================================================================
// State Machine
// =============================================================================

impl<M, R, C, D> XgbePhy<'_, M, R, C, D>
where
    M: MdioBus,
    R: SerdesRegs,
    C: SerdesRegs,
    D: DelayNs,
{
    /// Consume the pending AN interrupt events
    ///
    /// Never fails: register errors drive the machine to
    /// [`AnState::Error`], which clears the interrupt register and ends
    /// the invocation.
    pub fn an_state_machine(&mut self) -> AnCycle {
        let mut cycle = AnCycle::default();

        let snapshot = match self.read_mmd(mmd::AN, an::INT) {
            Ok(0) => {
                self.last_an_cycle = cycle;
                return cycle;
            }
            Ok(int) => Some(int),
            Err(_) => None,
        };
        let mut remaining = snapshot.unwrap_or(0);

        loop {
            let event_mask = match snapshot {
                Some(_) => {
                    let (state, mask) = classify(remaining);
                    self.an.state = state;
                    if self.write_mmd(mmd::AN, an::INT, remaining & !mask).is_err() {
                        self.an.state = AnState::Error;
                    }
                    mask
                }
                None => {
                    self.an.state = AnState::Error;
                    0
                }
            };
            remaining &= !event_mask;
            self.an.result = self.an.state;
            cycle.events += 1;

            loop {
                cycle.passes += 1;
                let cur = self.an.state;
                self.an.state = self.an_step(cur);

                if matches!(self.an.state, AnState::NoLink | AnState::Error) {
                    // Stays off until the next link-up edge reruns config_aneg
                    if self.an.state == AnState::NoLink && self.disable_an().is_err() {
                        warning!("AN disable failed on PHY {}", self.addr);
                    }
                    if self.write_mmd(mmd::AN, an::INT, 0).is_err() {
                        warning!("AN interrupt clear failed on PHY {}", self.addr);
                    }
                    remaining = 0;
                }

                if self.an.state.is_terminal() {
                    self.an.result = self.an.state;
                    self.an.state = AnState::Ready;
                    self.an.reset_rx();
                }

                if self.an.state == cur {
                    break;
                }
            }

            // Unknown bits still count: classify turns them into ERROR
            if remaining == 0 {
                break;
            }
        }

        self.last_an_cycle = cycle;
        cycle
    }

    fn an_step(&mut self, state: AnState) -> AnState {
        match state {
            AnState::Ready => {
                self.an.supported_count = 0;
                AnState::Ready
            }
            AnState::PageReceived => {
                let next = self.an_page_received();
                if next == AnState::PageReceived {
                    self.an.supported_count += 1;
                }
                next
            }
            AnState::IncompatLink => {
                self.an.supported_count = 0;
                self.an.parallel_detect = false;
                self.an_incompat_link()
            }
            AnState::Complete => {
                self.an.parallel_detect = self.an.supported_count == 0;
                if self.an.parallel_detect {
                    debug!("AN complete on PHY {} (parallel detection)", self.addr);
                } else {
                    debug!(
                        "AN complete on PHY {} after {} page(s)",
                        self.addr, self.an.supported_count
                    );
                }
                AnState::Complete
            }
            AnState::NoLink => AnState::NoLink,
            AnState::Error => {
                error!("AN error on PHY {}", self.addr);
                AnState::Error
            }
        }
    }

    fn an_page_received(&mut self) -> AnState {
        let result = self.current_mode().and_then(|mode| match self.an.rx(mode) {
            RxState::Bpa => self.an_rx_bpa(mode),
            RxState::Xnp => self.an_rx_xnp(mode),
            RxState::Complete | RxState::Error => Ok(AnState::Error),
        });
        result.unwrap_or(AnState::Error)
    }

    fn an_rx_bpa(&mut self, mode: PhyMode) -> Result<AnState> {
        let lp_tech = self.read_mmd(mmd::AN, an::LPA + 1)?;
        if lp_tech & mode.link_codeword() == 0 {
            return Ok(AnState::IncompatLink);
        }

        let ad = self.read_mmd(mmd::AN, an::ADVERTISE)?;
        let lp = self.read_mmd(mmd::AN, an::LPA)?;
        let next_page = (ad | lp) & base_page::NP != 0;
        self.an_rx_next(mode, next_page)
    }

    fn an_rx_xnp(&mut self, mode: PhyMode) -> Result<AnState> {
        let ad = self.read_mmd(mmd::AN, an::XNP)?;
        let lp = self.read_mmd(mmd::AN, an::LPX)?;
        let next_page = (ad | lp) & xnp::NP_EXCHANGE != 0;
        self.an_rx_next(mode, next_page)
    }

    fn an_rx_next(&mut self, mode: PhyMode, next_page: bool) -> Result<AnState> {
        if next_page {
            self.an_tx_xnp(mode)
        } else {
            self.an_tx_training(mode)
        }
    }

    /// Answer with a null message page
    fn an_tx_xnp(&mut self, mode: PhyMode) -> Result<AnState> {
        *self.an.rx_mut(mode) = RxState::Xnp;

        self.write_mmd(mmd::AN, an::XNP + 2, 0)?;
        self.write_mmd(mmd::AN, an::XNP + 1, 0)?;
        self.write_mmd(mmd::AN, an::XNP, xnp::MCF_NULL_MESSAGE | xnp::MP_FORMATTED)?;

        Ok(AnState::PageReceived)
    }

    /// Resolve FEC and start KR training
    fn an_tx_training(&mut self, mode: PhyMode) -> Result<AnState> {
        *self.an.rx_mut(mode) = RxState::Complete;

        if mode == PhyMode::Kx {
            return Ok(AnState::PageReceived);
        }

        let ad = self.read_mmd(mmd::AN, an::ADVERTISE + 2)?;
        let lp = self.read_mmd(mmd::AN, an::LPA + 2)?;
        let fec_bits = if ad & base_page::FEC != 0 && lp & base_page::FEC != 0 {
            self.fec_ability
        } else {
            0
        };
        self.modify_mmd(mmd::PMAPMD, pma::FEC_CTRL, |v| (v & !fec::MASK) | fec_bits)?;

        let pmd = self.read_mmd(mmd::PMAPMD, pma::KR_PMD_CTRL)?;
        if pmd & kr_pmd::TRAINING_ENABLE != 0 {
            self.write_mmd(mmd::PMAPMD, pma::KR_PMD_CTRL, pmd | kr_pmd::TRAINING_START)?;
        }

        Ok(AnState::PageReceived)
    }

    fn an_incompat_link(&mut self) -> AnState {
        let mode = match self.current_mode() {
            Ok(mode) => mode,
            Err(_) => return AnState::Error,
        };
        *self.an.rx_mut(mode) = RxState::Error;

        let other = mode.opposite();
        if !self.mode_supported(other) || self.an.rx(other) != RxState::Bpa {
            return AnState::NoLink;
        }

        let retry = self
            .disable_an()
            .and_then(|()| self.switch_mode())
            .and_then(|()| self.restart_an());
        match retry {
            Ok(()) => {
                debug!("PHY {} retrying AN in {:?} mode", self.addr, other);
                AnState::IncompatLink
            }
            Err(_) => AnState::Error,
        }
    }

    // =========================================================================
    // AN Control
    // =========================================================================

    /// Write the base page advertisement from the supported set
    pub(crate) fn an_init(&mut self) -> Result<()> {
        let with_fec = self.supported.contains(Abilities::FEC_10000);
        self.modify_mmd(mmd::AN, an::ADVERTISE + 2, |v| {
            if with_fec { v | base_page::FEC } else { v & !base_page::FEC }
        })?;

        let mut tech = self.read_mmd(mmd::AN, an::ADVERTISE + 1)?;
        for mode in PhyMode::ALL {
            if self.mode_supported(mode) {
                tech |= mode.link_codeword();
            } else {
                tech &= !mode.link_codeword();
            }
        }
        self.write_mmd(mmd::AN, an::ADVERTISE + 1, tech)?;

        let supported = self.supported;
        self.modify_mmd(mmd::AN, an::ADVERTISE, |mut v| {
            for (ability, bit) in [
                (Abilities::PAUSE, base_page::PAUSE),
                (Abilities::ASYM_PAUSE, base_page::ASYM_PAUSE),
            ] {
                if supported.contains(ability) {
                    v |= bit;
                } else {
                    v &= !bit;
                }
            }
            v & !base_page::NP
        })?;
        Ok(())
    }

    pub(crate) fn disable_an(&mut self) -> Result<()> {
        self.modify_mmd(mmd::AN, reg::CTRL1, |v| v & !ctrl1::AN_ENABLE)?;
        Ok(())
    }

    pub(crate) fn restart_an(&mut self) -> Result<()> {
        self.modify_mmd(mmd::AN, reg::CTRL1, |v| {
            v | ctrl1::AN_ENABLE | ctrl1::AN_RESTART
        })?;
        Ok(())
    }

    pub(crate) fn enable_parallel_detect(&mut self) -> Result<()> {
        self.modify_mmd(mmd::AN, an::KR_CTRL, |v| v | kr_ctrl::PDETECT)?;
        Ok(())
    }
}
