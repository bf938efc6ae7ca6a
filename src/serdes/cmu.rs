//! Shared CMU and the rate-change bracket
//!
//! All SerDes lanes on the chip share one clock multiplier unit. Before a
//! lane's rate registers are rewritten the lane's rate-change request bits
//! are raised in CMU REG16; afterwards they are dropped and the lane's
//! ready bits in REG15 are polled. The whole sequence must not interleave
//! with another lane's, so [`SerdesCmu`] owns the CMU window behind a
//! single lock and hands out a [`RateChange`] only inside it.

use embedded_hal::delay::DelayNs;

use crate::config::SerdesChannel;
use crate::hal::mmio::SerdesRegs;
use crate::internal::constants::{RATECHANGE_POLL_COUNT, RATECHANGE_POLL_INTERVAL_US};
use crate::internal::log::warning;
use crate::internal::serdes_regs::cmu;
use crate::sync::CriticalSectionCell;

/// Outcome of the ready poll that closes a rate change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RateChangeStatus {
    /// Both ready bits were seen on poll number `polls`
    Ready {
        /// Polls issued, 1-based
        polls: u32,
    },
    /// The poll budget ran out; the lane registers are kept as written
    NotReady {
        /// Last REG15 value read
        last: u16,
    },
}

impl RateChangeStatus {
    /// Whether the lane reported ready
    pub const fn is_ready(self) -> bool {
        matches!(self, RateChangeStatus::Ready { .. })
    }
}

// =============================================================================
// Rate Change Bracket
// =============================================================================

/// An open rate change on one lane
///
/// Created by [`RateChange::begin`], closed by [`RateChange::complete`].
/// Holding the `&mut` to the CMU window for its whole life keeps other
/// lanes out of the bracket.
#[derive(Debug)]
pub struct RateChange<'c, C: SerdesRegs> {
    cmu: &'c mut C,
    channel: SerdesChannel,
}

impl<'c, C: SerdesRegs> RateChange<'c, C> {
    /// Raise the lane's tx and rx rate-change request bits
    pub fn begin(cmu: &'c mut C, channel: SerdesChannel) -> Self {
        let reg = cmu.read(cmu::REG16);
        cmu.write(cmu::REG16, reg | channel.rate_change_mask());
        Self { cmu, channel }
    }

    /// Drop the request bits and wait for the lane to report ready
    ///
    /// Never fails: a lane that does not come ready within
    /// 500 × 50 µs is logged and reported as [`RateChangeStatus::NotReady`].
    pub fn complete<D: DelayNs>(self, delay: &mut D) -> RateChangeStatus {
        let reg = self.cmu.read(cmu::REG16);
        self.cmu
            .write(cmu::REG16, reg & !self.channel.rate_change_mask());

        let ready = self.channel.ready_mask();
        let mut last = 0;
        for poll in 1..=RATECHANGE_POLL_COUNT {
            delay.delay_us(RATECHANGE_POLL_INTERVAL_US);
            last = self.cmu.read(cmu::REG15);
            if last & ready == ready {
                return RateChangeStatus::Ready { polls: poll };
            }
        }

        warning!(
            "SerDes lane {} rx/tx not ready ({:#x})",
            self.channel.index(),
            last
        );
        RateChangeStatus::NotReady { last }
    }
}

// =============================================================================
// Shared CMU
// =============================================================================

/// The chip-wide CMU window and its lock
///
/// One instance exists per chip and is shared (by reference) by every
/// PHY instance whose lane lives behind it.
pub struct SerdesCmu<C> {
    regs: CriticalSectionCell<C>,
}

impl<C> SerdesCmu<C> {
    /// Wrap the CMU window (const, suitable for static initialization)
    pub const fn new(regs: C) -> Self {
        Self {
            regs: CriticalSectionCell::new(regs),
        }
    }

    /// Give back the CMU window
    pub fn into_inner(self) -> C {
        self.regs.into_inner()
    }
}

impl<C: SerdesRegs> SerdesCmu<C> {
    /// Run `program` inside a locked rate-change bracket for `channel`
    ///
    /// The lock is held from the REG16 request through the last ready poll.
    pub fn rate_change<D, T, F>(
        &self,
        channel: SerdesChannel,
        delay: &mut D,
        program: F,
    ) -> (T, RateChangeStatus)
    where
        D: DelayNs,
        F: FnOnce() -> T,
    {
        self.regs.with(|regs| {
            let bracket = RateChange::begin(regs, channel);
            let out = program();
            (out, bracket.complete(delay))
        })
    }
}
