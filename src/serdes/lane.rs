//! Per-lane SerDes programming
//!
//! Rewrites a lane's RXTX registers for one speed class. Must run inside a
//! [`RateChange`](super::cmu::RateChange) bracket for that lane.

use crate::hal::mmio::SerdesRegs;
use crate::internal::serdes_regs::{
    BLWC_ENA, PI_SPD_SEL_CDR, PQ_REG, RX_DATA_RATE, RX_PLLSELECT, RX_WORD_MODE, TXAMP_CNTL,
    TX_DATA_RATE, TX_PLLSELECT, TX_WORD_MODE, data_rate, pll, word_mode,
};
use crate::serdes::tuning::{LaneTuning, SpeedClass};

/// Data rate, word mode and PLL for one speed class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LaneRate {
    /// TX/RX data rate code
    pub data_rate: u32,
    /// TX/RX word mode code
    pub word_mode: u32,
    /// TX/RX PLL select
    pub pll: u32,
}

impl LaneRate {
    /// Fixed lane rate for a speed class
    pub const fn for_class(class: SpeedClass) -> Self {
        match class {
            SpeedClass::Speed10000 => Self {
                data_rate: data_rate::FULL,
                word_mode: word_mode::BITS_66,
                pll: pll::PLL_10G,
            },
            SpeedClass::Speed2500 => Self {
                data_rate: data_rate::HALF,
                word_mode: word_mode::BITS_10,
                pll: pll::PLL_1G,
            },
            SpeedClass::Speed1000 => Self {
                data_rate: data_rate::FIFTH,
                word_mode: word_mode::BITS_10,
                pll: pll::PLL_1G,
            },
        }
    }
}

/// Program a lane for `class`
///
/// Field order: tx rate, tx word, tx amplitude, rx rate, rx word, blwc,
/// rx pll, tx pll, cdr rate, pq skew.
pub fn program<R: SerdesRegs + ?Sized>(lane: &mut R, class: SpeedClass, tuning: &LaneTuning) {
    let rate = LaneRate::for_class(class);

    lane.write_field(TX_DATA_RATE, rate.data_rate);
    lane.write_field(TX_WORD_MODE, rate.word_mode);
    lane.write_field(TXAMP_CNTL, tuning.tx_amp);

    lane.write_field(RX_DATA_RATE, rate.data_rate);
    lane.write_field(RX_WORD_MODE, rate.word_mode);

    lane.write_field(BLWC_ENA, tuning.blwc);

    lane.write_field(RX_PLLSELECT, rate.pll);
    lane.write_field(TX_PLLSELECT, rate.pll);
    lane.write_field(PI_SPD_SEL_CDR, tuning.cdr_rate);

    lane.write_field(PQ_REG, tuning.pq_skew);
}
