//! SerDes Register Definitions
//!
//! Offsets and bit fields of the CMU window (shared by all lanes) and the
//! per-lane RXTX window.

// Allow unused constants - these are complete register definitions for reference
#![allow(dead_code)]

use crate::hal::mmio::Field;

// =============================================================================
// CMU (Clock Multiplier Unit) Window
// =============================================================================

/// CMU register offsets
pub mod cmu {
    /// Lane ready status: rx ready at bit `ch`, tx ready at bit `ch + 8`
    pub const REG15: u16 = 0x003c;
    /// Lane rate change request: tx at bit `15 - 2ch`, rx at bit `14 - 2ch`
    pub const REG16: u16 = 0x0040;
}

// =============================================================================
// RXTX Lane Window
// =============================================================================

/// RXTX lane register offsets
pub mod rxtx {
    /// TX data rate / word mode
    pub const REG3: u16 = 0x000c;
    /// TX amplitude
    pub const REG5: u16 = 0x0014;
    /// RX data rate / word mode
    pub const REG6: u16 = 0x0018;
    /// Baseline wander correction
    pub const REG20: u16 = 0x0050;
    /// PLL select / CDR rate
    pub const REG53: u16 = 0x00d4;
    /// PQ skew
    pub const REG114: u16 = 0x01c8;
}

/// TX data rate
pub const TX_DATA_RATE: Field = Field::new(rxtx::REG3, 14, 2);
/// TX word mode
pub const TX_WORD_MODE: Field = Field::new(rxtx::REG3, 11, 3);
/// TX amplitude control
pub const TXAMP_CNTL: Field = Field::new(rxtx::REG5, 7, 4);
/// RX data rate
pub const RX_DATA_RATE: Field = Field::new(rxtx::REG6, 9, 2);
/// RX word mode
pub const RX_WORD_MODE: Field = Field::new(rxtx::REG6, 11, 3);
/// Baseline wander correction enable
pub const BLWC_ENA: Field = Field::new(rxtx::REG20, 2, 1);
/// RX PLL select
pub const RX_PLLSELECT: Field = Field::new(rxtx::REG53, 15, 1);
/// TX PLL select
pub const TX_PLLSELECT: Field = Field::new(rxtx::REG53, 14, 1);
/// CDR phase interpolator speed select
pub const PI_SPD_SEL_CDR: Field = Field::new(rxtx::REG53, 10, 4);
/// PQ skew
pub const PQ_REG: Field = Field::new(rxtx::REG114, 9, 7);

// =============================================================================
// Field Values
// =============================================================================

/// Data rate codes
pub mod data_rate {
    /// Full rate (10G)
    pub const FULL: u32 = 0x0;
    /// Half rate (2.5G)
    pub const HALF: u32 = 0x1;
    /// Fifth rate (1G)
    pub const FIFTH: u32 = 0x3;
}

/// Word mode codes
pub mod word_mode {
    /// 66-bit word
    pub const BITS_66: u32 = 0x7;
    /// 10-bit word
    pub const BITS_10: u32 = 0x1;
}

/// PLL select codes
pub mod pll {
    /// 10G PLL
    pub const PLL_10G: u32 = 0x1;
    /// 1G PLL
    pub const PLL_1G: u32 = 0x0;
}
