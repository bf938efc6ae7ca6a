//! Clause 45 Register Definitions
//!
//! Register addresses and bit definitions for the three MMDs the XGBE
//! backplane PHY exposes over MDIO (IEEE 802.3 Clause 45, Clauses 72/73).
//!
//! | MMD | Name | Used for |
//! |-----|------|----------|
//! | 1 | PMA/PMD | KR training, FEC ability/control |
//! | 3 | PCS | Speed select, PCS type, link status, low power, reset |
//! | 7 | AN | Backplane auto-negotiation pages and interrupts |

// Allow unused constants - these are complete register definitions for reference
#![allow(dead_code)]

// =============================================================================
// MMD Device Addresses
// =============================================================================

/// MMD device addresses
pub mod mmd {
    /// PMA/PMD
    pub const PMAPMD: u8 = 1;
    /// PCS
    pub const PCS: u8 = 3;
    /// Auto-negotiation
    pub const AN: u8 = 7;
}

// =============================================================================
// Register Addresses
// =============================================================================

/// Register addresses shared by all MMDs
pub mod reg {
    /// Control 1
    pub const CTRL1: u16 = 0x00;
    /// Status 1
    pub const STAT1: u16 = 0x01;
    /// Device identifier 1
    pub const DEVID1: u16 = 0x02;
    /// Device identifier 2
    pub const DEVID2: u16 = 0x03;
    /// Devices in package 1
    pub const DEVS1: u16 = 0x05;
    /// Devices in package 2
    pub const DEVS2: u16 = 0x06;
    /// PCS control 2
    pub const CTRL2: u16 = 0x07;
}

/// PMA/PMD registers (MMD 1)
pub mod pma {
    /// 10GBASE-KR PMD control
    pub const KR_PMD_CTRL: u16 = 0x0096;
    /// 10GBASE-R FEC ability
    pub const FEC_ABILITY: u16 = 0x00aa;
    /// 10GBASE-R FEC control
    pub const FEC_CTRL: u16 = 0x00ab;
}

/// Auto-negotiation registers (MMD 7)
pub mod an {
    /// Local base page advertisement (word 1; words 2 and 3 follow)
    pub const ADVERTISE: u16 = 0x0010;
    /// Link partner base page ability (word 1; words 2 and 3 follow)
    pub const LPA: u16 = 0x0013;
    /// Local extended next page (word 1; words 2 and 3 follow)
    pub const XNP: u16 = 0x0016;
    /// Link partner extended next page
    pub const LPX: u16 = 0x0019;
    /// Vendor interrupt mask
    pub const INT_MASK: u16 = 0x8001;
    /// Vendor interrupt status
    pub const INT: u16 = 0x8002;
    /// Vendor KR control
    pub const KR_CTRL: u16 = 0x8003;
}

// =============================================================================
// Register Bit Definitions
// =============================================================================

/// Control 1 bits (PCS and AN)
pub mod ctrl1 {
    /// Soft reset (self-clearing)
    pub const RESET: u16 = 1 << 15;
    /// Low power
    pub const LPOWER: u16 = 1 << 11;
    /// Speed selection mask
    pub const SPEEDSEL: u16 = 0x207c;
    /// 10 Gb/s speed selection
    pub const SPEED_10G: u16 = 0x2040;
    /// 1 Gb/s speed selection
    pub const SPEED_1G: u16 = 0x0040;
    /// AN enable (AN MMD only)
    pub const AN_ENABLE: u16 = 1 << 12;
    /// AN restart (AN MMD only)
    pub const AN_RESTART: u16 = 1 << 9;
}

/// Status 1 bits
pub mod stat1 {
    /// Receive link status (latch-low)
    pub const LSTATUS: u16 = 1 << 2;
}

/// PCS control 2 bits
pub mod pcs_ctrl2 {
    /// PCS type selection mask
    pub const TYPE: u16 = 0x0003;
    /// 10GBASE-R (KR)
    pub const TYPE_10GBR: u16 = 0x0000;
    /// 10GBASE-X (KX)
    pub const TYPE_10GBX: u16 = 0x0001;
}

/// Devices-in-package bits
pub mod devs {
    /// PMA/PMD present
    pub const PMAPMD: u32 = 1 << 1;
    /// PCS present
    pub const PCS: u32 = 1 << 3;
    /// Auto-negotiation present
    pub const AN: u32 = 1 << 7;
}

/// KR PMD control bits
pub mod kr_pmd {
    /// Start link training
    pub const TRAINING_START: u16 = 0x01;
    /// Link training enabled
    pub const TRAINING_ENABLE: u16 = 0x02;
}

/// FEC ability/control bits
pub mod fec {
    /// FEC enable
    pub const ENABLE: u16 = 0x01;
    /// Forward decoding errors
    pub const FORWARD: u16 = 0x02;
    /// Both bits
    pub const MASK: u16 = 0x03;
}

/// Base page advertisement / link partner ability bits
pub mod base_page {
    /// Next page exchange requested (word 1)
    pub const NP: u16 = 1 << 15;
    /// Symmetric pause (word 1)
    pub const PAUSE: u16 = 0x0400;
    /// Asymmetric pause (word 1)
    pub const ASYM_PAUSE: u16 = 0x0800;
    /// 10GBASE-KR technology ability (word 2)
    pub const TECH_KR: u16 = 0x0080;
    /// 1000BASE-KX technology ability (word 2)
    pub const TECH_KX: u16 = 0x0020;
    /// FEC ability and request (word 3)
    pub const FEC: u16 = 0xc000;
}

/// Extended next page bits
pub mod xnp {
    /// Null message code
    pub const MCF_NULL_MESSAGE: u16 = 0x0001;
    /// Acknowledge 2 (message processed)
    pub const ACK_PROCESSED: u16 = 1 << 12;
    /// Message page
    pub const MP_FORMATTED: u16 = 1 << 13;
    /// Next page follows
    pub const NP_EXCHANGE: u16 = 1 << 15;
}

/// AN interrupt status / mask bits
pub mod an_int {
    /// Negotiation complete
    pub const COMPLETE: u16 = 0x01;
    /// Incompatible link
    pub const INCOMPAT_LINK: u16 = 0x02;
    /// Page received
    pub const PAGE_RECEIVED: u16 = 0x04;
    /// All events
    pub const MASK: u16 = 0x07;
}

/// KR control bits (AN MMD vendor register)
pub mod kr_ctrl {
    /// Enable parallel detection
    pub const PDETECT: u16 = 0x01;
}
