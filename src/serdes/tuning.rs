//! SerDes tuning tables
//!
//! Each speed class has its own analog settings. The defaults below are
//! the values validated for the reference backplane; boards override any
//! of the four tables through device properties.

use crate::error::{ConfigError, ConfigResult};
use crate::internal::constants::SPEED_CLASSES;

// =============================================================================
// Speed Classes
// =============================================================================

/// SerDes speed class, the index into every tuning table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpeedClass {
    /// 1000BASE-KX
    Speed1000 = 0,
    /// 2500BASE-KX
    Speed2500 = 1,
    /// 10GBASE-KR
    Speed10000 = 2,
}

impl SpeedClass {
    /// All classes in table order
    pub const ALL: [SpeedClass; SPEED_CLASSES] = [
        SpeedClass::Speed1000,
        SpeedClass::Speed2500,
        SpeedClass::Speed10000,
    ];

    /// Position in the tuning tables
    pub const fn index(self) -> usize {
        self as usize
    }
}

// =============================================================================
// Tuning Parameters
// =============================================================================

/// One of the four overridable tuning tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TuningParam {
    /// Baseline wander correction enable
    Blwc,
    /// CDR phase interpolator rate
    CdrRate,
    /// PQ skew
    PqSkew,
    /// TX amplitude
    TxAmp,
}

impl TuningParam {
    /// All parameters
    pub const ALL: [TuningParam; 4] = [
        TuningParam::Blwc,
        TuningParam::CdrRate,
        TuningParam::PqSkew,
        TuningParam::TxAmp,
    ];

    /// Device property carrying the override array
    pub const fn property(self) -> &'static str {
        match self {
            TuningParam::Blwc => "amd,serdes-blwc",
            TuningParam::CdrRate => "amd,serdes-cdr-rate",
            TuningParam::PqSkew => "amd,serdes-pq-skew",
            TuningParam::TxAmp => "amd,serdes-tx-amp",
        }
    }
}

/// Tuning values resolved for one speed class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LaneTuning {
    /// Baseline wander correction enable
    pub blwc: u32,
    /// CDR phase interpolator rate
    pub cdr_rate: u32,
    /// PQ skew
    pub pq_skew: u32,
    /// TX amplitude
    pub tx_amp: u32,
}

// =============================================================================
// Tuning Tables
// =============================================================================

/// Per-speed-class tuning tables, indexed by [`SpeedClass::index`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerdesTuning {
    blwc: [u32; SPEED_CLASSES],
    cdr_rate: [u32; SPEED_CLASSES],
    pq_skew: [u32; SPEED_CLASSES],
    tx_amp: [u32; SPEED_CLASSES],
}

impl SerdesTuning {
    /// Built-in tables
    pub const DEFAULT: Self = Self {
        blwc: [1, 1, 0],
        cdr_rate: [0x2, 0x2, 0x7],
        pq_skew: [0x0a, 0x0a, 0x1e],
        tx_amp: [0x0f, 0x0f, 0x0a],
    };

    const fn table(&self, param: TuningParam) -> &[u32; SPEED_CLASSES] {
        match param {
            TuningParam::Blwc => &self.blwc,
            TuningParam::CdrRate => &self.cdr_rate,
            TuningParam::PqSkew => &self.pq_skew,
            TuningParam::TxAmp => &self.tx_amp,
        }
    }

    fn table_mut(&mut self, param: TuningParam) -> &mut [u32; SPEED_CLASSES] {
        match param {
            TuningParam::Blwc => &mut self.blwc,
            TuningParam::CdrRate => &mut self.cdr_rate,
            TuningParam::PqSkew => &mut self.pq_skew,
            TuningParam::TxAmp => &mut self.tx_amp,
        }
    }

    /// Value of `param` for `class`
    pub const fn value(&self, param: TuningParam, class: SpeedClass) -> u32 {
        self.table(param)[class.index()]
    }

    /// Replace a whole table
    pub fn set(&mut self, param: TuningParam, values: [u32; SPEED_CLASSES]) {
        *self.table_mut(param) = values;
    }

    /// Replace a whole table from a slice of unknown length
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidTuningLength`] unless the slice holds exactly
    /// one entry per speed class; the table is left unchanged.
    pub fn try_set(&mut self, param: TuningParam, values: &[u32]) -> ConfigResult<()> {
        let values: [u32; SPEED_CLASSES] = values
            .try_into()
            .map_err(|_| ConfigError::InvalidTuningLength)?;
        self.set(param, values);
        Ok(())
    }

    /// All four values for one speed class
    pub const fn lane(&self, class: SpeedClass) -> LaneTuning {
        let i = class.index();
        LaneTuning {
            blwc: self.blwc[i],
            cdr_rate: self.cdr_rate[i],
            pq_skew: self.pq_skew[i],
            tx_amp: self.tx_amp[i],
        }
    }
}

impl Default for SerdesTuning {
    fn default() -> Self {
        Self::DEFAULT
    }
}
