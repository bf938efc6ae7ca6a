//! PHY configuration
//!
//! Everything the platform tells the driver at attach time: which SerDes
//! lane the PHY drives, which KX speed accompanies 10GBASE-KR, and any
//! board-specific SerDes tuning. [`PhyConfig`] is built either with the
//! `with_*` builder methods or from firmware device properties through
//! [`PhyConfig::from_properties`].

use crate::error::{ConfigError, ConfigResult};
use crate::internal::constants::{MAX_SERDES_CHANNEL, SPEED_CLASSES};
use crate::serdes::tuning::{SerdesTuning, SpeedClass, TuningParam};

// =============================================================================
// Link Parameters
// =============================================================================

/// Ethernet link speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    /// 1000 Mbps (1000BASE-KX)
    Mbps1000,
    /// 2500 Mbps (2500BASE-KX)
    Mbps2500,
    /// 10000 Mbps (10GBASE-KR)
    #[default]
    Mbps10000,
}

impl Speed {
    /// Speed in Mbps
    pub const fn as_mbps(self) -> u32 {
        match self {
            Speed::Mbps1000 => 1000,
            Speed::Mbps2500 => 2500,
            Speed::Mbps10000 => 10000,
        }
    }

    /// SerDes speed class for this speed
    pub const fn class(self) -> SpeedClass {
        match self {
            Speed::Mbps1000 => SpeedClass::Speed1000,
            Speed::Mbps2500 => SpeedClass::Speed2500,
            Speed::Mbps10000 => SpeedClass::Speed10000,
        }
    }
}

/// Ethernet duplex mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Duplex {
    /// Half duplex
    Half,
    /// Full duplex
    #[default]
    Full,
}

// =============================================================================
// SerDes Lane
// =============================================================================

/// Index of the SerDes lane inside the shared CMU (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerdesChannel(u8);

impl SerdesChannel {
    /// Validate a lane index
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidChannel`] when `index` is above 7.
    pub const fn new(index: u32) -> ConfigResult<Self> {
        if index > MAX_SERDES_CHANNEL as u32 {
            return Err(ConfigError::InvalidChannel);
        }
        Ok(Self(index as u8))
    }

    /// Lane index
    pub const fn index(self) -> u8 {
        self.0
    }

    /// tx and rx rate-change request bits in CMU REG16
    pub const fn rate_change_mask(self) -> u16 {
        let tx = 15 - self.0 * 2;
        let rx = 14 - self.0 * 2;
        (1 << tx) | (1 << rx)
    }

    /// rx and tx ready bits in CMU REG15
    pub const fn ready_mask(self) -> u16 {
        (1 << self.0) | (1 << (self.0 + 8))
    }
}

// =============================================================================
// Speed Set
// =============================================================================

/// Speeds the board supports next to 10GBASE-KR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpeedSet {
    /// 1000BASE-KX and 10GBASE-KR (property value 0)
    #[default]
    Kx1000Kr10000,
    /// 2500BASE-KX and 10GBASE-KR (property value 1)
    Kx2500Kr10000,
}

impl SpeedSet {
    /// Decode the `amd,speed-set` property
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidSpeedSet`] for any value other than 0 or 1.
    pub const fn from_property(value: u32) -> ConfigResult<Self> {
        match value {
            0 => Ok(SpeedSet::Kx1000Kr10000),
            1 => Ok(SpeedSet::Kx2500Kr10000),
            _ => Err(ConfigError::InvalidSpeedSet),
        }
    }

    /// Speed used while in KX mode
    pub const fn kx_speed(self) -> Speed {
        match self {
            SpeedSet::Kx1000Kr10000 => Speed::Mbps1000,
            SpeedSet::Kx2500Kr10000 => Speed::Mbps2500,
        }
    }
}

// =============================================================================
// Device Properties
// =============================================================================

/// Property names read by [`PhyConfig::from_properties`]
pub mod property {
    /// SerDes lane index (required)
    pub const SERDES_CHANNEL: &str = "amd,serdes-channel";
    /// Speed set selector (optional, default 0)
    pub const SPEED_SET: &str = "amd,speed-set";
}

/// Firmware-supplied device properties (ACPI `_DSD`, device tree, ...)
pub trait DeviceProperties {
    /// Read a scalar property, `None` when absent
    fn read_u32(&self, name: &str) -> Option<u32>;

    /// Read an array property, `None` when absent
    ///
    /// Copies up to `out.len()` elements and returns the number of elements
    /// the property actually holds.
    fn read_u32_array(&self, name: &str, out: &mut [u32]) -> Option<usize>;
}

// =============================================================================
// PHY Configuration
// =============================================================================

/// Attach-time configuration of one PHY instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyConfig {
    channel: SerdesChannel,
    speed_set: SpeedSet,
    tuning: SerdesTuning,
}

impl PhyConfig {
    /// Configuration with the built-in tuning tables
    pub const fn new(channel: SerdesChannel, speed_set: SpeedSet) -> Self {
        Self {
            channel,
            speed_set,
            tuning: SerdesTuning::DEFAULT,
        }
    }

    /// Override one tuning table
    #[must_use]
    pub fn with_tuning(mut self, param: TuningParam, values: [u32; SPEED_CLASSES]) -> Self {
        self.tuning.set(param, values);
        self
    }

    /// Override one tuning table from a slice
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidTuningLength`] unless `values` has one entry
    /// per speed class.
    pub fn try_with_tuning(mut self, param: TuningParam, values: &[u32]) -> ConfigResult<Self> {
        self.tuning.try_set(param, values)?;
        Ok(self)
    }

    /// Build the configuration from firmware properties
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingProperty`]: no `amd,serdes-channel`
    /// - [`ConfigError::InvalidChannel`]: lane index above 7
    /// - [`ConfigError::InvalidSpeedSet`]: `amd,speed-set` not 0 or 1
    /// - [`ConfigError::InvalidTuningLength`]: a tuning array of the wrong size
    pub fn from_properties<P: DeviceProperties + ?Sized>(props: &P) -> ConfigResult<Self> {
        let channel = props
            .read_u32(property::SERDES_CHANNEL)
            .ok_or(ConfigError::MissingProperty)?;
        let channel = SerdesChannel::new(channel)?;

        let speed_set = match props.read_u32(property::SPEED_SET) {
            Some(value) => SpeedSet::from_property(value)?,
            None => SpeedSet::default(),
        };

        let mut config = Self::new(channel, speed_set);
        for param in TuningParam::ALL {
            let mut values = [0u32; SPEED_CLASSES];
            if let Some(len) = props.read_u32_array(param.property(), &mut values) {
                if len != SPEED_CLASSES {
                    return Err(ConfigError::InvalidTuningLength);
                }
                config.tuning.set(param, values);
            }
        }

        Ok(config)
    }

    /// SerDes lane
    pub const fn channel(&self) -> SerdesChannel {
        self.channel
    }

    /// Speed set
    pub const fn speed_set(&self) -> SpeedSet {
        self.speed_set
    }

    /// Tuning tables
    pub const fn tuning(&self) -> &SerdesTuning {
        &self.tuning
    }
}
