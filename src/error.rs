//! Error types for the XGBE backplane PHY driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Probe, configuration and negotiation setup failures
//! - [`IoError`]: Runtime management-bus and hardware failures
//!
//! The unified [`Error`] enum wraps both domain errors and is returned
//! by most driver methods.
//!
//! Auto-negotiation failures (no common mode, unexpected interrupt state)
//! are *not* errors: they are reported through [`AnState`](crate::phy::AnState)
//! and the diagnostic log, and heal on the next link transition.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration and attachment errors
///
/// These errors occur while building the PHY context from device
/// properties, or when the requested link policy cannot be honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Invalid configuration parameter
    InvalidConfig,
    /// SerDes channel outside the CMU lane range (0-7)
    InvalidChannel,
    /// Speed set property is neither 0 (1G/10G) nor 1 (2.5G/10G)
    InvalidSpeedSet,
    /// A required device property is absent
    MissingProperty,
    /// A tuning override does not carry one entry per speed class
    InvalidTuningLength,
    /// Half duplex was requested on a full-duplex-only link
    UnsupportedDuplex,
    /// Neither KR nor KX is in the supported set
    NoSupportedMode,
    /// The AN MMD is not present in the device package
    AnUnavailable,
    /// The interrupt line could not be allocated
    IrqUnavailable,
    /// PHY identifier does not match an XGBE PHY
    UnknownPhy,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidConfig => "invalid configuration",
            ConfigError::InvalidChannel => "invalid SerDes channel",
            ConfigError::InvalidSpeedSet => "invalid speed set",
            ConfigError::MissingProperty => "missing device property",
            ConfigError::InvalidTuningLength => "invalid tuning array length",
            ConfigError::UnsupportedDuplex => "unsupported duplex",
            ConfigError::NoSupportedMode => "no supported KR/KX mode",
            ConfigError::AnUnavailable => "auto-negotiation MMD not present",
            ConfigError::IrqUnavailable => "interrupt line unavailable",
            ConfigError::UnknownPhy => "unknown PHY identifier",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Runtime hardware errors
///
/// These errors occur while talking to the PHY over the management bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// Operation timed out (e.g. PCS soft reset never cleared)
    Timeout,
    /// Invalid state for operation
    InvalidState,
    /// PHY communication error (MDIO timeout or failure)
    PhyError,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::Timeout => "operation timed out",
            IoError::InvalidState => "invalid state for operation",
            IoError::PhyError => "PHY communication error",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Config(ConfigError::InvalidChannel)) => { /* ... */ }
///     Err(Error::Io(IoError::Timeout)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// I/O error
    Io(IoError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for PHY operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for I/O operations
pub type IoResult<T> = core::result::Result<T, IoError>;

// =============================================================================
// Unit Tests
// =============================================================================
