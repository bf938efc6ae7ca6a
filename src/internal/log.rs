//! Logging macros
//!
//! Thin wrappers that give the driver one logging seam regardless of the
//! backend the firmware links:
//!
//! - `defmt` feature: forwards to `defmt::{debug,info,warn,error}!`
//!   (`warning!` maps to `warn!`; a `warn` macro would clash with the
//!   built-in lint attribute on re-export)
//! - `log` feature (default): forwards to the `log` facade
//! - neither: the arguments are still type-checked, nothing is emitted
//!
//! `defmt` takes precedence when both features are enabled. Format strings
//! must stay within the subset both backends accept (`{}`, `{:?}`, `{:#x}`).

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::debug!($($arg)*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

macro_rules! info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($($arg)*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::info!($($arg)*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

macro_rules! warning {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::warn!($($arg)*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

macro_rules! error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::error!($($arg)*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::error!($($arg)*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

pub(crate) use {debug, error, info, warning};
