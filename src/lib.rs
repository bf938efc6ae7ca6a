//! AMD XGBE Backplane PHY Driver
//!
//! A `no_std`, `no_alloc` Rust driver for the 10GbE backplane PHY found in
//! AMD XGBE Ethernet controllers: 10GBASE-KR with link training and FEC,
//! 1000BASE-KX / 2500BASE-KX, and Clause 73 auto-negotiation between them.
//!
//! # Architecture
//!
//! The driver is organized into four layers:
//!
//! 1. **HAL Layer** ([`hal`]): Clause 45 MDIO, SerDes register windows, interrupt line
//! 2. **SerDes Layer** ([`serdes`]): shared CMU rate-change bracket, lane programming, tuning
//! 3. **PHY Layer** ([`phy`]): mode controller, AN state machine, link monitor
//! 4. **Sync Layer** ([`sync`]): per-device lock and deferred AN interrupt work
//!
//! ## Standard Compliance
//!
//! - **IEEE 802.3 Clause 45**: MMD register access (PMA/PMD, PCS, AN)
//! - **IEEE 802.3 Clause 73**: backplane auto-negotiation, next pages, parallel detection
//! - **IEEE 802.3 Clause 72/74**: KR training start and FEC resolution
//!
//! # Features
//!
//! - `log` (default): Log through the `log` facade
//! - `defmt`: Log through `defmt` and derive `defmt::Format` for public types
//!
//! # Example
//!
//! ```ignore
//! use ph_xgbe_phy::{PhyConfig, SharedXgbePhy, XgbePhy};
//! use ph_xgbe_phy::hal::MmioWindow;
//! use ph_xgbe_phy::serdes::SerdesCmu;
//!
//! // One CMU per chip, shared by every lane
//! static CMU: SerdesCmu<MmioWindow> = SerdesCmu::new(unsafe { MmioWindow::new(CMU_BASE) });
//!
//! let config = PhyConfig::from_properties(&acpi_props)?;
//! let lane = unsafe { MmioWindow::new(RXTX_BASE) };
//! let phy = XgbePhy::probe(0, mdio, lane, &CMU, delay, config)?;
//!
//! let phy = SharedXgbePhy::new(phy, an_irq);
//! phy.soft_reset()?;
//! phy.config_init()?;
//! phy.config_aneg()?;
//!
//! // AN interrupt handler
//! phy.on_interrupt();
//!
//! // Worker task
//! phy.run_pending();
//! let status = phy.read_status()?;
//! ```

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here; Cargo.toml mirrors them for workspace tooling.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements,
    clippy::let_underscore_future
)]

// =============================================================================
// Modules
// =============================================================================

pub mod config;
pub mod error;
pub mod hal;
pub mod phy;
pub mod serdes;
pub mod sync;

// Internal implementation details (pub(crate) only)
mod internal;

// Test utilities (only available during testing)
#[cfg(test)]
mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{DeviceProperties, Duplex, PhyConfig, SerdesChannel, Speed, SpeedSet};
pub use error::{ConfigError, ConfigResult, Error, IoError, IoResult, Result};

// Re-export PHY types
pub use phy::{
    Abilities, AnCycle, AnState, AnWorker, LinkStatus, PhyDriver, PhyMode, RxState, XgbePhy,
};

pub use serdes::{RateChangeStatus, SerdesCmu, SerdesTuning, SpeedClass, TuningParam};
pub use sync::SharedXgbePhy;

/// Shared driver constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on driver types.
pub mod constants {
    pub use crate::internal::constants::{
        // Timing
        PCS_POWER_CYCLE_US,
        RATECHANGE_POLL_COUNT,
        RATECHANGE_POLL_INTERVAL_US,
        SOFT_RESET_POLL_COUNT,
        SOFT_RESET_POLL_INTERVAL_MS,
        // Identification
        XGBE_PHY_ID,
        XGBE_PHY_ID_MASK,
    };
}
