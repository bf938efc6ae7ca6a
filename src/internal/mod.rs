//! Internal Implementation Details
//!
//! This module contains implementation details that are not part of the public API.
//! Types in this module may change without notice between minor versions.
//!
//! # Contents
//!
//! - [`constants`]: Poll budgets, delays and PHY identification
//! - [`log`]: Logging macros routed to `defmt` or `log`
//! - [`mmd_regs`]: Clause 45 PMA/PCS/AN register definitions
//! - [`serdes_regs`]: SerDes CMU and RXTX lane register definitions
//!
//! # Stability
//!
//! **WARNING:** This module is `pub(crate)` only. Do not depend on any types
//! or functions in this module from external code. They are subject to change
//! without notice.

pub(crate) mod constants;
pub(crate) mod log;
pub(crate) mod mmd_regs;
pub(crate) mod serdes_regs;
