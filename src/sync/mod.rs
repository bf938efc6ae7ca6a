//! Synchronization and Concurrency Support
//!
//! This module provides synchronization primitives and the concurrency
//! coordinator for the XGBE PHY driver. It includes:
//!
//! - **Primitives** (`primitives`): Low-level synchronization types
//!   - [`CriticalSectionCell`] - ISR-safe interior mutability
//!
//! - **Work Queue** (`workqueue`): Deferred AN tasks
//!   - [`WorkQueue`], [`AnWork`] - coalescing single-threaded FIFO
//!
//! - **Shared Wrapper** (`shared`): ISR-safe PHY wrapper
//!   - [`SharedXgbePhy`] - per-device lock, interrupt relay and AN worker
//!
//! # Locks
//!
//! Two locks exist: the per-device lock inside [`SharedXgbePhy`], held for
//! every lifecycle call and for each state machine run, and the chip-wide
//! CMU lock inside [`SerdesCmu`](crate::serdes::SerdesCmu), held for one
//! rate-change bracket. The CMU lock is always taken inside the device
//! lock, never the other way round.

mod primitives;
mod shared;
mod workqueue;

pub use primitives::CriticalSectionCell;
pub use shared::SharedXgbePhy;
pub use workqueue::{AnWork, WorkQueue};
