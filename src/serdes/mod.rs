//! SerDes rate-change engine
//!
//! - [`tuning`]: per-speed-class analog settings and their overrides
//! - [`cmu`]: the chip-wide CMU, its lock and the rate-change bracket
//! - [`lane`]: RXTX lane programming for a speed class

pub mod cmu;
pub mod lane;
pub mod tuning;

pub use cmu::{RateChange, RateChangeStatus, SerdesCmu};
pub use lane::LaneRate;
pub use tuning::{LaneTuning, SerdesTuning, SpeedClass, TuningParam};
