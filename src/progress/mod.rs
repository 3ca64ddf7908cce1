//! Progress indicator throttling.

pub mod clock;
pub mod tracker;

pub use clock::{now_millis, Clock, ManualClock, SystemClock};
pub use tracker::{ProgressEntry, ProgressSettings, ProgressTracker};
