//! Resolution context: per-call options and the cross-provider side-channel.

pub mod options;
pub mod point_of_reference;

pub use options::Context;
pub use point_of_reference::{FallbackFlag, PointOfReference};
