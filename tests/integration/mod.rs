//! Integration tests for the presentation resolution engine

mod nested_resolution;
mod progress_throttle;
mod standard_fields;
mod static_verification;
pub mod test_utils;
