//! User-facing strings produced by the standard providers.

/// Spoken form of a percentage value.
pub fn percentage(value: u32) -> String {
    format!("{} percent", value)
}

/// Position of one progress indicator among several.
pub fn progress_bar_number(number: usize, count: usize) -> String {
    format!("progress bar {} of {}", number, count)
}
