//! Utility functions for date and string formatting.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{format_time, weekday_name_es};
