//! Utility functions for display formatting.

pub mod format;

pub use format::{format_date, format_duration, format_price, truncate_string};
