//! Utility functions module
//!
//! This module contains utility functions used throughout the application.

pub mod signals;
pub mod time_format;

// Re-export main functions
pub use signals::shutdown_signal;
pub use time_format::{
    break_message, format_time, format_time_human_readable, minutes_to_seconds,
    seconds_to_minutes,
};
