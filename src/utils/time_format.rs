//! Time formatting and minute/second conversions

use crate::constants::{BREAK_MESSAGE_FORMAT, SECONDS_PER_MINUTE};

/// Format seconds as `MM:SS`, clamping negative input to `00:00`
pub fn format_time(total_seconds: i64) -> String {
    let total_seconds = total_seconds.max(0);
    let minutes = total_seconds / SECONDS_PER_MINUTE as i64;
    let seconds = total_seconds % SECONDS_PER_MINUTE as i64;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Format seconds as e.g. "5 minutes" or "1 minute 30 seconds"
pub fn format_time_human_readable(total_seconds: i64) -> String {
    if total_seconds < 0 {
        return "0 seconds".to_string();
    }

    let minutes = total_seconds / SECONDS_PER_MINUTE as i64;
    let seconds = total_seconds % SECONDS_PER_MINUTE as i64;

    let seconds_part = if seconds == 1 {
        "1 second".to_string()
    } else {
        format!("{} seconds", seconds)
    };

    if minutes == 0 {
        return seconds_part;
    }

    let minutes_part = if minutes == 1 {
        "1 minute".to_string()
    } else {
        format!("{} minutes", minutes)
    };

    if seconds == 0 {
        minutes_part
    } else {
        format!("{} {}", minutes_part, seconds_part)
    }
}

/// Text shown on the overlay while a break counts down
pub fn break_message(remaining_seconds: u32) -> String {
    BREAK_MESSAGE_FORMAT.replace("{}", &format_time(remaining_seconds as i64))
}

pub fn minutes_to_seconds(minutes: u32) -> u32 {
    minutes * SECONDS_PER_MINUTE
}

/// Rounds down
pub fn seconds_to_minutes(seconds: u32) -> u32 {
    seconds / SECONDS_PER_MINUTE
}
