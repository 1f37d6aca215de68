//! Application-wide constants

/// Focus duration bounds and default, in minutes
pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const MIN_FOCUS_MINUTES: u32 = 1;
pub const MAX_FOCUS_MINUTES: u32 = 60;

/// Break duration bounds and default, in minutes
pub const DEFAULT_BREAK_MINUTES: u32 = 5;
pub const MIN_BREAK_MINUTES: u32 = 1;
pub const MAX_BREAK_MINUTES: u32 = 30;

pub const TICK_INTERVAL_MS: u64 = 1000;
pub const SECONDS_PER_MINUTE: u32 = 60;

pub const APP_TITLE: &str = "FocusSwift";
pub const VERSION: &str = "1.0.0";

/// `{}` is replaced with the remaining break time as MM:SS
pub const BREAK_MESSAGE_FORMAT: &str = "Take a break\n{}";

pub const FOCUS_TIME_TEXT: &str = "Focus Time";
pub const BREAK_TIME_TEXT: &str = "Break Time";
pub const PAUSED_TEXT: &str = "Paused";
pub const READY_TEXT: &str = "Ready";
pub const SESSION_COMPLETE_TEXT: &str = "Session Complete!";
pub const BREAK_COMPLETE_TEXT: &str = "Break Over!";

/// Geometry used when no display can be detected
pub const DEFAULT_DISPLAY_WIDTH: u32 = 1920;
pub const DEFAULT_DISPLAY_HEIGHT: u32 = 1080;

/// Approximate glyph cell of the overlay font, used to measure labels
pub const OVERLAY_GLYPH_WIDTH: u32 = 52;
pub const OVERLAY_LINE_HEIGHT: u32 = 112;
