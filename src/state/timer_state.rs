//! Timer state, notifications and snapshots

use serde::{Deserialize, Serialize};

use crate::constants::{BREAK_TIME_TEXT, FOCUS_TIME_TEXT, PAUSED_TEXT, READY_TEXT};

/// Current phase of the Pomodoro cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    #[default]
    Idle,
    Running,
    Paused,
    Break,
}

impl TimerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerState::Idle => "idle",
            TimerState::Running => "running",
            TimerState::Paused => "paused",
            TimerState::Break => "break",
        }
    }

    /// Label shown above the countdown
    pub fn status_text(&self) -> &'static str {
        match self {
            TimerState::Idle => READY_TEXT,
            TimerState::Running => FOCUS_TIME_TEXT,
            TimerState::Paused => PAUSED_TEXT,
            TimerState::Break => BREAK_TIME_TEXT,
        }
    }

    /// Whether a countdown clock is ticking in this state
    pub fn is_counting(&self) -> bool {
        matches!(self, TimerState::Running | TimerState::Break)
    }
}

impl std::fmt::Display for TimerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two countdown clocks. At most one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Clock {
    Focus,
    Break,
}

/// Notifications emitted by the timer, in emission order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    Tick {
        remaining_seconds: u32,
        state: TimerState,
    },
    /// `Running` means the focus period ended
    Completed { completed: TimerState },
    StateChanged {
        previous: TimerState,
        current: TimerState,
        remaining_seconds: u32,
    },
}

/// Point-in-time view of the timer for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub remaining_seconds: u32,
    pub display: String,
    pub status_text: String,
    /// Length of the period the countdown belongs to
    pub period_seconds: u32,
    /// Remaining time clamped to `period_seconds`, for progress bars
    pub progress_seconds: u32,
    pub focus_duration_minutes: u32,
    pub break_duration_minutes: u32,
    pub clock: Option<Clock>,
    /// Incremented each time a countdown clock starts
    pub activation: u64,
}
