//! State management module
//!
//! This module contains the Pomodoro state machine and the shared application state.

pub mod app_state;
pub mod pomodoro;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use pomodoro::{clamp_break_minutes, clamp_focus_minutes, PomodoroTimer};
pub use timer_state::{Clock, TimerEvent, TimerSnapshot, TimerState};
