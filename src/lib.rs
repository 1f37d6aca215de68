//! FocusSwift - A Pomodoro timer daemon
//!
//! This library provides the Pomodoro state machine, the per-display break
//! overlay with its input-blocking capability, and the HTTP control surface.

pub mod api;
pub mod config;
pub mod constants;
pub mod overlay;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use overlay::OverlayController;
pub use state::{AppState, PomodoroTimer, TimerEvent, TimerState};
pub use utils::signals::shutdown_signal;
