//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use crate::overlay::{OverlayController, OverlayStatus};
use super::{PomodoroTimer, TimerEvent, TimerSnapshot, TimerState};

/// Main application state shared by the HTTP handlers and background tasks
#[derive(Debug)]
pub struct AppState {
    /// Pomodoro state machine
    pub timer: Arc<Mutex<PomodoroTimer>>,
    /// Per-display break overlay and input block
    pub overlay: Arc<Mutex<OverlayController>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    pub fn new(port: u16, host: String, timer: PomodoroTimer, overlay: OverlayController) -> Self {
        Self {
            timer: Arc::new(Mutex::new(timer)),
            overlay: Arc::new(Mutex::new(overlay)),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Apply an operation to the timer, record it as the last action, and return the new snapshot
    pub fn update_timer<F>(&self, action: &str, updater: F) -> Result<TimerSnapshot, String>
    where
        F: FnOnce(&mut PomodoroTimer),
    {
        let mut timer = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer: {}", e))?;

        updater(&mut *timer);
        let snapshot = timer.snapshot();
        drop(timer); // Release the lock early

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(snapshot)
    }

    pub fn start(&self) -> Result<TimerSnapshot, String> {
        self.update_timer("start", |timer| timer.start())
    }

    pub fn stop(&self) -> Result<TimerSnapshot, String> {
        self.update_timer("stop", |timer| timer.stop())
    }

    pub fn reset(&self) -> Result<TimerSnapshot, String> {
        self.update_timer("reset", |timer| timer.reset())
    }

    /// Stop while counting down, otherwise start
    pub fn toggle(&self) -> Result<TimerSnapshot, String> {
        self.update_timer("toggle", |timer| {
            if timer.state().is_counting() {
                timer.stop();
            } else {
                timer.start();
            }
        })
    }

    /// Change either duration; values are clamped by the timer
    pub fn set_durations(
        &self,
        focus_minutes: Option<u32>,
        break_minutes: Option<u32>,
    ) -> Result<TimerSnapshot, String> {
        self.update_timer("durations", |timer| {
            if let Some(minutes) = focus_minutes {
                timer.set_focus_duration_minutes(minutes);
            }
            if let Some(minutes) = break_minutes {
                timer.set_break_duration_minutes(minutes);
            }
        })
    }

    /// Advance the active clock by one second (called by the clock task)
    pub fn tick(&self) -> Result<TimerSnapshot, String> {
        let mut timer = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer: {}", e))?;
        timer.tick();
        Ok(timer.snapshot())
    }

    pub fn get_timer_snapshot(&self) -> Result<TimerSnapshot, String> {
        self.timer.lock()
            .map(|timer| timer.snapshot())
            .map_err(|e| format!("Failed to lock timer: {}", e))
    }

    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        self.timer.lock()
            .map(|timer| timer.state())
            .map_err(|e| format!("Failed to lock timer: {}", e))
    }

    pub fn is_timer_disposed(&self) -> Result<bool, String> {
        self.timer.lock()
            .map(|timer| timer.is_disposed())
            .map_err(|e| format!("Failed to lock timer: {}", e))
    }

    pub fn subscribe_events(&self) -> Result<broadcast::Receiver<TimerEvent>, String> {
        self.timer.lock()
            .map(|timer| timer.subscribe())
            .map_err(|e| format!("Failed to lock timer: {}", e))
    }

    pub fn watch_timer(&self) -> Result<watch::Receiver<TimerSnapshot>, String> {
        self.timer.lock()
            .map(|timer| timer.watch())
            .map_err(|e| format!("Failed to lock timer: {}", e))
    }

    /// Apply a closure to the overlay controller
    pub fn with_overlay<F, R>(&self, f: F) -> Result<R, String>
    where
        F: FnOnce(&mut OverlayController) -> R,
    {
        let mut overlay = self.overlay.lock()
            .map_err(|e| format!("Failed to lock overlay: {}", e))?;
        Ok(f(&mut *overlay))
    }

    pub fn get_overlay_status(&self) -> Result<OverlayStatus, String> {
        self.with_overlay(|overlay| overlay.status())
    }

    /// Halt the clocks and release the overlay. Input is unblocked even if
    /// the timer lock is poisoned.
    pub fn shutdown(&self) {
        info!("Shutting down timer and overlay");

        match self.timer.lock() {
            Ok(mut timer) => timer.dispose(),
            Err(e) => warn!("Failed to lock timer during shutdown: {}", e),
        }

        match self.overlay.lock() {
            Ok(mut overlay) => overlay.dispose(),
            Err(poisoned) => {
                warn!("Overlay lock poisoned during shutdown, disposing anyway");
                poisoned.into_inner().dispose();
            }
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
