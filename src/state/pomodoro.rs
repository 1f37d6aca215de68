//! Pomodoro timer state machine
//!
//! The machine is driven from outside: the clock task calls [`PomodoroTimer::tick`]
//! once per second while [`PomodoroTimer::active_clock`] is set. Every change is
//! broadcast as a [`TimerEvent`] and the latest [`TimerSnapshot`] is published on
//! a watch channel.

use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

use crate::{
    constants::{
        BREAK_COMPLETE_TEXT, DEFAULT_BREAK_MINUTES, DEFAULT_FOCUS_MINUTES, MAX_BREAK_MINUTES,
        MAX_FOCUS_MINUTES, MIN_BREAK_MINUTES, MIN_FOCUS_MINUTES, SESSION_COMPLETE_TEXT,
    },
    utils::time_format::{format_time, minutes_to_seconds, seconds_to_minutes},
};

use super::{Clock, TimerEvent, TimerSnapshot, TimerState};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Clamp a focus duration to the accepted range
pub fn clamp_focus_minutes(minutes: u32) -> u32 {
    minutes.clamp(MIN_FOCUS_MINUTES, MAX_FOCUS_MINUTES)
}

/// Clamp a break duration to the accepted range
pub fn clamp_break_minutes(minutes: u32) -> u32 {
    minutes.clamp(MIN_BREAK_MINUTES, MAX_BREAK_MINUTES)
}

#[derive(Debug)]
pub struct PomodoroTimer {
    focus_duration: u32,
    break_duration: u32,
    focus_remaining: u32,
    break_remaining: u32,
    state: TimerState,
    clock: Option<Clock>,
    /// Bumped every time a clock starts, so a quick stop/start is still seen as a restart
    activation: u64,
    disposed: bool,
    event_tx: broadcast::Sender<TimerEvent>,
    snapshot_tx: watch::Sender<TimerSnapshot>,
}

impl PomodoroTimer {
    /// Create an idle timer; durations are clamped to their bounds
    pub fn new(focus_minutes: u32, break_minutes: u32) -> Self {
        let focus_duration = minutes_to_seconds(clamp_focus_minutes(focus_minutes));
        let break_duration = minutes_to_seconds(clamp_break_minutes(break_minutes));
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        let timer = Self {
            focus_duration,
            break_duration,
            focus_remaining: focus_duration,
            break_remaining: break_duration,
            state: TimerState::Idle,
            clock: None,
            activation: 0,
            disposed: false,
            event_tx,
            snapshot_tx: watch::channel(empty_snapshot()).0,
        };
        timer.publish_snapshot();
        timer
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Break counter while in `Break`, focus counter otherwise
    pub fn remaining_seconds(&self) -> u32 {
        if self.state == TimerState::Break {
            self.break_remaining
        } else {
            self.focus_remaining
        }
    }

    pub fn active_clock(&self) -> Option<Clock> {
        self.clock
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn focus_duration_minutes(&self) -> u32 {
        seconds_to_minutes(self.focus_duration)
    }

    pub fn break_duration_minutes(&self) -> u32 {
        seconds_to_minutes(self.break_duration)
    }

    /// Subscribe to timer notifications
    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_tx.subscribe()
    }

    /// Watch the latest snapshot
    pub fn watch(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let remaining_seconds = self.remaining_seconds();
        let period_seconds = if self.state == TimerState::Break {
            self.break_duration
        } else {
            self.focus_duration
        };
        TimerSnapshot {
            state: self.state,
            remaining_seconds,
            display: format_time(remaining_seconds as i64),
            status_text: self.state.status_text().to_string(),
            period_seconds,
            progress_seconds: remaining_seconds.min(period_seconds),
            focus_duration_minutes: self.focus_duration_minutes(),
            break_duration_minutes: self.break_duration_minutes(),
            clock: self.clock,
            activation: self.activation,
        }
    }

    /// Begin or resume the focus countdown. Ignored while running or on break.
    pub fn start(&mut self) {
        if self.disposed {
            return;
        }
        if matches!(self.state, TimerState::Idle | TimerState::Paused) {
            self.clock = Some(Clock::Focus);
            self.activation += 1;
            self.set_state(TimerState::Running);
            info!("Focus started with {} remaining", format_time(self.focus_remaining as i64));
        } else {
            debug!("start() ignored in state {}", self.state);
        }
    }

    /// Pause a focus period, or abandon a break
    pub fn stop(&mut self) {
        if self.disposed {
            return;
        }
        self.clock = None;

        match self.state {
            TimerState::Running | TimerState::Paused => {
                self.set_state(TimerState::Paused);
                info!("Focus paused at {}", format_time(self.focus_remaining as i64));
            }
            TimerState::Break => {
                self.focus_remaining = self.focus_duration;
                self.set_state(TimerState::Idle);
                self.emit_tick();
                info!("Break abandoned");
            }
            TimerState::Idle => {}
        }
    }

    /// Return to `Idle` with both counters full
    pub fn reset(&mut self) {
        if self.disposed {
            return;
        }
        self.clock = None;
        self.focus_remaining = self.focus_duration;
        self.break_remaining = self.break_duration;
        self.set_state(TimerState::Idle);
        self.emit_tick();
        info!("Timer reset");
    }

    /// Set the focus duration. Applies immediately only while idle.
    pub fn set_focus_duration_minutes(&mut self, minutes: u32) {
        if self.disposed {
            return;
        }
        let minutes = clamp_focus_minutes(minutes);
        self.focus_duration = minutes_to_seconds(minutes);
        info!("Focus duration set to {} minutes", minutes);

        if self.state == TimerState::Idle {
            self.focus_remaining = self.focus_duration;
            self.emit_tick();
        } else {
            self.publish_snapshot();
        }
    }

    /// Set the break duration. Applies immediately while on break.
    pub fn set_break_duration_minutes(&mut self, minutes: u32) {
        if self.disposed {
            return;
        }
        let minutes = clamp_break_minutes(minutes);
        self.break_duration = minutes_to_seconds(minutes);
        info!("Break duration set to {} minutes", minutes);

        if self.state == TimerState::Break {
            self.break_remaining = self.break_duration;
        }
        self.publish_snapshot();
    }

    /// Advance the active clock by one second
    pub fn tick(&mut self) {
        if self.disposed {
            return;
        }

        match self.clock {
            Some(Clock::Focus) => {
                self.focus_remaining = self.focus_remaining.saturating_sub(1);
                self.emit_tick();

                if self.focus_remaining == 0 {
                    self.clock = None;
                    self.emit(TimerEvent::Completed {
                        completed: TimerState::Running,
                    });
                    self.start_break();
                }
            }
            Some(Clock::Break) => {
                self.break_remaining = self.break_remaining.saturating_sub(1);
                self.emit_tick();

                if self.break_remaining == 0 {
                    self.clock = None;
                    self.emit(TimerEvent::Completed {
                        completed: TimerState::Break,
                    });
                    self.end_break();
                }
            }
            None => {}
        }
    }

    /// Halt both clocks and refuse further operations
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.clock = None;
        self.disposed = true;
        self.publish_snapshot();
        info!("Timer disposed");
    }

    fn start_break(&mut self) {
        self.break_remaining = self.break_duration;
        self.clock = Some(Clock::Break);
        self.activation += 1;
        self.set_state(TimerState::Break);
        self.emit_tick();
        info!("{} Break of {} started", SESSION_COMPLETE_TEXT, format_time(self.break_duration as i64));
    }

    fn end_break(&mut self) {
        self.focus_remaining = self.focus_duration;
        self.set_state(TimerState::Idle);
        self.emit_tick();
        info!("{}", BREAK_COMPLETE_TEXT);
    }

    fn set_state(&mut self, state: TimerState) {
        if self.state == state {
            return;
        }
        let previous = self.state;
        self.state = state;
        self.emit(TimerEvent::StateChanged {
            previous,
            current: state,
            remaining_seconds: self.remaining_seconds(),
        });
    }

    fn emit_tick(&self) {
        self.emit(TimerEvent::Tick {
            remaining_seconds: self.remaining_seconds(),
            state: self.state,
        });
    }

    fn emit(&self, event: TimerEvent) {
        if let TimerEvent::Tick { .. } = event {
            debug!("{:?}", event);
        }
        // No subscribers is normal before the background tasks start
        let _ = self.event_tx.send(event);
        self.publish_snapshot();
    }

    fn publish_snapshot(&self) {
        self.snapshot_tx.send_replace(self.snapshot());
    }
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_MINUTES, DEFAULT_BREAK_MINUTES)
    }
}

fn empty_snapshot() -> TimerSnapshot {
    TimerSnapshot {
        state: TimerState::Idle,
        remaining_seconds: 0,
        display: format_time(0),
        status_text: TimerState::Idle.status_text().to_string(),
        period_seconds: 0,
        progress_seconds: 0,
        focus_duration_minutes: 0,
        break_duration_minutes: 0,
        clock: None,
        activation: 0,
    }
}
