//! Countdown clock background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::{constants::TICK_INTERVAL_MS, state::AppState};

/// Background task that ticks the timer once per second while a clock is active.
///
/// The interval restarts on every clock activation, so the first decrement
/// lands one full period after `start()` or a break begins, even when a
/// stop and start are coalesced into a single snapshot change.
pub async fn clock_task(state: Arc<AppState>) {
    info!("Starting clock task");

    let mut snapshots = match state.watch_timer() {
        Ok(rx) => rx,
        Err(e) => {
            error!("Clock task could not watch timer: {}", e);
            return;
        }
    };

    let period = Duration::from_millis(TICK_INTERVAL_MS);
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let (mut clock, mut activation) = {
        let snapshot = snapshots.borrow_and_update();
        (snapshot.clock, snapshot.activation)
    };

    loop {
        tokio::select! {
            _ = interval.tick(), if clock.is_some() => {
                if let Err(e) = state.tick() {
                    error!("Failed to tick timer: {}", e);
                }
            }

            changed = snapshots.changed() => {
                if changed.is_err() {
                    debug!("Timer snapshot channel closed");
                    break;
                }

                let (next, next_activation) = {
                    let snapshot = snapshots.borrow_and_update();
                    (snapshot.clock, snapshot.activation)
                };
                if next_activation != activation && next.is_some() {
                    interval.reset();
                }
                if next != clock || next_activation != activation {
                    debug!("Active clock changed: {:?} -> {:?} (activation {})", clock, next, next_activation);
                }
                clock = next;
                activation = next_activation;

                if state.is_timer_disposed().unwrap_or(true) {
                    break;
                }
            }
        }
    }

    info!("Clock task stopped");
}
