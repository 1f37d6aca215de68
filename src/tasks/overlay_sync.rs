//! Overlay synchronisation background task

use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{error, info, warn};

use crate::{
    overlay::{apply_timer_event, reconcile_overlay},
    state::{AppState, TimerEvent},
};

/// Background task that shows, updates and hides the overlay as the timer moves.
///
/// `events` should be subscribed before the timer can change so no
/// transition is missed.
pub async fn overlay_sync_task(state: Arc<AppState>, mut events: broadcast::Receiver<TimerEvent>) {
    info!("Starting overlay sync task");

    loop {
        match events.recv().await {
            Ok(event) => {
                if let Err(e) = state.with_overlay(|overlay| apply_timer_event(overlay, &event)) {
                    error!("Failed to apply timer event to overlay: {}", e);
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Overlay sync lagged by {} events, reconciling", skipped);
                match state.get_timer_snapshot() {
                    Ok(snapshot) => {
                        if let Err(e) = state.with_overlay(|overlay| reconcile_overlay(overlay, &snapshot)) {
                            error!("Failed to reconcile overlay: {}", e);
                        }
                    }
                    Err(e) => error!("Failed to read timer state: {}", e),
                }
            }
            Err(RecvError::Closed) => break,
        }
    }

    info!("Overlay sync task stopped");
}
