//! FocusSwift - A Pomodoro timer daemon
//!
//! This is the main entry point for the focus-swift application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use focus_swift::{
    config::Config,
    constants::{APP_TITLE, VERSION},
    create_router,
    services::{detect_displays, input_blocker_from, overlay_for_displays, synthetic_displays},
    state::{AppState, PomodoroTimer},
    tasks::{clock_task, overlay_sync_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_swift={},tower_http=info", config.log_level()))
        .init();

    info!("Starting {} v{}", APP_TITLE, VERSION);
    info!("Configuration: host={}, port={}, focus={}min, break={}min",
          config.host, config.port, config.focus_minutes(), config.break_minutes());

    // One overlay surface per display, created once at startup
    let displays = match config.displays {
        Some(count) => synthetic_displays(count),
        None => detect_displays().await,
    };
    let (blocker, block_queue) =
        input_blocker_from(config.block_cmd.as_deref(), config.unblock_cmd.as_deref());
    let overlay = overlay_for_displays(displays, blocker);

    let timer = PomodoroTimer::new(config.focus_minutes(), config.break_minutes());
    // Subscribe before anything can drive the timer
    let events = timer.subscribe();

    let state = Arc::new(AppState::new(config.port, config.host.clone(), timer, overlay));

    let clock = tokio::spawn(clock_task(Arc::clone(&state)));
    let overlay_sync = tokio::spawn(overlay_sync_task(Arc::clone(&state), events));

    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            state.shutdown();
            if let Some(queue) = &block_queue {
                queue.flush().await;
            }
            return Err(e.into());
        }
    };

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start     - Start or resume focus");
    info!("  POST /stop      - Pause focus or end a break");
    info!("  POST /reset     - Reset to idle");
    info!("  POST /toggle    - Start/stop");
    info!("  PUT  /durations - Set focus/break minutes");
    info!("  GET  /status    - Timer and overlay status");
    info!("  GET  /overlay   - Overlay surfaces");
    info!("  GET  /health    - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Input must never stay blocked after exit
    state.shutdown();
    clock.abort();
    overlay_sync.abort();
    if let Some(queue) = &block_queue {
        queue.flush().await;
    }

    info!("Shutdown complete");
    Ok(())
}
