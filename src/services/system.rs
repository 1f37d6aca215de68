//! Build the overlay controller for this machine

use tracing::info;

use crate::overlay::{
    CommandInputBlocker, CommandQueue, Display, HeadlessSurface, InputBlocker, NoopInputBlocker,
    OverlayController, OverlaySurface,
};

/// Choose the input blocker: shell commands when both are configured, otherwise log-only.
///
/// The command queue is returned so shutdown can wait for the final unblock.
/// Must be called inside a tokio runtime.
pub fn input_blocker_from(
    block_cmd: Option<&str>,
    unblock_cmd: Option<&str>,
) -> (Box<dyn InputBlocker>, Option<CommandQueue>) {
    match (block_cmd, unblock_cmd) {
        (Some(block), Some(unblock)) => {
            info!("Input blocking via commands: block=`{}`, unblock=`{}`", block, unblock);
            let (blocker, queue) = CommandInputBlocker::spawn(block, unblock);
            (Box::new(blocker), Some(queue))
        }
        _ => {
            info!("Input blocking commands not configured, blocking is logged only");
            (Box::new(NoopInputBlocker), None)
        }
    }
}

/// One overlay surface per display, created once and reused for every break
pub fn overlay_for_displays(
    displays: Vec<Display>,
    blocker: Box<dyn InputBlocker>,
) -> OverlayController {
    let surfaces: Vec<Box<dyn OverlaySurface>> = displays
        .into_iter()
        .map(|display| Box::new(HeadlessSurface::new(display)) as Box<dyn OverlaySurface>)
        .collect();

    OverlayController::new(surfaces, blocker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::synthetic_displays;

    #[test]
    fn one_surface_per_display() {
        let overlay = overlay_for_displays(synthetic_displays(2), Box::new(NoopInputBlocker));
        assert_eq!(overlay.surface_count(), 2);
        assert!(!overlay.is_overlay_visible());
    }

    #[tokio::test]
    async fn block_command_alone_is_logged_only() {
        let path = std::env::temp_dir().join(format!("focus-swift-alone-{}", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let command = format!("printf b >> {}", path.display());

        let (mut blocker, queue) = input_blocker_from(Some(&command), None);
        assert!(queue.is_none());
        assert!(blocker.block().is_ok());
        tokio::task::yield_now().await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn both_commands_run_through_the_shell() {
        let path = std::env::temp_dir().join(format!("focus-swift-both-{}", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let block = format!("printf b >> {}", path.display());
        let unblock = format!("printf u >> {}", path.display());

        let (mut blocker, queue) = input_blocker_from(Some(&block), Some(&unblock));
        let queue = queue.expect("command blocker has a queue");
        blocker.block().unwrap();
        blocker.unblock().unwrap();
        queue.flush().await;

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "bu");
        let _ = std::fs::remove_file(&path);
    }
}
