//! Overlay controller
//!
//! Keeps every per-display surface and the global input block consistent:
//! input is blocked only while the overlay is intended visible, and is
//! always released by `hide_overlay` and `dispose`.

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::{Display, InputBlocker, OverlayError, OverlaySurface, Point};

/// Per-surface view for the status endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceStatus {
    pub display: Display,
    pub visible: bool,
    pub text: String,
    pub label_origin: Option<Point>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayStatus {
    pub visible: bool,
    pub input_blocked: bool,
    pub message: String,
    pub surfaces: Vec<SurfaceStatus>,
}

pub struct OverlayController {
    surfaces: Vec<Box<dyn OverlaySurface>>,
    primary: usize,
    blocker: Box<dyn InputBlocker>,
    message: String,
    visible: bool,
    input_blocked: bool,
    disposed: bool,
}

impl OverlayController {
    /// Create a controller over one surface per display.
    /// The primary surface is the first one whose display is marked primary.
    pub fn new(surfaces: Vec<Box<dyn OverlaySurface>>, blocker: Box<dyn InputBlocker>) -> Self {
        let primary = surfaces
            .iter()
            .position(|s| s.display().primary)
            .unwrap_or(0);

        info!("Overlay controller managing {} surface(s)", surfaces.len());

        Self {
            surfaces,
            primary,
            blocker,
            message: String::new(),
            visible: false,
            input_blocked: false,
            disposed: false,
        }
    }

    /// Any surface visible while the overlay is meant to be shown
    pub fn is_overlay_visible(&self) -> bool {
        self.visible && self.surfaces.iter().any(|s| s.is_visible())
    }

    pub fn is_input_blocked(&self) -> bool {
        self.input_blocked
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Show every surface with `message` and block input. Re-showing updates the text.
    pub fn show_overlay(&mut self, message: &str) {
        if self.disposed {
            warn!("show_overlay called after dispose");
            return;
        }

        self.message = message.to_string();
        for surface in self.surfaces.iter_mut() {
            surface.set_text(message);
        }
        self.center_primary_label();

        for (index, surface) in self.surfaces.iter_mut().enumerate() {
            if let Err(e) = surface.show() {
                error!("Error showing overlay: {}", surface_error(index, e));
            }
        }

        if !self.surfaces.iter().any(|s| s.is_visible()) {
            error!("No overlay surface could be shown, leaving input unblocked");
            self.visible = false;
            return;
        }
        self.visible = true;

        if !self.input_blocked {
            match self.blocker.block() {
                Ok(()) => {
                    self.input_blocked = true;
                    info!("Input blocked");
                }
                Err(e) => error!("Failed to block input: {}", e),
            }
        }
    }

    /// Update the primary surface's text. Does nothing while hidden.
    pub fn update_overlay_text(&mut self, message: &str) {
        if self.disposed || !self.is_overlay_visible() {
            return;
        }

        self.message = message.to_string();
        if let Some(surface) = self.surfaces.get_mut(self.primary) {
            surface.set_text(message);
        }
        self.center_primary_label();
    }

    /// Hide every surface (best effort) and always release the input block
    pub fn hide_overlay(&mut self) {
        for (index, surface) in self.surfaces.iter_mut().enumerate() {
            if let Err(e) = surface.hide() {
                error!("Error hiding overlay: {}", surface_error(index, e));
            }
        }
        self.visible = false;
        self.release_input_block();
    }

    /// Release the input block first, then every surface. Safe to call twice.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }

        self.release_input_block();
        self.hide_overlay();
        for surface in self.surfaces.iter_mut() {
            surface.release();
        }
        self.surfaces.clear();
        self.disposed = true;
        info!("Overlay controller disposed");
    }

    pub fn status(&self) -> OverlayStatus {
        OverlayStatus {
            visible: self.is_overlay_visible(),
            input_blocked: self.input_blocked,
            message: self.message.clone(),
            surfaces: self
                .surfaces
                .iter()
                .map(|s| SurfaceStatus {
                    display: s.display().clone(),
                    visible: s.is_visible(),
                    text: s.text().to_string(),
                    label_origin: s.label_origin(),
                })
                .collect(),
        }
    }

    fn release_input_block(&mut self) {
        if !self.input_blocked {
            return;
        }
        if let Err(e) = self.blocker.unblock() {
            error!("Failed to unblock input: {}", e);
        }
        self.input_blocked = false;
        info!("Input unblocked");
    }

    fn center_primary_label(&mut self) {
        let Some(surface) = self.surfaces.get_mut(self.primary) else {
            return;
        };
        let bounds = surface.display().bounds;
        let label = surface.measure_text(surface.text());
        let origin = Point {
            x: (bounds.width as i32 - label.width as i32) / 2,
            y: (bounds.height as i32 - label.height as i32) / 2,
        };
        surface.place_label(origin);
    }
}

impl Drop for OverlayController {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for OverlayController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayController")
            .field("surfaces", &self.surfaces.len())
            .field("primary", &self.primary)
            .field("visible", &self.visible)
            .field("input_blocked", &self.input_blocked)
            .field("disposed", &self.disposed)
            .finish()
    }
}

fn surface_error(index: usize, e: OverlayError) -> OverlayError {
    match e {
        OverlayError::Surface { .. } => e,
        other => OverlayError::Surface {
            index,
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::{HeadlessSurface, Rect, Size};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Calls {
        blocks: usize,
        unblocks: usize,
    }

    struct RecordingBlocker {
        calls: Arc<Mutex<Calls>>,
        fail_block: bool,
        fail_unblock: bool,
    }

    impl InputBlocker for RecordingBlocker {
        fn block(&mut self) -> Result<(), OverlayError> {
            self.calls.lock().unwrap().blocks += 1;
            if self.fail_block {
                return Err(OverlayError::InputBlock("denied".into()));
            }
            Ok(())
        }

        fn unblock(&mut self) -> Result<(), OverlayError> {
            self.calls.lock().unwrap().unblocks += 1;
            if self.fail_unblock {
                return Err(OverlayError::InputBlock("denied".into()));
            }
            Ok(())
        }
    }

    /// Surface whose show or hide calls can be made to fail
    struct FlakySurface {
        inner: HeadlessSurface,
        fail_show: bool,
        fail_hide: bool,
    }

    impl OverlaySurface for FlakySurface {
        fn display(&self) -> &Display {
            self.inner.display()
        }
        fn show(&mut self) -> Result<(), OverlayError> {
            if self.fail_show {
                return Err(OverlayError::Surface { index: 0, reason: "show".into() });
            }
            self.inner.show()
        }
        fn hide(&mut self) -> Result<(), OverlayError> {
            if self.fail_hide {
                return Err(OverlayError::Surface { index: 0, reason: "hide".into() });
            }
            self.inner.hide()
        }
        fn is_visible(&self) -> bool {
            self.inner.is_visible()
        }
        fn set_text(&mut self, text: &str) {
            self.inner.set_text(text)
        }
        fn text(&self) -> &str {
            self.inner.text()
        }
        fn place_label(&mut self, origin: Point) {
            self.inner.place_label(origin)
        }
        fn label_origin(&self) -> Option<Point> {
            self.inner.label_origin()
        }
        fn measure_text(&self, _text: &str) -> Size {
            Size { width: 200, height: 100 }
        }
    }

    fn display(name: &str, x: i32, primary: bool) -> Display {
        Display::new(name, Rect { x, y: 0, width: 1920, height: 1080 }, primary)
    }

    fn flaky(name: &str, x: i32, primary: bool, fail_show: bool, fail_hide: bool) -> Box<dyn OverlaySurface> {
        Box::new(FlakySurface {
            inner: HeadlessSurface::new(display(name, x, primary)),
            fail_show,
            fail_hide,
        })
    }

    fn blocker(calls: &Arc<Mutex<Calls>>) -> Box<dyn InputBlocker> {
        Box::new(RecordingBlocker {
            calls: Arc::clone(calls),
            fail_block: false,
            fail_unblock: false,
        })
    }

    fn two_displays(calls: &Arc<Mutex<Calls>>) -> OverlayController {
        OverlayController::new(
            vec![
                flaky("HDMI-1", 1920, false, false, false),
                flaky("DP-1", 0, true, false, false),
            ],
            blocker(calls),
        )
    }

    #[test]
    fn show_covers_every_display_and_blocks_input() {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let mut overlay = two_displays(&calls);

        overlay.show_overlay("Take a break\n05:00");

        assert!(overlay.is_overlay_visible());
        assert!(overlay.is_input_blocked());
        let status = overlay.status();
        assert!(status.surfaces.iter().all(|s| s.visible));
        assert!(status.surfaces.iter().all(|s| s.text == "Take a break\n05:00"));
        assert_eq!(calls.lock().unwrap().blocks, 1);
    }

    #[test]
    fn primary_label_is_centered() {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let mut overlay = two_displays(&calls);
        overlay.show_overlay("x");

        let status = overlay.status();
        assert_eq!(status.surfaces[1].label_origin, Some(Point { x: 860, y: 490 }));
        assert_eq!(status.surfaces[0].label_origin, None);
    }

    #[test]
    fn reshow_updates_text_without_blocking_twice() {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let mut overlay = two_displays(&calls);
        overlay.show_overlay("a");
        overlay.show_overlay("b");

        assert_eq!(overlay.message(), "b");
        assert_eq!(calls.lock().unwrap().blocks, 1);
    }

    #[test]
    fn update_text_touches_primary_only() {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let mut overlay = two_displays(&calls);
        overlay.show_overlay("a");
        overlay.update_overlay_text("b");

        let status = overlay.status();
        assert_eq!(status.surfaces[1].text, "b");
        assert_eq!(status.surfaces[0].text, "a");
    }

    #[test]
    fn update_text_while_hidden_is_noop() {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let mut overlay = two_displays(&calls);
        overlay.update_overlay_text("ignored");

        assert_eq!(overlay.message(), "");
        assert!(overlay.status().surfaces.iter().all(|s| s.text.is_empty()));
    }

    #[test]
    fn hide_unblocks_even_when_a_surface_fails() {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let mut overlay = OverlayController::new(
            vec![
                flaky("DP-1", 0, true, false, true),
                flaky("HDMI-1", 1920, false, false, false),
            ],
            blocker(&calls),
        );

        overlay.show_overlay("x");
        overlay.hide_overlay();

        assert!(!overlay.is_input_blocked());
        assert!(!overlay.is_overlay_visible());
        assert_eq!(calls.lock().unwrap().unblocks, 1);
    }

    #[test]
    fn hide_clears_flag_when_unblock_fails() {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let mut overlay = OverlayController::new(
            vec![flaky("DP-1", 0, true, false, false)],
            Box::new(RecordingBlocker {
                calls: Arc::clone(&calls),
                fail_block: false,
                fail_unblock: true,
            }),
        );

        overlay.show_overlay("x");
        overlay.hide_overlay();
        assert!(!overlay.is_input_blocked());
    }

    #[test]
    fn failed_block_leaves_flag_false() {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let mut overlay = OverlayController::new(
            vec![flaky("DP-1", 0, true, false, false)],
            Box::new(RecordingBlocker {
                calls: Arc::clone(&calls),
                fail_block: true,
                fail_unblock: false,
            }),
        );

        overlay.show_overlay("x");
        assert!(overlay.is_overlay_visible());
        assert!(!overlay.is_input_blocked());

        overlay.hide_overlay();
        assert_eq!(calls.lock().unwrap().unblocks, 0);
    }

    #[test]
    fn no_visible_surface_means_no_block() {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let mut overlay = OverlayController::new(
            vec![flaky("DP-1", 0, true, true, false)],
            blocker(&calls),
        );

        overlay.show_overlay("x");
        assert!(!overlay.is_overlay_visible());
        assert!(!overlay.is_input_blocked());
        assert_eq!(calls.lock().unwrap().blocks, 0);
    }

    #[test]
    fn dispose_unblocks_and_releases_surfaces() {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let mut overlay = two_displays(&calls);
        overlay.show_overlay("x");

        overlay.dispose();
        overlay.dispose();

        assert!(!overlay.is_input_blocked());
        assert_eq!(overlay.surface_count(), 0);
        assert_eq!(calls.lock().unwrap().unblocks, 1);

        overlay.show_overlay("again");
        assert!(!overlay.is_input_blocked());
    }

    #[test]
    fn drop_releases_input_block() {
        let calls = Arc::new(Mutex::new(Calls::default()));
        {
            let mut overlay = two_displays(&calls);
            overlay.show_overlay("x");
        }
        assert_eq!(calls.lock().unwrap().unblocks, 1);
    }

    #[test]
    fn panic_while_blocked_still_unblocks() {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut overlay = two_displays(&calls);
            overlay.show_overlay("x");
            panic!("break handler failed");
        }));

        assert!(result.is_err());
        let calls = calls.lock().unwrap();
        assert_eq!(calls.blocks, 1);
        assert_eq!(calls.unblocks, 1);
    }
}
