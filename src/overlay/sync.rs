//! Drive the overlay from timer notifications

use tracing::debug;

use crate::{
    state::{TimerEvent, TimerSnapshot, TimerState},
    utils::time_format::break_message,
};

use super::OverlayController;

/// Apply one timer notification to the overlay.
///
/// Entering `Break` shows the overlay, break ticks refresh its text, and
/// leaving `Break` (completed or abandoned) hides it.
pub fn apply_timer_event(overlay: &mut OverlayController, event: &TimerEvent) {
    match *event {
        TimerEvent::StateChanged {
            current: TimerState::Break,
            remaining_seconds,
            ..
        } => {
            overlay.show_overlay(&break_message(remaining_seconds));
        }
        TimerEvent::StateChanged {
            previous: TimerState::Break,
            ..
        }
        | TimerEvent::Completed {
            completed: TimerState::Break,
        } => {
            overlay.hide_overlay();
        }
        TimerEvent::Tick {
            remaining_seconds,
            state: TimerState::Break,
        } => {
            overlay.update_overlay_text(&break_message(remaining_seconds));
        }
        _ => debug!("Overlay ignores {:?}", event),
    }
}

/// Bring the overlay in line with a snapshot, for when notifications were missed
pub fn reconcile_overlay(overlay: &mut OverlayController, snapshot: &TimerSnapshot) {
    if snapshot.state == TimerState::Break {
        overlay.show_overlay(&break_message(snapshot.remaining_seconds));
    } else if overlay.is_overlay_visible() || overlay.is_input_blocked() {
        overlay.hide_overlay();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        overlay::{Display, HeadlessSurface, NoopInputBlocker, OverlaySurface, Rect},
        state::PomodoroTimer,
    };
    use tokio::sync::broadcast::Receiver;

    fn overlay() -> OverlayController {
        let display = Display::new("DP-1", Rect { x: 0, y: 0, width: 1920, height: 1080 }, true);
        let surfaces: Vec<Box<dyn OverlaySurface>> = vec![Box::new(HeadlessSurface::new(display))];
        OverlayController::new(surfaces, Box::new(NoopInputBlocker))
    }

    fn pump(rx: &mut Receiver<TimerEvent>, overlay: &mut OverlayController) {
        while let Ok(event) = rx.try_recv() {
            apply_timer_event(overlay, &event);
        }
    }

    #[test]
    fn break_shows_and_counts_down_on_overlay() {
        let mut timer = PomodoroTimer::new(1, 5);
        let mut rx = timer.subscribe();
        let mut overlay = overlay();

        timer.start();
        for _ in 0..60 {
            timer.tick();
        }
        pump(&mut rx, &mut overlay);
        assert!(overlay.is_overlay_visible());
        assert!(overlay.is_input_blocked());
        assert_eq!(overlay.message(), "Take a break\n05:00");

        timer.tick();
        pump(&mut rx, &mut overlay);
        assert_eq!(overlay.message(), "Take a break\n04:59");
    }

    #[test]
    fn break_end_hides_overlay() {
        let mut timer = PomodoroTimer::new(1, 1);
        let mut rx = timer.subscribe();
        let mut overlay = overlay();

        timer.start();
        for _ in 0..120 {
            timer.tick();
            pump(&mut rx, &mut overlay);
        }

        assert_eq!(timer.state(), TimerState::Idle);
        assert!(!overlay.is_overlay_visible());
        assert!(!overlay.is_input_blocked());
    }

    #[test]
    fn stopping_a_break_hides_overlay() {
        let mut timer = PomodoroTimer::new(1, 5);
        let mut rx = timer.subscribe();
        let mut overlay = overlay();

        timer.start();
        for _ in 0..61 {
            timer.tick();
        }
        pump(&mut rx, &mut overlay);
        assert!(overlay.is_overlay_visible());

        timer.stop();
        pump(&mut rx, &mut overlay);
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_seconds(), 60);
        assert!(!overlay.is_overlay_visible());
        assert!(!overlay.is_input_blocked());
    }

    #[test]
    fn focus_ticks_leave_overlay_alone() {
        let mut timer = PomodoroTimer::default();
        let mut rx = timer.subscribe();
        let mut overlay = overlay();

        timer.start();
        timer.tick();
        timer.stop();
        pump(&mut rx, &mut overlay);
        assert!(!overlay.is_overlay_visible());
        assert_eq!(overlay.message(), "");
    }

    #[test]
    fn reconcile_follows_snapshot() {
        let mut timer = PomodoroTimer::new(1, 2);
        let mut overlay = overlay();

        timer.start();
        for _ in 0..65 {
            timer.tick();
        }
        reconcile_overlay(&mut overlay, &timer.snapshot());
        assert!(overlay.is_overlay_visible());
        assert_eq!(overlay.message(), "Take a break\n01:55");

        timer.reset();
        reconcile_overlay(&mut overlay, &timer.snapshot());
        assert!(!overlay.is_overlay_visible());
        assert!(!overlay.is_input_blocked());
    }
}
