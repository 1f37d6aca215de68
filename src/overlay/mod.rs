//! Break overlay module
//!
//! One overlay surface per display, a controller that keeps them in step,
//! and the input-blocking capability the controller toggles while visible.

pub mod controller;
pub mod error;
pub mod input_block;
pub mod surface;
pub mod sync;

// Re-export main types
pub use controller::{OverlayController, OverlayStatus, SurfaceStatus};
pub use error::OverlayError;
pub use input_block::{CommandInputBlocker, CommandQueue, InputBlocker, NoopInputBlocker};
pub use surface::{Display, HeadlessSurface, OverlaySurface, Point, Rect, Size};
pub use sync::{apply_timer_event, reconcile_overlay};
