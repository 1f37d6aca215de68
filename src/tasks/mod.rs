//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod clock;
pub mod overlay_sync;

// Re-export main functions
pub use clock::clock_task;
pub use overlay_sync::overlay_sync_task;
