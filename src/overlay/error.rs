//! Overlay and OS-integration errors

use thiserror::Error;

/// Failures from overlay surfaces or the input-blocking capability.
/// These are logged and reconciled by the controller, never propagated.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("overlay surface {index} failed: {reason}")]
    Surface { index: usize, reason: String },

    #[error("input blocking failed: {0}")]
    InputBlock(String),

    #[error("command failed: {0}")]
    Command(String),
}
