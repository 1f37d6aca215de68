//! Global input-blocking capability

use tokio::{
    process::Command,
    sync::{mpsc, oneshot},
};
use tracing::{debug, error, info};

use super::OverlayError;

/// OS-wide keyboard/mouse suppression.
///
/// Only the overlay controller calls this, and it pairs every `block` with
/// an `unblock` before the overlay is hidden or dropped. Calls happen under
/// the overlay lock and must not wait on the OS.
pub trait InputBlocker: Send {
    fn block(&mut self) -> Result<(), OverlayError>;

    fn unblock(&mut self) -> Result<(), OverlayError>;
}

/// Blocker that only logs. Used when no block commands are configured.
#[derive(Debug, Default)]
pub struct NoopInputBlocker;

impl InputBlocker for NoopInputBlocker {
    fn block(&mut self) -> Result<(), OverlayError> {
        info!("Input blocking requested (no block command configured)");
        Ok(())
    }

    fn unblock(&mut self) -> Result<(), OverlayError> {
        info!("Input unblocking requested (no unblock command configured)");
        Ok(())
    }
}

#[derive(Debug)]
enum BlockRequest {
    Run(String),
    Flush(oneshot::Sender<()>),
}

/// Blocker that runs shell commands, e.g. `xinput disable <id>`.
///
/// `block`/`unblock` only enqueue the command; a background task runs the
/// queue in order with `tokio::process`, so a slow command never holds the
/// overlay lock or a runtime thread. Command failures are logged by that task.
#[derive(Debug, Clone)]
pub struct CommandInputBlocker {
    block_cmd: String,
    unblock_cmd: String,
    queue: CommandQueue,
}

/// Handle to the command queue, used to wait for pending commands at shutdown
#[derive(Debug, Clone)]
pub struct CommandQueue {
    tx: mpsc::UnboundedSender<BlockRequest>,
}

impl CommandQueue {
    /// Wait until every command enqueued so far has finished
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(BlockRequest::Flush(done_tx)).is_err() {
            return;
        }
        let _ = done_rx.await;
    }
}

impl CommandInputBlocker {
    /// Create the blocker and spawn its command task. Must be called inside a tokio runtime.
    pub fn spawn(block_cmd: impl Into<String>, unblock_cmd: impl Into<String>) -> (Self, CommandQueue) {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_commands(rx));

        let queue = CommandQueue { tx };
        let blocker = Self {
            block_cmd: block_cmd.into(),
            unblock_cmd: unblock_cmd.into(),
            queue: queue.clone(),
        };
        (blocker, queue)
    }

    fn enqueue(&self, command: &str) -> Result<(), OverlayError> {
        self.queue
            .tx
            .send(BlockRequest::Run(command.to_string()))
            .map_err(|_| OverlayError::InputBlock("command task is not running".to_string()))
    }
}

impl InputBlocker for CommandInputBlocker {
    fn block(&mut self) -> Result<(), OverlayError> {
        self.enqueue(&self.block_cmd)
    }

    fn unblock(&mut self) -> Result<(), OverlayError> {
        self.enqueue(&self.unblock_cmd)
    }
}

async fn run_commands(mut rx: mpsc::UnboundedReceiver<BlockRequest>) {
    while let Some(request) = rx.recv().await {
        match request {
            BlockRequest::Run(command) => {
                if let Err(e) = run_shell(&command).await {
                    error!("{}", OverlayError::Command(e));
                }
            }
            BlockRequest::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("Input block command task stopped");
}

async fn run_shell(command: &str) -> Result<(), String> {
    debug!("Running: {}", command);

    let output = Command::new("sh")
        .args(["-c", command])
        .output()
        .await
        .map_err(|e| format!("Failed to execute `{}`: {}", command, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("`{}` failed: {}", command, stderr.trim()));
    }

    Ok(())
}
