//! Command orchestration from page actions to the backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd` for the backend worker. On failure the command comes back with
/// a reason so the caller can complete it as a transport failure.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), (BackendCommand, String)> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued page->backend command");
            Ok(())
        }
        Err(TrySendError::Full(cmd)) => {
            tracing::warn!(command = cmd_name, "backend command queue is full");
            Err((cmd, "command queue is full; please retry".to_string()))
        }
        Err(TrySendError::Disconnected(cmd)) => {
            tracing::error!(command = cmd_name, "backend worker disconnected");
            Err((
                cmd,
                "backend worker disconnected (possible startup/runtime failure)".to_string(),
            ))
        }
    }
}
