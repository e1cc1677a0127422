//! Channel type definitions for inter-task communication

use tokio::sync::mpsc;

/// Create an unbounded channel carrying formatted record lines
///
/// Cross-service hops within a pipeline are synchronous; only the hop from
/// a publishing service to its sink's writer task crosses an execution
/// context. Unbounded length is acceptable at this system's scale (file
/// replays, not an unbounded live feed).
pub fn create_record_channel() -> (mpsc::UnboundedSender<String>, mpsc::UnboundedReceiver<String>) {
    mpsc::unbounded_channel()
}
