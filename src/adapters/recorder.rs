//! Append-only record sinks
//!
//! Each output file is owned by a single writer task draining an unbounded
//! channel of formatted lines. Services hold cheap cloneable [`RecordSink`]
//! handles; the writer buffers and flushes when the channel closes. Sinks
//! are opened up front so an unreachable destination fails the run at
//! startup instead of silently no-opping.

use std::path::Path;

use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::common::channels::create_record_channel;
use crate::common::errors::{Result, ServiceError};

/// Handle for appending one formatted record line to an output file
#[derive(Clone)]
pub struct RecordSink {
    path: String,
    tx: mpsc::UnboundedSender<String>,
}

impl RecordSink {
    /// Queue a line for appending; the writer task adds the newline
    pub fn send_line(&self, line: String) -> Result<()> {
        self.tx
            .send(line)
            .map_err(|_| ServiceError::SinkClosed(self.path.clone()))
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Open an output file and spawn its writer task
///
/// The file is created (parent directories included) and truncated, so every
/// run starts from an empty sink. Returns the sink handle plus the writer's
/// join handle; the writer exits after flushing once every sink clone has
/// been dropped.
pub async fn spawn_sink_writer(path: &str) -> Result<(RecordSink, JoinHandle<()>)> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .await?;

    let (tx, mut rx) = create_record_channel();
    let sink_path = path.to_string();
    let handle = tokio::spawn(async move {
        let mut writer = BufWriter::new(file);
        let mut written = 0_u64;
        while let Some(mut line) = rx.recv().await {
            // One buffer per record so a failed write never leaves a
            // partial line for the next record to concatenate onto
            line.push('\n');
            if let Err(e) = writer.write_all(line.as_bytes()).await {
                error!(?e, path = %sink_path, "sink write failed, dropping record");
                continue;
            }
            written += 1;
        }
        if let Err(e) = writer.flush().await {
            error!(?e, path = %sink_path, "sink flush failed");
        }
        debug!(path = %sink_path, written, "sink writer stopped");
    });

    Ok((
        RecordSink {
            path: path.to_string(),
            tx,
        },
        handle,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sink_appends_lines_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.txt");
        let path = path.to_str().unwrap();

        let (sink, handle) = spawn_sink_writer(path).await.unwrap();
        sink.send_line("1,first".to_string()).unwrap();
        sink.send_line("2,second".to_string()).unwrap();
        drop(sink);
        handle.await.unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(contents, "1,first\n2,second\n");
    }

    #[tokio::test]
    async fn test_every_record_lands_on_its_own_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.txt");
        let path = path.to_str().unwrap();

        let (sink, handle) = spawn_sink_writer(path).await.unwrap();
        for i in 0..100 {
            sink.send_line(format!("{i},record")).unwrap();
        }
        drop(sink);
        handle.await.unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 100);
        for (i, line) in lines.iter().enumerate() {
            assert_eq!(*line, format!("{i},record"));
        }
    }

    #[tokio::test]
    async fn test_sink_truncates_on_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.txt");
        std::fs::write(&path, "stale\n").unwrap();
        let path = path.to_str().unwrap();

        let (sink, handle) = spawn_sink_writer(path).await.unwrap();
        drop(sink);
        handle.await.unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_destination_fails_fast() {
        // A directory cannot be opened for writing as a file
        let dir = tempfile::tempdir().unwrap();
        let result = spawn_sink_writer(dir.path().to_str().unwrap()).await;
        assert!(result.is_err());
    }
}
