// Debug logging module for asynchronous decision logging
//
// This module provides fire-and-forget async logging so the decision is never
// blocked on disk. Each decision is written as one line of a JSONL file.

use log::{error, warn};
use serde::Serialize;
use std::fmt::Display;
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::runtime::Handle;
use tokio::sync::Mutex;

use crate::observer::{Observer, SelectedMoveEvent};

/// Represents a single debug log entry
#[derive(Debug, Serialize)]
struct DebugLogEntry {
    candidates: Vec<String>,
    selection: String,
    elapsed_ms: u128,
    timestamp: String,
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct JsonlEventLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl JsonlEventLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return JsonlEventLogger::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                JsonlEventLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                JsonlEventLogger::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        JsonlEventLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Internal async function that performs the actual file write
    async fn write_entry(file_handle: Arc<Mutex<Option<File>>>, entry: DebugLogEntry) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }
}

impl<M: Display> Observer<M> for JsonlEventLogger {
    /// Spawns a tokio task that writes the entry without blocking.
    /// Outside a tokio runtime the entry is dropped.
    fn on_move_selected(&self, event: &SelectedMoveEvent<M>) {
        if !self.enabled {
            return;
        }

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!("No tokio runtime available, dropping debug log entry");
                return;
            }
        };

        let entry = DebugLogEntry {
            candidates: event.candidates.iter().map(|m| m.to_string()).collect(),
            selection: event.selection.to_string(),
            elapsed_ms: event.elapsed.as_millis(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        let file_handle = self.file.clone();

        handle.spawn(async move {
            Self::write_entry(file_handle, entry).await;
        });
    }
}
