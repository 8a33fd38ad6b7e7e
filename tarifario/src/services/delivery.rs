//! Delivery edges
//!
//! Rendering is synchronous; only the hand-off of finished text and the read
//! of a backup file are async.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use shared::error::{AppError, AppResult, ErrorCode};
use tokio::io::AsyncWriteExt;

fn sink_error(msg: impl Into<String>) -> AppError {
    AppError::with_message(ErrorCode::SinkError, msg)
}

/// Destination of rendered text (clipboard, print queue, download...)
#[async_trait]
pub trait TextSink: Send + Sync {
    async fn deliver(&self, text: &str) -> AppResult<()>;
}

/// Writes to standard output
#[derive(Debug, Default)]
pub struct StdoutSink;

#[async_trait]
impl TextSink for StdoutSink {
    async fn deliver(&self, text: &str) -> AppResult<()> {
        let mut out = tokio::io::stdout();
        out.write_all(text.as_bytes())
            .await
            .map_err(|e| sink_error(format!("stdout write failed: {}", e)))?;
        if !text.ends_with('\n') {
            out.write_all(b"\n")
                .await
                .map_err(|e| sink_error(format!("stdout write failed: {}", e)))?;
        }
        out.flush()
            .await
            .map_err(|e| sink_error(format!("stdout flush failed: {}", e)))
    }
}

/// Writes (replacing) a file, creating parent directories
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TextSink for FileSink {
    async fn deliver(&self, text: &str) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| sink_error(format!("Cannot create {}: {}", parent.display(), e)))?;
        }
        tokio::fs::write(&self.path, text)
            .await
            .map_err(|e| sink_error(format!("Cannot write {}: {}", self.path.display(), e)))?;
        tracing::info!(path = %self.path.display(), bytes = text.len(), "Text delivered");
        Ok(())
    }
}

/// Backup file picked for import, read on demand
#[derive(Debug, Clone)]
pub struct ImportRequest {
    path: PathBuf,
}

impl ImportRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the whole file as UTF-8
    pub async fn read(&self) -> AppResult<String> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AppError::with_message(
                ErrorCode::BackupInvalidFile,
                format!("Cannot read {}: {}", self.path.display(), e),
            )
        })
    }

    /// Shorthand for `ImportRequest::new(path).read()`
    pub async fn from_path(path: impl Into<PathBuf>) -> AppResult<String> {
        Self::new(path).read().await
    }
}
