//! Output writers
//!
//! The scrape pipeline only depends on the [`ArtworkWriter`] capability;
//! everything else here is glue. Writers are invoked concurrently from
//! multiple worker tasks and must be safe under that, which is why the
//! consolidated log writer serializes through a mutex while the
//! file-per-record writer needs no locking at all (record slugs are unique
//! within a run).

use crate::error::{Error, Result};
use crate::types::Artwork;
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::path::PathBuf;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Destination for completed artwork records.
///
/// `write` returns `true` when the record was persisted. Implementations
/// must tolerate concurrent invocation from multiple worker tasks.
#[async_trait]
pub trait ArtworkWriter: Send + Sync {
    /// Persist one completed record.
    async fn write(&self, artwork: &Artwork) -> bool;
}

/// File-per-record writer: `<slug>.json` metadata plus `<slug>.jpg` image
/// bytes in a target directory.
pub struct MultiFileWriter {
    dir: PathBuf,
    overwrite_existing: bool,
}

impl MultiFileWriter {
    /// Create a writer targeting `dir`. The directory is created on first
    /// write if it does not exist.
    pub fn new(dir: impl Into<PathBuf>, overwrite_existing: bool) -> Self {
        Self {
            dir: dir.into(),
            overwrite_existing,
        }
    }

    async fn write_record(&self, artwork: &Artwork) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let stem = artwork.slug();
        let metadata_path = self.dir.join(format!("{stem}.json"));
        let image_path = self.dir.join(format!("{stem}.jpg"));

        if !self.overwrite_existing
            && (tokio::fs::try_exists(&metadata_path).await?
                || tokio::fs::try_exists(&image_path).await?)
        {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("output for '{stem}' already exists and overwriting is disabled"),
            )));
        }

        let metadata = serde_json::to_vec_pretty(artwork)?;
        tokio::fs::write(&metadata_path, metadata).await?;

        if let Some(image) = &artwork.image {
            tokio::fs::write(&image_path, image).await?;
        }

        Ok(())
    }
}

#[async_trait]
impl ArtworkWriter for MultiFileWriter {
    async fn write(&self, artwork: &Artwork) -> bool {
        match self.write_record(artwork).await {
            Ok(()) => {
                tracing::debug!(url = %artwork.url, dir = %self.dir.display(), "artwork written");
                true
            }
            Err(e) => {
                tracing::error!(url = %artwork.url, error = %e, "failed to write artwork");
                false
            }
        }
    }
}

/// Consolidated log writer: one JSON object per record, line-delimited, with
/// image bytes base64-embedded.
pub struct JsonLogWriter {
    sink: tokio::sync::Mutex<Box<dyn AsyncWrite + Send + Unpin>>,
}

impl JsonLogWriter {
    /// Create a writer over an arbitrary async sink.
    pub fn new(sink: Box<dyn AsyncWrite + Send + Unpin>) -> Self {
        Self {
            sink: tokio::sync::Mutex::new(sink),
        }
    }

    /// Create a writer emitting to standard output.
    pub fn stdout() -> Self {
        Self::new(Box::new(tokio::io::stdout()))
    }

    async fn write_record(&self, artwork: &Artwork) -> Result<()> {
        let mut value = serde_json::to_value(artwork)?;
        if let (serde_json::Value::Object(map), Some(image)) = (&mut value, &artwork.image) {
            map.insert(
                "image".to_string(),
                serde_json::Value::String(BASE64.encode(image)),
            );
        }

        let mut line = serde_json::to_vec(&value)?;
        line.push(b'\n');

        let mut sink = self.sink.lock().await;
        sink.write_all(&line).await?;
        sink.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl ArtworkWriter for JsonLogWriter {
    async fn write(&self, artwork: &Artwork) -> bool {
        match self.write_record(artwork).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(url = %artwork.url, error = %e, "failed to log artwork");
                false
            }
        }
    }
}
