//! Short-lived file content cache
//!
//! The host application may reference a file by name in a later, separate
//! request after the user selects it. The cache reunites content with
//! that eventual reference without holding any file handle open. Entries
//! expire on a fixed horizon scheduled at insertion; a hit does not
//! extend the TTL.

use dashmap::DashMap;
use promptgate_core::{DetectionOracle, StagedFile};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
struct CacheEntry {
    content: String,
    expires_at: Instant,
}

pub struct FileCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    text_extensions: HashSet<String>,
    remote_extensions: HashSet<String>,
    oracle: Arc<dyn DetectionOracle>,
    oracle_timeout: Duration,
}

impl FileCache {
    pub fn new(
        ttl: Duration,
        text_extensions: impl IntoIterator<Item = String>,
        remote_extensions: impl IntoIterator<Item = String>,
        oracle: Arc<dyn DetectionOracle>,
        oracle_timeout: Duration,
    ) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            text_extensions: text_extensions.into_iter().collect(),
            remote_extensions: remote_extensions.into_iter().collect(),
            oracle,
            oracle_timeout,
        }
    }

    /// Extract a file's textual content and cache it under its filename
    ///
    /// Textual formats are read in-process; delegated formats go through
    /// the oracle's extraction call. Unknown extensions are not cached
    /// and yield absent.
    pub async fn cache_file(&self, file: &StagedFile) -> Option<String> {
        let extension = file.extension()?;

        let content = if self.text_extensions.contains(&extension) {
            String::from_utf8_lossy(&file.bytes).into_owned()
        } else if self.remote_extensions.contains(&extension) {
            self.extract_remotely(file).await?
        } else {
            debug!(filename = %file.name, %extension, "Skipping unsupported file type");
            return None;
        };

        self.prune();
        self.entries.insert(
            file.name.clone(),
            CacheEntry {
                content: content.clone(),
                expires_at: Instant::now() + self.ttl,
            },
        );

        Some(content)
    }

    /// Previously extracted content for a filename, if still live
    pub fn get(&self, filename: &str) -> Option<String> {
        let content = {
            let entry = self.entries.get(filename)?;
            (entry.expires_at > Instant::now()).then(|| entry.content.clone())
        };

        if content.is_none() {
            self.entries.remove(filename);
        }
        content
    }

    async fn extract_remotely(&self, file: &StagedFile) -> Option<String> {
        let extraction = tokio::time::timeout(
            self.oracle_timeout,
            self.oracle
                .extract_text(&file.bytes, &file.name, &file.mime_type),
        )
        .await;

        match extraction {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!(filename = %file.name, error = %e, "Remote text extraction failed");
                None
            }
            Err(_) => {
                warn!(filename = %file.name, "Remote text extraction timed out");
                None
            }
        }
    }

    fn prune(&self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| entry.expires_at > now);
    }
}
