//! Guard runtime context
//!
//! One explicitly constructed object owns every component and the
//! overridden primitives' wrappers. No ambient module-level state: the
//! whole engine restarts by dropping the context and building a new one.

use crate::request::RequestInterceptor;
use crate::socket::SocketInterceptor;
use promptgate_core::{
    DetectionOracle, GuardConfig, HttpTransport, Result, ScanOrigin, SocketSink, StagedFile,
};
use promptgate_engine::{Blocker, FileCache, Notifier};
use promptgate_ingress::TrafficClassifier;
use std::sync::Arc;

pub struct GuardContext {
    config: GuardConfig,
    classifier: Arc<TrafficClassifier>,
    blocker: Arc<Blocker>,
    file_cache: Arc<FileCache>,
}

impl GuardContext {
    pub fn new(
        config: GuardConfig,
        oracle: Arc<dyn DetectionOracle>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let classifier = Arc::new(TrafficClassifier::new(&config.traffic)?);
        let blocker = Arc::new(Blocker::new(&config, Arc::clone(&oracle), notifier));
        let file_cache = Arc::new(FileCache::new(
            config.files.ttl(),
            config.files.text_extensions.clone(),
            config.files.remote_extensions.clone(),
            oracle,
            config.oracle.timeout(),
        ));

        Ok(Self {
            config,
            classifier,
            blocker,
            file_cache,
        })
    }

    /// Wrap the host's request primitive
    pub fn wrap_http(&self, inner: Arc<dyn HttpTransport>) -> RequestInterceptor {
        RequestInterceptor::new(
            inner,
            Arc::clone(&self.classifier),
            Arc::clone(&self.blocker),
            Arc::clone(&self.file_cache),
        )
    }

    /// Wrap the host's socket primitive for one endpoint
    pub fn wrap_socket(
        &self,
        inner: Arc<dyn SocketSink>,
        endpoint: impl Into<String>,
    ) -> Result<SocketInterceptor> {
        SocketInterceptor::new(
            inner,
            Arc::clone(&self.classifier),
            Arc::clone(&self.blocker),
            endpoint,
        )
    }

    /// Stage a user-selected file: extract, cache, and proactively scan
    ///
    /// The scan runs detached; its only side effects are notification and
    /// reporting. Returns the extracted text, or absent for unsupported
    /// formats.
    pub async fn stage_file(&self, file: StagedFile) -> Option<String> {
        let content = self.file_cache.cache_file(&file).await?;

        let blocker = Arc::clone(&self.blocker);
        let origin = ScanOrigin::for_file(&file.name);
        let text = content.clone();
        tokio::spawn(async move {
            let _ = blocker.check_and_block(&text, &origin).await;
        });

        Some(content)
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    pub fn blocker(&self) -> &Arc<Blocker> {
        &self.blocker
    }

    pub fn file_cache(&self) -> &Arc<FileCache> {
        &self.file_cache
    }
}
