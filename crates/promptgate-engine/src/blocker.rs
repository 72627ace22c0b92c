//! The decision engine
//!
//! Combines the local fast-path detector with the bounded remote oracle,
//! consults the approval cache, and decides allow/block. Infallible by
//! contract: every collaborator failure degrades to the documented
//! fail-open default and the host page never sees an error originating
//! here.

use crate::notifier::Notifier;
use crate::reported::RecentlyReportedSet;
use chrono::Utc;
use promptgate_core::{
    DetectionOracle, DetectionResult, GuardConfig, ReportEvent, ScanOrigin, content_hash,
};
use promptgate_pii::{SSN_CATEGORY, SsnDetector};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub struct Blocker {
    min_text_len: usize,
    oracle_timeout: Duration,
    detector: SsnDetector,
    oracle: Arc<dyn DetectionOracle>,
    notifier: Arc<dyn Notifier>,
    reported: RecentlyReportedSet,
}

impl Blocker {
    pub fn new(
        config: &GuardConfig,
        oracle: Arc<dyn DetectionOracle>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            min_text_len: config.engine.min_text_len,
            oracle_timeout: config.oracle.timeout(),
            detector: SsnDetector::new(),
            oracle,
            notifier,
            reported: RecentlyReportedSet::new(config.engine.report_horizon()),
        }
    }

    /// Synchronous gate for transports that cannot await the pipeline
    ///
    /// Length guard plus the fast-path detector, nothing else: this must
    /// return before the underlying primitive is allowed to proceed.
    pub fn local_precheck(&self, text: &str) -> bool {
        text.chars().count() >= self.min_text_len && self.detector.contains_ssn(text)
    }

    /// Full evaluation; returns true when the content must not leave
    pub async fn check_and_block(&self, text: &str, origin: &ScanOrigin) -> bool {
        if text.chars().count() < self.min_text_len {
            return false;
        }

        // Local scan completes before the remote tier is even requested
        let local_hit = self.detector.contains_ssn(text);
        let remote = self.remote_scan(text).await;

        let categories = self.merge_categories(local_hit, &remote);
        if categories.is_empty() {
            return false;
        }

        // Hash over the original text, never the censored rendition
        let hash = content_hash(text);
        if self.is_approved(&hash).await {
            debug!(%hash, "Content previously approved, allowing");
            return false;
        }

        self.notifier.notify_blocked(&categories);

        if self.reported.insert(&hash) {
            let base = remote.sanitized.as_deref().unwrap_or(text);
            let event = ReportEvent {
                url: origin.url.clone(),
                domain: origin.domain.clone(),
                content_type: origin.content_type.clone(),
                categories,
                censored_text: self.detector.censor(base),
                content_hash: hash,
                occurred_at: Utc::now(),
            };
            self.spawn_report(event);
        } else {
            debug!(%hash, "Duplicate report suppressed within dedupe horizon");
        }

        true
    }

    async fn remote_scan(&self, text: &str) -> DetectionResult {
        match tokio::time::timeout(self.oracle_timeout, self.oracle.validate(text)).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                warn!(error = %e, "Remote validation failed, continuing with local result");
                DetectionResult::default()
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.oracle_timeout.as_millis() as u64,
                    "Remote validation timed out, continuing with local result"
                );
                DetectionResult::default()
            }
        }
    }

    /// Union of findings; the locally-verified ID category leads
    fn merge_categories(&self, local_hit: bool, remote: &DetectionResult) -> Vec<String> {
        let mut categories = Vec::new();
        if local_hit {
            categories.push(SSN_CATEGORY.to_string());
        }
        for category in &remote.categories {
            if !categories.contains(category) {
                categories.push(category.clone());
            }
        }
        if remote.has_pii && remote.categories.is_empty() {
            categories.push("PII".to_string());
        }
        if remote.has_secrets && !categories.iter().any(|c| c == "SECRETS") {
            categories.push("SECRETS".to_string());
        }
        categories
    }

    async fn is_approved(&self, hash: &str) -> bool {
        match tokio::time::timeout(self.oracle_timeout, self.oracle.is_approved(hash)).await {
            Ok(Ok(approved)) => approved,
            Ok(Err(e)) => {
                warn!(error = %e, "Approval lookup failed, treating as not approved");
                false
            }
            Err(_) => {
                warn!("Approval lookup timed out, treating as not approved");
                false
            }
        }
    }

    fn spawn_report(&self, event: ReportEvent) {
        let oracle = Arc::clone(&self.oracle);
        let timeout = self.oracle_timeout;
        tokio::spawn(async move {
            match tokio::time::timeout(timeout, oracle.report_event(event)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(error = %e, "Audit report delivery failed"),
                Err(_) => warn!("Audit report delivery timed out"),
            }
        });
    }
}
