//! Traffic classification
//!
//! Telemetry and analytics traffic shares a transport with real messages
//! but must never be classified or blocked. Both checks run before the
//! parser and the decision engine; a true result short-circuits the whole
//! pipeline and passes the call through unmodified.

use aho_corasick::AhoCorasick;
use promptgate_core::config::TrafficConfig;
use promptgate_core::{Error, Result};
use serde_json::Value;

const EVENT_TYPE_TAGS: [&str; 6] = ["track", "page", "identify", "screen", "group", "alias"];

/// Distinguishes conversational payloads from telemetry
#[derive(Debug)]
pub struct TrafficClassifier {
    deny_matcher: Option<AhoCorasick>,
}

impl TrafficClassifier {
    pub fn new(config: &TrafficConfig) -> Result<Self> {
        let deny_matcher = if config.skip_url_substrings.is_empty() {
            None
        } else {
            let matcher = AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .build(&config.skip_url_substrings)
                .map_err(|e| Error::Config(format!("Invalid skip-URL list: {}", e)))?;
            Some(matcher)
        };

        Ok(Self { deny_matcher })
    }

    /// Substring containment against the configured deny-list
    ///
    /// Pure containment, not a domain parse, so odd URL encodings of a
    /// known substring still match.
    pub fn should_skip_url(&self, url: &str) -> bool {
        self.deny_matcher
            .as_ref()
            .is_some_and(|m| m.is_match(url))
    }

    /// True when the payload exhibits telemetry-shaped fields
    ///
    /// Parse failure returns false, toward scrutiny rather than
    /// exemption.
    pub fn is_analytics_payload(&self, raw: &[u8]) -> bool {
        let Ok(text) = std::str::from_utf8(raw) else {
            return false;
        };
        let Ok(value) = serde_json::from_str::<Value>(text) else {
            return false;
        };

        // Batch-of-events wrapper
        if value.get("batch").is_some_and(Value::is_array) {
            return true;
        }

        // Write-key / auth-token fields
        if value.get("writeKey").is_some() || value.get("write_key").is_some() {
            return true;
        }
        if value.get("api_key").is_some() && value.get("events").is_some() {
            return true;
        }

        // Anonymous-identifier fields
        if value.get("anonymousId").is_some()
            || value.get("anonymous_id").is_some()
            || value.get("device_id").is_some()
        {
            return true;
        }

        // Enumerated event-type tags
        for key in ["type", "event"] {
            if let Some(tag) = value.get(key).and_then(Value::as_str)
                && EVENT_TYPE_TAGS.contains(&tag)
            {
                return true;
            }
        }

        false
    }
}
