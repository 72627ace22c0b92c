//! Message, detection, and file types shared across the engine

use serde::{Deserialize, Serialize};

/// User-authored content extracted from an intercepted payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMessage {
    /// The user's text, space-joined from inline content parts
    pub text: String,

    /// Attachments referenced by the same turn, in payload order
    pub attachments: Vec<Attachment>,
}

/// An attachment descriptor referenced by a user turn
///
/// The parser never reads attachment contents; it only carries the
/// display name, declared MIME type, and the platform-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(alias = "file_name")]
    pub name: String,

    #[serde(default, alias = "mimeType", alias = "file_type")]
    pub mime_type: Option<String>,

    #[serde(default, alias = "file_id")]
    pub id: Option<String>,
}

/// Result of a detection pass over a piece of text
///
/// Produced once per evaluation and never persisted by the engine.
/// `sanitized` is the oracle's own masked rendition of the input, when
/// the oracle provides one; the local censor is always applied on top.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub has_pii: bool,

    pub has_secrets: bool,

    /// Category labels (not values), e.g. `EMAIL_ADDRESS`, `SECRETS`
    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default)]
    pub sanitized: Option<String>,
}

impl DetectionResult {
    /// True when no tier found anything
    pub fn is_clean(&self) -> bool {
        !self.has_pii && !self.has_secrets && self.categories.is_empty()
    }
}

/// Call-site context accompanying an evaluation, carried into audit reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOrigin {
    pub url: String,
    pub domain: String,
    pub content_type: String,
}

impl ScanOrigin {
    /// Origin for an intercepted request-transport send
    pub fn for_request(url: &str) -> Self {
        Self {
            url: url.to_string(),
            domain: domain_of(url),
            content_type: "prompt".to_string(),
        }
    }

    /// Origin for an intercepted socket-transport send
    pub fn for_socket(endpoint: &str) -> Self {
        Self {
            url: endpoint.to_string(),
            domain: domain_of(endpoint),
            content_type: "prompt".to_string(),
        }
    }

    /// Origin for a proactive scan of staged file content
    pub fn for_file(filename: &str) -> Self {
        Self {
            url: filename.to_string(),
            domain: String::new(),
            content_type: "file".to_string(),
        }
    }
}

/// Extract the host portion of a URL without a full parse
///
/// Anything before the first path separator after the scheme counts as
/// the domain, including a port.
fn domain_of(url: &str) -> String {
    let rest = url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(url);

    rest.split(['/', '?', '#'])
        .next()
        .unwrap_or("")
        .to_string()
}

/// A file-like object handed to the file cache for staging
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl StagedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Lowercased file extension, if any
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.name.rsplit_once('.')?;
        if ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_extraction() {
        assert_eq!(
            ScanOrigin::for_request("https://chat.example.com/api/conversation").domain,
            "chat.example.com"
        );
        assert_eq!(
            ScanOrigin::for_socket("wss://ws.example.com:8443/realtime?v=2").domain,
            "ws.example.com:8443"
        );
        assert_eq!(ScanOrigin::for_request("chat.example.com").domain, "chat.example.com");
    }

    #[test]
    fn test_file_origin_content_type() {
        let origin = ScanOrigin::for_file("notes.txt");
        assert_eq!(origin.content_type, "file");
        assert_eq!(origin.url, "notes.txt");
    }

    #[test]
    fn test_staged_file_extension() {
        assert_eq!(
            StagedFile::new("report.final.PDF", "application/pdf", vec![]).extension(),
            Some("pdf".to_string())
        );
        assert_eq!(StagedFile::new("README", "text/plain", vec![]).extension(), None);
        assert_eq!(StagedFile::new("archive.", "x", vec![]).extension(), None);
    }

    #[test]
    fn test_attachment_field_aliases() {
        let att: Attachment = serde_json::from_value(serde_json::json!({
            "file_name": "resume.pdf",
            "mimeType": "application/pdf",
            "file_id": "file-abc123"
        }))
        .unwrap();

        assert_eq!(att.name, "resume.pdf");
        assert_eq!(att.mime_type.as_deref(), Some("application/pdf"));
        assert_eq!(att.id.as_deref(), Some("file-abc123"));
    }

    #[test]
    fn test_detection_result_is_clean() {
        assert!(DetectionResult::default().is_clean());

        let dirty = DetectionResult {
            has_pii: true,
            categories: vec!["EMAIL_ADDRESS".to_string()],
            ..Default::default()
        };
        assert!(!dirty.is_clean());
    }
}
