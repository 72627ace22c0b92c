//! PromptGate Ingress
//!
//! This crate normalizes the heterogeneous payloads seen on intercepted
//! network calls:
//! - Payload classification into a closed set of tagged variants
//! - Extraction of the user-authored message and its attachments
//! - Traffic classification (telemetry/analytics exemption)

pub mod parser;
pub mod payload;
pub mod traffic;

pub use parser::{extract_attachments, extract_message, extract_user_message};
pub use payload::{
    ChatPayload, ContentPart, ConversationPayload, SingleShotPayload, Turn, TurnContent,
    classify_payload,
};
pub use traffic::TrafficClassifier;
