//! Synthetic substitute responses
//!
//! A blocked request must still resolve as a success: surfacing a network
//! failure would trigger the host page's error handling and automatic
//! retries that could resend the same content through another code path.

use chrono::Utc;
use promptgate_core::TransportResponse;
use promptgate_ingress::ChatPayload;
use serde_json::json;
use uuid::Uuid;

/// Assistant-voiced notice placed in the substitute completion
pub const BLOCKED_NOTICE: &str =
    "This message was held before sending because it may contain sensitive information.";

/// Build a well-formed success response shaped to the payload schema
pub fn synthesize_blocked_response(payload: &ChatPayload) -> TransportResponse {
    let body = match payload {
        ChatPayload::Conversation(_) => json!({
            "id": format!("chatcmpl-{}", Uuid::new_v4().simple()),
            "object": "chat.completion",
            "created": Utc::now().timestamp(),
            "model": "content-filter",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": BLOCKED_NOTICE
                },
                "finish_reason": "content_filter"
            }],
            "usage": {
                "prompt_tokens": 0,
                "completion_tokens": 0,
                "total_tokens": 0
            }
        }),
        ChatPayload::SingleShot(_) => json!({
            "text": BLOCKED_NOTICE
        }),
        ChatPayload::Unrecognized => json!({
            "status": "ok"
        }),
    };

    TransportResponse::json(body.to_string())
}
