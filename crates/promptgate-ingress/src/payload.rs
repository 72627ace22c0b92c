//! Tagged payload variants
//!
//! Classification is an explicit step producing a closed enum before any
//! field access. Input is accepted only if it parses as JSON; raw bytes
//! are never treated as a message, so binary and opaque payloads cannot
//! trigger false blocking.

use promptgate_core::Attachment;
use serde::Deserialize;
use serde_json::Value;

/// The closed set of payload shapes the parser understands
#[derive(Debug, Clone, PartialEq)]
pub enum ChatPayload {
    /// Multi-turn conversation: ordered turns tagged with a role
    Conversation(ConversationPayload),

    /// Flat single-shot form: a top-level `prompt` or `text` field
    SingleShot(SingleShotPayload),

    /// Anything else, including non-JSON and non-UTF-8 bodies
    Unrecognized,
}

/// Multi-turn conversation schema
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConversationPayload {
    pub messages: Vec<Turn>,
}

/// One turn of a conversation
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Turn {
    pub role: String,

    #[serde(default)]
    pub content: Option<TurnContent>,

    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Turn {
    pub fn is_user(&self) -> bool {
        self.role.eq_ignore_ascii_case("user")
    }

    /// Space-join the string-typed, non-blank inline parts, in order
    pub fn inline_text(&self) -> String {
        match &self.content {
            None => String::new(),
            Some(TurnContent::Text(text)) => text.trim().to_string(),
            Some(TurnContent::Parts(parts)) => parts
                .iter()
                .filter_map(ContentPart::as_text)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// Turn content: a plain string or an array of parts
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TurnContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// A single inline content part
///
/// Non-text parts (images, tool payloads, unknown objects) deserialize
/// into `Other` and are ignored rather than failing the whole payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ContentPart {
    Bare(String),
    Tagged {
        #[serde(rename = "type")]
        kind: String,
        #[serde(default)]
        text: Option<String>,
    },
    Other(Value),
}

impl ContentPart {
    /// The part's text, when it is string-typed and non-blank
    pub fn as_text(&self) -> Option<&str> {
        let text = match self {
            ContentPart::Bare(text) => text.as_str(),
            ContentPart::Tagged { kind, text } if kind == "text" => text.as_deref()?,
            _ => return None,
        };

        let text = text.trim();
        (!text.is_empty()).then_some(text)
    }
}

/// Flat single-shot schema
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SingleShotPayload {
    #[serde(default)]
    pub prompt: Option<String>,

    #[serde(default)]
    pub text: Option<String>,
}

impl SingleShotPayload {
    /// `prompt` wins when both fields are present
    pub fn body(&self) -> Option<&str> {
        self.prompt.as_deref().or(self.text.as_deref())
    }
}

/// Classify a raw payload into one of the tagged variants
pub fn classify_payload(raw: &[u8]) -> ChatPayload {
    let Ok(text) = std::str::from_utf8(raw) else {
        return ChatPayload::Unrecognized;
    };
    let Ok(value) = serde_json::from_str::<Value>(text) else {
        return ChatPayload::Unrecognized;
    };

    if value.get("messages").is_some_and(Value::is_array)
        && let Ok(conversation) = serde_json::from_value::<ConversationPayload>(value.clone())
    {
        return ChatPayload::Conversation(conversation);
    }

    if let Ok(single) = serde_json::from_value::<SingleShotPayload>(value)
        && single.body().is_some()
    {
        return ChatPayload::SingleShot(single);
    }

    ChatPayload::Unrecognized
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify(value: Value) -> ChatPayload {
        classify_payload(value.to_string().as_bytes())
    }

    #[test]
    fn test_classifies_conversation() {
        let payload = classify(json!({
            "messages": [{"role": "user", "content": "hi"}]
        }));
        assert!(matches!(payload, ChatPayload::Conversation(_)));
    }

    #[test]
    fn test_classifies_single_shot_prompt_and_text() {
        assert!(matches!(
            classify(json!({"prompt": "hello"})),
            ChatPayload::SingleShot(_)
        ));
        assert!(matches!(
            classify(json!({"text": "hello"})),
            ChatPayload::SingleShot(_)
        ));
    }

    #[test]
    fn test_rejects_non_json_and_binary() {
        assert_eq!(classify_payload(b"just some text"), ChatPayload::Unrecognized);
        assert_eq!(classify_payload(&[0xff, 0xfe, 0x00, 0x01]), ChatPayload::Unrecognized);
    }

    #[test]
    fn test_rejects_json_without_known_shape() {
        assert_eq!(classify(json!({"foo": "bar"})), ChatPayload::Unrecognized);
        assert_eq!(classify(json!({"text": 5})), ChatPayload::Unrecognized);
        assert_eq!(classify(json!([1, 2, 3])), ChatPayload::Unrecognized);
    }

    #[test]
    fn test_non_text_parts_do_not_fail_the_payload() {
        let payload = classify(json!({
            "messages": [{
                "role": "user",
                "content": [
                    {"type": "image", "source": {"url": "https://x/y.png"}},
                    {"type": "text", "text": "caption"},
                    {"unknown_shape": true}
                ]
            }]
        }));

        let ChatPayload::Conversation(conversation) = payload else {
            panic!("expected conversation");
        };
        assert_eq!(conversation.messages[0].inline_text(), "caption");
    }

    #[test]
    fn test_turn_without_content_is_tolerated() {
        let payload = classify(json!({
            "messages": [{"role": "tool"}, {"role": "user", "content": "hello"}]
        }));
        assert!(matches!(payload, ChatPayload::Conversation(_)));
    }
}
