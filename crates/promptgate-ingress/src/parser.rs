//! User message extraction
//!
//! The scan runs from the most recent turn backward and stops at the last
//! user-authored turn: that is the thing the user is about to send, not
//! conversation history. Assistant and system turns are ignored.

use crate::payload::ChatPayload;
use promptgate_core::{Attachment, ExtractedMessage};

/// The user-authored text of a classified payload, if any
pub fn extract_user_message(payload: &ChatPayload) -> Option<String> {
    match payload {
        ChatPayload::Conversation(conversation) => {
            let turn = conversation.messages.iter().rev().find(|t| t.is_user())?;
            let text = turn.inline_text();
            (!text.is_empty()).then_some(text)
        }
        ChatPayload::SingleShot(single) => {
            let text = single.body()?.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        ChatPayload::Unrecognized => None,
    }
}

/// Attachments referenced by the most recent user turn
pub fn extract_attachments(payload: &ChatPayload) -> Vec<Attachment> {
    match payload {
        ChatPayload::Conversation(conversation) => conversation
            .messages
            .iter()
            .rev()
            .find(|t| t.is_user())
            .map(|t| t.attachments.clone())
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Combined extraction used by the interceptors
pub fn extract_message(payload: &ChatPayload) -> Option<ExtractedMessage> {
    let attachments = extract_attachments(payload);
    let text = extract_user_message(payload);

    if text.is_none() && attachments.is_empty() {
        return None;
    }

    Some(ExtractedMessage {
        text: text.unwrap_or_default(),
        attachments,
    })
}
