//! Regex-based national ID detector

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Category label reported for local detections
pub const SSN_CATEGORY: &str = "SSN";

/// Fixed-width mask substituted for every match
///
/// Contains no digits, so censoring already-censored text is a no-op.
pub const MASK_TOKEN: &str = "***-**-****";

// 3-2-4 grouping with optional hyphen or space separators, anchored at
// word boundaries so it does not match inside longer digit runs.
static SSN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{3}[-\s]?\d{2}[-\s]?\d{4}\b").expect("static SSN pattern"));

/// A single local detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    /// Start position in the text
    pub start: usize,

    /// End position in the text
    pub end: usize,

    /// The detected text
    pub text: String,
}

/// Synchronous detector for the canonical 3-2-4 national ID grouping
#[derive(Debug, Clone, Copy, Default)]
pub struct SsnDetector;

impl SsnDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect valid ID numbers in the given text, in position order
    pub fn detect(&self, text: &str) -> Vec<Detection> {
        SSN_REGEX
            .find_iter(text)
            .filter(|m| is_plausible_ssn(m.as_str()))
            .map(|m| Detection {
                start: m.start(),
                end: m.end(),
                text: m.as_str().to_string(),
            })
            .collect()
    }

    /// True when the text contains at least one valid ID number
    pub fn contains_ssn(&self, text: &str) -> bool {
        SSN_REGEX
            .find_iter(text)
            .any(|m| is_plausible_ssn(m.as_str()))
    }

    /// Replace every match with the fixed-width mask token
    pub fn censor(&self, text: &str) -> String {
        let detections = self.detect(text);
        if detections.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for detection in detections {
            out.push_str(&text[cursor..detection.start]);
            out.push_str(MASK_TOKEN);
            cursor = detection.end;
        }
        out.push_str(&text[cursor..]);
        out
    }
}

/// Filter out number groupings that can never be issued
fn is_plausible_ssn(candidate: &str) -> bool {
    let digits: String = candidate.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() != 9 {
        return false;
    }

    // All zeros in any group
    if digits.starts_with("000") || digits[3..5] == *"00" || digits[5..9] == *"0000" {
        return false;
    }

    // Area 666 is never issued
    if digits.starts_with("666") {
        return false;
    }

    // Area 9xx is reserved for ITIN
    if digits.starts_with('9') {
        return false;
    }

    true
}

#[cfg(test)]
mod tests;
