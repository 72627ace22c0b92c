use super::*;

#[test]
fn test_detects_hyphenated_ssn() {
    let detector = SsnDetector::new();
    assert!(detector.contains_ssn("My SSN is 123-45-6789"));

    let detections = detector.detect("My SSN is 123-45-6789");
    assert_eq!(detections.len(), 1);
    assert_eq!(detections[0].text, "123-45-6789");
}

#[test]
fn test_detects_space_and_compact_separators() {
    let detector = SsnDetector::new();
    assert!(detector.contains_ssn("ssn 123 45 6789 on file"));
    assert!(detector.contains_ssn("ssn 123456789 on file"));
}

#[test]
fn test_word_boundary_anchoring() {
    let detector = SsnDetector::new();

    // Inside a longer digit run the grouping must not fire
    assert!(!detector.contains_ssn("order id 99123456789001"));
    assert!(!detector.contains_ssn("1234567890"));
}

#[test]
fn test_rejects_unissuable_numbers() {
    let detector = SsnDetector::new();
    assert!(!detector.contains_ssn("000-12-3456"));
    assert!(!detector.contains_ssn("666-12-3456"));
    assert!(!detector.contains_ssn("912-34-5678"));
    assert!(!detector.contains_ssn("123-00-4567"));
    assert!(!detector.contains_ssn("123-45-0000"));
}

#[test]
fn test_censor_replaces_all_matches() {
    let detector = SsnDetector::new();
    let censored = detector.censor("first 123-45-6789 then 234 56 7890 done");
    assert_eq!(censored, format!("first {MASK_TOKEN} then {MASK_TOKEN} done"));
}

#[test]
fn test_censor_leaves_unissuable_numbers_alone() {
    let detector = SsnDetector::new();
    let text = "not a real one: 000-12-3456";
    assert_eq!(detector.censor(text), text);
}

#[test]
fn test_censor_is_idempotent() {
    let detector = SsnDetector::new();
    let once = detector.censor("ssn: 123-45-6789 and again 123456789");
    let twice = detector.censor(&once);
    assert_eq!(once, twice);
    assert!(!detector.contains_ssn(&once));
}

#[test]
fn test_censor_noop_without_matches() {
    let detector = SsnDetector::new();
    let text = "nothing sensitive here";
    assert_eq!(detector.censor(text), text);
}

#[test]
fn test_mask_token_does_not_match_pattern() {
    let detector = SsnDetector::new();
    assert!(!detector.contains_ssn(MASK_TOKEN));
}
