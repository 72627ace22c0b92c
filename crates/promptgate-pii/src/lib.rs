//! PromptGate Fast-Path PII Detection
//!
//! This crate provides the synchronous local detection tier:
//! - National ID (SSN) pattern detection with validity filtering
//! - Idempotent censoring with a fixed-width mask token
//!
//! It is the only tier fast enough to run inline on a synchronous send
//! path, and must complete before any network primitive proceeds.

pub mod detector;

pub use detector::{Detection, SsnDetector, MASK_TOKEN, SSN_CATEGORY};
