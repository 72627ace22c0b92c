//! End-to-end integration tests for PromptGate
//!
//! The test suites in `tests/` wire the interceptors, engine, and HTTP
//! oracle client against a mocked oracle backend to verify the full
//! interception flow.
