//! PromptGate Interceptors
//!
//! This crate wraps the host's network primitives with the blocking
//! pipeline:
//! - `RequestInterceptor` gates the awaitable request transport on every
//!   detection tier and substitutes a synthetic success on block
//! - `SocketInterceptor` gates the synchronous socket transport on the
//!   local tier only, with detached after-the-fact detection
//! - `GuardContext` owns configuration and component wiring
//!
//! Interceptors never surface an error of their own making; only the
//! inner primitive's failures pass through to the host.

pub mod context;
pub mod request;
pub mod socket;
pub mod synth;

pub use context::GuardContext;
pub use request::RequestInterceptor;
pub use socket::SocketInterceptor;
pub use synth::{BLOCKED_NOTICE, synthesize_blocked_response};
