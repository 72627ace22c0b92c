//! User notification on block
//!
//! The notifier is an ephemeral banner: fire-and-forget, no state other
//! components depend on. Implementations must never fail the caller.

use tracing::warn;

pub trait Notifier: Send + Sync {
    /// Surface a blocked send to the user, with the categories that fired
    fn notify_blocked(&self, categories: &[String]);
}

/// Notifier that writes a structured log line instead of a banner
///
/// Hosts with a real UI supply their own implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_blocked(&self, categories: &[String]) {
        warn!(
            categories = categories.join(", "),
            "Blocked outbound message containing sensitive content"
        );
    }
}
