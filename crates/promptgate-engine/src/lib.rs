//! PromptGate Decision Engine
//!
//! This crate decides, per intercepted call, whether content may leave
//! the page:
//! - Two-tier detection (synchronous local check, bounded remote check)
//! - Approval bypass keyed by content hash
//! - Short-lived state: file cache and recently-reported set
//! - User notification on block

pub mod blocker;
pub mod file_cache;
pub mod notifier;
pub mod reported;

pub use blocker::Blocker;
pub use file_cache::FileCache;
pub use notifier::{LogNotifier, Notifier};
pub use reported::RecentlyReportedSet;
