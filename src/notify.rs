//! Notification collaborator: fire-and-forget user-facing notices.
//!
//! The service reports mutation outcomes here and never inspects a result.

use tracing::{error, info};

pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that renders notices into the log stream.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        info!(target: "user_roster::notice", "{message}");
    }

    fn error(&self, message: &str) {
        error!(target: "user_roster::notice", "{message}");
    }
}
