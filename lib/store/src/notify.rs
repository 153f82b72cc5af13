use std::sync::Arc;

/// Transient user notifications.
///
/// Every mutation failure produces exactly one notification through this
/// port; nothing is silently swallowed. The hosting surface decides how
/// to render it (toast, stderr line, status bar).
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Discards all notifications.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

impl NullNotifier {
    pub fn shared() -> Arc<dyn Notifier> {
        Arc::new(NullNotifier)
    }
}
