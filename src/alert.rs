//! User-facing failure notices.

use parking_lot::Mutex;

/// Blocking notice shown to the shopper when a gesture fails.
pub trait Alert: Send + Sync {
    fn alert(&self, message: &str);
}

/// Keeps every alert in order and logs it.
///
/// Used by hosts without a native dialog (the developer harness, tests).
#[derive(Debug, Default)]
pub struct RecordedAlerts {
    messages: Mutex<Vec<String>>,
}

impl RecordedAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock())
    }
}

impl Alert for RecordedAlerts {
    fn alert(&self, message: &str) {
        tracing::warn!(message, "Cart alert");
        self.messages.lock().push(message.to_string());
    }
}
