use std::sync::{Mutex, PoisonError};

use chrono::Local;
use tracing::debug;

/// Append-only in-memory event log. Entries are prefixed with the local
/// wall-clock time at which they were recorded. Unbounded; acceptable for
/// this system's in-memory scope.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    messages: Mutex<Vec<String>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn record(&self, message: &str) {
        let stamped = format!(
            "{} - {}",
            Local::now().naive_local().format("%Y-%m-%d %H:%M:%S"),
            message
        );
        debug!("Notification: {}", message);

        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(stamped);
    }

    /// Defensive snapshot copy, insertion order.
    pub fn all(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
