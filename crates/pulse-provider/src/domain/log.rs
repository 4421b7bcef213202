//! Log of successfully dispatched message ids.
//!
//! Initialized at provider start, cleared at stop. Lets the application
//! correlate inbound read-acks with messages this provider actually sent.

use parking_lot::RwLock;
use shared_types::MessageId;

/// Insertion-ordered record of dispatched message ids.
pub struct MessageLog {
    entries: RwLock<Vec<MessageId>>,
}

impl MessageLog {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Record a dispatched message id. Re-sends of the same id are kept
    /// once.
    pub fn record(&self, message_id: MessageId) {
        let mut entries = self.entries.write();
        if !entries.contains(&message_id) {
            entries.push(message_id);
        }
    }

    /// Whether `message_id` was ever dispatched successfully.
    #[must_use]
    pub fn contains(&self, message_id: MessageId) -> bool {
        self.entries.read().contains(&message_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}
