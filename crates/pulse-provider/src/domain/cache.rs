//! # Subscriber Cache
//!
//! Ordered collection of consumer subscription records. Written by the
//! Subscription-domain worker (accept/deny), scanned by the
//! Notification-domain worker to build the observer set. The cache has its
//! own lock, distinct from every queue lock; writers and the dispatch scan
//! hold it for the full mutation/scan.

use parking_lot::RwLock;
use shared_types::{Consumer, ObserverId};
use tracing::debug;

/// Which observer handle a dispatch collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchChannel {
    /// Message-resource observers.
    Message,
    /// Sync-resource observers.
    Sync,
}

/// One consumer's standing subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRecord {
    /// Consumer identity.
    pub consumer_id: String,
    /// Observer handle for the message resource.
    pub message_observer_id: ObserverId,
    /// Observer handle for the sync resource.
    pub sync_observer_id: ObserverId,
    /// Whether this consumer receives traffic.
    pub accepted: bool,
}

/// Result of an upsert, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new record was appended at the tail.
    Inserted,
    /// An existing record was updated in place, keeping its position.
    Updated,
}

/// Insertion-ordered subscription records behind a single lock.
///
/// Records are never duplicated per consumer id: repeated accept/deny for a
/// known id updates the record in place.
pub struct SubscriberCache {
    records: RwLock<Vec<SubscriptionRecord>>,
}

impl SubscriberCache {
    /// Create an empty cache with room for `capacity` records.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            records: RwLock::new(Vec::with_capacity(capacity)),
        }
    }

    /// Insert or update the record for `consumer`.
    pub fn upsert(&self, consumer: &Consumer, accepted: bool) -> UpsertOutcome {
        let mut records = self.records.write();

        if let Some(record) = records
            .iter_mut()
            .find(|record| record.consumer_id == consumer.consumer_id)
        {
            record.message_observer_id = consumer.message_observer_id;
            record.sync_observer_id = consumer.sync_observer_id;
            record.accepted = accepted;
            debug!(consumer = %consumer.consumer_id, accepted, "subscription updated");
            return UpsertOutcome::Updated;
        }

        records.push(SubscriptionRecord {
            consumer_id: consumer.consumer_id.clone(),
            message_observer_id: consumer.message_observer_id,
            sync_observer_id: consumer.sync_observer_id,
            accepted,
        });
        debug!(consumer = %consumer.consumer_id, accepted, "subscription inserted");
        UpsertOutcome::Inserted
    }

    /// Collect the observer ids of accepted records, in insertion order.
    ///
    /// `capacity` is a preallocation hint only; the list grows past it.
    #[must_use]
    pub fn observers(&self, channel: DispatchChannel, capacity: usize) -> Vec<ObserverId> {
        let records = self.records.read();
        let mut observers = Vec::with_capacity(capacity.min(records.len()));

        for record in records.iter().filter(|record| record.accepted) {
            observers.push(match channel {
                DispatchChannel::Message => record.message_observer_id,
                DispatchChannel::Sync => record.sync_observer_id,
            });
        }
        observers
    }

    /// Drop the record for `consumer_id` (explicit unsubscribe).
    pub fn remove(&self, consumer_id: &str) -> bool {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|record| record.consumer_id != consumer_id);
        records.len() != before
    }

    /// Drop every record (provider stop).
    pub fn clear(&self) {
        self.records.write().clear();
    }

    /// Whether the cache holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Number of records, accepted or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Copy of the current records, for logging and tests.
    #[must_use]
    pub fn snapshot(&self) -> Vec<SubscriptionRecord> {
        self.records.read().clone()
    }
}
