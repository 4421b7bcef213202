//! # Core Domain Entities
//!
//! Defines the provider-side notification entities.
//!
//! ## Clusters
//!
//! - **Outbound**: `Message`, `SyncInfo`: values pushed to subscribed
//!   consumers.
//! - **Subscription**: `Consumer`, `SubscribeRequest`, `AccessPolicy`:
//!   values flowing through the accept/deny path.

use serde::{Deserialize, Serialize};

/// Numeric identifier of a notification message.
pub type MessageId = u64;

/// Opaque numeric handle for one consumer's standing observation of a
/// resource (message or sync) on the transport layer.
pub type ObserverId = u32;

// =============================================================================
// CLUSTER A: OUTBOUND VALUES
// =============================================================================

/// Urgency class of a notification message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    /// Requires immediate attention.
    Alert,
    /// Important but not urgent.
    Notice,
    /// Informational event.
    Event,
    /// Low-priority information.
    Info,
}

impl MessageType {
    /// Numeric code carried in the outbound representation.
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Alert => 1,
            Self::Notice => 2,
            Self::Event => 3,
            Self::Info => 4,
        }
    }
}

/// Read-synchronization state of a message across consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncState {
    /// Message delivered but not yet read anywhere.
    Unread,
    /// Message read on at least one consumer.
    Read,
    /// Message dismissed/deleted.
    Deleted,
}

impl SyncState {
    /// Numeric code carried in the outbound representation.
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Unread => 0,
            Self::Read => 1,
            Self::Deleted => 2,
        }
    }
}

/// A notification message owned by the provider application.
///
/// `message_id` and `provider_id` are mandatory; every other field is
/// copied into the outbound representation only when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Message {
    /// Unique message identifier, assigned by the application.
    pub message_id: MessageId,
    /// Identifier of the provider that originated this message.
    pub provider_id: String,
    /// Urgency class.
    pub message_type: Option<MessageType>,
    /// Time-to-live in seconds; `None` means no expiry.
    pub ttl: Option<u64>,
    /// Creation timestamp, application-formatted.
    pub date_time: Option<String>,
    /// Short human-readable title.
    pub title: Option<String>,
    /// Body text.
    pub content_text: Option<String>,
    /// Originating application or device name.
    pub source_name: Option<String>,
}

impl Message {
    /// Create a message with only the mandatory fields set.
    #[must_use]
    pub fn new(message_id: MessageId, provider_id: impl Into<String>) -> Self {
        Self {
            message_id,
            provider_id: provider_id.into(),
            ..Self::default()
        }
    }
}

/// A read-synchronization event for one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncInfo {
    /// The message this event refers to.
    pub message_id: MessageId,
    /// Identifier of the provider that owns the message.
    pub provider_id: String,
    /// New synchronization state.
    pub state: SyncState,
}

impl SyncInfo {
    #[must_use]
    pub fn new(message_id: MessageId, provider_id: impl Into<String>, state: SyncState) -> Self {
        Self {
            message_id,
            provider_id: provider_id.into(),
            state,
        }
    }
}

// =============================================================================
// CLUSTER B: SUBSCRIPTION VALUES
// =============================================================================

/// Who decides whether a subscribing consumer receives traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessPolicy {
    /// The application decides per consumer via the accept/deny API.
    Manual,
    /// Every subscription request is granted immediately.
    AutoAccept,
}

/// A remote consumer known to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consumer {
    /// Consumer identity, derived from the remote endpoint address.
    pub consumer_id: String,
    /// Observer handle for the message resource.
    pub message_observer_id: ObserverId,
    /// Observer handle for the sync resource.
    pub sync_observer_id: ObserverId,
}

/// Inbound subscription request context, as surfaced by the resource
/// listener at the transport boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeRequest {
    /// Remote endpoint address of the subscribing consumer.
    pub consumer_id: String,
    /// Observer handle registered for the message resource.
    pub message_observer_id: ObserverId,
    /// Observer handle registered for the sync resource.
    pub sync_observer_id: ObserverId,
}

impl From<SubscribeRequest> for Consumer {
    fn from(request: SubscribeRequest) -> Self {
        Self {
            consumer_id: request.consumer_id,
            message_observer_id: request.message_observer_id,
            sync_observer_id: request.sync_observer_id,
        }
    }
}
