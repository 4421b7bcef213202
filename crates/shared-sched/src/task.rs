//! # Tasks and Scheduling Domains
//!
//! Defines the unit of work flowing through the scheduler. A [`Task`] owns
//! its payload; the variant decides which [`Domain`] executes it.

use shared_types::{Consumer, Message, SubscribeRequest, SyncInfo};
use std::fmt;

/// One of the four independent scheduling lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Presence announcements and resource registration.
    Discovery,
    /// Subscription accept/deny handling.
    Subscription,
    /// Outbound message and sync delivery.
    Notification,
    /// Inbound callback delivery to the application.
    Response,
}

impl Domain {
    /// All domains, in worker start order.
    pub const ALL: [Domain; 4] = [
        Domain::Discovery,
        Domain::Subscription,
        Domain::Notification,
        Domain::Response,
    ];

    /// Stable index of this domain in per-domain arrays.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Discovery => 0,
            Self::Subscription => 1,
            Self::Notification => 2,
            Self::Response => 3,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Discovery => "discovery",
            Self::Subscription => "subscription",
            Self::Notification => "notification",
            Self::Response => "response",
        };
        f.write_str(name)
    }
}

/// A queued unit of work carrying its owned payload.
///
/// A task is created on `push`, owned exclusively by its queue until one
/// worker claims it, and consumed by the handler. A follow-up task in
/// another domain is a **new** task; the payload moves into it.
#[derive(Debug)]
pub enum Task {
    /// Start announcing provider presence.
    StartPresence,
    /// Stop announcing provider presence.
    StopPresence,
    /// Register the notification resources with the transport stack.
    RegisterResource,
    /// Mark a consumer accepted and answer its subscription request.
    SendAllow(Consumer),
    /// Mark a consumer denied and answer its subscription request.
    SendDeny(Consumer),
    /// Deliver a message to the accepted observer set.
    SendNotification(Box<Message>),
    /// Deliver a locally originated read-sync event.
    SendReadAck(SyncInfo),
    /// Deliver a consumer-originated read-sync event, then hand the same
    /// payload to the Response domain as a sync callback.
    RecvReadAck(SyncInfo),
    /// Surface an inbound subscription request to the application.
    SubscriptionCallback(SubscribeRequest),
    /// Surface a sync event to the application.
    SyncCallback(SyncInfo),
}

impl Task {
    /// The domain whose worker loop executes this task.
    #[must_use]
    pub fn domain(&self) -> Domain {
        match self {
            Self::StartPresence | Self::StopPresence | Self::RegisterResource => Domain::Discovery,
            Self::SendAllow(_) | Self::SendDeny(_) => Domain::Subscription,
            Self::SendNotification(_) | Self::SendReadAck(_) | Self::RecvReadAck(_) => {
                Domain::Notification
            }
            Self::SubscriptionCallback(_) | Self::SyncCallback(_) => Domain::Response,
        }
    }

    /// Kind tag for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StartPresence => "start-presence",
            Self::StopPresence => "stop-presence",
            Self::RegisterResource => "register-resource",
            Self::SendAllow(_) => "allow",
            Self::SendDeny(_) => "deny",
            Self::SendNotification(_) => "send-notification",
            Self::SendReadAck(_) => "send-read-ack",
            Self::RecvReadAck(_) => "recv-read-ack",
            Self::SubscriptionCallback(_) => "subscription-callback",
            Self::SyncCallback(_) => "sync-callback",
        }
    }
}
