//! Inbound ports (API) for the provider subsystem.
//!
//! Two entry surfaces, both implemented by
//! [`NotificationProvider`](crate::service::NotificationProvider):
//!
//! - [`ProviderApi`]: operations originated by the local application.
//! - [`ResourceIngress`]: events surfaced by the resource listener at the
//!   transport boundary.

use crate::events::ProviderError;
use async_trait::async_trait;
use shared_types::{Consumer, Message, SubscribeRequest, SyncInfo};
use std::sync::Arc;

/// Invoked asynchronously when a consumer's subscription request surfaces.
pub type SubscribeRequestCallback = Arc<dyn Fn(Consumer) + Send + Sync>;

/// Invoked asynchronously when a read-sync event surfaces.
pub type SyncCallback = Arc<dyn Fn(SyncInfo) + Send + Sync>;

/// Application-facing operations.
///
/// All of these enqueue work; `Ok` means accepted for processing, not
/// delivered.
#[async_trait]
pub trait ProviderApi: Send + Sync {
    /// Queue a message for delivery to the accepted observer set.
    async fn send_notification(&self, message: Message) -> Result<(), ProviderError>;

    /// Queue a locally originated read-sync event for delivery.
    async fn send_read_ack(&self, sync: SyncInfo) -> Result<(), ProviderError>;

    /// Accept or deny a consumer's subscription.
    async fn accept(&self, consumer: Consumer, accepted: bool) -> Result<(), ProviderError>;
}

/// Transport-boundary events feeding the scheduler.
#[async_trait]
pub trait ResourceIngress: Send + Sync {
    /// An inbound subscription request was observed on the notification
    /// resource.
    async fn subscription_received(&self, request: SubscribeRequest) -> Result<(), ProviderError>;

    /// A consumer reported a read-sync state change.
    async fn read_ack_received(&self, sync: SyncInfo) -> Result<(), ProviderError>;
}
