//! Outbound ports (SPI) for the provider subsystem.
//!
//! Implemented by the transport/resource stack. The provider core treats
//! these calls as synchronous, bounded-latency operations; a transport that
//! completes asynchronously must deliver its completion back as a new task
//! rather than blocking a worker loop.

use async_trait::async_trait;
use shared_types::{Consumer, Message, ObserverId, ResourceRepresentation, SyncInfo};
use std::sync::Arc;
use thiserror::Error;

/// Handle to a resource registered on the transport stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceHandle(pub u64);

/// Failure reported by a transport primitive.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The transport stack is not reachable.
    #[error("transport stack unavailable")]
    Unavailable,

    /// The stack processed the call and refused it.
    #[error("transport rejected the request: status {0}")]
    Rejected(u16),
}

/// Connectivity-state callbacks, registered once at provider start.
///
/// Two slots: adapter (interface) state and connection state.
pub trait ConnectivityListener: Send + Sync {
    /// A network adapter went up or down.
    fn adapter_state_changed(&self, up: bool);

    /// The connection to the network came up or went down.
    fn connection_state_changed(&self, connected: bool);
}

/// Transport/resource-stack interface consumed by the dispatch path.
#[async_trait]
pub trait TransportGateway: Send + Sync {
    /// Start announcing provider presence. Best-effort; result is logged.
    async fn presence_start(&self) -> Result<(), TransportError>;

    /// Stop announcing provider presence. Best-effort; result is logged.
    async fn presence_stop(&self) -> Result<(), TransportError>;

    /// Register the notification resources. Best-effort; result is logged.
    async fn register_resource(&self) -> Result<(), TransportError>;

    /// Update the message resource. Must succeed before dispatch proceeds.
    async fn put_message_resource(
        &self,
        message: &Message,
    ) -> Result<ResourceHandle, TransportError>;

    /// Update the sync resource. Must succeed before dispatch proceeds.
    async fn put_sync_resource(&self, sync: &SyncInfo) -> Result<ResourceHandle, TransportError>;

    /// Deliver `payload` to every observer in `observers`. Non-success is a
    /// dispatch error.
    async fn notify_observers(
        &self,
        resource: ResourceHandle,
        observers: &[ObserverId],
        payload: &ResourceRepresentation,
    ) -> Result<(), TransportError>;

    /// Answer a consumer's subscription request with accept or deny.
    async fn respond_subscription(
        &self,
        consumer: &Consumer,
        accepted: bool,
    ) -> Result<(), TransportError>;

    /// Register the connectivity-state listener (two callback slots).
    fn register_connectivity_listener(&self, listener: Arc<dyn ConnectivityListener>);
}
