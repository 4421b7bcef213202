//! # Notification Provider Subsystem
//!
//! Accepts or denies consumer subscriptions and pushes messages and
//! read-sync events to the accepted observer set through the transport
//! port. All asynchronous work runs on the four-domain scheduler.
//!
//! ## Architecture Role
//!
//! ```text
//! [Application] ──send / accept──→ [NotificationProvider]
//!                                        │ push(task)
//!                                        ▼
//!                              [shared-sched worker loops]
//!                                        │ dispatch
//!                                        ▼
//!                 [SubscriberCache] ─→ observer set ─→ [TransportGateway]
//! ```
//!
//! ## Policy
//!
//! - Only accepted subscribers receive traffic
//! - Dispatch failures are logged by the worker loop; later tasks still run
//! - Start/stop are idempotent under the lifecycle guard

pub mod config;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

pub use config::ProviderConfig;
pub use domain::*;
pub use events::{DispatchError, ProviderError};
pub use ports::inbound::{ProviderApi, ResourceIngress};
pub use service::NotificationProvider;
