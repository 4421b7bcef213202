//! Domain model of the provider: subscriber cache, dispatched-message log,
//! and outbound payload building.

pub mod cache;
pub mod log;
pub mod payload;

pub use cache::{DispatchChannel, SubscriberCache, SubscriptionRecord, UpsertOutcome};
pub use log::MessageLog;
pub use payload::{message_representation, sync_representation};
