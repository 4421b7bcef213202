//! Error types surfaced by the provider subsystem.

use crate::ports::outbound::TransportError;
use shared_sched::{Domain, PushError};
use thiserror::Error;

/// Errors returned by the provider-facing API.
///
/// `Ok` from an enqueueing call means accepted for processing, not
/// delivered; dispatch failures are logged by the worker loops.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider has not been started, or has been stopped.
    #[error("provider is not running")]
    NotRunning,

    /// A domain queue refused the task (stopped while the call was racing
    /// shutdown).
    #[error("{domain} queue is stopped")]
    QueueStopped {
        /// The domain that rejected the task.
        domain: Domain,
    },
}

impl From<PushError> for ProviderError {
    fn from(error: PushError) -> Self {
        Self::QueueStopped {
            domain: error.domain,
        }
    }
}

/// Failure of one dispatch attempt, reported back to the worker loop.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The outbound resource could not be updated; delivery was not
    /// attempted.
    #[error("resource update failed: {0}")]
    ResourceUpdate(TransportError),

    /// The subscriber cache holds no records at all.
    #[error("subscriber cache is empty")]
    EmptySubscribers,

    /// Records exist but none is currently accepted.
    #[error("no accepted observers")]
    NoAcceptedObservers,

    /// The multi-observer notify primitive reported failure.
    #[error("observer notify failed: {0}")]
    Notify(TransportError),

    /// The accept/deny answer to a consumer could not be sent.
    #[error("subscription response failed: {0}")]
    SubscriptionResponse(TransportError),
}
