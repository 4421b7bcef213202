//! # Shared Sched - Task Scheduler for Provider-Side Async Work
//!
//! Every asynchronous operation of the provider (presence announcements,
//! resource registration, subscription accept/deny, outbound message and
//! sync delivery, inbound callback delivery) is queued as a [`Task`] on one
//! of four scheduling domains and executed by that domain's worker loop.
//!
//! ## Scheduling Domains
//!
//! ```text
//!                    push(task)
//!  ┌──────────────┐     │
//!  │  Public API  │ ────┤ routed by Task::domain()
//!  └──────────────┘     ▼
//!        ┌──────────┬──────────────┬──────────────┬──────────┐
//!        │Discovery │ Subscription │ Notification │ Response │
//!        │  queue   │    queue     │    queue     │  queue   │
//!        └────┬─────┴──────┬───────┴──────┬───────┴────┬─────┘
//!             ▼            ▼              ▼            ▼
//!          worker       worker         worker       worker
//! ```
//!
//! ## Guarantees
//!
//! - **FIFO per domain**: tasks execute in push order within one domain;
//!   there is no ordering guarantee across domains.
//! - **Exactly once**: a task is owned by its queue until one worker claims
//!   it; no task is visible to two workers.
//! - **Failure isolation**: a failed task is logged and the loop continues.
//! - **Cooperative stop**: `stop` closes the wake signal; workers drain the
//!   remaining tasks and then exit.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod queue;
pub mod scheduler;
pub mod task;

// Re-export main types
pub use queue::{PushError, TaskQueue};
pub use scheduler::{Scheduler, TaskHandler};
pub use task::{Domain, Task};

/// Number of scheduling domains.
pub const DOMAIN_COUNT: usize = 4;
