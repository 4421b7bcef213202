//! # Scheduler Facade
//!
//! Owns the four domain queues and their worker loops. `push` is the sole
//! enqueue entry point used by the rest of the system; tasks route to their
//! queue by [`Task::domain`]. `start` spawns one worker per domain; `stop`
//! closes every queue, after which each worker drains its backlog and exits.

use crate::queue::{PushError, TaskQueue};
use crate::task::{Domain, Task};
use async_trait::async_trait;
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Dispatch table for dequeued tasks.
///
/// A handler converts any internal failure into an error result; the worker
/// logs it and keeps processing. A failed task never stops the loop.
#[async_trait]
pub trait TaskHandler: Send + Sync {
    /// Failure reported back to the worker loop for logging.
    type Error: Display + Send;

    /// Execute one task. `scheduler` is available for cross-domain
    /// chaining (a handler may enqueue follow-up tasks on other domains).
    async fn handle(&self, scheduler: &Scheduler, task: Task) -> Result<(), Self::Error>;
}

struct Inner {
    queues: [TaskQueue; 4],
    started: AtomicBool,
}

/// Process-wide scheduler: four queues, four worker loops.
///
/// Cheap to clone; all clones share the same queues.
#[derive(Clone)]
pub struct Scheduler {
    inner: Arc<Inner>,
}

impl Scheduler {
    /// Allocate the four domain queues, all running.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                queues: Domain::ALL.map(TaskQueue::new),
                started: AtomicBool::new(false),
            }),
        }
    }

    /// The queue serving `domain`.
    #[must_use]
    pub fn queue(&self, domain: Domain) -> &TaskQueue {
        &self.inner.queues[domain.index()]
    }

    /// Enqueue a task on its domain's queue.
    ///
    /// `Ok` means accepted for processing, not processed. On failure the
    /// task is handed back inside the error.
    pub fn push(&self, task: Task) -> Result<(), PushError> {
        self.queue(task.domain()).push(task)
    }

    /// Number of unclaimed tasks in `domain`.
    #[must_use]
    pub fn pending(&self, domain: Domain) -> usize {
        self.queue(domain).len()
    }

    /// Spawn one worker loop per domain.
    ///
    /// Startup is one-time: a second call is a logged no-op returning no
    /// handles.
    pub fn start<H>(&self, handler: Arc<H>) -> Vec<JoinHandle<()>>
    where
        H: TaskHandler + 'static,
    {
        if self.inner.started.swap(true, Ordering::SeqCst) {
            warn!("scheduler already started, ignoring");
            return Vec::new();
        }

        Domain::ALL
            .iter()
            .map(|&domain| {
                let scheduler = self.clone();
                let handler = handler.clone();
                tokio::spawn(run_worker(scheduler, domain, handler))
            })
            .collect()
    }

    /// Close every queue. Workers drain their backlog and exit; await the
    /// handles returned by [`start`](Self::start) to observe termination.
    pub fn stop(&self) {
        for queue in &self.inner.queues {
            queue.stop();
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// One domain's worker loop: wait, claim one task, dispatch, repeat.
async fn run_worker<H>(scheduler: Scheduler, domain: Domain, handler: Arc<H>)
where
    H: TaskHandler + 'static,
{
    debug!(%domain, "worker loop started");

    while let Some(task) = scheduler.queue(domain).pop().await {
        let kind = task.kind();
        debug!(%domain, kind, "task claimed");

        if let Err(error) = handler.handle(&scheduler, task).await {
            warn!(%domain, kind, %error, "task failed, continuing");
        }
    }

    debug!(%domain, "worker loop stopped");
}
