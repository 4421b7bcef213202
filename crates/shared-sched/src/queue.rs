//! # Per-Domain Task Queue
//!
//! A FIFO list of pending tasks guarded by a mutex and gated by a counting
//! wake signal. `push` appends at the tail and adds one permit; `pop`
//! consumes one permit and removes the head. After `stop`, `pop` drains the
//! remaining tasks without permits and reports empty once done, which is
//! what unblocks the worker loop at shutdown.

use crate::task::{Domain, Task};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::debug;

/// A task rejected by a stopped queue.
///
/// The task travels back to the caller, which keeps payload ownership;
/// the queue never frees what it did not accept.
#[derive(Debug, Error)]
#[error("task rejected, {domain} queue is stopped")]
pub struct PushError {
    /// The domain that rejected the task.
    pub domain: Domain,
    /// The rejected task, returned to the caller.
    pub task: Task,
}

struct QueueState {
    tasks: VecDeque<Task>,
    running: bool,
}

/// Unbounded FIFO queue for one scheduling domain.
pub struct TaskQueue {
    domain: Domain,
    state: Mutex<QueueState>,
    /// Counting wake signal; permits equal unclaimed tasks.
    wake: Semaphore,
    /// Total tasks accepted over the queue's lifetime.
    pushed: AtomicU64,
}

impl TaskQueue {
    /// Create an empty running queue for `domain`.
    #[must_use]
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            state: Mutex::new(QueueState {
                tasks: VecDeque::new(),
                running: true,
            }),
            wake: Semaphore::new(0),
            pushed: AtomicU64::new(0),
        }
    }

    /// The domain this queue belongs to.
    #[must_use]
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Append a task at the tail and wake the worker.
    ///
    /// Safe to call from any task, including from within a worker loop
    /// (cross-domain chaining). Fails only when the queue has been stopped;
    /// the task is handed back untouched.
    pub fn push(&self, task: Task) -> Result<(), PushError> {
        {
            let mut state = self.state.lock();
            if !state.running {
                return Err(PushError {
                    domain: self.domain,
                    task,
                });
            }
            debug!(domain = %self.domain, kind = task.kind(), "task queued");
            state.tasks.push_back(task);
        }
        self.pushed.fetch_add(1, Ordering::Relaxed);
        self.wake.add_permits(1);
        Ok(())
    }

    /// Block until a task is available and return it.
    ///
    /// Returns `None` only after [`stop`](Self::stop) once every remaining
    /// task has been drained.
    pub async fn pop(&self) -> Option<Task> {
        loop {
            match self.wake.acquire().await {
                Ok(permit) => {
                    permit.forget();
                    let mut state = self.state.lock();
                    if let Some(task) = state.tasks.pop_front() {
                        return Some(task);
                    }
                    if !state.running {
                        return None;
                    }
                    // permit outran its task; wait for the next one
                }
                Err(_) => {
                    // wake signal closed by stop: drain without permits
                    return self.state.lock().tasks.pop_front();
                }
            }
        }
    }

    /// Stop the queue: reject new pushes and unblock the worker.
    ///
    /// Already-queued tasks stay in the list and are still returned by
    /// `pop` (drain-at-stop policy).
    pub fn stop(&self) {
        let mut state = self.state.lock();
        if !state.running {
            return;
        }
        state.running = false;
        self.wake.close();
        debug!(domain = %self.domain, pending = state.tasks.len(), "queue stopped");
    }

    /// Whether the queue still accepts tasks.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    /// Number of tasks not yet claimed by the worker.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().tasks.len()
    }

    /// Whether no tasks are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().tasks.is_empty()
    }

    /// Total tasks accepted since creation.
    #[must_use]
    pub fn pushed(&self) -> u64 {
        self.pushed.load(Ordering::Relaxed)
    }
}
