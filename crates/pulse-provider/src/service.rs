//! # Notification Provider Service
//!
//! The main service implementation for the provider side of the
//! notification protocol.
//!
//! ## Architecture
//!
//! This service implements both inbound ports:
//! - [`ProviderApi`]: operations originated by the local application
//! - [`ResourceIngress`]: events surfaced by the resource listener
//!
//! It depends on one outbound port (implemented by the transport stack):
//! - [`TransportGateway`]: presence, resource registration, observer notify
//!
//! ## Lifecycle
//!
//! `start`/`stop` are idempotent under the lifecycle guard. Start builds
//! the scheduler, spawns the four worker loops, registers the connectivity
//! listener, and enqueues the initial discovery tasks. Stop clears the
//! callback slots first, then closes the queues; workers drain their
//! backlog and exit, and stop awaits their termination.
//!
//! ## Thread Safety
//!
//! The guard mutex is independent of the queue and cache locks and is
//! never held across a wake-signal wait (lock order: guard → queue →
//! cache, never reversed).

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::ProviderConfig;
use crate::domain::{
    message_representation, sync_representation, DispatchChannel, MessageLog, SubscriberCache,
};
use crate::events::{DispatchError, ProviderError};
use crate::ports::inbound::{
    ProviderApi, ResourceIngress, SubscribeRequestCallback, SyncCallback,
};
use crate::ports::outbound::{ConnectivityListener, TransportGateway};
use shared_sched::{Scheduler, Task, TaskHandler};
use shared_types::{AccessPolicy, Consumer, Message, SubscribeRequest, SyncInfo};

/// Callback slots stored at start, cleared at stop.
struct CallbackSet {
    subscribe: SubscribeRequestCallback,
    sync: SyncCallback,
}

/// State owned while the provider is running.
struct Running {
    scheduler: Scheduler,
    engine: Arc<DispatchEngine>,
    workers: Vec<JoinHandle<()>>,
}

/// Provider-side notification service.
///
/// One instance per provider identity; construct once and share via `Arc`.
pub struct NotificationProvider {
    config: ProviderConfig,
    transport: Arc<dyn TransportGateway>,
    /// Lifecycle guard: start/stop are serialized and idempotent.
    guard: Mutex<Option<Running>>,
}

impl NotificationProvider {
    /// Create a stopped provider bound to `transport`.
    #[must_use]
    pub fn new(config: ProviderConfig, transport: Arc<dyn TransportGateway>) -> Self {
        Self {
            config,
            transport,
            guard: Mutex::new(None),
        }
    }

    /// Start the provider.
    ///
    /// Stores `policy` and the callbacks, registers the connectivity
    /// listener, spawns the four worker loops, and enqueues the initial
    /// `start-presence` and `register-resource` tasks. Calling `start` on a
    /// running provider is a logged no-op.
    pub async fn start(
        &self,
        policy: AccessPolicy,
        subscribe_callback: SubscribeRequestCallback,
        sync_callback: SyncCallback,
    ) -> Result<(), ProviderError> {
        let mut guard = self.guard.lock().await;
        if guard.is_some() {
            info!("provider already started, ignoring");
            return Ok(());
        }

        let engine = Arc::new(DispatchEngine {
            config: self.config.clone(),
            policy,
            transport: self.transport.clone(),
            cache: SubscriberCache::new(self.config.subscriber_capacity),
            messages: MessageLog::new(),
            callbacks: parking_lot::RwLock::new(Some(CallbackSet {
                subscribe: subscribe_callback,
                sync: sync_callback,
            })),
        });

        let scheduler = Scheduler::new();
        let workers = scheduler.start(engine.clone());

        self.transport
            .register_connectivity_listener(Arc::new(ConnectivityRelay {
                scheduler: scheduler.clone(),
            }));

        scheduler.push(Task::StartPresence)?;
        scheduler.push(Task::RegisterResource)?;

        *guard = Some(Running {
            scheduler,
            engine,
            workers,
        });
        info!(?policy, "notification provider started");
        Ok(())
    }

    /// Stop the provider.
    ///
    /// Clears the callback slots, enqueues a final presence departure,
    /// closes the queues, and awaits the workers, which drain every task
    /// already queued. A task in flight at the moment of stop may still
    /// complete its transport side effects; the cleared callbacks are never
    /// invoked for dispatches queued afterwards. Calling `stop` on an idle
    /// provider is a no-op.
    pub async fn stop(&self) -> Result<(), ProviderError> {
        let mut guard = self.guard.lock().await;
        let Some(running) = guard.take() else {
            debug!("provider already stopped, ignoring");
            return Ok(());
        };

        running.engine.clear_callbacks();

        // departure announcement rides the drain
        if let Err(error) = running.scheduler.push(Task::StopPresence) {
            debug!(%error, "presence departure skipped");
        }

        running.scheduler.stop();
        for worker in running.workers {
            if worker.await.is_err() {
                warn!("worker loop panicked during drain");
            }
        }

        running.engine.cache.clear();
        running.engine.messages.clear();
        info!("notification provider stopped");
        Ok(())
    }

    /// Whether the provider is currently running.
    pub async fn is_running(&self) -> bool {
        self.guard.lock().await.is_some()
    }

    /// Number of cached subscription records (zero when stopped).
    pub async fn subscriber_count(&self) -> usize {
        match self.guard.lock().await.as_ref() {
            Some(running) => running.engine.cache.len(),
            None => 0,
        }
    }

    /// Whether `message_id` was dispatched successfully since start.
    pub async fn was_dispatched(&self, message_id: shared_types::MessageId) -> bool {
        match self.guard.lock().await.as_ref() {
            Some(running) => running.engine.messages.contains(message_id),
            None => false,
        }
    }

    /// Queue a presence announcement on (`true`) or off (`false`).
    pub async fn set_presence(&self, announced: bool) -> Result<(), ProviderError> {
        let task = if announced {
            Task::StartPresence
        } else {
            Task::StopPresence
        };
        self.push(task).await
    }

    async fn push(&self, task: Task) -> Result<(), ProviderError> {
        let guard = self.guard.lock().await;
        let running = guard.as_ref().ok_or(ProviderError::NotRunning)?;
        running.scheduler.push(task)?;
        Ok(())
    }
}

#[async_trait]
impl ProviderApi for NotificationProvider {
    async fn send_notification(&self, message: Message) -> Result<(), ProviderError> {
        self.push(Task::SendNotification(Box::new(message))).await
    }

    async fn send_read_ack(&self, sync: SyncInfo) -> Result<(), ProviderError> {
        self.push(Task::SendReadAck(sync)).await
    }

    async fn accept(&self, consumer: Consumer, accepted: bool) -> Result<(), ProviderError> {
        let task = if accepted {
            Task::SendAllow(consumer)
        } else {
            Task::SendDeny(consumer)
        };
        self.push(task).await
    }
}

#[async_trait]
impl ResourceIngress for NotificationProvider {
    async fn subscription_received(&self, request: SubscribeRequest) -> Result<(), ProviderError> {
        self.push(Task::SubscriptionCallback(request)).await
    }

    async fn read_ack_received(&self, sync: SyncInfo) -> Result<(), ProviderError> {
        self.push(Task::RecvReadAck(sync)).await
    }
}

/// Re-announces presence and resources when the connection comes back.
struct ConnectivityRelay {
    scheduler: Scheduler,
}

impl ConnectivityListener for ConnectivityRelay {
    fn adapter_state_changed(&self, up: bool) {
        debug!(up, "network adapter state changed");
    }

    fn connection_state_changed(&self, connected: bool) {
        if !connected {
            debug!("network connection lost");
            return;
        }
        for task in [Task::StartPresence, Task::RegisterResource] {
            if let Err(error) = self.scheduler.push(task) {
                debug!(%error, "re-announce skipped");
            }
        }
    }
}

/// Executes dequeued tasks: the dispatch tables of all four domains.
pub(crate) struct DispatchEngine {
    config: ProviderConfig,
    policy: AccessPolicy,
    transport: Arc<dyn TransportGateway>,
    cache: SubscriberCache,
    messages: MessageLog,
    callbacks: parking_lot::RwLock<Option<CallbackSet>>,
}

impl DispatchEngine {
    /// Deliver `message` to the accepted message observers.
    ///
    /// Order matters: resource update, empty-cache check, payload build,
    /// observer scan, empty-observer check, notify.
    async fn dispatch_message(&self, message: &Message) -> Result<(), DispatchError> {
        let resource = self
            .transport
            .put_message_resource(message)
            .await
            .map_err(DispatchError::ResourceUpdate)?;

        if self.cache.is_empty() {
            return Err(DispatchError::EmptySubscribers);
        }

        let payload = message_representation(message);
        let observers = self
            .cache
            .observers(DispatchChannel::Message, self.config.observer_capacity);
        if observers.is_empty() {
            return Err(DispatchError::NoAcceptedObservers);
        }

        self.transport
            .notify_observers(resource, &observers, &payload)
            .await
            .map_err(DispatchError::Notify)?;

        debug!(
            message_id = message.message_id,
            observers = observers.len(),
            "notification dispatched"
        );
        Ok(())
    }

    /// Deliver `sync` to the accepted sync observers. Same ordering rules
    /// as [`dispatch_message`](Self::dispatch_message).
    async fn dispatch_sync(&self, sync: &SyncInfo) -> Result<(), DispatchError> {
        let resource = self
            .transport
            .put_sync_resource(sync)
            .await
            .map_err(DispatchError::ResourceUpdate)?;

        if self.cache.is_empty() {
            return Err(DispatchError::EmptySubscribers);
        }

        let payload = sync_representation(sync);
        let observers = self
            .cache
            .observers(DispatchChannel::Sync, self.config.observer_capacity);
        if observers.is_empty() {
            return Err(DispatchError::NoAcceptedObservers);
        }

        self.transport
            .notify_observers(resource, &observers, &payload)
            .await
            .map_err(DispatchError::Notify)?;

        debug!(
            message_id = sync.message_id,
            state = ?sync.state,
            observers = observers.len(),
            "sync dispatched"
        );
        Ok(())
    }

    /// Upsert the subscription record and answer the consumer.
    async fn handle_accept(
        &self,
        consumer: Consumer,
        accepted: bool,
    ) -> Result<(), DispatchError> {
        let outcome = self.cache.upsert(&consumer, accepted);
        debug!(
            consumer = %consumer.consumer_id,
            accepted,
            ?outcome,
            "subscription record written"
        );

        self.transport
            .respond_subscription(&consumer, accepted)
            .await
            .map_err(DispatchError::SubscriptionResponse)
    }

    fn invoke_subscribe_callback(&self, consumer: &Consumer) {
        let callback = self
            .callbacks
            .read()
            .as_ref()
            .map(|set| set.subscribe.clone());
        match callback {
            Some(callback) => callback(consumer.clone()),
            None => debug!("subscribe callback cleared, skipping"),
        }
    }

    fn invoke_sync_callback(&self, sync: SyncInfo) {
        let callback = self.callbacks.read().as_ref().map(|set| set.sync.clone());
        match callback {
            Some(callback) => callback(sync),
            None => debug!("sync callback cleared, skipping"),
        }
    }

    fn clear_callbacks(&self) {
        *self.callbacks.write() = None;
    }
}

#[async_trait]
impl TaskHandler for DispatchEngine {
    type Error = DispatchError;

    async fn handle(&self, scheduler: &Scheduler, task: Task) -> Result<(), DispatchError> {
        match task {
            Task::StartPresence => {
                if let Err(error) = self.transport.presence_start().await {
                    warn!(%error, "presence start failed");
                }
                Ok(())
            }
            Task::StopPresence => {
                if let Err(error) = self.transport.presence_stop().await {
                    warn!(%error, "presence stop failed");
                }
                Ok(())
            }
            Task::RegisterResource => {
                if let Err(error) = self.transport.register_resource().await {
                    warn!(%error, "resource registration failed");
                }
                Ok(())
            }
            Task::SendAllow(consumer) => self.handle_accept(consumer, true).await,
            Task::SendDeny(consumer) => self.handle_accept(consumer, false).await,
            Task::SendNotification(message) => {
                self.dispatch_message(&message).await?;
                self.messages.record(message.message_id);
                Ok(())
            }
            Task::SendReadAck(sync) => self.dispatch_sync(&sync).await,
            Task::RecvReadAck(sync) => {
                if let Err(error) = self.dispatch_sync(&sync).await {
                    warn!(%error, "sync fan-out failed, callback still delivered");
                }
                // the same owned payload moves into the follow-up task
                if let Err(error) = scheduler.push(Task::SyncCallback(sync)) {
                    debug!(%error, "sync callback dropped, queues stopped");
                }
                Ok(())
            }
            Task::SubscriptionCallback(request) => {
                let consumer = Consumer::from(request);
                self.invoke_subscribe_callback(&consumer);

                if self.policy == AccessPolicy::AutoAccept {
                    if let Err(error) = scheduler.push(Task::SendAllow(consumer)) {
                        debug!(%error, "auto-accept dropped, queues stopped");
                    }
                }
                Ok(())
            }
            Task::SyncCallback(sync) => {
                self.invoke_sync_callback(sync);
                Ok(())
            }
        }
    }
}
