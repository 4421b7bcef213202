//! Shared fixtures for the integration suite.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

use pulse_provider::ports::inbound::{SubscribeRequestCallback, SyncCallback};
use pulse_provider::ports::outbound::{
    ConnectivityListener, ResourceHandle, TransportError, TransportGateway,
};
use shared_types::{Consumer, Message, ObserverId, ResourceRepresentation, SyncInfo};

/// Install the test tracing subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Poll `condition` until it holds or `deadline` elapses.
pub async fn wait_until(deadline: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let start = tokio::time::Instant::now();
    while start.elapsed() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}

/// One recorded multi-observer notify.
#[derive(Debug, Clone)]
pub struct NotifyCall {
    pub uri: String,
    pub observers: Vec<ObserverId>,
    pub payload: ResourceRepresentation,
}

/// Transport double: records every call, with switchable failure modes and
/// an optional delivery delay to build a backlog behind the worker loops.
pub struct ScriptedTransport {
    pub presence_starts: AtomicUsize,
    pub presence_stops: AtomicUsize,
    pub registrations: AtomicUsize,
    pub listener_registrations: AtomicUsize,
    pub notifies: Mutex<Vec<NotifyCall>>,
    pub responses: Mutex<Vec<(String, bool)>>,
    pub listener: Mutex<Option<Arc<dyn ConnectivityListener>>>,
    pub fail_put: AtomicBool,
    pub fail_notify: AtomicBool,
    notify_delay: Option<Duration>,
}

impl ScriptedTransport {
    fn base() -> Self {
        Self {
            presence_starts: AtomicUsize::new(0),
            presence_stops: AtomicUsize::new(0),
            registrations: AtomicUsize::new(0),
            listener_registrations: AtomicUsize::new(0),
            notifies: Mutex::new(Vec::new()),
            responses: Mutex::new(Vec::new()),
            listener: Mutex::new(None),
            fail_put: AtomicBool::new(false),
            fail_notify: AtomicBool::new(false),
            notify_delay: None,
        }
    }

    pub fn new() -> Arc<Self> {
        Arc::new(Self::base())
    }

    /// A transport whose notify primitive takes `delay` per call.
    pub fn with_notify_delay(delay: Duration) -> Arc<Self> {
        let mut transport = Self::base();
        transport.notify_delay = Some(delay);
        Arc::new(transport)
    }

    pub fn notify_count(&self) -> usize {
        self.notifies.lock().len()
    }

    pub fn notify_calls(&self) -> Vec<NotifyCall> {
        self.notifies.lock().clone()
    }

    pub fn responses(&self) -> Vec<(String, bool)> {
        self.responses.lock().clone()
    }

    /// Drive the connectivity listener captured at registration.
    pub fn set_connected(&self, connected: bool) {
        let listener = self.listener.lock().clone();
        if let Some(listener) = listener {
            listener.connection_state_changed(connected);
        }
    }
}

#[async_trait]
impl TransportGateway for ScriptedTransport {
    async fn presence_start(&self) -> Result<(), TransportError> {
        self.presence_starts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn presence_stop(&self) -> Result<(), TransportError> {
        self.presence_stops.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn register_resource(&self) -> Result<(), TransportError> {
        self.registrations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn put_message_resource(
        &self,
        _message: &Message,
    ) -> Result<ResourceHandle, TransportError> {
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(TransportError::Unavailable);
        }
        Ok(ResourceHandle(1))
    }

    async fn put_sync_resource(&self, _sync: &SyncInfo) -> Result<ResourceHandle, TransportError> {
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(TransportError::Unavailable);
        }
        Ok(ResourceHandle(2))
    }

    async fn notify_observers(
        &self,
        _resource: ResourceHandle,
        observers: &[ObserverId],
        payload: &ResourceRepresentation,
    ) -> Result<(), TransportError> {
        if let Some(delay) = self.notify_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_notify.load(Ordering::SeqCst) {
            return Err(TransportError::Rejected(500));
        }
        self.notifies.lock().push(NotifyCall {
            uri: payload.uri.clone(),
            observers: observers.to_vec(),
            payload: payload.clone(),
        });
        Ok(())
    }

    async fn respond_subscription(
        &self,
        consumer: &Consumer,
        accepted: bool,
    ) -> Result<(), TransportError> {
        self.responses
            .lock()
            .push((consumer.consumer_id.clone(), accepted));
        Ok(())
    }

    fn register_connectivity_listener(&self, listener: Arc<dyn ConnectivityListener>) {
        self.listener_registrations.fetch_add(1, Ordering::SeqCst);
        *self.listener.lock() = Some(listener);
    }
}

/// Records what the application-facing callbacks receive.
pub struct CallbackProbe {
    pub subscriptions: Mutex<Vec<Consumer>>,
    pub syncs: Mutex<Vec<SyncInfo>>,
}

impl CallbackProbe {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            subscriptions: Mutex::new(Vec::new()),
            syncs: Mutex::new(Vec::new()),
        })
    }

    pub fn subscribe_callback(self: &Arc<Self>) -> SubscribeRequestCallback {
        let probe = self.clone();
        Arc::new(move |consumer| probe.subscriptions.lock().push(consumer))
    }

    pub fn sync_callback(self: &Arc<Self>) -> SyncCallback {
        let probe = self.clone();
        Arc::new(move |sync| probe.syncs.lock().push(sync))
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.lock().len()
    }

    pub fn sync_count(&self) -> usize {
        self.syncs.lock().len()
    }
}
