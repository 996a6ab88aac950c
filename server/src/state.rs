use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use fpl_shared::message::DEFAULT_MESSAGE;
use tokio::sync::RwLock;

use crate::pin_store::PinStore;

#[derive(Clone)]
pub struct AppState {
    pub pins: Arc<RwLock<PinStore>>,
    /// Current value of the message echo demo.
    pub message: Arc<RwLock<String>>,
    pub observability: Arc<ObservabilityCounters>,
}

#[derive(Debug, Default)]
pub struct ObservabilityCounters {
    pin_requests_total: AtomicU64,
    pin_failures_total: AtomicU64,
    message_updates_total: AtomicU64,
}

#[derive(Debug, Clone, Copy)]
pub struct ObservabilitySnapshot {
    pub pin_requests_total: u64,
    pub pin_failures_total: u64,
    pub message_updates_total: u64,
}

impl ObservabilityCounters {
    pub fn snapshot(&self) -> ObservabilitySnapshot {
        ObservabilitySnapshot {
            pin_requests_total: self.pin_requests_total.load(Ordering::Relaxed),
            pin_failures_total: self.pin_failures_total.load(Ordering::Relaxed),
            message_updates_total: self.message_updates_total.load(Ordering::Relaxed),
        }
    }

    pub fn record_pin_request(&self) {
        self.pin_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_pin_failure(&self) {
        self.pin_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_message_update(&self) {
        self.message_updates_total.fetch_add(1, Ordering::Relaxed);
    }
}

impl AppState {
    pub fn new(pins: PinStore) -> Self {
        Self {
            pins: Arc::new(RwLock::new(pins)),
            message: Arc::new(RwLock::new(DEFAULT_MESSAGE.to_string())),
            observability: Arc::new(ObservabilityCounters::default()),
        }
    }
}
