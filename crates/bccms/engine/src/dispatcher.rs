//! Notification dispatch
//!
//! The engine produces notifications as transitions happen and hands
//! them to a dispatcher. Dispatch is a non-blocking enqueue: the engine
//! never waits for delivery, and a delivery failure never rolls back a
//! completed transition — the engine only logs it.

use bccms_types::Notification;
use std::sync::mpsc::Sender;
use std::sync::{Mutex, RwLock};

/// Outcome of handing a notification to a dispatcher
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryResult {
    /// Accepted for delivery
    Queued,
    /// Could not be accepted; the reason is logged and the event is lost
    Dropped(String),
}

/// Accepts notifications produced by the workflow engine
pub trait NotificationDispatcher: Send + Sync {
    /// Enqueue a notification. Must not block on delivery.
    fn notify(&self, notification: Notification) -> DeliveryResult;
}

/// Dispatcher that emits notifications to the tracing log
#[derive(Clone, Debug, Default)]
pub struct LogDispatcher;

impl NotificationDispatcher for LogDispatcher {
    fn notify(&self, notification: Notification) -> DeliveryResult {
        tracing::info!(
            kind = %notification.kind,
            recipient = %notification.recipient,
            content = %notification.content,
            "Notification"
        );
        DeliveryResult::Queued
    }
}

/// Dispatcher that forwards notifications into an mpsc channel.
///
/// The send is non-blocking; if the receiving side is gone the
/// notification is dropped.
pub struct ChannelDispatcher {
    sender: Mutex<Sender<Notification>>,
}

impl ChannelDispatcher {
    pub fn new(sender: Sender<Notification>) -> Self {
        Self {
            sender: Mutex::new(sender),
        }
    }
}

impl NotificationDispatcher for ChannelDispatcher {
    fn notify(&self, notification: Notification) -> DeliveryResult {
        let sender = match self.sender.lock() {
            Ok(sender) => sender,
            Err(_) => return DeliveryResult::Dropped("dispatcher lock poisoned".into()),
        };
        match sender.send(notification) {
            Ok(()) => DeliveryResult::Queued,
            Err(_) => DeliveryResult::Dropped("notification channel closed".into()),
        }
    }
}

/// In-memory dispatcher for tests
#[derive(Debug, Default)]
pub struct MemoryDispatcher {
    sent: RwLock<Vec<Notification>>,
}

impl MemoryDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications received so far, in order
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.read().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.sent.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn clear(&self) {
        if let Ok(mut sent) = self.sent.write() {
            sent.clear();
        }
    }
}

impl NotificationDispatcher for MemoryDispatcher {
    fn notify(&self, notification: Notification) -> DeliveryResult {
        match self.sent.write() {
            Ok(mut sent) => {
                sent.push(notification);
                DeliveryResult::Queued
            }
            Err(_) => DeliveryResult::Dropped("memory dispatcher poisoned".into()),
        }
    }
}
