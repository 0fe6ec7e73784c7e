//! Notifications and messages
//!
//! These are ephemeral output events: the workflow engine produces them
//! as transitions happen and hands them to a dispatcher. They are not
//! part of complaint state and the core never persists them.

use crate::{NotificationId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of event a notification reports
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Complaint received, tracking code issued
    Confirmation,
    /// Status changed
    StatusUpdate,
    /// Complaint escalated to a higher authority
    Escalation,
    /// A resolution was recorded
    Resolution,
    /// Complaint reopened after feedback or a further-action request
    Reopened,
    /// Complaint closed
    Closed,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventKind::Confirmation => "Confirmation",
            EventKind::StatusUpdate => "Status Update",
            EventKind::Escalation => "Escalation",
            EventKind::Resolution => "Resolution",
            EventKind::Reopened => "Reopened",
            EventKind::Closed => "Closed",
        };
        write!(f, "{}", name)
    }
}

/// A notification addressed to a single user
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier
    pub id: NotificationId,
    /// What happened
    pub kind: EventKind,
    /// Who this notification is for
    pub recipient: UserId,
    /// Human-readable content
    pub content: String,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// Whether the recipient has read it
    pub read: bool,
}

impl Notification {
    pub fn new(kind: EventKind, recipient: UserId, content: impl Into<String>) -> Self {
        Self {
            id: NotificationId::generate(),
            kind,
            recipient,
            content: content.into(),
            timestamp: Utc::now(),
            read: false,
        }
    }

    pub fn mark_as_read(&mut self) {
        self.read = true;
    }
}

/// A direct message between two users
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier
    pub id: NotificationId,
    /// Who sent it
    pub sender: UserId,
    /// Who it is addressed to
    pub receiver: UserId,
    /// Message body
    pub content: String,
    /// When it was sent
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(sender: UserId, receiver: UserId, content: impl Into<String>) -> Self {
        Self {
            id: NotificationId::generate(),
            sender,
            receiver,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}
