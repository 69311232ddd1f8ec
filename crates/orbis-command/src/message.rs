//! Outbound messages and the notification contract.
//!
//! A [`Message`] is a name plus a set of named string fields, built with
//! [`MessageBuilder`]:
//!
//! ```
//! use orbis_command::message::Message;
//!
//! let message = Message::builder("player-added")
//!     .field("player-name", "alice")
//!     .field("player-class", "warrior")
//!     .build();
//!
//! assert_eq!(message.name(), "player-added");
//! assert_eq!(message.field("player-name"), Some("alice"));
//! ```

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::command::SourceId;

// =============================================================================
// Message
// =============================================================================

/// A named notification with string fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    name: String,
    #[serde(default)]
    fields: BTreeMap<String, String>,
}

impl Message {
    /// Starts building a message named `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> MessageBuilder {
        MessageBuilder {
            message: Self {
                name: name.into(),
                fields: BTreeMap::new(),
            },
        }
    }

    /// Message name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of field `key`.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// All fields, ordered by key.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Builder returned by [`Message::builder`].
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    message: Message,
}

impl MessageBuilder {
    /// Sets field `key`, replacing an earlier value.
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.message.fields.insert(key.into(), value.to_string());
        self
    }

    /// Finishes the message.
    #[must_use]
    pub fn build(self) -> Message {
        self.message
    }
}

// =============================================================================
// MessageBus
// =============================================================================

/// Delivers messages to connected clients.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait MessageBus: Send + Sync {
    /// Sends `message` to the single connection `target`.
    fn notify(&self, target: SourceId, message: &Message);

    /// Sends `message` to every connection.
    fn notify_all(&self, message: &Message);
}

/// One message handed to an [`Outbox`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Sent to one connection.
    To(SourceId, Message),
    /// Sent to every connection.
    Broadcast(Message),
}

impl Delivery {
    /// The delivered message.
    #[must_use]
    pub const fn message(&self) -> &Message {
        match self {
            Self::To(_, message) | Self::Broadcast(message) => message,
        }
    }
}

/// In-memory [`MessageBus`] that queues deliveries until drained.
///
/// A transport loop drains it after each dispatched command.
#[derive(Debug, Default)]
pub struct Outbox {
    deliveries: Mutex<Vec<Delivery>>,
}

impl Outbox {
    /// Creates an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns everything queued so far, oldest first.
    pub fn drain(&self) -> Vec<Delivery> {
        let mut deliveries = self
            .deliveries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *deliveries)
    }

    fn push(&self, delivery: Delivery) {
        self.deliveries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(delivery);
    }
}

impl MessageBus for Outbox {
    fn notify(&self, target: SourceId, message: &Message) {
        self.push(Delivery::To(target, message.clone()));
    }

    fn notify_all(&self, message: &Message) {
        self.push(Delivery::Broadcast(message.clone()));
    }
}
