//! Channel destinations.
//!
//! A destination is a concrete endpoint a logical channel is bound to.
//! The router stays transport-agnostic; each destination owns whatever
//! codec and transport handle it needs.

use std::sync::Mutex;

use crate::core::{now, Result, Timestamp};
use crate::message::codec::{JsonMessageCodec, MessageCodec};
use crate::message::map::Message;

/// A concrete endpoint a channel may deliver messages to.
pub trait Destination: Send + Sync {
    /// Destination name, used in delivery failure reports.
    fn name(&self) -> &str;

    /// Deliver a single message.
    fn deliver(&self, message: &Message) -> Result<()>;
}

/// A single recorded delivery.
#[derive(Clone, Debug)]
pub struct DeliveryRecord {
    /// When the delivery happened
    pub at: Timestamp,
    /// The delivered message
    pub message: Message,
}

/// A destination that records deliveries in memory.
///
/// Stands in for a physical transport in standalone runs and tests.
pub struct InMemoryDestination {
    /// Destination name
    name: String,
    /// Recorded deliveries, oldest first
    delivered: Mutex<Vec<DeliveryRecord>>,
}

impl InMemoryDestination {
    /// Create a new recording destination.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            delivered: Mutex::new(Vec::new()),
        }
    }

    /// Number of messages delivered so far.
    pub fn delivery_count(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }

    /// Copies of all delivered messages, oldest first.
    pub fn received(&self) -> Vec<Message> {
        self.delivered
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.message.clone())
            .collect()
    }

    /// All delivery records, oldest first.
    pub fn records(&self) -> Vec<DeliveryRecord> {
        self.delivered.lock().unwrap().clone()
    }

    /// Drop all recorded deliveries.
    pub fn clear(&self) {
        self.delivered.lock().unwrap().clear();
    }
}

impl Destination for InMemoryDestination {
    fn name(&self) -> &str {
        &self.name
    }

    fn deliver(&self, message: &Message) -> Result<()> {
        self.delivered.lock().unwrap().push(DeliveryRecord {
            at: now(),
            message: message.clone(),
        });
        Ok(())
    }
}

/// A destination that writes messages to the diagnostic sink.
pub struct LogDestination {
    /// Destination name
    name: String,
    /// Codec for rendering messages
    codec: JsonMessageCodec,
}

impl LogDestination {
    /// Create a new logging destination.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            codec: JsonMessageCodec::new(),
        }
    }
}

impl Destination for LogDestination {
    fn name(&self) -> &str {
        &self.name
    }

    fn deliver(&self, message: &Message) -> Result<()> {
        let encoded = self.codec.encode(message)?;
        tracing::info!(
            destination = %self.name,
            message = %String::from_utf8_lossy(&encoded),
            "route message delivered"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_destination_records() {
        let destination = InMemoryDestination::new("mock");
        let message = Message::new().with_field("message", "hello");

        destination.deliver(&message).unwrap();
        destination.deliver(&message).unwrap();

        assert_eq!(destination.delivery_count(), 2);
        assert_eq!(destination.received(), vec![message.clone(), message]);
    }

    #[test]
    fn test_in_memory_destination_clear() {
        let destination = InMemoryDestination::new("mock");
        destination
            .deliver(&Message::new().with_field("n", 1))
            .unwrap();

        destination.clear();
        assert_eq!(destination.delivery_count(), 0);
        assert!(destination.received().is_empty());
    }

    #[test]
    fn test_log_destination_accepts_message() {
        let destination = LogDestination::new("diagnostics");
        let message = Message::new().with_field("message", "hello");
        assert!(destination.deliver(&message).is_ok());
    }
}
