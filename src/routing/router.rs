//! Message router for named logical channels.
//!
//! Resolves output channel names against a binding table supplied at
//! configuration time and delivers messages to every bound destination.
//! Incoming messages are dispatched to per-channel handlers with a
//! catch-all fallback.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::core::{Error, Result};
use crate::message::map::Message;
use crate::routing::destination::Destination;

/// Handler for messages arriving on input channels.
pub trait RouteMessageHandler: Send + Sync {
    /// Handle a single incoming message.
    fn on_message(&self, channel: &str, message: &Message);
}

impl<F> RouteMessageHandler for F
where
    F: Fn(&str, &Message) + Send + Sync,
{
    fn on_message(&self, channel: &str, message: &Message) {
        self(channel, message)
    }
}

/// A single destination that did not accept a message.
#[derive(Clone, Debug)]
pub struct DestinationFailure {
    /// Name of the failed destination
    pub destination: String,
    /// Failure reason
    pub reason: String,
}

/// Aggregated delivery failure for one send.
///
/// Lists only the destinations that failed; the remaining destinations
/// received the message normally.
#[derive(Clone, Debug)]
pub struct DeliveryError {
    /// Channel the message was sent on
    pub channel: String,
    /// Number of destinations the delivery was attempted on
    pub attempted: usize,
    /// The destinations that failed
    pub failures: Vec<DestinationFailure>,
}

impl std::fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.failures.iter().map(|d| d.destination.as_str()).collect();
        write!(
            f,
            "Delivery on channel '{}' failed for {} of {} destinations: {}",
            self.channel,
            self.failures.len(),
            self.attempted,
            names.join(", ")
        )
    }
}

impl std::error::Error for DeliveryError {}

/// Routes messages between named logical channels and bound destinations.
///
/// The binding table is populated during configuration, before the router
/// is shared with activity code; `send` and `handle_incoming` take `&self`
/// and never mutate it.
pub struct MessageRouter {
    /// Node name for this router instance
    node_name: String,
    /// Output channel bindings
    outputs: HashMap<String, Vec<Arc<dyn Destination>>>,
    /// Input channels, each optionally with a channel-specific handler
    input_handlers: HashMap<String, Option<Box<dyn RouteMessageHandler>>>,
    /// Catch-all handler for channels without a specific handler
    default_handler: Option<Box<dyn RouteMessageHandler>>,
}

impl MessageRouter {
    /// Create a new router with a generated node name.
    pub fn new() -> Self {
        Self {
            node_name: Uuid::new_v4().to_string(),
            outputs: HashMap::new(),
            input_handlers: HashMap::new(),
            default_handler: None,
        }
    }

    /// Set the node name.
    pub fn with_node_name(mut self, name: &str) -> Self {
        self.node_name = name.to_string();
        self
    }

    /// Get the node name for the router.
    pub fn node_name(&self) -> &str {
        &self.node_name
    }

    /// Register an output channel with its destinations.
    ///
    /// Zero destinations is allowed; sends on such a channel are no-ops.
    /// Registering a channel twice is an error.
    pub fn register_output_channel(
        &mut self,
        channel: &str,
        destinations: Vec<Arc<dyn Destination>>,
    ) -> Result<()> {
        if channel.is_empty() {
            return Err(Error::EmptyChannelName);
        }
        if self.outputs.contains_key(channel) {
            return Err(Error::ChannelAlreadyRegistered(channel.to_string()));
        }
        self.outputs.insert(channel.to_string(), destinations);
        Ok(())
    }

    /// Is the given output channel registered?
    pub fn is_output_channel_registered(&self, channel: &str) -> bool {
        self.outputs.contains_key(channel)
    }

    /// Get all registered output channel names.
    pub fn output_channel_ids(&self) -> Vec<&str> {
        self.outputs.keys().map(String::as_str).collect()
    }

    /// Get the destinations bound to a channel.
    pub fn destinations(&self, channel: &str) -> &[Arc<dyn Destination>] {
        self.outputs.get(channel).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Register an input channel without a channel-specific handler.
    ///
    /// Messages arriving on the channel go to the catch-all handler.
    /// Registering a channel twice is an error.
    pub fn register_input_channel(&mut self, channel: &str) -> Result<()> {
        if channel.is_empty() {
            return Err(Error::EmptyChannelName);
        }
        if self.input_handlers.contains_key(channel) {
            return Err(Error::InputChannelAlreadyRegistered(channel.to_string()));
        }
        self.input_handlers.insert(channel.to_string(), None);
        Ok(())
    }

    /// Set the handler for an input channel, registering the channel if
    /// needed.
    ///
    /// There is one handler per channel; setting a handler for a channel
    /// that already has one replaces the previous handler.
    pub fn set_input_handler(
        &mut self,
        channel: &str,
        handler: Box<dyn RouteMessageHandler>,
    ) -> Result<()> {
        if channel.is_empty() {
            return Err(Error::EmptyChannelName);
        }
        self.input_handlers.insert(channel.to_string(), Some(handler));
        Ok(())
    }

    /// Set the catch-all handler for messages not matched by a
    /// channel-specific handler.
    pub fn set_default_handler(&mut self, handler: Box<dyn RouteMessageHandler>) {
        self.default_handler = Some(handler);
    }

    /// Is the given input channel registered?
    pub fn is_input_channel_registered(&self, channel: &str) -> bool {
        self.input_handlers.contains_key(channel)
    }

    /// Get all registered input channel names.
    pub fn input_channel_ids(&self) -> Vec<&str> {
        self.input_handlers.keys().map(String::as_str).collect()
    }

    /// Send a message on a named output channel.
    ///
    /// An unregistered channel, or a channel with no destinations, is a
    /// no-op and succeeds. A failing destination never blocks delivery to
    /// the remaining destinations; the aggregated error names only the
    /// destinations that failed.
    pub fn send(&self, channel: &str, message: &Message) -> Result<()> {
        if channel.is_empty() {
            return Err(Error::EmptyChannelName);
        }

        let destinations = match self.outputs.get(channel) {
            Some(d) => d,
            None => {
                tracing::debug!(channel, "send on unbound channel, dropping message");
                return Ok(());
            }
        };

        let mut failures = Vec::new();
        for destination in destinations {
            if let Err(e) = destination.deliver(message) {
                tracing::error!(
                    channel,
                    destination = destination.name(),
                    error = %e,
                    "route message delivery failed"
                );
                failures.push(DestinationFailure {
                    destination: destination.name().to_string(),
                    reason: e.to_string(),
                });
            }
        }

        if failures.is_empty() {
            tracing::trace!(channel, count = destinations.len(), "route message sent");
            Ok(())
        } else {
            Err(Error::Delivery(DeliveryError {
                channel: channel.to_string(),
                attempted: destinations.len(),
                failures,
            }))
        }
    }

    /// Dispatch an incoming message to its channel handler.
    ///
    /// Falls back to the catch-all handler; messages for channels with
    /// neither are dropped.
    pub fn handle_incoming(&self, channel: &str, message: &Message) {
        if let Some(Some(handler)) = self.input_handlers.get(channel) {
            handler.on_message(channel, message);
        } else if let Some(handler) = &self.default_handler {
            handler.on_message(channel, message);
        } else {
            tracing::debug!(channel, "no handler for incoming route message, dropping");
        }
    }

    /// Remove all channel bindings and input handlers.
    pub fn clear_all_channels(&mut self) {
        self.outputs.clear();
        self.input_handlers.clear();
        self.default_handler = None;
    }
}

impl Default for MessageRouter {
    fn default() -> Self {
        Self::new()
    }
}
