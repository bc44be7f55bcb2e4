//! Router configuration.
//!
//! Configuration-driven channel binding. The host deserializes a
//! [`RouterConfig`] from wherever it keeps activity configuration and
//! builds a bound router from it; resolving destination names to concrete
//! endpoints is delegated to a [`DestinationResolver`].

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::routing::destination::Destination;
use crate::routing::router::MessageRouter;

/// Binding of one output channel to named destinations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputChannelConfig {
    /// Logical channel name
    pub channel: String,
    /// Names of the destinations the channel is bound to
    #[serde(default)]
    pub destinations: Vec<String>,
}

/// Router configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Node name for the router, generated when absent
    pub node_name: Option<String>,
    /// Output channel bindings
    #[serde(default)]
    pub outputs: Vec<OutputChannelConfig>,
    /// Input channel names the host should subscribe
    #[serde(default)]
    pub inputs: Vec<String>,
}

impl RouterConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the node name.
    pub fn with_node_name(mut self, name: &str) -> Self {
        self.node_name = Some(name.to_string());
        self
    }

    /// Add an output channel binding.
    pub fn with_output(mut self, channel: &str, destinations: &[&str]) -> Self {
        self.outputs.push(OutputChannelConfig {
            channel: channel.to_string(),
            destinations: destinations.iter().map(|d| d.to_string()).collect(),
        });
        self
    }

    /// Add an input channel.
    pub fn with_input(mut self, channel: &str) -> Self {
        self.inputs.push(channel.to_string());
        self
    }
}

/// Resolves destination names from configuration to concrete endpoints.
pub trait DestinationResolver {
    /// Resolve a destination name.
    fn resolve(&self, name: &str) -> Result<Arc<dyn Destination>>;
}

/// A resolver over a fixed set of named destinations.
#[derive(Default)]
pub struct StaticDestinationResolver {
    /// Destinations by name
    destinations: HashMap<String, Arc<dyn Destination>>,
}

impl StaticDestinationResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a destination, builder style.
    pub fn with_destination(mut self, name: &str, destination: Arc<dyn Destination>) -> Self {
        self.destinations.insert(name.to_string(), destination);
        self
    }

    /// Add a destination.
    pub fn insert(&mut self, name: &str, destination: Arc<dyn Destination>) {
        self.destinations.insert(name.to_string(), destination);
    }
}

impl DestinationResolver for StaticDestinationResolver {
    fn resolve(&self, name: &str) -> Result<Arc<dyn Destination>> {
        self.destinations
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownDestination(name.to_string()))
    }
}

/// Build a bound router from configuration.
pub fn build_router(
    config: &RouterConfig,
    resolver: &dyn DestinationResolver,
) -> Result<MessageRouter> {
    let mut router = match &config.node_name {
        Some(name) => MessageRouter::new().with_node_name(name),
        None => MessageRouter::new(),
    };

    for output in &config.outputs {
        let destinations = output
            .destinations
            .iter()
            .map(|name| resolver.resolve(name))
            .collect::<Result<Vec<_>>>()?;
        router.register_output_channel(&output.channel, destinations)?;
    }

    for input in &config.inputs {
        router.register_input_channel(input)?;
    }

    Ok(router)
}
