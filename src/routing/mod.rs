//! Channel routing.
//!
//! Protocol-independent message routing:
//! - Destination trait for concrete transport endpoints
//! - Router binding named logical channels to destinations
//! - Configuration-driven channel binding

pub mod config;
pub mod destination;
pub mod router;

pub use config::{build_router, DestinationResolver, RouterConfig, StaticDestinationResolver};
pub use destination::{Destination, InMemoryDestination, LogDestination};
pub use router::{DeliveryError, DestinationFailure, MessageRouter, RouteMessageHandler};
