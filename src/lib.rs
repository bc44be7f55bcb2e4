//! # actroute - Activity Message Routing
//!
//! A minimal message-routing abstraction for activity-style plugins:
//! - **Message**: ordered field map carried on logical channels
//! - **Routing**: named output channels bound to zero or more destinations
//! - **Activity**: lifecycle callbacks with an explicitly injected router
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use actroute::message::Message;
//! use actroute::routing::{InMemoryDestination, MessageRouter};
//!
//! let destination = Arc::new(InMemoryDestination::new("mock"));
//! let mut router = MessageRouter::new();
//! router
//!     .register_output_channel("output1", vec![destination.clone()])
//!     .unwrap();
//!
//! let message = Message::new().with_field("message", "hello");
//! router.send("output1", &message).unwrap();
//! assert_eq!(destination.delivery_count(), 1);
//! ```

pub mod activity;
pub mod core;
pub mod message;
pub mod routing;

pub use crate::core::error::{Error, Result};
