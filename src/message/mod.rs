//! Route message representation and codecs.
//!
//! Provides the structured message format carried on channels:
//! - Ordered field map with string, number, and nested-map values
//! - Codec trait for converting messages to wire forms
//! - JSON codec for transport-agnostic serialization

pub mod codec;
pub mod map;

pub use codec::{JsonMessageCodec, MessageCodec};
pub use map::{Message, Value};
