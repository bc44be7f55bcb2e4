//! Error types for actroute.

use thiserror::Error;

/// Result type alias for actroute operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in actroute operations.
#[derive(Error, Debug)]
pub enum Error {
    // Routing errors
    #[error("Channel name must not be empty")]
    EmptyChannelName,

    #[error("Output channel already registered: {0}")]
    ChannelAlreadyRegistered(String),

    #[error("Input channel already registered: {0}")]
    InputChannelAlreadyRegistered(String),

    #[error("No destination known for name: {0}")]
    UnknownDestination(String),

    #[error(transparent)]
    Delivery(#[from] crate::routing::router::DeliveryError),

    // Message errors
    #[error("Message encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Message decoding failed: {0}")]
    DecodingFailed(String),

    // Serialization errors
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationFailed(err.to_string())
    }
}
