//! Message codecs for wire forms.
//!
//! A codec converts between route messages and an encoded transport
//! representation. Destinations that hand messages to byte-oriented
//! transports pick a codec and keep it for the life of the channel.

use crate::core::{Error, Result};
use crate::message::map::Message;

/// Converts messages to and from an encoded form.
pub trait MessageCodec: Send + Sync {
    /// The encoded representation.
    type Encoded;

    /// Encode a message.
    fn encode(&self, message: &Message) -> Result<Self::Encoded>;

    /// Decode a message.
    fn decode(&self, encoded: &Self::Encoded) -> Result<Message>;
}

/// Codec producing UTF-8 JSON bytes.
#[derive(Clone, Debug, Default)]
pub struct JsonMessageCodec;

impl JsonMessageCodec {
    /// Create a new JSON codec.
    pub fn new() -> Self {
        Self
    }
}

impl MessageCodec for JsonMessageCodec {
    type Encoded = Vec<u8>;

    fn encode(&self, message: &Message) -> Result<Vec<u8>> {
        serde_json::to_vec(message).map_err(|e| Error::EncodingFailed(e.to_string()))
    }

    fn decode(&self, encoded: &Vec<u8>) -> Result<Message> {
        serde_json::from_slice(encoded).map_err(|e| Error::DecodingFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_codec_encode() {
        let codec = JsonMessageCodec::new();
        let message = Message::new().with_field("message", "hello");

        let bytes = codec.encode(&message).unwrap();
        assert_eq!(bytes, br#"{"message":"hello"}"#.to_vec());
    }

    #[test]
    fn test_json_codec_decode() {
        let codec = JsonMessageCodec::new();
        let bytes = br#"{"count":7,"label":"x"}"#.to_vec();

        let message = codec.decode(&bytes).unwrap();
        assert_eq!(message.get_integer("count"), Some(7));
        assert_eq!(message.get_str("label"), Some("x"));
    }

    #[test]
    fn test_json_codec_decode_garbage() {
        let codec = JsonMessageCodec::new();
        let result = codec.decode(&b"not json".to_vec());
        assert!(matches!(result, Err(Error::DecodingFailed(_))));
    }
}
