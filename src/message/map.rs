//! Ordered field map for route messages.
//!
//! Messages are mappings from field name to value, preserving insertion
//! order. A message is built up with the `with_field` builder and treated
//! as immutable once handed to a router.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::Result;

/// A value carried in a message field.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// UTF-8 string
    String(String),
    /// Signed integer
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// Nested message
    Map(Message),
}

impl Value {
    /// Get the string content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer content, if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the float content, if this is a float value.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the nested message, if this is a map value.
    pub fn as_map(&self) -> Option<&Message> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<Message> for Value {
    fn from(m: Message) -> Self {
        Value::Map(m)
    }
}

/// An ordered mapping from field name to value.
///
/// Fields keep their insertion order. Setting a field that already exists
/// replaces its value in place without changing its position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Message {
    /// Fields in insertion order
    fields: Vec<(String, Value)>,
}

impl Message {
    /// Create an empty message.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field, builder style.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a field, replacing any existing value for the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    /// Get a field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Get a string field by name.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Get an integer field by name.
    pub fn get_integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_integer)
    }

    /// Check whether a field is present.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the message has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse from a JSON object string.
    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::Map(m) => m.serialize(serializer),
        }
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a string, a number, or a map")
    }

    fn visit_str<E: serde::de::Error>(self, s: &str) -> std::result::Result<Value, E> {
        Ok(Value::String(s.to_string()))
    }

    fn visit_string<E: serde::de::Error>(self, s: String) -> std::result::Result<Value, E> {
        Ok(Value::String(s))
    }

    fn visit_i64<E: serde::de::Error>(self, n: i64) -> std::result::Result<Value, E> {
        Ok(Value::Integer(n))
    }

    fn visit_u64<E: serde::de::Error>(self, n: u64) -> std::result::Result<Value, E> {
        i64::try_from(n)
            .map(Value::Integer)
            .map_err(|_| E::custom(format!("integer out of range: {}", n)))
    }

    fn visit_f64<E: serde::de::Error>(self, n: f64) -> std::result::Result<Value, E> {
        Ok(Value::Float(n))
    }

    fn visit_map<A: MapAccess<'de>>(self, access: A) -> std::result::Result<Value, A::Error> {
        MessageVisitor.visit_map(access).map(Value::Map)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct MessageVisitor;

impl<'de> Visitor<'de> for MessageVisitor {
    type Value = Message;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a map of field names to values")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
    ) -> std::result::Result<Message, A::Error> {
        let mut message = Message::new();
        while let Some((name, value)) = access.next_entry::<String, Value>()? {
            message.set(name, value);
        }
        Ok(message)
    }
}

impl<'de> Deserialize<'de> for Message {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(MessageVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_field_order() {
        let message = Message::new()
            .with_field("first", "a")
            .with_field("second", 2)
            .with_field("third", 3.5);

        let names: Vec<&str> = message.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_message_set_replaces_in_place() {
        let message = Message::new()
            .with_field("a", 1)
            .with_field("b", 2)
            .with_field("a", 10);

        assert_eq!(message.len(), 2);
        assert_eq!(message.get_integer("a"), Some(10));
        let names: Vec<&str> = message.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_message_accessors() {
        let nested = Message::new().with_field("inner", "value");
        let message = Message::new()
            .with_field("text", "hello")
            .with_field("count", 42)
            .with_field("ratio", 0.5)
            .with_field("extra", nested.clone());

        assert_eq!(message.get_str("text"), Some("hello"));
        assert_eq!(message.get_integer("count"), Some(42));
        assert_eq!(message.get("ratio").and_then(Value::as_float), Some(0.5));
        assert_eq!(message.get("extra").and_then(Value::as_map), Some(&nested));
        assert!(message.get("missing").is_none());
        assert!(!message.contains("missing"));
    }

    #[test]
    fn test_message_json_preserves_order() {
        let message = Message::new()
            .with_field("z", 1)
            .with_field("a", 2);

        let json = message.to_json().unwrap();
        assert_eq!(json, r#"{"z":1,"a":2}"#);
    }

    #[test]
    fn test_message_json_parse() {
        let message = Message::from_json(r#"{"message":"hello","count":3}"#).unwrap();
        assert_eq!(message.get_str("message"), Some("hello"));
        assert_eq!(message.get_integer("count"), Some(3));
    }

    #[test]
    fn test_message_json_nested() {
        let json = r#"{"outer":{"inner":"deep"}}"#;
        let message = Message::from_json(json).unwrap();
        let nested = message.get("outer").and_then(Value::as_map).unwrap();
        assert_eq!(nested.get_str("inner"), Some("deep"));
        assert_eq!(message.to_json().unwrap(), json);
    }

    #[test]
    fn test_message_json_rejects_non_object() {
        assert!(Message::from_json("[1,2,3]").is_err());
        assert!(Message::from_json(r#""text""#).is_err());
    }
}
