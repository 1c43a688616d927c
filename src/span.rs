//! Span sink contract and the in-process span record.
//!
//! Decorators never talk to a telemetry backend directly. They populate an
//! abstract attribute bag, the [`SpanSink`], which a surrounding agent maps
//! onto whatever wire format it ships. [`SpanRecord`] is the concrete
//! in-process implementation: a serializable record of everything a decorator
//! attached, used both as the default sink and as the observable surface in
//! tests.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

/// Generate a unique 16-character hex span ID (8 bytes).
fn generate_span_id() -> String {
    let uuid = Uuid::now_v7();
    hex::encode(&uuid.as_bytes()[8..16])
}

/// Serialize SystemTime as RFC3339 string.
fn serialize_system_time<S>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use chrono::{DateTime, Utc};
    let datetime: DateTime<Utc> = (*time).into();
    serializer.serialize_str(&datetime.to_rfc3339())
}

/// A single attribute value on a span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Str(String),
    I64(i64),
    Bool(bool),
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Str(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Str(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::I64(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

/// The attribute bag a decorator populates for one intercepted operation.
///
/// Implementations must treat `set_resource_name` as an override: the last
/// caller wins, so a specific adapter can replace the generic default its
/// base behavior assigned earlier in the same hook.
pub trait SpanSink {
    /// Set (or replace) a named attribute.
    fn set_attribute(&mut self, key: &str, value: AttributeValue);

    /// Set the human-readable resource identifier, replacing any prior value.
    fn set_resource_name(&mut self, name: &str);

    /// Mark this operation as billable/significant.
    fn set_measured(&mut self, measured: bool);

    /// Flag the operation as failed.
    fn set_error(&mut self, error: bool);
}

/// Concrete serializable span: ordered attributes plus the resource name and
/// the measured/error flags.
#[derive(Debug, Clone, Serialize)]
pub struct SpanRecord {
    /// Unique span identifier (16-char hex)
    pub span_id: String,

    /// When the operation was intercepted
    #[serde(serialize_with = "serialize_system_time")]
    pub timestamp: SystemTime,

    /// Attributes in the order they were first set
    pub attributes: Vec<(String, AttributeValue)>,

    /// Resource identifier, if one was assigned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,

    /// Whether this operation counts toward billing/significance
    pub measured: bool,

    /// Whether the operation failed
    pub error: bool,
}

impl SpanRecord {
    pub fn new() -> Self {
        Self {
            span_id: generate_span_id(),
            timestamp: SystemTime::now(),
            attributes: Vec::new(),
            resource_name: None,
            measured: false,
            error: false,
        }
    }

    /// Look up an attribute by key.
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Look up a string attribute by key.
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        match self.attribute(key) {
            Some(AttributeValue::Str(s)) => Some(s),
            _ => None,
        }
    }
}

impl Default for SpanRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl SpanSink for SpanRecord {
    fn set_attribute(&mut self, key: &str, value: AttributeValue) {
        if let Some(slot) = self.attributes.iter_mut().find(|(k, _)| k == key) {
            slot.1 = value;
        } else {
            self.attributes.push((key.to_string(), value));
        }
    }

    fn set_resource_name(&mut self, name: &str) {
        self.resource_name = Some(name.to_string());
    }

    fn set_measured(&mut self, measured: bool) {
        self.measured = measured;
    }

    fn set_error(&mut self, error: bool) {
        self.error = error;
    }
}
