//! Domain-attribute extraction contract.
//!
//! The decorator does not know the shape of any particular library's request
//! objects. It asks an [`AccessorResolver`] for each attribute in a small
//! fixed vocabulary; "not applicable" is the normal answer for most of them
//! on any given payload, and an `Err` from one accessor never blocks the
//! rest.

use anyhow::Result;
use serde_json::Value;

/// The fixed vocabulary of well-known domain attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainAttribute {
    BucketName,
    QueueUrl,
    QueueName,
    StreamName,
    TableName,
}

impl DomainAttribute {
    pub const ALL: [DomainAttribute; 5] = [
        DomainAttribute::BucketName,
        DomainAttribute::QueueUrl,
        DomainAttribute::QueueName,
        DomainAttribute::StreamName,
        DomainAttribute::TableName,
    ];

    /// Tag suffix, prefixed by the decorator (e.g. `aws.bucket.name`).
    pub fn tag_suffix(&self) -> &'static str {
        match self {
            DomainAttribute::BucketName => "bucket.name",
            DomainAttribute::QueueUrl => "queue.url",
            DomainAttribute::QueueName => "queue.name",
            DomainAttribute::StreamName => "stream.name",
            DomainAttribute::TableName => "table.name",
        }
    }
}

/// Extracts well-known domain attributes from an operation's native payload.
///
/// `Ok(None)` means the attribute does not apply to this payload shape —
/// expected and silent. `Err` means the accessor itself misbehaved; the
/// caller contains it at attribute granularity.
pub trait AccessorResolver: Send + Sync {
    fn attribute(&self, payload: &Value, attribute: DomainAttribute) -> Result<Option<String>>;
}

/// Resolver for payloads carried as JSON objects: reads the conventional
/// field names for each attribute.
#[derive(Debug, Default)]
pub struct JsonAccessorResolver;

impl JsonAccessorResolver {
    fn field_names(attribute: DomainAttribute) -> &'static [&'static str] {
        match attribute {
            DomainAttribute::BucketName => &["BucketName", "Bucket"],
            DomainAttribute::QueueUrl => &["QueueUrl"],
            DomainAttribute::QueueName => &["QueueName"],
            DomainAttribute::StreamName => &["StreamName", "DeliveryStreamName"],
            DomainAttribute::TableName => &["TableName"],
        }
    }
}

impl AccessorResolver for JsonAccessorResolver {
    fn attribute(&self, payload: &Value, attribute: DomainAttribute) -> Result<Option<String>> {
        for field in Self::field_names(attribute) {
            if let Some(value) = payload.get(field).and_then(Value::as_str) {
                return Ok(Some(value.to_string()));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bucket_name_present() {
        let resolver = JsonAccessorResolver;
        let payload = json!({"Bucket": "my-bucket", "Key": "a.txt"});

        let bucket = resolver
            .attribute(&payload, DomainAttribute::BucketName)
            .unwrap();
        assert_eq!(bucket.as_deref(), Some("my-bucket"));
    }

    #[test]
    fn test_absent_attribute_is_none_not_error() {
        let resolver = JsonAccessorResolver;
        let payload = json!({"Bucket": "my-bucket"});

        for attr in [
            DomainAttribute::QueueUrl,
            DomainAttribute::QueueName,
            DomainAttribute::StreamName,
            DomainAttribute::TableName,
        ] {
            assert!(resolver.attribute(&payload, attr).unwrap().is_none());
        }
    }

    #[test]
    fn test_non_object_payload_is_absent() {
        let resolver = JsonAccessorResolver;
        let payload = json!("raw body");
        assert!(resolver
            .attribute(&payload, DomainAttribute::TableName)
            .unwrap()
            .is_none());
    }
}
