//! Per-library decorator contract for outbound operations.
//!
//! A decorator is invoked at two hook points bracketing a single intercepted
//! call: [`ClientDecorator::on_start`] once interception begins and
//! [`ClientDecorator::on_complete`] once the call's outcome is known. Both
//! populate normalized attributes on a [`SpanSink`] and both are strictly
//! additive: no fault inside either hook may alter the instrumented call's
//! own result. The only fallible collaborator, the [`AccessorResolver`], is
//! contained at attribute granularity — one failing accessor logs a warning
//! and the remaining attributes are still attempted.

pub mod accessor;
pub mod cloud;

pub use accessor::{AccessorResolver, DomainAttribute, JsonAccessorResolver};
pub use cloud::CloudSdkDecorator;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::naming::{QualifiedNameCache, TypeKey};
use crate::span::SpanSink;

/// A single intercepted outbound call, alive for the duration of the call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// HTTP method or verb
    pub method: String,

    /// Target endpoint
    pub endpoint: String,

    /// Named backend/service identity (e.g. "AmazonStorage")
    pub service: String,

    /// Stable token identifying the request type
    pub request_token: u64,

    /// Unqualified name of the request type (e.g. "PutObjectRequest")
    pub request_type: String,

    /// The operation's native payload, for domain-attribute extraction
    pub payload: Value,
}

impl Operation {
    /// Type descriptor for the request type, used as the naming-cache key.
    pub fn type_key(&self) -> TypeKey<'_> {
        TypeKey::new(self.request_token, &self.request_type)
    }
}

/// Response envelope recognized on successful outcomes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Backend-assigned request/correlation identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// Decoded response body, if the interceptor captured one
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub body: Value,
}

/// The finalized outcome of an intercepted call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Outcome {
    /// Numeric status classification (HTTP status code where applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,

    /// Response envelope, when the outcome carries a recognizable one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub envelope: Option<ResponseEnvelope>,

    /// Failure message when the call raised instead of returning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

/// The per-library adapter contract.
///
/// Adapters supply the identity methods and the shared collaborators; the
/// hook points themselves are provided behavior so every adapter normalizes
/// the same way.
pub trait ClientDecorator {
    /// Component/integration identity (e.g. "aws-sdk").
    fn component(&self) -> &'static str;

    /// Prefix for library-specific tag names (e.g. "aws").
    fn tag_prefix(&self) -> &'static str;

    fn cache(&self) -> &QualifiedNameCache;

    fn accessors(&self) -> &dyn AccessorResolver;

    /// Populate normalized attributes when interception begins.
    fn on_start(&self, sink: &mut dyn SpanSink, op: &Operation) {
        let prefix = self.tag_prefix();

        // Generic client defaults first; the derived resource name below
        // overrides the default assigned here.
        sink.set_attribute("component", self.component().into());
        sink.set_attribute("http.method", op.method.as_str().into());
        sink.set_attribute("http.url", op.endpoint.as_str().into());
        sink.set_resource_name(&format!("{} {}", op.method, op.endpoint));

        let key = op.type_key();
        sink.set_attribute(&format!("{prefix}.agent"), self.component().into());
        sink.set_attribute(&format!("{prefix}.service"), op.service.as_str().into());
        sink.set_attribute(&format!("{prefix}.operation"), self.cache().name(&key).as_ref().into());
        sink.set_attribute(&format!("{prefix}.endpoint"), op.endpoint.as_str().into());

        sink.set_resource_name(&self.cache().qualified_name(&key, &op.service));
        sink.set_measured(true);

        for attribute in DomainAttribute::ALL {
            match self.accessors().attribute(&op.payload, attribute) {
                Ok(Some(value)) => {
                    sink.set_attribute(&format!("{prefix}.{}", attribute.tag_suffix()), value.into());
                }
                Ok(None) => {}
                Err(error) => {
                    warn!(
                        component = self.component(),
                        attribute = attribute.tag_suffix(),
                        "domain accessor failed, attribute dropped: {error:#}"
                    );
                }
            }
        }
    }

    /// Attach outcome attributes once the call's result is known.
    fn on_complete(&self, sink: &mut dyn SpanSink, outcome: &Outcome) {
        if let Some(envelope) = &outcome.envelope {
            if let Some(request_id) = &envelope.request_id {
                sink.set_attribute(
                    &format!("{}.request_id", self.tag_prefix()),
                    request_id.as_str().into(),
                );
            }
        }
        if let Some(status) = outcome.status {
            sink.set_attribute("http.status_code", status.into());
        }
        if let Some(failure) = &outcome.failure {
            sink.set_error(true);
            sink.set_attribute("error.message", failure.as_str().into());
        }
    }
}
