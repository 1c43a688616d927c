//! Call-site advice: narrow hooks around a single library function call.
//!
//! Unlike the decorator, which brackets an outbound I/O operation, advice
//! wraps one method signature of one external type and applies a
//! cross-cutting transformation to its result — typically forwarding the
//! inputs and output to a taint-propagation module. The hook always hands the
//! original result back to the caller; the side-effecting module is an
//! optional, explicitly injected dependency, and its failures stop at the
//! hook boundary.

pub mod json;

pub use json::JsonParseAdvice;

use anyhow::Result;
use serde_json::Value;
use tracing::warn;

/// The receiver and arguments of one intercepted call. Owned by the hook for
/// the duration of the call; nothing here is shared across calls.
#[derive(Debug, Clone)]
pub struct CallContext<'a> {
    /// The call's receiver (the object the method was invoked on)
    pub receiver: &'a Value,

    /// The call's arguments, in declaration order
    pub arguments: &'a [Value],
}

/// What the real call produced: a return value or a raised failure.
#[derive(Debug, Clone, PartialEq)]
pub enum CallResult {
    Return(Value),
    Failure(String),
}

/// A hook bound to a specific method signature of a specific external type.
///
/// `after` receives the real call's result and must return it unchanged
/// unless the implementation's documented purpose is to wrap it.
pub trait CallSiteAdvice {
    fn before(&self, _ctx: &CallContext<'_>) {}

    fn after(&self, _ctx: &CallContext<'_>, result: CallResult) -> CallResult {
        result
    }
}

/// Taint-propagation module consumed by after-hooks.
///
/// Absent (`None` at the injection site) means the feature is disabled;
/// hooks must check before use and never assume presence.
pub trait PropagationModule: Send + Sync {
    /// Mark `target` as tainted if `source` is tainted.
    fn taint_if_input_tainted(&self, target: &Value, source: &Value) -> Result<()>;

    /// Report a fault raised inside the module during a hook.
    fn on_unexpected_error(&self, operation: &str, error: &anyhow::Error) {
        warn!(operation, "propagation module fault contained: {error:#}");
    }
}
