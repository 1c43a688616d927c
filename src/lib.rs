//! Hook dispatch and event normalization for library instrumentation.
//!
//! An upstream weaving mechanism intercepts calls that application code makes
//! into third-party libraries and fires the hook points defined here. Each
//! adapter normalizes what it observes into telemetry events and forwards
//! them to a downstream sink:
//!
//! ```text
//! intercepted call
//!   ├── decorator  (outbound operations)  → SpanSink attributes
//!   ├── advice     (single call sites)    → taint-propagation module
//!   └── lifecycle  (test notifications)   → TestResultsSink events
//! ```
//!
//! Data flows outward only. Faults inside the instrumentation are contained
//! at the hook boundary (logged, never raised into the instrumented call);
//! the exceptions are pure-derivation defects and tracker state-machine
//! violations, which fail loud because suppressing them would hide a bug in
//! the instrumentation itself.

pub mod advice;
pub mod decorator;
pub mod error;
pub mod lifecycle;
pub mod naming;
pub mod span;

pub use error::TrackerError;
