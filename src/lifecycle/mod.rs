//! Lifecycle event tracking for nested test suite/case hierarchies.

pub mod model;
pub mod sink;
pub mod tracker;

pub use model::{CaseDescriptor, FailureRecord, NotificationTarget, SuiteDescriptor};
pub use sink::{RecordingSink, SinkEvent, TestResultsSink};
pub use tracker::LifecycleTracker;
