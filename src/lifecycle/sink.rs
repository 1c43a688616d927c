//! Downstream test-results sink contract and a recording test double.

use serde::Serialize;

use super::model::{CaseDescriptor, FailureRecord, SuiteDescriptor};

/// Ordered event consumer for a single run.
///
/// The tracker guarantees ordering: a suite's start precedes every case
/// event it directly contains, which precede its finish; a case's start
/// precedes its own terminal event.
pub trait TestResultsSink {
    fn on_suite_start(&mut self, suite: &SuiteDescriptor);
    fn on_suite_finish(&mut self, suite: &SuiteDescriptor);
    fn on_suite_skip(&mut self, suite: &SuiteDescriptor, reason: Option<&str>);
    fn on_suite_failure(&mut self, suite: &SuiteDescriptor, failure: &FailureRecord);
    fn on_case_start(&mut self, case: &CaseDescriptor);
    fn on_case_finish(&mut self, case: &CaseDescriptor);
    fn on_case_skip(&mut self, case: &CaseDescriptor, reason: Option<&str>);
    fn on_case_failure(&mut self, case: &CaseDescriptor, failure: &FailureRecord);
}

/// Flattened sink event, recorded in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SinkEvent {
    SuiteStart { suite: String },
    SuiteFinish { suite: String },
    SuiteSkip { suite: String, reason: Option<String> },
    SuiteFailure { suite: String, message: Option<String> },
    CaseStart { suite: String, case: String },
    CaseFinish { suite: String, case: String },
    CaseSkip { suite: String, case: String, reason: Option<String> },
    CaseFailure { suite: String, case: String, message: Option<String> },
}

/// Sink that records the exact event sequence it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TestResultsSink for RecordingSink {
    fn on_suite_start(&mut self, suite: &SuiteDescriptor) {
        self.events.push(SinkEvent::SuiteStart {
            suite: suite.name.clone(),
        });
    }

    fn on_suite_finish(&mut self, suite: &SuiteDescriptor) {
        self.events.push(SinkEvent::SuiteFinish {
            suite: suite.name.clone(),
        });
    }

    fn on_suite_skip(&mut self, suite: &SuiteDescriptor, reason: Option<&str>) {
        self.events.push(SinkEvent::SuiteSkip {
            suite: suite.name.clone(),
            reason: reason.map(str::to_string),
        });
    }

    fn on_suite_failure(&mut self, suite: &SuiteDescriptor, failure: &FailureRecord) {
        self.events.push(SinkEvent::SuiteFailure {
            suite: suite.name.clone(),
            message: failure.message.clone(),
        });
    }

    fn on_case_start(&mut self, case: &CaseDescriptor) {
        self.events.push(SinkEvent::CaseStart {
            suite: case.suite_name.clone(),
            case: case.name.clone(),
        });
    }

    fn on_case_finish(&mut self, case: &CaseDescriptor) {
        self.events.push(SinkEvent::CaseFinish {
            suite: case.suite_name.clone(),
            case: case.name.clone(),
        });
    }

    fn on_case_skip(&mut self, case: &CaseDescriptor, reason: Option<&str>) {
        self.events.push(SinkEvent::CaseSkip {
            suite: case.suite_name.clone(),
            case: case.name.clone(),
            reason: reason.map(str::to_string),
        });
    }

    fn on_case_failure(&mut self, case: &CaseDescriptor, failure: &FailureRecord) {
        self.events.push(SinkEvent::CaseFailure {
            suite: case.suite_name.clone(),
            case: case.name.clone(),
            message: failure.message.clone(),
        });
    }
}
