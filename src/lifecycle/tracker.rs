//! Per-run state machine translating framework notifications into a
//! canonical event sequence.
//!
//! Suite states: `Unobserved -> Started -> Skipped? -> Finished`. A suite is
//! reported only if it directly contains at least one runnable case; wrapper
//! suites stay unobserved from the sink's perspective. Case states:
//! `Unobserved -> Started -> {Passed, Failed, Skipped}`, and a case's
//! terminal state is write-once — a second terminal transition is rejected
//! with [`TrackerError::TerminalState`] rather than overwritten.
//!
//! The notification stream is a single sequential stream per run; the
//! tracker is not safe under concurrent notifications.

use std::collections::HashMap;

use tracing::debug;

use crate::error::TrackerError;

use super::model::{CaseDescriptor, FailureRecord, NotificationTarget, SuiteDescriptor};
use super::sink::TestResultsSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SuiteState {
    Started,
    Skipped,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaseState {
    Started,
    Passed,
    Failed,
    Skipped,
}

impl CaseState {
    fn label(self) -> &'static str {
        match self {
            CaseState::Started => "started",
            CaseState::Passed => "passed",
            CaseState::Failed => "failed",
            CaseState::Skipped => "skipped",
        }
    }

    fn is_terminal(self) -> bool {
        self != CaseState::Started
    }
}

/// Tracks one run's suite/case hierarchy and forwards canonical events to
/// the sink handed over at construction.
pub struct LifecycleTracker<S> {
    sink: S,
    suites: HashMap<String, SuiteState>,
    cases: HashMap<(String, String), CaseState>,
}

impl<S: TestResultsSink> LifecycleTracker<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            suites: HashMap::new(),
            cases: HashMap::new(),
        }
    }

    /// Inspect the sink (event assertions in tests).
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Tear down the run and hand the sink back.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Run-level bracket. Nothing to report at run granularity.
    pub fn run_started(&mut self) {}

    /// Run-level bracket. Nothing to report at run granularity.
    pub fn run_finished(&mut self) {}

    pub fn suite_started(&mut self, suite: &SuiteDescriptor) -> Result<(), TrackerError> {
        if !suite.has_runnable_cases() {
            // Nested wrapper suites hold no cases of their own; reporting
            // them would bracket nothing.
            debug!(suite = %suite.name, "suppressing structural wrapper suite");
            return Ok(());
        }
        match self.suites.get(&suite.name) {
            None => {
                self.suites.insert(suite.name.clone(), SuiteState::Started);
                self.sink.on_suite_start(suite);
                Ok(())
            }
            Some(SuiteState::Started | SuiteState::Skipped) => Ok(()),
            Some(SuiteState::Finished) => Err(TrackerError::TerminalState {
                node: suite.name.clone(),
                existing: "finished",
                attempted: "started",
            }),
        }
    }

    pub fn suite_finished(&mut self, suite: &SuiteDescriptor) -> Result<(), TrackerError> {
        if !suite.has_runnable_cases() {
            return Ok(());
        }
        match self.suites.get(&suite.name) {
            None => Err(TrackerError::FinishWithoutStart {
                suite: suite.name.clone(),
            }),
            Some(SuiteState::Started | SuiteState::Skipped) => {
                self.suites.insert(suite.name.clone(), SuiteState::Finished);
                self.sink.on_suite_finish(suite);
                Ok(())
            }
            Some(SuiteState::Finished) => Err(TrackerError::TerminalState {
                node: suite.name.clone(),
                existing: "finished",
                attempted: "finished",
            }),
        }
    }

    pub fn case_started(&mut self, case: &CaseDescriptor) -> Result<(), TrackerError> {
        let key = case_key(case);
        match self.cases.get(&key) {
            None => {
                self.cases.insert(key, CaseState::Started);
                self.sink.on_case_start(case);
                Ok(())
            }
            Some(CaseState::Started) => Ok(()),
            Some(state) => Err(TrackerError::TerminalState {
                node: case.qualified_name(),
                existing: state.label(),
                attempted: "started",
            }),
        }
    }

    pub fn case_finished(&mut self, case: &CaseDescriptor) -> Result<(), TrackerError> {
        self.start_case_if_unobserved(case);
        self.set_case_terminal(case, CaseState::Passed)?;
        self.sink.on_case_finish(case);
        Ok(())
    }

    /// A failure notification, routed by target: a case failure marks that
    /// case; a suite-level (setup/teardown) failure is broadcast to every
    /// contained case that has not yet independently reported its own
    /// outcome, then reported against the suite itself.
    pub fn failure(
        &mut self,
        target: &NotificationTarget,
        failure: &FailureRecord,
    ) -> Result<(), TrackerError> {
        match target {
            NotificationTarget::Case(case) => {
                self.start_case_if_unobserved(case);
                self.set_case_terminal(case, CaseState::Failed)?;
                self.sink.on_case_failure(case, failure);
                Ok(())
            }
            NotificationTarget::Suite(suite) => {
                if !suite.has_runnable_cases() {
                    self.sink.on_suite_failure(suite, failure);
                    return Ok(());
                }
                self.suite_started(suite)?;
                for name in suite.case_names.clone() {
                    let case = suite.case(&name);
                    if self.case_is_terminal(&case) {
                        continue;
                    }
                    self.start_case_if_unobserved(&case);
                    self.set_case_terminal(&case, CaseState::Failed)?;
                    self.sink.on_case_failure(&case, failure);
                }
                self.sink.on_suite_failure(suite, failure);
                Ok(())
            }
        }
    }

    /// An assumption-failure notification: one skipped case, or — when the
    /// target is a suite — a skip of every contained case that has no
    /// independent outcome yet, each carrying the suite's reason, followed
    /// by the suite's own skip. The framework still finishes the suite
    /// normally afterwards.
    pub fn assumption_failed(
        &mut self,
        target: &NotificationTarget,
        reason: Option<&str>,
    ) -> Result<(), TrackerError> {
        match target {
            NotificationTarget::Case(case) => self.skip_case(case, reason),
            NotificationTarget::Suite(suite) => {
                if !suite.has_runnable_cases() {
                    return Ok(());
                }
                self.suite_started(suite)?;
                self.skip_contained_cases(suite, reason)?;
                self.skip_suite_node(suite, reason)
            }
        }
    }

    /// An ignore notification. For a suite the upstream framework never
    /// reports a start, but the downstream sink requires a start/finish pair
    /// bracketing any case skips, so the whole sequence is synthesized here.
    pub fn ignored(
        &mut self,
        target: &NotificationTarget,
        reason: Option<&str>,
    ) -> Result<(), TrackerError> {
        match target {
            NotificationTarget::Case(case) => self.skip_case(case, reason),
            NotificationTarget::Suite(suite) => {
                if !suite.has_runnable_cases() {
                    debug!(suite = %suite.name, "suppressing ignored wrapper suite");
                    return Ok(());
                }
                self.suite_started(suite)?;
                self.skip_contained_cases(suite, reason)?;
                self.skip_suite_node(suite, reason)?;
                self.suite_finished(suite)
            }
        }
    }

    fn start_case_if_unobserved(&mut self, case: &CaseDescriptor) {
        let key = case_key(case);
        if !self.cases.contains_key(&key) {
            self.cases.insert(key, CaseState::Started);
            self.sink.on_case_start(case);
        }
    }

    fn set_case_terminal(
        &mut self,
        case: &CaseDescriptor,
        next: CaseState,
    ) -> Result<(), TrackerError> {
        let key = case_key(case);
        match self.cases.get(&key) {
            None | Some(CaseState::Started) => {
                self.cases.insert(key, next);
                Ok(())
            }
            Some(existing) => Err(TrackerError::TerminalState {
                node: case.qualified_name(),
                existing: existing.label(),
                attempted: next.label(),
            }),
        }
    }

    fn case_is_terminal(&self, case: &CaseDescriptor) -> bool {
        self.cases
            .get(&case_key(case))
            .is_some_and(|state| state.is_terminal())
    }

    fn skip_case(&mut self, case: &CaseDescriptor, reason: Option<&str>) -> Result<(), TrackerError> {
        self.start_case_if_unobserved(case);
        self.set_case_terminal(case, CaseState::Skipped)?;
        self.sink.on_case_skip(case, reason);
        Ok(())
    }

    fn skip_contained_cases(
        &mut self,
        suite: &SuiteDescriptor,
        reason: Option<&str>,
    ) -> Result<(), TrackerError> {
        for name in suite.case_names.clone() {
            let case = suite.case(&name);
            if self.case_is_terminal(&case) {
                continue;
            }
            self.skip_case(&case, reason)?;
        }
        Ok(())
    }

    fn skip_suite_node(
        &mut self,
        suite: &SuiteDescriptor,
        reason: Option<&str>,
    ) -> Result<(), TrackerError> {
        match self.suites.get(&suite.name) {
            Some(SuiteState::Started) => {
                self.suites.insert(suite.name.clone(), SuiteState::Skipped);
                self.sink.on_suite_skip(suite, reason);
                Ok(())
            }
            // Already skipped; nothing to add.
            Some(SuiteState::Skipped) | None => Ok(()),
            Some(SuiteState::Finished) => Err(TrackerError::TerminalState {
                node: suite.name.clone(),
                existing: "finished",
                attempted: "skipped",
            }),
        }
    }
}

fn case_key(case: &CaseDescriptor) -> (String, String) {
    (case.suite_name.clone(), case.name.clone())
}
