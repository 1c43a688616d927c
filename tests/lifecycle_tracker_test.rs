//! Lifecycle tracker scenarios: suite-wide assumption failures, ignored
//! suites, and the ordering guarantees of the emitted event stream.

use pretty_assertions::assert_eq;

use tapwire::lifecycle::{
    LifecycleTracker, NotificationTarget, RecordingSink, SinkEvent, SuiteDescriptor,
};

fn suite(name: &str, cases: &[&str]) -> SuiteDescriptor {
    SuiteDescriptor {
        name: name.into(),
        framework: "junit4".into(),
        framework_version: "4.13.2".into(),
        categories: Vec::new(),
        case_names: cases.iter().map(|c| c.to_string()).collect(),
    }
}

fn suite_start(name: &str) -> SinkEvent {
    SinkEvent::SuiteStart { suite: name.into() }
}

fn suite_finish(name: &str) -> SinkEvent {
    SinkEvent::SuiteFinish { suite: name.into() }
}

fn suite_skip(name: &str, reason: &str) -> SinkEvent {
    SinkEvent::SuiteSkip {
        suite: name.into(),
        reason: Some(reason.into()),
    }
}

fn case_start(suite: &str, case: &str) -> SinkEvent {
    SinkEvent::CaseStart {
        suite: suite.into(),
        case: case.into(),
    }
}

fn case_finish(suite: &str, case: &str) -> SinkEvent {
    SinkEvent::CaseFinish {
        suite: suite.into(),
        case: case.into(),
    }
}

fn case_skip(suite: &str, case: &str, reason: &str) -> SinkEvent {
    SinkEvent::CaseSkip {
        suite: suite.into(),
        case: case.into(),
        reason: Some(reason.into()),
    }
}

#[test]
fn test_suite_wide_assumption_failure_skips_remaining_cases() {
    let mut tracker = LifecycleTracker::new(RecordingSink::new());
    let s = suite("Pkg.SuiteX", &["case1", "case2"]);

    tracker.suite_started(&s).unwrap();
    tracker.case_started(&s.case("case1")).unwrap();
    tracker.case_finished(&s.case("case1")).unwrap();
    tracker.case_started(&s.case("case2")).unwrap();

    // case2 trips a suite-wide assumption failure; no per-case notification
    // arrives for it, the tracker synthesizes the skip.
    tracker
        .assumption_failed(
            &NotificationTarget::Suite(s.clone()),
            Some("env unavailable"),
        )
        .unwrap();
    tracker.suite_finished(&s).unwrap();

    assert_eq!(
        tracker.sink().events,
        vec![
            suite_start("Pkg.SuiteX"),
            case_start("Pkg.SuiteX", "case1"),
            case_finish("Pkg.SuiteX", "case1"),
            case_start("Pkg.SuiteX", "case2"),
            case_skip("Pkg.SuiteX", "case2", "env unavailable"),
            suite_skip("Pkg.SuiteX", "env unavailable"),
            suite_finish("Pkg.SuiteX"),
        ]
    );
}

#[test]
fn test_assumption_failure_synthesizes_start_for_unstarted_cases() {
    let mut tracker = LifecycleTracker::new(RecordingSink::new());
    let s = suite("Pkg.SuiteX", &["case1"]);

    tracker.suite_started(&s).unwrap();
    tracker
        .assumption_failed(&NotificationTarget::Suite(s.clone()), Some("no network"))
        .unwrap();
    tracker.suite_finished(&s).unwrap();

    assert_eq!(
        tracker.sink().events,
        vec![
            suite_start("Pkg.SuiteX"),
            case_start("Pkg.SuiteX", "case1"),
            case_skip("Pkg.SuiteX", "case1", "no network"),
            suite_skip("Pkg.SuiteX", "no network"),
            suite_finish("Pkg.SuiteX"),
        ]
    );
}

#[test]
fn test_ignored_suite_synthesizes_the_full_bracket() {
    let mut tracker = LifecycleTracker::new(RecordingSink::new());
    let s = suite("Pkg.Ignored", &["a", "b", "c"]);

    // The upstream framework never reported a start for this suite.
    tracker
        .ignored(&NotificationTarget::Suite(s.clone()), Some("disabled"))
        .unwrap();

    assert_eq!(
        tracker.sink().events,
        vec![
            suite_start("Pkg.Ignored"),
            case_start("Pkg.Ignored", "a"),
            case_skip("Pkg.Ignored", "a", "disabled"),
            case_start("Pkg.Ignored", "b"),
            case_skip("Pkg.Ignored", "b", "disabled"),
            case_start("Pkg.Ignored", "c"),
            case_skip("Pkg.Ignored", "c", "disabled"),
            suite_skip("Pkg.Ignored", "disabled"),
            suite_finish("Pkg.Ignored"),
        ]
    );
}

#[test]
fn test_ignored_case_marks_just_that_case() {
    let mut tracker = LifecycleTracker::new(RecordingSink::new());
    let s = suite("Pkg.SuiteX", &["a", "b"]);

    tracker.suite_started(&s).unwrap();
    tracker
        .ignored(&NotificationTarget::Case(s.case("a")), Some("flaky"))
        .unwrap();
    tracker.case_started(&s.case("b")).unwrap();
    tracker.case_finished(&s.case("b")).unwrap();
    tracker.suite_finished(&s).unwrap();

    assert_eq!(
        tracker.sink().events,
        vec![
            suite_start("Pkg.SuiteX"),
            case_start("Pkg.SuiteX", "a"),
            case_skip("Pkg.SuiteX", "a", "flaky"),
            case_start("Pkg.SuiteX", "b"),
            case_finish("Pkg.SuiteX", "b"),
            suite_finish("Pkg.SuiteX"),
        ]
    );
}

#[test]
fn test_ignored_wrapper_suite_is_fully_suppressed() {
    let mut tracker = LifecycleTracker::new(RecordingSink::new());
    let wrapper = suite("Pkg.Wrapper", &[]);

    tracker
        .ignored(&NotificationTarget::Suite(wrapper), Some("disabled"))
        .unwrap();

    assert!(tracker.sink().events.is_empty());
}

#[test]
fn test_nested_wrapper_suites_only_report_the_innermost() {
    let mut tracker = LifecycleTracker::new(RecordingSink::new());
    let outer = suite("Pkg.All", &[]);
    let inner = suite("Pkg.All.Storage", &["uploads"]);

    tracker.suite_started(&outer).unwrap();
    tracker.suite_started(&inner).unwrap();
    tracker.case_started(&inner.case("uploads")).unwrap();
    tracker.case_finished(&inner.case("uploads")).unwrap();
    tracker.suite_finished(&inner).unwrap();
    tracker.suite_finished(&outer).unwrap();

    assert_eq!(
        tracker.sink().events,
        vec![
            suite_start("Pkg.All.Storage"),
            case_start("Pkg.All.Storage", "uploads"),
            case_finish("Pkg.All.Storage", "uploads"),
            suite_finish("Pkg.All.Storage"),
        ]
    );
}

#[test]
fn test_exactly_one_terminal_event_per_case() {
    let mut tracker = LifecycleTracker::new(RecordingSink::new());
    let s = suite("Pkg.SuiteX", &["a"]);

    tracker.suite_started(&s).unwrap();
    tracker.case_started(&s.case("a")).unwrap();
    tracker
        .assumption_failed(&NotificationTarget::Case(s.case("a")), Some("skip it"))
        .unwrap();

    // A later finish for the skipped case is rejected, not overwritten.
    assert!(tracker.case_finished(&s.case("a")).is_err());

    let terminal_events = tracker
        .sink()
        .events
        .iter()
        .filter(|e| {
            matches!(
                e,
                SinkEvent::CaseFinish { .. }
                    | SinkEvent::CaseSkip { .. }
                    | SinkEvent::CaseFailure { .. }
            )
        })
        .count();
    assert_eq!(terminal_events, 1);
}

#[test]
fn test_run_brackets_emit_nothing() {
    let mut tracker = LifecycleTracker::new(RecordingSink::new());
    tracker.run_started();
    tracker.run_finished();
    assert!(tracker.into_sink().events.is_empty());
}
