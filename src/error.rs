//! Typed errors for faults that must surface rather than be contained.
//!
//! Most instrumentation faults are swallowed at the hook boundary (a broken
//! attribute accessor must never alter the instrumented call). The errors in
//! this module are the opposite tier: defects in the instrumentation logic
//! itself, which are allowed to fail loud so they do not go unnoticed.

use thiserror::Error;

/// Lifecycle tracker state-machine violations.
///
/// A node's terminal state is write-once. Attempting to move a finished or
/// skipped node again indicates the notification stream is malformed or the
/// tracker is being driven incorrectly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// A terminal state was already recorded for this node.
    #[error("terminal state already recorded for {node} (existing: {existing}, attempted: {attempted})")]
    TerminalState {
        node: String,
        existing: &'static str,
        attempted: &'static str,
    },

    /// A finish notification arrived for a suite that never started.
    #[error("finish reported for suite '{suite}' that was never started")]
    FinishWithoutStart { suite: String },
}
