//! Outcomes of a subtype check.

use crate::constraint::Constraint;
use crate::trace::{Trace, TraceEntry};
use rbz_common::interner::Atom;
use serde::Serialize;

/// Why a check failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum FailureReason {
    /// No rule relates the two types.
    UnknownPair(Constraint),
    /// The required interface has a method the candidate lacks.
    MethodMissing(Atom),
    /// Parameters of the named method are incompatible.
    ParameterMismatch(Atom),
    /// Exactly one side of the named method takes a block.
    BlockMismatch(Atom),
    /// The recursion hit the configured depth ceiling.
    DepthExceeded,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub reason: FailureReason,
    pub trace: Vec<TraceEntry>,
}

impl Failure {
    /// Remove the first `len` trace entries.
    pub fn drop_prefix(mut self, len: usize) -> Self {
        let len = len.min(self.trace.len());
        self.trace.drain(..len);
        self
    }

    /// Prefix `trace` onto this failure's trace.
    pub fn merge_trace(mut self, trace: &Trace) -> Self {
        let mut entries = trace.snapshot();
        entries.append(&mut self.trace);
        self.trace = entries;
        self
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum CheckResult {
    Success,
    Failure(Box<Failure>),
}

impl CheckResult {
    /// A failure carrying a snapshot of the current path.
    pub fn failure(reason: FailureReason, trace: &Trace) -> Self {
        CheckResult::Failure(Box::new(Failure {
            reason,
            trace: trace.snapshot(),
        }))
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, CheckResult::Success)
    }

    #[inline]
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn as_failure(&self) -> Option<&Failure> {
        match self {
            CheckResult::Success => None,
            CheckResult::Failure(failure) => Some(failure),
        }
    }

    pub fn reason(&self) -> Option<&FailureReason> {
        self.as_failure().map(|failure| &failure.reason)
    }

    /// Run `f` only if this is a success.
    #[inline]
    pub fn then(self, f: impl FnOnce() -> CheckResult) -> CheckResult {
        match self {
            CheckResult::Success => f(),
            failure => failure,
        }
    }

    /// Transform the failure payload; identity on success.
    pub fn map_failure(self, f: impl FnOnce(Failure) -> Failure) -> CheckResult {
        match self {
            CheckResult::Success => CheckResult::Success,
            CheckResult::Failure(failure) => CheckResult::Failure(Box::new(f(*failure))),
        }
    }

    pub fn merge_trace(self, trace: &Trace) -> CheckResult {
        self.map_failure(|failure| failure.merge_trace(trace))
    }
}
