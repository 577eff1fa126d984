//! The path of pairs visited by the checker.
//!
//! Entries are pushed through [`Trace::scope`], which returns a guard that
//! truncates the trace back to its previous length when dropped. Early
//! returns and unwinding both restore the trace.

use crate::method_type::MethodType;
use crate::types::Type;
use rbz_common::interner::Atom;
use serde::Serialize;
use std::ops::{Deref, DerefMut};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TraceEntry {
    /// A type pair.
    Type { sub: Type, sup: Type },
    /// A method looked up by name on both sides.
    Method { name: Atom },
    /// One (instantiated) overload pair of a method.
    MethodType {
        name: Atom,
        sub: Box<MethodType>,
        sup: Box<MethodType>,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    /// Copy of the current path.
    pub fn snapshot(&self) -> Vec<TraceEntry> {
        self.entries.clone()
    }

    /// Push `entry` for the lifetime of the returned guard.
    pub fn scope(&mut self, entry: TraceEntry) -> TraceScope<'_> {
        let len = self.entries.len();
        self.entries.push(entry);
        TraceScope { trace: self, len }
    }
}

/// Guard returned by [`Trace::scope`].
pub struct TraceScope<'t> {
    trace: &'t mut Trace,
    len: usize,
}

impl Deref for TraceScope<'_> {
    type Target = Trace;

    fn deref(&self) -> &Trace {
        self.trace
    }
}

impl DerefMut for TraceScope<'_> {
    fn deref_mut(&mut self) -> &mut Trace {
        self.trace
    }
}

impl Drop for TraceScope<'_> {
    fn drop(&mut self) {
        self.trace.truncate(self.len);
    }
}
