//! Subtyping constraints and the per-path assumption set.

use crate::types::Type;
use serde::Serialize;
use smallvec::SmallVec;

/// The question "is `sub_type` usable where `super_type` is expected?".
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Constraint {
    pub sub_type: Type,
    pub super_type: Type,
}

impl Constraint {
    pub fn new(sub_type: Type, super_type: Type) -> Self {
        Self {
            sub_type,
            super_type,
        }
    }
}

/// Constraints assumed to hold on the current recursive path.
///
/// Each level of the recursion owns a small frame and borrows its caller's
/// set, so leaving a level drops exactly what that level assumed.
#[derive(Debug, Default)]
pub struct Assumptions<'p> {
    frame: SmallVec<[Constraint; 2]>,
    parent: Option<&'p Assumptions<'p>>,
}

impl<'p> Assumptions<'p> {
    /// An empty root set.
    pub fn root() -> Self {
        Self {
            frame: SmallVec::new(),
            parent: None,
        }
    }

    /// An empty frame on top of `parent`.
    pub fn new(parent: &'p Assumptions<'p>) -> Self {
        Self {
            frame: SmallVec::new(),
            parent: Some(parent),
        }
    }

    /// `parent` plus one constraint.
    pub fn with(parent: &'p Assumptions<'p>, constraint: Constraint) -> Self {
        let mut frame = SmallVec::new();
        frame.push(constraint);
        Self {
            frame,
            parent: Some(parent),
        }
    }

    pub fn push(&mut self, constraint: Constraint) {
        self.frame.push(constraint);
    }

    pub fn extend(&mut self, constraints: impl IntoIterator<Item = Constraint>) {
        self.frame.extend(constraints);
    }

    pub fn contains(&self, constraint: &Constraint) -> bool {
        let mut current = Some(self);
        while let Some(set) = current {
            if set.frame.contains(constraint) {
                return true;
            }
            current = set.parent;
        }
        false
    }

    /// Number of constraints visible from this frame.
    pub fn len(&self) -> usize {
        self.frame.len() + self.parent.map_or(0, Assumptions::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
