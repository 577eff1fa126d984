//! Method parameter lists and their combinators.
//!
//! A parameter list has positional slots (required, optional, one rest slot)
//! and keyword slots (required, optional, one rest-keyword slot).
//!
//! Two combinators are defined over parameter lists:
//!
//! - [`Params::union`] accepts every call that either operand accepts. It is
//!   used to merge overloads into one implementation signature and for the
//!   parameters of a meet.
//! - [`Params::intersection`] accepts only the calls both operands accept and
//!   returns `None` when no call shape satisfies both. It drives joins.
//!
//! Both walk the two positional lists slot by slot. A rest slot is never
//! consumed while the other side still has fixed slots, so `(*Integer)`
//! against `(String, ?Symbol)` is compared as `(Integer, Integer)` against
//! `(String, Symbol)` before the rest slot itself is considered.

use crate::substitution::Substitution;
use crate::types::{Type, TypeVar};
use rbz_common::interner::Atom;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::collections::BTreeMap;

/// Whether a fixed positional slot must be supplied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Required,
    Optional,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Params {
    pub required: Vec<Type>,
    pub optional: Vec<Type>,
    pub rest: Option<Type>,
    pub required_keywords: BTreeMap<Atom, Type>,
    pub optional_keywords: BTreeMap<Atom, Type>,
    pub rest_keywords: Option<Type>,
}

impl Params {
    /// The empty parameter list `()`.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_required(mut self, ty: Type) -> Self {
        self.required.push(ty);
        self
    }

    pub fn with_optional(mut self, ty: Type) -> Self {
        self.optional.push(ty);
        self
    }

    pub fn with_rest(mut self, ty: Type) -> Self {
        self.rest = Some(ty);
        self
    }

    pub fn with_required_keyword(mut self, name: Atom, ty: Type) -> Self {
        self.required_keywords.insert(name, ty);
        self
    }

    pub fn with_optional_keyword(mut self, name: Atom, ty: Type) -> Self {
        self.optional_keywords.insert(name, ty);
        self
    }

    pub fn with_rest_keywords(mut self, ty: Type) -> Self {
        self.rest_keywords = Some(ty);
        self
    }

    /// Number of fixed (required + optional) positional slots.
    #[inline]
    pub fn fixed_len(&self) -> usize {
        self.required.len() + self.optional.len()
    }

    /// Fixed positional slots in call order, tagged with their kind.
    pub fn flat_unnamed_params(&self) -> impl Iterator<Item = (ParamKind, &Type)> {
        self.required
            .iter()
            .map(|ty| (ParamKind::Required, ty))
            .chain(self.optional.iter().map(|ty| (ParamKind::Optional, ty)))
    }

    /// Required and optional keywords merged into one map.
    pub fn flat_keywords(&self) -> BTreeMap<Atom, &Type> {
        let mut keywords: BTreeMap<Atom, &Type> = self.optional_keywords.iter().map(|(k, t)| (*k, t)).collect();
        keywords.extend(self.required_keywords.iter().map(|(k, t)| (*k, t)));
        keywords
    }

    /// Every type mentioned by this parameter list.
    pub fn types(&self) -> impl Iterator<Item = &Type> {
        self.required
            .iter()
            .chain(&self.optional)
            .chain(&self.rest)
            .chain(self.required_keywords.values())
            .chain(self.optional_keywords.values())
            .chain(&self.rest_keywords)
    }

    pub fn collect_free_variables(&self, out: &mut FxHashSet<TypeVar>) {
        for ty in self.types() {
            ty.collect_free_variables(out);
        }
    }

    pub fn free_variables(&self) -> FxHashSet<TypeVar> {
        let mut out = FxHashSet::default();
        self.collect_free_variables(&mut out);
        out
    }

    pub fn subst(&self, s: &Substitution) -> Params {
        self.map_type(&mut |ty| ty.subst(s))
    }

    /// Rebuild the parameter list with `f` applied to every slot type.
    pub fn map_type(&self, f: &mut impl FnMut(&Type) -> Type) -> Params {
        Params {
            required: self.required.iter().map(&mut *f).collect(),
            optional: self.optional.iter().map(&mut *f).collect(),
            rest: self.rest.as_ref().map(&mut *f),
            required_keywords: self.required_keywords.iter().map(|(k, t)| (*k, f(t))).collect(),
            optional_keywords: self.optional_keywords.iter().map(|(k, t)| (*k, f(t))).collect(),
            rest_keywords: self.rest_keywords.as_ref().map(&mut *f),
        }
    }

    // =========================================================================
    // Combinators
    // =========================================================================

    /// Parameters accepting every call either `self` or `other` accepts.
    ///
    /// Slot types are unioned. A slot that only one side requires becomes
    /// optional in the result.
    pub fn union(&self, other: &Params) -> Params {
        let mut out = PositionalBuilder::default();
        let mut a = Cursor::new(self);
        let mut b = Cursor::new(other);

        loop {
            match (a.first(), b.first()) {
                (Some(Slot::Required(x)), Some(Slot::Required(y))) => {
                    out.push(SlotKind::Required, union2(x, y));
                    a.drop_first();
                    b.drop_first();
                }
                (
                    Some(Slot::Required(x) | Slot::Optional(x)),
                    Some(Slot::Required(y) | Slot::Optional(y)),
                ) => {
                    out.push(SlotKind::Optional, union2(x, y));
                    a.drop_first();
                    b.drop_first();
                }
                (Some(Slot::Required(x) | Slot::Optional(x)), Some(Slot::Rest(y))) => {
                    out.push(SlotKind::Optional, union2(x, y));
                    a.drop_first();
                }
                (Some(Slot::Required(x) | Slot::Optional(x)), None) => {
                    out.push(SlotKind::Optional, x.clone());
                    a.drop_first();
                }
                (Some(Slot::Rest(x)), Some(Slot::Required(y) | Slot::Optional(y))) => {
                    out.push(SlotKind::Optional, union2(x, y));
                    b.drop_first();
                }
                (Some(Slot::Rest(x)), Some(Slot::Rest(y))) => {
                    out.push(SlotKind::Rest, union2(x, y));
                    a.drop_first();
                    b.drop_first();
                }
                (Some(Slot::Rest(x)), None) => {
                    out.push(SlotKind::Rest, x.clone());
                    a.drop_first();
                }
                (None, Some(Slot::Required(y) | Slot::Optional(y))) => {
                    out.push(SlotKind::Optional, y.clone());
                    b.drop_first();
                }
                (None, Some(Slot::Rest(y))) => {
                    out.push(SlotKind::Rest, y.clone());
                    b.drop_first();
                }
                (None, None) => break,
            }
        }

        let mut required_keywords = BTreeMap::new();
        for (name, ty) in &self.required_keywords {
            if let Some(other_ty) = other.required_keywords.get(name) {
                required_keywords.insert(*name, union2(ty, other_ty));
            }
        }

        let mut optional_keywords = BTreeMap::new();
        for (this, that) in [(self, other), (other, self)] {
            for (name, ty) in this.required_keywords.iter().chain(&this.optional_keywords) {
                if required_keywords.contains_key(name) || optional_keywords.contains_key(name) {
                    continue;
                }
                let merged = match that.keyword_type(*name) {
                    Some(other_ty) => union2(ty, other_ty),
                    None => ty.clone(),
                };
                optional_keywords.insert(*name, merged);
            }
        }

        let rest_keywords = match (&self.rest_keywords, &other.rest_keywords) {
            (Some(x), Some(y)) => Some(union2(x, y)),
            (x, y) => x.clone().or_else(|| y.clone()),
        };

        out.finish(required_keywords, optional_keywords, rest_keywords)
    }

    /// Parameters accepting only the calls both `self` and `other` accept.
    ///
    /// Slot types are intersected. Returns `None` when one side requires a
    /// positional or keyword argument the other side can never take.
    pub fn intersection(&self, other: &Params) -> Option<Params> {
        let mut out = PositionalBuilder::default();
        let mut a = Cursor::new(self);
        let mut b = Cursor::new(other);

        loop {
            match (a.first(), b.first()) {
                (
                    Some(Slot::Required(x)),
                    Some(Slot::Required(y) | Slot::Optional(y)),
                )
                | (Some(Slot::Optional(x)), Some(Slot::Required(y))) => {
                    out.push(SlotKind::Required, intersection2(x, y));
                    a.drop_first();
                    b.drop_first();
                }
                (Some(Slot::Required(x)), Some(Slot::Rest(y))) => {
                    out.push(SlotKind::Required, intersection2(x, y));
                    a.drop_first();
                }
                (Some(Slot::Optional(x)), Some(Slot::Optional(y))) => {
                    out.push(SlotKind::Optional, intersection2(x, y));
                    a.drop_first();
                    b.drop_first();
                }
                (Some(Slot::Optional(x)), Some(Slot::Rest(y))) => {
                    out.push(SlotKind::Optional, intersection2(x, y));
                    a.drop_first();
                }
                (Some(Slot::Rest(x)), Some(Slot::Required(y))) => {
                    out.push(SlotKind::Required, intersection2(x, y));
                    b.drop_first();
                }
                (Some(Slot::Rest(x)), Some(Slot::Optional(y))) => {
                    out.push(SlotKind::Optional, intersection2(x, y));
                    b.drop_first();
                }
                (Some(Slot::Rest(x)), Some(Slot::Rest(y))) => {
                    out.push(SlotKind::Rest, intersection2(x, y));
                    a.drop_first();
                    b.drop_first();
                }
                (Some(Slot::Required(_)), None) | (None, Some(Slot::Required(_))) => return None,
                (Some(Slot::Optional(_) | Slot::Rest(_)), None) => a.drop_first(),
                (None, Some(Slot::Optional(_) | Slot::Rest(_))) => b.drop_first(),
                (None, None) => break,
            }
        }

        let mut optional_keywords = BTreeMap::new();
        for (this, that) in [(self, other), (other, self)] {
            for (name, ty) in &this.optional_keywords {
                if optional_keywords.contains_key(name) {
                    continue;
                }
                let merged = match (that.optional_keywords.get(name), &that.rest_keywords) {
                    (Some(other_ty), _) | (None, Some(other_ty)) => intersection2(ty, other_ty),
                    (None, None) => continue,
                };
                optional_keywords.insert(*name, merged);
            }
        }

        let mut required_keywords = BTreeMap::new();
        for (this, that) in [(self, other), (other, self)] {
            for (name, ty) in &this.required_keywords {
                if required_keywords.contains_key(name) {
                    continue;
                }
                let other_ty = that.keyword_type(*name)?;
                required_keywords.insert(*name, intersection2(ty, other_ty));
            }
        }
        optional_keywords.retain(|name, _| !required_keywords.contains_key(name));

        let rest_keywords = match (&self.rest_keywords, &other.rest_keywords) {
            (Some(x), Some(y)) => Some(intersection2(x, y)),
            _ => None,
        };

        Some(out.finish(required_keywords, optional_keywords, rest_keywords))
    }

    /// The type a call may pass for keyword `name`, looking at required,
    /// optional and rest keywords in that order.
    fn keyword_type(&self, name: Atom) -> Option<&Type> {
        self.required_keywords
            .get(&name)
            .or_else(|| self.optional_keywords.get(&name))
            .or(self.rest_keywords.as_ref())
    }
}

fn union2(a: &Type, b: &Type) -> Type {
    Type::union([a.clone(), b.clone()])
}

fn intersection2(a: &Type, b: &Type) -> Type {
    Type::intersection([a.clone(), b.clone()])
}

// =============================================================================
// Positional walking helpers
// =============================================================================

#[derive(Clone, Copy)]
enum Slot<'a> {
    Required(&'a Type),
    Optional(&'a Type),
    Rest(&'a Type),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum SlotKind {
    Required,
    Optional,
    Rest,
}

/// Position in a parameter list's positional slots; the rest slot counts as
/// the last position.
struct Cursor<'a> {
    params: &'a Params,
    index: usize,
}

impl<'a> Cursor<'a> {
    fn new(params: &'a Params) -> Self {
        Self { params, index: 0 }
    }

    fn first(&self) -> Option<Slot<'a>> {
        let required = self.params.required.len();
        let fixed = self.params.fixed_len();
        if self.index < required {
            self.params.required.get(self.index).map(Slot::Required)
        } else if self.index < fixed {
            self.params.optional.get(self.index - required).map(Slot::Optional)
        } else if self.index == fixed {
            self.params.rest.as_ref().map(Slot::Rest)
        } else {
            None
        }
    }

    fn drop_first(&mut self) {
        self.index += 1;
    }
}

#[derive(Default)]
struct PositionalBuilder {
    required: Vec<Type>,
    optional: Vec<Type>,
    rest: Option<Type>,
}

impl PositionalBuilder {
    fn push(&mut self, kind: SlotKind, ty: Type) {
        match kind {
            SlotKind::Required => {
                debug_assert!(self.optional.is_empty() && self.rest.is_none());
                self.required.push(ty);
            }
            SlotKind::Optional => {
                debug_assert!(self.rest.is_none());
                self.optional.push(ty);
            }
            SlotKind::Rest => self.rest = Some(ty),
        }
    }

    fn finish(
        self,
        required_keywords: BTreeMap<Atom, Type>,
        optional_keywords: BTreeMap<Atom, Type>,
        rest_keywords: Option<Type>,
    ) -> Params {
        Params {
            required: self.required,
            optional: self.optional,
            rest: self.rest,
            required_keywords,
            optional_keywords,
            rest_keywords,
        }
    }
}
