//! Type-variable substitution and fresh variable generation.

use crate::types::{Type, TypeVar};
use rbz_common::interner::Atom;
use rustc_hash::{FxHashMap, FxHashSet};
use std::borrow::Cow;
use std::cell::Cell;

// =============================================================================
// FreshVarGen
// =============================================================================

/// Monotonic source of fresh type variables for one checking session.
///
/// The generator is created by whoever owns the session and handed by
/// reference to the checker and to every signature combinator, so all fresh
/// variables of a session come from one counter and never collide.
#[derive(Debug)]
pub struct FreshVarGen {
    next: Cell<u32>,
}

impl Default for FreshVarGen {
    fn default() -> Self {
        Self::new()
    }
}

impl FreshVarGen {
    pub fn new() -> Self {
        Self { next: Cell::new(1) }
    }

    /// Mint a fresh variable that keeps `name` for readability.
    pub fn fresh(&self, name: Atom) -> TypeVar {
        let id = self.next.get();
        self.next.set(id + 1);
        TypeVar { name, id }
    }

    /// Number of variables handed out so far.
    pub fn issued(&self) -> u32 {
        self.next.get() - 1
    }
}

// =============================================================================
// Substitution
// =============================================================================

/// Mapping from type variables to replacement types.
///
/// Besides the variable dictionary a substitution may replace the `self`,
/// `instance` and `class` placeholders that interface templates use; those
/// are filled in when a template is instantiated for a concrete name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Substitution {
    dictionary: FxHashMap<TypeVar, Type>,
    self_type: Option<Type>,
    instance_type: Option<Type>,
    module_type: Option<Type>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair `vars` with `types` position by position.
    ///
    /// Extra entries on either side are ignored.
    pub fn build(vars: &[TypeVar], types: impl IntoIterator<Item = Type>) -> Self {
        let dictionary = vars.iter().copied().zip(types).collect();
        Self {
            dictionary,
            ..Self::default()
        }
    }

    /// Map every variable in `vars` to a fresh variable of the same name.
    ///
    /// Returns the substitution together with the fresh variables, in the
    /// order of `vars`.
    pub fn fresh(vars: &[TypeVar], fresh: &FreshVarGen) -> (Self, Vec<TypeVar>) {
        let fresh_vars: Vec<TypeVar> = vars.iter().map(|var| fresh.fresh(var.name)).collect();
        let subst = Self::build(vars, fresh_vars.iter().map(|var| Type::Var(*var)));
        (subst, fresh_vars)
    }

    pub fn with_self_type(mut self, ty: Type) -> Self {
        self.self_type = Some(ty);
        self
    }

    pub fn with_instance_type(mut self, ty: Type) -> Self {
        self.instance_type = Some(ty);
        self
    }

    pub fn with_module_type(mut self, ty: Option<Type>) -> Self {
        self.module_type = ty;
        self
    }

    pub fn insert(&mut self, var: TypeVar, ty: Type) {
        self.dictionary.insert(var, ty);
    }

    #[inline]
    pub fn get(&self, var: TypeVar) -> Option<&Type> {
        self.dictionary.get(&var)
    }

    pub fn self_type(&self) -> Option<&Type> {
        self.self_type.as_ref()
    }

    pub fn instance_type(&self) -> Option<&Type> {
        self.instance_type.as_ref()
    }

    pub fn module_type(&self) -> Option<&Type> {
        self.module_type.as_ref()
    }

    /// The variables this substitution replaces.
    pub fn domain(&self) -> impl Iterator<Item = TypeVar> + '_ {
        self.dictionary.keys().copied()
    }

    #[inline]
    fn has_placeholders(&self) -> bool {
        self.self_type.is_some() || self.instance_type.is_some() || self.module_type.is_some()
    }

    /// True when applying this substitution can never change a type.
    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty() && !self.has_placeholders()
    }

    /// True when applying this substitution to something whose free
    /// variables are `vars` can never change it.
    ///
    /// Placeholder replacements are not tracked as variables, so a
    /// substitution carrying any of them is never considered disjoint.
    pub fn is_disjoint(&self, vars: &FxHashSet<TypeVar>) -> bool {
        !self.has_placeholders() && self.dictionary.keys().all(|var| !vars.contains(var))
    }

    /// Remove `vars` from the domain.
    ///
    /// Used when a binder (a method's own type parameters) shadows an outer
    /// substitution of the same variables.
    pub fn except(&self, vars: &[TypeVar]) -> Cow<'_, Substitution> {
        if !vars.iter().any(|var| self.dictionary.contains_key(var)) {
            return Cow::Borrowed(self);
        }
        let mut restricted = self.clone();
        for var in vars {
            restricted.dictionary.remove(var);
        }
        Cow::Owned(restricted)
    }
}
