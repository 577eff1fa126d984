//! Method signatures and the algebra over them.
//!
//! A [`MethodType`] is one overload: its own type parameters, a parameter
//! list, an optional block, and a return type. Three binary operators combine
//! overloads:
//!
//! - [`MethodType::unify_overload`] builds one signature that accepts every
//!   call either overload accepts (used when an implementation has to satisfy
//!   an overload set).
//! - [`MethodType::join`] is the signature of a value that may be either
//!   method: it accepts only calls both accept and may return either result.
//! - [`MethodType::meet`] is the signature of a value that is both methods.
//!
//! `join` and `meet` return `None` when the operands cannot be reconciled.

use crate::params::Params;
use crate::substitution::{FreshVarGen, Substitution};
use crate::types::{ProcType, Type, TypeVar};
use rbz_common::interner::Atom;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::borrow::Cow;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

/// Where a method signature was declared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct MethodDecl {
    pub owner: Atom,
    pub name: Atom,
}

impl MethodDecl {
    pub const fn new(owner: Atom, name: Atom) -> Self {
        Self { owner, name }
    }
}

// =============================================================================
// Block
// =============================================================================

/// A block (callback) accepted by a method.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Block {
    pub ty: ProcType,
    pub optional: bool,
}

impl Block {
    pub fn new(params: Params, return_type: Type) -> Self {
        Self {
            ty: ProcType::new(params, return_type),
            optional: false,
        }
    }

    pub fn optional(params: Params, return_type: Type) -> Self {
        Self::new(params, return_type).to_optional()
    }

    #[inline]
    pub fn params(&self) -> &Params {
        &self.ty.params
    }

    #[inline]
    pub fn return_type(&self) -> &Type {
        &self.ty.return_type
    }

    pub fn to_optional(&self) -> Block {
        Block {
            ty: self.ty.clone(),
            optional: true,
        }
    }

    pub fn subst(&self, s: &Substitution) -> Block {
        Block {
            ty: self.ty.subst(s),
            optional: self.optional,
        }
    }

    pub fn free_variables(&self) -> FxHashSet<TypeVar> {
        let mut out = FxHashSet::default();
        self.ty.collect_free_variables(&mut out);
        out
    }

    pub fn map_type(&self, f: &mut impl FnMut(&Type) -> Type) -> Block {
        Block {
            ty: self.ty.map_type(f),
            optional: self.optional,
        }
    }

    /// A block accepting what either block accepts and returning either
    /// result. Optional if either is.
    pub fn combine(&self, other: &Block) -> Block {
        Block {
            ty: ProcType::new(
                self.params().union(other.params()),
                Type::union([self.return_type().clone(), other.return_type().clone()]),
            ),
            optional: self.optional || other.optional,
        }
    }
}

// =============================================================================
// MethodType
// =============================================================================

/// One overload of a method.
///
/// Equality and hashing ignore provenance: two overloads declared in
/// different places with the same shape are the same signature.
#[derive(Clone, Debug, Serialize)]
pub struct MethodType {
    type_params: Vec<TypeVar>,
    params: Params,
    block: Option<Block>,
    return_type: Type,
    method_decls: Vec<MethodDecl>,
    #[serde(skip)]
    free_vars: OnceLock<FxHashSet<TypeVar>>,
}

impl PartialEq for MethodType {
    fn eq(&self, other: &Self) -> bool {
        self.type_params == other.type_params
            && self.params == other.params
            && self.block == other.block
            && self.return_type == other.return_type
    }
}

impl Eq for MethodType {}

impl Hash for MethodType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_params.hash(state);
        self.params.hash(state);
        self.block.hash(state);
        self.return_type.hash(state);
    }
}

impl MethodType {
    pub fn new(params: Params, return_type: Type) -> Self {
        Self::from_parts(Vec::new(), params, None, return_type, Vec::new())
    }

    fn from_parts(
        type_params: Vec<TypeVar>,
        params: Params,
        block: Option<Block>,
        return_type: Type,
        method_decls: Vec<MethodDecl>,
    ) -> Self {
        Self {
            type_params,
            params,
            block,
            return_type,
            method_decls,
            free_vars: OnceLock::new(),
        }
    }

    pub fn with_type_params(self, type_params: Vec<TypeVar>) -> Self {
        Self::from_parts(type_params, self.params, self.block, self.return_type, self.method_decls)
    }

    pub fn with_params(self, params: Params) -> Self {
        Self::from_parts(self.type_params, params, self.block, self.return_type, self.method_decls)
    }

    pub fn with_block(self, block: Option<Block>) -> Self {
        Self::from_parts(self.type_params, self.params, block, self.return_type, self.method_decls)
    }

    pub fn with_return_type(self, return_type: Type) -> Self {
        Self::from_parts(self.type_params, self.params, self.block, return_type, self.method_decls)
    }

    pub fn with_method_decls(mut self, method_decls: Vec<MethodDecl>) -> Self {
        self.method_decls = method_decls;
        self
    }

    pub fn type_params(&self) -> &[TypeVar] {
        &self.type_params
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn block(&self) -> Option<&Block> {
        self.block.as_ref()
    }

    pub fn return_type(&self) -> &Type {
        &self.return_type
    }

    pub fn method_decls(&self) -> &[MethodDecl] {
        &self.method_decls
    }

    /// Free variables of params, block and return type, minus the method's
    /// own type parameters. Computed once.
    pub fn free_variables(&self) -> &FxHashSet<TypeVar> {
        self.free_vars.get_or_init(|| {
            let mut out = FxHashSet::default();
            self.params.collect_free_variables(&mut out);
            if let Some(block) = &self.block {
                block.ty.collect_free_variables(&mut out);
            }
            self.return_type.collect_free_variables(&mut out);
            for var in &self.type_params {
                out.remove(var);
            }
            out
        })
    }

    /// Apply `s`, leaving the method's own type parameters bound.
    ///
    /// Borrows `self` when `s` cannot change anything.
    pub fn subst(&self, s: &Substitution) -> Cow<'_, MethodType> {
        if s.is_empty() || s.is_disjoint(self.free_variables()) {
            return Cow::Borrowed(self);
        }
        let s = s.except(&self.type_params);
        let mut out = self.apply_body(&s);
        out.type_params = self.type_params.clone();
        Cow::Owned(out)
    }

    /// Apply `s` to the body, including the method's own type parameters, and
    /// drop the binder.
    pub fn instantiate(&self, s: &Substitution) -> MethodType {
        self.apply_body(s)
    }

    fn apply_body(&self, s: &Substitution) -> MethodType {
        Self::from_parts(
            Vec::new(),
            self.params.subst(s),
            self.block.as_ref().map(|block| block.subst(s)),
            self.return_type.subst(s),
            self.method_decls.clone(),
        )
    }

    /// Rebuild with `f` applied to every type in params, block and return.
    pub fn map_type(&self, f: &mut impl FnMut(&Type) -> Type) -> MethodType {
        Self::from_parts(
            self.type_params.clone(),
            self.params.map_type(f),
            self.block.as_ref().map(|block| block.map_type(f)),
            f(&self.return_type),
            self.method_decls.clone(),
        )
    }

    /// Every type mentioned by the signature.
    pub fn types(&self) -> impl Iterator<Item = &Type> {
        let block_types = self
            .block
            .iter()
            .flat_map(|block| block.params().types().chain(std::iter::once(block.return_type())));
        self.params
            .types()
            .chain(block_types)
            .chain(std::iter::once(&self.return_type))
    }

    // =========================================================================
    // Operators
    // =========================================================================

    /// One signature accepting the calls of both overloads.
    ///
    /// Both sides get fresh type parameters so their binders never collide.
    pub fn unify_overload(&self, other: &MethodType, fresh: &FreshVarGen) -> MethodType {
        let (s1, vars1) = Substitution::fresh(&self.type_params, fresh);
        let (s2, vars2) = Substitution::fresh(&other.type_params, fresh);
        let a = self.apply_body(&s1);
        let b = other.apply_body(&s2);

        let block = match (&a.block, &b.block) {
            (Some(x), Some(y)) => Some(x.combine(y)),
            (Some(x), None) | (None, Some(x)) => Some(x.to_optional()),
            (None, None) => None,
        };

        Self::from_parts(
            vars1.into_iter().chain(vars2).collect(),
            a.params.union(&b.params),
            block,
            Type::union([a.return_type, b.return_type]),
            concat_decls(&self.method_decls, &other.method_decls),
        )
    }

    /// Signature of a value that is either `self` or `other`.
    pub fn join(&self, other: &MethodType, fresh: &FreshVarGen) -> Option<MethodType> {
        let (type_params, other) = self.rename_common(other, fresh);

        let params = self.params.intersection(&other.params)?;
        let block = match (&self.block, &other.block) {
            (Some(x), Some(y)) => Some(Block {
                ty: ProcType::new(
                    x.params().union(y.params()),
                    Type::intersection([x.return_type().clone(), y.return_type().clone()]),
                ),
                optional: x.optional && y.optional,
            }),
            (Some(x), None) | (None, Some(x)) if x.optional => Some(x.clone()),
            (None, None) => None,
            _ => return None,
        };

        Some(Self::from_parts(
            type_params,
            params,
            block,
            Type::union([self.return_type.clone(), other.return_type.clone()]),
            concat_decls(&self.method_decls, &other.method_decls),
        ))
    }

    /// Signature of a value that is both `self` and `other`.
    pub fn meet(&self, other: &MethodType, fresh: &FreshVarGen) -> Option<MethodType> {
        let (type_params, other) = self.rename_common(other, fresh);

        let params = self.params.union(&other.params);
        let block = match (&self.block, &other.block) {
            (Some(x), Some(y)) => Some(Block {
                ty: ProcType::new(
                    x.params().intersection(y.params())?,
                    Type::union([x.return_type().clone(), y.return_type().clone()]),
                ),
                optional: x.optional || y.optional,
            }),
            (Some(x), None) | (None, Some(x)) => Some(x.clone()),
            (None, None) => None,
        };

        Some(Self::from_parts(
            type_params,
            params,
            block,
            Type::intersection([self.return_type.clone(), other.return_type.clone()]),
            concat_decls(&self.method_decls, &other.method_decls),
        ))
    }

    /// Rename the type parameters `other` shares with `self`.
    ///
    /// Returns the combined binder (self's, then other's unshared ones, then
    /// the fresh replacements) and the renamed `other`.
    fn rename_common<'o>(
        &self,
        other: &'o MethodType,
        fresh: &FreshVarGen,
    ) -> (Vec<TypeVar>, Cow<'o, MethodType>) {
        let (common, unshared): (Vec<TypeVar>, Vec<TypeVar>) = other
            .type_params
            .iter()
            .copied()
            .partition(|var| self.type_params.contains(var));

        let mut type_params = self.type_params.clone();
        type_params.extend(unshared);

        if common.is_empty() {
            return (type_params, Cow::Borrowed(other));
        }

        let (s, fresh_vars) = Substitution::fresh(&common, fresh);
        type_params.extend(fresh_vars);
        (type_params, Cow::Owned(other.apply_body(&s)))
    }
}

fn concat_decls(a: &[MethodDecl], b: &[MethodDecl]) -> Vec<MethodDecl> {
    a.iter().chain(b).copied().collect()
}
