//! Type expressions.
//!
//! `Type` is a closed sum over every shape the checker understands. Equality
//! and hashing are structural, so two constraints built from identical types
//! always land on the same memo-table entry no matter how they were built.

use crate::params::Params;
use crate::substitution::Substitution;
use rbz_common::interner::Atom;
use rustc_hash::FxHashSet;
use serde::Serialize;

// =============================================================================
// Type variables
// =============================================================================

/// A type variable.
///
/// Declared variables (the `T` in `def map: [T] ...`) carry `id == 0`.
/// Variables minted by [`FreshVarGen`](crate::FreshVarGen) keep the declared
/// name for readability and get a session-unique positive `id`, so two fresh
/// copies of `T` are never confused with each other or with the declared variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeVar {
    pub name: Atom,
    pub id: u32,
}

impl TypeVar {
    /// A declared (non-fresh) variable.
    pub const fn new(name: Atom) -> Self {
        Self { name, id: 0 }
    }

    #[inline]
    pub const fn is_fresh(self) -> bool {
        self.id != 0
    }
}

// =============================================================================
// Nominal references
// =============================================================================

/// Which projection of a nominal name a reference denotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum NameKind {
    /// Instances of a class or module (`String`, `Array[Integer]`).
    Instance,
    /// The singleton class object (`singleton(String)`).
    Class,
    /// The module object (`singleton(Kernel)`).
    Module,
    /// A structural interface (`_Each[T]`).
    Interface,
}

/// A nominal type reference with its type arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct NameType {
    pub name: Atom,
    pub kind: NameKind,
    pub args: Vec<Type>,
}

impl NameType {
    pub fn new(name: Atom, kind: NameKind, args: Vec<Type>) -> Self {
        Self { name, kind, args }
    }

    /// The instance projection of this name, keeping its arguments.
    pub fn instance_type(&self) -> Type {
        Type::Name(NameType::new(self.name, NameKind::Instance, self.args.clone()))
    }

    /// The singleton class projection of this name.
    pub fn class_type(&self) -> Type {
        Type::Name(NameType::new(self.name, NameKind::Class, Vec::new()))
    }

    /// The module object projection of this name.
    pub fn module_type(&self) -> Type {
        Type::Name(NameType::new(self.name, NameKind::Module, Vec::new()))
    }
}

// =============================================================================
// Callable shapes
// =============================================================================

/// A callable shape: parameters and a return type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ProcType {
    pub params: Params,
    pub return_type: Type,
}

impl ProcType {
    pub fn new(params: Params, return_type: Type) -> Self {
        Self {
            params,
            return_type,
        }
    }

    pub fn subst(&self, s: &Substitution) -> ProcType {
        ProcType::new(self.params.subst(s), self.return_type.subst(s))
    }

    pub fn collect_free_variables(&self, out: &mut FxHashSet<TypeVar>) {
        self.params.collect_free_variables(out);
        self.return_type.collect_free_variables(out);
    }

    pub fn map_type(&self, f: &mut impl FnMut(&Type) -> Type) -> ProcType {
        ProcType::new(self.params.map_type(f), f(&self.return_type))
    }
}

// =============================================================================
// Type
// =============================================================================

/// A type expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Type {
    /// The gradual top type; related to everything in both directions.
    Any,
    Void,
    Nil,
    Bool,
    /// `self` inside an interface template.
    SelfType,
    /// `instance` inside an interface template.
    Instance,
    /// `class` inside an interface template.
    Class,
    Var(TypeVar),
    Name(NameType),
    Union(Vec<Type>),
    Intersection(Vec<Type>),
    Proc(Box<ProcType>),
}

impl Type {
    pub fn var(name: Atom) -> Type {
        Type::Var(TypeVar::new(name))
    }

    pub fn instance(name: Atom, args: Vec<Type>) -> Type {
        Type::Name(NameType::new(name, NameKind::Instance, args))
    }

    pub fn interface(name: Atom, args: Vec<Type>) -> Type {
        Type::Name(NameType::new(name, NameKind::Interface, args))
    }

    pub fn class(name: Atom) -> Type {
        Type::Name(NameType::new(name, NameKind::Class, Vec::new()))
    }

    pub fn module(name: Atom) -> Type {
        Type::Name(NameType::new(name, NameKind::Module, Vec::new()))
    }

    pub fn proc(params: Params, return_type: Type) -> Type {
        Type::Proc(Box::new(ProcType::new(params, return_type)))
    }

    /// Build a union, flattening nested unions and dropping duplicates.
    ///
    /// A single surviving member is returned as-is and `Any` absorbs the whole
    /// union.
    pub fn union(types: impl IntoIterator<Item = Type>) -> Type {
        let mut members = Vec::new();
        for ty in types {
            match ty {
                Type::Union(inner) => {
                    for member in inner {
                        push_unique(&mut members, member);
                    }
                }
                other => push_unique(&mut members, other),
            }
        }
        if members.contains(&Type::Any) {
            return Type::Any;
        }
        if members.len() == 1 {
            return members.remove(0);
        }
        Type::Union(members)
    }

    /// Build an intersection with the same normalization as [`Type::union`].
    pub fn intersection(types: impl IntoIterator<Item = Type>) -> Type {
        let mut members = Vec::new();
        for ty in types {
            match ty {
                Type::Intersection(inner) => {
                    for member in inner {
                        push_unique(&mut members, member);
                    }
                }
                other => push_unique(&mut members, other),
            }
        }
        if members.contains(&Type::Any) {
            return Type::Any;
        }
        if members.len() == 1 {
            return members.remove(0);
        }
        Type::Intersection(members)
    }

    #[inline]
    pub fn is_var(&self) -> bool {
        matches!(self, Type::Var(_))
    }

    pub fn free_variables(&self) -> FxHashSet<TypeVar> {
        let mut out = FxHashSet::default();
        self.collect_free_variables(&mut out);
        out
    }

    pub fn collect_free_variables(&self, out: &mut FxHashSet<TypeVar>) {
        match self {
            Type::Var(var) => {
                out.insert(*var);
            }
            Type::Name(name) => {
                for arg in &name.args {
                    arg.collect_free_variables(out);
                }
            }
            Type::Union(members) | Type::Intersection(members) => {
                for member in members {
                    member.collect_free_variables(out);
                }
            }
            Type::Proc(proc) => proc.collect_free_variables(out),
            Type::Any
            | Type::Void
            | Type::Nil
            | Type::Bool
            | Type::SelfType
            | Type::Instance
            | Type::Class => {}
        }
    }

    /// Rebuild with `f` applied to each direct child type.
    ///
    /// Leaves are returned unchanged; `f` decides whether to recurse.
    pub fn map_type(&self, f: &mut impl FnMut(&Type) -> Type) -> Type {
        match self {
            Type::Name(name) => Type::Name(NameType::new(
                name.name,
                name.kind,
                name.args.iter().map(&mut *f).collect(),
            )),
            Type::Union(members) => Type::union(members.iter().map(&mut *f)),
            Type::Intersection(members) => Type::intersection(members.iter().map(&mut *f)),
            Type::Proc(proc) => Type::Proc(Box::new(proc.map_type(f))),
            _ => self.clone(),
        }
    }

    /// Apply a substitution.
    ///
    /// Unions and intersections are rebuilt through their constructors so a
    /// substitution that makes two members equal collapses them.
    pub fn subst(&self, s: &Substitution) -> Type {
        match self {
            Type::Var(var) => s.get(*var).cloned().unwrap_or_else(|| self.clone()),
            Type::SelfType => s.self_type().cloned().unwrap_or(Type::SelfType),
            Type::Instance => s.instance_type().cloned().unwrap_or(Type::Instance),
            Type::Class => s.module_type().cloned().unwrap_or(Type::Class),
            Type::Name(name) => Type::Name(NameType::new(
                name.name,
                name.kind,
                name.args.iter().map(|arg| arg.subst(s)).collect(),
            )),
            Type::Union(members) => Type::union(members.iter().map(|m| m.subst(s))),
            Type::Intersection(members) => {
                Type::intersection(members.iter().map(|m| m.subst(s)))
            }
            Type::Proc(proc) => Type::Proc(Box::new(proc.subst(s))),
            Type::Any | Type::Void | Type::Nil | Type::Bool => self.clone(),
        }
    }
}

fn push_unique(members: &mut Vec<Type>, ty: Type) {
    if !members.contains(&ty) {
        members.push(ty);
    }
}
