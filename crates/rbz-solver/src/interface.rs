//! Structural interfaces and the builder seam that produces them.

use crate::method_type::MethodType;
use crate::substitution::Substitution;
use crate::types::{NameKind, Type, TypeVar};
use indexmap::IndexMap;
use rbz_common::interner::Atom;
use std::fmt;
use std::sync::Arc;

/// A method and its overloads, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Method {
    pub name: Atom,
    pub types: Vec<MethodType>,
}

impl Method {
    pub fn new(name: Atom, types: Vec<MethodType>) -> Self {
        Self { name, types }
    }
}

/// The method table of one concrete type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Interface {
    pub methods: IndexMap<Atom, Method>,
}

impl Interface {
    pub fn get(&self, name: Atom) -> Option<&Method> {
        self.methods.get(&name)
    }
}

/// A generic method table, parameterized over the type's own type
/// parameters and the `self` / `instance` / `class` placeholders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceTemplate {
    pub name: Atom,
    pub type_params: Vec<TypeVar>,
    pub methods: IndexMap<Atom, Method>,
}

impl InterfaceTemplate {
    pub fn new(name: Atom, type_params: Vec<TypeVar>) -> Self {
        Self {
            name,
            type_params,
            methods: IndexMap::new(),
        }
    }

    /// Add (or replace) a method.
    pub fn with_method(mut self, name: Atom, types: Vec<MethodType>) -> Self {
        self.methods.insert(name, Method::new(name, types));
        self
    }

    /// Produce the interface of one instantiation.
    ///
    /// `args` fill the template's type parameters position by position.
    /// Missing arguments become `Any`; extra ones are ignored.
    pub fn instantiate(
        &self,
        self_type: &Type,
        args: &[Type],
        instance_type: &Type,
        module_type: Option<&Type>,
    ) -> Interface {
        let args = args
            .iter()
            .cloned()
            .chain(std::iter::repeat(Type::Any))
            .take(self.type_params.len());
        let s = Substitution::build(&self.type_params, args)
            .with_self_type(self_type.clone())
            .with_instance_type(instance_type.clone())
            .with_module_type(module_type.cloned());

        let methods = self
            .methods
            .iter()
            .map(|(name, method)| {
                let types = method
                    .types
                    .iter()
                    .map(|ty| ty.subst(&s).into_owned())
                    .collect();
                (*name, Method::new(method.name, types))
            })
            .collect();
        Interface { methods }
    }
}

// =============================================================================
// Builder seam
// =============================================================================

/// Error produced when a nominal name cannot be expanded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    UnknownName { name: Atom, kind: NameKind },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownName { name, kind } => {
                write!(f, "no {kind:?} definition for name #{}", name.index())
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Expands nominal names into interface templates.
///
/// Caching of built templates is the implementor's concern; the checker asks
/// for a template every time it expands a name.
pub trait InterfaceBuilder {
    fn build(&self, name: Atom, kind: NameKind) -> Result<Arc<InterfaceTemplate>, BuildError>;

    /// Whether `name` is a class (its singleton is `singleton(Name)`).
    fn is_class(&self, name: Atom) -> bool;

    /// Whether `name` is a module.
    fn is_module(&self, name: Atom) -> bool;
}
