//! In-memory interface builder.
//!
//! `InterfaceStore` holds pre-built templates keyed by `(name, kind)`. It is
//! what tests and embedders without a signature loader hand to the checker.

use crate::interface::{BuildError, InterfaceBuilder, InterfaceTemplate};
use crate::types::NameKind;
use dashmap::{DashMap, DashSet};
use rbz_common::interner::Atom;
use std::sync::Arc;
use tracing::trace;

#[derive(Debug, Default)]
pub struct InterfaceStore {
    templates: DashMap<(Atom, NameKind), Arc<InterfaceTemplate>>,
    classes: DashSet<Atom>,
    modules: DashSet<Atom>,
}

impl InterfaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the template for `kind` projection of its name, replacing any
    /// previous one.
    pub fn register(&self, kind: NameKind, template: InterfaceTemplate) {
        trace!(
            name = template.name.index(),
            ?kind,
            methods = template.methods.len(),
            "InterfaceStore::register"
        );
        self.templates.insert((template.name, kind), Arc::new(template));
    }

    pub fn declare_class(&self, name: Atom) {
        trace!(name = name.index(), "InterfaceStore::declare_class");
        self.classes.insert(name);
    }

    pub fn declare_module(&self, name: Atom) {
        trace!(name = name.index(), "InterfaceStore::declare_module");
        self.modules.insert(name);
    }

    pub fn contains(&self, name: Atom, kind: NameKind) -> bool {
        self.templates.contains_key(&(name, kind))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl InterfaceBuilder for InterfaceStore {
    fn build(&self, name: Atom, kind: NameKind) -> Result<Arc<InterfaceTemplate>, BuildError> {
        self.templates
            .get(&(name, kind))
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(BuildError::UnknownName { name, kind })
    }

    fn is_class(&self, name: Atom) -> bool {
        self.classes.contains(&name)
    }

    fn is_module(&self, name: Atom) -> bool {
        self.modules.contains(&name)
    }
}
