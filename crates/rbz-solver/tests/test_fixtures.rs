//! Shared setup for solver tests.
//!
//! `Fixture` bundles an interner, an interface store and a fresh-variable
//! generator, and knows how to register small class and interface
//! definitions by name.

use super::*;

pub(crate) struct Fixture {
    pub(crate) interner: Interner,
    pub(crate) store: InterfaceStore,
    pub(crate) fresh: FreshVarGen,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        let mut interner = Interner::new();
        interner.intern_common();
        Self {
            interner,
            store: InterfaceStore::new(),
            fresh: FreshVarGen::new(),
        }
    }

    pub(crate) fn atom(&mut self, s: &str) -> Atom {
        self.interner.intern(s)
    }

    pub(crate) fn instance(&mut self, name: &str) -> Type {
        Type::instance(self.atom(name), Vec::new())
    }

    pub(crate) fn interface(&mut self, name: &str, args: Vec<Type>) -> Type {
        Type::interface(self.atom(name), args)
    }

    pub(crate) fn var(&mut self, name: &str) -> Type {
        Type::var(self.atom(name))
    }

    /// Register a class whose instances have `methods`.
    pub(crate) fn define_class(&mut self, name: &str, methods: Vec<(&str, Vec<MethodType>)>) {
        let name = self.atom(name);
        let template = self.template(name, &[], methods);
        self.store.declare_class(name);
        self.store.register(NameKind::Instance, template);
    }

    /// Register a structural interface with type parameters.
    pub(crate) fn define_interface(
        &mut self,
        name: &str,
        type_params: &[&str],
        methods: Vec<(&str, Vec<MethodType>)>,
    ) {
        let name = self.atom(name);
        let template = self.template(name, type_params, methods);
        self.store.register(NameKind::Interface, template);
    }

    fn template(
        &mut self,
        name: Atom,
        type_params: &[&str],
        methods: Vec<(&str, Vec<MethodType>)>,
    ) -> InterfaceTemplate {
        let type_params = type_params
            .iter()
            .map(|param| TypeVar::new(self.interner.intern(param)))
            .collect();
        let mut template = InterfaceTemplate::new(name, type_params);
        for (method, overloads) in methods {
            let method = self.atom(method);
            template = template.with_method(method, overloads);
        }
        template
    }

    pub(crate) fn checker(&self) -> SubtypeChecker<'_, InterfaceStore> {
        SubtypeChecker::new(&self.store, &self.fresh)
    }

    /// `Numeric`, `Integer` and `String` with a handful of methods each.
    ///
    /// `Integer` and `String` are both structurally `Numeric`; neither is a
    /// subtype of the other.
    pub(crate) fn numeric_tower() -> Self {
        let mut fx = Self::new();
        let string = fx.instance("String");
        let integer = fx.instance("Integer");

        fx.define_class("Numeric", vec![("to_s", vec![thunk(string.clone())])]);
        fx.define_class(
            "Integer",
            vec![
                ("to_s", vec![thunk(string.clone())]),
                ("succ", vec![thunk(integer)]),
            ],
        );
        fx.define_class(
            "String",
            vec![
                ("to_s", vec![thunk(string.clone())]),
                ("upcase", vec![thunk(string)]),
            ],
        );
        fx
    }
}

/// `() -> ret`
pub(crate) fn thunk(ret: Type) -> MethodType {
    MethodType::new(Params::empty(), ret)
}

/// `(arg) -> ret`
pub(crate) fn unary(arg: Type, ret: Type) -> MethodType {
    MethodType::new(Params::empty().with_required(arg), ret)
}
