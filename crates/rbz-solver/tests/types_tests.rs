//! Tests for type expressions, substitution and fresh variables.

use super::*;
use crate::test_fixtures::Fixture;
use std::borrow::Cow;

// =============================================================================
// Union / Intersection Construction Tests
// =============================================================================

#[test]
fn test_union_flattens_and_dedupes() {
    let mut fx = Fixture::new();
    let integer = fx.instance("Integer");
    let string = fx.instance("String");

    let inner = Type::union([integer.clone(), string.clone()]);
    let outer = Type::union([inner, integer.clone(), Type::Nil]);

    assert_eq!(outer, Type::Union(vec![integer, string, Type::Nil]));
}

#[test]
fn test_union_singleton_collapses() {
    let mut fx = Fixture::new();
    let integer = fx.instance("Integer");

    assert_eq!(Type::union([integer.clone(), integer.clone()]), integer);
    assert_eq!(Type::intersection([integer.clone()]), integer);
}

#[test]
fn test_any_absorbs_union() {
    let mut fx = Fixture::new();
    let integer = fx.instance("Integer");

    assert_eq!(Type::union([integer, Type::Any]), Type::Any);
}

#[test]
fn test_empty_union_stays_empty() {
    assert_eq!(Type::union(Vec::new()), Type::Union(Vec::new()));
}

// =============================================================================
// Free Variable Tests
// =============================================================================

#[test]
fn test_free_variables_walk_nested_types() {
    let mut fx = Fixture::new();
    let t = fx.atom("T");
    let u = fx.atom("U");
    let array = fx.atom("Array");

    let ty = Type::union([
        Type::instance(array, vec![Type::var(t)]),
        Type::proc(Params::empty().with_required(Type::var(u)), Type::Nil),
    ]);

    let vars = ty.free_variables();
    assert_eq!(vars.len(), 2);
    assert!(vars.contains(&TypeVar::new(t)));
    assert!(vars.contains(&TypeVar::new(u)));
}

// =============================================================================
// Substitution Tests
// =============================================================================

#[test]
fn test_subst_replaces_variables_and_recollapses_unions() {
    let mut fx = Fixture::new();
    let t = fx.atom("T");
    let integer = fx.instance("Integer");

    let ty = Type::union([Type::var(t), integer.clone()]);
    let s = Substitution::build(&[TypeVar::new(t)], [integer.clone()]);

    assert_eq!(ty.subst(&s), integer);
}

#[test]
fn test_subst_replaces_placeholders() {
    let mut fx = Fixture::new();
    let integer = fx.instance("Integer");
    let integer_class = Type::class(fx.atom("Integer"));

    let s = Substitution::new()
        .with_self_type(integer.clone())
        .with_instance_type(integer.clone())
        .with_module_type(Some(integer_class.clone()));

    assert_eq!(Type::SelfType.subst(&s), integer);
    assert_eq!(Type::Instance.subst(&s), integer);
    assert_eq!(Type::Class.subst(&s), integer_class);
    assert_eq!(Type::Bool.subst(&s), Type::Bool);
}

#[test]
fn test_build_ignores_extra_entries() {
    let mut fx = Fixture::new();
    let t = TypeVar::new(fx.atom("T"));
    let integer = fx.instance("Integer");
    let string = fx.instance("String");

    let s = Substitution::build(&[t], [integer.clone(), string]);
    assert_eq!(s.domain().count(), 1);
    assert_eq!(s.get(t), Some(&integer));
}

#[test]
fn test_except_borrows_when_nothing_removed() {
    let mut fx = Fixture::new();
    let t = TypeVar::new(fx.atom("T"));
    let u = TypeVar::new(fx.atom("U"));
    let s = Substitution::build(&[t], [Type::Nil]);

    assert!(matches!(s.except(&[u]), Cow::Borrowed(_)));

    let restricted = s.except(&[t]);
    assert!(matches!(restricted, Cow::Owned(_)));
    assert_eq!(restricted.get(t), None);
}

#[test]
fn test_placeholders_are_never_disjoint() {
    let mut fx = Fixture::new();
    let t = TypeVar::new(fx.atom("T"));
    let vars: rustc_hash::FxHashSet<TypeVar> = [t].into_iter().collect();

    assert!(Substitution::new().is_disjoint(&vars));
    assert!(Substitution::new().is_empty());

    let s = Substitution::new().with_self_type(Type::Nil);
    assert!(!s.is_empty());
    assert!(!s.is_disjoint(&vars));
}

// =============================================================================
// Fresh Variable Tests
// =============================================================================

#[test]
fn test_fresh_variables_are_unique_per_session() {
    let mut fx = Fixture::new();
    let t = TypeVar::new(fx.atom("T"));

    let (first, first_vars) = Substitution::fresh(&[t], &fx.fresh);
    let (_, second_vars) = Substitution::fresh(&[t], &fx.fresh);

    assert_ne!(first_vars[0], second_vars[0]);
    assert_eq!(first_vars[0].name, t.name);
    assert!(first_vars[0].is_fresh());
    assert!(!t.is_fresh());
    assert_eq!(first.get(t), Some(&Type::Var(first_vars[0])));
    assert_eq!(fx.fresh.issued(), 2);
}

// =============================================================================
// map_type Tests
// =============================================================================

#[test]
fn test_map_type_rewrites_direct_children() {
    let mut fx = Fixture::new();
    let array = fx.atom("Array");
    let integer = fx.instance("Integer");

    let ty = Type::instance(array, vec![Type::Nil, integer.clone()]);
    let mapped = ty.map_type(&mut |child| match child {
        Type::Nil => Type::Bool,
        other => other.clone(),
    });

    assert_eq!(mapped, Type::instance(array, vec![Type::Bool, integer]));
    assert_eq!(Type::Nil.map_type(&mut |_| Type::Any), Type::Nil);
}
