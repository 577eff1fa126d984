//! Tests for parameter lists and their union / intersection combinators.

use super::*;
use crate::test_fixtures::Fixture;

fn union2(a: &Type, b: &Type) -> Type {
    Type::union([a.clone(), b.clone()])
}

fn inter2(a: &Type, b: &Type) -> Type {
    Type::intersection([a.clone(), b.clone()])
}

// =============================================================================
// Flattening Tests
// =============================================================================

#[test]
fn test_flat_unnamed_params_orders_required_first() {
    let mut fx = Fixture::new();
    let integer = fx.instance("Integer");
    let string = fx.instance("String");

    let params = Params::empty()
        .with_optional(string.clone())
        .with_required(integer.clone())
        .with_rest(Type::Nil);

    let flat: Vec<_> = params.flat_unnamed_params().collect();
    assert_eq!(
        flat,
        vec![(ParamKind::Required, &integer), (ParamKind::Optional, &string)]
    );
    assert_eq!(params.fixed_len(), 2);
}

#[test]
fn test_flat_keywords_merges_required_and_optional() {
    let mut fx = Fixture::new();
    let name = fx.atom("name");
    let size = fx.atom("size");
    let string = fx.instance("String");
    let integer = fx.instance("Integer");

    let params = Params::empty()
        .with_required_keyword(name, string.clone())
        .with_optional_keyword(size, integer.clone())
        .with_rest_keywords(Type::Any);

    let keywords = params.flat_keywords();
    assert_eq!(keywords.len(), 2);
    assert_eq!(keywords.get(&name), Some(&&string));
    assert_eq!(keywords.get(&size), Some(&&integer));
}

#[test]
fn test_types_visits_every_slot() {
    let mut fx = Fixture::new();
    let key = fx.atom("key");

    let params = Params::empty()
        .with_required(Type::Nil)
        .with_optional(Type::Bool)
        .with_rest(Type::Void)
        .with_optional_keyword(key, Type::Any)
        .with_rest_keywords(Type::Nil);

    assert_eq!(params.types().count(), 5);
}

// =============================================================================
// Union Tests
// =============================================================================

#[test]
fn test_union_of_required_slots_stays_required() {
    let mut fx = Fixture::new();
    let integer = fx.instance("Integer");
    let string = fx.instance("String");

    let a = Params::empty().with_required(integer.clone());
    let b = Params::empty().with_required(string.clone());

    let union = a.union(&b);
    assert_eq!(union.required, vec![union2(&integer, &string)]);
    assert!(union.optional.is_empty());
    assert_eq!(union.rest, None);
}

#[test]
fn test_union_with_shorter_list_makes_slot_optional() {
    let mut fx = Fixture::new();
    let integer = fx.instance("Integer");

    let a = Params::empty().with_required(integer.clone());
    let union = a.union(&Params::empty());

    assert!(union.required.is_empty());
    assert_eq!(union.optional, vec![integer]);
}

#[test]
fn test_union_folds_fixed_slot_into_rest() {
    let mut fx = Fixture::new();
    let integer = fx.instance("Integer");
    let string = fx.instance("String");

    let a = Params::empty().with_required(integer.clone());
    let b = Params::empty().with_rest(string.clone());

    let union = a.union(&b);
    assert!(union.required.is_empty());
    assert_eq!(union.optional, vec![union2(&integer, &string)]);
    assert_eq!(union.rest, Some(string));
}

#[test]
fn test_union_of_rests_is_rest() {
    let mut fx = Fixture::new();
    let integer = fx.instance("Integer");
    let string = fx.instance("String");

    let a = Params::empty().with_rest(integer.clone());
    let b = Params::empty().with_rest(string.clone());

    let union = a.union(&b);
    assert_eq!(union.fixed_len(), 0);
    assert_eq!(union.rest, Some(union2(&integer, &string)));
}

#[test]
fn test_union_keywords() {
    let mut fx = Fixture::new();
    let k1 = fx.atom("k1");
    let k2 = fx.atom("k2");
    let k3 = fx.atom("k3");
    let integer = fx.instance("Integer");
    let string = fx.instance("String");

    let a = Params::empty()
        .with_required_keyword(k1, integer.clone())
        .with_required_keyword(k2, integer.clone());
    let b = Params::empty()
        .with_required_keyword(k1, string.clone())
        .with_optional_keyword(k3, string.clone())
        .with_rest_keywords(Type::Nil);

    let union = a.union(&b);
    assert_eq!(union.required_keywords.len(), 1);
    assert_eq!(union.required_keywords.get(&k1), Some(&union2(&integer, &string)));
    // k2 is absorbed by b's rest keywords, k3 only exists on b.
    assert_eq!(union.optional_keywords.get(&k2), Some(&union2(&integer, &Type::Nil)));
    assert_eq!(union.optional_keywords.get(&k3), Some(&string));
    assert_eq!(union.rest_keywords, Some(Type::Nil));
}

// =============================================================================
// Intersection Tests
// =============================================================================

#[test]
fn test_intersection_required_meets_optional() {
    let mut fx = Fixture::new();
    let integer = fx.instance("Integer");
    let string = fx.instance("String");

    let a = Params::empty().with_required(integer.clone());
    let b = Params::empty().with_optional(string.clone());

    let Some(inter) = a.intersection(&b) else {
        panic!("Expected compatible params");
    };
    assert_eq!(inter.required, vec![inter2(&integer, &string)]);
    assert!(inter.optional.is_empty());
}

#[test]
fn test_intersection_missing_required_slot_is_none() {
    let mut fx = Fixture::new();
    let integer = fx.instance("Integer");

    let a = Params::empty().with_required(integer);
    assert_eq!(a.intersection(&Params::empty()), None);
    assert_eq!(Params::empty().intersection(&a), None);
}

#[test]
fn test_intersection_drops_unmatched_optional() {
    let mut fx = Fixture::new();
    let integer = fx.instance("Integer");

    let a = Params::empty().with_optional(integer).with_rest(Type::Nil);
    assert_eq!(a.intersection(&Params::empty()), Some(Params::empty()));
}

#[test]
fn test_intersection_rest_spreads_over_fixed_slots() {
    let mut fx = Fixture::new();
    let integer = fx.instance("Integer");
    let string = fx.instance("String");
    let symbol = fx.instance("Symbol");

    let a = Params::empty().with_rest(integer.clone());
    let b = Params::empty()
        .with_required(string.clone())
        .with_optional(symbol.clone());

    let Some(inter) = a.intersection(&b) else {
        panic!("Expected compatible params");
    };
    assert_eq!(inter.required, vec![inter2(&integer, &string)]);
    assert_eq!(inter.optional, vec![inter2(&integer, &symbol)]);
    assert_eq!(inter.rest, None);
}

#[test]
fn test_intersection_keywords_absorbed_by_rest() {
    let mut fx = Fixture::new();
    let k1 = fx.atom("k1");
    let k2 = fx.atom("k2");
    let integer = fx.instance("Integer");
    let string = fx.instance("String");

    let a = Params::empty()
        .with_required_keyword(k1, integer.clone())
        .with_optional_keyword(k2, integer.clone());
    let b = Params::empty().with_rest_keywords(string.clone());

    let Some(inter) = a.intersection(&b) else {
        panic!("Expected compatible keywords");
    };
    assert_eq!(inter.required_keywords.get(&k1), Some(&inter2(&integer, &string)));
    assert_eq!(inter.optional_keywords.get(&k2), Some(&inter2(&integer, &string)));
    assert_eq!(inter.rest_keywords, None);
}

#[test]
fn test_intersection_unknown_required_keyword_is_none() {
    let mut fx = Fixture::new();
    let k1 = fx.atom("k1");
    let integer = fx.instance("Integer");

    let a = Params::empty().with_required_keyword(k1, integer);
    assert_eq!(a.intersection(&Params::empty()), None);
}

#[test]
fn test_required_keyword_wins_over_optional() {
    let mut fx = Fixture::new();
    let k1 = fx.atom("k1");
    let integer = fx.instance("Integer");

    let a = Params::empty().with_required_keyword(k1, integer.clone());
    let b = Params::empty().with_optional_keyword(k1, integer.clone());

    let Some(inter) = a.intersection(&b) else {
        panic!("Expected compatible keywords");
    };
    assert_eq!(inter.required_keywords.get(&k1), Some(&integer));
    assert!(inter.optional_keywords.is_empty());
}
