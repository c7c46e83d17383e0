//! Integration tests for Set.

use gradual_collections::Set;
use gradual_foundation::Value;
use gradual_types::Type;

fn ints(values: &[i64]) -> Set {
    Set::of(Type::int(), values.iter().map(|&n| Value::Int(n))).unwrap()
}

#[test]
fn membership_is_by_value_hash() {
    let set = ints(&[1, 2]);
    assert!(set.contains(&Value::Int(1)));
    assert!(!set.contains(&Value::Float(1.0)));
}

#[test]
fn duplicates_collapse_at_construction() {
    let set = ints(&[1, 1, 2, 2, 2]);
    assert_eq!(set.len(), 2);
}

#[test]
fn add_returns_whether_set_changed() {
    let mut set = Set::new(Type::string());
    assert!(set.add(Value::from("a")).unwrap());
    assert!(!set.add(Value::from("a")).unwrap());
}

#[test]
fn failed_bulk_add_leaves_set_unchanged() {
    let mut set = ints(&[1]);
    assert!(set.add_all([Value::Int(2), Value::Null]).is_err());
    assert_eq!(set.len(), 1);
    assert!(!set.contains(&Value::Int(2)));
}

#[test]
fn set_algebra_operations() {
    let mut set = ints(&[1, 2, 3, 4]);
    assert!(set.contains_all([Value::Int(1), Value::Int(4)]));
    assert!(set.retain_all([Value::Int(1), Value::Int(2), Value::Int(9)]));
    assert_eq!(set.len(), 2);
    assert!(set.remove(&Value::Int(1)));
    assert_eq!(set.len(), 1);
}

#[test]
fn predicate_removal() {
    let mut set = ints(&[1, 2, 3, 4, 5]);
    assert!(set.remove_if(|v| v.as_int().is_some_and(|n| n > 3)));
    assert_eq!(set.len(), 3);
    assert!(!set.remove_if(|v| v.as_int().is_some_and(|n| n > 3)));
}

#[test]
fn distinct_objects_are_distinct_members() {
    let mut set = Set::new(Type::object());
    let a = Value::object("Point");
    set.add(a.clone()).unwrap();
    set.add(Value::object("Point")).unwrap();
    assert_eq!(set.len(), 2);
    assert!(set.contains(&a));
}

#[test]
fn union_typed_set_accepts_both_operands() {
    let mut set = Set::new(Type::union([Type::int(), Type::string()]));
    set.add(Value::Int(1)).unwrap();
    set.add(Value::from("one")).unwrap();
    assert!(set.add(Value::Bool(true)).is_err());
    assert_eq!(set.len(), 2);
}
