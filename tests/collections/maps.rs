//! Integration tests for Map.

use gradual_collections::Map;
use gradual_foundation::Value;
use gradual_types::Type;

fn inventory() -> Map {
    let mut map = Map::new(Type::string(), Type::int());
    map.put(Value::from("apples"), Value::Int(3)).unwrap();
    map.put(Value::from("pears"), Value::Int(5)).unwrap();
    map
}

#[test]
fn put_get_remove_cycle() {
    let mut map = inventory();
    assert_eq!(map.get(&Value::from("apples")), Some(&Value::Int(3)));
    assert_eq!(
        map.put(Value::from("apples"), Value::Int(4)).unwrap(),
        Some(Value::Int(3))
    );
    assert_eq!(map.remove(&Value::from("apples")), Some(Value::Int(4)));
    assert_eq!(map.get(&Value::from("apples")), None);
    assert_eq!(map.len(), 1);
}

#[test]
fn typed_keys_and_values_are_enforced() {
    let mut map = Map::new(Type::string(), Type::int());
    assert!(map.put(Value::Int(1), Value::Int(1)).is_err());
    assert!(map.put(Value::from("k"), Value::Null).is_err());
    assert!(map.is_empty());
}

#[test]
fn compute_upserts() {
    let mut map = inventory();
    map.compute(Value::from("apples"), |_, current| {
        current.and_then(Value::as_int).map(|n| Value::Int(n + 1))
    })
    .unwrap();
    assert_eq!(map.get(&Value::from("apples")), Some(&Value::Int(4)));
}

#[test]
fn compute_if_absent_only_fills_gaps() {
    let mut map = inventory();
    let existing = map
        .compute_if_absent(Value::from("apples"), |_| Value::Int(0))
        .unwrap();
    assert_eq!(existing, Value::Int(3));
    let fresh = map
        .compute_if_absent(Value::from("plums"), |_| Value::Int(1))
        .unwrap();
    assert_eq!(fresh, Value::Int(1));
    assert_eq!(map.len(), 3);
}

#[test]
fn compute_if_present_can_remove() {
    let mut map = inventory();
    map.compute_if_present(&Value::from("pears"), |_, _| None)
        .unwrap();
    assert!(!map.contains_key(&Value::from("pears")));
}

#[test]
fn contains_value_scans() {
    let map = inventory();
    assert!(map.contains_value(&Value::Int(5)));
    assert!(!map.contains_value(&Value::Int(99)));
}

#[test]
fn key_set_view() {
    let map = inventory();
    let keys = map.key_set();
    assert_eq!(keys.len(), 2);
    assert!(keys.contains(&Value::from("apples")));
    assert_eq!(keys.element_type(), &Type::string());
}

#[test]
fn values_sequence_preserves_entry_order() {
    let map = inventory();
    let values = map.values_sequence();
    assert_eq!(values.get(0).unwrap(), &Value::Int(3));
    assert_eq!(values.get(1).unwrap(), &Value::Int(5));
}

#[test]
fn entry_set_pairs_are_typed_tuples() {
    let map = inventory();
    let entries = map.entry_set();
    assert_eq!(
        entries.element_type(),
        &Type::tuple([Type::string(), Type::int()])
    );
    assert!(entries.contains(&Value::from(vec![Value::from("pears"), Value::Int(5)])));
}

#[test]
fn object_keys_require_the_same_instance() {
    let mut map = Map::new(Type::object(), Type::int());
    let key = Value::object("Session");
    map.put(key.clone(), Value::Int(1)).unwrap();
    assert!(map.contains_key(&key));
    assert!(!map.contains_key(&Value::object("Session")));
}
