//! Integration tests for Sequence.

use gradual_collections::Sequence;
use gradual_foundation::{Error, Value};
use gradual_types::Type;

fn ints(values: &[i64]) -> Sequence {
    Sequence::of(Type::int(), values.iter().map(|&n| Value::Int(n))).unwrap()
}

fn as_ints(seq: &Sequence) -> Vec<i64> {
    seq.iter().filter_map(Value::as_int).collect()
}

#[test]
fn construction_validates_every_element() {
    assert!(Sequence::of(Type::int(), [Value::Int(1), Value::Int(2)]).is_ok());
    assert!(Sequence::of(Type::int(), [Value::Int(1), Value::from("x")]).is_err());
}

#[test]
fn add_appends_in_order() {
    let mut seq = Sequence::new(Type::string());
    seq.add(Value::from("a")).unwrap();
    seq.add(Value::from("b")).unwrap();
    assert_eq!(seq.len(), 2);
    assert_eq!(seq.get(0).unwrap(), &Value::from("a"));
    assert_eq!(seq.get(1).unwrap(), &Value::from("b"));
}

#[test]
fn duplicates_are_allowed() {
    let seq = ints(&[7, 7, 7]);
    assert_eq!(seq.len(), 3);
}

#[test]
fn negative_indices_read_from_end() {
    let seq = ints(&[10, 20, 30]);
    assert_eq!(seq.get(-1).unwrap(), &Value::Int(30));
    assert_eq!(seq.get(-3).unwrap(), &Value::Int(10));
    assert!(matches!(
        seq.get(-4),
        Err(Error::IndexOutOfBounds { .. })
    ));
}

#[test]
fn insert_all_splices_at_position() {
    let mut seq = ints(&[1, 4]);
    seq.insert_all(1, [Value::Int(2), Value::Int(3)]).unwrap();
    assert_eq!(as_ints(&seq), vec![1, 2, 3, 4]);
}

#[test]
fn insert_all_at_end_appends() {
    let mut seq = ints(&[1]);
    seq.insert_all(1, [Value::Int(2)]).unwrap();
    assert_eq!(as_ints(&seq), vec![1, 2]);
}

#[test]
fn failed_bulk_insert_leaves_sequence_unchanged() {
    let mut seq = ints(&[1, 2]);
    let result = seq.insert_all(1, [Value::Int(9), Value::from("x")]);
    assert!(result.is_err());
    assert_eq!(as_ints(&seq), vec![1, 2]);
}

#[test]
fn remove_at_returns_removed_value() {
    let mut seq = ints(&[1, 2, 3]);
    assert_eq!(seq.remove_at(1).unwrap(), Value::Int(2));
    assert_eq!(as_ints(&seq), vec![1, 3]);
    assert_eq!(seq.remove_at(-1).unwrap(), Value::Int(3));
}

#[test]
fn replace_at_validates_replacement() {
    let mut seq = ints(&[1, 2]);
    assert_eq!(seq.replace_at(0, Value::Int(9)).unwrap(), Value::Int(1));
    assert!(seq.replace_at(0, Value::from("x")).is_err());
    assert_eq!(as_ints(&seq), vec![9, 2]);
}

#[test]
fn contains_and_index_of_use_value_hash() {
    let seq = ints(&[5, 6, 5]);
    assert!(seq.contains(&Value::Int(5)));
    assert!(!seq.contains(&Value::Int(7)));
    assert_eq!(seq.index_of(&Value::Int(5)), Some(0));
    assert_eq!(seq.index_of(&Value::Int(7)), None);
}

#[test]
fn slice_produces_new_sequence() {
    let seq = ints(&[1, 2, 3, 4, 5]);
    let slice = seq.slice(1, 3).unwrap();
    assert_eq!(as_ints(&slice), vec![2, 3, 4]);
    // Original untouched
    assert_eq!(seq.len(), 5);
}

#[test]
fn slice_with_negative_start() {
    let seq = ints(&[1, 2, 3, 4, 5]);
    let slice = seq.slice(-2, 2).unwrap();
    assert_eq!(as_ints(&slice), vec![4, 5]);
}

#[test]
fn slice_beyond_end_is_rejected() {
    let seq = ints(&[1, 2, 3]);
    assert!(seq.slice(2, 5).is_err());
}

#[test]
fn sort_with_default_comparator() {
    let mut seq = ints(&[3, 1, 2]);
    seq.sort(Value::compare);
    assert_eq!(as_ints(&seq), vec![1, 2, 3]);
}

#[test]
fn sort_with_custom_comparator() {
    let mut seq = ints(&[1, 3, 2]);
    seq.sort(|a, b| b.compare(a));
    assert_eq!(as_ints(&seq), vec![3, 2, 1]);
}

#[test]
fn first_last_and_clear() {
    let mut seq = ints(&[1, 2]);
    assert_eq!(seq.first(), Some(&Value::Int(1)));
    assert_eq!(seq.last(), Some(&Value::Int(2)));
    seq.clear();
    assert!(seq.is_empty());
    assert_eq!(seq.first(), None);
}
