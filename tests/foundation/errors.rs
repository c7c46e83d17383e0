//! Integration tests for Error types and display formatting.

use gradual_foundation::Error;

#[test]
fn type_mismatch_display() {
    let err = Error::type_mismatch("int", "\"hello\"");
    assert_eq!(
        format!("{err}"),
        "type mismatch: expected int, got \"hello\""
    );
}

#[test]
fn index_out_of_bounds_display() {
    let err = Error::index_out_of_bounds(7, 3);
    assert_eq!(format!("{err}"), "index out of bounds: 7 (length 3)");
}

#[test]
fn underflow_display() {
    assert_eq!(format!("{}", Error::Underflow), "no value present");
}

#[test]
fn arity_mismatch_display() {
    let err = Error::arity_mismatch("at least 2", 1);
    assert_eq!(format!("{err}"), "arity mismatch: expected at least 2, got 1");
}

#[test]
fn errors_are_matchable() {
    let err = Error::type_mismatch("int", "null");
    assert!(matches!(err, Error::TypeMismatch { .. }));
}
