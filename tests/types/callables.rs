//! Integration tests for runtime-validated callables.

use gradual_foundation::{Error, NativeFn, Result, Value};
use gradual_types::{CheckedCallable, Type};

fn join(args: &[Value]) -> Result<Value> {
    let parts: Vec<String> = args.iter().map(|v| format!("{v}")).collect();
    Ok(Value::from(parts.join(",")))
}

#[test]
fn call_runs_with_valid_arguments() {
    let f = CheckedCallable::new(
        Type::string(),
        vec![Type::string(), Type::string()],
        vec![],
        None,
        join,
    );
    let out = f.call(&[Value::from("a"), Value::from("b")]).unwrap();
    assert_eq!(out, Value::from("a,b"));
}

#[test]
fn call_checks_argument_count() {
    let f = CheckedCallable::new(Type::string(), vec![Type::string()], vec![], None, join);
    assert!(matches!(f.call(&[]), Err(Error::ArityMismatch { .. })));
    assert!(matches!(
        f.call(&[Value::from("a"), Value::from("b")]),
        Err(Error::ArityMismatch { .. })
    ));
}

#[test]
fn call_checks_argument_types() {
    let f = CheckedCallable::new(Type::string(), vec![Type::string()], vec![], None, join);
    assert!(matches!(
        f.call(&[Value::Int(1)]),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn variadic_accepts_any_surplus() {
    let f = CheckedCallable::new(
        Type::string(),
        vec![Type::string()],
        vec![],
        Some(Type::int()),
        join,
    );
    assert!(f.call(&[Value::from("a")]).is_ok());
    assert!(
        f.call(&[Value::from("a"), Value::Int(1), Value::Int(2)])
            .is_ok()
    );
    assert!(matches!(
        f.call(&[Value::from("a"), Value::from("b")]),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn output_validation_catches_bad_returns() {
    let f = CheckedCallable::new(Type::int(), vec![], vec![], None, |_| Ok(Value::from("oops")));
    assert!(matches!(f.call(&[]), Err(Error::TypeMismatch { .. })));
}

#[test]
fn wrapped_errors_pass_through() {
    let f = CheckedCallable::new(Type::int(), vec![], vec![], None, |_| Err(Error::Underflow));
    assert!(matches!(f.call(&[]), Err(Error::Underflow)));
}

#[test]
fn native_fn_wrapping() {
    let native = NativeFn { name: "join", func: join };
    let f = CheckedCallable::from_native(
        native,
        Type::string(),
        vec![],
        vec![Type::string()],
        None,
    );
    assert_eq!(f.call(&[]).unwrap(), Value::from(""));
    assert_eq!(f.call(&[Value::from("x")]).unwrap(), Value::from("x"));
}
