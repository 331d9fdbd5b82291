//! Tests for serde support on `Value`.

#![cfg(feature = "serde")]

use reactor_utils::value::{Function, Object, Value};
use rstest::rstest;

#[rstest]
fn test_deserialize_builds_arrays_and_objects() {
    let value: Value = serde_json::from_str(r#"{"b":[1,2.5,"x"],"a":null,"c":true}"#).unwrap();

    let expected = Value::object([
        (
            "b",
            Value::array([Value::from(1), Value::from(2.5), Value::from("x")]),
        ),
        ("a", Value::Null),
        ("c", Value::from(true)),
    ]);
    assert!(value.deep_eq(&expected));

    let keys: Vec<String> = value.own_keys().iter().map(|key| key.to_string()).collect();
    assert_eq!(keys, vec!["b", "a", "c"]);
}

#[rstest]
#[case(Value::from(3), "3")]
#[case(Value::from(-0.5), "-0.5")]
#[case(Value::Undefined, "null")]
#[case(Value::from("s"), r#""s""#)]
#[case(Value::Object(Object::boxed(Value::from("boxed"))), r#""boxed""#)]
fn test_serialize_scalars(#[case] value: Value, #[case] expected: &str) {
    assert_eq!(serde_json::to_string(&value).unwrap(), expected);
}

#[rstest]
fn test_serialize_skips_functions_and_undefined_in_objects() {
    let function = Value::from(Function::new("f", |_, _| Ok(Value::Undefined)));
    let object = Value::object([
        ("kept", Value::from(1)),
        ("method", function.clone()),
        ("missing", Value::Undefined),
    ]);
    let array = Value::array([function, Value::Undefined]);

    assert_eq!(serde_json::to_string(&object).unwrap(), r#"{"kept":1}"#);
    assert_eq!(serde_json::to_string(&array).unwrap(), "[null,null]");
}

#[rstest]
fn test_round_trip_preserves_structure() {
    let text = r#"{"list":[{"n":1}],"name":"tree"}"#;
    let value: Value = serde_json::from_str(text).unwrap();
    assert_eq!(serde_json::to_string(&value).unwrap(), text);
}
