//! Tests for `extend` and `clone`.

#![cfg(feature = "composition")]

use reactor_utils::composition::{clone, extend};
use reactor_utils::value::{Object, Value};
use rstest::rstest;

// =============================================================================
// extend
// =============================================================================

mod extend_tests {
    use super::*;

    #[rstest]
    fn test_later_source_wins() {
        let result = extend(
            Value::new_object(),
            &[
                Value::object([("a", Value::from(1))]),
                Value::object([("a", Value::from(2)), ("b", Value::from(3))]),
            ],
        );

        assert!(result.deep_eq(&Value::object([("a", Value::from(2)), ("b", Value::from(3))])));
    }

    #[rstest]
    fn test_sources_override_existing_target_keys() {
        let target = Value::object([("a", Value::from("old")), ("keep", Value::from(true))]);
        extend(target.clone(), &[Value::object([("a", Value::from("new"))])]);

        assert_eq!(target.get("a"), Value::from("new"));
        assert_eq!(target.get("keep"), Value::from(true));
    }

    #[rstest]
    fn test_returns_the_same_target_handle() {
        let target = Value::new_object();
        let result = extend(target.clone(), &[Value::object([("x", Value::Null)])]);
        assert_eq!(result, target);
    }

    #[rstest]
    fn test_copy_is_shallow() {
        let nested = Value::object([("deep", Value::from(1))]);
        let result = extend(Value::new_object(), &[Value::object([("nested", nested.clone())])]);

        assert_eq!(result.get("nested"), nested);
        nested.set("deep", Value::from(2));
        assert_eq!(result.get("nested").get("deep"), Value::from(2));
    }

    #[rstest]
    fn test_new_keys_keep_source_order() {
        let result = extend(
            Value::new_object(),
            &[Value::object([("z", Value::from(1)), ("a", Value::from(2))])],
        );
        let keys: Vec<String> = result.own_keys().iter().map(|key| key.to_string()).collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[rstest]
    fn test_array_source_copies_indices() {
        let result = extend(
            Value::new_object(),
            &[Value::array([Value::from("a"), Value::from("b")])],
        );
        assert_eq!(result.get("0"), Value::from("a"));
        assert_eq!(result.get("1"), Value::from("b"));
    }

    #[rstest]
    fn test_array_target_receives_index_keys() {
        let target = Value::array([Value::from(1)]);
        extend(target.clone(), &[Value::array([Value::from(9), Value::from(8)])]);
        assert!(target.deep_eq(&Value::array([Value::from(9), Value::from(8)])));
    }

    #[rstest]
    fn test_array_target_ignores_far_sparse_index() {
        let target = Value::array([]);
        let result = extend(
            target.clone(),
            &[Value::object([
                ("0", Value::from("first")),
                ("4294967294", Value::from(1)),
                ("label", Value::from("x")),
            ])],
        );

        assert_eq!(result, target);
        assert!(target.deep_eq(&Value::array([Value::from("first")])));
    }

    #[rstest]
    fn test_array_target_fills_short_gaps() {
        let target = Value::array([]);
        extend(target.clone(), &[Value::object([("2", Value::from("c"))])]);
        assert!(target.deep_eq(&Value::array([
            Value::Undefined,
            Value::Undefined,
            Value::from("c"),
        ])));
    }

    #[rstest]
    fn test_empty_object_source_is_noop() {
        let target = Value::object([("a", Value::from(1))]);
        extend(target.clone(), &[Value::new_object()]);
        assert!(target.deep_eq(&Value::object([("a", Value::from(1))])));
    }

    #[rstest]
    fn test_truthy_primitive_target_is_returned() {
        let result = extend(Value::from(5), &[Value::object([("a", Value::from(1))])]);
        assert_eq!(result, Value::from(5));
    }
}

// =============================================================================
// clone
// =============================================================================

mod clone_tests {
    use super::*;

    #[rstest]
    #[case(Value::Undefined)]
    #[case(Value::Null)]
    #[case(Value::from(true))]
    #[case(Value::from(3.5))]
    #[case(Value::from("text"))]
    fn test_primitives_pass_through(#[case] value: Value) {
        assert_eq!(clone(&value), value);
    }

    #[rstest]
    fn test_array_copy_is_new_sequence_with_same_elements() {
        let shared = Value::new_object();
        let original = Value::array([Value::from(1), shared.clone(), Value::from("c")]);
        let copy = clone(&original);

        assert_ne!(copy, original);
        assert!(copy.deep_eq(&original));
        assert_eq!(copy.get("1"), shared);
    }

    #[rstest]
    fn test_mutating_copy_leaves_original_untouched() {
        let original = Value::object([("a", Value::from(1))]);
        let copy = clone(&original);

        copy.set("a", Value::from(100));
        copy.set("b", Value::from(2));

        assert_eq!(original.get("a"), Value::from(1));
        assert_eq!(original.get("b"), Value::Undefined);
    }

    #[rstest]
    fn test_object_copy_drops_prototype() {
        let prototype = Object::new();
        prototype.set("inherited", Value::from(true));
        let original = Object::with_prototype(Some(prototype));
        original.set("own", Value::from(1));

        let copy = clone(&Value::Object(original));
        assert_eq!(copy.get("inherited"), Value::Undefined);
        assert_eq!(copy.get("own"), Value::from(1));
    }

    #[rstest]
    fn test_clone_of_clone_deep_equals_clone() {
        let original = Value::object([
            ("list", Value::array([Value::from(1)])),
            ("name", Value::from("n")),
        ]);
        let once = clone(&original);
        let twice = clone(&once);
        assert!(twice.deep_eq(&once));
    }
}
