//! Shallow object composition: [`extend`] and [`clone`].
//!
//! Both helpers work one level deep. Nested arrays, objects and functions
//! are copied as handles, so the result shares them with its inputs.
//!
//! # Examples
//!
//! ```rust
//! use reactor_utils::composition::{clone, extend};
//! use reactor_utils::value::Value;
//!
//! let defaults = Value::object([("a", Value::from(1))]);
//! let overrides = Value::object([("a", Value::from(2)), ("b", Value::from(3))]);
//!
//! let merged = extend(Value::new_object(), &[defaults, overrides]);
//! assert!(merged.deep_eq(&Value::object([("a", Value::from(2)), ("b", Value::from(3))])));
//!
//! let copy = clone(&merged);
//! assert_ne!(copy, merged);
//! assert!(copy.deep_eq(&merged));
//! ```

use crate::predicate::{is_array, is_object};
use crate::value::{Array, Value};

/// Copies the own enumerable keys of every source onto `target`, left to
/// right, and returns `target`.
///
/// Later sources win over earlier ones and over keys already on `target`.
/// `target` is mutated in place; the returned value is the same handle.
///
/// A falsy `target` yields a fresh empty object and nothing is copied. An
/// empty `sources` slice returns `target` as is. Sources without own keys
/// (`null`, numbers, ...) contribute nothing, and primitive targets ignore
/// the writes.
///
/// # Examples
///
/// ```rust
/// use reactor_utils::composition::extend;
/// use reactor_utils::value::Value;
///
/// let target = Value::object([("kept", Value::from(true))]);
/// let result = extend(target.clone(), &[Value::object([("added", Value::from(1))])]);
///
/// assert_eq!(result, target);
/// assert_eq!(target.get("added"), Value::from(1));
///
/// assert!(extend(Value::Null, &[]).deep_eq(&Value::new_object()));
/// ```
pub fn extend(target: Value, sources: &[Value]) -> Value {
    if !target.is_truthy() {
        trace_event!(value = %target, "extend: falsy target replaced by an empty object");
        return Value::new_object();
    }

    for source in sources {
        for key in source.own_keys() {
            if let Some(value) = source.get_own(&key) {
                target.set(key, value);
            }
        }
    }

    target
}

/// Returns a shallow copy of `value`.
///
/// Primitives are returned unchanged. Arrays (including tagged foreign
/// arrays) become a new [`Array`] with the same elements in the same order.
/// Anything else object-typed becomes a new ordinary object carrying the
/// same own keys, as if by `extend(new_object, &[value])`.
///
/// The input is never mutated.
///
/// # Examples
///
/// ```rust
/// use reactor_utils::composition::clone;
/// use reactor_utils::value::Value;
///
/// let nested = Value::array([Value::from(1)]);
/// let original = Value::array([nested.clone(), Value::from("x")]);
/// let copy = clone(&original);
///
/// assert_ne!(copy, original);
/// assert_eq!(copy.get("0"), nested);
/// assert_eq!(clone(&Value::from(4)), Value::from(4));
/// ```
pub fn clone(value: &Value) -> Value {
    if !is_object(value) {
        return value.clone();
    }

    if is_array(value) {
        return match value {
            Value::Array(array) => Value::Array(Array::from_vec(array.to_vec())),
            _ => Value::Array(array_like_elements(value)),
        };
    }

    extend(Value::new_object(), std::slice::from_ref(value))
}

/// Reads `0..length` of an array-like value whose `length` is a valid
/// length; anything else reads as empty.
fn array_like_elements(value: &Value) -> Array {
    let length = crate::value::as_length(&value.get("length")).unwrap_or(0);
    (0..length).map(|index| value.get(&index.to_string())).collect()
}
