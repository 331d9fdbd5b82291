//! Type predicates.
//!
//! Leaf-level classification of [`Value`]s. Every predicate is total: it
//! accepts any value, including `undefined`, `null` and boxed primitives,
//! and never panics.
//!
//! [`is_string`] and [`is_array`] consult the internal [`Tag`] of objects
//! rather than only the variant, so boxed strings and arrays that arrive as
//! tagged objects (for instance from another realm) are recognized too.
//!
//! # Examples
//!
//! ```rust
//! use reactor_utils::predicate::{is_array, is_object, is_string};
//! use reactor_utils::value::{Object, Tag, Value};
//!
//! assert!(is_string(&Value::from("text")));
//! assert!(is_string(&Value::Object(Object::boxed(Value::from("text")))));
//! assert!(is_array(&Value::Object(Object::tagged(Tag::Array))));
//! assert!(!is_object(&Value::Null));
//! ```

use crate::value::{Tag, Value};

/// The coarse classification reported by a `typeof` check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeOf {
    /// `undefined`.
    Undefined,
    /// `null`, arrays and objects.
    Object,
    /// Booleans.
    Boolean,
    /// Numbers.
    Number,
    /// String primitives.
    String,
    /// Callables.
    Function,
}

impl TypeOf {
    /// The lowercase name, as `typeof` spells it.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Object => "object",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Function => "function",
        }
    }
}

impl std::fmt::Display for TypeOf {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Classifies a value the way `typeof` does.
pub const fn type_of(value: &Value) -> TypeOf {
    match value {
        Value::Undefined => TypeOf::Undefined,
        Value::Null | Value::Array(_) | Value::Object(_) => TypeOf::Object,
        Value::Bool(_) => TypeOf::Boolean,
        Value::Number(_) => TypeOf::Number,
        Value::String(_) => TypeOf::String,
        Value::Function(_) => TypeOf::Function,
    }
}

/// Returns the internal tag of an object-typed, non-null value.
///
/// `None` for primitives, `null` and functions.
pub fn tag_of(value: &Value) -> Option<Tag> {
    match value {
        Value::Array(_) => Some(Tag::Array),
        Value::Object(object) => Some(object.tag()),
        _ => None,
    }
}

/// Returns `true` for string primitives and boxed strings.
pub fn is_string(value: &Value) -> bool {
    type_of(value) == TypeOf::String || tag_of(value) == Some(Tag::String)
}

/// Returns `true` for arrays, whether held in an [`Array`](crate::value::Array)
/// handle or as an object tagged [`Tag::Array`].
pub fn is_array(value: &Value) -> bool {
    tag_of(value) == Some(Tag::Array)
}

/// Returns `true` for callables.
pub const fn is_function(value: &Value) -> bool {
    matches!(type_of(value), TypeOf::Function)
}

/// Returns `true` for functions and for non-null object-typed values.
///
/// Primitives, `undefined` and `null` are not objects.
pub const fn is_object(value: &Value) -> bool {
    match type_of(value) {
        TypeOf::Function => true,
        TypeOf::Object => !value.is_null(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Function, Object};
    use rstest::rstest;

    fn noop() -> Value {
        Value::from(Function::new("noop", |_, _| Ok(Value::Undefined)))
    }

    #[rstest]
    #[case(Value::Undefined, TypeOf::Undefined)]
    #[case(Value::Null, TypeOf::Object)]
    #[case(Value::from(true), TypeOf::Boolean)]
    #[case(Value::from(1), TypeOf::Number)]
    #[case(Value::from("a"), TypeOf::String)]
    #[case(Value::array([]), TypeOf::Object)]
    #[case(Value::Object(Object::boxed(Value::from("a"))), TypeOf::Object)]
    #[case(noop(), TypeOf::Function)]
    fn test_type_of(#[case] value: Value, #[case] expected: TypeOf) {
        assert_eq!(type_of(&value), expected);
    }

    #[rstest]
    #[case(Value::Null, None)]
    #[case(Value::from("a"), None)]
    #[case(noop(), None)]
    #[case(Value::array([]), Some(Tag::Array))]
    #[case(Value::new_object(), Some(Tag::Object))]
    #[case(Value::Object(Object::boxed(Value::from(2))), Some(Tag::Number))]
    #[case(Value::Object(Object::tagged(Tag::Error)), Some(Tag::Error))]
    fn test_tag_of(#[case] value: Value, #[case] expected: Option<Tag>) {
        assert_eq!(tag_of(&value), expected);
    }

    #[rstest]
    fn test_boxed_number_is_not_string() {
        assert!(!is_string(&Value::Object(Object::boxed(Value::from(7)))));
    }

    #[rstest]
    fn test_string_is_not_array() {
        assert!(!is_array(&Value::from("abc")));
        assert!(!is_array(&Value::Object(Object::boxed(Value::from("abc")))));
    }
}
