//! The dynamic value model every helper operates on.
//!
//! [`Value`] is a closed set of kinds: the primitives (`undefined`, `null`,
//! booleans, numbers, strings) and three reference kinds ([`Array`],
//! [`Object`], [`Function`]). Reference kinds are shared handles, so copying
//! a `Value` never duplicates the underlying data; that is what lets
//! [`extend`](crate::composition::extend) mutate in place and
//! [`clone`](crate::composition::clone) stay shallow.
//!
//! # Equality
//!
//! `==` on values is strict equality: primitives compare by value (`NaN` is
//! never equal to itself) and reference kinds compare by identity. Use
//! [`Value::deep_eq`] for structural comparison.
//!
//! # Examples
//!
//! ```rust
//! use reactor_utils::value::Value;
//!
//! let first = Value::object([("a", Value::from(1))]);
//! let second = Value::object([("a", Value::from(1))]);
//!
//! assert_ne!(first, second);
//! assert!(first.deep_eq(&second));
//! assert_eq!(first, first.clone());
//! ```

mod array;
mod function;
mod object;
#[cfg(feature = "serde")]
mod serde_support;

use std::rc::Rc;

pub use array::{Array, MAX_FILL};
pub(crate) use function::Body;
pub use function::Function;
pub use object::{Object, Tag};

use crate::error::Thrown;

/// Largest integer a [`Value::Number`] represents exactly (`2^53 - 1`).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Nesting depth after which [`Display`](std::fmt::Display) abbreviates.
const DISPLAY_DEPTH: usize = 2;

/// A dynamically typed value.
#[derive(Clone, Default)]
pub enum Value {
    /// The absent value.
    #[default]
    Undefined,
    /// The explicit empty value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A double-precision number.
    Number(f64),
    /// An immutable string.
    String(Rc<str>),
    /// A shared array.
    Array(Array),
    /// A shared keyed object.
    Object(Object),
    /// A callable.
    Function(Function),
}

/// The position handed to an iteratee: an element index or a property name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Position in an indexed collection.
    Index(usize),
    /// Property name in a keyed collection.
    Name(Rc<str>),
}

impl Key {
    /// Converts the key into the value an iteratee would receive: a number
    /// for indices, a string for names.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Index(index) => Value::from(*index),
            Self::Name(name) => Value::String(Rc::clone(name)),
        }
    }

    /// Returns the key as a property name.
    pub fn to_property(&self) -> Rc<str> {
        match self {
            Self::Index(index) => Rc::from(index.to_string()),
            Self::Name(name) => Rc::clone(name),
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index(index) => write!(formatter, "{index}"),
            Self::Name(name) => write!(formatter, "{name}"),
        }
    }
}

/// Parses a canonical array-index property name (`"0"`, `"17"`, not `"01"`).
pub(crate) fn array_index(key: &str) -> Option<usize> {
    let bytes = key.as_bytes();
    match bytes {
        [] => None,
        [b'0'] => Some(0),
        [b'0', ..] => None,
        _ if bytes.iter().all(u8::is_ascii_digit) => key
            .parse::<u32>()
            .ok()
            .filter(|index| *index != u32::MAX)
            .map(|index| index as usize),
        _ => None,
    }
}

impl Value {
    /// Creates an empty ordinary object.
    pub fn new_object() -> Self {
        Self::Object(Object::new())
    }

    /// Creates an array from the given elements.
    pub fn array(elements: impl IntoIterator<Item = Self>) -> Self {
        Self::Array(elements.into_iter().collect())
    }

    /// Creates an ordinary object from `(key, value)` entries, in order.
    pub fn object<K: Into<Rc<str>>>(entries: impl IntoIterator<Item = (K, Self)>) -> Self {
        Self::Object(entries.into_iter().collect())
    }

    /// Returns `true` for [`Value::Undefined`].
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns `true` for [`Value::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for `undefined` and `null`.
    pub const fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// Boolean coercion.
    ///
    /// `undefined`, `null`, `false`, `0`, `NaN` and `""` are falsy; every
    /// other value, including every reference, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(flag) => *flag,
            Self::Number(number) => *number != 0.0 && !number.is_nan(),
            Self::String(text) => !text.is_empty(),
            Self::Array(_) | Self::Object(_) | Self::Function(_) => true,
        }
    }

    /// Returns the boolean, if this is one.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the number, if this is one.
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a string primitive.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(&**text),
            _ => None,
        }
    }

    /// Returns the array handle, if this is an array.
    pub const fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Returns the object handle, if this is an object.
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the function handle, if this is a function.
    pub const fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Returns the own enumerable keys.
    ///
    /// Strings and arrays report their indices, objects their own keys,
    /// functions their static members. Other primitives have none.
    pub fn own_keys(&self) -> Vec<Rc<str>> {
        let indices = |length: usize| -> Vec<Rc<str>> {
            (0..length).map(|index| Rc::from(index.to_string())).collect()
        };
        match self {
            Self::Undefined | Self::Null | Self::Bool(_) | Self::Number(_) => Vec::new(),
            Self::String(text) => indices(text.chars().count()),
            Self::Array(array) => indices(array.len()),
            Self::Object(object) => object.own_keys(),
            Self::Function(function) => function.statics().own_keys(),
        }
    }

    /// Reads an own property (including the virtual `length` of strings and
    /// arrays), ignoring prototypes and inherited statics.
    pub fn get_own(&self, key: &str) -> Option<Self> {
        match self {
            Self::Undefined | Self::Null | Self::Bool(_) | Self::Number(_) => None,
            Self::String(text) => {
                if key == "length" {
                    return Some(Self::from(text.chars().count()));
                }
                array_index(key)
                    .and_then(|index| text.chars().nth(index))
                    .map(|character| Self::from(character.to_string()))
            }
            Self::Array(array) => {
                if key == "length" {
                    return Some(Self::from(array.len()));
                }
                array_index(key).and_then(|index| array.get(index))
            }
            Self::Object(object) => object.get_own(key),
            Self::Function(function) => {
                function.statics().get_own(key).or_else(|| match key {
                    "name" => Some(Self::from(function.name())),
                    "prototype" => function.prototype().cloned().map(Self::Object),
                    _ => None,
                })
            }
        }
    }

    /// Reads a property, following prototypes and inherited statics.
    ///
    /// Returns [`Value::Undefined`] when nothing is found.
    pub fn get(&self, key: &str) -> Self {
        match self {
            Self::Object(object) => object.get(key),
            Self::Function(function) => self
                .get_own(key)
                .unwrap_or_else(|| function.get_static(key)),
            _ => self.get_own(key).unwrap_or_default(),
        }
    }

    /// Writes an own property.
    ///
    /// Returns `false` when the write is ignored: primitives accept no
    /// properties, arrays accept only index keys within [`MAX_FILL`] of the
    /// end, boxed strings keep their characters.
    pub fn set(&self, key: impl Into<Rc<str>>, value: Self) -> bool {
        match self {
            Self::Array(array) => {
                let key = key.into();
                array_index(&key).is_some_and(|index| array.set(index, value))
            }
            Self::Object(object) => object.set(key, value),
            Self::Function(function) => function.set_static(key, value),
            _ => false,
        }
    }

    /// Calls the method `name` with this value as the receiver.
    ///
    /// # Errors
    ///
    /// Fails with [`Thrown::TypeError`] if `name` does not resolve to a
    /// function, otherwise propagates the method's own failure.
    pub fn invoke(&self, name: &str, arguments: &[Self]) -> Result<Self, Thrown> {
        match self.get(name) {
            Self::Function(method) => method.call(self, arguments),
            _ => Err(Thrown::type_error(format!("{name} is not a function"))),
        }
    }

    /// Returns `true` if `constructor`'s prototype is on this value's
    /// prototype chain.
    pub fn instance_of(&self, constructor: &Function) -> bool {
        let (Self::Object(object), Some(target)) = (self, constructor.prototype()) else {
            return false;
        };
        let mut current = object.prototype();
        while let Some(prototype) = current {
            if prototype.ptr_eq(target) {
                return true;
            }
            current = prototype.prototype();
        }
        false
    }

    /// Structural equality over acyclic values.
    ///
    /// Arrays compare element-wise, objects compare tag, wrapped primitive,
    /// key set and values (key order is ignored). Functions compare by
    /// identity. Unlike `==`, `NaN` is deep-equal to `NaN`.
    pub fn deep_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(left), Self::Number(right)) => {
                left == right || (left.is_nan() && right.is_nan())
            }
            (Self::Array(left), Self::Array(right)) => {
                if left.ptr_eq(right) {
                    return true;
                }
                let (left, right) = (left.to_vec(), right.to_vec());
                left.len() == right.len()
                    && left.iter().zip(&right).all(|(left, right)| left.deep_eq(right))
            }
            (Self::Object(left), Self::Object(right)) => {
                if left.ptr_eq(right) {
                    return true;
                }
                let keys = left.own_keys();
                left.tag() == right.tag()
                    && left.primitive() == right.primitive()
                    && keys.len() == right.own_keys().len()
                    && keys.iter().all(|key| match (left.get_own(key), right.get_own(key)) {
                        (Some(left), Some(right)) => left.deep_eq(&right),
                        _ => false,
                    })
            }
            _ => self == other,
        }
    }

    fn render(&self, formatter: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        match self {
            Self::Undefined => formatter.write_str("undefined"),
            Self::Null => formatter.write_str("null"),
            Self::Bool(flag) => write!(formatter, "{flag}"),
            Self::Number(number) => formatter.write_str(&number_to_string(*number)),
            Self::String(text) if depth == 0 => formatter.write_str(text),
            Self::String(text) => write!(formatter, "'{text}'"),
            Self::Function(function) if function.is_class() => {
                write!(formatter, "[class {}]", function.name())
            }
            Self::Function(function) => write!(formatter, "[Function: {}]", function.name()),
            Self::Array(_) if depth > DISPLAY_DEPTH => formatter.write_str("[Array]"),
            Self::Array(array) => {
                formatter.write_str("[")?;
                for (position, element) in array.to_vec().iter().enumerate() {
                    if position > 0 {
                        formatter.write_str(", ")?;
                    }
                    element.render(formatter, depth + 1)?;
                }
                formatter.write_str("]")
            }
            Self::Object(object) => {
                if let Some(primitive) = object.primitive() {
                    write!(formatter, "[{}: ", object.tag().class_name())?;
                    primitive.render(formatter, depth + 1)?;
                    return formatter.write_str("]");
                }
                if depth > DISPLAY_DEPTH {
                    return formatter.write_str("[Object]");
                }
                formatter.write_str("{")?;
                for (position, key) in object.own_keys().iter().enumerate() {
                    if position > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{key}: ")?;
                    object.get_own(key).unwrap_or_default().render(formatter, depth + 1)?;
                }
                formatter.write_str("}")
            }
        }
    }
}

/// Interprets `value` as a collection length.
///
/// A valid length is a number greater than `-1`, integral, and no larger
/// than [`MAX_SAFE_INTEGER`].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn as_length(value: &Value) -> Option<usize> {
    match value {
        Value::Number(number)
            if *number > -1.0 && number.fract() == 0.0 && *number <= MAX_SAFE_INTEGER =>
        {
            Some(*number as usize)
        }
        _ => None,
    }
}

/// Renders a number the way a string conversion would: integral values
/// without a fraction, `-0` as `0`, infinities spelled out.
pub(crate) fn number_to_string(number: f64) -> String {
    if number == 0.0 {
        "0".to_owned()
    } else if number.is_infinite() {
        if number > 0.0 { "Infinity" } else { "-Infinity" }.to_owned()
    } else {
        number.to_string()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Number(left), Self::Number(right)) => left == right,
            (Self::String(left), Self::String(right)) => left == right,
            (Self::Array(left), Self::Array(right)) => left.ptr_eq(right),
            (Self::Object(left), Self::Object(right)) => left.ptr_eq(right),
            (Self::Function(left), Self::Function(right)) => left.ptr_eq(right),
            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.render(formatter, 0)
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(text) => write!(formatter, "'{text}'"),
            _ => self.render(formatter, 0),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<u32> for Value {
    fn from(number: u32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<usize> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(number: usize) -> Self {
        Self::Number(number as f64)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(Rc::from(text))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(Rc::from(text))
    }
}

impl From<Rc<str>> for Value {
    fn from(text: Rc<str>) -> Self {
        Self::String(text)
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Self::Array(array)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Self::Object(object)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl From<Vec<Self>> for Value {
    fn from(elements: Vec<Self>) -> Self {
        Self::Array(Array::from_vec(elements))
    }
}

impl FromIterator<Self> for Value {
    fn from_iter<I: IntoIterator<Item = Self>>(iterator: I) -> Self {
        Self::array(iterator)
    }
}

// Values share `Rc` handles and interior mutability; they stay on one thread.
static_assertions::assert_not_impl_any!(Value: Send, Sync);
