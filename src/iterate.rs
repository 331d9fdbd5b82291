//! Polymorphic iteration with early exit.
//!
//! [`each`] visits every element of an indexed collection or every own key
//! of a keyed one, handing the iteratee `(value, key, collection)`. The
//! iteratee stops the walk by returning `false` (or anything else whose
//! [`IterationControl`] says so). The collection itself is returned
//! unchanged, as the same handle.
//!
//! Whether a value is walked by index or by key is decided up front by a
//! [`Collection`]. [`Collection::classify`] never sniffs plain objects for a
//! `length` field; [`Collection::array_like`] is the opt-in for that.
//!
//! # Examples
//!
//! ```rust
//! use reactor_utils::iterate::each;
//! use reactor_utils::value::Value;
//!
//! let numbers = Value::array([Value::from(1), Value::from(2), Value::from(3)]);
//! let mut seen = Vec::new();
//!
//! let returned = each(&numbers, |value, _, _| {
//!     seen.push(value.clone());
//!     value != &Value::from(2)
//! });
//!
//! assert_eq!(seen, vec![Value::from(1), Value::from(2)]);
//! assert_eq!(returned, numbers);
//! ```

use std::convert::Infallible;
use std::ops::ControlFlow;

use crate::error::Thrown;
use crate::value::{Function, Tag, Value, as_length};

pub use crate::value::{Key, MAX_SAFE_INTEGER};

/// Returns `true` if `value` is a valid collection length: a number greater
/// than `-1`, integral, and no larger than [`MAX_SAFE_INTEGER`].
///
/// # Examples
///
/// ```rust
/// use reactor_utils::iterate::is_length;
/// use reactor_utils::value::Value;
///
/// assert!(is_length(&Value::from(0)));
/// assert!(!is_length(&Value::from(-1)));
/// assert!(!is_length(&Value::from(1.5)));
/// assert!(!is_length(&Value::from("3")));
/// ```
pub fn is_length(value: &Value) -> bool {
    as_length(value).is_some()
}

/// Decides from an iteratee's return value whether iteration goes on.
pub trait IterationControl {
    /// Returns `false` to stop after the current element.
    fn should_continue(&self) -> bool;
}

impl IterationControl for () {
    fn should_continue(&self) -> bool {
        true
    }
}

impl IterationControl for bool {
    fn should_continue(&self) -> bool {
        *self
    }
}

/// Only a strict `false` stops; `undefined`, `0`, `""` and the rest continue.
impl IterationControl for Value {
    fn should_continue(&self) -> bool {
        !matches!(self, Self::Bool(false))
    }
}

impl<B, C> IterationControl for ControlFlow<B, C> {
    fn should_continue(&self) -> bool {
        self.is_continue()
    }
}

/// A value together with the way it is to be walked.
#[derive(Debug, Clone)]
pub enum Collection {
    /// Visited by index over `0..length`.
    Indexed {
        /// The collection handed to the iteratee and returned at the end.
        source: Value,
        /// Number of positions visited, fixed when the collection is built.
        length: usize,
    },
    /// Visited over the own keys, snapshotted when iteration starts.
    Keyed(Value),
    /// `undefined` or `null`: nothing is visited.
    Absent(Value),
}

impl Collection {
    /// Picks the shape from the value's kind.
    ///
    /// Strings, arrays, boxed strings and tagged arrays with a valid
    /// `length` are indexed; `undefined` and `null` are absent; everything
    /// else is keyed.
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::Undefined | Value::Null => Self::Absent(value.clone()),
            Value::String(text) => Self::Indexed {
                source: value.clone(),
                length: text.chars().count(),
            },
            Value::Array(array) => Self::Indexed {
                source: value.clone(),
                length: array.len(),
            },
            Value::Object(object) if matches!(object.tag(), Tag::String | Tag::Array) => {
                Self::by_length(value)
            }
            _ => Self::Keyed(value.clone()),
        }
    }

    /// Picks the shape by reading the value's `length` property: indexed
    /// when it is a valid length, keyed otherwise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reactor_utils::iterate::Collection;
    /// use reactor_utils::value::Value;
    ///
    /// let array_like = Value::object([
    ///     ("0", Value::from("a")),
    ///     ("length", Value::from(1)),
    /// ]);
    ///
    /// assert!(matches!(Collection::classify(&array_like), Collection::Keyed(_)));
    /// assert!(matches!(
    ///     Collection::array_like(&array_like),
    ///     Collection::Indexed { length: 1, .. }
    /// ));
    /// ```
    pub fn array_like(value: &Value) -> Self {
        if value.is_nullish() {
            return Self::Absent(value.clone());
        }
        Self::by_length(value)
    }

    fn by_length(value: &Value) -> Self {
        match as_length(&value.get("length")) {
            Some(length) => Self::Indexed {
                source: value.clone(),
                length,
            },
            None => Self::Keyed(value.clone()),
        }
    }

    /// The collection handed to the iteratee.
    pub const fn source(&self) -> &Value {
        match self {
            Self::Indexed { source, .. } | Self::Keyed(source) | Self::Absent(source) => source,
        }
    }

    /// Short name of the shape.
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Indexed { .. } => "indexed",
            Self::Keyed(_) => "keyed",
            Self::Absent(_) => "absent",
        }
    }

    /// Walks the collection, calling `iteratee(value, key, collection)`
    /// until it asks to stop. Returns the source.
    pub fn each<F, R>(&self, mut iteratee: F) -> Value
    where
        F: FnMut(&Value, &Key, &Value) -> R,
        R: IterationControl,
    {
        match self.try_each(|value, key, source| Ok::<_, Infallible>(iteratee(value, key, source))) {
            Ok(source) => source,
            Err(never) => match never {},
        }
    }

    /// Like [`Collection::each`], for a fallible iteratee.
    ///
    /// # Errors
    ///
    /// The first error returned by `iteratee` stops the walk and is
    /// returned as is.
    pub fn try_each<F, R, E>(&self, mut iteratee: F) -> Result<Value, E>
    where
        F: FnMut(&Value, &Key, &Value) -> Result<R, E>,
        R: IterationControl,
    {
        trace_event!(shape = self.shape(), "each: start");

        match self {
            Self::Absent(_) => {}
            Self::Indexed {
                source: source @ Value::String(text),
                length,
            } => {
                for (index, character) in text.chars().take(*length).enumerate() {
                    let value = Value::from(character.to_string());
                    let key = Key::Index(index);
                    if !iteratee(&value, &key, source)?.should_continue() {
                        trace_event!(key = %key, "each: stopped early");
                        break;
                    }
                }
            }
            Self::Indexed { source, length } => {
                for index in 0..*length {
                    let value = element_at(source, index);
                    let key = Key::Index(index);
                    if !iteratee(&value, &key, source)?.should_continue() {
                        trace_event!(key = %key, "each: stopped early");
                        break;
                    }
                }
            }
            Self::Keyed(source) => {
                for name in source.own_keys() {
                    let value = source.get(&name);
                    let key = Key::Name(name);
                    if !iteratee(&value, &key, source)?.should_continue() {
                        trace_event!(key = %key, "each: stopped early");
                        break;
                    }
                }
            }
        }

        Ok(self.source().clone())
    }
}

impl From<&Value> for Collection {
    fn from(value: &Value) -> Self {
        Self::classify(value)
    }
}

/// Reads position `index` live, so writes made by the iteratee are seen.
fn element_at(source: &Value, index: usize) -> Value {
    match source {
        Value::Array(array) => array.get(index).unwrap_or_default(),
        _ => source.get(&index.to_string()),
    }
}

/// Walks `collection` as [`Collection::classify`] shapes it.
///
/// The iteratee receives `(value, key, collection)`; returning `false`
/// stops the walk. `undefined` and `null` are walked zero times. The
/// collection is returned as the same handle.
pub fn each<F, R>(collection: &Value, iteratee: F) -> Value
where
    F: FnMut(&Value, &Key, &Value) -> R,
    R: IterationControl,
{
    Collection::classify(collection).each(iteratee)
}

/// Like [`each`], for a fallible iteratee.
///
/// # Errors
///
/// The first error returned by `iteratee` stops the walk and is returned.
pub fn try_each<F, R, E>(collection: &Value, iteratee: F) -> Result<Value, E>
where
    F: FnMut(&Value, &Key, &Value) -> Result<R, E>,
    R: IterationControl,
{
    Collection::classify(collection).try_each(iteratee)
}

/// Walks `collection` with a dynamic iteratee.
///
/// When `context` is truthy the iteratee runs with it as `this`, otherwise
/// with `undefined`. The arguments are always `[value, key, collection]`,
/// keys given as numbers for indexed collections and strings for keyed
/// ones. A strict `false` result stops the walk.
///
/// # Errors
///
/// Whatever the iteratee raises is propagated; iteration stops there.
///
/// # Examples
///
/// ```rust
/// use reactor_utils::iterate::each_with;
/// use reactor_utils::value::{Function, Value};
///
/// let totals = Value::object([("sum", Value::from(0))]);
/// let add = Function::new("add", |this, arguments| {
///     let sum = this.get("sum").as_number().unwrap_or(0.0);
///     let value = arguments[0].as_number().unwrap_or(0.0);
///     this.set("sum", Value::from(sum + value));
///     Ok(Value::Undefined)
/// });
///
/// let numbers = Value::array([Value::from(1), Value::from(2)]);
/// each_with(&numbers, &add, Some(&totals)).unwrap();
/// assert_eq!(totals.get("sum"), Value::from(3));
/// ```
pub fn each_with(
    collection: &Value,
    iteratee: &Function,
    context: Option<&Value>,
) -> Result<Value, Thrown> {
    let this = context.filter(|context| context.is_truthy()).cloned().unwrap_or_default();
    try_each(collection, |value, key, source| {
        iteratee.call(&this, &[value.clone(), key.to_value(), source.clone()])
    })
}
