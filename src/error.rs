//! Error type for failures raised by dynamic callbacks.
//!
//! Helpers in this crate never raise errors of their own. The only failure
//! they can observe is one produced by a caller-supplied [`Function`]
//! (an iteratee, a partially applied function, a class initializer), and
//! that failure is always propagated untouched.
//!
//! [`Function`]: crate::value::Function

use crate::value::Value;

/// A failure raised while calling or constructing a dynamic [`Function`].
///
/// # Examples
///
/// ```rust
/// use reactor_utils::error::Thrown;
/// use reactor_utils::value::Value;
///
/// let error = Thrown::type_error("Point is not a constructor");
/// assert_eq!(format!("{error}"), "TypeError: Point is not a constructor");
///
/// let error = Thrown::Value(Value::from("boom"));
/// assert_eq!(format!("{error}"), "Uncaught boom");
/// ```
///
/// [`Function`]: crate::value::Function
#[derive(Debug, Clone)]
pub enum Thrown {
    /// An arbitrary value raised by a callback.
    Value(Value),
    /// The callee could not be invoked the way it was asked to be.
    TypeError(String),
}

impl Thrown {
    /// Creates a [`Thrown::TypeError`] with the given message.
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::TypeError(message.into())
    }

    /// Converts the failure back into a value, as a catch clause would see it.
    pub fn into_value(self) -> Value {
        match self {
            Self::Value(value) => value,
            Self::TypeError(message) => Value::from(format!("TypeError: {message}")),
        }
    }
}

impl PartialEq for Thrown {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(left), Self::Value(right)) => left == right,
            (Self::TypeError(left), Self::TypeError(right)) => left == right,
            _ => false,
        }
    }
}

impl std::fmt::Display for Thrown {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(value) => write!(formatter, "Uncaught {value}"),
            Self::TypeError(message) => write!(formatter, "TypeError: {message}"),
        }
    }
}

impl std::error::Error for Thrown {}

impl From<Value> for Thrown {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}
