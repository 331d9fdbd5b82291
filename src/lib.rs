//! # reactor-utils
//!
//! Generic runtime helpers over a small dynamic value model.
//!
//! ## Overview
//!
//! The crate normalizes value-type inspection and provides a handful of
//! functional-programming primitives. It has no opinion about what the
//! values mean; a state container or a reactive computation layer can sit
//! on top of it without the helpers knowing.
//!
//! - **Value model**: [`Value`](value::Value) with shared
//!   [`Array`](value::Array), [`Object`](value::Object) and
//!   [`Function`](value::Function) handles
//! - **Type Predicates**: `is_string`, `is_array`, `is_function`, `is_object`
//! - **Object Composition**: shallow `extend` and `clone`
//! - **Generic Iterator**: `each` over indexed or keyed collections, with
//!   early exit
//! - **Functional Helpers**: `partial` and `to_factory`
//!
//! ## Feature Flags
//!
//! - `composition`: `extend`, `clone`
//! - `iterate`: `each` and its variants
//! - `functional`: `partial`, `to_factory`
//! - `serde`: `Serialize`/`Deserialize` for `Value`
//! - `tracing`: trace-level events from the helpers
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use reactor_utils::prelude::*;
//!
//! let settings = extend(
//!     Value::new_object(),
//!     &[Value::object([("retries", Value::from(3))])],
//! );
//!
//! let mut keys = Vec::new();
//! each(&settings, |_, key, _| keys.push(key.to_string()));
//! assert_eq!(keys, vec!["retries"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

#[macro_use]
mod trace;

/// Prelude module for convenient imports.
///
/// Re-exports every helper under its own name.
///
/// # Usage
///
/// ```rust
/// use reactor_utils::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::Thrown;
    pub use crate::predicate::{TypeOf, is_array, is_function, is_object, is_string, tag_of, type_of};
    pub use crate::value::{Array, Function, Key, Object, Tag, Value};

    #[cfg(feature = "composition")]
    pub use crate::composition::{clone, extend};

    #[cfg(feature = "iterate")]
    pub use crate::iterate::{Collection, IterationControl, each, each_with, is_length, try_each};

    #[cfg(feature = "functional")]
    pub use crate::functional::{partial, to_factory};
}

pub mod error;
pub mod predicate;
pub mod value;

#[cfg(feature = "composition")]
pub mod composition;

#[cfg(feature = "iterate")]
pub mod iterate;

#[cfg(feature = "functional")]
pub mod functional;
