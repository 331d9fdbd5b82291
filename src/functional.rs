//! Higher-order helpers over dynamic [`Function`]s.
//!
//! - [`partial`]: fixes leading arguments without binding the receiver
//! - [`to_factory`]: turns a class into something that builds instances
//!   whether it is called or constructed
//!
//! # Examples
//!
//! ```rust
//! use reactor_utils::functional::partial;
//! use reactor_utils::value::{Function, Value};
//!
//! let add = Function::new("add", |_, arguments| {
//!     let sum: f64 = arguments.iter().filter_map(Value::as_number).sum();
//!     Ok(Value::from(sum))
//! });
//!
//! let add_one = partial(&add, [Value::from(1)]);
//! assert_eq!(add_one.call(&Value::Undefined, &[Value::from(2)]), Ok(Value::from(3)));
//! ```

use std::rc::Rc;

use smallvec::SmallVec;

use crate::value::{Body, Function, Object, Value};

/// Inline capacity for bound arguments; most partial applications fix one
/// or two.
const INLINE_ARGUMENTS: usize = 4;

type Arguments = SmallVec<[Value; INLINE_ARGUMENTS]>;

/// Returns a function that calls `function` with `bound` followed by the
/// arguments it receives.
///
/// Only the arguments are fixed. The receiver (`this`) the new function is
/// called with is passed through to `function` unchanged, so the result
/// still behaves as a method when attached to an object.
///
/// # Examples
///
/// ```rust
/// use reactor_utils::functional::partial;
/// use reactor_utils::value::{Function, Value};
///
/// let describe = Function::new("describe", |this, arguments| {
///     Ok(Value::from(format!("{} {} {}", this.get("name"), arguments[0], arguments[1])))
/// });
///
/// let object = Value::object([("name", Value::from("widget"))]);
/// object.set("greet", Value::from(partial(&describe, [Value::from("says")])));
///
/// assert_eq!(object.invoke("greet", &[Value::from("hi")]), Ok(Value::from("widget says hi")));
/// ```
pub fn partial(function: &Function, bound: impl IntoIterator<Item = Value>) -> Function {
    let bound: Rc<Arguments> = Rc::new(bound.into_iter().collect());
    let target = function.clone();

    trace_event!(
        function = target.name(),
        bound = bound.len(),
        "partial: wrapper created"
    );

    Function::new(format!("partial {}", function.name()), move |this, arguments| {
        let mut combined: SmallVec<[Value; 8]> = SmallVec::with_capacity(bound.len() + arguments.len());
        combined.extend(bound.iter().cloned());
        combined.extend(arguments.iter().cloned());
        target.call(this, &combined)
    })
}

/// Returns a factory for `class`.
///
/// The factory produces a new instance of `class` both when it is called
/// and when it is constructed, with the arguments passed through. Static
/// members of `class` resolve through the factory, and the factory shares
/// `class`'s prototype object rather than copying it: capabilities added to
/// `class` later show up on instances the factory builds, and those
/// instances are instances of both.
///
/// # Examples
///
/// ```rust
/// use reactor_utils::functional::to_factory;
/// use reactor_utils::value::{Function, Value};
///
/// let point = Function::class("Point", |this, arguments| {
///     this.set("x", arguments.first().cloned().unwrap_or_default());
///     Ok(())
/// });
/// point.set_static("origin", Value::from(0));
///
/// let factory = to_factory(&point);
/// let instance = factory.call(&Value::Undefined, &[Value::from(5)]).unwrap();
///
/// assert_eq!(instance.get("x"), Value::from(5));
/// assert!(instance.instance_of(&point));
/// assert_eq!(factory.get_static("origin"), Value::from(0));
/// ```
pub fn to_factory(class: &Function) -> Function {
    let target = class.clone();
    let statics = Object::with_prototype(Some(class.statics().clone()));

    trace_event!(class = class.name(), "to_factory: factory created");

    Function::from_parts(
        Rc::from(class.name()),
        Body::Call(Rc::new(move |_this: &Value, arguments: &[Value]| {
            target.construct(arguments)
        })),
        statics,
        class.prototype().cloned(),
    )
}
