//! Callable values: ordinary functions and classes.

use std::rc::Rc;

use super::{Object, Value};
use crate::error::Thrown;

pub(crate) type CallBody = dyn Fn(&Value, &[Value]) -> Result<Value, Thrown>;
pub(crate) type InitBody = dyn Fn(&Value, &[Value]) -> Result<(), Thrown>;

#[derive(Clone)]
pub(crate) enum Body {
    /// Invoked with `this` and the arguments; returns a value.
    Call(Rc<CallBody>),
    /// Initializes a freshly allocated instance. Only constructible.
    Class(Rc<InitBody>),
}

struct FunctionData {
    name: Rc<str>,
    body: Body,
    statics: Object,
    prototype: Option<Object>,
}

/// A dynamic callable value.
///
/// A function owns a `statics` object holding its static members and, when
/// it is constructible, a `prototype` object that instances are linked to.
/// The prototype is the capability table of the instances: methods placed
/// there are reachable from every instance through [`Value::invoke`].
///
/// # Examples
///
/// ```rust
/// use reactor_utils::value::{Function, Value};
///
/// let add = Function::new("add", |_this, arguments| {
///     let sum: f64 = arguments.iter().filter_map(Value::as_number).sum();
///     Ok(Value::from(sum))
/// });
///
/// let result = add.call(&Value::Undefined, &[Value::from(1), Value::from(2)]);
/// assert_eq!(result, Ok(Value::from(3)));
/// ```
#[derive(Clone)]
pub struct Function(Rc<FunctionData>);

impl Function {
    /// Creates an ordinary function that cannot be constructed.
    pub fn new<F>(name: impl Into<Rc<str>>, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, Thrown> + 'static,
    {
        Self::from_parts(name.into(), Body::Call(Rc::new(body)), Object::new(), None)
    }

    /// Creates an ordinary function that can also be constructed.
    ///
    /// When constructed, `body` runs with `this` bound to a new instance; an
    /// object-typed return value replaces the instance.
    pub fn constructor<F>(name: impl Into<Rc<str>>, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, Thrown> + 'static,
    {
        Self::from_parts(
            name.into(),
            Body::Call(Rc::new(body)),
            Object::new(),
            Some(Object::new()),
        )
    }

    /// Creates a class: constructible only, `initialize` fills in the new
    /// instance passed as `this`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reactor_utils::value::{Function, Value};
    ///
    /// let point = Function::class("Point", |this, arguments| {
    ///     this.set("x", arguments.first().cloned().unwrap_or_default());
    ///     Ok(())
    /// });
    ///
    /// let instance = point.construct(&[Value::from(3)]).unwrap();
    /// assert_eq!(instance.get("x"), Value::from(3));
    /// assert!(instance.instance_of(&point));
    /// assert!(point.call(&Value::Undefined, &[]).is_err());
    /// ```
    pub fn class<F>(name: impl Into<Rc<str>>, initialize: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<(), Thrown> + 'static,
    {
        Self::from_parts(
            name.into(),
            Body::Class(Rc::new(initialize)),
            Object::new(),
            Some(Object::new()),
        )
    }

    pub(crate) fn from_parts(
        name: Rc<str>,
        body: Body,
        statics: Object,
        prototype: Option<Object>,
    ) -> Self {
        Self(Rc::new(FunctionData {
            name,
            body,
            statics,
            prototype,
        }))
    }

    /// Returns the function's name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Returns the object holding the static members.
    pub fn statics(&self) -> &Object {
        &self.0.statics
    }

    /// Returns the instance capability table, if the function is
    /// constructible.
    pub fn prototype(&self) -> Option<&Object> {
        self.0.prototype.as_ref()
    }

    /// Looks up a static member, following inherited statics.
    pub fn get_static(&self, key: &str) -> Value {
        self.0.statics.get(key)
    }

    /// Writes a static member.
    pub fn set_static(&self, key: impl Into<Rc<str>>, value: Value) -> bool {
        self.0.statics.set(key, value)
    }

    /// Returns `true` for classes.
    pub fn is_class(&self) -> bool {
        matches!(self.0.body, Body::Class(_))
    }

    /// Returns `true` if [`Function::construct`] can succeed.
    pub fn is_constructible(&self) -> bool {
        self.0.prototype.is_some()
    }

    /// Calls the function with the given receiver and arguments.
    ///
    /// # Errors
    ///
    /// Propagates whatever the body raises. Calling a class fails with
    /// [`Thrown::TypeError`].
    pub fn call(&self, this: &Value, arguments: &[Value]) -> Result<Value, Thrown> {
        match &self.0.body {
            Body::Call(body) => body(this, arguments),
            Body::Class(_) => Err(Thrown::type_error(format!(
                "Class constructor {} cannot be invoked without 'new'",
                self.0.name
            ))),
        }
    }

    /// Constructs a new instance.
    ///
    /// # Errors
    ///
    /// Propagates whatever the body raises. Constructing a function without
    /// a prototype fails with [`Thrown::TypeError`].
    pub fn construct(&self, arguments: &[Value]) -> Result<Value, Thrown> {
        let Some(prototype) = &self.0.prototype else {
            return Err(Thrown::type_error(format!(
                "{} is not a constructor",
                self.0.name
            )));
        };
        let instance = Value::Object(Object::with_prototype(Some(prototype.clone())));

        match &self.0.body {
            Body::Class(initialize) => {
                initialize(&instance, arguments)?;
                Ok(instance)
            }
            Body::Call(body) => {
                let result = body(&instance, arguments)?;
                if crate::predicate::is_object(&result) {
                    Ok(result)
                } else {
                    Ok(instance)
                }
            }
        }
    }

    /// Returns `true` if both handles refer to the same function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for Function {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{:?}", Value::Function(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_plain_function_is_not_constructible() {
        let function = Function::new("noop", |_, _| Ok(Value::Undefined));

        assert!(!function.is_constructible());
        assert_eq!(
            function.construct(&[]),
            Err(Thrown::type_error("noop is not a constructor"))
        );
    }

    #[rstest]
    fn test_constructor_receives_instance_as_this() {
        let counter = Function::constructor("Counter", |this, _| {
            this.set("count", Value::from(0));
            Ok(Value::Undefined)
        });

        let instance = counter.construct(&[]).unwrap();
        assert_eq!(instance.get("count"), Value::from(0));
        assert!(instance.instance_of(&counter));
    }

    #[rstest]
    fn test_constructor_returning_object_replaces_instance() {
        let replacement = Value::object([("replaced", Value::from(true))]);
        let returned = replacement.clone();
        let function = Function::constructor("Swap", move |_, _| Ok(returned.clone()));

        let result = function.construct(&[]).unwrap();
        assert_eq!(result, replacement);
    }

    #[rstest]
    fn test_class_initializer_failure_propagates() {
        let failing = Function::class("Failing", |_, _| Err(Thrown::Value(Value::from("nope"))));

        assert_eq!(
            failing.construct(&[]),
            Err(Thrown::Value(Value::from("nope")))
        );
    }
}
