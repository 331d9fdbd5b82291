//! Keyed objects with an optional prototype link.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use super::{Value, array_index};

type Properties = IndexMap<Rc<str>, Value, FxBuildHasher>;

/// Internal classification attached to every [`Object`].
///
/// This is what a generic "`[object Tag]`" stringification would report, and
/// it is how boxed primitives and foreign arrays are recognized without
/// relying on which constructor produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// An ordinary keyed object.
    Object,
    /// An array that does not live in an [`Array`](super::Array) handle,
    /// e.g. one marshalled in from another realm.
    Array,
    /// A boxed string.
    String,
    /// A boxed number.
    Number,
    /// A boxed boolean.
    Boolean,
    /// An error object.
    Error,
}

impl Tag {
    /// The class name used in the `[object Name]` rendering.
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Object => "Object",
            Self::Array => "Array",
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Error => "Error",
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "[object {}]", self.class_name())
    }
}

struct ObjectData {
    tag: Tag,
    primitive: Option<Value>,
    properties: Properties,
    prototype: Option<Object>,
}

/// A shared, mutable, keyed object.
///
/// Cloning an `Object` clones the handle: both clones refer to the same
/// properties.
///
/// # Examples
///
/// ```rust
/// use reactor_utils::value::{Object, Value};
///
/// let object = Object::new();
/// object.set("b", Value::from(2));
/// object.set("a", Value::from(1));
/// object.set("1", Value::from("one"));
///
/// let keys: Vec<String> = object.own_keys().iter().map(|key| key.to_string()).collect();
/// assert_eq!(keys, vec!["1", "b", "a"]);
/// ```
#[derive(Clone)]
pub struct Object(Rc<RefCell<ObjectData>>);

impl Object {
    /// Creates an empty ordinary object with no prototype.
    pub fn new() -> Self {
        Self::build(Tag::Object, None, None)
    }

    /// Creates an empty ordinary object linked to `prototype`.
    pub fn with_prototype(prototype: Option<Self>) -> Self {
        Self::build(Tag::Object, None, prototype)
    }

    /// Creates an empty object carrying the given internal tag.
    pub fn tagged(tag: Tag) -> Self {
        Self::build(tag, None, None)
    }

    /// Wraps a primitive in an object.
    ///
    /// Strings, numbers and booleans get the matching [`Tag`]; a boxed string
    /// exposes its characters as own index keys and a `length`. Anything
    /// else yields an ordinary empty object.
    pub fn boxed(primitive: Value) -> Self {
        let tag = match primitive {
            Value::String(_) => Tag::String,
            Value::Number(_) => Tag::Number,
            Value::Bool(_) => Tag::Boolean,
            _ => return Self::new(),
        };
        Self::build(tag, Some(primitive), None)
    }

    fn build(tag: Tag, primitive: Option<Value>, prototype: Option<Self>) -> Self {
        Self(Rc::new(RefCell::new(ObjectData {
            tag,
            primitive,
            properties: Properties::default(),
            prototype,
        })))
    }

    /// Returns the internal tag.
    pub fn tag(&self) -> Tag {
        self.0.borrow().tag
    }

    /// Returns the wrapped primitive of a boxed object.
    pub fn primitive(&self) -> Option<Value> {
        self.0.borrow().primitive.clone()
    }

    /// Returns the prototype link.
    pub fn prototype(&self) -> Option<Self> {
        self.0.borrow().prototype.clone()
    }

    /// Replaces the prototype link.
    pub fn set_prototype(&self, prototype: Option<Self>) {
        self.0.borrow_mut().prototype = prototype;
    }

    fn boxed_chars(&self) -> Option<Vec<char>> {
        match &self.0.borrow().primitive {
            Some(Value::String(text)) => Some(text.chars().collect()),
            _ => None,
        }
    }

    /// Returns the own enumerable keys.
    ///
    /// Array-index keys come first in ascending numeric order, followed by
    /// all other keys in insertion order.
    pub fn own_keys(&self) -> Vec<Rc<str>> {
        let boxed_length = self.boxed_chars().map_or(0, |chars| chars.len());
        let data = self.0.borrow();

        let mut indices: Vec<(usize, Rc<str>)> = (0..boxed_length)
            .map(|index| (index, Rc::from(index.to_string())))
            .collect();
        let mut names = Vec::new();
        for key in data.properties.keys() {
            match array_index(key) {
                Some(index) => indices.push((index, Rc::clone(key))),
                None => names.push(Rc::clone(key)),
            }
        }
        indices.sort_by_key(|(index, _)| *index);

        indices.into_iter().map(|(_, key)| key).chain(names).collect()
    }

    /// Returns an own property, ignoring the prototype chain.
    pub fn get_own(&self, key: &str) -> Option<Value> {
        if let Some(chars) = self.boxed_chars() {
            if key == "length" {
                return Some(Value::from(chars.len()));
            }
            if let Some(character) = array_index(key).and_then(|index| chars.get(index)) {
                return Some(Value::from(character.to_string()));
            }
        }
        self.0.borrow().properties.get(key).cloned()
    }

    /// Returns `true` if `key` is an own property.
    pub fn has_own(&self, key: &str) -> bool {
        self.get_own(key).is_some()
    }

    /// Looks `key` up on this object and then along the prototype chain.
    ///
    /// Returns [`Value::Undefined`] when no object on the chain has it.
    pub fn get(&self, key: &str) -> Value {
        let mut current = Some(self.clone());
        while let Some(object) = current {
            if let Some(value) = object.get_own(key) {
                return value;
            }
            current = object.prototype();
        }
        Value::Undefined
    }

    /// Writes an own property.
    ///
    /// Returns `false` when the key is read-only (the characters and
    /// `length` of a boxed string).
    pub fn set(&self, key: impl Into<Rc<str>>, value: Value) -> bool {
        let key = key.into();
        if let Some(chars) = self.boxed_chars()
            && (&*key == "length" || array_index(&key).is_some_and(|index| index < chars.len()))
        {
            return false;
        }
        self.0.borrow_mut().properties.insert(key, value);
        true
    }

    /// Deletes an own property, keeping the order of the remaining keys.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.borrow_mut().properties.shift_remove(key)
    }

    /// Returns the number of own enumerable keys.
    pub fn len(&self) -> usize {
        self.own_keys().len()
    }

    /// Returns `true` if the object has no own enumerable keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if both handles refer to the same object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Object {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{:?}", Value::Object(self.clone()))
    }
}

impl<K: Into<Rc<str>>> FromIterator<(K, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iterator: I) -> Self {
        let object = Self::new();
        for (key, value) in iterator {
            object.set(key, value);
        }
        object
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_own_keys_put_indices_first() {
        let object: Object = [
            ("z", Value::Null),
            ("10", Value::Null),
            ("a", Value::Null),
            ("2", Value::Null),
            ("02", Value::Null),
        ]
        .into_iter()
        .collect();

        let keys: Vec<String> = object.own_keys().iter().map(|key| key.to_string()).collect();
        assert_eq!(keys, vec!["2", "10", "z", "a", "02"]);
    }

    #[rstest]
    fn test_get_walks_prototype_chain() {
        let base = Object::new();
        base.set("greeting", Value::from("hello"));
        let derived = Object::with_prototype(Some(base.clone()));

        assert_eq!(derived.get("greeting"), Value::from("hello"));
        assert_eq!(derived.get_own("greeting"), None);
        assert_eq!(derived.get("missing"), Value::Undefined);
    }

    #[rstest]
    fn test_boxed_string_exposes_characters() {
        let boxed = Object::boxed(Value::from("hi"));

        assert_eq!(boxed.tag(), Tag::String);
        assert_eq!(boxed.get_own("0"), Some(Value::from("h")));
        assert_eq!(boxed.get_own("length"), Some(Value::from(2)));
        assert!(!boxed.set("1", Value::from("x")));
        assert!(boxed.set("extra", Value::from(true)));

        let keys: Vec<String> = boxed.own_keys().iter().map(|key| key.to_string()).collect();
        assert_eq!(keys, vec!["0", "1", "extra"]);
    }

    #[rstest]
    fn test_remove_keeps_order() {
        let object: Object = [("a", Value::from(1)), ("b", Value::from(2)), ("c", Value::from(3))]
            .into_iter()
            .collect();

        assert_eq!(object.remove("b"), Some(Value::from(2)));
        let keys: Vec<String> = object.own_keys().iter().map(|key| key.to_string()).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[rstest]
    fn test_set_prototype_relinks_lookups() {
        let first = Object::new();
        first.set("origin", Value::from("first"));
        let second = Object::new();
        second.set("origin", Value::from("second"));
        let object = Object::with_prototype(Some(first));

        assert_eq!(object.get("origin"), Value::from("first"));
        object.set_prototype(Some(second.clone()));
        assert_eq!(object.get("origin"), Value::from("second"));
        assert!(object.prototype().is_some_and(|prototype| prototype.ptr_eq(&second)));

        object.set_prototype(None);
        assert_eq!(object.get("origin"), Value::Undefined);
    }

    #[rstest]
    fn test_has_own_ignores_prototype_but_sees_boxed_characters() {
        let base = Object::new();
        base.set("inherited", Value::Null);
        let derived = Object::with_prototype(Some(base));
        derived.set("own", Value::Undefined);

        assert!(derived.has_own("own"));
        assert!(!derived.has_own("inherited"));

        let boxed = Object::boxed(Value::from("ab"));
        assert!(boxed.has_own("1"));
        assert!(boxed.has_own("length"));
        assert!(!boxed.has_own("2"));
    }

    #[rstest]
    #[case(Tag::Array, "[object Array]")]
    #[case(Tag::String, "[object String]")]
    #[case(Tag::Object, "[object Object]")]
    #[case(Tag::Error, "[object Error]")]
    #[case(Tag::Number, "[object Number]")]
    #[case(Tag::Boolean, "[object Boolean]")]
    fn test_tag_display(#[case] tag: Tag, #[case] expected: &str) {
        assert_eq!(tag.to_string(), expected);
    }
}
