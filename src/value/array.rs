//! Shared, growable sequences.

use std::cell::RefCell;
use std::rc::Rc;

use super::Value;

/// Most [`Value::Undefined`] slots a single [`Array::set`] fills in before
/// the written index.
pub const MAX_FILL: usize = 1 << 16;

/// A shared, mutable, ordered sequence of values.
///
/// Cloning an `Array` clones the handle. Use [`Array::to_vec`] or
/// [`clone`](crate::composition::clone) for a shallow copy.
///
/// # Examples
///
/// ```rust
/// use reactor_utils::value::{Array, Value};
///
/// let array = Array::from_vec(vec![Value::from(1)]);
/// let alias = array.clone();
/// alias.push(Value::from(2));
///
/// assert_eq!(array.len(), 2);
/// assert!(array.ptr_eq(&alias));
/// ```
#[derive(Clone, Default)]
pub struct Array(Rc<RefCell<Vec<Value>>>);

impl Array {
    /// Creates an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an array that owns `elements`.
    pub fn from_vec(elements: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(elements)))
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns `true` if the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Returns the element at `index`.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Writes the element at `index`, growing the array with
    /// [`Value::Undefined`] when `index` is past the end.
    ///
    /// Arrays are dense: a write that would leave more than [`MAX_FILL`]
    /// holes is ignored and returns `false`.
    pub fn set(&self, index: usize, value: Value) -> bool {
        let mut elements = self.0.borrow_mut();
        if index >= elements.len() {
            if index - elements.len() > MAX_FILL {
                return false;
            }
            elements.resize(index + 1, Value::Undefined);
        }
        elements[index] = value;
        true
    }

    /// Appends an element.
    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    /// Returns a snapshot of the elements.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    /// Returns `true` if both handles refer to the same array.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for Array {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{:?}", Value::Array(self.clone()))
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iterator: I) -> Self {
        Self::from_vec(iterator.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_set_past_end_fills_with_undefined() {
        let array = Array::new();
        assert!(array.set(2, Value::from("c")));

        assert_eq!(array.len(), 3);
        assert_eq!(array.get(0), Some(Value::Undefined));
        assert_eq!(array.get(2), Some(Value::from("c")));
    }

    #[rstest]
    fn test_set_rejects_writes_past_the_fill_limit() {
        let array = Array::from_vec(vec![Value::Null]);

        assert!(array.set(1 + MAX_FILL, Value::from("edge")));
        assert_eq!(array.len(), MAX_FILL + 2);
        assert!(!array.set(array.len() + MAX_FILL + 1, Value::from("far")));
        assert!(!array.set(4_294_967_294, Value::from("far")));
        assert_eq!(array.len(), MAX_FILL + 2);
    }

    #[rstest]
    fn test_to_vec_is_a_snapshot() {
        let array: Array = [Value::from(1), Value::from(2)].into_iter().collect();
        let snapshot = array.to_vec();
        array.push(Value::from(3));

        assert_eq!(snapshot.len(), 2);
        assert_eq!(array.len(), 3);
    }
}
