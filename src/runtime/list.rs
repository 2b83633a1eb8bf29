use crate::error::ValueError;
use crate::runtime::value::Value;

/// Ordered sequence of runtime values with two named ends: `back` is the
/// oldest element, `front` the most recently appended one.
///
/// Invariants: `len() == 0` iff both ends are `None`; iteration runs from
/// `back` to `front` in exactly `len()` steps.
#[derive(Debug, Clone, Default)]
pub struct List {
    items: Vec<Value>,
}

impl List {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The oldest element.
    pub fn back(&self) -> Option<&Value> {
        self.items.first()
    }

    /// The most recently appended element.
    pub fn front(&self) -> Option<&Value> {
        self.items.last()
    }

    /// Insert at the front end.
    pub fn append(&mut self, value: Value) {
        self.items.push(value);
    }

    /// Remove and return the front (most recently appended) element.
    pub fn pop(&mut self) -> Result<Value, ValueError> {
        self.items.pop().ok_or(ValueError::EmptyPop)
    }

    /// Iterate from `back` to `front`.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(values: I) -> Self {
        let mut list = Self::new();
        for value in values {
            list.append(value);
        }
        list
    }
}
