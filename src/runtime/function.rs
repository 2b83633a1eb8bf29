use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::runtime::value::Value;

static NEXT_FINGERPRINT: AtomicU64 = AtomicU64::new(1);

/// An opaque host callback with a fingerprint identity.
///
/// The fingerprint is drawn from a process-wide counter at construction and
/// is the sole basis for equality: two function values are equal iff they
/// originate from the same construction, regardless of callback behavior.
/// Clones share the fingerprint, so a value passed around the evaluator still
/// equals itself.
#[derive(Clone)]
pub struct FunValue {
    callback: Rc<dyn Fn(&[Value])>,
    fingerprint: u64,
}

impl FunValue {
    pub fn new(callback: impl Fn(&[Value]) + 'static) -> Self {
        Self {
            callback: Rc::new(callback),
            fingerprint: NEXT_FINGERPRINT.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Invoke the wrapped host callback.
    pub fn call(&self, args: &[Value]) {
        (self.callback)(args)
    }
}

impl PartialEq for FunValue {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint == other.fingerprint
    }
}

impl fmt::Debug for FunValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunValue")
            .field("fingerprint", &self.fingerprint)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for FunValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fun<{}>", self.fingerprint)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn independent_constructions_are_never_equal() {
        let a = FunValue::new(|_| {});
        let b = FunValue::new(|_| {});
        assert_ne!(a, b);
    }

    #[test]
    fn clones_share_identity() {
        let a = FunValue::new(|_| {});
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn equality_ignores_callback_behavior() {
        // Same body, different construction: still distinct values.
        let a = FunValue::new(|_| {});
        let b = FunValue::new(|_| {});
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn call_invokes_the_callback() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let fun = FunValue::new(move |args| {
            counter.set(counter.get() + args.len());
        });
        fun.call(&[Value::Number(1.0), Value::Number(2.0)]);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn display_names_the_fingerprint() {
        let fun = FunValue::new(|_| {});
        assert_eq!(fun.to_string(), format!("fun<{}>", fun.fingerprint()));
    }
}
