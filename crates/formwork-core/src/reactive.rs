//! Minimal single-owner reactive cells.
//!
//! `Observable` counts revisions and notifies subscribers on every change;
//! `Memo` caches one derived value keyed by the revisions it was built from.

use std::{cell::RefCell, fmt, rc::Rc};

///
/// SubscriptionId
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SubscriptionId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

///
/// Observable
///
/// Owned value plus a revision counter. Every `set`/`update` bumps the
/// revision and then runs the subscribers in subscription order.
///

pub struct Observable<T> {
    value: T,
    revision: u64,
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
}

impl<T> Observable<T> {
    pub const fn new(value: T) -> Self {
        Self {
            value,
            revision: 0,
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Monotonic change counter.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
        self.notify();
    }

    /// Mutate in place; always counts as a change.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let out = f(&mut self.value);
        self.notify();

        out
    }

    /// Mutate in place; only an `Ok` result counts as a change.
    /// `f` must leave the value untouched when it fails.
    pub fn try_update<R, E>(&mut self, f: impl FnOnce(&mut T) -> Result<R, E>) -> Result<R, E> {
        let out = f(&mut self.value)?;
        self.notify();

        Ok(out)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));

        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);

        self.listeners.len() != before
    }

    fn notify(&mut self) {
        self.revision += 1;

        for (_, listener) in &mut self.listeners {
            listener(&self.value);
        }
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

///
/// Memo
///

pub struct Memo<K, V> {
    cache: RefCell<Option<(K, Rc<V>)>>,
}

impl<K: PartialEq, V> Memo<K, V> {
    pub const fn new() -> Self {
        Self {
            cache: RefCell::new(None),
        }
    }

    /// Cached value if it was built for `key`, else `compute()` (cached).
    pub fn get_or_compute(&self, key: K, compute: impl FnOnce() -> V) -> Rc<V> {
        if let Some((cached_key, value)) = self.cache.borrow().as_ref()
            && *cached_key == key
        {
            return Rc::clone(value);
        }

        let value = Rc::new(compute());
        *self.cache.borrow_mut() = Some((key, Rc::clone(&value)));

        value
    }

    pub fn invalidate(&self) {
        self.cache.borrow_mut().take();
    }

    pub fn is_cached(&self) -> bool {
        self.cache.borrow().is_some()
    }
}

impl<K: PartialEq, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Memo<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memo")
            .field("cached", &self.cache.borrow().is_some())
            .finish()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn subscribers_see_every_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut cell = Observable::new(1);
        let id = cell.subscribe(move |v| sink.borrow_mut().push(*v));

        cell.set(2);
        cell.update(|v| *v += 1);
        assert!(cell.unsubscribe(id));
        cell.set(10);

        assert_eq!(*seen.borrow(), [2, 3]);
        assert_eq!(cell.revision(), 3);
        assert!(!cell.unsubscribe(id));
    }

    #[test]
    fn failed_try_update_is_not_a_change() {
        let mut cell = Observable::new(vec![1]);

        let err: Result<(), &str> = cell.try_update(|_| Err("nope"));
        assert!(err.is_err());
        assert_eq!(cell.revision(), 0);

        cell.try_update(|v| {
            v.push(2);
            Ok::<_, ()>(())
        })
        .unwrap();
        assert_eq!(cell.revision(), 1);
        assert_eq!(cell.get(), &[1, 2]);
    }

    #[test]
    fn memo_recomputes_only_on_new_key() {
        let runs = Cell::new(0);
        let memo: Memo<u64, String> = Memo::new();
        let compute = |tag: &str| {
            runs.set(runs.get() + 1);
            tag.to_string()
        };

        let a = memo.get_or_compute(1, || compute("a"));
        let b = memo.get_or_compute(1, || compute("b"));
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(runs.get(), 1);

        let c = memo.get_or_compute(2, || compute("c"));
        assert_eq!(*c, "c");
        assert_eq!(runs.get(), 2);

        memo.invalidate();
        assert!(!memo.is_cached());
    }
}
