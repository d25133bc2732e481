//! Shared UI state with change notification.
//!
//! [`Observable<T>`] is a single-threaded cell: handles are cheap clones of
//! the same `Rc<RefCell<..>>`, writers call `set`, and subscribers are
//! notified in registration order when the value actually changes.
//! Subscriptions are RAII guards: dropping a [`Subscription`] unsubscribes.
//!
//! [`ActiveIndex`] layers the "which job is highlighted" invariant on top:
//! every write is clamped into `0..len`.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

struct Inner<T> {
    value: T,
    /// Incremented by one on every value-changing write.
    version: u64,
    /// Dead entries are pruned on notify.
    subscribers: Vec<CallbackWeak<T>>,
}

/// A shared, version-tracked value with change notification.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Store `value`. Equal values are a no-op; otherwise the version is
    /// bumped and live subscribers run. Returns whether the value changed.
    ///
    /// Safe to call from inside another observable's subscriber.
    pub fn set(&self, value: T) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return false;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
        true
    }

    /// Register `callback` for future changes. Drop the returned guard to
    /// unsubscribe.
    #[must_use = "dropping the subscription immediately unsubscribes"]
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Live subscriber count.
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    fn notify(&self) {
        // Collect first so callbacks run without the borrow held.
        let (value, callbacks): (T, Vec<CallbackRc<T>>) = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            let callbacks = inner.subscribers.iter().filter_map(Weak::upgrade).collect();
            (inner.value.clone(), callbacks)
        };
        for callback in callbacks {
            callback(&value);
        }
    }
}

/// Keeps a subscriber alive. Dropping it unsubscribes.
pub struct Subscription {
    _guard: Box<dyn Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Subscription")
    }
}

/// Index of the highlighted experience.
///
/// Two writers share it: the scroll mapper and direct clicks on a block or
/// progress dot. There is no arbitration beyond "last write wins".
#[derive(Clone)]
pub struct ActiveIndex {
    cell: Observable<usize>,
    len: usize,
}

impl fmt::Debug for ActiveIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveIndex")
            .field("index", &self.get())
            .field("len", &self.len)
            .finish()
    }
}

impl ActiveIndex {
    /// A cell over `len` items, starting at 0.
    pub fn new(len: usize) -> Self {
        Self {
            cell: Observable::new(0),
            len,
        }
    }

    pub fn get(&self) -> usize {
        self.cell.get()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store `index`, clamped into range. Returns the stored value.
    pub fn set(&self, index: usize) -> usize {
        let clamped = index.min(self.len.saturating_sub(1));
        if clamped != index {
            log::warn!("active index {index} out of range, clamped to {clamped}");
        }
        if self.cell.set(clamped) {
            log::debug!("active index -> {clamped}");
        }
        clamped
    }

    /// Back to the first item.
    pub fn reset(&self) {
        self.set(0);
    }

    pub fn version(&self) -> u64 {
        self.cell.version()
    }

    #[must_use = "dropping the subscription immediately unsubscribes"]
    pub fn subscribe(&self, callback: impl Fn(&usize) + 'static) -> Subscription {
        self.cell.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn set_equal_value_is_noop() {
        let obs = Observable::new(3);
        assert!(!obs.set(3));
        assert_eq!(obs.version(), 0);
        assert!(obs.set(4));
        assert_eq!(obs.version(), 1);
    }

    #[test]
    fn subscribers_run_in_registration_order() {
        let obs = Observable::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));
        let l1 = Rc::clone(&log);
        let _a = obs.subscribe(move |v| l1.borrow_mut().push(("a", *v)));
        let l2 = Rc::clone(&log);
        let _b = obs.subscribe(move |v| l2.borrow_mut().push(("b", *v)));
        obs.set(7);
        assert_eq!(*log.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let obs = Observable::new(0);
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let sub = obs.subscribe(move |_| h.set(h.get() + 1));
        obs.set(1);
        drop(sub);
        obs.set(2);
        assert_eq!(hits.get(), 1);
        assert_eq!(obs.subscriber_count(), 0);
    }

    #[test]
    fn clones_share_state() {
        let a = Observable::new(1);
        let b = a.clone();
        b.set(5);
        assert_eq!(a.get(), 5);
    }

    #[test]
    fn active_index_clamps_writes() {
        let active = ActiveIndex::new(5);
        assert_eq!(active.set(2), 2);
        assert_eq!(active.set(42), 4);
        assert_eq!(active.get(), 4);
        active.reset();
        assert_eq!(active.get(), 0);
    }

    #[test]
    fn active_index_notifies_only_on_change() {
        let active = ActiveIndex::new(3);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let _sub = active.subscribe(move |i| s.borrow_mut().push(*i));
        active.set(1);
        active.set(1);
        active.set(9);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn last_write_wins() {
        let active = ActiveIndex::new(5);
        let scroll_writer = active.clone();
        let click_writer = active.clone();
        scroll_writer.set(1);
        click_writer.set(3);
        assert_eq!(active.get(), 3);
        scroll_writer.set(1);
        assert_eq!(active.get(), 1);
    }

    #[test]
    fn empty_index_stays_zero() {
        let active = ActiveIndex::new(0);
        assert!(active.is_empty());
        assert_eq!(active.set(3), 0);
    }
}
