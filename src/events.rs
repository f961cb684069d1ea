//! Listener registry with scoped subscriptions.
//!
//! Every scroll, resize, mouse or timer callback in the behaviour layer is
//! registered through a [`Listeners`] set. Registration returns a
//! [`Subscription`]; dropping it removes the callback, so a component that is
//! torn down can never leave a callback behind that refers to stale state.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`), mirroring the
//! browser's cooperative event loop.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

type Callback<E> = Box<dyn FnMut(&E)>;

struct Registry<E> {
    next_id: u64,
    callbacks: BTreeMap<u64, Rc<RefCell<Callback<E>>>>,
}

/// A set of callbacks for one event type.
pub struct Listeners<E> {
    inner: Rc<RefCell<Registry<E>>>,
}

impl<E: 'static> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> Listeners<E> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                next_id: 0,
                callbacks: BTreeMap::new(),
            })),
        }
    }

    /// Register a callback. It stays registered until the returned
    /// [`Subscription`] is dropped or [`Subscription::cancel`]led.
    #[must_use = "dropping the subscription immediately unregisters the callback"]
    pub fn subscribe(&self, callback: impl FnMut(&E) + 'static) -> Subscription {
        let mut registry = self.inner.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry
            .callbacks
            .insert(id, Rc::new(RefCell::new(Box::new(callback))));

        let weak: Weak<RefCell<Registry<E>>> = Rc::downgrade(&self.inner);
        Subscription {
            remove: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().callbacks.remove(&id);
                }
            })),
        }
    }

    /// Deliver an event to every live callback, in registration order.
    ///
    /// The registry is not borrowed while callbacks run, so a callback may
    /// subscribe or cancel other subscriptions. A callback cancelled earlier
    /// in the same emit is skipped; one subscribed during it waits for the
    /// next emit.
    pub fn emit(&self, event: &E) {
        let snapshot: Vec<(u64, Rc<RefCell<Callback<E>>>)> = self
            .inner
            .borrow()
            .callbacks
            .iter()
            .map(|(id, cb)| (*id, cb.clone()))
            .collect();
        for (id, callback) in snapshot {
            if !self.inner.borrow().callbacks.contains_key(&id) {
                continue;
            }
            if let Ok(mut cb) = callback.try_borrow_mut() {
                (cb)(event);
            }
        }
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.inner.borrow().callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle for a registered callback. Unregisters on drop.
pub struct Subscription {
    remove: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Unregister now. Equivalent to dropping the handle.
    pub fn cancel(mut self) {
        self.unsubscribe();
    }

    fn unsubscribe(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.remove.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn emit_reaches_subscribers() {
        let listeners: Listeners<u32> = Listeners::new();
        let seen = Rc::new(Cell::new(0));
        let s = seen.clone();
        let _sub = listeners.subscribe(move |v| s.set(s.get() + *v));
        listeners.emit(&3);
        listeners.emit(&4);
        assert_eq!(seen.get(), 7);
    }

    #[test]
    fn drop_unsubscribes() {
        let listeners: Listeners<()> = Listeners::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let sub = listeners.subscribe(move |_| h.set(h.get() + 1));
        assert_eq!(listeners.len(), 1);
        drop(sub);
        assert!(listeners.is_empty());
        listeners.emit(&());
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn cancel_unsubscribes() {
        let listeners: Listeners<()> = Listeners::new();
        let sub = listeners.subscribe(|_| {});
        sub.cancel();
        assert!(listeners.is_empty());
    }

    #[test]
    fn subscription_outliving_registry_is_harmless() {
        let listeners: Listeners<()> = Listeners::new();
        let sub = listeners.subscribe(|_| {});
        drop(listeners);
        drop(sub);
    }

    #[test]
    fn callbacks_run_in_registration_order() {
        let listeners: Listeners<()> = Listeners::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let a = order.clone();
        let b = order.clone();
        let _s1 = listeners.subscribe(move |_| a.borrow_mut().push(1));
        let _s2 = listeners.subscribe(move |_| b.borrow_mut().push(2));
        listeners.emit(&());
        assert_eq!(*order.borrow(), vec![1, 2]);
    }

    #[test]
    fn callback_dropped_mid_emit_is_skipped() {
        let listeners: Listeners<()> = Listeners::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let b_hits = Rc::new(Cell::new(0));

        let s = slot.clone();
        let _a = listeners.subscribe(move |_| {
            s.borrow_mut().take();
        });
        let h = b_hits.clone();
        *slot.borrow_mut() = Some(listeners.subscribe(move |_| h.set(h.get() + 1)));

        listeners.emit(&());
        assert_eq!(b_hits.get(), 0);
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn callback_added_mid_emit_waits_for_next_emit() {
        let listeners = Rc::new(Listeners::<()>::new());
        let hits = Rc::new(Cell::new(0));
        let held: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));

        let l = Rc::downgrade(&listeners);
        let h = hits.clone();
        let k = held.clone();
        let _a = listeners.subscribe(move |_| {
            let Some(l) = l.upgrade() else { return };
            if !k.borrow().is_empty() {
                return;
            }
            let h = h.clone();
            let sub = l.subscribe(move |_| h.set(h.get() + 1));
            k.borrow_mut().push(sub);
        });

        listeners.emit(&());
        assert_eq!(hits.get(), 0);
        listeners.emit(&());
        assert_eq!(hits.get(), 1);
    }
}
