//! Typed publish/subscribe for data-carrying notifications.
//!
//! Subscriptions are keyed by the payload's static type. The bus is meant to
//! live on the navigation thread; it uses interior mutability so callbacks
//! may subscribe, unsubscribe or dispatch again while a dispatch is running.

use std::any::{Any, TypeId};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rustc_hash::FxHashMap;

type Callback<T> = Rc<dyn Fn(&T)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    type_id: TypeId,
    seq: u64,
}

struct Subscriber {
    seq: u64,
    // Holds a `Callback<T>` for the `T` this list is keyed by.
    callback: Box<dyn Any>,
}

#[derive(Default)]
pub struct EventBus {
    subscribers: RefCell<FxHashMap<TypeId, Vec<Subscriber>>>,
    next_seq: Cell<u64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<T: 'static>(&self, callback: impl Fn(&T) + 'static) -> SubscriptionId {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        let type_id = TypeId::of::<T>();
        let callback: Callback<T> = Rc::new(callback);
        self.subscribers
            .borrow_mut()
            .entry(type_id)
            .or_default()
            .push(Subscriber {
                seq,
                callback: Box::new(callback),
            });
        tracing::trace!(payload = std::any::type_name::<T>(), seq, "subscribe");
        SubscriptionId { type_id, seq }
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let Some(list) = subscribers.get_mut(&id.type_id) else {
            return false;
        };
        let before = list.len();
        list.retain(|s| s.seq != id.seq);
        let removed = list.len() != before;
        if list.is_empty() {
            subscribers.remove(&id.type_id);
        }
        removed
    }

    /// Delivers `value` to every subscriber of `T` registered when the call
    /// starts, in registration order. Returns how many were invoked.
    pub fn dispatch<T: 'static>(&self, value: T) -> usize {
        let snapshot: Vec<Callback<T>> = {
            let subscribers = self.subscribers.borrow();
            match subscribers.get(&TypeId::of::<T>()) {
                Some(list) => list
                    .iter()
                    .filter_map(|s| s.callback.downcast_ref::<Callback<T>>().cloned())
                    .collect(),
                None => Vec::new(),
            }
        };
        tracing::trace!(
            payload = std::any::type_name::<T>(),
            subscribers = snapshot.len(),
            "dispatch"
        );
        for callback in &snapshot {
            callback(&value);
        }
        snapshot.len()
    }

    pub fn subscriber_count<T: 'static>(&self) -> usize {
        self.subscribers
            .borrow()
            .get(&TypeId::of::<T>())
            .map_or(0, Vec::len)
    }

    pub fn clear<T: 'static>(&self) {
        self.subscribers.borrow_mut().remove(&TypeId::of::<T>());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/event_bus.rs"]
mod tests;
