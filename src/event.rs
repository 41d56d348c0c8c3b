//! A minimal named-event source for [`from_event`](crate::observable::from_event).

use std::cell::{Cell, RefCell};

use crate::observable::Handler;

/// Identifies one registration made through [`EventTarget::add_listener`].
pub type ListenerId = u64;

/// Something listeners can be attached to by event name.
pub trait EventTarget {
  type Event: Clone + 'static;

  fn add_listener(&self, event: &str, handler: Handler<Self::Event>) -> ListenerId;

  fn remove_listener(&self, event: &str, id: ListenerId);
}

/// Dispatches named events to the listeners registered for them.
///
/// `emit` calls the listeners registered when it started, in registration
/// order. Listeners may add or remove listeners while being called.
pub struct EventEmitter<T> {
  listeners: RefCell<Vec<Listener<T>>>,
  next_id: Cell<ListenerId>,
}

struct Listener<T> {
  event: String,
  id: ListenerId,
  handler: Handler<T>,
}

impl<T> Default for EventEmitter<T> {
  fn default() -> Self { EventEmitter { listeners: RefCell::new(vec![]), next_id: Cell::new(0) } }
}

impl<T: Clone> EventEmitter<T> {
  pub fn new() -> Self { Self::default() }

  pub fn on(&self, event: &str, handler: Handler<T>) -> ListenerId {
    let id = self.next_id.get();
    self.next_id.set(id + 1);
    self
      .listeners
      .borrow_mut()
      .push(Listener { event: event.to_owned(), id, handler });
    id
  }

  /// Returns whether a listener was removed.
  pub fn off(&self, event: &str, id: ListenerId) -> bool {
    let mut listeners = self.listeners.borrow_mut();
    let before = listeners.len();
    listeners.retain(|l| !(l.id == id && l.event == event));
    listeners.len() != before
  }

  pub fn emit(&self, event: &str, value: T) {
    let handlers: Vec<Handler<T>> = self
      .listeners
      .borrow()
      .iter()
      .filter(|l| l.event == event)
      .map(|l| l.handler.clone())
      .collect();
    for handler in handlers {
      handler(value.clone());
    }
  }

  pub fn listener_count(&self, event: &str) -> usize {
    self.listeners.borrow().iter().filter(|l| l.event == event).count()
  }
}

impl<T: Clone + 'static> EventTarget for EventEmitter<T> {
  type Event = T;

  #[inline]
  fn add_listener(&self, event: &str, handler: Handler<T>) -> ListenerId { self.on(event, handler) }

  fn remove_listener(&self, event: &str, id: ListenerId) {
    if !self.off(event, id) {
      tracing::debug!(event, id, "removing a listener that is not registered");
    }
  }
}
