//! A [`Subject`] is both an observer and an observable: every value pushed
//! into it is broadcast to the subscribers it has at that moment.

use std::{
  cell::RefCell,
  rc::{Rc, Weak},
};

use crate::prelude::*;

/// Multicasts values to its current subscribers.
///
/// Once terminated, later subscribers immediately receive the same terminal
/// signal. Clones share the same subscriber list.
///
/// # Re-Entrancy Policy
///
/// - Emissions are not re-entrant: calling `next`, `error` or `complete` on a
///   subject from inside a callback it is currently invoking panics (see
///   [`Subscriber`]).
/// - Subscribing and unsubscribing inside callbacks is allowed. The change is
///   seen from the next emission on.
pub struct Subject<Item> {
  inner: Rc<RefCell<SubjectState<Item>>>,
}

struct SubjectState<Item> {
  observers: Vec<(usize, Subscriber<Item>)>,
  next_id: usize,
  terminal: Option<Terminal>,
  disposed: bool,
}

#[derive(Clone)]
enum Terminal {
  Completed,
  Failed(Error),
}

impl<Item> Clone for Subject<Item> {
  fn clone(&self) -> Self { Subject { inner: self.inner.clone() } }
}

impl<Item: Clone + 'static> Default for Subject<Item> {
  fn default() -> Self { Self::new() }
}

impl<Item: Clone + 'static> Subject<Item> {
  pub fn new() -> Self {
    Subject {
      inner: Rc::new(RefCell::new(SubjectState {
        observers: vec![],
        next_id: 0,
        terminal: None,
        disposed: false,
      })),
    }
  }

  /// Number of subscribers currently attached.
  pub fn observer_count(&self) -> usize { self.inner.borrow().observers.len() }

  #[inline]
  pub fn has_observers(&self) -> bool { self.observer_count() > 0 }

  /// True once `error` or `complete` was called.
  pub fn is_stopped(&self) -> bool { self.inner.borrow().terminal.is_some() }

  /// Broadcasts `value`. Subscribers added or removed while broadcasting only
  /// see the change from the next value on.
  pub fn next(&self, value: Item) {
    let observers = match self.snapshot() {
      Some(observers) => observers,
      None => return,
    };
    let mut iter = observers.into_iter().peekable();
    while let Some(observer) = iter.next() {
      if iter.peek().is_some() {
        observer.next(value.clone());
      } else {
        observer.next(value);
        break;
      }
    }
  }

  pub fn error(&self, err: Error) {
    for observer in self.terminate(Terminal::Failed(err.clone())) {
      observer.error(err.clone());
    }
  }

  pub fn complete(&self) {
    for observer in self.terminate(Terminal::Completed) {
      observer.complete();
    }
  }

  fn snapshot(&self) -> Option<Vec<Subscriber<Item>>> {
    let state = self.inner.borrow();
    if state.disposed {
      tracing::debug!("value pushed into a disposed subject");
      return None;
    }
    if state.terminal.is_some() {
      return None;
    }
    Some(state.observers.iter().map(|(_, o)| o.clone()).collect())
  }

  fn terminate(&self, terminal: Terminal) -> Vec<Subscriber<Item>> {
    let mut state = self.inner.borrow_mut();
    if state.disposed || state.terminal.is_some() {
      return vec![];
    }
    state.terminal = Some(terminal);
    std::mem::take(&mut state.observers)
      .into_iter()
      .map(|(_, o)| o)
      .collect()
  }
}

fn remove_observer<Item>(state: &Weak<RefCell<SubjectState<Item>>>, id: usize) {
  if let Some(state) = state.upgrade() {
    state.borrow_mut().observers.retain(|(i, _)| *i != id);
  }
}

impl<Item: Clone + 'static> Observable for Subject<Item> {
  type Item = Item;

  fn subscribe_core(&self, subscriber: Subscriber<Item>) -> Result<Subscription, Error> {
    let mut state = self.inner.borrow_mut();
    if state.disposed {
      return Err(Error::ObjectDisposed);
    }
    match state.terminal.clone() {
      Some(Terminal::Completed) => {
        drop(state);
        subscriber.complete();
        Ok(Subscription::empty())
      }
      Some(Terminal::Failed(err)) => {
        drop(state);
        subscriber.error(err);
        Ok(Subscription::empty())
      }
      None => {
        let id = state.next_id;
        state.next_id += 1;
        state.observers.push((id, subscriber));
        let weak = Rc::downgrade(&self.inner);
        Ok(Subscription::from_fn(move || remove_observer(&weak, id)))
      }
    }
  }
}

impl<Item: Clone + 'static> Observer<Item> for Subject<Item> {
  #[inline]
  fn next(&mut self, value: Item) { Subject::next(self, value) }

  #[inline]
  fn error(&mut self, err: Error) { Subject::error(self, err) }

  #[inline]
  fn complete(&mut self) { Subject::complete(self) }
}

/// Disposing a subject drops every subscriber without notifying it; later
/// subscriptions fail with [`Error::ObjectDisposed`].
impl<Item> Disposable for Subject<Item> {
  fn dispose(&self) {
    let observers = {
      let mut state = self.inner.borrow_mut();
      state.disposed = true;
      std::mem::take(&mut state.observers)
    };
    drop(observers);
  }

  fn is_disposed(&self) -> bool { self.inner.borrow().disposed }
}
