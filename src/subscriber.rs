use std::{
  cell::{Cell, RefCell, RefMut},
  rc::Rc,
};

use crate::{
  error::Error,
  observer::Observer,
  subscription::{Disposable, SingleAssignmentDisposable, Subscription},
};

/// The observer handed to `subscribe_core`.
///
/// Wraps the consumer's observer and enforces the observer grammar:
/// `next* (error | complete)?`. After the first terminal signal, or after
/// `dispose`, every signal is dropped. A terminal signal also disposes the
/// upstream subscription, so sources release their resources as soon as they
/// finish.
///
/// Cloning is cheap and clones share state; sources clone it into scheduled
/// work and event handlers.
///
/// # Re-Entrancy Policy
///
/// Signals are not re-entrant. Emitting into a subscriber from inside one of
/// its own callbacks, for example an observer of `from_event` that emits the
/// same event again, panics. Disposing from inside a callback is fine. Put an
/// explicit scheduler hop between the two if you need a feedback loop.
pub struct Subscriber<Item>(Rc<Inner<Item>>);

struct Inner<Item> {
  observer: RefCell<Box<dyn Observer<Item>>>,
  stopped: Cell<bool>,
  upstream: SingleAssignmentDisposable,
}

impl<Item> Clone for Subscriber<Item> {
  fn clone(&self) -> Self { Subscriber(self.0.clone()) }
}

/// Detaches the subscriber when dropped: always for terminal signals, only
/// while unwinding for `next`.
struct Detach<'a, Item> {
  inner: &'a Inner<Item>,
  always: bool,
}

impl<Item> Drop for Detach<'_, Item> {
  fn drop(&mut self) {
    if self.always || std::thread::panicking() {
      self.inner.stopped.set(true);
      self.inner.upstream.dispose();
    }
  }
}

impl<Item> Subscriber<Item> {
  pub fn new(observer: impl Observer<Item> + 'static) -> Self {
    Subscriber(Rc::new(Inner {
      observer: RefCell::new(Box::new(observer)),
      stopped: Cell::new(false),
      upstream: SingleAssignmentDisposable::new(),
    }))
  }

  pub fn next(&self, value: Item) {
    if self.is_stopped() {
      return;
    }
    let _detach = Detach { inner: &self.0, always: false };
    self.observer().next(value);
  }

  pub fn error(&self, err: Error) {
    if self.0.stopped.replace(true) {
      return;
    }
    let _detach = Detach { inner: &self.0, always: true };
    self.observer().error(err);
  }

  pub fn complete(&self) {
    if self.0.stopped.replace(true) {
      return;
    }
    let _detach = Detach { inner: &self.0, always: true };
    self.observer().complete();
  }

  fn observer(&self) -> RefMut<'_, Box<dyn Observer<Item>>> {
    match self.0.observer.try_borrow_mut() {
      Ok(observer) => observer,
      Err(_) => panic!(
        "re-entrant emissions are not supported (next/error/complete). Use an explicit \
         scheduler hop if you need feedback loops."
      ),
    }
  }

  /// Delivers `err` if the subscriber is still running, otherwise hands it
  /// back so the caller can surface it another way.
  pub fn fail(&self, err: Error) -> Result<(), Error> {
    if self.is_stopped() {
      Err(err)
    } else {
      self.error(err);
      Ok(())
    }
  }

  /// True once a terminal signal was delivered or the subscriber was
  /// disposed.
  #[inline]
  pub fn is_stopped(&self) -> bool { self.0.stopped.get() }

  /// Attaches the subscription returned by `subscribe_core`. If the
  /// subscriber already stopped, `upstream` is disposed right away.
  pub(crate) fn set_upstream(&self, upstream: Subscription) {
    if let Err(extra) = self.0.upstream.set(upstream) {
      tracing::debug!("subscriber upstream assigned twice, disposing the extra one");
      extra.dispose();
    }
  }
}

impl<Item> Disposable for Subscriber<Item> {
  fn dispose(&self) {
    self.0.stopped.set(true);
    self.0.upstream.dispose();
  }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.upstream.is_disposed() }
}

impl<Item> Observer<Item> for Subscriber<Item> {
  #[inline]
  fn next(&mut self, value: Item) { Subscriber::next(self, value) }

  #[inline]
  fn error(&mut self, err: Error) { Subscriber::error(self, err) }

  #[inline]
  fn complete(&mut self) { Subscriber::complete(self) }
}
