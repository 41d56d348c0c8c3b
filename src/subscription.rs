use std::{
  cell::{Cell, RefCell},
  fmt::{Debug, Formatter},
  rc::Rc,
};

mod composite;
mod serial;
mod single_assignment;
pub use composite::CompositeDisposable;
pub use serial::SerialDisposable;
pub use single_assignment::SingleAssignmentDisposable;

/// A releasable resource, usually an active subscription.
///
/// `dispose` is idempotent: calling it a second time has no further effect.
pub trait Disposable {
  /// Releases the resource. Stops any further delivery to the observer that
  /// owns it.
  fn dispose(&self);

  fn is_disposed(&self) -> bool;
}

/// Type erased, cloneable handle returned by every `subscribe`.
///
/// Clones share the underlying resource, so disposing any clone disposes all
/// of them.
#[derive(Clone)]
pub struct Subscription(Rc<dyn Disposable>);

impl Subscription {
  pub fn new(disposable: impl Disposable + 'static) -> Self { Subscription(Rc::new(disposable)) }

  /// A subscription with nothing to release.
  pub fn empty() -> Self { Subscription::new(BooleanDisposable::default()) }

  /// A subscription running `teardown` the first time it is disposed.
  pub fn from_fn(teardown: impl FnOnce() + 'static) -> Self {
    Subscription::new(ClosureDisposable::new(teardown))
  }

  /// Whether both handles point at the same resource.
  pub fn ptr_eq(&self, other: &Subscription) -> bool {
    Rc::as_ptr(&self.0) as *const () == Rc::as_ptr(&other.0) as *const ()
  }

  /// Activates "RAII" behavior for this subscription. That means `dispose()`
  /// will be called automatically as soon as the returned value goes out of
  /// scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable,
  /// `dispose()` is called immediately, which is probably not what you want!
  pub fn unsubscribe_when_dropped(self) -> SubscriptionGuard { SubscriptionGuard(self) }
}

impl Disposable for Subscription {
  #[inline]
  fn dispose(&self) { self.0.dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.is_disposed() }
}

impl Debug for Subscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Subscription")
      .field("is_disposed", &self.is_disposed())
      .finish()
  }
}

/// A disposable that only records whether it was disposed.
#[derive(Clone, Debug, Default)]
pub struct BooleanDisposable(Rc<Cell<bool>>);

impl Disposable for BooleanDisposable {
  #[inline]
  fn dispose(&self) { self.0.set(true) }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.get() }
}

/// Runs a teardown closure exactly once.
pub struct ClosureDisposable(RefCell<Option<Box<dyn FnOnce()>>>);

impl ClosureDisposable {
  pub fn new(teardown: impl FnOnce() + 'static) -> Self {
    ClosureDisposable(RefCell::new(Some(Box::new(teardown))))
  }
}

impl Disposable for ClosureDisposable {
  fn dispose(&self) {
    // Take before calling so a re-entrant dispose sees us as disposed.
    let teardown = self.0.borrow_mut().take();
    if let Some(teardown) = teardown {
      teardown();
    }
  }

  fn is_disposed(&self) -> bool { self.0.borrow().is_none() }
}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be disposed.
///
/// If you want to drop it immediately, wrap it in its own scope
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard(pub(crate) Subscription);

impl SubscriptionGuard {
  /// Wraps an existing subscription with a guard to enable RAII behavior for
  /// it.
  pub fn new(subscription: Subscription) -> SubscriptionGuard { SubscriptionGuard(subscription) }
}

impl Drop for SubscriptionGuard {
  #[inline]
  fn drop(&mut self) { self.0.dispose() }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn closure_runs_once() {
    let hits = Rc::new(Cell::new(0));
    let c_hits = hits.clone();
    let s = Subscription::from_fn(move || c_hits.set(c_hits.get() + 1));
    assert!(!s.is_disposed());
    s.dispose();
    s.dispose();
    s.clone().dispose();
    assert_eq!(hits.get(), 1);
    assert!(s.is_disposed());
  }

  #[test]
  fn reentrant_dispose_is_a_noop() {
    let hits = Rc::new(Cell::new(0));
    let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
    let (c_hits, c_slot) = (hits.clone(), slot.clone());
    let s = Subscription::from_fn(move || {
      c_hits.set(c_hits.get() + 1);
      let me = c_slot.borrow().clone();
      if let Some(me) = me {
        me.dispose();
      }
    });
    *slot.borrow_mut() = Some(s.clone());
    s.dispose();
    assert_eq!(hits.get(), 1);
  }

  #[test]
  fn guard_disposes_on_drop() {
    let flag = BooleanDisposable::default();
    {
      let _guard = Subscription::new(flag.clone()).unsubscribe_when_dropped();
      assert!(!flag.is_disposed());
    }
    assert!(flag.is_disposed());
  }

  #[test]
  fn ptr_eq_follows_clones() {
    let a = Subscription::empty();
    let b = Subscription::empty();
    assert!(a.ptr_eq(&a.clone()));
    assert!(!a.ptr_eq(&b));
  }
}
