use std::{cell::RefCell, mem, rc::Rc};

use smallvec::SmallVec;

use super::{Disposable, Subscription};

/// A group of subscriptions released together.
///
/// Adding to an already disposed group disposes the added subscription
/// immediately.
#[derive(Clone, Default)]
pub struct CompositeDisposable(Rc<RefCell<Inner>>);

#[derive(Default)]
struct Inner {
  disposed: bool,
  teardown: SmallVec<[Subscription; 1]>,
}

impl CompositeDisposable {
  pub fn new() -> Self { Self::default() }

  pub fn add(&self, subscription: Subscription) {
    let mut inner = self.0.borrow_mut();
    if inner.disposed {
      drop(inner);
      subscription.dispose();
    } else {
      inner.teardown.retain(|v| !v.is_disposed());
      inner.teardown.push(subscription);
    }
  }

  /// Removes `subscription` from the group and disposes it. Returns whether it
  /// was a member.
  pub fn remove(&self, subscription: &Subscription) -> bool {
    let removed = {
      let mut inner = self.0.borrow_mut();
      let pos = inner.teardown.iter().position(|v| v.ptr_eq(subscription));
      pos.map(|idx| inner.teardown.remove(idx))
    };
    match removed {
      Some(removed) => {
        removed.dispose();
        true
      }
      None => false,
    }
  }

  pub fn len(&self) -> usize { self.0.borrow().teardown.len() }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl Disposable for CompositeDisposable {
  fn dispose(&self) {
    let teardown = {
      let mut inner = self.0.borrow_mut();
      if inner.disposed {
        return;
      }
      inner.disposed = true;
      mem::take(&mut inner.teardown)
    };
    for v in teardown {
      v.dispose();
    }
  }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.borrow().disposed }
}
