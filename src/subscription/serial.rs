use std::{cell::RefCell, rc::Rc};

use super::{Disposable, Subscription};

/// Holds one replaceable subscription; replacing disposes the previous one.
#[derive(Clone, Default)]
pub struct SerialDisposable(Rc<RefCell<Inner>>);

#[derive(Default)]
struct Inner {
  disposed: bool,
  current: Option<Subscription>,
}

impl SerialDisposable {
  pub fn new() -> Self { Self::default() }

  pub fn set(&self, subscription: Subscription) {
    let stale = {
      let mut inner = self.0.borrow_mut();
      if inner.disposed {
        Some(subscription)
      } else {
        inner.current.replace(subscription)
      }
    };
    if let Some(stale) = stale {
      stale.dispose();
    }
  }
}

impl Disposable for SerialDisposable {
  fn dispose(&self) {
    let current = {
      let mut inner = self.0.borrow_mut();
      if inner.disposed {
        return;
      }
      inner.disposed = true;
      inner.current.take()
    };
    if let Some(current) = current {
      current.dispose();
    }
  }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.borrow().disposed }
}
