use std::{cell::Cell, rc::Rc};

use once_cell::unsync::OnceCell;

use super::{Disposable, Subscription};

/// Holds a subscription that is only known after the holder was handed out.
///
/// If the holder is disposed before the subscription arrives, the subscription
/// is disposed as soon as it is assigned.
#[derive(Clone, Default)]
pub struct SingleAssignmentDisposable(Rc<Inner>);

#[derive(Default)]
struct Inner {
  current: OnceCell<Subscription>,
  disposed: Cell<bool>,
}

impl SingleAssignmentDisposable {
  pub fn new() -> Self { Self::default() }

  /// Assigns the inner subscription. A second assignment is rejected and the
  /// rejected subscription handed back.
  pub fn set(&self, subscription: Subscription) -> Result<(), Subscription> {
    if self.0.disposed.get() {
      subscription.dispose();
      return Ok(());
    }
    self.0.current.set(subscription)
  }

  pub fn is_assigned(&self) -> bool { self.0.current.get().is_some() }
}

impl Disposable for SingleAssignmentDisposable {
  fn dispose(&self) {
    if !self.0.disposed.replace(true) {
      if let Some(current) = self.0.current.get() {
        current.dispose();
      }
    }
  }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.disposed.get() }
}
