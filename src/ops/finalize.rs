use std::rc::Rc;

use crate::{prelude::*, subscription::CompositeDisposable};

/// Created by [`ObservableExt::finalize`].
///
/// The callback runs once per subscription, after the downstream observer saw
/// the terminal signal, or when the subscription is disposed, whichever comes
/// first.
pub struct FinalizeOp<S, F> {
  source: S,
  func: Rc<F>,
}

impl<S, F> FinalizeOp<S, F> {
  #[inline]
  pub(crate) fn new(source: S, func: F) -> Self { FinalizeOp { source, func: Rc::new(func) } }
}

impl<S: Clone, F> Clone for FinalizeOp<S, F> {
  fn clone(&self) -> Self { FinalizeOp { source: self.source.clone(), func: self.func.clone() } }
}

impl<S, F> Observable for FinalizeOp<S, F>
where
  S: Observable,
  F: Fn() + 'static,
{
  type Item = S::Item;

  fn subscribe_core(&self, subscriber: Subscriber<S::Item>) -> Result<Subscription, Error> {
    let func = self.func.clone();
    match self.source.subscribe_with(subscriber) {
      Ok(subscription) => {
        let teardown = CompositeDisposable::new();
        teardown.add(subscription);
        teardown.add(Subscription::from_fn(move || func()));
        Ok(Subscription::new(teardown))
      }
      Err(err) => {
        func();
        Err(err)
      }
    }
  }
}
