use std::rc::Rc;

use crate::prelude::*;

/// Emit only those items from an Observable that pass a predicate test.
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
/// use rxcore::prelude::*;
///
/// let coll = Rc::new(RefCell::new(vec![]));
/// let coll_clone = coll.clone();
///
/// observable::from_iter(0..10)
///   .filter(|v| *v % 2 == 0)
///   .subscribe(move |v| coll_clone.borrow_mut().push(v))
///   .unwrap();
///
/// // only even numbers received.
/// assert_eq!(*coll.borrow(), vec![0, 2, 4, 6, 8]);
/// ```
pub struct FilterOp<S, F> {
  source: S,
  predicate: Rc<F>,
}

impl<S, F> FilterOp<S, F> {
  pub(crate) fn new(source: S, predicate: F) -> Self {
    FilterOp { source, predicate: Rc::new(predicate) }
  }
}

impl<S: Clone, F> Clone for FilterOp<S, F> {
  fn clone(&self) -> Self { FilterOp { source: self.source.clone(), predicate: self.predicate.clone() } }
}

impl<S, F> Observable for FilterOp<S, F>
where
  S: Observable,
  F: Fn(&S::Item) -> bool + 'static,
{
  type Item = S::Item;

  fn subscribe_core(&self, subscriber: Subscriber<S::Item>) -> Result<Subscription, Error> {
    self
      .source
      .subscribe_with(FilterObserver { observer: subscriber, predicate: self.predicate.clone() })
  }
}

struct FilterObserver<Item, F> {
  observer: Subscriber<Item>,
  predicate: Rc<F>,
}

impl<Item, F> Observer<Item> for FilterObserver<Item, F>
where
  F: Fn(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if (self.predicate)(&value) {
      self.observer.next(value)
    }
  }

  fn error(&mut self, err: Error) { self.observer.error(err) }

  fn complete(&mut self) { self.observer.complete() }
}
