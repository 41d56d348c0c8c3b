//! Observer trait and implementations
//!
//! The Observer trait defines the consumer of data in the reactive pattern.
//! It provides three methods: next (for values), error (for errors), and
//! complete (for stream completion).

use crate::error::Error;

/// Observer trait: The consumer of data in reactive programming
///
/// An Observer receives values, errors, and completion notifications from
/// an Observable. Sources never call an observer directly: they go through a
/// [`Subscriber`](crate::subscriber::Subscriber), which guarantees at most one
/// terminal signal and nothing after it.
pub trait Observer<Item> {
  /// Receive the next value from the observable
  fn next(&mut self, value: Item);

  /// Handle an error from the observable. Terminal.
  fn error(&mut self, err: Error);

  /// Handle completion of the observable. Terminal.
  fn complete(&mut self);
}

impl<Item, O> Observer<Item> for Box<O>
where
  O: Observer<Item> + ?Sized,
{
  #[inline]
  fn next(&mut self, value: Item) { (**self).next(value) }

  #[inline]
  fn error(&mut self, err: Error) { (**self).error(err) }

  #[inline]
  fn complete(&mut self) { (**self).complete() }
}

/// Observer built from three plain callbacks.
#[derive(Clone)]
pub struct ObserverAll<N, E, C> {
  next: N,
  error: E,
  complete: C,
}

impl<N, E, C> ObserverAll<N, E, C> {
  pub fn new(next: N, error: E, complete: C) -> Self { ObserverAll { next, error, complete } }
}

impl<Item, N, E, C> Observer<Item> for ObserverAll<N, E, C>
where
  N: FnMut(Item),
  E: FnMut(Error),
  C: FnMut(),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value) }

  #[inline]
  fn error(&mut self, err: Error) { (self.error)(err) }

  #[inline]
  fn complete(&mut self) { (self.complete)() }
}

/// Observer that only cares about values.
///
/// An error reaching it has nowhere to go, so it is logged.
#[derive(Clone)]
pub struct ObserverNext<N>(pub N);

impl<Item, N> Observer<Item> for ObserverNext<N>
where
  N: FnMut(Item),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.0)(value) }

  fn error(&mut self, err: Error) {
    tracing::error!(%err, "observable failed and the observer has no error handler");
  }

  #[inline]
  fn complete(&mut self) {}
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn callbacks_are_routed() {
    let mut values = vec![];
    let mut errors = vec![];
    let mut completed = 0;
    {
      let mut observer = ObserverAll::new(
        |v: i32| values.push(v),
        |e: Error| errors.push(e),
        || completed += 1,
      );
      observer.next(1);
      observer.error(Error::custom("boom"));
      observer.complete();
    }
    assert_eq!(values, vec![1]);
    assert_eq!(errors, vec![Error::custom("boom")]);
    assert_eq!(completed, 1);
  }

  #[test]
  fn boxed_observer() {
    let mut sum = 0;
    {
      let mut boxed: Box<dyn Observer<i32> + '_> = Box::new(ObserverNext(|v| sum += v));
      boxed.next(1);
      boxed.next(2);
      boxed.error(Error::NotIterable);
      boxed.complete();
    }
    assert_eq!(sum, 3);
  }
}
