use crate::prelude::*;

/// Creates an observable that, on every subscription, defers to the
/// observable built by `factory`.
///
/// A factory error is delivered to the subscriber through `error`.
///
/// ```rust
/// use rxcore::prelude::*;
///
/// observable::defer(|| {
///   println!("Hi!");
///   Ok(observable::of(vec!["Hello!"]))
/// })
/// .subscribe(|v| println!("{v}"))
/// .unwrap();
/// // Prints: Hi!\nHello!\n
/// ```
pub fn defer<F, O>(factory: F) -> Defer<F>
where
  F: Fn() -> Result<O, Error>,
  O: Observable,
{
  Defer(factory)
}

#[derive(Clone)]
pub struct Defer<F>(F);

impl<F, O> Observable for Defer<F>
where
  F: Fn() -> Result<O, Error>,
  O: Observable,
{
  type Item = O::Item;

  fn subscribe_core(&self, subscriber: Subscriber<O::Item>) -> Result<Subscription, Error> {
    (self.0)()?.subscribe_with(subscriber)
  }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn no_results_before_deferred_subscribe() {
    let calls = Rc::new(RefCell::new(0));
    let sum = Rc::new(RefCell::new(0));
    let (c_calls, c_sum) = (calls.clone(), sum.clone());
    let deferred = observable::defer(move || {
      *c_calls.borrow_mut() += 1;
      Ok(observable::of(vec![2]))
    });
    assert_eq!(*calls.borrow(), 0);

    for i in 1..4 {
      let c_sum = c_sum.clone();
      deferred.subscribe(move |v| *c_sum.borrow_mut() += v).unwrap();
      assert_eq!(*calls.borrow(), i);
    }
    assert_eq!(*sum.borrow(), 6);
  }

  #[test]
  fn factory_error_goes_to_observer() {
    let errors = Rc::new(RefCell::new(vec![]));
    let c_errors = errors.clone();
    observable::defer(|| Err::<observable::Empty<i32>, _>(Error::custom("no source")))
      .subscribe_all(|_| {}, move |e| c_errors.borrow_mut().push(e), || {})
      .unwrap();
    assert_eq!(*errors.borrow(), vec![Error::custom("no source")]);
  }
}
