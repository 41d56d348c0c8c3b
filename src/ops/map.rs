use std::rc::Rc;

use crate::prelude::*;

/// Created by [`ObservableExt::map`].
pub struct MapOp<S, F> {
  source: S,
  func: Rc<F>,
}

impl<S, F> MapOp<S, F> {
  pub(crate) fn new(source: S, func: F) -> Self { MapOp { source, func: Rc::new(func) } }
}

impl<S: Clone, F> Clone for MapOp<S, F> {
  fn clone(&self) -> Self { MapOp { source: self.source.clone(), func: self.func.clone() } }
}

impl<S, F, B> Observable for MapOp<S, F>
where
  S: Observable,
  F: Fn(S::Item) -> B + 'static,
  B: 'static,
{
  type Item = B;

  fn subscribe_core(&self, subscriber: Subscriber<B>) -> Result<Subscription, Error> {
    self
      .source
      .subscribe_with(MapObserver { observer: subscriber, map: self.func.clone() })
  }
}

struct MapObserver<B, F> {
  observer: Subscriber<B>,
  map: Rc<F>,
}

impl<Item, B, F> Observer<Item> for MapObserver<B, F>
where
  F: Fn(Item) -> B,
{
  fn next(&mut self, value: Item) { self.observer.next((self.map)(value)) }

  fn error(&mut self, err: Error) { self.observer.error(err) }

  fn complete(&mut self) { self.observer.complete() }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use bencher::benchmark_group;

  use crate::prelude::*;

  #[test]
  fn primitive_type() {
    let i = Rc::new(RefCell::new(0));
    let c_i = i.clone();
    observable::from_iter(100..101)
      .map(|v| v * 2)
      .subscribe(move |v| *c_i.borrow_mut() += v)
      .unwrap();
    assert_eq!(*i.borrow(), 200);
  }

  #[test]
  fn map_types_mixed() {
    let i = Rc::new(RefCell::new(0));
    let c_i = i.clone();
    observable::from("abc")
      .unwrap()
      .map(|_v| 1)
      .subscribe(move |v| *c_i.borrow_mut() += v)
      .unwrap();
    assert_eq!(*i.borrow(), 3);
  }

  #[test]
  fn errors_pass_through() {
    let errors = Rc::new(RefCell::new(vec![]));
    let c_errors = errors.clone();
    observable::throw_error::<i32>(Error::custom("oops"))
      .map(|v| v + 1)
      .subscribe_all(|_| {}, move |e| c_errors.borrow_mut().push(e), || {})
      .unwrap();
    assert_eq!(*errors.borrow(), vec![Error::custom("oops")]);
  }

  #[test]
  fn bench() { do_bench(); }

  benchmark_group!(do_bench, bench_map);

  fn bench_map(b: &mut bencher::Bencher) { b.iter(primitive_type); }
}
