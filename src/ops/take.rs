use crate::prelude::*;

/// Emits only the first `count` values emitted by the source, then completes.
///
/// Completing disposes the upstream, so a source driven by a scheduler stops
/// producing as soon as enough values went through.
#[derive(Clone)]
pub struct TakeOp<S> {
  source: S,
  count: usize,
}

impl<S> TakeOp<S> {
  pub(crate) fn new(source: S, count: usize) -> Self { TakeOp { source, count } }
}

impl<S: Observable> Observable for TakeOp<S> {
  type Item = S::Item;

  fn subscribe_core(&self, subscriber: Subscriber<S::Item>) -> Result<Subscription, Error> {
    if self.count == 0 {
      subscriber.complete();
      return Ok(Subscription::empty());
    }
    self
      .source
      .subscribe_with(TakeObserver { observer: subscriber, remaining: self.count })
  }
}

struct TakeObserver<Item> {
  observer: Subscriber<Item>,
  remaining: usize,
}

impl<Item> Observer<Item> for TakeObserver<Item> {
  fn next(&mut self, value: Item) {
    if self.remaining == 0 {
      return;
    }
    self.remaining -= 1;
    self.observer.next(value);
    if self.remaining == 0 {
      self.observer.complete();
    }
  }

  fn error(&mut self, err: Error) { self.observer.error(err) }

  fn complete(&mut self) { self.observer.complete() }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn base_function() {
    let completed = Rc::new(RefCell::new(false));
    let next_count = Rc::new(RefCell::new(0));
    let (c_completed, c_next) = (completed.clone(), next_count.clone());

    observable::from_iter(0..100)
      .take(5)
      .subscribe_all(
        move |_| *c_next.borrow_mut() += 1,
        |_| {},
        move || *c_completed.borrow_mut() = true,
      )
      .unwrap();

    assert!(*completed.borrow());
    assert_eq!(*next_count.borrow(), 5);
  }

  #[test]
  fn take_zero_never_subscribes() {
    let subscribed = Rc::new(RefCell::new(false));
    let completed = Rc::new(RefCell::new(false));
    let (c_subscribed, c_completed) = (subscribed.clone(), completed.clone());
    observable::create(move |_: &Subscriber<i32>| {
      *c_subscribed.borrow_mut() = true;
      Ok(Subscription::empty())
    })
    .take(0)
    .subscribe_all(|_| {}, |_| {}, move || *c_completed.borrow_mut() = true)
    .unwrap();
    assert!(!*subscribed.borrow());
    assert!(*completed.borrow());
  }

  #[test]
  fn stops_a_long_source() {
    let items: Vec<u32> = (0..1_000_000).collect();
    let pulled = Rc::new(RefCell::new(0));
    let (c_pulled, seen) = (pulled.clone(), Rc::new(RefCell::new(vec![])));
    let c_seen = seen.clone();
    observable::from(items)
      .unwrap()
      .map(move |v| {
        *c_pulled.borrow_mut() += 1;
        v
      })
      .take(3)
      .subscribe(move |v| c_seen.borrow_mut().push(v))
      .unwrap();
    assert_eq!(*seen.borrow(), vec![0, 1, 2]);
    assert_eq!(*pulled.borrow(), 3);
  }
}
