use std::marker::PhantomData;

use crate::prelude::*;

/// Creates an observable from a subscribe function.
///
/// `subscribe` runs once per subscription. It pushes into the subscriber it
/// receives and returns what tears the producer down; returning `Err` is the
/// same as failing the subscriber.
///
/// ```
/// use rxcore::prelude::*;
///
/// observable::create(|subscriber: &Subscriber<i32>| {
///   subscriber.next(1);
///   subscriber.next(2);
///   subscriber.complete();
///   Ok(Subscription::empty())
/// })
/// .subscribe(|v| println!("{v}"))
/// .unwrap();
/// ```
pub fn create<Item, F>(subscribe: F) -> Create<F, Item>
where
  F: Fn(&Subscriber<Item>) -> Result<Subscription, Error>,
{
  Create { subscribe, _hint: PhantomData }
}

/// Observable created from a function by [`create`].
pub struct Create<F, Item> {
  subscribe: F,
  _hint: PhantomData<fn() -> Item>,
}

impl<F: Clone, Item> Clone for Create<F, Item> {
  fn clone(&self) -> Self { Create { subscribe: self.subscribe.clone(), _hint: PhantomData } }
}

impl<F, Item> Observable for Create<F, Item>
where
  F: Fn(&Subscriber<Item>) -> Result<Subscription, Error>,
  Item: 'static,
{
  type Item = Item;

  #[inline]
  fn subscribe_core(&self, subscriber: Subscriber<Item>) -> Result<Subscription, Error> {
    (self.subscribe)(&subscriber)
  }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn proxy_call() {
    let next = Rc::new(RefCell::new(0));
    let err = Rc::new(RefCell::new(0));
    let complete = Rc::new(RefCell::new(0));
    let (c_next, c_err, c_complete) = (next.clone(), err.clone(), complete.clone());

    observable::create(|subscriber: &Subscriber<i32>| {
      subscriber.next(1);
      subscriber.next(2);
      subscriber.next(3);
      subscriber.complete();
      subscriber.next(3);
      subscriber.error(Error::custom("late"));
      Ok(Subscription::empty())
    })
    .subscribe_all(
      move |_| *c_next.borrow_mut() += 1,
      move |_| *c_err.borrow_mut() += 1,
      move || *c_complete.borrow_mut() += 1,
    )
    .unwrap();

    assert_eq!(*next.borrow(), 3);
    assert_eq!(*complete.borrow(), 1);
    assert_eq!(*err.borrow(), 0);
  }

  #[test]
  fn teardown_runs_on_complete() {
    let torn_down = Rc::new(RefCell::new(false));
    let c_torn_down = torn_down.clone();
    let subject = Subject::<()>::new();
    let c_subject = subject.clone();
    observable::create(move |subscriber: &Subscriber<()>| {
      let c_torn_down = c_torn_down.clone();
      c_subject.subscribe_with(subscriber.clone())?;
      Ok(Subscription::from_fn(move || *c_torn_down.borrow_mut() = true))
    })
    .subscribe(|_| {})
    .unwrap();
    assert!(!*torn_down.borrow());
    subject.complete();
    assert!(*torn_down.borrow());
  }
}
