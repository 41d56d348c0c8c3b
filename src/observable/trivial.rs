use std::marker::PhantomData;

use crate::{
  prelude::*,
  scheduler::{or_current_thread, SchedulerRef},
};

/// Creates an observable that produces no values and completes.
///
/// ```
/// use rxcore::prelude::*;
///
/// observable::empty()
///   .subscribe(|v: i32| println!("{v},"))
///   .unwrap();
///
/// // Result: nothing printed
/// ```
pub fn empty<Item>() -> Empty<Item> { empty_with(None) }

/// [`empty`] completing on `scheduler`.
pub fn empty_with<Item>(scheduler: Option<SchedulerRef>) -> Empty<Item> {
  Empty { scheduler: or_current_thread(scheduler), _hint: PhantomData }
}

/// Creates an observable that never emits anything. It neither emits a value,
/// nor completes, nor emits an error.
pub fn never<Item>() -> Never<Item> { Never(PhantomData) }

/// Creates an observable that emits no items, just terminates with `err`.
pub fn throw_error<Item>(err: Error) -> ThrowError<Item> { throw_error_with(err, None) }

/// [`throw_error`] failing on `scheduler`.
pub fn throw_error_with<Item>(err: Error, scheduler: Option<SchedulerRef>) -> ThrowError<Item> {
  ThrowError { err, scheduler: or_current_thread(scheduler), _hint: PhantomData }
}

pub struct Empty<Item> {
  scheduler: SchedulerRef,
  _hint: PhantomData<fn() -> Item>,
}

impl<Item> Clone for Empty<Item> {
  fn clone(&self) -> Self { Empty { scheduler: self.scheduler.clone(), _hint: PhantomData } }
}

impl<Item: 'static> Observable for Empty<Item> {
  type Item = Item;

  fn subscribe_core(&self, subscriber: Subscriber<Item>) -> Result<Subscription, Error> {
    Ok(self.scheduler.schedule(Box::new(move || subscriber.complete())))
  }
}

pub struct Never<Item>(PhantomData<fn() -> Item>);

impl<Item> Clone for Never<Item> {
  fn clone(&self) -> Self { Never(PhantomData) }
}

impl<Item: 'static> Observable for Never<Item> {
  type Item = Item;

  #[inline]
  fn subscribe_core(&self, _: Subscriber<Item>) -> Result<Subscription, Error> {
    Ok(Subscription::empty())
  }
}

pub struct ThrowError<Item> {
  err: Error,
  scheduler: SchedulerRef,
  _hint: PhantomData<fn() -> Item>,
}

impl<Item> Clone for ThrowError<Item> {
  fn clone(&self) -> Self {
    ThrowError { err: self.err.clone(), scheduler: self.scheduler.clone(), _hint: PhantomData }
  }
}

impl<Item: 'static> Observable for ThrowError<Item> {
  type Item = Item;

  fn subscribe_core(&self, subscriber: Subscriber<Item>) -> Result<Subscription, Error> {
    let err = self.err.clone();
    Ok(self.scheduler.schedule(Box::new(move || subscriber.error(err))))
  }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn throw() {
    let value_emitted = Rc::new(RefCell::new(false));
    let completed = Rc::new(RefCell::new(false));
    let error_emitted = Rc::new(RefCell::new(String::new()));
    let (c_value, c_completed, c_error) =
      (value_emitted.clone(), completed.clone(), error_emitted.clone());

    observable::throw_error::<i32>(Error::custom("expected-error"))
      .subscribe_all(
        move |_| *c_value.borrow_mut() = true,
        move |e| *c_error.borrow_mut() = e.to_string(),
        move || *c_completed.borrow_mut() = true,
      )
      .unwrap();

    assert!(!*value_emitted.borrow());
    assert!(!*completed.borrow());
    assert_eq!(*error_emitted.borrow(), "expected-error");
  }

  #[test]
  fn empty() {
    let hits = Rc::new(RefCell::new(0));
    let completed = Rc::new(RefCell::new(false));
    let (c_hits, c_completed) = (hits.clone(), completed.clone());
    observable::empty::<i32>()
      .subscribe_all(
        move |_| *c_hits.borrow_mut() += 1,
        |_| {},
        move || *c_completed.borrow_mut() = true,
      )
      .unwrap();

    assert_eq!(*hits.borrow(), 0);
    assert!(*completed.borrow());
  }

  #[test]
  fn never_stays_silent() {
    let signals = Rc::new(RefCell::new(0));
    let (n, e, c) = (signals.clone(), signals.clone(), signals.clone());
    let subscription = observable::never::<i32>()
      .subscribe_all(
        move |_| *n.borrow_mut() += 1,
        move |_| *e.borrow_mut() += 1,
        move || *c.borrow_mut() += 1,
      )
      .unwrap();
    assert_eq!(*signals.borrow(), 0);
    assert!(!subscription.is_disposed());
    subscription.dispose();
    assert!(subscription.is_disposed());
  }

  #[test]
  fn scheduled_empty_can_be_cancelled() {
    let scheduler = Rc::new(VirtualTimeScheduler::new());
    let completed = Rc::new(RefCell::new(false));
    let c_completed = completed.clone();
    let subscription = observable::empty_with::<i32>(Some(scheduler.clone()))
      .subscribe_all(|_| {}, |_| {}, move || *c_completed.borrow_mut() = true)
      .unwrap();
    subscription.dispose();
    scheduler.flush();
    assert!(!*completed.borrow());
  }
}
