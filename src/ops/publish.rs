use std::{cell::RefCell, rc::Rc};

use crate::prelude::*;

/// Returned by [`ObservableExt::publish`].
///
/// A ConnectableObservable resembles an ordinary Observable, except that it
/// does not begin emitting items when it is subscribed to, but only when
/// [`connect`](ConnectableObservable::connect) is called. In this way you can
/// wait for all intended observers to subscribe before the source starts.
pub struct ConnectableObservable<S: Observable> {
  source: Rc<S>,
  subject: Subject<S::Item>,
  connection: Rc<RefCell<Option<Subscription>>>,
}

impl<S: Observable> Clone for ConnectableObservable<S> {
  fn clone(&self) -> Self {
    ConnectableObservable {
      source: self.source.clone(),
      subject: self.subject.clone(),
      connection: self.connection.clone(),
    }
  }
}

impl<S> ConnectableObservable<S>
where
  S: Observable,
  S::Item: Clone,
{
  pub(crate) fn new(source: S) -> Self {
    ConnectableObservable {
      source: Rc::new(source),
      subject: Subject::new(),
      connection: Rc::new(RefCell::new(None)),
    }
  }

  /// Subscribes the shared subject to the source. While a connection is
  /// alive, calling this again returns it instead of connecting twice.
  pub fn connect(&self) -> Result<Subscription, Error> {
    if let Some(connection) = self.connection.borrow().as_ref() {
      if !connection.is_disposed() {
        return Ok(connection.clone());
      }
    }
    tracing::debug!("connecting published source");
    let connection = self.source.subscribe_with(self.subject.clone())?;
    *self.connection.borrow_mut() = Some(connection.clone());
    Ok(connection)
  }

  /// Connects on the first subscriber and disconnects after the last one
  /// leaves.
  pub fn ref_count(self) -> RefCount<S> { RefCount::new(self) }
}

impl<S> Observable for ConnectableObservable<S>
where
  S: Observable,
  S::Item: Clone,
{
  type Item = S::Item;

  #[inline]
  fn subscribe_core(&self, subscriber: Subscriber<S::Item>) -> Result<Subscription, Error> {
    self.subject.subscribe_core(subscriber)
  }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn smoke() {
    let p = observable::of(vec![100]).publish();
    let first = Rc::new(RefCell::new(0));
    let second = Rc::new(RefCell::new(0));
    let (c_first, c_second) = (first.clone(), second.clone());
    p.subscribe(move |v| *c_first.borrow_mut() = v).unwrap();
    p.subscribe(move |v| *c_second.borrow_mut() = v).unwrap();
    assert_eq!(*first.borrow(), 0);

    p.connect().unwrap();
    assert_eq!(*first.borrow(), 100);
    assert_eq!(*second.borrow(), 100);
  }

  #[test]
  fn connect_twice_shares_the_connection() {
    let subscribed = Rc::new(RefCell::new(0));
    let c_subscribed = subscribed.clone();
    let p = observable::create(move |_: &Subscriber<i32>| {
      *c_subscribed.borrow_mut() += 1;
      Ok(Subscription::empty())
    })
    .publish();
    let first = p.connect().unwrap();
    let second = p.connect().unwrap();
    assert!(first.ptr_eq(&second));
    assert_eq!(*subscribed.borrow(), 1);

    first.dispose();
    p.connect().unwrap();
    assert_eq!(*subscribed.borrow(), 2);
  }
}
