use std::{cell::RefCell, rc::Rc};

use crate::{ops::publish::ConnectableObservable, prelude::*};

/// Make a ConnectableObservable behave like an ordinary observable and
/// automate the way you connect to it.
///
/// Internally it counts the subscriptions to the observable and connects
/// (only once) to the source when the count goes from zero to one. When the
/// count drops back to zero it disconnects from the source. This way
/// everything before the published ref count has a single subscription,
/// independently of the number of subscribers to the target observable. A
/// subscriber arriving after that connects again.
///
/// `share` is exactly `publish` followed by `ref_count`.
pub struct RefCount<S: Observable> {
  connectable: ConnectableObservable<S>,
  state: Rc<RefCell<RefCountState>>,
}

#[derive(Default)]
struct RefCountState {
  count: usize,
  connection: Option<Subscription>,
}

/// Gives a subscriber's slot back when dropped, including while unwinding out
/// of a panicking disconnect.
struct Release<'a>(&'a RefCell<RefCountState>);

impl Drop for Release<'_> {
  fn drop(&mut self) {
    let mut state = self.0.borrow_mut();
    state.count = state.count.saturating_sub(1);
  }
}

impl<S: Observable> Clone for RefCount<S> {
  fn clone(&self) -> Self {
    RefCount { connectable: self.connectable.clone(), state: self.state.clone() }
  }
}

impl<S: Observable> RefCount<S> {
  pub(crate) fn new(connectable: ConnectableObservable<S>) -> Self {
    RefCount { connectable, state: Rc::new(RefCell::new(RefCountState::default())) }
  }

  /// Number of subscribers currently holding the connection open.
  pub fn subscriber_count(&self) -> usize { self.state.borrow().count }
}

impl<S> Observable for RefCount<S>
where
  S: Observable,
  S::Item: Clone,
{
  type Item = S::Item;

  fn subscribe_core(&self, subscriber: Subscriber<S::Item>) -> Result<Subscription, Error> {
    let subscription = self.connectable.subscribe_core(subscriber)?;
    let first = {
      let mut state = self.state.borrow_mut();
      state.count += 1;
      state.count == 1
    };
    if first {
      tracing::debug!("ref count: first subscriber, connecting");
      match self.connectable.connect() {
        Ok(connection) => {
          let mut state = self.state.borrow_mut();
          if state.count == 0 {
            // The subscriber left while the source was connecting.
            drop(state);
            connection.dispose();
          } else {
            state.connection = Some(connection);
          }
        }
        Err(err) => {
          self.state.borrow_mut().count -= 1;
          subscription.dispose();
          return Err(err);
        }
      }
    }

    let state = self.state.clone();
    Ok(Subscription::from_fn(move || {
      // Dropped last: the connection is torn down before the count drops.
      let _release = Release(&*state);
      subscription.dispose();
      let connection = {
        let mut state = state.borrow_mut();
        if state.count == 1 { state.connection.take() } else { None }
      };
      if let Some(connection) = connection {
        tracing::debug!("ref count: last subscriber left, disconnecting");
        connection.dispose();
      }
    }))
  }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  fn counted_source(
    subscribed: Rc<RefCell<u32>>, disposed: Rc<RefCell<u32>>, subject: Subject<i32>,
  ) -> impl Observable<Item = i32> {
    observable::create(move |subscriber: &Subscriber<i32>| {
      *subscribed.borrow_mut() += 1;
      let inner = subject.subscribe_with(subscriber.clone())?;
      let disposed = disposed.clone();
      Ok(Subscription::from_fn(move || {
        inner.dispose();
        *disposed.borrow_mut() += 1;
      }))
    })
  }

  #[test]
  fn smoke() {
    let (subscribed, disposed) = (Rc::new(RefCell::new(0)), Rc::new(RefCell::new(0)));
    let subject = Subject::new();
    let shared = counted_source(subscribed.clone(), disposed.clone(), subject.clone()).share();

    let (a, b) = (Rc::new(RefCell::new(vec![])), Rc::new(RefCell::new(vec![])));
    let (c_a, c_b) = (a.clone(), b.clone());
    let s1 = shared.subscribe(move |v| c_a.borrow_mut().push(v)).unwrap();
    let s2 = shared.subscribe(move |v| c_b.borrow_mut().push(v)).unwrap();
    subject.next(1);
    assert_eq!(*subscribed.borrow(), 1);
    assert_eq!(shared.subscriber_count(), 2);

    s1.dispose();
    assert_eq!(*disposed.borrow(), 0);
    subject.next(2);
    s2.dispose();
    assert_eq!(*disposed.borrow(), 1);
    assert_eq!(*a.borrow(), vec![1]);
    assert_eq!(*b.borrow(), vec![1, 2]);
  }

  #[test]
  fn reconnects_after_dropping_to_zero() {
    let (subscribed, disposed) = (Rc::new(RefCell::new(0)), Rc::new(RefCell::new(0)));
    let subject = Subject::new();
    let shared = counted_source(subscribed.clone(), disposed.clone(), subject).share();
    shared.subscribe(|_| {}).unwrap().dispose();
    shared.subscribe(|_| {}).unwrap().dispose();
    assert_eq!(*subscribed.borrow(), 2);
    assert_eq!(*disposed.borrow(), 2);
    assert_eq!(shared.subscriber_count(), 0);
  }

  #[test]
  fn synchronous_source_completes_every_subscriber() {
    let shared = observable::of(vec![1, 2, 3]).share();
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    shared
      .subscribe_all(
        move |v| c_seen.borrow_mut().push(v),
        |_| {},
        || {},
      )
      .unwrap();
    assert_eq!(*seen.borrow(), vec![1, 2, 3]);
    assert_eq!(shared.subscriber_count(), 0);
  }

  #[test]
  fn panicking_disconnect_still_releases_the_count() {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    let subscribed = Rc::new(RefCell::new(0));
    let c_subscribed = subscribed.clone();
    let shared = observable::create(move |_: &Subscriber<i32>| {
      *c_subscribed.borrow_mut() += 1;
      Ok(Subscription::from_fn(|| panic!("teardown failed")))
    })
    .share();

    let subscription = shared.subscribe(|_| {}).unwrap();
    let result = catch_unwind(AssertUnwindSafe(|| subscription.dispose()));
    assert!(result.is_err());
    assert!(subscription.is_disposed());
    assert_eq!(shared.subscriber_count(), 0);

    let _again = shared.subscribe(|_| {}).unwrap();
    assert_eq!(*subscribed.borrow(), 2);
    assert_eq!(shared.subscriber_count(), 1);
  }
}
