//! Converts an [`Observable`] into a [`futures::Stream`].
//!
//! ```rust
//! use futures::{executor::block_on, StreamExt};
//! use rxcore::prelude::*;
//!
//! let mut stream = observable::of(vec![1]).into_stream().unwrap();
//! assert_eq!(block_on(stream.next()), Some(Ok(1)));
//! assert_eq!(block_on(stream.next()), None);
//! ```

use std::{
  cell::RefCell,
  collections::VecDeque,
  pin::Pin,
  rc::Rc,
  task::{Context as AsyncContext, Poll, Waker},
};

use futures::Stream;

use crate::prelude::*;

struct IntoStreamState<T> {
  queue: VecDeque<Result<T, Error>>,
  waker: Option<Waker>,
  is_closed: bool,
}

impl<T> IntoStreamState<T> {
  fn wake(&mut self) {
    if let Some(waker) = self.waker.take() {
      waker.wake();
    }
  }
}

/// A `Stream` yielding what an observable pushes.
///
/// - `Ok(T)` for each `next` value.
/// - `Err(Error)` when the observable signals an error.
/// - `None` once the observable completed or after the error.
///
/// Dropping the stream disposes the underlying subscription.
pub struct IntoStream<T> {
  state: Rc<RefCell<IntoStreamState<T>>>,
  subscription: Option<Subscription>,
}

impl<T: 'static> IntoStream<T> {
  pub(crate) fn new<O>(observable: &O) -> Result<Self, Error>
  where
    O: Observable<Item = T> + ?Sized,
  {
    let state = Rc::new(RefCell::new(IntoStreamState {
      queue: VecDeque::new(),
      waker: None,
      is_closed: false,
    }));
    let subscription = observable.subscribe_with(IntoStreamObserver { state: state.clone() })?;
    Ok(IntoStream { state, subscription: Some(subscription) })
  }
}

impl<T> Stream for IntoStream<T> {
  type Item = Result<T, Error>;

  fn poll_next(self: Pin<&mut Self>, cx: &mut AsyncContext<'_>) -> Poll<Option<Self::Item>> {
    let mut state = self.state.borrow_mut();
    if let Some(item) = state.queue.pop_front() {
      return Poll::Ready(Some(item));
    }
    if state.is_closed {
      return Poll::Ready(None);
    }
    state.waker = Some(cx.waker().clone());
    Poll::Pending
  }
}

impl<T> Drop for IntoStream<T> {
  fn drop(&mut self) {
    if let Some(subscription) = self.subscription.take() {
      subscription.dispose();
    }
  }
}

struct IntoStreamObserver<T> {
  state: Rc<RefCell<IntoStreamState<T>>>,
}

impl<T> Observer<T> for IntoStreamObserver<T> {
  fn next(&mut self, value: T) {
    let mut state = self.state.borrow_mut();
    state.queue.push_back(Ok(value));
    state.wake();
  }

  fn error(&mut self, err: Error) {
    let mut state = self.state.borrow_mut();
    state.queue.push_back(Err(err));
    state.is_closed = true;
    state.wake();
  }

  fn complete(&mut self) {
    let mut state = self.state.borrow_mut();
    state.is_closed = true;
    state.wake();
  }
}
