//! The subscription contract and the constructors built on it.
//!
//! An [`Observable`] is a lazy description of a push based sequence: creating
//! one does no work. Work starts when [`ObservableExt::subscribe_with`] (or
//! one of its shorthands) hands the observable a [`Subscriber`], and stops
//! when the returned [`Subscription`] is disposed or the sequence terminates.

use std::rc::Rc;

use crate::{
  error::Error,
  observer::{Observer, ObserverAll, ObserverNext},
  ops::{
    filter::FilterOp, finalize::FinalizeOp, map::MapOp, publish::ConnectableObservable,
    ref_count::RefCount, take::TakeOp,
  },
  scheduler::current_thread_instance,
  subscriber::Subscriber,
  subscription::Subscription,
};
#[cfg(feature = "futures")]
use crate::ops::into_stream::IntoStream;

mod boxed;
mod create;
mod defer;
mod from;
mod from_event_pattern;
mod interval;
mod of;
mod timer;
mod trivial;
pub use boxed::BoxedObservable;
pub use create::{create, Create};
pub use defer::{defer, Defer};
pub use from::{from, from_iter, from_with, FromObservable};
pub use from_event_pattern::{
  event_pattern, from_event, from_event_pattern, EventPatternObservable, Handler, NoRemove,
};
pub use interval::{interval, Interval};
pub use of::{of, of_with, range, range_with};
pub use timer::{timer, Timer};
pub use trivial::{empty, empty_with, never, throw_error, throw_error_with, Empty, Never, ThrowError};

/// A representation of any set of values over any amount of time. This is the
/// most basic building block of rxcore.
pub trait Observable {
  type Item: 'static;

  /// Starts producing into `subscriber` and returns the handle that stops it.
  ///
  /// Must not do anything until called. An `Err` means the core failed before
  /// it could hand back a subscription; `subscribe_with` routes it to the
  /// subscriber's `error` when possible.
  fn subscribe_core(&self, subscriber: Subscriber<Self::Item>) -> Result<Subscription, Error>;
}

impl<O: Observable + ?Sized> Observable for Rc<O> {
  type Item = O::Item;

  #[inline]
  fn subscribe_core(&self, subscriber: Subscriber<Self::Item>) -> Result<Subscription, Error> {
    (**self).subscribe_core(subscriber)
  }
}

/// Subscribe surface and operators, available on every [`Observable`].
pub trait ObservableExt: Observable {
  /// Subscribes `observer`.
  ///
  /// The subscription starts inside the calling thread's current-thread
  /// trampoline, so everything the source schedules there has been delivered
  /// by the time this returns. If `subscribe_core` fails, the error is
  /// delivered to `observer` unless it already received a terminal signal, in
  /// which case it is returned.
  fn subscribe_with<O>(&self, observer: O) -> Result<Subscription, Error>
  where
    O: Observer<Self::Item> + 'static,
  {
    let subscriber = Subscriber::new(observer);
    let attached = current_thread_instance().trampoline(|| {
      match self.subscribe_core(subscriber.clone()) {
        Ok(upstream) => {
          subscriber.set_upstream(upstream);
          Ok(())
        }
        Err(err) => {
          tracing::debug!(%err, "subscribe_core failed");
          subscriber.fail(err)
        }
      }
    });
    attached.map(|()| Subscription::new(subscriber))
  }

  /// Subscribes with a value callback only; errors are logged.
  fn subscribe<N>(&self, next: N) -> Result<Subscription, Error>
  where
    N: FnMut(Self::Item) + 'static,
  {
    self.subscribe_with(ObserverNext(next))
  }

  /// Subscribes with three plain callbacks.
  fn subscribe_all<N, E, C>(&self, next: N, error: E, complete: C) -> Result<Subscription, Error>
  where
    N: FnMut(Self::Item) + 'static,
    E: FnMut(Error) + 'static,
    C: FnMut() + 'static,
  {
    self.subscribe_with(ObserverAll::new(next, error, complete))
  }

  /// Creates a new stream which calls a closure on each element and uses
  /// its return as the value.
  fn map<B, F>(self, f: F) -> MapOp<Self, F>
  where
    Self: Sized,
    F: Fn(Self::Item) -> B + 'static,
  {
    MapOp::new(self, f)
  }

  /// Emit only the values for which `predicate` returns true.
  fn filter<F>(self, predicate: F) -> FilterOp<Self, F>
  where
    Self: Sized,
    F: Fn(&Self::Item) -> bool + 'static,
  {
    FilterOp::new(self, predicate)
  }

  /// Emits only the first `count` values, then completes and disposes the
  /// source.
  fn take(self, count: usize) -> TakeOp<Self>
  where
    Self: Sized,
  {
    TakeOp::new(self, count)
  }

  /// Calls `f` once per subscription when it terminates or is disposed,
  /// whichever happens first.
  fn finalize<F>(self, f: F) -> FinalizeOp<Self, F>
  where
    Self: Sized,
    F: Fn() + 'static,
  {
    FinalizeOp::new(self, f)
  }

  /// Multicasts the source through a subject once `connect` is called.
  fn publish(self) -> ConnectableObservable<Self>
  where
    Self: Sized,
    Self::Item: Clone,
  {
    ConnectableObservable::new(self)
  }

  /// `publish().ref_count()`: one shared upstream subscription, alive while
  /// at least one subscriber is.
  fn share(self) -> RefCount<Self>
  where
    Self: Sized,
    Self::Item: Clone,
  {
    self.publish().ref_count()
  }

  /// Subscribes and exposes the values as a [`futures::Stream`]. Dropping
  /// the stream disposes the subscription.
  #[cfg(feature = "futures")]
  fn into_stream(&self) -> Result<IntoStream<Self::Item>, Error> { IntoStream::new(self) }

  /// Erases the concrete observable type.
  fn boxed(self) -> BoxedObservable<Self::Item>
  where
    Self: Sized + 'static,
  {
    Rc::new(self)
  }
}

impl<T: Observable + ?Sized> ObservableExt for T {}
