use std::rc::Rc;

use crate::{
  iterable::{normalize, IterSource, Iterable},
  prelude::*,
  scheduler::{or_current_thread, schedule_recursive, SchedulerRef},
};

/// Converts a string, an array-like value or an iterator source into an
/// observable that emits every element in order and then completes.
///
/// Fails right away with [`Error::NullArgument`] when `source` is the null
/// value (`None`). A source offering no way to iterate is only detected on
/// subscribe and reported through `error`.
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
/// use rxcore::prelude::*;
///
/// let seen = Rc::new(RefCell::new(String::new()));
/// let c_seen = seen.clone();
/// observable::from("abc")
///   .unwrap()
///   .subscribe(move |c| c_seen.borrow_mut().push(c))
///   .unwrap();
/// assert_eq!(*seen.borrow(), "abc");
/// ```
pub fn from<S: Iterable>(source: S) -> Result<FromObservable<S>, Error> { from_with(source, None) }

/// [`from`] driven by `scheduler` instead of the current-thread trampoline.
pub fn from_with<S: Iterable>(
  source: S, scheduler: Option<SchedulerRef>,
) -> Result<FromObservable<S>, Error> {
  if source.is_null() {
    return Err(Error::NullArgument("source"));
  }
  Ok(FromObservable::new(source, scheduler))
}

/// Emits the elements of any cloneable Rust iterable. Every subscription
/// iterates a fresh clone.
pub fn from_iter<I>(iter: I) -> FromObservable<IterSource<I>>
where
  I: IntoIterator + Clone + 'static,
  I::Item: 'static,
{
  FromObservable::new(IterSource(iter), None)
}

/// Observable returned by [`from`] and the constructors built on it.
pub struct FromObservable<S> {
  source: Rc<S>,
  scheduler: SchedulerRef,
}

impl<S> Clone for FromObservable<S> {
  fn clone(&self) -> Self {
    FromObservable { source: self.source.clone(), scheduler: self.scheduler.clone() }
  }
}

impl<S> FromObservable<S> {
  pub(crate) fn new(source: S, scheduler: Option<SchedulerRef>) -> Self {
    FromObservable { source: Rc::new(source), scheduler: or_current_thread(scheduler) }
  }
}

impl<S: Iterable + 'static> Observable for FromObservable<S> {
  type Item = S::Item;

  fn subscribe_core(&self, subscriber: Subscriber<S::Item>) -> Result<Subscription, Error> {
    let mut iter = normalize(self.source.clone().shared_capability())?;
    Ok(schedule_recursive(&self.scheduler, (), move |(), recurse| {
      if subscriber.is_stopped() {
        return;
      }
      match iter.pull() {
        Ok(Some(value)) => {
          subscriber.next(value);
          recurse(());
        }
        Ok(None) => subscriber.complete(),
        Err(err) => subscriber.error(err),
      }
    }))
  }
}
