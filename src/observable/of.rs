use std::ops::Range;

use crate::{
  iterable::IterSource,
  observable::FromObservable,
  scheduler::SchedulerRef,
};

/// Creates an observable producing the given values in order.
///
/// Completes right after the last value. Never emits an error.
///
/// ```
/// use rxcore::prelude::*;
///
/// observable::of(vec![1, 2, 3])
///   .subscribe(|v| println!("{v},"))
///   .unwrap();
/// ```
pub fn of<Item: Clone + 'static>(items: Vec<Item>) -> FromObservable<Vec<Item>> { of_with(items, None) }

/// [`of`] emitting on `scheduler`.
pub fn of_with<Item: Clone + 'static>(
  items: Vec<Item>, scheduler: Option<SchedulerRef>,
) -> FromObservable<Vec<Item>> {
  FromObservable::new(items, scheduler)
}

/// Emits `count` sequential integers starting at `start`.
pub fn range(start: i64, count: usize) -> FromObservable<IterSource<Range<i64>>> {
  range_with(start, count, None)
}

/// [`range`] emitting on `scheduler`.
pub fn range_with(
  start: i64, count: usize, scheduler: Option<SchedulerRef>,
) -> FromObservable<IterSource<Range<i64>>> {
  let end = start.saturating_add(i64::try_from(count).unwrap_or(i64::MAX));
  FromObservable::new(IterSource(start..end), scheduler)
}
