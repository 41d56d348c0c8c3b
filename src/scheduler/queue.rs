use std::{cmp::Ordering, collections::BinaryHeap};

use super::{Duration, Work};
use crate::subscription::{BooleanDisposable, Disposable, Subscription};

pub(crate) struct ScheduledItem {
  pub(crate) due: Duration,
  id: usize,
  work: Work,
  cancelled: BooleanDisposable,
}

impl ScheduledItem {
  pub(crate) fn invoke(self) {
    if !self.cancelled.is_disposed() {
      (self.work)();
    }
  }
}

impl PartialEq for ScheduledItem {
  fn eq(&self, other: &Self) -> bool { self.due == other.due && self.id == other.id }
}

impl Eq for ScheduledItem {}

impl PartialOrd for ScheduledItem {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for ScheduledItem {
  fn cmp(&self, other: &Self) -> Ordering {
    // Min-heap: earlier times first, then FIFO by id
    other
      .due
      .cmp(&self.due)
      .then_with(|| other.id.cmp(&self.id))
  }
}

/// Priority queue of pending work, ordered by due time then insertion.
#[derive(Default)]
pub(crate) struct WorkQueue {
  heap: BinaryHeap<ScheduledItem>,
  next_id: usize,
}

impl WorkQueue {
  pub(crate) fn push(&mut self, due: Duration, work: Work) -> Subscription {
    let cancelled = BooleanDisposable::default();
    let id = self.next_id;
    self.next_id += 1;
    self.heap.push(ScheduledItem { due, id, work, cancelled: cancelled.clone() });
    Subscription::new(cancelled)
  }

  /// Pops the earliest live item, if it is due at or before `limit`.
  /// Cancelled items at the head are discarded on the way.
  pub(crate) fn pop_due(&mut self, limit: Option<Duration>) -> Option<ScheduledItem> {
    loop {
      let head = self.heap.peek()?;
      if head.cancelled.is_disposed() {
        self.heap.pop();
        continue;
      }
      if limit.is_some_and(|limit| head.due > limit) {
        return None;
      }
      return self.heap.pop();
    }
  }

  pub(crate) fn live_len(&self) -> usize {
    self
      .heap
      .iter()
      .filter(|item| !item.cancelled.is_disposed())
      .count()
  }

  pub(crate) fn clear(&mut self) { self.heap.clear() }
}
