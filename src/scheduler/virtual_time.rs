//! Virtual time scheduler for deterministic tests of scheduled sources.
//!
//! Time only advances when explicitly instructed. Work never runs inside
//! `schedule`; it runs when the clock is advanced past its due time, in due
//! order and FIFO among equal due times.
//!
//! ```rust
//! use std::rc::Rc;
//! use rxcore::prelude::*;
//!
//! let scheduler = Rc::new(VirtualTimeScheduler::new());
//! let ticks = observable::interval(Duration::from_millis(10), scheduler.clone());
//! let _subscription = ticks.subscribe(|v| println!("tick {v}")).unwrap();
//!
//! scheduler.advance_by(Duration::from_millis(30)); // prints ticks 0, 1, 2
//! ```

use std::cell::{Cell, RefCell};

use super::{queue::WorkQueue, Duration, Scheduler, Work};
use crate::subscription::Subscription;

#[derive(Default)]
pub struct VirtualTimeScheduler {
  clock: Cell<Duration>,
  queue: RefCell<WorkQueue>,
}

impl VirtualTimeScheduler {
  pub fn new() -> Self { Self::default() }

  /// Number of queued, not yet cancelled work items.
  pub fn pending_count(&self) -> usize { self.queue.borrow().live_len() }

  /// Check if there are no pending work items.
  pub fn is_empty(&self) -> bool { self.pending_count() == 0 }

  /// Advance virtual time by `duration`, running everything that becomes due.
  pub fn advance_by(&self, duration: Duration) { self.advance_to(self.clock.get() + duration) }

  /// Advance virtual time to `target`, running everything due at or before
  /// it. Moving backwards is a no-op.
  pub fn advance_to(&self, target: Duration) {
    while self.run_one(Some(target)) {}
    if target > self.clock.get() {
      self.clock.set(target);
    }
  }

  /// Run every pending item, jumping the clock to each due time. Work that
  /// keeps rescheduling itself keeps this running until it stops or is
  /// cancelled.
  pub fn flush(&self) { while self.run_one(None) {} }

  /// Run exactly the next pending item. Returns `false` if none was pending.
  pub fn run_next(&self) -> bool { self.run_one(None) }

  fn run_one(&self, limit: Option<Duration>) -> bool {
    let item = self.queue.borrow_mut().pop_due(limit);
    match item {
      Some(item) => {
        if item.due > self.clock.get() {
          self.clock.set(item.due);
        }
        item.invoke();
        true
      }
      None => false,
    }
  }
}

impl Scheduler for VirtualTimeScheduler {
  #[inline]
  fn now(&self) -> Duration { self.clock.get() }

  fn schedule_after(&self, delay: Duration, work: Work) -> Subscription {
    self
      .queue
      .borrow_mut()
      .push(self.clock.get() + delay, work)
  }
}

#[cfg(test)]
mod test {
  use std::rc::Rc;

  use super::*;
  use crate::subscription::Disposable;

  fn record(
    scheduler: &Rc<VirtualTimeScheduler>, log: &Rc<RefCell<Vec<(u64, &'static str)>>>,
    delay: u64, tag: &'static str,
  ) -> Subscription {
    let (c_scheduler, c_log) = (scheduler.clone(), log.clone());
    scheduler.schedule_after(
      Duration::from_millis(delay),
      Box::new(move || {
        let at = c_scheduler.now().as_millis() as u64;
        c_log.borrow_mut().push((at, tag));
      }),
    )
  }

  #[test]
  fn runs_in_virtual_time_order() {
    let scheduler = Rc::new(VirtualTimeScheduler::new());
    let log = Rc::new(RefCell::new(vec![]));
    record(&scheduler, &log, 20, "b");
    record(&scheduler, &log, 10, "a");
    record(&scheduler, &log, 20, "c");
    assert!(log.borrow().is_empty());
    assert_eq!(scheduler.pending_count(), 3);

    scheduler.advance_by(Duration::from_millis(15));
    assert_eq!(*log.borrow(), vec![(10, "a")]);
    assert_eq!(scheduler.now(), Duration::from_millis(15));

    scheduler.flush();
    assert_eq!(*log.borrow(), vec![(10, "a"), (20, "b"), (20, "c")]);
    assert!(scheduler.is_empty());
  }

  #[test]
  fn cancel_before_due() {
    let scheduler = Rc::new(VirtualTimeScheduler::new());
    let log = Rc::new(RefCell::new(vec![]));
    let handle = record(&scheduler, &log, 5, "never");
    handle.dispose();
    scheduler.advance_by(Duration::from_millis(10));
    assert!(log.borrow().is_empty());
  }

  #[test]
  fn run_next_steps_one_item() {
    let scheduler = Rc::new(VirtualTimeScheduler::new());
    let log = Rc::new(RefCell::new(vec![]));
    record(&scheduler, &log, 0, "a");
    record(&scheduler, &log, 0, "b");
    assert!(scheduler.run_next());
    assert_eq!(log.borrow().len(), 1);
    assert!(scheduler.run_next());
    assert!(!scheduler.run_next());
  }
}
