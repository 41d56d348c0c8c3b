use std::{
  cell::{Cell, RefCell},
  rc::Rc,
  time::Instant,
};

use super::{queue::WorkQueue, Duration, Scheduler, SchedulerRef, Work};
use crate::subscription::Subscription;

thread_local! {
  static CURRENT_THREAD: Rc<CurrentThreadScheduler> = Rc::new(CurrentThreadScheduler::new());
}

/// The calling thread's default [`CurrentThreadScheduler`].
///
/// Only a convenience for sources that were not handed a scheduler; every
/// source also accepts an explicit one.
pub fn current_thread() -> SchedulerRef { CURRENT_THREAD.with(|s| s.clone() as SchedulerRef) }

pub(crate) fn current_thread_instance() -> Rc<CurrentThreadScheduler> {
  CURRENT_THREAD.with(Rc::clone)
}

/// Trampoline scheduler.
///
/// Scheduling while idle runs the work immediately and then drains whatever
/// that work queued before returning. Scheduling while draining only queues,
/// so recursive scheduling never grows the stack. Delayed work blocks the
/// draining thread until it is due.
pub struct CurrentThreadScheduler {
  queue: RefCell<WorkQueue>,
  running: Cell<bool>,
  epoch: Instant,
}

/// Marks the trampoline busy; on unwind the pending queue is dropped so the
/// next `schedule` starts clean.
struct Running<'a>(&'a CurrentThreadScheduler);

impl Drop for Running<'_> {
  fn drop(&mut self) {
    if std::thread::panicking() {
      self.0.queue.borrow_mut().clear();
    }
    self.0.running.set(false);
  }
}

impl Default for CurrentThreadScheduler {
  fn default() -> Self { Self::new() }
}

impl CurrentThreadScheduler {
  pub fn new() -> Self {
    CurrentThreadScheduler {
      queue: RefCell::new(WorkQueue::default()),
      running: Cell::new(false),
      epoch: Instant::now(),
    }
  }

  /// Whether a caller has to go through `schedule` to get trampolined, i.e.
  /// no drain loop is active on this scheduler.
  #[inline]
  pub fn schedule_required(&self) -> bool { !self.running.get() }

  /// Number of queued, not yet cancelled work items.
  pub fn pending_count(&self) -> usize { self.queue.borrow().live_len() }

  /// Runs `f` as the first item of the trampoline, then drains whatever it
  /// queued. If a drain loop is already active, `f` runs directly and its
  /// queued work is left to that loop.
  pub fn trampoline<R>(&self, f: impl FnOnce() -> R) -> R {
    if !self.schedule_required() {
      return f();
    }
    let _running = Running(self);
    self.running.set(true);
    tracing::trace!("trampoline drain started");
    let result = f();
    loop {
      let item = self.queue.borrow_mut().pop_due(None);
      let Some(item) = item else {
        break;
      };
      let wait = item.due.saturating_sub(self.now());
      if !wait.is_zero() {
        std::thread::sleep(wait);
      }
      item.invoke();
    }
    tracing::trace!("trampoline drain finished");
    result
  }
}

impl Scheduler for CurrentThreadScheduler {
  fn now(&self) -> Duration { self.epoch.elapsed() }

  fn schedule_after(&self, delay: Duration, work: Work) -> Subscription {
    let due = self.now() + delay;
    let handle = self.queue.borrow_mut().push(due, work);
    if self.schedule_required() {
      self.trampoline(|| ());
    }
    handle
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::subscription::Disposable;

  #[test]
  fn idle_schedule_runs_before_returning() {
    let scheduler = CurrentThreadScheduler::new();
    let hit = Rc::new(Cell::new(false));
    let c_hit = hit.clone();
    scheduler.schedule(Box::new(move || c_hit.set(true)));
    assert!(hit.get());
    assert!(scheduler.schedule_required());
  }

  #[test]
  fn nested_schedule_is_queued() {
    let scheduler = Rc::new(CurrentThreadScheduler::new());
    let log = Rc::new(RefCell::new(vec![]));
    let (c_scheduler, c_log) = (scheduler.clone(), log.clone());
    scheduler.schedule(Box::new(move || {
      c_log.borrow_mut().push("outer start");
      let inner_log = c_log.clone();
      c_scheduler.schedule(Box::new(move || inner_log.borrow_mut().push("inner")));
      assert!(!c_scheduler.schedule_required());
      c_log.borrow_mut().push("outer end");
    }));
    assert_eq!(*log.borrow(), vec!["outer start", "outer end", "inner"]);
  }

  #[test]
  fn cancel_queued_work() {
    let scheduler = Rc::new(CurrentThreadScheduler::new());
    let hit = Rc::new(Cell::new(false));
    let (c_scheduler, c_hit) = (scheduler.clone(), hit.clone());
    scheduler.schedule(Box::new(move || {
      let handle = c_scheduler.schedule(Box::new(move || c_hit.set(true)));
      handle.dispose();
    }));
    assert!(!hit.get());
  }

  #[test]
  fn delayed_work_waits() {
    let scheduler = Rc::new(CurrentThreadScheduler::new());
    let start = scheduler.now();
    let hit_at = Rc::new(Cell::new(Duration::ZERO));
    let (c_scheduler, c_hit_at) = (scheduler.clone(), hit_at.clone());
    scheduler.schedule_after(
      Duration::from_millis(5),
      Box::new(move || c_hit_at.set(c_scheduler.now())),
    );
    assert!(hit_at.get() >= start + Duration::from_millis(5));
  }

  #[test]
  fn panic_resets_trampoline() {
    let scheduler = Rc::new(CurrentThreadScheduler::new());
    let c_scheduler = scheduler.clone();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
      scheduler.schedule(Box::new(move || {
        c_scheduler.schedule(Box::new(|| {}));
        panic!("consumer bug");
      }));
    }));
    assert!(result.is_err());
    assert!(scheduler.schedule_required());
    assert_eq!(scheduler.pending_count(), 0);
  }

  #[test]
  fn default_instance_is_per_thread() {
    let a = current_thread_instance();
    let b = current_thread_instance();
    assert!(Rc::ptr_eq(&a, &b));
  }
}
