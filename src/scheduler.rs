//! Schedulers decide when a unit of work runs.
//!
//! Everything here is single threaded: "scheduling" orders and defers
//! callbacks, it never moves them to another thread.
//!
//! - [`CurrentThreadScheduler`]: a trampoline. Work scheduled while the
//!   trampoline is draining is queued instead of run, which keeps the stack
//!   flat no matter how many steps a source takes.
//! - [`VirtualTimeScheduler`]: a virtual clock that only moves when told to.
//!
//! Recursive work goes through [`schedule_recursive`] and
//! [`schedule_recursive_after`].

use std::rc::Rc;
pub use std::time::Duration;

use crate::subscription::Subscription;

mod current_thread;
mod queue;
mod recursive;
mod virtual_time;
pub(crate) use current_thread::current_thread_instance;
pub use current_thread::{current_thread, CurrentThreadScheduler};
pub use recursive::{schedule_recursive, schedule_recursive_after};
pub use virtual_time::VirtualTimeScheduler;

/// A unit of scheduled work.
pub type Work = Box<dyn FnOnce()>;

/// A Scheduler is an object to order work and schedule its execution.
pub trait Scheduler {
  /// The scheduler's notion of the current time, relative to its own epoch.
  fn now(&self) -> Duration;

  /// Runs `work` as soon as the scheduler allows. Disposing the returned
  /// subscription before the work started cancels it.
  fn schedule(&self, work: Work) -> Subscription { self.schedule_after(Duration::ZERO, work) }

  /// Runs `work` once `delay` has elapsed on this scheduler's clock.
  fn schedule_after(&self, delay: Duration, work: Work) -> Subscription;
}

/// Shared handle through which sources receive their scheduler.
pub type SchedulerRef = Rc<dyn Scheduler>;

/// Resolves an optional scheduler argument, falling back to the calling
/// thread's current-thread scheduler.
pub fn or_current_thread(scheduler: Option<SchedulerRef>) -> SchedulerRef {
  match scheduler {
    Some(scheduler) => scheduler,
    None => current_thread(),
  }
}
