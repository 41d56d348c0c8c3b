use std::{cell::RefCell, marker::PhantomData, rc::Rc};

use super::{Duration, SchedulerRef, Work};
use crate::subscription::{Disposable, SerialDisposable, Subscription};

/// Schedules `worker` with `state`; the worker continues by calling
/// `recurse(next_state)` and stops by returning without calling it.
///
/// Every continuation goes back through `scheduler` instead of calling the
/// worker directly, so on a trampoline the stack depth stays constant no
/// matter how many steps run. Disposing the returned subscription cancels the
/// pending step; no step starts after that.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
/// use rxcore::scheduler::{current_thread, schedule_recursive};
///
/// let seen = Rc::new(RefCell::new(vec![]));
/// let c_seen = seen.clone();
/// schedule_recursive(&current_thread(), 0, move |i, recurse| {
///   c_seen.borrow_mut().push(i);
///   if i < 3 {
///     recurse(i + 1);
///   }
/// });
/// assert_eq!(*seen.borrow(), vec![0, 1, 2, 3]);
/// ```
pub fn schedule_recursive<S, F>(scheduler: &SchedulerRef, state: S, worker: F) -> Subscription
where
  S: 'static,
  F: FnMut(S, &mut dyn FnMut(S)) + 'static,
{
  start(scheduler, state, None, worker)
}

/// Like [`schedule_recursive`], but every step, the first included, runs
/// `delay` after it was requested.
pub fn schedule_recursive_after<S, F>(
  scheduler: &SchedulerRef, state: S, delay: Duration, worker: F,
) -> Subscription
where
  S: 'static,
  F: FnMut(S, &mut dyn FnMut(S)) + 'static,
{
  start(scheduler, state, Some(delay), worker)
}

struct Recursion<S, F> {
  scheduler: SchedulerRef,
  delay: Option<Duration>,
  worker: RefCell<F>,
  pending: SerialDisposable,
  _state: PhantomData<fn(S)>,
}

fn start<S, F>(scheduler: &SchedulerRef, state: S, delay: Option<Duration>, worker: F) -> Subscription
where
  S: 'static,
  F: FnMut(S, &mut dyn FnMut(S)) + 'static,
{
  let recursion = Rc::new(Recursion {
    scheduler: scheduler.clone(),
    delay,
    worker: RefCell::new(worker),
    pending: SerialDisposable::new(),
    _state: PhantomData,
  });
  let handle = Subscription::new(recursion.pending.clone());
  schedule_step(recursion, state);
  handle
}

fn schedule_step<S, F>(recursion: Rc<Recursion<S, F>>, state: S)
where
  S: 'static,
  F: FnMut(S, &mut dyn FnMut(S)) + 'static,
{
  if recursion.pending.is_disposed() {
    return;
  }
  let scheduler = recursion.scheduler.clone();
  let delay = recursion.delay;
  let pending = recursion.pending.clone();
  let work: Work = Box::new(move || run_step(recursion, state));
  let handle = match delay {
    Some(delay) => scheduler.schedule_after(delay, work),
    None => scheduler.schedule(work),
  };
  pending.set(handle);
}

fn run_step<S, F>(recursion: Rc<Recursion<S, F>>, state: S)
where
  S: 'static,
  F: FnMut(S, &mut dyn FnMut(S)) + 'static,
{
  if recursion.pending.is_disposed() {
    return;
  }
  let mut next = None;
  {
    let mut worker = recursion.worker.borrow_mut();
    (*worker)(state, &mut |s| next = Some(s));
  }
  if let Some(next) = next {
    schedule_step(recursion, next);
  }
}
