use crate::{
  prelude::*,
  scheduler::{schedule_recursive_after, SchedulerRef},
};

/// Creates an observable which fires at `period` into the future and then
/// repeats every `period` after, emitting `0, 1, 2, ...`. It never completes
/// on its own.
pub fn interval(period: Duration, scheduler: SchedulerRef) -> Interval {
  Interval { period, scheduler }
}

#[derive(Clone)]
pub struct Interval {
  period: Duration,
  scheduler: SchedulerRef,
}

impl Observable for Interval {
  type Item = usize;

  fn subscribe_core(&self, subscriber: Subscriber<usize>) -> Result<Subscription, Error> {
    Ok(schedule_recursive_after(&self.scheduler, 0, self.period, move |seq, recurse| {
      if !subscriber.is_stopped() {
        subscriber.next(seq);
        recurse(seq + 1);
      }
    }))
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn ticks_on_virtual_time() {
    let scheduler = Rc::new(VirtualTimeScheduler::new());
    let ticks = Rc::new(RefCell::new(vec![]));
    let c_ticks = ticks.clone();
    let subscription = observable::interval(Duration::from_millis(10), scheduler.clone())
      .subscribe(move |v| c_ticks.borrow_mut().push(v))
      .unwrap();

    scheduler.advance_by(Duration::from_millis(35));
    assert_eq!(*ticks.borrow(), vec![0, 1, 2]);

    subscription.dispose();
    scheduler.advance_by(Duration::from_millis(100));
    assert_eq!(*ticks.borrow(), vec![0, 1, 2]);
    assert!(scheduler.is_empty());
  }

  #[test]
  fn take_stops_the_interval() {
    let completed = Rc::new(RefCell::new(false));
    let ticks = Rc::new(RefCell::new(0));
    let (c_completed, c_ticks) = (completed.clone(), ticks.clone());
    observable::interval(Duration::from_millis(1), scheduler::current_thread())
      .take(5)
      .subscribe_all(
        move |_| *c_ticks.borrow_mut() += 1,
        |_| {},
        move || *c_completed.borrow_mut() = true,
      )
      .unwrap();
    assert_eq!(*ticks.borrow(), 5);
    assert!(*completed.borrow());
  }
}
