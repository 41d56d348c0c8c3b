use crate::{
  prelude::*,
  scheduler::SchedulerRef,
};

/// Returns an observable which emits a single `item` once `due` has elapsed
/// on `scheduler`, then completes.
pub fn timer<Item: Clone + 'static>(item: Item, due: Duration, scheduler: SchedulerRef) -> Timer<Item> {
  Timer { item, due, scheduler }
}

#[derive(Clone)]
pub struct Timer<Item> {
  item: Item,
  due: Duration,
  scheduler: SchedulerRef,
}

impl<Item: Clone + 'static> Observable for Timer<Item> {
  type Item = Item;

  fn subscribe_core(&self, subscriber: Subscriber<Item>) -> Result<Subscription, Error> {
    let item = self.item.clone();
    Ok(self.scheduler.schedule_after(
      self.due,
      Box::new(move || {
        subscriber.next(item);
        subscriber.complete();
      }),
    ))
  }
}
