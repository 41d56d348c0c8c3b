use std::{marker::PhantomData, rc::Rc};

use crate::{
  event::{EventTarget, ListenerId},
  ops::ref_count::RefCount,
  prelude::*,
};

/// The forwarding callback handed to an event source's add handler.
pub type Handler<T> = Rc<dyn Fn(T)>;

/// Type to name when passing `None` as remove handler.
pub type NoRemove<T, K> = fn(Handler<T>, K);

/// Bridges a register/unregister style event source into an observable.
///
/// `add_handler` receives the forwarding handler; whatever it returns is
/// kept and handed back to `remove_handler` together with the handler when
/// the registration is torn down. All subscribers share one registration:
/// it is made for the first subscriber and removed after the last one
/// leaves. The observable never completes or fails on its own.
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
/// use rxcore::{observable::{Handler, NoRemove}, prelude::*};
///
/// let handlers: Rc<RefCell<Vec<Handler<i32>>>> = Rc::default();
/// let c_handlers = handlers.clone();
/// let clicks = observable::from_event_pattern(
///   move |h: Handler<i32>| c_handlers.borrow_mut().push(h),
///   None::<NoRemove<i32, ()>>,
/// );
/// let seen = Rc::new(RefCell::new(vec![]));
/// let c_seen = seen.clone();
/// clicks.subscribe(move |v| c_seen.borrow_mut().push(v)).unwrap();
/// for h in handlers.borrow().iter() {
///   h(7);
/// }
/// assert_eq!(*seen.borrow(), vec![7]);
/// ```
pub fn from_event_pattern<T, A, R, K>(
  add_handler: A, remove_handler: Option<R>,
) -> RefCount<EventPatternObservable<T, A, R>>
where
  T: Clone + 'static,
  A: Fn(Handler<T>) -> K + 'static,
  R: Fn(Handler<T>, K) + 'static,
  K: 'static,
{
  event_pattern(add_handler, remove_handler).share()
}

/// [`from_event_pattern`] without the shared registration: every subscriber
/// registers its own handler.
pub fn event_pattern<T, A, R, K>(
  add_handler: A, remove_handler: Option<R>,
) -> EventPatternObservable<T, A, R>
where
  A: Fn(Handler<T>) -> K,
  R: Fn(Handler<T>, K),
{
  EventPatternObservable {
    add_handler: Rc::new(add_handler),
    remove_handler: remove_handler.map(Rc::new),
    _hint: PhantomData,
  }
}

/// Listens to the `event` events of `target`.
pub fn from_event<E>(
  target: Rc<E>, event: impl Into<String>,
) -> RefCount<
  EventPatternObservable<
    E::Event,
    impl Fn(Handler<E::Event>) -> ListenerId + 'static,
    impl Fn(Handler<E::Event>, ListenerId) + 'static,
  >,
>
where
  E: EventTarget + 'static,
{
  let event: Rc<str> = Rc::from(event.into());
  let (add_target, add_event) = (target.clone(), event.clone());
  from_event_pattern(
    move |handler: Handler<E::Event>| add_target.add_listener(&add_event, handler),
    Some(move |_: Handler<E::Event>, id: ListenerId| target.remove_listener(&event, id)),
  )
}

/// Observable built by [`event_pattern`].
pub struct EventPatternObservable<T, A, R> {
  add_handler: Rc<A>,
  remove_handler: Option<Rc<R>>,
  _hint: PhantomData<fn(T)>,
}

impl<T, A, R> Clone for EventPatternObservable<T, A, R> {
  fn clone(&self) -> Self {
    EventPatternObservable {
      add_handler: self.add_handler.clone(),
      remove_handler: self.remove_handler.clone(),
      _hint: PhantomData,
    }
  }
}

impl<T, A, R, K> Observable for EventPatternObservable<T, A, R>
where
  T: 'static,
  A: Fn(Handler<T>) -> K,
  R: Fn(Handler<T>, K) + 'static,
  K: 'static,
{
  type Item = T;

  fn subscribe_core(&self, subscriber: Subscriber<T>) -> Result<Subscription, Error> {
    let handler: Handler<T> = Rc::new(move |event: T| subscriber.next(event));
    let token = (self.add_handler)(handler.clone());
    tracing::trace!("event handler registered");
    let remove_handler = self.remove_handler.clone();
    Ok(Subscription::from_fn(move || {
      if let Some(remove_handler) = remove_handler {
        remove_handler(handler, token);
        tracing::trace!("event handler removed");
      }
    }))
  }
}
