//! # rxcore: lazy, cancelable push-based sequences
//!
//! An [`Observable`] describes a sequence; nothing happens until it is
//! subscribed. Sources are driven by a [`Scheduler`]: by default the calling
//! thread's trampoline, which delivers arbitrarily long sequences with a flat
//! stack, or a [`VirtualTimeScheduler`] that only moves when told to.
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//! use rxcore::prelude::*;
//!
//! let seen = Rc::new(RefCell::new(vec![]));
//! let c_seen = seen.clone();
//! observable::from(vec![1, 2, 3, 4])
//!   .unwrap()
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 10)
//!   .subscribe(move |v| c_seen.borrow_mut().push(v))
//!   .unwrap();
//! assert_eq!(*seen.borrow(), vec![20, 40]);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | The core trait: `subscribe_core` starts producing |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`Subscription`] | Handle to cancel an active subscription, idempotent |
//! | [`Scheduler`] | Decides when each unit of work runs |
//!
//! ## Feature Flags
//!
//! - **`futures`** (default): `ObservableExt::into_stream`, a bridge to
//!   `futures::Stream`.
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscription::Subscription
//! [`Scheduler`]: scheduler::Scheduler
//! [`VirtualTimeScheduler`]: scheduler::VirtualTimeScheduler

pub mod error;
pub mod event;
pub mod iterable;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod scheduler;
pub mod subject;
pub mod subscriber;
pub mod subscription;

// Re-export the prelude module
pub use prelude::*;
