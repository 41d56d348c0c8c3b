//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// Errors
pub use crate::error::Error;
// Event sources
pub use crate::event::{EventEmitter, EventTarget};
// Iteration sources
pub use crate::iterable::{ArrayLike, Iterable};
// Core traits and the constructor module
pub use crate::observable::{self, BoxedObservable, Observable, ObservableExt};
// Observer trait
pub use crate::observer::Observer;
// Operators
#[cfg(feature = "futures")]
pub use crate::ops::into_stream::IntoStream;
pub use crate::ops::{publish::ConnectableObservable, ref_count::RefCount};
// Schedulers
pub use crate::scheduler::{
  self, CurrentThreadScheduler, Duration, Scheduler, SchedulerRef, VirtualTimeScheduler,
};
// Subject
pub use crate::subject::Subject;
// Subscriber and subscription
pub use crate::subscriber::Subscriber;
pub use crate::subscription::{Disposable, Subscription, SubscriptionGuard};
