//! Errors produced by sources and delivered through `Observer::error`.
//!
//! The type is `Clone` because a single failure may be broadcast to many
//! observers through a [`Subject`](crate::subject::Subject).

use std::fmt::Display;

/// The error carried by the `error` signal of every sequence in this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
  /// A required argument was missing when the observable was constructed.
  #[error("argument `{0}` must not be null")]
  NullArgument(&'static str),

  /// The source has no iterator, is not a string and has no length.
  #[error("object is not iterable")]
  NotIterable,

  /// The target was already disposed.
  #[error("object has been disposed")]
  ObjectDisposed,

  /// A producer or user supplied failure.
  #[error("{0}")]
  Custom(String),
}

impl Error {
  /// Builds a [`Error::Custom`] from anything printable.
  pub fn custom(message: impl Display) -> Self { Error::Custom(message.to_string()) }
}
