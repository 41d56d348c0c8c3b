//! Normalizes the different kinds of sources `from` accepts into one pull
//! based iterator.
//!
//! A source reports a single [`Capability`]. A type that could offer several
//! reports the first of: an iterator, being a string, having a length.
//! Resolution happens once per subscription, so every subscription pulls from
//! a fresh iterator.

use std::rc::Rc;

use crate::error::Error;

/// Largest integer an IEEE-754 double represents exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A pull based iterator whose `pull` may fail.
///
/// Every [`Iterator`] is an infallible `PullIterator`.
pub trait PullIterator {
  type Item;

  /// `Ok(Some(_))` for the next element, `Ok(None)` once exhausted.
  fn pull(&mut self) -> Result<Option<Self::Item>, Error>;
}

impl<I: Iterator> PullIterator for I {
  type Item = I::Item;

  #[inline]
  fn pull(&mut self) -> Result<Option<I::Item>, Error> { Ok(self.next()) }
}

/// A [`PullIterator`] driven by a closure, for sources whose pulls can fail.
pub struct PullFn<F>(pub F);

impl<F, T> PullIterator for PullFn<F>
where
  F: FnMut() -> Result<Option<T>, Error>,
{
  type Item = T;

  #[inline]
  fn pull(&mut self) -> Result<Option<T>, Error> { (self.0)() }
}

/// An indexable source with a numeric, possibly bogus, length.
pub trait ArrayLike {
  type Item;

  /// The raw length. Normalized with [`to_length`] before iterating.
  fn length(&self) -> f64;

  /// Element at `index`; only called for `index < to_length(self.length())`.
  fn item(&self, index: usize) -> Self::Item;
}

impl<T: Clone> ArrayLike for Vec<T> {
  type Item = T;

  #[inline]
  fn length(&self) -> f64 { self.len() as f64 }

  #[inline]
  fn item(&self, index: usize) -> T { self[index].clone() }
}

impl<T: Clone, const N: usize> ArrayLike for [T; N] {
  type Item = T;

  #[inline]
  fn length(&self) -> f64 { N as f64 }

  #[inline]
  fn item(&self, index: usize) -> T { self[index].clone() }
}

impl<T: Clone> ArrayLike for Rc<[T]> {
  type Item = T;

  #[inline]
  fn length(&self) -> f64 { self.len() as f64 }

  #[inline]
  fn item(&self, index: usize) -> T { self[index].clone() }
}

/// What a source is able to offer for iteration.
pub enum Capability<T> {
  HasIterator(Box<dyn PullIterator<Item = T>>),
  /// Iterated one `char` at a time; `map_char` turns each into an item.
  StringLike { text: Rc<str>, map_char: fn(char) -> T },
  ArrayLike(Rc<dyn ArrayLike<Item = T>>),
  Unsupported,
}

/// A source accepted by [`from`](crate::observable::from).
pub trait Iterable {
  type Item: 'static;

  /// Whether this is the "no source" value. Checked eagerly by `from`.
  fn is_null(&self) -> bool { false }

  fn capability(&self) -> Capability<Self::Item>;

  /// [`capability`](Iterable::capability) for a source already kept behind an
  /// `Rc`. Collections hand out a view of that `Rc` instead of a copy.
  fn shared_capability(self: Rc<Self>) -> Capability<Self::Item>
  where
    Self: Sized + 'static,
  {
    self.capability()
  }
}

/// Normalizes a length the way `ToLength` does: NaN and non-positive values
/// become 0, fractions truncate, and anything above 2^53 - 1 (infinity
/// included) clamps to it.
pub fn to_length(length: f64) -> usize {
  if length.is_nan() || length <= 0. {
    return 0;
  }
  let length = length.trunc().min(MAX_SAFE_INTEGER);
  usize::try_from(length as u64).unwrap_or(usize::MAX)
}

/// Turns a capability into an iterator, or `NotIterable`.
pub fn normalize<T: 'static>(capability: Capability<T>) -> Result<Box<dyn PullIterator<Item = T>>, Error> {
  match capability {
    Capability::HasIterator(iter) => Ok(iter),
    Capability::StringLike { text, map_char } => Ok(Box::new(StringIter { text, pos: 0, map_char })),
    Capability::ArrayLike(source) => {
      let len = to_length(source.length());
      Ok(Box::new(ArrayLikeIter { source, len, index: 0 }))
    }
    Capability::Unsupported => Err(Error::NotIterable),
  }
}

struct StringIter<T> {
  text: Rc<str>,
  pos: usize,
  map_char: fn(char) -> T,
}

impl<T> Iterator for StringIter<T> {
  type Item = T;

  fn next(&mut self) -> Option<T> {
    let c = self.text[self.pos..].chars().next()?;
    self.pos += c.len_utf8();
    Some((self.map_char)(c))
  }
}

struct ArrayLikeIter<T> {
  source: Rc<dyn ArrayLike<Item = T>>,
  len: usize,
  index: usize,
}

impl<T> Iterator for ArrayLikeIter<T> {
  type Item = T;

  fn next(&mut self) -> Option<T> {
    if self.index < self.len {
      let value = self.source.item(self.index);
      self.index += 1;
      Some(value)
    } else {
      None
    }
  }
}

fn same_char(c: char) -> char { c }

impl Iterable for &'static str {
  type Item = char;

  fn capability(&self) -> Capability<char> {
    Capability::StringLike { text: Rc::from(*self), map_char: same_char }
  }
}

impl Iterable for String {
  type Item = char;

  fn capability(&self) -> Capability<char> {
    Capability::StringLike { text: Rc::from(self.as_str()), map_char: same_char }
  }
}

impl Iterable for Rc<str> {
  type Item = char;

  fn capability(&self) -> Capability<char> {
    Capability::StringLike { text: self.clone(), map_char: same_char }
  }
}

impl<T: Clone + 'static> Iterable for Vec<T> {
  type Item = T;

  fn capability(&self) -> Capability<T> { Capability::ArrayLike(Rc::new(self.clone())) }

  fn shared_capability(self: Rc<Self>) -> Capability<T> { Capability::ArrayLike(self) }
}

impl<T: Clone + 'static> Iterable for Rc<[T]> {
  type Item = T;

  fn capability(&self) -> Capability<T> { Capability::ArrayLike(Rc::new(self.clone())) }
}

impl<T: Clone + 'static, const N: usize> Iterable for [T; N] {
  type Item = T;

  fn capability(&self) -> Capability<T> { Capability::ArrayLike(Rc::new(self.clone())) }

  fn shared_capability(self: Rc<Self>) -> Capability<T> { Capability::ArrayLike(self) }
}

impl<S: Iterable> Iterable for Option<S> {
  type Item = S::Item;

  #[inline]
  fn is_null(&self) -> bool { self.is_none() }

  fn capability(&self) -> Capability<S::Item> {
    match self {
      Some(source) => source.capability(),
      None => Capability::Unsupported,
    }
  }
}

/// Source backed by a cloneable Rust iterable; each subscription iterates a
/// fresh clone.
#[derive(Clone)]
pub struct IterSource<I>(pub I);

impl<I> Iterable for IterSource<I>
where
  I: IntoIterator + Clone + 'static,
  I::IntoIter: 'static,
  I::Item: 'static,
{
  type Item = I::Item;

  fn capability(&self) -> Capability<I::Item> {
    Capability::HasIterator(Box::new(self.0.clone().into_iter()))
  }
}

/// Source that builds a new [`PullIterator`] for every subscription.
#[derive(Clone)]
pub struct IterableFn<F>(pub F);

impl<F, P> Iterable for IterableFn<F>
where
  F: Fn() -> P,
  P: PullIterator + 'static,
  P::Item: 'static,
{
  type Item = P::Item;

  fn capability(&self) -> Capability<P::Item> { Capability::HasIterator(Box::new((self.0)())) }
}

/// Source exposing only an [`ArrayLike`] view.
pub struct ArrayLikeSource<A>(pub Rc<A>);

impl<A> Clone for ArrayLikeSource<A> {
  fn clone(&self) -> Self { ArrayLikeSource(self.0.clone()) }
}

impl<A> ArrayLikeSource<A> {
  pub fn new(array: A) -> Self { ArrayLikeSource(Rc::new(array)) }
}

impl<A> Iterable for ArrayLikeSource<A>
where
  A: ArrayLike + 'static,
  A::Item: 'static,
{
  type Item = A::Item;

  fn capability(&self) -> Capability<A::Item> { Capability::ArrayLike(self.0.clone()) }
}
