use std::convert::Infallible;

use crate::prelude::*;

/// Observer built from a single value handler, for sources that can never
/// fail.
#[derive(Clone)]
pub struct ObserverNext<N> {
  next: N,
}

impl<Item, N> Observer<Item, Infallible> for ObserverNext<N>
where
  N: FnMut(Item),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value); }

  #[inline]
  fn error(&mut self, err: Infallible) { match err {} }

  #[inline]
  fn complete(&mut self) {}
}

pub trait SubscribeNext<Item, N> {
  type Unsub: Disposable;

  /// Invokes an execution of an Observable and registers a handler for the
  /// values it emits. Only available when the source's error channel is
  /// [`Infallible`], so no failure can go unhandled.
  fn subscribe(self, next: N) -> Self::Unsub;
}

impl<S, Item, N> SubscribeNext<Item, N> for S
where
  S: Observable<Item, Infallible, ObserverNext<N>>,
  N: FnMut(Item),
{
  type Unsub = S::Unsub;

  fn subscribe(self, next: N) -> Self::Unsub {
    self.actual_subscribe(ObserverNext { next })
  }
}
