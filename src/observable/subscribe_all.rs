use crate::prelude::*;

/// Observer built from one closure per notification kind.
#[derive(Clone)]
pub struct ObserverAll<N, E, C> {
  next: N,
  error: E,
  complete: C,
}

impl<N, E, C> ObserverAll<N, E, C> {
  #[inline]
  pub fn new(next: N, error: E, complete: C) -> Self {
    ObserverAll { next, error, complete }
  }
}

impl<Item, Err, N, E, C> Observer<Item, Err> for ObserverAll<N, E, C>
where
  N: FnMut(Item),
  E: FnMut(Err),
  C: FnMut(),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value); }

  #[inline]
  fn error(&mut self, err: Err) { (self.error)(err); }

  #[inline]
  fn complete(&mut self) { (self.complete)(); }
}

pub trait SubscribeAll<Item, Err, N, E, C> {
  type Unsub: Disposable;

  /// Invokes an execution of an Observable and registers one handler per
  /// notification kind.
  ///
  /// * `error`: handler for a terminal event resulting from a failure.
  /// * `complete`: handler for a terminal event resulting from successful
  ///   completion.
  fn subscribe_all(self, next: N, error: E, complete: C) -> Self::Unsub;
}

impl<S, Item, Err, N, E, C> SubscribeAll<Item, Err, N, E, C> for S
where
  S: Observable<Item, Err, ObserverAll<N, E, C>>,
  N: FnMut(Item),
  E: FnMut(Err),
  C: FnMut(),
{
  type Unsub = S::Unsub;

  fn subscribe_all(self, next: N, error: E, complete: C) -> Self::Unsub {
    self.actual_subscribe(ObserverAll { next, error, complete })
  }
}
