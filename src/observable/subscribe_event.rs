use crate::prelude::*;

/// Observer adapter invoking a single callback once per [`Event`].
#[derive(Clone)]
pub struct EventObserver<F> {
  on_event: F,
}

impl<Item, Err, F> Observer<Item, Err> for EventObserver<F>
where
  F: FnMut(Event<Item, Err>),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.on_event)(Event::Next(value)); }

  #[inline]
  fn error(&mut self, err: Err) { (self.on_event)(Event::Error(err)); }

  #[inline]
  fn complete(&mut self) { (self.on_event)(Event::Complete); }
}

pub trait SubscribeEvent<Item, Err, F> {
  type Unsub: Disposable;

  /// Invokes an execution of an Observable, registering a single callback
  /// that receives every notification as an [`Event`], terminal events
  /// included.
  fn subscribe_event(self, on_event: F) -> Self::Unsub;
}

impl<S, Item, Err, F> SubscribeEvent<Item, Err, F> for S
where
  S: Observable<Item, Err, EventObserver<F>>,
  F: FnMut(Event<Item, Err>),
{
  type Unsub = S::Unsub;

  fn subscribe_event(self, on_event: F) -> Self::Unsub {
    self.actual_subscribe(EventObserver { on_event })
  }
}
