//! The subscription-bridging adapter.
//!
//! [`bridge`] exposes a demand-based [`Publisher`] as a push-based
//! [`Observable`]. On subscribe it registers a [`BridgeSubscriber`] with
//! the publisher, requests [`UNBOUNDED`] demand exactly once, and from then
//! on relays every upstream signal as the matching observer notification.
//! Teardown — whether by an upstream terminal event or by downstream
//! disposal — goes through a single compare-and-swap gate, so it happens
//! exactly once no matter which side wins the race, and nothing is
//! forwarded once the gate has flipped.

use std::{
  fmt::{Debug, Formatter},
  sync::{
    atomic::{AtomicU8, Ordering},
    Arc, Mutex,
  },
};

use crate::{
  disposable::Disposable,
  observable::Observable,
  observer::Observer,
  publisher::{BoxSubscription, Publisher, Subscriber, Subscription, UNBOUNDED},
};

/// Exposes `publisher` as a push-based observable.
///
/// The returned observable serves exactly one observer per subscription and
/// never exercises backpressure: the full upstream emission rate reaches
/// the observer.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use rxbridge::prelude::*;
///
/// let events = Arc::new(Mutex::new(Vec::new()));
/// let sink = events.clone();
/// bridge(publisher::from_iter(1..=3))
///   .subscribe_event(move |e| sink.lock().unwrap().push(e));
///
/// assert_eq!(
///   *events.lock().unwrap(),
///   vec![Event::Next(1), Event::Next(2), Event::Next(3), Event::Complete]
/// );
/// ```
pub fn bridge<P>(publisher: P) -> PublisherObservable<P> {
  PublisherObservable(publisher)
}

/// Hangs [`bridge`] off any publisher as `publisher.into_observable()`.
pub trait IntoObservable<Item, Err>: Publisher<Item, Err> + Sized {
  #[inline]
  fn into_observable(self) -> PublisherObservable<Self> { bridge(self) }
}

impl<P, Item, Err> IntoObservable<Item, Err> for P where P: Publisher<Item, Err>
{}

/// A demand-based publisher wearing the observable interface.
#[derive(Clone)]
pub struct PublisherObservable<P>(P);

impl<P, Item, Err, O> Observable<Item, Err, O> for PublisherObservable<P>
where
  P: Publisher<Item, Err>,
  O: Observer<Item, Err> + Send + 'static,
{
  type Unsub = BridgeSubscription;

  fn actual_subscribe(self, observer: O) -> BridgeSubscription {
    let gate = Arc::new(BridgeGate::default());
    self.0.subscribe(BridgeSubscriber { observer, gate: gate.clone() });
    BridgeSubscription(gate)
  }
}

const ACTIVE: u8 = 0;
const DONE: u8 = 1;
const CANCELLED: u8 = 2;

/// Shared teardown state: the terminated-or-cancelled phase gate plus the
/// slot holding the upstream handle.
///
/// The phase is monotonic — once it leaves `ACTIVE` it never changes
/// again — and only the compare-and-swap winner acts on the handle.
#[derive(Default)]
struct BridgeGate {
  phase: AtomicU8,
  upstream: Mutex<Option<BoxSubscription>>,
}

impl BridgeGate {
  #[inline]
  fn is_active(&self) -> bool { self.phase.load(Ordering::Acquire) == ACTIVE }

  /// `ACTIVE -> DONE`. The winner releases the upstream handle, which the
  /// terminal event has made redundant; it must not be cancelled.
  fn finish(&self) -> bool {
    let won = self
      .phase
      .compare_exchange(ACTIVE, DONE, Ordering::AcqRel, Ordering::Acquire)
      .is_ok();
    if won {
      self.upstream.lock().unwrap().take();
    }
    won
  }

  /// `ACTIVE -> CANCELLED`. The winner cancels and releases the upstream
  /// handle. Losing (already done or already cancelled) is a no-op.
  fn cancel(&self) {
    let won = self
      .phase
      .compare_exchange(ACTIVE, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
      .is_ok();
    if won {
      // an empty slot means the handle has not arrived yet or is out on
      // the demand request; `park` routes it here once it returns
      if let Some(mut upstream) = self.upstream.lock().unwrap().take() {
        upstream.cancel();
      }
    }
  }

  /// Stores the upstream handle, then re-checks the phase: a teardown that
  /// raced the store and found the slot empty is honored here, so no live
  /// handle is ever left parked after the gate has flipped.
  fn park(&self, subscription: BoxSubscription) {
    *self.upstream.lock().unwrap() = Some(subscription);
    if !self.is_active() {
      if let Some(mut upstream) = self.upstream.lock().unwrap().take() {
        if self.phase.load(Ordering::Acquire) == CANCELLED {
          upstream.cancel();
        }
      }
    }
  }

  /// Issues the one-shot unbounded demand request. The handle is checked
  /// out of the slot for the duration: a synchronous publisher may deliver
  /// its entire stream — terminal event included — from inside `request`.
  fn pull_unbounded(&self) {
    let checked_out = self.upstream.lock().unwrap().take();
    if let Some(mut upstream) = checked_out {
      upstream.request(UNBOUNDED);
      match self.phase.load(Ordering::Acquire) {
        ACTIVE => self.park(upstream),
        CANCELLED => upstream.cancel(),
        // DONE: a terminal event arrived during the request; the handle
        // just drops
        _ => {}
      }
    }
  }
}

/// Demand-side subscriber that relays into a push-side observer.
///
/// Created by [`PublisherObservable::actual_subscribe`]; the publisher it
/// is registered with owns it for the subscription's lifetime.
pub struct BridgeSubscriber<O> {
  observer: O,
  gate: Arc<BridgeGate>,
}

impl<Item, Err, O> Subscriber<Item, Err> for BridgeSubscriber<O>
where
  O: Observer<Item, Err>,
{
  fn on_subscribe(&mut self, subscription: BoxSubscription) {
    self.gate.park(subscription);
    // fire-hose consumption: the only demand request the bridge ever makes
    self.gate.pull_unbounded();
  }

  fn on_next(&mut self, value: Item) {
    if self.gate.is_active() {
      self.observer.next(value);
    }
  }

  fn on_error(&mut self, err: Err) {
    if self.gate.finish() {
      self.observer.error(err);
    }
  }

  fn on_complete(&mut self) {
    if self.gate.finish() {
      self.observer.complete();
    }
  }
}

/// Disposable returned from subscribing through the bridge.
///
/// Clones share the same underlying subscription: disposing any of them
/// tears the stream down for all. Disposal before the upstream terminal
/// event cancels the upstream handle; after it, the handle is already
/// released and disposal is a no-op.
#[derive(Clone)]
pub struct BridgeSubscription(Arc<BridgeGate>);

impl Disposable for BridgeSubscription {
  #[inline]
  fn dispose(&mut self) { self.0.cancel() }

  #[inline]
  fn is_disposed(&self) -> bool { !self.0.is_active() }
}

impl Debug for BridgeSubscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("BridgeSubscription")
      .field("is_disposed", &self.is_disposed())
      .finish()
  }
}
