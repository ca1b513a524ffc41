//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// The bridge and its handles
pub use crate::bridge::{
  bridge, BridgeSubscriber, BridgeSubscription, IntoObservable,
  PublisherObservable,
};
// Downstream resource management
pub use crate::disposable::{Disposable, DisposeBag, DisposeGuard};
// Push-side event model
pub use crate::event::Event;
// Observable trait and subscribe entry points
pub use crate::observable::{
  EventObserver, Observable, ObserverAll, ObserverNext, SubscribeAll,
  SubscribeEvent, SubscribeNext,
};
// Observer trait
pub use crate::observer::Observer;
// Demand-side contract; concrete sources stay namespaced as
// `publisher::from_iter` and friends
pub use crate::publisher::{
  self, BoxSubscription, Publisher, Subscriber, Subscription, UNBOUNDED,
};
