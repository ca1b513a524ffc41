//! # rxbridge: demand-driven publishers as push-based observables
//!
//! A protocol bridge between two incompatible reactive-stream models: the
//! *pull* side, where a [`Publisher`] emits values only within the demand
//! its subscriber has requested, and the *push* side, where an observable
//! emits values immediately and flow control is entirely the producer's
//! business. Subscribing through the bridge requests unbounded demand on
//! the consumer's behalf, so push-style code can observe any demand-based
//! source without ever touching demand semantics.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use rxbridge::prelude::*;
//!
//! let events = Arc::new(Mutex::new(Vec::new()));
//! let sink = events.clone();
//!
//! publisher::from_iter(1..=3)
//!   .into_observable()
//!   .subscribe_event(move |e| sink.lock().unwrap().push(e));
//!
//! assert_eq!(
//!   *events.lock().unwrap(),
//!   vec![Event::Next(1), Event::Next(2), Event::Next(3), Event::Complete]
//! );
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Publisher`] / [`Subscriber`] | The demand-based (pull) contract |
//! | [`bridge`] / [`IntoObservable`] | Adapts a publisher to the push side |
//! | [`Event`] | `Next` / `Error` / `Complete` notifications |
//! | [`Observer`] | Consumes push-side notifications |
//! | [`Disposable`] / [`DisposeBag`] | Cancellation handles and scoping |
//!
//! The bridge serves exactly one observer per subscription, forwards values
//! in upstream order, delivers at most one terminal event, and arbitrates
//! races between upstream delivery and downstream disposal so teardown
//! happens exactly once.
//!
//! ## Feature Flags
//!
//! - **`stream`** (default): `publisher::from_stream`, adapting any
//!   fallible `futures::Stream` into a demand-based publisher.
//!
//! [`Publisher`]: publisher::Publisher
//! [`Subscriber`]: publisher::Subscriber
//! [`bridge`]: bridge::bridge
//! [`IntoObservable`]: bridge::IntoObservable
//! [`Event`]: event::Event
//! [`Observer`]: observer::Observer
//! [`Disposable`]: disposable::Disposable
//! [`DisposeBag`]: disposable::DisposeBag

pub mod bridge;
pub mod disposable;
pub mod event;
pub mod observable;
pub mod observer;
pub mod prelude;
pub mod publisher;

// Re-export the prelude module
pub use prelude::*;
