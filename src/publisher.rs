//! Demand-based publisher contract.
//!
//! The pull model inverts the observable protocol: a [`Subscriber`]
//! registers with a [`Publisher`], receives a cancellable [`Subscription`]
//! handle, and values flow only within the demand the subscriber has
//! requested through that handle. The concrete sources in this module all
//! speak this contract; the bridging adapter consumes it without naming any
//! of them.

mod from_iter;
pub use from_iter::*;
#[cfg(feature = "stream")]
mod from_stream;
#[cfg(feature = "stream")]
pub use from_stream::*;

/// Maximum representable demand. A subscriber requesting this much has
/// opted out of flow control: the publisher may emit freely.
pub const UNBOUNDED: usize = usize::MAX;

/// Cancellable handle a [`Publisher`] delivers to its [`Subscriber`] on
/// registration. All value delivery is gated on demand requested here.
pub trait Subscription {
  /// Adds `n` to the outstanding demand. The publisher may deliver at most
  /// that many further values, on any thread, possibly synchronously from
  /// inside this call. Demand saturates instead of overflowing.
  fn request(&mut self, n: usize);

  /// Stops delivery and releases publisher-side resources. A value already
  /// in flight may still arrive.
  fn cancel(&mut self);
}

/// The boxed handle form publishers hand to subscribers.
pub type BoxSubscription = Box<dyn Subscription + Send>;

impl<T: ?Sized> Subscription for Box<T>
where
  T: Subscription,
{
  #[inline]
  fn request(&mut self, n: usize) { (**self).request(n) }

  #[inline]
  fn cancel(&mut self) { (**self).cancel() }
}

/// Receiving side of the demand contract.
///
/// A well-behaved publisher calls `on_subscribe` exactly once, then
/// `on_next` at most as often as demanded, then at most one of `on_error` /
/// `on_complete`, and nothing after that. Subscribers built by this crate
/// tolerate publishers that break the protocol.
pub trait Subscriber<Item, Err> {
  /// Acknowledges registration, delivering the handle through which demand
  /// is requested and the subscription cancelled.
  fn on_subscribe(&mut self, subscription: BoxSubscription);

  /// Delivers one value, consuming one unit of outstanding demand.
  fn on_next(&mut self, value: Item);

  /// Delivers the failure that ends the stream.
  fn on_error(&mut self, err: Err);

  /// Delivers the successful end of the stream.
  fn on_complete(&mut self);
}

/// A producer that emits values to its single subscriber only within the
/// demand that subscriber has requested.
pub trait Publisher<Item, Err> {
  /// Registers `subscriber` and begins the subscription handshake.
  ///
  /// Never fails synchronously; all failure signaling flows through
  /// [`Subscriber::on_error`].
  fn subscribe<S>(self, subscriber: S)
  where
    S: Subscriber<Item, Err> + Send + 'static;
}
