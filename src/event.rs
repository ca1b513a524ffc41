//! Push-side notification model.
//!
//! Every signal crossing the bridge is materialized as one [`Event`]: a
//! value, a failure, or successful completion. A well-formed stream is zero
//! or more `Next` events followed by at most one terminal event.

/// A single notification delivered to the push side of a stream.
///
/// Equality is honest: `Next` compares by item equality, `Error` by the
/// error type's own equality, and `Complete` markers are always equal.
/// Events of different variants are never equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event<Item, Err> {
  /// A value emitted by the stream.
  Next(Item),
  /// The stream failed. No event follows this one.
  Error(Err),
  /// The stream finished successfully. No event follows this one.
  Complete,
}

impl<Item, Err> Event<Item, Err> {
  #[inline]
  pub fn is_next(&self) -> bool { matches!(self, Event::Next(_)) }

  #[inline]
  pub fn is_error(&self) -> bool { matches!(self, Event::Error(_)) }

  #[inline]
  pub fn is_complete(&self) -> bool { matches!(self, Event::Complete) }

  /// Whether this event ends the stream.
  #[inline]
  pub fn is_terminal(&self) -> bool { !self.is_next() }

  /// The emitted value, if this is a `Next` event.
  pub fn next(&self) -> Option<&Item> {
    match self {
      Event::Next(value) => Some(value),
      _ => None,
    }
  }

  /// The failure payload, if this is an `Error` event.
  pub fn error(&self) -> Option<&Err> {
    match self {
      Event::Error(err) => Some(err),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use std::convert::Infallible;

  use super::*;

  #[test]
  fn equality_by_payload() {
    let a: Event<i32, &str> = Event::Next(1);
    assert_eq!(a, Event::Next(1));
    assert_ne!(a, Event::Next(2));

    assert_eq!(Event::<i32, &str>::Error("boom"), Event::Error("boom"));
    assert_ne!(Event::<i32, &str>::Error("boom"), Event::Error("bust"));

    assert_eq!(Event::<i32, &str>::Complete, Event::Complete);
  }

  #[test]
  fn variants_never_cross_compare() {
    assert_ne!(Event::<i32, i32>::Next(1), Event::Error(1));
    assert_ne!(Event::<i32, i32>::Next(1), Event::Complete);
    assert_ne!(Event::<i32, i32>::Error(1), Event::Complete);
  }

  #[test]
  fn predicates() {
    let next: Event<i32, Infallible> = Event::Next(7);
    assert!(next.is_next() && !next.is_terminal());
    assert_eq!(next.next(), Some(&7));

    let err: Event<i32, &str> = Event::Error("boom");
    assert!(err.is_error() && err.is_terminal());
    assert_eq!(err.error(), Some(&"boom"));

    let done: Event<i32, &str> = Event::Complete;
    assert!(done.is_complete() && done.is_terminal());
    assert_eq!(done.next(), None);
  }
}
