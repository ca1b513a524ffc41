//! Observable trait and subscribe entry points.
//!
//! The trait itself is intentionally small: an observable is anything that
//! can wire a single [`Observer`] to a source and hand back a disposable
//! handle. The sibling modules provide the ergonomic `subscribe*` variants
//! layered on top of it.

use crate::{disposable::Disposable, observer::Observer};

mod subscribe_all;
mod subscribe_event;
mod subscribe_next;
pub use subscribe_all::*;
pub use subscribe_event::*;
pub use subscribe_next::*;

/// A push-based source of values observed by a single [`Observer`].
pub trait Observable<Item, Err, O: Observer<Item, Err>> {
  /// Handle returned from [`actual_subscribe`](Observable::actual_subscribe)
  /// that cancels delivery when disposed.
  type Unsub: Disposable;

  /// Invokes an execution of this observable, registering `observer` for
  /// the notifications it will emit.
  fn actual_subscribe(self, observer: O) -> Self::Unsub;
}
