use std::{
  fmt::{Debug, Formatter},
  sync::Mutex,
};

use smallvec::SmallVec;

/// Handle to an active subscription that can be cancelled to stop further
/// delivery and release resources.
pub trait Disposable {
  /// Cancels the underlying work. Disposing an already-disposed handle has
  /// no further effect.
  fn dispose(&mut self);

  fn is_disposed(&self) -> bool;

  /// Moves this handle into `bag`, tying its teardown to the bag's.
  fn disposed_by(self, bag: &DisposeBag)
  where
    Self: Sized + Send + 'static,
  {
    bag.insert(self);
  }

  /// Activates RAII behavior for this handle: `dispose` is called as soon
  /// as the returned guard goes out of scope.
  ///
  /// **Attention:** if you don't assign the return value to a variable the
  /// guard drops immediately, which is probably not what you want.
  fn dispose_when_dropped(self) -> DisposeGuard<Self>
  where
    Self: Sized,
  {
    DisposeGuard(self)
  }
}

impl<T: ?Sized> Disposable for Box<T>
where
  T: Disposable,
{
  #[inline]
  fn dispose(&mut self) { (**self).dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { (**self).is_disposed() }
}

impl Debug for Box<dyn Disposable + Send> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Box<dyn Disposable>")
      .field("is_disposed", &self.is_disposed())
      .finish()
  }
}

/// Aggregate resource scope: collects disposables and disposes all of them
/// exactly once, either when explicitly disposed or when the bag is
/// dropped.
///
/// Handles inserted after teardown are disposed immediately.
#[derive(Default)]
pub struct DisposeBag(Mutex<Inner>);

struct Inner {
  disposed: bool,
  items: SmallVec<[Box<dyn Disposable + Send>; 1]>,
}

impl Default for Inner {
  fn default() -> Self {
    Inner { disposed: false, items: SmallVec::new() }
  }
}

impl DisposeBag {
  pub fn new() -> Self { Self::default() }

  pub fn insert<D: Disposable + Send + 'static>(&self, disposable: D) {
    let mut disposable = disposable;
    let mut inner = self.0.lock().unwrap();
    if inner.disposed {
      drop(inner);
      disposable.dispose();
    } else {
      inner.items.retain(|item| !item.is_disposed());
      inner.items.push(Box::new(disposable));
    }
  }

  fn tear_down(&self) {
    let items = {
      let mut inner = self.0.lock().unwrap();
      if inner.disposed {
        return;
      }
      inner.disposed = true;
      std::mem::take(&mut inner.items)
    };
    // dispose outside the lock: a disposal may re-enter the bag
    for mut item in items {
      item.dispose();
    }
  }
}

impl Disposable for DisposeBag {
  #[inline]
  fn dispose(&mut self) { self.tear_down() }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.lock().unwrap().disposed }
}

impl Drop for DisposeBag {
  #[inline]
  fn drop(&mut self) { self.tear_down() }
}

impl Debug for DisposeBag {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let inner = self.0.lock().unwrap();
    f.debug_struct("DisposeBag")
      .field("disposed", &inner.disposed)
      .field("len", &inner.items.len())
      .finish()
  }
}

/// An RAII wrapper of a disposable. When this structure is dropped (falls
/// out of scope), the wrapped handle is disposed.
///
/// If you want to drop it immediately, wrap it in its own scope.
#[derive(Debug)]
#[must_use]
pub struct DisposeGuard<T: Disposable>(pub(crate) T);

impl<T: Disposable> DisposeGuard<T> {
  /// Wraps an existing disposable with a guard to enable RAII behavior for
  /// it.
  pub fn new(disposable: T) -> DisposeGuard<T> { DisposeGuard(disposable) }
}

impl<T: Disposable> Drop for DisposeGuard<T> {
  #[inline]
  fn drop(&mut self) { self.0.dispose() }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  };

  use super::*;

  #[derive(Clone, Default)]
  struct CountingDisposable {
    disposed: Arc<AtomicUsize>,
  }

  impl Disposable for CountingDisposable {
    fn dispose(&mut self) { self.disposed.fetch_add(1, Ordering::SeqCst); }

    fn is_disposed(&self) -> bool { self.disposed.load(Ordering::SeqCst) > 0 }
  }

  #[test]
  fn bag_disposes_contents_exactly_once() {
    let item = CountingDisposable::default();
    let mut bag = DisposeBag::new();
    bag.insert(item.clone());
    bag.dispose();
    bag.dispose();
    assert_eq!(item.disposed.load(Ordering::SeqCst), 1);
    assert!(bag.is_disposed());
  }

  #[test]
  fn bag_disposes_contents_on_drop() {
    let item = CountingDisposable::default();
    {
      let bag = DisposeBag::new();
      bag.insert(item.clone());
    }
    assert_eq!(item.disposed.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn late_insert_is_disposed_immediately() {
    let item = CountingDisposable::default();
    let mut bag = DisposeBag::new();
    bag.dispose();
    bag.insert(item.clone());
    assert_eq!(item.disposed.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn insert_prunes_dead_entries() {
    let bag = DisposeBag::new();
    let mut dead = CountingDisposable::default();
    dead.dispose();
    bag.insert(dead);
    bag.insert(CountingDisposable::default());
    assert_eq!(bag.0.lock().unwrap().items.len(), 1);
  }

  #[test]
  fn guard_disposes_on_scope_exit() {
    let item = CountingDisposable::default();
    {
      let _guard = item.clone().dispose_when_dropped();
    }
    assert_eq!(item.disposed.load(Ordering::SeqCst), 1);
  }
}
