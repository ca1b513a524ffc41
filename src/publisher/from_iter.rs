use std::{
  convert::Infallible,
  sync::{Arc, Mutex},
};

use super::{Publisher, Subscriber, Subscription};

/// Creates a publisher that produces values from an iterator, within
/// requested demand.
///
/// Completes after the last element. Never emits an error.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use rxbridge::prelude::*;
///
/// let sum = Arc::new(Mutex::new(0));
/// let acc = sum.clone();
/// publisher::from_iter(0..10)
///   .into_observable()
///   .subscribe(move |v| *acc.lock().unwrap() += v);
///
/// assert_eq!(*sum.lock().unwrap(), 45);
/// ```
pub fn from_iter<I>(iter: I) -> IterPublisher<I>
where
  I: IntoIterator,
{
  IterPublisher(iter)
}

/// Creates a publisher that produces values from an iterator of `Result`s,
/// within requested demand.
///
/// The first `Err` item ends the stream as a failure; an exhausted iterator
/// ends it as a completion.
pub fn from_iter_result<I, Item, Err>(iter: I) -> ResultIterPublisher<I>
where
  I: IntoIterator<Item = Result<Item, Err>>,
{
  ResultIterPublisher(iter)
}

#[derive(Clone)]
pub struct IterPublisher<I>(I);

impl<I> Publisher<I::Item, Infallible> for IterPublisher<I>
where
  I: IntoIterator,
  I::IntoIter: Send + 'static,
  I::Item: 'static,
{
  fn subscribe<S>(self, subscriber: S)
  where
    S: Subscriber<I::Item, Infallible> + Send + 'static,
  {
    pump(self.0.into_iter().map(Ok), subscriber)
  }
}

#[derive(Clone)]
pub struct ResultIterPublisher<I>(I);

impl<I, Item, Err> Publisher<Item, Err> for ResultIterPublisher<I>
where
  I: IntoIterator<Item = Result<Item, Err>>,
  I::IntoIter: Send + 'static,
{
  fn subscribe<S>(self, subscriber: S)
  where
    S: Subscriber<Item, Err> + Send + 'static,
  {
    pump(self.0.into_iter(), subscriber)
  }
}

/// Shared engine of the iterator publishers: parks the subscriber next to
/// the iterator and drains items on the thread that requests demand.
fn pump<It, S, Item, Err>(iter: It, mut subscriber: S)
where
  It: Iterator<Item = Result<Item, Err>> + Send + 'static,
  S: Subscriber<Item, Err> + Send + 'static,
{
  let state = Arc::new(Mutex::new(PumpState {
    iter,
    subscriber: None,
    demand: 0,
    draining: false,
    done: false,
  }));
  // the handshake runs before the subscriber is parked; demand requested
  // from inside `on_subscribe` accumulates and is satisfied right after
  subscriber.on_subscribe(Box::new(PumpSubscription(state.clone())));
  let mut st = state.lock().unwrap();
  if !st.done {
    st.subscriber = Some(subscriber);
    drop(st);
    drain(&state, 0);
  }
}

struct PumpState<It, S> {
  iter: It,
  subscriber: Option<S>,
  demand: usize,
  draining: bool,
  done: bool,
}

struct PumpSubscription<It, S>(Arc<Mutex<PumpState<It, S>>>);

impl<It, S, Item, Err> Subscription for PumpSubscription<It, S>
where
  It: Iterator<Item = Result<Item, Err>> + Send,
  S: Subscriber<Item, Err> + Send,
{
  fn request(&mut self, n: usize) { drain(&self.0, n) }

  fn cancel(&mut self) {
    let mut st = self.0.lock().unwrap();
    st.done = true;
    st.demand = 0;
    // if a drain is in flight it owns the subscriber and will drop it when
    // it observes `done`
    st.subscriber = None;
  }
}

fn drain<It, S, Item, Err>(state: &Arc<Mutex<PumpState<It, S>>>, add: usize)
where
  It: Iterator<Item = Result<Item, Err>>,
  S: Subscriber<Item, Err>,
{
  let mut subscriber = {
    let mut st = state.lock().unwrap();
    st.demand = st.demand.saturating_add(add);
    if st.draining || st.done || st.demand == 0 {
      return;
    }
    match st.subscriber.take() {
      Some(subscriber) => {
        st.draining = true;
        subscriber
      }
      // handshake still in flight; `pump` drains once it parks
      None => return,
    }
  };
  loop {
    // the lock is never held across a subscriber callback, so callbacks
    // may re-enter `request` or `cancel` freely
    let item = {
      let mut st = state.lock().unwrap();
      if st.done {
        st.draining = false;
        return;
      }
      if st.demand == 0 {
        st.subscriber = Some(subscriber);
        st.draining = false;
        return;
      }
      st.demand -= 1;
      st.iter.next()
    };
    match item {
      Some(Ok(value)) => subscriber.on_next(value),
      Some(Err(err)) => {
        state.lock().unwrap().done = true;
        subscriber.on_error(err);
        state.lock().unwrap().draining = false;
        return;
      }
      None => {
        state.lock().unwrap().done = true;
        subscriber.on_complete();
        state.lock().unwrap().draining = false;
        return;
      }
    }
  }
}
