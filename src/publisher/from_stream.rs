use std::{
  pin::Pin,
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
  },
  task::{Context, Poll},
};

use futures::{
  ready,
  task::{AtomicWaker, Spawn, SpawnExt},
  Future, Stream,
};
use pin_project_lite::pin_project;

use super::{Publisher, Subscriber, Subscription};

/// Adapts a fallible [`Stream`] into a demand-based publisher.
///
/// The stream is driven by a future spawned on `spawner`. It is polled only
/// while the subscriber has outstanding demand and parks otherwise, so a
/// bounded subscriber never buffers more than it asked for.
///
/// ```rust
/// use std::sync::{Arc, Mutex};
///
/// use futures::executor::LocalPool;
/// use rxbridge::prelude::*;
///
/// let stream = futures::stream::iter((1..4).map(Ok::<_, &str>));
/// let mut pool = LocalPool::new();
///
/// let events = Arc::new(Mutex::new(Vec::new()));
/// let sink = events.clone();
/// let _sub = publisher::from_stream(stream, pool.spawner())
///   .into_observable()
///   .subscribe_event(move |e| sink.lock().unwrap().push(e));
/// pool.run();
///
/// assert_eq!(events.lock().unwrap().len(), 4);
/// ```
pub fn from_stream<S, Sp>(stream: S, spawner: Sp) -> StreamPublisher<S, Sp> {
  StreamPublisher { stream, spawner }
}

pub struct StreamPublisher<S, Sp> {
  stream: S,
  spawner: Sp,
}

impl<Item, Err, S, Sp> Publisher<Item, Err> for StreamPublisher<S, Sp>
where
  S: Stream<Item = Result<Item, Err>> + Send + 'static,
  Sp: Spawn,
{
  fn subscribe<Sub>(self, mut subscriber: Sub)
  where
    Sub: Subscriber<Item, Err> + Send + 'static,
  {
    let Self { stream, spawner } = self;
    let shared = Arc::new(DriveShared::default());
    subscriber.on_subscribe(Box::new(StreamSubscription(shared.clone())));
    let drive = DriveFuture { stream, subscriber: Some(subscriber), shared };
    spawner
      .spawn(drive)
      .expect("executor rejected the stream drive task");
  }
}

#[derive(Default)]
struct DriveShared {
  demand: Mutex<usize>,
  cancelled: AtomicBool,
  waker: AtomicWaker,
}

impl DriveShared {
  /// Whether the drive future may emit right now. Registers the task waker
  /// when demand is exhausted so a later `request` resumes it.
  fn poll_demand(&self, cx: &Context<'_>) -> bool {
    if *self.demand.lock().unwrap() > 0 {
      return true;
    }
    self.waker.register(cx.waker());
    // demand may have arrived between the check and the registration
    *self.demand.lock().unwrap() > 0
  }

  fn consume_one(&self) {
    let mut demand = self.demand.lock().unwrap();
    *demand = demand.saturating_sub(1);
  }
}

struct StreamSubscription(Arc<DriveShared>);

impl Subscription for StreamSubscription {
  fn request(&mut self, n: usize) {
    {
      let mut demand = self.0.demand.lock().unwrap();
      *demand = demand.saturating_add(n);
    }
    self.0.waker.wake();
  }

  fn cancel(&mut self) {
    self.0.cancelled.store(true, Ordering::Release);
    self.0.waker.wake();
  }
}

pin_project! {
  struct DriveFuture<S, Sub> {
    #[pin]
    stream: S,
    subscriber: Option<Sub>,
    shared: Arc<DriveShared>,
  }
}

impl<Item, Err, S, Sub> Future for DriveFuture<S, Sub>
where
  S: Stream<Item = Result<Item, Err>>,
  Sub: Subscriber<Item, Err>,
{
  type Output = ();

  fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
    loop {
      let this = self.as_mut().project();
      if this.shared.cancelled.load(Ordering::Acquire) {
        // cancelled subscriptions end without a terminal event
        this.subscriber.take();
        return Poll::Ready(());
      }
      if !this.shared.poll_demand(cx) {
        return Poll::Pending;
      }
      match ready!(this.stream.poll_next(cx)) {
        Some(Ok(value)) => {
          this.shared.consume_one();
          this
            .subscriber
            .as_mut()
            .expect("stream polled after a terminal event")
            .on_next(value);
        }
        Some(Err(err)) => {
          let mut subscriber = this
            .subscriber
            .take()
            .expect("stream polled after a terminal event");
          subscriber.on_error(err);
          return Poll::Ready(());
        }
        None => {
          let mut subscriber = this
            .subscriber
            .take()
            .expect("stream polled after a terminal event");
          subscriber.on_complete();
          return Poll::Ready(());
        }
      }
    }
  }
}
