use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
};

use tracing::trace;

use crate::{observable::Observable, observer::Observer, subscription::TupleSubscription};

/// Forwards source values until `limiter` emits for the first time.
///
/// The limiter is subscribed before the source. A limiter that emits during
/// its own subscribe call therefore closes the gate before the source has a
/// chance to deliver anything, even synchronously.
#[derive(Clone)]
pub struct EndWhenOp<S, L> {
  pub(crate) source: S,
  pub(crate) limiter: L,
}

impl<S, L> Observable for EndWhenOp<S, L>
where
  S: Observable,
  L: Observable,
{
  type Item = S::Item;
  type Unsub = TupleSubscription<L::Unsub, S::Unsub>;

  fn actual_subscribe<O>(&self, observer: O) -> Self::Unsub
  where
    O: Observer<S::Item> + Send + 'static,
  {
    let open = Arc::new(AtomicBool::new(true));
    let limiter = self
      .limiter
      .actual_subscribe(LimiterObserver(open.clone()));
    let source = self
      .source
      .actual_subscribe(EndWhenObserver { observer, open });
    TupleSubscription::new(limiter, source)
  }
}

pub struct LimiterObserver(Arc<AtomicBool>);

impl<Item> Observer<Item> for LimiterObserver {
  fn next(&mut self, _: Item) {
    if self.0.swap(false, Ordering::AcqRel) {
      trace!("end_when limiter fired");
    }
  }
}

pub struct EndWhenObserver<O> {
  observer: O,
  open: Arc<AtomicBool>,
}

impl<Item, O: Observer<Item>> Observer<Item> for EndWhenObserver<O> {
  fn next(&mut self, value: Item) {
    if self.open.load(Ordering::Acquire) {
      self.observer.next(value);
    }
  }
}
