use tracing::trace;

use crate::{observable::Observable, observer::Observer};

/// Emits only the first `count` values emitted by the source.
///
/// Later values are discarded, but the source is never unsubscribed: timers
/// and other upstream resources stay alive until the returned handle is
/// disposed.
///
/// ```
/// use pushrx::prelude::*;
///
/// observable::from_iter(0..10).take(5).subscribe(|v| println!("{}", v));
///
/// // print logs:
/// // 0
/// // 1
/// // 2
/// // 3
/// // 4
/// ```
#[derive(Clone)]
pub struct TakeOp<S> {
  pub(crate) source: S,
  pub(crate) count: usize,
}

impl<S: Observable> Observable for TakeOp<S> {
  type Item = S::Item;
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(&self, observer: O) -> Self::Unsub
  where
    O: Observer<S::Item> + Send + 'static,
  {
    self
      .source
      .actual_subscribe(TakeObserver { observer, count: self.count, hit: 0 })
  }
}

pub struct TakeObserver<O> {
  observer: O,
  count: usize,
  hit: usize,
}

impl<Item, O: Observer<Item>> Observer<Item> for TakeObserver<O> {
  fn next(&mut self, value: Item) {
    if self.hit < self.count {
      self.hit += 1;
      if self.hit == self.count {
        trace!(count = self.count, "take limit reached");
      }
      self.observer.next(value);
    }
  }
}
