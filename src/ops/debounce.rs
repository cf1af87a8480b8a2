use tracing::trace;

use crate::{
  observable::Observable,
  observer::Observer,
  scheduler::{Duration, Instant, Scheduler},
};

/// Leading-edge rate limiter measured from the last *forwarded* value.
///
/// A value is forwarded when at least `interval` has passed since the last
/// value that was forwarded; anything arriving sooner is dropped and never
/// delivered later. The first value of a subscription always passes.
#[derive(Clone)]
pub struct DebounceOp<S, SD> {
  pub(crate) source: S,
  pub(crate) interval: Duration,
  pub(crate) scheduler: SD,
}

impl<S, SD> Observable for DebounceOp<S, SD>
where
  S: Observable,
  SD: Scheduler,
{
  type Item = S::Item;
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(&self, observer: O) -> Self::Unsub
  where
    O: Observer<S::Item> + Send + 'static,
  {
    // One interval before now, so the first value always passes.
    let last_emit = self.scheduler.now().checked_sub(self.interval);
    self.source.actual_subscribe(DebounceObserver {
      observer,
      interval: self.interval,
      scheduler: self.scheduler.clone(),
      last_emit,
    })
  }
}

pub struct DebounceObserver<O, SD> {
  observer: O,
  interval: Duration,
  scheduler: SD,
  last_emit: Option<Instant>,
}

impl<Item, O, SD> Observer<Item> for DebounceObserver<O, SD>
where
  O: Observer<Item>,
  SD: Scheduler,
{
  fn next(&mut self, value: Item) {
    let now = self.scheduler.now();
    let open = match self.last_emit {
      None => true,
      Some(last) => last
        .checked_add(self.interval)
        .map_or(false, |due| now >= due),
    };
    if open {
      self.observer.next(value);
      self.last_emit = Some(now);
    } else {
      trace!("debounce dropped a value");
    }
  }
}
