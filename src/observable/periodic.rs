use tracing::warn;

use crate::{
  observable::Observable,
  observer::Observer,
  scheduler::{Duration, Scheduler, TaskHandle, MIN_REPEAT_INTERVAL},
};

/// Creates an infinite observable emitting `()` every `interval`, timed by
/// `scheduler`. Every subscription owns its own repeating timer, which keeps
/// running until the subscription is disposed.
///
/// Intervals shorter than [`MIN_REPEAT_INTERVAL`] are clamped to it by the
/// scheduler.
pub fn periodic<SD: Scheduler>(interval: Duration, scheduler: SD) -> PeriodicOp<SD> {
  if interval < MIN_REPEAT_INTERVAL {
    warn!(?interval, clamped = ?MIN_REPEAT_INTERVAL, "periodic interval too short, clamping");
  }
  PeriodicOp { interval, scheduler }
}

#[derive(Clone)]
pub struct PeriodicOp<SD> {
  interval: Duration,
  scheduler: SD,
}

impl<SD: Scheduler> Observable for PeriodicOp<SD> {
  type Item = ();
  type Unsub = TaskHandle;

  fn actual_subscribe<O>(&self, mut observer: O) -> Self::Unsub
  where
    O: Observer<()> + Send + 'static,
  {
    self
      .scheduler
      .schedule_repeating(move || observer.next(()), self.interval)
  }
}
