use std::collections::VecDeque;

use crate::{
  observable::Observable,
  observer::Observer,
  rc::MutArc,
  scheduler::{Duration, Scheduler},
  subscription::{MultiSubscription, TupleSubscription},
};

/// Re-emits every upstream value `delay` later, in upstream order.
///
/// Values wait in a queue and every value arms one one-shot timer. Whichever
/// timer fires delivers the value at the head of the queue, so delivery order
/// never depends on the order a scheduler runs equal-time tasks in, and no
/// value is delivered before its own delay has passed. A zero delay still goes
/// through the scheduler, so delivery is never synchronous.
#[derive(Clone)]
pub struct DelayOp<S, SD> {
  pub(crate) source: S,
  pub(crate) delay: Duration,
  pub(crate) scheduler: SD,
}

impl<S, SD> Observable for DelayOp<S, SD>
where
  S: Observable,
  S::Item: Send + 'static,
  SD: Scheduler,
{
  type Item = S::Item;
  type Unsub = TupleSubscription<S::Unsub, MultiSubscription>;

  fn actual_subscribe<O>(&self, observer: O) -> Self::Unsub
  where
    O: Observer<S::Item> + Send + 'static,
  {
    let timers = MultiSubscription::default();
    let upstream = self.source.actual_subscribe(DelayObserver {
      observer: MutArc::own(observer),
      pending: MutArc::own(VecDeque::new()),
      delay: self.delay,
      scheduler: self.scheduler.clone(),
      timers: timers.clone(),
    });
    TupleSubscription::new(upstream, timers)
  }
}

pub struct DelayObserver<O, Item, SD> {
  observer: MutArc<O>,
  pending: MutArc<VecDeque<Item>>,
  delay: Duration,
  scheduler: SD,
  timers: MultiSubscription,
}

impl<Item, O, SD> Observer<Item> for DelayObserver<O, Item, SD>
where
  Item: Send + 'static,
  O: Observer<Item> + Send + 'static,
  SD: Scheduler,
{
  fn next(&mut self, value: Item) {
    self.pending.rc_deref_mut().push_back(value);
    let observer = self.observer.clone();
    let pending = self.pending.clone();
    let handle = self.scheduler.schedule_once(
      move || {
        // Pop under the observer lock so timers racing on different threads
        // deliver in queue order.
        let mut observer = observer.rc_deref_mut();
        let head = pending.rc_deref_mut().pop_front();
        if let Some(value) = head {
          observer.next(value);
        }
      },
      self.delay,
    );
    self.timers.add(handle);
  }
}
