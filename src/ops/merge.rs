use tracing::debug;

use crate::{
  observable::Observable, observer::Observer, rc::MutArc, subscription::MultiSubscription,
};

/// Combines observables into one by forwarding every value from every source.
///
/// All sources are subscribed during the subscribe call, in order. Values
/// reach the single downstream observer in the order they are emitted; there
/// is no buffering and no combination.
///
/// ```
/// use pushrx::prelude::*;
///
/// let evens = observable::from_iter(0..10).filter(|v| v % 2 == 0);
/// let odds = observable::from_iter(0..10).filter(|v| v % 2 != 0);
///
/// evens.merge(odds).subscribe(|v| println!("{} ", v));
/// ```
pub fn merge<I>(sources: I) -> MergeOp<I::Item>
where
  I: IntoIterator,
  I::Item: Observable,
{
  MergeOp { sources: sources.into_iter().collect() }
}

pub struct MergeOp<S> {
  sources: Vec<S>,
}

impl<S: Observable> Observable for MergeOp<S> {
  type Item = S::Item;
  type Unsub = MultiSubscription;

  fn actual_subscribe<O>(&self, observer: O) -> Self::Unsub
  where
    O: Observer<S::Item> + Send + 'static,
  {
    if self.sources.is_empty() {
      debug!("merge subscribed without sources, it will never emit");
    }
    let observer = MutArc::own(observer);
    let subscription = MultiSubscription::default();
    for source in self.sources.iter() {
      subscription.add(source.actual_subscribe(observer.clone()));
    }
    subscription
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  #[pushrx_macro::test]
  fn odd_even_merge() {
    let out = Arc::new(Mutex::new(vec![]));
    let c_out = out.clone();
    let evens = observable::from_iter(0..6).filter(|v| v % 2 == 0);
    let odds = observable::from_iter(0..6).filter(|v| v % 2 != 0);
    evens
      .merge(odds)
      .subscribe(move |v| c_out.lock().unwrap().push(v));
    // synchronous sources drain one after the other
    assert_eq!(*out.lock().unwrap(), vec![0, 2, 4, 1, 3, 5]);
  }

  #[pushrx_macro::test]
  fn interleaves_by_emission_time() {
    let scheduler = TestScheduler::new();
    let out = Arc::new(Mutex::new(vec![]));
    let c_out = out.clone();
    let fast = observable::periodic(Duration::from_millis(10), scheduler.clone()).constant("fast");
    let slow = observable::periodic(Duration::from_millis(25), scheduler.clone()).constant("slow");
    observable::merge([fast.box_it(), slow.box_it()])
      .subscribe(move |v| c_out.lock().unwrap().push(v));

    scheduler.advance_by(Duration::from_millis(45));
    assert_eq!(*out.lock().unwrap(), vec!["fast", "fast", "slow", "fast", "fast"]);
  }

  #[pushrx_macro::test]
  fn no_sources_never_emit() {
    let hit = Arc::new(Mutex::new(false));
    let c_hit = hit.clone();
    observable::merge(Vec::<BoxOp<i32>>::new()).subscribe(move |_| *c_hit.lock().unwrap() = true);
    assert!(!*hit.lock().unwrap());
  }

  #[pushrx_macro::test]
  fn dispose_reaches_every_source() {
    let scheduler = TestScheduler::new();
    let a = observable::periodic(Duration::from_millis(10), scheduler.clone());
    let b = observable::periodic(Duration::from_millis(10), scheduler.clone());
    let mut handle = observable::merge([a, b]).subscribe(|_| {});
    assert_eq!(handle.0.teardown_size(), 2);
    handle.unsubscribe();
    scheduler.advance_by(Duration::from_millis(10));
    assert_eq!(scheduler.pending_count(), 0);
  }
}
