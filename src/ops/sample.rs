use crate::{
  observable::Observable, observer::Observer, rc::MutArc, subscription::TupleSubscription,
};

/// Emits the most recent source value every time `trigger` emits.
///
/// The source is subscribed first and only refreshes a one-value cache. Each
/// trigger emission then emits a clone of the cache, `None` while the source
/// has not emitted yet. The cache is never cleared, so consecutive triggers
/// can repeat the same value.
#[derive(Clone)]
pub struct SampleOp<S, T> {
  pub(crate) source: S,
  pub(crate) trigger: T,
}

impl<S, T> Observable for SampleOp<S, T>
where
  S: Observable,
  S::Item: Clone + Send + 'static,
  T: Observable,
{
  type Item = Option<S::Item>;
  type Unsub = TupleSubscription<S::Unsub, T::Unsub>;

  fn actual_subscribe<O>(&self, observer: O) -> Self::Unsub
  where
    O: Observer<Option<S::Item>> + Send + 'static,
  {
    let cache: MutArc<Option<S::Item>> = MutArc::own(None);
    let source = self
      .source
      .actual_subscribe(SampleCacheObserver(cache.clone()));
    let trigger = self
      .trigger
      .actual_subscribe(SampleTriggerObserver { cache, observer });
    TupleSubscription::new(source, trigger)
  }
}

pub struct SampleCacheObserver<Item>(MutArc<Option<Item>>);

impl<Item> Observer<Item> for SampleCacheObserver<Item> {
  #[inline]
  fn next(&mut self, value: Item) { *self.0.rc_deref_mut() = Some(value); }
}

pub struct SampleTriggerObserver<Item, O> {
  cache: MutArc<Option<Item>>,
  observer: O,
}

impl<Item, T, O> Observer<T> for SampleTriggerObserver<Item, O>
where
  Item: Clone,
  O: Observer<Option<Item>>,
{
  fn next(&mut self, _: T) {
    let latest = self.cache.rc_deref_mut().clone();
    self.observer.next(latest);
  }
}
