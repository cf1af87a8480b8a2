use crate::{
  observable::Observable,
  observer::Observer,
  rc::MutArc,
  subscription::{MultiSubscription, TupleSubscription},
};

/// Maps every source value to an inner observable and subscribes to it right
/// away, forwarding everything every inner observable emits.
///
/// Earlier inner subscriptions keep running when new source values arrive;
/// they end only when the whole subscription is disposed.
#[derive(Clone)]
pub struct FlatMapOp<S, F> {
  pub(crate) source: S,
  pub(crate) mapper: F,
}

impl<S, F, Inner> Observable for FlatMapOp<S, F>
where
  S: Observable,
  Inner: Observable,
  F: FnMut(S::Item) -> Inner + Clone + Send + 'static,
{
  type Item = Inner::Item;
  type Unsub = TupleSubscription<S::Unsub, MultiSubscription>;

  fn actual_subscribe<O>(&self, observer: O) -> Self::Unsub
  where
    O: Observer<Inner::Item> + Send + 'static,
  {
    let inner = MultiSubscription::default();
    let source = self.source.actual_subscribe(FlatMapObserver {
      observer: MutArc::own(observer),
      mapper: self.mapper.clone(),
      inner: inner.clone(),
    });
    TupleSubscription::new(source, inner)
  }
}

pub struct FlatMapObserver<O, F> {
  observer: MutArc<O>,
  mapper: F,
  inner: MultiSubscription,
}

impl<Item, O, F, Inner> Observer<Item> for FlatMapObserver<O, F>
where
  Inner: Observable,
  O: Observer<Inner::Item> + Send + 'static,
  F: FnMut(Item) -> Inner,
{
  fn next(&mut self, value: Item) {
    let inner = (self.mapper)(value);
    self
      .inner
      .add(inner.actual_subscribe(self.observer.clone()));
  }
}
