use crate::{observable::Observable, observer::Observer};

#[derive(Clone)]
pub struct ConstantOp<S, V> {
  pub(crate) source: S,
  pub(crate) value: V,
}

impl<S, V> Observable for ConstantOp<S, V>
where
  S: Observable,
  V: Clone + Send + 'static,
{
  type Item = V;
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(&self, observer: O) -> Self::Unsub
  where
    O: Observer<V> + Send + 'static,
  {
    self
      .source
      .actual_subscribe(ConstantObserver { observer, value: self.value.clone() })
  }
}

pub struct ConstantObserver<O, V> {
  observer: O,
  value: V,
}

impl<Item, O, V> Observer<Item> for ConstantObserver<O, V>
where
  O: Observer<V>,
  V: Clone,
{
  #[inline]
  fn next(&mut self, _: Item) { self.observer.next(self.value.clone()) }
}
