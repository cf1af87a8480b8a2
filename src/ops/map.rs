use crate::{observable::Observable, observer::Observer};

#[derive(Clone)]
pub struct MapOp<S, F> {
  pub(crate) source: S,
  pub(crate) func: F,
}

impl<S, F, B> Observable for MapOp<S, F>
where
  S: Observable,
  F: FnMut(S::Item) -> B + Clone + Send + 'static,
{
  type Item = B;
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(&self, observer: O) -> Self::Unsub
  where
    O: Observer<B> + Send + 'static,
  {
    self
      .source
      .actual_subscribe(MapObserver { observer, func: self.func.clone() })
  }
}

pub struct MapObserver<O, F> {
  observer: O,
  func: F,
}

impl<Item, O, F, B> Observer<Item> for MapObserver<O, F>
where
  O: Observer<B>,
  F: FnMut(Item) -> B,
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next((self.func)(value)) }
}
