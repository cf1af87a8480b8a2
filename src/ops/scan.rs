use crate::{observable::Observable, observer::Observer};

/// Running fold of the upstream values.
///
/// The initial value is emitted during the subscribe call, before the
/// upstream is subscribed, so it is always the first output.
#[derive(Clone)]
pub struct ScanOp<S, F, B> {
  pub(crate) source: S,
  pub(crate) reducer: F,
  pub(crate) initial: B,
}

impl<S, F, B> Observable for ScanOp<S, F, B>
where
  S: Observable,
  B: Clone + Send + 'static,
  F: FnMut(B, S::Item) -> B + Clone + Send + 'static,
{
  type Item = B;
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(&self, mut observer: O) -> Self::Unsub
  where
    O: Observer<B> + Send + 'static,
  {
    observer.next(self.initial.clone());
    self.source.actual_subscribe(ScanObserver {
      observer,
      reducer: self.reducer.clone(),
      acc: self.initial.clone(),
    })
  }
}

pub struct ScanObserver<O, F, B> {
  observer: O,
  reducer: F,
  acc: B,
}

impl<Item, O, F, B> Observer<Item> for ScanObserver<O, F, B>
where
  O: Observer<B>,
  F: FnMut(B, Item) -> B,
  B: Clone,
{
  fn next(&mut self, value: Item) {
    self.acc = (self.reducer)(self.acc.clone(), value);
    self.observer.next(self.acc.clone())
  }
}
