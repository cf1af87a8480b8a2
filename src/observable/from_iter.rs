use crate::{observable::Observable, observer::Observer};

/// Creates an observable that emits every element of `iter`, synchronously
/// and in order, during each subscribe call.
///
/// The iterable is cloned per subscription, so every subscriber sees the full
/// sequence.
///
/// ```
/// use pushrx::prelude::*;
///
/// observable::from_iter(vec![0, 1, 2, 3]).subscribe(|v| println!("{},", v));
/// ```
pub fn from_iter<Iter>(iter: Iter) -> ObservableIter<Iter>
where
  Iter: IntoIterator + Clone,
{
  ObservableIter(iter)
}

/// Creates an observable that emits `value` once.
pub fn just<T: Clone>(value: T) -> ObservableIter<std::iter::Once<T>> {
  from_iter(std::iter::once(value))
}

#[derive(Clone)]
pub struct ObservableIter<Iter>(Iter);

impl<Iter> Observable for ObservableIter<Iter>
where
  Iter: IntoIterator + Clone,
{
  type Item = Iter::Item;
  type Unsub = ();

  fn actual_subscribe<O>(&self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Self::Item> + Send + 'static,
  {
    self.0.clone().into_iter().for_each(|v| observer.next(v));
  }
}
