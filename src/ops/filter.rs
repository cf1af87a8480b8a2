use crate::{observable::Observable, observer::Observer};

#[derive(Clone)]
pub struct FilterOp<S, F> {
  pub(crate) source: S,
  pub(crate) predicate: F,
}

impl<S, F> Observable for FilterOp<S, F>
where
  S: Observable,
  F: FnMut(&S::Item) -> bool + Clone + Send + 'static,
{
  type Item = S::Item;
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(&self, observer: O) -> Self::Unsub
  where
    O: Observer<S::Item> + Send + 'static,
  {
    self
      .source
      .actual_subscribe(FilterObserver { observer, predicate: self.predicate.clone() })
  }
}

pub struct FilterObserver<O, F> {
  observer: O,
  predicate: F,
}

impl<Item, O, F> Observer<Item> for FilterObserver<O, F>
where
  O: Observer<Item>,
  F: FnMut(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if (self.predicate)(&value) {
      self.observer.next(value)
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  #[pushrx_macro::test]
  fn keeps_matching_values() {
    let out = Arc::new(Mutex::new(vec![]));
    let c_out = out.clone();
    observable::from_iter([1, 2, 3, 4])
      .filter(|v| v % 2 == 0)
      .subscribe(move |v| c_out.lock().unwrap().push(v));
    assert_eq!(*out.lock().unwrap(), vec![2, 4]);
  }

  #[pushrx_macro::test]
  fn rejecting_everything_emits_nothing() {
    let hit = Arc::new(Mutex::new(0));
    let c_hit = hit.clone();
    observable::from_iter(0..10)
      .filter(|_| false)
      .subscribe(move |_| *c_hit.lock().unwrap() += 1);
    assert_eq!(*hit.lock().unwrap(), 0);
  }
}
