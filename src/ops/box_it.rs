use crate::{
  observable::Observable,
  observer::{BoxObserver, Observer},
  subscription::BoxSubscription,
};

/// Object-safe face of [`Observable`], used to erase pipeline types.
pub trait DynObservable<Item> {
  fn dyn_subscribe(&self, observer: BoxObserver<Item>) -> BoxSubscription;
}

impl<T> DynObservable<T::Item> for T
where
  T: Observable,
  T::Item: 'static,
{
  fn dyn_subscribe(&self, observer: BoxObserver<T::Item>) -> BoxSubscription {
    Box::new(self.actual_subscribe(observer))
  }
}

/// An observable of `Item` whose concrete pipeline type has been erased, so
/// differently built pipelines can be stored side by side.
pub struct BoxOp<Item>(Box<dyn DynObservable<Item> + Send>);

impl<Item> BoxOp<Item> {
  pub fn new<S>(source: S) -> Self
  where
    S: Observable<Item = Item> + Send + 'static,
    Item: 'static,
  {
    BoxOp(Box::new(source))
  }
}

impl<Item: 'static> Observable for BoxOp<Item> {
  type Item = Item;
  type Unsub = BoxSubscription;

  fn actual_subscribe<O>(&self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    self.0.dyn_subscribe(Box::new(observer))
  }
}
