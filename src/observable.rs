//! The subscription contract and the source constructors.
//!
//! An [`Observable`] is a deferred, repeatable subscription action. Each call
//! to [`actual_subscribe`](Observable::actual_subscribe) starts a fresh,
//! independent subscription: it may deliver values synchronously before
//! returning, register timers for later delivery, or both. Subscribing twice
//! runs every upstream side effect twice; nothing is shared between
//! subscriptions.
//!
//! Combinators are built through [`ObservableExt`], and the multi-source
//! constructors live next to the sources in this module:
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use pushrx::prelude::*;
//!
//! let out = Arc::new(Mutex::new(vec![]));
//! let c_out = out.clone();
//! observable::combine(
//!   (observable::from_iter([1, 2]), observable::from_iter([10, 20])),
//!   |a: i32, b: i32| a + b,
//! )
//! .subscribe(move |v| c_out.lock().unwrap().push(v));
//! assert_eq!(*out.lock().unwrap(), vec![12, 22]);
//! ```

use crate::{
  observer::{FnMutObserver, Observer},
  ops::{
    box_it::BoxOp, constant::ConstantOp, debounce::DebounceOp, delay::DelayOp,
    end_when::EndWhenOp, filter::FilterOp, flat_map::FlatMapOp, map::MapOp, merge::MergeOp,
    sample::SampleOp, scan::ScanOp, take::TakeOp,
  },
  scheduler::{Duration, Scheduler},
  subscription::{SubscriptionLike, SubscriptionWrapper},
};

mod from_iter;
pub use from_iter::*;
mod periodic;
pub use periodic::*;

pub use crate::ops::{
  combine::{combine, combine_all},
  merge::merge,
  zip::{zip, zip_all},
};

/// A source of values pushed to an observer.
pub trait Observable {
  type Item;
  /// Handle disposing everything one subscription set up.
  type Unsub: SubscriptionLike + Send + 'static;

  /// Start a new subscription delivering values to `observer`.
  fn actual_subscribe<O>(&self, observer: O) -> Self::Unsub
  where
    O: Observer<Self::Item> + Send + 'static;
}

/// Combinator methods available on every [`Observable`].
///
/// Builders consume `self`; subscribing borrows, so a pipeline can be
/// subscribed as often as needed.
pub trait ObservableExt: Observable + Sized {
  /// Subscribe with a closure receiving every value.
  fn subscribe<F>(&self, next: F) -> SubscriptionWrapper<Self::Unsub>
  where
    F: FnMut(Self::Item) + Send + 'static,
  {
    SubscriptionWrapper(self.actual_subscribe(FnMutObserver(next)))
  }

  fn subscribe_with<O>(&self, observer: O) -> SubscriptionWrapper<Self::Unsub>
  where
    O: Observer<Self::Item> + Send + 'static,
  {
    SubscriptionWrapper(self.actual_subscribe(observer))
  }

  /// Forward `f(value)` for every upstream value.
  fn map<B, F>(self, f: F) -> MapOp<Self, F>
  where
    F: FnMut(Self::Item) -> B + Clone + Send + 'static,
  {
    MapOp { source: self, func: f }
  }

  /// Forward only the values `predicate` accepts.
  fn filter<F>(self, predicate: F) -> FilterOp<Self, F>
  where
    F: FnMut(&Self::Item) -> bool + Clone + Send + 'static,
  {
    FilterOp { source: self, predicate }
  }

  /// Replace every upstream value with a clone of `value`.
  fn constant<V>(self, value: V) -> ConstantOp<Self, V>
  where
    V: Clone + Send + 'static,
  {
    ConstantOp { source: self, value }
  }

  /// Emit `initial` on subscription, then the running fold of every upstream
  /// value through `reducer`.
  fn scan<B, F>(self, initial: B, reducer: F) -> ScanOp<Self, F, B>
  where
    B: Clone + Send + 'static,
    F: FnMut(B, Self::Item) -> B + Clone + Send + 'static,
  {
    ScanOp { source: self, reducer, initial }
  }

  /// Forward the first `count` values and discard the rest. The upstream
  /// subscription stays alive.
  fn take(self, count: usize) -> TakeOp<Self> { TakeOp { source: self, count } }

  /// Forward each value `delay` after it arrives, each on its own timer.
  fn delay<SD>(self, delay: Duration, scheduler: SD) -> DelayOp<Self, SD>
  where
    SD: Scheduler,
  {
    DelayOp { source: self, delay, scheduler }
  }

  /// Forward a value only if `interval` has passed since the last forwarded
  /// value; every other value is dropped for good.
  fn debounce<SD>(self, interval: Duration, scheduler: SD) -> DebounceOp<Self, SD>
  where
    SD: Scheduler,
  {
    DebounceOp { source: self, interval, scheduler }
  }

  /// Interleave this observable's values with `other`'s.
  fn merge<S>(self, other: S) -> MergeOp<BoxOp<Self::Item>>
  where
    Self: Send + 'static,
    S: Observable<Item = Self::Item> + Send + 'static,
    Self::Item: 'static,
  {
    merge([self.box_it(), other.box_it()])
  }

  /// On every `trigger` emission, emit the latest value seen from `self`
  /// (`None` before the first one).
  fn sample<T>(self, trigger: T) -> SampleOp<Self, T>
  where
    T: Observable,
  {
    SampleOp { source: self, trigger }
  }

  /// Forward values until `limiter` emits for the first time.
  fn end_when<L>(self, limiter: L) -> EndWhenOp<Self, L>
  where
    L: Observable,
  {
    EndWhenOp { source: self, limiter }
  }

  /// Subscribe to `mapper(value)` for every upstream value and forward what
  /// every inner observable emits.
  fn flat_map<Inner, F>(self, mapper: F) -> FlatMapOp<Self, F>
  where
    Inner: Observable,
    F: FnMut(Self::Item) -> Inner + Clone + Send + 'static,
  {
    FlatMapOp { source: self, mapper }
  }

  /// Erase the concrete pipeline type.
  fn box_it(self) -> BoxOp<Self::Item>
  where
    Self: Send + 'static,
    Self::Item: 'static,
  {
    BoxOp::new(self)
  }
}

impl<T: Observable> ObservableExt for T {}
