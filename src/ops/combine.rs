//! Latest-value combination of several sources.
//!
//! Every source gets one slot. A value from source *i* overwrites slot *i*;
//! once every slot holds a value, each further emission from any source emits
//! the combiner applied to clones of all latest values, in source order.
//!
//! [`combine`] takes a tuple of one to six sources with independent item
//! types, so the combiner is checked per source. Its closure parameters need
//! type annotations. [`combine_all`] takes any number of sources of one type.

use tracing::debug;

use crate::{
  observable::Observable, observer::Observer, rc::MutArc, subscription::MultiSubscription,
};

/// Combine a tuple of sources through `combiner`.
///
/// ```
/// use pushrx::prelude::*;
///
/// observable::combine(
///   (observable::just(1), observable::just("a"), observable::just(2.5)),
///   |n: i32, s: &str, f: f64| format!("{n}{s}{f}"),
/// )
/// .subscribe(|v| assert_eq!(v, "1a2.5"));
/// ```
pub fn combine<S, F>(sources: S, combiner: F) -> CombineOp<S, F> {
  CombineOp { sources, combiner }
}

/// Combine any number of same-typed sources; `combiner` sees the latest
/// values as a slice in source order. Without sources nothing is ever emitted.
pub fn combine_all<I, F, R>(sources: I, combiner: F) -> CombineAllOp<I::Item, F>
where
  I: IntoIterator,
  I::Item: Observable,
  F: FnMut(&[<I::Item as Observable>::Item]) -> R,
{
  CombineAllOp { sources: sources.into_iter().collect(), combiner }
}

#[derive(Clone)]
pub struct CombineOp<S, F> {
  sources: S,
  combiner: F,
}

pub struct CombineState<Slots, O, F> {
  slots: Slots,
  observer: O,
  combiner: F,
}

/// Feeds one source into its slot of the shared state.
pub struct CombineSlotObserver<Slots, Item, O, F> {
  state: MutArc<CombineState<Slots, O, F>>,
  fill: fn(&mut Slots, Item),
}

/// A tuple of optional slots that can produce a combined value once every
/// slot is filled.
pub trait LatestSlots<F> {
  type Output;

  fn latest(&self, combiner: &mut F) -> Option<Self::Output>;
}

impl<Slots, Item, O, F> Observer<Item> for CombineSlotObserver<Slots, Item, O, F>
where
  Slots: LatestSlots<F>,
  O: Observer<Slots::Output>,
{
  fn next(&mut self, value: Item) {
    let mut state = self.state.rc_deref_mut();
    let CombineState { slots, observer, combiner } = &mut *state;
    (self.fill)(slots, value);
    if let Some(v) = slots.latest(combiner) {
      observer.next(v);
    }
  }
}

macro_rules! impl_combine {
  ($($S:ident $idx:tt $v:ident),+) => {
    impl<F, R, $($S: Clone),+> LatestSlots<F> for ($(Option<$S>,)+)
    where
      F: FnMut($($S),+) -> R,
    {
      type Output = R;

      fn latest(&self, combiner: &mut F) -> Option<R> {
        match self {
          ($(Some($v),)+) => Some(combiner($($v.clone()),+)),
          _ => None,
        }
      }
    }

    impl_combine!(@op [$($S $idx),+] ($(Option<$S::Item>,)+));
  };
  (@op [$($S:ident $idx:tt),+] $slots:ty) => {
    impl<F, R, $($S),+> Observable for CombineOp<($($S,)+), F>
    where
      $($S: Observable, $S::Item: Clone + Send + 'static,)+
      F: FnMut($($S::Item),+) -> R + Clone + Send + 'static,
    {
      type Item = R;
      type Unsub = MultiSubscription;

      fn actual_subscribe<O>(&self, observer: O) -> Self::Unsub
      where
        O: Observer<R> + Send + 'static,
      {
        let state = MutArc::own(CombineState {
          slots: <$slots>::default(),
          observer,
          combiner: self.combiner.clone(),
        });
        let subscription = MultiSubscription::default();
        $(
          subscription.add(self.sources.$idx.actual_subscribe(CombineSlotObserver {
            state: state.clone(),
            fill: |slots: &mut $slots, value: $S::Item| slots.$idx = Some(value),
          }));
        )+
        subscription
      }
    }
  };
}

impl_combine!(S0 0 a);
impl_combine!(S0 0 a, S1 1 b);
impl_combine!(S0 0 a, S1 1 b, S2 2 c);
impl_combine!(S0 0 a, S1 1 b, S2 2 c, S3 3 d);
impl_combine!(S0 0 a, S1 1 b, S2 2 c, S3 3 d, S4 4 e);
impl_combine!(S0 0 a, S1 1 b, S2 2 c, S3 3 d, S4 4 e, S5 5 f);

// ==================== combine_all ====================

pub struct CombineAllOp<S, F> {
  sources: Vec<S>,
  combiner: F,
}

struct CombineAllState<Item, O, F> {
  slots: Vec<Option<Item>>,
  observer: O,
  combiner: F,
}

pub struct CombineAllObserver<Item, O, F> {
  index: usize,
  state: MutArc<CombineAllState<Item, O, F>>,
}

impl<S, F, R> Observable for CombineAllOp<S, F>
where
  S: Observable,
  S::Item: Clone + Send + 'static,
  F: FnMut(&[S::Item]) -> R + Clone + Send + 'static,
{
  type Item = R;
  type Unsub = MultiSubscription;

  fn actual_subscribe<O>(&self, observer: O) -> Self::Unsub
  where
    O: Observer<R> + Send + 'static,
  {
    if self.sources.is_empty() {
      debug!("combine_all subscribed without sources, it will never emit");
    }
    let state = MutArc::own(CombineAllState {
      slots: vec![None; self.sources.len()],
      observer,
      combiner: self.combiner.clone(),
    });
    let subscription = MultiSubscription::default();
    for (index, source) in self.sources.iter().enumerate() {
      subscription.add(source.actual_subscribe(CombineAllObserver { index, state: state.clone() }));
    }
    subscription
  }
}

impl<Item, O, F, R> Observer<Item> for CombineAllObserver<Item, O, F>
where
  Item: Clone,
  O: Observer<R>,
  F: FnMut(&[Item]) -> R,
{
  fn next(&mut self, value: Item) {
    let mut state = self.state.rc_deref_mut();
    let CombineAllState { slots, observer, combiner } = &mut *state;
    if let Some(slot) = slots.get_mut(self.index) {
      *slot = Some(value);
    }
    let latest: Option<Vec<Item>> = slots.iter().cloned().collect();
    if let Some(latest) = latest {
      observer.next(combiner(&latest));
    }
  }
}
