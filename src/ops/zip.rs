//! Positional pairing of several sources.
//!
//! Every source gets a FIFO queue. After each enqueue, if no queue is empty,
//! the head of every queue is taken and the merger is applied to them in
//! source order. Each value is used exactly once; values left over when a
//! source goes quiet are never delivered.

use std::collections::VecDeque;

use tracing::debug;

use crate::{
  observable::Observable, observer::Observer, rc::MutArc, subscription::MultiSubscription,
};

/// Zip a tuple of one to six sources through `merger`. The merger's closure
/// parameters need type annotations.
pub fn zip<S, F>(sources: S, merger: F) -> ZipOp<S, F> { ZipOp { sources, merger } }

/// Zip any number of same-typed sources; `merger` receives one value per
/// source, in source order. Without sources nothing is ever emitted.
pub fn zip_all<I, F, R>(sources: I, merger: F) -> ZipAllOp<I::Item, F>
where
  I: IntoIterator,
  I::Item: Observable,
  F: FnMut(Vec<<I::Item as Observable>::Item>) -> R,
{
  ZipAllOp { sources: sources.into_iter().collect(), merger }
}

#[derive(Clone)]
pub struct ZipOp<S, F> {
  sources: S,
  merger: F,
}

pub struct ZipState<Queues, O, F> {
  queues: Queues,
  observer: O,
  merger: F,
}

pub struct ZipQueueObserver<Queues, Item, O, F> {
  state: MutArc<ZipState<Queues, O, F>>,
  push: fn(&mut Queues, Item),
}

/// A tuple of FIFO queues, one per source.
pub trait ZipQueues<F> {
  type Output;

  /// Pop one value from every queue and merge them, if none is empty.
  fn pop_ready(&mut self, merger: &mut F) -> Option<Self::Output>;
}

impl<Queues, Item, O, F> Observer<Item> for ZipQueueObserver<Queues, Item, O, F>
where
  Queues: ZipQueues<F>,
  O: Observer<Queues::Output>,
{
  fn next(&mut self, value: Item) {
    let mut state = self.state.rc_deref_mut();
    let ZipState { queues, observer, merger } = &mut *state;
    (self.push)(queues, value);
    if let Some(v) = queues.pop_ready(merger) {
      observer.next(v);
    }
  }
}

macro_rules! impl_zip {
  ($($S:ident $idx:tt),+) => {
    impl<F, R, $($S),+> ZipQueues<F> for ($(VecDeque<$S>,)+)
    where
      F: FnMut($($S),+) -> R,
    {
      type Output = R;

      fn pop_ready(&mut self, merger: &mut F) -> Option<R> {
        if $(!self.$idx.is_empty())&&+ {
          Some(merger($(self.$idx.pop_front()?),+))
        } else {
          None
        }
      }
    }

    impl_zip!(@op [$($S $idx),+] ($(VecDeque<$S::Item>,)+));
  };
  (@op [$($S:ident $idx:tt),+] $queues:ty) => {
    impl<F, R, $($S),+> Observable for ZipOp<($($S,)+), F>
    where
      $($S: Observable, $S::Item: Send + 'static,)+
      F: FnMut($($S::Item),+) -> R + Clone + Send + 'static,
    {
      type Item = R;
      type Unsub = MultiSubscription;

      fn actual_subscribe<O>(&self, observer: O) -> Self::Unsub
      where
        O: Observer<R> + Send + 'static,
      {
        let state = MutArc::own(ZipState {
          queues: <$queues>::default(),
          observer,
          merger: self.merger.clone(),
        });
        let subscription = MultiSubscription::default();
        $(
          subscription.add(self.sources.$idx.actual_subscribe(ZipQueueObserver {
            state: state.clone(),
            push: |queues: &mut $queues, value: $S::Item| queues.$idx.push_back(value),
          }));
        )+
        subscription
      }
    }
  };
}

impl_zip!(S0 0);
impl_zip!(S0 0, S1 1);
impl_zip!(S0 0, S1 1, S2 2);
impl_zip!(S0 0, S1 1, S2 2, S3 3);
impl_zip!(S0 0, S1 1, S2 2, S3 3, S4 4);
impl_zip!(S0 0, S1 1, S2 2, S3 3, S4 4, S5 5);

// ==================== zip_all ====================

pub struct ZipAllOp<S, F> {
  sources: Vec<S>,
  merger: F,
}

struct ZipAllState<Item, O, F> {
  queues: Vec<VecDeque<Item>>,
  observer: O,
  merger: F,
}

pub struct ZipAllObserver<Item, O, F> {
  index: usize,
  state: MutArc<ZipAllState<Item, O, F>>,
}

impl<S, F, R> Observable for ZipAllOp<S, F>
where
  S: Observable,
  S::Item: Send + 'static,
  F: FnMut(Vec<S::Item>) -> R + Clone + Send + 'static,
{
  type Item = R;
  type Unsub = MultiSubscription;

  fn actual_subscribe<O>(&self, observer: O) -> Self::Unsub
  where
    O: Observer<R> + Send + 'static,
  {
    if self.sources.is_empty() {
      debug!("zip_all subscribed without sources, it will never emit");
    }
    let state = MutArc::own(ZipAllState {
      queues: (0..self.sources.len()).map(|_| VecDeque::new()).collect(),
      observer,
      merger: self.merger.clone(),
    });
    let subscription = MultiSubscription::default();
    for (index, source) in self.sources.iter().enumerate() {
      subscription.add(source.actual_subscribe(ZipAllObserver { index, state: state.clone() }));
    }
    subscription
  }
}

impl<Item, O, F, R> Observer<Item> for ZipAllObserver<Item, O, F>
where
  O: Observer<R>,
  F: FnMut(Vec<Item>) -> R,
{
  fn next(&mut self, value: Item) {
    let mut state = self.state.rc_deref_mut();
    let ZipAllState { queues, observer, merger } = &mut *state;
    if let Some(queue) = queues.get_mut(self.index) {
      queue.push_back(value);
    }
    if queues.iter().all(|q| !q.is_empty()) {
      let heads = queues.iter_mut().filter_map(VecDeque::pop_front).collect();
      observer.next(merger(heads));
    }
  }
}
