use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{observer::Observer, subscription::SubscriptionLike};

/// Shared, lockable per-subscription state.
///
/// Every combinator that lets more than one upstream touch the same state
/// (slots, queues, caches, the downstream observer itself) keeps it behind a
/// `MutArc`, so emissions arriving from different threads are serialized.
///
/// A panic raised by user code while the lock is held poisons nothing from
/// the caller's point of view: the next `rc_deref_mut` recovers the guard and
/// sees the state exactly as the panic left it.
#[derive(Default)]
pub struct MutArc<T>(Arc<Mutex<T>>);

impl<T> MutArc<T> {
  pub fn own(t: T) -> Self { Self(Arc::new(Mutex::new(t))) }

  #[inline]
  pub fn rc_deref_mut(&self) -> MutexGuard<'_, T> {
    self.0.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Number of live clones of this handle.
  pub fn ref_count(&self) -> usize { Arc::strong_count(&self.0) }
}

impl<T> Clone for MutArc<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> From<T> for MutArc<T> {
  fn from(t: T) -> Self { Self::own(t) }
}

impl<Item, O> Observer<Item> for MutArc<O>
where
  O: Observer<Item>,
{
  #[inline]
  fn next(&mut self, value: Item) { self.rc_deref_mut().next(value) }
}

impl<T: SubscriptionLike> SubscriptionLike for MutArc<T> {
  #[inline]
  fn unsubscribe(&mut self) { self.rc_deref_mut().unsubscribe() }

  #[inline]
  fn is_closed(&self) -> bool { self.rc_deref_mut().is_closed() }
}
