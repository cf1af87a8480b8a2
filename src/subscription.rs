use std::fmt::{Debug, Formatter};

use smallvec::SmallVec;

use crate::rc::MutArc;

/// Disposal handle returned by every subscription.
///
/// Combinators never dispose anything on their own: a subscription keeps its
/// timers and upstream registrations alive until `unsubscribe` is called on
/// the handle that produced them. Disposal cascades to every upstream
/// subscription and every timer the subscription created.
pub trait SubscriptionLike {
  /// Dispose the subscription. Calling it again has no effect.
  fn unsubscribe(&mut self);

  fn is_closed(&self) -> bool;
}

/// Type-erased subscription handle.
pub type BoxSubscription = Box<dyn SubscriptionLike + Send>;

/// Fully synchronous sources are done by the time `subscribe` returns, so
/// their handle is already closed.
impl SubscriptionLike for () {
  #[inline]
  fn unsubscribe(&mut self) {}

  #[inline]
  fn is_closed(&self) -> bool { true }
}

impl<T: ?Sized> SubscriptionLike for Box<T>
where
  T: SubscriptionLike,
{
  #[inline]
  fn unsubscribe(&mut self) { (**self).unsubscribe() }

  #[inline]
  fn is_closed(&self) -> bool { (**self).is_closed() }
}

impl Debug for Box<dyn SubscriptionLike + Send> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("BoxSubscription")
      .field("is_closed", &self.is_closed())
      .finish()
  }
}

// ==================== MultiSubscription ====================

/// A growable set of subscriptions disposed together.
///
/// Used by combinators whose set of upstream handles changes over time:
/// `delay` adds one timer per value, `flat_map` one inner subscription per
/// outer value. Adding to an already disposed `MultiSubscription` disposes the
/// added handle immediately. It reports closed when disposed, and also when
/// every handle it holds has finished (an empty one included).
#[derive(Clone, Default)]
pub struct MultiSubscription(MutArc<Inner>);

#[derive(Default)]
struct Inner {
  closed: bool,
  teardown: SmallVec<[BoxSubscription; 2]>,
}

impl MultiSubscription {
  pub fn add<S>(&self, subscription: S)
  where
    S: SubscriptionLike + Send + 'static,
  {
    let mut subscription = subscription;
    {
      let mut inner = self.0.rc_deref_mut();
      if !inner.closed {
        inner.teardown.retain(|v| !v.is_closed());
        if !subscription.is_closed() {
          inner.teardown.push(Box::new(subscription));
        }
        return;
      }
    }
    subscription.unsubscribe();
  }

  /// Number of handles still held (finished ones are pruned on `add`).
  pub fn teardown_size(&self) -> usize { self.0.rc_deref_mut().teardown.len() }
}

impl SubscriptionLike for MultiSubscription {
  fn unsubscribe(&mut self) {
    // Take the handles out first: disposing one may re-enter `add`.
    let teardown = {
      let mut inner = self.0.rc_deref_mut();
      if inner.closed {
        return;
      }
      inner.closed = true;
      std::mem::take(&mut inner.teardown)
    };
    tracing::trace!(teardown = teardown.len(), "disposing multi-subscription");
    for mut v in teardown {
      v.unsubscribe();
    }
  }

  /// Closed once disposed, or once every handle it holds is closed: nothing
  /// it tracks can produce values any more.
  fn is_closed(&self) -> bool {
    let inner = self.0.rc_deref_mut();
    inner.closed || inner.teardown.iter().all(|v| v.is_closed())
  }
}

impl Debug for MultiSubscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let inner = self.0.rc_deref_mut();
    f.debug_struct("MultiSubscription")
      .field("closed", &inner.closed)
      .field("teardown_count", &inner.teardown.len())
      .finish()
  }
}

// ==================== TupleSubscription ====================

/// Exactly two subscriptions disposed together, for the two-source
/// combinators (`sample`, `end_when`) and for an upstream plus its
/// dynamically grown children (`delay`, `flat_map`).
#[derive(Debug, Default)]
pub struct TupleSubscription<U1, U2> {
  unsub1: U1,
  unsub2: U2,
}

impl<U1, U2> TupleSubscription<U1, U2> {
  pub fn new(unsub1: U1, unsub2: U2) -> Self { TupleSubscription { unsub1, unsub2 } }
}

impl<U1, U2> SubscriptionLike for TupleSubscription<U1, U2>
where
  U1: SubscriptionLike,
  U2: SubscriptionLike,
{
  fn unsubscribe(&mut self) {
    self.unsub1.unsubscribe();
    self.unsub2.unsubscribe();
  }

  fn is_closed(&self) -> bool { self.unsub1.is_closed() && self.unsub2.is_closed() }
}

// ==================== Wrapper & Guard ====================

/// Wrapper around a subscription which provides the
/// `unsubscribe_when_dropped()` method.
#[derive(Debug)]
pub struct SubscriptionWrapper<T: SubscriptionLike>(pub(crate) T);

impl<T: SubscriptionLike> SubscriptionWrapper<T> {
  /// Activates "RAII" behavior for this subscription. That means
  /// `unsubscribe()` will be called automatically as soon as the returned
  /// value goes out of scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable,
  /// `unsubscribe()` is called immediately, which is probably not what you
  /// want!
  pub fn unsubscribe_when_dropped(self) -> SubscriptionGuard<T> { SubscriptionGuard(self.0) }

  /// Consumes this wrapper and returns the underlying subscription.
  pub fn into_inner(self) -> T { self.0 }
}

impl<T: SubscriptionLike> SubscriptionLike for SubscriptionWrapper<T> {
  #[inline]
  fn unsubscribe(&mut self) { self.0.unsubscribe() }

  #[inline]
  fn is_closed(&self) -> bool { self.0.is_closed() }
}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be unsubscribed.
///
/// If you want to drop it immediately, wrap it in its own scope
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard<T: SubscriptionLike>(pub(crate) T);

impl<T: SubscriptionLike> SubscriptionGuard<T> {
  /// Wraps an existing subscription with a guard to enable RAII behavior for
  /// it.
  pub fn new(subscription: T) -> SubscriptionGuard<T> { SubscriptionGuard(subscription) }
}

impl<T: SubscriptionLike> Drop for SubscriptionGuard<T> {
  #[inline]
  fn drop(&mut self) { self.0.unsubscribe() }
}
