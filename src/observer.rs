//! Observer trait and implementations
//!
//! An observer is the downstream end of a subscription: a sink that is handed
//! each emitted value in order. There is no error or completion
//! notification; a source that stops emitting simply stops calling `next`.

// ============================================================================
// Observer Trait
// ============================================================================

/// The consumer of values in a push pipeline.
pub trait Observer<Item> {
  /// Receive the next value from the observable
  fn next(&mut self, value: Item);
}

/// Type-erased observer, used where the concrete observer type cannot leak
/// into a type signature (see [`BoxOp`](crate::ops::box_it::BoxOp)).
pub type BoxObserver<Item> = Box<dyn Observer<Item> + Send>;

impl<Item, O> Observer<Item> for Box<O>
where
  O: Observer<Item> + ?Sized,
{
  #[inline]
  fn next(&mut self, value: Item) { (**self).next(value) }
}

// ============================================================================
// FnMutObserver - Closure adapter
// ============================================================================

/// Adapts a closure into an [`Observer`].
///
/// This is what `observable.subscribe(|v| println!("{}", v))` wraps the
/// closure in.
#[derive(Clone)]
pub struct FnMutObserver<F>(pub F);

impl<F, Item> Observer<Item> for FnMutObserver<F>
where
  F: FnMut(Item),
{
  #[inline]
  fn next(&mut self, v: Item) { (self.0)(v); }
}

/// Option observer - None ignores every value, Some delegates to inner
impl<O, Item> Observer<Item> for Option<O>
where
  O: Observer<Item>,
{
  fn next(&mut self, value: Item) {
    if let Some(inner) = self {
      inner.next(value);
    }
  }
}
