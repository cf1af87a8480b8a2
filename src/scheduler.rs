//! Timer service and clock consumed by `periodic`, `delay` and `debounce`.
//!
//! Schedulers are injected per combinator, so production code can run on a
//! thread pool while tests drive a [`TestScheduler`] through virtual time.
//! Every task is fire-and-forget: firing time is a lower bound only, and a
//! task is only cancelled when its [`TaskHandle`] is unsubscribed.

use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
};

pub use std::time::{Duration, Instant};

use crate::subscription::SubscriptionLike;

pub mod test_scheduler;
pub use test_scheduler::TestScheduler;

#[cfg(feature = "thread-pool-scheduler")]
pub mod thread_pool_scheduler;
#[cfg(feature = "thread-pool-scheduler")]
pub use thread_pool_scheduler::ThreadPoolScheduler;

#[cfg(feature = "tokio-scheduler")]
pub mod tokio_scheduler;
#[cfg(feature = "tokio-scheduler")]
pub use tokio_scheduler::TokioScheduler;

/// Shortest repeat interval any scheduler honors. Shorter intervals are
/// clamped to it, so a repeating task always lets time move forward.
pub const MIN_REPEAT_INTERVAL: Duration = Duration::from_millis(1);

/// A Scheduler orders tasks in time and executes them.
pub trait Scheduler: Clone + Send + Sync + 'static {
  /// The scheduler's clock.
  fn now(&self) -> Instant;

  /// Run `task` once, at or after `delay` from now. Only [`TestScheduler`]
  /// promises that tasks due at the same instant run in scheduling order.
  fn schedule_once<F>(&self, task: F, delay: Duration) -> TaskHandle
  where
    F: FnOnce() + Send + 'static;

  /// Run `task` every `interval`, first at `interval` from now, until the
  /// returned handle is unsubscribed.
  fn schedule_repeating<F>(&self, task: F, interval: Duration) -> TaskHandle
  where
    F: FnMut() + Send + 'static;
}

pub(crate) fn clamp_interval(interval: Duration) -> Duration { interval.max(MIN_REPEAT_INTERVAL) }

// ==================== TaskHandle ====================

#[derive(Default)]
struct TaskFlags {
  cancelled: AtomicBool,
  finished: AtomicBool,
}

/// Handle to one scheduled task. Unsubscribing it cancels the task if it has
/// not run yet, and stops a repeating task before its next run.
#[derive(Clone, Default)]
pub struct TaskHandle(Arc<TaskFlags>);

impl TaskHandle {
  pub fn new() -> Self { Self::default() }

  pub fn is_cancelled(&self) -> bool { self.0.cancelled.load(Ordering::Acquire) }

  pub fn is_finished(&self) -> bool { self.0.finished.load(Ordering::Acquire) }

  pub(crate) fn mark_finished(&self) { self.0.finished.store(true, Ordering::Release); }
}

impl SubscriptionLike for TaskHandle {
  fn unsubscribe(&mut self) {
    if !self.0.cancelled.swap(true, Ordering::AcqRel) {
      tracing::trace!("scheduled task cancelled");
    }
  }

  fn is_closed(&self) -> bool { self.is_cancelled() || self.is_finished() }
}

impl std::fmt::Debug for TaskHandle {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TaskHandle")
      .field("cancelled", &self.is_cancelled())
      .field("finished", &self.is_finished())
      .finish()
  }
}
