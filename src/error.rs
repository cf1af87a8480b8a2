use thiserror::Error;

/// Failures while constructing a [`Scheduler`](crate::scheduler::Scheduler).
///
/// Combinators themselves have no error channel; a fault raised by user code
/// while values flow unwinds through the delivering combinator instead.
#[derive(Debug, Error)]
pub enum SchedulerError {
  #[error("failed to spawn the scheduler's worker threads")]
  PoolCreation(#[source] std::io::Error),

  #[error("a thread pool needs at least one worker")]
  EmptyPool,

  #[cfg(feature = "tokio-scheduler")]
  #[error("no tokio runtime is running on this thread")]
  NoRuntime(#[from] tokio::runtime::TryCurrentError),
}
