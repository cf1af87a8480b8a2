use futures::executor::ThreadPool;
use futures_time::task::sleep;
use once_cell::sync::OnceCell;
use tracing::debug;

use super::{clamp_interval, Duration, Instant, Scheduler, TaskHandle};
use crate::error::SchedulerError;

static SHARED: OnceCell<ThreadPoolScheduler> = OnceCell::new();

/// Runs tasks on a `futures` thread pool, timing them with `futures-time`
/// sleeps on the pool's own threads.
///
/// Cloning is cheap; clones share the pool.
#[derive(Clone)]
pub struct ThreadPoolScheduler {
  pool: ThreadPool,
}

impl ThreadPoolScheduler {
  /// A pool with one worker per CPU.
  pub fn new() -> Result<Self, SchedulerError> {
    let pool = ThreadPool::new().map_err(SchedulerError::PoolCreation)?;
    debug!("thread pool scheduler created");
    Ok(ThreadPoolScheduler { pool })
  }

  pub fn with_pool_size(size: usize) -> Result<Self, SchedulerError> {
    if size == 0 {
      return Err(SchedulerError::EmptyPool);
    }
    let pool = ThreadPool::builder()
      .pool_size(size)
      .name_prefix("pushrx-")
      .create()
      .map_err(SchedulerError::PoolCreation)?;
    debug!(size, "thread pool scheduler created");
    Ok(ThreadPoolScheduler { pool })
  }

  /// The process-wide pool, created on first use.
  pub fn shared() -> Result<Self, SchedulerError> { SHARED.get_or_try_init(Self::new).cloned() }
}

impl Scheduler for ThreadPoolScheduler {
  fn now(&self) -> Instant { Instant::now() }

  fn schedule_once<F>(&self, task: F, delay: Duration) -> TaskHandle
  where
    F: FnOnce() + Send + 'static,
  {
    let handle = TaskHandle::new();
    let c_handle = handle.clone();
    self.pool.spawn_ok(async move {
      sleep(delay.into()).await;
      if !c_handle.is_cancelled() {
        task();
        c_handle.mark_finished();
      }
    });
    handle
  }

  fn schedule_repeating<F>(&self, mut task: F, interval: Duration) -> TaskHandle
  where
    F: FnMut() + Send + 'static,
  {
    let interval = clamp_interval(interval);
    let handle = TaskHandle::new();
    let c_handle = handle.clone();
    self.pool.spawn_ok(async move {
      // Fixed rate: each deadline is measured from the first, not from when
      // the previous run ended.
      let mut deadline = Instant::now() + interval;
      loop {
        sleep(deadline.saturating_duration_since(Instant::now()).into()).await;
        if c_handle.is_cancelled() {
          break;
        }
        task();
        deadline += interval;
      }
    });
    handle
  }
}
