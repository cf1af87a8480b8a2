use tokio::{runtime::Handle, time};
use tracing::debug;

use super::{clamp_interval, Duration, Instant, Scheduler, TaskHandle};
use crate::error::SchedulerError;

/// Runs tasks on a tokio runtime, timed with `tokio::time`.
#[derive(Clone, Debug)]
pub struct TokioScheduler {
  handle: Handle,
}

impl TokioScheduler {
  /// Schedule on the runtime the calling thread is running in.
  pub fn current() -> Result<Self, SchedulerError> {
    Ok(Self::from_handle(Handle::try_current()?))
  }

  pub fn from_handle(handle: Handle) -> Self {
    debug!("tokio scheduler created");
    TokioScheduler { handle }
  }
}

impl Scheduler for TokioScheduler {
  fn now(&self) -> Instant { Instant::now() }

  fn schedule_once<F>(&self, task: F, delay: Duration) -> TaskHandle
  where
    F: FnOnce() + Send + 'static,
  {
    let handle = TaskHandle::new();
    let c_handle = handle.clone();
    self.handle.spawn(async move {
      time::sleep(delay).await;
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
    self.handle.spawn(async move {
      let mut ticker = time::interval_at(time::Instant::now() + interval, interval);
      loop {
        ticker.tick().await;
        if c_handle.is_cancelled() {
          break;
        }
        task();
      }
    });
    handle
  }
}
