//! Test Scheduler for deterministic testing of time-based operators.
//!
//! Provides virtual time that only advances when explicitly instructed,
//! enabling deterministic testing of `delay`, `debounce` and `periodic`.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use pushrx::prelude::*;
//!
//! let scheduler = TestScheduler::new();
//! let received = Arc::new(Mutex::new(Vec::new()));
//! let c_received = received.clone();
//!
//! observable::just(42)
//!   .delay(Duration::from_millis(100), scheduler.clone())
//!   .subscribe(move |v| c_received.lock().unwrap().push(v));
//!
//! // Value not received yet (virtual time is 0)
//! assert!(received.lock().unwrap().is_empty());
//!
//! // Advance virtual time to trigger the delayed emission
//! scheduler.advance_by(Duration::from_millis(100));
//! assert_eq!(*received.lock().unwrap(), vec![42]);
//! ```
//!
//! Clones of a `TestScheduler` share one clock and one task queue.

use std::{cmp::Ordering, collections::BinaryHeap};

use super::{clamp_interval, Duration, Instant, Scheduler, TaskHandle};
use crate::rc::MutArc;

// ==================== Internal State ====================

struct VirtualState {
  origin: Instant,
  elapsed: Duration,
  task_queue: BinaryHeap<ScheduledTask>,
  next_task_id: usize,
}

enum TaskKind {
  Once(Box<dyn FnOnce() + Send>),
  Repeating { task: Box<dyn FnMut() + Send>, interval: Duration },
}

struct ScheduledTask {
  due: Duration,
  task_id: usize,
  kind: TaskKind,
  handle: TaskHandle,
}

impl PartialEq for ScheduledTask {
  fn eq(&self, other: &Self) -> bool { self.due == other.due && self.task_id == other.task_id }
}

impl Eq for ScheduledTask {}

impl PartialOrd for ScheduledTask {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for ScheduledTask {
  fn cmp(&self, other: &Self) -> Ordering {
    // Min-heap: earlier times first, then FIFO by task_id
    other
      .due
      .cmp(&self.due)
      .then_with(|| other.task_id.cmp(&self.task_id))
  }
}

impl VirtualState {
  fn push(&mut self, due: Duration, kind: TaskKind, handle: TaskHandle) {
    let task_id = self.next_task_id;
    self.next_task_id += 1;
    self.task_queue.push(ScheduledTask { due, task_id, kind, handle });
  }
}

// ==================== TestScheduler ====================

/// A virtual time scheduler for deterministic testing.
///
/// Tasks only run inside [`advance_by`](TestScheduler::advance_by) and
/// [`advance_to`](TestScheduler::advance_to), in due-time order; tasks due at
/// the same instant run in the order they were scheduled.
#[derive(Clone)]
pub struct TestScheduler(MutArc<VirtualState>);

impl Default for TestScheduler {
  fn default() -> Self { Self::new() }
}

impl TestScheduler {
  pub fn new() -> Self {
    TestScheduler(MutArc::own(VirtualState {
      origin: Instant::now(),
      elapsed: Duration::ZERO,
      task_queue: BinaryHeap::new(),
      next_task_id: 0,
    }))
  }

  /// Virtual time elapsed since the scheduler was created.
  pub fn elapsed(&self) -> Duration { self.0.rc_deref_mut().elapsed }

  /// Number of tasks waiting in the queue, cancelled ones included until
  /// their due time is reached.
  pub fn pending_count(&self) -> usize { self.0.rc_deref_mut().task_queue.len() }

  /// Advance the virtual clock by `duration`, running every task that falls
  /// due on the way.
  pub fn advance_by(&self, duration: Duration) {
    let target = self.elapsed() + duration;
    self.advance_to(target);
  }

  /// Advance the virtual clock to `target` (measured from the scheduler's
  /// creation). Moving backwards is a no-op.
  pub fn advance_to(&self, target: Duration) {
    loop {
      let next = {
        let mut state = self.0.rc_deref_mut();
        match state.task_queue.peek() {
          Some(task) if task.due <= target => {}
          _ => break,
        }
        let task = state.task_queue.pop();
        if let Some(task) = &task {
          state.elapsed = state.elapsed.max(task.due);
        }
        task
      };
      let Some(ScheduledTask { due, kind, handle, .. }) = next else {
        break;
      };
      if handle.is_cancelled() {
        continue;
      }

      match kind {
        TaskKind::Once(task) => {
          task();
          handle.mark_finished();
        }
        TaskKind::Repeating { mut task, interval } => {
          task();
          if !handle.is_cancelled() {
            let kind = TaskKind::Repeating { task, interval };
            self.0.rc_deref_mut().push(due + interval, kind, handle);
          }
        }
      }
    }

    let mut state = self.0.rc_deref_mut();
    state.elapsed = state.elapsed.max(target);
  }
}

impl Scheduler for TestScheduler {
  fn now(&self) -> Instant {
    let state = self.0.rc_deref_mut();
    state.origin + state.elapsed
  }

  fn schedule_once<F>(&self, task: F, delay: Duration) -> TaskHandle
  where
    F: FnOnce() + Send + 'static,
  {
    let handle = TaskHandle::new();
    let mut state = self.0.rc_deref_mut();
    let due = state.elapsed + delay;
    state.push(due, TaskKind::Once(Box::new(task)), handle.clone());
    handle
  }

  fn schedule_repeating<F>(&self, task: F, interval: Duration) -> TaskHandle
  where
    F: FnMut() + Send + 'static,
  {
    let interval = clamp_interval(interval);
    let handle = TaskHandle::new();
    let mut state = self.0.rc_deref_mut();
    let due = state.elapsed + interval;
    state.push(due, TaskKind::Repeating { task: Box::new(task), interval }, handle.clone());
    handle
  }
}
