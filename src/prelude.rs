//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// Core traits and the source/multi-source constructors
pub use crate::observable::{self, Observable, ObservableExt};
// Observer trait
pub use crate::observer::{FnMutObserver, Observer};
// Boxed observable
pub use crate::ops::box_it::BoxOp;
// Schedulers
pub use crate::scheduler::{Duration, Instant, Scheduler, TaskHandle, TestScheduler};
#[cfg(feature = "thread-pool-scheduler")]
pub use crate::scheduler::ThreadPoolScheduler;
#[cfg(feature = "tokio-scheduler")]
pub use crate::scheduler::TokioScheduler;
// Subscription
pub use crate::subscription::*;
pub use crate::error::SchedulerError;
