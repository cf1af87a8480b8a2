//! # pushrx: a minimal push-based reactive stream algebra
//!
//! Observables are deferred, repeatable subscription actions that push values
//! into an observer. There is no error or completion signal; a source that is
//! done simply stops emitting.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use pushrx::prelude::*;
//!
//! let out = Arc::new(Mutex::new(vec![]));
//! let c_out = out.clone();
//! observable::from_iter(0..10)
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 2)
//!   .scan(0, |acc, v| acc + v)
//!   .subscribe(move |v| c_out.lock().unwrap().push(v));
//!
//! assert_eq!(*out.lock().unwrap(), vec![0, 0, 4, 12, 24, 40]);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | A source that can be subscribed any number of times |
//! | [`ObservableExt`] | The combinators: `map`, `filter`, `scan`, `delay`, `sample`, ... |
//! | [`Observer`] | Consumes values through `next` |
//! | [`SubscriptionLike`] | Handle disposing a subscription and everything upstream of it |
//! | [`Scheduler`] | Clock and timers for `periodic`, `delay` and `debounce` |
//!
//! Every subscription owns its state: subscribing twice to the same pipeline
//! runs every upstream side effect twice. Nothing is disposed implicitly, so
//! `periodic` and `delay` timers keep running until the returned handle is
//! unsubscribed.
//!
//! ## Feature Flags
//!
//! - **`thread-pool-scheduler`** (default): [`ThreadPoolScheduler`] on a
//!   `futures` thread pool
//! - **`tokio-scheduler`**: [`TokioScheduler`] on a tokio runtime
//!
//! [`Observable`]: observable::Observable
//! [`ObservableExt`]: observable::ObservableExt
//! [`Observer`]: observer::Observer
//! [`SubscriptionLike`]: subscription::SubscriptionLike
//! [`Scheduler`]: scheduler::Scheduler
//! [`ThreadPoolScheduler`]: scheduler::ThreadPoolScheduler
//! [`TokioScheduler`]: scheduler::TokioScheduler

pub mod error;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod scheduler;
pub mod subscription;

pub use prelude::*;
