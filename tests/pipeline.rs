//! Integration tests for pushrx
//!
//! Tests operator chains end to end, subscription lifetimes, and behavior on
//! real schedulers.

use std::{
  panic::{catch_unwind, AssertUnwindSafe},
  sync::{
    atomic::{AtomicUsize, Ordering},
    mpsc, Arc, Mutex,
  },
};

use pushrx::prelude::*;

fn collector<T: Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl FnMut(T) + Send + 'static) {
  let out = Arc::new(Mutex::new(Vec::new()));
  let c_out = out.clone();
  (out, move |v| c_out.lock().unwrap().push(v))
}

#[pushrx_macro::test]
fn test_basic_chain_integration() {
  let (out, sink) = collector();
  observable::from_iter(1..=10)
    .map(|x| x * 2)
    .filter(|x| *x > 10)
    .take(3)
    .subscribe(sink);
  assert_eq!(*out.lock().unwrap(), vec![12, 14, 16]);
}

#[pushrx_macro::test]
fn test_running_sum_of_squares() {
  let (out, sink) = collector();
  observable::from_iter(1..=10)
    .filter(|x| x % 2 == 0)
    .map(|x| x * x)
    .scan(0, |acc, v| acc + v)
    .take(4)
    .subscribe(sink);
  // squares of evens: 4, 16, 36, 64, ...
  assert_eq!(*out.lock().unwrap(), vec![0, 4, 20, 56]);
}

#[pushrx_macro::test]
fn test_every_subscription_repeats_upstream_side_effects() {
  let calls = Arc::new(AtomicUsize::new(0));
  let c_calls = calls.clone();
  let pipeline = observable::from_iter([1, 2, 3]).map(move |v| {
    c_calls.fetch_add(1, Ordering::SeqCst);
    v
  });

  let (first, sink) = collector();
  pipeline.subscribe(sink);
  let (second, sink) = collector();
  pipeline.subscribe(sink);

  assert_eq!(calls.load(Ordering::SeqCst), 6);
  assert_eq!(*first.lock().unwrap(), *second.lock().unwrap());
}

#[pushrx_macro::test]
fn test_combined_state_is_per_subscription() {
  let scheduler = TestScheduler::new();
  let ms = Duration::from_millis;
  let pipeline = observable::zip(
    (
      observable::periodic(ms(10), scheduler.clone()).scan(0, |n: u32, _| n + 1),
      observable::from_iter(['a', 'b', 'c']),
    ),
    |n: u32, c: char| format!("{c}{n}"),
  );

  let (first, sink) = collector();
  pipeline.subscribe(sink);
  scheduler.advance_by(ms(20));
  let (second, sink) = collector();
  pipeline.subscribe(sink);
  scheduler.advance_by(ms(20));

  assert_eq!(*first.lock().unwrap(), vec!["a0", "b1", "c2"]);
  assert_eq!(*second.lock().unwrap(), vec!["a0", "b1", "c2"]);
}

#[pushrx_macro::test]
fn test_dispose_is_idempotent_and_cascades() {
  let scheduler = TestScheduler::new();
  let ms = Duration::from_millis;
  let (out, sink) = collector();
  let c_scheduler = scheduler.clone();
  let mut handle = observable::periodic(ms(10), scheduler.clone())
    .scan(0, |n, _| n + 1)
    .flat_map(move |n| observable::just(n).delay(ms(5), c_scheduler.clone()))
    .merge(observable::periodic(ms(7), scheduler.clone()).constant(-1))
    .subscribe(sink);

  scheduler.advance_by(ms(15));
  assert_eq!(*out.lock().unwrap(), vec![0, -1, -1, 1]);

  handle.unsubscribe();
  handle.unsubscribe();
  assert!(handle.is_closed());
  scheduler.advance_by(ms(100));
  assert_eq!(out.lock().unwrap().len(), 4);
  assert_eq!(scheduler.pending_count(), 0);
}

#[pushrx_macro::test]
fn test_guard_disposes_on_drop() {
  let scheduler = TestScheduler::new();
  let ms = Duration::from_millis;
  let (out, sink) = collector();
  {
    let _guard = observable::periodic(ms(10), scheduler.clone())
      .subscribe(sink)
      .unsubscribe_when_dropped();
    scheduler.advance_by(ms(20));
  }
  scheduler.advance_by(ms(20));
  assert_eq!(out.lock().unwrap().len(), 2);
}

#[pushrx_macro::test]
fn test_delay_keeps_fifo_for_equal_delays() {
  let scheduler = TestScheduler::new();
  let (out, sink) = collector();
  observable::from_iter(0..50)
    .delay(Duration::from_millis(5), scheduler.clone())
    .subscribe(sink);
  scheduler.advance_by(Duration::from_millis(5));
  assert_eq!(*out.lock().unwrap(), (0..50).collect::<Vec<_>>());
}

#[pushrx_macro::test]
fn test_debounce_measures_from_last_emission() {
  let scheduler = TestScheduler::new();
  let ms = Duration::from_millis;
  let (out, sink) = collector();
  // arrivals at 10, 20, ..., 100
  observable::periodic(ms(10), scheduler.clone())
    .scan(0, |n, _| n + 10)
    .filter(|t| *t > 0)
    .debounce(ms(15), scheduler.clone())
    .subscribe(sink);

  scheduler.advance_by(ms(100));
  // 10 passes; 20 is dropped; 30 passes and resets; 40 dropped; ...
  assert_eq!(*out.lock().unwrap(), vec![10, 30, 50, 70, 90]);
}

#[pushrx_macro::test]
fn test_sample_and_end_when_compose() {
  let scheduler = TestScheduler::new();
  let ms = Duration::from_millis;
  let (out, sink) = collector();
  observable::periodic(ms(10), scheduler.clone())
    .scan(0, |n, _| n + 1)
    .sample(observable::periodic(ms(15), scheduler.clone()))
    .end_when(observable::periodic(ms(50), scheduler.clone()))
    .subscribe(sink);

  scheduler.advance_by(ms(100));
  assert_eq!(*out.lock().unwrap(), vec![Some(1), Some(2), Some(4)]);
}

#[pushrx_macro::test]
fn test_merge_of_synchronous_sources_is_closed() {
  let (out, sink) = collector();
  let handle =
    observable::merge([observable::from_iter(0..2), observable::from_iter(2..4)]).subscribe(sink);
  assert_eq!(*out.lock().unwrap(), vec![0, 1, 2, 3]);
  assert!(handle.is_closed());

  let scheduler = TestScheduler::new();
  let handle = observable::merge([
    observable::from_iter(0..2).box_it(),
    observable::periodic(Duration::from_millis(10), scheduler).constant(9).box_it(),
  ])
  .subscribe(|_| {});
  assert!(!handle.is_closed());
}

#[pushrx_macro::test]
fn test_merge_is_fail_fast() {
  let second_subscribed = Arc::new(AtomicUsize::new(0));
  let c_second = second_subscribed.clone();
  let faulty = observable::from_iter([1, 2, 3]).map(|v| {
    if v == 2 {
      panic!("fault in mapper");
    }
    v
  });
  let second = observable::just(10).map(move |v| {
    c_second.fetch_add(1, Ordering::SeqCst);
    v
  });
  let (out, sink) = collector();

  let merged = faulty.merge(second);
  let result = catch_unwind(AssertUnwindSafe(|| merged.subscribe(sink)));

  assert!(result.is_err());
  assert_eq!(*out.lock().unwrap(), vec![1]);
  assert_eq!(second_subscribed.load(Ordering::SeqCst), 0);
}

/// A source whose mapper faults on its first value, and a source counting how
/// many times it got subscribed.
fn faulty_and_counted() -> (BoxOp<i32>, BoxOp<i32>, Arc<AtomicUsize>) {
  let subscribed = Arc::new(AtomicUsize::new(0));
  let c_subscribed = subscribed.clone();
  let faulty = observable::just(1)
    .map(|_: i32| -> i32 { panic!("fault in mapper") })
    .box_it();
  let counted = observable::just(10)
    .map(move |v| {
      c_subscribed.fetch_add(1, Ordering::SeqCst);
      v
    })
    .box_it();
  (faulty, counted, subscribed)
}

#[pushrx_macro::test]
fn test_combine_is_fail_fast() {
  let (faulty, counted, subscribed) = faulty_and_counted();
  let (out, sink) = collector();
  let combined = observable::combine((faulty, counted), |a: i32, b: i32| a + b);
  let result = catch_unwind(AssertUnwindSafe(|| combined.subscribe(sink)));

  assert!(result.is_err());
  assert!(out.lock().unwrap().is_empty());
  assert_eq!(subscribed.load(Ordering::SeqCst), 0);
}

#[pushrx_macro::test]
fn test_combine_all_is_fail_fast() {
  let (faulty, counted, subscribed) = faulty_and_counted();
  let (out, sink) = collector();
  let combined = observable::combine_all(vec![faulty, counted], |latest: &[i32]| latest.len());
  let result = catch_unwind(AssertUnwindSafe(|| combined.subscribe(sink)));

  assert!(result.is_err());
  assert!(out.lock().unwrap().is_empty());
  assert_eq!(subscribed.load(Ordering::SeqCst), 0);
}

#[pushrx_macro::test]
fn test_zip_is_fail_fast() {
  let (faulty, counted, subscribed) = faulty_and_counted();
  let (out, sink) = collector();
  let zipped = observable::zip((faulty, counted), |a: i32, b: i32| (a, b));
  let result = catch_unwind(AssertUnwindSafe(|| zipped.subscribe(sink)));

  assert!(result.is_err());
  assert!(out.lock().unwrap().is_empty());
  assert_eq!(subscribed.load(Ordering::SeqCst), 0);
}

#[pushrx_macro::test]
fn test_zip_all_is_fail_fast() {
  let (faulty, counted, subscribed) = faulty_and_counted();
  let (out, sink) = collector();
  let zipped = observable::zip_all(vec![faulty, counted], |heads: Vec<i32>| heads.len());
  let result = catch_unwind(AssertUnwindSafe(|| zipped.subscribe(sink)));

  assert!(result.is_err());
  assert!(out.lock().unwrap().is_empty());
  assert_eq!(subscribed.load(Ordering::SeqCst), 0);
}

#[pushrx_macro::test]
fn test_state_survives_a_fault_in_the_observer() {
  let (out, mut sink) = collector();
  let scheduler = TestScheduler::new();
  let ms = Duration::from_millis;
  observable::combine(
    (
      observable::periodic(ms(10), scheduler.clone()).scan(0, |n: i32, _| n + 1),
      observable::periodic(ms(15), scheduler.clone()).scan(100, |n: i32, _| n + 1),
    ),
    |a: i32, b: i32| a + b,
  )
  .subscribe(move |v| {
    if v == 101 {
      panic!("fault in observer");
    }
    sink(v)
  });

  // the fault unwinds out of the first source's timer, which is lost
  let first = catch_unwind(AssertUnwindSafe(|| scheduler.advance_by(ms(10))));
  assert!(first.is_err());
  // the slot it filled before the fault is still there
  scheduler.advance_by(ms(20));
  assert_eq!(*out.lock().unwrap(), vec![100, 102, 103]);
}

#[cfg(feature = "thread-pool-scheduler")]
#[pushrx_macro::test]
fn test_thread_pool_periodic_with_take() {
  let scheduler = ThreadPoolScheduler::with_pool_size(2).unwrap();
  let (tx, rx) = mpsc::channel();
  let mut handle = observable::periodic(Duration::from_millis(5), scheduler)
    .scan(0, |n, _| n + 1)
    .filter(|n| *n > 0)
    .take(3)
    .subscribe(move |v| {
      let _ = tx.send(v);
    });

  let got: Vec<i32> = (0..3)
    .map(|_| rx.recv_timeout(Duration::from_secs(5)).unwrap())
    .collect();
  assert_eq!(got, vec![1, 2, 3]);
  assert!(!handle.is_closed());
  handle.unsubscribe();
  assert!(handle.is_closed());
}

#[cfg(feature = "thread-pool-scheduler")]
#[pushrx_macro::test]
fn test_zip_across_threads_pairs_by_position() {
  let scheduler = ThreadPoolScheduler::with_pool_size(4).unwrap();
  let count = |interval| {
    observable::periodic(interval, scheduler.clone())
      .scan(0, |n: u32, _| n + 1)
      .filter(|n| *n > 0)
  };
  let (tx, rx) = mpsc::channel();
  let _guard = observable::zip(
    (count(Duration::from_millis(2)), count(Duration::from_millis(3))),
    |a: u32, b: u32| (a, b),
  )
  .take(10)
  .subscribe(move |v| {
    let _ = tx.send(v);
  })
  .unsubscribe_when_dropped();

  for i in 1..=10 {
    assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), (i, i));
  }
}

#[cfg(feature = "tokio-scheduler")]
#[pushrx_macro::test(shared)]
async fn test_tokio_delay() {
  let scheduler = TokioScheduler::current().unwrap();
  let (out, sink) = collector();
  let _guard = observable::from_iter([1, 2, 3])
    .delay(Duration::from_millis(10), scheduler)
    .subscribe(sink)
    .unsubscribe_when_dropped();

  tokio::time::sleep(Duration::from_millis(100)).await;
  assert_eq!(*out.lock().unwrap(), vec![1, 2, 3]);
}
