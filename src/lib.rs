//! # call-dedup
//!
//! Two small, composable function-composition primitives:
//!
//! - [`Deduplicator`]: a stateful filter that returns only values it has not
//!   returned before.
//! - [`CallLimiter`]: a wrapper that lets a function run at most N times and
//!   refuses further calls with [`LimitExceeded`].
//!
//! ## Quick Start
//!
//! ```rust
//! use call_dedup::{CallLimiter, Deduplicator};
//!
//! let mut dedup = Deduplicator::new();
//! assert_eq!(dedup.apply([1, 2, 3]), vec![1, 2, 3]);
//! assert_eq!(dedup.apply([1, 2, 4]), vec![4]);
//!
//! let multiply = CallLimiter::builder(|(a, b): (i32, i32)| a * b)
//!     .with_name("multiply")
//!     .with_max_calls(2)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(multiply.call((2, 3)), Ok(6));
//! assert_eq!(multiply.call((4, 5)), Ok(20));
//! assert!(multiply.call((6, 7)).is_err());
//! ```
//!
//! ## Intra-call Duplicates
//!
//! By default a deduplicator filters each input against what it had seen when
//! the call started, then records everything it admitted. A new value that
//! appears twice in the same call is therefore returned twice. Use
//! [`DedupMode::Incremental`] to return only its first occurrence:
//!
//! ```rust
//! use call_dedup::{DedupMode, Deduplicator};
//!
//! let mut batch = Deduplicator::new();
//! assert_eq!(batch.apply([7, 7]), vec![7, 7]);
//!
//! let mut incremental = Deduplicator::with_mode(DedupMode::Incremental);
//! assert_eq!(incremental.apply([7, 7]), vec![7]);
//! ```
//!
//! ## Composition
//!
//! A limited function may build a fresh deduplicator on every call, in which
//! case nothing carries over between calls, or capture one long-lived
//! instance so deduplication spans calls:
//!
//! ```rust
//! use call_dedup::{dedup_once, CallLimiter, Deduplicator};
//!
//! // Per-call scope
//! let per_call = CallLimiter::wrap(|v: Vec<u8>| dedup_once(v), 3).unwrap();
//! assert_eq!(per_call.call(vec![1, 2]), Ok(vec![1, 2]));
//! assert_eq!(per_call.call(vec![1, 2]), Ok(vec![1, 2]));
//!
//! // Cross-call scope
//! let mut seen = Deduplicator::new();
//! let mut across = CallLimiter::wrap(move |v: Vec<u8>| seen.apply(v), 3).unwrap();
//! assert_eq!(across.call_mut(vec![1, 2]), Ok(vec![1, 2]));
//! assert_eq!(across.call_mut(vec![1, 2]), Ok(vec![]));
//! ```
//!
//! ## Progress Notifications
//!
//! Every accepted call emits an `INFO` event on the `call_dedup::limiter`
//! target carrying `function`, `call` and `max_calls` fields; a refused call
//! emits a `WARN`. Install any `tracing` subscriber to see them, or turn them
//! off per limiter with `with_notifications(false)`.
//!
//! ## Thread Safety
//!
//! Neither type synchronizes its state. `CallLimiter` keeps its counter in a
//! `Cell` and is not `Sync`.

// Domain layer - pure state
pub mod domain;

// Application layer - function wrappers
pub mod application;

// Infrastructure layer - tracing adapters and test doubles
pub mod infrastructure;

pub use domain::{
    budget::{BudgetDecision, CallBudget},
    dedup::{dedup_once, DedupMode, Deduplicator},
    error::{BuildError, LimitExceeded},
};

pub use application::{
    limiter::{CallLimiter, CallLimiterBuilder, RecursiveLimiter, NOTIFICATION_TARGET},
    stats::CallStats,
};
