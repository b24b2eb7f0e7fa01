//! Domain layer - pure state with no logging and no I/O.
//!
//! - Seen-value deduplication
//! - Call budgets (bounded accepted-call counters)
//! - Error types
//!
//! All types in this layer are plain data and easily testable.

pub mod budget;
pub mod dedup;
pub mod error;
