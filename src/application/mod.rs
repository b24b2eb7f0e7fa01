//! Application layer - wrapping functions with domain state.
//!
//! - Call limiter (admission, progress notifications, recursion)
//! - Call statistics

pub mod limiter;
pub mod stats;
