//! Mock implementations for testing.
//!
//! Test doubles for observing what the limiter reports.

pub mod layer;

pub use layer::{CapturedNotification, MockCaptureLayer};
