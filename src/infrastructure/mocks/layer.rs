//! Mock tracing layer for testing.

use std::sync::{Arc, Mutex, MutexGuard};
use tracing::field::{Field, Visit};
use tracing::Level;
use tracing_subscriber::Layer;

/// Mock layer that captures limiter notifications for testing.
///
/// Events on other targets are ignored.
#[derive(Clone, Default)]
pub struct MockCaptureLayer {
    captured: Arc<Mutex<Vec<CapturedNotification>>>,
}

/// A captured limiter notification.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct CapturedNotification {
    pub level: Level,
    pub message: String,
    pub function: Option<String>,
    pub call: Option<u64>,
    pub max_calls: Option<u64>,
}

impl MockCaptureLayer {
    /// Create a new mock capture layer.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CapturedNotification>> {
        self.captured.lock().expect(
            "MockCaptureLayer mutex poisoned - a test thread panicked while holding the lock",
        )
    }

    /// Get all captured notifications.
    pub fn get_captured(&self) -> Vec<CapturedNotification> {
        self.lock().clone()
    }

    /// Get the count of captured notifications.
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Count captured notifications at the given level.
    pub fn count_at(&self, level: Level) -> usize {
        self.lock().iter().filter(|n| n.level == level).count()
    }

    /// Clear all captured notifications.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl<S> Layer<S> for MockCaptureLayer
where
    S: tracing::Subscriber,
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        if event.metadata().target() != crate::application::limiter::NOTIFICATION_TARGET {
            return;
        }

        let mut visitor = NotificationVisitor::default();
        event.record(&mut visitor);

        self.lock().push(CapturedNotification {
            level: *event.metadata().level(),
            message: visitor.message,
            function: visitor.function,
            call: visitor.call,
            max_calls: visitor.max_calls,
        });
    }
}

#[derive(Default)]
struct NotificationVisitor {
    message: String,
    function: Option<String>,
    call: Option<u64>,
    max_calls: Option<u64>,
}

impl Visit for NotificationVisitor {
    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "call" => self.call = Some(value),
            "max_calls" => self.max_calls = Some(value),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{:?}", value),
            // `%` fields arrive as Display wrapped in Debug
            "function" => self.function = Some(format!("{:?}", value)),
            _ => {}
        }
    }
}
