//! Error types.

use std::borrow::Cow;

/// Returned by a limited function once its maximum number of calls is used up.
///
/// The wrapped function was not invoked for the call that produced this error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitExceeded {
    function: Cow<'static, str>,
    max_calls: usize,
}

impl LimitExceeded {
    pub(crate) fn new(function: Cow<'static, str>, max_calls: usize) -> Self {
        Self {
            function,
            max_calls,
        }
    }

    /// Identity of the limited function.
    pub fn function(&self) -> &str {
        &self.function
    }

    /// The maximum number of accepted calls that was configured.
    pub fn max_calls(&self) -> usize {
        self.max_calls
    }
}

impl std::fmt::Display for LimitExceeded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "function {} was called more than {} times",
            self.function, self.max_calls
        )
    }
}

impl std::error::Error for LimitExceeded {}

/// Error returned when limiter configuration validation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// Maximum calls must be greater than zero
    ZeroMaxCalls,
    /// No maximum was configured on the builder
    MissingMaxCalls,
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::ZeroMaxCalls => write!(f, "max_calls must be greater than 0"),
            BuildError::MissingMaxCalls => write!(f, "max_calls must be set before build"),
        }
    }
}

impl std::error::Error for BuildError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_exceeded_fields_and_message() {
        let err = LimitExceeded::new(Cow::Borrowed("multiply"), 2);

        assert_eq!(err.function(), "multiply");
        assert_eq!(err.max_calls(), 2);
        assert_eq!(
            err.to_string(),
            "function multiply was called more than 2 times"
        );
    }

    #[test]
    fn test_build_error_display() {
        assert_eq!(
            BuildError::ZeroMaxCalls.to_string(),
            "max_calls must be greater than 0"
        );
        assert_eq!(
            BuildError::MissingMaxCalls.to_string(),
            "max_calls must be set before build"
        );
    }

    #[test]
    fn test_errors_box_into_dyn_error() {
        let boxed: Box<dyn std::error::Error> = Box::new(LimitExceeded::new("f".into(), 1));
        assert!(boxed.to_string().contains("more than 1"));
    }
}
