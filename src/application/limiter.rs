//! Call-count limiting wrappers.
//!
//! A [`CallLimiter`] owns a function and a [`CallBudget`]. Each accepted call
//! emits a progress notification and runs the function; once the budget is
//! used up, calls return [`LimitExceeded`] without running it.
//!
//! Arguments travel as a single value. Use a tuple for several arguments.

use crate::application::stats::{CallCounters, CallStats};
use crate::domain::{
    budget::{BudgetDecision, CallBudget},
    error::{BuildError, LimitExceeded},
};
use std::borrow::Cow;
use std::fmt;
use tracing::{info, warn};

/// Target used for progress notifications and rejections.
pub const NOTIFICATION_TARGET: &str = "call_dedup::limiter";

/// Admission control shared by the plain and recursive limiters.
#[derive(Debug)]
struct Gate {
    name: Cow<'static, str>,
    counters: CallCounters,
    notify: bool,
}

impl Gate {
    fn admit(&self) -> Result<usize, LimitExceeded> {
        let max_calls = self.counters.budget().max_calls();
        match self.counters.register_call() {
            BudgetDecision::Accept { call } => {
                if self.notify {
                    info!(
                        target: NOTIFICATION_TARGET,
                        function = %self.name,
                        call,
                        max_calls,
                        "call {}/{} of {}",
                        call,
                        max_calls,
                        self.name
                    );
                }
                Ok(call)
            }
            BudgetDecision::Reject => {
                if self.notify {
                    warn!(
                        target: NOTIFICATION_TARGET,
                        function = %self.name,
                        max_calls,
                        "call to {} rejected: limit reached",
                        self.name
                    );
                }
                Err(LimitExceeded::new(self.name.clone(), max_calls))
            }
        }
    }

    fn budget(&self) -> CallBudget {
        self.counters.budget()
    }
}

/// A function wrapped with a maximum number of accepted calls.
///
/// Wrapping the same function twice gives two independent counters.
///
/// # Example
/// ```
/// use call_dedup::CallLimiter;
///
/// fn multiply((a, b): (i64, i64)) -> i64 {
///     a * b
/// }
///
/// let limited = CallLimiter::wrap(multiply, 2).unwrap();
///
/// assert_eq!(limited.call((2, 3)), Ok(6));
/// assert_eq!(limited.call((4, 5)), Ok(20));
///
/// let err = limited.call((6, 7)).unwrap_err();
/// assert_eq!(err.max_calls(), 2);
/// ```
pub struct CallLimiter<F> {
    func: F,
    gate: Gate,
}

impl<F> CallLimiter<F> {
    /// Wrap `func`, allowing `max_calls` accepted calls.
    ///
    /// The function's identity defaults to its type name; use
    /// [`CallLimiter::builder`] to set one explicitly.
    ///
    /// # Errors
    /// Returns `BuildError::ZeroMaxCalls` if `max_calls` is zero.
    pub fn wrap(func: F, max_calls: usize) -> Result<Self, BuildError> {
        Self::builder(func).with_max_calls(max_calls).build()
    }

    /// Wrap a function whose recursive calls go back through the limiter.
    ///
    /// See [`RecursiveLimiter`].
    ///
    /// # Errors
    /// Returns `BuildError::ZeroMaxCalls` if `max_calls` is zero.
    pub fn wrap_recursive(func: F, max_calls: usize) -> Result<RecursiveLimiter<F>, BuildError> {
        Self::builder(func).with_max_calls(max_calls).build_recursive()
    }

    /// Start configuring a limiter around `func`.
    pub fn builder(func: F) -> CallLimiterBuilder<F> {
        CallLimiterBuilder::new(func)
    }

    /// Call the wrapped function if the budget allows it.
    ///
    /// # Errors
    /// Returns `LimitExceeded` once `max_calls` calls have been accepted. The
    /// wrapped function is not invoked and the count does not change.
    pub fn call<A, R>(&self, args: A) -> Result<R, LimitExceeded>
    where
        F: Fn(A) -> R,
    {
        self.gate.admit()?;
        Ok((self.func)(args))
    }

    /// Like [`CallLimiter::call`], for functions that mutate captured state.
    ///
    /// # Errors
    /// Same as [`CallLimiter::call`].
    pub fn call_mut<A, R>(&mut self, args: A) -> Result<R, LimitExceeded>
    where
        F: FnMut(A) -> R,
    {
        self.gate.admit()?;
        Ok((self.func)(args))
    }

    /// Turn the limiter into a plain closure.
    pub fn into_fn<A, R>(mut self) -> impl FnMut(A) -> Result<R, LimitExceeded>
    where
        F: FnMut(A) -> R,
    {
        move |args| self.call_mut(args)
    }

    /// Identity reported in notifications and errors.
    pub fn name(&self) -> &str {
        &self.gate.name
    }

    /// The configured maximum.
    pub fn max_calls(&self) -> usize {
        self.gate.budget().max_calls()
    }

    /// Accepted calls so far.
    pub fn calls(&self) -> usize {
        self.gate.budget().calls()
    }

    /// Calls still available.
    pub fn remaining(&self) -> usize {
        self.gate.budget().remaining()
    }

    /// True once every call in the budget has been used.
    pub fn is_exhausted(&self) -> bool {
        self.gate.budget().is_exhausted()
    }

    /// Snapshot of accepted and rejected calls.
    pub fn stats(&self) -> CallStats {
        self.gate.counters.snapshot()
    }
}

impl<F> fmt::Debug for CallLimiter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallLimiter")
            .field("name", &self.gate.name)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

/// A limited function that can call itself through the limiter.
///
/// The function receives a re-entry handle as its first argument. Every call
/// through that handle counts against the same budget, so a recursion of depth
/// N consumes N calls.
///
/// # Example
/// ```
/// use call_dedup::{CallLimiter, LimitExceeded};
///
/// let factorial = CallLimiter::builder(
///     |recur: &dyn Fn(u64) -> Result<u64, LimitExceeded>, n: u64| -> Result<u64, LimitExceeded> {
///         if n <= 1 {
///             Ok(1)
///         } else {
///             Ok(n * recur(n - 1)?)
///         }
///     },
/// )
/// .with_name("factorial")
/// .with_max_calls(5)
/// .build_recursive()
/// .unwrap();
///
/// assert_eq!(factorial.call(3), Ok(6));
/// assert_eq!(factorial.calls(), 3);
/// assert!(factorial.call(4).is_err());
/// ```
pub struct RecursiveLimiter<F> {
    func: F,
    gate: Gate,
}

impl<F> RecursiveLimiter<F> {
    /// Call the wrapped function if the budget allows it.
    ///
    /// # Errors
    /// Returns `LimitExceeded` if this call, or any nested call made through the
    /// re-entry handle, finds the budget used up.
    pub fn call<A, R>(&self, args: A) -> Result<R, LimitExceeded>
    where
        F: Fn(&dyn Fn(A) -> Result<R, LimitExceeded>, A) -> Result<R, LimitExceeded>,
    {
        self.gate.admit()?;
        let recur: &dyn Fn(A) -> Result<R, LimitExceeded> = &|next: A| self.call::<A, R>(next);
        (self.func)(recur, args)
    }

    /// Identity reported in notifications and errors.
    pub fn name(&self) -> &str {
        &self.gate.name
    }

    /// The configured maximum.
    pub fn max_calls(&self) -> usize {
        self.gate.budget().max_calls()
    }

    /// Accepted calls so far, nested ones included.
    pub fn calls(&self) -> usize {
        self.gate.budget().calls()
    }

    /// Snapshot of accepted and rejected calls.
    pub fn stats(&self) -> CallStats {
        self.gate.counters.snapshot()
    }
}

impl<F> fmt::Debug for RecursiveLimiter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecursiveLimiter")
            .field("name", &self.gate.name)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a [`CallLimiter`] or [`RecursiveLimiter`].
pub struct CallLimiterBuilder<F> {
    func: F,
    name: Option<Cow<'static, str>>,
    max_calls: Option<usize>,
    notify: bool,
}

impl<F> CallLimiterBuilder<F> {
    fn new(func: F) -> Self {
        Self {
            func,
            name: None,
            max_calls: None,
            notify: true,
        }
    }

    /// Set the identity used in notifications and errors.
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the maximum number of accepted calls.
    pub fn with_max_calls(mut self, max_calls: usize) -> Self {
        self.max_calls = Some(max_calls);
        self
    }

    /// Enable or disable progress notifications (enabled by default).
    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.notify = enabled;
        self
    }

    fn into_parts(self) -> Result<(F, Gate), BuildError> {
        let max_calls = self.max_calls.ok_or(BuildError::MissingMaxCalls)?;
        let budget = CallBudget::new(max_calls)?;
        let name = self
            .name
            .unwrap_or(Cow::Borrowed(std::any::type_name::<F>()));

        Ok((
            self.func,
            Gate {
                name,
                counters: CallCounters::new(budget),
                notify: self.notify,
            },
        ))
    }

    /// Build the limiter.
    ///
    /// # Errors
    /// Returns `BuildError` if `max_calls` is missing or zero.
    pub fn build(self) -> Result<CallLimiter<F>, BuildError> {
        let (func, gate) = self.into_parts()?;
        Ok(CallLimiter { func, gate })
    }

    /// Build a limiter for a self-recursive function.
    ///
    /// # Errors
    /// Returns `BuildError` if `max_calls` is missing or zero.
    pub fn build_recursive(self) -> Result<RecursiveLimiter<F>, BuildError> {
        let (func, gate) = self.into_parts()?;
        Ok(RecursiveLimiter { func, gate })
    }
}
