//! Call budgets.
//!
//! A [`CallBudget`] allows up to N calls and then refuses every further one.
//! Unlike a counter that keeps ticking, a refused call leaves the budget
//! untouched: the count freezes at the maximum.

use crate::domain::error::BuildError;

/// Decision made by a call budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetDecision {
    /// The call is accepted; carries its 1-based ordinal.
    Accept {
        /// Number of accepted calls including this one
        call: usize,
    },
    /// The maximum has been reached; the call must not run.
    Reject,
}

impl BudgetDecision {
    /// Check if this decision is Accept.
    pub fn is_accept(&self) -> bool {
        matches!(self, BudgetDecision::Accept { .. })
    }

    /// Check if this decision is Reject.
    pub fn is_reject(&self) -> bool {
        matches!(self, BudgetDecision::Reject)
    }
}

/// Counter of accepted calls bounded by a fixed maximum.
///
/// # Example
/// ```
/// use call_dedup::CallBudget;
///
/// let mut budget = CallBudget::new(2).unwrap();
///
/// assert!(budget.register_call().is_accept());
/// assert!(budget.register_call().is_accept());
/// assert!(budget.register_call().is_reject());
/// assert_eq!(budget.calls(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallBudget {
    max_calls: usize,
    calls: usize,
}

impl CallBudget {
    /// Create a budget allowing `max_calls` calls.
    ///
    /// # Errors
    /// Returns `BuildError::ZeroMaxCalls` if `max_calls` is zero.
    pub fn new(max_calls: usize) -> Result<Self, BuildError> {
        if max_calls == 0 {
            return Err(BuildError::ZeroMaxCalls);
        }
        Ok(Self {
            max_calls,
            calls: 0,
        })
    }

    /// Register a call attempt.
    ///
    /// Increments the count only when the call is accepted.
    pub fn register_call(&mut self) -> BudgetDecision {
        if self.calls >= self.max_calls {
            return BudgetDecision::Reject;
        }
        self.calls += 1;
        BudgetDecision::Accept { call: self.calls }
    }

    /// Number of accepted calls so far.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// The configured maximum.
    pub fn max_calls(&self) -> usize {
        self.max_calls
    }

    /// Calls still available.
    pub fn remaining(&self) -> usize {
        self.max_calls - self.calls
    }

    /// True once every call in the budget has been used.
    pub fn is_exhausted(&self) -> bool {
        self.calls >= self.max_calls
    }
}
