//! Per-limiter call accounting.

use crate::domain::budget::{BudgetDecision, CallBudget};
use std::cell::Cell;

/// Interior-mutable budget plus a tally of rejected attempts.
///
/// `Cell` keeps the limiter callable through `&self`, which recursive
/// functions need to re-enter it. This makes the owner `!Sync`.
#[derive(Debug)]
pub(crate) struct CallCounters {
    budget: Cell<CallBudget>,
    rejected: Cell<u64>,
}

impl CallCounters {
    pub(crate) fn new(budget: CallBudget) -> Self {
        Self {
            budget: Cell::new(budget),
            rejected: Cell::new(0),
        }
    }

    /// Register an attempt, updating the rejected tally on refusal.
    pub(crate) fn register_call(&self) -> BudgetDecision {
        let mut budget = self.budget.get();
        let decision = budget.register_call();
        match decision {
            BudgetDecision::Accept { .. } => self.budget.set(budget),
            BudgetDecision::Reject => self.rejected.set(self.rejected.get().saturating_add(1)),
        }
        decision
    }

    pub(crate) fn budget(&self) -> CallBudget {
        self.budget.get()
    }

    pub(crate) fn snapshot(&self) -> CallStats {
        let budget = self.budget.get();
        CallStats {
            accepted: budget.calls(),
            rejected: self.rejected.get(),
            max_calls: budget.max_calls(),
        }
    }
}

/// A point-in-time snapshot of a limiter's calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallStats {
    /// Calls that ran the wrapped function
    pub accepted: usize,
    /// Attempts refused with `LimitExceeded`
    pub rejected: u64,
    /// Configured maximum
    pub max_calls: usize,
}

impl CallStats {
    /// Total attempts, accepted or not.
    pub fn attempts(&self) -> u64 {
        (self.accepted as u64).saturating_add(self.rejected)
    }

    /// Calculate the rejection rate (0.0 to 1.0).
    ///
    /// Returns 0.0 if nothing has been attempted.
    pub fn rejection_rate(&self) -> f64 {
        let total = self.attempts();
        if total == 0 {
            0.0
        } else {
            self.rejected as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_track_accepts_and_rejects() {
        let counters = CallCounters::new(CallBudget::new(2).unwrap());

        assert!(counters.register_call().is_accept());
        assert!(counters.register_call().is_accept());
        assert!(counters.register_call().is_reject());
        assert!(counters.register_call().is_reject());

        let stats = counters.snapshot();
        assert_eq!(stats.accepted, 2);
        assert_eq!(stats.rejected, 2);
        assert_eq!(stats.max_calls, 2);
        assert_eq!(stats.attempts(), 4);
        assert_eq!(counters.budget().calls(), 2);
    }

    #[test]
    fn test_rejection_rate() {
        let stats = CallStats {
            accepted: 3,
            rejected: 1,
            max_calls: 3,
        };
        assert!((stats.rejection_rate() - 0.25).abs() < f64::EPSILON);

        let idle = CallStats {
            accepted: 0,
            rejected: 0,
            max_calls: 3,
        };
        assert_eq!(idle.rejection_rate(), 0.0);
    }
}
