//! Conditions which end a search before it reaches a conclusion.
//!
//! The search polls its [`TerminationCondition`] before every decision. Conditions compose: an
//! `Option` of a condition never stops when absent, and a pair stops as soon as either member
//! does.
use std::time::Duration;
use std::time::Instant;

pub trait TerminationCondition {
    /// Returns `true` when the search should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;

    /// Called by the search after every decision.
    fn decision_has_been_made(&mut self) {}
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        self.as_mut().is_some_and(T::should_stop)
    }

    fn decision_has_been_made(&mut self) {
        if let Some(condition) = self {
            condition.decision_has_been_made();
        }
    }
}

impl<A: TerminationCondition, B: TerminationCondition> TerminationCondition for (A, B) {
    fn should_stop(&mut self) -> bool {
        // Both are polled so that neither misses a poll.
        let first = self.0.should_stop();
        let second = self.1.should_stop();
        first || second
    }

    fn decision_has_been_made(&mut self) {
        self.0.decision_has_been_made();
        self.1.decision_has_been_made();
    }
}

/// Stops once a wall-clock budget, measured from its creation, has elapsed.
#[derive(Clone, Copy, Debug)]
pub struct TimeBudget {
    deadline: Option<Instant>,
}

impl TimeBudget {
    pub fn starting_now(budget: Duration) -> TimeBudget {
        // A budget too large to represent as an instant never runs out.
        TimeBudget {
            deadline: Instant::now().checked_add(budget),
        }
    }
}

impl TerminationCondition for TimeBudget {
    fn should_stop(&mut self) -> bool {
        self.deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Stops once the search has made a given number of decisions.
#[derive(Clone, Copy, Debug)]
pub struct DecisionBudget {
    remaining: u64,
}

impl DecisionBudget {
    pub fn new(budget: u64) -> Self {
        DecisionBudget { remaining: budget }
    }
}

impl TerminationCondition for DecisionBudget {
    fn should_stop(&mut self) -> bool {
        self.remaining == 0
    }

    fn decision_has_been_made(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_time_budget_stops_immediately() {
        let mut termination = TimeBudget::starting_now(Duration::ZERO);
        assert!(termination.should_stop());
    }

    #[test]
    fn generous_time_budget_does_not_stop() {
        let mut termination = TimeBudget::starting_now(Duration::from_secs(3600));
        assert!(!termination.should_stop());

        let mut unbounded = TimeBudget::starting_now(Duration::MAX);
        assert!(!unbounded.should_stop());
    }

    #[test]
    fn decision_budget_counts_decisions() {
        let mut termination = DecisionBudget::new(2);
        assert!(!termination.should_stop());

        termination.decision_has_been_made();
        assert!(!termination.should_stop());

        termination.decision_has_been_made();
        assert!(termination.should_stop());
    }

    #[test]
    fn pair_stops_when_either_member_stops() {
        let mut termination = (DecisionBudget::new(2), DecisionBudget::new(1));
        assert!(!termination.should_stop());

        termination.decision_has_been_made();
        assert!(termination.should_stop());
    }

    #[test]
    fn absent_condition_never_stops() {
        let mut termination = (DecisionBudget::new(1), None::<DecisionBudget>);
        assert!(!termination.should_stop());

        termination.decision_has_been_made();
        assert!(termination.should_stop());

        let mut absent = None::<DecisionBudget>;
        absent.decision_has_been_made();
        assert!(!absent.should_stop());
    }
}
