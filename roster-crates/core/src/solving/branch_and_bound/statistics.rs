use std::fmt::Display;

use log::info;

/// Counters collected during a single branch-and-bound search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    pub num_decisions: u64,
    pub num_conflicts: u64,
    pub num_restarts: u64,
    pub num_solutions: u64,
}

impl SearchStatistics {
    pub fn log(&self) {
        info!(
            "search statistics: decisions={} conflicts={} restarts={} solutions={}",
            self.num_decisions, self.num_conflicts, self.num_restarts, self.num_solutions
        );
    }
}

impl Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "numberOfDecisions={}", self.num_decisions)?;
        writeln!(f, "numberOfConflicts={}", self.num_conflicts)?;
        writeln!(f, "numberOfRestarts={}", self.num_restarts)?;
        write!(f, "numberOfSolutions={}", self.num_solutions)
    }
}
