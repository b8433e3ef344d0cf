//! The boundary between the model layer and a 0/1 integer linear solver.
//!
//! A backend implements [`SolverAdapter`]: it receives an immutable
//! [`IntegerProgram`](crate::model::IntegerProgram) together with [`SolveOptions`], and reports a
//! [`SolverOutcome`]. Every call is independent; an adapter keeps no model between calls.
//!
//! The crate ships two backends: [`HighsBackend`], which is the default, and the self-contained
//! [`BranchAndBound`] search.
pub mod branch_and_bound;
mod highs;
pub mod termination;

use std::fmt::Display;
use std::time::Duration;

pub use branch_and_bound::BranchAndBound;
pub use branch_and_bound::BranchAndBoundOptions;
pub use branch_and_bound::SearchStatistics;
pub use highs::HighsBackend;
use thiserror::Error;

use crate::containers::KeyedVec;
use crate::model::IntegerProgram;
use crate::model::VariableId;

/// Options which are passed to the backend for a single solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolveOptions {
    /// The wall-clock budget. When it runs out the backend reports its best solution so far.
    pub time_limit: Duration,
    /// The seed of the backend's pseudo-random number generator.
    ///
    /// When `None` a fresh seed is drawn for every solve, so repeated solves of the same program
    /// may report different (equally good) solutions. Runs are only reproducible with a fixed seed
    /// and the same backend version.
    pub random_seed: Option<u64>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(60),
            random_seed: None,
        }
    }
}

/// A generic solver for 0/1 integer linear minimisation programs.
pub trait SolverAdapter {
    /// Minimise the objective of `program` subject to its constraints.
    fn solve(&mut self, program: &IntegerProgram, options: &SolveOptions) -> SolverOutcome;
}

/// The error every backend reports for a program whose objective has a non-finite weight.
pub(crate) fn non_finite_objective(program: &IntegerProgram) -> Option<BackendError> {
    program
        .objective()
        .terms()
        .iter()
        .find(|term| !term.weight.is_finite())
        .map(|term| BackendError::NonFiniteObjective {
            variable: program.variable_name(term.variable).to_owned(),
            weight: term.weight,
        })
}

/// The value the backend assigned to every variable of a program, and the objective value it
/// reported.
#[derive(Clone, Debug, PartialEq)]
pub struct RawSolution {
    values: KeyedVec<VariableId, f64>,
    objective_value: f64,
}

impl RawSolution {
    pub fn new(values: KeyedVec<VariableId, f64>, objective_value: f64) -> Self {
        Self {
            values,
            objective_value,
        }
    }

    pub fn num_values(&self) -> usize {
        self.values.len()
    }

    /// The value of `variable`; values of binary variables lie in {0, 1} up to solver tolerance.
    pub fn value(&self, variable: VariableId) -> f64 {
        self.values[variable]
    }

    pub fn values(&self) -> &KeyedVec<VariableId, f64> {
        &self.values
    }

    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }
}

/// What a backend concluded about a program.
#[derive(Clone, Debug, PartialEq)]
pub enum SolverOutcome {
    /// The solution is proven optimal.
    Optimal(RawSolution),
    /// The time budget ran out; the solution is the best one found, without optimality proof.
    FeasibleWithinTimeLimit(RawSolution),
    /// The program has no solution, or the time budget ran out before one was found.
    Infeasible,
    /// The backend failed.
    Error(BackendError),
}

impl SolverOutcome {
    pub fn status(&self) -> SolveStatus {
        match self {
            SolverOutcome::Optimal(_) => SolveStatus::Optimal,
            SolverOutcome::FeasibleWithinTimeLimit(_) => SolveStatus::FeasibleWithinTimeLimit,
            SolverOutcome::Infeasible => SolveStatus::Infeasible,
            SolverOutcome::Error(_) => SolveStatus::Error,
        }
    }

    pub fn solution(&self) -> Option<&RawSolution> {
        match self {
            SolverOutcome::Optimal(solution) | SolverOutcome::FeasibleWithinTimeLimit(solution) => {
                Some(solution)
            }
            SolverOutcome::Infeasible | SolverOutcome::Error(_) => None,
        }
    }
}

/// The termination status of a solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    Optimal,
    FeasibleWithinTimeLimit,
    Infeasible,
    Error,
}

impl SolveStatus {
    /// Whether a solve with this status carries a solution.
    pub fn has_solution(self) -> bool {
        matches!(
            self,
            SolveStatus::Optimal | SolveStatus::FeasibleWithinTimeLimit
        )
    }
}

impl Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "optimal"),
            SolveStatus::FeasibleWithinTimeLimit => write!(f, "feasible (time limit reached)"),
            SolveStatus::Infeasible => write!(f, "infeasible"),
            SolveStatus::Error => write!(f, "error"),
        }
    }
}

/// A failure of the backend. Failures are fatal to the solve in which they occur.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BackendError {
    #[error("the objective weight of {variable} is {weight}, which is not finite")]
    NonFiniteObjective { variable: String, weight: f64 },
    #[error("the backend reported {actual} values for a program with {expected} variables")]
    SolutionSizeMismatch { expected: usize, actual: usize },
    #[error("the backend failed: {0}")]
    Other(String),
}
