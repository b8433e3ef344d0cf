//! A backend which hands programs to the HiGHS mixed-integer solver through `good_lp`.
//!
//! HiGHS bounds the objective with the LP relaxation of the program, so unlike
//! [`BranchAndBound`](super::BranchAndBound) it can prove optimality of larger schedules. The
//! solver runs single-threaded with the seed of the [`SolveOptions`], which makes a run with a fixed
//! seed reproducible up to the time limit.
use std::time::Instant;

use good_lp::constraint;
use good_lp::solvers::highs::highs;
use good_lp::variable;
use good_lp::Expression;
use good_lp::ProblemVariables;
use good_lp::ResolutionError;
use good_lp::Solution;
use good_lp::SolverModel;
use good_lp::Variable;
use log::debug;
use log::info;
use log::warn;

use super::non_finite_objective;
use super::BackendError;
use super::RawSolution;
use super::SolveOptions;
use super::SolverAdapter;
use super::SolverOutcome;
use crate::containers::KeyedVec;
use crate::model::IntegerProgram;
use crate::model::Relation;
use crate::model::VariableId;

/// HiGHS accepts seeds in `0..=i32::MAX`.
const SEED_MODULUS: u64 = 1 << 31;

/// The default [`SolverAdapter`], backed by HiGHS.
#[derive(Clone, Copy, Debug, Default)]
pub struct HighsBackend;

impl SolverAdapter for HighsBackend {
    fn solve(&mut self, program: &IntegerProgram, options: &SolveOptions) -> SolverOutcome {
        if let Some(error) = non_finite_objective(program) {
            return SolverOutcome::Error(error);
        }

        let seed = options.random_seed.unwrap_or_else(rand::random);
        info!("HiGHS uses random seed {seed}");

        let mut problem = ProblemVariables::new();
        let variables = program
            .variables()
            .map(|_| problem.add(variable().binary()))
            .collect::<KeyedVec<VariableId, Variable>>();

        if variables.is_empty() {
            return SolverOutcome::Optimal(RawSolution::new(KeyedVec::default(), 0.0));
        }
        if options.time_limit.is_zero() {
            warn!("The time limit is zero, HiGHS is not started");
            return SolverOutcome::Infeasible;
        }

        let mut objective = Expression::with_capacity(program.objective().terms().len());
        for term in program.objective().terms() {
            objective.add_mul(term.weight, variables[term.variable]);
        }

        let mut model = problem
            .minimise(objective)
            .using(highs)
            .set_option("threads", 1)
            .set_option("random_seed", i32::try_from(seed % SEED_MODULUS).unwrap_or_default())
            .set_option("time_limit", options.time_limit.as_secs_f64())
            .set_option("mip_rel_gap", 0.0)
            .set_option("output_flag", false);

        for linear in program.constraints() {
            let lhs = linear
                .terms()
                .iter()
                .map(|term| f64::from(term.coefficient) * variables[term.variable])
                .sum::<Expression>();
            let rhs = f64::from(linear.rhs());

            let _ = model.add_constraint(match linear.relation() {
                Relation::LessOrEqual => constraint!(lhs <= rhs),
                Relation::Equal => constraint!(lhs == rhs),
                Relation::GreaterOrEqual => constraint!(lhs >= rhs),
            });
        }

        debug!(
            "Handing {} variables and {} constraints to HiGHS",
            program.num_variables(),
            program.num_constraints()
        );

        let started = Instant::now();
        let solution = match model.solve() {
            Ok(solution) => solution,
            Err(ResolutionError::Infeasible) => return SolverOutcome::Infeasible,
            Err(error) => return SolverOutcome::Error(BackendError::Other(error.to_string())),
        };
        let elapsed = started.elapsed();

        let values = variables
            .iter()
            .map(|&variable| solution.value(variable))
            .collect::<KeyedVec<VariableId, f64>>();

        // When the time limit interrupts HiGHS before it found an incumbent, the reported values
        // are not a solution.
        if program.violated_constraints(&values).next().is_some() {
            warn!("HiGHS stopped after {elapsed:?} without a feasible solution");
            return SolverOutcome::Infeasible;
        }

        let objective_value = program
            .objective()
            .evaluate(|variable| if values[variable] >= 0.5 { 1.0 } else { 0.0 });
        info!("HiGHS found a solution with objective {objective_value} in {elapsed:?}");

        let solution = RawSolution::new(values, objective_value);
        if elapsed >= options.time_limit {
            SolverOutcome::FeasibleWithinTimeLimit(solution)
        } else {
            SolverOutcome::Optimal(solution)
        }
    }
}
