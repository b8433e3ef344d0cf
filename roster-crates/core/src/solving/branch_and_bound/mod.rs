//! A complete depth-first branch-and-bound search for 0/1 integer linear programs.
//!
//! Constraints are propagated by slack over the partial assignment and every solution tightens an
//! upper bound on the objective, so each subsequent solution is strictly better than the last
//! (upper-bounding search). The search restarts on a geometric schedule; a run which exhausts the
//! search tree proves the incumbent optimal, or the program infeasible when there is none.
mod assignments;
mod brancher;
mod propagation;
mod statistics;

use std::time::Instant;

use log::debug;
use log::info;
use log::warn;
use rand::rngs::SmallRng;
use rand::SeedableRng;
pub use statistics::SearchStatistics;

use self::assignments::Assignments;
use self::brancher::InputOrderBrancher;
use self::propagation::PropagationEngine;
use super::non_finite_objective;
use super::termination::DecisionBudget;
use super::termination::TerminationCondition;
use super::termination::TimeBudget;
use super::RawSolution;
use super::SolveOptions;
use super::SolverAdapter;
use super::SolverOutcome;
use crate::basic_types::sequence_generators::GeometricSequence;
use crate::basic_types::sequence_generators::SequenceGenerator;
use crate::basic_types::Random;
use crate::model::IntegerProgram;
use crate::model::VariableId;
use crate::roster_assert_moderate;

/// Options which control the search of [`BranchAndBound`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BranchAndBoundOptions {
    /// The number of conflicts before the first restart.
    pub restart_base_interval: u64,
    /// The factor by which the restart interval grows after every restart.
    pub restart_growth: f64,
    /// Stop after this many decisions, in addition to the time limit.
    pub decision_budget: Option<u64>,
}

impl Default for BranchAndBoundOptions {
    fn default() -> Self {
        Self {
            restart_base_interval: 100,
            restart_growth: 1.5,
            decision_budget: None,
        }
    }
}

/// A [`SolverAdapter`] which needs no external solver.
#[derive(Clone, Debug, Default)]
pub struct BranchAndBound {
    options: BranchAndBoundOptions,
    statistics: Option<SearchStatistics>,
}

impl BranchAndBound {
    pub fn new(options: BranchAndBoundOptions) -> Self {
        Self {
            options,
            statistics: None,
        }
    }

    /// The statistics of the most recent solve, if any.
    pub fn statistics(&self) -> Option<SearchStatistics> {
        self.statistics
    }
}

impl SolverAdapter for BranchAndBound {
    fn solve(&mut self, program: &IntegerProgram, options: &SolveOptions) -> SolverOutcome {
        self.statistics = None;

        if let Some(error) = non_finite_objective(program) {
            return SolverOutcome::Error(error);
        }

        let seed = options.random_seed.unwrap_or_else(rand::random);
        info!("branch and bound uses random seed {seed}");

        let termination = (
            TimeBudget::starting_now(options.time_limit),
            self.options.decision_budget.map(DecisionBudget::new),
        );

        let mut search = Search::new(
            program,
            self.options,
            InputOrderBrancher::new(SmallRng::seed_from_u64(seed)),
        );
        let outcome = search.run(termination);

        search.statistics.log();
        self.statistics = Some(search.statistics);

        outcome
    }
}

/// How a run of the search ended.
enum Conclusion {
    /// The whole search tree was explored.
    Exhausted,
    /// The termination condition fired.
    Interrupted,
}

/// The state of a single solve.
struct Search<'a, R> {
    program: &'a IntegerProgram,
    assignments: Assignments,
    engine: PropagationEngine,
    brancher: InputOrderBrancher<R>,
    /// The decisions on the current branch, one per decision level.
    decisions: Vec<(VariableId, bool)>,
    incumbent: Option<RawSolution>,
    restarts: GeometricSequence,
    conflicts_until_restart: u64,
    statistics: SearchStatistics,
}

impl<'a, R: Random> Search<'a, R> {
    fn new(
        program: &'a IntegerProgram,
        options: BranchAndBoundOptions,
        brancher: InputOrderBrancher<R>,
    ) -> Self {
        let mut restarts = GeometricSequence::new(
            options.restart_base_interval.max(1),
            options.restart_growth.max(1.0),
        );
        let conflicts_until_restart = restarts.next();

        Search {
            program,
            assignments: Assignments::new(program.num_variables()),
            engine: PropagationEngine::new(program),
            brancher,
            decisions: Vec::new(),
            incumbent: None,
            restarts,
            conflicts_until_restart,
            statistics: SearchStatistics::default(),
        }
    }

    fn run(&mut self, mut termination: impl TerminationCondition) -> SolverOutcome {
        let started_at = Instant::now();
        debug!(
            "starting branch and bound over {} variables and {} normalised constraints",
            self.program.num_variables(),
            self.engine.num_constraints()
        );

        let conclusion = if self.engine.propagate_all(&mut self.assignments).is_err() {
            Conclusion::Exhausted
        } else {
            self.search(&mut termination)
        };

        let elapsed = started_at.elapsed();
        match (conclusion, self.incumbent.take()) {
            (Conclusion::Exhausted, Some(solution)) => {
                info!(
                    "proved optimality of objective {} in {elapsed:?}",
                    solution.objective_value()
                );
                SolverOutcome::Optimal(solution)
            }
            (Conclusion::Exhausted, None) => {
                info!("proved infeasibility in {elapsed:?}");
                SolverOutcome::Infeasible
            }
            (Conclusion::Interrupted, Some(solution)) => {
                info!(
                    "stopped after {elapsed:?} with objective {}",
                    solution.objective_value()
                );
                SolverOutcome::FeasibleWithinTimeLimit(solution)
            }
            (Conclusion::Interrupted, None) => {
                warn!("stopped after {elapsed:?} without finding a solution");
                SolverOutcome::Infeasible
            }
        }
    }

    fn search(&mut self, termination: &mut impl TerminationCondition) -> Conclusion {
        loop {
            if self.engine.propagate(&mut self.assignments).is_err() {
                self.statistics.num_conflicts += 1;

                if self.restart_is_due() {
                    self.restart();
                } else if !self.backtrack() {
                    return Conclusion::Exhausted;
                }
                continue;
            }

            let Some((variable, value)) = self.brancher.next_decision(&self.assignments) else {
                self.record_solution();
                if !self.backtrack() {
                    return Conclusion::Exhausted;
                }
                continue;
            };

            if termination.should_stop() {
                return Conclusion::Interrupted;
            }
            termination.decision_has_been_made();
            self.statistics.num_decisions += 1;

            self.assignments.new_decision_level();
            self.decisions.push((variable, value));
            self.assignments.assign(variable, value);
        }
    }

    fn record_solution(&mut self) {
        let values = self.assignments.to_values();
        roster_assert_moderate!(
            self.program.violated_constraints(&values).next().is_none(),
            "a complete assignment passed propagation but violates a constraint"
        );

        let objective_value = self.program.objective().evaluate(|variable| values[variable]);
        debug!("found a solution with objective {objective_value}");

        self.statistics.num_solutions += 1;
        self.engine.tighten_objective(objective_value);
        self.incumbent = Some(RawSolution::new(values, objective_value));
    }

    fn restart_is_due(&mut self) -> bool {
        self.conflicts_until_restart = self.conflicts_until_restart.saturating_sub(1);
        self.conflicts_until_restart == 0 && self.assignments.decision_level() > 0
    }

    fn restart(&mut self) {
        debug!(
            "restarting after {} conflicts",
            self.statistics.num_conflicts
        );
        self.statistics.num_restarts += 1;
        self.conflicts_until_restart = self.restarts.next();

        self.decisions.clear();
        self.assignments.backtrack(0);
        self.engine.synchronise(&self.assignments);
    }

    /// Undoes the most recent decision and assigns its variable the opposite value one level up.
    /// Returns `false` when there is no decision left to undo.
    fn backtrack(&mut self) -> bool {
        let Some((variable, value)) = self.decisions.pop() else {
            return false;
        };

        self.assignments.backtrack(self.decisions.len());
        self.engine.synchronise(&self.assignments);
        self.assignments.assign(variable, !value);

        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::basic_types::tests::TestRandom;
    use crate::model::ProgramBuilder;
    use crate::model::Relation;
    use crate::solving::BackendError;

    fn solve_with(program: &IntegerProgram, bools: Vec<bool>, budget: u64) -> SolverOutcome {
        let mut search = Search::new(
            program,
            BranchAndBoundOptions::default(),
            InputOrderBrancher::new(TestRandom { bools }),
        );
        search.run(DecisionBudget::new(budget))
    }

    fn solve(program: &IntegerProgram) -> SolverOutcome {
        BranchAndBound::default().solve(
            program,
            &SolveOptions {
                time_limit: Duration::from_secs(10),
                random_seed: Some(42),
            },
        )
    }

    #[test]
    fn interrupted_search_reports_its_incumbent() {
        let mut builder = ProgramBuilder::default();
        let variables = (0..4)
            .map(|index| builder.new_binary(format!("v{index}")))
            .collect::<Vec<_>>();
        builder.add_objective_term(1.0, variables[0]);
        let program = builder.build();

        // The fifth value is drawn for the decision which the budget prevents.
        let outcome = solve_with(&program, vec![true; 5], 4);

        let SolverOutcome::FeasibleWithinTimeLimit(solution) = outcome else {
            panic!("expected an interrupted search, got {outcome:?}");
        };
        assert_eq!(solution.objective_value(), 1.0);
        assert_eq!(
            solution.values().iter().copied().collect::<Vec<_>>(),
            vec![1.0; 4]
        );
    }

    #[test]
    fn interrupted_search_without_solution_is_infeasible() {
        let mut builder = ProgramBuilder::default();
        let x = builder.new_binary("x");
        let _ = builder.new_binary("y");
        builder.add_objective_term(1.0, x);
        let program = builder.build();

        assert_eq!(
            solve_with(&program, vec![true; 2], 1),
            SolverOutcome::Infeasible
        );
    }

    #[test]
    fn exhaustive_search_proves_optimality() {
        let mut builder = ProgramBuilder::default();
        let x = builder.new_binary("x");
        let y = builder.new_binary("y");
        let z = builder.new_binary("z");
        builder.add_constraint([(1, x), (1, y), (1, z)], Relation::GreaterOrEqual, 2);
        builder.add_objective_term(3.0, x);
        builder.add_objective_term(1.0, y);
        builder.add_objective_term(2.0, z);
        let program = builder.build();

        let SolverOutcome::Optimal(solution) = solve(&program) else {
            panic!("expected an optimal solution");
        };

        assert_eq!(solution.objective_value(), 3.0);
        assert_eq!(solution.value(x), 0.0);
        assert_eq!(solution.value(y), 1.0);
        assert_eq!(solution.value(z), 1.0);
    }

    #[test]
    fn infeasible_program_is_reported() {
        let mut builder = ProgramBuilder::default();
        let x = builder.new_binary("x");
        let y = builder.new_binary("y");
        let z = builder.new_binary("z");
        builder.add_constraint([(1, x), (1, y), (1, z)], Relation::Equal, 2);
        builder.add_constraint([(1, x), (1, y)], Relation::LessOrEqual, 0);
        let program = builder.build();

        assert_eq!(solve(&program), SolverOutcome::Infeasible);
    }

    #[test]
    fn infeasibility_found_during_search_is_proven() {
        let mut builder = ProgramBuilder::default();
        let variables = (0..6)
            .map(|index| builder.new_binary(format!("v{index}")))
            .collect::<Vec<_>>();
        // Pairwise exclusive, yet at least two must hold.
        for (index, &first) in variables.iter().enumerate() {
            for &second in variables.iter().skip(index + 1) {
                builder.add_constraint([(1, first), (1, second)], Relation::LessOrEqual, 1);
            }
        }
        builder.add_constraint(
            variables.iter().map(|&variable| (1, variable)),
            Relation::GreaterOrEqual,
            2,
        );
        let program = builder.build();

        assert_eq!(solve(&program), SolverOutcome::Infeasible);
    }

    #[test]
    fn zero_time_limit_without_solution_is_infeasible() {
        let mut builder = ProgramBuilder::default();
        let x = builder.new_binary("x");
        builder.add_objective_term(1.0, x);
        let program = builder.build();

        let outcome = BranchAndBound::default().solve(
            &program,
            &SolveOptions {
                time_limit: Duration::ZERO,
                random_seed: Some(1),
            },
        );

        assert_eq!(outcome, SolverOutcome::Infeasible);
    }

    #[test]
    fn non_finite_weights_are_backend_errors() {
        let mut builder = ProgramBuilder::default();
        let x = builder.new_binary("x");
        builder.add_objective_term(f64::NAN, x);
        let program = builder.build();

        let outcome = solve(&program);

        assert!(matches!(
            outcome,
            SolverOutcome::Error(BackendError::NonFiniteObjective { ref variable, .. }) if variable == "x"
        ));
    }

    #[test]
    fn statistics_are_kept_after_a_solve() {
        let mut builder = ProgramBuilder::default();
        let x = builder.new_binary("x");
        let y = builder.new_binary("y");
        builder.add_constraint([(1, x), (1, y)], Relation::Equal, 1);
        builder.add_objective_term(1.0, x);
        let program = builder.build();

        let mut backend = BranchAndBound::default();
        let _ = backend.solve(
            &program,
            &SolveOptions {
                time_limit: Duration::from_secs(10),
                random_seed: Some(7),
            },
        );

        let statistics = backend.statistics().expect("a solve has happened");
        assert!(statistics.num_solutions >= 1);
        assert!(statistics.num_decisions >= 1);
    }

    #[test]
    fn restarts_keep_the_search_complete() {
        let mut builder = ProgramBuilder::default();
        let variables = (0..8)
            .map(|index| builder.new_binary(format!("v{index}")))
            .collect::<Vec<_>>();
        builder.add_constraint(
            variables.iter().map(|&variable| (1, variable)),
            Relation::Equal,
            4,
        );
        for (index, &variable) in variables.iter().enumerate() {
            builder.add_objective_term((index + 1) as f64, variable);
        }
        let program = builder.build();

        let mut backend = BranchAndBound::new(BranchAndBoundOptions {
            restart_base_interval: 1,
            restart_growth: 2.0,
            decision_budget: None,
        });
        let outcome = backend.solve(
            &program,
            &SolveOptions {
                time_limit: Duration::from_secs(10),
                random_seed: Some(3),
            },
        );

        let SolverOutcome::Optimal(solution) = outcome else {
            panic!("expected an optimal solution, got {outcome:?}");
        };
        assert_eq!(solution.objective_value(), 10.0);
    }
}
