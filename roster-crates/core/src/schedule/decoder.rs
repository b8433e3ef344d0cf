use log::error;

use super::Assignment;
use super::Presentation;
use super::ScheduleModel;
use super::ScheduleResult;
use super::ScheduleSpec;
use crate::solving::BackendError;
use crate::solving::SolveStatus;
use crate::solving::SolverOutcome;

/// Values at or above this threshold are read as 1.
const TRUTH_THRESHOLD: f64 = 0.5;

/// Converts the outcome of a backend into a [`ScheduleResult`].
///
/// Decoding is a pure function of the spec, the model and the outcome.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScheduleDecoder;

impl ScheduleDecoder {
    pub fn decode<Id: Clone + PartialEq, D: Clone + PartialEq>(
        spec: &ScheduleSpec<Id, D>,
        model: &ScheduleModel,
        outcome: &SolverOutcome,
    ) -> ScheduleResult<Id, D> {
        let status = outcome.status();

        let solution = match outcome {
            SolverOutcome::Optimal(solution) | SolverOutcome::FeasibleWithinTimeLimit(solution) => {
                solution
            }
            SolverOutcome::Infeasible => {
                return ScheduleResult::without_solution(spec.clone(), status, None);
            }
            SolverOutcome::Error(backend_error) => {
                error!("the backend failed: {backend_error}");
                return ScheduleResult::without_solution(
                    spec.clone(),
                    status,
                    Some(backend_error.clone()),
                );
            }
        };

        let expected = model.program().num_variables();
        if solution.num_values() != expected {
            let backend_error = BackendError::SolutionSizeMismatch {
                expected,
                actual: solution.num_values(),
            };
            error!("cannot decode the solution: {backend_error}");
            return ScheduleResult::without_solution(
                spec.clone(),
                SolveStatus::Error,
                Some(backend_error),
            );
        }

        let num_individuals = spec.individuals().len();
        let num_dates = spec.dates().len();
        let entries = (0..num_individuals)
            .flat_map(|individual| (0..num_dates).map(move |date| (individual, date)))
            .map(|(individual, date)| {
                let presents = solution.value(model.presents(individual, date)) >= TRUTH_THRESHOLD;
                let journal = solution.value(model.journal(individual, date)) >= TRUTH_THRESHOLD;

                match (presents, journal) {
                    (true, true) => Presentation::Journal,
                    (true, false) => Presentation::Research,
                    (false, _) => Presentation::None,
                }
            })
            .collect();

        ScheduleResult::with_solution(
            spec.clone(),
            status,
            Assignment::new(num_individuals, num_dates, entries),
            solution.objective_value(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::KeyedVec;
    use crate::model::VariableId;
    use crate::schedule::ScheduleRequest;
    use crate::solving::RawSolution;

    fn spec() -> ScheduleSpec<&'static str, i64> {
        let mut request = ScheduleRequest::new(vec!["ada", "bob"], vec![0, 7]);
        request.config.default_presentations = 1;
        request.config.default_journals = 0;
        request.config.min_total = 0;
        request.config.min_presentations = 0;
        let _ = request.journals_modify.insert("bob", 1);

        ScheduleSpec::new(request).expect("valid request")
    }

    fn solution(model: &ScheduleModel, ones: &[VariableId]) -> RawSolution {
        let mut values = KeyedVec::filled(model.program().num_variables(), 0.0);
        for &variable in ones {
            values[variable] = 0.9999;
        }
        let objective_value = model.program().objective().evaluate(|variable| values[variable]);

        RawSolution::new(values, objective_value)
    }

    #[test]
    fn values_are_thresholded_into_presentations() {
        let spec = spec();
        let model = ScheduleModel::build(&spec);
        let pair = model.pair(1, 0, 1).expect("ordered pair");
        let outcome = SolverOutcome::Optimal(solution(
            &model,
            &[
                model.presents(0, 1),
                model.presents(1, 0),
                model.presents(1, 1),
                model.journal(1, 1),
                pair,
            ],
        ));

        let result = ScheduleDecoder::decode(&spec, &model, &outcome);

        assert_eq!(result.status(), SolveStatus::Optimal);
        assert_eq!(result.get(&"ada", &0), Some(Presentation::None));
        assert_eq!(result.get(&"ada", &7), Some(Presentation::Research));
        assert_eq!(result.get(&"bob", &0), Some(Presentation::Research));
        assert_eq!(result.get(&"bob", &7), Some(Presentation::Journal));
        assert_eq!(result.get(&"cy", &7), None);
        assert_eq!(result.objective_value(), Some((1.0 / 7.0) * 0.9999));
        assert_eq!(result.spacing_penalty(), Some(1.0 / 7.0));
        assert_eq!(result.verify(), Ok(()));
    }

    #[test]
    fn journal_values_without_a_talk_are_ignored() {
        let spec = spec();
        let model = ScheduleModel::build(&spec);
        let outcome = SolverOutcome::FeasibleWithinTimeLimit(solution(
            &model,
            &[model.journal(0, 0)],
        ));

        let result = ScheduleDecoder::decode(&spec, &model, &outcome);

        assert_eq!(result.status(), SolveStatus::FeasibleWithinTimeLimit);
        assert_eq!(result.get(&"ada", &0), Some(Presentation::None));
    }

    #[test]
    fn decoding_is_repeatable() {
        let spec = spec();
        let model = ScheduleModel::build(&spec);
        let outcome = SolverOutcome::Optimal(solution(&model, &[model.presents(0, 0)]));

        assert_eq!(
            ScheduleDecoder::decode(&spec, &model, &outcome),
            ScheduleDecoder::decode(&spec, &model, &outcome)
        );
    }

    #[test]
    fn outcomes_without_solution_have_no_assignment() {
        let spec = spec();
        let model = ScheduleModel::build(&spec);

        let infeasible = ScheduleDecoder::decode(&spec, &model, &SolverOutcome::Infeasible);
        assert_eq!(infeasible.status(), SolveStatus::Infeasible);
        assert_eq!(infeasible.assignment(), None);
        assert_eq!(infeasible.objective_value(), None);
        assert_eq!(infeasible.get(&"ada", &0), None);

        let failure = BackendError::Other("out of memory".to_owned());
        let failed =
            ScheduleDecoder::decode(&spec, &model, &SolverOutcome::Error(failure.clone()));
        assert_eq!(failed.status(), SolveStatus::Error);
        assert_eq!(failed.assignment(), None);
        assert_eq!(failed.backend_error(), Some(&failure));
    }

    #[test]
    fn solutions_of_the_wrong_size_are_errors() {
        let spec = spec();
        let model = ScheduleModel::build(&spec);
        let outcome = SolverOutcome::Optimal(RawSolution::new(
            KeyedVec::filled(3, 1.0),
            0.0,
        ));

        let result = ScheduleDecoder::decode(&spec, &model, &outcome);

        assert_eq!(result.status(), SolveStatus::Error);
        assert_eq!(result.assignment(), None);
        assert_eq!(
            result.backend_error(),
            Some(&BackendError::SolutionSizeMismatch {
                expected: model.program().num_variables(),
                actual: 3
            })
        );
    }
}
