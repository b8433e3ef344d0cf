use std::fmt::Debug;
use std::hash::Hash;

use log::debug;
use log::info;

use crate::basic_types::DatePoint;
use crate::schedule::ScheduleDecoder;
use crate::schedule::ScheduleModel;
use crate::schedule::ScheduleRequest;
use crate::schedule::ScheduleResult;
use crate::schedule::ScheduleSpec;
use crate::schedule::ValidationError;
use crate::solving::HighsBackend;
use crate::solving::SolverAdapter;

/// Validates `request`, builds its integer program, solves it with `adapter` and decodes the
/// outcome.
///
/// Only an invalid request is an error; infeasibility, time-outs and backend failures are
/// reported through [`ScheduleResult::status`].
pub fn optimise<Id, D>(
    request: ScheduleRequest<Id, D>,
    adapter: &mut impl SolverAdapter,
) -> Result<ScheduleResult<Id, D>, ValidationError>
where
    Id: Clone + Eq + Hash + Debug,
    D: DatePoint,
{
    let spec = ScheduleSpec::new(request)?;
    debug!(
        "Validated schedule request with {} individuals and {} dates",
        spec.num_individuals(),
        spec.num_dates()
    );

    let model = ScheduleModel::build(&spec);
    let outcome = adapter.solve(model.program(), &spec.solve_options());
    let result = ScheduleDecoder::decode(&spec, &model, &outcome);

    info!("Schedule optimisation finished with status {}", result.status());
    Ok(result)
}

/// [`optimise`] with the default [`HighsBackend`].
pub fn optimise_with_default_backend<Id, D>(
    request: ScheduleRequest<Id, D>,
) -> Result<ScheduleResult<Id, D>, ValidationError>
where
    Id: Clone + Eq + Hash + Debug,
    D: DatePoint,
{
    optimise(request, &mut HighsBackend)
}
