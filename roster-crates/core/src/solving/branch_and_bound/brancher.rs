use super::assignments::Assignments;
use crate::basic_types::Random;
use crate::model::VariableId;

/// Selects the first unassigned variable in input order and a uniformly random value for it.
#[derive(Debug)]
pub(super) struct InputOrderBrancher<R> {
    rng: R,
}

impl<R: Random> InputOrderBrancher<R> {
    pub(super) fn new(rng: R) -> Self {
        InputOrderBrancher { rng }
    }

    /// Returns `None` when every variable is assigned.
    pub(super) fn next_decision(&mut self, assignments: &Assignments) -> Option<(VariableId, bool)> {
        let variable = assignments.first_unassigned()?;
        Some((variable, self.rng.generate_bool(0.5)))
    }
}
