use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::model::VariableId;
use crate::roster_assert_simple;

/// The partial assignment of the binary variables, with the order in which the variables were
/// assigned.
#[derive(Clone, Debug)]
pub(super) struct Assignments {
    values: KeyedVec<VariableId, Option<bool>>,
    trail: Trail<VariableId>,
}

impl Assignments {
    pub(super) fn new(num_variables: usize) -> Self {
        Assignments {
            values: KeyedVec::filled(num_variables, None),
            trail: Trail::default(),
        }
    }

    pub(super) fn value(&self, variable: VariableId) -> Option<bool> {
        self.values[variable]
    }

    pub(super) fn is_assigned(&self, variable: VariableId) -> bool {
        self.values[variable].is_some()
    }

    pub(super) fn assign(&mut self, variable: VariableId, value: bool) {
        roster_assert_simple!(
            !self.is_assigned(variable),
            "variable {variable} is assigned twice"
        );

        self.values[variable] = Some(value);
        self.trail.push(variable);
    }

    pub(super) fn decision_level(&self) -> usize {
        self.trail.get_checkpoint()
    }

    pub(super) fn new_decision_level(&mut self) {
        self.trail.new_checkpoint();
    }

    /// Unassigns every variable which was assigned after `decision_level` was entered.
    pub(super) fn backtrack(&mut self, decision_level: usize) {
        for variable in self.trail.synchronise(decision_level) {
            self.values[variable] = None;
        }
    }

    pub(super) fn num_assigned(&self) -> usize {
        self.trail.len()
    }

    /// The `position`-th variable to have been assigned.
    pub(super) fn assigned_at(&self, position: usize) -> VariableId {
        self.trail[position]
    }

    pub(super) fn first_unassigned(&self) -> Option<VariableId> {
        self.values
            .iter()
            .position(Option::is_none)
            .map(VariableId::create_from_index)
    }

    /// The assignment as 0/1 values; only meaningful when every variable is assigned.
    pub(super) fn to_values(&self) -> KeyedVec<VariableId, f64> {
        self.values
            .iter()
            .map(|value| if *value == Some(true) { 1.0 } else { 0.0 })
            .collect()
    }
}
