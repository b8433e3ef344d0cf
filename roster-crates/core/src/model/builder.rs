use itertools::Itertools;
use log::debug;

use super::IntegerProgram;
use super::LinearConstraint;
use super::Objective;
use super::Relation;
use super::Term;
use super::VariableId;
use super::WeightedTerm;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::roster_assert_simple;

/// Incrementally assembles an [`IntegerProgram`].
///
/// The builder is consumed by [`ProgramBuilder::build`], after which the program can no longer
/// change.
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    variable_names: KeyedVec<VariableId, String>,
    constraints: Vec<LinearConstraint>,
    objective: Vec<WeightedTerm>,
}

impl ProgramBuilder {
    /// Create a new binary variable.
    pub fn new_binary(&mut self, name: impl Into<String>) -> VariableId {
        self.variable_names.push(name.into())
    }

    pub fn num_variables(&self) -> usize {
        self.variable_names.len()
    }

    /// Adds the constraint `\sum coefficient_i * variable_i <relation> rhs`.
    ///
    /// Terms over the same variable are merged, and terms whose coefficients cancel out are
    /// dropped.
    pub fn add_constraint(
        &mut self,
        terms: impl IntoIterator<Item = (i32, VariableId)>,
        relation: Relation,
        rhs: i32,
    ) {
        let terms: Box<[Term]> = terms
            .into_iter()
            .map(|(coefficient, variable)| {
                self.assert_known(variable);
                Term {
                    coefficient,
                    variable,
                }
            })
            .sorted_by_key(|term| term.variable)
            .coalesce(|previous, current| {
                if previous.variable == current.variable {
                    Ok(Term {
                        coefficient: previous.coefficient + current.coefficient,
                        variable: previous.variable,
                    })
                } else {
                    Err((previous, current))
                }
            })
            .filter(|term| term.coefficient != 0)
            .collect();

        self.constraints.push(LinearConstraint {
            terms,
            relation,
            rhs,
        });
    }

    /// Adds the constraint `variable == value`.
    pub fn fix(&mut self, variable: VariableId, value: bool) {
        self.add_constraint([(1, variable)], Relation::Equal, i32::from(value));
    }

    /// Adds `weight * variable` to the minimised objective.
    pub fn add_objective_term(&mut self, weight: f64, variable: VariableId) {
        self.assert_known(variable);
        self.objective.push(WeightedTerm { weight, variable });
    }

    pub fn build(self) -> IntegerProgram {
        debug!(
            "Built program with {} variables, {} constraints and {} objective terms",
            self.variable_names.len(),
            self.constraints.len(),
            self.objective.len()
        );

        IntegerProgram {
            variable_names: self.variable_names,
            constraints: self.constraints.into(),
            objective: Objective {
                terms: self.objective.into(),
            },
        }
    }

    fn assert_known(&self, variable: VariableId) {
        roster_assert_simple!(
            variable.index() < self.variable_names.len(),
            "variable {variable} was not created by this builder"
        );
    }
}
