use super::assignments::Assignments;
use crate::containers::KeyedVec;
use crate::model::IntegerProgram;
use crate::model::LinearConstraint;
use crate::model::Relation;
use crate::model::VariableId;

/// Indicates that the current partial assignment cannot be extended to a solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Conflict;

/// The constraint `\sum terms_i <= bound` over binary variables.
#[derive(Clone, Debug)]
pub(super) struct LinearLessOrEqual {
    terms: Box<[(i64, VariableId)]>,
    bound: i64,
}

impl LinearLessOrEqual {
    /// Rewrites `constraint` into one (for inequalities) or two (for equalities) constraints of the
    /// form `\sum terms_i <= bound`.
    pub(super) fn normalise(constraint: &LinearConstraint) -> Vec<LinearLessOrEqual> {
        let terms = constraint
            .terms()
            .iter()
            .map(|term| (i64::from(term.coefficient), term.variable))
            .collect::<Box<[_]>>();
        let rhs = i64::from(constraint.rhs());

        let less_or_equal = || LinearLessOrEqual {
            terms: terms.clone(),
            bound: rhs,
        };
        let greater_or_equal = || LinearLessOrEqual {
            terms: terms
                .iter()
                .map(|&(coefficient, variable)| (-coefficient, variable))
                .collect(),
            bound: -rhs,
        };

        match constraint.relation() {
            Relation::LessOrEqual => vec![less_or_equal()],
            Relation::GreaterOrEqual => vec![greater_or_equal()],
            Relation::Equal => vec![less_or_equal(), greater_or_equal()],
        }
    }

    pub(super) fn variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.terms.iter().map(|&(_, variable)| variable)
    }

    /// Fixes every unassigned variable whose other value would push the smallest reachable
    /// left-hand side over the bound.
    pub(super) fn propagate(&self, assignments: &mut Assignments) -> Result<(), Conflict> {
        let minimum_lhs = self
            .terms
            .iter()
            .map(|&(coefficient, variable)| match assignments.value(variable) {
                Some(true) => coefficient,
                Some(false) => 0,
                None => coefficient.min(0),
            })
            .sum::<i64>();

        let slack = self.bound - minimum_lhs;
        if slack < 0 {
            return Err(Conflict);
        }

        // Fixing a variable to the value counted in `minimum_lhs` leaves the slack unchanged.
        for &(coefficient, variable) in self.terms.iter() {
            if !assignments.is_assigned(variable) && coefficient.abs() > slack {
                assignments.assign(variable, coefficient < 0);
            }
        }

        Ok(())
    }
}

/// The constraint `objective < upper_bound`, where the bound is the value of the best solution
/// found so far.
#[derive(Clone, Debug)]
pub(super) struct ObjectiveBound {
    terms: Box<[(f64, VariableId)]>,
    upper_bound: f64,
}

impl ObjectiveBound {
    fn new(program: &IntegerProgram) -> Self {
        ObjectiveBound {
            terms: program
                .objective()
                .terms()
                .iter()
                .filter(|term| term.weight != 0.0)
                .map(|term| (term.weight, term.variable))
                .collect(),
            upper_bound: f64::INFINITY,
        }
    }

    /// Requires every further solution to improve on `objective_value`.
    fn tighten(&mut self, objective_value: f64) {
        let tolerance = 1e-9 * objective_value.abs().max(1.0);
        self.upper_bound = objective_value - tolerance;
    }

    fn propagate(&self, assignments: &mut Assignments) -> Result<(), Conflict> {
        if self.upper_bound.is_infinite() {
            return Ok(());
        }

        let minimum_objective = self
            .terms
            .iter()
            .map(|&(weight, variable)| match assignments.value(variable) {
                Some(true) => weight,
                Some(false) => 0.0,
                None => weight.min(0.0),
            })
            .sum::<f64>();

        let slack = self.upper_bound - minimum_objective;
        if slack < 0.0 {
            return Err(Conflict);
        }

        for &(weight, variable) in self.terms.iter() {
            if !assignments.is_assigned(variable) && weight.abs() > slack {
                assignments.assign(variable, weight < 0.0);
            }
        }

        Ok(())
    }
}

/// Propagates all constraints of a program, and the objective bound, to a fixpoint.
///
/// The assignment trail doubles as the propagation queue: every variable assigned since the last
/// call wakes up the constraints it occurs in.
#[derive(Clone, Debug)]
pub(super) struct PropagationEngine {
    constraints: Vec<LinearLessOrEqual>,
    watchers: KeyedVec<VariableId, Vec<usize>>,
    objective: ObjectiveBound,
    in_objective: KeyedVec<VariableId, bool>,
    /// Whether the objective bound changed since it was last checked against the assignment.
    objective_is_stale: bool,
    /// Position on the trail up to which assignments have been propagated.
    propagation_head: usize,
}

impl PropagationEngine {
    pub(super) fn new(program: &IntegerProgram) -> Self {
        let constraints = program
            .constraints()
            .iter()
            .flat_map(LinearLessOrEqual::normalise)
            .collect::<Vec<_>>();

        let mut watchers = KeyedVec::filled(program.num_variables(), Vec::new());
        for (index, constraint) in constraints.iter().enumerate() {
            for variable in constraint.variables() {
                watchers[variable].push(index);
            }
        }

        let objective = ObjectiveBound::new(program);
        let mut in_objective = KeyedVec::filled(program.num_variables(), false);
        for &(_, variable) in objective.terms.iter() {
            in_objective[variable] = true;
        }

        PropagationEngine {
            constraints,
            watchers,
            objective,
            in_objective,
            objective_is_stale: false,
            propagation_head: 0,
        }
    }

    pub(super) fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Propagates every constraint once, regardless of which variables are assigned, and then
    /// continues to a fixpoint. Used at the root.
    pub(super) fn propagate_all(&mut self, assignments: &mut Assignments) -> Result<(), Conflict> {
        for constraint in self.constraints.iter() {
            constraint.propagate(assignments)?;
        }
        self.objective.propagate(assignments)?;

        self.propagate(assignments)
    }

    pub(super) fn propagate(&mut self, assignments: &mut Assignments) -> Result<(), Conflict> {
        if self.objective_is_stale {
            self.objective.propagate(assignments)?;
            self.objective_is_stale = false;
        }

        while self.propagation_head < assignments.num_assigned() {
            let variable = assignments.assigned_at(self.propagation_head);
            self.propagation_head += 1;

            for &index in self.watchers[variable].iter() {
                self.constraints[index].propagate(assignments)?;
            }

            if self.in_objective[variable] {
                self.objective.propagate(assignments)?;
            }
        }

        Ok(())
    }

    /// Restricts further solutions to those strictly better than `objective_value`.
    pub(super) fn tighten_objective(&mut self, objective_value: f64) {
        self.objective.tighten(objective_value);
        self.objective_is_stale = true;
    }

    /// Should be called after the assignment backtracked.
    pub(super) fn synchronise(&mut self, assignments: &Assignments) {
        self.propagation_head = self.propagation_head.min(assignments.num_assigned());
    }
}
