//! An abstract description of a 0/1 integer linear program.
//!
//! An [`IntegerProgram`] is a set of binary variables, a set of linear constraints with integer
//! coefficients over those variables, and a linear objective with real weights which is always
//! minimised. It carries no solver-specific vocabulary: any backend implementing
//! [`SolverAdapter`](crate::solving::SolverAdapter) can consume it.
//!
//! Programs are assembled through a [`ProgramBuilder`] and are immutable once built.
mod builder;
pub mod linearisation;

use std::fmt::Display;

pub use builder::ProgramBuilder;

use crate::containers::KeyedVec;
use crate::containers::StorageKey;

/// A handle to a binary variable of an [`IntegerProgram`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId {
    id: u32,
}

impl StorageKey for VariableId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        VariableId {
            id: u32::try_from(index).expect("more variables than fit in a u32"),
        }
    }
}

impl Display for VariableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.id)
    }
}

/// The relation between the left-hand side and the right-hand side of a [`LinearConstraint`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    LessOrEqual,
    Equal,
    GreaterOrEqual,
}

impl Relation {
    fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Relation::LessOrEqual => lhs <= rhs,
            Relation::Equal => lhs == rhs,
            Relation::GreaterOrEqual => lhs >= rhs,
        }
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::LessOrEqual => write!(f, "<="),
            Relation::Equal => write!(f, "=="),
            Relation::GreaterOrEqual => write!(f, ">="),
        }
    }
}

/// The term `coefficient * variable`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Term {
    pub coefficient: i32,
    pub variable: VariableId,
}

/// The constraint `\sum terms_i <relation> rhs`.
///
/// Every variable occurs at most once in `terms` and no coefficient is zero.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LinearConstraint {
    terms: Box<[Term]>,
    relation: Relation,
    rhs: i32,
}

impl LinearConstraint {
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    pub fn rhs(&self) -> i32 {
        self.rhs
    }

    /// Whether the constraint holds when every variable takes the 0/1 value given by `value_of`.
    pub fn is_satisfied_by(&self, value_of: impl Fn(VariableId) -> bool) -> bool {
        let lhs = self
            .terms
            .iter()
            .filter(|term| value_of(term.variable))
            .map(|term| i64::from(term.coefficient))
            .sum::<i64>();

        self.relation.holds(lhs, i64::from(self.rhs))
    }
}

impl Display for LinearConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, term) in self.terms.iter().enumerate() {
            if index > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}*{}", term.coefficient, term.variable)?;
        }
        write!(f, " {} {}", self.relation, self.rhs)
    }
}

/// The term `weight * variable` of an [`Objective`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedTerm {
    pub weight: f64,
    pub variable: VariableId,
}

/// A linear objective which is minimised.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Objective {
    terms: Box<[WeightedTerm]>,
}

impl Objective {
    pub fn terms(&self) -> &[WeightedTerm] {
        &self.terms
    }

    /// Evaluate the objective for the given variable values.
    pub fn evaluate(&self, value_of: impl Fn(VariableId) -> f64) -> f64 {
        self.terms
            .iter()
            .map(|term| term.weight * value_of(term.variable))
            .sum()
    }
}

/// An immutable 0/1 integer linear minimisation program.
#[derive(Clone, Debug, PartialEq)]
pub struct IntegerProgram {
    variable_names: KeyedVec<VariableId, String>,
    constraints: Box<[LinearConstraint]>,
    objective: Objective,
}

impl IntegerProgram {
    pub fn num_variables(&self) -> usize {
        self.variable_names.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// The variables of the program in the order they were created.
    pub fn variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.variable_names.keys()
    }

    pub fn variable_name(&self, variable: VariableId) -> &str {
        &self.variable_names[variable]
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    /// The constraints which do not hold when every variable is rounded to the nearest of 0
    /// and 1.
    pub fn violated_constraints<'a>(
        &'a self,
        values: &'a KeyedVec<VariableId, f64>,
    ) -> impl Iterator<Item = &'a LinearConstraint> + 'a {
        self.constraints
            .iter()
            .filter(move |constraint| !constraint.is_satisfied_by(|variable| values[variable] >= 0.5))
    }
}
