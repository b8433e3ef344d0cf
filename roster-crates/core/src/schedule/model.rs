use std::fmt::Debug;
use std::hash::Hash;

use log::debug;

use super::ScheduleSpec;
use crate::basic_types::badness;
use crate::basic_types::DatePoint;
use crate::model::linearisation::binary_product;
use crate::model::IntegerProgram;
use crate::model::ProgramBuilder;
use crate::model::Relation;
use crate::model::VariableId;
use crate::roster_assert_simple;

/// The integer program of a [`ScheduleSpec`] together with the mapping from schedule entries to
/// its variables.
///
/// For individual `i` and dates `d < d'` the program contains
///  - `x[i,d]`, which holds when `i` presents on `d`;
///  - `y[i,d]`, which holds when that talk is a journal-club talk;
///  - `z[i,d,d']`, which equals `x[i,d] * x[i,d']` and carries the closeness penalty of `d` and
///    `d'` in the objective.
///
/// Products are only created for strictly ordered date pairs; the remaining pairs carry no
/// penalty and have no variable.
#[derive(Clone, Debug)]
pub struct ScheduleModel {
    program: IntegerProgram,
    num_dates: usize,
    presents: Vec<VariableId>,
    journal: Vec<VariableId>,
    pairs: Vec<VariableId>,
}

impl ScheduleModel {
    pub fn build<Id, D>(spec: &ScheduleSpec<Id, D>) -> ScheduleModel
    where
        Id: Clone + Eq + Hash + Debug,
        D: DatePoint,
    {
        let num_individuals = spec.num_individuals();
        let num_dates = spec.num_dates();
        let bounds = spec.bounds();

        let mut builder = ProgramBuilder::default();
        let mut presents = Vec::with_capacity(num_individuals * num_dates);
        let mut journal = Vec::with_capacity(num_individuals * num_dates);
        let mut pairs = Vec::with_capacity(num_individuals * num_pairs(num_dates));

        for individual in 0..num_individuals {
            for date in 0..num_dates {
                presents.push(builder.new_binary(format!("x[{individual},{date}]")));
            }
            for date in 0..num_dates {
                journal.push(builder.new_binary(format!("y[{individual},{date}]")));
            }
        }

        let x = |individual: usize, date: usize| presents[individual * num_dates + date];
        let y = |individual: usize, date: usize| journal[individual * num_dates + date];

        for individual in 0..num_individuals {
            builder.add_constraint(
                (0..num_dates).map(|date| (1, x(individual, date))),
                Relation::Equal,
                to_rhs(spec.talks_required(individual)),
            );
            builder.add_constraint(
                (0..num_dates).map(|date| (1, y(individual, date))),
                Relation::Equal,
                to_rhs(spec.journals_required(individual)),
            );

            for date in 0..num_dates {
                builder.add_constraint(
                    [(1, y(individual, date)), (-1, x(individual, date))],
                    Relation::LessOrEqual,
                    0,
                );

                if spec.is_unavailable(individual, date) {
                    builder.fix(x(individual, date), false);
                }
            }
        }

        for date in 0..num_dates {
            let everyone = 0..num_individuals;

            add_range(
                &mut builder,
                everyone.clone().map(|individual| (1, x(individual, date))),
                bounds.min_total,
                bounds.max_total,
            );
            add_range(
                &mut builder,
                everyone.clone().flat_map(|individual| {
                    [(1, x(individual, date)), (-1, y(individual, date))]
                }),
                bounds.min_presentations,
                bounds.max_presentations,
            );
            add_range(
                &mut builder,
                everyone.map(|individual| (1, y(individual, date))),
                bounds.min_journals,
                bounds.max_journals,
            );
        }

        let dates = spec.dates();
        for individual in 0..num_individuals {
            for first in 0..num_dates {
                for second in first + 1..num_dates {
                    let product = binary_product(
                        &mut builder,
                        x(individual, first),
                        x(individual, second),
                        format!("z[{individual},{first},{second}]"),
                    );
                    builder.add_objective_term(badness(&dates[first], &dates[second]), product);
                    pairs.push(product);
                }
            }
        }

        let program = builder.build();
        debug!(
            "Schedule model for {num_individuals} individuals and {num_dates} dates has {} \
             variables and {} constraints",
            program.num_variables(),
            program.num_constraints()
        );

        ScheduleModel {
            program,
            num_dates,
            presents,
            journal,
            pairs,
        }
    }

    pub fn program(&self) -> &IntegerProgram {
        &self.program
    }

    /// The variable `x[individual, date]`.
    pub fn presents(&self, individual: usize, date: usize) -> VariableId {
        self.presents[individual * self.num_dates + date]
    }

    /// The variable `y[individual, date]`.
    pub fn journal(&self, individual: usize, date: usize) -> VariableId {
        self.journal[individual * self.num_dates + date]
    }

    /// The variable `z[individual, first, second]`, which only exists for `first < second`.
    pub fn pair(&self, individual: usize, first: usize, second: usize) -> Option<VariableId> {
        if first >= second || second >= self.num_dates {
            return None;
        }

        // Row `first` of the strict upper triangle starts after the rows of all earlier dates.
        let row_start = first * (2 * self.num_dates - first - 1) / 2;
        let index = individual * num_pairs(self.num_dates) + row_start + (second - first - 1);

        self.pairs.get(index).copied()
    }
}

fn num_pairs(num_dates: usize) -> usize {
    num_dates * num_dates.saturating_sub(1) / 2
}

fn to_rhs(count: u32) -> i32 {
    roster_assert_simple!(count <= i32::MAX as u32);
    count as i32
}

/// Adds `min <= \sum terms <= max`.
fn add_range(
    builder: &mut ProgramBuilder,
    terms: impl Iterator<Item = (i32, VariableId)> + Clone,
    min: u32,
    max: u32,
) {
    builder.add_constraint(terms.clone(), Relation::GreaterOrEqual, to_rhs(min));
    builder.add_constraint(terms, Relation::LessOrEqual, to_rhs(max));
}
