use std::fmt::Display;
use std::hash::Hash;

use super::ScheduleSpec;
use crate::basic_types::badness;
use crate::basic_types::DatePoint;
use crate::roster_assert_eq_simple;
use crate::solving::BackendError;
use crate::solving::SolveStatus;

/// The termination status of a schedule optimisation.
pub type ScheduleStatus = SolveStatus;

/// What an individual does on a date.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Presentation {
    #[default]
    None,
    Research,
    Journal,
}

impl Presentation {
    pub fn is_talk(self) -> bool {
        self != Presentation::None
    }
}

impl Display for Presentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Presentation::None => write!(f, "-"),
            Presentation::Research => write!(f, "R"),
            Presentation::Journal => write!(f, "J"),
        }
    }
}

/// A grid with one [`Presentation`] per individual and date, indexed like the
/// [`ScheduleSpec`](super::ScheduleSpec) it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    num_individuals: usize,
    num_dates: usize,
    entries: Vec<Presentation>,
}

impl Assignment {
    pub(crate) fn new(num_individuals: usize, num_dates: usize, entries: Vec<Presentation>) -> Self {
        roster_assert_eq_simple!(entries.len(), num_individuals * num_dates);

        Assignment {
            num_individuals,
            num_dates,
            entries,
        }
    }

    pub fn num_individuals(&self) -> usize {
        self.num_individuals
    }

    pub fn num_dates(&self) -> usize {
        self.num_dates
    }

    pub fn get(&self, individual: usize, date: usize) -> Presentation {
        self.entries[individual * self.num_dates + date]
    }

    /// The presentations of `individual`, one per date.
    pub fn row(&self, individual: usize) -> &[Presentation] {
        &self.entries[individual * self.num_dates..(individual + 1) * self.num_dates]
    }
}

/// The number of talks on a single date.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateCounts {
    pub research: u32,
    pub journal: u32,
}

impl DateCounts {
    pub fn total(&self) -> u32 {
        self.research + self.journal
    }
}

/// The decoded outcome of optimising a schedule.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleResult<Id, D> {
    spec: ScheduleSpec<Id, D>,
    status: ScheduleStatus,
    assignment: Option<Assignment>,
    objective_value: Option<f64>,
    backend_error: Option<BackendError>,
}

impl<Id, D> ScheduleResult<Id, D> {
    pub(crate) fn with_solution(
        spec: ScheduleSpec<Id, D>,
        status: ScheduleStatus,
        assignment: Assignment,
        objective_value: f64,
    ) -> Self {
        ScheduleResult {
            spec,
            status,
            assignment: Some(assignment),
            objective_value: Some(objective_value),
            backend_error: None,
        }
    }

    pub(crate) fn without_solution(
        spec: ScheduleSpec<Id, D>,
        status: ScheduleStatus,
        backend_error: Option<BackendError>,
    ) -> Self {
        ScheduleResult {
            spec,
            status,
            assignment: None,
            objective_value: None,
            backend_error,
        }
    }

    pub fn spec(&self) -> &ScheduleSpec<Id, D> {
        &self.spec
    }

    pub fn status(&self) -> ScheduleStatus {
        self.status
    }

    /// The schedule; present exactly when the status carries a solution.
    pub fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }

    /// The objective value reported by the backend.
    pub fn objective_value(&self) -> Option<f64> {
        self.objective_value
    }

    /// Why the backend failed, when the status is [`ScheduleStatus::Error`].
    pub fn backend_error(&self) -> Option<&BackendError> {
        self.backend_error.as_ref()
    }

    pub fn individuals(&self) -> &[Id] {
        self.spec.individuals()
    }

    pub fn dates(&self) -> &[D] {
        self.spec.dates()
    }
}

impl<Id: Eq + Hash, D: Eq + Hash> ScheduleResult<Id, D> {
    /// What `individual` does on `date`; `None` when there is no schedule or either is unknown.
    pub fn get(&self, individual: &Id, date: &D) -> Option<Presentation> {
        let assignment = self.assignment.as_ref()?;
        let individual = self.spec.individual_index(individual)?;
        let date = self.spec.date_index(date)?;

        Some(assignment.get(individual, date))
    }

    pub fn is_unavailable(&self, individual: &Id, date: &D) -> bool {
        match (
            self.spec.individual_index(individual),
            self.spec.date_index(date),
        ) {
            (Some(individual), Some(date)) => self.spec.is_unavailable(individual, date),
            _ => false,
        }
    }

    /// The number of research and journal-club talks on `date`.
    pub fn date_counts(&self, date: &D) -> Option<DateCounts> {
        let assignment = self.assignment.as_ref()?;
        let date = self.spec.date_index(date)?;

        let mut counts = DateCounts::default();
        for individual in 0..assignment.num_individuals() {
            match assignment.get(individual, date) {
                Presentation::Research => counts.research += 1,
                Presentation::Journal => counts.journal += 1,
                Presentation::None => {}
            }
        }

        Some(counts)
    }
}

impl<Id, D: DatePoint> ScheduleResult<Id, D> {
    /// Recomputes the closeness penalty of the decoded schedule, independently of the value
    /// reported by the backend.
    pub fn spacing_penalty(&self) -> Option<f64> {
        let assignment = self.assignment.as_ref()?;
        let dates = self.spec.dates();

        let penalty = (0..assignment.num_individuals())
            .map(|individual| {
                let talks = assignment
                    .row(individual)
                    .iter()
                    .enumerate()
                    .filter(|(_, presentation)| presentation.is_talk())
                    .map(|(date, _)| date)
                    .collect::<Vec<_>>();

                talks
                    .iter()
                    .enumerate()
                    .flat_map(|(position, &first)| {
                        talks[position + 1..]
                            .iter()
                            .map(move |&second| badness(&dates[first], &dates[second]))
                    })
                    .sum::<f64>()
            })
            .sum();

        Some(penalty)
    }
}
