use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

use super::ScheduleConfig;
use super::ScheduleRequest;
use super::ValidationError;
use crate::basic_types::DatePoint;
use crate::containers::HashMap;
use crate::solving::SolveOptions;

/// Per-date bounds on the number of talks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DateBounds {
    pub min_total: u32,
    pub max_total: u32,
    pub min_presentations: u32,
    pub max_presentations: u32,
    pub min_journals: u32,
    pub max_journals: u32,
}

/// A validated scheduling problem.
///
/// Individuals and dates are indexed in the order in which they occur in the request. Dates need
/// not be chronologically sorted; distances are always computed from their actual values.
#[derive(Clone, Debug)]
pub struct ScheduleSpec<Id, D> {
    individuals: Vec<Id>,
    dates: Vec<D>,
    /// The position of every individual in `individuals`.
    individual_indices: HashMap<Id, usize>,
    /// The position of every date in `dates`.
    date_indices: HashMap<D, usize>,
    presentations_required: Vec<u32>,
    journals_required: Vec<u32>,
    /// `unavailable[i][d]` holds when individual `i` cannot present on date `d`.
    unavailable: Vec<Vec<bool>>,
    bounds: DateBounds,
    time_limit: Duration,
    random_seed: Option<u64>,
}

impl<Id, D> ScheduleSpec<Id, D>
where
    Id: Clone + Eq + Hash + Debug,
    D: DatePoint,
{
    /// Validates `request`, returning the first problem found.
    pub fn new(request: ScheduleRequest<Id, D>) -> Result<Self, ValidationError> {
        let ScheduleRequest {
            individuals,
            dates,
            presentations_modify,
            journals_modify,
            cannot_attend,
            config,
        } = request;

        let mut individual_indices: HashMap<&Id, usize> = HashMap::default();
        for (index, individual) in individuals.iter().enumerate() {
            if individual_indices.insert(individual, index).is_some() {
                return Err(ValidationError::DuplicateIndividual {
                    individual: format!("{individual:?}"),
                });
            }
        }

        let mut date_indices: HashMap<&D, usize> = HashMap::default();
        for (index, date) in dates.iter().enumerate() {
            if date_indices.insert(date, index).is_some() {
                return Err(ValidationError::DuplicateDate {
                    date: format!("{date:?}"),
                });
            }
        }

        let unknown_individual = presentations_modify
            .keys()
            .chain(journals_modify.keys())
            .chain(cannot_attend.keys())
            .find(|individual| !individual_indices.contains_key(*individual));
        if let Some(individual) = unknown_individual {
            return Err(ValidationError::UnknownIndividual {
                individual: format!("{individual:?}"),
            });
        }

        let mut unavailable = vec![vec![false; dates.len()]; individuals.len()];
        for (individual, absences) in cannot_attend.iter() {
            let individual_index = individual_indices[individual];
            for date in absences {
                let Some(&date_index) = date_indices.get(date) else {
                    return Err(ValidationError::UnknownDate {
                        individual: format!("{individual:?}"),
                        date: format!("{date:?}"),
                    });
                };
                unavailable[individual_index][date_index] = true;
            }
        }

        let bounds = resolve_bounds(&config)?;
        let time_limit = resolve_time_limit(config.time_limit)?;
        let default_presentations =
            to_count(config.default_presentations, "default_presentations")?;
        let default_journals = to_count(config.default_journals, "default_journals")?;

        let resolve_counts = |overrides: &HashMap<Id, i64>, default: u32, kind: &str| {
            individuals
                .iter()
                .map(|individual| match overrides.get(individual) {
                    Some(&count) => {
                        to_count(count, &format!("the number of {kind} of {individual:?}"))
                    }
                    None => Ok(default),
                })
                .collect::<Result<Vec<_>, _>>()
        };
        let presentations_required = resolve_counts(
            &presentations_modify,
            default_presentations,
            "research presentations",
        )?;
        let journals_required = resolve_counts(
            &journals_modify,
            default_journals,
            "journal-club presentations",
        )?;

        // Talk counts end up as right-hand sides of linear constraints.
        for (presentations, journals) in presentations_required.iter().zip(&journals_required) {
            if u64::from(*presentations) + u64::from(*journals) > i32::MAX as u64 {
                return Err(ValidationError::InvalidConfiguration {
                    reason: format!(
                        "{presentations} research and {journals} journal-club presentations \
                         exceed the supported number of talks"
                    ),
                });
            }
        }

        let individual_indices = individual_indices
            .into_iter()
            .map(|(individual, index)| (individual.clone(), index))
            .collect();
        let date_indices = date_indices
            .into_iter()
            .map(|(date, index)| (date.clone(), index))
            .collect();

        Ok(ScheduleSpec {
            individuals,
            dates,
            individual_indices,
            date_indices,
            presentations_required,
            journals_required,
            unavailable,
            bounds,
            time_limit,
            random_seed: config.random_seed,
        })
    }
}

impl<Id: Eq + Hash, D: Eq + Hash> ScheduleSpec<Id, D> {
    pub fn individual_index(&self, individual: &Id) -> Option<usize> {
        self.individual_indices.get(individual).copied()
    }

    pub fn date_index(&self, date: &D) -> Option<usize> {
        self.date_indices.get(date).copied()
    }
}

impl<Id, D> ScheduleSpec<Id, D> {
    pub fn individuals(&self) -> &[Id] {
        &self.individuals
    }

    pub fn dates(&self) -> &[D] {
        &self.dates
    }

    pub fn num_individuals(&self) -> usize {
        self.individuals.len()
    }

    pub fn num_dates(&self) -> usize {
        self.dates.len()
    }

    /// The number of research presentations individual `individual` has to give.
    pub fn presentations_required(&self, individual: usize) -> u32 {
        self.presentations_required[individual]
    }

    /// The number of journal-club presentations individual `individual` has to give.
    pub fn journals_required(&self, individual: usize) -> u32 {
        self.journals_required[individual]
    }

    /// The number of talks of either kind individual `individual` has to give.
    pub fn talks_required(&self, individual: usize) -> u32 {
        self.presentations_required[individual] + self.journals_required[individual]
    }

    pub fn is_unavailable(&self, individual: usize, date: usize) -> bool {
        self.unavailable[individual][date]
    }

    pub fn bounds(&self) -> &DateBounds {
        &self.bounds
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    pub fn random_seed(&self) -> Option<u64> {
        self.random_seed
    }

    pub fn solve_options(&self) -> SolveOptions {
        SolveOptions {
            time_limit: self.time_limit,
            random_seed: self.random_seed,
        }
    }
}

// The position indices are derived from `individuals` and `dates`.
impl<Id: PartialEq, D: PartialEq> PartialEq for ScheduleSpec<Id, D> {
    fn eq(&self, other: &Self) -> bool {
        self.individuals == other.individuals
            && self.dates == other.dates
            && self.presentations_required == other.presentations_required
            && self.journals_required == other.journals_required
            && self.unavailable == other.unavailable
            && self.bounds == other.bounds
            && self.time_limit == other.time_limit
            && self.random_seed == other.random_seed
    }
}

fn to_count(value: i64, what: &str) -> Result<u32, ValidationError> {
    u32::try_from(value).map_err(|_| ValidationError::InvalidConfiguration {
        reason: format!("{what} is {value}, which is not a valid count"),
    })
}

fn resolve_bounds(config: &ScheduleConfig) -> Result<DateBounds, ValidationError> {
    let bounds = DateBounds {
        min_total: to_count(config.min_total, "min_total")?,
        max_total: to_count(config.max_total, "max_total")?,
        min_presentations: to_count(config.min_presentations, "min_presentations")?,
        max_presentations: to_count(config.max_presentations, "max_presentations")?,
        min_journals: to_count(config.min_journals, "min_journals")?,
        max_journals: to_count(config.max_journals, "max_journals")?,
    };

    let ranges = [
        ("total", bounds.min_total, bounds.max_total),
        (
            "presentations",
            bounds.min_presentations,
            bounds.max_presentations,
        ),
        ("journals", bounds.min_journals, bounds.max_journals),
    ];
    for (name, min, max) in ranges {
        if min > max {
            return Err(ValidationError::InvalidConfiguration {
                reason: format!("min_{name} ({min}) exceeds max_{name} ({max})"),
            });
        }
        if max > i32::MAX as u32 {
            return Err(ValidationError::InvalidConfiguration {
                reason: format!("max_{name} ({max}) is too large"),
            });
        }
    }

    Ok(bounds)
}

fn resolve_time_limit(seconds: f64) -> Result<Duration, ValidationError> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(ValidationError::InvalidConfiguration {
            reason: format!(
                "the time limit must be a finite, non-negative number of seconds, got {seconds}"
            ),
        });
    }

    Duration::try_from_secs_f64(seconds).map_err(|_| ValidationError::InvalidConfiguration {
        reason: format!("the time limit of {seconds} seconds is too large"),
    })
}
