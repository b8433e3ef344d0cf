use crate::containers::HashMap;

/// The raw, unvalidated description of a scheduling problem.
///
/// Counts are signed so that negative inputs can be rejected with a
/// [`ValidationError`](super::ValidationError) instead of wrapping around.
#[derive(Clone, Debug)]
pub struct ScheduleRequest<Id, D> {
    pub individuals: Vec<Id>,
    pub dates: Vec<D>,
    /// Overrides of the number of research presentations per individual.
    pub presentations_modify: HashMap<Id, i64>,
    /// Overrides of the number of journal-club presentations per individual.
    pub journals_modify: HashMap<Id, i64>,
    /// The dates on which an individual cannot present.
    pub cannot_attend: HashMap<Id, Vec<D>>,
    pub config: ScheduleConfig,
}

impl<Id, D> ScheduleRequest<Id, D> {
    /// A request over `individuals` and `dates` without overrides or unavailability, using the
    /// default configuration.
    pub fn new(individuals: Vec<Id>, dates: Vec<D>) -> Self {
        ScheduleRequest {
            individuals,
            dates,
            presentations_modify: HashMap::default(),
            journals_modify: HashMap::default(),
            cannot_attend: HashMap::default(),
            config: ScheduleConfig::default(),
        }
    }
}

/// Defaults and per-date bounds of a [`ScheduleRequest`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduleConfig {
    /// The number of research presentations of an individual without override.
    pub default_presentations: i64,
    /// The number of journal-club presentations of an individual without override.
    pub default_journals: i64,
    /// Bounds on the number of talks of either kind on a single date.
    pub min_total: i64,
    pub max_total: i64,
    /// Bounds on the number of research talks on a single date.
    pub min_presentations: i64,
    pub max_presentations: i64,
    /// Bounds on the number of journal-club talks on a single date.
    pub min_journals: i64,
    pub max_journals: i64,
    /// The wall-clock budget of the solver in seconds.
    pub time_limit: f64,
    /// Fixes the solver's random seed; a fresh seed is drawn when absent.
    pub random_seed: Option<u64>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig {
            default_presentations: 2,
            default_journals: 1,
            min_total: 2,
            max_total: 4,
            min_presentations: 1,
            max_presentations: 3,
            min_journals: 0,
            max_journals: 1,
            time_limit: 60.0,
            random_seed: None,
        }
    }
}
