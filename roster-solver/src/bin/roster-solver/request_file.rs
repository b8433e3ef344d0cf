//! The TOML format of schedule requests.
//!
//! ```toml
//! individuals = ["ada", "bob"]
//! dates = ["2024-01-08", "2024-01-22", "2024-02-05"]
//!
//! [presentations]
//! bob = 1
//!
//! [journals]
//! bob = 0
//!
//! [cannot_attend]
//! ada = ["2024-01-22"]
//!
//! [config]
//! min_total = 1
//! time_limit = 10.0
//! ```
//!
//! Dates are either all quoted ISO dates or all integers.
use chrono::NaiveDate;
use roster_solver::containers::HashMap;
use roster_solver::options::ScheduleConfig;
use roster_solver::ScheduleRequest;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum RequestFileError {
    #[error("dates must either all be calendar dates or all be integers")]
    MixedDates,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
enum DateEntry {
    Calendar(NaiveDate),
    Ordinal(i64),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RequestFile {
    individuals: Vec<String>,
    dates: Vec<DateEntry>,
    #[serde(default)]
    presentations: HashMap<String, i64>,
    #[serde(default)]
    journals: HashMap<String, i64>,
    #[serde(default)]
    cannot_attend: HashMap<String, Vec<DateEntry>>,
    #[serde(default)]
    config: ConfigSection,
}

/// Overrides of the default [`ScheduleConfig`]; absent keys keep their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigSection {
    default_presentations: Option<i64>,
    default_journals: Option<i64>,
    min_total: Option<i64>,
    max_total: Option<i64>,
    min_presentations: Option<i64>,
    max_presentations: Option<i64>,
    min_journals: Option<i64>,
    max_journals: Option<i64>,
    time_limit: Option<f64>,
    random_seed: Option<u64>,
}

impl ConfigSection {
    fn apply(self, config: &mut ScheduleConfig) {
        let overrides = [
            (&mut config.default_presentations, self.default_presentations),
            (&mut config.default_journals, self.default_journals),
            (&mut config.min_total, self.min_total),
            (&mut config.max_total, self.max_total),
            (&mut config.min_presentations, self.min_presentations),
            (&mut config.max_presentations, self.max_presentations),
            (&mut config.min_journals, self.min_journals),
            (&mut config.max_journals, self.max_journals),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }

        if let Some(time_limit) = self.time_limit {
            config.time_limit = time_limit;
        }
        if self.random_seed.is_some() {
            config.random_seed = self.random_seed;
        }
    }
}

/// A request whose dates are calendar dates or plain integers.
#[derive(Debug)]
pub(crate) enum Instance {
    Calendar(ScheduleRequest<String, NaiveDate>),
    Ordinal(ScheduleRequest<String, i64>),
}

impl Instance {
    pub(crate) fn config_mut(&mut self) -> &mut ScheduleConfig {
        match self {
            Instance::Calendar(request) => &mut request.config,
            Instance::Ordinal(request) => &mut request.config,
        }
    }
}

impl RequestFile {
    pub(crate) fn parse(contents: &str) -> Result<RequestFile, toml::de::Error> {
        toml::from_str(contents)
    }

    pub(crate) fn into_instance(self) -> Result<Instance, RequestFileError> {
        let all_dates = self
            .dates
            .iter()
            .chain(self.cannot_attend.values().flatten());

        let mut has_calendar = false;
        let mut has_ordinal = false;
        for date in all_dates {
            match date {
                DateEntry::Calendar(_) => has_calendar = true,
                DateEntry::Ordinal(_) => has_ordinal = true,
            }
        }

        match (has_calendar, has_ordinal) {
            (true, true) => Err(RequestFileError::MixedDates),
            (true, false) => Ok(Instance::Calendar(self.into_request(|date| match date {
                DateEntry::Calendar(date) => Some(date),
                DateEntry::Ordinal(_) => None,
            })?)),
            (false, _) => Ok(Instance::Ordinal(self.into_request(|date| match date {
                DateEntry::Ordinal(date) => Some(date),
                DateEntry::Calendar(_) => None,
            })?)),
        }
    }

    fn into_request<D>(
        self,
        convert: impl Fn(DateEntry) -> Option<D>,
    ) -> Result<ScheduleRequest<String, D>, RequestFileError> {
        let convert_all = |dates: Vec<DateEntry>| {
            dates
                .into_iter()
                .map(&convert)
                .collect::<Option<Vec<_>>>()
                .ok_or(RequestFileError::MixedDates)
        };

        let mut request = ScheduleRequest::new(self.individuals, convert_all(self.dates)?);
        request.presentations_modify = self.presentations;
        request.journals_modify = self.journals;
        request.cannot_attend = self
            .cannot_attend
            .into_iter()
            .map(|(individual, dates)| Ok((individual, convert_all(dates)?)))
            .collect::<Result<_, RequestFileError>>()?;
        self.config.apply(&mut request.config);

        Ok(request)
    }
}
