use thiserror::Error;

/// The reasons a [`ScheduleRequest`](super::ScheduleRequest) can be rejected.
///
/// Identifiers and dates are rendered with their `Debug` representation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("individual {individual} occurs more than once")]
    DuplicateIndividual { individual: String },
    #[error("date {date} occurs more than once")]
    DuplicateDate { date: String },
    #[error("{individual} is not one of the individuals of the schedule")]
    UnknownIndividual { individual: String },
    #[error("{individual} cannot attend on {date}, which is not one of the dates of the schedule")]
    UnknownDate { individual: String, date: String },
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}
