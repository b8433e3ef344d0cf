//! Presentation schedules: the request, its validation, the integer program it translates to, and
//! the decoded result.
//!
//! Every individual gives a fixed number of research and journal-club talks over a sequence of
//! meeting dates. Each date has bounds on its number of talks, individuals can be unavailable on
//! some dates, and the talks of a single individual are spread out as far as possible by
//! penalising every pair of their talks with the reciprocal of the distance between the two dates.
mod checker;
mod decoder;
mod error;
mod model;
mod request;
mod result;
mod spec;

pub use checker::ScheduleViolation;
pub use checker::TalkKind;
pub use decoder::ScheduleDecoder;
pub use error::ValidationError;
pub use model::ScheduleModel;
pub use request::ScheduleConfig;
pub use request::ScheduleRequest;
pub use result::Assignment;
pub use result::DateCounts;
pub use result::Presentation;
pub use result::ScheduleResult;
pub use result::ScheduleStatus;
pub use spec::DateBounds;
pub use spec::ScheduleSpec;
