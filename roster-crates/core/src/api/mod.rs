mod optimise;

pub use optimise::optimise;
pub use optimise::optimise_with_default_backend;

pub mod results {
    //! Contains the outputs of optimising a schedule.
    //!
    //! A [`ScheduleResult`] always carries a [`ScheduleStatus`]; the schedule itself and its
    //! objective value are only present when the backend found a solution.
    pub use crate::schedule::Assignment;
    pub use crate::schedule::DateCounts;
    pub use crate::schedule::Presentation;
    pub use crate::schedule::ScheduleResult;
    pub use crate::schedule::ScheduleStatus;
    pub use crate::schedule::ScheduleViolation;
    pub use crate::schedule::TalkKind;
}

pub mod options {
    //! Contains the options which control a schedule optimisation.
    pub use crate::schedule::ScheduleConfig;
    pub use crate::solving::BranchAndBoundOptions;
    pub use crate::solving::SolveOptions;
}
