//! Scheduling of recurring research and journal-club presentations.
//!
//! A [`ScheduleRequest`] lists individuals, meeting dates, how many talks every individual gives,
//! and per-date bounds on the number of talks. [`optimise`] validates the request, translates it
//! into a 0/1 integer linear program whose objective spreads each individual's talks as far apart
//! as possible, solves the program with a [`SolverAdapter`](solving::SolverAdapter), and decodes
//! the outcome into a [`ScheduleResult`](results::ScheduleResult).
//!
//! ```
//! use roster_core::optimise_with_default_backend;
//! use roster_core::ScheduleRequest;
//!
//! let mut request = ScheduleRequest::new(vec!["ada", "bob"], vec![0_i64, 7, 14, 21]);
//! request.config.default_presentations = 1;
//! request.config.default_journals = 1;
//! request.config.min_total = 1;
//! request.config.min_presentations = 0;
//! request.config.random_seed = Some(42);
//!
//! let result = optimise_with_default_backend(request).unwrap();
//! assert!(result.status().has_solution());
//! assert!(result.verify().is_ok());
//! ```
pub mod asserts;
pub(crate) mod basic_types;
pub mod containers;
pub mod model;
pub mod schedule;
pub mod solving;

// A private module with public use, so that the entry points are exported from the crate root.
mod api;

pub use api::*;

pub use crate::basic_types::badness;
pub use crate::basic_types::DatePoint;
pub use crate::schedule::ScheduleRequest;
pub use crate::schedule::ScheduleSpec;
pub use crate::schedule::ValidationError;
