//! # Roster
//! Roster schedules recurring research and journal-club talks over a series of meeting dates. It
//! meets every individual's required number of talks, respects per-date capacity bounds and
//! unavailability, and spreads each individual's talks as far apart as possible.
//!
//! The schedule is found by translating the request into a 0/1 integer linear program, which is
//! solved by a [`SolverAdapter`](core::solving::SolverAdapter). By default the program is handed
//! to HiGHS; a self-contained branch-and-bound backend is available as well.
//!
//! ```rust
//! # use roster_solver::optimise_with_default_backend;
//! # use roster_solver::results::Presentation;
//! # use roster_solver::ScheduleRequest;
//! let mut request = ScheduleRequest::new(vec!["ada", "bob", "cy"], vec![1_i64, 2, 3, 4, 5, 6]);
//! request.config.default_presentations = 1;
//! request.config.default_journals = 1;
//! request.config.min_total = 1;
//! request.config.max_total = 1;
//! request.config.min_presentations = 0;
//! request.config.random_seed = Some(7);
//! let _ = request.cannot_attend.insert("cy", vec![1, 2, 3]);
//!
//! let result = optimise_with_default_backend(request).expect("the request is valid");
//!
//! assert!(result.status().has_solution());
//! assert_eq!(result.get(&"cy", &1), Some(Presentation::None));
//! ```
pub use roster_core as core;
pub use roster_core::*;
