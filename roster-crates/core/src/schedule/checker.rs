use std::fmt::Debug;
use std::fmt::Display;

use thiserror::Error;

use super::Presentation;
use super::ScheduleResult;

/// A property of a feasible schedule which a decoded schedule fails to satisfy.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScheduleViolation {
    #[error("{individual} gives {actual} talks instead of {expected}")]
    TalkCount {
        individual: String,
        expected: u32,
        actual: u32,
    },
    #[error("{individual} gives {actual} journal-club talks instead of {expected}")]
    JournalCount {
        individual: String,
        expected: u32,
        actual: u32,
    },
    #[error("{date} has {count} {kind} talks, outside of [{min}, {max}]")]
    DateCount {
        date: String,
        kind: TalkKind,
        count: u32,
        min: u32,
        max: u32,
    },
    #[error("{individual} presents on {date}, on which they cannot attend")]
    Unavailable { individual: String, date: String },
}

/// The talks counted by a [`ScheduleViolation::DateCount`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TalkKind {
    Total,
    Research,
    Journal,
}

impl Display for TalkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TalkKind::Total => write!(f, "total"),
            TalkKind::Research => write!(f, "research"),
            TalkKind::Journal => write!(f, "journal-club"),
        }
    }
}

impl<Id: PartialEq + Debug, D: PartialEq + Debug> ScheduleResult<Id, D> {
    /// Checks the decoded schedule against the [`ScheduleSpec`](super::ScheduleSpec) it was decoded
    /// from, returning every violation.
    ///
    /// A result without a schedule has nothing to check and always passes.
    pub fn verify(&self) -> Result<(), Vec<ScheduleViolation>> {
        let Some(assignment) = self.assignment() else {
            return Ok(());
        };
        let spec = self.spec();
        let bounds = spec.bounds();
        let mut violations = Vec::new();

        for (index, individual) in spec.individuals().iter().enumerate() {
            let row = assignment.row(index);
            let talks = count(row.iter().copied(), |presentation| presentation.is_talk());
            let journals = count(row.iter().copied(), |presentation| {
                presentation == Presentation::Journal
            });

            if talks != spec.talks_required(index) {
                violations.push(ScheduleViolation::TalkCount {
                    individual: format!("{individual:?}"),
                    expected: spec.talks_required(index),
                    actual: talks,
                });
            }
            if journals != spec.journals_required(index) {
                violations.push(ScheduleViolation::JournalCount {
                    individual: format!("{individual:?}"),
                    expected: spec.journals_required(index),
                    actual: journals,
                });
            }

            for (date_index, date) in spec.dates().iter().enumerate() {
                if spec.is_unavailable(index, date_index) && row[date_index].is_talk() {
                    violations.push(ScheduleViolation::Unavailable {
                        individual: format!("{individual:?}"),
                        date: format!("{date:?}"),
                    });
                }
            }
        }

        for (date_index, date) in spec.dates().iter().enumerate() {
            let column =
                (0..assignment.num_individuals()).map(|index| assignment.get(index, date_index));
            let research = count(column.clone(), |presentation| {
                presentation == Presentation::Research
            });
            let journal = count(column, |presentation| presentation == Presentation::Journal);

            let checks = [
                (
                    TalkKind::Total,
                    research + journal,
                    bounds.min_total,
                    bounds.max_total,
                ),
                (
                    TalkKind::Research,
                    research,
                    bounds.min_presentations,
                    bounds.max_presentations,
                ),
                (
                    TalkKind::Journal,
                    journal,
                    bounds.min_journals,
                    bounds.max_journals,
                ),
            ];
            for (kind, count, min, max) in checks {
                if !(min..=max).contains(&count) {
                    violations.push(ScheduleViolation::DateCount {
                        date: format!("{date:?}"),
                        kind,
                        count,
                        min,
                        max,
                    });
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

fn count(
    presentations: impl Iterator<Item = Presentation>,
    predicate: impl Fn(Presentation) -> bool,
) -> u32 {
    presentations
        .filter(|&presentation| predicate(presentation))
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Assignment;
    use crate::schedule::ScheduleRequest;
    use crate::schedule::ScheduleSpec;
    use crate::solving::SolveStatus;

    const NONE: Presentation = Presentation::None;
    const RESEARCH: Presentation = Presentation::Research;

    fn result(entries: Vec<Presentation>) -> ScheduleResult<&'static str, i64> {
        let mut request = ScheduleRequest::new(vec!["ada", "bob"], vec![0, 7]);
        request.config.default_presentations = 1;
        request.config.default_journals = 0;
        request.config.min_total = 1;
        request.config.min_presentations = 0;
        let _ = request.cannot_attend.insert("bob", vec![7]);
        let spec = ScheduleSpec::new(request).expect("valid request");

        ScheduleResult::with_solution(
            spec,
            SolveStatus::Optimal,
            Assignment::new(2, 2, entries),
            0.0,
        )
    }

    #[test]
    fn valid_schedule_passes() {
        assert_eq!(result(vec![NONE, RESEARCH, RESEARCH, NONE]).verify(), Ok(()));
    }

    #[test]
    fn every_violation_is_reported() {
        let violations = result(vec![RESEARCH, Presentation::Journal, NONE, RESEARCH])
            .verify()
            .expect_err("the schedule is invalid");

        assert_eq!(
            violations,
            vec![
                ScheduleViolation::TalkCount {
                    individual: "\"ada\"".to_owned(),
                    expected: 1,
                    actual: 2,
                },
                ScheduleViolation::JournalCount {
                    individual: "\"ada\"".to_owned(),
                    expected: 0,
                    actual: 1,
                },
                ScheduleViolation::Unavailable {
                    individual: "\"bob\"".to_owned(),
                    date: "7".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn date_bounds_are_checked() {
        let violations = result(vec![RESEARCH, NONE, RESEARCH, NONE])
            .verify()
            .expect_err("the schedule is invalid");

        assert_eq!(
            violations,
            vec![ScheduleViolation::DateCount {
                date: "7".to_owned(),
                kind: TalkKind::Total,
                count: 0,
                min: 1,
                max: 4,
            }]
        );
    }

    #[test]
    fn results_without_schedule_pass() {
        let mut request = ScheduleRequest::new(vec!["ada"], vec![0_i64]);
        request.config.min_total = 0;
        let spec = ScheduleSpec::new(request).expect("valid request");
        let result =
            ScheduleResult::<&str, i64>::without_solution(spec, SolveStatus::Infeasible, None);

        assert_eq!(result.verify(), Ok(()));
    }
}
