#![cfg(test)]

use chrono::Duration;
use chrono::NaiveDate;
use roster_solver::optimise;
use roster_solver::optimise_with_default_backend;
use roster_solver::results::Presentation;
use roster_solver::results::ScheduleStatus;
use roster_solver::solving::BranchAndBound;
use roster_solver::solving::BranchAndBoundOptions;
use roster_solver::ScheduleRequest;
use roster_solver::ValidationError;

fn biweekly_dates(first: NaiveDate, count: i64) -> Vec<NaiveDate> {
    (0..count).map(|week| first + Duration::weeks(2 * week)).collect()
}

fn group_meeting() -> ScheduleRequest<String, NaiveDate> {
    let individuals = (1..=8).map(|index| format!("member {index}")).collect::<Vec<_>>();
    let first = NaiveDate::from_ymd_opt(2024, 1, 8).expect("valid date");
    let dates = biweekly_dates(first, 8);

    let leaving = individuals[7].clone();
    let mut request = ScheduleRequest::new(individuals, dates.clone());
    let _ = request.presentations_modify.insert(leaving.clone(), 1);
    let _ = request.journals_modify.insert(leaving.clone(), 0);
    let _ = request.cannot_attend.insert(leaving, dates[2..].to_vec());
    request.config.time_limit = 10.0;
    request.config.random_seed = Some(42);

    request
}

/// Ten research talks for five individuals, but only three slots on each of three dates.
fn overfull() -> ScheduleRequest<&'static str, i64> {
    let mut request = ScheduleRequest::new(vec!["a", "b", "c", "d", "e"], vec![1, 2, 3]);
    request.config.default_presentations = 2;
    request.config.default_journals = 0;
    request.config.min_total = 0;
    request.config.max_total = 3;
    request.config.min_presentations = 0;
    request.config.max_presentations = 3;
    request.config.time_limit = 10.0;
    request.config.random_seed = Some(1);

    request
}

#[test]
fn group_meeting_is_scheduled() {
    let request = group_meeting();
    let leaving = request.individuals[7].clone();
    let dates = request.dates.clone();

    let result = optimise_with_default_backend(request).expect("valid request");

    assert!(matches!(
        result.status(),
        ScheduleStatus::Optimal | ScheduleStatus::FeasibleWithinTimeLimit
    ));
    assert_eq!(result.verify(), Ok(()));

    let talks = dates
        .iter()
        .filter(|&date| result.get(&leaving, date) != Some(Presentation::None))
        .collect::<Vec<_>>();
    assert_eq!(talks.len(), 1);
    assert!(dates[..2].contains(talks[0]));
    assert_eq!(
        result.get(&leaving, talks[0]),
        Some(Presentation::Research)
    );

    let objective = result.objective_value().expect("a schedule was found");
    assert!(objective < 1.0, "objective {objective} is too large");
    let penalty = result.spacing_penalty().expect("a schedule was found");
    assert!((penalty - objective).abs() < 1e-6);
}

#[test]
fn group_meeting_talks_are_spread_out() {
    let mut request = group_meeting();
    request.config.time_limit = 30.0;

    let result = optimise_with_default_backend(request).expect("valid request");

    // The best schedule puts 4, 3, 2, 2, 2, 2, 3 and 4 talks on the dates, with a penalty of
    // about 0.435.
    let objective = result.objective_value().expect("a schedule was found");
    assert!(objective > 0.435);
    assert!(objective < 0.5, "objective {objective} is far from the optimum");
}

#[test]
fn every_date_respects_its_bounds() {
    let request = group_meeting();
    let dates = request.dates.clone();

    let result = optimise_with_default_backend(request).expect("valid request");

    for date in dates.iter() {
        let counts = result.date_counts(date).expect("a schedule was found");
        assert!((2..=4).contains(&counts.total()));
        assert!((1..=3).contains(&counts.research));
        assert!(counts.journal <= 1);
    }
}

#[test]
fn too_many_talks_are_infeasible() {
    let result = optimise_with_default_backend(overfull()).expect("valid request");

    assert_eq!(result.status(), ScheduleStatus::Infeasible);
    assert_eq!(result.assignment(), None);
    assert_eq!(result.objective_value(), None);
}

#[test]
fn raising_requirements_keeps_infeasible_requests_infeasible() {
    for individual in ["a", "c", "e"] {
        let mut request = overfull();
        let _ = request.presentations_modify.insert(individual, 3);

        let result = optimise_with_default_backend(request).expect("valid request");

        assert_eq!(result.status(), ScheduleStatus::Infeasible);
    }
}

#[test]
fn lowering_requirements_makes_the_request_feasible() {
    let mut request = overfull();
    let _ = request.presentations_modify.insert("a", 1);

    let result = optimise_with_default_backend(request).expect("valid request");

    assert_eq!(result.status(), ScheduleStatus::Optimal);
    assert_eq!(result.verify(), Ok(()));
}

#[test]
fn duplicate_dates_are_rejected_before_solving() {
    let first = NaiveDate::from_ymd_opt(2024, 1, 8).expect("valid date");
    let request = ScheduleRequest::new(vec!["ada", "bob"], vec![first, first]);

    let result = optimise_with_default_backend(request);

    assert!(matches!(result, Err(ValidationError::DuplicateDate { .. })));
}

#[test]
fn solving_with_a_fixed_seed_is_reproducible() {
    let solve = || {
        let mut request = ScheduleRequest::new(vec!["ada", "bob", "cy"], vec![0_i64, 5, 9, 20]);
        request.config.default_presentations = 1;
        request.config.default_journals = 0;
        request.config.min_total = 0;
        request.config.random_seed = Some(99);

        let mut backend = BranchAndBound::new(BranchAndBoundOptions {
            decision_budget: Some(5),
            ..Default::default()
        });
        optimise(request, &mut backend).expect("valid request")
    };

    assert_eq!(solve(), solve());
}
