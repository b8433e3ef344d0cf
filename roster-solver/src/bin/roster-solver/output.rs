use std::fmt::Display;
use std::hash::Hash;
use std::io::Write;

use roster_solver::results::Presentation;
use roster_solver::results::ScheduleResult;

/// Writes the status, the objective value and, when there is one, the schedule as a table with one
/// row per individual and one column per date.
///
/// Cells show `R` for a research talk, `J` for a journal-club talk, `x` when the individual cannot
/// attend and `-` otherwise.
pub(crate) fn write_result<Id, D>(
    out: &mut impl Write,
    result: &ScheduleResult<Id, D>,
) -> std::io::Result<()>
where
    Id: Display + Eq + Hash,
    D: Display + Eq + Hash,
{
    writeln!(out, "status: {}", result.status())?;

    let Some(assignment) = result.assignment() else {
        return Ok(());
    };
    if let Some(objective_value) = result.objective_value() {
        writeln!(out, "objective: {objective_value:.6}")?;
    }

    let individuals = result
        .individuals()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    let dates = result
        .dates()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();

    let name_width = individuals.iter().map(String::len).max().unwrap_or(0);
    let column_width = dates.iter().map(String::len).max().unwrap_or(0).max(1);

    write!(out, "{:name_width$}", "")?;
    for date in dates.iter() {
        write!(out, " {date:>column_width$}")?;
    }
    writeln!(out)?;

    for (individual_index, (individual, name)) in
        result.individuals().iter().zip(&individuals).enumerate()
    {
        write!(out, "{name:<name_width$}")?;
        for (date_index, date) in result.dates().iter().enumerate() {
            let cell = match assignment.get(individual_index, date_index) {
                Presentation::None if result.is_unavailable(individual, date) => "x".to_owned(),
                presentation => presentation.to_string(),
            };
            write!(out, " {cell:>column_width$}")?;
        }
        writeln!(out)?;
    }

    Ok(())
}
