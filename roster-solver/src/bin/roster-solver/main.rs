mod output;
mod request_file;
mod result;

use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use log::error;
use log::info;
use log::warn;
use log::LevelFilter;
use request_file::Instance;
use request_file::RequestFile;
use result::RosterError;
use result::RosterResult;
use roster_solver::optimise;
use roster_solver::options::BranchAndBoundOptions;
use roster_solver::solving::BranchAndBound;
use roster_solver::solving::HighsBackend;
use roster_solver::DatePoint;
use roster_solver::ScheduleRequest;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    /// The request to schedule, given as a '*.toml' file.
    ///
    /// The file lists the individuals and dates, per-individual overrides of the number of talks,
    /// unavailability, and a `[config]` section overriding the default bounds.
    instance_path: PathBuf,

    /// The time budget of the solver in seconds. Overrides `time_limit` of the request file.
    ///
    /// When the budget runs out the best schedule found so far is reported.
    #[arg(short = 't', long = "time-limit")]
    time_limit: Option<f64>,

    /// The seed of the solver's random number generator. Overrides `random_seed` of the request
    /// file.
    ///
    /// Without a seed a fresh one is drawn and logged, so the run can be reproduced.
    #[arg(long = "random-seed")]
    random_seed: Option<u64>,

    /// The backend which solves the integer program.
    #[arg(long, value_enum, default_value_t)]
    backend: Backend,

    /// Stop the search after this many decisions, in addition to the time limit.
    ///
    /// Only the branch-and-bound backend counts decisions.
    #[arg(long = "decision-budget")]
    decision_budget: Option<u64>,

    /// Enables log message output from the solver.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Print the search statistics of the branch-and-bound backend after solving.
    #[arg(short = 's', long = "log-statistics")]
    log_statistics: bool,
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Solve with the HiGHS mixed-integer solver.
    #[default]
    Highs,
    /// Solve with the built-in branch-and-bound search.
    BranchAndBound,
}

fn configure_logging(verbose: bool) {
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| writeln!(buf, "% {}", record.args()))
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> RosterResult<()> {
    let args = Args::parse();
    configure_logging(args.verbose);

    if roster_solver::asserts::ROSTER_ASSERT_LEVEL_DEFINITION
        >= roster_solver::asserts::ROSTER_ASSERT_MODERATE
    {
        warn!(
            "Potential performance degradation: the assert level is set to {}, meaning many debug asserts are active.",
            roster_solver::asserts::ROSTER_ASSERT_LEVEL_DEFINITION
        );
    }

    if args.instance_path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
        return Err(RosterError::invalid_instance(args.instance_path.display()));
    }

    let contents = std::fs::read_to_string(&args.instance_path)?;
    let mut instance = RequestFile::parse(&contents)?.into_instance()?;

    let config = instance.config_mut();
    if let Some(time_limit) = args.time_limit {
        config.time_limit = time_limit;
    }
    if args.random_seed.is_some() {
        config.random_seed = args.random_seed;
    }

    match instance {
        Instance::Calendar(request) => schedule(request, &args),
        Instance::Ordinal(request) => schedule(request, &args),
    }
}

fn schedule<D: DatePoint + Display>(
    request: ScheduleRequest<String, D>,
    args: &Args,
) -> RosterResult<()> {
    let (result, statistics) = match args.backend {
        Backend::Highs => {
            if args.decision_budget.is_some() || args.log_statistics {
                warn!("Decision budgets and search statistics only apply to branch and bound");
            }
            (optimise(request, &mut HighsBackend)?, None)
        }
        Backend::BranchAndBound => {
            let mut backend = BranchAndBound::new(BranchAndBoundOptions {
                decision_budget: args.decision_budget,
                ..Default::default()
            });
            let result = optimise(request, &mut backend)?;
            (result, backend.statistics())
        }
    };

    if let Err(violations) = result.verify() {
        for violation in violations {
            warn!("The schedule is invalid: {violation}");
        }
    }

    let mut stdout = std::io::stdout().lock();
    output::write_result(&mut stdout, &result)?;

    if args.log_statistics {
        if let Some(statistics) = statistics {
            writeln!(stdout, "{statistics}")?;
        }
    }

    Ok(())
}
