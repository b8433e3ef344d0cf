//! Helpers to run the solver binary in integration tests.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;
use std::time::Duration;

use wait_timeout::ChildExt;

const TEST_TIMEOUT: Duration = Duration::from_secs(60);

/// The output of a finished run of the solver binary.
#[derive(Debug)]
pub(crate) struct Run {
    pub(crate) success: bool,
    pub(crate) stdout: String,
}

impl Run {
    /// The lines of standard output which are not log messages.
    pub(crate) fn output_lines(&self) -> Vec<&str> {
        self.stdout
            .lines()
            .filter(|line| !line.starts_with('%'))
            .collect()
    }
}

pub(crate) fn demo_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../demos")
        .join(name)
}

/// Runs the solver on `instance_path`; `run_name` has to be unique among the tests.
pub(crate) fn run_solver(instance_path: impl AsRef<Path>, run_name: &str, args: &[&str]) -> Run {
    let solver = PathBuf::from(env!("CARGO_BIN_EXE_roster-solver"));
    let log_file_path = std::env::temp_dir().join(format!(
        "roster-solver-{}-{run_name}.log",
        std::process::id()
    ));

    let mut child = Command::new(solver)
        .args(args)
        .arg(instance_path.as_ref())
        .stdout(File::create(&log_file_path).expect("Failed to create log file."))
        .stderr(Stdio::null())
        .stdin(Stdio::null())
        .spawn()
        .expect("Failed to run solver.");

    let status = match child.wait_timeout(TEST_TIMEOUT) {
        Ok(Some(status)) => status,
        Ok(None) => panic!("solver took more than {} seconds", TEST_TIMEOUT.as_secs()),
        Err(e) => panic!("error waiting for solver: {e}"),
    };

    let stdout = std::fs::read_to_string(&log_file_path).expect("Failed to read log file.");
    std::fs::remove_file(&log_file_path).expect("Failed to remove log file.");

    Run {
        success: status.success(),
        stdout,
    }
}
