use std::fmt::Display;

use roster_solver::ValidationError;
use thiserror::Error;

use crate::request_file::RequestFileError;

pub(crate) type RosterResult<T> = Result<T, RosterError>;

#[derive(Error, Debug)]
pub(crate) enum RosterError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("The file {0} is not supported, expected a '.toml' request file.")]
    InvalidInstanceFile(String),
    #[error("The request file is not valid TOML, more details: {0}")]
    InvalidToml(#[from] toml::de::Error),
    #[error("The request file is invalid, more details: {0}")]
    RequestFile(#[from] RequestFileError),
    #[error("The request was rejected: {0}")]
    Validation(#[from] ValidationError),
}

impl RosterError {
    pub(crate) fn invalid_instance(path: impl Display) -> Self {
        Self::InvalidInstanceFile(format!("{path}"))
    }
}
