use pf_core::CoreError;
use pf_hydraulics::HydroError;
use thiserror::Error;

pub type MatchResult<T> = Result<T, MatchError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error(transparent)]
    Hydro(#[from] HydroError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
