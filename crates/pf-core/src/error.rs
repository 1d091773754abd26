use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Polynomial coefficient count mismatch: expected {expected}, got {got}")]
    DegreeMismatch { expected: usize, got: usize },

    #[error("Least-squares fit failed: {what}")]
    FitFailed { what: &'static str },
}
