use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unknown calculator: {0}")]
    UnknownCalculator(String),
    #[error("Unknown field '{field}' for calculator '{calculator}'")]
    UnknownField { calculator: String, field: String },
    #[error("Invalid field assignment '{0}', expected id=value")]
    InvalidAssignment(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
