use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("sign-in rejected: {0}")]
    Rejected(String),
    #[error("authentication service unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, SubmissionError>;
