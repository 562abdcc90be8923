//! Error types for festivos-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FestivosError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid year: {0}")]
    InvalidYear(String),

    #[error("Rule group {0} not found")]
    GroupNotFound(i64),

    #[error("Malformed rule: {0}")]
    MalformedRule(String),

    #[error("Rule store error: {0}")]
    Store(String),

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),
}

impl FestivosError {
    /// HTTP-equivalent status class: 400 for bad input, 404 for missing rule
    /// data, 500 for everything else.
    pub fn status_code(&self) -> u16 {
        match self {
            FestivosError::InvalidDate(_) | FestivosError::InvalidYear(_) => 400,
            FestivosError::GroupNotFound(_) => 404,
            FestivosError::MalformedRule(_)
            | FestivosError::Store(_)
            | FestivosError::DateOutOfRange(_) => 500,
        }
    }

    /// `true` when the caller's input was rejected before any rule data was read.
    pub fn is_client_error(&self) -> bool {
        self.status_code() == 400
    }
}

pub type Result<T> = std::result::Result<T, FestivosError>;
