use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid TASY exam code: {0:?}")]
    InvalidExamCode(String),
    #[error("unknown exam category: {0}")]
    UnknownCategory(String),
    #[error("unknown protocol: {0}")]
    UnknownProtocol(String),
    #[error("invalid facility code {code} for {name:?}: codes must be positive integers")]
    InvalidFacilityCode { name: String, code: i64 },
}

pub type Result<T> = std::result::Result<T, ModelError>;
