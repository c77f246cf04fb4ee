use super::FilterField;
use thiserror::Error;

/// A malformed request. Fails only the request that carried it.
#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("Invalid id '{value}' for filter {field}")]
    InvalidId { field: FilterField, value: String },

    #[error("Unknown filter: {0}")]
    UnknownFilter(String),
}
