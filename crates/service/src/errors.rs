use thiserror::Error;

/// Rejection reasons for record store operations.
///
/// None of these are fatal: each one is a refused request and the store is
/// left exactly as it was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The payload could not be decoded as JSON.
    #[error("parse error: {0}")]
    Parse(String),
    /// The decoded payload is not an object with a usable `name`, or a
    /// required name argument was missing.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A record with this name is already stored.
    #[error("record {0} already exists")]
    Conflict(String),
    /// No record with this name is stored.
    #[error("record {0} not found")]
    NotFound(String),
}

impl ServiceError {
    pub fn invalid(msg: impl Into<String>) -> Self { Self::InvalidInput(msg.into()) }
    pub fn not_found(name: &str) -> Self { Self::NotFound(name.to_string()) }
    pub fn conflict(name: &str) -> Self { Self::Conflict(name.to_string()) }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Parse(err.to_string())
    }
}
