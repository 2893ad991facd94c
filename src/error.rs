use thiserror::Error;

/// Errors raised by the session and job stores.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error("job not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type PortalResult<T> = Result<T, PortalError>;

/// Fails with `Validation` when a required text field is blank.
pub fn require(field: &str, value: &str) -> PortalResult<()> {
    if value.trim().is_empty() {
        return Err(PortalError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
