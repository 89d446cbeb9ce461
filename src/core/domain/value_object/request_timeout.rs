use crate::core::domain::error::ValidationError;
use std::time::Duration;

/// Default bound on a single HTTP exchange.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A validated, non-zero bound on one request/response exchange
/// (connect, write and read together).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTimeout(Duration);

impl RequestTimeout {
    /// Validates and wraps a timeout.
    pub fn new(timeout: Duration) -> Result<Self, ValidationError> {
        validate_timeout(timeout)?;
        Ok(Self(timeout))
    }

    /// Creates a new timeout without validation.
    #[cfg(test)]
    pub(crate) fn new_unchecked(timeout: Duration) -> Self {
        Self(timeout)
    }

    /// Returns the timeout duration.
    pub fn get(&self) -> Duration {
        self.0
    }
}

impl Default for RequestTimeout {
    fn default() -> Self {
        Self(DEFAULT_REQUEST_TIMEOUT)
    }
}

/// Validates a timeout.
pub(crate) fn validate_timeout(timeout: Duration) -> Result<(), ValidationError> {
    if timeout.is_zero() {
        return Err(ValidationError::Field {
            field: "timeout".to_string(),
            message: "Timeout cannot be 0".to_string(),
        });
    }
    Ok(())
}
