use crate::core::domain::error::ValidationError;

const MAX_USERNAME_LENGTH: usize = 256;

/// A validated BMC account name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedfishUsername(String);

impl RedfishUsername {
    /// Validates and wraps a username.
    pub fn new(username: impl Into<String>) -> Result<Self, ValidationError> {
        let username = username.into();
        validate_username(&username)?;
        Ok(Self(username))
    }

    /// Creates a new username without validation.
    #[cfg(test)]
    pub(crate) fn new_unchecked(username: String) -> Self {
        Self(username)
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validates a username for HTTP basic authentication.
///
/// BMC vendors disagree on which characters an account may contain, so only
/// what basic authentication itself cannot carry is rejected.
pub(crate) fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::Field {
            field: "username".to_string(),
            message: "Username cannot be empty".to_string(),
        });
    }
    if username.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::Format(format!(
            "Username cannot exceed {} characters",
            MAX_USERNAME_LENGTH
        )));
    }
    if username.contains(':') {
        return Err(ValidationError::Format(
            "Username cannot contain ':' (reserved by basic authentication)".to_string(),
        ));
    }
    if username.chars().any(char::is_control) {
        return Err(ValidationError::Format(
            "Username cannot contain control characters".to_string(),
        ));
    }
    Ok(())
}
