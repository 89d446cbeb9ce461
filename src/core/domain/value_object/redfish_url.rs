use crate::core::domain::{
    error::{ProtocolError, ValidationError},
    value_object::redfish_host::RedfishHost,
};
use url::Url;

/// Represents the validated base URL of a BMC's Redfish service
///
/// Built from a [`RedfishHost`] as `https://{host}/`. Every resource path the
/// service announces (collection members, action targets) is resolved against
/// this base, and must stay on the same origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedfishUrl(Url);

impl RedfishUrl {
    pub fn new(host: &RedfishHost) -> Result<Self, ValidationError> {
        let url = Url::parse(&format!("https://{}/", host.as_str()))
            .map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;
        validate_url(&url)?;
        Ok(Self(url))
    }

    /// Wraps an already-parsed base URL without validation.
    #[cfg(test)]
    pub(crate) fn new_unchecked(url: Url) -> Self {
        Self(url)
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Resolves a server-supplied resource path against the base URL.
    ///
    /// # Errors
    /// Returns `ProtocolError::InvalidPath` when the path is empty, cannot be
    /// parsed, or points at a different origin than the BMC itself.
    pub fn join(&self, path: &str) -> Result<Url, ProtocolError> {
        if path.trim().is_empty() {
            return Err(ProtocolError::InvalidPath {
                path: path.to_string(),
                message: "resource path is empty".to_string(),
            });
        }

        let url = self.0.join(path).map_err(|e| ProtocolError::InvalidPath {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        if url.origin() != self.0.origin() {
            return Err(ProtocolError::InvalidPath {
                path: path.to_string(),
                message: format!("resource is outside of {}", self.0),
            });
        }

        Ok(url)
    }
}

/// Validates a base URL: HTTPS, a host, and nothing but the root path.
pub(crate) fn validate_url(url: &Url) -> Result<(), ValidationError> {
    if url.scheme() != "https" {
        return Err(ValidationError::ConstraintViolation(format!(
            "Invalid scheme '{}'. Redfish is only spoken over https",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ValidationError::Field {
            field: "host".to_string(),
            message: "URL has no host".to_string(),
        });
    }

    if !url.username().is_empty() || url.password().is_some() {
        return Err(ValidationError::Format(
            "Credentials cannot be embedded in the host".to_string(),
        ));
    }

    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(ValidationError::Format(
            "Host cannot carry a path, query or fragment".to_string(),
        ));
    }

    Ok(())
}
