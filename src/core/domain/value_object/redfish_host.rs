use crate::core::domain::error::ValidationError;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

const MAX_HOSTNAME_LENGTH: usize = 253;
const MAX_LABEL_LENGTH: usize = 63;

/// A validated BMC address: a hostname or IP literal with an optional port.
///
/// Accepted forms are `bmc.example.com`, `bmc.example.com:8443`, `10.0.0.5`,
/// `10.0.0.5:443`, `[fe80::1]` and `[fe80::1]:443`. Schemes, paths and
/// credentials are rejected; the transport always speaks HTTPS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedfishHost(String);

impl RedfishHost {
    /// Validates and wraps a host string.
    pub fn new(host: impl Into<String>) -> Result<Self, ValidationError> {
        let host = host.into();
        validate_host(&host)?;
        Ok(Self(host))
    }

    /// Creates a new host without validation.
    #[cfg(test)]
    pub(crate) fn new_unchecked(host: String) -> Self {
        Self(host)
    }

    /// Returns the host (and port, if any) as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RedfishHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validates a `host[:port]` string.
pub(crate) fn validate_host(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Field {
            field: "host".to_string(),
            message: "Host cannot be empty".to_string(),
        });
    }

    if value.contains("://") || value.contains(['/', '@', '?', '#', ' ']) {
        return Err(ValidationError::Format(
            "Host must be a bare address with an optional port (host or host:port)".to_string(),
        ));
    }

    let (name, port) = split_port(value)?;
    if let Some(port) = port {
        validate_port(port)?;
    }

    if let Some(literal) = name.strip_prefix('[') {
        let literal = literal.strip_suffix(']').ok_or_else(|| {
            ValidationError::Format("Unterminated IPv6 address literal".to_string())
        })?;
        return literal.parse::<Ipv6Addr>().map(|_| ()).map_err(|_| {
            ValidationError::Format(format!("Invalid IPv6 address literal: {}", literal))
        });
    }

    if name.parse::<Ipv4Addr>().is_ok() {
        return Ok(());
    }

    if name.len() > MAX_HOSTNAME_LENGTH {
        return Err(ValidationError::ConstraintViolation(format!(
            "Host length exceeds maximum of {} characters",
            MAX_HOSTNAME_LENGTH
        )));
    }

    for label in name.split('.') {
        validate_label(label)?;
    }

    Ok(())
}

fn split_port(value: &str) -> Result<(&str, Option<&str>), ValidationError> {
    // Bracketed IPv6 literal, possibly followed by a port.
    if value.starts_with('[') {
        return match value.rfind("]:") {
            Some(idx) => Ok((&value[..=idx], Some(&value[idx + 2..]))),
            None => Ok((value, None)),
        };
    }

    match value.split_once(':') {
        Some((_, port)) if port.contains(':') => Err(ValidationError::Format(
            "IPv6 addresses must be enclosed in brackets".to_string(),
        )),
        Some((name, port)) => Ok((name, Some(port))),
        None => Ok((value, None)),
    }
}

fn validate_port(port: &str) -> Result<(), ValidationError> {
    match port.parse::<u16>() {
        Ok(0) | Err(_) => Err(ValidationError::Field {
            field: "port".to_string(),
            message: format!("Port must be a number between 1 and 65535 (got '{}')", port),
        }),
        Ok(_) => Ok(()),
    }
}

fn validate_label(label: &str) -> Result<(), ValidationError> {
    if label.is_empty() || label.len() > MAX_LABEL_LENGTH {
        return Err(ValidationError::Format(format!(
            "Label must be between 1 and {} characters",
            MAX_LABEL_LENGTH
        )));
    }

    // `_` is outside RFC 1035 but common in BMC hostnames.
    if !label
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::Format(
            "Label can only contain alphanumeric characters, hyphens and underscores".to_string(),
        ));
    }

    if label.starts_with('-') || label.ends_with('-') {
        return Err(ValidationError::Format(
            "Label cannot start or end with hyphen".to_string(),
        ));
    }

    Ok(())
}
