use reqwest::StatusCode;
use thiserror::Error;

/// The main error type for Redfish power operations.
///
/// This enum represents all possible errors that can occur while talking
/// to a BMC: transport failures, protocol violations, ambiguous system
/// collections, rejected power actions and invalid configuration.
#[derive(Error, Debug)]
pub enum RedfishError {
    /// The HTTP exchange itself failed: connection refused, TLS validation,
    /// or the request timeout elapsed before a response was received.
    ///
    /// # Fields
    /// * `message` - A description of what went wrong during the exchange
    /// * `timed_out` - Whether the configured request timeout elapsed
    #[error("Transport error: {message}")]
    Transport { message: String, timed_out: bool },

    /// The server answered, but not in the shape or status that was required
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The systems collection does not contain exactly one system
    #[error("Collection error: {0}")]
    Cardinality(#[from] CardinalityError),

    /// The server rejected a submitted power action
    #[error("Action failed: {0}")]
    Action(#[from] ActionFailure),

    /// Represents configuration validation failures
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl RedfishError {
    pub(crate) fn transport(message: impl Into<String>) -> Self {
        RedfishError::Transport {
            message: message.into(),
            timed_out: false,
        }
    }

    /// Returns the raw response body attached to this error, if the server sent one.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            RedfishError::Protocol(ProtocolError::UnexpectedStatus { body, .. })
            | RedfishError::Protocol(ProtocolError::MalformedBody { body, .. }) => Some(body),
            RedfishError::Action(failure) => Some(failure.response_body()),
            _ => None,
        }
    }

    /// Returns the HTTP status code attached to this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RedfishError::Protocol(ProtocolError::UnexpectedStatus { status, .. }) => Some(*status),
            RedfishError::Action(failure) => Some(failure.status()),
            _ => None,
        }
    }
}

/// Violations of the Redfish wire contract.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// A resource read answered with something other than 200 (OK)
    #[error("wrong response status code from {url} - expected: 200 (OK), got: {status}")]
    UnexpectedStatus {
        url: String,
        status: StatusCode,
        body: String,
    },

    /// The body is not JSON, or a required field is absent or mistyped
    #[error("failed to parse {resource} from {url}: {message}")]
    MalformedBody {
        resource: &'static str,
        url: String,
        message: String,
        body: String,
    },

    /// A resource path announced by the server cannot be turned into a URL
    #[error("invalid resource path '{path}': {message}")]
    InvalidPath { path: String, message: String },
}

/// The systems collection must hold exactly one member.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardinalityError {
    #[error("no systems found in the redfish systems collection")]
    Empty,

    #[error("multiple systems found in the redfish systems collection ({count}) - not supported")]
    Multiple { count: usize },
}

/// Why a submitted reset action did not take effect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionFailure {
    /// 409 without the ignore-conflict flag; the requested state may already hold
    #[error("conflict reported by the server - the requested power state may already be in effect (use --ignore to treat this as success)")]
    Conflict { body: String },

    #[error("wrong response status code - expected: 200 (OK) or 204 (No Content), got: {status}")]
    UnexpectedStatus { status: StatusCode, body: String },
}

impl ActionFailure {
    pub fn status(&self) -> StatusCode {
        match self {
            ActionFailure::Conflict { .. } => StatusCode::CONFLICT,
            ActionFailure::UnexpectedStatus { status, .. } => *status,
        }
    }

    pub fn response_body(&self) -> &str {
        match self {
            ActionFailure::Conflict { body } | ActionFailure::UnexpectedStatus { body, .. } => {
                body
            }
        }
    }
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Type alias for Results that may fail with a RedfishError
pub type RedfishResult<T> = Result<T, RedfishError>;
