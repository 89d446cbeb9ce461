mod build_info;
mod core;
mod power;


pub use crate::build_info::BuildInfo;
pub use crate::core::domain::{
    error::{
        ActionFailure, CardinalityError, ProtocolError, RedfishError, RedfishResult,
        ValidationError,
    },
    model::{
        action_outcome::ActionOutcome,
        computer_system::{ComputerSystem, ResetAction, SystemActions},
        redfish_target::{RedfishTarget, TlsMode},
        system_collection::{ODataLink, SystemCollection},
    },
    value_object::{
        DEFAULT_REQUEST_TIMEOUT, RedfishHost, RedfishPassword, RedfishUrl, RedfishUsername,
        RequestTimeout,
    },
};
pub use crate::core::infrastructure::transport::{
    HttpTransport, RawResponse, RedfishRequest, Transport,
};
pub use crate::power::application::request::reset_request::ResetRequest;
pub use crate::power::application::service::system_resolver::SYSTEMS_COLLECTION_PATH;

use crate::power::application::service::{
    power_service::PowerService, system_resolver::SystemResolver,
};
use std::time::Duration;
use url::Url;

/// A client for controlling server power through a BMC's Redfish service
///
/// This client provides:
/// - Discovery of the single computer system the BMC manages
/// - Reading the current power state and the accepted reset actions
/// - Submitting reset actions, optionally treating 409 (Conflict) as success
///
/// Every call talks to the BMC afresh; no discovery result is cached.
///
/// # Examples
///
/// ```no_run
/// use redpower::{ActionOutcome, RedpowerClient, RedfishResult, TlsMode};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> RedfishResult<()> {
///     let client = RedpowerClient::builder()
///         .host("bmc.example.com")
///         .credentials("root", "calvin")
///         .tls_mode(TlsMode::SkipVerify)
///         .build()?;
///
///     println!("power state: {}", client.power_state().await?);
///     if client.perform_action("On", true).await? == ActionOutcome::AppliedIgnoredConflict {
///         println!("already on");
///     }
///     Ok(())
/// }
/// ```
pub struct RedpowerClient {
    target: RedfishTarget,
    transport: Box<dyn Transport>,
}

/// Builder for RedpowerClient configuration
#[derive(Debug, Default)]
pub struct RedpowerClientBuilder {
    host: Option<String>,
    username: Option<String>,
    password: Option<String>,
    tls_mode: TlsMode,
    timeout: Option<Duration>,
}

impl RedpowerClientBuilder {
    /// BMC address: `host` or `host:port`.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Certificate trust policy. Defaults to [`TlsMode::Verify`].
    pub fn tls_mode(mut self, tls_mode: TlsMode) -> Self {
        self.tls_mode = tls_mode;
        self
    }

    /// Bound on each individual HTTP exchange. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validates the configuration and builds the client with an HTTPS transport.
    ///
    /// # Errors
    /// `RedfishError::Validation` for missing or malformed settings,
    /// `RedfishError::Transport` if the HTTP client cannot be created.
    pub fn build(self) -> RedfishResult<RedpowerClient> {
        let target = self.build_target()?;
        let transport = HttpTransport::new(&target)?;
        Ok(RedpowerClient::with_transport(target, transport))
    }

    /// Validates the configuration into a [`RedfishTarget`] without creating a transport.
    pub fn build_target(self) -> RedfishResult<RedfishTarget> {
        let host = RedfishHost::new(self.host.ok_or_else(|| missing("host"))?)?;
        let username = RedfishUsername::new(self.username.ok_or_else(|| missing("username"))?)?;
        let password = RedfishPassword::new(self.password.ok_or_else(|| missing("password"))?)?;
        let timeout = match self.timeout {
            Some(timeout) => RequestTimeout::new(timeout)?,
            None => RequestTimeout::default(),
        };
        let base_url = RedfishUrl::new(&host)?;

        Ok(RedfishTarget::new(
            host,
            username,
            password,
            self.tls_mode,
            timeout,
            base_url,
        ))
    }
}

fn missing(field: &str) -> ValidationError {
    ValidationError::Field {
        field: field.to_string(),
        message: format!("{} is required", field),
    }
}

impl RedpowerClient {
    /// Creates a new builder for RedpowerClient configuration
    pub fn builder() -> RedpowerClientBuilder {
        RedpowerClientBuilder::default()
    }

    /// Creates a client that sends its requests through a caller-supplied transport.
    pub fn with_transport(target: RedfishTarget, transport: impl Transport + 'static) -> Self {
        Self {
            target,
            transport: Box::new(transport),
        }
    }

    pub fn target(&self) -> &RedfishTarget {
        &self.target
    }

    /// Returns the absolute URL of the BMC's only computer system.
    ///
    /// # Errors
    /// Fails with `RedfishError::Cardinality` when the systems collection
    /// lists zero or several systems.
    pub async fn system_url(&self) -> RedfishResult<Url> {
        SystemResolver::new(self.transport.as_ref())
            .execute(&self.target)
            .await
    }

    /// Fetches the computer system resource.
    pub async fn system(&self) -> RedfishResult<ComputerSystem> {
        self.power_service().system(&self.target).await
    }

    /// Returns the server's `PowerState` token ("On", "Off", "PoweringOn", ...) unchanged.
    pub async fn power_state(&self) -> RedfishResult<String> {
        self.power_service().power_state(&self.target).await
    }

    /// Returns the reset actions the server accepts, in the order it lists them.
    pub async fn allowed_actions(&self) -> RedfishResult<Vec<String>> {
        self.power_service().allowed_actions(&self.target).await
    }

    /// Submits a reset action.
    ///
    /// With `ignore_conflict` set, a 409 (Conflict) answer, which BMCs use for
    /// "already on" / "already off", yields [`ActionOutcome::AppliedIgnoredConflict`].
    /// Rejections are reported as [`ActionOutcome::Failed`]; use
    /// [`ActionOutcome::into_result`] to turn them into errors.
    pub async fn perform_action(
        &self,
        reset_type: &str,
        ignore_conflict: bool,
    ) -> RedfishResult<ActionOutcome> {
        self.power_service()
            .perform_action(&self.target, reset_type, ignore_conflict)
            .await
    }

    /// Submits a reset action using the reset target of `system`.
    ///
    /// `system` should come from [`RedpowerClient::system`] in the same run;
    /// this lets a caller report progress between discovery and submission.
    pub async fn submit_reset(
        &self,
        system: &ComputerSystem,
        reset_type: &str,
        ignore_conflict: bool,
    ) -> RedfishResult<ActionOutcome> {
        self.power_service()
            .submit_reset(&self.target, system, reset_type, ignore_conflict)
            .await
    }

    fn power_service(&self) -> PowerService<'_> {
        PowerService::new(self.transport.as_ref())
    }
}
