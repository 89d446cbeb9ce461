use crate::{
    core::{
        domain::{
            error::{ActionFailure, RedfishResult, ValidationError},
            model::{
                action_outcome::ActionOutcome, computer_system::ComputerSystem,
                redfish_target::RedfishTarget,
            },
        },
        infrastructure::transport::{RedfishRequest, Transport},
    },
    power::application::{
        request::reset_request::ResetRequest,
        service::system_resolver::{SystemResolver, fetch_resource},
    },
};
use reqwest::StatusCode;

/// Reads and changes the power state of the BMC's computer system.
///
/// Every operation resolves the system and fetches it fresh; nothing is cached
/// between calls, so the reset target is rediscovered each time.
pub struct PowerService<'a> {
    transport: &'a dyn Transport,
}

impl<'a> PowerService<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Resolves and fetches the computer system resource.
    pub async fn system(&self, target: &RedfishTarget) -> RedfishResult<ComputerSystem> {
        let url = SystemResolver::new(self.transport).execute(target).await?;
        fetch_resource(self.transport, url, "computer system").await
    }

    /// Returns the `PowerState` token verbatim.
    pub async fn power_state(&self, target: &RedfishTarget) -> RedfishResult<String> {
        Ok(self.system(target).await?.power_state)
    }

    /// Returns the accepted `ResetType` values in server order.
    pub async fn allowed_actions(&self, target: &RedfishTarget) -> RedfishResult<Vec<String>> {
        Ok(self.system(target).await?.actions.reset.allowable_values)
    }

    /// Locates the system and submits `{"ResetType": reset_type}` to its reset target.
    ///
    /// The value is not checked against the allowed list; the server decides.
    ///
    /// # Returns
    ///
    /// * `ActionOutcome::Applied` for 200 or 204
    /// * `ActionOutcome::AppliedIgnoredConflict` for 409 when `ignore_conflict` is set
    /// * `ActionOutcome::Failed` for 409 without the flag, or any other status
    ///
    /// # Errors
    ///
    /// Transport, protocol and cardinality failures while locating the system,
    /// and transport failures of the submission itself.
    pub async fn perform_action(
        &self,
        target: &RedfishTarget,
        reset_type: &str,
        ignore_conflict: bool,
    ) -> RedfishResult<ActionOutcome> {
        let system = self.system(target).await?;
        self.submit_reset(target, &system, reset_type, ignore_conflict)
            .await
    }

    /// Submits a reset to the target of an already fetched system.
    pub async fn submit_reset(
        &self,
        target: &RedfishTarget,
        system: &ComputerSystem,
        reset_type: &str,
        ignore_conflict: bool,
    ) -> RedfishResult<ActionOutcome> {
        let url = target.base_url().join(system.reset_target())?;

        let body = serde_json::to_value(ResetRequest::new(reset_type)).map_err(|e| {
            ValidationError::Format(format!("cannot encode reset request: {}", e))
        })?;

        let response = self.transport.send(RedfishRequest::post(url, body)).await?;
        let outcome = classify_reset_response(response.status, response.body_text(), ignore_conflict);

        tracing::debug!(reset_type, status = %response.status, ?outcome, "reset action submitted");
        Ok(outcome)
    }
}

/// Maps the status of a reset submission onto an [`ActionOutcome`].
pub(crate) fn classify_reset_response(
    status: StatusCode,
    body: String,
    ignore_conflict: bool,
) -> ActionOutcome {
    match status {
        StatusCode::OK | StatusCode::NO_CONTENT => ActionOutcome::Applied,
        StatusCode::CONFLICT if ignore_conflict => ActionOutcome::AppliedIgnoredConflict,
        StatusCode::CONFLICT => ActionOutcome::Failed(ActionFailure::Conflict { body }),
        status => ActionOutcome::Failed(ActionFailure::UnexpectedStatus { status, body }),
    }
}
