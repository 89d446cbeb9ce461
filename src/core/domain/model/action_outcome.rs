use crate::core::domain::error::{ActionFailure, RedfishError, RedfishResult};

/// Result of submitting a reset action to the BMC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// 200 (OK) or 204 (No Content).
    Applied,
    /// 409 (Conflict) while conflicts were explicitly ignored.
    AppliedIgnoredConflict,
    /// The server rejected the action.
    Failed(ActionFailure),
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, ActionOutcome::Failed(_))
    }

    /// Turns a `Failed` outcome into `RedfishError::Action`, passing successes through.
    pub fn into_result(self) -> RedfishResult<Self> {
        match self {
            ActionOutcome::Failed(failure) => Err(RedfishError::Action(failure)),
            outcome => Ok(outcome),
        }
    }
}
