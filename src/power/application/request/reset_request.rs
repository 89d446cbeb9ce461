use serde::Serialize;

/// Body of a `#ComputerSystem.Reset` submission: `{"ResetType": "<value>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetRequest {
    #[serde(rename = "ResetType")]
    pub reset_type: String,
}

impl ResetRequest {
    pub fn new(reset_type: impl Into<String>) -> Self {
        Self {
            reset_type: reset_type.into(),
        }
    }
}
