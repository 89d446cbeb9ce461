//! Domain model for a Redfish ComputerSystem resource.
//!
//! Redfish keys its action and annotation properties with characters that are
//! not valid Rust identifiers (`#ComputerSystem.Reset`,
//! `ResetType@Redfish.AllowableValues`), so every field carries an explicit
//! `serde(rename)`. Unknown properties are ignored; the modelled ones are
//! all required.

use serde::{Deserialize, Serialize};

/// The parts of `GET /redfish/v1/Systems/{id}` needed for power control.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ComputerSystem {
    /// Server-defined power state token, e.g. "On", "Off", "PoweringOn".
    #[serde(rename = "PowerState")]
    pub power_state: String,
    #[serde(rename = "Actions")]
    pub actions: SystemActions,
}

/// The `Actions` object of a ComputerSystem.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SystemActions {
    #[serde(rename = "#ComputerSystem.Reset")]
    pub reset: ResetAction,
}

/// The `#ComputerSystem.Reset` action descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResetAction {
    /// Accepted `ResetType` values, in server order.
    #[serde(rename = "ResetType@Redfish.AllowableValues")]
    pub allowable_values: Vec<String>,
    /// Path the reset request must be POSTed to.
    #[serde(rename = "target")]
    pub target: String,
}

impl ComputerSystem {
    pub fn power_state(&self) -> &str {
        &self.power_state
    }

    pub fn allowed_reset_types(&self) -> &[String] {
        &self.actions.reset.allowable_values
    }

    pub fn reset_target(&self) -> &str {
        &self.actions.reset.target
    }
}
