//! Domain model for the `/redfish/v1/Systems` collection.
//!
//! Only the fields needed to locate the computer system are modelled; every
//! other property (vendor `Oem` blocks, `@odata.context`, `Name`, ...) is ignored.

use crate::core::domain::error::CardinalityError;
use serde::{Deserialize, Deserializer, Serialize};

/// A Redfish resource collection as returned by `GET /redfish/v1/Systems`.
///
/// Wire mapping:
/// - `Members` -> [`members`](Self::members) (required)
/// - `Members@odata.count` -> [`declared_count`](Self::declared_count) (optional)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SystemCollection {
    /// Links to the member resources, in server order.
    #[serde(rename = "Members")]
    pub members: Vec<ODataLink>,
    /// Member count as declared by the server. Informational only; a value
    /// that is not a non-negative integer reads as `None`.
    #[serde(
        rename = "Members@odata.count",
        default,
        deserialize_with = "deserialize_lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub declared_count: Option<u64>,
}

/// A Redfish link object: `{"@odata.id": "/redfish/v1/..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ODataLink {
    #[serde(rename = "@odata.id")]
    pub odata_id: String,
}

fn deserialize_lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(serde_json::Value::as_u64))
}

impl SystemCollection {
    /// Returns `true` when the declared count disagrees with the parsed members.
    pub fn count_mismatch(&self) -> bool {
        self.declared_count
            .is_some_and(|declared| declared != self.members.len() as u64)
    }

    /// Returns the path of the only member, judged by the parsed member list.
    ///
    /// # Errors
    /// `CardinalityError::Empty` for no members, `CardinalityError::Multiple`
    /// for more than one.
    pub fn single_member(&self) -> Result<&str, CardinalityError> {
        match self.members.as_slice() {
            [] => Err(CardinalityError::Empty),
            [only] => Ok(&only.odata_id),
            many => Err(CardinalityError::Multiple { count: many.len() }),
        }
    }
}
