use crate::core::{
    domain::{
        error::{ProtocolError, RedfishResult},
        model::{redfish_target::RedfishTarget, system_collection::SystemCollection},
    },
    infrastructure::transport::{RedfishRequest, Transport},
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

/// Well-known path of the Redfish systems collection.
pub const SYSTEMS_COLLECTION_PATH: &str = "/redfish/v1/Systems";

/// Locates the single computer system a BMC manages.
///
/// A controller that lists zero or several systems is refused rather than
/// guessed at: acting on the wrong server is worse than not acting.
pub struct SystemResolver<'a> {
    transport: &'a dyn Transport,
}

impl<'a> SystemResolver<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Fetches the systems collection and returns the absolute URL of its only member.
    ///
    /// # Errors
    /// - `RedfishError::Transport` if the collection cannot be fetched
    /// - `RedfishError::Protocol` for a non-200 status, a malformed body, or
    ///   a member path that does not resolve on this host
    /// - `RedfishError::Cardinality` when the collection does not hold exactly one member
    pub async fn execute(&self, target: &RedfishTarget) -> RedfishResult<Url> {
        let url = target.base_url().join(SYSTEMS_COLLECTION_PATH)?;
        let collection: SystemCollection =
            fetch_resource(self.transport, url, "systems collection").await?;

        if collection.count_mismatch() {
            tracing::debug!(
                declared = ?collection.declared_count,
                parsed = collection.members.len(),
                "systems collection count disagrees with its members, using parsed members"
            );
        }

        let member = collection.single_member()?;
        Ok(target.base_url().join(member)?)
    }
}

/// GETs a resource, requires 200 (OK) and decodes the body.
pub(crate) async fn fetch_resource<T>(
    transport: &dyn Transport,
    url: Url,
    resource: &'static str,
) -> RedfishResult<T>
where
    T: DeserializeOwned,
{
    let response = transport.send(RedfishRequest::get(url.clone())).await?;

    if response.status != StatusCode::OK {
        return Err(ProtocolError::UnexpectedStatus {
            url: url.to_string(),
            status: response.status,
            body: response.body_text(),
        }
        .into());
    }

    serde_json::from_slice(&response.body).map_err(|e| {
        ProtocolError::MalformedBody {
            resource,
            url: url.to_string(),
            message: e.to_string(),
            body: response.body_text(),
        }
        .into()
    })
}
