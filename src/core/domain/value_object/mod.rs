mod redfish_host;
mod redfish_password;
mod redfish_url;
mod redfish_username;
mod request_timeout;

pub use redfish_host::RedfishHost;
pub use redfish_password::RedfishPassword;
pub use redfish_url::RedfishUrl;
pub use redfish_username::RedfishUsername;
pub use request_timeout::{DEFAULT_REQUEST_TIMEOUT, RequestTimeout};
