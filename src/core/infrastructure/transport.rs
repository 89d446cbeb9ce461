//! HTTP transport that issues single authenticated Redfish requests.

use crate::core::domain::{
    error::{RedfishError, RedfishResult},
    model::redfish_target::RedfishTarget,
};
use async_trait::async_trait;
use reqwest::{
    Client, Method, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use std::error::Error as _;
use url::Url;

/// One request to a Redfish service.
#[derive(Debug, Clone, PartialEq)]
pub struct RedfishRequest {
    pub method: Method,
    pub url: Url,
    pub body: Option<serde_json::Value>,
}

impl RedfishRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            body: None,
        }
    }

    pub fn post(url: Url, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            url,
            body: Some(body),
        }
    }
}

/// Status and raw body of a completed exchange. The status is not interpreted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Body as text for diagnostics; invalid UTF-8 is replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends a single request and returns whatever the server answered.
///
/// Implementations fail only when no response was received (connection,
/// TLS or timeout). Non-success status codes are returned, not raised.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RedfishRequest) -> RedfishResult<RawResponse>;
}

/// `reqwest`-backed transport bound to one [`RedfishTarget`].
///
/// Every request carries basic authentication and `Accept: application/json`;
/// requests with a body also carry `Content-Type: application/json`. The
/// configured timeout bounds the whole exchange. Idle connections are not
/// kept, so nothing survives between requests.
#[derive(Debug)]
pub struct HttpTransport {
    http_client: Client,
    username: String,
    password: String,
}

impl HttpTransport {
    /// Creates a new `HttpTransport` for the given target.
    ///
    /// # Errors
    /// Returns `RedfishError::Transport` if the HTTP client cannot be built.
    pub fn new(target: &RedfishTarget) -> RedfishResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = Client::builder()
            .default_headers(default_headers)
            .danger_accept_invalid_certs(target.tls_mode().accepts_invalid_certs())
            .timeout(target.timeout().get())
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| {
                RedfishError::transport(format!("failed to build HTTP client: {}", describe(&e)))
            })?;

        Ok(Self {
            http_client,
            username: target.username().as_str().to_string(),
            password: target.password().as_str().to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: RedfishRequest) -> RedfishResult<RawResponse> {
        let RedfishRequest { method, url, body } = request;
        tracing::debug!(%method, %url, "sending redfish request");

        let mut req_builder = self
            .http_client
            .request(method.clone(), url.clone())
            .basic_auth(&self.username, Some(&self.password));

        if let Some(body) = body {
            req_builder = req_builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .json(&body);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| exchange_error(&method, &url, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| exchange_error(&method, &url, e))?;

        tracing::debug!(%method, %url, %status, bytes = body.len(), "received redfish response");

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn exchange_error(method: &Method, url: &Url, err: reqwest::Error) -> RedfishError {
    let timed_out = err.is_timeout();
    let message = if timed_out {
        format!("{} {} timed out: {}", method, url, describe(&err))
    } else {
        format!("{} {} failed: {}", method, url, describe(&err))
    };
    RedfishError::Transport { message, timed_out }
}

/// Flattens an error and its sources into one line; reqwest keeps the
/// useful part (refused, certificate, dns) in the source chain.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
