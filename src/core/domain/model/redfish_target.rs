use crate::core::domain::value_object::{
    RedfishHost, RedfishPassword, RedfishUrl, RedfishUsername, RequestTimeout,
};

/// Certificate trust policy for the HTTPS transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsMode {
    /// Full certificate chain and hostname validation.
    #[default]
    Verify,
    /// Accept any certificate for any name. Only for BMCs with self-signed
    /// certificates on networks the operator already trusts.
    SkipVerify,
}

impl TlsMode {
    pub fn from_insecure(insecure: bool) -> Self {
        if insecure {
            TlsMode::SkipVerify
        } else {
            TlsMode::Verify
        }
    }

    pub fn accepts_invalid_certs(&self) -> bool {
        matches!(self, TlsMode::SkipVerify)
    }
}

/// Everything needed to reach one BMC. Built once per invocation, never mutated.
#[derive(Debug, Clone)]
pub struct RedfishTarget {
    host: RedfishHost,
    username: RedfishUsername,
    password: RedfishPassword,
    tls_mode: TlsMode,
    timeout: RequestTimeout,
    base_url: RedfishUrl,
}

impl RedfishTarget {
    pub fn new(
        host: RedfishHost,
        username: RedfishUsername,
        password: RedfishPassword,
        tls_mode: TlsMode,
        timeout: RequestTimeout,
        base_url: RedfishUrl,
    ) -> Self {
        Self {
            host,
            username,
            password,
            tls_mode,
            timeout,
            base_url,
        }
    }

    pub fn host(&self) -> &RedfishHost {
        &self.host
    }

    pub fn username(&self) -> &RedfishUsername {
        &self.username
    }

    pub fn password(&self) -> &RedfishPassword {
        &self.password
    }

    pub fn tls_mode(&self) -> TlsMode {
        self.tls_mode
    }

    pub fn timeout(&self) -> RequestTimeout {
        self.timeout
    }

    pub fn base_url(&self) -> &RedfishUrl {
        &self.base_url
    }
}
