// Shared transport for every Web API call.
//
// Two CGI endpoints sit under `webapi/`: `query.cgi` answers version
// discovery, `entry.cgi` everything else. All calls are GETs whose query
// string carries api/method/version plus per-call parameters; the JSON
// envelope is unwrapped here so callers only ever see payloads or a
// classified `Cause`.

use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Cause, Error, FaultKind, TransportFault};
use crate::models::ApiResponse;
use crate::operation::Operation;
use crate::session::Session;

/// Settings used to build the underlying `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Skip certificate validation (self-signed DiskStation certs).
    pub ignore_cert_errors: bool,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            ignore_cert_errors: false,
            user_agent: concat!("synoss/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl From<&ClientConfig> for TransportConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            ignore_cert_errors: config.ignore_cert_errors,
            ..Self::default()
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    ///
    /// No timeout is set: requests use the transport defaults.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder().user_agent(&self.user_agent);

        if self.ignore_cert_errors {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder.build().map_err(Error::ClientBuild)
    }
}

// ── Query parameters ────────────────────────────────────────────────

/// Query string for one call, in the order the station documents it.
#[derive(Debug, Clone)]
pub struct Params {
    pairs: Vec<(&'static str, String)>,
}

impl Params {
    /// Start with `api`, `method` and `version` for `operation`.
    pub fn new(operation: Operation, version: u32) -> Self {
        Self {
            pairs: vec![
                ("api", operation.api().to_owned()),
                ("method", operation.method().to_owned()),
                ("version", version.to_string()),
            ],
        }
    }

    /// Attach the session id and anti-CSRF token.
    pub fn session(self, session: &Session) -> Self {
        self.with("_sid", session.sid().expose_secret())
            .with("SynoToken", session.token().expose_secret())
    }

    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.pairs.push((key, value.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    fn as_slice(&self) -> &[(&'static str, String)] {
        &self.pairs
    }
}

// ── Transport ───────────────────────────────────────────────────────

/// Raw HTTP access to one station's `webapi/` endpoints.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    query_url: Url,
    entry_url: Url,
    host: Option<String>,
}

impl Transport {
    /// `webapi_url` must end in `/` (see [`ClientConfig::webapi_url`]).
    pub fn new(http: reqwest::Client, webapi_url: &Url) -> Result<Self, Error> {
        Ok(Self {
            http,
            query_url: webapi_url.join("query.cgi")?,
            entry_url: webapi_url.join("entry.cgi")?,
            host: webapi_url.host_str().map(str::to_owned),
        })
    }

    /// The station host, as used in fault reports.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// GET against `query.cgi`, requiring a payload.
    pub(crate) async fn query<T: DeserializeOwned>(
        &self,
        operation: Operation,
        params: &Params,
    ) -> Result<T, Cause> {
        let data = self.send(self.query_url.clone(), operation, params).await?;
        self.require(data)
    }

    /// GET against `entry.cgi`, requiring a payload.
    pub(crate) async fn entry<T: DeserializeOwned>(
        &self,
        operation: Operation,
        params: &Params,
    ) -> Result<T, Cause> {
        let data = self.send(self.entry_url.clone(), operation, params).await?;
        self.require(data)
    }

    /// GET against `entry.cgi` where success carries no payload.
    pub(crate) async fn entry_unit(&self, operation: Operation, params: &Params) -> Result<(), Cause> {
        self.send::<serde::de::IgnoredAny>(self.entry_url.clone(), operation, params)
            .await
            .map(|_| ())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        url: Url,
        operation: Operation,
        params: &Params,
    ) -> Result<Option<T>, Cause> {
        debug!(
            api = operation.api(),
            method = operation.method(),
            version = params.get("version"),
            "issuing request"
        );

        let result = self.exchange(url, operation, params).await;
        if let Err(ref cause) = result {
            warn!(
                api = operation.api(),
                method = operation.method(),
                %cause,
                "request failed"
            );
        }
        result
    }

    async fn exchange<T: DeserializeOwned>(
        &self,
        url: Url,
        operation: Operation,
        params: &Params,
    ) -> Result<Option<T>, Cause> {
        let resp = self
            .http
            .get(url)
            .query(params.as_slice())
            .send()
            .await
            .map_err(TransportFault::from)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportFault::new(
                FaultKind::Status,
                self.host.clone(),
                format!("unexpected HTTP status {status}"),
            )
            .with_status(status.as_u16())
            .into());
        }

        let envelope: ApiResponse<T> = resp.json().await.map_err(TransportFault::from)?;
        envelope.into_payload(operation.family(), self.host())
    }

    fn require<T>(&self, data: Option<T>) -> Result<T, Cause> {
        data.ok_or_else(|| {
            TransportFault::new(
                FaultKind::Decode,
                self.host.clone(),
                "successful response without data",
            )
            .into()
        })
    }
}
