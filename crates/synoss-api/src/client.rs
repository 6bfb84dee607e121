// Surveillance Station client
//
// Owns the transport, the API version cache and the session. Every public
// operation runs the same linear sequence: ensure session -> ensure the
// target API's version -> one GET -> interpret the envelope. Endpoint
// groups (cameras, PTZ) are inherent methods in their own modules.
//
// Methods that touch the caches take `&mut self`, so one client can only
// run one operation at a time. Use one client per concurrent task.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::operation::Operation;
use crate::session::{Session, SessionManager};
use crate::transport::{Params, Transport, TransportConfig};
use crate::version::{ApiVersionTable, VersionCache};

/// Session-aware client for one Surveillance Station.
#[derive(Debug)]
pub struct SynoClient {
    transport: Transport,
    versions: VersionCache,
    sessions: SessionManager,
}

impl SynoClient {
    /// Build a client (and its HTTP connection pool) from `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let http = TransportConfig::from(config).build_client()?;
        Self::with_client(http, config)
    }

    /// Use a pre-built `reqwest::Client`. TLS settings in `config` are
    /// ignored; the supplied client's own settings apply.
    pub fn with_client(http: reqwest::Client, config: &ClientConfig) -> Result<Self, Error> {
        let transport = Transport::new(http, &config.webapi_url()?)?;
        Ok(Self {
            transport,
            versions: VersionCache::new(),
            sessions: SessionManager::new(config.username.clone(), config.password.clone()),
        })
    }

    // ── Versions ─────────────────────────────────────────────────────

    /// Maximum supported version of every API the station offers.
    pub async fn query_api_versions(
        &mut self,
        use_cached: bool,
    ) -> Result<Arc<ApiVersionTable>, Error> {
        self.versions.get_versions(&self.transport, use_cached).await
    }

    /// The cached version table, without touching the network.
    pub fn api_versions(&self) -> Option<&ApiVersionTable> {
        self.versions.cached().map(Arc::as_ref)
    }

    pub fn invalidate_versions(&mut self) {
        self.versions.invalidate();
    }

    // ── Session ──────────────────────────────────────────────────────

    /// See [`SessionManager::login`].
    pub async fn login(&mut self, use_cached: bool) -> Result<Session, Error> {
        self.sessions
            .login(&self.transport, &mut self.versions, use_cached)
            .await
    }

    /// See [`SessionManager::logout`].
    pub async fn logout(&mut self, use_cached: bool) -> Result<bool, Error> {
        self.sessions
            .logout(&self.transport, &mut self.versions, use_cached)
            .await
    }

    /// The currently held session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.sessions.current()
    }

    /// Drop the held session locally (no logout request). Use after the
    /// station reports the session is gone, so the next login doesn't try
    /// to log it out first.
    pub fn forget_session(&mut self) -> Option<Session> {
        self.sessions.forget()
    }

    // ── Request skeleton ─────────────────────────────────────────────

    /// Session + fresh version + base params for `operation`.
    async fn prepare(&mut self, operation: Operation, use_cached: bool) -> Result<Params, Error> {
        let session = self.login(use_cached).await?;
        let version = self
            .versions
            .version_of(&self.transport, operation, false)
            .await?;
        Ok(Params::new(operation, version).session(&session))
    }

    /// Authenticated `entry.cgi` call that must return a payload.
    pub(crate) async fn call<T: DeserializeOwned>(
        &mut self,
        operation: Operation,
        use_cached: bool,
        args: impl FnOnce(Params) -> Params + Send,
    ) -> Result<T, Error> {
        let params = args(self.prepare(operation, use_cached).await?);
        self.transport
            .entry(operation, &params)
            .await
            .map_err(|cause| Error::from_cause(operation, cause))
    }

    /// Authenticated `entry.cgi` call whose success has no payload.
    pub(crate) async fn call_unit(
        &mut self,
        operation: Operation,
        use_cached: bool,
        args: impl FnOnce(Params) -> Params + Send,
    ) -> Result<(), Error> {
        let params = args(self.prepare(operation, use_cached).await?);
        self.transport
            .entry_unit(operation, &params)
            .await
            .map_err(|cause| Error::from_cause(operation, cause))
    }
}
