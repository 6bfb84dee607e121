// Session management
//
// Login hands back a session id plus a SynoToken (anti-CSRF); both must
// ride along on every later call. At most one session is held per client.
// A fresh login always logs the previous session out first: the station
// rejects a second concurrent login for the same scope, and the server
// can lose track of a session without the client noticing.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::error::Error;
use crate::models::LoginData;
use crate::operation::{Operation, SESSION_NAME};
use crate::transport::{Params, Transport};
use crate::version::VersionCache;

/// Credentials issued by a successful login.
///
/// Both values are opaque to the client. `Debug` output redacts them.
#[derive(Debug, Clone)]
pub struct Session {
    sid: SecretString,
    token: SecretString,
}

impl Session {
    pub fn new(sid: SecretString, token: SecretString) -> Self {
        Self { sid, token }
    }

    /// The `_sid` query parameter.
    pub fn sid(&self) -> &SecretString {
        &self.sid
    }

    /// The `SynoToken` query parameter.
    pub fn token(&self) -> &SecretString {
        &self.token
    }
}

/// Owns the account credentials and the (optional) live session.
#[derive(Debug)]
pub struct SessionManager {
    username: String,
    password: SecretString,
    session: Option<Session>,
}

impl SessionManager {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
            session: None,
        }
    }

    /// The session from the most recent successful login, if any.
    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Drop the local session without telling the station.
    pub fn forget(&mut self) -> Option<Session> {
        let previous = self.session.take();
        if previous.is_some() {
            debug!("session forgotten locally");
        }
        previous
    }

    /// Return a usable session, logging in if needed.
    ///
    /// With `use_cached` and a held session this is free. Otherwise the
    /// held session (if any) is logged out, the auth API version is
    /// re-discovered, and a new login is performed. The stored session
    /// only changes when the station confirms the login.
    pub async fn login(
        &mut self,
        transport: &Transport,
        versions: &mut VersionCache,
        use_cached: bool,
    ) -> Result<Session, Error> {
        if use_cached {
            if let Some(ref session) = self.session {
                debug!("reusing cached session");
                return Ok(session.clone());
            }
        }
        debug!("no usable cached session, logging in");

        self.logout(transport, versions, use_cached).await?;

        let version = versions
            .version_of(transport, Operation::Login, false)
            .await?;

        let params = Params::new(Operation::Login, version)
            .with("account", self.username.as_str())
            .with("passwd", self.password.expose_secret())
            .with("session", SESSION_NAME)
            .with("format", "sid")
            .with("enable_syno_token", "yes");

        let data: LoginData = transport
            .entry(Operation::Login, &params)
            .await
            .map_err(|cause| Error::from_cause(Operation::Login, cause))?;

        let session = Session::new(
            SecretString::from(data.sid),
            SecretString::from(data.synotoken),
        );
        self.session = Some(session.clone());
        debug!(user = %self.username, "session stored");
        Ok(session)
    }

    /// End the held session. Without one this is a no-op returning `true`.
    ///
    /// On failure the session is kept: callers must not assume the
    /// station forgot it.
    pub async fn logout(
        &mut self,
        transport: &Transport,
        versions: &mut VersionCache,
        use_cached: bool,
    ) -> Result<bool, Error> {
        let Some(ref session) = self.session else {
            return Ok(true);
        };
        debug!("logging out");

        let version = versions
            .version_of(transport, Operation::Logout, use_cached)
            .await?;

        let params = Params::new(Operation::Logout, version)
            .with("session", SESSION_NAME)
            .session(session);

        transport
            .entry_unit(Operation::Logout, &params)
            .await
            .map_err(|cause| Error::from_cause(Operation::Logout, cause))?;

        self.session = None;
        debug!("session cleared");
        Ok(true)
    }
}
