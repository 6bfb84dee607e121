use std::fmt;

use thiserror::Error;

use crate::codes::{self, ApiFamily};
use crate::operation::Operation;

/// Top-level error type for the `synoss-api` crate.
///
/// One variant per operation, each carrying a [`Cause`] that says whether
/// the station rejected the call (`success: false` with a vendor code) or
/// the request never produced a usable body (transport fault).
#[derive(Debug, Error)]
pub enum Error {
    // ── Discovery ───────────────────────────────────────────────────
    #[error("Could not query API versions: {cause}")]
    QueryApiVersion {
        #[source]
        cause: Cause,
    },

    // ── Authentication ──────────────────────────────────────────────
    #[error("Login not possible: {cause}")]
    Login {
        #[source]
        cause: Cause,
    },

    #[error("Logout not possible: {cause}")]
    Logout {
        #[source]
        cause: Cause,
    },

    // ── Operations ──────────────────────────────────────────────────
    #[error("Could not list cameras: {cause}")]
    ListCameras {
        #[source]
        cause: Cause,
    },

    #[error("Could not get stream info of the cameras: {cause}")]
    GetStreamInfo {
        #[source]
        cause: Cause,
    },

    #[error("Could not list PTZ presets: {cause}")]
    ListPtzPresets {
        #[source]
        cause: Cause,
    },

    #[error("Could not move camera to PTZ preset: {cause}")]
    GoPtzPreset {
        #[source]
        cause: Cause,
    },

    // ── Caller / setup ──────────────────────────────────────────────
    /// Raised before any request is sent.
    #[error("Cannot {operation}: the {argument} is missing")]
    MissingArgument {
        operation: Operation,
        argument: &'static str,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl Error {
    /// Tag `cause` with the operation it interrupted.
    pub fn from_cause(operation: Operation, cause: Cause) -> Self {
        match operation {
            Operation::QueryApiVersion => Self::QueryApiVersion { cause },
            Operation::Login => Self::Login { cause },
            Operation::Logout => Self::Logout { cause },
            Operation::ListCameras => Self::ListCameras { cause },
            Operation::GetStreamInfo => Self::GetStreamInfo { cause },
            Operation::ListPtzPresets => Self::ListPtzPresets { cause },
            Operation::GoPtzPreset => Self::GoPtzPreset { cause },
        }
    }

    /// The operation that failed, if the error came from one.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::QueryApiVersion { .. } => Some(Operation::QueryApiVersion),
            Self::Login { .. } => Some(Operation::Login),
            Self::Logout { .. } => Some(Operation::Logout),
            Self::ListCameras { .. } => Some(Operation::ListCameras),
            Self::GetStreamInfo { .. } => Some(Operation::GetStreamInfo),
            Self::ListPtzPresets { .. } => Some(Operation::ListPtzPresets),
            Self::GoPtzPreset { .. } => Some(Operation::GoPtzPreset),
            Self::MissingArgument { operation, .. } => Some(*operation),
            Self::InvalidUrl(_) | Self::ClientBuild(_) => None,
        }
    }

    /// The structured cause behind an operation failure.
    pub fn cause(&self) -> Option<&Cause> {
        match self {
            Self::QueryApiVersion { cause }
            | Self::Login { cause }
            | Self::Logout { cause }
            | Self::ListCameras { cause }
            | Self::GetStreamInfo { cause }
            | Self::ListPtzPresets { cause }
            | Self::GoPtzPreset { cause } => Some(cause),
            _ => None,
        }
    }

    /// The vendor error code, when the station answered `success: false`.
    pub fn vendor_code(&self) -> Option<i64> {
        match self.cause()? {
            Cause::Api(failure) => Some(failure.code),
            Cause::Transport(_) => None,
        }
    }

    /// The transport classification, when the request itself failed.
    pub fn fault_kind(&self) -> Option<FaultKind> {
        match self.cause()? {
            Cause::Transport(fault) => Some(fault.kind),
            Cause::Api(_) => None,
        }
    }

    /// Returns `true` if the station could not be reached in time.
    pub fn is_transient(&self) -> bool {
        matches!(self.fault_kind(), Some(FaultKind::Connect | FaultKind::Timeout))
    }

    /// Returns `true` if the station rejected our session (expired,
    /// revoked by a second login, or unknown). A fresh `login(false)`
    /// may resolve it.
    pub fn is_session_problem(&self) -> bool {
        self.vendor_code().is_some_and(codes::is_session_code)
    }
}

// ── Cause ────────────────────────────────────────────────────────────

/// Why an operation failed. Body-reported and transport-level origins
/// are always distinguishable.
#[derive(Debug, Error)]
pub enum Cause {
    /// The station answered `{"success": false, "error": {"code": N}}`.
    #[error(transparent)]
    Api(ApiFailure),

    /// No usable response body (connection, TLS, HTTP status, decoding).
    #[error(transparent)]
    Transport(TransportFault),
}

impl From<ApiFailure> for Cause {
    fn from(failure: ApiFailure) -> Self {
        Self::Api(failure)
    }
}

impl From<TransportFault> for Cause {
    fn from(fault: TransportFault) -> Self {
        Self::Transport(fault)
    }
}

/// A vendor error code together with the family whose table explains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiFailure {
    pub family: ApiFamily,
    pub code: i64,
}

impl ApiFailure {
    pub fn new(family: ApiFamily, code: i64) -> Self {
        Self { family, code }
    }

    pub fn description(&self) -> &'static str {
        codes::describe(self.family, self.code)
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} API returned error {} ({})",
            self.family,
            self.code,
            self.description()
        )
    }
}

impl std::error::Error for ApiFailure {}

// ── Transport faults ────────────────────────────────────────────────

/// Network-level classification of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// TCP/TLS connection could not be established.
    Connect,
    Timeout,
    /// Non-2xx HTTP status.
    Status,
    /// Body was not the JSON envelope we expected.
    Decode,
    Request,
    Body,
    Builder,
    Redirect,
    Other,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Connect => "connect",
            Self::Timeout => "timeout",
            Self::Status => "http status",
            Self::Decode => "decode",
            Self::Request => "request",
            Self::Body => "body",
            Self::Builder => "builder",
            Self::Redirect => "redirect",
            Self::Other => "transport",
        })
    }
}

/// A request that failed below the API envelope.
///
/// The request URL is never kept: it carries the password on login and
/// the session id/token on every other call. Only the host survives.
#[derive(Debug)]
pub struct TransportFault {
    pub kind: FaultKind,
    pub host: Option<String>,
    pub status: Option<u16>,
    pub message: String,
    source: Option<reqwest::Error>,
}

impl TransportFault {
    /// Build a fault that has no underlying `reqwest` error.
    pub fn new(kind: FaultKind, host: Option<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            host,
            status: None,
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

impl From<reqwest::Error> for TransportFault {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_builder() {
            FaultKind::Builder
        } else if err.is_timeout() {
            FaultKind::Timeout
        } else if err.is_connect() {
            FaultKind::Connect
        } else if err.is_redirect() {
            FaultKind::Redirect
        } else if err.is_status() {
            FaultKind::Status
        } else if err.is_decode() {
            FaultKind::Decode
        } else if err.is_body() {
            FaultKind::Body
        } else if err.is_request() {
            FaultKind::Request
        } else {
            FaultKind::Other
        };
        let host = err
            .url()
            .and_then(|url| url.host_str())
            .map(str::to_owned);
        let status = err.status().map(|s| s.as_u16());
        let err = err.without_url();

        Self {
            kind,
            host,
            status,
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl fmt::Display for TransportFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failure", self.kind)?;
        if let Some(ref host) = self.host {
            write!(f, " talking to {host}")?;
        }
        if let Some(status) = self.status {
            write!(f, " (HTTP {status})")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for TransportFault {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_disabled_is_attributed_to_vendor_code() {
        let err = Error::from_cause(
            Operation::ListCameras,
            ApiFailure::new(ApiFamily::Camera, 402).into(),
        );
        assert!(matches!(err, Error::ListCameras { .. }));
        assert_eq!(err.vendor_code(), Some(402));
        assert_eq!(err.fault_kind(), None);
        assert!(err.to_string().contains("camera disabled"), "{err}");
    }

    #[test]
    fn transport_cause_has_no_vendor_code() {
        let fault = TransportFault::new(FaultKind::Connect, Some("nas.local".into()), "refused");
        let err = Error::from_cause(Operation::GetStreamInfo, fault.into());
        assert_eq!(err.vendor_code(), None);
        assert_eq!(err.fault_kind(), Some(FaultKind::Connect));
        assert!(err.is_transient());
        assert!(err.to_string().contains("nas.local"), "{err}");
    }

    #[test]
    fn session_problem_detection() {
        let err = Error::from_cause(
            Operation::ListCameras,
            ApiFailure::new(ApiFamily::Camera, 119).into(),
        );
        assert!(err.is_session_problem());
        assert!(!err.is_transient());

        let err = Error::from_cause(
            Operation::Login,
            ApiFailure::new(ApiFamily::Auth, 400).into(),
        );
        assert!(!err.is_session_problem());
    }

    #[test]
    fn missing_argument_names_operation() {
        let err = Error::MissingArgument {
            operation: Operation::GetStreamInfo,
            argument: "list of camera ids",
        };
        assert_eq!(err.operation(), Some(Operation::GetStreamInfo));
        assert!(err.cause().is_none());
        assert_eq!(
            err.to_string(),
            "Cannot get camera stream info: the list of camera ids is missing"
        );
    }

    #[test]
    fn from_cause_round_trips_operation() {
        for op in [
            Operation::QueryApiVersion,
            Operation::Login,
            Operation::Logout,
            Operation::ListCameras,
            Operation::GetStreamInfo,
            Operation::ListPtzPresets,
            Operation::GoPtzPreset,
        ] {
            let err = Error::from_cause(op, ApiFailure::new(op.family(), 100).into());
            assert_eq!(err.operation(), Some(op));
        }
    }
}
