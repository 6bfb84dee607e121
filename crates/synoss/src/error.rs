//! CLI error types with miette diagnostics.
//!
//! Maps library and config errors into user-facing errors with help text.

use miette::Diagnostic;
use thiserror::Error;

use synoss_api::{Cause, Error as ApiError, FaultKind, Operation};
use synoss_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: u8 = 1;
    pub const USAGE: u8 = 2;
    pub const AUTH: u8 = 3;
    pub const CONFIG: u8 = 4;
    pub const CONNECTION: u8 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the station")]
    #[diagnostic(
        code(synoss::connection_failed),
        help(
            "Check host, port and protocol.\n\
             A self-signed certificate needs --insecure (-k)."
        )
    )]
    ConnectionFailed {
        #[source]
        source: ApiError,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(synoss::auth_failed),
        help("Verify the account name and password for this station.")
    )]
    AuthFailed {
        #[source]
        source: ApiError,
    },

    #[error("No password configured for user '{username}'")]
    #[diagnostic(
        code(synoss::no_credentials),
        help(
            "Set SYNO_PASSWORD, add `password` to the config file,\n\
             or run: synoss set-password"
        )
    )]
    NoCredentials { username: String },

    // ── Station ──────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(synoss::api_error))]
    Api(ApiError),

    // ── Usage ────────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(synoss::usage))]
    Usage(ApiError),

    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    #[diagnostic(
        code(synoss::config),
        help("Set it in the config file, via SYNO_* variables, or with a flag.")
    )]
    Validation { field: String, reason: String },

    #[error("Could not load configuration")]
    #[diagnostic(code(synoss::config))]
    Config(#[source] Box<figment::Error>),

    #[error("Keyring access failed")]
    #[diagnostic(code(synoss::keyring))]
    Keyring(#[source] ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Usage(_) => exit_code::USAGE,
            Self::Validation { .. } | Self::Config(_) => exit_code::CONFIG,
            _ => exit_code::GENERAL,
        }
    }
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

// ── Library error mapping ────────────────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { username } => Self::NoCredentials { username },
            ConfigError::Figment(err) => Self::Config(err),
            err @ ConfigError::Keyring(_) => Self::Keyring(err),
        }
    }
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        if matches!(err, ApiError::MissingArgument { .. }) {
            return Self::Usage(err);
        }
        if matches!(
            err.fault_kind(),
            Some(FaultKind::Connect | FaultKind::Timeout)
        ) {
            return Self::ConnectionFailed { source: err };
        }
        if err.operation() == Some(Operation::Login) && matches!(err.cause(), Some(Cause::Api(_))) {
            return Self::AuthFailed { source: err };
        }
        Self::Api(err)
    }
}

#[cfg(test)]
mod tests {
    use synoss_api::{ApiFailure, ApiFamily, TransportFault};

    use super::*;

    #[test]
    fn rejected_login_is_an_auth_error() {
        let err = ApiError::from_cause(
            Operation::Login,
            ApiFailure::new(ApiFamily::Auth, 400).into(),
        );
        assert_eq!(CliError::from(err).exit_code(), exit_code::AUTH);
    }

    #[test]
    fn unreachable_station_is_a_connection_error() {
        let fault = TransportFault::new(FaultKind::Connect, Some("nas".into()), "refused");
        let err = ApiError::from_cause(Operation::QueryApiVersion, fault.into());
        assert_eq!(CliError::from(err).exit_code(), exit_code::CONNECTION);
    }

    #[test]
    fn camera_failure_is_general() {
        let err = ApiError::from_cause(
            Operation::ListCameras,
            ApiFailure::new(ApiFamily::Camera, 402).into(),
        );
        assert_eq!(CliError::from(err).exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn config_errors_map_to_config_exit() {
        let err = ConfigError::Validation {
            field: "host".into(),
            reason: "must be set".into(),
        };
        assert_eq!(CliError::from(err).exit_code(), exit_code::CONFIG);

        let err = ConfigError::NoCredentials {
            username: "viewer".into(),
        };
        assert_eq!(CliError::from(err).exit_code(), exit_code::AUTH);
    }
}
