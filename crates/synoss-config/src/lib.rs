//! Configuration for Surveillance Station tools.
//!
//! Settings are layered with figment: built-in defaults, then a TOML file,
//! then `SYNO_*` environment variables. The password may also come from
//! the system keyring. The result is translated to
//! [`synoss_api::ClientConfig`].

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use synoss_api::{ClientConfig, Protocol};

/// Keyring service name; the keyring user is the account name.
pub const KEYRING_SERVICE: &str = "synoss";

/// Prefix of every environment variable read by [`figment`].
pub const ENV_PREFIX: &str = "SYNO_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no password configured for user '{username}'")]
    NoCredentials { username: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Values every layer starts from.
#[derive(Debug, Serialize)]
struct Defaults {
    protocol: &'static str,
    port: u16,
    ignore_cert_errors: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            protocol: "https",
            port: 5001,
            ignore_cert_errors: false,
        }
    }
}

/// Merged settings, before validation.
///
/// ```toml
/// protocol = "https"
/// host = "nas.local"
/// port = 5001
/// username = "viewer"
/// ignore_cert_errors = true
/// ```
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub protocol: String,
    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    /// Plaintext in the file or `SYNO_PASSWORD`; prefer the keyring.
    pub password: Option<SecretString>,
    #[serde(default)]
    pub ignore_cert_errors: bool,
}

// ── Loading ─────────────────────────────────────────────────────────

/// Platform config file path, e.g. `~/.config/synoss/config.toml`.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "synoss").map_or_else(
        || PathBuf::from("synoss.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// The layered provider chain. `path` overrides the platform default.
///
/// Callers may merge further providers (command-line overrides) on top
/// before extracting.
pub fn figment(path: Option<&Path>) -> Figment {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    debug!(path = %path.display(), "config file");

    Figment::new()
        .merge(Serialized::defaults(Defaults::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).map(|key| match key.as_str() {
            "proto" => "protocol".into(),
            "user" => "username".into(),
            "pass" => "password".into(),
            _ => key.into(),
        }))
}

/// Load settings from defaults, file and environment.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    Ok(figment(path).extract()?)
}

// ── Resolution ──────────────────────────────────────────────────────

impl Settings {
    pub fn protocol(&self) -> Result<Protocol, ConfigError> {
        self.protocol
            .parse()
            .map_err(|reason| ConfigError::Validation {
                field: "protocol".into(),
                reason,
            })
    }

    pub fn host(&self) -> Result<&str, ConfigError> {
        required("host", self.host.as_deref())
    }

    pub fn username(&self) -> Result<&str, ConfigError> {
        required("username", self.username.as_deref())
    }

    /// Configured password, else the keyring entry for `username`.
    pub fn resolve_password(&self) -> Result<SecretString, ConfigError> {
        if let Some(ref password) = self.password {
            return Ok(password.clone());
        }

        let username = self.username()?;
        match keyring_password(username) {
            Some(password) => Ok(password),
            None => Err(ConfigError::NoCredentials {
                username: username.to_owned(),
            }),
        }
    }

    /// Validate and build the client configuration.
    pub fn to_client_config(&self) -> Result<ClientConfig, ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Validation {
                field: "port".into(),
                reason: "must be between 1 and 65535".into(),
            });
        }

        let config = ClientConfig::new(
            self.protocol()?,
            self.host()?,
            self.port,
            self.username()?,
            self.resolve_password()?,
        )
        .ignore_cert_errors(self.ignore_cert_errors);
        Ok(config)
    }
}

fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, ConfigError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::Validation {
            field: field.into(),
            reason: "must be set".into(),
        }),
    }
}

// ── Keyring ─────────────────────────────────────────────────────────

/// Keyring lookup. Any failure (no entry, no backend) reads as absent.
fn keyring_password(username: &str) -> Option<SecretString> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, username).ok()?;
    match entry.get_password() {
        Ok(password) => Some(SecretString::from(password)),
        Err(err) => {
            debug!(error = %err, "no keyring password");
            None
        }
    }
}

/// Store `password` in the system keyring for `username`.
pub fn store_password(username: &str, password: &str) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, username)?.set_password(password)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn load(jail: &Jail) -> Result<Settings, figment::Error> {
        let path = jail.directory().join("synoss.toml");
        load_settings(Some(path.as_path())).map_err(|e| e.to_string().into())
    }

    #[test]
    fn defaults_apply_without_file_or_env() {
        Jail::expect_with(|jail| {
            let settings = load(jail)?;
            assert_eq!(settings.protocol, "https");
            assert_eq!(settings.port, 5001);
            assert!(!settings.ignore_cert_errors);
            assert!(settings.host.is_none());
            Ok(())
        });
    }

    #[test]
    fn file_then_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "synoss.toml",
                r#"
                    protocol = "http"
                    host = "nas.local"
                    port = 5000
                    username = "viewer"
                "#,
            )?;
            jail.set_env("SYNO_HOST", "10.0.0.5");
            jail.set_env("SYNO_PASS", "hunter2");
            jail.set_env("SYNO_IGNORE_CERT_ERRORS", "true");

            let settings = load(jail)?;
            assert_eq!(settings.host.as_deref(), Some("10.0.0.5"));
            assert_eq!(settings.port, 5000);
            assert!(settings.ignore_cert_errors);

            let config = settings.to_client_config().map_err(|e| e.to_string())?;
            assert_eq!(config.protocol, Protocol::Http);
            assert_eq!(config.host, "10.0.0.5");
            assert_eq!(config.username, "viewer");
            assert_eq!(config.password.expose_secret(), "hunter2");
            assert!(config.ignore_cert_errors);
            Ok(())
        });
    }

    #[test]
    fn short_env_aliases() {
        Jail::expect_with(|jail| {
            jail.set_env("SYNO_PROTO", "http");
            jail.set_env("SYNO_USER", "admin");
            jail.set_env("SYNO_PORT", "8080");

            let settings = load(jail)?;
            assert_eq!(settings.protocol, "http");
            assert_eq!(settings.username.as_deref(), Some("admin"));
            assert_eq!(settings.port, 8080);
            Ok(())
        });
    }

    #[test]
    fn long_env_names() {
        Jail::expect_with(|jail| {
            jail.set_env("SYNO_PROTOCOL", "HTTP");
            jail.set_env("SYNO_USERNAME", "admin");
            jail.set_env("SYNO_PASSWORD", "pw");

            let settings = load(jail)?;
            assert_eq!(settings.protocol().map_err(|e| e.to_string())?, Protocol::Http);
            assert_eq!(settings.username.as_deref(), Some("admin"));
            assert!(settings.password.is_some());
            Ok(())
        });
    }

    #[test]
    fn unknown_protocol_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("SYNO_PROTO", "ftp");
            let settings = load(jail)?;
            assert!(matches!(
                settings.protocol(),
                Err(ConfigError::Validation { ref field, .. }) if field == "protocol"
            ));
            Ok(())
        });
    }

    #[test]
    fn missing_host_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("SYNO_USER", "admin");
            jail.set_env("SYNO_PASS", "pw");
            let settings = load(jail)?;
            assert!(matches!(
                settings.to_client_config(),
                Err(ConfigError::Validation { ref field, .. }) if field == "host"
            ));
            Ok(())
        });
    }

    #[test]
    fn blank_username_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("SYNO_HOST", "nas");
            jail.set_env("SYNO_USER", "  ");
            let settings = load(jail)?;
            assert!(matches!(
                settings.username(),
                Err(ConfigError::Validation { ref field, .. }) if field == "username"
            ));
            Ok(())
        });
    }

    #[test]
    fn zero_port_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("SYNO_HOST", "nas");
            jail.set_env("SYNO_USER", "admin");
            jail.set_env("SYNO_PASS", "pw");
            jail.set_env("SYNO_PORT", "0");
            let settings = load(jail)?;
            assert!(matches!(
                settings.to_client_config(),
                Err(ConfigError::Validation { ref field, .. }) if field == "port"
            ));
            Ok(())
        });
    }

    #[test]
    fn configured_password_wins_over_keyring() {
        let settings = Settings {
            protocol: "https".into(),
            host: Some("nas".into()),
            port: 5001,
            username: Some("viewer".into()),
            password: Some(SecretString::from("from-file".to_string())),
            ignore_cert_errors: false,
        };
        let password = settings.resolve_password().map(|p| p.expose_secret().to_owned());
        assert_eq!(password.ok().as_deref(), Some("from-file"));
    }

    #[test]
    fn debug_output_hides_password() {
        let settings = Settings {
            protocol: "https".into(),
            host: None,
            port: 5001,
            username: None,
            password: Some(SecretString::from("hunter2".to_string())),
            ignore_cert_errors: false,
        };
        assert!(!format!("{settings:?}").contains("hunter2"));
    }
}
