// ── Runtime connection configuration ──
//
// Describes *how* to reach a Surveillance Station. Carries credential data
// but never touches disk; `synoss-config` builds one and hands it in.

use std::fmt;
use std::str::FromStr;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;

/// URL scheme used to reach the station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    #[default]
    Https,
}

impl Protocol {
    pub fn scheme(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            other => Err(format!("expected 'http' or 'https', got '{other}'")),
        }
    }
}

/// Everything needed to talk to one station.
///
/// Built once, then owned by the client; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub protocol: Protocol,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    /// Accept self-signed / mismatched certificates. Only meaningful for HTTPS.
    pub ignore_cert_errors: bool,
}

impl ClientConfig {
    pub fn new(
        protocol: Protocol,
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            protocol,
            host: host.into(),
            port,
            username: username.into(),
            password,
            ignore_cert_errors: false,
        }
    }

    pub fn ignore_cert_errors(mut self, ignore: bool) -> Self {
        self.ignore_cert_errors = ignore;
        self
    }

    /// The `webapi/` root every endpoint hangs off, with a trailing slash
    /// so `query.cgi` / `entry.cgi` can be joined onto it.
    pub fn webapi_url(&self) -> Result<Url, Error> {
        let host = self.host.trim().trim_end_matches('/');
        // IPv6 literals need brackets in the authority.
        let host = if host.contains(':') && !host.starts_with('[') {
            format!("[{host}]")
        } else {
            host.to_owned()
        };
        let url = Url::parse(&format!(
            "{}://{}:{}/webapi/",
            self.protocol.scheme(),
            host,
            self.port
        ))?;
        Ok(url)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(host: &str) -> ClientConfig {
        ClientConfig::new(
            Protocol::Https,
            host,
            5001,
            "viewer",
            SecretString::from("pw".to_string()),
        )
    }

    #[test]
    fn webapi_url_has_trailing_slash() {
        let url = config("nas.local").webapi_url().unwrap();
        assert_eq!(url.as_str(), "https://nas.local:5001/webapi/");
        assert_eq!(url.join("entry.cgi").unwrap().path(), "/webapi/entry.cgi");
    }

    #[test]
    fn webapi_url_brackets_ipv6_hosts() {
        let url = config("::1").webapi_url().unwrap();
        assert_eq!(url.as_str(), "https://[::1]:5001/webapi/");
        assert_eq!(url.host_str(), Some("[::1]"));

        let url = config("[fe80::1]").webapi_url().unwrap();
        assert_eq!(url.as_str(), "https://[fe80::1]:5001/webapi/");
    }

    #[test]
    fn webapi_url_rejects_garbage_host() {
        assert!(matches!(
            config("bad host").webapi_url(),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn protocol_parsing() {
        assert_eq!("HTTP".parse::<Protocol>(), Ok(Protocol::Http));
        assert_eq!(" https ".parse::<Protocol>(), Ok(Protocol::Https));
        assert!("ftp".parse::<Protocol>().is_err());
    }

    #[test]
    fn password_is_redacted_in_debug() {
        let rendered = format!("{:?}", config("nas.local"));
        assert!(rendered.contains("REDACTED"), "{rendered}");
    }
}
