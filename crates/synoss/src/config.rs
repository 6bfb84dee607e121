//! Resolve settings from the config file, `SYNO_*` environment and
//! command-line flags, in increasing priority.

use figment::providers::Serialized;
use serde::Serialize;

use synoss_api::ClientConfig;
use synoss_config::Settings;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Flags that were actually given. Absent ones don't override lower layers.
#[derive(Debug, Default, Serialize)]
struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ignore_cert_errors: Option<bool>,
}

impl From<&GlobalOpts> for Overrides {
    fn from(global: &GlobalOpts) -> Self {
        Self {
            protocol: global.protocol.clone(),
            host: global.host.clone(),
            port: global.port,
            username: global.user.clone(),
            ignore_cert_errors: global.insecure.then_some(true),
        }
    }
}

pub fn settings(global: &GlobalOpts) -> Result<Settings, CliError> {
    let settings = synoss_config::figment(global.config.as_deref())
        .merge(Serialized::defaults(Overrides::from(global)))
        .extract()?;
    Ok(settings)
}

pub fn client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    Ok(settings(global)?.to_client_config()?)
}
