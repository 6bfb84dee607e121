//! Clap derive structures for the `synoss` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use synoss_api::{CameraId, PresetPosition};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// synoss -- talk to Synology Surveillance Station cameras
#[derive(Debug, Parser)]
#[command(
    name = "synoss",
    version,
    about = "Query and steer Synology Surveillance Station cameras",
    long_about = "List cameras, fetch live-view paths and drive PTZ presets on a\n\
        Synology Surveillance Station through its Web API.\n\n\
        Connection settings come from the config file, SYNO_* environment\n\
        variables and the flags below, in increasing priority.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "SYNO_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Station host name or address
    #[arg(long, short = 'H', global = true)]
    pub host: Option<String>,

    /// Station port
    #[arg(long, short = 'P', global = true)]
    pub port: Option<u16>,

    /// http or https
    #[arg(long, global = true)]
    pub protocol: Option<String>,

    /// Account name
    #[arg(long, short = 'u', global = true)]
    pub user: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the maximum supported version of every Web API
    Versions,

    /// List cameras
    #[command(alias = "cams")]
    Cameras,

    /// Show MJPEG live-view paths
    Streams {
        /// Camera ids
        #[arg(required = true, num_args = 1..)]
        ids: Vec<CameraId>,
    },

    /// List the PTZ presets of a camera
    Presets {
        /// Camera id
        id: CameraId,
    },

    /// Move a camera to a PTZ preset
    Goto {
        /// Camera id
        id: CameraId,
        /// Preset position
        position: PresetPosition,
    },

    /// Every camera with its live-view path and presets
    Overview,

    /// Prompt for the account password and store it in the system keyring
    SetPassword,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
