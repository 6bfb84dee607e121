mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use synoss_api::SynoClient;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    install_subscriber(cli.global.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            ExitCode::from(code)
        }
    }
}

/// Default directive for `-v` repetitions when `RUST_LOG` is unset.
fn log_filter(verbosity: u8) -> &'static str {
    ["warn", "info", "debug"]
        .get(usize::from(verbosity))
        .copied()
        .unwrap_or("trace")
}

/// Compact stderr logging. `RUST_LOG` wins over `-v`.
fn install_subscriber(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Cli { global, command } = cli;

    // Keyring only; never touches the station.
    if matches!(command, Command::SetPassword) {
        return commands::set_password::handle(&global);
    }

    let mut client = SynoClient::new(&config::client_config(&global)?)?;
    debug!(?command, "dispatching");
    let outcome = commands::dispatch(command, &mut client, &global).await;

    // The command's own result wins over a failed logout.
    if let Err(err) = client.logout(true).await {
        warn!(error = %err, "logout failed");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_the_default_level() {
        assert_eq!(log_filter(0), "warn");
        assert_eq!(log_filter(1), "info");
        assert_eq!(log_filter(2), "debug");
        assert_eq!(log_filter(3), "trace");
        assert_eq!(log_filter(u8::MAX), "trace");
    }
}
