//! `set-password`: store the station password in the system keyring.

use std::io::{self, IsTerminal};

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;

/// Map an interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Prompt without echo on a terminal; read one line when stdin is piped.
fn read_password() -> Result<String, CliError> {
    if io::stdin().is_terminal() {
        rpassword::prompt_password("Password: ").map_err(prompt_err)
    } else {
        rpassword::read_password_from_bufread(&mut io::stdin().lock()).map_err(prompt_err)
    }
}

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let settings = config::settings(global)?;
    let username = settings.username()?;

    let password = read_password()?;
    if password.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }

    synoss_config::store_password(username, &password)?;
    if !global.quiet {
        eprintln!("Password for '{username}' stored in the keyring");
    }
    Ok(())
}
