//! Command dispatch: CLI args -> client calls -> output formatting.

pub mod cameras;
pub mod overview;
pub mod ptz;
pub mod set_password;
pub mod versions;

use synoss_api::SynoClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Run a station-bound command.
pub async fn dispatch(
    cmd: Command,
    client: &mut SynoClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Versions => versions::handle(client, global).await,
        Command::Cameras => cameras::list(client, global).await,
        Command::Streams { ids } => cameras::streams(client, &ids, global).await,
        Command::Presets { id } => ptz::presets(client, id, global).await,
        Command::Goto { id, position } => ptz::goto(client, id, position, global).await,
        Command::Overview => overview::handle(client, global).await,
        // Handled before a client exists
        Command::SetPassword => set_password::handle(global),
    }
}
