//! `synoss cameras` and `synoss streams`

use serde::Serialize;
use tabled::Tabled;

use synoss_api::{CameraId, SynoClient};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Clone, Serialize, Tabled)]
struct CameraRow {
    #[tabled(rename = "ID")]
    id: CameraId,
    #[tabled(rename = "Name")]
    name: String,
}

#[derive(Clone, Serialize, Tabled)]
struct StreamRow {
    #[tabled(rename = "ID")]
    id: CameraId,
    #[tabled(rename = "Live view path")]
    path: String,
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn list(client: &mut SynoClient, global: &GlobalOpts) -> Result<(), CliError> {
    let directory = client.camera_directory(true).await?;
    let cameras: Vec<CameraRow> = directory
        .ids
        .iter()
        .map(|&id| CameraRow {
            id,
            name: directory.name_of(id).unwrap_or_default().to_owned(),
        })
        .collect();

    let out = output::render_list(global.output, &cameras, Clone::clone, |c| c.id.to_string())?;
    output::print_output(&out, global.quiet)
}

pub async fn streams(
    client: &mut SynoClient,
    ids: &[CameraId],
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let paths = client.live_view_paths(ids, true).await?;
    let streams: Vec<StreamRow> = paths
        .into_iter()
        .map(|(id, path)| StreamRow { id, path })
        .collect();

    let out = output::render_list(global.output, &streams, Clone::clone, |s| s.path.clone())?;
    output::print_output(&out, global.quiet)
}
