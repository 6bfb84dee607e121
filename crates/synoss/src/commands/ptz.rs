//! `synoss presets` and `synoss goto`

use tabled::Tabled;

use synoss_api::{CameraId, PresetPosition, PtzPreset, SynoClient};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct PresetRow {
    #[tabled(rename = "Position")]
    position: PresetPosition,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&PtzPreset> for PresetRow {
    fn from(p: &PtzPreset) -> Self {
        Self {
            position: p.position,
            name: p.name.clone().unwrap_or_default(),
        }
    }
}

pub async fn presets(
    client: &mut SynoClient,
    camera_id: CameraId,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let presets = client.ptz_presets(camera_id, true).await?;
    let out = output::render_list(global.output, &presets, |p| PresetRow::from(p), |p| {
        format!("{}\t{}", p.position, p.name.as_deref().unwrap_or(""))
    })?;
    output::print_output(&out, global.quiet)
}

pub async fn goto(
    client: &mut SynoClient,
    camera_id: CameraId,
    position: PresetPosition,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    client.go_ptz_preset(camera_id, position, true).await?;
    if !global.quiet {
        eprintln!("Camera {camera_id} moved to preset {position}");
    }
    Ok(())
}
