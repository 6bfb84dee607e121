//! `synoss overview`

use tabled::Tabled;

use synoss_api::{CameraId, CameraOverview, SynoClient};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct OverviewRow {
    #[tabled(rename = "ID")]
    id: CameraId,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Live view path")]
    live_view: String,
    #[tabled(rename = "Presets")]
    presets: String,
}

impl From<&CameraOverview> for OverviewRow {
    fn from(c: &CameraOverview) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            live_view: c.live_view_path.clone().unwrap_or_else(|| "-".into()),
            presets: c
                .presets
                .iter()
                .map(|p| format!("{}:{}", p.position, p.name.as_deref().unwrap_or("")))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

pub async fn handle(client: &mut SynoClient, global: &GlobalOpts) -> Result<(), CliError> {
    let cameras = client.camera_overview(true).await?;
    let out = output::render_list(global.output, &cameras, |c| OverviewRow::from(c), |c| {
        format!("{}\t{}", c.id, c.name)
    })?;
    output::print_output(&out, global.quiet)
}
