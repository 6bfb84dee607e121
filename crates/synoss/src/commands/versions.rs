//! `synoss versions`

use serde::Serialize;
use tabled::Tabled;

use synoss_api::SynoClient;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Clone, Serialize, Tabled)]
struct ApiVersion {
    #[tabled(rename = "API")]
    api: String,
    #[tabled(rename = "Max version")]
    max_version: u32,
}

pub async fn handle(client: &mut SynoClient, global: &GlobalOpts) -> Result<(), CliError> {
    let table = client.query_api_versions(true).await?;
    let versions: Vec<ApiVersion> = table
        .iter()
        .map(|(api, max_version)| ApiVersion {
            api: api.to_owned(),
            max_version,
        })
        .collect();

    let out = output::render_list(global.output, &versions, Clone::clone, |v| {
        format!("{}\t{}", v.api, v.max_version)
    })?;
    output::print_output(&out, global.quiet)
}
