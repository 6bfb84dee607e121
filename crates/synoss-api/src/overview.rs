// Whole-station overview: every camera with its live-view path and presets.

use tracing::warn;

use crate::client::SynoClient;
use crate::error::{Cause, Error};
use crate::models::{CameraId, CameraOverview, PtzPreset};

impl SynoClient {
    /// Gather name, live-view path and PTZ presets for every camera.
    ///
    /// Only the first request honours `use_cached`; the follow-ups reuse
    /// the session it established. Cameras whose preset listing is
    /// refused (fixed cameras without PTZ) show up with no presets.
    pub async fn camera_overview(&mut self, use_cached: bool) -> Result<Vec<CameraOverview>, Error> {
        let directory = self.camera_directory(use_cached).await?;
        if directory.ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut paths = self.live_view_paths(&directory.ids, true).await?;

        let mut cameras = Vec::with_capacity(directory.ids.len());
        for &id in &directory.ids {
            cameras.push(CameraOverview {
                id,
                name: directory.name_of(id).unwrap_or_default().to_owned(),
                live_view_path: paths.remove(&id),
                presets: self.presets_or_none(id).await?,
            });
        }
        Ok(cameras)
    }

    async fn presets_or_none(&mut self, camera_id: CameraId) -> Result<Vec<PtzPreset>, Error> {
        match self.ptz_presets(camera_id, true).await {
            Err(err) if refuses_presets(&err) => {
                warn!(camera_id, error = %err, "preset listing refused, treating as none");
                Ok(Vec::new())
            }
            other => other,
        }
    }
}

/// PTZ-preset family 400/401: the camera can't enumerate presets at all.
fn refuses_presets(err: &Error) -> bool {
    matches!(
        err,
        Error::ListPtzPresets { cause: Cause::Api(failure) } if matches!(failure.code, 400 | 401)
    )
}
