// PTZ endpoints (`SYNO.SurveillanceStation.PTZ` and `.PTZ.Preset`)

use std::collections::BTreeMap;

use tracing::debug;

use crate::client::SynoClient;
use crate::error::Error;
use crate::models::{CameraId, PresetPayload, PresetPosition, PtzPreset};
use crate::operation::Operation;

impl SynoClient {
    /// Stored presets of one camera, as the station reports them.
    ///
    /// `GET entry.cgi?api=SYNO.SurveillanceStation.PTZ.Preset&method=Enum&cameraId=N`
    pub async fn ptz_presets(
        &mut self,
        camera_id: CameraId,
        use_cached: bool,
    ) -> Result<Vec<PtzPreset>, Error> {
        let payload: PresetPayload = self
            .call(Operation::ListPtzPresets, use_cached, |params| {
                params.with("cameraId", camera_id.to_string())
            })
            .await?;
        Ok(payload.into_presets())
    }

    /// Presets of several cameras, keyed by camera id.
    ///
    /// Stops at the first camera that fails. An empty id list fails
    /// before anything is sent.
    pub async fn ptz_presets_of_cameras(
        &mut self,
        camera_ids: &[CameraId],
        use_cached: bool,
    ) -> Result<BTreeMap<CameraId, Vec<PtzPreset>>, Error> {
        if camera_ids.is_empty() {
            return Err(Error::MissingArgument {
                operation: Operation::ListPtzPresets,
                argument: "list of camera ids",
            });
        }

        let mut presets = BTreeMap::new();
        for &camera_id in camera_ids {
            presets.insert(camera_id, self.ptz_presets(camera_id, use_cached).await?);
        }
        Ok(presets)
    }

    /// Move a camera to one of its stored positions.
    ///
    /// `GET entry.cgi?api=SYNO.SurveillanceStation.PTZ&method=GoPreset&cameraId=N&position=P`
    pub async fn go_ptz_preset(
        &mut self,
        camera_id: CameraId,
        position: PresetPosition,
        use_cached: bool,
    ) -> Result<bool, Error> {
        self.call_unit(Operation::GoPtzPreset, use_cached, |params| {
            params
                .with("cameraId", camera_id.to_string())
                .with("position", position.to_string())
        })
        .await?;
        debug!(camera_id, position, "camera moved to preset");
        Ok(true)
    }
}
