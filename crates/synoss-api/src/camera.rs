// Camera endpoints (`SYNO.SurveillanceStation.Camera`)
//
// Listings are rebuilt from the station on every call; nothing about
// cameras is cached client-side.

use std::collections::BTreeMap;

use tracing::debug;

use crate::client::SynoClient;
use crate::error::Error;
use crate::models::{Camera, CameraDirectory, CameraId, CameraList, LiveViewPath};
use crate::operation::Operation;

impl SynoClient {
    /// Camera display name -> camera id.
    ///
    /// `GET entry.cgi?api=SYNO.SurveillanceStation.Camera&method=List`
    pub async fn list_cameras(
        &mut self,
        use_cached: bool,
    ) -> Result<BTreeMap<String, CameraId>, Error> {
        Ok(self.camera_directory(use_cached).await?.by_name)
    }

    /// Name -> id, id -> name and the ordered id list from one listing.
    pub async fn camera_directory(&mut self, use_cached: bool) -> Result<CameraDirectory, Error> {
        let cameras = self.fetch_cameras(use_cached).await?;
        debug!(count = cameras.len(), "cameras listed");
        Ok(cameras.into_iter().collect())
    }

    async fn fetch_cameras(&mut self, use_cached: bool) -> Result<Vec<Camera>, Error> {
        let list: CameraList = self
            .call(Operation::ListCameras, use_cached, |params| params)
            .await?;
        Ok(list.cameras)
    }

    /// Camera id -> MJPEG-over-HTTP live-view path.
    ///
    /// `GET entry.cgi?api=SYNO.SurveillanceStation.Camera&method=GetLiveViewPath&idList=1,2`
    ///
    /// An empty id list fails before anything is sent.
    pub async fn live_view_paths(
        &mut self,
        camera_ids: &[CameraId],
        use_cached: bool,
    ) -> Result<BTreeMap<CameraId, String>, Error> {
        if camera_ids.is_empty() {
            return Err(Error::MissingArgument {
                operation: Operation::GetStreamInfo,
                argument: "list of camera ids",
            });
        }
        let id_list = join_ids(camera_ids);

        let paths: Vec<LiveViewPath> = self
            .call(Operation::GetStreamInfo, use_cached, |params| {
                params.with("idList", id_list)
            })
            .await?;

        Ok(paths
            .into_iter()
            .map(|entry| (entry.id, entry.mjpeg_http_path))
            .collect())
    }
}

fn join_ids(ids: &[CameraId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
