// Surveillance Station response types
//
// Every call is wrapped in the `ApiResponse<T>` envelope. Payload shapes
// drift between DSM releases, so anything we don't read is either left
// out or captured verbatim in an `extra` map.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::codes::ApiFamily;
use crate::error::{ApiFailure, Cause, FaultKind, TransportFault};

/// Server-assigned camera identifier.
pub type CameraId = u32;

/// Stored PTZ position number on a camera.
pub type PresetPosition = u32;

// ── Response Envelope ────────────────────────────────────────────────

/// Standard Web API response envelope.
///
/// ```json
/// { "success": true, "data": { ... } }
/// { "success": false, "error": { "code": 402 } }
/// ```
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
}

impl<T> ApiResponse<T> {
    /// Split the envelope into its payload or a body-reported failure.
    ///
    /// `data` may legitimately be absent on success (logout, GoPreset).
    pub fn into_payload(self, family: ApiFamily, host: Option<&str>) -> Result<Option<T>, Cause> {
        if self.success {
            return Ok(self.data);
        }
        match self.error {
            Some(err) => Err(ApiFailure::new(family, err.code).into()),
            None => Err(TransportFault::new(
                FaultKind::Decode,
                host.map(str::to_owned),
                "response reported failure without an error code",
            )
            .into()),
        }
    }
}

// ── Discovery ────────────────────────────────────────────────────────

/// One entry of the `SYNO.API.Info` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInfo {
    pub max_version: u32,
    #[serde(default)]
    pub min_version: Option<u32>,
    #[serde(default)]
    pub path: Option<String>,
}

pub(crate) type ApiInfoTable = HashMap<String, ApiInfo>;

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct LoginData {
    pub sid: String,
    /// Only present when `enable_syno_token=yes` was sent.
    #[serde(default)]
    pub synotoken: String,
}

// ── Camera ───────────────────────────────────────────────────────────

/// A camera as returned by `SYNO.SurveillanceStation.Camera` `List`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    pub id: CameraId,
    /// Display name (`newName` on the wire).
    #[serde(rename = "newName")]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CameraList {
    #[serde(default)]
    pub cameras: Vec<Camera>,
}

/// Lookup tables built from one camera listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CameraDirectory {
    pub by_name: BTreeMap<String, CameraId>,
    pub by_id: BTreeMap<CameraId, String>,
    /// Ids in the order the station listed them.
    pub ids: Vec<CameraId>,
}

impl CameraDirectory {
    pub fn name_of(&self, id: CameraId) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    pub fn id_of(&self, name: &str) -> Option<CameraId> {
        self.by_name.get(name).copied()
    }
}

impl FromIterator<Camera> for CameraDirectory {
    fn from_iter<I: IntoIterator<Item = Camera>>(iter: I) -> Self {
        let mut dir = Self::default();
        for cam in iter {
            dir.ids.push(cam.id);
            dir.by_id.insert(cam.id, cam.name.clone());
            dir.by_name.insert(cam.name, cam.id);
        }
        dir
    }
}

/// Live-view entry from `GetLiveViewPath`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LiveViewPath {
    pub id: CameraId,
    pub mjpeg_http_path: String,
}

// ── PTZ ──────────────────────────────────────────────────────────────

/// A stored PTZ position. Fields we don't model are kept in `extra`
/// so the preset serializes back exactly as the station sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PtzPreset {
    pub position: PresetPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Older firmware answers `Enum` with a bare array, newer with
/// `{"presets": [...], "total": N}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum PresetPayload {
    Listed { presets: Vec<PtzPreset> },
    Bare(Vec<PtzPreset>),
}

impl PresetPayload {
    pub fn into_presets(self) -> Vec<PtzPreset> {
        match self {
            Self::Listed { presets } | Self::Bare(presets) => presets,
        }
    }
}

// ── Aggregates ───────────────────────────────────────────────────────

/// Everything the client knows about one camera.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraOverview {
    pub id: CameraId,
    pub name: String,
    pub live_view_path: Option<String>,
    pub presets: Vec<PtzPreset>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn failure_envelope_carries_family_code() {
        let resp: ApiResponse<serde_json::Value> =
            serde_json::from_value(json!({ "success": false, "error": { "code": 402 } })).unwrap();
        match resp.into_payload(ApiFamily::Camera, Some("nas")) {
            Err(Cause::Api(failure)) => {
                assert_eq!(failure.code, 402);
                assert_eq!(failure.description(), "camera disabled");
            }
            other => panic!("expected API failure, got {other:?}"),
        }
    }

    #[test]
    fn failure_without_code_is_a_decode_fault() {
        let resp: ApiResponse<serde_json::Value> =
            serde_json::from_value(json!({ "success": false })).unwrap();
        match resp.into_payload(ApiFamily::Auth, Some("nas")) {
            Err(Cause::Transport(fault)) => assert_eq!(fault.kind, FaultKind::Decode),
            other => panic!("expected transport fault, got {other:?}"),
        }
    }

    #[test]
    fn success_without_data() {
        let resp: ApiResponse<serde_json::Value> =
            serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(resp.into_payload(ApiFamily::Ptz, None).unwrap().is_none());
    }

    #[test]
    fn directory_keeps_listing_order() {
        let dir: CameraDirectory = [
            Camera { id: 7, name: "Yard".into() },
            Camera { id: 2, name: "Door".into() },
        ]
        .into_iter()
        .collect();

        assert_eq!(dir.ids, vec![7, 2]);
        assert_eq!(dir.id_of("Door"), Some(2));
        assert_eq!(dir.name_of(7), Some("Yard"));
        assert_eq!(dir.name_of(3), None);
    }

    #[test]
    fn camera_reads_new_name() {
        let cam: Camera =
            serde_json::from_value(json!({ "id": 1, "newName": "Front", "model": "X" })).unwrap();
        assert_eq!(cam, Camera { id: 1, name: "Front".into() });
    }

    #[test]
    fn preset_payload_accepts_both_shapes() {
        let bare: PresetPayload =
            serde_json::from_value(json!([{ "position": 1, "name": "Gate" }])).unwrap();
        let listed: PresetPayload = serde_json::from_value(json!({
            "presets": [{ "position": 1, "name": "Gate" }],
            "total": 1
        }))
        .unwrap();

        assert_eq!(bare.into_presets(), listed.into_presets());
    }

    #[test]
    fn preset_keeps_unknown_fields() {
        let raw = json!({ "position": 3, "name": "Drive", "id": 12, "speed": 5 });
        let preset: PtzPreset = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(preset.position, 3);
        assert_eq!(preset.extra.get("speed"), Some(&json!(5)));
        assert_eq!(serde_json::to_value(&preset).unwrap(), raw);
    }

    #[test]
    fn unnamed_preset_serializes_back_without_name() {
        let raw = json!({ "position": 4, "speed": 2 });
        let preset: PtzPreset = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(preset.name, None);
        assert_eq!(serde_json::to_value(&preset).unwrap(), raw);
    }

    #[test]
    fn api_info_table() {
        let table: ApiInfoTable = serde_json::from_value(json!({
            "SYNO.API.Auth": { "maxVersion": 6, "minVersion": 1, "path": "entry.cgi" },
            "SYNO.SurveillanceStation.Camera": { "maxVersion": 9 }
        }))
        .unwrap();

        assert_eq!(table["SYNO.API.Auth"].max_version, 6);
        assert_eq!(table["SYNO.SurveillanceStation.Camera"].min_version, None);
    }
}
