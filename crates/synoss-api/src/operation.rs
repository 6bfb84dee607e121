// Wire descriptors for every call the client makes.
//
// Each operation pins the `api` / `method` pair it sends and the error
// family its failures are decoded with.

use std::fmt;

use serde::Serialize;

use crate::codes::ApiFamily;

/// API family names as reported by `SYNO.API.Info`.
pub mod api {
    pub const INFO: &str = "SYNO.API.Info";
    pub const AUTH: &str = "SYNO.API.Auth";
    pub const CAMERA: &str = "SYNO.SurveillanceStation.Camera";
    pub const PTZ: &str = "SYNO.SurveillanceStation.PTZ";
    pub const PTZ_PRESET: &str = "SYNO.SurveillanceStation.PTZ.Preset";
}

/// Session scope label sent with login and logout.
pub(crate) const SESSION_NAME: &str = "SurveillanceStation";

/// One request/response cycle against the station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    QueryApiVersion,
    Login,
    Logout,
    ListCameras,
    GetStreamInfo,
    ListPtzPresets,
    GoPtzPreset,
}

impl Operation {
    /// The `api` query parameter.
    pub fn api(self) -> &'static str {
        match self {
            Self::QueryApiVersion => api::INFO,
            Self::Login | Self::Logout => api::AUTH,
            Self::ListCameras | Self::GetStreamInfo => api::CAMERA,
            Self::ListPtzPresets => api::PTZ_PRESET,
            Self::GoPtzPreset => api::PTZ,
        }
    }

    /// The `method` query parameter.
    pub fn method(self) -> &'static str {
        match self {
            Self::QueryApiVersion => "Query",
            Self::Login => "login",
            Self::Logout => "logout",
            Self::ListCameras => "List",
            Self::GetStreamInfo => "GetLiveViewPath",
            Self::ListPtzPresets => "Enum",
            Self::GoPtzPreset => "GoPreset",
        }
    }

    /// Error table used to explain a `success: false` body.
    pub fn family(self) -> ApiFamily {
        match self {
            Self::QueryApiVersion => ApiFamily::Common,
            Self::Login | Self::Logout => ApiFamily::Auth,
            Self::ListCameras | Self::GetStreamInfo => ApiFamily::Camera,
            Self::ListPtzPresets => ApiFamily::PtzPreset,
            Self::GoPtzPreset => ApiFamily::Ptz,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::QueryApiVersion => "query API versions",
            Self::Login => "login",
            Self::Logout => "logout",
            Self::ListCameras => "list cameras",
            Self::GetStreamInfo => "get camera stream info",
            Self::ListPtzPresets => "list PTZ presets",
            Self::GoPtzPreset => "go to PTZ preset",
        })
    }
}
