// Vendor error code taxonomy
//
// Surveillance Station never uses HTTP status codes for API failures. A
// failed call comes back as `{"success": false, "error": {"code": N}}`
// and the meaning of `N` depends on which API family answered. Codes
// below 400 are shared by every family; 400+ are family-specific.

use std::fmt;

use serde::Serialize;

/// A group of endpoints that share an error code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApiFamily {
    /// Codes every API may return (100-119).
    Common,
    /// `SYNO.API.Auth`
    Auth,
    /// `SYNO.SurveillanceStation.Camera`
    Camera,
    /// `SYNO.SurveillanceStation.PTZ`
    Ptz,
    /// `SYNO.SurveillanceStation.PTZ.Preset`
    PtzPreset,
}

impl fmt::Display for ApiFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Common => "common",
            Self::Auth => "auth",
            Self::Camera => "camera",
            Self::Ptz => "ptz",
            Self::PtzPreset => "ptz-preset",
        })
    }
}

/// Human-readable meaning of `code` as reported by `family`.
///
/// Family-specific entries win over the common table. Codes nobody
/// documents come back as `"unknown error code"`.
pub fn describe(family: ApiFamily, code: i64) -> &'static str {
    family_specific(family, code)
        .or_else(|| common(code))
        .unwrap_or("unknown error code")
}

fn common(code: i64) -> Option<&'static str> {
    Some(match code {
        100 => "unknown error",
        101 => "invalid parameters",
        102 => "API does not exist",
        103 => "method does not exist",
        104 => "this API version is not supported",
        105 => "insufficient user privilege",
        106 => "connection time out",
        107 => "multiple login detected",
        119 => "session id not found",
        _ => return None,
    })
}

fn family_specific(family: ApiFamily, code: i64) -> Option<&'static str> {
    match family {
        ApiFamily::Common => None,
        ApiFamily::Auth => auth(code),
        ApiFamily::Camera | ApiFamily::Ptz => Some(match code {
            400 => "execution failed",
            401 => "parameter invalid",
            402 => "camera disabled",
            _ => return None,
        }),
        ApiFamily::PtzPreset => Some(match code {
            400 => "operation failed",
            401 => "parameter invalid",
            402 => "camera disabled",
            _ => return None,
        }),
    }
}

fn auth(code: i64) -> Option<&'static str> {
    Some(match code {
        400 => "no such account or incorrect password",
        401 => "guest or disabled account",
        402 => "permission denied",
        403 => "one time password not specified",
        404 => "one time password authenticate failed",
        405 => "app portal incorrect",
        406 => "one time password code enforced",
        407 => "account locked (max tries exceeded)",
        408 => "password expired and cannot be changed",
        409 => "password expired",
        410 => "password must be changed",
        _ => return None,
    })
}

/// Common codes that mean the server no longer honours our session.
pub(crate) fn is_session_code(code: i64) -> bool {
    matches!(code, 105..=107 | 119)
}
