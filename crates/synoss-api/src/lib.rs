// synoss-api: Async Rust client for the Synology Surveillance Station Web API

mod camera;
pub mod client;
pub mod codes;
pub mod config;
pub mod error;
pub mod models;
pub mod operation;
mod overview;
mod ptz;
pub mod session;
pub mod transport;
pub mod version;

pub use client::SynoClient;
pub use codes::ApiFamily;
pub use config::{ClientConfig, Protocol};
pub use error::{ApiFailure, Cause, Error, FaultKind, TransportFault};
pub use models::{
    Camera, CameraDirectory, CameraId, CameraOverview, PresetPosition, PtzPreset,
};
pub use operation::Operation;
pub use session::{Session, SessionManager};
pub use transport::TransportConfig;
pub use version::{ApiVersionTable, VersionCache};
