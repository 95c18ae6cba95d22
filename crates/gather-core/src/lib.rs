//! Shared domain types and configuration for the listing wizard.

pub mod app_config;
pub mod config;
pub mod listing;
pub mod location;
pub mod schedule;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use listing::{LatLng, ListingKind, ListingRecord, ServicePhoto, MAX_SERVICE_PHOTOS};
pub use location::{city_key, AddressComponent, GeoPoint, LocationPayload, LocationSource};
pub use schedule::ServiceSchedule;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
