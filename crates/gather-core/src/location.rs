//! Canonical location types shared by the resolver, the wizard, and the
//! submission payload.

use serde::{Deserialize, Serialize};

/// Which input modality produced a [`LocationPayload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSource {
    UserTyped,
    PlacesAutocomplete,
    ReverseGeocode,
}

/// One component of a geocoder address, as returned by the Google geocoding
/// and place-details endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl AddressComponent {
    #[must_use]
    pub fn has_type(&self, ty: &str) -> bool {
        self.types.iter().any(|t| t == ty)
    }
}

/// A resolved, normalized location.
///
/// Built by the address normalizer only when both `city` and `country_code`
/// are non-empty; [`LocationPayload::is_usable`] re-checks that for values
/// that arrive from elsewhere (e.g. a persisted listing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPayload {
    pub lat: f64,
    pub lng: f64,
    pub formatted_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    /// ISO-3166 alpha-2, uppercase.
    pub country_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin1_code: Option<String>,
    pub city: String,
    #[serde(default)]
    pub city_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    pub source: LocationSource,
}

impl LocationPayload {
    /// `true` when the mandatory `city` and `country_code` fields are present.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.city.trim().is_empty() && !self.country_code.trim().is_empty()
    }
}

/// GeoJSON point, `coordinates` ordered `[lng, lat]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

impl GeoPoint {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: [lng, lat],
        }
    }
}

/// Derive the backend's city lookup key from a city name.
///
/// Lowercases, drops anything that is not a letter, digit, or whitespace,
/// collapses whitespace runs, and joins the words with hyphens.
/// `"  San   José "` becomes `"san-josé"`, `"St. Louis"` becomes `"st-louis"`.
#[must_use]
pub fn city_key(city: &str) -> String {
    city.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
