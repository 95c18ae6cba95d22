//! Response shapes for the Google Maps web services used by the gateways.
//!
//! Every endpoint wraps its payload in an envelope with a `status` string.
//! `OK` and `ZERO_RESULTS` are successful; anything else (`REQUEST_DENIED`,
//! `OVER_QUERY_LIMIT`, `INVALID_REQUEST`, ...) comes with an optional
//! `error_message`.

use gather_core::AddressComponent;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AutocompleteResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
pub struct Prediction {
    pub place_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub structured_formatting: Option<StructuredFormatting>,
}

#[derive(Debug, Deserialize)]
pub struct StructuredFormatting {
    #[serde(default)]
    pub main_text: String,
    #[serde(default)]
    pub secondary_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub result: Option<DetailsResult>,
}

#[derive(Debug, Deserialize)]
pub struct DetailsResult {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: Option<LatLngLiteral>,
}

#[derive(Debug, Deserialize)]
pub struct LatLngLiteral {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}
