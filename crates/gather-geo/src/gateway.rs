//! Seams between the resolver and the remote geocoding services.
//!
//! The resolver only talks to these traits, so tests can hand it in-memory
//! fakes and production wires in [`crate::GoogleMapsClient`].

use async_trait::async_trait;
use gather_core::{AddressComponent, LatLng};
use serde::Serialize;

use crate::error::GeoError;

/// One autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceSuggestion {
    /// Provider place id, used for the details lookup.
    pub id: String,
    /// Primary line, e.g. `"Zilker Park"`.
    pub main: String,
    /// Secondary line, e.g. `"Austin, TX, USA"`.
    pub secondary: Option<String>,
}

impl PlaceSuggestion {
    /// The single-line label shown once a suggestion has been picked.
    #[must_use]
    pub fn label(&self) -> String {
        match self.secondary.as_deref().map(str::trim) {
            Some(secondary) if !secondary.is_empty() => format!("{}, {secondary}", self.main),
            _ => self.main.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDetails {
    pub place_id: String,
    /// `None` when the provider returned no geometry for the place.
    pub location: Option<LatLng>,
    pub formatted_address: Option<String>,
    pub components: Vec<AddressComponent>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReverseGeocodeResult {
    pub place_id: Option<String>,
    pub formatted_address: Option<String>,
    pub components: Vec<AddressComponent>,
}

#[async_trait]
pub trait PlacesGateway: Send + Sync {
    /// Suggestions for a free-text query. An empty list is a valid answer.
    async fn autocomplete(&self, query: &str) -> Result<Vec<PlaceSuggestion>, GeoError>;

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, GeoError>;
}

#[async_trait]
pub trait ReverseGeocodeGateway: Send + Sync {
    /// Best address for a point, or `None` when the geocoder knows nothing there.
    async fn reverse_geocode(&self, point: LatLng)
        -> Result<Option<ReverseGeocodeResult>, GeoError>;
}
