//! HTTP client for the Google Maps Places and Geocoding web services.
//!
//! Wraps `reqwest` with API key handling, envelope `status` checks, and typed
//! response decoding. Implements both [`PlacesGateway`] and
//! [`ReverseGeocodeGateway`].

use std::time::Duration;

use async_trait::async_trait;
use gather_core::LatLng;
use reqwest::{Client, Url};

use crate::error::GeoError;
use crate::gateway::{
    PlaceDetails, PlaceSuggestion, PlacesGateway, ReverseGeocodeGateway, ReverseGeocodeResult,
};
use crate::types::{AutocompleteResponse, DetailsResponse, GeocodeResponse};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/";

const DETAILS_FIELDS: &str = "place_id,formatted_address,geometry,address_component";

/// Client for the Google Maps web services.
///
/// Use [`GoogleMapsClient::new`] for production or
/// [`GoogleMapsClient::with_base_url`] to point at a mock server in tests.
pub struct GoogleMapsClient {
    client: Client,
    api_key: String,
    base_url: Url,
    /// Lowercase ISO-3166 alpha-2 code restricting autocomplete results.
    country: Option<String>,
}

impl GoogleMapsClient {
    /// Creates a client pointed at the production Google Maps API.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Http`] if the underlying `reqwest::Client` cannot be
    /// constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, GeoError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Http`] if the underlying `reqwest::Client` cannot be
    /// constructed, or [`GeoError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GeoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so that `Url::join` appends endpoint
        // paths instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeoError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            country: None,
        })
    }

    /// Restricts autocomplete to one country (ISO-3166 alpha-2).
    #[must_use]
    pub fn with_country(mut self, country: Option<&str>) -> Self {
        self.country = country
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_ascii_lowercase);
        self
    }

    /// Builds the full request URL for `endpoint` with percent-encoded
    /// query parameters and the API key.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, GeoError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| GeoError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, parses the body as JSON,
    /// and checks the envelope `status`.
    async fn request_json(
        &self,
        url: Url,
        context: &str,
    ) -> Result<serde_json::Value, GeoError> {
        tracing::debug!(context, "geocoder request");
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| GeoError::Deserialize {
                context: context.to_owned(),
                source: e,
            })?;
        Self::check_status(&value)?;
        Ok(value)
    }

    /// `OK` and `ZERO_RESULTS` pass; every other status is an error.
    fn check_status(body: &serde_json::Value) -> Result<(), GeoError> {
        let status = body
            .get("status")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("OK");
        if matches!(status, "OK" | "ZERO_RESULTS") {
            return Ok(());
        }
        let message = body
            .get("error_message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("no error message")
            .to_owned();
        tracing::warn!(status, message = %message, "geocoder returned error status");
        Err(GeoError::ApiStatus {
            status: status.to_owned(),
            message,
        })
    }

    fn decode<T: serde::de::DeserializeOwned>(
        body: serde_json::Value,
        context: &str,
    ) -> Result<T, GeoError> {
        serde_json::from_value(body).map_err(|e| GeoError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[async_trait]
impl PlacesGateway for GoogleMapsClient {
    async fn autocomplete(&self, query: &str) -> Result<Vec<PlaceSuggestion>, GeoError> {
        let components;
        let mut params = vec![("input", query)];
        if let Some(country) = &self.country {
            components = format!("country:{country}");
            params.push(("components", &components));
        }
        let url = self.build_url("place/autocomplete/json", &params)?;
        let context = format!("autocomplete(input={query})");
        let body = self.request_json(url, &context).await?;
        let response: AutocompleteResponse = Self::decode(body, &context)?;

        let suggestions = response
            .predictions
            .into_iter()
            .map(|p| match p.structured_formatting {
                Some(f) if !f.main_text.trim().is_empty() => PlaceSuggestion {
                    id: p.place_id,
                    main: f.main_text,
                    secondary: f.secondary_text.filter(|s| !s.trim().is_empty()),
                },
                _ => PlaceSuggestion {
                    id: p.place_id,
                    main: p.description,
                    secondary: None,
                },
            })
            .collect();
        Ok(suggestions)
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, GeoError> {
        let url = self.build_url(
            "place/details/json",
            &[("place_id", place_id), ("fields", DETAILS_FIELDS)],
        )?;
        let context = format!("place_details(place_id={place_id})");
        let body = self.request_json(url, &context).await?;
        let response: DetailsResponse = Self::decode(body, &context)?;

        let Some(result) = response.result else {
            return Ok(PlaceDetails {
                place_id: place_id.to_owned(),
                location: None,
                formatted_address: None,
                components: Vec::new(),
            });
        };

        Ok(PlaceDetails {
            place_id: result.place_id.unwrap_or_else(|| place_id.to_owned()),
            location: result
                .geometry
                .and_then(|g| g.location)
                .map(|l| LatLng::new(l.lat, l.lng)),
            formatted_address: result.formatted_address,
            components: result.address_components,
        })
    }
}

#[async_trait]
impl ReverseGeocodeGateway for GoogleMapsClient {
    async fn reverse_geocode(
        &self,
        point: LatLng,
    ) -> Result<Option<ReverseGeocodeResult>, GeoError> {
        let latlng = format!("{},{}", point.lat, point.lng);
        let url = self.build_url("geocode/json", &[("latlng", &latlng)])?;
        let context = format!("reverse_geocode(latlng={latlng})");
        let body = self.request_json(url, &context).await?;
        let response: GeocodeResponse = Self::decode(body, &context)?;

        Ok(response
            .results
            .into_iter()
            .next()
            .map(|r| ReverseGeocodeResult {
                place_id: r.place_id,
                formatted_address: r.formatted_address,
                components: r.address_components,
            }))
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
