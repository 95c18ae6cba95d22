use thiserror::Error;

/// Errors returned by the Google Maps gateways.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The geocoder answered with a non-`OK` status such as `REQUEST_DENIED`.
    #[error("geocoder returned {status}: {message}")]
    ApiStatus { status: String, message: String },

    /// The configured base URL does not parse, or an endpoint cannot be joined to it.
    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
