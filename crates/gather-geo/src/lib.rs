//! Location resolution: geocoder gateways, address normalization, and the
//! resolver that reconciles search, suggestion picks, and pin drops into one
//! canonical [`gather_core::LocationPayload`].

pub mod client;
pub mod error;
pub mod gateway;
pub mod normalize;
pub mod resolver;
pub mod types;

pub use client::GoogleMapsClient;
pub use error::GeoError;
pub use gateway::{
    PlaceDetails, PlaceSuggestion, PlacesGateway, ReverseGeocodeGateway, ReverseGeocodeResult,
};
pub use normalize::{normalize_address, AddressInput};
pub use resolver::{LocationResolver, LocationUpdate, ResolverState, SearchOutcome};
