//! Address normalization from raw geocoder components to a
//! [`LocationPayload`].
//!
//! The normalizer is pure and synchronous. It either produces a payload with
//! both a city and a country, or nothing at all; partial locations are never
//! returned.

use gather_core::{city_key, AddressComponent, LocationPayload, LocationSource};

/// City candidates, tried in order until one is present.
const CITY_TYPES: [&str; 4] = [
    "locality",
    "postal_town",
    "administrative_area_level_3",
    "administrative_area_level_2",
];

const NEIGHBORHOOD_TYPES: [&str; 2] = ["neighborhood", "sublocality"];

/// Everything the normalizer needs from a geocoder answer.
#[derive(Debug, Clone, Copy)]
pub struct AddressInput<'a> {
    pub lat: f64,
    pub lng: f64,
    pub formatted_address: &'a str,
    pub place_id: Option<&'a str>,
    pub components: &'a [AddressComponent],
    pub source: LocationSource,
}

/// Normalizes geocoder address components into a [`LocationPayload`].
///
/// Returns `None` when no city candidate or no country component is found.
#[must_use]
pub fn normalize_address(input: &AddressInput<'_>) -> Option<LocationPayload> {
    let components = input.components;

    let city = CITY_TYPES
        .iter()
        .find_map(|ty| first_of_type(components, ty))
        .map(|c| c.long_name.trim().to_owned())?;

    let country = first_of_type(components, "country")?;
    let country_code = non_empty(&country.short_name)?.to_uppercase();
    let country_name = non_empty(&country.long_name).map(str::to_owned);

    let admin1_component = first_of_type(components, "administrative_area_level_1");
    let admin1 = admin1_component
        .and_then(|c| non_empty(&c.long_name))
        .map(str::to_owned);
    let admin1_code = admin1_component
        .and_then(|c| non_empty(&c.short_name))
        .map(str::to_owned);

    let postal_code = first_of_type(components, "postal_code")
        .and_then(|c| non_empty(&c.long_name))
        .map(str::to_owned);

    let neighborhood = NEIGHBORHOOD_TYPES
        .iter()
        .find_map(|ty| first_of_type(components, ty))
        .and_then(|c| non_empty(&c.long_name))
        .map(str::to_owned);

    let place_id = input
        .place_id
        .and_then(non_empty)
        .map(str::to_owned);

    Some(LocationPayload {
        lat: input.lat,
        lng: input.lng,
        formatted_address: input.formatted_address.trim().to_owned(),
        place_id,
        country_code,
        country_name,
        admin1,
        admin1_code,
        city_key: city_key(&city),
        city,
        postal_code,
        neighborhood,
        source: input.source,
    })
}

/// First component carrying `ty` whose long name is non-blank.
fn first_of_type<'a>(components: &'a [AddressComponent], ty: &str) -> Option<&'a AddressComponent> {
    components
        .iter()
        .find(|c| c.has_type(ty) && !c.long_name.trim().is_empty())
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
