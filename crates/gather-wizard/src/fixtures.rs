//! Shared builders for wizard unit tests.

use chrono::{FixedOffset, TimeZone};
use chrono_tz::Tz;
use gather_core::{LatLng, ListingKind, LocationPayload, LocationSource, ServicePhoto};

use crate::clock::LocalClock;
use crate::state::WizardState;

/// 2026-10-18 12:00 in Chicago, two weeks before daylight saving ends.
pub(crate) fn clock() -> LocalClock {
    let offset = FixedOffset::west_opt(5 * 3600).unwrap();
    let now = offset.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
    LocalClock::new(now, Tz::America__Chicago)
}

pub(crate) fn austin() -> LocationPayload {
    LocationPayload {
        lat: 30.2672,
        lng: -97.7431,
        formatted_address: "Austin, TX, USA".to_owned(),
        place_id: Some("ChIJLwPMoJm1RIYRetVp1EtGm10".to_owned()),
        country_code: "US".to_owned(),
        country_name: Some("United States".to_owned()),
        admin1: Some("Texas".to_owned()),
        admin1_code: Some("TX".to_owned()),
        city: "Austin".to_owned(),
        city_key: "austin".to_owned(),
        postal_code: None,
        neighborhood: None,
        source: LocationSource::PlacesAutocomplete,
    }
}

/// A paid event in Austin tomorrow morning, priced at $20.
pub(crate) fn austin_paid_event() -> WizardState {
    let location = austin();
    WizardState {
        kind: Some(ListingKind::EventPaid),
        title: "Run".to_owned(),
        description: "5k".to_owned(),
        date_iso: "2026-10-19".to_owned(),
        time24: "09:00".to_owned(),
        query: location.formatted_address.clone(),
        selected_address: location.formatted_address.clone(),
        coord: Some(LatLng::new(location.lat, location.lng)),
        location_payload: Some(location),
        price_text: "20".to_owned(),
        ..WizardState::default()
    }
}

pub(crate) fn free_event() -> WizardState {
    WizardState {
        kind: Some(ListingKind::EventFree),
        price_text: String::new(),
        ..austin_paid_event()
    }
}

/// A bookable service with one uploaded photo.
pub(crate) fn service() -> WizardState {
    WizardState {
        kind: Some(ListingKind::Service),
        title: "Haircut".to_owned(),
        description: "Walk-ins welcome".to_owned(),
        price_text: "35".to_owned(),
        service_photos: vec![ServicePhoto {
            uri: "file:///chair.jpg".to_owned(),
            url: Some("https://cdn.example/svc/chair.jpg".to_owned()),
            key: Some("svc/chair.jpg".to_owned()),
        }],
        ..austin_paid_event()
    }
}
