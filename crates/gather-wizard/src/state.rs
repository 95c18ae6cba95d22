use gather_core::{
    LatLng, ListingKind, ListingRecord, LocationPayload, ServicePhoto, ServiceSchedule,
};

use crate::money::cents_to_price_text;

/// Every field of an in-progress listing.
///
/// Only mutated through [`crate::reduce`]; validation lives in
/// [`crate::validate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardState {
    /// `None` only before the first step is completed.
    pub kind: Option<ListingKind>,
    pub title: String,
    pub description: String,
    pub emoji: String,
    /// `YYYY-MM-DD`
    pub date_iso: String,
    /// `HH:mm`
    pub time24: String,
    pub service_schedule: ServiceSchedule,
    /// Raw search box text.
    pub query: String,
    pub selected_address: String,
    pub coord: Option<LatLng>,
    pub location_payload: Option<LocationPayload>,
    pub price_text: String,
    pub capacity_text: String,
    pub service_photos: Vec<ServicePhoto>,
    pub submitting: bool,
    pub err: Option<String>,
    /// Backend id when editing an existing listing.
    pub editing_id: Option<String>,
    /// Creator of the listing being edited.
    pub owner_id: Option<String>,
}

impl WizardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an edit session from a persisted listing.
    ///
    /// A stored location missing its city or country is dropped so the
    /// `where` step has to be completed again.
    #[must_use]
    pub fn from_record(record: &ListingRecord) -> Self {
        let location = record
            .location
            .clone()
            .filter(LocationPayload::is_usable);
        let (selected_address, coord) = location.as_ref().map_or_else(
            || (String::new(), None),
            |loc| {
                (
                    loc.formatted_address.clone(),
                    Some(LatLng::new(loc.lat, loc.lng)),
                )
            },
        );

        Self {
            kind: Some(record.kind),
            title: record.title.clone(),
            description: record.description.clone(),
            emoji: record.emoji.clone().unwrap_or_default(),
            date_iso: record.date.clone(),
            time24: record.time.clone(),
            service_schedule: record.service_schedule.clone().unwrap_or_default(),
            query: selected_address.clone(),
            selected_address,
            coord,
            location_payload: location,
            price_text: record
                .price_cents
                .filter(|_| record.kind.requires_price())
                .map(cents_to_price_text)
                .unwrap_or_default(),
            capacity_text: record
                .capacity
                .filter(|_| record.kind.allows_capacity())
                .map(|c| c.to_string())
                .unwrap_or_default(),
            service_photos: record
                .service_photos
                .iter()
                .cloned()
                .map(|mut photo| {
                    if photo.uri.is_empty() {
                        photo.uri = photo.url.clone().unwrap_or_default();
                    }
                    photo
                })
                .collect(),
            submitting: false,
            err: None,
            editing_id: Some(record.id.clone()),
            owner_id: Some(record.creator_clerk_id.clone()),
        }
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    #[must_use]
    pub fn pending_photo_count(&self) -> usize {
        self.service_photos.iter().filter(|p| p.is_pending()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: serde_json::Value) -> ListingRecord {
        serde_json::from_value(value).expect("valid record")
    }

    #[test]
    fn new_state_is_blank() {
        let state = WizardState::new();
        assert!(state.kind.is_none());
        assert!(state.title.is_empty());
        assert!(state.coord.is_none());
        assert_eq!(state.service_schedule, ServiceSchedule::Appointment);
        assert!(!state.is_editing());
    }

    #[test]
    fn seeds_from_paid_event_record() {
        let state = WizardState::from_record(&record(serde_json::json!({
            "_id": "evt_1",
            "title": "Run",
            "description": "5k",
            "emoji": "🏃",
            "kind": "event_paid",
            "priceCents": 1250,
            "capacity": 40,
            "date": "2026-10-19",
            "time": "09:00",
            "creatorClerkId": "user_1",
            "location": {
                "lat": 30.27,
                "lng": -97.74,
                "formattedAddress": "Austin, TX, USA",
                "countryCode": "US",
                "city": "Austin",
                "cityKey": "austin",
                "source": "places_autocomplete"
            }
        })));

        assert_eq!(state.kind, Some(ListingKind::EventPaid));
        assert_eq!(state.editing_id.as_deref(), Some("evt_1"));
        assert_eq!(state.owner_id.as_deref(), Some("user_1"));
        assert_eq!(state.price_text, "12.5");
        assert!(state.capacity_text.is_empty(), "paid events carry no capacity");
        assert_eq!(state.emoji, "🏃");
        assert_eq!(state.selected_address, "Austin, TX, USA");
        assert_eq!(state.query, "Austin, TX, USA");
        assert_eq!(state.coord, Some(LatLng::new(30.27, -97.74)));
        assert!(state.location_payload.is_some());
    }

    #[test]
    fn seeding_drops_unusable_location() {
        let state = WizardState::from_record(&record(serde_json::json!({
            "_id": "evt_2",
            "title": "Picnic",
            "kind": "event_free",
            "capacity": 12,
            "creatorClerkId": "user_1",
            "location": {
                "lat": 1.0,
                "lng": 2.0,
                "formattedAddress": "Somewhere",
                "countryCode": "",
                "city": "Nowhere",
                "source": "reverse_geocode"
            }
        })));
        assert!(state.location_payload.is_none());
        assert!(state.coord.is_none());
        assert!(state.selected_address.is_empty());
        assert_eq!(state.capacity_text, "12");
        assert!(state.price_text.is_empty());
    }

    #[test]
    fn stored_photos_use_url_as_local_handle() {
        let state = WizardState::from_record(&record(serde_json::json!({
            "_id": "svc_1",
            "title": "Haircut",
            "kind": "service",
            "priceCents": 3500,
            "creatorClerkId": "user_1",
            "servicePhotos": [
                { "url": "https://cdn.example/a.jpg", "key": "svc/a.jpg" }
            ]
        })));
        let photo = &state.service_photos[0];
        assert_eq!(photo.uri, "https://cdn.example/a.jpg");
        assert!(!photo.is_pending());
        assert_eq!(state.price_text, "35");
    }
}
