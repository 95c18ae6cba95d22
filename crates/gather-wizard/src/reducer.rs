//! The single reducer that owns all wizard field state.
//!
//! The reducer never fails. Actions that do not apply (patching a photo that
//! was already removed, for example) leave the state untouched.

use std::collections::HashSet;

use gather_core::{
    LatLng, ListingKind, LocationPayload, ServicePhoto, ServiceSchedule, MAX_SERVICE_PHOTOS,
};

use crate::state::WizardState;

/// One field write for [`Action::Set`].
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Title(String),
    Description(String),
    Emoji(String),
    DateIso(String),
    Time24(String),
    ServiceSchedule(ServiceSchedule),
    Query(String),
    SelectedAddress(String),
    Coord(Option<LatLng>),
    LocationPayload(Option<LocationPayload>),
    PriceText(String),
    CapacityText(String),
    Submitting(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Switch listing kind, clearing fields the new kind cannot carry.
    SetKind(ListingKind),
    /// Generic field write; dismisses the current error.
    Set(Field),
    SetErr(Option<String>),
    /// Append photos, de-duplicated by remote key or local uri, capped at
    /// [`MAX_SERVICE_PHOTOS`].
    AddServicePhotos(Vec<ServicePhoto>),
    /// Attach upload results to the photo with this local uri.
    UpdateServicePhoto {
        uri: String,
        url: Option<String>,
        key: Option<String>,
    },
    RemoveServicePhoto {
        uri: String,
    },
    /// Replace the whole state, e.g. when opening an edit flow.
    Seed(Box<WizardState>),
    Reset,
}

#[must_use]
pub fn photo_limit_message() -> String {
    format!("You can add up to {MAX_SERVICE_PHOTOS} service photos; the extra photos were not added.")
}

pub fn reduce(state: &mut WizardState, action: Action) {
    match action {
        Action::SetKind(kind) => {
            state.kind = Some(kind);
            state.err = None;
            match kind {
                ListingKind::EventFree => {
                    state.price_text.clear();
                    state.service_photos.clear();
                }
                ListingKind::EventPaid => {
                    state.capacity_text.clear();
                    state.service_photos.clear();
                }
                ListingKind::Service => {
                    state.capacity_text.clear();
                }
            }
        }
        Action::Set(field) => {
            apply_field(state, field);
            state.err = None;
        }
        Action::SetErr(err) => state.err = err,
        Action::AddServicePhotos(photos) => add_photos(state, photos),
        Action::UpdateServicePhoto { uri, url, key } => {
            if let Some(photo) = state.service_photos.iter_mut().find(|p| p.uri == uri) {
                if url.is_some() {
                    photo.url = url;
                }
                if key.is_some() {
                    photo.key = key;
                }
            }
        }
        Action::RemoveServicePhoto { uri } => {
            state.service_photos.retain(|p| p.uri != uri);
            state.err = None;
        }
        Action::Seed(seeded) => *state = *seeded,
        Action::Reset => *state = WizardState::default(),
    }
}

fn apply_field(state: &mut WizardState, field: Field) {
    match field {
        Field::Title(v) => state.title = v,
        Field::Description(v) => state.description = v,
        Field::Emoji(v) => state.emoji = v,
        Field::DateIso(v) => state.date_iso = v,
        Field::Time24(v) => state.time24 = v,
        Field::ServiceSchedule(v) => state.service_schedule = v,
        Field::Query(v) => state.query = v,
        Field::SelectedAddress(v) => state.selected_address = v,
        Field::Coord(v) => state.coord = v,
        Field::LocationPayload(v) => state.location_payload = v,
        Field::PriceText(v) => state.price_text = v,
        Field::CapacityText(v) => state.capacity_text = v,
        Field::Submitting(v) => state.submitting = v,
    }
}

fn add_photos(state: &mut WizardState, photos: Vec<ServicePhoto>) {
    let mut seen: HashSet<String> = state
        .service_photos
        .iter()
        .map(|p| p.dedup_key().to_owned())
        .collect();
    let mut overflow = false;

    for photo in photos {
        if !seen.insert(photo.dedup_key().to_owned()) {
            continue;
        }
        if state.service_photos.len() >= MAX_SERVICE_PHOTOS {
            overflow = true;
            break;
        }
        state.service_photos.push(photo);
    }

    if overflow {
        tracing::debug!(limit = MAX_SERVICE_PHOTOS, "service photo batch truncated");
        state.err = Some(photo_limit_message());
    }
}

#[cfg(test)]
#[path = "reducer_test.rs"]
mod tests;
