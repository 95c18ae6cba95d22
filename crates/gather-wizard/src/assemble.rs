//! Turns a validated [`WizardState`] into the backend create/update body.

use gather_core::{city_key, GeoPoint, ListingKind, LocationPayload, ServiceSchedule};
use serde::Serialize;
use thiserror::Error;

use crate::clock::LocalClock;
use crate::money::{parse_capacity, parse_price_cents};
use crate::state::WizardState;
use crate::validate::{validate_all, ERR_KIND, ERR_WHEN_INVALID};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssembleError {
    /// A validation rule failed; the message is user-facing.
    #[error("{0}")]
    Invalid(String),

    #[error("{count} service photo(s) are still uploading")]
    PhotosPending { count: usize },

    #[error("sign in to publish a listing")]
    MissingActor,

    #[error("listing has no resolved location")]
    MissingLocation,

    #[error("price could not be converted to cents")]
    InvalidPrice,
}

/// Uploaded photo reference as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedPhoto {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// The normalized location plus its GeoJSON point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationBody {
    #[serde(flatten)]
    pub payload: LocationPayload,
    pub geo: GeoPoint,
}

/// Body of a create-event or update-event request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPayload {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    pub kind: ListingKind,
    /// `null` for free events.
    pub price_cents: Option<i64>,
    /// `null` unless a free event has a positive capacity.
    pub capacity: Option<u32>,
    pub date: String,
    pub time: String,
    pub timezone: String,
    /// RFC 3339 start instant at the device offset.
    pub starts_at: String,
    pub location: LocationBody,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub service_photos: Vec<UploadedPhoto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_schedule: Option<ServiceSchedule>,
    pub creator_clerk_id: String,
}

/// Builds the submission payload for `actor_id`.
///
/// Runs [`validate_all`] first, so a state that passed every step earlier but
/// was changed since (a kind switch, say) is still rejected.
///
/// # Errors
///
/// Returns [`AssembleError::Invalid`] with the first validation message,
/// [`AssembleError::PhotosPending`] while service photos have no remote url,
/// and [`AssembleError::MissingActor`] for a blank actor id.
pub fn assemble(
    state: &WizardState,
    clock: &LocalClock,
    actor_id: &str,
) -> Result<ListingPayload, AssembleError> {
    let actor_id = actor_id.trim();
    if actor_id.is_empty() {
        return Err(AssembleError::MissingActor);
    }
    if let Some(message) = validate_all(state, clock) {
        return Err(AssembleError::Invalid(message));
    }

    let kind = state
        .kind
        .ok_or_else(|| AssembleError::Invalid(ERR_KIND.to_owned()))?;

    let mut location = state
        .location_payload
        .clone()
        .ok_or(AssembleError::MissingLocation)?;
    if location.city_key.is_empty() {
        location.city_key = city_key(&location.city);
    }
    let geo = GeoPoint::new(location.lat, location.lng);

    let price_cents = if kind.requires_price() {
        Some(parse_price_cents(&state.price_text).ok_or(AssembleError::InvalidPrice)?)
    } else {
        None
    };
    let capacity = if kind.allows_capacity() {
        parse_capacity(&state.capacity_text)
    } else {
        None
    };

    let starts_at = clock
        .compose(&state.date_iso, &state.time24)
        .ok_or_else(|| AssembleError::Invalid(ERR_WHEN_INVALID.to_owned()))?
        .to_rfc3339();

    let service_photos = if kind.requires_photos() {
        uploaded_photos(state)?
    } else {
        Vec::new()
    };
    let service_schedule = (kind == ListingKind::Service).then(|| state.service_schedule.clone());

    let emoji = Some(state.emoji.trim())
        .filter(|e| !e.is_empty())
        .map(str::to_owned);

    tracing::debug!(
        kind = %kind,
        editing = state.is_editing(),
        city_key = %location.city_key,
        "listing payload assembled"
    );

    Ok(ListingPayload {
        id: state.editing_id.clone(),
        title: state.title.trim().to_owned(),
        description: state.description.trim().to_owned(),
        emoji,
        kind,
        price_cents,
        capacity,
        date: state.date_iso.trim().to_owned(),
        time: state.time24.trim().to_owned(),
        timezone: clock.timezone().to_owned(),
        starts_at,
        location: LocationBody {
            payload: location,
            geo,
        },
        service_photos,
        service_schedule,
        creator_clerk_id: actor_id.to_owned(),
    })
}

fn uploaded_photos(state: &WizardState) -> Result<Vec<UploadedPhoto>, AssembleError> {
    let pending = state.pending_photo_count();
    if pending > 0 {
        return Err(AssembleError::PhotosPending { count: pending });
    }
    Ok(state
        .service_photos
        .iter()
        .filter_map(|photo| {
            photo.url.clone().map(|url| UploadedPhoto {
                url,
                key: photo.key.clone(),
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use gather_core::ServicePhoto;

    use super::*;
    use crate::fixtures::{austin_paid_event, clock, free_event, service};
    use crate::validate::ERR_SERVICE_PHOTOS;

    #[test]
    fn austin_paid_event_assembles_price_in_cents() {
        let payload = assemble(&austin_paid_event(), &clock(), "user_1").unwrap();
        assert_eq!(payload.price_cents, Some(2000));
        assert_eq!(payload.capacity, None);
        assert_eq!(payload.starts_at, "2026-10-19T09:00:00-05:00");
        assert_eq!(payload.timezone, "America/Chicago");
        assert_eq!(payload.creator_clerk_id, "user_1");
        assert_eq!(payload.location.geo.coordinates, [-97.7431, 30.2672]);
        assert!(payload.service_schedule.is_none());
    }

    #[test]
    fn start_after_daylight_saving_ends_uses_standard_offset() {
        let mut state = austin_paid_event();
        state.date_iso = "2026-11-10".to_owned();
        let payload = assemble(&state, &clock(), "user_1").unwrap();
        assert_eq!(payload.starts_at, "2026-11-10T09:00:00-06:00");
        assert_eq!(payload.date, "2026-11-10");
    }

    #[test]
    fn wire_shape_is_camel_case_with_flattened_location() {
        let payload = assemble(&austin_paid_event(), &clock(), "user_1").unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["priceCents"], 2000);
        assert_eq!(json["startsAt"], "2026-10-19T09:00:00-05:00");
        assert_eq!(json["creatorClerkId"], "user_1");
        assert_eq!(json["location"]["city"], "Austin");
        assert_eq!(json["location"]["countryCode"], "US");
        assert_eq!(json["location"]["geo"]["type"], "Point");
        assert!(json.get("_id").is_none());
        assert!(json.get("servicePhotos").is_none());
    }

    #[test]
    fn free_event_with_empty_capacity_sends_null() {
        let payload = assemble(&free_event(), &clock(), "user_1").unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json["capacity"].is_null());
        assert!(json["priceCents"].is_null());
    }

    #[test]
    fn free_event_capacity_is_parsed() {
        let mut state = free_event();
        state.capacity_text = " 40 ".to_owned();
        let payload = assemble(&state, &clock(), "user_1").unwrap();
        assert_eq!(payload.capacity, Some(40));
    }

    #[test]
    fn price_rounds_half_away_from_zero() {
        let mut state = austin_paid_event();
        state.price_text = "12.345".to_owned();
        let payload = assemble(&state, &clock(), "user_1").unwrap();
        assert_eq!(payload.price_cents, Some(1235));
    }

    #[test]
    fn editing_carries_id() {
        let mut state = austin_paid_event();
        state.editing_id = Some("evt_9".to_owned());
        let json = serde_json::to_value(assemble(&state, &clock(), "user_1").unwrap()).unwrap();
        assert_eq!(json["_id"], "evt_9");
    }

    #[test]
    fn blank_city_key_is_recomputed() {
        let mut state = austin_paid_event();
        if let Some(loc) = state.location_payload.as_mut() {
            loc.city = "St. Louis".to_owned();
            loc.city_key.clear();
        }
        let payload = assemble(&state, &clock(), "user_1").unwrap();
        assert_eq!(payload.location.payload.city_key, "st-louis");
    }

    #[test]
    fn service_includes_photos_and_schedule() {
        let payload = assemble(&service(), &clock(), "user_1").unwrap();
        assert_eq!(payload.price_cents, Some(3500));
        assert_eq!(
            payload.service_photos,
            vec![UploadedPhoto {
                url: "https://cdn.example/svc/chair.jpg".to_owned(),
                key: Some("svc/chair.jpg".to_owned()),
            }]
        );
        assert_eq!(payload.service_schedule, Some(ServiceSchedule::Appointment));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["serviceSchedule"]["mode"], "appointment");
    }

    #[test]
    fn pending_photos_block_assembly() {
        let mut state = service();
        state.service_photos.push(ServicePhoto::local("file:///new.jpg"));
        assert_eq!(
            assemble(&state, &clock(), "user_1"),
            Err(AssembleError::PhotosPending { count: 1 })
        );
    }

    #[test]
    fn service_without_photos_reports_validation_message() {
        let mut state = service();
        state.service_photos.clear();
        assert_eq!(
            assemble(&state, &clock(), "user_1"),
            Err(AssembleError::Invalid(ERR_SERVICE_PHOTOS.to_owned()))
        );
    }

    #[test]
    fn blank_actor_is_rejected() {
        assert_eq!(
            assemble(&austin_paid_event(), &clock(), "  "),
            Err(AssembleError::MissingActor)
        );
    }

    #[test]
    fn emoji_and_text_are_trimmed() {
        let mut state = austin_paid_event();
        state.title = "  Run  ".to_owned();
        state.emoji = " ".to_owned();
        let payload = assemble(&state, &clock(), "user_1").unwrap();
        assert_eq!(payload.title, "Run");
        assert_eq!(payload.emoji, None);
    }
}
