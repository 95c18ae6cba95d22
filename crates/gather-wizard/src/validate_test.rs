use chrono::Weekday;
use gather_core::{AddressComponent, LatLng, LocationSource, ServicePhoto};
use gather_geo::{normalize_address, AddressInput};

use super::*;
use crate::fixtures::{austin_paid_event, clock, free_event, service};

fn component(long: &str, short: &str, ty: &str) -> AddressComponent {
    AddressComponent {
        long_name: long.to_owned(),
        short_name: short.to_owned(),
        types: vec![ty.to_owned(), "political".to_owned()],
    }
}

#[test]
fn austin_paid_event_is_valid() {
    assert_eq!(validate_all(&austin_paid_event(), &clock()), None);
}

#[test]
fn validate_all_reports_kind_first() {
    let state = WizardState::new();
    assert_eq!(validate_all(&state, &clock()).as_deref(), Some(ERR_KIND));
}

#[test]
fn validate_all_stops_at_first_failure_in_order() {
    let mut state = austin_paid_event();
    state.description = "   ".to_owned();
    state.date_iso.clear();
    state.price_text = "0".to_owned();
    assert_eq!(validate_all(&state, &clock()).as_deref(), Some(ERR_BASICS));

    state.description = "5k".to_owned();
    assert_eq!(
        validate_all(&state, &clock()).as_deref(),
        Some(ERR_WHEN_MISSING)
    );

    state.date_iso = "2026-10-19".to_owned();
    assert_eq!(validate_all(&state, &clock()).as_deref(), Some(ERR_PRICE));
}

#[test]
fn when_rejects_malformed_and_past_starts() {
    let mut state = austin_paid_event();
    state.time24 = "25:00".to_owned();
    assert_eq!(
        validate_step(&state, StepId::When, &clock()).as_deref(),
        Some(ERR_WHEN_INVALID)
    );

    state.date_iso = "2026-10-18".to_owned();
    state.time24 = "12:00".to_owned();
    assert_eq!(
        validate_step(&state, StepId::When, &clock()).as_deref(),
        Some(ERR_WHEN_PAST)
    );

    state.time24 = "12:01".to_owned();
    assert_eq!(validate_step(&state, StepId::When, &clock()), None);
}

#[test]
fn capacity_step_valid_whenever_text_is_empty() {
    let mut state = free_event();
    for blank in ["", "  "] {
        state.capacity_text = blank.to_owned();
        assert_eq!(validate_step(&state, StepId::Capacity, &clock()), None);
    }
}

#[test]
fn capacity_step_rejects_non_positive_or_fractional() {
    let mut state = free_event();
    for bad in ["0", "-3", "2.5", "lots"] {
        state.capacity_text = bad.to_owned();
        assert_eq!(
            validate_step(&state, StepId::Capacity, &clock()).as_deref(),
            Some(ERR_CAPACITY),
            "capacity {bad:?}"
        );
    }
    state.capacity_text = "25".to_owned();
    assert_eq!(validate_step(&state, StepId::Capacity, &clock()), None);
}

#[test]
fn free_event_skips_price() {
    let state = free_event();
    assert!(state.price_text.is_empty());
    assert_eq!(validate_all(&state, &clock()), None);
}

#[test]
fn price_step_rejects_zero_and_garbage() {
    let mut state = austin_paid_event();
    for bad in ["", "0", "0.001", "-5", "twenty"] {
        state.price_text = bad.to_owned();
        assert_eq!(
            validate_step(&state, StepId::Price, &clock()).as_deref(),
            Some(ERR_PRICE),
            "price {bad:?}"
        );
    }
}

#[test]
fn service_without_photos_fails() {
    let mut state = service();
    state.service_photos.clear();
    assert_eq!(
        validate_all(&state, &clock()).as_deref(),
        Some(ERR_SERVICE_PHOTOS)
    );
    assert_eq!(ERR_SERVICE_PHOTOS, "Upload at least 1 service photo.");
}

#[test]
fn service_photos_only_checked_for_services() {
    let state = austin_paid_event();
    assert!(state.service_photos.is_empty());
    assert_eq!(validate_all(&state, &clock()), None);
}

#[test]
fn where_fails_without_coord_or_address() {
    let mut state = austin_paid_event();
    state.coord = None;
    assert_eq!(
        validate_step(&state, StepId::Where, &clock()).as_deref(),
        Some(ERR_WHERE_MISSING)
    );

    let mut state = austin_paid_event();
    state.selected_address = " ".to_owned();
    assert_eq!(
        validate_step(&state, StepId::Where, &clock()).as_deref(),
        Some(ERR_WHERE_MISSING)
    );
}

#[test]
fn reverse_geocode_without_country_fails_where() {
    let components = vec![
        component("Austin", "Austin", "locality"),
        component("Texas", "TX", "administrative_area_level_1"),
    ];
    let payload = normalize_address(&AddressInput {
        lat: 30.27,
        lng: -97.74,
        formatted_address: "Austin, TX",
        place_id: None,
        components: &components,
        source: LocationSource::ReverseGeocode,
    });
    assert!(payload.is_none());

    let mut state = austin_paid_event();
    state.coord = Some(LatLng::new(30.27, -97.74));
    state.selected_address = "Austin, TX".to_owned();
    state.location_payload = payload;
    assert_eq!(
        validate_step(&state, StepId::Where, &clock()).as_deref(),
        Some(ERR_WHERE_INCOMPLETE)
    );
}

#[test]
fn where_rejects_payload_missing_city() {
    let mut state = austin_paid_event();
    if let Some(payload) = state.location_payload.as_mut() {
        payload.city.clear();
    }
    assert_eq!(
        validate_step(&state, StepId::Where, &clock()).as_deref(),
        Some(ERR_WHERE_INCOMPLETE)
    );
}

#[test]
fn appointment_service_is_valid() {
    assert_eq!(validate_all(&service(), &clock()), None);
}

#[test]
fn weekly_schedule_needs_days_and_ordered_hours() {
    let mut state = service();
    state.service_schedule = ServiceSchedule::Weekly {
        days: vec![],
        start: "09:00".to_owned(),
        end: "17:00".to_owned(),
    };
    assert_eq!(
        validate_all(&state, &clock()).as_deref(),
        Some(ERR_WEEKLY_DAYS)
    );

    state.service_schedule = ServiceSchedule::Weekly {
        days: vec![Weekday::Mon, Weekday::Wed],
        start: "17:00".to_owned(),
        end: "09:00".to_owned(),
    };
    assert_eq!(
        validate_step(&state, StepId::ServiceWhen, &clock()).as_deref(),
        Some(ERR_WEEKLY_HOURS)
    );

    state.service_schedule = ServiceSchedule::Weekly {
        days: vec![Weekday::Mon, Weekday::Wed],
        start: "09:00".to_owned(),
        end: "17:00".to_owned(),
    };
    assert_eq!(validate_all(&state, &clock()), None);
}

#[test]
fn slot_schedule_rejects_empty_and_past_slots() {
    let mut state = service();
    state.service_schedule = ServiceSchedule::Slots { slots: vec![] };
    assert_eq!(
        validate_step(&state, StepId::ServiceWhen, &clock()).as_deref(),
        Some(ERR_SLOTS_EMPTY)
    );

    state.service_schedule = ServiceSchedule::Slots {
        slots: vec!["2026-10-20T10:00".to_owned(), "2026-10-17T10:00".to_owned()],
    };
    assert_eq!(
        validate_step(&state, StepId::ServiceWhen, &clock()).as_deref(),
        Some(ERR_SLOTS_INVALID)
    );

    state.service_schedule = ServiceSchedule::Slots {
        slots: vec!["2026-10-20T10:00".to_owned(), "2026-10-21T10:00".to_owned()],
    };
    assert_eq!(validate_step(&state, StepId::ServiceWhen, &clock()), None);
}

#[test]
fn schedule_checks_run_before_price() {
    let mut state = service();
    state.price_text.clear();
    state.service_schedule = ServiceSchedule::Slots { slots: vec![] };
    assert_eq!(
        validate_all(&state, &clock()).as_deref(),
        Some(ERR_SLOTS_EMPTY)
    );
}

#[test]
fn kind_change_adds_requirements_after_the_fact() {
    let mut state = free_event();
    assert_eq!(validate_all(&state, &clock()), None);
    crate::reduce(&mut state, crate::Action::SetKind(ListingKind::Service));
    assert_eq!(validate_all(&state, &clock()).as_deref(), Some(ERR_PRICE));

    state.price_text = "10".to_owned();
    assert_eq!(
        validate_all(&state, &clock()).as_deref(),
        Some(ERR_SERVICE_PHOTOS)
    );

    state.service_photos.push(ServicePhoto::local("file:///x.jpg"));
    assert_eq!(validate_all(&state, &clock()), None);
}

#[test]
fn review_is_always_valid() {
    assert_eq!(validate_step(&WizardState::new(), StepId::Review, &clock()), None);
}
