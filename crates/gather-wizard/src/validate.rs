//! Per-step and whole-listing validation.
//!
//! Each rule only looks at the fields of its own step. [`validate_all`] runs
//! the rules in a fixed order and returns the first failure; it is the gate in
//! front of submission and has to be re-run even when every step was already
//! passed, because a kind change can add requirements after the fact.

use chrono::NaiveTime;
use gather_core::{ListingKind, ServiceSchedule};

use crate::clock::{LocalClock, TIME_FORMAT};
use crate::money::{parse_capacity, parse_price_cents};
use crate::state::WizardState;
use crate::steps::StepId;

pub const ERR_KIND: &str = "Choose what you're creating.";
pub const ERR_BASICS: &str = "Add a title and description.";
pub const ERR_WHEN_MISSING: &str = "Pick a date and time.";
pub const ERR_WHEN_INVALID: &str = "Enter a valid date and time.";
pub const ERR_WHEN_PAST: &str = "The start time must be in the future.";
pub const ERR_WHERE_MISSING: &str = "Choose a location.";
pub const ERR_WHERE_INCOMPLETE: &str =
    "Pick a location with a city and country. Try another search or move the pin.";
pub const ERR_PRICE: &str = "Enter a price greater than $0.";
pub const ERR_CAPACITY: &str = "Capacity must be a whole number greater than 0.";
pub const ERR_SERVICE_PHOTOS: &str = "Upload at least 1 service photo.";
pub const ERR_WEEKLY_DAYS: &str = "Pick at least one day of the week.";
pub const ERR_WEEKLY_HOURS: &str = "Enter valid start and end times, with the end after the start.";
pub const ERR_SLOTS_EMPTY: &str = "Add at least one time slot.";
pub const ERR_SLOTS_INVALID: &str = "Every time slot must be a valid date and time in the future.";

/// The error message for `step`, or `None` when the step is complete.
#[must_use]
pub fn validate_step(state: &WizardState, step: StepId, clock: &LocalClock) -> Option<String> {
    let err = match step {
        StepId::Kind => state.kind.is_none().then_some(ERR_KIND),
        StepId::Basics => (state.title.trim().is_empty() || state.description.trim().is_empty())
            .then_some(ERR_BASICS),
        StepId::When => check_when(state, clock),
        StepId::ServiceWhen => check_when(state, clock).or_else(|| check_schedule(state, clock)),
        StepId::Where => check_where(state),
        StepId::Price => parse_price_cents(&state.price_text)
            .is_none()
            .then_some(ERR_PRICE),
        StepId::Capacity => {
            let text = state.capacity_text.trim();
            (!text.is_empty() && parse_capacity(text).is_none()).then_some(ERR_CAPACITY)
        }
        StepId::ServicePhotos => state.service_photos.is_empty().then_some(ERR_SERVICE_PHOTOS),
        StepId::Review => None,
    };
    err.map(str::to_owned)
}

/// Validates the whole listing, returning the first error in a fixed order:
/// kind, basics, when, where, service schedule, price, service photos.
#[must_use]
pub fn validate_all(state: &WizardState, clock: &LocalClock) -> Option<String> {
    let mut order = vec![StepId::Kind, StepId::Basics, StepId::When, StepId::Where];
    if let Some(kind) = state.kind {
        if kind == ListingKind::Service {
            order.push(StepId::ServiceWhen);
        }
        if kind.requires_price() {
            order.push(StepId::Price);
        }
        if kind.requires_photos() {
            order.push(StepId::ServicePhotos);
        }
    }
    order
        .into_iter()
        .find_map(|step| validate_step(state, step, clock))
}

fn check_when(state: &WizardState, clock: &LocalClock) -> Option<&'static str> {
    if state.date_iso.trim().is_empty() || state.time24.trim().is_empty() {
        return Some(ERR_WHEN_MISSING);
    }
    let Some(start) = clock.compose(&state.date_iso, &state.time24) else {
        return Some(ERR_WHEN_INVALID);
    };
    (!clock.is_future(start)).then_some(ERR_WHEN_PAST)
}

fn check_where(state: &WizardState) -> Option<&'static str> {
    if state.coord.is_none() || state.selected_address.trim().is_empty() {
        return Some(ERR_WHERE_MISSING);
    }
    match &state.location_payload {
        Some(payload) if payload.is_usable() => None,
        _ => Some(ERR_WHERE_INCOMPLETE),
    }
}

fn check_schedule(state: &WizardState, clock: &LocalClock) -> Option<&'static str> {
    match &state.service_schedule {
        ServiceSchedule::Appointment => None,
        ServiceSchedule::Weekly { days, start, end } => {
            if days.is_empty() {
                return Some(ERR_WEEKLY_DAYS);
            }
            let start = NaiveTime::parse_from_str(start.trim(), TIME_FORMAT).ok();
            let end = NaiveTime::parse_from_str(end.trim(), TIME_FORMAT).ok();
            match (start, end) {
                (Some(s), Some(e)) if s < e => None,
                _ => Some(ERR_WEEKLY_HOURS),
            }
        }
        ServiceSchedule::Slots { slots } => {
            if slots.is_empty() {
                return Some(ERR_SLOTS_EMPTY);
            }
            let all_future = slots
                .iter()
                .all(|slot| clock.parse_slot(slot).is_some_and(|at| clock.is_future(at)));
            (!all_future).then_some(ERR_SLOTS_INVALID)
        }
    }
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
