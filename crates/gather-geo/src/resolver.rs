//! The location resolver.
//!
//! Owns the authoritative `coord` and `location_payload` for one wizard
//! session and reconciles three inputs into them: debounced text search,
//! suggestion picks, and map pin drops.
//!
//! Every operation takes a ticket from a monotonically increasing counter
//! before it suspends. When its response comes back it only writes state if
//! its ticket is still the latest one for that lane, so a slow early response
//! can never overwrite a fresher one. Search has its own lane; picks and pin
//! drops share the location lane because both write the same fields.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use gather_core::{LatLng, LocationPayload, LocationSource};

use crate::gateway::{PlaceSuggestion, PlacesGateway, ReverseGeocodeGateway};
use crate::normalize::{normalize_address, AddressInput};

pub const DROPPED_PIN_LABEL: &str = "Dropped pin";
pub const NO_ADDRESS_LABEL: &str = "(no address found)";

pub const ERR_SEARCH_FAILED: &str = "Couldn't search places. Check your connection and try again.";
pub const ERR_DETAILS_FAILED: &str =
    "Couldn't load that place. Check your connection and try again.";
pub const ERR_NO_COORDINATES: &str =
    "Couldn't get coordinates for that place. Try another search.";
pub const ERR_NO_CITY_COUNTRY: &str =
    "Couldn't determine the city and country for that location. Try a more specific address or move the pin.";
pub const ERR_REVERSE_FAILED: &str =
    "Couldn't look up an address for that spot. Check your connection and try again.";
pub const ERR_INVALID_POINT: &str = "That spot isn't a valid map location.";

/// Observable resolver state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolverState {
    /// Raw text from the search box.
    pub query: String,
    /// Human-readable address of the resolved (or pending) location.
    pub selected_address: String,
    pub coord: Option<LatLng>,
    pub location_payload: Option<LocationPayload>,
    pub suggestions: Vec<PlaceSuggestion>,
    /// Number of lookups currently awaiting a response.
    pub in_flight: usize,
    /// Last resolution error, cleared by the next successful input.
    pub err: Option<String>,
}

impl ResolverState {
    #[must_use]
    pub fn loc_loading(&self) -> bool {
        self.in_flight > 0
    }
}

/// The location fields the wizard mirrors after a pick or pin drop.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationUpdate {
    pub selected_address: String,
    pub coord: Option<LatLng>,
    pub location_payload: Option<LocationPayload>,
}

/// Result of a debounced search call.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Suggestions(Vec<PlaceSuggestion>),
    /// Query was blank or equal to the already selected address.
    Suppressed,
    /// A later keystroke replaced this one, during the debounce or the lookup.
    Superseded,
    Failed(String),
}

pub struct LocationResolver {
    places: Arc<dyn PlacesGateway>,
    geocoder: Arc<dyn ReverseGeocodeGateway>,
    debounce: Duration,
    search_ticket: AtomicU64,
    location_ticket: AtomicU64,
    state: Mutex<ResolverState>,
}

/// Decrements the in-flight counter when the lookup finishes or is dropped.
struct InFlight<'a> {
    resolver: &'a LocationResolver,
}

impl<'a> InFlight<'a> {
    fn start(resolver: &'a LocationResolver) -> Self {
        resolver.state().in_flight += 1;
        Self { resolver }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = self.resolver.state();
        state.in_flight = state.in_flight.saturating_sub(1);
    }
}

impl LocationResolver {
    pub fn new(
        places: Arc<dyn PlacesGateway>,
        geocoder: Arc<dyn ReverseGeocodeGateway>,
        debounce: Duration,
    ) -> Self {
        Self {
            places,
            geocoder,
            debounce,
            search_ticket: AtomicU64::new(0),
            location_ticket: AtomicU64::new(0),
            state: Mutex::new(ResolverState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, ResolverState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ResolverState {
        self.state().clone()
    }

    /// Starts from a previously resolved location (edit flows).
    pub fn seed(
        &self,
        selected_address: &str,
        coord: Option<LatLng>,
        location_payload: Option<LocationPayload>,
    ) {
        self.location_ticket.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state();
        state.query = selected_address.to_owned();
        state.selected_address = selected_address.to_owned();
        state.coord = coord;
        state.location_payload = location_payload;
        state.suggestions.clear();
        state.err = None;
    }

    /// Drops all state and invalidates every outstanding lookup.
    pub fn reset(&self) {
        self.search_ticket.fetch_add(1, Ordering::SeqCst);
        self.location_ticket.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state();
        let in_flight = state.in_flight;
        *state = ResolverState {
            in_flight,
            ..ResolverState::default()
        };
    }

    fn is_current(ticket: &AtomicU64, mine: u64) -> bool {
        ticket.load(Ordering::SeqCst) == mine
    }

    /// Handles a change of the search box text.
    ///
    /// Waits out the debounce window, then asks the places gateway for
    /// suggestions unless the trimmed text is empty or equals the address
    /// already selected.
    pub async fn search(&self, text: &str) -> SearchOutcome {
        let mine = self.search_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        self.state().query = text.to_owned();

        tokio::time::sleep(self.debounce).await;
        if !Self::is_current(&self.search_ticket, mine) {
            return SearchOutcome::Superseded;
        }

        let query = text.trim();
        {
            let mut state = self.state();
            if query.is_empty() {
                state.suggestions.clear();
                return SearchOutcome::Suppressed;
            }
            if query == state.selected_address {
                tracing::debug!(query, "search matches selected address, suppressed");
                return SearchOutcome::Suppressed;
            }
        }

        let result = {
            let _guard = InFlight::start(self);
            self.places.autocomplete(query).await
        };

        if !Self::is_current(&self.search_ticket, mine) {
            tracing::debug!(query, "discarding stale autocomplete response");
            return SearchOutcome::Superseded;
        }

        let mut state = self.state();
        match result {
            Ok(suggestions) => {
                state.suggestions.clone_from(&suggestions);
                state.err = None;
                SearchOutcome::Suggestions(suggestions)
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "autocomplete failed");
                state.err = Some(ERR_SEARCH_FAILED.to_owned());
                SearchOutcome::Failed(ERR_SEARCH_FAILED.to_owned())
            }
        }
    }

    /// Resolves a picked suggestion into coordinates and a location payload.
    ///
    /// Returns `None` when a later pick or pin drop superseded this one.
    pub async fn select_suggestion(&self, suggestion: &PlaceSuggestion) -> Option<LocationUpdate> {
        let mine = self.location_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        // Closing the suggestion list also invalidates any pending search.
        self.search_ticket.fetch_add(1, Ordering::SeqCst);

        let label = suggestion.label();
        {
            let mut state = self.state();
            state.query.clone_from(&label);
            state.selected_address.clone_from(&label);
            state.suggestions.clear();
        }

        let result = {
            let _guard = InFlight::start(self);
            self.places.place_details(&suggestion.id).await
        };

        if !Self::is_current(&self.location_ticket, mine) {
            tracing::debug!(place_id = %suggestion.id, "discarding stale place details");
            return None;
        }

        let mut state = self.state();
        let details = match result {
            Ok(details) => details,
            Err(e) => {
                tracing::warn!(place_id = %suggestion.id, error = %e, "place details failed");
                state.err = Some(ERR_DETAILS_FAILED.to_owned());
                state.coord = None;
                state.location_payload = None;
                return Some(Self::update_from(&state));
            }
        };

        let Some(point) = details.location else {
            state.err = Some(ERR_NO_COORDINATES.to_owned());
            state.coord = None;
            state.location_payload = None;
            return Some(Self::update_from(&state));
        };

        let address = details
            .formatted_address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map_or(label, str::to_owned);

        let payload = normalize_address(&AddressInput {
            lat: point.lat,
            lng: point.lng,
            formatted_address: &address,
            place_id: Some(&details.place_id),
            components: &details.components,
            source: LocationSource::PlacesAutocomplete,
        });

        state.query.clone_from(&address);
        state.selected_address = address;
        state.coord = Some(point);
        Self::store_payload(&mut state, payload);
        Some(Self::update_from(&state))
    }

    /// Handles a pin drop or drag end.
    ///
    /// The coordinate and a placeholder label are written immediately; the
    /// address follows once the reverse geocoder answers. Returns `None` when
    /// superseded by a later pick or pin drop.
    pub async fn drop_pin(&self, point: LatLng) -> Option<LocationUpdate> {
        if !point.is_valid() {
            self.state().err = Some(ERR_INVALID_POINT.to_owned());
            return None;
        }

        let mine = self.location_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        self.search_ticket.fetch_add(1, Ordering::SeqCst);
        {
            let mut state = self.state();
            state.coord = Some(point);
            state.selected_address = DROPPED_PIN_LABEL.to_owned();
            state.query = DROPPED_PIN_LABEL.to_owned();
            state.location_payload = None;
            state.suggestions.clear();
            state.err = None;
        }

        let result = {
            let _guard = InFlight::start(self);
            self.geocoder.reverse_geocode(point).await
        };

        if !Self::is_current(&self.location_ticket, mine) {
            tracing::debug!(lat = point.lat, lng = point.lng, "discarding stale reverse geocode");
            return None;
        }

        let mut state = self.state();
        let found = match result {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(lat = point.lat, lng = point.lng, error = %e, "reverse geocode failed");
                state.err = Some(ERR_REVERSE_FAILED.to_owned());
                return Some(Self::update_from(&state));
            }
        };

        let usable = found.filter(|r| {
            r.formatted_address
                .as_deref()
                .is_some_and(|a| !a.trim().is_empty())
                && !r.components.is_empty()
        });

        let Some(result) = usable else {
            state.selected_address = NO_ADDRESS_LABEL.to_owned();
            state.query = NO_ADDRESS_LABEL.to_owned();
            state.location_payload = None;
            return Some(Self::update_from(&state));
        };

        let address = result
            .formatted_address
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_owned();

        let payload = normalize_address(&AddressInput {
            lat: point.lat,
            lng: point.lng,
            formatted_address: &address,
            place_id: result.place_id.as_deref(),
            components: &result.components,
            source: LocationSource::ReverseGeocode,
        });

        state.query.clone_from(&address);
        state.selected_address = address;
        Self::store_payload(&mut state, payload);
        Some(Self::update_from(&state))
    }

    fn store_payload(state: &mut ResolverState, payload: Option<LocationPayload>) {
        if let Some(payload) = &payload {
            tracing::info!(
                city = %payload.city,
                country = %payload.country_code,
                source = ?payload.source,
                "location resolved"
            );
            state.err = None;
        } else {
            tracing::warn!(address = %state.selected_address, "address has no usable city/country");
            state.err = Some(ERR_NO_CITY_COUNTRY.to_owned());
        }
        state.location_payload = payload;
    }

    fn update_from(state: &ResolverState) -> LocationUpdate {
        LocationUpdate {
            selected_address: state.selected_address.clone(),
            coord: state.coord,
            location_payload: state.location_payload.clone(),
        }
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
