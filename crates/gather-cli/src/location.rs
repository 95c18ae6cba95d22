//! `search`, `place`, and `pin` command handlers.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use gather_core::{AppConfig, LatLng};
use gather_geo::{GoogleMapsClient, LocationResolver, LocationUpdate, PlaceSuggestion, SearchOutcome};

/// Builds a resolver backed by the Google Maps web services.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub(crate) fn build_resolver(config: &AppConfig) -> anyhow::Result<LocationResolver> {
    let client = GoogleMapsClient::with_base_url(
        &config.maps_api_key,
        config.geo_request_timeout_secs,
        &config.user_agent,
        &config.maps_base_url,
    )
    .context("failed to build Google Maps client")?
    .with_country(config.places_country.as_deref());
    let client = Arc::new(client);

    Ok(LocationResolver::new(
        client.clone(),
        client,
        Duration::from_millis(config.search_debounce_ms),
    ))
}

pub(crate) async fn run_search(config: &AppConfig, query: &str) -> anyhow::Result<()> {
    let resolver = build_resolver(config)?;
    match resolver.search(query).await {
        SearchOutcome::Suggestions(suggestions) if suggestions.is_empty() => {
            println!("no places found for \"{}\"", query.trim());
        }
        SearchOutcome::Suggestions(suggestions) => {
            for suggestion in suggestions {
                println!("{}\t{}", suggestion.id, suggestion.label());
            }
        }
        SearchOutcome::Suppressed | SearchOutcome::Superseded => {
            println!("nothing to search");
        }
        SearchOutcome::Failed(message) => anyhow::bail!(message),
    }
    Ok(())
}

pub(crate) async fn run_place(config: &AppConfig, place_id: &str) -> anyhow::Result<()> {
    let resolver = build_resolver(config)?;
    let update = resolve_place(&resolver, place_id).await?;
    print_update(&update)
}

pub(crate) async fn run_pin(config: &AppConfig, lat: f64, lng: f64) -> anyhow::Result<()> {
    let resolver = build_resolver(config)?;
    let update = resolve_pin(&resolver, LatLng::new(lat, lng)).await?;
    print_update(&update)
}

/// Picks `place_id` as if it were a suggestion.
///
/// # Errors
///
/// Returns the resolver's message when the place has no usable location.
pub(crate) async fn resolve_place(
    resolver: &LocationResolver,
    place_id: &str,
) -> anyhow::Result<LocationUpdate> {
    let suggestion = PlaceSuggestion {
        id: place_id.to_owned(),
        main: place_id.to_owned(),
        secondary: None,
    };
    let update = resolver.select_suggestion(&suggestion).await;
    finish(resolver, update)
}

/// Drops a pin at `point`.
///
/// # Errors
///
/// Returns the resolver's message when no usable address was found.
pub(crate) async fn resolve_pin(
    resolver: &LocationResolver,
    point: LatLng,
) -> anyhow::Result<LocationUpdate> {
    let update = resolver.drop_pin(point).await;
    finish(resolver, update)
}

fn finish(
    resolver: &LocationResolver,
    update: Option<LocationUpdate>,
) -> anyhow::Result<LocationUpdate> {
    let snapshot = resolver.snapshot();
    if let Some(err) = snapshot.err {
        anyhow::bail!(err);
    }
    let update = update.context("location lookup was superseded")?;
    if update.location_payload.is_none() {
        anyhow::bail!(
            "no city and country found for \"{}\"",
            update.selected_address
        );
    }
    Ok(update)
}

fn print_update(update: &LocationUpdate) -> anyhow::Result<()> {
    let out = serde_json::json!({
        "selectedAddress": update.selected_address,
        "coord": update.coord.map(|c| [c.lat, c.lng]),
        "locationPayload": update.location_payload,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
