//! YAML listing drafts and the step walk that feeds them through a wizard
//! session.

use anyhow::Context;
use gather_core::{LatLng, ListingKind, ServicePhoto, ServiceSchedule};
use gather_geo::{LocationResolver, LocationUpdate};
use gather_wizard::{Action, Field, LocalClock, StepId, WizardSession};
use serde::Deserialize;

use crate::location::{resolve_pin, resolve_place};

/// A listing described in a file.
///
/// ```yaml
/// kind: event_paid
/// title: Sunrise 5k
/// description: Easy loop around the lake
/// date: 2026-11-01
/// time: "07:30"
/// location:
///   place_id: ChIJLwPMoJm1RIYRetVp1EtGm10
/// price: 20
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Draft {
    pub kind: ListingKind,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub emoji: Option<String>,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub schedule: Option<ServiceSchedule>,
    pub location: DraftLocation,
    #[serde(default)]
    pub price: Option<Scalar>,
    #[serde(default)]
    pub capacity: Option<Scalar>,
    /// Already-uploaded photos.
    #[serde(default)]
    pub photos: Vec<DraftPhoto>,
}

/// Exactly one of a place id or a pin.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct DraftLocation {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub pin: Option<LatLng>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct DraftPhoto {
    pub url: String,
    #[serde(default)]
    pub key: Option<String>,
}

/// YAML reads `20` as a number and `"20.00"` as text; both are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    fn to_text(&self) -> String {
        match self {
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Text(s) => s.clone(),
        }
    }
}

impl Draft {
    /// # Errors
    ///
    /// Returns an error when the YAML does not describe a draft.
    pub(crate) fn from_yaml(text: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(text).context("invalid listing draft")
    }

    fn photos(&self) -> Vec<ServicePhoto> {
        self.photos
            .iter()
            .map(|p| ServicePhoto {
                uri: p.url.clone(),
                url: Some(p.url.clone()),
                key: p.key.clone(),
            })
            .collect()
    }
}

/// Fills `session` step by step, validating each step before moving on, and
/// stops on the review step.
///
/// # Errors
///
/// Returns the first step validation message, or the resolver's message when
/// the location cannot be resolved.
pub(crate) async fn fill_session(
    draft: &Draft,
    session: &mut WizardSession,
    resolver: &LocationResolver,
    clock: &LocalClock,
) -> anyhow::Result<()> {
    loop {
        let step = session.current_step();
        match step {
            StepId::Kind => session.dispatch(Action::SetKind(draft.kind)),
            StepId::Basics => {
                session.dispatch(Action::Set(Field::Title(draft.title.clone())));
                session.dispatch(Action::Set(Field::Description(draft.description.clone())));
                session.dispatch(Action::Set(Field::Emoji(
                    draft.emoji.clone().unwrap_or_default(),
                )));
            }
            StepId::When | StepId::ServiceWhen => {
                session.dispatch(Action::Set(Field::DateIso(draft.date.clone())));
                session.dispatch(Action::Set(Field::Time24(draft.time.clone())));
                if step == StepId::ServiceWhen {
                    session.dispatch(Action::Set(Field::ServiceSchedule(
                        draft.schedule.clone().unwrap_or_default(),
                    )));
                }
            }
            StepId::Where => {
                let update = resolve(&draft.location, resolver).await?;
                session.apply_location(&update);
            }
            StepId::Price => session.dispatch(Action::Set(Field::PriceText(
                draft.price.as_ref().map(Scalar::to_text).unwrap_or_default(),
            ))),
            StepId::Capacity => session.dispatch(Action::Set(Field::CapacityText(
                draft
                    .capacity
                    .as_ref()
                    .map(Scalar::to_text)
                    .unwrap_or_default(),
            ))),
            StepId::ServicePhotos => session.dispatch(Action::AddServicePhotos(draft.photos())),
            StepId::Review => return Ok(()),
        }

        session
            .next(clock)
            .map_err(|message| anyhow::anyhow!("{step} step: {message}"))?;
        tracing::debug!(step = %step, "draft step accepted");
    }
}

async fn resolve(
    location: &DraftLocation,
    resolver: &LocationResolver,
) -> anyhow::Result<LocationUpdate> {
    match (&location.place_id, location.pin) {
        (Some(id), None) => resolve_place(resolver, id).await,
        (None, Some(point)) => resolve_pin(resolver, point).await,
        _ => anyhow::bail!("draft location needs exactly one of place_id or pin"),
    }
}
