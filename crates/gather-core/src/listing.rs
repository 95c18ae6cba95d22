use serde::{Deserialize, Serialize};

use crate::location::LocationPayload;
use crate::schedule::ServiceSchedule;

/// Upper bound on photos attached to a single service listing.
pub const MAX_SERVICE_PHOTOS: usize = 6;

/// The discriminant that decides which fields a listing needs and which
/// wizard steps exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingKind {
    EventFree,
    EventPaid,
    Service,
}

impl ListingKind {
    /// Paid events and services carry a price.
    #[must_use]
    pub fn requires_price(self) -> bool {
        matches!(self, ListingKind::EventPaid | ListingKind::Service)
    }

    /// Only free events may set a capacity.
    #[must_use]
    pub fn allows_capacity(self) -> bool {
        matches!(self, ListingKind::EventFree)
    }

    #[must_use]
    pub fn requires_photos(self) -> bool {
        matches!(self, ListingKind::Service)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ListingKind::EventFree => "event_free",
            ListingKind::EventPaid => "event_paid",
            ListingKind::Service => "service",
        }
    }
}

impl std::fmt::Display for ListingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ListingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "event_free" => Ok(ListingKind::EventFree),
            "event_paid" => Ok(ListingKind::EventPaid),
            "service" => Ok(ListingKind::Service),
            other => Err(format!(
                "unknown listing kind '{other}'; expected event_free, event_paid, or service"
            )),
        }
    }
}

/// A WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `true` when both components are finite and inside WGS84 bounds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// A photo attached to a service listing.
///
/// `uri` is the local handle; `url` and `key` are filled in once the upload
/// provider has stored the file. A photo without `url` is still pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePhoto {
    /// Empty for photos read back from the backend.
    #[serde(default)]
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl ServicePhoto {
    #[must_use]
    pub fn local(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            url: None,
            key: None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.url.is_none()
    }

    /// Identity used for de-duplication: the remote key once known, else the local uri.
    #[must_use]
    pub fn dedup_key(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.uri)
    }
}

/// A listing as persisted by the events backend.
///
/// Returned from create/update calls and used to seed the wizard for edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub emoji: Option<String>,
    pub kind: ListingKind,
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub capacity: Option<u32>,
    /// Local start date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    /// Local start time, `HH:mm`.
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub location: Option<LocationPayload>,
    pub creator_clerk_id: String,
    #[serde(default)]
    pub service_photos: Vec<ServicePhoto>,
    #[serde(default)]
    pub service_schedule: Option<ServiceSchedule>,
}

impl ListingRecord {
    /// Only the creator may edit or delete a listing.
    #[must_use]
    pub fn is_owned_by(&self, actor_id: &str) -> bool {
        !actor_id.is_empty() && self.creator_clerk_id == actor_id
    }
}
