//! HTTP client for the events backend.
//!
//! Create, update, and delete calls all answer with JSON. Success bodies wrap
//! the persisted listing as `{ "event": { ... } }`; failure bodies carry a
//! `message` or `error` string that is passed to the user unchanged.

use std::time::Duration;

use gather_core::ListingRecord;
use gather_wizard::ListingPayload;
use reqwest::{Client, Method, Url};
use serde::{Deserialize, Serialize};

use crate::error::{extract_message, ApiError};

#[derive(Deserialize)]
struct EventEnvelope {
    event: ListingRecord,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRequest<'a> {
    #[serde(rename = "_id")]
    id: &'a str,
    creator_clerk_id: &'a str,
}

/// Client for `{base}/api/events/*`.
pub struct EventsClient {
    client: Client,
    base_url: Url,
}

impl EventsClient {
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the `reqwest::Client` cannot be built, or
    /// [`ApiError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, name: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(&format!("api/events/{name}"))
            .map_err(|e| ApiError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] with the server's message on a non-2xx
    /// answer, or a transport/decoding error.
    pub async fn create_event(&self, payload: &ListingPayload) -> Result<ListingRecord, ApiError> {
        let url = self.endpoint("create-event")?;
        let record = self
            .send_for_event(Method::POST, url, payload, "create-event")
            .await?;
        tracing::info!(id = %record.id, kind = %record.kind, "listing created");
        Ok(record)
    }

    /// Updates listing `id`; the body is `payload` with `_id` set.
    ///
    /// # Errors
    ///
    /// Same as [`EventsClient::create_event`].
    pub async fn update_event(
        &self,
        id: &str,
        payload: &ListingPayload,
    ) -> Result<ListingRecord, ApiError> {
        let url = self.endpoint("update-event")?;
        let mut body = payload.clone();
        body.id = Some(id.to_owned());
        let record = self
            .send_for_event(Method::PATCH, url, &body, "update-event")
            .await?;
        tracing::info!(id = %record.id, kind = %record.kind, "listing updated");
        Ok(record)
    }

    /// Deletes `record`, refusing locally when `actor_id` is not its creator.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotCreator`] without sending anything, or
    /// [`ApiError::Rejected`] when the backend refuses.
    pub async fn delete_event(&self, record: &ListingRecord, actor_id: &str) -> Result<(), ApiError> {
        ensure_creator(record, actor_id)?;
        self.delete_event_by_id(&record.id, actor_id).await
    }

    /// Deletes listing `id` when only its id is known; ownership is then
    /// checked by the backend alone.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the backend refuses.
    pub async fn delete_event_by_id(&self, id: &str, actor_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint("delete-event")?;
        let body = DeleteRequest {
            id,
            creator_clerk_id: actor_id,
        };
        self.send(Method::POST, url, &body, "delete-event").await?;
        tracing::info!(id, "listing deleted");
        Ok(())
    }

    async fn send_for_event<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: &B,
        context: &str,
    ) -> Result<ListingRecord, ApiError> {
        let text = self.send(method, url, body, context).await?;
        let envelope: EventEnvelope =
            serde_json::from_str(&text).map_err(|e| ApiError::Deserialize {
                context: context.to_owned(),
                source: e,
            })?;
        Ok(envelope.event)
    }

    /// Sends a JSON body and returns the response text of a 2xx answer.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: &B,
        context: &str,
    ) -> Result<String, ApiError> {
        tracing::debug!(context, %method, "events API request");
        let response = self.client.request(method, url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let message = extract_message(&text);
            tracing::warn!(context, status = status.as_u16(), message = %message, "events API rejected request");
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        Ok(text)
    }
}

/// Refuses edits and deletes by anyone other than the listing's creator.
///
/// # Errors
///
/// Returns [`ApiError::NotCreator`] when `actor_id` does not own `record`.
pub fn ensure_creator(record: &ListingRecord, actor_id: &str) -> Result<(), ApiError> {
    if record.is_owned_by(actor_id) {
        Ok(())
    } else {
        Err(ApiError::NotCreator {
            listing_id: record.id.clone(),
            actor_id: actor_id.to_owned(),
        })
    }
}
