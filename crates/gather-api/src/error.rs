use gather_wizard::AssembleError;
use thiserror::Error;

/// Shown when the backend gives no usable message.
pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// Shown when someone other than the creator tries to change a listing.
pub const NOT_CREATOR_MESSAGE: &str = "Only the creator can change this listing.";

/// Errors returned by the events client, the submission flow, and photo uploads.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A 2xx body could not be deserialized into the `{ event }` envelope.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Non-2xx answer; `message` is the server's text, or the fallback.
    #[error("events API returned {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The acting user is not the listing's creator; nothing was sent.
    #[error("actor {actor_id} did not create listing {listing_id}")]
    NotCreator {
        listing_id: String,
        actor_id: String,
    },

    /// The wizard state could not be turned into a submission payload.
    #[error(transparent)]
    Assemble(#[from] AssembleError),

    /// A pending service photo could not be uploaded.
    #[error("photo upload failed for {uri}: {message}")]
    Upload { uri: String, message: String },

    /// The configured base URL does not parse, or an endpoint cannot be joined to it.
    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl ApiError {
    /// The text to show in the wizard's error banner.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Assemble(e) => e.to_string(),
            Self::NotCreator { .. } => NOT_CREATOR_MESSAGE.to_owned(),
            Self::Upload { .. } => "Couldn't upload a photo. Please try again.".to_owned(),
            Self::Http(_) | Self::Deserialize { .. } | Self::InvalidBaseUrl { .. } => {
                FALLBACK_MESSAGE.to_owned()
            }
        }
    }
}

/// Pulls a human-readable message out of an error body.
///
/// Looks for a non-empty `message`, then `error` string field; anything else
/// (HTML error pages, empty bodies, nested objects) yields [`FALLBACK_MESSAGE`].
#[must_use]
pub fn extract_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return FALLBACK_MESSAGE.to_owned();
    };
    ["message", "error"]
        .iter()
        .find_map(|field| {
            value
                .get(field)
                .and_then(serde_json::Value::as_str)
                .map(str::trim)
                .filter(|m| !m.is_empty())
        })
        .map_or_else(|| FALLBACK_MESSAGE.to_owned(), str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_prefers_message_over_error() {
        let body = r#"{"message":"Title is too long","error":"Bad Request"}"#;
        assert_eq!(extract_message(body), "Title is too long");
    }

    #[test]
    fn extract_falls_back_to_error_field() {
        assert_eq!(
            extract_message(r#"{"error":"Event not found"}"#),
            "Event not found"
        );
    }

    #[test]
    fn extract_uses_fallback_for_unhelpful_bodies() {
        for body in ["", "<html>502</html>", r#"{"message":"  "}"#, r#"{"error":{"code":1}}"#] {
            assert_eq!(extract_message(body), FALLBACK_MESSAGE, "body {body:?}");
        }
    }

    #[test]
    fn rejected_user_message_is_verbatim() {
        let err = ApiError::Rejected {
            status: 422,
            message: "Date must be in the future".to_owned(),
        };
        assert_eq!(err.user_message(), "Date must be in the future");
    }

    #[test]
    fn assemble_errors_surface_their_text() {
        let err = ApiError::from(AssembleError::Invalid("Choose a location.".to_owned()));
        assert_eq!(err.user_message(), "Choose a location.");
        assert_eq!(err.to_string(), "Choose a location.");
    }
}
