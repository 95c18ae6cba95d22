//! Service photo upload seam.

use async_trait::async_trait;
use futures::future::join_all;
use gather_wizard::{Action, WizardSession};

use crate::error::ApiError;

/// Where an uploaded photo ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPhoto {
    pub url: String,
    pub key: String,
}

/// Stores a local photo with the upload provider.
#[async_trait]
pub trait PhotoUploader: Send + Sync {
    async fn upload(&self, uri: &str) -> Result<StoredPhoto, ApiError>;
}

/// Uploads every pending service photo concurrently.
///
/// Successful uploads are written back with `UpdateServicePhoto`; a photo
/// removed while its upload was running is skipped by the reducer. Failed
/// photos stay pending and the first failure's message is put in `err`.
///
/// # Errors
///
/// Returns the first upload failure, after all successes were applied.
pub async fn upload_pending_photos(
    session: &mut WizardSession,
    uploader: &dyn PhotoUploader,
) -> Result<usize, ApiError> {
    let pending: Vec<String> = session
        .state()
        .service_photos
        .iter()
        .filter(|p| p.is_pending())
        .map(|p| p.uri.clone())
        .collect();
    if pending.is_empty() {
        return Ok(0);
    }

    let results = join_all(pending.iter().map(|uri| uploader.upload(uri))).await;

    let mut uploaded = 0;
    let mut first_err = None;
    for (uri, result) in pending.into_iter().zip(results) {
        match result {
            Ok(stored) => {
                session.dispatch(Action::UpdateServicePhoto {
                    uri,
                    url: Some(stored.url),
                    key: Some(stored.key),
                });
                uploaded += 1;
            }
            Err(e) => {
                tracing::warn!(uri = %uri, error = %e, "service photo upload failed");
                first_err.get_or_insert(e);
            }
        }
    }

    match first_err {
        Some(e) => {
            session.dispatch(Action::SetErr(Some(e.user_message())));
            Err(e)
        }
        None => {
            tracing::debug!(uploaded, "service photos uploaded");
            Ok(uploaded)
        }
    }
}
