//! Events backend client, submission flow, and the photo upload seam.

pub mod client;
pub mod error;
pub mod submit;
pub mod upload;

pub use client::{ensure_creator, EventsClient};
pub use error::{extract_message, ApiError, FALLBACK_MESSAGE};
pub use submit::submit;
pub use upload::{upload_pending_photos, PhotoUploader, StoredPhoto};
