use gather_core::ListingRecord;
use gather_wizard::{assemble, validate_all, Action, Field, LocalClock, WizardSession};

use crate::client::EventsClient;
use crate::error::ApiError;

/// Publishes the session's listing.
///
/// Creates a new listing, or updates the one being edited. On success the
/// session is reset and the persisted record returned; on any failure the
/// session keeps its fields, `submitting` goes back to `false`, and the
/// error's user message is put in `err`.
///
/// # Errors
///
/// Returns the validation, assembly, ownership, or backend error that stopped
/// the submission.
pub async fn submit(
    session: &mut WizardSession,
    client: &EventsClient,
    actor_id: &str,
    clock: &LocalClock,
) -> Result<ListingRecord, ApiError> {
    session.dispatch(Action::Set(Field::Submitting(true)));

    match publish(session, client, actor_id, clock).await {
        Ok(record) => {
            session.dispatch(Action::Reset);
            Ok(record)
        }
        Err(e) => {
            tracing::warn!(error = %e, "listing submission failed");
            session.dispatch(Action::Set(Field::Submitting(false)));
            session.dispatch(Action::SetErr(Some(e.user_message())));
            Err(e)
        }
    }
}

async fn publish(
    session: &WizardSession,
    client: &EventsClient,
    actor_id: &str,
    clock: &LocalClock,
) -> Result<ListingRecord, ApiError> {
    let state = session.state();
    if let Some(message) = validate_all(state, clock) {
        return Err(gather_wizard::AssembleError::Invalid(message).into());
    }
    if let (Some(id), Some(owner)) = (&state.editing_id, &state.owner_id) {
        if owner != actor_id {
            return Err(ApiError::NotCreator {
                listing_id: id.clone(),
                actor_id: actor_id.to_owned(),
            });
        }
    }

    let payload = assemble(state, clock, actor_id)?;
    match &state.editing_id {
        Some(id) => client.update_event(id, &payload).await,
        None => client.create_event(&payload).await,
    }
}
