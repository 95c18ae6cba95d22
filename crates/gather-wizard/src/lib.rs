//! The listing creation wizard: step graph, state reducer, validation, and
//! submission payload assembly.

pub mod assemble;
pub mod clock;
#[cfg(test)]
mod fixtures;
pub mod money;
pub mod reducer;
pub mod session;
pub mod state;
pub mod steps;
pub mod validate;

pub use assemble::{assemble, AssembleError, ListingPayload, LocationBody, UploadedPhoto};
pub use chrono_tz::Tz;
pub use clock::LocalClock;
pub use money::{cents_to_price_text, parse_capacity, parse_price_cents};
pub use reducer::{reduce, Action, Field};
pub use session::WizardSession;
pub use state::WizardState;
pub use steps::{steps, StepId};
pub use validate::{validate_all, validate_step};
