use gather_core::ListingRecord;
use gather_geo::LocationUpdate;

use crate::clock::LocalClock;
use crate::reducer::{reduce, Action, Field};
use crate::state::WizardState;
use crate::steps::{relocate, steps, StepId};
use crate::validate::validate_step;

/// One wizard run: the field state plus the cursor into the step graph.
///
/// All writes go through [`WizardSession::dispatch`], which re-locates the
/// cursor whenever the graph can have changed, so the index is always in
/// range.
#[derive(Debug, Clone, Default)]
pub struct WizardSession {
    state: WizardState,
    step_index: usize,
}

impl WizardSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an edit flow for an existing listing.
    #[must_use]
    pub fn from_record(record: &ListingRecord) -> Self {
        Self {
            state: WizardState::from_record(record),
            step_index: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    #[must_use]
    pub fn steps(&self) -> &'static [StepId] {
        steps(self.state.kind)
    }

    #[must_use]
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    #[must_use]
    pub fn current_step(&self) -> StepId {
        self.steps()
            .get(self.step_index)
            .copied()
            .unwrap_or(StepId::Kind)
    }

    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.step_index + 1 >= self.steps().len()
    }

    pub fn dispatch(&mut self, action: Action) {
        let current = self.current_step();
        let regraph = matches!(action, Action::SetKind(_) | Action::Seed(_));
        let reset = matches!(action, Action::Reset);

        reduce(&mut self.state, action);

        if reset {
            self.step_index = 0;
        } else if regraph {
            self.step_index = relocate(current, self.step_index, self.steps());
        }
    }

    /// Validates the current step and advances past it.
    ///
    /// On failure the message is stored in the state's `err` and returned;
    /// the cursor does not move. On the last step the cursor stays put.
    ///
    /// # Errors
    ///
    /// Returns the validation message of the current step.
    pub fn next(&mut self, clock: &LocalClock) -> Result<StepId, String> {
        if let Some(message) = validate_step(&self.state, self.current_step(), clock) {
            self.dispatch(Action::SetErr(Some(message.clone())));
            return Err(message);
        }
        self.dispatch(Action::SetErr(None));
        if !self.is_last_step() {
            self.step_index += 1;
        }
        Ok(self.current_step())
    }

    pub fn back(&mut self) -> StepId {
        self.step_index = self.step_index.saturating_sub(1);
        self.current_step()
    }

    /// Writes a resolver outcome into the wizard as plain field sets.
    pub fn apply_location(&mut self, update: &LocationUpdate) {
        self.dispatch(Action::Set(Field::SelectedAddress(
            update.selected_address.clone(),
        )));
        self.dispatch(Action::Set(Field::Query(update.selected_address.clone())));
        self.dispatch(Action::Set(Field::Coord(update.coord)));
        self.dispatch(Action::Set(Field::LocationPayload(
            update.location_payload.clone(),
        )));
    }
}
