//! The step graph: which screens a listing of a given kind walks through.

use gather_core::ListingKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepId {
    Kind,
    Basics,
    When,
    ServiceWhen,
    Where,
    Capacity,
    Price,
    ServicePhotos,
    Review,
}

impl StepId {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StepId::Kind => "kind",
            StepId::Basics => "basics",
            StepId::When => "when",
            StepId::ServiceWhen => "serviceWhen",
            StepId::Where => "where",
            StepId::Capacity => "capacity",
            StepId::Price => "price",
            StepId::ServicePhotos => "servicePhotos",
            StepId::Review => "review",
        }
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const NO_KIND: &[StepId] = &[StepId::Kind];

const EVENT_FREE: &[StepId] = &[
    StepId::Kind,
    StepId::Basics,
    StepId::When,
    StepId::Where,
    StepId::Capacity,
    StepId::Review,
];

const EVENT_PAID: &[StepId] = &[
    StepId::Kind,
    StepId::Basics,
    StepId::When,
    StepId::Where,
    StepId::Price,
    StepId::Review,
];

const SERVICE: &[StepId] = &[
    StepId::Kind,
    StepId::Basics,
    StepId::ServiceWhen,
    StepId::Where,
    StepId::Price,
    StepId::ServicePhotos,
    StepId::Review,
];

/// Ordered steps for a listing kind. Never empty; always starts with
/// [`StepId::Kind`].
#[must_use]
pub fn steps(kind: Option<ListingKind>) -> &'static [StepId] {
    match kind {
        None => NO_KIND,
        Some(ListingKind::EventFree) => EVENT_FREE,
        Some(ListingKind::EventPaid) => EVENT_PAID,
        Some(ListingKind::Service) => SERVICE,
    }
}

/// Where the cursor lands after the graph changed under it.
///
/// Stays on the same step if the new graph still has it; otherwise keeps the
/// numeric position, clamped to the last step.
#[must_use]
pub fn relocate(current: StepId, index: usize, graph: &[StepId]) -> usize {
    graph
        .iter()
        .position(|s| *s == current)
        .unwrap_or_else(|| index.min(graph.len().saturating_sub(1)))
}
