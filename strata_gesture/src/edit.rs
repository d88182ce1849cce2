// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Provisional edits and the batches they commit as.

use chrono::TimeDelta;
use strata_model::{Event, EventId, HierarchyIndex, Timeline};

/// Whether dropping a pending edit where it is now would be accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DropValidity {
    /// The drop commits.
    #[default]
    Valid,
    /// The target row already holds this overlapping event.
    Collides(EventId),
}

impl DropValidity {
    /// Returns `true` for [`DropValidity::Valid`].
    #[must_use]
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// A shadow copy of one event, edited by an in-flight gesture.
///
/// The committed timeline is never touched until release.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingEdit {
    /// The provisional event.
    pub event: Event,
    /// The committed event as it was at pointer-down.
    pub baseline: Event,
    /// Validity of dropping `event` where it is now.
    pub validity: DropValidity,
}

impl PendingEdit {
    /// Starts an edit of `event` with no changes yet.
    #[must_use]
    pub fn new(event: &Event) -> Self {
        Self {
            event: event.clone(),
            baseline: event.clone(),
            validity: DropValidity::Valid,
        }
    }

    /// Returns `true` if the provisional event differs from the baseline.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.event != self.baseline
    }

    /// How far the provisional start moved from the baseline.
    #[must_use]
    pub fn start_delta(&self) -> TimeDelta {
        self.event.start - self.baseline.start
    }
}

/// An event as the renderer should draw it.
#[derive(Clone, Copy, Debug)]
pub enum EventView<'a> {
    /// No gesture is editing this event.
    Committed(&'a Event),
    /// A gesture is editing this event.
    Pending(&'a PendingEdit),
}

impl<'a> EventView<'a> {
    /// The event to draw: the provisional copy while pending.
    #[must_use]
    pub fn event(&self) -> &'a Event {
        match self {
            Self::Committed(event) => event,
            Self::Pending(edit) => &edit.event,
        }
    }

    /// Returns `true` while a gesture edits this event.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Drop validity to show. Committed events are always valid.
    #[must_use]
    pub fn validity(&self) -> DropValidity {
        match self {
            Self::Committed(_) => DropValidity::Valid,
            Self::Pending(edit) => edit.validity,
        }
    }
}

/// The full set of changes produced by one accepted gesture.
#[derive(Clone, Debug, PartialEq)]
pub struct CommitBatch {
    /// The dragged event in its final state.
    pub edited: Event,
    /// Transitive descendants of `edited`, each shifted by `shift`.
    pub cascaded: Vec<Event>,
    /// Time shift applied to the cascade; zero when nothing cascaded.
    pub shift: TimeDelta,
}

impl CommitBatch {
    /// A batch that changes only `edited`.
    #[must_use]
    pub fn single(edited: Event) -> Self {
        Self {
            edited,
            cascaded: Vec::new(),
            shift: TimeDelta::zero(),
        }
    }

    /// A batch for a moved or start-resized event: if its start changed,
    /// every transitive descendant (read from `timeline`) shifts by the same
    /// amount.
    ///
    /// Descendants missing from `timeline` are skipped.
    #[must_use]
    pub fn cascade(edit: &PendingEdit, timeline: &Timeline, hierarchy: &HierarchyIndex) -> Self {
        let shift = edit.start_delta();
        if shift.is_zero() {
            return Self::single(edit.event.clone());
        }
        let cascaded: Vec<Event> = hierarchy
            .descendants(&edit.event.id)
            .iter()
            .filter_map(|id| timeline.get(id))
            .map(|e| e.shifted(shift))
            .collect();
        if cascaded.is_empty() {
            return Self::single(edit.event.clone());
        }
        tracing::debug!(
            id = %edit.event.id,
            descendants = cascaded.len(),
            shift_ms = shift.num_milliseconds(),
            "cascading start shift"
        );
        Self {
            edited: edit.event.clone(),
            cascaded,
            shift,
        }
    }

    /// Number of events the batch replaces.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.cascaded.len()
    }

    /// Always `false`: a batch holds at least the edited event.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Ids of every replaced event, the edited one first.
    pub fn ids(&self) -> impl Iterator<Item = EventId> + '_ {
        core::iter::once(self.edited.id).chain(self.cascaded.iter().map(|e| e.id))
    }

    /// Flattens the batch, the edited event first.
    #[must_use]
    pub fn into_events(self) -> Vec<Event> {
        let mut events = Vec::with_capacity(self.len());
        events.push(self.edited);
        events.extend(self.cascaded);
        events
    }
}
