// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashSet;
use strata_model::{EventId, HierarchyIndex};

/// The selected event and its lineage.
///
/// While an event is selected, everything outside its related set (itself,
/// its ancestors, and its descendants) renders dimmed. The related set is
/// cached; call [`refresh`](Self::refresh) after the hierarchy changes.
///
/// Like a list selection, it carries a revision counter that only bumps when
/// the selected event actually changes.
#[derive(Clone, Debug, Default)]
pub struct EventSelection {
    selected: Option<EventId>,
    related: HashSet<EventId>,
    revision: u64,
}

impl EventSelection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected event.
    #[must_use]
    pub fn selected(&self) -> Option<EventId> {
        self.selected
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }

    /// Bumped on every change of the selected event.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Selects `id`, replacing any previous selection.
    pub fn select(&mut self, id: EventId, hierarchy: &HierarchyIndex) {
        if self.selected == Some(id) {
            return;
        }
        self.selected = Some(id);
        self.related = hierarchy.related(&id);
        self.bump_revision();
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        if self.selected.take().is_none() {
            return;
        }
        self.related.clear();
        self.bump_revision();
    }

    /// Recomputes the related set against a rebuilt hierarchy.
    ///
    /// Clears the selection if the selected event is gone.
    pub fn refresh(&mut self, hierarchy: &HierarchyIndex, exists: impl Fn(&EventId) -> bool) {
        let Some(id) = self.selected else {
            return;
        };
        if exists(&id) {
            self.related = hierarchy.related(&id);
        } else {
            self.clear();
        }
    }

    /// Returns `true` if `id` is the selected event.
    #[must_use]
    pub fn is_selected(&self, id: &EventId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Returns `true` if `id` is in the selected event's lineage.
    #[must_use]
    pub fn is_related(&self, id: &EventId) -> bool {
        self.related.contains(id)
    }

    /// Returns `true` if `id` should render dimmed.
    #[must_use]
    pub fn is_dimmed(&self, id: &EventId) -> bool {
        self.selected.is_some() && !self.related.contains(id)
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
