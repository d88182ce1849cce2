// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parent/child adjacency index over a timeline's events.
//!
//! Events only store a back-reference to their parent. [`HierarchyIndex`]
//! inverts those references once per event-set change so that descendant and
//! ancestor queries do not rescan the whole event list.

use hashbrown::{HashMap, HashSet};

use crate::{Event, EventId};

/// Adjacency index built from `parent_id` back-references.
///
/// Dangling references (a parent that is not in the event set, or an event
/// naming itself) are treated as "no parent". Traversals are cycle-safe:
/// out-of-band data with cyclic parent links terminates and visits each event
/// at most once.
#[derive(Clone, Debug, Default)]
pub struct HierarchyIndex {
    children: HashMap<EventId, Vec<EventId>>,
    parents: HashMap<EventId, EventId>,
    roots: Vec<EventId>,
}

impl HierarchyIndex {
    /// Builds the index for `events`.
    ///
    /// Children are listed in the order they appear in `events`.
    #[must_use]
    pub fn build(events: &[Event]) -> Self {
        let known: HashSet<EventId> = events.iter().map(|e| e.id).collect();
        let mut index = Self::default();
        for event in events {
            match event.parent_id {
                Some(parent) if parent != event.id && known.contains(&parent) => {
                    index.children.entry(parent).or_default().push(event.id);
                    index.parents.insert(event.id, parent);
                }
                Some(parent) => {
                    tracing::warn!(event = %event.id, %parent, "dangling parent reference, treating as top-level");
                    index.roots.push(event.id);
                }
                None => index.roots.push(event.id),
            }
        }
        index
    }

    /// Resolved parent of `id`, if it has one.
    #[must_use]
    pub fn parent_of(&self, id: &EventId) -> Option<EventId> {
        self.parents.get(id).copied()
    }

    /// Direct children of `id`.
    #[must_use]
    pub fn children_of(&self, id: &EventId) -> &[EventId] {
        self.children.get(id).map_or(&[], Vec::as_slice)
    }

    /// Events without a resolved parent.
    #[must_use]
    pub fn roots(&self) -> &[EventId] {
        &self.roots
    }

    /// All transitive descendants of `id` in depth-first pre-order, excluding `id`.
    #[must_use]
    pub fn descendants(&self, id: &EventId) -> Vec<EventId> {
        let mut out = Vec::new();
        let mut visited = HashSet::new();
        visited.insert(*id);
        let mut stack: Vec<EventId> = self.children_of(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            if !visited.insert(next) {
                continue;
            }
            out.push(next);
            stack.extend(self.children_of(&next).iter().rev().copied());
        }
        out
    }

    /// Ancestors of `id`, nearest first.
    #[must_use]
    pub fn ancestors(&self, id: &EventId) -> Vec<EventId> {
        let mut out = Vec::new();
        let mut visited = HashSet::new();
        visited.insert(*id);
        let mut current = *id;
        while let Some(parent) = self.parent_of(&current) {
            if !visited.insert(parent) {
                tracing::warn!(event = %id, "cycle in parent links");
                break;
            }
            out.push(parent);
            current = parent;
        }
        out
    }

    /// Returns `true` if `ancestor` is a strict ancestor of `id`.
    #[must_use]
    pub fn is_descendant_of(&self, id: &EventId, ancestor: &EventId) -> bool {
        self.ancestors(id).contains(ancestor)
    }

    /// The lineage of `id`: itself, its ancestors, and its descendants.
    ///
    /// Used to highlight everything connected to a selected event.
    #[must_use]
    pub fn related(&self, id: &EventId) -> HashSet<EventId> {
        let mut set: HashSet<EventId> = self.ancestors(id).into_iter().collect();
        set.extend(self.descendants(id));
        set.insert(*id);
        set
    }
}
