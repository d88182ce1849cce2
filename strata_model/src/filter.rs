// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility filtering by kind, tag, and location.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{Event, TrackId};

/// Which events are shown.
///
/// An event passes when its track is enabled, and it carries at least one of
/// the selected tags, and its location name is among the selected locations.
/// Empty tag or location selections match everything.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventFilter {
    /// Tracks whose events are shown.
    pub tracks: BTreeSet<TrackId>,
    /// Selected tags.
    pub tags: BTreeSet<String>,
    /// Selected location names.
    pub locations: BTreeSet<String>,
}

impl Default for EventFilter {
    fn default() -> Self {
        Self {
            tracks: TrackId::ALL.into_iter().collect(),
            tags: BTreeSet::new(),
            locations: BTreeSet::new(),
        }
    }
}

impl EventFilter {
    /// Returns `true` if `event` passes every criterion.
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        if !self.tracks.contains(&event.track()) {
            return false;
        }
        if !self.tags.is_empty() && self.tags.is_disjoint(&event.tags) {
            return false;
        }
        if !self.locations.is_empty() {
            let Some(geo) = &event.geo else {
                return false;
            };
            if !self.locations.contains(&geo.name) {
                return false;
            }
        }
        true
    }

    /// Events of `events` that pass this filter, in input order.
    pub fn apply<'a>(&'a self, events: &'a [Event]) -> impl Iterator<Item = &'a Event> + 'a {
        events.iter().filter(|e| self.matches(e))
    }

    /// Toggles a track on or off.
    pub fn toggle_track(&mut self, track: TrackId) {
        if !self.tracks.remove(&track) {
            self.tracks.insert(track);
        }
    }

    /// Toggles a tag in the selection.
    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.tags.remove(tag) {
            self.tags.insert(tag.to_owned());
        }
    }

    /// Toggles a location in the selection.
    pub fn toggle_location(&mut self, location: &str) {
        if !self.locations.remove(location) {
            self.locations.insert(location.to_owned());
        }
    }
}

/// Distinct tags across `events`, sorted.
#[must_use]
pub fn all_tags(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .flat_map(|e| e.tags.iter())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect()
}

/// Distinct non-empty location names across `events`, sorted.
#[must_use]
pub fn all_locations(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| e.geo.as_ref())
        .map(|geo| geo.name.as_str())
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}
