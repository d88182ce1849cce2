// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The timeline document and its validated mutations.

use chrono::{DateTime, Utc};
use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::{Event, EventId, EventKind, HierarchyIndex, ModelError, TimelineId};

/// Theme applied to timelines that do not name one.
pub const DEFAULT_THEME_ID: &str = "chronos";

/// Which second-level kind [`Timeline::add_sub_event`] creates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubEventKind {
    /// A stage (`type == "stage"`).
    Stage,
    /// A suceso (`type == "event"`).
    Suceso,
}

impl SubEventKind {
    fn kind(self) -> EventKind {
        match self {
            Self::Stage => EventKind::Stage,
            Self::Suceso => EventKind::Event,
        }
    }
}

/// Partial metadata update.
///
/// `None` leaves a field untouched. An empty `identifier` is ignored so a
/// timeline never loses its display name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineMetadata {
    /// New display name.
    pub identifier: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New cover image URL.
    pub cover_image: Option<String>,
    /// New theme id.
    pub theme_id: Option<String>,
}

/// Wire shape of a timeline: the persisted document.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<TimelineId>,
    #[serde(default = "default_identifier")]
    identifier: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    cover_image: String,
    #[serde(default = "default_theme_id")]
    theme_id: String,
    #[serde(default)]
    events: Vec<Event>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

fn default_identifier() -> String {
    "Untitled Timeline".into()
}

fn default_theme_id() -> String {
    DEFAULT_THEME_ID.into()
}

/// A named set of events plus display metadata.
///
/// The timeline exclusively owns its events. Validated mutations
/// ([`insert`](Self::insert), [`update`](Self::update),
/// [`apply_batch`](Self::apply_batch), [`remove_cascade`](Self::remove_cascade))
/// keep the parent invariants; documents loaded from JSON or built with
/// [`from_events`](Self::from_events) are accepted as-is, since data edited
/// out of band may violate them.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "TimelineDocument", into = "TimelineDocument")]
pub struct Timeline {
    /// Store-assigned id, if persisted.
    pub id: Option<TimelineId>,
    /// Display name.
    pub identifier: String,
    /// Free-form description.
    pub description: String,
    /// Cover image URL.
    pub cover_image: String,
    /// Theme id; see [`theme_by_id`](crate::theme_by_id).
    pub theme_id: String,
    /// Time of the last successful save.
    pub updated_at: Option<DateTime<Utc>>,
    events: Vec<Event>,
    slots: HashMap<EventId, usize>,
    revision: u64,
}

impl From<TimelineDocument> for Timeline {
    fn from(doc: TimelineDocument) -> Self {
        let mut timeline = Self::from_events(doc.identifier, doc.events);
        timeline.id = doc.id;
        timeline.description = doc.description;
        timeline.cover_image = doc.cover_image;
        timeline.theme_id = doc.theme_id;
        timeline.updated_at = doc.updated_at;
        timeline
    }
}

impl From<Timeline> for TimelineDocument {
    fn from(timeline: Timeline) -> Self {
        Self {
            id: timeline.id,
            identifier: timeline.identifier,
            description: timeline.description,
            cover_image: timeline.cover_image,
            theme_id: timeline.theme_id,
            events: timeline.events,
            updated_at: timeline.updated_at,
        }
    }
}

impl Timeline {
    /// Creates an empty timeline.
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            id: None,
            identifier: identifier.into(),
            description: String::new(),
            cover_image: String::new(),
            theme_id: default_theme_id(),
            updated_at: None,
            events: Vec::new(),
            slots: HashMap::new(),
            revision: 0,
        }
    }

    /// Creates a timeline from events without validating them.
    ///
    /// Later events with an id already seen are dropped.
    #[must_use]
    pub fn from_events(identifier: impl Into<String>, events: Vec<Event>) -> Self {
        let mut timeline = Self::new(identifier);
        for event in events {
            if timeline.slots.contains_key(&event.id) {
                tracing::warn!(event = %event.id, "dropping duplicate event id");
                continue;
            }
            if event.end < event.start {
                tracing::warn!(event = %event.id, "event ends before it starts");
            }
            timeline.slots.insert(event.id, timeline.events.len());
            timeline.events.push(event);
        }
        timeline
    }

    /// Decodes a timeline document.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encodes this timeline as a document.
    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string(self)?)
    }

    /// All events, in insertion order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if the timeline has no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Looks up an event by id.
    #[must_use]
    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.slots.get(id).map(|&slot| &self.events[slot])
    }

    /// Returns `true` if an event with this id exists.
    #[must_use]
    pub fn contains(&self, id: &EventId) -> bool {
        self.slots.contains_key(id)
    }

    /// Mutation counter; bumps on every change to events or metadata.
    ///
    /// Hosts compare revisions to decide whether a (debounced) save is due.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Builds the parent/child adjacency index for the current events.
    #[must_use]
    pub fn hierarchy(&self) -> HierarchyIndex {
        HierarchyIndex::build(&self.events)
    }

    /// Adds a new event after validating its interval and parent.
    pub fn insert(&mut self, event: Event) -> Result<(), ModelError> {
        if self.contains(&event.id) {
            return Err(ModelError::DuplicateEvent(event.id));
        }
        validate_interval(&event)?;
        self.validate_parent(&event)?;
        self.slots.insert(event.id, self.events.len());
        self.events.push(event);
        self.bump_revision();
        Ok(())
    }

    /// Replaces an existing event, returning the previous version.
    pub fn update(&mut self, event: Event) -> Result<Event, ModelError> {
        let Some(&slot) = self.slots.get(&event.id) else {
            return Err(ModelError::UnknownEvent(event.id));
        };
        validate_interval(&event)?;
        self.validate_parent(&event)?;
        if let Some(parent) = event.parent_id {
            if self.hierarchy().is_descendant_of(&parent, &event.id) {
                return Err(ModelError::Cycle(event.id));
            }
        }
        let previous = core::mem::replace(&mut self.events[slot], event);
        self.bump_revision();
        Ok(previous)
    }

    /// Atomically replaces several existing events.
    ///
    /// This is the commit path of an interaction: either every event is
    /// replaced or, if any id is unknown or any interval is invalid, nothing
    /// changes. Parent links are not re-validated.
    pub fn apply_batch(&mut self, events: Vec<Event>) -> Result<(), ModelError> {
        for event in &events {
            if !self.contains(&event.id) {
                return Err(ModelError::UnknownEvent(event.id));
            }
            validate_interval(event)?;
        }
        if events.is_empty() {
            return Ok(());
        }
        let count = events.len();
        for event in events {
            let slot = self.slots[&event.id];
            self.events[slot] = event;
        }
        tracing::debug!(count, "applied event batch");
        self.bump_revision();
        Ok(())
    }

    /// Removes an event and all of its transitive descendants.
    ///
    /// Returns the removed events, the requested one first.
    pub fn remove_cascade(&mut self, id: &EventId) -> Result<Vec<Event>, ModelError> {
        if !self.contains(id) {
            return Err(ModelError::UnknownEvent(*id));
        }
        let mut doomed: Vec<EventId> = vec![*id];
        doomed.extend(self.hierarchy().descendants(id));
        let doomed_set: HashSet<EventId> = doomed.iter().copied().collect();

        let (removed, kept): (Vec<Event>, Vec<Event>) = core::mem::take(&mut self.events)
            .into_iter()
            .partition(|e| doomed_set.contains(&e.id));
        self.events = kept;
        self.reindex();

        let mut by_id: HashMap<EventId, Event> = removed.into_iter().map(|e| (e.id, e)).collect();
        let removed: Vec<Event> = doomed.iter().filter_map(|id| by_id.remove(id)).collect();
        tracing::debug!(event = %id, removed = removed.len(), "removed event subtree");
        self.bump_revision();
        Ok(removed)
    }

    /// Adds a new epoch and returns its id.
    pub fn add_epoch(
        &mut self,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<EventId, ModelError> {
        let event = Event::epoch(EventId::new(), title, start, end).with_order(0);
        let id = event.id;
        self.insert(event)?;
        Ok(id)
    }

    /// Adds a stage or suceso spanning its parent epoch.
    ///
    /// The new event is placed one row below the lowest sibling of the same
    /// kind.
    pub fn add_sub_event(
        &mut self,
        parent: EventId,
        kind: SubEventKind,
        title: impl Into<String>,
    ) -> Result<EventId, ModelError> {
        let id = EventId::new();
        let Some(epoch) = self.get(&parent) else {
            return Err(ModelError::UnknownParent { event: id, parent });
        };
        if !epoch.is_parent {
            return Err(ModelError::InvalidParent { event: id, parent });
        }
        let order = self
            .events
            .iter()
            .filter(|e| {
                e.parent_id == Some(parent) && !e.is_milestone && e.kind == Some(kind.kind())
            })
            .map(|e| e.order.unwrap_or(0))
            .fold(-1, i32::max)
            + 1;
        let (start, end) = (epoch.start, epoch.end);
        let event = match kind {
            SubEventKind::Stage => Event::stage(id, title, Some(parent), start, end),
            SubEventKind::Suceso => Event::suceso(id, title, Some(parent), start, end),
        }
        .with_order(order);
        self.insert(event)?;
        Ok(id)
    }

    /// Adds a milestone at the start of a stage or suceso.
    pub fn add_milestone(
        &mut self,
        sub_event: EventId,
        title: impl Into<String>,
    ) -> Result<EventId, ModelError> {
        let id = EventId::new();
        let Some(parent) = self.get(&sub_event) else {
            return Err(ModelError::UnknownParent {
                event: id,
                parent: sub_event,
            });
        };
        let event = Event::milestone(id, title, Some(sub_event), parent.start).with_order(0);
        self.insert(event)?;
        Ok(id)
    }

    /// Applies a partial metadata update.
    pub fn set_metadata(&mut self, metadata: TimelineMetadata) {
        let mut changed = false;
        if let Some(identifier) = metadata.identifier.filter(|s| !s.is_empty()) {
            changed |= replace_if_different(&mut self.identifier, identifier);
        }
        if let Some(description) = metadata.description {
            changed |= replace_if_different(&mut self.description, description);
        }
        if let Some(cover_image) = metadata.cover_image {
            changed |= replace_if_different(&mut self.cover_image, cover_image);
        }
        if let Some(theme_id) = metadata.theme_id {
            changed |= replace_if_different(&mut self.theme_id, theme_id);
        }
        if changed {
            self.bump_revision();
        }
    }

    /// Copies this timeline under a new name.
    ///
    /// Every event gets a fresh id; parent links are remapped to the copies.
    /// The copy is unsaved: it has no store id and no save time.
    #[must_use]
    pub fn duplicate(&self, identifier: impl Into<String>) -> Self {
        let remap: HashMap<EventId, EventId> =
            self.events.iter().map(|e| (e.id, EventId::new())).collect();
        let events = self
            .events
            .iter()
            .map(|e| Event {
                id: remap[&e.id],
                parent_id: e.parent_id.map(|p| remap.get(&p).copied().unwrap_or(p)),
                ..e.clone()
            })
            .collect();
        let mut copy = Self::from_events(identifier, events);
        copy.description = self.description.clone();
        copy.cover_image = self.cover_image.clone();
        copy.theme_id = self.theme_id.clone();
        copy
    }

    fn validate_parent(&self, event: &Event) -> Result<(), ModelError> {
        let Some(parent_id) = event.parent_id else {
            return Ok(());
        };
        if parent_id == event.id {
            return Err(ModelError::Cycle(event.id));
        }
        let Some(parent) = self.get(&parent_id) else {
            return Err(ModelError::UnknownParent {
                event: event.id,
                parent: parent_id,
            });
        };
        let invalid = event.is_parent || parent.is_milestone || (event.is_milestone && parent.is_parent);
        if invalid {
            return Err(ModelError::InvalidParent {
                event: event.id,
                parent: parent_id,
            });
        }
        Ok(())
    }

    fn reindex(&mut self) {
        self.slots = self.events.iter().enumerate().map(|(slot, e)| (e.id, slot)).collect();
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

fn validate_interval(event: &Event) -> Result<(), ModelError> {
    if event.end < event.start || (event.is_milestone && event.end != event.start) {
        return Err(ModelError::InvalidInterval(event.id));
    }
    Ok(())
}

fn replace_if_different(slot: &mut String, value: String) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
