// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persistence collaborator.

use chrono::Utc;
use hashbrown::HashMap;

use crate::{StoreError, Timeline, TimelineId};

/// Loads and saves timeline documents.
///
/// Implementations own the wire format; the engine only hands over whole
/// [`Timeline`] values.
pub trait TimelineStore {
    /// Loads the timeline stored under `id`.
    fn load_timeline(&self, id: &TimelineId) -> Result<Timeline, StoreError>;

    /// Saves `timeline`, assigning an id on first save and stamping
    /// [`Timeline::updated_at`]. Returns the id it was stored under.
    fn save_timeline(&mut self, timeline: &mut Timeline) -> Result<TimelineId, StoreError>;

    /// Deletes the timeline stored under `id`.
    fn delete_timeline(&mut self, id: &TimelineId) -> Result<(), StoreError>;

    /// Ids of every stored timeline, sorted.
    fn timeline_ids(&self) -> Vec<TimelineId>;
}

/// A [`TimelineStore`] that keeps serialized JSON documents in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    documents: HashMap<TimelineId, String>,
    next_id: u64,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw JSON document stored under `id`.
    #[must_use]
    pub fn document(&self, id: &TimelineId) -> Option<&str> {
        self.documents.get(id).map(String::as_str)
    }

    fn mint_id(&mut self) -> TimelineId {
        loop {
            self.next_id += 1;
            let id = TimelineId::new(format!("tl-{}", self.next_id));
            if !self.documents.contains_key(&id) {
                return id;
            }
        }
    }
}

impl TimelineStore for MemoryStore {
    fn load_timeline(&self, id: &TimelineId) -> Result<Timeline, StoreError> {
        let json = self
            .documents
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        let mut timeline = Timeline::from_json(json)?;
        timeline.id = Some(id.clone());
        Ok(timeline)
    }

    fn save_timeline(&mut self, timeline: &mut Timeline) -> Result<TimelineId, StoreError> {
        let id = match &timeline.id {
            Some(id) => id.clone(),
            None => self.mint_id(),
        };
        let previous = (timeline.id.clone(), timeline.updated_at);
        timeline.id = Some(id.clone());
        timeline.updated_at = Some(Utc::now());
        match timeline.to_json() {
            Ok(json) => {
                tracing::debug!(timeline = %id, bytes = json.len(), "saved timeline");
                self.documents.insert(id.clone(), json);
                Ok(id)
            }
            Err(err) => {
                (timeline.id, timeline.updated_at) = previous;
                Err(err.into())
            }
        }
    }

    fn delete_timeline(&mut self, id: &TimelineId) -> Result<(), StoreError> {
        self.documents
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn timeline_ids(&self) -> Vec<TimelineId> {
        let mut ids: Vec<TimelineId> = self.documents.keys().cloned().collect();
        ids.sort();
        ids
    }
}
