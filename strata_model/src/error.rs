// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{EventId, TimelineId};

/// Errors returned by validated [`Timeline`](crate::Timeline) mutations.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// No event with this id exists in the timeline.
    #[error("unknown event {0}")]
    UnknownEvent(EventId),
    /// An event with this id already exists.
    #[error("duplicate event id {0}")]
    DuplicateEvent(EventId),
    /// `end` is before `start`, or a milestone has a non-zero duration.
    #[error("event {0} has an invalid interval")]
    InvalidInterval(EventId),
    /// `parent_id` names an event that is not in the timeline.
    #[error("event {event} references unknown parent {parent}")]
    UnknownParent {
        /// The event being inserted or updated.
        event: EventId,
        /// The missing parent.
        parent: EventId,
    },
    /// The parent cannot contain this kind of child.
    #[error("event {parent} cannot contain {event}")]
    InvalidParent {
        /// The event being inserted or updated.
        event: EventId,
        /// The rejected parent.
        parent: EventId,
    },
    /// An event may not be its own ancestor.
    #[error("event {0} would become its own ancestor")]
    Cycle(EventId),
    /// The timeline document could not be encoded or decoded.
    #[error("timeline document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors returned by a [`TimelineStore`](crate::TimelineStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store has no timeline with this id.
    #[error("timeline {0} not found")]
    NotFound(TimelineId),
    /// The stored document could not be encoded or decoded.
    #[error(transparent)]
    Model(#[from] ModelError),
}
