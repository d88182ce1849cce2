// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events, their classification, and interval helpers.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::EventId;

/// Declared kind of an event, serialized as the `type` field.
///
/// `is_milestone` on [`Event`] is authoritative for milestone status; this
/// field only distinguishes second-level kinds. Unknown strings deserialize
/// to [`EventKind::Other`] and are laid out like stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Top-level container.
    Epoch,
    /// Second-level sub-event bound inside an epoch.
    Stage,
    /// Alternate second-level sub-event ("suceso").
    Event,
    /// Zero-duration point event.
    Milestone,
    /// Any kind this version does not know about.
    #[serde(other)]
    Other,
}

/// One of the four fixed horizontal lanes events are grouped into.
///
/// The declaration order is the vertical order of the lanes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackId {
    /// Epochs (`is_parent`).
    Epoch,
    /// Stages and events of unknown kind.
    Stage,
    /// Sucesos (`type == "event"`).
    Event,
    /// Milestones (`is_milestone`).
    Milestone,
}

impl TrackId {
    /// All tracks in vertical order.
    pub const ALL: [Self; 4] = [Self::Epoch, Self::Stage, Self::Event, Self::Milestone];

    /// Position of this track in [`TrackId::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Epoch => 0,
            Self::Stage => 1,
            Self::Event => 2,
            Self::Milestone => 3,
        }
    }

    /// Human-readable lane label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Epoch => "Epoch",
            Self::Stage => "Stage",
            Self::Event => "Event",
            Self::Milestone => "Milestone",
        }
    }
}

/// Optional geographic anchor of an event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Display name of the place; used for location filtering.
    #[serde(default)]
    pub name: String,
}

/// A time-bound entry of a timeline.
///
/// Events form a tree through `parent_id`: epochs at the top, stages and
/// sucesos inside epochs, milestones attached to stages or sucesos.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Stable identifier.
    pub id: EventId,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Start instant.
    pub start: DateTime<Utc>,
    /// End instant; equal to `start` for milestones.
    pub end: DateTime<Utc>,
    /// Containing event, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<EventId>,
    /// Marks a top-level epoch.
    #[serde(default)]
    pub is_parent: bool,
    /// Declared kind.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<EventKind>,
    /// Marks a milestone regardless of `kind`.
    #[serde(default)]
    pub is_milestone: bool,
    /// Desired row inside the event's track. Negative values mean "auto".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    /// Display color (CSS color string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Optional media link.
    #[serde(default)]
    pub media_url: String,
    /// Tags; order is irrelevant.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Optional geographic anchor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoPoint>,
}

impl Event {
    fn bare(id: EventId, title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            start,
            end,
            parent_id: None,
            is_parent: false,
            kind: None,
            is_milestone: false,
            order: None,
            color: None,
            description: String::new(),
            media_url: String::new(),
            tags: BTreeSet::new(),
            geo: None,
        }
    }

    /// Creates a top-level epoch.
    #[must_use]
    pub fn epoch(
        id: EventId,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            is_parent: true,
            kind: Some(EventKind::Epoch),
            ..Self::bare(id, title, start, end)
        }
    }

    /// Creates a stage inside `parent`.
    #[must_use]
    pub fn stage(
        id: EventId,
        title: impl Into<String>,
        parent: Option<EventId>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            parent_id: parent,
            kind: Some(EventKind::Stage),
            ..Self::bare(id, title, start, end)
        }
    }

    /// Creates a suceso (`type == "event"`) inside `parent`.
    #[must_use]
    pub fn suceso(
        id: EventId,
        title: impl Into<String>,
        parent: Option<EventId>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            parent_id: parent,
            kind: Some(EventKind::Event),
            ..Self::bare(id, title, start, end)
        }
    }

    /// Creates a milestone at `at`, attached to `parent`.
    #[must_use]
    pub fn milestone(
        id: EventId,
        title: impl Into<String>,
        parent: Option<EventId>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            parent_id: parent,
            kind: Some(EventKind::Milestone),
            is_milestone: true,
            ..Self::bare(id, title, at, at)
        }
    }

    /// Sets the row hint.
    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// Replaces the tag set.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the geographic anchor.
    #[must_use]
    pub fn with_geo(mut self, geo: GeoPoint) -> Self {
        self.geo = Some(geo);
        self
    }

    /// Sets the display color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Lane this event is laid out in.
    ///
    /// First match wins: epoch flag, milestone flag, `type == "event"`,
    /// `type == "stage"`, otherwise stage.
    #[must_use]
    pub fn track(&self) -> TrackId {
        if self.is_parent {
            TrackId::Epoch
        } else if self.is_milestone {
            TrackId::Milestone
        } else if self.kind == Some(EventKind::Event) {
            TrackId::Event
        } else {
            TrackId::Stage
        }
    }

    /// Explicit row requested through `order`, if it is non-negative.
    #[must_use]
    pub fn row_hint(&self) -> Option<usize> {
        self.order.and_then(|o| usize::try_from(o).ok())
    }

    /// `end - start`.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Returns `true` if `[start, end)` overlaps this event's interval.
    #[must_use]
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        intervals_overlap(self.start, self.end, start, end)
    }

    /// Returns `true` if `[start, end]` lies inside this event's interval.
    #[must_use]
    pub fn contains_interval(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start >= self.start && end <= self.end
    }

    /// Copy of this event with both bounds moved by `delta`.
    ///
    /// Bounds saturate at the representable range instead of overflowing.
    #[must_use]
    pub fn shifted(&self, delta: TimeDelta) -> Self {
        Self {
            start: shift_saturating(self.start, delta),
            end: shift_saturating(self.end, delta),
            ..self.clone()
        }
    }
}

/// Half-open overlap test: `max(a_start, b_start) < min(a_end, b_end)`.
///
/// Touching intervals and zero-length intervals never overlap.
#[must_use]
pub fn intervals_overlap<T: Ord>(a_start: T, a_end: T, b_start: T, b_end: T) -> bool {
    a_start.max(b_start) < a_end.min(b_end)
}

/// Adds `delta` to `at`, clamping to the representable range.
#[must_use]
pub fn shift_saturating(at: DateTime<Utc>, delta: TimeDelta) -> DateTime<Utc> {
    at.checked_add_signed(delta).unwrap_or(if delta < TimeDelta::zero() {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn track_classification_priority() {
        let id = EventId::from_u128;
        let epoch = Event::epoch(id(1), "e", day(2020, 1, 1), day(2020, 2, 1));
        assert_eq!(epoch.track(), TrackId::Epoch);

        // Milestone flag wins over declared kind.
        let mut odd = Event::suceso(id(2), "s", None, day(2020, 1, 1), day(2020, 1, 1));
        odd.is_milestone = true;
        assert_eq!(odd.track(), TrackId::Milestone);

        let suceso = Event::suceso(id(3), "s", None, day(2020, 1, 1), day(2020, 1, 2));
        assert_eq!(suceso.track(), TrackId::Event);

        let mut unknown = Event::stage(id(4), "x", None, day(2020, 1, 1), day(2020, 1, 2));
        unknown.kind = None;
        assert_eq!(unknown.track(), TrackId::Stage);
        unknown.kind = Some(EventKind::Other);
        assert_eq!(unknown.track(), TrackId::Stage);
    }

    #[test]
    fn row_hint_ignores_negative_orders() {
        let e = Event::stage(EventId::from_u128(1), "s", None, day(2020, 1, 1), day(2020, 1, 2));
        assert_eq!(e.row_hint(), None);
        assert_eq!(e.clone().with_order(3).row_hint(), Some(3));
        assert_eq!(e.with_order(-1).row_hint(), None);
    }

    #[test]
    fn half_open_overlap() {
        assert!(intervals_overlap(0, 10, 5, 15));
        assert!(!intervals_overlap(0, 10, 10, 20));
        assert!(!intervals_overlap(5, 5, 0, 10));
        assert!(intervals_overlap(0, 10, 0, 10));
    }

    #[test]
    fn shifted_moves_both_bounds() {
        let e = Event::stage(EventId::from_u128(1), "s", None, day(2020, 1, 1), day(2020, 1, 11));
        let moved = e.shifted(TimeDelta::days(3));
        assert_eq!(moved.start, day(2020, 1, 4));
        assert_eq!(moved.end, day(2020, 1, 14));
        assert_eq!(moved.duration(), e.duration());
    }

    #[test]
    fn deserializes_original_document_shape() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000007",
            "title": "Viaje",
            "start": "2021-01-01T00:00:00Z",
            "end": "2021-01-10T00:00:00Z",
            "parentId": null,
            "isParent": false,
            "type": "event",
            "order": null,
            "isMilestone": false,
            "tags": ["b", "a", "b"],
            "geo": { "lat": 40.4, "lng": -3.7, "name": "Madrid" }
        }"#;
        let e: Event = serde_json::from_str(json).unwrap();
        assert_eq!(e.id, EventId::from_u128(7));
        assert_eq!(e.track(), TrackId::Event);
        assert_eq!(e.parent_id, None);
        assert_eq!(e.order, None);
        assert_eq!(e.tags.len(), 2);
        assert_eq!(e.geo.unwrap().name, "Madrid");
    }

    #[test]
    fn unknown_kind_is_tolerated() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000001",
            "start": "2021-01-01T00:00:00Z",
            "end": "2021-01-02T00:00:00Z",
            "type": "chapter"
        }"#;
        let e: Event = serde_json::from_str(json).unwrap();
        assert_eq!(e.kind, Some(EventKind::Other));
        assert_eq!(e.track(), TrackId::Stage);
    }
}
