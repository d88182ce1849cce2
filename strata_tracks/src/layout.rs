// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row stacking within tracks.
//!
//! Bar tracks (epoch, stage, event) are packed with a first-fit interval
//! scheduler: events are visited by start time (longer first on ties) and each
//! goes to the lowest row whose registered intervals it does not overlap.
//! An explicit `order` hint bypasses the search and is registered as-is, so
//! hinted rows may hold overlapping intervals; those are only rejected when a
//! drag commits.
//!
//! Milestones are never packed: each sits on its hinted row, or row 0.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use hashbrown::HashMap;
use kurbo::Rect;
use smallvec::SmallVec;
use strata_model::{Event, EventId, TrackId, intervals_overlap};
use strata_view::TimeAxis;

use crate::metrics::{LayoutConfig, TrackMetrics};

/// An interval registered in a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowSlot {
    /// Owner of the interval.
    pub id: EventId,
    /// Interval start.
    pub start: DateTime<Utc>,
    /// Interval end.
    pub end: DateTime<Utc>,
}

type Row = SmallVec<[RowSlot; 4]>;

#[derive(Clone, Debug, Default)]
struct TrackRows {
    rows: BTreeMap<usize, Row>,
    row_count: usize,
}

impl TrackRows {
    fn collides(&self, row: usize, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.rows
            .get(&row)
            .is_some_and(|slots| slots.iter().any(|s| intervals_overlap(start, end, s.start, s.end)))
    }

    fn register(&mut self, row: usize, slot: RowSlot) {
        self.rows.entry(row).or_default().push(slot);
    }

    fn highest_row(&self) -> Option<usize> {
        self.rows.keys().next_back().copied()
    }
}

/// Track/row assignment for one event set, plus the derived pixel geometry.
///
/// Rows depend only on the events. Pixel geometry additionally depends on the
/// zoom through the compact preset.
#[derive(Clone, Debug)]
pub struct TrackLayout {
    rows: HashMap<EventId, usize>,
    tracks: [TrackRows; 4],
    metrics: TrackMetrics,
    heights: [f64; 4],
    offsets: [f64; 4],
}

impl TrackLayout {
    /// Lays out `events` for the given zoom.
    #[must_use]
    pub fn compute(events: &[Event], pixels_per_day: f64, config: &LayoutConfig) -> Self {
        let mut groups: [Vec<&Event>; 4] = Default::default();
        for event in events {
            groups[event.track().index()].push(event);
        }

        let mut rows = HashMap::with_capacity(events.len());
        let mut tracks: [TrackRows; 4] = Default::default();

        for track in TrackId::ALL {
            let group = &mut groups[track.index()];
            let state = &mut tracks[track.index()];
            if track == TrackId::Milestone {
                group.sort_by_key(|e| e.start);
                for event in group.iter() {
                    let row = event.row_hint().unwrap_or(0);
                    state.register(
                        row,
                        RowSlot {
                            id: event.id,
                            start: event.start,
                            end: event.end,
                        },
                    );
                    rows.insert(event.id, row);
                }
                state.row_count = state.highest_row().map_or(0, |r| r + 1);
                continue;
            }

            group.sort_by(|a, b| {
                a.start
                    .cmp(&b.start)
                    .then_with(|| b.duration().cmp(&a.duration()))
            });
            for event in group.iter() {
                let row = match event.row_hint() {
                    Some(row) => row,
                    None => (0..)
                        .find(|&r| !state.collides(r, event.start, event.end))
                        .unwrap_or(0),
                };
                state.register(
                    row,
                    RowSlot {
                        id: event.id,
                        start: event.start,
                        end: event.end,
                    },
                );
                rows.insert(event.id, row);
            }
            state.row_count = state.highest_row().map_or(1, |r| r + 1).max(1);
        }

        let metrics = config.metrics(pixels_per_day);
        let mut layout = Self {
            rows,
            tracks,
            metrics,
            heights: [0.0; 4],
            offsets: [0.0; 4],
        };
        layout.update_geometry();
        tracing::debug!(
            events = events.len(),
            compact = metrics.compact,
            rows = ?layout.tracks.each_ref().map(|t| t.row_count),
            "computed track layout"
        );
        layout
    }

    /// Re-resolves pixel geometry for a new zoom without re-stacking rows.
    pub fn set_zoom(&mut self, pixels_per_day: f64, config: &LayoutConfig) {
        let metrics = config.metrics(pixels_per_day);
        if metrics == self.metrics {
            return;
        }
        self.metrics = metrics;
        self.update_geometry();
    }

    /// Resolved pixel constants.
    #[must_use]
    pub fn metrics(&self) -> &TrackMetrics {
        &self.metrics
    }

    /// Returns `true` if the compact preset is in effect.
    #[must_use]
    pub fn is_compact(&self) -> bool {
        self.metrics.compact
    }

    /// Row assigned to `id`, if the event was laid out.
    #[must_use]
    pub fn row_of(&self, id: &EventId) -> Option<usize> {
        self.rows.get(id).copied()
    }

    /// Number of rows in `track`.
    ///
    /// Bar tracks report at least one row; the milestone track reports zero
    /// when it holds no milestones.
    #[must_use]
    pub fn track_rows(&self, track: TrackId) -> usize {
        self.tracks[track.index()].row_count
    }

    /// Intervals registered in `(track, row)`.
    #[must_use]
    pub fn occupants(&self, track: TrackId, row: usize) -> &[RowSlot] {
        self.tracks[track.index()]
            .rows
            .get(&row)
            .map_or(&[], |slots| slots.as_slice())
    }

    /// Pixel height of `track`.
    #[must_use]
    pub fn track_height(&self, track: TrackId) -> f64 {
        self.heights[track.index()]
    }

    /// Top of `track`, below the date axis and every preceding track.
    #[must_use]
    pub fn track_y(&self, track: TrackId) -> f64 {
        self.offsets[track.index()]
    }

    /// Top of a bar on `row` of `track`.
    #[must_use]
    pub fn event_y(&self, track: TrackId, row: usize) -> f64 {
        self.track_y(track) + self.metrics.row_top_offset + row as f64 * self.metrics.row_pitch()
    }

    /// Height of one bar.
    #[must_use]
    pub fn event_height(&self) -> f64 {
        self.metrics.event_height
    }

    /// Total height of the laid-out content, including the trailing gap.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        let last = TrackId::Milestone;
        self.track_y(last) + self.track_height(last) + self.metrics.track_gap
    }

    /// First event in `(track, row)` whose interval overlaps `[start, end)`,
    /// ignoring `exclude`.
    #[must_use]
    pub fn find_collision(
        &self,
        track: TrackId,
        row: usize,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: &EventId,
    ) -> Option<EventId> {
        let hit = self
            .occupants(track, row)
            .iter()
            .find(|s| s.id != *exclude && intervals_overlap(start, end, s.start, s.end))
            .map(|s| s.id);
        tracing::trace!(?track, row, collision = ?hit, "collision probe");
        hit
    }

    /// Pixel rectangle of an event drawn on `row` of `track` over `[start, end]`.
    ///
    /// Milestones are fixed-width markers centred on `start`; bars are at
    /// least `min_bar_width` wide.
    #[must_use]
    pub fn event_rect(
        &self,
        track: TrackId,
        row: usize,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        axis: &TimeAxis,
    ) -> Rect {
        let y = self.event_y(track, row);
        let h = self.metrics.event_height;
        let x0 = axis.x_of(start);
        if track == TrackId::Milestone {
            let half = self.metrics.milestone_width / 2.0;
            return Rect::new(x0 - half, y, x0 + half, y + h);
        }
        let width = (axis.x_of(end) - x0).max(self.metrics.min_bar_width);
        Rect::new(x0, y, x0 + width, y + h)
    }

    fn update_geometry(&mut self) {
        let mut y = self.metrics.axis_height;
        for track in TrackId::ALL {
            let height = self.metrics.track_height(self.track_rows(track));
            self.offsets[track.index()] = y;
            self.heights[track.index()] = height;
            y += height + self.metrics.track_gap;
        }
    }
}
