// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};

/// Pixel constants of the track layout.
///
/// Fields come in regular/compact pairs; the compact preset applies when the
/// zoom drops below `compact_below`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Zoom, in pixels per day, below which the compact preset applies.
    pub compact_below: f64,
    /// Bar height.
    pub event_height: f64,
    /// Bar height when compact.
    pub compact_event_height: f64,
    /// Vertical gap between rows.
    pub row_gap: f64,
    /// Extra height added to every track.
    pub track_padding: f64,
    /// Vertical gap between tracks.
    pub track_gap: f64,
    /// Lower bound on a track's height.
    pub min_track_height: f64,
    /// Lower bound on a track's height when compact.
    pub compact_min_track_height: f64,
    /// Height reserved above the first track for the date axis.
    pub axis_height: f64,
    /// Offset of row 0 from the top of its track.
    pub row_top_offset: f64,
    /// Width of a milestone marker, centred on its date.
    pub milestone_width: f64,
    /// Lower bound on a bar's width.
    pub min_bar_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            compact_below: 0.5,
            event_height: 40.0,
            compact_event_height: 24.0,
            row_gap: 4.0,
            track_padding: 12.0,
            track_gap: 12.0,
            min_track_height: 60.0,
            compact_min_track_height: 40.0,
            axis_height: 40.0,
            row_top_offset: 5.0,
            milestone_width: 20.0,
            min_bar_width: 2.0,
        }
    }
}

impl LayoutConfig {
    /// Returns `true` if `pixels_per_day` selects the compact preset.
    #[must_use]
    pub fn is_compact(&self, pixels_per_day: f64) -> bool {
        pixels_per_day < self.compact_below
    }

    /// Resolves the preset for a zoom level.
    #[must_use]
    pub fn metrics(&self, pixels_per_day: f64) -> TrackMetrics {
        let compact = self.is_compact(pixels_per_day);
        TrackMetrics {
            compact,
            event_height: if compact {
                self.compact_event_height
            } else {
                self.event_height
            },
            min_track_height: if compact {
                self.compact_min_track_height
            } else {
                self.min_track_height
            },
            row_gap: self.row_gap,
            track_padding: self.track_padding,
            track_gap: self.track_gap,
            axis_height: self.axis_height,
            row_top_offset: self.row_top_offset,
            milestone_width: self.milestone_width,
            min_bar_width: self.min_bar_width,
        }
    }
}

/// [`LayoutConfig`] resolved for one zoom level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackMetrics {
    /// Whether the compact preset is in effect.
    pub compact: bool,
    /// Bar height.
    pub event_height: f64,
    /// Lower bound on a track's height.
    pub min_track_height: f64,
    /// Vertical gap between rows.
    pub row_gap: f64,
    /// Extra height added to every track.
    pub track_padding: f64,
    /// Vertical gap between tracks.
    pub track_gap: f64,
    /// Height reserved above the first track.
    pub axis_height: f64,
    /// Offset of row 0 from the top of its track.
    pub row_top_offset: f64,
    /// Width of a milestone marker.
    pub milestone_width: f64,
    /// Lower bound on a bar's width.
    pub min_bar_width: f64,
}

impl TrackMetrics {
    /// Height of a track holding `rows` rows.
    ///
    /// `rows * event_height + (rows - 1) * row_gap + track_padding`, floored
    /// at the minimum track height. Zero rows are treated as one.
    #[must_use]
    pub fn track_height(&self, rows: usize) -> f64 {
        let rows = rows.max(1) as f64;
        let content = rows * self.event_height + (rows - 1.0) * self.row_gap;
        (content + self.track_padding).max(self.min_track_height)
    }

    /// Vertical distance between the tops of consecutive rows.
    #[must_use]
    pub fn row_pitch(&self) -> f64 {
        self.event_height + self.row_gap
    }
}
