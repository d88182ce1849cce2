// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strata_model::Event;
use strata_view::{TimeAxis, TimelineBounds};

use crate::labels::{DateLabel, date_labels};

/// Tunables for virtualization.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VirtualizeConfig {
    /// Off-screen distance, in pixels, kept realized on each side.
    pub buffer: f64,
}

impl Default for VirtualizeConfig {
    fn default() -> Self {
        Self { buffer: 1000.0 }
    }
}

/// Horizontal pixel range in which content is realized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleSpan {
    /// Left edge, in content pixels.
    pub min_x: f64,
    /// Right edge, in content pixels.
    pub max_x: f64,
}

impl VisibleSpan {
    /// A span that realizes everything.
    pub const ALL: Self = Self {
        min_x: f64::NEG_INFINITY,
        max_x: f64::INFINITY,
    };

    /// Returns `true` if the pixel interval `[x0, x1]` intersects the span:
    /// `x1 > min_x && x0 < max_x`.
    #[must_use]
    pub fn intersects(&self, x0: f64, x1: f64) -> bool {
        x1 > self.min_x && x0 < self.max_x
    }
}

/// Computes the realized span for a scroll position:
/// `[scroll_x - buffer, scroll_x + view_width + buffer]`.
#[must_use]
pub fn compute_visible_span(scroll_x: f64, view_width: f64, buffer: f64) -> VisibleSpan {
    VisibleSpan {
        min_x: scroll_x - buffer,
        max_x: scroll_x + view_width + buffer,
    }
}

/// Decides which events and date labels to realize for a scroll position.
///
/// With [`Virtualizer::set_render_all`] every event and the labels for the
/// whole timeline are realized regardless of scroll, for whole-canvas export.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Virtualizer {
    config: VirtualizeConfig,
    render_all: bool,
}

impl Virtualizer {
    /// Creates a virtualizer.
    #[must_use]
    pub fn new(config: VirtualizeConfig) -> Self {
        Self {
            config,
            render_all: false,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &VirtualizeConfig {
        &self.config
    }

    /// Returns `true` if virtualization is bypassed.
    #[must_use]
    pub fn render_all(&self) -> bool {
        self.render_all
    }

    /// Bypasses (or restores) virtualization.
    pub fn set_render_all(&mut self, render_all: bool) {
        self.render_all = render_all;
    }

    /// The realized span for a scroll position.
    #[must_use]
    pub fn span(&self, scroll_x: f64, view_width: f64) -> VisibleSpan {
        if self.render_all {
            VisibleSpan::ALL
        } else {
            compute_visible_span(scroll_x, view_width, self.config.buffer)
        }
    }

    /// Events whose pixel interval intersects the realized span, in input order.
    #[must_use]
    pub fn visible_events<'a>(
        &self,
        events: &'a [Event],
        axis: &TimeAxis,
        scroll_x: f64,
        view_width: f64,
    ) -> Vec<&'a Event> {
        if self.render_all {
            return events.iter().collect();
        }
        let span = self.span(scroll_x, view_width);
        let visible: Vec<&Event> = events
            .iter()
            .filter(|e| span.intersects(axis.x_of(e.start), axis.x_of(e.end)))
            .collect();
        tracing::trace!(total = events.len(), visible = visible.len(), "virtualized events");
        visible
    }

    /// Date range that needs axis labels, or `None` when it is empty.
    ///
    /// The realized span, floored at pixel 0, converted to dates and clamped
    /// to `bounds`. `axis` must be anchored at `bounds.min`.
    #[must_use]
    pub fn label_range(
        &self,
        bounds: &TimelineBounds,
        axis: &TimeAxis,
        scroll_x: f64,
        view_width: f64,
    ) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let (from, to) = if self.render_all {
            (bounds.min, bounds.max)
        } else {
            let start_px = (scroll_x - self.config.buffer).max(0.0);
            let end_px = scroll_x + view_width + self.config.buffer;
            (
                axis.date_at(start_px).clamp(bounds.min, bounds.max),
                axis.date_at(end_px).clamp(bounds.min, bounds.max),
            )
        };
        (from < to).then_some((from, to))
    }

    /// Axis labels for the realized part of the timeline.
    #[must_use]
    pub fn labels(
        &self,
        bounds: &TimelineBounds,
        axis: &TimeAxis,
        scroll_x: f64,
        view_width: f64,
    ) -> Vec<DateLabel> {
        self.label_range(bounds, axis, scroll_x, view_width)
            .map(|(from, to)| date_labels(from, to, axis))
            .unwrap_or_default()
    }
}
