// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::{DateTime, Utc};
use kurbo::{Size, Vec2};
use serde::{Deserialize, Serialize};

use crate::axis::TimeAxis;
use crate::bounds::TimelineBounds;

/// Zoom limits and wheel behavior.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportConfig {
    /// Lowest zoom, in pixels per day.
    pub min_pixels_per_day: f64,
    /// Highest zoom, in pixels per day.
    pub max_pixels_per_day: f64,
    /// Zoom factor for one wheel notch towards the user (zoom in).
    pub wheel_zoom_in: f64,
    /// Zoom factor for one wheel notch away from the user (zoom out).
    pub wheel_zoom_out: f64,
    /// Distance from the left edge, in pixels, at which
    /// [`TimelineViewport::reveal`] places a date.
    pub reveal_margin: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_pixels_per_day: 0.05,
            max_pixels_per_day: 500.0,
            wheel_zoom_in: 1.1,
            wheel_zoom_out: 0.9,
            reveal_margin: 50.0,
        }
    }
}

/// A date held under a view-relative x position across a zoom change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomFocus {
    /// Date that was under the pointer.
    pub date: DateTime<Utc>,
    /// Pointer x, relative to the viewport's left edge.
    pub view_x: f64,
}

/// Scrollable window onto a timeline.
///
/// The content is `bounds.width(pixels_per_day)` pixels wide and
/// [`content_height`](Self::content_height) pixels tall; `scroll` is the
/// content offset at the viewport's top-left corner, kept inside
/// `[0, content - view]` on each axis the way a scroll container does.
///
/// Zooming changes `pixels_per_day`, which usually changes the bounds too.
/// The zoom methods therefore remember the date under the pointer as a
/// [`ZoomFocus`]; the next [`set_bounds`](Self::set_bounds) re-applies it so
/// that date stays under the pointer once the new bounds are known.
#[derive(Clone, Debug)]
pub struct TimelineViewport {
    bounds: TimelineBounds,
    pixels_per_day: f64,
    view_size: Size,
    content_height: f64,
    scroll: Vec2,
    config: ViewportConfig,
    pending_focus: Option<ZoomFocus>,
}

impl TimelineViewport {
    /// Creates a viewport at scroll `(0, 0)`.
    ///
    /// The zoom is clamped into the configured limits.
    #[must_use]
    pub fn new(config: ViewportConfig, bounds: TimelineBounds, view_size: Size, pixels_per_day: f64) -> Self {
        let mut viewport = Self {
            bounds,
            pixels_per_day: 1.0,
            view_size,
            content_height: 0.0,
            scroll: Vec2::ZERO,
            config,
            pending_focus: None,
        };
        viewport.pixels_per_day = viewport.clamp_zoom(pixels_per_day);
        viewport
    }

    /// Current time axis: bounds origin and zoom.
    #[must_use]
    pub fn axis(&self) -> TimeAxis {
        TimeAxis::new(self.bounds.min, self.pixels_per_day)
    }

    /// Current bounds.
    #[must_use]
    pub fn bounds(&self) -> TimelineBounds {
        self.bounds
    }

    /// Current zoom, in pixels per day.
    #[must_use]
    pub fn pixels_per_day(&self) -> f64 {
        self.pixels_per_day
    }

    /// Current scroll offset.
    #[must_use]
    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// Viewport size in pixels.
    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Full content size in pixels.
    #[must_use]
    pub fn content_size(&self) -> Size {
        Size::new(self.bounds.width(self.pixels_per_day), self.content_height)
    }

    /// Total content height, as computed by the track layout.
    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    /// Focus waiting for the next [`set_bounds`](Self::set_bounds).
    #[must_use]
    pub fn pending_focus(&self) -> Option<ZoomFocus> {
        self.pending_focus
    }

    /// Resizes the viewport.
    pub fn set_view_size(&mut self, size: Size) {
        if self.view_size == size {
            return;
        }
        self.view_size = size;
        self.clamp_scroll();
    }

    /// Sets the content height.
    pub fn set_content_height(&mut self, height: f64) {
        self.content_height = height.max(0.0);
        self.clamp_scroll();
    }

    /// Installs freshly computed bounds.
    ///
    /// A pending zoom focus is resolved against the new origin:
    /// `scroll.x = x(focus.date) - focus.view_x`.
    pub fn set_bounds(&mut self, bounds: TimelineBounds) {
        self.bounds = bounds;
        if let Some(focus) = self.pending_focus.take() {
            self.scroll.x = self.axis().x_of(focus.date) - focus.view_x;
            tracing::trace!(scroll_x = self.scroll.x, "re-anchored zoom focus");
        }
        self.clamp_scroll();
    }

    /// Sets the scroll offset.
    pub fn set_scroll(&mut self, scroll: Vec2) {
        self.scroll = scroll;
        self.clamp_scroll();
    }

    /// Scrolls by `delta` pixels.
    pub fn scroll_by(&mut self, delta: Vec2) {
        self.set_scroll(self.scroll + delta);
    }

    /// Date under a view-relative x position.
    #[must_use]
    pub fn date_at_view_x(&self, view_x: f64) -> DateTime<Utc> {
        self.axis().date_at(self.scroll.x + view_x)
    }

    /// View-relative x position of `date`.
    #[must_use]
    pub fn view_x_of(&self, date: DateTime<Utc>) -> f64 {
        self.axis().x_of(date) - self.scroll.x
    }

    /// Dates at the left and right edges of the viewport.
    #[must_use]
    pub fn visible_dates(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.date_at_view_x(0.0), self.date_at_view_x(self.view_size.width))
    }

    /// Sets the zoom, keeping the date under `view_x` in place.
    ///
    /// Returns `false` if the clamped zoom equals the current one.
    pub fn set_zoom_about_view_point(&mut self, view_x: f64, pixels_per_day: f64) -> bool {
        let new_ppd = self.clamp_zoom(pixels_per_day);
        if (new_ppd - self.pixels_per_day).abs() < f64::EPSILON {
            return false;
        }
        let focus = ZoomFocus {
            date: self.date_at_view_x(view_x),
            view_x,
        };
        tracing::debug!(from = self.pixels_per_day, to = new_ppd, view_x, "zoom");
        self.pixels_per_day = new_ppd;
        // Anchor against the current origin for now; set_bounds corrects it.
        self.scroll.x = self.axis().x_of(focus.date) - view_x;
        self.pending_focus = Some(focus);
        self.clamp_scroll();
        true
    }

    /// Multiplies the zoom by `factor` about `view_x`.
    pub fn zoom_about_view_point(&mut self, view_x: f64, factor: f64) -> bool {
        if !(factor.is_finite() && factor > 0.0) {
            return false;
        }
        self.set_zoom_about_view_point(view_x, self.pixels_per_day * factor)
    }

    /// Applies one wheel notch at `view_x`.
    ///
    /// Positive `delta_y` (scrolling down) zooms out.
    pub fn wheel_zoom(&mut self, view_x: f64, delta_y: f64) -> bool {
        let factor = if delta_y > 0.0 {
            self.config.wheel_zoom_out
        } else {
            self.config.wheel_zoom_in
        };
        self.zoom_about_view_point(view_x, factor)
    }

    /// Scrolls so that `date` sits at the horizontal centre of the viewport.
    pub fn center_on(&mut self, date: DateTime<Utc>) {
        self.scroll.x = self.axis().x_of(date) - self.view_size.width / 2.0;
        self.clamp_scroll();
    }

    /// Scrolls so that `date` sits [`ViewportConfig::reveal_margin`] pixels
    /// from the left edge.
    pub fn reveal(&mut self, date: DateTime<Utc>) {
        self.scroll.x = self.axis().x_of(date) - self.config.reveal_margin;
        self.clamp_scroll();
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> TimelineViewportDebugInfo {
        let (first_visible, last_visible) = self.visible_dates();
        TimelineViewportDebugInfo {
            bounds: self.bounds,
            pixels_per_day: self.pixels_per_day,
            compact: self.axis().is_compact(),
            view_size: self.view_size,
            content_size: self.content_size(),
            scroll: self.scroll,
            first_visible,
            last_visible,
            pending_focus: self.pending_focus,
        }
    }

    fn clamp_zoom(&self, pixels_per_day: f64) -> f64 {
        let (lo, hi) = if self.config.min_pixels_per_day <= self.config.max_pixels_per_day {
            (self.config.min_pixels_per_day, self.config.max_pixels_per_day)
        } else {
            (self.config.max_pixels_per_day, self.config.min_pixels_per_day)
        };
        if pixels_per_day.is_nan() {
            return self.pixels_per_day.clamp(lo, hi);
        }
        pixels_per_day.clamp(lo, hi)
    }

    fn clamp_scroll(&mut self) {
        let content = self.content_size();
        let max_x = (content.width - self.view_size.width).max(0.0);
        let max_y = (content.height - self.view_size.height).max(0.0);
        let x = if self.scroll.x.is_finite() { self.scroll.x } else { 0.0 };
        let y = if self.scroll.y.is_finite() { self.scroll.y } else { 0.0 };
        self.scroll = Vec2::new(x.clamp(0.0, max_x), y.clamp(0.0, max_y));
    }
}

/// Debug snapshot of a [`TimelineViewport`].
#[derive(Clone, Debug)]
pub struct TimelineViewportDebugInfo {
    /// Current bounds.
    pub bounds: TimelineBounds,
    /// Current zoom.
    pub pixels_per_day: f64,
    /// Whether compact presets apply.
    pub compact: bool,
    /// Viewport size.
    pub view_size: Size,
    /// Content size.
    pub content_size: Size,
    /// Scroll offset.
    pub scroll: Vec2,
    /// Date at the left edge.
    pub first_visible: DateTime<Utc>,
    /// Date at the right edge.
    pub last_visible: DateTime<Utc>,
    /// Focus waiting for new bounds.
    pub pending_focus: Option<ZoomFocus>,
}
