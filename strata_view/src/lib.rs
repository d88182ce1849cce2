// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata View: time axis, bounds, and the scrollable timeline viewport.
//!
//! This crate provides small, headless models of a horizontal time axis where
//! view extents are expressed in device pixels. It focuses on:
//! - Converting between instants and pixel offsets under a pixels-per-day zoom.
//! - Computing the rendered date range of a set of events.
//! - Scroll + zoom state with pointer-anchored zoom.
//!
//! It does **not** own events, layout, or rendering. Callers are expected to:
//! - Recompute [`TimelineBounds`] whenever events or zoom change, and hand
//!   them to [`TimelineViewport::set_bounds`].
//! - Wire wheel input into [`TimelineViewport::wheel_zoom`] at a higher layer.
//!
//! ## Minimal example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use kurbo::{Size, Vec2};
//! use strata_view::{TimelineBounds, TimelineViewport, ViewportConfig};
//!
//! let origin = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
//! let bounds = TimelineBounds::with_override(origin, 365);
//! let mut view = TimelineViewport::new(ViewportConfig::default(), bounds, Size::new(800.0, 600.0), 100.0);
//! view.set_scroll(Vec2::new(16_200.0, 0.0));
//!
//! // Zoom out to 10 px/day around the pointer at x = 300.
//! let under_pointer = view.date_at_view_x(300.0);
//! view.set_zoom_about_view_point(300.0, 10.0);
//! view.set_bounds(bounds);
//! assert!((view.view_x_of(under_pointer) - 300.0).abs() < 1.0);
//! ```
//!
//! ## Design notes
//!
//! - Instants are `chrono::DateTime<Utc>`; pixel math is `f64` with fractional
//!   days, and pixel-to-date conversion rounds to the millisecond.
//! - Days are fixed 24-hour spans; calendar-aware stepping lives with the
//!   date labels in `strata_virtual`.

mod axis;
mod bounds;
mod viewport;

pub use axis::{
    COMPACT_PIXELS_PER_DAY, MS_PER_DAY, TimeAxis, add_days, millis_between, to_date, to_pixel_x,
};
pub use bounds::{COMPARISON_PADDING_DAYS, MIN_TOTAL_DAYS, TimelineBounds};
pub use viewport::{TimelineViewport, TimelineViewportDebugInfo, ViewportConfig, ZoomFocus};
