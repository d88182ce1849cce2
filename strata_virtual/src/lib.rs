// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Virtual: horizontal virtualization for timeline canvases.
//!
//! A timeline can span centuries at hundreds of pixels per day, so only the
//! slice around the viewport is realized. [`Virtualizer`] widens the viewport
//! by a fixed buffer on each side (see [`VirtualizeConfig`]) and keeps:
//!
//! - events whose pixel interval intersects that span, and
//! - date-axis labels for the matching date range, at a granularity chosen
//!   from the zoom (see [`LabelGranularity`]).
//!
//! [`Virtualizer::set_render_all`] bypasses both filters, for exporting the
//! whole canvas.
//!
//! ## Minimal example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use strata_model::{Event, EventId};
//! use strata_view::{TimeAxis, TimelineBounds};
//! use strata_virtual::{LabelGranularity, Virtualizer};
//!
//! let origin = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
//! let bounds = TimelineBounds::with_override(origin, 3650);
//! let axis = TimeAxis::new(bounds.min, 10.0);
//!
//! let near = Utc.with_ymd_and_hms(2022, 1, 10, 0, 0, 0).unwrap();
//! let far = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
//! let events = [
//!     Event::milestone(EventId::from_u128(1), "near", None, near),
//!     Event::milestone(EventId::from_u128(2), "far", None, far),
//! ];
//!
//! let virt = Virtualizer::default();
//! let visible = virt.visible_events(&events, &axis, 0.0, 1200.0);
//! assert_eq!(visible.len(), 1);
//!
//! let labels = virt.labels(&bounds, &axis, 0.0, 1200.0);
//! assert_eq!(labels[0].text, "Jan 2022");
//! assert_eq!(labels[0].granularity, LabelGranularity::Month);
//! ```

mod labels;
mod span;

pub use labels::{
    DAY_LABELS_FROM, DateLabel, LabelGranularity, MONTH_LABELS_FROM, WEEK_LABELS_FROM, date_labels, year_step,
};
pub use span::{VirtualizeConfig, VisibleSpan, Virtualizer, compute_visible_span};
