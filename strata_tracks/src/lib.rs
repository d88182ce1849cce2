// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Tracks: lanes and rows for timeline events.
//!
//! Every event belongs to one of four fixed tracks (see
//! [`strata_model::TrackId`]). Within a track, [`TrackLayout`] assigns each
//! event a row so that bars sharing a row do not overlap in time, and derives
//! the pixel height and vertical offset of every track.
//!
//! Pixel constants live in [`LayoutConfig`]; a compact preset with shorter bars
//! applies when zoomed far out.
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use strata_model::{Event, EventId, TrackId};
//! use strata_tracks::{LayoutConfig, TrackLayout};
//!
//! let start = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
//! let end = Utc.with_ymd_and_hms(2021, 1, 10, 0, 0, 0).unwrap();
//! let events = [
//!     Event::stage(EventId::from_u128(1), "A", None, start, end),
//!     Event::stage(EventId::from_u128(2), "B", None, start, end),
//! ];
//!
//! let layout = TrackLayout::compute(&events, 10.0, &LayoutConfig::default());
//! assert_eq!(layout.row_of(&EventId::from_u128(1)), Some(0));
//! assert_eq!(layout.row_of(&EventId::from_u128(2)), Some(1));
//! assert_eq!(layout.track_rows(TrackId::Stage), 2);
//! ```

mod layout;
mod metrics;

pub use layout::{RowSlot, TrackLayout};
pub use metrics::{LayoutConfig, TrackMetrics};
