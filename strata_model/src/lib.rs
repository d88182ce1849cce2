// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Model: the timeline document and its events.
//!
//! A [`Timeline`] owns a flat list of [`Event`]s that form a shallow tree
//! through `parent_id` back-references:
//!
//! - **Epochs** (`is_parent`) sit at the top.
//! - **Stages** and **sucesos** (`type == "event"`) live inside epochs.
//! - **Milestones** (`is_milestone`, `start == end`) attach to stages or sucesos.
//!
//! Each event is laid out in one of four fixed lanes, see [`TrackId`] and
//! [`Event::track`].
//!
//! Besides the document itself this crate carries the pieces that only need
//! the event list:
//!
//! - [`HierarchyIndex`]: children adjacency, descendants, ancestors, and the
//!   related set used to highlight a selection's lineage.
//! - [`EventFilter`]: visibility by lane, tag, and location.
//! - [`Playback`]: presentation mode sequencing.
//! - [`THEMES`] and [`ThemeStore`]: color themes as CSS custom properties.
//! - [`TimelineStore`]: the persistence seam, with an in-memory [`MemoryStore`].
//!
//! ## Minimal example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use strata_model::{SubEventKind, Timeline};
//!
//! let mut timeline = Timeline::new("Life");
//! let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
//! let end = Utc.with_ymd_and_hms(2020, 12, 31, 0, 0, 0).unwrap();
//!
//! let epoch = timeline.add_epoch("University", start, end).unwrap();
//! let stage = timeline.add_sub_event(epoch, SubEventKind::Stage, "Year 1").unwrap();
//! timeline.add_milestone(stage, "Enrolled").unwrap();
//!
//! // Deleting an epoch removes everything inside it.
//! let removed = timeline.remove_cascade(&epoch).unwrap();
//! assert_eq!(removed.len(), 3);
//! assert!(timeline.is_empty());
//! ```

mod error;
mod event;
mod filter;
mod hierarchy;
mod id;
mod playback;
mod store;
mod theme;
mod timeline;

pub use error::{ModelError, StoreError};
pub use event::{Event, EventKind, GeoPoint, TrackId, intervals_overlap, shift_saturating};
pub use filter::{EventFilter, all_locations, all_tags};
pub use hierarchy::HierarchyIndex;
pub use id::{EventId, TimelineId};
pub use playback::{Playback, PlaybackConfig};
pub use store::{MemoryStore, TimelineStore};
pub use theme::{THEMES, Theme, ThemeStore, ThemeVars, default_theme, theme_by_id};
pub use timeline::{DEFAULT_THEME_ID, SubEventKind, Timeline, TimelineMetadata};
