// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata: a headless, interactive timeline canvas.
//!
//! [`TimelineCanvas`] composes the Strata crates into one engine:
//!
//! - [`model`]: events, timelines, the hierarchy index, filters, playback,
//!   themes, and persistence.
//! - [`view`]: date/pixel mapping, bounds, and the pan/zoom viewport.
//! - [`tracks`]: track classification and row stacking.
//! - [`gesture`]: the pointer state machine with pending edits and commits.
//! - [`virtual_span`]: realizing only the slice around the viewport.
//!
//! A host feeds the canvas pointer and wheel input, draws the
//! [`RenderPlan`] it returns, and saves the timeline whenever its revision
//! settles. Nothing here draws, blocks, or spawns.
//!
//! ## Minimal example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use kurbo::{Point, Size};
//! use strata::gesture::{DragHandle, PointerTarget, Release};
//! use strata::model::{SubEventKind, Timeline};
//! use strata::{EngineConfig, TimelineCanvas};
//!
//! let day = |m, d| Utc.with_ymd_and_hms(2024, m, d, 0, 0, 0).unwrap();
//! let mut canvas = TimelineCanvas::new(
//!     Timeline::new("Projects"),
//!     EngineConfig::default(),
//!     Size::new(1200.0, 600.0),
//!     day(1, 1),
//!     10.0,
//! );
//! let epoch = canvas.add_epoch("2024", day(1, 1), day(12, 31)).unwrap();
//! let stage = canvas.add_sub_event(epoch, SubEventKind::Stage, "Build").unwrap();
//!
//! // Drag the stage's start edge 50px right: 5 days at 10px/day.
//! let bar = canvas.render_plan().event(&stage).unwrap().rect;
//! let press = Point::new(bar.x0 - canvas.viewport().scroll().x + 2.0, bar.center().y);
//! canvas.pointer_down(press, PointerTarget::Event(stage, DragHandle::StartEdge));
//! canvas.pointer_move(press + (50.0, 0.0));
//! let release = canvas.pointer_up(press + (50.0, 0.0)).unwrap();
//!
//! assert!(matches!(release, Release::Commit(_)));
//! assert_eq!(canvas.timeline().get(&stage).unwrap().start, day(1, 6));
//! ```

mod canvas;
mod config;
mod plan;
mod selection;

pub use strata_gesture as gesture;
pub use strata_model as model;
pub use strata_tracks as tracks;
pub use strata_view as view;
pub use strata_virtual as virtual_span;

pub use canvas::{TimelineCanvas, align_comparison};
pub use config::{ConfigError, EngineConfig};
pub use plan::{EventGeometry, RESIZE_HANDLE_WIDTH, RenderPlan, TrackGeometry};
pub use selection::EventSelection;
