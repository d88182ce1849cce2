// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Gesture: pointer interaction on a timeline canvas.
//!
//! [`InteractionMachine`] consumes `down`/`move`/`up` pointer events and turns
//! them into one of five gestures, see [`Interaction`]:
//!
//! - **Pan**: dragging empty canvas scrolls it.
//! - **Move**: dragging an event body shifts its interval and changes its row.
//!   Children stay inside their parent, milestones inside their sub-event.
//! - **Resize start / end**: dragging an edge handle moves one bound, clamped
//!   to the parent and never inverting the interval.
//!
//! While a move or resize is in flight the committed timeline is untouched;
//! the provisional event lives in a [`PendingEdit`] that renderers read through
//! [`InteractionMachine::view`]. A move onto a row slot that already holds an
//! overlapping event is flagged [`DropValidity::Collides`] and discarded on
//! release. Accepted drops come back as a [`CommitBatch`] to apply atomically;
//! moving an event with descendants shifts all of them by the same amount.
//!
//! A release within [`InteractionConfig::click_tolerance`] of the press is a
//! click instead: it selects the event (or clears the selection on canvas) and
//! edits nothing.
//!
//! [`InteractionMachine::cancel`] aborts a gesture, for hosts that bind it to
//! Escape.
//!
//! ## Minimal example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use kurbo::{Point, Vec2};
//! use strata_gesture::{DragContext, DragHandle, InteractionMachine, PointerTarget, Release};
//! use strata_model::{Event, EventId, Timeline};
//! use strata_tracks::{LayoutConfig, TrackLayout};
//! use strata_view::TimeAxis;
//!
//! let start = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
//! let end = Utc.with_ymd_and_hms(2021, 1, 10, 0, 0, 0).unwrap();
//! let id = EventId::from_u128(1);
//! let timeline = Timeline::from_events("demo", vec![Event::stage(id, "A", None, start, end)]);
//! let hierarchy = timeline.hierarchy();
//! let layout = TrackLayout::compute(timeline.events(), 10.0, &LayoutConfig::default());
//! let ctx = DragContext {
//!     timeline: &timeline,
//!     hierarchy: &hierarchy,
//!     layout: &layout,
//!     axis: TimeAxis::new(start, 10.0),
//! };
//!
//! let mut machine = InteractionMachine::default();
//! let target = PointerTarget::Event(id, DragHandle::Body);
//! machine.pointer_down(Point::new(50.0, 60.0), target, Vec2::ZERO, &ctx);
//! machine.pointer_move(Point::new(80.0, 60.0), &ctx);
//!
//! let Release::Commit(batch) = machine.pointer_up(Point::new(80.0, 60.0), &ctx) else {
//!     unreachable!();
//! };
//! // 30px at 10px/day is three days.
//! assert_eq!(batch.edited.start, Utc.with_ymd_and_hms(2021, 1, 4, 0, 0, 0).unwrap());
//! ```

mod config;
mod edit;
mod hover;
mod machine;
mod pointer;

pub use config::InteractionConfig;
pub use edit::{CommitBatch, DropValidity, EventView, PendingEdit};
pub use hover::HoverLatch;
pub use machine::{Cancel, CursorHint, Drag, DragContext, DragOrigin, Interaction, InteractionMachine, Motion, Release};
pub use pointer::{DragHandle, PointerTarget, PointerTrack};
