// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer tracking: press position, latest position, and click classification.
//!
//! ## Usage
//!
//! 1) Call [`PointerTrack::press`] on pointer-down.
//! 2) On each move, call [`PointerTrack::update`] to get the offset from the press.
//! 3) On release, [`PointerTrack::is_click`] tells a click from a drag.
//! 4) [`PointerTrack::release`] resets the track.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use strata_gesture::PointerTrack;
//!
//! let mut track = PointerTrack::default();
//! track.press(Point::new(10.0, 20.0));
//!
//! assert_eq!(track.update(Point::new(13.0, 24.0)), Some(Vec2::new(3.0, 4.0)));
//! assert!(track.is_click(Point::new(13.0, 24.0), 5.0));
//! assert!(!track.is_click(Point::new(16.0, 20.0), 5.0));
//! ```

use kurbo::{Point, Vec2};
use strata_model::EventId;

/// Part of an event under the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragHandle {
    /// The bar or marker itself.
    Body,
    /// The left edge handle.
    StartEdge,
    /// The right edge handle.
    EndEdge,
}

/// What a pointer-down landed on, as resolved by the host's hit testing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerTarget {
    /// Empty canvas.
    Canvas,
    /// An event, and which part of it.
    Event(EventId, DragHandle),
}

/// Press and latest positions of a pointer gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerTrack {
    /// Position at pointer-down.
    pub press_pos: Option<Point>,
    /// Most recent position.
    pub last_pos: Option<Point>,
}

impl PointerTrack {
    /// Starts tracking from `pos`.
    pub fn press(&mut self, pos: Point) {
        self.press_pos = Some(pos);
        self.last_pos = Some(pos);
    }

    /// Records `pos` and returns the offset from the press position.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        let press = self.press_pos?;
        self.last_pos = Some(pos);
        Some(pos - press)
    }

    /// Offset of `pos` from the press position.
    #[must_use]
    pub fn offset(&self, pos: Point) -> Option<Vec2> {
        self.press_pos.map(|press| pos - press)
    }

    /// Returns `true` if releasing at `pos` is a click: strictly less than
    /// `tolerance` away from the press on both axes. Without a tracked press
    /// nothing is a click.
    #[must_use]
    pub fn is_click(&self, pos: Point, tolerance: f64) -> bool {
        self.offset(pos)
            .is_some_and(|d| d.x.abs() < tolerance && d.y.abs() < tolerance)
    }

    /// Stops tracking.
    pub fn release(&mut self) {
        self.press_pos = None;
        self.last_pos = None;
    }

    /// Returns `true` while a press is being tracked.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.press_pos.is_some()
    }
}
