// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};
use strata_gesture::{CursorHint, DragHandle, PointerTarget};
use strata_model::{EventId, TrackId};
use strata_virtual::DateLabel;

/// Width, in pixels, of the resize handle at each end of a bar.
pub const RESIZE_HANDLE_WIDTH: f64 = 10.0;

/// Where and how to draw one event.
#[derive(Clone, Debug, PartialEq)]
pub struct EventGeometry {
    /// The event.
    pub id: EventId,
    /// Track it is drawn in.
    pub track: TrackId,
    /// Row within the track.
    pub row: usize,
    /// Content-space rectangle.
    pub rect: Rect,
    /// `false` while a drag would be rejected if released here.
    pub is_valid_drop: bool,
    /// `true` for the event being moved or resized.
    pub is_dragging: bool,
    /// `true` for the selected event.
    pub is_selected: bool,
    /// `true` when another event is selected and this one is not related to it.
    pub dimmed: bool,
}

/// Vertical extent of one track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackGeometry {
    /// The track.
    pub track: TrackId,
    /// Content-space top.
    pub y: f64,
    /// Pixel height.
    pub height: f64,
    /// Row count.
    pub rows: usize,
}

/// Everything a presentation layer needs to draw one frame.
///
/// Rectangles and label positions are in content space; subtract
/// [`scroll`](Self::scroll) to get view coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPlan {
    /// Realized events, epochs first and milestones last.
    pub events: Vec<EventGeometry>,
    /// All four tracks, top to bottom.
    pub tracks: Vec<TrackGeometry>,
    /// Realized date-axis labels.
    pub labels: Vec<DateLabel>,
    /// Size of the scrollable content.
    pub content_size: Size,
    /// Content offset at the viewport's top-left corner.
    pub scroll: Vec2,
    /// Cursor for the active gesture.
    pub cursor: CursorHint,
    /// `true` when zoomed out to the compact preset.
    pub compact: bool,
}

impl RenderPlan {
    /// Geometry of `id`, if it is realized.
    #[must_use]
    pub fn event(&self, id: &EventId) -> Option<&EventGeometry> {
        self.events.iter().find(|e| e.id == *id)
    }

    /// Resolves a view-relative position to a pointer target.
    ///
    /// Later events are drawn on top, so they win. Within a bar, the outer
    /// [`RESIZE_HANDLE_WIDTH`] pixels at each end are resize handles; bars too
    /// narrow for both handles and a body, and milestones, are all body.
    #[must_use]
    pub fn hit_test(&self, view_pos: Point) -> PointerTarget {
        let pos = view_pos + self.scroll;
        let Some(hit) = self.events.iter().rev().find(|e| e.rect.contains(pos)) else {
            return PointerTarget::Canvas;
        };
        let handle = if hit.track == TrackId::Milestone || hit.rect.width() <= 3.0 * RESIZE_HANDLE_WIDTH {
            DragHandle::Body
        } else if pos.x < hit.rect.x0 + RESIZE_HANDLE_WIDTH {
            DragHandle::StartEdge
        } else if pos.x >= hit.rect.x1 - RESIZE_HANDLE_WIDTH {
            DragHandle::EndEdge
        } else {
            DragHandle::Body
        };
        PointerTarget::Event(hit.id, handle)
    }
}
