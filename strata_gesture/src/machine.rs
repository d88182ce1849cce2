// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interaction state machine.
//!
//! One gesture is active at a time. Pointer-down on empty canvas pans, on an
//! event body moves, on an edge handle resizes; pointer-up always returns to
//! [`Interaction::Idle`]. Moves and resizes edit a [`PendingEdit`] and only
//! touch the committed timeline through the [`CommitBatch`] returned on
//! release.

use chrono::{DateTime, TimeDelta, Utc};
use kurbo::{Point, Vec2};
use strata_model::{Event, EventId, HierarchyIndex, Timeline, shift_saturating};
use strata_tracks::TrackLayout;
use strata_view::TimeAxis;

use crate::config::InteractionConfig;
use crate::edit::{CommitBatch, DropValidity, EventView, PendingEdit};
use crate::pointer::{DragHandle, PointerTarget, PointerTrack};

/// Committed state a gesture reads from.
#[derive(Clone, Copy, Debug)]
pub struct DragContext<'a> {
    /// The committed events.
    pub timeline: &'a Timeline,
    /// Adjacency index over `timeline`, used to cascade start changes.
    pub hierarchy: &'a HierarchyIndex,
    /// Row assignment of `timeline` at the current zoom.
    pub layout: &'a TrackLayout,
    /// Current time axis. Only the zoom matters for drags.
    pub axis: TimeAxis,
}

/// Snapshot taken at pointer-down on an event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragOrigin {
    /// Pointer position at pointer-down.
    pub pointer: Point,
    /// Event start at pointer-down.
    pub start: DateTime<Utc>,
    /// Event end at pointer-down.
    pub end: DateTime<Utc>,
    /// Row the event occupied at pointer-down.
    pub row: usize,
}

/// An in-flight edit of one event.
#[derive(Clone, Debug, PartialEq)]
pub struct Drag {
    /// Where the gesture started.
    pub origin: DragOrigin,
    /// The provisional event.
    pub edit: PendingEdit,
}

/// The active gesture.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Interaction {
    /// No gesture.
    #[default]
    Idle,
    /// Dragging the canvas.
    Panning {
        /// Pointer position at pointer-down.
        pointer: Point,
        /// Scroll offset at pointer-down.
        scroll: Vec2,
    },
    /// Dragging an event body: shifts the interval and changes row.
    Moving(Drag),
    /// Dragging an event's start edge.
    ResizingStart(Drag),
    /// Dragging an event's end edge.
    ResizingEnd(Drag),
}

impl Interaction {
    /// The edit in flight, if any.
    #[must_use]
    pub fn drag(&self) -> Option<&Drag> {
        match self {
            Self::Moving(drag) | Self::ResizingStart(drag) | Self::ResizingEnd(drag) => Some(drag),
            Self::Idle | Self::Panning { .. } => None,
        }
    }

    fn drag_mut(&mut self) -> Option<&mut Drag> {
        match self {
            Self::Moving(drag) | Self::ResizingStart(drag) | Self::ResizingEnd(drag) => Some(drag),
            Self::Idle | Self::Panning { .. } => None,
        }
    }

    /// Pointer cursor the host should show.
    #[must_use]
    pub fn cursor(&self) -> CursorHint {
        match self {
            Self::Idle => CursorHint::Default,
            Self::Panning { .. } | Self::Moving(_) => CursorHint::Grabbing,
            Self::ResizingStart(_) | Self::ResizingEnd(_) => CursorHint::ResizeHorizontal,
        }
    }
}

/// Cursor shape for the active gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorHint {
    /// The host's default cursor.
    Default,
    /// A closed hand.
    Grabbing,
    /// A horizontal resize arrow.
    ResizeHorizontal,
}

/// Result of a pointer-move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// No gesture is active, or its event no longer exists.
    Ignored,
    /// The canvas should scroll to this offset.
    Pan(Vec2),
    /// The pending edit changed.
    Edited(DropValidity),
    /// A resize would have inverted the interval; the previous edit stands.
    Held,
}

/// Result of a pointer-up.
#[derive(Clone, Debug, PartialEq)]
pub enum Release {
    /// No gesture was active.
    Ignored,
    /// A pan drag ended.
    PanEnded,
    /// The canvas was clicked: clear the selection.
    ClearSelection,
    /// An event was clicked: select it. Nothing was edited.
    Select(EventId),
    /// A drop was accepted and these changes should be applied together.
    Commit(CommitBatch),
    /// A drag ended where it started.
    Unchanged(EventId),
    /// A drop landed on an occupied slot and was discarded.
    Rejected {
        /// The dragged event.
        id: EventId,
        /// The event it collided with.
        collision: EventId,
    },
}

/// Result of [`InteractionMachine::cancel`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cancel {
    /// No gesture was active.
    Idle,
    /// A pan was aborted; restore this scroll offset.
    RestoreScroll(Vec2),
    /// The pending edit of this event was dropped.
    Discarded(EventId),
}

/// Turns a pointer stream into pans, edits, clicks, and commits.
#[derive(Clone, Debug, Default)]
pub struct InteractionMachine {
    config: InteractionConfig,
    pointer: PointerTrack,
    state: Interaction,
}

impl InteractionMachine {
    /// Creates an idle machine.
    #[must_use]
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            pointer: PointerTrack::default(),
            state: Interaction::Idle,
        }
    }

    /// Interaction tunables.
    #[must_use]
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// The active gesture.
    #[must_use]
    pub fn state(&self) -> &Interaction {
        &self.state
    }

    /// Returns `true` when no gesture is active.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.state, Interaction::Idle)
    }

    /// The pending edit, if a move or resize is in flight.
    #[must_use]
    pub fn pending(&self) -> Option<&PendingEdit> {
        self.state.drag().map(|d| &d.edit)
    }

    /// How `event` should be drawn: its pending copy while it is being edited.
    #[must_use]
    pub fn view<'a>(&'a self, event: &'a Event) -> EventView<'a> {
        match self.pending() {
            Some(edit) if edit.event.id == event.id => EventView::Pending(edit),
            _ => EventView::Committed(event),
        }
    }

    /// Starts a gesture. Returns `false`, leaving the machine untouched, if a
    /// gesture is already active or the target event does not exist.
    ///
    /// `scroll` is the canvas scroll offset, restored if a pan is cancelled.
    pub fn pointer_down(&mut self, pos: Point, target: PointerTarget, scroll: Vec2, ctx: &DragContext<'_>) -> bool {
        if !self.is_idle() {
            return false;
        }
        let state = match target {
            PointerTarget::Canvas => Interaction::Panning { pointer: pos, scroll },
            PointerTarget::Event(id, handle) => {
                let Some(event) = ctx.timeline.get(&id) else {
                    tracing::debug!(%id, "pointer-down on unknown event");
                    return false;
                };
                let drag = Drag {
                    origin: DragOrigin {
                        pointer: pos,
                        start: event.start,
                        end: event.end,
                        row: ctx
                            .layout
                            .row_of(&id)
                            .or_else(|| event.row_hint())
                            .unwrap_or(0),
                    },
                    edit: PendingEdit::new(event),
                };
                // Milestones have no extent to resize.
                match handle {
                    _ if event.is_milestone => Interaction::Moving(drag),
                    DragHandle::Body => Interaction::Moving(drag),
                    DragHandle::StartEdge => Interaction::ResizingStart(drag),
                    DragHandle::EndEdge => Interaction::ResizingEnd(drag),
                }
            }
        };
        tracing::debug!(?target, x = pos.x, y = pos.y, "gesture started");
        self.pointer.press(pos);
        self.state = state;
        true
    }

    /// Advances the active gesture to `pos`.
    pub fn pointer_move(&mut self, pos: Point, ctx: &DragContext<'_>) -> Motion {
        let Some(offset) = self.pointer.update(pos) else {
            return Motion::Ignored;
        };
        let config = self.config;
        match &mut self.state {
            Interaction::Idle => Motion::Ignored,
            Interaction::Panning { scroll, .. } => Motion::Pan(*scroll - offset),
            Interaction::Moving(drag) => move_event(drag, offset, ctx, &config),
            Interaction::ResizingStart(drag) => resize_start(drag, offset, ctx),
            Interaction::ResizingEnd(drag) => resize_end(drag, offset, ctx),
        }
    }

    /// Ends the active gesture at `pos` and returns to idle.
    pub fn pointer_up(&mut self, pos: Point, ctx: &DragContext<'_>) -> Release {
        let is_click = self.pointer.is_click(pos, self.config.click_tolerance);
        self.pointer.release();
        let state = core::mem::take(&mut self.state);

        let (drag, shifts_children) = match state {
            Interaction::Idle => return Release::Ignored,
            Interaction::Panning { .. } => {
                return if is_click {
                    Release::ClearSelection
                } else {
                    Release::PanEnded
                };
            }
            Interaction::Moving(drag) | Interaction::ResizingStart(drag) => (drag, true),
            Interaction::ResizingEnd(drag) => (drag, false),
        };

        let edit = drag.edit;
        let id = edit.event.id;
        if is_click {
            return Release::Select(id);
        }
        if let DropValidity::Collides(collision) = edit.validity {
            tracing::debug!(%id, %collision, "drop rejected");
            return Release::Rejected { id, collision };
        }
        if !edit.is_changed() {
            return Release::Unchanged(id);
        }
        let batch = if shifts_children {
            CommitBatch::cascade(&edit, ctx.timeline, ctx.hierarchy)
        } else {
            CommitBatch::single(edit.event)
        };
        tracing::debug!(%id, events = batch.len(), "drop committed");
        Release::Commit(batch)
    }

    /// Aborts the active gesture without committing anything.
    pub fn cancel(&mut self) -> Cancel {
        self.pointer.release();
        match core::mem::take(&mut self.state) {
            Interaction::Idle => Cancel::Idle,
            Interaction::Panning { scroll, .. } => Cancel::RestoreScroll(scroll),
            Interaction::Moving(drag) | Interaction::ResizingStart(drag) | Interaction::ResizingEnd(drag) => {
                let id = drag.edit.event.id;
                tracing::debug!(%id, "gesture cancelled");
                Cancel::Discarded(id)
            }
        }
    }

    /// Re-checks the pending drop against a new layout, e.g. after the
    /// committed timeline changed under an in-flight drag.
    pub fn revalidate(&mut self, ctx: &DragContext<'_>) {
        if let Interaction::Moving(drag) = &mut self.state {
            let event = &drag.edit.event;
            let row = event.row_hint().unwrap_or(drag.origin.row);
            drag.edit.validity = drop_validity(event, row, event.start, event.end, ctx.layout);
        } else if let Some(drag) = self.state.drag_mut() {
            drag.edit.validity = DropValidity::Valid;
        }
    }
}

#[expect(clippy::cast_possible_truncation, reason = "rows are small and floored at zero")]
fn shift_row(row: usize, dy: f64, row_height: f64) -> usize {
    let steps = (dy / row_height).round();
    if !steps.is_finite() {
        return row;
    }
    (row as f64 + steps).max(0.0) as usize
}

fn drop_validity(
    event: &Event,
    row: usize,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    layout: &TrackLayout,
) -> DropValidity {
    if event.is_milestone || event.is_parent {
        return DropValidity::Valid;
    }
    layout
        .find_collision(event.track(), row, start, end, &event.id)
        .map_or(DropValidity::Valid, DropValidity::Collides)
}

fn move_event(drag: &mut Drag, offset: Vec2, ctx: &DragContext<'_>, config: &InteractionConfig) -> Motion {
    let Some(event) = ctx.timeline.get(&drag.edit.event.id) else {
        return Motion::Ignored;
    };
    let parent = event.parent_id.and_then(|p| ctx.timeline.get(&p));
    let shift = ctx.axis.delta_for(offset.x);
    let mut start = shift_saturating(drag.origin.start, shift);
    let mut end = shift_saturating(drag.origin.end, shift);

    if event.is_milestone {
        if let Some(sub) = parent {
            if start < sub.start {
                start = sub.start;
                end = sub.start;
            }
            if start > sub.end {
                start = sub.end;
                end = sub.end;
            }
        }
    } else if let Some(parent) = parent {
        (start, end) = clamp_preserving_duration(start, end, parent);
    }

    let row_height = config.drag_row_height(event.is_parent, ctx.layout.is_compact());
    let row = shift_row(drag.origin.row, offset.y, row_height);
    let validity = drop_validity(event, row, start, end, ctx.layout);

    drag.edit.event = Event {
        start,
        end,
        order: Some(i32::try_from(row).unwrap_or(i32::MAX)),
        ..event.clone()
    };
    drag.edit.validity = validity;
    tracing::trace!(id = %event.id, %start, %end, row, ?validity, "move");
    Motion::Edited(validity)
}

/// Shifts `[start, end]` back inside `parent` without changing its length.
fn clamp_preserving_duration(
    mut start: DateTime<Utc>,
    mut end: DateTime<Utc>,
    parent: &Event,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let duration: TimeDelta = end - start;
    if start < parent.start {
        start = parent.start;
        end = shift_saturating(parent.start, duration);
    }
    if end > parent.end {
        end = parent.end;
        start = shift_saturating(parent.end, -duration);
    }
    (start, end)
}

fn resize_end(drag: &mut Drag, offset: Vec2, ctx: &DragContext<'_>) -> Motion {
    let Some(event) = ctx.timeline.get(&drag.edit.event.id) else {
        return Motion::Ignored;
    };
    let mut end = shift_saturating(drag.origin.end, ctx.axis.delta_for(offset.x));
    if let Some(parent) = event.parent_id.and_then(|p| ctx.timeline.get(&p)) {
        end = end.min(parent.end);
    }
    if end <= drag.origin.start {
        return Motion::Held;
    }
    drag.edit.event = Event {
        end,
        ..event.clone()
    };
    tracing::trace!(id = %event.id, %end, "resize end");
    Motion::Edited(drag.edit.validity)
}

fn resize_start(drag: &mut Drag, offset: Vec2, ctx: &DragContext<'_>) -> Motion {
    let Some(event) = ctx.timeline.get(&drag.edit.event.id) else {
        return Motion::Ignored;
    };
    let mut start = shift_saturating(drag.origin.start, ctx.axis.delta_for(offset.x));
    if let Some(parent) = event.parent_id.and_then(|p| ctx.timeline.get(&p)) {
        start = start.max(parent.start);
    }
    if start >= drag.origin.end {
        return Motion::Held;
    }
    drag.edit.event = Event {
        start,
        ..event.clone()
    };
    tracing::trace!(id = %event.id, %start, "resize start");
    Motion::Edited(drag.edit.validity)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use strata_tracks::LayoutConfig;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn id(n: u128) -> EventId {
        EventId::from_u128(n)
    }

    struct Fixture {
        timeline: Timeline,
        hierarchy: HierarchyIndex,
        layout: TrackLayout,
        axis: TimeAxis,
    }

    impl Fixture {
        fn new(events: Vec<Event>) -> Self {
            let timeline = Timeline::from_events("t", events);
            let hierarchy = timeline.hierarchy();
            let layout = TrackLayout::compute(timeline.events(), 10.0, &LayoutConfig::default());
            Self {
                timeline,
                hierarchy,
                layout,
                axis: TimeAxis::new(day(2020, 1, 1), 10.0),
            }
        }

        fn ctx(&self) -> DragContext<'_> {
            DragContext {
                timeline: &self.timeline,
                hierarchy: &self.hierarchy,
                layout: &self.layout,
                axis: self.axis,
            }
        }
    }

    fn grab(machine: &mut InteractionMachine, f: &Fixture, n: u128, handle: DragHandle) {
        let target = PointerTarget::Event(id(n), handle);
        assert!(machine.pointer_down(Point::new(500.0, 100.0), target, Vec2::ZERO, &f.ctx()));
    }

    #[test]
    fn pan_scrolls_against_the_pointer() {
        let f = Fixture::new(vec![]);
        let mut machine = InteractionMachine::default();
        let scroll = Vec2::new(300.0, 20.0);
        assert!(machine.pointer_down(Point::new(100.0, 100.0), PointerTarget::Canvas, scroll, &f.ctx()));
        assert_eq!(machine.state().cursor(), CursorHint::Grabbing);

        let motion = machine.pointer_move(Point::new(150.0, 90.0), &f.ctx());
        assert_eq!(motion, Motion::Pan(Vec2::new(250.0, 30.0)));
        assert_eq!(machine.pointer_up(Point::new(150.0, 90.0), &f.ctx()), Release::PanEnded);
        assert!(machine.is_idle());
    }

    #[test]
    fn canvas_click_clears_selection() {
        let f = Fixture::new(vec![]);
        let mut machine = InteractionMachine::default();
        machine.pointer_down(Point::new(100.0, 100.0), PointerTarget::Canvas, Vec2::ZERO, &f.ctx());
        assert_eq!(machine.pointer_up(Point::new(102.0, 97.0), &f.ctx()), Release::ClearSelection);
    }

    #[test]
    fn second_press_is_ignored() {
        let f = Fixture::new(vec![Event::stage(id(1), "s", None, day(2020, 2, 1), day(2020, 3, 1))]);
        let mut machine = InteractionMachine::default();
        grab(&mut machine, &f, 1, DragHandle::Body);
        assert!(!machine.pointer_down(Point::ZERO, PointerTarget::Canvas, Vec2::ZERO, &f.ctx()));
        assert!(matches!(machine.state(), Interaction::Moving(_)));
    }

    #[test]
    fn unknown_target_stays_idle() {
        let f = Fixture::new(vec![]);
        let mut machine = InteractionMachine::default();
        let target = PointerTarget::Event(id(9), DragHandle::Body);
        assert!(!machine.pointer_down(Point::ZERO, target, Vec2::ZERO, &f.ctx()));
        assert!(machine.is_idle());
    }

    #[test]
    fn vertical_drag_changes_row() {
        let f = Fixture::new(vec![Event::stage(id(1), "s", None, day(2020, 2, 1), day(2020, 3, 1))]);
        let mut machine = InteractionMachine::default();
        grab(&mut machine, &f, 1, DragHandle::Body);

        // 70 / 44 rounds to 2.
        machine.pointer_move(Point::new(500.0, 170.0), &f.ctx());
        assert_eq!(machine.pending().unwrap().event.order, Some(2));
        // Rows never go negative.
        machine.pointer_move(Point::new(500.0, -200.0), &f.ctx());
        assert_eq!(machine.pending().unwrap().event.order, Some(0));
    }

    #[test]
    fn milestone_is_clamped_to_its_sub_event() {
        let f = Fixture::new(vec![
            Event::stage(id(1), "s", None, day(2020, 2, 1), day(2020, 3, 1)),
            Event::milestone(id(2), "m", Some(id(1)), day(2020, 2, 10)),
        ]);
        let mut machine = InteractionMachine::default();
        // Edge handles on milestones move them.
        grab(&mut machine, &f, 2, DragHandle::EndEdge);
        assert!(matches!(machine.state(), Interaction::Moving(_)));

        machine.pointer_move(Point::new(500.0 + 10.0 * 100.0, 100.0), &f.ctx());
        let edit = machine.pending().unwrap();
        assert_eq!(edit.event.start, day(2020, 3, 1));
        assert_eq!(edit.event.end, day(2020, 3, 1));

        machine.pointer_move(Point::new(500.0 - 10.0 * 100.0, 100.0), &f.ctx());
        assert_eq!(machine.pending().unwrap().event.start, day(2020, 2, 1));
    }

    #[test]
    fn resize_end_is_clamped_and_never_inverts() {
        let f = Fixture::new(vec![
            Event::epoch(id(1), "e", day(2020, 1, 1), day(2020, 3, 1)),
            Event::stage(id(2), "s", Some(id(1)), day(2020, 2, 1), day(2020, 2, 11)),
        ]);
        let mut machine = InteractionMachine::default();
        grab(&mut machine, &f, 2, DragHandle::EndEdge);
        assert_eq!(machine.state().cursor(), CursorHint::ResizeHorizontal);

        // +5 days.
        assert!(matches!(machine.pointer_move(Point::new(550.0, 100.0), &f.ctx()), Motion::Edited(_)));
        assert_eq!(machine.pending().unwrap().event.end, day(2020, 2, 16));
        // Past the parent's end.
        machine.pointer_move(Point::new(1500.0, 100.0), &f.ctx());
        assert_eq!(machine.pending().unwrap().event.end, day(2020, 3, 1));
        // Back past the start: held at the previous value.
        assert_eq!(machine.pointer_move(Point::new(300.0, 100.0), &f.ctx()), Motion::Held);
        assert_eq!(machine.pending().unwrap().event.end, day(2020, 3, 1));

        let Release::Commit(batch) = machine.pointer_up(Point::new(300.0, 100.0), &f.ctx()) else {
            panic!("expected a commit");
        };
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.edited.start, day(2020, 2, 1));
        assert_eq!(batch.edited.end, day(2020, 3, 1));
    }

    #[test]
    fn resize_start_of_a_parent_carries_its_children() {
        let f = Fixture::new(vec![
            Event::epoch(id(1), "e", day(2020, 1, 1), day(2020, 12, 31)),
            Event::stage(id(2), "s", Some(id(1)), day(2020, 1, 5), day(2020, 1, 20)),
            Event::milestone(id(3), "m", Some(id(2)), day(2020, 1, 8)),
        ]);
        let mut machine = InteractionMachine::default();
        grab(&mut machine, &f, 1, DragHandle::StartEdge);
        machine.pointer_move(Point::new(600.0, 100.0), &f.ctx());
        assert_eq!(machine.pending().unwrap().event.start, day(2020, 1, 11));

        let Release::Commit(batch) = machine.pointer_up(Point::new(600.0, 100.0), &f.ctx()) else {
            panic!("expected a commit");
        };
        assert_eq!(batch.edited.start, day(2020, 1, 11));
        assert_eq!(batch.edited.end, day(2020, 12, 31));
        assert_eq!(batch.len(), 3);
        let stage = batch.cascaded.iter().find(|e| e.id == id(2)).unwrap();
        assert_eq!((stage.start, stage.end), (day(2020, 1, 15), day(2020, 1, 30)));
        let milestone = batch.cascaded.iter().find(|e| e.id == id(3)).unwrap();
        assert_eq!(milestone.start, day(2020, 1, 18));
    }

    #[test]
    fn resize_end_of_a_parent_leaves_children_alone() {
        let f = Fixture::new(vec![
            Event::epoch(id(1), "e", day(2020, 1, 1), day(2020, 12, 31)),
            Event::stage(id(2), "s", Some(id(1)), day(2020, 1, 5), day(2020, 1, 20)),
        ]);
        let mut machine = InteractionMachine::default();
        grab(&mut machine, &f, 1, DragHandle::EndEdge);
        machine.pointer_move(Point::new(400.0, 100.0), &f.ctx());

        let Release::Commit(batch) = machine.pointer_up(Point::new(400.0, 100.0), &f.ctx()) else {
            panic!("expected a commit");
        };
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.edited.end, day(2020, 12, 21));
    }

    #[test]
    fn the_last_move_decides_the_drop() {
        let f = Fixture::new(vec![Event::stage(id(1), "s", None, day(2020, 2, 1), day(2020, 3, 1)).with_order(0)]);
        let mut machine = InteractionMachine::default();
        grab(&mut machine, &f, 1, DragHandle::Body);
        machine.pointer_move(Point::new(700.0, 100.0), &f.ctx());
        machine.pointer_move(Point::new(520.0, 101.0), &f.ctx());

        let expected = Event::stage(id(1), "s", None, day(2020, 2, 3), day(2020, 3, 3)).with_order(0);
        let release = machine.pointer_up(Point::new(520.0, 101.0), &f.ctx());
        assert_eq!(release, Release::Commit(CommitBatch::single(expected)));
    }

    #[test]
    fn drag_back_to_start_is_unchanged() {
        let f = Fixture::new(vec![Event::stage(id(1), "s", None, day(2020, 2, 1), day(2020, 3, 1)).with_order(0)]);
        let mut machine = InteractionMachine::default();
        grab(&mut machine, &f, 1, DragHandle::Body);
        machine.pointer_move(Point::new(700.0, 100.0), &f.ctx());
        machine.pointer_move(Point::new(500.0, 100.0), &f.ctx());
        // Released away from the press, but the last move put it back.
        assert_eq!(machine.pointer_up(Point::new(500.0, 120.0), &f.ctx()), Release::Unchanged(id(1)));
    }

    #[test]
    fn cancel_discards_and_restores() {
        let f = Fixture::new(vec![Event::stage(id(1), "s", None, day(2020, 2, 1), day(2020, 3, 1))]);
        let mut machine = InteractionMachine::default();
        assert_eq!(machine.cancel(), Cancel::Idle);

        grab(&mut machine, &f, 1, DragHandle::Body);
        machine.pointer_move(Point::new(900.0, 100.0), &f.ctx());
        assert_eq!(machine.cancel(), Cancel::Discarded(id(1)));
        assert!(machine.is_idle());
        assert_eq!(machine.pointer_up(Point::new(900.0, 100.0), &f.ctx()), Release::Ignored);

        let scroll = Vec2::new(40.0, 0.0);
        machine.pointer_down(Point::ZERO, PointerTarget::Canvas, scroll, &f.ctx());
        machine.pointer_move(Point::new(-100.0, 0.0), &f.ctx());
        assert_eq!(machine.cancel(), Cancel::RestoreScroll(scroll));
    }

    #[test]
    fn views_follow_the_pending_edit() {
        let f = Fixture::new(vec![
            Event::stage(id(1), "a", None, day(2020, 2, 1), day(2020, 3, 1)),
            Event::stage(id(2), "b", None, day(2020, 4, 1), day(2020, 5, 1)),
        ]);
        let mut machine = InteractionMachine::default();
        grab(&mut machine, &f, 1, DragHandle::Body);
        machine.pointer_move(Point::new(600.0, 100.0), &f.ctx());

        let a = f.timeline.get(&id(1)).unwrap();
        let b = f.timeline.get(&id(2)).unwrap();
        assert!(machine.view(a).is_dragging());
        assert_eq!(machine.view(a).event().start, day(2020, 2, 11));
        assert!(!machine.view(b).is_dragging());
        // The committed event is untouched mid-drag.
        assert_eq!(a.start, day(2020, 2, 1));
    }
}
