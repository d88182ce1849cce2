// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use chrono::{DateTime, Utc};
use kurbo::{Point, Size, Vec2};
use strata_gesture::{
    Cancel, DragContext, EventView, HoverLatch, Interaction, InteractionMachine, Motion, PointerTarget, Release,
};
use strata_model::{
    Event, EventFilter, EventId, HierarchyIndex, ModelError, Playback, StoreError, SubEventKind, Theme, ThemeStore,
    Timeline, TimelineId, TimelineMetadata, TimelineStore, TrackId,
};
use strata_tracks::TrackLayout;
use strata_view::{MIN_TOTAL_DAYS, TimeAxis, TimelineBounds, TimelineViewport};
use strata_virtual::Virtualizer;

use crate::config::EngineConfig;
use crate::plan::{EventGeometry, RenderPlan, TrackGeometry};
use crate::selection::EventSelection;

/// A headless, interactive timeline canvas.
///
/// Owns a [`Timeline`] and everything derived from it: the hierarchy index,
/// the track layout, the bounds and viewport, the gesture machine, the
/// selection, and playback. Derived state is recomputed eagerly after every
/// mutation or zoom change, so [`render_plan`](Self::render_plan) always
/// reflects the latest input.
///
/// Pointer positions are view-relative: `(0, 0)` is the viewport's top-left
/// corner. Scrolling does not move the pointer.
///
/// The filter decides which events are laid out and drawn. Parent clamping
/// and cascades always see the whole timeline.
#[derive(Debug)]
pub struct TimelineCanvas {
    config: EngineConfig,
    timeline: Timeline,
    filter: EventFilter,
    shown: Vec<Event>,
    hierarchy: HierarchyIndex,
    layout: TrackLayout,
    anchor: DateTime<Utc>,
    bounds_override: Option<TimelineBounds>,
    viewport: TimelineViewport,
    machine: InteractionMachine,
    virtualizer: Virtualizer,
    selection: EventSelection,
    hover: HoverLatch,
    playback: Option<Playback>,
}

impl TimelineCanvas {
    /// Creates a canvas at scroll `(0, 0)`.
    ///
    /// `anchor` is a date that is always inside the bounds, typically today.
    /// The zoom is clamped into the configured limits.
    #[must_use]
    pub fn new(
        timeline: Timeline,
        config: EngineConfig,
        view_size: Size,
        anchor: DateTime<Utc>,
        pixels_per_day: f64,
    ) -> Self {
        let viewport = TimelineViewport::new(
            config.viewport,
            TimelineBounds::with_override(anchor, MIN_TOTAL_DAYS),
            view_size,
            pixels_per_day,
        );
        let layout = TrackLayout::compute(&[], viewport.pixels_per_day(), &config.layout);
        let mut canvas = Self {
            config,
            timeline,
            filter: EventFilter::default(),
            shown: Vec::new(),
            hierarchy: HierarchyIndex::default(),
            layout,
            anchor,
            bounds_override: None,
            viewport,
            machine: InteractionMachine::new(config.interaction),
            virtualizer: Virtualizer::new(config.virtualize),
            selection: EventSelection::new(),
            hover: HoverLatch::new(config.interaction.hover_leave_delay_ms),
            playback: None,
        };
        canvas.rebuild();
        canvas
    }

    /// Loads the timeline stored under `id` into a new canvas.
    pub fn load<S: TimelineStore>(
        store: &S,
        id: &TimelineId,
        config: EngineConfig,
        view_size: Size,
        anchor: DateTime<Utc>,
        pixels_per_day: f64,
    ) -> Result<Self, StoreError> {
        let timeline = store.load_timeline(id)?;
        Ok(Self::new(timeline, config, view_size, anchor, pixels_per_day))
    }

    /// Saves the timeline, returning the id it was stored under.
    ///
    /// Hosts typically call this once [`Timeline::revision`] has been stable
    /// for a while.
    pub fn save<S: TimelineStore>(&mut self, store: &mut S) -> Result<TimelineId, StoreError> {
        store.save_timeline(&mut self.timeline)
    }

    /// Writes the timeline's theme into `store`.
    pub fn apply_theme<S: ThemeStore>(&self, store: &mut S) -> &'static Theme {
        store.apply_theme(&self.timeline.theme_id)
    }

    /// The committed timeline.
    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Consumes the canvas, returning the timeline.
    #[must_use]
    pub fn into_timeline(self) -> Timeline {
        self.timeline
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Events that pass the filter, in timeline order.
    #[must_use]
    pub fn shown_events(&self) -> &[Event] {
        &self.shown
    }

    /// Hierarchy index over the whole timeline.
    #[must_use]
    pub fn hierarchy(&self) -> &HierarchyIndex {
        &self.hierarchy
    }

    /// Track layout of the shown events.
    #[must_use]
    pub fn layout(&self) -> &TrackLayout {
        &self.layout
    }

    /// The viewport.
    #[must_use]
    pub fn viewport(&self) -> &TimelineViewport {
        &self.viewport
    }

    /// Current zoom, in pixels per day.
    #[must_use]
    pub fn pixels_per_day(&self) -> f64 {
        self.viewport.pixels_per_day()
    }

    /// The active gesture.
    #[must_use]
    pub fn interaction(&self) -> &Interaction {
        self.machine.state()
    }

    /// The selection.
    #[must_use]
    pub fn selection(&self) -> &EventSelection {
        &self.selection
    }

    /// The active filter.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    // -------------------------------------------------------------------------
    // Pointer input
    // -------------------------------------------------------------------------

    /// Starts a gesture on `target`. Returns `false` if one is already active
    /// or the target event does not exist.
    pub fn pointer_down(&mut self, view_pos: Point, target: PointerTarget) -> bool {
        let ctx = DragContext {
            timeline: &self.timeline,
            hierarchy: &self.hierarchy,
            layout: &self.layout,
            axis: self.viewport.axis(),
        };
        self.machine.pointer_down(view_pos, target, self.viewport.scroll(), &ctx)
    }

    /// Advances the active gesture. A pan scrolls the viewport.
    pub fn pointer_move(&mut self, view_pos: Point) -> Motion {
        let ctx = DragContext {
            timeline: &self.timeline,
            hierarchy: &self.hierarchy,
            layout: &self.layout,
            axis: self.viewport.axis(),
        };
        let motion = self.machine.pointer_move(view_pos, &ctx);
        if let Motion::Pan(scroll) = motion {
            self.viewport.set_scroll(scroll);
        }
        motion
    }

    /// Ends the active gesture.
    ///
    /// A commit is applied to the timeline atomically; clicks update the
    /// selection. The error case only arises if the commit no longer fits the
    /// timeline, in which case nothing changed.
    pub fn pointer_up(&mut self, view_pos: Point) -> Result<Release, ModelError> {
        let ctx = DragContext {
            timeline: &self.timeline,
            hierarchy: &self.hierarchy,
            layout: &self.layout,
            axis: self.viewport.axis(),
        };
        let release = self.machine.pointer_up(view_pos, &ctx);
        match &release {
            Release::Commit(batch) => {
                self.timeline.apply_batch(batch.clone().into_events())?;
                self.rebuild();
            }
            Release::Select(id) => self.selection.select(*id, &self.hierarchy),
            Release::ClearSelection => self.selection.clear(),
            Release::Ignored | Release::PanEnded | Release::Unchanged(_) | Release::Rejected { .. } => {}
        }
        Ok(release)
    }

    /// Aborts the active gesture. A cancelled pan scrolls back.
    pub fn cancel(&mut self) -> Cancel {
        let cancel = self.machine.cancel();
        if let Cancel::RestoreScroll(scroll) = cancel {
            self.viewport.set_scroll(scroll);
        }
        cancel
    }

    // -------------------------------------------------------------------------
    // Viewport
    // -------------------------------------------------------------------------

    /// Applies one wheel notch at view-relative `view_x`, keeping the date
    /// under it in place. Returns `false` if the zoom was already at a limit.
    pub fn wheel(&mut self, view_x: f64, delta_y: f64) -> bool {
        let changed = self.viewport.wheel_zoom(view_x, delta_y);
        if changed {
            self.zoom_changed();
        }
        changed
    }

    /// Sets the zoom, keeping the date at `view_x` in place.
    pub fn zoom_about(&mut self, view_x: f64, pixels_per_day: f64) -> bool {
        let changed = self.viewport.set_zoom_about_view_point(view_x, pixels_per_day);
        if changed {
            self.zoom_changed();
        }
        changed
    }

    /// Sets the zoom, keeping the date at the viewport centre in place.
    pub fn set_zoom(&mut self, pixels_per_day: f64) -> bool {
        self.zoom_about(self.viewport.view_size().width / 2.0, pixels_per_day)
    }

    /// Scrolls by `delta` pixels.
    pub fn scroll_by(&mut self, delta: Vec2) {
        self.viewport.scroll_by(delta);
    }

    /// Sets the scroll offset.
    pub fn set_scroll(&mut self, scroll: Vec2) {
        self.viewport.set_scroll(scroll);
    }

    /// Resizes the viewport. The bounds widen if the content no longer
    /// fills it.
    pub fn set_view_size(&mut self, size: Size) {
        self.viewport.set_view_size(size);
        let bounds = self.fit_bounds();
        self.viewport.set_bounds(bounds);
    }

    /// Pins the bounds, or returns to bounds fitted to the events.
    pub fn set_bounds_override(&mut self, bounds: Option<TimelineBounds>) {
        self.bounds_override = bounds;
        let bounds = self.fit_bounds();
        self.viewport.set_bounds(bounds);
    }

    /// Bypasses virtualization, for exporting the whole canvas.
    pub fn set_render_all(&mut self, render_all: bool) {
        self.virtualizer.set_render_all(render_all);
    }

    /// Scrolls `id` to the centre and selects it. Returns `false` if the
    /// event does not exist.
    pub fn focus_event(&mut self, id: &EventId) -> bool {
        let Some(start) = self.timeline.get(id).map(|e| e.start) else {
            return false;
        };
        self.viewport.center_on(start);
        self.selection.select(*id, &self.hierarchy);
        true
    }

    /// Selects `id`, or clears the selection with `None` or an unknown id.
    pub fn select(&mut self, id: Option<EventId>) {
        match id.filter(|id| self.timeline.contains(id)) {
            Some(id) => self.selection.select(id, &self.hierarchy),
            None => self.selection.clear(),
        }
    }

    // -------------------------------------------------------------------------
    // Timeline edits
    // -------------------------------------------------------------------------

    /// Adds an epoch and scrolls it into view.
    pub fn add_epoch(
        &mut self,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<EventId, ModelError> {
        let id = self.timeline.add_epoch(title, start, end)?;
        self.rebuild();
        self.viewport.reveal(start);
        Ok(id)
    }

    /// Adds a stage or suceso spanning `parent`.
    pub fn add_sub_event(
        &mut self,
        parent: EventId,
        kind: SubEventKind,
        title: impl Into<String>,
    ) -> Result<EventId, ModelError> {
        let id = self.timeline.add_sub_event(parent, kind, title)?;
        self.rebuild();
        Ok(id)
    }

    /// Adds a milestone at the start of `sub_event`.
    pub fn add_milestone(&mut self, sub_event: EventId, title: impl Into<String>) -> Result<EventId, ModelError> {
        let id = self.timeline.add_milestone(sub_event, title)?;
        self.rebuild();
        Ok(id)
    }

    /// Replaces an event, returning the previous version.
    pub fn update_event(&mut self, event: Event) -> Result<Event, ModelError> {
        let previous = self.timeline.update(event)?;
        self.rebuild();
        Ok(previous)
    }

    /// Removes an event and its descendants, returning them.
    ///
    /// A gesture on a removed event is cancelled and a removed selection is
    /// cleared.
    pub fn remove_event(&mut self, id: &EventId) -> Result<Vec<Event>, ModelError> {
        let removed = self.timeline.remove_cascade(id)?;
        self.rebuild();
        Ok(removed)
    }

    /// Applies a partial metadata update.
    pub fn set_metadata(&mut self, metadata: TimelineMetadata) {
        self.timeline.set_metadata(metadata);
    }

    /// Replaces the filter.
    pub fn set_filter(&mut self, filter: EventFilter) {
        if self.filter == filter {
            return;
        }
        self.filter = filter;
        self.rebuild();
    }

    // -------------------------------------------------------------------------
    // Playback
    // -------------------------------------------------------------------------

    /// Starts presenting the shown events whose start lies in `range`, in
    /// start order, and focuses the first. Returns `false` if there is
    /// nothing to present.
    pub fn start_playback(&mut self, range: Option<(DateTime<Utc>, DateTime<Utc>)>) -> bool {
        let Some(playback) = Playback::new(&self.shown, range, &self.config.playback) else {
            return false;
        };
        let first = playback.current();
        tracing::debug!(events = playback.sequence().len(), "playback started");
        self.playback = Some(playback);
        self.focus_event(&first);
        true
    }

    /// Stops playback. The last focused event stays selected.
    pub fn stop_playback(&mut self) {
        self.playback = None;
    }

    /// Returns `true` while playback is running.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    /// Advances playback by `dt` of wall time, focusing the next event when
    /// its step elapses. Returns the newly focused event.
    pub fn tick_playback(&mut self, dt: Duration) -> Option<EventId> {
        let next = self.playback.as_mut()?.tick(dt)?;
        self.focus_event(&next);
        Some(next)
    }

    // -------------------------------------------------------------------------
    // Hover
    // -------------------------------------------------------------------------

    /// The pointer entered `id`.
    pub fn hover_enter(&mut self, id: EventId) {
        self.hover.enter(id);
    }

    /// The pointer left the hovered event at `now_ms`.
    pub fn hover_leave(&mut self, now_ms: u64) {
        self.hover.leave(now_ms);
    }

    /// Applies a due hover release. Returns `true` if the hover was cleared.
    pub fn hover_tick(&mut self, now_ms: u64) -> bool {
        self.hover.tick(now_ms)
    }

    /// The event shown as hovered.
    #[must_use]
    pub fn hovered(&self) -> Option<EventId> {
        self.hover.hovered()
    }

    // -------------------------------------------------------------------------
    // Render output
    // -------------------------------------------------------------------------

    /// Geometry for the current frame.
    ///
    /// Events outside the realized span are skipped, except that an event
    /// under a gesture is always drawn, at its provisional position.
    #[must_use]
    pub fn render_plan(&self) -> RenderPlan {
        let axis = self.viewport.axis();
        let scroll = self.viewport.scroll();
        let width = self.viewport.view_size().width;
        let pending = self.machine.pending();

        let mut events: Vec<EventGeometry> = self
            .virtualizer
            .visible_events(&self.shown, &axis, scroll.x, width)
            .into_iter()
            .filter(|e| pending.is_none_or(|edit| edit.event.id != e.id))
            .map(|e| self.geometry(EventView::Committed(e), &axis))
            .collect();
        if let Some(edit) = pending.filter(|edit| self.shown.iter().any(|e| e.id == edit.event.id)) {
            events.push(self.geometry(EventView::Pending(edit), &axis));
        }
        events.sort_by_key(|g| g.track.index());

        let tracks = TrackId::ALL
            .into_iter()
            .map(|track| TrackGeometry {
                track,
                y: self.layout.track_y(track),
                height: self.layout.track_height(track),
                rows: self.layout.track_rows(track),
            })
            .collect();

        RenderPlan {
            events,
            tracks,
            labels: self.virtualizer.labels(&self.viewport.bounds(), &axis, scroll.x, width),
            content_size: self.viewport.content_size(),
            scroll,
            cursor: self.machine.state().cursor(),
            compact: self.layout.is_compact(),
        }
    }

    fn geometry(&self, view: EventView<'_>, axis: &TimeAxis) -> EventGeometry {
        let event = view.event();
        let track = event.track();
        let dragged_row = match (view, self.machine.state()) {
            (EventView::Pending(_), Interaction::Moving(_)) => event.row_hint(),
            _ => None,
        };
        let row = dragged_row
            .or_else(|| self.layout.row_of(&event.id))
            .or_else(|| event.row_hint())
            .unwrap_or(0);
        EventGeometry {
            id: event.id,
            track,
            row,
            rect: self.layout.event_rect(track, row, event.start, event.end, axis),
            is_valid_drop: view.validity().is_valid(),
            is_dragging: view.is_dragging(),
            is_selected: self.selection.is_selected(&event.id),
            dimmed: self.selection.is_dimmed(&event.id),
        }
    }

    // -------------------------------------------------------------------------
    // Derived state
    // -------------------------------------------------------------------------

    fn fit_bounds(&self) -> TimelineBounds {
        self.bounds_override.unwrap_or_else(|| {
            TimelineBounds::compute(
                self.shown.iter().map(|e| (e.start, e.end)),
                self.anchor,
                self.viewport.view_size().width,
                self.viewport.pixels_per_day(),
            )
        })
    }

    /// Recomputes everything derived from the timeline and filter.
    fn rebuild(&mut self) {
        self.shown = self.filter.apply(self.timeline.events()).cloned().collect();
        self.hierarchy = self.timeline.hierarchy();
        self.layout = TrackLayout::compute(&self.shown, self.viewport.pixels_per_day(), &self.config.layout);
        let bounds = self.fit_bounds();
        self.viewport.set_bounds(bounds);
        self.viewport.set_content_height(self.layout.total_height());

        let timeline = &self.timeline;
        self.selection.refresh(&self.hierarchy, |id| timeline.contains(id));
        if self
            .machine
            .pending()
            .is_some_and(|edit| !timeline.contains(&edit.event.id))
        {
            self.machine.cancel();
        }
        let ctx = DragContext {
            timeline: &self.timeline,
            hierarchy: &self.hierarchy,
            layout: &self.layout,
            axis: self.viewport.axis(),
        };
        self.machine.revalidate(&ctx);
        tracing::debug!(
            revision = self.timeline.revision(),
            shown = self.shown.len(),
            total = self.timeline.len(),
            "canvas rebuilt"
        );
    }

    /// Re-resolves zoom-dependent geometry. Rows do not change with zoom.
    fn zoom_changed(&mut self) {
        let pixels_per_day = self.viewport.pixels_per_day();
        self.layout.set_zoom(pixels_per_day, &self.config.layout);
        let bounds = self.fit_bounds();
        self.viewport.set_bounds(bounds);
        self.viewport.set_content_height(self.layout.total_height());
    }
}

/// Lines two canvases up for side-by-side comparison.
///
/// Both get the same bounds (the union of their shown events, padded), the
/// zoom of `main`, and a scroll that puts `main`'s first event near the left
/// edge. Returns `false`, changing nothing, if neither has events.
pub fn align_comparison(main: &mut TimelineCanvas, other: &mut TimelineCanvas) -> bool {
    let intervals = |c: &TimelineCanvas| c.shown.iter().map(|e| (e.start, e.end)).collect::<Vec<_>>();
    let Some(bounds) = TimelineBounds::comparison(intervals(main), intervals(other)) else {
        return false;
    };
    let pixels_per_day = main.pixels_per_day();
    other.set_zoom(pixels_per_day);
    main.set_bounds_override(Some(bounds));
    other.set_bounds_override(Some(bounds));

    let scroll_x = bounds.comparison_scroll(
        main.shown.iter().map(|e| e.start),
        pixels_per_day,
        main.config.viewport.reveal_margin,
    );
    for canvas in [main, other] {
        let y = canvas.viewport.scroll().y;
        canvas.set_scroll(Vec2::new(scroll_x, y));
    }
    tracing::debug!(total_days = bounds.total_days, scroll_x, "aligned comparison");
    true
}
