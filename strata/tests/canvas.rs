// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `strata` crate.

use core::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use kurbo::{Point, Size, Vec2};
use proptest::prelude::*;
use strata::gesture::{Cancel, CursorHint, DragHandle, Interaction, PointerTarget, Release};
use strata::model::{
    DEFAULT_THEME_ID, Event, EventFilter, EventId, MemoryStore, SubEventKind, ThemeVars, Timeline, TrackId,
};
use strata::{EngineConfig, TimelineCanvas, align_comparison};

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn canvas(pixels_per_day: f64) -> TimelineCanvas {
    TimelineCanvas::new(
        Timeline::new("test"),
        EngineConfig::default(),
        Size::new(1200.0, 600.0),
        day(2024, 1, 1),
        pixels_per_day,
    )
}

/// A view-relative point inside the body of `id`, clear of the resize handles.
fn body_point(canvas: &TimelineCanvas, id: EventId) -> Point {
    let plan = canvas.render_plan();
    let rect = plan.event(&id).expect("event is realized").rect;
    Point::new(rect.x0 + 40.0, rect.center().y) - plan.scroll
}

fn drag(canvas: &mut TimelineCanvas, target: PointerTarget, from: Point, by: Vec2) -> Release {
    assert!(canvas.pointer_down(from, target));
    canvas.pointer_move(from + by * 0.5);
    canvas.pointer_move(from + by);
    canvas.pointer_up(from + by).expect("commit applies")
}

/// An epoch spanning 2024 with two full-width stages on rows 0 and 1.
fn two_stages(canvas: &mut TimelineCanvas) -> (EventId, EventId, EventId) {
    let epoch = canvas.add_epoch("2024", day(2024, 1, 1), day(2024, 12, 31)).unwrap();
    let a = canvas.add_sub_event(epoch, SubEventKind::Stage, "a").unwrap();
    let b = canvas.add_sub_event(epoch, SubEventKind::Stage, "b").unwrap();
    (epoch, a, b)
}

#[test]
fn zoom_keeps_the_date_under_the_cursor() {
    let mut canvas = canvas(100.0);
    canvas.add_epoch("2022", day(2022, 1, 1), day(2022, 12, 31)).unwrap();
    let focus = day(2022, 6, 15);
    let x = canvas.viewport().axis().x_of(focus);
    canvas.set_scroll(Vec2::new(x - 300.0, 0.0));
    assert!((canvas.viewport().view_x_of(focus) - 300.0).abs() < 1e-6);

    assert!(canvas.zoom_about(300.0, 10.0));
    assert_eq!(canvas.pixels_per_day(), 10.0);
    assert!((canvas.viewport().view_x_of(focus) - 300.0).abs() <= 1.0);

    // A few wheel notches at the same spot stay anchored too.
    for delta in [1.0, 1.0, -1.0] {
        assert!(canvas.wheel(300.0, delta));
        assert!((canvas.viewport().view_x_of(focus) - 300.0).abs() <= 1.0);
    }
}

#[test]
fn moving_to_a_free_row_commits_and_relayouts() {
    let mut canvas = canvas(10.0);
    let (_, _, b) = two_stages(&mut canvas);
    assert_eq!(canvas.layout().row_of(&b), Some(1));
    let revision = canvas.timeline().revision();

    let from = body_point(&canvas, b);
    let release = drag(&mut canvas, PointerTarget::Event(b, DragHandle::Body), from, Vec2::new(0.0, 44.0));

    assert!(matches!(release, Release::Commit(ref batch) if batch.len() == 1));
    assert!(canvas.timeline().revision() > revision);
    assert_eq!(canvas.layout().row_of(&b), Some(2));
    assert_eq!(canvas.render_plan().event(&b).map(|g| g.row), Some(2));
    assert!(canvas.interaction() == &Interaction::Idle);
}

#[test]
fn occupied_slot_is_flagged_while_dragging_and_snaps_back() {
    let mut canvas = canvas(10.0);
    let (_, a, b) = two_stages(&mut canvas);
    let before = canvas.timeline().get(&b).cloned();

    let from = body_point(&canvas, b);
    assert!(canvas.pointer_down(from, PointerTarget::Event(b, DragHandle::Body)));
    canvas.pointer_move(from + Vec2::new(0.0, -44.0));

    let plan = canvas.render_plan();
    let dragged = plan.event(&b).unwrap();
    assert!(dragged.is_dragging);
    assert!(!dragged.is_valid_drop);
    assert_eq!(dragged.row, 0);
    assert_eq!(plan.cursor, CursorHint::Grabbing);
    assert!(plan.event(&a).unwrap().is_valid_drop);

    let release = canvas.pointer_up(from + Vec2::new(0.0, -44.0)).unwrap();
    assert_eq!(release, Release::Rejected { id: b, collision: a });
    assert_eq!(canvas.timeline().get(&b).cloned(), before);
    assert_eq!(canvas.render_plan().event(&b).map(|g| g.row), Some(1));
}

#[test]
fn click_selects_and_dims_unrelated_events() {
    let mut canvas = canvas(10.0);
    let (epoch, a, _) = two_stages(&mut canvas);
    let other = canvas.add_epoch("other", day(2024, 2, 1), day(2024, 3, 1)).unwrap();

    let at = body_point(&canvas, a);
    let release = drag(&mut canvas, PointerTarget::Event(a, DragHandle::Body), at, Vec2::new(2.0, 3.0));
    assert_eq!(release, Release::Select(a));
    assert_eq!(canvas.selection().selected(), Some(a));

    let plan = canvas.render_plan();
    assert!(plan.event(&a).unwrap().is_selected);
    assert!(!plan.event(&epoch).unwrap().dimmed);
    assert!(plan.event(&other).unwrap().dimmed);

    let release = drag(&mut canvas, PointerTarget::Canvas, Point::new(600.0, 500.0), Vec2::ZERO);
    assert_eq!(release, Release::ClearSelection);
    assert!(canvas.selection().is_empty());
}

#[test]
fn hit_testing_feeds_pointer_down() {
    let mut canvas = canvas(10.0);
    let (_, a, _) = two_stages(&mut canvas);
    let rect = canvas.render_plan().event(&a).unwrap().rect;
    let edge = Point::new(rect.x0 + 2.0, rect.center().y) - canvas.viewport().scroll();

    let target = canvas.render_plan().hit_test(edge);
    assert_eq!(target, PointerTarget::Event(a, DragHandle::StartEdge));
    let release = drag(&mut canvas, target, edge, Vec2::new(100.0, 0.0));

    assert!(matches!(release, Release::Commit(_)));
    assert_eq!(canvas.timeline().get(&a).map(|e| e.start), Some(day(2024, 1, 11)));
}

#[test]
fn cancelled_pan_scrolls_back() {
    let mut canvas = canvas(10.0);
    two_stages(&mut canvas);

    assert!(canvas.pointer_down(Point::new(600.0, 300.0), PointerTarget::Canvas));
    canvas.pointer_move(Point::new(500.0, 300.0));
    assert_eq!(canvas.viewport().scroll().x, 100.0);

    assert_eq!(canvas.cancel(), Cancel::RestoreScroll(Vec2::ZERO));
    assert_eq!(canvas.viewport().scroll().x, 0.0);
    assert!(canvas.interaction() == &Interaction::Idle);
}

#[test]
fn removing_the_dragged_event_ends_the_gesture() {
    let mut canvas = canvas(10.0);
    let (epoch, _, b) = two_stages(&mut canvas);
    canvas.select(Some(b));

    let from = body_point(&canvas, b);
    assert!(canvas.pointer_down(from, PointerTarget::Event(b, DragHandle::Body)));
    canvas.pointer_move(from + Vec2::new(30.0, 0.0));

    let removed = canvas.remove_event(&epoch).unwrap();
    assert_eq!(removed.len(), 3);
    assert!(canvas.interaction() == &Interaction::Idle);
    assert!(canvas.selection().is_empty());
    assert!(canvas.render_plan().events.is_empty());
}

#[test]
fn playback_walks_events_in_start_order() {
    let mut canvas = canvas(10.0);
    let june = canvas.add_epoch("june", day(2024, 6, 1), day(2024, 6, 30)).unwrap();
    let january = canvas.add_epoch("january", day(2024, 1, 1), day(2024, 1, 31)).unwrap();
    let march = canvas.add_epoch("march", day(2024, 3, 1), day(2024, 3, 31)).unwrap();

    assert!(canvas.start_playback(None));
    assert_eq!(canvas.selection().selected(), Some(january));

    assert_eq!(canvas.tick_playback(Duration::from_millis(4_999)), None);
    assert_eq!(canvas.tick_playback(Duration::from_millis(1)), Some(march));
    assert_eq!(canvas.selection().selected(), Some(march));
    assert!((canvas.viewport().view_x_of(day(2024, 3, 1)) - 600.0).abs() <= 1.0);

    assert_eq!(canvas.tick_playback(Duration::from_secs(5)), Some(june));
    canvas.stop_playback();
    assert!(!canvas.is_playing());
    assert_eq!(canvas.tick_playback(Duration::from_secs(5)), None);
}

#[test]
fn playback_needs_events_in_range() {
    let mut canvas = canvas(10.0);
    canvas.add_epoch("2024", day(2024, 1, 1), day(2024, 12, 31)).unwrap();
    assert!(!canvas.start_playback(Some((day(2030, 1, 1), day(2031, 1, 1)))));
    assert!(!canvas.is_playing());
}

#[test]
fn filtered_tracks_are_not_laid_out() {
    let mut canvas = canvas(10.0);
    let (epoch, a, _) = two_stages(&mut canvas);
    let mut filter = EventFilter::default();
    filter.toggle_track(TrackId::Stage);
    canvas.set_filter(filter);

    let plan = canvas.render_plan();
    assert!(plan.event(&a).is_none());
    assert!(plan.event(&epoch).is_some());
    assert_eq!(canvas.layout().track_rows(TrackId::Stage), 1);
    assert_eq!(canvas.shown_events().len(), 1);
}

#[test]
fn far_events_are_virtualized_until_render_all() {
    let mut canvas = canvas(10.0);
    let near = canvas.add_epoch("near", day(2024, 1, 1), day(2024, 2, 1)).unwrap();
    let far = canvas.add_epoch("far", day(2030, 1, 1), day(2030, 2, 1)).unwrap();

    // Adding an epoch scrolls it into view.
    let plan = canvas.render_plan();
    assert!(plan.event(&far).is_some());
    assert!(plan.event(&near).is_none());

    canvas.set_scroll(Vec2::ZERO);
    let plan = canvas.render_plan();
    assert!(plan.event(&near).is_some());
    assert!(plan.event(&far).is_none());
    assert!(!plan.labels.is_empty());

    canvas.set_render_all(true);
    let plan = canvas.render_plan();
    assert!(plan.event(&far).is_some());
    assert!(plan.labels.last().is_some_and(|l| l.date >= day(2030, 1, 1)));
}

#[test]
fn comparison_shares_bounds_and_scroll() {
    let view = Size::new(400.0, 300.0);
    let mut main = TimelineCanvas::new(Timeline::new("main"), EngineConfig::default(), view, day(2024, 3, 1), 10.0);
    let mut other = TimelineCanvas::new(Timeline::new("other"), EngineConfig::default(), view, day(2024, 1, 1), 5.0);
    main.add_epoch("main", day(2024, 3, 1), day(2024, 4, 1)).unwrap();
    other.add_epoch("other", day(2024, 1, 1), day(2024, 2, 1)).unwrap();

    assert!(align_comparison(&mut main, &mut other));
    assert_eq!(main.viewport().bounds(), other.viewport().bounds());
    assert_eq!(main.viewport().bounds().min, day(2023, 12, 25));
    assert_eq!(other.pixels_per_day(), 10.0);
    // 67 days to the first main event, less the 50px margin.
    assert_eq!(main.viewport().scroll().x, 620.0);
    assert_eq!(other.viewport().scroll().x, 620.0);
}

#[test]
fn save_and_load_round_trip() {
    let mut store = MemoryStore::new();
    let mut canvas = canvas(10.0);
    let (_, a, _) = two_stages(&mut canvas);
    let id = canvas.save(&mut store).unwrap();

    let loaded = TimelineCanvas::load(
        &store,
        &id,
        EngineConfig::default(),
        Size::new(1200.0, 600.0),
        day(2024, 1, 1),
        10.0,
    )
    .unwrap();
    assert_eq!(loaded.timeline().len(), 3);
    assert_eq!(loaded.timeline().get(&a), canvas.timeline().get(&a));
    assert_eq!(loaded.layout().row_of(&a), Some(0));
}

#[test]
fn theme_is_written_to_the_store() {
    let canvas = canvas(10.0);
    let mut vars = ThemeVars::default();
    let theme = canvas.apply_theme(&mut vars);
    assert_eq!(theme.id, DEFAULT_THEME_ID);
    assert!(!vars.is_empty());
}

#[test]
fn config_from_json_drives_the_canvas() {
    let config = EngineConfig::from_json_str(r#"{ "interaction": { "clickTolerance": 20 } }"#).unwrap();
    let mut canvas = TimelineCanvas::new(
        Timeline::new("test"),
        config,
        Size::new(1200.0, 600.0),
        day(2024, 1, 1),
        10.0,
    );
    let (_, a, _) = two_stages(&mut canvas);
    let at = body_point(&canvas, a);
    let release = drag(&mut canvas, PointerTarget::Event(a, DragHandle::Body), at, Vec2::new(15.0, 0.0));
    assert_eq!(release, Release::Select(a));
}

#[test]
fn hover_releases_after_the_delay() {
    let mut canvas = canvas(10.0);
    let id = EventId::from_u128(7);
    canvas.hover_enter(id);
    canvas.hover_leave(1_000);
    assert!(!canvas.hover_tick(1_299));
    assert_eq!(canvas.hovered(), Some(id));
    assert!(canvas.hover_tick(1_300));
    assert_eq!(canvas.hovered(), None);
}

fn gesture() -> impl Strategy<Value = (DragHandle, f64, f64)> {
    (
        prop_oneof![
            Just(DragHandle::Body),
            Just(DragHandle::StartEdge),
            Just(DragHandle::EndEdge),
        ],
        -3000.0_f64..3000.0,
        -100.0_f64..100.0,
    )
}

proptest! {
    #[test]
    fn stages_stay_inside_their_epoch(gestures in proptest::collection::vec(gesture(), 1..8)) {
        let mut canvas = canvas(10.0);
        canvas.set_render_all(true);
        let epoch = canvas.add_epoch("2024", day(2024, 1, 1), day(2024, 12, 31)).unwrap();
        let stage = canvas.add_sub_event(epoch, SubEventKind::Stage, "s").unwrap();
        let short = Event {
            start: day(2024, 3, 1),
            end: day(2024, 4, 1),
            ..canvas.timeline().get(&stage).unwrap().clone()
        };
        canvas.update_event(short).unwrap();

        for (handle, dx, dy) in gestures {
            let from = body_point(&canvas, stage);
            drag(&mut canvas, PointerTarget::Event(stage, handle), from, Vec2::new(dx, dy));
            let (e, s) = (canvas.timeline().get(&epoch).unwrap(), canvas.timeline().get(&stage).unwrap());
            prop_assert!(s.start >= e.start && s.end <= e.end);
            prop_assert!(s.start < s.end);
        }
    }
}
