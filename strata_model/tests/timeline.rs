// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `strata_model` crate.
//!
//! These exercise the timeline document as an editor drives it: building a
//! hierarchy through the factories, persisting it, and deleting subtrees.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use strata_model::{
    EventFilter, MemoryStore, SubEventKind, Timeline, TimelineMetadata, TimelineStore, TrackId,
};

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

#[test]
fn editor_session_survives_a_store_round_trip() {
    let mut timeline = Timeline::new("Career");
    let epoch = timeline
        .add_epoch("Job A", day(2015, 3, 1), day(2019, 6, 30))
        .unwrap();
    let stage = timeline
        .add_sub_event(epoch, SubEventKind::Stage, "Junior")
        .unwrap();
    timeline
        .add_sub_event(epoch, SubEventKind::Suceso, "Offsite")
        .unwrap();
    timeline.add_milestone(stage, "Promotion").unwrap();
    timeline.set_metadata(TimelineMetadata {
        theme_id: Some("emerald".into()),
        ..TimelineMetadata::default()
    });

    let mut store = MemoryStore::new();
    let id = store.save_timeline(&mut timeline).unwrap();
    let loaded = store.load_timeline(&id).unwrap();

    assert_eq!(loaded.theme_id, "emerald");
    assert_eq!(loaded.len(), 4);
    let lanes: Vec<TrackId> = loaded.events().iter().map(|e| e.track()).collect();
    assert_eq!(
        lanes,
        [TrackId::Epoch, TrackId::Stage, TrackId::Event, TrackId::Milestone]
    );
    assert_eq!(loaded.hierarchy().descendants(&epoch).len(), 3);
}

#[test]
fn revision_tracks_effective_mutations() {
    let mut timeline = Timeline::new("R");
    assert_eq!(timeline.revision(), 0);
    let epoch = timeline
        .add_epoch("E", day(2020, 1, 1), day(2020, 2, 1))
        .unwrap();
    assert_eq!(timeline.revision(), 1);

    let shifted = timeline.get(&epoch).unwrap().shifted(TimeDelta::days(3));
    timeline.update(shifted).unwrap();
    assert_eq!(timeline.revision(), 2);

    // Failed mutations leave the counter alone.
    assert!(timeline.add_milestone(epoch, "nope").is_err());
    assert_eq!(timeline.revision(), 2);
}

#[test]
fn filter_hides_milestones_lane() {
    let mut timeline = Timeline::new("F");
    let epoch = timeline
        .add_epoch("E", day(2020, 1, 1), day(2020, 2, 1))
        .unwrap();
    let stage = timeline
        .add_sub_event(epoch, SubEventKind::Stage, "S")
        .unwrap();
    timeline.add_milestone(stage, "M").unwrap();

    let mut filter = EventFilter::default();
    filter.toggle_track(TrackId::Milestone);
    assert_eq!(filter.apply(timeline.events()).count(), 2);
}

proptest! {
    // Build a random forest of epochs/stages/milestones, delete one event, and
    // check that nothing left behind points at a removed event.
    #[test]
    fn remove_cascade_leaves_no_dangling_parents(
        epochs in 1_usize..4,
        stages in proptest::collection::vec(0_usize..4, 0..8),
        milestones in proptest::collection::vec(0_usize..8, 0..8),
        victim in 0_usize..20,
    ) {
        let mut timeline = Timeline::new("P");
        let mut ids = Vec::new();
        let mut epoch_ids = Vec::new();
        for i in 0..epochs {
            let offset = i32::try_from(i).unwrap();
            let id = timeline
                .add_epoch("E", day(2000 + offset, 1, 1), day(2000 + offset, 12, 1))
                .unwrap();
            epoch_ids.push(id);
            ids.push(id);
        }
        let mut stage_ids = Vec::new();
        for parent in stages {
            let id = timeline
                .add_sub_event(epoch_ids[parent % epoch_ids.len()], SubEventKind::Stage, "S")
                .unwrap();
            stage_ids.push(id);
            ids.push(id);
        }
        if !stage_ids.is_empty() {
            for parent in milestones {
                let id = timeline.add_milestone(stage_ids[parent % stage_ids.len()], "M").unwrap();
                ids.push(id);
            }
        }

        let victim = ids[victim % ids.len()];
        let before = timeline.len();
        let removed = timeline.remove_cascade(&victim).unwrap();
        prop_assert_eq!(removed[0].id, victim);
        prop_assert_eq!(timeline.len() + removed.len(), before);
        for event in timeline.events() {
            if let Some(parent) = event.parent_id {
                prop_assert!(timeline.contains(&parent));
            }
        }
    }
}
