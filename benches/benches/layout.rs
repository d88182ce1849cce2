// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use strata_model::{Event, EventId, HierarchyIndex};
use strata_tracks::{LayoutConfig, TrackLayout};
use strata_view::TimeAxis;
use strata_virtual::{VirtualizeConfig, Virtualizer};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn gen_days(&mut self, upper_exclusive: i64) -> i64 {
        i64::from(self.next_u32()) % upper_exclusive.max(1)
    }
}

fn origin() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()
}

/// `epochs` year-long epochs, each with `children` stages and sucesos of random
/// extent and one milestone per child.
fn build_events(epochs: u32, children: u32, seed: u64) -> Vec<Event> {
    let mut rng = Lcg::new(seed);
    let mut next_id = 0_u128;
    let mut id = || {
        next_id += 1;
        EventId::from_u128(next_id)
    };

    let mut events = Vec::new();
    for year in 0..i64::from(epochs) {
        let start = origin() + TimeDelta::days(year * 365);
        let epoch = id();
        events.push(Event::epoch(epoch, "epoch", start, start + TimeDelta::days(364)));
        for n in 0..children {
            let from = start + TimeDelta::days(rng.gen_days(300));
            let to = from + TimeDelta::days(1 + rng.gen_days(60));
            let child = id();
            if n % 2 == 0 {
                events.push(Event::stage(child, "stage", Some(epoch), from, to));
            } else {
                events.push(Event::suceso(child, "suceso", Some(epoch), from, to));
            }
            events.push(Event::milestone(id(), "milestone", Some(child), from));
        }
    }
    events
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("strata_layout");
    group.sample_size(50);
    let config = LayoutConfig::default();

    for &(epochs, children) in &[(10_u32, 8_u32), (50, 16), (200, 16)] {
        let events = build_events(epochs, children, 0x57A7_A000_0000_0001);
        let total = events.len();

        group.bench_function(format!("compute(n={total})"), |b| {
            b.iter(|| black_box(TrackLayout::compute(black_box(&events), 10.0, &config)));
        });

        group.bench_function(format!("hierarchy(n={total})"), |b| {
            b.iter(|| black_box(HierarchyIndex::build(black_box(&events))));
        });

        let mut layout = TrackLayout::compute(&events, 10.0, &config);
        group.bench_function(format!("set_zoom(n={total})"), |b| {
            let mut compact = false;
            b.iter(|| {
                compact = !compact;
                let pixels_per_day = if compact { 0.5 } else { 10.0 };
                layout.set_zoom(pixels_per_day, &config);
                black_box(layout.total_height());
            });
        });
    }

    group.finish();
}

fn bench_virtualize(c: &mut Criterion) {
    let mut group = c.benchmark_group("strata_virtual");
    group.sample_size(50);

    let events = build_events(200, 16, 0x57A7_A000_0000_0002);
    let axis = TimeAxis::new(origin(), 10.0);
    let virtualizer = Virtualizer::new(VirtualizeConfig::default());
    let width = axis.x_of(origin() + TimeDelta::days(200 * 365));

    group.bench_function(format!("visible_events(n={})", events.len()), |b| {
        let mut rng = Lcg::new(7);
        b.iter(|| {
            let scroll_x = f64::from(rng.next_u32()) % width;
            black_box(virtualizer.visible_events(&events, &axis, scroll_x, 1200.0).len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_layout, bench_virtualize);
criterion_main!(benches);
