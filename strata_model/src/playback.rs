// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation mode: stepping through events in chronological order.

use core::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Event, EventId};

/// Playback timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaybackConfig {
    /// Time each event stays focused, in milliseconds.
    pub step_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { step_ms: 5_000 }
    }
}

impl PlaybackConfig {
    /// [`step_ms`](Self::step_ms) as a [`Duration`].
    #[must_use]
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }
}

/// A looping sequence of events to focus one after another.
#[derive(Clone, Debug)]
pub struct Playback {
    sequence: Vec<EventId>,
    position: usize,
    elapsed: Duration,
    step: Duration,
}

impl Playback {
    /// Selects the events whose start lies in `range` (inclusive on both ends,
    /// or everything when `None`) and orders them by start.
    ///
    /// Returns `None` when nothing is selected; there is nothing to play.
    #[must_use]
    pub fn new(
        events: &[Event],
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
        config: &PlaybackConfig,
    ) -> Option<Self> {
        let mut selected: Vec<&Event> = events
            .iter()
            .filter(|e| range.is_none_or(|(lo, hi)| e.start >= lo && e.start <= hi))
            .collect();
        if selected.is_empty() {
            return None;
        }
        selected.sort_by_key(|e| e.start);
        Some(Self {
            sequence: selected.into_iter().map(|e| e.id).collect(),
            position: 0,
            elapsed: Duration::ZERO,
            step: config.step_interval(),
        })
    }

    /// The focused event.
    #[must_use]
    pub fn current(&self) -> EventId {
        self.sequence[self.position]
    }

    /// Every event in playback order.
    #[must_use]
    pub fn sequence(&self) -> &[EventId] {
        &self.sequence
    }

    /// Moves focus to the next event, wrapping after the last.
    pub fn advance(&mut self) -> EventId {
        self.position = (self.position + 1) % self.sequence.len();
        self.elapsed = Duration::ZERO;
        self.current()
    }

    /// Accounts for `dt` of wall time, advancing once per elapsed step.
    ///
    /// Returns the newly focused event if focus changed.
    pub fn tick(&mut self, dt: Duration) -> Option<EventId> {
        if self.step.is_zero() {
            return None;
        }
        self.elapsed += dt;
        let mut changed = false;
        while self.elapsed >= self.step {
            self.elapsed -= self.step;
            self.position = (self.position + 1) % self.sequence.len();
            changed = true;
        }
        changed.then(|| self.current())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn events() -> Vec<Event> {
        let id = EventId::from_u128;
        vec![
            Event::stage(id(1), "late", None, day(2021, 5, 1), day(2021, 6, 1)),
            Event::stage(id(2), "early", None, day(2020, 1, 1), day(2020, 2, 1)),
            Event::milestone(id(3), "mid", None, day(2020, 7, 1)),
        ]
    }

    #[test]
    fn sequence_is_chronological_and_wraps() {
        let id = EventId::from_u128;
        let mut playback = Playback::new(&events(), None, &PlaybackConfig::default()).unwrap();
        assert_eq!(playback.sequence(), &[id(2), id(3), id(1)]);
        assert_eq!(playback.current(), id(2));
        playback.advance();
        playback.advance();
        assert_eq!(playback.advance(), id(2));
    }

    #[test]
    fn range_is_inclusive_on_start() {
        let id = EventId::from_u128;
        let range = Some((day(2020, 7, 1), day(2021, 5, 1)));
        let playback = Playback::new(&events(), range, &PlaybackConfig::default()).unwrap();
        assert_eq!(playback.sequence(), &[id(3), id(1)]);

        let empty = Some((day(1990, 1, 1), day(1990, 2, 1)));
        assert!(Playback::new(&events(), empty, &PlaybackConfig::default()).is_none());
    }

    #[test]
    fn tick_advances_per_step() {
        let id = EventId::from_u128;
        let mut playback = Playback::new(&events(), None, &PlaybackConfig::default()).unwrap();
        assert_eq!(playback.tick(Duration::from_millis(4_999)), None);
        assert_eq!(playback.tick(Duration::from_millis(1)), Some(id(3)));
        assert_eq!(playback.tick(Duration::from_secs(10)), Some(id(2)));
    }
}
