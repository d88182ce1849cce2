// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};

use crate::axis::{MS_PER_DAY, add_days, to_pixel_x};

/// Days of padding on each side of a comparison view.
pub const COMPARISON_PADDING_DAYS: i64 = 7;

/// Minimum width of any timeline, in days.
pub const MIN_TOTAL_DAYS: i64 = 30;

/// The rendered date range of a timeline.
///
/// `min` maps to pixel 0 and `max == min + total_days`. The rendered width is
/// `total_days * pixels_per_day`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimelineBounds {
    /// First rendered instant.
    pub min: DateTime<Utc>,
    /// Last rendered instant.
    pub max: DateTime<Utc>,
    /// Whole days between `min` and `max`; at least [`MIN_TOTAL_DAYS`].
    pub total_days: i64,
}

impl TimelineBounds {
    /// Computes bounds that fit every interval plus padding.
    ///
    /// The range always includes `anchor` (taken at midnight), so an empty
    /// timeline still shows the anchor day. Padding on each side is
    /// `max(2, ceil(missing / 2) + 2)` days, where `missing` is how many days
    /// the events fall short of filling `view_width` at this zoom; the rendered
    /// width therefore never ends narrower than the viewport.
    #[must_use]
    pub fn compute<I>(intervals: I, anchor: DateTime<Utc>, view_width: f64, pixels_per_day: f64) -> Self
    where
        I: IntoIterator<Item = (DateTime<Utc>, DateTime<Utc>)>,
    {
        let anchor = midnight(anchor);
        let (mut min_t, mut max_t) = (anchor, anchor);
        for (start, end) in intervals {
            min_t = min_t.min(start);
            max_t = max_t.max(end);
        }

        let event_days = (max_t - min_t).num_milliseconds() as f64 / MS_PER_DAY;
        let screen_days = if pixels_per_day > 0.0 {
            view_width.max(0.0) / pixels_per_day
        } else {
            0.0
        };
        let missing = (screen_days - event_days).max(0.0);
        #[expect(clippy::cast_possible_truncation, reason = "clamped to a day count that fits")]
        let padding = ((missing / 2.0).ceil().min(1e9) as i64 + 2).max(2);

        let min = saturating_days(min_t, -padding);
        let max = saturating_days(max_t, padding);
        Self::with_total_days(min, (max - min).num_days())
    }

    /// Bounds fixed to `min` and `total_days`, bypassing the event-driven
    /// computation. Used when two timelines are rendered side by side.
    #[must_use]
    pub fn with_override(min: DateTime<Utc>, total_days: i64) -> Self {
        let total_days = total_days.max(1);
        Self {
            min,
            max: saturating_days(min, total_days),
            total_days,
        }
    }

    /// Shared bounds for two timelines rendered one above the other.
    ///
    /// Covers the union of both interval sets with
    /// [`COMPARISON_PADDING_DAYS`] on each side. Returns `None` when both sets
    /// are empty.
    #[must_use]
    pub fn comparison<I, J>(main: I, other: J) -> Option<Self>
    where
        I: IntoIterator<Item = (DateTime<Utc>, DateTime<Utc>)>,
        J: IntoIterator<Item = (DateTime<Utc>, DateTime<Utc>)>,
    {
        let mut range: Option<(DateTime<Utc>, DateTime<Utc>)> = None;
        for (start, end) in main.into_iter().chain(other) {
            range = Some(match range {
                Some((lo, hi)) => (lo.min(start), hi.max(end)),
                None => (start, end),
            });
        }
        let (lo, hi) = range?;
        let min = saturating_days(lo, -COMPARISON_PADDING_DAYS);
        let max = saturating_days(hi, COMPARISON_PADDING_DAYS);
        Some(Self::with_total_days(min, (max - min).num_days()))
    }

    /// Scroll offset that lines the earliest `main_start` up `margin` pixels
    /// from the left edge when a comparison view opens.
    #[must_use]
    pub fn comparison_scroll<I>(&self, main_starts: I, pixels_per_day: f64, margin: f64) -> f64
    where
        I: IntoIterator<Item = DateTime<Utc>>,
    {
        main_starts
            .into_iter()
            .min()
            .map_or(0.0, |first| (to_pixel_x(first, self.min, pixels_per_day) - margin).max(0.0))
    }

    /// Rendered width at the given zoom.
    #[must_use]
    pub fn width(&self, pixels_per_day: f64) -> f64 {
        self.total_days as f64 * pixels_per_day
    }

    /// Returns `true` if `at` lies in `[min, max]`.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.min && at <= self.max
    }

    fn with_total_days(min: DateTime<Utc>, whole_days: i64) -> Self {
        let total_days = whole_days.max(MIN_TOTAL_DAYS);
        Self {
            min,
            max: saturating_days(min, total_days),
            total_days,
        }
    }
}

fn midnight(at: DateTime<Utc>) -> DateTime<Utc> {
    at.date_naive().and_time(NaiveTime::MIN).and_utc()
}

fn saturating_days(at: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    match TimeDelta::try_days(days) {
        Some(delta) => at.checked_add_signed(delta).unwrap_or(if days < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        }),
        None => add_days(at, days as f64),
    }
}
