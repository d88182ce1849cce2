// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::{DateTime, TimeDelta, Utc};

/// Milliseconds in one (UTC) day.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Zoom level below which layouts switch to their compact preset.
pub const COMPACT_PIXELS_PER_DAY: f64 = 0.5;

/// Horizontal pixel offset of `date` relative to `origin`.
///
/// Fractional days are kept, so the result is sub-pixel precise.
#[must_use]
pub fn to_pixel_x(date: DateTime<Utc>, origin: DateTime<Utc>, pixels_per_day: f64) -> f64 {
    millis_between(origin, date) / MS_PER_DAY * pixels_per_day
}

/// Instant at horizontal pixel offset `x` relative to `origin`.
///
/// The result is rounded to the nearest millisecond and saturates at the
/// representable range. A non-positive or non-finite zoom yields `origin`.
#[must_use]
pub fn to_date(x: f64, origin: DateTime<Utc>, pixels_per_day: f64) -> DateTime<Utc> {
    if pixels_per_day.is_nan() || pixels_per_day <= 0.0 || !x.is_finite() {
        return origin;
    }
    let ms = (x / pixels_per_day * MS_PER_DAY).round();
    offset_millis(origin, ms)
}

/// Shifts `at` by a (possibly fractional) number of days, rounded to the
/// millisecond.
#[must_use]
pub fn add_days(at: DateTime<Utc>, days: f64) -> DateTime<Utc> {
    if !days.is_finite() {
        return at;
    }
    offset_millis(at, (days * MS_PER_DAY).round())
}

/// Signed milliseconds from `from` to `to`, as a float.
#[must_use]
pub fn millis_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64
}

fn offset_millis(at: DateTime<Utc>, ms: f64) -> DateTime<Utc> {
    #[expect(clippy::cast_possible_truncation, reason = "clamped to the i64 range first")]
    let ms = ms.clamp(i64::MIN as f64, i64::MAX as f64) as i64;
    TimeDelta::try_milliseconds(ms)
        .and_then(|delta| at.checked_add_signed(delta))
        .unwrap_or(if ms < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

/// A time axis: an origin instant at pixel 0 and a zoom factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeAxis {
    /// Instant mapped to pixel 0.
    pub origin: DateTime<Utc>,
    /// Zoom, in pixels per day.
    pub pixels_per_day: f64,
}

impl TimeAxis {
    /// Creates an axis.
    #[must_use]
    pub const fn new(origin: DateTime<Utc>, pixels_per_day: f64) -> Self {
        Self {
            origin,
            pixels_per_day,
        }
    }

    /// Pixel offset of `date`.
    #[must_use]
    pub fn x_of(&self, date: DateTime<Utc>) -> f64 {
        to_pixel_x(date, self.origin, self.pixels_per_day)
    }

    /// Instant at pixel offset `x`.
    #[must_use]
    pub fn date_at(&self, x: f64) -> DateTime<Utc> {
        to_date(x, self.origin, self.pixels_per_day)
    }

    /// Converts a pixel distance to a duration, rounded to the millisecond.
    #[must_use]
    pub fn delta_for(&self, dx: f64) -> TimeDelta {
        let at = self.date_at(dx);
        at - self.origin
    }

    /// Returns `true` when zoomed out far enough to use compact presets.
    #[must_use]
    pub fn is_compact(&self) -> bool {
        self.pixels_per_day < COMPACT_PIXELS_PER_DAY
    }
}
