// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Date-axis labels.
//!
//! Granularity follows the zoom: days from 80 px/day, weeks from 20, months
//! from 2, and years below that. Year labels skip years when a year is too
//! narrow to hold one.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, Utc};
use strata_view::TimeAxis;

/// Zoom, in pixels per day, from which every day is labelled.
pub const DAY_LABELS_FROM: f64 = 80.0;
/// Zoom from which every seventh day is labelled.
pub const WEEK_LABELS_FROM: f64 = 20.0;
/// Zoom from which every month is labelled.
pub const MONTH_LABELS_FROM: f64 = 2.0;

/// Spacing of axis labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LabelGranularity {
    /// One label per day, `5 Jun`.
    Day,
    /// One label per seven days, `5 Jun`.
    Week,
    /// One label per month, `Jun 2022`.
    Month,
    /// One label per year, or per 5, 10, or 25 years, `2022`.
    Year,
}

impl LabelGranularity {
    /// Granularity for a zoom level.
    #[must_use]
    pub fn for_zoom(pixels_per_day: f64) -> Self {
        if pixels_per_day >= DAY_LABELS_FROM {
            Self::Day
        } else if pixels_per_day >= WEEK_LABELS_FROM {
            Self::Week
        } else if pixels_per_day >= MONTH_LABELS_FROM {
            Self::Month
        } else {
            Self::Year
        }
    }

    fn format(self) -> &'static str {
        match self {
            Self::Day | Self::Week => "%-d %b",
            Self::Month => "%b %Y",
            Self::Year => "%Y",
        }
    }
}

/// One tick on the date axis.
#[derive(Clone, Debug, PartialEq)]
pub struct DateLabel {
    /// Instant the label marks, midnight UTC.
    pub date: DateTime<Utc>,
    /// Content-space x of `date`.
    pub x: f64,
    /// Display text.
    pub text: String,
    /// Spacing this label belongs to.
    pub granularity: LabelGranularity,
}

/// Years between labels when zoomed out to year granularity.
///
/// Chosen from the pixel width of one year: under 10px every 25th year,
/// under 20px every 10th, under 40px every 5th, otherwise every year.
#[must_use]
pub fn year_step(pixels_per_day: f64) -> i32 {
    let year_width = pixels_per_day * 365.0;
    if year_width < 10.0 {
        25
    } else if year_width < 20.0 {
        10
    } else if year_width < 40.0 {
        5
    } else {
        1
    }
}

/// Labels covering `[from, to]` at the granularity `axis` calls for.
///
/// Day and week ticks start at the midnight on or before `from`; month and
/// year ticks start at the first of the month or year containing `from`. So
/// the first label may sit slightly left of `from`.
#[must_use]
pub fn date_labels(from: DateTime<Utc>, to: DateTime<Utc>, axis: &TimeAxis) -> Vec<DateLabel> {
    if from >= to {
        return Vec::new();
    }
    let granularity = LabelGranularity::for_zoom(axis.pixels_per_day);
    let first = from.date_naive();
    let last = to.date_naive();

    let dates: Vec<NaiveDate> = match granularity {
        LabelGranularity::Day => days(first, last).collect(),
        LabelGranularity::Week => days(first, last).step_by(7).collect(),
        LabelGranularity::Month => months(first, last),
        LabelGranularity::Year => {
            let step = year_step(axis.pixels_per_day);
            (first.year()..=last.year())
                .filter(|y| y.rem_euclid(step) == 0)
                .filter_map(|y| NaiveDate::from_ymd_opt(y, 1, 1))
                .collect()
        }
    };

    let fmt = granularity.format();
    let labels: Vec<DateLabel> = dates
        .into_iter()
        .map(|d| {
            let date = d.and_time(NaiveTime::MIN).and_utc();
            DateLabel {
                date,
                x: axis.x_of(date),
                text: d.format(fmt).to_string(),
                granularity,
            }
        })
        .collect();
    tracing::trace!(?granularity, count = labels.len(), "date labels");
    labels
}

fn days(first: NaiveDate, last: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    first.iter_days().take_while(move |d| *d <= last)
}

fn months(first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut month = first.with_day(1);
    while let Some(m) = month.filter(|m| *m <= last) {
        out.push(m);
        month = m.checked_add_months(Months::new(1));
    }
    out
}
