// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};
use strata_gesture::InteractionConfig;
use strata_model::PlaybackConfig;
use strata_tracks::LayoutConfig;
use strata_view::ViewportConfig;
use strata_virtual::VirtualizeConfig;

/// Why an [`EngineConfig`] was rejected.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The document is not valid JSON for this schema.
    #[error("config document: {0}")]
    Json(#[from] serde_json::Error),
    /// A value is out of range.
    #[error("config field `{field}` {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Every tunable of a [`TimelineCanvas`](crate::TimelineCanvas).
///
/// Missing sections and fields take their defaults, so `{}` is a valid
/// document:
///
/// ```
/// use strata::EngineConfig;
///
/// let config = EngineConfig::from_json_str(r#"{ "virtualize": { "buffer": 500 } }"#).unwrap();
/// assert_eq!(config.virtualize.buffer, 500.0);
/// assert_eq!(config.layout, Default::default());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Track and row geometry.
    pub layout: LayoutConfig,
    /// Pointer gestures.
    pub interaction: InteractionConfig,
    /// Zoom limits and wheel factors.
    pub viewport: ViewportConfig,
    /// Off-screen buffer.
    pub virtualize: VirtualizeConfig,
    /// Presentation mode timing.
    pub playback: PlaybackConfig,
}

impl EngineConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let v = &self.viewport;
        check("viewport.minPixelsPerDay", v.min_pixels_per_day > 0.0, "must be positive")?;
        check(
            "viewport.maxPixelsPerDay",
            v.max_pixels_per_day >= v.min_pixels_per_day,
            "must not be below minPixelsPerDay",
        )?;
        check("viewport.wheelZoomIn", v.wheel_zoom_in > 1.0, "must be greater than 1")?;
        check(
            "viewport.wheelZoomOut",
            v.wheel_zoom_out > 0.0 && v.wheel_zoom_out < 1.0,
            "must lie strictly between 0 and 1",
        )?;

        let l = &self.layout;
        check("layout.eventHeight", l.event_height > 0.0, "must be positive")?;
        check("layout.compactEventHeight", l.compact_event_height > 0.0, "must be positive")?;
        check("layout.rowGap", l.row_gap >= 0.0, "must not be negative")?;

        let i = &self.interaction;
        check("interaction.clickTolerance", i.click_tolerance >= 0.0, "must not be negative")?;
        check("interaction.rowHeight", i.row_height > 0.0, "must be positive")?;
        check("interaction.compactRowHeight", i.compact_row_height > 0.0, "must be positive")?;
        check("interaction.epochRowHeight", i.epoch_row_height > 0.0, "must be positive")?;

        check("virtualize.buffer", self.virtualize.buffer >= 0.0, "must not be negative")?;
        Ok(())
    }
}

// NaN fails every comparison above, so it is rejected too.
fn check(field: &'static str, ok: bool, reason: &'static str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason })
    }
}
