// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};

/// Tunables for pointer interaction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InteractionConfig {
    /// A release closer than this to the press, on both axes, is a click.
    pub click_tolerance: f64,
    /// Vertical drag distance that moves an event by one row.
    pub row_height: f64,
    /// `row_height` under the compact preset.
    pub compact_row_height: f64,
    /// `row_height` for epochs, which ignore the compact preset.
    pub epoch_row_height: f64,
    /// How long a milestone stays hovered after the pointer leaves it, in ms.
    pub hover_leave_delay_ms: u64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            click_tolerance: 5.0,
            row_height: 44.0,
            compact_row_height: 28.0,
            epoch_row_height: 44.0,
            hover_leave_delay_ms: 300,
        }
    }
}

impl InteractionConfig {
    /// Drag row height for an event, given whether it is an epoch and whether
    /// the compact preset is active.
    #[must_use]
    pub fn drag_row_height(&self, is_epoch: bool, compact: bool) -> f64 {
        if is_epoch {
            self.epoch_row_height
        } else if compact {
            self.compact_row_height
        } else {
            self.row_height
        }
    }
}
