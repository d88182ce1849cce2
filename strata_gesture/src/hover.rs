// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delayed hover release for milestone markers.
//!
//! Milestone markers are small, so their tooltip stays up for a short grace
//! period after the pointer leaves. Re-entering any marker within that period
//! cancels the pending release.
//!
//! Timestamps are caller-supplied milliseconds from any monotonic clock.
//!
//! ```
//! use strata_gesture::HoverLatch;
//! use strata_model::EventId;
//!
//! let mut hover = HoverLatch::new(300);
//! hover.enter(EventId::from_u128(1));
//! hover.leave(1_000);
//!
//! assert!(!hover.tick(1_200));
//! assert_eq!(hover.hovered(), Some(EventId::from_u128(1)));
//! assert!(hover.tick(1_300));
//! assert_eq!(hover.hovered(), None);
//! ```

use strata_model::EventId;

/// Hovered marker with a delayed release.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoverLatch {
    delay_ms: u64,
    hovered: Option<EventId>,
    release_at: Option<u64>,
}

impl HoverLatch {
    /// Creates a latch that releases `delay_ms` after the pointer leaves.
    #[must_use]
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            hovered: None,
            release_at: None,
        }
    }

    /// The marker currently shown as hovered.
    #[must_use]
    pub fn hovered(&self) -> Option<EventId> {
        self.hovered
    }

    /// The pointer entered `id`. Cancels any pending release.
    pub fn enter(&mut self, id: EventId) {
        self.release_at = None;
        self.hovered = Some(id);
    }

    /// The pointer left the hovered marker at `now_ms`.
    pub fn leave(&mut self, now_ms: u64) {
        if self.hovered.is_some() {
            self.release_at = Some(now_ms.saturating_add(self.delay_ms));
        }
    }

    /// Applies a due release. Returns `true` if the hover was cleared.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.release_at {
            Some(at) if now_ms >= at => {
                self.release_at = None;
                self.hovered = None;
                true
            }
            _ => false,
        }
    }

    /// Returns `true` while a release is scheduled.
    #[must_use]
    pub fn is_releasing(&self) -> bool {
        self.release_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reentering_cancels_release() {
        let mut hover = HoverLatch::new(300);
        hover.enter(EventId::from_u128(1));
        hover.leave(0);
        assert!(hover.is_releasing());

        hover.enter(EventId::from_u128(2));
        assert!(!hover.is_releasing());
        assert!(!hover.tick(10_000));
        assert_eq!(hover.hovered(), Some(EventId::from_u128(2)));
    }

    #[test]
    fn leaving_nothing_schedules_nothing() {
        let mut hover = HoverLatch::new(300);
        hover.leave(0);
        assert!(!hover.is_releasing());
        assert!(!hover.tick(500));
    }
}
