// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inputs sampled from the tracked scroll surface.

use kurbo::Point;

/// Tolerance used when comparing scroll offsets.
const OFFSET_EPSILON: f64 = 0.5;

/// Phase of the scroll surface's pan gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PanState {
    /// The finger went down and started panning.
    Began,
    /// The pan moved.
    Changed,
    /// The finger lifted.
    Ended,
    /// The system cancelled the gesture.
    Cancelled,
}

/// Scroll geometry of the tracked surface after an offset change.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScrollSample {
    /// Vertical content offset.
    pub content_offset_y: f64,
    /// Height of the scrollable content.
    pub content_height: f64,
    /// Height of the surface's viewport.
    pub viewport_height: f64,
    /// Top content inset.
    pub top_inset: f64,
    /// Bottom content inset, usually covering the bar.
    pub bottom_inset: f64,
}

impl ScrollSample {
    /// Offset at which the last row of content sits right above the bottom inset.
    ///
    /// Content shorter than the viewport is pinned to the top inset instead.
    #[must_use]
    pub fn end_offset(&self) -> f64 {
        let available = self.viewport_height - self.bottom_inset;
        (self.content_height - available).max(-self.top_inset)
    }

    /// Returns `true` when the surface rests at, or is pulled past, its content end.
    #[must_use]
    pub fn is_scrolled_to_end(&self) -> bool {
        self.content_offset_y >= self.end_offset() - OFFSET_EPSILON
    }
}

/// Bar state the coordinator needs to decide on engagement.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EngageContext {
    /// Height committed to the bar's outer constraint.
    pub applied_height: f64,
    /// Whether the selected component exposes a focusable input.
    pub has_focusable_input: bool,
    /// Whether the keyboard is already presented.
    pub keyboard_presented: bool,
    /// Keyboard plus bar height currently visible.
    pub visible_height: f64,
    /// Keyboard plus bar height once fully presented.
    pub presented_height: f64,
    /// Pan location relative to the bar's content container. Negative Y lies
    /// above the bar.
    pub pan_location: Point,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(offset: f64) -> ScrollSample {
        ScrollSample {
            content_offset_y: offset,
            content_height: 1000.0,
            viewport_height: 600.0,
            top_inset: 64.0,
            bottom_inset: 44.0,
        }
    }

    #[test]
    fn end_offset_accounts_for_bottom_inset() {
        assert_eq!(sample(0.0).end_offset(), 444.0);
        assert!(sample(444.0).is_scrolled_to_end());
        assert!(sample(444.3).is_scrolled_to_end());
        // Rubber-banding past the end still counts.
        assert!(sample(480.0).is_scrolled_to_end());
        assert!(!sample(300.0).is_scrolled_to_end());
    }

    #[test]
    fn short_content_is_pinned_to_top_inset() {
        let short = ScrollSample {
            content_height: 100.0,
            content_offset_y: -64.0,
            ..sample(0.0)
        };
        assert_eq!(short.end_offset(), -64.0);
        assert!(short.is_scrolled_to_end());
    }
}
