// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host screen hooks consulted during height negotiation.

use perch_animation::AnimationBlock;

/// Hooks a host screen implements to bound, veto, and follow height changes.
///
/// Every method has a default, so `()` is a complete delegate that accepts
/// every suggestion and adds nothing to the animation.
pub trait HeightDelegate {
    /// Topmost screen Y the bar's top edge may reach.
    ///
    /// `None` falls back to [`HeightConfig::top_bar_height`](crate::HeightConfig::top_bar_height).
    fn maximum_bar_y(&self) -> Option<f64> {
        None
    }

    /// Final say over the next height.
    ///
    /// `suggested` is already clamped to the allowed range; `current` is the
    /// content container's current height.
    fn next_height(&mut self, suggested: f64, current: f64) -> f64 {
        let _ = current;
        suggested
    }

    /// Called right before the bar animates to `height`.
    ///
    /// `keyboard_height` is the keyboard container height the bar will produce,
    /// bar included. A returned block runs inside the same animation as the
    /// bar, which is how hosts keep scroll insets in lockstep.
    fn will_animate_to_height(
        &mut self,
        height: f64,
        keyboard_height: f64,
    ) -> Option<AnimationBlock> {
        let _ = (height, keyboard_height);
        None
    }

    /// Called once the outer height was committed.
    fn did_animate_to_height(&mut self, height: f64, keyboard_height: f64) {
        let _ = (height, keyboard_height);
    }
}

impl HeightDelegate for () {}
