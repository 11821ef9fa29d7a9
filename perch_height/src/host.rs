// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform layout seam.

use kurbo::Rect;
use perch_animation::Animator;

/// The platform view hierarchy around the bar.
///
/// The controller owns both height values; the host only reports screen
/// geometry and lays views out when told to.
pub trait BarHost: Animator {
    /// Height of the screen.
    fn screen_height(&self) -> f64;

    /// Frame of the keyboard container the bar is docked in, in screen
    /// coordinates. The container spans keyboard and bar.
    ///
    /// `None` while the bar is not part of a keyboard hierarchy.
    fn keyboard_container(&self) -> Option<Rect>;

    /// The content container height changed to `height`; lay it out now.
    fn layout_content(&mut self, height: f64);

    /// The outer height changed to `height`; lay the bar out now.
    fn layout_bar(&mut self, height: f64);
}
