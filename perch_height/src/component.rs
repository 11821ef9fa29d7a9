// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability contract for content hosted inside the bar.

use alloc::boxed::Box;

/// A keyboard-focusable input exposed by a [`Component`].
pub trait InputHandle {
    /// Returns `true` while the input holds keyboard focus.
    fn is_focused(&self) -> bool;

    /// Requests keyboard focus.
    ///
    /// With `animated == false` the input must take focus without running its
    /// usual focus animation; the interactive drag coordinator relies on this
    /// while it is driving the bar height itself.
    fn focus(&mut self, animated: bool);

    /// Gives up keyboard focus.
    fn resign(&mut self);
}

/// Pluggable content hosted by the accessory bar.
///
/// Implementations report the height they want and receive layout callbacks
/// from both phases of a height change:
///
/// 1. [`on_animated_layout`](Component::on_animated_layout) runs inside the
///    animation, while the content container is still interpolating.
/// 2. [`on_post_animation_layout`](Component::on_post_animation_layout) runs
///    once the animation settled and the outer height was committed.
pub trait Component {
    /// The height this component currently wants.
    ///
    /// Recomputed on every call; must be non-negative.
    fn content_height(&self) -> f64;

    /// The input that can take keyboard focus, if any.
    fn focusable_input(&self) -> Option<&dyn InputHandle>;

    /// Mutable access to the input returned by [`focusable_input`](Component::focusable_input).
    fn focusable_input_mut(&mut self) -> Option<&mut dyn InputHandle>;

    /// Called inside the animation block of a height change.
    fn on_animated_layout(&mut self, new_height: f64);

    /// Called once after a height change settled.
    fn on_post_animation_layout(&mut self, new_height: f64);
}

impl<C: Component + ?Sized> Component for Box<C> {
    fn content_height(&self) -> f64 {
        (**self).content_height()
    }

    fn focusable_input(&self) -> Option<&dyn InputHandle> {
        (**self).focusable_input()
    }

    fn focusable_input_mut(&mut self) -> Option<&mut dyn InputHandle> {
        (**self).focusable_input_mut()
    }

    fn on_animated_layout(&mut self, new_height: f64) {
        (**self).on_animated_layout(new_height);
    }

    fn on_post_animation_layout(&mut self, new_height: f64) {
        (**self).on_post_animation_layout(new_height);
    }
}
