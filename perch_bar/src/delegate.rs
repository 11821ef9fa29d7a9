// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard hooks for the host screen.

use perch_animation::AnimationBlock;
use perch_height::HeightDelegate;
use perch_keyboard::KeyboardNotification;

/// Hooks a host screen implements to follow the keyboard.
///
/// Blocks returned from the `will` hooks run inside an animation that matches
/// the keyboard's own, so scroll insets can move in lockstep with it.
pub trait KeyboardDelegate {
    /// The keyboard is about to present; `height` is keyboard plus bar once
    /// presented.
    fn keyboard_will_present(&mut self, height: f64) -> Option<AnimationBlock> {
        let _ = height;
        None
    }

    /// The keyboard is about to dismiss.
    ///
    /// `notification` is `None` when the dismissal was synthesized after an
    /// interactive drag ended without the keyboard taking over.
    fn keyboard_will_dismiss(
        &mut self,
        notification: Option<&KeyboardNotification>,
    ) -> Option<AnimationBlock> {
        let _ = notification;
        None
    }

    /// The visible keyboard plus bar height changed to `height`.
    fn keyboard_did_change_height(&mut self, height: f64) {
        let _ = height;
    }
}

impl KeyboardDelegate for () {}

/// Everything an [`AccessoryBar`](crate::AccessoryBar) asks of its host screen.
///
/// Implemented for every type that implements both halves.
pub trait BarDelegate: HeightDelegate + KeyboardDelegate {}

impl<T: HeightDelegate + KeyboardDelegate + ?Sized> BarDelegate for T {}
