// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw keyboard notifications and the classified events derived from them.

use core::time::Duration;

use kurbo::Rect;
use perch_animation::AnimationSpec;

/// Which system keyboard notification was posted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// The keyboard is about to appear.
    WillShow,
    /// The keyboard finished appearing.
    DidShow,
    /// The keyboard is about to disappear.
    WillHide,
    /// The keyboard finished disappearing.
    DidHide,
    /// The keyboard frame is about to change.
    WillChangeFrame,
    /// The keyboard frame changed.
    DidChangeFrame,
}

/// A raw keyboard notification as delivered by the platform.
///
/// Frames are in screen coordinates (origin at the top-left, Y growing down)
/// and include the accessory bar, since the bar is part of the keyboard
/// container.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardNotification {
    /// Notification kind.
    pub kind: NotificationKind,
    /// Keyboard frame before the change.
    pub frame_begin: Rect,
    /// Keyboard frame after the change.
    pub frame_end: Rect,
    /// Duration of the system keyboard animation.
    pub duration: Duration,
    /// Raw system animation curve.
    pub curve: u32,
}

impl KeyboardNotification {
    /// Creates a notification with no animation.
    #[must_use]
    pub fn new(kind: NotificationKind, frame_begin: Rect, frame_end: Rect) -> Self {
        Self {
            kind,
            frame_begin,
            frame_end,
            duration: Duration::ZERO,
            curve: 0,
        }
    }

    /// Returns a copy carrying the given keyboard animation.
    #[must_use]
    pub fn with_animation(self, duration: Duration, curve: u32) -> Self {
        Self {
            duration,
            curve,
            ..self
        }
    }

    /// Animation matching the system keyboard, if the notification is animated.
    #[must_use]
    pub fn animation(&self) -> Option<AnimationSpec> {
        AnimationSpec::from_keyboard(self.duration, self.curve)
    }
}

/// A classified keyboard event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum KeyboardEvent {
    /// The keyboard is presenting from a dismissed state.
    WillPresent {
        /// Height of keyboard plus bar once presented.
        expected_height: f64,
    },
    /// The keyboard is dismissing.
    WillDismiss,
    /// The visible keyboard height changed while presented.
    FrameChanged {
        /// Height of keyboard plus bar currently visible on screen.
        visible_height: f64,
    },
}
