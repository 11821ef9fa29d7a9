// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard presentation state machine.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::{KeyboardEvent, KeyboardNotification, NotificationKind};

/// Tolerance used when comparing frame heights reported by the platform.
const FRAME_EPSILON: f64 = 0.01;

/// Presentation state of the keyboard as seen by the bar.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyboardState {
    /// Only the bar is on screen.
    #[default]
    Dismissed,
    /// The keyboard is on screen below the bar.
    Presented,
}

/// Bar geometry sampled at the time a notification is handled.
///
/// The tracker does not own any layout; the caller fills this in from the
/// height controller and host right before calling
/// [`KeyboardFrameTracker::handle`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct KeyboardContext {
    /// Height of the screen.
    pub screen_height: f64,
    /// Current frame height of the bar (its outer height).
    pub bar_height: f64,
    /// Height committed to the outer constraint.
    pub applied_height: f64,
    /// Keyboard plus bar height currently visible on screen.
    pub visible_height: f64,
    /// Keyboard plus bar height once fully presented.
    pub presented_height: f64,
    /// Whether a height animation is in flight on the content container.
    pub content_animating: bool,
    /// Whether an interactive drag session currently owns the bar.
    pub drag_active: bool,
}

/// Turns the raw keyboard notification stream into [`KeyboardEvent`]s.
///
/// The raw stream is noisy during interactive (finger-driven) dismissal: when
/// the user drags the keyboard down and then lets it spring back, the platform
/// posts a will-show that looks like a fresh presentation, and a cancelled
/// dismissal can be followed by a will-hide reporting an impossible frame. The
/// tracker filters both:
///
/// - `WillShow` is accepted only while [`KeyboardState::Dismissed`], only if the
///   end frame height differs from the bar height (the keyboard itself is coming
///   up, not just the bar), and only if the begin and end heights match.
/// - `WillHide` is accepted only if the visible height implied by its end frame
///   lies within `[0, applied_height]`.
/// - `DidChangeFrame` is forwarded only while presented, with no height
///   animation in flight and no interactive drag session active.
///
/// All other notification kinds are ignored.
///
/// While [suspended](KeyboardFrameTracker::suspend) the tracker ignores every
/// notification; the interactive drag coordinator suspends it while it drives
/// the bar height itself.
#[derive(Clone, Debug)]
pub struct KeyboardFrameTracker {
    state: KeyboardState,
    observing: bool,
}

impl Default for KeyboardFrameTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardFrameTracker {
    /// Creates a tracker in the dismissed state, observing notifications.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: KeyboardState::Dismissed,
            observing: true,
        }
    }

    /// Current presentation state.
    #[must_use]
    pub const fn state(&self) -> KeyboardState {
        self.state
    }

    /// Returns `true` while the keyboard is presented.
    #[must_use]
    pub fn is_presented(&self) -> bool {
        self.state == KeyboardState::Presented
    }

    /// Returns `true` unless the tracker is suspended.
    #[must_use]
    pub const fn is_observing(&self) -> bool {
        self.observing
    }

    /// Stops reacting to notifications until [`resume`](Self::resume) is called.
    pub fn suspend(&mut self) {
        if self.observing {
            log::debug!("keyboard tracker suspended");
            self.observing = false;
        }
    }

    /// Resumes reacting to notifications.
    pub fn resume(&mut self) {
        if !self.observing {
            log::debug!("keyboard tracker resumed");
            self.observing = true;
        }
    }

    /// Classifies one raw notification.
    ///
    /// Returns the event to forward to the delegate, or `None` when the
    /// notification was filtered out.
    pub fn handle(
        &mut self,
        notification: &KeyboardNotification,
        cx: &KeyboardContext,
    ) -> Option<KeyboardEvent> {
        if !self.observing {
            log::trace!("ignoring {:?} while suspended", notification.kind);
            return None;
        }
        match notification.kind {
            NotificationKind::WillShow => self.will_show(notification, cx),
            NotificationKind::WillHide => self.will_hide(notification, cx),
            NotificationKind::DidChangeFrame => self.did_change_frame(cx),
            NotificationKind::DidShow
            | NotificationKind::DidHide
            | NotificationKind::WillChangeFrame => None,
        }
    }

    /// Moves to [`KeyboardState::Presented`] without a notification.
    ///
    /// Returns `None` if already presented, so two `WillPresent` events are never
    /// produced without a `WillDismiss` in between.
    pub fn force_present(&mut self, expected_height: f64) -> Option<KeyboardEvent> {
        if self.is_presented() {
            return None;
        }
        log::debug!("keyboard presented (reconciled), expected height {expected_height}");
        self.state = KeyboardState::Presented;
        Some(KeyboardEvent::WillPresent { expected_height })
    }

    /// Moves to [`KeyboardState::Dismissed`] without a notification.
    pub fn force_dismiss(&mut self) -> KeyboardEvent {
        log::debug!("keyboard dismissed (reconciled)");
        self.state = KeyboardState::Dismissed;
        KeyboardEvent::WillDismiss
    }

    fn will_show(
        &mut self,
        notification: &KeyboardNotification,
        cx: &KeyboardContext,
    ) -> Option<KeyboardEvent> {
        let end = notification.frame_end.height();
        let begin = notification.frame_begin.height();
        let keyboard_coming_up = !approx_eq(end, cx.bar_height);
        let steady_frame = approx_eq(begin, end);
        if self.state != KeyboardState::Dismissed || !keyboard_coming_up || !steady_frame {
            log::trace!(
                "filtered will-show: state {:?}, begin {begin}, end {end}, bar {}",
                self.state,
                cx.bar_height
            );
            return None;
        }
        log::debug!("keyboard presenting, expected height {}", cx.presented_height);
        self.state = KeyboardState::Presented;
        Some(KeyboardEvent::WillPresent {
            expected_height: cx.presented_height,
        })
    }

    fn will_hide(
        &mut self,
        notification: &KeyboardNotification,
        cx: &KeyboardContext,
    ) -> Option<KeyboardEvent> {
        let visible = cx.screen_height - notification.frame_end.y0;
        if visible < -FRAME_EPSILON || visible > cx.applied_height + FRAME_EPSILON {
            log::trace!(
                "filtered will-hide: visible {visible} outside [0, {}]",
                cx.applied_height
            );
            return None;
        }
        log::debug!("keyboard dismissing");
        self.state = KeyboardState::Dismissed;
        Some(KeyboardEvent::WillDismiss)
    }

    fn did_change_frame(&self, cx: &KeyboardContext) -> Option<KeyboardEvent> {
        if self.state != KeyboardState::Presented || cx.content_animating || cx.drag_active {
            return None;
        }
        Some(KeyboardEvent::FrameChanged {
            visible_height: cx.visible_height,
        })
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < FRAME_EPSILON
}
