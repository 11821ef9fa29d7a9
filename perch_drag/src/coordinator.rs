// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pull-to-engage state machine.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::{EngageContext, PanState, ScrollSample};

/// Tolerance for deciding the keyboard reached its presented height.
const HEIGHT_EPSILON: f64 = 0.01;

/// Phase of an interactive drag session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// No pan in progress.
    #[default]
    Idle,
    /// The surface is being panned but the bar is not engaged.
    Dragging,
    /// The pan reached the content end and is pulling the bar open.
    Engaging,
}

/// Work the bar has to do in response to a drag event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DragAction {
    /// Stop observing keyboard notifications, set the outer height to
    /// `outer_height` without animation, and focus the input without its
    /// focus animation.
    Engage {
        /// Outer height to apply.
        outer_height: f64,
    },
    /// Forward the visible height to the delegate.
    FrameChanged {
        /// Keyboard plus bar height currently visible.
        visible_height: f64,
    },
    /// Snap the outer height back to the content height and resume observing
    /// keyboard notifications.
    Disengage,
}

/// Tracks one scroll surface and decides when a drag should pull the bar open.
///
/// Feed it the surface's pan gesture through [`on_pan`](Self::on_pan) and its
/// offset changes through [`on_scroll`](Self::on_scroll). Events for any
/// surface other than the engaged one are ignored. Subscription is explicit:
/// [`engage`](Self::engage) starts tracking a surface and
/// [`release`](Self::release) stops.
///
/// ```
/// use kurbo::Point;
/// use perch_drag::{DragAction, EngageContext, InteractiveDragCoordinator, PanState, ScrollSample};
///
/// let mut drag = InteractiveDragCoordinator::new();
/// drag.engage("messages");
///
/// let at_end = ScrollSample {
///     content_offset_y: 456.0,
///     content_height: 1000.0,
///     viewport_height: 600.0,
///     top_inset: 0.0,
///     bottom_inset: 56.0,
/// };
/// let cx = EngageContext {
///     applied_height: 44.0,
///     has_focusable_input: true,
///     keyboard_presented: false,
///     visible_height: 44.0,
///     presented_height: 304.0,
///     pan_location: Point::new(160.0, -12.0),
/// };
///
/// drag.on_pan(&"messages", PanState::Began);
/// let action = drag.on_scroll(&"messages", &at_end, &cx);
/// assert_eq!(action, Some(DragAction::Engage { outer_height: 56.0 }));
/// assert_eq!(drag.on_pan(&"messages", PanState::Ended), Some(DragAction::Disengage));
/// ```
#[derive(Clone, Debug)]
pub struct InteractiveDragCoordinator<S> {
    surface: Option<S>,
    phase: DragPhase,
    keyboard_took_over: bool,
}

impl<S> Default for InteractiveDragCoordinator<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> InteractiveDragCoordinator<S> {
    /// Creates an idle coordinator with no surface.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            surface: None,
            phase: DragPhase::Idle,
            keyboard_took_over: false,
        }
    }

    /// The tracked surface, if any.
    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Returns `true` while a pan on the tracked surface is in progress.
    #[must_use]
    pub fn is_session_active(&self) -> bool {
        self.phase != DragPhase::Idle
    }

    /// Returns `true` while the drag pulls the bar open.
    #[must_use]
    pub fn is_engaging(&self) -> bool {
        self.phase == DragPhase::Engaging
    }

    /// Stops tracking the current surface.
    ///
    /// Returns [`DragAction::Disengage`] if the bar was engaged.
    pub fn release(&mut self) -> Option<DragAction> {
        let action = self.end_session();
        if self.surface.take().is_some() {
            log::debug!("interactive drag surface released");
        }
        action
    }

    fn end_session(&mut self) -> Option<DragAction> {
        let was_engaging = self.is_engaging();
        self.phase = DragPhase::Idle;
        self.keyboard_took_over = false;
        if was_engaging {
            log::debug!("interactive drag disengaged");
            Some(DragAction::Disengage)
        } else {
            None
        }
    }
}

impl<S: PartialEq> InteractiveDragCoordinator<S> {
    /// Starts tracking `surface`, replacing any previous one.
    ///
    /// Returns [`DragAction::Disengage`] if the previous surface had the bar
    /// engaged.
    pub fn engage(&mut self, surface: S) -> Option<DragAction> {
        let action = self.release();
        log::debug!("interactive drag surface engaged");
        self.surface = Some(surface);
        action
    }

    fn is_tracked(&self, surface: &S) -> bool {
        self.surface.as_ref() == Some(surface)
    }

    /// Handles a pan gesture state change on `surface`.
    pub fn on_pan(&mut self, surface: &S, state: PanState) -> Option<DragAction> {
        if !self.is_tracked(surface) {
            return None;
        }
        match state {
            PanState::Began => {
                if self.phase == DragPhase::Idle {
                    self.phase = DragPhase::Dragging;
                }
                None
            }
            PanState::Changed => None,
            PanState::Ended | PanState::Cancelled => self.end_session(),
        }
    }

    /// Handles a content offset change on `surface`.
    ///
    /// While dragging, a surface at its content end with a focusable input
    /// and no keyboard on screen engages the bar. The outer height becomes
    /// the applied height plus the distance of the finger from the bar. Later
    /// offset changes stream the visible height until it reaches the
    /// presented height; from then on the keyboard owns the motion and
    /// nothing is streamed until the session ends.
    pub fn on_scroll(
        &mut self,
        surface: &S,
        sample: &ScrollSample,
        cx: &EngageContext,
    ) -> Option<DragAction> {
        if !self.is_tracked(surface) {
            return None;
        }
        match self.phase {
            DragPhase::Idle => None,
            DragPhase::Dragging => {
                if !sample.is_scrolled_to_end() || !cx.has_focusable_input || cx.keyboard_presented
                {
                    return None;
                }
                let outer_height = cx.applied_height + cx.pan_location.y.abs();
                log::debug!("interactive drag engaged, outer height {outer_height}");
                self.phase = DragPhase::Engaging;
                self.keyboard_took_over = false;
                Some(DragAction::Engage { outer_height })
            }
            DragPhase::Engaging => {
                if self.keyboard_took_over {
                    return None;
                }
                if (cx.presented_height - cx.visible_height).abs() < HEIGHT_EPSILON {
                    log::trace!("keyboard fully extended; drag streaming stops");
                    self.keyboard_took_over = true;
                    return None;
                }
                Some(DragAction::FrameChanged {
                    visible_height: cx.visible_height,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    const LIST: u8 = 1;
    const OTHER: u8 = 2;

    fn at_end() -> ScrollSample {
        ScrollSample {
            content_offset_y: 456.0,
            content_height: 1000.0,
            viewport_height: 600.0,
            top_inset: 0.0,
            bottom_inset: 56.0,
        }
    }

    fn mid_list() -> ScrollSample {
        ScrollSample {
            content_offset_y: 100.0,
            ..at_end()
        }
    }

    fn cx() -> EngageContext {
        EngageContext {
            applied_height: 44.0,
            has_focusable_input: true,
            keyboard_presented: false,
            visible_height: 44.0,
            presented_height: 304.0,
            pan_location: Point::new(100.0, -20.0),
        }
    }

    fn dragging() -> InteractiveDragCoordinator<u8> {
        let mut drag = InteractiveDragCoordinator::new();
        assert_eq!(drag.engage(LIST), None);
        assert_eq!(drag.on_pan(&LIST, PanState::Began), None);
        assert_eq!(drag.phase(), DragPhase::Dragging);
        drag
    }

    #[test]
    fn scrolling_without_a_pan_does_nothing() {
        let mut drag = InteractiveDragCoordinator::new();
        drag.engage(LIST);
        assert_eq!(drag.on_scroll(&LIST, &at_end(), &cx()), None);
        assert_eq!(drag.phase(), DragPhase::Idle);
    }

    #[test]
    fn engages_at_content_end() {
        let mut drag = dragging();
        assert_eq!(drag.on_scroll(&LIST, &mid_list(), &cx()), None);
        assert_eq!(
            drag.on_scroll(&LIST, &at_end(), &cx()),
            Some(DragAction::Engage { outer_height: 64.0 })
        );
        assert!(drag.is_engaging());
        assert!(drag.is_session_active());
    }

    #[test]
    fn engagement_requires_input_and_hidden_keyboard() {
        let mut drag = dragging();
        let no_input = EngageContext {
            has_focusable_input: false,
            ..cx()
        };
        assert_eq!(drag.on_scroll(&LIST, &at_end(), &no_input), None);
        let keyboard_up = EngageContext {
            keyboard_presented: true,
            ..cx()
        };
        assert_eq!(drag.on_scroll(&LIST, &at_end(), &keyboard_up), None);
        assert_eq!(drag.phase(), DragPhase::Dragging);
    }

    #[test]
    fn streams_until_fully_presented() {
        let mut drag = dragging();
        drag.on_scroll(&LIST, &at_end(), &cx());

        let partial = EngageContext {
            visible_height: 180.0,
            ..cx()
        };
        assert_eq!(
            drag.on_scroll(&LIST, &at_end(), &partial),
            Some(DragAction::FrameChanged {
                visible_height: 180.0
            })
        );

        let full = EngageContext {
            visible_height: 304.0,
            ..cx()
        };
        assert_eq!(drag.on_scroll(&LIST, &at_end(), &full), None);
        // Once the keyboard took over, streaming stays off for this session.
        assert_eq!(drag.on_scroll(&LIST, &at_end(), &partial), None);
    }

    #[test]
    fn ending_the_pan_disengages_once() {
        let mut drag = dragging();
        drag.on_scroll(&LIST, &at_end(), &cx());
        assert_eq!(
            drag.on_pan(&LIST, PanState::Cancelled),
            Some(DragAction::Disengage)
        );
        assert_eq!(drag.phase(), DragPhase::Idle);
        assert_eq!(drag.on_pan(&LIST, PanState::Ended), None);
    }

    #[test]
    fn ending_a_plain_drag_has_no_action() {
        let mut drag = dragging();
        assert_eq!(drag.on_pan(&LIST, PanState::Ended), None);
        assert!(!drag.is_session_active());
    }

    #[test]
    fn other_surfaces_are_ignored() {
        let mut drag = dragging();
        assert_eq!(drag.on_scroll(&OTHER, &at_end(), &cx()), None);
        assert_eq!(drag.on_pan(&OTHER, PanState::Ended), None);
        assert_eq!(drag.phase(), DragPhase::Dragging);
    }

    #[test]
    fn switching_surfaces_disengages() {
        let mut drag = dragging();
        drag.on_scroll(&LIST, &at_end(), &cx());
        assert_eq!(drag.engage(OTHER), Some(DragAction::Disengage));
        assert_eq!(drag.surface(), Some(&OTHER));
        assert_eq!(drag.phase(), DragPhase::Idle);
        assert_eq!(drag.on_pan(&LIST, PanState::Began), None);
        assert_eq!(drag.phase(), DragPhase::Idle);
    }

    #[test]
    fn release_forgets_the_surface() {
        let mut drag = dragging();
        assert_eq!(drag.release(), None);
        assert_eq!(drag.surface(), None);
        assert_eq!(drag.on_pan(&LIST, PanState::Began), None);
        assert_eq!(drag.phase(), DragPhase::Idle);
    }
}
