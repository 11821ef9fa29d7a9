// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The composed accessory bar.

use alloc::vec::Vec;

use kurbo::Point;
use perch_animation::{AnimationSpec, TransitionId, perform};
use perch_drag::{
    DragAction, DragPhase, EngageContext, InteractiveDragCoordinator, PanState, ScrollSample,
};
use perch_height::{
    BarHost, Component, HeightChange, HeightConfig, HeightController, HeightError, InputHandle,
};
use perch_keyboard::{
    KeyboardContext, KeyboardEvent, KeyboardFrameTracker, KeyboardNotification, KeyboardState,
};

use crate::{BarDelegate, StandardComponent};

/// A keyboard accessory bar hosting pluggable components.
///
/// The bar glues together the [`HeightController`], a [`KeyboardFrameTracker`]
/// and an [`InteractiveDragCoordinator`], and owns the host, the delegate and
/// the components:
///
/// - `H` is the platform [`BarHost`] the bar lays out into.
/// - `D` is the host screen's [`BarDelegate`]; `()` accepts every default.
/// - `C` is the component type, [`StandardComponent`] unless the host brings
///   its own (a `Box<dyn Component>` works too).
/// - `S` identifies scroll surfaces for pull-to-engage.
///
/// All entry points are synchronous and meant to be called from the UI thread,
/// in the order the platform delivers the underlying events.
#[derive(Debug)]
pub struct AccessoryBar<H, D, C = StandardComponent, S = u64> {
    host: H,
    height: HeightController<D>,
    keyboard: KeyboardFrameTracker,
    drag: InteractiveDragCoordinator<S>,
    components: Vec<C>,
    selected: Option<usize>,
}

fn selected_component<C: Component>(
    components: &mut [C],
    selected: Option<usize>,
) -> Option<&mut dyn Component> {
    let component: &mut dyn Component = components.get_mut(selected?)?;
    Some(component)
}

impl<H, D, C, S> AccessoryBar<H, D, C, S>
where
    H: BarHost,
    D: BarDelegate,
    C: Component,
    S: PartialEq,
{
    /// Creates a bar with no components.
    #[must_use]
    pub fn new(host: H, config: HeightConfig, delegate: D) -> Self {
        Self::with_components(host, config, delegate, Vec::new())
    }

    /// Creates a bar showing the first of `components`.
    ///
    /// The initial height is the first component's content height; the bar is
    /// not resized until it is [attached](Self::attach_to_keyboard).
    #[must_use]
    pub fn with_components(
        host: H,
        config: HeightConfig,
        delegate: D,
        components: Vec<C>,
    ) -> Self {
        let initial = components
            .first()
            .map_or(config.minimum_height, |c| c.content_height());
        let selected = (!components.is_empty()).then_some(0);
        Self {
            host,
            height: HeightController::with_initial_height(config, delegate, initial),
            keyboard: KeyboardFrameTracker::new(),
            drag: InteractiveDragCoordinator::new(),
            components,
            selected,
        }
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The delegate.
    #[must_use]
    pub fn delegate(&self) -> &D {
        self.height.delegate()
    }

    /// Mutable access to the delegate.
    pub fn delegate_mut(&mut self) -> &mut D {
        self.height.delegate_mut()
    }

    /// The height controller.
    #[must_use]
    pub fn controller(&self) -> &HeightController<D> {
        &self.height
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &HeightConfig {
        self.height.config()
    }

    /// Mutable configuration. Changes take effect on the next height change.
    pub fn config_mut(&mut self) -> &mut HeightConfig {
        self.height.config_mut()
    }

    // --- Keyboard hierarchy ---

    /// Docks the bar in the keyboard hierarchy.
    ///
    /// The outer height constraint is created at the current content height.
    pub fn attach_to_keyboard(&mut self) {
        let height = self.height.height();
        self.height.attach_outer_constraint(height);
    }

    /// Removes the bar from the keyboard hierarchy. Height changes fail with
    /// [`HeightError::OuterConstraintMissing`] until it is attached again.
    pub fn detach_from_keyboard(&mut self) {
        self.height.detach_outer_constraint();
    }

    // --- Height ---

    /// Most recent target height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height.height()
    }

    /// Sets the height to the selected component's content height.
    ///
    /// Animates when [`HeightConfig::animate_on_reload`] is set, with `spec`
    /// or the configured animation.
    pub fn reload_height(
        &mut self,
        spec: Option<&AnimationSpec>,
    ) -> Result<HeightChange, HeightError> {
        let component = selected_component(&mut self.components, self.selected);
        self.height.reload_height(&mut self.host, component, spec)
    }

    /// Sets the bar height. See [`HeightController::set_height`].
    pub fn set_height(
        &mut self,
        height: f64,
        animated: bool,
        spec: Option<&AnimationSpec>,
    ) -> Result<HeightChange, HeightError> {
        let component = selected_component(&mut self.components, self.selected);
        self.height
            .set_height(&mut self.host, component, height, animated, spec)
    }

    /// Sets the bar height without animating.
    pub fn set_height_immediately(&mut self, height: f64) -> Result<HeightChange, HeightError> {
        self.set_height(height, false, None)
    }

    /// Changes the minimum height and reloads.
    pub fn set_minimum_height(
        &mut self,
        minimum_height: f64,
    ) -> Result<HeightChange, HeightError> {
        self.height.config_mut().minimum_height = minimum_height;
        self.reload_height(None)
    }

    /// Reports that the platform animation for `transition` finished, running
    /// the second phase of that height change.
    ///
    /// Returns `false` for unknown or already completed transitions.
    pub fn complete_transition(&mut self, transition: TransitionId) -> bool {
        let component = selected_component(&mut self.components, self.selected);
        self.height
            .complete_transition(&mut self.host, component, transition)
    }

    /// Returns `true` while a height change awaits completion.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.height.is_animating()
    }

    /// Keyboard plus bar height currently visible on screen.
    #[must_use]
    pub fn visible_height(&self) -> f64 {
        self.height.visible_height(&self.host)
    }

    /// Keyboard plus bar height once fully presented.
    #[must_use]
    pub fn presented_height(&self) -> f64 {
        self.height.presented_height(&self.host)
    }

    /// Largest height the bar may currently take.
    #[must_use]
    pub fn maximum_height(&self) -> f64 {
        self.height.maximum_height(&self.host)
    }

    // --- Components ---

    /// All components.
    #[must_use]
    pub fn components(&self) -> &[C] {
        &self.components
    }

    /// Replaces the components, selects the first one and reloads.
    pub fn set_components(&mut self, components: Vec<C>) -> Result<HeightChange, HeightError> {
        let had_focus = self.resign_selected_input();
        self.components = components;
        let first = (!self.components.is_empty()).then_some(0);
        self.apply_selection(first, had_focus)
    }

    /// The component at `index`.
    #[must_use]
    pub fn component(&self, index: usize) -> Option<&C> {
        self.components.get(index)
    }

    /// Index of the selected component.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// The selected component.
    #[must_use]
    pub fn selected_component(&self) -> Option<&C> {
        self.components.get(self.selected?)
    }

    /// Selects the component at `index`, or nothing.
    ///
    /// If the previously selected input held focus it resigns, and the newly
    /// selected input takes focus. The height is reloaded in every case, even
    /// when the selection did not change. An out of range index is ignored.
    pub fn select_component(
        &mut self,
        index: Option<usize>,
    ) -> Result<HeightChange, HeightError> {
        if index.is_some_and(|i| i >= self.components.len()) {
            log::warn!(
                "cannot select component {index:?} of {}",
                self.components.len()
            );
            return Ok(HeightChange::Unchanged);
        }
        let had_focus = self.resign_selected_input();
        self.apply_selection(index, had_focus)
    }

    /// Edits the component at `index` and reloads if it is selected.
    ///
    /// This is how content changes reach the bar: a text edit, a font change
    /// or a new minimum height all go through here. Returns `None` if there is
    /// no such component.
    ///
    /// The edit always lands. A reload that fails, for instance while the bar
    /// is detached from the keyboard, is logged and leaves the height alone;
    /// call [`reload_height`](Self::reload_height) to observe the error.
    pub fn edit_component<R>(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut C) -> R,
    ) -> Option<R> {
        let component = self.components.get_mut(index)?;
        let result = edit(component);
        if self.selected == Some(index) {
            if let Err(err) = self.reload_height(None) {
                log::debug!("component {index} edited without resizing: {err}");
            }
        }
        Some(result)
    }

    fn selected_input(&self) -> Option<&dyn InputHandle> {
        self.selected_component()?.focusable_input()
    }

    fn selected_input_mut(&mut self) -> Option<&mut dyn InputHandle> {
        let index = self.selected?;
        self.components.get_mut(index)?.focusable_input_mut()
    }

    fn resign_selected_input(&mut self) -> bool {
        match self.selected_input_mut() {
            Some(input) if input.is_focused() => {
                input.resign();
                true
            }
            _ => false,
        }
    }

    fn apply_selection(
        &mut self,
        index: Option<usize>,
        transfer_focus: bool,
    ) -> Result<HeightChange, HeightError> {
        self.selected = index;
        log::debug!("selected component {index:?}");
        if transfer_focus {
            if let Some(input) = self.selected_input_mut() {
                input.focus(true);
            }
        }
        self.reload_height(None)
    }

    // --- Keyboard ---

    /// Presentation state of the keyboard.
    #[must_use]
    pub fn keyboard_state(&self) -> KeyboardState {
        self.keyboard.state()
    }

    /// Returns `true` while the keyboard is presented.
    #[must_use]
    pub fn is_keyboard_presented(&self) -> bool {
        self.keyboard.is_presented()
    }

    /// Feeds one raw keyboard notification to the bar.
    ///
    /// Returns the classified event, after the delegate was told about it and
    /// its block ran inside an animation matching the keyboard's. Returns
    /// `None` for filtered notifications and while an interactive drag has
    /// suspended keyboard observation.
    pub fn handle_keyboard(
        &mut self,
        notification: &KeyboardNotification,
    ) -> Option<KeyboardEvent> {
        let cx = self.keyboard_context();
        let event = self.keyboard.handle(notification, &cx)?;
        let animation = notification.animation();
        self.dispatch_keyboard_event(event, Some(notification), animation.as_ref());
        Some(event)
    }

    fn keyboard_context(&self) -> KeyboardContext {
        let bar_height = self.height.bar_height();
        KeyboardContext {
            screen_height: self.host.screen_height(),
            bar_height,
            applied_height: self.height.applied_height().unwrap_or(bar_height),
            visible_height: self.visible_height(),
            presented_height: self.presented_height(),
            content_animating: self.height.is_animating(),
            drag_active: self.drag.is_session_active(),
        }
    }

    fn dispatch_keyboard_event(
        &mut self,
        event: KeyboardEvent,
        notification: Option<&KeyboardNotification>,
        animation: Option<&AnimationSpec>,
    ) {
        let delegate = self.height.delegate_mut();
        let block = match event {
            KeyboardEvent::WillPresent { expected_height } => {
                delegate.keyboard_will_present(expected_height)
            }
            KeyboardEvent::WillDismiss => delegate.keyboard_will_dismiss(notification),
            KeyboardEvent::FrameChanged { visible_height } => {
                delegate.keyboard_did_change_height(visible_height);
                None
            }
        };
        if let Some(block) = block {
            perform(&mut self.host, animation, block);
        }
    }

    // --- Interactive drag ---

    /// Phase of the interactive drag session.
    #[must_use]
    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    /// Lets drags on `surface` pull the bar open, replacing any previous surface.
    pub fn interactive_engage(&mut self, surface: S) -> Option<DragAction> {
        let action = self.drag.engage(surface);
        self.apply_drag_action(action)
    }

    /// Stops tracking the current drag surface.
    pub fn interactive_release(&mut self) -> Option<DragAction> {
        let action = self.drag.release();
        self.apply_drag_action(action)
    }

    /// Feeds a pan gesture state change of `surface`.
    pub fn pan_changed(&mut self, surface: &S, state: PanState) -> Option<DragAction> {
        let action = self.drag.on_pan(surface, state);
        self.apply_drag_action(action)
    }

    /// Feeds a content offset change of `surface`.
    ///
    /// `pan_location` is the pan's current location relative to the bar's
    /// content container.
    pub fn surface_scrolled(
        &mut self,
        surface: &S,
        sample: &ScrollSample,
        pan_location: Point,
    ) -> Option<DragAction> {
        let cx = EngageContext {
            applied_height: self
                .height
                .applied_height()
                .unwrap_or(self.height.bar_height()),
            has_focusable_input: self
                .selected_component()
                .is_some_and(|c| c.focusable_input().is_some()),
            keyboard_presented: self.keyboard.is_presented(),
            visible_height: self.visible_height(),
            presented_height: self.presented_height(),
            pan_location,
        };
        let action = self.drag.on_scroll(surface, sample, &cx);
        self.apply_drag_action(action)
    }

    fn apply_drag_action(&mut self, action: Option<DragAction>) -> Option<DragAction> {
        match action? {
            DragAction::Engage { outer_height } => {
                self.keyboard.suspend();
                if let Err(err) = self.height.override_outer_height(&mut self.host, outer_height) {
                    log::debug!("drag engaged without resizing: {err}");
                }
                if let Some(input) = self.selected_input_mut() {
                    input.focus(false);
                }
            }
            DragAction::FrameChanged { visible_height } => {
                self.height
                    .delegate_mut()
                    .keyboard_did_change_height(visible_height);
            }
            DragAction::Disengage => {
                if let Err(err) = self.height.restore_outer_height(&mut self.host) {
                    log::debug!("drag disengaged without resizing: {err}");
                }
                self.keyboard.resume();
                self.reconcile_keyboard();
            }
        }
        action
    }

    /// Brings the keyboard tracker back in line after a drag session, during
    /// which it ignored every notification.
    ///
    /// A focused input means the keyboard took over: the tracker is presented,
    /// announcing it if it was not. Otherwise the tracker is dismissed and a
    /// dismissal is always announced.
    fn reconcile_keyboard(&mut self) {
        let focused = self.selected_input().is_some_and(|input| input.is_focused());
        let event = if focused {
            let expected_height = self.presented_height();
            self.keyboard.force_present(expected_height)
        } else {
            Some(self.keyboard.force_dismiss())
        };
        if let Some(event) = event {
            let animation = self.height.config().animation;
            self.dispatch_keyboard_event(event, None, Some(&animation));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KeyboardDelegate, Panel, TextInput};
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;
    use core::time::Duration;
    use kurbo::Rect;
    use perch_animation::{AnimationBlock, Animator};
    use perch_height::HeightDelegate;
    use perch_keyboard::NotificationKind;

    const SCREEN: f64 = 600.0;
    const KEYBOARD: f64 = 260.0;
    const LIST: u64 = 7;

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        Begin(Duration),
        Commit(Option<TransitionId>),
        NextHeight(f64),
        WillPresent(f64),
        WillDismiss(bool),
        DidChangeHeight(f64),
        Block,
    }

    type Journal = Rc<RefCell<Vec<Call>>>;

    /// Keyboard container docked at the bottom of the screen, pushed `sunk`
    /// points below the bottom edge while the keyboard slides in.
    struct Host {
        keyboard: f64,
        sunk: f64,
        bar: f64,
        pending: Vec<TransitionId>,
        journal: Journal,
    }

    impl Animator for Host {
        fn begin(&mut self, spec: &AnimationSpec) {
            self.journal.borrow_mut().push(Call::Begin(spec.duration()));
        }

        fn commit(&mut self, transition: Option<TransitionId>) {
            self.pending.extend(transition);
            self.journal.borrow_mut().push(Call::Commit(transition));
        }
    }

    impl BarHost for Host {
        fn screen_height(&self) -> f64 {
            SCREEN
        }

        fn keyboard_container(&self) -> Option<Rect> {
            let top = SCREEN - self.keyboard - self.bar + self.sunk;
            Some(Rect::new(0.0, top, 320.0, top + self.keyboard + self.bar))
        }

        fn layout_content(&mut self, _height: f64) {}

        fn layout_bar(&mut self, height: f64) {
            self.bar = height;
        }
    }

    struct Delegate {
        journal: Journal,
    }

    impl Delegate {
        fn block(&self) -> Option<AnimationBlock> {
            let journal = self.journal.clone();
            Some(Box::new(move || journal.borrow_mut().push(Call::Block)))
        }
    }

    impl HeightDelegate for Delegate {
        fn next_height(&mut self, suggested: f64, _current: f64) -> f64 {
            self.journal.borrow_mut().push(Call::NextHeight(suggested));
            suggested
        }
    }

    impl KeyboardDelegate for Delegate {
        fn keyboard_will_present(&mut self, height: f64) -> Option<AnimationBlock> {
            self.journal.borrow_mut().push(Call::WillPresent(height));
            self.block()
        }

        fn keyboard_will_dismiss(
            &mut self,
            notification: Option<&KeyboardNotification>,
        ) -> Option<AnimationBlock> {
            self.journal
                .borrow_mut()
                .push(Call::WillDismiss(notification.is_some()));
            self.block()
        }

        fn keyboard_did_change_height(&mut self, height: f64) {
            self.journal.borrow_mut().push(Call::DidChangeHeight(height));
        }
    }

    type Bar = AccessoryBar<Host, Delegate>;

    /// A text input and a 216pt panel, docked with the keyboard hidden.
    /// Maximum bar Y is the 64pt default, so the maximum height is
    /// 600 - 44 - 64 + 44 = 536.
    fn fixture() -> (Bar, Journal) {
        let journal = Journal::default();
        let host = Host {
            keyboard: 0.0,
            sunk: 0.0,
            bar: 44.0,
            pending: Vec::new(),
            journal: journal.clone(),
        };
        let delegate = Delegate {
            journal: journal.clone(),
        };
        let components = vec![
            StandardComponent::from(TextInput::new(20.0)),
            StandardComponent::from(Panel::new(216.0)),
        ];
        let mut bar =
            AccessoryBar::with_components(host, HeightConfig::default(), delegate, components);
        bar.attach_to_keyboard();
        (bar, journal)
    }

    /// Delivers every pending animation completion.
    fn settle(bar: &mut Bar) {
        let pending: Vec<_> = bar.host_mut().pending.drain(..).collect();
        for transition in pending {
            assert!(bar.complete_transition(transition));
        }
    }

    fn count(journal: &Journal, pred: impl Fn(&Call) -> bool) -> usize {
        journal.borrow().iter().filter(|c| pred(c)).count()
    }

    fn will_show() -> KeyboardNotification {
        let full = KEYBOARD + 44.0;
        KeyboardNotification::new(
            NotificationKind::WillShow,
            Rect::new(0.0, SCREEN, 320.0, SCREEN + full),
            Rect::new(0.0, SCREEN - full, 320.0, SCREEN),
        )
        .with_animation(Duration::from_millis(250), 7)
    }

    fn did_change_frame() -> KeyboardNotification {
        let frame = Rect::new(0.0, SCREEN - 304.0, 320.0, SCREEN);
        KeyboardNotification::new(NotificationKind::DidChangeFrame, frame, frame)
    }

    fn at_end() -> ScrollSample {
        ScrollSample {
            content_offset_y: 456.0,
            content_height: 1000.0,
            viewport_height: 600.0,
            top_inset: 0.0,
            bottom_inset: 56.0,
        }
    }

    fn text(bar: &Bar) -> &TextInput {
        bar.component(0).and_then(StandardComponent::as_text).unwrap()
    }

    #[test]
    fn empty_text_settles_at_minimum() {
        let (mut bar, _) = fixture();
        assert_eq!(bar.reload_height(None), Ok(HeightChange::Unchanged));
        assert_eq!(bar.controller().applied_height(), Some(44.0));
        assert_eq!(bar.maximum_height(), 536.0);
    }

    #[test]
    fn fractional_initial_height_is_rounded() {
        let journal = Journal::default();
        let host = Host {
            keyboard: 0.0,
            sunk: 0.0,
            bar: 64.5,
            pending: Vec::new(),
            journal: journal.clone(),
        };
        let mut input = TextInput::new(20.3);
        input.set_text("one\ntwo");
        let mut bar: Bar = AccessoryBar::with_components(
            host,
            HeightConfig::default(),
            Delegate { journal },
            vec![input.into()],
        );
        bar.attach_to_keyboard();
        assert_eq!(bar.height(), 64.5);
        assert_eq!(bar.controller().applied_height(), Some(64.5));
        assert_eq!(bar.set_height_immediately(64.3), Ok(HeightChange::Unchanged));
    }

    #[test]
    fn typing_three_lines_grows_to_84() {
        let (mut bar, _) = fixture();
        bar.edit_component(0, |c| {
            if let Some(input) = c.as_text_mut() {
                input.set_text("one\ntwo\nthree");
            }
        });
        assert!(bar.is_animating());
        assert_eq!(bar.height(), 84.0);
        assert_eq!(bar.controller().applied_height(), Some(44.0));
        assert_eq!(text(&bar).animating_to(), Some(84.0));

        settle(&mut bar);
        assert_eq!(bar.controller().applied_height(), Some(84.0));
        assert_eq!(text(&bar).layout_height(), Some(84.0));
    }

    #[test]
    fn editing_an_unselected_component_does_not_reload() {
        let (mut bar, journal) = fixture();
        bar.edit_component(1, |c| {
            if let StandardComponent::Panel(panel) = c {
                panel.set_height(300.0);
            }
        });
        assert_eq!(count(&journal, |c| matches!(c, Call::NextHeight(_))), 0);
        assert_eq!(bar.edit_component(9, |_| ()), None);
    }

    #[test]
    fn selection_reloads_even_at_equal_height() {
        let (mut bar, journal) = fixture();
        bar.edit_component(1, |c| {
            if let StandardComponent::Panel(panel) = c {
                panel.set_height(44.0);
            }
        });
        assert_eq!(bar.select_component(Some(1)), Ok(HeightChange::Unchanged));
        assert_eq!(count(&journal, |c| matches!(c, Call::NextHeight(_))), 1);
        // Re-selecting the same component reloads again.
        assert_eq!(bar.select_component(Some(1)), Ok(HeightChange::Unchanged));
        assert_eq!(count(&journal, |c| matches!(c, Call::NextHeight(_))), 2);
    }

    #[test]
    fn selecting_a_panel_animates_to_its_height() {
        let (mut bar, _) = fixture();
        let change = bar.select_component(Some(1)).unwrap();
        assert!(matches!(change, HeightChange::Animating { height, .. } if height == 216.0));
        settle(&mut bar);
        assert_eq!(bar.controller().applied_height(), Some(216.0));
        assert_eq!(bar.selected_index(), Some(1));

        assert_eq!(bar.select_component(Some(5)), Ok(HeightChange::Unchanged));
        assert_eq!(bar.selected_index(), Some(1));
    }

    #[test]
    fn selection_transfers_focus() {
        let (mut bar, _) = fixture();
        bar.set_components(vec![
            TextInput::new(20.0).into(),
            TextInput::new(20.0).into(),
        ])
        .unwrap();
        bar.edit_component(0, |c| c.focusable_input_mut().unwrap().focus(true));
        bar.select_component(Some(1)).unwrap();

        let focused: Vec<bool> = bar
            .components()
            .iter()
            .map(|c| c.focusable_input().unwrap().is_focused())
            .collect();
        assert_eq!(focused, [false, true]);
    }

    #[test]
    fn set_components_selects_first() {
        let (mut bar, _) = fixture();
        bar.config_mut().animate_on_reload = false;
        let change = bar.set_components(vec![Panel::new(120.0).into()]);
        assert_eq!(change, Ok(HeightChange::Applied { height: 120.0 }));
        assert_eq!(bar.selected_index(), Some(0));

        assert_eq!(bar.set_components(Vec::new()), Ok(HeightChange::Applied { height: 44.0 }));
        assert_eq!(bar.selected_index(), None);
        assert!(bar.selected_component().is_none());
    }

    #[test]
    fn minimum_height_change_reloads() {
        let (mut bar, _) = fixture();
        bar.config_mut().animate_on_reload = false;
        bar.edit_component(0, |c| {
            if let Some(input) = c.as_text_mut() {
                input.set_minimum_height(60.0);
            }
        });
        assert_eq!(bar.controller().applied_height(), Some(60.0));
        assert_eq!(bar.set_minimum_height(70.0), Ok(HeightChange::Applied { height: 70.0 }));
        assert_eq!(bar.set_height_immediately(10.0), Ok(HeightChange::Unchanged));
    }

    #[test]
    fn detached_bar_does_not_resize() {
        let (mut bar, _) = fixture();
        bar.detach_from_keyboard();
        assert_eq!(
            bar.set_height(120.0, true, None),
            Err(HeightError::OuterConstraintMissing)
        );
        assert_eq!(bar.height(), 44.0);
    }

    #[test]
    fn edits_land_while_detached() {
        let (mut bar, _) = fixture();
        bar.detach_from_keyboard();
        let rows = bar.edit_component(0, |c| {
            let input = c.as_text_mut().unwrap();
            input.set_text("one\ntwo");
            input.rows()
        });
        assert_eq!(rows, Some(2));
        assert_eq!(bar.height(), 44.0);
        assert_eq!(bar.reload_height(None), Err(HeightError::OuterConstraintMissing));

        bar.attach_to_keyboard();
        bar.config_mut().animate_on_reload = false;
        assert_eq!(bar.reload_height(None), Ok(HeightChange::Applied { height: 64.0 }));
    }

    #[test]
    fn keyboard_blocks_run_with_keyboard_animation() {
        let (mut bar, journal) = fixture();
        let event = bar.handle_keyboard(&will_show());
        assert!(matches!(event, Some(KeyboardEvent::WillPresent { .. })));
        assert!(bar.is_keyboard_presented());
        assert_eq!(
            journal.borrow()[..],
            [
                Call::WillPresent(44.0),
                Call::Begin(Duration::from_millis(250)),
                Call::Block,
                Call::Commit(None),
            ]
        );

        bar.host_mut().keyboard = KEYBOARD;
        journal.borrow_mut().clear();
        assert_eq!(
            bar.handle_keyboard(&did_change_frame()),
            Some(KeyboardEvent::FrameChanged {
                visible_height: 304.0
            })
        );
        assert_eq!(journal.borrow()[..], [Call::DidChangeHeight(304.0)]);
    }

    #[test]
    fn unanimated_notification_runs_block_directly() {
        let (mut bar, journal) = fixture();
        let show = KeyboardNotification {
            duration: Duration::ZERO,
            ..will_show()
        };
        bar.handle_keyboard(&show);
        assert_eq!(
            journal.borrow()[..],
            [Call::WillPresent(44.0), Call::Block]
        );
    }

    #[test]
    fn no_keyboard_events_while_engaging() {
        let (mut bar, journal) = fixture();
        assert_eq!(bar.interactive_engage(LIST), None);
        assert_eq!(bar.pan_changed(&LIST, PanState::Began), None);
        let action = bar.surface_scrolled(&LIST, &at_end(), Point::new(100.0, -30.0));
        assert_eq!(action, Some(DragAction::Engage { outer_height: 74.0 }));
        assert_eq!(bar.drag_phase(), DragPhase::Engaging);
        assert_eq!(bar.controller().applied_height(), Some(74.0));
        assert!(text(&bar).is_focused());

        // The keyboard comes up under the finger; the tracker stays quiet.
        assert_eq!(bar.handle_keyboard(&will_show()), None);
        assert_eq!(bar.handle_keyboard(&did_change_frame()), None);
        assert!(!bar.is_keyboard_presented());
        assert!(journal.borrow().is_empty());
    }

    #[test]
    fn engaging_streams_visible_height() {
        let (mut bar, journal) = fixture();
        bar.interactive_engage(LIST);
        bar.pan_changed(&LIST, PanState::Began);
        bar.surface_scrolled(&LIST, &at_end(), Point::new(100.0, -30.0));

        // Halfway in: 304 presented, 160 still below the screen edge.
        bar.host_mut().keyboard = KEYBOARD;
        bar.host_mut().sunk = 160.0;
        assert_eq!(bar.presented_height(), 304.0);
        assert_eq!(
            bar.surface_scrolled(&LIST, &at_end(), Point::new(100.0, -60.0)),
            Some(DragAction::FrameChanged {
                visible_height: 144.0
            })
        );
        assert_eq!(journal.borrow()[..], [Call::DidChangeHeight(144.0)]);

        // Fully in: the keyboard takes over and streaming stops.
        bar.host_mut().sunk = 0.0;
        assert_eq!(
            bar.surface_scrolled(&LIST, &at_end(), Point::new(100.0, -60.0)),
            None
        );
        bar.host_mut().sunk = 80.0;
        assert_eq!(
            bar.surface_scrolled(&LIST, &at_end(), Point::new(100.0, -60.0)),
            None
        );
        assert_eq!(journal.borrow().len(), 1);
    }

    #[test]
    fn disengaging_with_focus_presents() {
        let (mut bar, journal) = fixture();
        bar.interactive_engage(LIST);
        bar.pan_changed(&LIST, PanState::Began);
        bar.surface_scrolled(&LIST, &at_end(), Point::new(100.0, -30.0));
        bar.host_mut().keyboard = KEYBOARD;

        assert_eq!(
            bar.pan_changed(&LIST, PanState::Ended),
            Some(DragAction::Disengage)
        );
        assert_eq!(bar.controller().applied_height(), Some(44.0));
        assert!(bar.is_keyboard_presented());
        assert_eq!(
            journal.borrow()[..],
            [
                Call::WillPresent(304.0),
                Call::Begin(AnimationSpec::DEFAULT_DURATION),
                Call::Block,
                Call::Commit(None),
            ]
        );

        // Observation resumed: the next duplicate will-show is filtered by state.
        assert_eq!(bar.handle_keyboard(&will_show()), None);
    }

    #[test]
    fn disengaging_without_focus_dismisses() {
        let (mut bar, journal) = fixture();
        bar.interactive_engage(LIST);
        bar.pan_changed(&LIST, PanState::Began);
        bar.surface_scrolled(&LIST, &at_end(), Point::new(100.0, -30.0));
        bar.edit_component(0, |c| c.focusable_input_mut().unwrap().resign());
        journal.borrow_mut().clear();

        assert_eq!(
            bar.pan_changed(&LIST, PanState::Cancelled),
            Some(DragAction::Disengage)
        );
        assert!(!bar.is_keyboard_presented());
        assert_eq!(count(&journal, |c| *c == Call::WillDismiss(false)), 1);
        assert_eq!(bar.controller().applied_height(), Some(44.0));
    }

    #[test]
    fn panels_never_engage() {
        let (mut bar, _) = fixture();
        bar.select_component(Some(1)).unwrap();
        settle(&mut bar);
        bar.interactive_engage(LIST);
        bar.pan_changed(&LIST, PanState::Began);
        assert_eq!(
            bar.surface_scrolled(&LIST, &at_end(), Point::new(100.0, -30.0)),
            None
        );
        assert_eq!(bar.drag_phase(), DragPhase::Dragging);
    }

    #[test]
    fn frame_changes_are_suppressed_during_a_drag() {
        let (mut bar, _) = fixture();
        bar.handle_keyboard(&will_show());
        bar.host_mut().keyboard = KEYBOARD;
        bar.interactive_engage(LIST);
        bar.pan_changed(&LIST, PanState::Began);
        assert_eq!(bar.handle_keyboard(&did_change_frame()), None);
        bar.pan_changed(&LIST, PanState::Ended);
        assert!(bar.handle_keyboard(&did_change_frame()).is_some());
    }
}
