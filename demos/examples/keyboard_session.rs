// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A simulated keyboard session driving a Perch accessory bar.
//!
//! This example plays the platform's part:
//! - it lays the bar out on a 390x844 screen and records animation transactions,
//! - it posts keyboard notifications the way the system would,
//! - it delivers animation completions and pan/scroll events.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p perch_demos --example keyboard_session`

use std::time::Duration;

use kurbo::{Point, Rect};
use perch_animation::{AnimationBlock, AnimationSpec, Animator, TransitionId};
use perch_bar::{AccessoryBar, KeyboardDelegate, Panel, StandardComponent, TextInput};
use perch_drag::{PanState, ScrollSample};
use perch_height::{BarHost, HeightConfig, HeightDelegate};
use perch_keyboard::{KeyboardNotification, NotificationKind};

const SCREEN: f64 = 844.0;
const WIDTH: f64 = 390.0;
const KEYBOARD: f64 = 291.0;
const KEYBOARD_CURVE: u32 = 7;
const MESSAGES: u32 = 1;

/// The platform side: screen geometry, keyboard position, and animations.
#[derive(Debug, Default)]
struct SimulatedHost {
    keyboard: f64,
    keyboard_visible: f64,
    bar: f64,
    pending: Vec<TransitionId>,
}

impl Animator for SimulatedHost {
    fn begin(&mut self, spec: &AnimationSpec) {
        println!(
            "  [host] begin animation: {:?}, damping {:.1}",
            spec.duration(),
            spec.spring_damping()
        );
    }

    fn commit(&mut self, transition: Option<TransitionId>) {
        if let Some(transition) = transition {
            println!("  [host] commit, completion owed for {transition:?}");
            self.pending.push(transition);
        } else {
            println!("  [host] commit");
        }
    }
}

impl BarHost for SimulatedHost {
    fn screen_height(&self) -> f64 {
        SCREEN
    }

    fn keyboard_container(&self) -> Option<Rect> {
        let top = SCREEN - self.keyboard_visible - self.bar;
        Some(Rect::new(0.0, top, WIDTH, top + self.keyboard + self.bar))
    }

    fn layout_content(&mut self, height: f64) {
        println!("  [host] content container -> {height}");
    }

    fn layout_bar(&mut self, height: f64) {
        println!("  [host] bar -> {height}");
        self.bar = height;
    }
}

/// The screen hosting the bar: a message list whose bottom inset follows it.
#[derive(Debug, Default)]
struct MessagesScreen;

impl HeightDelegate for MessagesScreen {
    fn maximum_bar_y(&self) -> Option<f64> {
        // Status bar plus a large title navigation bar.
        Some(47.0 + 96.0)
    }

    fn will_animate_to_height(
        &mut self,
        height: f64,
        keyboard_height: f64,
    ) -> Option<AnimationBlock> {
        Some(Box::new(move || {
            println!("  [screen] list inset -> {keyboard_height} (bar {height})");
        }))
    }
}

impl KeyboardDelegate for MessagesScreen {
    fn keyboard_will_present(&mut self, height: f64) -> Option<AnimationBlock> {
        Some(Box::new(move || {
            println!("  [screen] keyboard presenting, list inset -> {height}");
        }))
    }

    fn keyboard_will_dismiss(
        &mut self,
        notification: Option<&KeyboardNotification>,
    ) -> Option<AnimationBlock> {
        let source = if notification.is_some() {
            "system"
        } else {
            "drag"
        };
        Some(Box::new(move || {
            println!("  [screen] keyboard dismissing ({source})");
        }))
    }

    fn keyboard_did_change_height(&mut self, height: f64) {
        println!("  [screen] visible keyboard height {height}");
    }
}

type Bar = AccessoryBar<SimulatedHost, MessagesScreen, StandardComponent, u32>;

/// Delivers every animation completion the host owes.
fn finish_animations(bar: &mut Bar) {
    for transition in std::mem::take(&mut bar.host_mut().pending) {
        bar.complete_transition(transition);
    }
}

fn keyboard_note(
    kind: NotificationKind,
    visible_before: f64,
    visible_after: f64,
) -> KeyboardNotification {
    let height = KEYBOARD + 44.0;
    let frame = |visible: f64| {
        let top = SCREEN - visible;
        Rect::new(0.0, top, WIDTH, top + height)
    };
    KeyboardNotification::new(kind, frame(visible_before), frame(visible_after))
        .with_animation(Duration::from_millis(250), KEYBOARD_CURVE)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let host = SimulatedHost {
        bar: 44.0,
        ..SimulatedHost::default()
    };
    let components = vec![
        StandardComponent::from(TextInput::new(20.0)),
        StandardComponent::from(Panel::new(216.0)),
    ];
    let mut bar: Bar =
        AccessoryBar::with_components(host, HeightConfig::default(), MessagesScreen, components);
    bar.attach_to_keyboard();
    println!("== Docked: height {}, max {}", bar.height(), bar.maximum_height());

    println!("\n== Keyboard shows");
    let event = bar.handle_keyboard(&keyboard_note(NotificationKind::WillShow, 44.0, 44.0));
    println!("  event: {event:?}");
    bar.host_mut().keyboard = KEYBOARD;
    bar.host_mut().keyboard_visible = KEYBOARD;
    let duplicate = bar.handle_keyboard(&keyboard_note(NotificationKind::WillShow, 335.0, 335.0));
    println!("  duplicate will-show: {duplicate:?}");

    println!("\n== Typing three lines");
    bar.edit_component(0, |c| {
        if let Some(input) = c.as_text_mut() {
            input.set_text("Are we still on for lunch?\nI can do 12:30\nor 1");
        }
    });
    println!("  target {}, applied {:?}", bar.height(), bar.controller().applied_height());
    finish_animations(&mut bar);
    println!("  settled at {:?}", bar.controller().applied_height());

    println!("\n== Sending clears the input");
    bar.edit_component(0, |c| c.as_text_mut().map(TextInput::take_text));
    finish_animations(&mut bar);

    println!("\n== Keyboard hides");
    let event = bar.handle_keyboard(&keyboard_note(NotificationKind::WillHide, 335.0, 44.0));
    println!("  event: {event:?}");
    bar.host_mut().keyboard = 0.0;
    bar.host_mut().keyboard_visible = 0.0;

    println!("\n== Pull to engage");
    bar.interactive_engage(MESSAGES);
    bar.pan_changed(&MESSAGES, PanState::Began);
    let at_end = ScrollSample {
        content_offset_y: 1200.0,
        content_height: 1800.0,
        viewport_height: SCREEN,
        top_inset: 143.0,
        bottom_inset: 244.0,
    };
    let action = bar.surface_scrolled(&MESSAGES, &at_end, Point::new(120.0, -18.0));
    println!("  action: {action:?}");
    // The keyboard slides in under the finger.
    bar.host_mut().keyboard = KEYBOARD;
    bar.host_mut().keyboard_visible = KEYBOARD / 2.0;
    let action = bar.surface_scrolled(&MESSAGES, &at_end, Point::new(120.0, -140.0));
    println!("  action: {action:?}");
    let action = bar.pan_changed(&MESSAGES, PanState::Ended);
    println!("  action: {action:?}, keyboard {:?}", bar.keyboard_state());

    println!("\n== Switching to the photo panel");
    bar.select_component(Some(1)).ok();
    finish_animations(&mut bar);
    println!("  settled at {:?}", bar.controller().applied_height());
}
