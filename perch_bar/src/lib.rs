// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Bar: a resizeable keyboard accessory bar.
//!
//! ## Overview
//!
//! [`AccessoryBar`] is the view docked above the on-screen keyboard. It hosts
//! a set of [`Component`](perch_height::Component)s, shows one at a time, and
//! keeps its height in sync with the selected component's content, with the
//! keyboard, and with pull-to-engage drags on a scroll surface.
//!
//! The bar is headless. The platform side implements
//! [`BarHost`](perch_height::BarHost) (geometry, layout and animation
//! transactions), the host screen implements [`BarDelegate`], and the platform
//! event loop feeds the bar:
//!
//! - keyboard notifications through [`AccessoryBar::handle_keyboard`],
//! - animation completions through [`AccessoryBar::complete_transition`],
//! - pan and scroll changes through [`AccessoryBar::pan_changed`] and
//!   [`AccessoryBar::surface_scrolled`],
//! - content edits through [`AccessoryBar::edit_component`].
//!
//! ## Building blocks
//!
//! - [`perch_height`]: the height controller and the component contract.
//! - [`perch_keyboard`]: keyboard notification filtering.
//! - [`perch_drag`]: the pull-to-engage state machine.
//! - [`perch_animation`]: animation specs and transition bookkeeping.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Rect;
//! use perch_animation::{AnimationSpec, Animator, TransitionId};
//! use perch_bar::{AccessoryBar, Panel, StandardComponent, TextInput};
//! use perch_height::{BarHost, HeightConfig};
//!
//! #[derive(Default)]
//! struct Host {
//!     bar: f64,
//!     pending: Vec<TransitionId>,
//! }
//!
//! impl Animator for Host {
//!     fn begin(&mut self, _spec: &AnimationSpec) {}
//!     fn commit(&mut self, transition: Option<TransitionId>) {
//!         self.pending.extend(transition);
//!     }
//! }
//!
//! impl BarHost for Host {
//!     fn screen_height(&self) -> f64 { 600.0 }
//!     fn keyboard_container(&self) -> Option<Rect> {
//!         Some(Rect::new(0.0, 600.0 - self.bar, 320.0, 600.0))
//!     }
//!     fn layout_content(&mut self, _height: f64) {}
//!     fn layout_bar(&mut self, height: f64) { self.bar = height; }
//! }
//!
//! let host = Host { bar: 44.0, ..Host::default() };
//! let components = vec![
//!     StandardComponent::from(TextInput::new(20.0)),
//!     StandardComponent::from(Panel::new(216.0)),
//! ];
//! let mut bar: AccessoryBar<_, ()> =
//!     AccessoryBar::with_components(host, HeightConfig::default(), (), components);
//! bar.attach_to_keyboard();
//!
//! // Typing three lines grows the bar by two lines.
//! bar.edit_component(0, |c| c.as_text_mut().unwrap().set_text("a\nb\nc"));
//! for transition in core::mem::take(&mut bar.host_mut().pending) {
//!     bar.complete_transition(transition);
//! }
//! assert_eq!(bar.controller().applied_height(), Some(84.0));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo` and the building blocks.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bar;
mod components;
mod delegate;

pub use bar::AccessoryBar;
pub use components::{Panel, StandardComponent, TextInput};
pub use delegate::{BarDelegate, KeyboardDelegate};
