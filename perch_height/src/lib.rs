// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Height: height negotiation for keyboard accessory bars.
//!
//! A keyboard accessory bar hosts pluggable content ([`Component`]s) and has to
//! grow and shrink with it without fighting the keyboard system. This crate
//! holds the [`HeightController`], the single authority over the bar height.
//!
//! ## Negotiation
//!
//! Every change goes through [`HeightController::set_height`]:
//!
//! - the request is clamped to `[minimum_height, maximum_height]`, where the
//!   maximum keeps the bar's top edge from rising above
//!   [`HeightController::maximum_bar_y`],
//! - the [`HeightDelegate`] gets the last word,
//! - the target is rounded to the nearest half point, and a target equal to
//!   the current height is a no-op, so sub-pixel noise never starts an
//!   animation.
//!
//! ## Two phases
//!
//! The content container animates first (Phase A). The outer height, the one
//! the keyboard system observes, is committed only once the animation finished
//! (Phase B). The host drives the handshake: it receives an animation
//! transaction through [`perch_animation::Animator`] and reports completion back
//! through [`HeightController::complete_transition`].
//!
//! ```rust
//! use kurbo::Rect;
//! use perch_animation::{AnimationSpec, Animator, TransitionId};
//! use perch_height::{BarHost, HeightChange, HeightConfig, HeightController};
//!
//! #[derive(Default)]
//! struct Host {
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
//!         Some(Rect::new(0.0, 556.0, 320.0, 600.0))
//!     }
//!     fn layout_content(&mut self, _height: f64) {}
//!     fn layout_bar(&mut self, _height: f64) {}
//! }
//!
//! let mut host = Host::default();
//! let mut controller = HeightController::new(HeightConfig::default(), ());
//! controller.attach_outer_constraint(44.0);
//!
//! let change = controller.set_height(&mut host, None, 84.0, true, None).unwrap();
//! assert!(matches!(change, HeightChange::Animating { .. }));
//! // Phase A moved the content; the outer height waits for the animation.
//! assert_eq!(controller.height(), 84.0);
//! assert_eq!(controller.applied_height(), Some(44.0));
//!
//! for transition in core::mem::take(&mut host.pending) {
//!     controller.complete_transition(&mut host, None, transition);
//! }
//! assert_eq!(controller.applied_height(), Some(84.0));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod component;
mod controller;
mod delegate;
mod error;
mod host;
mod util;

pub use component::{Component, InputHandle};
pub use controller::{HeightChange, HeightConfig, HeightController};
pub use delegate::HeightDelegate;
pub use error::HeightError;
pub use host::BarHost;
