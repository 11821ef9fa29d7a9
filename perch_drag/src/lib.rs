// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Drag: pull a keyboard accessory bar open by dragging a scroll surface.
//!
//! When a user drags a message list upward past its last row, the bar can be
//! revealed progressively and its input focused before the keyboard is
//! requested. [`InteractiveDragCoordinator`] watches one scroll surface and
//! turns its pan and offset changes into [`DragAction`]s:
//!
//! - [`PanState::Began`] starts a drag session.
//! - A content offset change at the content end engages the bar, if the
//!   selected component has an input and the keyboard is not on screen.
//! - Further offset changes stream the visible height until the keyboard is
//!   fully presented.
//! - [`PanState::Ended`] or [`PanState::Cancelled`] disengages.
//!
//! The coordinator only decides. Applying an action (suspending keyboard
//! observation, overriding the outer height, focusing the input) is up to the
//! bar that owns it.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std`.

#![no_std]

mod coordinator;
mod scroll;

pub use coordinator::{DragAction, DragPhase, InteractiveDragCoordinator};
pub use scroll::{EngageContext, PanState, ScrollSample};
