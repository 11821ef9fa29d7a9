// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Keyboard: a filter between raw keyboard notifications and the bar.
//!
//! The platform reports keyboard activity as six raw notifications (will/did
//! show, will/did hide, will/did change frame), each carrying a begin frame, an
//! end frame, an animation duration, and an animation curve. This crate models
//! them as [`KeyboardNotification`] values and classifies them with a
//! [`KeyboardFrameTracker`] into three [`KeyboardEvent`]s:
//!
//! - [`KeyboardEvent::WillPresent`] when the keyboard comes up from a dismissed state,
//! - [`KeyboardEvent::WillDismiss`] when it goes away,
//! - [`KeyboardEvent::FrameChanged`] for height changes while presented.
//!
//! The tracker knows nothing about layout. Geometry it needs is passed in as a
//! [`KeyboardContext`] snapshot on every call.
//!
//! ```rust
//! use kurbo::Rect;
//! use perch_keyboard::{
//!     KeyboardContext, KeyboardEvent, KeyboardFrameTracker, KeyboardNotification,
//!     NotificationKind,
//! };
//!
//! let cx = KeyboardContext {
//!     screen_height: 600.0,
//!     bar_height: 44.0,
//!     applied_height: 44.0,
//!     visible_height: 44.0,
//!     presented_height: 304.0,
//!     ..KeyboardContext::default()
//! };
//! let mut tracker = KeyboardFrameTracker::new();
//!
//! let show = KeyboardNotification::new(
//!     NotificationKind::WillShow,
//!     Rect::new(0.0, 556.0, 320.0, 860.0),
//!     Rect::new(0.0, 296.0, 320.0, 600.0),
//! );
//! assert_eq!(
//!     tracker.handle(&show, &cx),
//!     Some(KeyboardEvent::WillPresent { expected_height: 304.0 })
//! );
//! // A second will-show without a dismissal in between is dropped.
//! assert_eq!(tracker.handle(&show, &cx), None);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std`.

#![no_std]

mod notification;
mod tracker;

pub use notification::{KeyboardEvent, KeyboardNotification, NotificationKind};
pub use tracker::{KeyboardContext, KeyboardFrameTracker, KeyboardState};
