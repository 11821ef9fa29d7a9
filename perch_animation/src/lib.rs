// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Animation: animation values and transition bookkeeping for accessory bars.
//!
//! A keyboard accessory bar changes height in two phases: the content container
//! animates toward the new height first, and only once the platform reports that
//! the animation finished is the outer height (the one the keyboard system
//! observes) committed. This crate holds the pieces of that handshake that do not
//! depend on layout:
//!
//! - [`AnimationSpec`]: an immutable bundle of duration, delay, spring damping,
//!   spring velocity, and opaque platform [`AnimationOptions`].
//! - [`Animator`]: the seam a host platform implements to open and close an
//!   animation transaction around a batch of layout changes.
//! - [`TransitionQueue`]: the set of transitions whose completion has not been
//!   delivered yet, keyed by [`TransitionId`].
//!
//! ## Minimal example
//!
//! ```rust
//! use perch_animation::{AnimationSpec, TransitionQueue};
//!
//! let spec = AnimationSpec::default();
//! assert!(spec.duration().as_secs_f64() > 0.0);
//!
//! // Phase A starts a transition carrying whatever Phase B needs later.
//! let mut queue: TransitionQueue<f64> = TransitionQueue::new();
//! let id = queue.begin(84.0);
//! assert!(queue.is_in_flight());
//!
//! // The platform reports completion; Phase B gets its payload back.
//! assert_eq!(queue.complete(id), Some(84.0));
//! assert!(!queue.is_in_flight());
//! ```
//!
//! Completions are not required to arrive in order. When a newer transition is
//! started before an older one completes, both stay queued and each completion
//! returns its own payload, even if that payload is stale by then.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod animator;
mod spec;
mod transition;

pub use animator::{AnimationBlock, Animator, perform};
pub use spec::{AnimationOptions, AnimationSpec};
pub use transition::{PendingTransition, TransitionId, TransitionQueue};
