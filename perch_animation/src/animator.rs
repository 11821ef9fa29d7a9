// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host seam for running layout changes inside a platform animation.

use alloc::boxed::Box;

use crate::{AnimationSpec, TransitionId};

/// A batch of animatable changes supplied by a delegate.
///
/// Blocks run synchronously inside an open animation transaction, so any
/// property they change is interpolated with the same timing as the bar.
pub type AnimationBlock = Box<dyn FnOnce()>;

/// Host-side animation transactions.
///
/// Everything that happens between [`begin`](Animator::begin) and
/// [`commit`](Animator::commit) is animated with the given spec. Hosts without
/// real animation support can treat both calls as no-ops, as long as they
/// deliver completions for the committed transition ids.
pub trait Animator {
    /// Opens an animation transaction.
    fn begin(&mut self, spec: &AnimationSpec);

    /// Closes the transaction opened by the last [`begin`](Animator::begin).
    ///
    /// When `transition` is `Some`, the host must report the end of the
    /// animation back to the owner of that transition exactly once, whether
    /// the animation ran to the end or was interrupted by a newer one.
    fn commit(&mut self, transition: Option<TransitionId>);
}

/// Runs `block` inside an animation transaction, or directly when `spec` is `None`.
///
/// No completion is requested.
pub fn perform<A: Animator + ?Sized>(
    animator: &mut A,
    spec: Option<&AnimationSpec>,
    block: AnimationBlock,
) {
    match spec {
        Some(spec) => {
            animator.begin(spec);
            block();
            animator.commit(None);
        }
        None => block(),
    }
}
