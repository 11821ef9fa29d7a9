// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The height state machine.

use perch_animation::{AnimationSpec, TransitionId, TransitionQueue};

use crate::util::round_to_half;
use crate::{BarHost, Component, HeightDelegate, HeightError};

/// Configuration for a [`HeightController`].
#[derive(Clone, Debug, PartialEq)]
pub struct HeightConfig {
    /// Floor for every committed height.
    pub minimum_height: f64,
    /// Whether [`HeightController::reload_height`] animates.
    pub animate_on_reload: bool,
    /// Animation used when a call does not pass its own spec.
    pub animation: AnimationSpec,
    /// Fallback for the topmost Y the bar may reach, used when the delegate
    /// does not provide one. Typically status bar plus navigation bar height.
    pub top_bar_height: f64,
}

impl Default for HeightConfig {
    fn default() -> Self {
        Self {
            minimum_height: 44.0,
            animate_on_reload: true,
            animation: AnimationSpec::default(),
            // Status bar plus navigation bar.
            top_bar_height: 20.0 + 44.0,
        }
    }
}

/// Result of a successful [`HeightController::set_height`] call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HeightChange {
    /// The rounded target equals the current height; nothing was touched.
    Unchanged,
    /// Both phases ran synchronously and `height` is committed.
    Applied {
        /// Committed height.
        height: f64,
    },
    /// Phase A ran; Phase B waits for the completion of `transition`.
    Animating {
        /// Height the content container animates to.
        height: f64,
        /// Transition to complete with [`HeightController::complete_transition`].
        transition: TransitionId,
    },
}

/// Data Phase B needs once the platform animation completes.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Settle {
    height: f64,
    keyboard_height: f64,
}

/// Single authority for the bar height.
///
/// The controller owns two heights:
///
/// - the **content height**, the constant of the content container's height
///   constraint. It moves first and is what animations interpolate toward.
/// - the **applied height**, the constant of the outer height constraint the
///   keyboard system observes. It only moves once an animation completed, so
///   system-driven inset adjustments never see an intermediate value.
///
/// The outer constraint does not exist until the bar is docked in a keyboard
/// hierarchy; attach it with [`attach_outer_constraint`](Self::attach_outer_constraint).
/// Until then [`set_height`](Self::set_height) logs and returns
/// [`HeightError::OuterConstraintMissing`].
///
/// ## Overlapping transitions
///
/// When a new height is requested before the previous animation completed,
/// both transitions stay in flight and each completion commits its own height.
/// If the platform delivers the older completion last, the applied height ends
/// up stale until the next change. This mirrors the platform behavior the bar
/// is built for and is pinned by tests.
#[derive(Debug)]
pub struct HeightController<D> {
    config: HeightConfig,
    delegate: D,
    content_height: f64,
    outer_height: Option<f64>,
    transitions: TransitionQueue<Settle>,
}

impl<D: HeightDelegate> HeightController<D> {
    /// Creates a controller whose content height starts at the configured minimum.
    #[must_use]
    pub fn new(config: HeightConfig, delegate: D) -> Self {
        let initial = config.minimum_height;
        Self::with_initial_height(config, delegate, initial)
    }

    /// Creates a controller with an explicit initial content height.
    ///
    /// The height is rounded to the nearest half point and floored at the
    /// minimum, like every committed height.
    #[must_use]
    pub fn with_initial_height(config: HeightConfig, delegate: D, initial_height: f64) -> Self {
        let content_height = if initial_height.is_finite() {
            round_to_half(initial_height).max(config.minimum_height)
        } else {
            config.minimum_height
        };
        Self {
            config,
            delegate,
            content_height,
            outer_height: None,
            transitions: TransitionQueue::new(),
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &HeightConfig {
        &self.config
    }

    /// Mutable configuration. Changes take effect on the next height change.
    pub fn config_mut(&mut self) -> &mut HeightConfig {
        &mut self.config
    }

    /// The delegate.
    #[must_use]
    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    /// Mutable access to the delegate.
    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    /// Most recent target height: the content container height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.content_height
    }

    /// Height committed to the outer constraint, if attached.
    #[must_use]
    pub fn applied_height(&self) -> Option<f64> {
        self.outer_height
    }

    /// Current frame height of the bar.
    ///
    /// Equal to the applied height once attached; the content height before that.
    #[must_use]
    pub fn bar_height(&self) -> f64 {
        self.outer_height.unwrap_or(self.content_height)
    }

    /// Returns `true` while a transition awaits completion.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transitions.is_in_flight()
    }

    /// Number of transitions awaiting completion.
    #[must_use]
    pub fn transitions_in_flight(&self) -> usize {
        self.transitions.len()
    }

    /// Attaches the outer height constraint with its current constant.
    ///
    /// Called when the bar is docked in a keyboard hierarchy.
    pub fn attach_outer_constraint(&mut self, height: f64) {
        log::debug!("outer height constraint attached at {height}");
        self.outer_height = Some(height);
    }

    /// Detaches the outer height constraint.
    ///
    /// In-flight transitions are dropped; their completions become no-ops.
    pub fn detach_outer_constraint(&mut self) {
        log::debug!("outer height constraint detached");
        self.outer_height = None;
        self.transitions.clear();
    }

    /// Topmost Y the bar's top edge may reach.
    #[must_use]
    pub fn maximum_bar_y(&self) -> f64 {
        self.delegate
            .maximum_bar_y()
            .unwrap_or(self.config.top_bar_height)
    }

    /// Largest height that keeps the bar's top edge at or below
    /// [`maximum_bar_y`](Self::maximum_bar_y).
    #[must_use]
    pub fn maximum_height<H: BarHost + ?Sized>(&self, host: &H) -> f64 {
        host.screen_height() - container_height(host) - self.maximum_bar_y() + self.bar_height()
    }

    /// Keyboard plus bar height once fully presented.
    #[must_use]
    pub fn presented_height<H: BarHost + ?Sized>(&self, host: &H) -> f64 {
        container_height(host) - self.bar_height() + self.content_height
    }

    /// Keyboard plus bar height currently visible on screen.
    #[must_use]
    pub fn visible_height<H: BarHost + ?Sized>(&self, host: &H) -> f64 {
        let container_y = host.keyboard_container().map_or(0.0, |r| r.y0);
        let content_top = container_y + self.bar_height() - self.content_height;
        host.screen_height() - content_top
    }

    /// Sets the height to the component's content height.
    ///
    /// Animates when [`HeightConfig::animate_on_reload`] is set. Without a
    /// component the requested height is zero, which clamps to the minimum.
    pub fn reload_height<H: BarHost + ?Sized>(
        &mut self,
        host: &mut H,
        component: Option<&mut dyn Component>,
        spec: Option<&AnimationSpec>,
    ) -> Result<HeightChange, HeightError> {
        let requested = component.as_deref().map_or(0.0, |c| c.content_height());
        let animated = self.config.animate_on_reload;
        self.set_height(host, component, requested, animated, spec)
    }

    /// Sets the bar height.
    ///
    /// 1. `requested` is clamped to `[minimum_height, maximum_height]`.
    /// 2. The delegate may override the result with [`HeightDelegate::next_height`].
    /// 3. The target is rounded to the nearest half point and floored at the
    ///    minimum; if it equals the rounded current height nothing happens.
    /// 4. The delegate's [`HeightDelegate::will_animate_to_height`] block is
    ///    collected.
    /// 5. Phase A sets the content height, lays it out, runs the delegate block,
    ///    and calls [`Component::on_animated_layout`], inside an animation when
    ///    `animated` is set.
    /// 6. Phase B commits the outer height, lays out the bar, and calls
    ///    [`HeightDelegate::did_animate_to_height`] and
    ///    [`Component::on_post_animation_layout`]. Without animation it runs
    ///    right away; otherwise it runs from [`complete_transition`](Self::complete_transition).
    ///
    /// Errors leave all state untouched.
    pub fn set_height<H: BarHost + ?Sized>(
        &mut self,
        host: &mut H,
        mut component: Option<&mut dyn Component>,
        requested: f64,
        animated: bool,
        spec: Option<&AnimationSpec>,
    ) -> Result<HeightChange, HeightError> {
        if !requested.is_finite() {
            log::warn!("ignoring non-finite height request {requested}");
            return Err(HeightError::NonFiniteHeight(requested));
        }
        let minimum = self.config.minimum_height;
        let clamped = requested.min(self.maximum_height(host)).max(minimum);
        let next = self.delegate.next_height(clamped, self.content_height);
        if !next.is_finite() {
            log::warn!("delegate returned non-finite height {next}");
            return Err(HeightError::NonFiniteHeight(next));
        }

        if self.outer_height.is_none() {
            log::warn!("outer height constraint not found; is the bar docked in the keyboard?");
            return Err(HeightError::OuterConstraintMissing);
        }

        let target = round_to_half(next).max(minimum);
        if round_to_half(self.content_height) == target {
            return Ok(HeightChange::Unchanged);
        }

        let keyboard_height = (container_height(host) - self.bar_height() + target).max(0.0);
        let alongside = self.delegate.will_animate_to_height(target, keyboard_height);
        let spec = spec.copied().unwrap_or(self.config.animation);

        // Phase A.
        if animated {
            host.begin(&spec);
        }
        self.content_height = target;
        host.layout_content(target);
        if let Some(block) = alongside {
            block();
        }
        if let Some(component) = component.as_deref_mut() {
            component.on_animated_layout(target);
        }

        let settle = Settle {
            height: target,
            keyboard_height,
        };
        if animated {
            let transition = self.transitions.begin(settle);
            host.commit(Some(transition));
            log::debug!("animating bar to {target} ({transition:?})");
            return Ok(HeightChange::Animating {
                height: target,
                transition,
            });
        }

        // Phase B.
        self.settle(host, component, settle);
        Ok(HeightChange::Applied { height: target })
    }

    /// Runs Phase B for a transition whose animation finished.
    ///
    /// Returns `false` for unknown or already completed transitions.
    pub fn complete_transition<H: BarHost + ?Sized>(
        &mut self,
        host: &mut H,
        component: Option<&mut dyn Component>,
        transition: TransitionId,
    ) -> bool {
        let Some(settle) = self.transitions.complete(transition) else {
            log::warn!("completion for unknown transition {transition:?}");
            return false;
        };
        if self.outer_height.is_none() {
            return false;
        }
        if let Some(latest) = self.transitions.latest() {
            if latest.payload.height != settle.height {
                log::debug!(
                    "{transition:?} settles at {} while {:?} targets {}",
                    settle.height,
                    latest.id,
                    latest.payload.height
                );
            }
        }
        self.settle(host, component, settle);
        true
    }

    /// Sets the outer height directly, with no animation, delegate calls, or
    /// clamping. The content height is left alone.
    ///
    /// Used by interactive drag engagement to pull the keyboard area open.
    pub fn override_outer_height<H: BarHost + ?Sized>(
        &mut self,
        host: &mut H,
        height: f64,
    ) -> Result<(), HeightError> {
        if !height.is_finite() {
            log::warn!("ignoring non-finite outer height {height}");
            return Err(HeightError::NonFiniteHeight(height));
        }
        let Some(outer) = self.outer_height.as_mut() else {
            log::warn!("outer height constraint not found; cannot override it");
            return Err(HeightError::OuterConstraintMissing);
        };
        *outer = height;
        host.layout_bar(height);
        Ok(())
    }

    /// Snaps the outer height back to the content height.
    pub fn restore_outer_height<H: BarHost + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Result<(), HeightError> {
        let content = self.content_height;
        self.override_outer_height(host, content)
    }

    fn settle<H: BarHost + ?Sized>(
        &mut self,
        host: &mut H,
        component: Option<&mut dyn Component>,
        settle: Settle,
    ) {
        let Settle {
            height,
            keyboard_height,
        } = settle;
        self.outer_height = Some(height);
        host.layout_bar(height);
        self.delegate.did_animate_to_height(height, keyboard_height);
        if let Some(component) = component {
            component.on_post_animation_layout(height);
        }
        log::debug!("bar height committed at {height}");
    }
}

fn container_height<H: BarHost + ?Sized>(host: &H) -> f64 {
    host.keyboard_container().map_or(0.0, |r| r.height())
}
