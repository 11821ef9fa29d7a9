// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation parameters for a single height transition.

use core::time::Duration;

bitflags::bitflags! {
    /// Opaque platform animation flags.
    ///
    /// Only the bits the bar itself relies on are named. Everything else, such
    /// as the raw keyboard curve shifted into the curve field, is carried
    /// through untouched so the host can hand it back to the platform.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct AnimationOptions: u32 {
        /// Let user interaction reach views while the animation runs.
        const ALLOW_USER_INTERACTION = 1 << 1;
        /// Start from the presentation state of any in-flight animation on the
        /// same property instead of its model value.
        const BEGIN_FROM_CURRENT_STATE = 1 << 2;
        /// Ease-in curve.
        const CURVE_EASE_IN = 1 << 16;
        /// Ease-out curve.
        const CURVE_EASE_OUT = 2 << 16;
        /// Linear curve.
        const CURVE_LINEAR = 3 << 16;

        const _ = !0;
    }
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self::BEGIN_FROM_CURRENT_STATE
    }
}

impl AnimationOptions {
    /// Bit offset of the curve field.
    pub const CURVE_SHIFT: u32 = 16;

    /// Options for an animation that follows the keyboard's own curve.
    ///
    /// Keyboard notifications report their curve as a raw enum value, which may
    /// be one the public curve constants do not name. It is shifted into the
    /// curve field as-is and combined with
    /// [`BEGIN_FROM_CURRENT_STATE`](Self::BEGIN_FROM_CURRENT_STATE).
    #[must_use]
    pub const fn from_keyboard_curve(raw_curve: u32) -> Self {
        Self::from_bits_retain(
            (raw_curve << Self::CURVE_SHIFT) | Self::BEGIN_FROM_CURRENT_STATE.bits(),
        )
    }
}

/// Parameters of a height transition.
///
/// An `AnimationSpec` is an immutable value: build it once with [`AnimationSpec::new`]
/// or [`Default`], adjust it with the `with_*` methods, and pass it per call or
/// store it as the controller default.
///
/// Invariants, enforced by the constructors:
/// - `duration > 0`,
/// - `delay >= 0` (trivially true for [`Duration`]),
/// - `0 < spring_damping <= 1`,
/// - `spring_velocity >= 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpec {
    duration: Duration,
    delay: Duration,
    spring_damping: f64,
    spring_velocity: f64,
    options: AnimationOptions,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            duration: Self::DEFAULT_DURATION,
            delay: Duration::ZERO,
            spring_damping: 0.8,
            spring_velocity: 0.8,
            options: AnimationOptions::BEGIN_FROM_CURRENT_STATE,
        }
    }
}

impl AnimationSpec {
    /// Duration used by [`AnimationSpec::default`].
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(200);

    /// Smallest duration a spec may carry.
    pub const MIN_DURATION: Duration = Duration::from_micros(1);

    /// Creates a spec with the given duration and the default spring and options.
    ///
    /// A zero duration is raised to [`AnimationSpec::MIN_DURATION`].
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration: duration.max(Self::MIN_DURATION),
            ..Self::default()
        }
    }

    /// Creates a spec that follows a keyboard notification's animation.
    ///
    /// Keyboard animations are not springs, so damping is `1` and velocity `0`.
    /// Returns `None` when the notification carries no duration; the caller
    /// should apply its changes without animating.
    #[must_use]
    pub fn from_keyboard(duration: Duration, raw_curve: u32) -> Option<Self> {
        if duration.is_zero() {
            return None;
        }
        Some(Self {
            duration,
            delay: Duration::ZERO,
            spring_damping: 1.0,
            spring_velocity: 0.0,
            options: AnimationOptions::from_keyboard_curve(raw_curve),
        })
    }

    /// Returns a copy with the given start delay.
    #[must_use]
    pub fn with_delay(self, delay: Duration) -> Self {
        Self { delay, ..self }
    }

    /// Returns a copy with the given spring parameters.
    ///
    /// Damping is clamped into `(0, 1]`; velocity is clamped to be non-negative.
    /// Non-finite inputs fall back to the defaults.
    #[must_use]
    pub fn with_spring(self, damping: f64, velocity: f64) -> Self {
        let defaults = Self::default();
        let spring_damping = if damping.is_finite() {
            damping.clamp(f64::MIN_POSITIVE, 1.0)
        } else {
            defaults.spring_damping
        };
        let spring_velocity = if velocity.is_finite() {
            velocity.max(0.0)
        } else {
            defaults.spring_velocity
        };
        Self {
            spring_damping,
            spring_velocity,
            ..self
        }
    }

    /// Returns a copy with the given platform options.
    #[must_use]
    pub fn with_options(self, options: AnimationOptions) -> Self {
        Self { options, ..self }
    }

    /// Animation duration.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Delay before the animation starts.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Spring damping ratio in `(0, 1]`. `1` means no oscillation.
    #[must_use]
    pub const fn spring_damping(&self) -> f64 {
        self.spring_damping
    }

    /// Initial spring velocity, relative to the total distance travelled.
    #[must_use]
    pub const fn spring_velocity(&self) -> f64 {
        self.spring_velocity
    }

    /// Opaque platform options.
    #[must_use]
    pub const fn options(&self) -> AnimationOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_bar_defaults() {
        let spec = AnimationSpec::default();
        assert_eq!(spec.duration(), Duration::from_millis(200));
        assert_eq!(spec.delay(), Duration::ZERO);
        assert_eq!(spec.spring_damping(), 0.8);
        assert_eq!(spec.spring_velocity(), 0.8);
        assert_eq!(spec.options(), AnimationOptions::BEGIN_FROM_CURRENT_STATE);
    }

    #[test]
    fn constructors_hold_invariants() {
        let spec = AnimationSpec::new(Duration::ZERO);
        assert!(!spec.duration().is_zero());

        let spec = AnimationSpec::default().with_spring(0.0, -3.0);
        assert!(spec.spring_damping() > 0.0);
        assert_eq!(spec.spring_velocity(), 0.0);

        let spec = AnimationSpec::default().with_spring(4.0, f64::NAN);
        assert_eq!(spec.spring_damping(), 1.0);
        assert_eq!(spec.spring_velocity(), 0.8);
    }

    #[test]
    fn keyboard_curve_is_carried_through() {
        // 7 is the undocumented keyboard curve; it has no named constant.
        let spec = AnimationSpec::from_keyboard(Duration::from_millis(250), 7).unwrap();
        assert_eq!(spec.options().bits(), (7 << 16) | (1 << 2));
        assert!(
            spec.options()
                .contains(AnimationOptions::BEGIN_FROM_CURRENT_STATE)
        );
        assert_eq!(spec.spring_damping(), 1.0);

        assert!(AnimationSpec::from_keyboard(Duration::ZERO, 7).is_none());
    }
}
