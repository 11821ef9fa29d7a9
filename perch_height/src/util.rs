// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Rounds to the nearest multiple of `0.5`.
#[inline]
pub(crate) fn round_to_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}

#[cfg(test)]
mod tests {
    #[test]
    fn round_to_half() {
        assert_eq!(super::round_to_half(50.2), 50.0);
        assert_eq!(super::round_to_half(50.3), 50.5);
        assert_eq!(super::round_to_half(84.0), 84.0);
        assert_eq!(super::round_to_half(43.76), 44.0);
    }
}
