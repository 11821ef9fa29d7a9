// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Reasons a height change was not applied.
///
/// None of these are fatal: state is left untouched and the bar keeps its
/// current height until the cause is fixed.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum HeightError {
    /// The outer height constraint has not been attached, usually because the
    /// bar is not in the keyboard hierarchy yet.
    #[error("outer height constraint is not attached; the bar cannot resize yet")]
    OuterConstraintMissing,
    /// A NaN or infinite height was requested.
    #[error("requested height {0} is not finite")]
    NonFiniteHeight(f64),
}
