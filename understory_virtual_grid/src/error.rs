// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors reported when installing a [`GridModel`](crate::GridModel).

/// A [`GridModel`](crate::GridModel) field holds a value that geometry cannot be derived from.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GridModelError {
    /// A length is NaN or infinite.
    #[error("`{field}` must be finite, got {value}")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A length that must be non-negative is negative.
    #[error("`{field}` must not be negative, got {value}")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Checks that `value` is a finite, non-negative length.
pub(crate) fn check_length(field: &'static str, value: f64) -> Result<(), GridModelError> {
    if !value.is_finite() {
        return Err(GridModelError::NonFinite { field, value });
    }
    if value < 0.0 {
        return Err(GridModelError::Negative { field, value });
    }
    Ok(())
}
