// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis selector shared by the sampler and the load-more sizer.

use kurbo::{Rect, Size};

/// One of the two layout axes of a grid.
///
/// A grid grows along exactly one axis at a time: rows are appended when it
/// grows [`Vertical`](Axis::Vertical)ly, columns when it grows
/// [`Horizontal`](Axis::Horizontal)ly.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The y axis (rows).
    #[default]
    Vertical,
    /// The x axis (columns).
    Horizontal,
}

impl Axis {
    /// Returns the other axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }

    /// Projects `size` onto this axis.
    #[must_use]
    pub const fn of_size(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    /// Leading edge of `rect` along this axis (top or left).
    #[must_use]
    pub const fn of_rect_start(self, rect: Rect) -> f64 {
        match self {
            Self::Vertical => rect.y0,
            Self::Horizontal => rect.x0,
        }
    }
}
