// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-dimensional windowing instances.
//!
//! A grid is virtualized by two independent windows, one per axis. The grid
//! only relies on the [`Window`] trait; [`TrackWindow`] is the implementation
//! shipped with this crate.

mod measurements;
mod track;

pub use track::TrackWindow;

use crate::error::check_length;
use crate::{Axis, GridModelError};

/// A realized track (row or column) returned by a [`Window`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VirtualItem {
    /// Track index.
    pub index: usize,
    /// Leading edge in scroll coordinates, including the window's scroll
    /// margin and leading padding.
    pub start: f64,
    /// Extent along the window's axis.
    pub size: f64,
    /// Trailing edge (`start + size`).
    pub end: f64,
    /// Stable key for the track.
    pub key: u64,
}

/// Options for a single windowing instance.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WindowOptions {
    /// Number of tracks.
    pub count: usize,
    /// Estimated extent of a track that has not been measured.
    pub estimate: f64,
    /// Extra distance realized on each side of the viewport.
    pub overscan: f64,
    /// Distance between the start of the scroll content and the first track.
    pub scroll_margin: f64,
    /// Empty space before the first track, inside the content.
    pub padding_start: f64,
    /// Empty space after the last track, inside the content.
    pub padding_end: f64,
}

impl WindowOptions {
    /// Creates options for `count` tracks of `estimate` extent each.
    #[must_use]
    pub const fn new(count: usize, estimate: f64) -> Self {
        Self {
            count,
            estimate,
            overscan: 0.0,
            scroll_margin: 0.0,
            padding_start: 0.0,
            padding_end: 0.0,
        }
    }

    /// Sets the overscan distance.
    #[must_use]
    pub const fn with_overscan(mut self, overscan: f64) -> Self {
        self.overscan = overscan;
        self
    }

    /// Sets the scroll margin.
    #[must_use]
    pub const fn with_scroll_margin(mut self, scroll_margin: f64) -> Self {
        self.scroll_margin = scroll_margin;
        self
    }

    /// Sets the padding before the first and after the last track.
    #[must_use]
    pub const fn with_padding(mut self, start: f64, end: f64) -> Self {
        self.padding_start = start;
        self.padding_end = end;
        self
    }

    pub(crate) fn validate(&self, axis: Axis) -> Result<(), GridModelError> {
        let (estimate, overscan) = match axis {
            Axis::Vertical => ("virtualizer.rows.estimate", "virtualizer.rows.overscan"),
            Axis::Horizontal => (
                "virtualizer.columns.estimate",
                "virtualizer.columns.overscan",
            ),
        };
        check_length(estimate, self.estimate)?;
        check_length(overscan, self.overscan)
    }
}

/// A scrollable 1D window that realizes only the tracks near its viewport.
///
/// Implementations keep their own cache of measured track sizes. That cache
/// survives [`set_options`](Window::set_options) and is dropped only by
/// [`measure`](Window::measure), so callers decide when stale sizes go away.
pub trait Window {
    /// Current options.
    fn options(&self) -> &WindowOptions;

    /// Replaces the options without discarding measured sizes.
    fn set_options(&mut self, options: WindowOptions);

    /// Tracks overlapping the viewport plus overscan, in index order.
    fn virtual_items(&mut self) -> &[VirtualItem];

    /// Extent of all tracks plus both paddings, excluding the scroll margin.
    fn total_size(&mut self) -> f64;

    /// Drops cached measurements so every track is re-derived from the estimate.
    fn measure(&mut self);

    /// Current scroll offset of the attached scroll element.
    fn scroll_offset(&self) -> f64;

    /// Client extent of the attached scroll element along this window's axis.
    ///
    /// Returns `None` when no scroll element is attached.
    fn client_extent(&self) -> Option<f64>;

    /// Current scroll margin.
    fn scroll_margin(&self) -> f64 {
        self.options().scroll_margin
    }

    /// Updates only the scroll margin.
    fn set_scroll_margin(&mut self, scroll_margin: f64) {
        let options = WindowOptions {
            scroll_margin,
            ..*self.options()
        };
        self.set_options(options);
    }
}
