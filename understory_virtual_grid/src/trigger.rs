// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sizing of the load-more sentinel and edge detection of its visibility.
//!
//! The sentinel sits at the trailing edge of the grid. While more data
//! exists than is loaded, it is stretched so that its leading edge lies a
//! *lookahead* distance before the end of the loaded tracks. The visibility
//! observer therefore reports it in view before the user reaches the last
//! loaded row or column, leaving time to fetch the next page.

use crate::{Axis, GridModel, Window};

/// Extent of the load-more sentinel along `axis`, or `None` for no trigger.
///
/// `window` is the window of `axis` (rows for [`Axis::Vertical`], columns for
/// [`Axis::Horizontal`]) and `content_extent` its total size.
///
/// - No trigger unless `axis` is the model's growth axis, a load-more
///   callback is set, and both the loaded and total track counts on `axis`
///   are non-zero.
/// - When everything is loaded, the extent is `load_more_size` as is.
/// - Otherwise the leading edge of the first unloaded track is read from
///   item `row_count * column_count`; if it is missing or zero the trigger
///   is suppressed. The result is
///   `min(content_extent, content_extent - edge + lookahead)`.
///
/// The lookahead is `load_more_size` when set. Otherwise it falls back to
/// the client extent of the window's scroll element; on the vertical axis
/// the part of the viewport still covered by content above the grid
/// (`scroll_margin - scroll_offset`) is subtracted first. An explicit
/// vertical `load_more_size` of zero counts as unset.
pub fn trigger_extent<W>(
    axis: Axis,
    model: &GridModel,
    window: &W,
    content_extent: f64,
) -> Option<f64>
where
    W: Window + ?Sized,
{
    if model.growth_axis() != axis || model.on_load_more.is_none() {
        return None;
    }
    let (loaded, total) = match axis {
        Axis::Vertical => (model.row_count, model.total_row_count),
        Axis::Horizontal => (model.column_count, model.total_column_count),
    };
    let total = total.filter(|&total| total != 0)?;
    if loaded == 0 {
        return None;
    }
    if total == loaded {
        return model.load_more_size;
    }

    let boundary = model.row_count.checked_mul(model.column_count)?;
    let edge = model
        .item_rect(boundary)
        .map(|rect| axis.of_rect_start(rect))
        .filter(|&edge| edge != 0.0)?;

    let lookahead = lookahead_extent(axis, model.load_more_size, window);
    Some(content_extent.min(content_extent - edge + lookahead))
}

fn lookahead_extent<W>(axis: Axis, load_more_size: Option<f64>, window: &W) -> f64
where
    W: Window + ?Sized,
{
    match axis {
        Axis::Vertical => match load_more_size.filter(|&size| size != 0.0) {
            Some(size) => size,
            None => window.client_extent().map_or(0.0, |client| {
                let covered = (window.scroll_margin() - window.scroll_offset()).max(0.0);
                (client - covered).max(0.0)
            }),
        },
        // No horizontal scroll margin is modeled.
        Axis::Horizontal => load_more_size
            .or_else(|| window.client_extent())
            .unwrap_or(0.0),
    }
}

/// Edge detector deciding when the load-more callback fires.
///
/// It fires when the sentinel enters view, and again when a new model is
/// installed while the sentinel is still in view. Reporting the same
/// visibility twice for the same model does not fire again.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadMoreSignal {
    in_view: bool,
    fired_for: Option<u64>,
}

impl LoadMoreSignal {
    /// Whether the sentinel was last reported in view.
    #[must_use]
    pub const fn in_view(&self) -> bool {
        self.in_view
    }

    /// Records the sentinel's visibility under model `generation`.
    ///
    /// Returns `true` if the callback should fire.
    pub fn set_in_view(&mut self, in_view: bool, generation: u64) -> bool {
        self.in_view = in_view;
        if !in_view {
            self.fired_for = None;
            return false;
        }
        self.fire_once(generation)
    }

    /// Records that model `generation` was installed.
    ///
    /// Returns `true` if the callback should fire.
    pub fn on_model(&mut self, generation: u64) -> bool {
        self.in_view && self.fire_once(generation)
    }

    fn fire_once(&mut self, generation: u64) -> bool {
        if self.fired_for == Some(generation) {
            return false;
        }
        self.fired_for = Some(generation);
        true
    }
}
