// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Samples the row and column windows for one layout pass.

use alloc::vec::Vec;

use kurbo::Size;
use tracing::trace;

use crate::{GridModel, VirtualItem, Window, WindowOptions};

/// Visible tracks of both axes plus the total content size.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sample {
    /// Visible rows, in index order.
    pub rows: Vec<VirtualItem>,
    /// Visible columns, in index order.
    pub columns: Vec<VirtualItem>,
    /// Total extent of all columns (width) and all rows (height), padding included.
    pub size: Size,
    /// Scroll margin of the row window when sampled.
    pub row_margin: f64,
}

/// Drives two [`Window`]s from a [`GridModel`].
///
/// The sampler remembers the last nominal slot size seen on each axis and
/// forces a re-measure of that axis exactly when it changes. Windows are
/// never re-measured on a pass where their slot size is unchanged, so their
/// measurement caches stay useful between passes.
#[derive(Clone, Debug, Default)]
pub struct ViewportSampler {
    last_row_extent: Option<f64>,
    last_column_extent: Option<f64>,
}

impl ViewportSampler {
    /// Creates a sampler that will measure both axes on its first sync.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_row_extent: None,
            last_column_extent: None,
        }
    }

    /// Pushes `model`'s window options into both windows, then re-measures
    /// each axis whose slot size differs from the previous sync.
    ///
    /// `row_margin` replaces the row window's configured scroll margin. The
    /// model's padding replaces the configured window paddings: top and
    /// bottom for rows, left and right for columns.
    pub fn sync<R, C>(&mut self, model: &GridModel, rows: &mut R, columns: &mut C, row_margin: f64)
    where
        R: Window + ?Sized,
        C: Window + ?Sized,
    {
        let padding = model.padding;
        let row_options = WindowOptions {
            scroll_margin: row_margin,
            ..model.virtualizer.rows.with_padding(padding.y0, padding.y1)
        };
        rows.set_options(row_options);
        columns.set_options(model.virtualizer.columns.with_padding(padding.x0, padding.x1));

        let height = model.virtual_item_size.height;
        if self.last_row_extent != Some(height) {
            trace!(height, "re-measuring rows");
            rows.measure();
            self.last_row_extent = Some(height);
        }
        let width = model.virtual_item_size.width;
        if self.last_column_extent != Some(width) {
            trace!(width, "re-measuring columns");
            columns.measure();
            self.last_column_extent = Some(width);
        }
    }

    /// Reads the visible tracks and total size of both windows.
    pub fn sample<R, C>(&self, rows: &mut R, columns: &mut C) -> Sample
    where
        R: Window + ?Sized,
        C: Window + ?Sized,
    {
        let size = Size::new(columns.total_size(), rows.total_size());
        Sample {
            rows: rows.virtual_items().to_vec(),
            columns: columns.virtual_items().to_vec(),
            size,
            row_margin: rows.scroll_margin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Insets, Size};

    use super::ViewportSampler;
    use crate::{GridModel, TrackWindow, Window, WindowOptions};

    fn windows() -> (TrackWindow, TrackWindow) {
        let mut rows = TrackWindow::new(WindowOptions::default());
        let mut columns = TrackWindow::new(WindowOptions::default());
        rows.attach(100.0);
        columns.attach(100.0);
        (rows, columns)
    }

    #[test]
    fn sample_reports_visible_tracks_and_size() {
        let model = GridModel::new(100, 10, 10, Size::new(20.0, 25.0));
        let (mut rows, mut columns) = windows();
        let mut sampler = ViewportSampler::new();
        sampler.sync(&model, &mut rows, &mut columns, 0.0);
        let sample = sampler.sample(&mut rows, &mut columns);

        assert_eq!(sample.size, Size::new(200.0, 250.0));
        assert_eq!(sample.rows.len(), 4);
        assert_eq!(sample.columns.len(), 5);
        assert_eq!(sample.rows[1].start, 25.0);
    }

    #[test]
    fn row_margin_overrides_configured_margin() {
        let model = GridModel::new(4, 2, 2, Size::new(10.0, 10.0));
        let (mut rows, mut columns) = windows();
        let mut sampler = ViewportSampler::new();
        sampler.sync(&model, &mut rows, &mut columns, 64.0);
        assert_eq!(rows.scroll_margin(), 64.0);
        assert_eq!(columns.scroll_margin(), 0.0);
    }

    #[test]
    fn model_padding_reaches_both_windows() {
        let model = GridModel::new(100, 10, 10, Size::new(20.0, 25.0))
            .with_padding(Insets::new(3.0, 7.0, 5.0, 11.0));
        let (mut rows, mut columns) = windows();
        let mut sampler = ViewportSampler::new();
        sampler.sync(&model, &mut rows, &mut columns, 30.0);
        let sample = sampler.sample(&mut rows, &mut columns);

        assert_eq!(sample.size, Size::new(208.0, 268.0));
        assert_eq!(sample.columns[0].start, 3.0);
        // Row starts carry the margin as well as the top padding.
        assert_eq!(sample.rows[0].start, 37.0);
        assert_eq!(rows.options().padding_end, 11.0);
    }

    #[test]
    fn remeasures_only_on_slot_size_change() {
        let model = GridModel::new(40, 4, 10, Size::new(10.0, 10.0));
        let (mut rows, mut columns) = windows();
        let mut sampler = ViewportSampler::new();
        sampler.sync(&model, &mut rows, &mut columns, 0.0);

        rows.resize_item(0, 50.0);
        columns.resize_item(0, 50.0);

        // Same slot size: measured sizes are kept.
        sampler.sync(&model, &mut rows, &mut columns, 0.0);
        assert_eq!(rows.total_size(), 80.0);
        assert_eq!(columns.total_size(), 140.0);

        // Only the height changes: rows drop their cache, columns keep theirs.
        let taller = model.with_virtual_item_size(Size::new(10.0, 20.0));
        sampler.sync(&taller, &mut rows, &mut columns, 0.0);
        assert_eq!(rows.total_size(), 80.0);
        assert_eq!(columns.total_size(), 140.0);

        rows.resize_item(1, 5.0);
        assert_eq!(rows.total_size(), 65.0);
        let shorter = taller.with_virtual_item_size(Size::new(10.0, 15.0));
        sampler.sync(&shorter, &mut rows, &mut columns, 0.0);
        assert_eq!(rows.total_size(), 60.0);
    }
}
