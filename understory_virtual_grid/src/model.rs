// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The caller-owned grid configuration.

use alloc::rc::Rc;
use core::fmt;

use kurbo::{Insets, Rect, Size, Vec2};

use crate::error::check_length;
use crate::{Axis, ContainerId, GridModelError, WindowOptions};

/// Intrinsic size hint for the content of a single item.
///
/// A missing dimension means "fill the cell" along that axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ItemSize {
    /// Content width, if fixed.
    pub width: Option<f64>,
    /// Content height, if fixed.
    pub height: Option<f64>,
}

/// Options forwarded to the row and column windowing instances.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct VirtualizerConfig {
    /// Options for the row (vertical) window.
    pub rows: WindowOptions,
    /// Options for the column (horizontal) window.
    pub columns: WindowOptions,
}

/// Callback invoked when the load-more sentinel comes into view.
///
/// Invocations may repeat while the sentinel stays visible; callers guard
/// against overlapping fetches themselves.
#[derive(Clone)]
pub struct LoadMore(Rc<dyn Fn()>);

impl LoadMore {
    /// Wraps `f` as a load-more callback.
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invokes the callback.
    pub fn call(&self) {
        (self.0)();
    }
}

impl fmt::Debug for LoadMore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LoadMore(..)")
    }
}

/// Source of per-item pixel rectangles.
///
/// Returns `None` for an index that has no computed geometry yet.
pub trait ItemRects {
    /// Rectangle of the item at `index`, in grid-local coordinates.
    fn item_rect(&self, index: usize) -> Option<Rect>;
}

impl<F> ItemRects for F
where
    F: Fn(usize) -> Option<Rect>,
{
    fn item_rect(&self, index: usize) -> Option<Rect> {
        self(index)
    }
}

/// Shared handle to an [`ItemRects`] implementation.
#[derive(Clone)]
pub struct SharedItemRects(Rc<dyn ItemRects>);

impl SharedItemRects {
    /// Wraps `rects` for storage in a [`GridModel`].
    pub fn new(rects: impl ItemRects + 'static) -> Self {
        Self(Rc::new(rects))
    }
}

impl ItemRects for SharedItemRects {
    fn item_rect(&self, index: usize) -> Option<Rect> {
        self.0.item_rect(index)
    }
}

impl fmt::Debug for SharedItemRects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedItemRects(..)")
    }
}

/// Item rectangles for a grid whose slots all share `virtual_item_size`.
///
/// Slot `(row, column)` starts at `padding + (column * width, row * height)`.
/// The gap is not added on top: it is part of the slot, consumed as leading
/// space by every row and column but the first (see [`GridModel::virtual_item_size`]).
/// Indices past the loaded grid still resolve, which is what lets the
/// load-more sizer find the leading edge of the first unloaded row or column.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UniformItemRects {
    /// Slot size.
    pub slot: Size,
    /// Outer inset of the grid.
    pub padding: Insets,
    /// Number of rows (divisor when column-major).
    pub rows: usize,
    /// Number of columns (divisor when row-major).
    pub columns: usize,
    /// Column-major ordering.
    pub horizontal: bool,
}

impl UniformItemRects {
    /// Derives uniform rectangles from `model`.
    #[must_use]
    pub fn from_model(model: &GridModel) -> Self {
        Self {
            slot: model.virtual_item_size,
            padding: model.padding,
            rows: model.row_count,
            columns: model.column_count,
            horizontal: model.horizontal,
        }
    }
}

impl ItemRects for UniformItemRects {
    fn item_rect(&self, index: usize) -> Option<Rect> {
        let (row, column) = if self.horizontal {
            let rows = self.rows.max(1);
            (index % rows, index / rows)
        } else {
            let columns = self.columns.max(1);
            (index / columns, index % columns)
        };
        let origin = (
            self.padding.x0 + column as f64 * self.slot.width,
            self.padding.y0 + row as f64 * self.slot.height,
        );
        Some(Rect::from_origin_size(origin, self.slot))
    }
}

/// Configuration of a virtualized grid.
///
/// A model is treated as immutable for one layout pass; callers replace it
/// wholesale (through [`GridCore::update`](crate::GridCore::update)) whenever
/// data or configuration changes.
#[derive(Clone, Debug, Default)]
pub struct GridModel {
    /// Number of items currently known.
    pub count: usize,
    /// Number of loaded rows. Zero means "unset" for load-more purposes.
    pub row_count: usize,
    /// Number of loaded columns. Zero means "unset" for load-more purposes.
    pub column_count: usize,
    /// Full number of rows, when more data exists than is loaded.
    pub total_row_count: Option<usize>,
    /// Full number of columns, when more data exists than is loaded.
    pub total_column_count: Option<usize>,
    /// Grows along columns (column-major) instead of rows.
    pub horizontal: bool,
    /// Renders items in reverse order.
    pub invert: bool,
    /// Intrinsic content size of each item.
    pub item_size: ItemSize,
    /// Nominal slot size; changes force the matching window to re-measure.
    ///
    /// The slot includes the leading gap of every row and column but the
    /// first. The first row and column get the same slot without a gap, so
    /// their content box is `gap` larger unless [`Self::item_size`] fixes it.
    pub virtual_item_size: Size,
    /// Spacing between cells, applied as leading padding on all but the first row/column.
    pub gap: Vec2,
    /// Outer inset of the grid.
    ///
    /// Both windows add it around their tracks, so it is part of the
    /// container size and is subtracted again to get the usable area.
    pub padding: Insets,
    /// Explicit sentinel extent.
    pub load_more_size: Option<f64>,
    /// Invoked when the sentinel enters view.
    pub on_load_more: Option<LoadMore>,
    /// Identity of the scroll container observed for structural changes.
    pub scroll_container: Option<ContainerId>,
    /// Options forwarded to the two windowing instances.
    pub virtualizer: VirtualizerConfig,
    /// Item rectangle source; [`UniformItemRects`] is used when unset.
    pub item_rects: Option<SharedItemRects>,
}

impl GridModel {
    /// Creates a fully loaded `rows × columns` grid of `count` items.
    ///
    /// Both windows are configured with the matching count and with
    /// `virtual_item_size` as their per-item estimate.
    #[must_use]
    pub fn new(count: usize, rows: usize, columns: usize, virtual_item_size: Size) -> Self {
        Self::default()
            .with_count(count)
            .with_dimensions(rows, columns)
            .with_virtual_item_size(virtual_item_size)
    }

    /// Sets the number of known items.
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Sets the loaded grid dimensions and the window counts.
    #[must_use]
    pub fn with_dimensions(mut self, rows: usize, columns: usize) -> Self {
        self.row_count = rows;
        self.column_count = columns;
        self.virtualizer.rows.count = rows;
        self.virtualizer.columns.count = columns;
        self
    }

    /// Sets the full grid dimensions, when more data can be loaded.
    #[must_use]
    pub fn with_totals(mut self, rows: Option<usize>, columns: Option<usize>) -> Self {
        self.total_row_count = rows;
        self.total_column_count = columns;
        self
    }

    /// Sets column-major ordering and horizontal growth.
    #[must_use]
    pub fn with_horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    /// Sets reverse ordering.
    #[must_use]
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Sets the item content size.
    #[must_use]
    pub fn with_item_size(mut self, item_size: ItemSize) -> Self {
        self.item_size = item_size;
        self
    }

    /// Sets the nominal slot size and the per-item estimate of both windows.
    #[must_use]
    pub fn with_virtual_item_size(mut self, size: Size) -> Self {
        self.virtual_item_size = size;
        self.virtualizer.rows.estimate = size.height;
        self.virtualizer.columns.estimate = size.width;
        self
    }

    /// Sets the inter-cell gap.
    #[must_use]
    pub fn with_gap(mut self, gap: Vec2) -> Self {
        self.gap = gap;
        self
    }

    /// Sets the outer inset.
    #[must_use]
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Sets an explicit sentinel extent.
    #[must_use]
    pub fn with_load_more_size(mut self, size: Option<f64>) -> Self {
        self.load_more_size = size;
        self
    }

    /// Sets the load-more callback.
    #[must_use]
    pub fn with_on_load_more(mut self, f: impl Fn() + 'static) -> Self {
        self.on_load_more = Some(LoadMore::new(f));
        self
    }

    /// Sets the observed scroll container.
    #[must_use]
    pub fn with_scroll_container(mut self, container: Option<ContainerId>) -> Self {
        self.scroll_container = container;
        self
    }

    /// Sets the item rectangle source.
    #[must_use]
    pub fn with_item_rects(mut self, rects: impl ItemRects + 'static) -> Self {
        self.item_rects = Some(SharedItemRects::new(rects));
        self
    }

    /// The axis along which this grid grows.
    #[must_use]
    pub const fn growth_axis(&self) -> Axis {
        if self.horizontal {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    /// Rectangle of the item at `index`, from [`Self::item_rects`] or uniform slots.
    #[must_use]
    pub fn item_rect(&self, index: usize) -> Option<Rect> {
        match &self.item_rects {
            Some(rects) => rects.item_rect(index),
            None => UniformItemRects::from_model(self).item_rect(index),
        }
    }

    /// Checks that every length in the model is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as a [`GridModelError`].
    pub fn validate(&self) -> Result<(), GridModelError> {
        if let Some(width) = self.item_size.width {
            check_length("item_size.width", width)?;
        }
        if let Some(height) = self.item_size.height {
            check_length("item_size.height", height)?;
        }
        check_length("virtual_item_size.width", self.virtual_item_size.width)?;
        check_length("virtual_item_size.height", self.virtual_item_size.height)?;
        check_length("gap.x", self.gap.x)?;
        check_length("gap.y", self.gap.y)?;
        check_length("padding.left", self.padding.x0)?;
        check_length("padding.top", self.padding.y0)?;
        check_length("padding.right", self.padding.x1)?;
        check_length("padding.bottom", self.padding.y1)?;
        if let Some(size) = self.load_more_size {
            check_length("load_more_size", size)?;
        }
        self.virtualizer.rows.validate(Axis::Vertical)?;
        self.virtualizer.columns.validate(Axis::Horizontal)?;
        Ok(())
    }
}
