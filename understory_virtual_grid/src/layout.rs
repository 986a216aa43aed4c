// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Output of a layout pass: container size, sentinel, and cells.

use alloc::vec::Vec;

use kurbo::{Rect, Size, Vec2};

use crate::{Axis, ItemSize};

bitflags::bitflags! {
    /// Leading gaps applied to a cell.
    ///
    /// Every row but the first carries the vertical gap above it, and every
    /// column but the first carries the horizontal gap to its left.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CellGaps: u8 {
        /// `gap.x` is applied as left padding.
        const LEADING_X = 0b0000_0001;
        /// `gap.y` is applied as top padding.
        const LEADING_Y = 0b0000_0010;
    }
}

/// A realized grid cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cell {
    /// Linear index of the item in this cell (after inversion).
    pub index: usize,
    /// Row of the cell.
    pub row: usize,
    /// Column of the cell.
    pub column: usize,
    /// Slot rectangle in grid-local coordinates, including leading gaps.
    pub rect: Rect,
    /// Leading gaps applied inside [`Self::rect`].
    pub gaps: CellGaps,
}

impl Cell {
    /// Rectangle of the item content.
    ///
    /// The slot is shrunk by the applied leading gaps, then an item of
    /// `item_size` is placed in what remains: centered horizontally and
    /// aligned to the top. A missing dimension fills the remaining space.
    #[must_use]
    pub fn content_rect(&self, item_size: ItemSize, gap: Vec2) -> Rect {
        let mut inner = self.rect;
        if self.gaps.contains(CellGaps::LEADING_X) {
            inner.x0 = (inner.x0 + gap.x).min(inner.x1);
        }
        if self.gaps.contains(CellGaps::LEADING_Y) {
            inner.y0 = (inner.y0 + gap.y).min(inner.y1);
        }
        let width = item_size.width.unwrap_or(inner.width());
        let height = item_size.height.unwrap_or(inner.height());
        let origin = (inner.x0 + (inner.width() - width) / 2.0, inner.y0);
        Rect::from_origin_size(origin, (width, height))
    }
}

/// The invisible probe placed at the trailing edge of the grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sentinel {
    /// Growth axis: the sentinel is anchored to the bottom edge when
    /// [`Axis::Vertical`] and to the right edge when [`Axis::Horizontal`].
    pub axis: Axis,
    /// Extent along `axis`. `None` when no trigger could be sized.
    pub extent: Option<f64>,
}

impl Sentinel {
    /// Rectangle of the sentinel inside a container of size `container`.
    ///
    /// The sentinel spans the full cross extent. Without an extent it
    /// collapses to the trailing edge.
    #[must_use]
    pub fn rect(&self, container: Size) -> Rect {
        let extent = self.extent.unwrap_or(0.0).max(0.0);
        match self.axis {
            Axis::Vertical => Rect::new(
                0.0,
                container.height - extent,
                container.width,
                container.height,
            ),
            Axis::Horizontal => Rect::new(
                container.width - extent,
                0.0,
                container.width,
                container.height,
            ),
        }
    }
}

/// Result of [`GridCore::layout`](crate::GridCore::layout).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridLayout {
    /// Size of the outer container (total extent of both windows).
    pub size: Size,
    /// Load-more sentinel; absent when no load-more callback is set or the
    /// usable area is empty.
    pub sentinel: Option<Sentinel>,
    /// Realized cells, row by row, each row ordered by column.
    pub cells: Vec<Cell>,
}

impl GridLayout {
    /// Pairs every cell with the content produced by `render(index)`.
    pub fn render<T>(
        &self,
        mut render: impl FnMut(usize) -> T,
    ) -> impl Iterator<Item = (&Cell, T)> {
        self.cells.iter().map(move |cell| (cell, render(cell.index)))
    }

    /// Rectangle of the sentinel, if there is one.
    #[must_use]
    pub fn sentinel_rect(&self) -> Option<Rect> {
        self.sentinel.map(|sentinel| sentinel.rect(self.size))
    }
}
