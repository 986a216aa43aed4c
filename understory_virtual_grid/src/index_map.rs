// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping between `(row, column)` grid positions and linear item indices.
//!
//! A grid with `rows × columns` slots may hold fewer than `rows × columns`
//! items (for example a partially filled last row). Positions whose mapped
//! index falls outside `0..count` simply have no item: both directions return
//! `None` for them instead of failing.

use crate::GridModel;

/// Maps grid positions to linear indices and back.
///
/// - Row-major (`horizontal == false`): `index = row * columns + column`.
/// - Column-major (`horizontal == true`): `index = column * rows + row`.
///
/// With `invert`, the final index is `count - 1 - index`, applied after the
/// orientation mapping.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IndexMapper {
    /// Number of items currently known.
    pub count: usize,
    /// Number of rows in the grid.
    pub rows: usize,
    /// Number of columns in the grid.
    pub columns: usize,
    /// Column-major ordering.
    pub horizontal: bool,
    /// Reverse ordering.
    pub invert: bool,
}

impl IndexMapper {
    /// Creates a row-major, non-inverted mapper.
    #[must_use]
    pub const fn new(count: usize, rows: usize, columns: usize) -> Self {
        Self {
            count,
            rows,
            columns,
            horizontal: false,
            invert: false,
        }
    }

    /// Builds a mapper from the dimensions and flags of `model`.
    #[must_use]
    pub const fn from_model(model: &GridModel) -> Self {
        Self {
            count: model.count,
            rows: model.row_count,
            columns: model.column_count,
            horizontal: model.horizontal,
            invert: model.invert,
        }
    }

    /// Sets column-major ordering.
    #[must_use]
    pub const fn with_horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    /// Sets reverse ordering.
    #[must_use]
    pub const fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Linear index of the item at `(row, column)`, if there is one.
    #[must_use]
    pub fn to_linear(&self, row: usize, column: usize) -> Option<usize> {
        let raw = if self.horizontal {
            column.checked_mul(self.rows)?.checked_add(row)?
        } else {
            row.checked_mul(self.columns)?.checked_add(column)?
        };
        // `count - 1 - raw` is negative exactly when `raw >= count`, so the
        // range check is the same before and after inversion.
        if raw >= self.count {
            return None;
        }
        Some(if self.invert {
            self.count - 1 - raw
        } else {
            raw
        })
    }

    /// Grid position `(row, column)` of the item at `index`.
    ///
    /// Returns `None` if `index >= count`, or if the divisor axis
    /// (`columns` when row-major, `rows` when column-major) is zero.
    #[must_use]
    pub fn to_cell(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.count {
            return None;
        }
        let raw = if self.invert {
            self.count - 1 - index
        } else {
            index
        };
        if self.horizontal {
            let rows = self.rows;
            (rows != 0).then(|| (raw % rows, raw / rows))
        } else {
            let columns = self.columns;
            (columns != 0).then(|| (raw / columns, raw % columns))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::IndexMapper;

    #[test]
    fn row_major_scenario() {
        let mapper = IndexMapper::new(100, 10, 10);
        assert_eq!(mapper.to_linear(3, 4), Some(34));
        assert_eq!(mapper.to_cell(34), Some((3, 4)));
    }

    #[test]
    fn inverted_scenario() {
        let mapper = IndexMapper::new(100, 10, 10).with_invert(true);
        assert_eq!(mapper.to_linear(3, 4), Some(65));
        assert_eq!(mapper.to_cell(65), Some((3, 4)));
    }

    #[test]
    fn column_major_mapping() {
        // 3 rows × 4 columns, filled column by column.
        let mapper = IndexMapper::new(12, 3, 4).with_horizontal(true);
        assert_eq!(mapper.to_linear(0, 0), Some(0));
        assert_eq!(mapper.to_linear(2, 0), Some(2));
        assert_eq!(mapper.to_linear(0, 1), Some(3));
        assert_eq!(mapper.to_cell(7), Some((1, 2)));
    }

    #[test]
    fn round_trip_over_partial_grid() {
        let mapper = IndexMapper::new(23, 5, 5);
        for row in 0..5 {
            for column in 0..5 {
                match mapper.to_linear(row, column) {
                    Some(index) => assert_eq!(mapper.to_cell(index), Some((row, column))),
                    None => assert!(row * 5 + column >= 23, "missing ({row}, {column})"),
                }
            }
        }
    }

    #[test]
    fn inversion_mirrors_plain_mapping() {
        let plain = IndexMapper::new(37, 4, 10);
        let inverted = plain.with_invert(true);
        for row in 0..4 {
            for column in 0..10 {
                let expected = plain.to_linear(row, column).map(|i| 36 - i);
                assert_eq!(inverted.to_linear(row, column), expected);
            }
        }
    }

    #[test]
    fn out_of_range_positions_have_no_index() {
        let mapper = IndexMapper::new(7, 3, 3);
        assert_eq!(mapper.to_linear(2, 1), None);
        assert_eq!(mapper.to_linear(2, 2), None);
        assert_eq!(mapper.with_invert(true).to_linear(2, 1), None);
        assert_eq!(mapper.to_cell(7), None);
    }

    #[test]
    fn degenerate_dimensions() {
        let mapper = IndexMapper::new(4, 0, 0);
        assert_eq!(mapper.to_cell(1), None);
        assert_eq!(IndexMapper::new(0, 3, 3).to_linear(0, 0), None);
        assert_eq!(IndexMapper::new(4, 1, 1).to_linear(usize::MAX, 2), None);
    }
}
