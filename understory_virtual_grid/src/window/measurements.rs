// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-track extents with a lazily maintained prefix-sum of track starts.

use alloc::vec::Vec;
use core::ops::Range;

/// Track extents plus cached starts.
///
/// Starts are recomputed on demand from the first dirty index onwards, so a
/// run of `set_extent` calls followed by one query costs a single pass.
#[derive(Clone, Debug, Default)]
pub(crate) struct Measurements {
    extents: Vec<f64>,
    starts: Vec<f64>,
    dirty_from: Option<usize>,
}

impl Measurements {
    /// Replaces all extents with `extent_of(i)` for `i in 0..len`.
    pub(crate) fn rebuild(&mut self, len: usize, extent_of: impl Fn(usize) -> f64) {
        self.extents.clear();
        self.extents.extend((0..len).map(|i| {
            let extent = extent_of(i);
            debug_assert!(
                extent.is_finite(),
                "track extents must be finite; got {extent:?}"
            );
            extent.max(0.0)
        }));
        self.starts.resize(len, 0.0);
        self.dirty_from = Some(0);
    }

    pub(crate) fn len(&self) -> usize {
        self.extents.len()
    }

    fn ensure_starts_through(&mut self, through: usize) {
        let len = self.extents.len();
        if len == 0 || through >= len {
            return;
        }
        let dirty_from = match self.dirty_from {
            Some(d) if d <= through => d,
            _ => return,
        };

        let mut pos = if dirty_from == 0 {
            0.0
        } else {
            self.starts[dirty_from - 1] + self.extents[dirty_from - 1]
        };
        for i in dirty_from..len {
            self.starts[i] = pos;
            pos += self.extents[i];
        }
        self.dirty_from = None;
    }

    pub(crate) fn start_of(&mut self, index: usize) -> f64 {
        if index == 0 || self.extents.is_empty() {
            return 0.0;
        }
        let i = index.min(self.extents.len() - 1);
        self.ensure_starts_through(i);
        self.starts[i]
    }

    pub(crate) fn extent_of(&self, index: usize) -> f64 {
        self.extents.get(index).copied().unwrap_or(0.0)
    }

    pub(crate) fn total(&mut self) -> f64 {
        match self.extents.len() {
            0 => 0.0,
            len => self.start_of(len - 1) + self.extent_of(len - 1),
        }
    }

    /// Index of the last track starting at or before `offset`.
    fn index_at(&mut self, offset: f64) -> usize {
        let len = self.extents.len();
        if len == 0 {
            return 0;
        }
        self.ensure_starts_through(len - 1);
        let target = offset.max(0.0);
        match self.starts.binary_search_by(|start| {
            start
                .partial_cmp(&target)
                .unwrap_or(core::cmp::Ordering::Equal)
        }) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        }
    }

    /// Tracks overlapping `[offset - overscan, offset + viewport + overscan)`.
    ///
    /// `offset` is relative to the first track and may be negative when the
    /// tracks start below the top of the viewport.
    pub(crate) fn visible_range(
        &mut self,
        offset: f64,
        viewport: f64,
        overscan: f64,
    ) -> Range<usize> {
        let len = self.len();
        let content = self.total();
        if len == 0 || content <= 0.0 {
            return 0..0;
        }

        let viewport = viewport.max(0.0);
        let overscan = overscan.max(0.0);
        let min = (offset - overscan).max(0.0);
        let max = (offset + viewport + overscan).min(content);
        if max <= min {
            return 0..0;
        }

        let mut start = self.index_at(min).min(len - 1);
        while start > 0 && self.start_of(start) > min {
            start -= 1;
        }
        let mut end = start;
        while end < len && self.start_of(end) < max {
            end += 1;
        }
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::Measurements;

    fn uniform(len: usize, extent: f64) -> Measurements {
        let mut m = Measurements::default();
        m.rebuild(len, |_| extent);
        m
    }

    #[test]
    fn starts_and_total_follow_extents() {
        let mut m = Measurements::default();
        m.rebuild(3, |i| [10.0, 20.0, 30.0][i]);
        assert_eq!(m.start_of(0), 0.0);
        assert_eq!(m.start_of(1), 10.0);
        assert_eq!(m.start_of(2), 30.0);
        assert_eq!(m.extent_of(1), 20.0);
        assert_eq!(m.total(), 60.0);
    }

    #[test]
    fn negative_extents_are_clamped_to_zero() {
        let mut m = Measurements::default();
        m.rebuild(2, |i| if i == 0 { -5.0 } else { 5.0 });
        assert_eq!(m.extent_of(0), 0.0);
        assert_eq!(m.total(), 5.0);
    }

    #[test]
    fn simple_visible_range() {
        let mut m = uniform(3, 10.0);
        assert_eq!(m.visible_range(5.0, 10.0, 0.0), 0..2);
    }

    #[test]
    fn overscan_extends_both_sides() {
        let mut m = uniform(10, 10.0);
        assert_eq!(m.visible_range(30.0, 20.0, 0.0), 3..5);
        assert_eq!(m.visible_range(30.0, 20.0, 10.0), 2..6);
    }

    #[test]
    fn tracks_below_the_viewport_are_not_realized() {
        let mut m = uniform(10, 10.0);
        // Tracks start 50 below the viewport top, viewport is 30 tall.
        assert_eq!(m.visible_range(-50.0, 30.0, 0.0), 0..0);
        // Viewport reaches 15 into the tracks.
        assert_eq!(m.visible_range(-15.0, 30.0, 0.0), 0..2);
    }

    #[test]
    fn empty_or_collapsed_tracks_yield_nothing() {
        let mut m = Measurements::default();
        assert_eq!(m.visible_range(0.0, 100.0, 10.0), 0..0);
        let mut m = uniform(4, 0.0);
        assert_eq!(m.visible_range(0.0, 100.0, 10.0), 0..0);
    }
}
