// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Window`] over uniformly estimated tracks with per-track measurements.

use hashbrown::HashMap;
use smallvec::SmallVec;

use super::measurements::Measurements;
use super::{VirtualItem, Window, WindowOptions};

/// Controller for one axis of a virtualized grid.
///
/// This type:
/// - stores the scroll offset and the client extent of an attached scroll element,
/// - estimates every track at [`WindowOptions::estimate`] until it is measured
///   with [`TrackWindow::resize_item`],
/// - caches the most recently realized [`VirtualItem`]s.
///
/// Measured sizes are keyed by track key and survive option changes until
/// [`Window::measure`] drops them.
#[derive(Debug, Clone, Default)]
pub struct TrackWindow {
    options: WindowOptions,
    scroll_offset: f64,
    client_extent: Option<f64>,

    measured: HashMap<u64, f64>,
    measurements: Measurements,
    stale: bool,

    dirty: bool,
    items: SmallVec<[VirtualItem; 32]>,
}

impl TrackWindow {
    /// Creates a detached window with the given options.
    #[must_use]
    pub fn new(options: WindowOptions) -> Self {
        Self {
            options,
            stale: true,
            dirty: true,
            ..Self::default()
        }
    }

    /// Attaches a scroll element whose client extent along this axis is `client_extent`.
    pub fn attach(&mut self, client_extent: f64) {
        let client_extent = Some(client_extent.max(0.0));
        if client_extent != self.client_extent {
            self.client_extent = client_extent;
            self.dirty = true;
        }
    }

    /// Detaches the scroll element. Nothing is realized while detached.
    pub fn detach(&mut self) {
        if self.client_extent.take().is_some() {
            self.dirty = true;
        }
    }

    /// Sets the scroll offset of the attached scroll element.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        let offset = offset.max(0.0);
        if offset != self.scroll_offset {
            self.scroll_offset = offset;
            self.dirty = true;
        }
    }

    /// Adjusts the scroll offset by `delta`.
    pub fn scroll_by(&mut self, delta: f64) {
        self.set_scroll_offset(self.scroll_offset + delta);
    }

    /// Records the measured extent of track `index`.
    pub fn resize_item(&mut self, index: usize, size: f64) {
        debug_assert!(size.is_finite(), "track sizes must be finite; got {size:?}");
        let size = size.max(0.0);
        let previous = self.measured.insert(Self::key_of(index), size);
        if previous != Some(size) {
            self.stale = true;
            self.dirty = true;
        }
    }

    /// Leading edge of track `index`, including the scroll margin and leading padding.
    pub fn start_of(&mut self, index: usize) -> f64 {
        self.refresh_measurements();
        self.leading() + self.measurements.start_of(index)
    }

    /// Distance from the start of the scroll content to the first track.
    fn leading(&self) -> f64 {
        self.options.scroll_margin + self.options.padding_start
    }

    const fn key_of(index: usize) -> u64 {
        index as u64
    }

    fn refresh_measurements(&mut self) {
        if !self.stale {
            return;
        }
        let estimate = self.options.estimate;
        let measured = &self.measured;
        self.measurements.rebuild(self.options.count, |i| {
            measured.get(&Self::key_of(i)).copied().unwrap_or(estimate)
        });
        self.stale = false;
        self.dirty = true;
    }
}

impl Window for TrackWindow {
    fn options(&self) -> &WindowOptions {
        &self.options
    }

    fn set_options(&mut self, options: WindowOptions) {
        if options == self.options {
            return;
        }
        if options.count != self.options.count || options.estimate != self.options.estimate {
            self.stale = true;
        }
        self.options = options;
        self.dirty = true;
    }

    fn virtual_items(&mut self) -> &[VirtualItem] {
        self.refresh_measurements();
        if self.dirty {
            let leading = self.leading();
            let range = self.measurements.visible_range(
                self.scroll_offset - leading,
                self.client_extent.unwrap_or(0.0),
                self.options.overscan,
            );
            self.items.clear();
            for index in range {
                let start = leading + self.measurements.start_of(index);
                let size = self.measurements.extent_of(index);
                self.items.push(VirtualItem {
                    index,
                    start,
                    size,
                    end: start + size,
                    key: Self::key_of(index),
                });
            }
            self.dirty = false;
        }
        &self.items
    }

    fn total_size(&mut self) -> f64 {
        self.refresh_measurements();
        self.options.padding_start + self.measurements.total() + self.options.padding_end
    }

    fn measure(&mut self) {
        self.measured.clear();
        self.stale = true;
        self.dirty = true;
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn client_extent(&self) -> Option<f64> {
        self.client_extent
    }
}
