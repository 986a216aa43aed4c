// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The grid controller tying the model, both windows, and the tracker together.

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::{Rect, Size};
use tracing::{debug, warn};

use crate::{
    Axis, Cell, CellGaps, GridLayout, GridModel, GridModelError, IndexMapper, LoadMoreSignal,
    OffsetProbe, OffsetTracker, Sentinel, StructureObserver, TrackWindow, ViewportSampler, Window,
    trigger_extent,
};

/// A virtualized 2D grid over two one-dimensional windows.
///
/// The host owns the event loop and forwards four kinds of input:
/// - model changes through [`update`](Self::update),
/// - scroll and viewport changes through [`rows_mut`](Self::rows_mut) and
///   [`columns_mut`](Self::columns_mut),
/// - layout and structural changes of the scroll container through
///   [`on_layout`](Self::on_layout) and
///   [`on_structure_mutation`](Self::on_structure_mutation),
/// - sentinel visibility through [`set_sentinel_in_view`](Self::set_sentinel_in_view).
///
/// [`layout`](Self::layout) then produces the container size, the load-more
/// sentinel, and the cells to render.
#[derive(Debug)]
pub struct GridCore<W: Window = TrackWindow> {
    rows: W,
    columns: W,
    model: GridModel,
    generation: u64,
    sampler: ViewportSampler,
    tracker: OffsetTracker,
    load_more: LoadMoreSignal,
}

impl Default for GridCore<TrackWindow> {
    fn default() -> Self {
        Self::new(TrackWindow::default(), TrackWindow::default())
    }
}

impl<W: Window> GridCore<W> {
    /// Creates a grid over the given row and column windows.
    ///
    /// The grid starts with an empty [`GridModel`] and no structure observer.
    pub fn new(rows: W, columns: W) -> Self {
        Self {
            rows,
            columns,
            model: GridModel::default(),
            generation: 0,
            sampler: ViewportSampler::new(),
            tracker: OffsetTracker::default(),
            load_more: LoadMoreSignal::default(),
        }
    }

    /// Sets the observer used to watch the model's scroll container.
    #[must_use]
    pub fn with_structure_observer(mut self, observer: impl StructureObserver + 'static) -> Self {
        self.tracker = OffsetTracker::new(Some(Box::new(observer)));
        self.tracker.watch(self.model.scroll_container);
        self
    }

    /// The installed model.
    pub fn model(&self) -> &GridModel {
        &self.model
    }

    /// The row window.
    pub fn rows(&self) -> &W {
        &self.rows
    }

    /// Mutable access to the row window, for scroll and viewport updates.
    pub fn rows_mut(&mut self) -> &mut W {
        &mut self.rows
    }

    /// The column window.
    pub fn columns(&self) -> &W {
        &self.columns
    }

    /// Mutable access to the column window, for scroll and viewport updates.
    pub fn columns_mut(&mut self) -> &mut W {
        &mut self.columns
    }

    /// The scroll-offset tracker.
    pub fn tracker(&self) -> &OffsetTracker {
        &self.tracker
    }

    /// Validates and installs `model`.
    ///
    /// The observed scroll container follows `model.scroll_container`. If
    /// the sentinel is in view when the model is installed, the load-more
    /// callback fires.
    ///
    /// # Errors
    ///
    /// Returns the validation error and keeps the previous model if `model`
    /// holds a non-finite or negative length.
    pub fn update(&mut self, model: GridModel) -> Result<(), GridModelError> {
        if let Err(err) = model.validate() {
            warn!(error = %err, "rejected grid model");
            return Err(err);
        }
        self.tracker.watch(model.scroll_container);
        self.model = model;
        self.generation = self.generation.wrapping_add(1);
        if self.model.on_load_more.is_none() {
            // No callback means no sentinel, so nothing can be in view.
            self.load_more = LoadMoreSignal::default();
        } else if self.load_more.on_model(self.generation) {
            self.fire_load_more();
        }
        Ok(())
    }

    /// Measures the grid's offset on its first layout and starts tracking.
    pub fn on_layout(&mut self, probe: &dyn OffsetProbe) {
        self.tracker.on_layout(probe);
        self.rows.set_scroll_margin(self.tracker.offset());
    }

    /// Re-measures the grid's offset after a child-list change of the scroll container.
    ///
    /// Ignored before [`on_layout`](Self::on_layout).
    pub fn on_structure_mutation(&mut self, probe: &dyn OffsetProbe) {
        if self.tracker.on_mutation(probe) {
            self.rows.set_scroll_margin(self.tracker.offset());
        }
    }

    /// Reports the sentinel's visibility.
    ///
    /// Ignored while the model has no load-more callback, since no sentinel
    /// is laid out then. Returns `true` if the callback was invoked.
    pub fn set_sentinel_in_view(&mut self, in_view: bool) -> bool {
        if self.model.on_load_more.is_none() {
            return false;
        }
        self.load_more.set_in_view(in_view, self.generation) && self.fire_load_more()
    }

    fn fire_load_more(&self) -> bool {
        let Some(load_more) = &self.model.on_load_more else {
            return false;
        };
        debug!(generation = self.generation, "loading more");
        load_more.call();
        true
    }

    /// Computes the geometry of one layout pass.
    ///
    /// Windows whose slot size changed since the previous pass are
    /// re-measured before anything is read from them. Nothing but the size is
    /// produced when the padding leaves no usable area.
    pub fn layout(&mut self) -> GridLayout {
        let row_margin = self.tracker.offset();
        self.sampler.sync(&self.model, &mut self.rows, &mut self.columns, row_margin);
        let sample = self.sampler.sample(&mut self.rows, &mut self.columns);

        let padding = self.model.padding;
        let internal = Size::new(
            sample.size.width - padding.x_value(),
            sample.size.height - padding.y_value(),
        );
        if internal.width <= 0.0 || internal.height <= 0.0 {
            return GridLayout {
                size: sample.size,
                sentinel: None,
                cells: Vec::new(),
            };
        }

        let sentinel = self.model.on_load_more.is_some().then(|| {
            let axis = self.model.growth_axis();
            let extent = match axis {
                Axis::Vertical => {
                    trigger_extent(axis, &self.model, &self.rows, sample.size.height)
                }
                Axis::Horizontal => {
                    trigger_extent(axis, &self.model, &self.columns, sample.size.width)
                }
            };
            Sentinel { axis, extent }
        });

        let mapper = IndexMapper::from_model(&self.model);
        let mut cells = Vec::with_capacity(sample.rows.len().saturating_mul(sample.columns.len()));
        for row in &sample.rows {
            for column in &sample.columns {
                let Some(index) = mapper.to_linear(row.index, column.index) else {
                    continue;
                };
                let mut gaps = CellGaps::empty();
                if column.index != 0 {
                    gaps |= CellGaps::LEADING_X;
                }
                if row.index != 0 {
                    gaps |= CellGaps::LEADING_Y;
                }
                cells.push(Cell {
                    index,
                    row: row.index,
                    column: column.index,
                    rect: Rect::from_origin_size(
                        (column.start, row.start - sample.row_margin),
                        (column.size, row.size),
                    ),
                    gaps,
                });
            }
        }

        GridLayout {
            size: sample.size,
            sentinel,
            cells,
        }
    }
}
