// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_virtual_grid --heading-base-level=0

//! Understory Virtual Grid: 2D virtualization with paginated loading.
//!
//! This crate virtualizes a grid of items indexed `0..count` over two
//! independent one-dimensional windows, one for rows and one for columns,
//! and sizes an invisible *load-more sentinel* so that the host can fetch
//! the next page before the user reaches the end of the loaded data.
//!
//! The core concepts are:
//!
//! - [`GridModel`]: the caller-owned configuration, replaced wholesale on every
//!   data or configuration change.
//! - [`IndexMapper`]: maps `(row, column)` to a linear item index and back, in
//!   row-major or column-major order, optionally inverted.
//! - [`Window`]: a scrollable 1D window that realizes only the tracks near its
//!   viewport. [`TrackWindow`] is the bundled implementation.
//! - [`ViewportSampler`]: drives both windows from a model and re-measures an
//!   axis exactly when its nominal slot size changes.
//! - [`trigger_extent`] and [`LoadMoreSignal`]: size the sentinel and decide
//!   when the load-more callback fires.
//! - [`OffsetTracker`]: keeps the row window's scroll margin equal to the grid's
//!   offset inside its scroll container.
//! - [`GridCore`]: ties everything together and produces a [`GridLayout`].
//!
//! This crate does **not** know about widgets, display trees, or any
//! particular UI framework. Host frameworks are responsible for:
//!
//! - Forwarding scroll offsets and viewport extents into the windows.
//! - Reporting sentinel visibility and structural changes of the scroll container.
//! - Creating views for the returned [`Cell`]s and placing them at [`Cell::rect`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_virtual_grid::{GridCore, GridModel};
//!
//! // 100 items in a 10 × 10 grid of 50 × 50 slots.
//! let model = GridModel::new(100, 10, 10, Size::new(50.0, 50.0));
//!
//! let mut grid = GridCore::default();
//! grid.rows_mut().attach(200.0);
//! grid.columns_mut().attach(200.0);
//! grid.update(model).expect("model is valid");
//!
//! let layout = grid.layout();
//! assert_eq!(layout.size, Size::new(500.0, 500.0));
//! // Four visible rows by four visible columns.
//! assert_eq!(layout.cells.len(), 16);
//! assert!(layout.sentinel.is_none());
//! ```
//!
//! ## Loading more
//!
//! When `total_row_count` exceeds `row_count` and a callback is set, the
//! layout carries a sentinel stretched a lookahead distance past the loaded
//! rows. The host reports its visibility back:
//!
//! ```rust
//! use core::cell::Cell;
//! use std::rc::Rc;
//!
//! use kurbo::Size;
//! use understory_virtual_grid::{GridCore, GridModel};
//!
//! let pages = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&pages);
//! let model = GridModel::new(100, 10, 10, Size::new(50.0, 50.0))
//!     .with_totals(Some(20), None)
//!     .with_on_load_more(move || counter.set(counter.get() + 1));
//!
//! let mut grid = GridCore::default();
//! grid.rows_mut().attach(200.0);
//! grid.columns_mut().attach(200.0);
//! grid.update(model).expect("model is valid");
//!
//! // The sentinel ends 200 px (the viewport height) past the loaded rows,
//! // clipped to the content height.
//! let sentinel = grid.layout().sentinel.expect("callback is set");
//! assert_eq!(sentinel.extent, Some(200.0));
//!
//! assert!(grid.set_sentinel_in_view(true));
//! assert_eq!(pages.get(), 1);
//! ```
//!
//! All lengths are `f64` logical pixels and are expected to be finite and
//! non-negative; [`GridCore::update`] rejects models that are not.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod axis;
mod error;
mod grid;
mod index_map;
mod layout;
mod model;
mod sampler;
mod tracker;
mod trigger;
mod window;

pub use axis::Axis;
pub use error::GridModelError;
pub use grid::GridCore;
pub use index_map::IndexMapper;
pub use layout::{Cell, CellGaps, GridLayout, Sentinel};
pub use model::{
    GridModel, ItemRects, ItemSize, LoadMore, SharedItemRects, UniformItemRects,
    VirtualizerConfig,
};
pub use sampler::{Sample, ViewportSampler};
pub use tracker::{ContainerId, OffsetProbe, OffsetTracker, StructureObserver, TrackerState};
pub use trigger::{LoadMoreSignal, trigger_extent};
pub use window::{TrackWindow, VirtualItem, Window, WindowOptions};
