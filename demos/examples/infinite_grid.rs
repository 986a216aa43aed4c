// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Infinite scrolling over a paginated grid with `understory_virtual_grid`.
//!
//! This example simulates a host event loop:
//! - a header above the grid shares its scroll container,
//! - the user scrolls down in fixed steps,
//! - the sentinel's visibility is tested against the viewport each frame,
//! - each load-more request appends one page of rows.
//!
//! Run:
//! - `RUST_LOG=understory_virtual_grid=debug cargo run -p understory_virtual_grid_demos --example infinite_grid`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Rect, Size, Vec2};
use understory_virtual_grid::{ContainerId, GridCore, GridModel, StructureObserver};

const COLUMNS: usize = 5;
const PAGE_ROWS: usize = 8;
const TOTAL_ROWS: usize = 40;
const SLOT: Size = Size::new(64.0, 48.0);
const VIEWPORT: Size = Size::new(320.0, 240.0);
const HEADER: f64 = 96.0;

/// Logs what a DOM-like host would be asked to observe.
struct LoggingObserver;

impl StructureObserver for LoggingObserver {
    fn observe(&mut self, container: ContainerId) {
        println!("observing container {}", container.0);
    }

    fn disconnect(&mut self) {
        println!("disconnected");
    }
}

fn model(rows: usize, requests: &Rc<Cell<u32>>) -> GridModel {
    let requests = Rc::clone(requests);
    GridModel::new(rows * COLUMNS, rows, COLUMNS, SLOT)
        .with_totals(Some(TOTAL_ROWS), None)
        .with_gap(Vec2::new(4.0, 4.0))
        .with_scroll_container(Some(ContainerId(1)))
        .with_on_load_more(move || requests.set(requests.get() + 1))
}

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("off,understory_virtual_grid=debug"))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let requests = Rc::new(Cell::new(0));
    let mut loaded_rows = PAGE_ROWS;

    let mut grid = GridCore::default().with_structure_observer(LoggingObserver);
    grid.rows_mut().attach(VIEWPORT.height);
    grid.columns_mut().attach(VIEWPORT.width);
    if let Err(err) = grid.update(model(loaded_rows, &requests)) {
        eprintln!("invalid model: {err}");
        return;
    }
    // The header sits above the grid in the same scroll container.
    grid.on_layout(&|| Some(HEADER));

    let mut scroll = 0.0;
    for frame in 0..40 {
        let layout = grid.layout();
        let viewport = Rect::from_origin_size((0.0, scroll), VIEWPORT);
        // Layout coordinates are grid-local; the viewport lives in scroll space.
        let in_view = layout.sentinel_rect().is_some_and(|rect| {
            let rect = rect + Vec2::new(0.0, HEADER);
            !rect.intersect(viewport).is_zero_area()
        });
        grid.set_sentinel_in_view(in_view);

        let first = layout.cells.first().map(|cell| cell.index);
        let last = layout.cells.last().map(|cell| cell.index);
        println!(
            "frame {frame:2}: scroll {scroll:6.1} size {:>5}x{:<5} cells {:?}..={:?} sentinel {}",
            layout.size.width,
            layout.size.height,
            first,
            last,
            if in_view { "visible" } else { "hidden" },
        );

        // Serve pending requests one page at a time.
        if requests.get() > 0 && loaded_rows < TOTAL_ROWS {
            requests.set(requests.get() - 1);
            loaded_rows = (loaded_rows + PAGE_ROWS).min(TOTAL_ROWS);
            println!("loaded page: {loaded_rows} of {TOTAL_ROWS} rows");
            if let Err(err) = grid.update(model(loaded_rows, &requests)) {
                eprintln!("invalid model: {err}");
                return;
            }
        }

        scroll += 60.0;
        grid.rows_mut().set_scroll_offset(scroll);
    }
}
