// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end paging sessions driven the way a host event loop would.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kurbo::{Insets, Rect, Size, Vec2};
use understory_virtual_grid::{
    Axis, ContainerId, GridCore, GridModel, ItemSize, StructureObserver, VirtualItem, Window,
    WindowOptions,
};

const SLOT: Size = Size::new(50.0, 50.0);

/// Page of `rows` loaded rows out of `total`, four columns wide.
fn page(rows: usize, total: usize, loads: &Rc<Cell<u32>>) -> GridModel {
    let loads = Rc::clone(loads);
    GridModel::new(rows * 4, rows, 4, SLOT)
        .with_totals(Some(total), None)
        .with_on_load_more(move || loads.set(loads.get() + 1))
}

#[test]
fn scrolling_to_the_end_loads_the_next_page() {
    let loads = Rc::new(Cell::new(0));
    let mut grid = GridCore::default();
    grid.rows_mut().attach(100.0);
    grid.columns_mut().attach(200.0);
    assert_eq!(grid.update(page(6, 12, &loads)), Ok(()));

    let layout = grid.layout();
    assert_eq!(layout.size, Size::new(200.0, 300.0));
    // Loaded rows end at 300; the sentinel reaches one viewport above that.
    let sentinel = layout.sentinel_rect().expect("a callback is set");
    assert_eq!(sentinel, Rect::new(0.0, 200.0, 200.0, 300.0));

    // Host scrolls until the sentinel intersects the viewport.
    grid.rows_mut().set_scroll_offset(120.0);
    let layout = grid.layout();
    let viewport = Rect::new(0.0, 120.0, 200.0, 220.0);
    let visible = layout
        .sentinel_rect()
        .is_some_and(|rect| !rect.intersect(viewport).is_zero_area());
    assert!(visible, "sentinel should be in view at offset 120");
    assert!(grid.set_sentinel_in_view(visible));
    assert_eq!(loads.get(), 1);

    // The next page arrives; the sentinel moves down and leaves the view.
    assert_eq!(grid.update(page(12, 12, &loads)), Ok(()));
    // The sentinel was still in view when the page landed.
    assert_eq!(loads.get(), 2);
    let layout = grid.layout();
    assert_eq!(layout.size.height, 600.0);
    // Everything is loaded and no explicit size is set: nothing to stretch.
    assert_eq!(layout.sentinel.and_then(|s| s.extent), None);
    assert!(!grid.set_sentinel_in_view(false));
    assert_eq!(loads.get(), 2);
}

#[test]
fn padded_grid_still_reaches_its_sentinel() {
    let loads = Rc::new(Cell::new(0));
    let model = GridModel::new(100, 10, 10, SLOT)
        .with_totals(Some(20), None)
        .with_load_more_size(Some(50.0))
        .with_padding(Insets::new(10.0, 60.0, 10.0, 0.0))
        .with_on_load_more({
            let loads = Rc::clone(&loads);
            move || loads.set(loads.get() + 1)
        });
    let mut grid = GridCore::default();
    grid.rows_mut().attach(200.0);
    grid.columns_mut().attach(200.0);
    assert_eq!(grid.update(model), Ok(()));

    // Scroll to the very bottom of the padded content.
    grid.rows_mut().set_scroll_offset(360.0);
    let layout = grid.layout();
    assert_eq!(layout.size, Size::new(520.0, 560.0));
    assert_eq!(layout.cells[0].index, 60);
    assert_eq!(layout.cells[0].rect, Rect::new(10.0, 360.0, 60.0, 410.0));

    let viewport = Rect::new(0.0, 360.0, 520.0, 560.0);
    let visible = layout
        .sentinel_rect()
        .is_some_and(|rect| !rect.intersect(viewport).is_zero_area());
    assert!(visible, "sentinel should be in view at the bottom");
    assert!(grid.set_sentinel_in_view(visible));
    assert_eq!(loads.get(), 1);
}

#[test]
fn horizontal_grids_grow_along_columns() {
    let loads = Rc::new(Cell::new(0));
    let model = GridModel::new(12, 3, 4, SLOT)
        .with_horizontal(true)
        .with_totals(None, Some(8))
        .with_load_more_size(Some(25.0))
        .with_on_load_more({
            let loads = Rc::clone(&loads);
            move || loads.set(loads.get() + 1)
        });
    let mut grid = GridCore::default();
    grid.rows_mut().attach(150.0);
    grid.columns_mut().attach(100.0);
    assert_eq!(grid.update(model), Ok(()));

    let layout = grid.layout();
    let sentinel = layout.sentinel.expect("a callback is set");
    assert_eq!(sentinel.axis, Axis::Horizontal);
    // Loaded columns end at 200, lookahead 25, clipped to the content width.
    assert_eq!(sentinel.extent, Some(25.0));

    // Column-major order: the first column holds items 0, 1, 2.
    let first_column: Vec<_> = layout
        .cells
        .iter()
        .filter(|c| c.column == 0)
        .map(|c| c.index)
        .collect();
    assert_eq!(first_column, [0, 1, 2]);
}

#[test]
fn content_rects_apply_gaps_and_item_size() {
    let model = GridModel::new(4, 2, 2, Size::new(60.0, 60.0))
        .with_gap(Vec2::new(10.0, 10.0))
        .with_item_size(ItemSize {
            width: Some(40.0),
            height: Some(40.0),
        });
    let gap = model.gap;
    let item_size = model.item_size;
    let mut grid = GridCore::default();
    grid.rows_mut().attach(120.0);
    grid.columns_mut().attach(120.0);
    assert_eq!(grid.update(model), Ok(()));

    // Items are centered horizontally and sit at the top of the slot,
    // below the leading gap.
    let layout = grid.layout();
    let rects: Vec<_> = layout
        .cells
        .iter()
        .map(|c| c.content_rect(item_size, gap))
        .collect();
    assert_eq!(
        rects,
        [
            Rect::new(10.0, 0.0, 50.0, 40.0),
            Rect::new(75.0, 0.0, 115.0, 40.0),
            Rect::new(10.0, 70.0, 50.0, 110.0),
            Rect::new(75.0, 70.0, 115.0, 110.0),
        ]
    );
}

#[derive(Debug)]
struct Recorder(Rc<RefCell<Vec<Option<u64>>>>);

impl StructureObserver for Recorder {
    fn observe(&mut self, container: ContainerId) {
        self.0.borrow_mut().push(Some(container.0));
    }

    fn disconnect(&mut self) {
        self.0.borrow_mut().push(None);
    }
}

#[test]
fn observation_follows_the_scroll_container() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut grid = GridCore::default().with_structure_observer(Recorder(Rc::clone(&calls)));
    let model = GridModel::new(4, 2, 2, SLOT);

    assert_eq!(
        grid.update(model.clone().with_scroll_container(Some(ContainerId(1)))),
        Ok(())
    );
    assert_eq!(
        grid.update(model.clone().with_scroll_container(Some(ContainerId(1)))),
        Ok(())
    );
    assert_eq!(
        grid.update(model.with_scroll_container(Some(ContainerId(2)))),
        Ok(())
    );
    assert_eq!(grid.tracker().watched(), Some(ContainerId(2)));
    drop(grid);
    assert_eq!(*calls.borrow(), [Some(1), None, Some(2), None]);
}

/// A window that always shows every track, sized by its options.
#[derive(Debug, Default)]
struct EagerWindow {
    options: WindowOptions,
    items: Vec<VirtualItem>,
}

impl Window for EagerWindow {
    fn options(&self) -> &WindowOptions {
        &self.options
    }

    fn set_options(&mut self, options: WindowOptions) {
        self.options = options;
    }

    fn virtual_items(&mut self) -> &[VirtualItem] {
        let WindowOptions {
            count,
            estimate,
            scroll_margin,
            padding_start,
            ..
        } = self.options;
        self.items = (0..count)
            .map(|index| {
                let start = scroll_margin + padding_start + index as f64 * estimate;
                VirtualItem {
                    index,
                    start,
                    size: estimate,
                    end: start + estimate,
                    key: index as u64,
                }
            })
            .collect();
        &self.items
    }

    fn total_size(&mut self) -> f64 {
        let WindowOptions {
            count,
            estimate,
            padding_start,
            padding_end,
            ..
        } = self.options;
        padding_start + count as f64 * estimate + padding_end
    }

    fn measure(&mut self) {}

    fn scroll_offset(&self) -> f64 {
        0.0
    }

    fn client_extent(&self) -> Option<f64> {
        None
    }
}

#[test]
fn custom_windows_drive_the_grid() {
    let mut grid = GridCore::new(EagerWindow::default(), EagerWindow::default());
    assert_eq!(grid.update(GridModel::new(5, 2, 3, SLOT)), Ok(()));
    grid.on_layout(&|| Some(30.0));

    let layout = grid.layout();
    assert_eq!(layout.size, Size::new(150.0, 100.0));
    let indices: Vec<_> = layout.cells.iter().map(|c| c.index).collect();
    assert_eq!(indices, [0, 1, 2, 3, 4]);
    // The row margin is removed again when positioning cells.
    assert_eq!(layout.cells[3].rect, Rect::new(0.0, 50.0, 50.0, 100.0));
}
