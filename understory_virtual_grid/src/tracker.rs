// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keeps the row window's scroll margin in step with the grid's offset.
//!
//! Content above the grid inside the same scroll container (headers, other
//! grids) can change after the first layout. The tracker measures the grid's
//! offset once on first layout, then again on every structural change of the
//! container's child list. Continuous resizes are not tracked.
//!
//! The observation is a scoped resource: it is acquired when a container is
//! watched, released when the container identity changes, and released when
//! the tracker is dropped.

use alloc::boxed::Box;
use core::fmt;

use tracing::{debug, trace};

/// Identity of a scroll container.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContainerId(pub u64);

/// Host capability that reports structural changes of a container.
///
/// After [`observe`](Self::observe) the host is expected to forward every
/// child-list mutation of that container to
/// [`GridCore::on_structure_mutation`](crate::GridCore::on_structure_mutation).
pub trait StructureObserver {
    /// Starts reporting child-list mutations of `container`.
    fn observe(&mut self, container: ContainerId);

    /// Stops reporting mutations of any container.
    fn disconnect(&mut self);
}

/// Host capability that measures the grid's offset from the top of its
/// nearest positioned ancestor.
///
/// `None` means the grid is not laid out; the offset is then taken as zero.
pub trait OffsetProbe {
    /// Current offset of the grid, if it is laid out.
    fn offset_top(&self) -> Option<f64>;
}

impl<F> OffsetProbe for F
where
    F: Fn() -> Option<f64>,
{
    fn offset_top(&self) -> Option<f64> {
        self()
    }
}

/// Lifecycle of an [`OffsetTracker`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrackerState {
    /// No layout has been measured yet.
    Uninitialized,
    /// The first layout has been measured; mutations are applied.
    Tracking,
}

/// Tracks the grid's offset within its scroll container.
pub struct OffsetTracker {
    state: TrackerState,
    offset: f64,
    observer: Option<Box<dyn StructureObserver>>,
    watched: Option<ContainerId>,
}

impl fmt::Debug for OffsetTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OffsetTracker")
            .field("state", &self.state)
            .field("offset", &self.offset)
            .field("has_observer", &self.observer.is_some())
            .field("watched", &self.watched)
            .finish()
    }
}

impl Default for OffsetTracker {
    fn default() -> Self {
        Self::new(None)
    }
}

impl OffsetTracker {
    /// Creates a tracker. Without an observer, only the first layout is measured.
    #[must_use]
    pub fn new(observer: Option<Box<dyn StructureObserver>>) -> Self {
        Self {
            state: TrackerState::Uninitialized,
            offset: 0.0,
            observer,
            watched: None,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> TrackerState {
        self.state
    }

    /// Last measured offset.
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Container currently observed.
    #[must_use]
    pub const fn watched(&self) -> Option<ContainerId> {
        self.watched
    }

    /// Measures the first layout and starts tracking.
    ///
    /// Returns `true` if the offset changed.
    pub fn on_layout(&mut self, probe: &dyn OffsetProbe) -> bool {
        self.state = TrackerState::Tracking;
        self.remeasure(probe)
    }

    /// Re-measures after a child-list mutation of the watched container.
    ///
    /// Mutations before the first layout are ignored. Returns `true` if the
    /// offset changed.
    pub fn on_mutation(&mut self, probe: &dyn OffsetProbe) -> bool {
        match self.state {
            TrackerState::Uninitialized => false,
            TrackerState::Tracking => self.remeasure(probe),
        }
    }

    /// Observes `container`, releasing any previous observation first.
    ///
    /// Watching the container that is already observed is a no-op.
    pub fn watch(&mut self, container: Option<ContainerId>) {
        if container == self.watched {
            return;
        }
        self.release();
        let (Some(container), Some(observer)) = (container, self.observer.as_mut()) else {
            return;
        };
        observer.observe(container);
        self.watched = Some(container);
        debug!(container = container.0, "observing scroll container");
    }

    /// Releases the current observation, if any.
    pub fn release(&mut self) {
        let Some(container) = self.watched.take() else {
            return;
        };
        if let Some(observer) = self.observer.as_mut() {
            observer.disconnect();
        }
        debug!(container = container.0, "released scroll container");
    }

    fn remeasure(&mut self, probe: &dyn OffsetProbe) -> bool {
        let offset = probe.offset_top().unwrap_or(0.0);
        if offset == self.offset {
            return false;
        }
        trace!(from = self.offset, to = offset, "grid offset changed");
        self.offset = offset;
        true
    }
}

impl Drop for OffsetTracker {
    fn drop(&mut self) {
        self.release();
    }
}
