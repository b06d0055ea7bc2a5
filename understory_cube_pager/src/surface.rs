// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The paging scroll surface that drives the pager.
//!
//! Gesture recognition, deceleration, and offset animation belong to the
//! host's scroll primitive. The pager only reads and writes its content
//! offset and reacts to the [`SurfaceEvent`]s the host forwards to
//! [`CubePager::handle_event`](crate::CubePager::handle_event).
//!
//! ## Echoed events
//!
//! Native scroll views usually report a non-animated offset write back to
//! their delegate before the write returns. Implementations model that by
//! pushing the resulting events into the `echo` buffer passed to
//! [`ScrollSurface::set_content_offset`] and [`ScrollSurface::set_content_size`].
//! The pager processes echoed events immediately, under the same suppression
//! state as the write that caused them.

use kurbo::{Point, Size};
use smallvec::SmallVec;

bitflags::bitflags! {
    /// Behavior bits pushed to a scroll surface when it is installed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SurfaceOptions: u8 {
        /// Settle on whole-page boundaries.
        const PAGING               = 0b0000_0001;
        /// Lock a drag to its dominant axis.
        const DIRECTIONAL_LOCK     = 0b0000_0010;
        /// Show the horizontal scroll indicator.
        const HORIZONTAL_INDICATOR = 0b0000_0100;
    }
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self::PAGING | Self::DIRECTIONAL_LOCK
    }
}

/// An event reported by the scroll surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceEvent {
    /// The content offset changed (in surface pixels).
    Scrolled {
        /// New content offset.
        offset: Point,
    },
    /// The user started dragging.
    WillBeginDragging,
    /// The user lifted their finger.
    DidEndDragging {
        /// Whether the surface keeps moving under momentum.
        will_decelerate: bool,
    },
    /// Momentum scrolling started.
    WillBeginDecelerating,
    /// Momentum scrolling stopped.
    DidEndDecelerating,
    /// An animated offset change requested by the pager finished.
    DidEndScrollingAnimation,
}

/// Buffer for events a surface reports synchronously during a write.
pub type SurfaceEvents = SmallVec<[SurfaceEvent; 2]>;

/// Visual transition the pager may ask the surface to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Cross-fade from the old contents to the new ones.
    CrossFade,
}

/// A horizontally paging scrollable region.
pub trait ScrollSurface {
    /// Applies behavior options. Called once when the surface is installed.
    fn configure(&mut self, options: SurfaceOptions);

    /// Returns the current content offset.
    fn content_offset(&self) -> Point;

    /// Moves the content offset, optionally animating there.
    fn set_content_offset(&mut self, offset: Point, animated: bool, echo: &mut SurfaceEvents);

    /// Sets the scrollable content size.
    fn set_content_size(&mut self, size: Size, echo: &mut SurfaceEvents);

    /// Whether the surface bounces past its edges.
    fn bounces(&self) -> bool;

    /// Runs a transition over the surface's next visual change.
    fn begin_transition(&mut self, _transition: Transition) {}
}
