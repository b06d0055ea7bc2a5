// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifications emitted by the pager.

/// Receives pager notifications. Every method defaults to a no-op.
///
/// Notifications are only emitted for surface activity the pager did not
/// cause itself; offset writes made while the pager is repositioning the
/// surface are silent.
pub trait PagerDelegate {
    /// The pager processed a user-driven offset change.
    fn did_scroll(&mut self, _scroll_offset: f64) {}

    /// The current page changed to `index`.
    fn current_index_did_change(&mut self, _index: usize) {}

    /// The user started dragging.
    fn will_begin_dragging(&mut self) {}

    /// The user lifted their finger.
    fn did_end_dragging(&mut self, _will_decelerate: bool) {}

    /// Momentum scrolling started.
    fn will_begin_decelerating(&mut self) {}

    /// Momentum scrolling stopped.
    fn did_end_decelerating(&mut self) {}

    /// An animated scroll finished.
    fn did_end_scrolling_animation(&mut self) {}
}

impl PagerDelegate for () {}
