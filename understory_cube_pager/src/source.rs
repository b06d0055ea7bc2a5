// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page content and page view traits implemented by the host.

use kurbo::{Point, Size};

use crate::Transform3d;

/// Supplies pages to a [`CubePager`](crate::CubePager).
///
/// The pager only ever asks for indices in `0..page_count()`; wrap-buffer
/// slots are normalized before the call.
pub trait PageSource {
    /// View type produced for each page.
    type Page: PageView;

    /// Number of pages. Queried on [`reload_data`](crate::CubePager::reload_data).
    fn page_count(&self) -> usize;

    /// Creates the view for page `index`.
    ///
    /// The pager owns the returned view until the page leaves the resident
    /// window, at which point it is detached and dropped. The same index may
    /// be requested again later.
    fn page(&mut self, index: usize) -> Self::Page;
}

/// A page view as seen by the pager.
///
/// This folds together the host's view handle and its parent/child
/// relationship: [`attach`](Self::attach) and [`detach`](Self::detach) insert
/// and remove the view from the pager's surface. All geometry is expressed in
/// the surface's content coordinates.
pub trait PageView {
    /// Called right before the view is attached.
    fn will_appear(&mut self) {}

    /// Inserts the view into the pager's surface.
    fn attach(&mut self);

    /// Removes the view from the pager's surface.
    fn detach(&mut self);

    /// Called right after the view is detached.
    fn did_disappear(&mut self) {}

    /// Sets the view's bounds size and center.
    fn set_frame(&mut self, bounds: Size, center: Point);

    /// Sets the 3D transform applied around the view's center.
    fn set_transform(&mut self, transform: Transform3d);

    /// Enables or disables user input on the view.
    fn set_interactive(&mut self, interactive: bool);

    /// Controls whether the back face of the view is rendered.
    ///
    /// The pager turns this off on every page it attaches so faces turned
    /// away from the viewer vanish.
    fn set_double_sided(&mut self, _double_sided: bool) {}

    /// Returns the view's own horizontal scroll position, if it scrolls.
    ///
    /// Views that scroll internally may lose their position when their frame
    /// changes; the pager saves it before and restores it after every layout.
    fn inner_scroll_offset(&self) -> Option<Point> {
        None
    }

    /// Restores the view's own scroll position.
    fn set_inner_scroll_offset(&mut self, _offset: Point) {}
}
