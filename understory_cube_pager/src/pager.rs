// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The cube pager controller.

use alloc::vec::Vec;
use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Size};

use crate::cache::{PageCache, PageHandle};
use crate::layout::{DEFAULT_PERSPECTIVE, face_center, face_transform, place_face};
use crate::offset::{OffsetTracker, resolve_index};
use crate::surface::{SurfaceEvents, Transition};
use crate::window::visible_window;
use crate::{PageSource, PagerDelegate, ScrollSurface, SurfaceEvent, SurfaceOptions};

/// Construction-time configuration of a [`CubePager`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PagerConfig {
    /// Circular paging: the last page is adjacent to the first.
    pub wrap: bool,
    /// Eye distance for the face perspective, in surface pixels.
    pub perspective: f64,
    /// Options applied to the scroll surface when it is installed.
    pub surface_options: SurfaceOptions,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            wrap: false,
            perspective: DEFAULT_PERSPECTIVE,
            surface_options: SurfaceOptions::default(),
        }
    }
}

/// Presents pages from a [`PageSource`] as the faces of a cube turned by a
/// horizontally paging [`ScrollSurface`].
///
/// The pager keeps a continuous scroll offset in page units, derives the
/// current page from it, keeps only the pages around the current one
/// resident, and gives every resident page its face transform.
///
/// All collaborators are optional. Operations that need a missing one do
/// nothing.
///
/// ## Driving the pager
///
/// - Call [`set_viewport`](Self::set_viewport) whenever the pager's area
///   changes size.
/// - Call [`reload_data`](Self::reload_data) whenever the page count changes.
/// - Forward every surface event to [`handle_event`](Self::handle_event).
///
/// Offset writes the pager makes to keep the surface in step with its own
/// state are *suppressed*: events they cause, whether echoed synchronously
/// or delivered while the write is in progress, change nothing and notify
/// nobody.
pub struct CubePager<S: PageSource, F, D = ()> {
    config: PagerConfig,
    source: Option<S>,
    surface: Option<F>,
    delegate: Option<D>,

    viewport: Size,
    page_count: usize,
    offset: OffsetTracker,
    current_index: usize,
    suppressing: bool,

    pages: PageCache<S::Page>,
}

impl<S: PageSource, F, D> fmt::Debug for CubePager<S, F, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CubePager")
            .field("config", &self.config)
            .field("viewport", &self.viewport)
            .field("page_count", &self.page_count)
            .field("offset", &self.offset)
            .field("current_index", &self.current_index)
            .field("suppressing", &self.suppressing)
            .field("resident", &self.pages.slots())
            .finish_non_exhaustive()
    }
}

impl<S, F, D> CubePager<S, F, D>
where
    S: PageSource,
    F: ScrollSurface,
    D: PagerDelegate,
{
    /// Creates a pager with no collaborators, no pages, and an empty viewport.
    #[must_use]
    pub fn new(config: PagerConfig) -> Self {
        Self {
            config,
            source: None,
            surface: None,
            delegate: None,
            viewport: Size::ZERO,
            page_count: 0,
            offset: OffsetTracker::new(),
            current_index: 0,
            suppressing: false,
            pages: PageCache::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Installs the page source, returning the previous one.
    ///
    /// Resident pages are kept until the next [`reload_data`](Self::reload_data).
    pub fn set_source(&mut self, source: S) -> Option<S> {
        self.source.replace(source)
    }

    /// Installs the scroll surface and applies the configured surface options.
    pub fn set_surface(&mut self, mut surface: F) -> Option<F> {
        surface.configure(self.config.surface_options);
        self.surface.replace(surface)
    }

    /// Installs the notification sink.
    pub fn set_delegate(&mut self, delegate: D) -> Option<D> {
        self.delegate.replace(delegate)
    }

    /// Returns the page source, if any.
    #[must_use]
    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    /// Returns the page source mutably, if any.
    pub fn source_mut(&mut self) -> Option<&mut S> {
        self.source.as_mut()
    }

    /// Returns the scroll surface, if any.
    #[must_use]
    pub fn surface(&self) -> Option<&F> {
        self.surface.as_ref()
    }

    /// Returns the scroll surface mutably, if any.
    pub fn surface_mut(&mut self) -> Option<&mut F> {
        self.surface.as_mut()
    }

    /// Returns the notification sink, if any.
    #[must_use]
    pub fn delegate(&self) -> Option<&D> {
        self.delegate.as_ref()
    }

    /// Returns the notification sink mutably, if any.
    pub fn delegate_mut(&mut self) -> Option<&mut D> {
        self.delegate.as_mut()
    }

    /// Returns the viewport size.
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    /// Returns the page count seen at the last [`reload_data`](Self::reload_data).
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.page_count
    }

    /// Returns the continuous scroll offset in page units.
    #[must_use]
    pub const fn scroll_offset(&self) -> f64 {
        self.offset.scroll_offset()
    }

    /// Returns the current page index.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    /// Returns `true` while the pager is writing to the surface itself.
    #[must_use]
    pub const fn is_suppressing(&self) -> bool {
        self.suppressing
    }

    /// Returns the resident slots in ascending order.
    ///
    /// Under wrap, slot `-1` holds the last page and slot `page_count` the
    /// first.
    #[must_use]
    pub fn resident_slots(&self) -> Vec<isize> {
        self.pages.slots()
    }

    /// Returns the resident page in `slot`.
    #[must_use]
    pub fn page(&self, slot: isize) -> Option<&PageHandle<S::Page>> {
        self.pages.get(slot)
    }

    /// Resizes the viewport and lays everything out again.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.layout();
    }

    /// Full layout pass: surface content size and offset, resident pages,
    /// face geometry, and input gating.
    pub fn layout(&mut self) {
        if self.surface.is_none() {
            return;
        }
        // Under wrap the strip carries one buffer slot at each end.
        let pages = if self.wraps() {
            self.page_count + 2
        } else {
            self.page_count
        };
        let size = Size::new(self.viewport.width * pages as f64, self.viewport.height);
        self.with_suppressed(|pager| {
            let mut echo = SurfaceEvents::new();
            if let Some(surface) = pager.surface.as_mut() {
                surface.set_content_size(size, &mut echo);
            }
            pager.dispatch(echo);
        });
        self.sync_surface_offset();
        self.reconcile_pages();
        self.update_layout();
        self.update_interaction();
    }

    /// Drops every resident page and asks the source for the page count again.
    ///
    /// The scroll offset is clamped into the new page range. Does nothing
    /// without a source.
    pub fn reload_data(&mut self) {
        let Some(source) = self.source.as_ref() else {
            return;
        };
        let page_count = source.page_count();
        self.pages.clear();
        self.page_count = page_count;
        tracing::debug!(page_count, "reloading pages");

        self.offset.clamp_to(page_count, self.config.wrap);
        if self.resolve_current_index() {
            let index = self.current_index;
            self.notify(|d| d.current_index_did_change(index));
        }
        self.layout();
    }

    /// Recreates the page in `slot` from the source, in place.
    ///
    /// The new view takes over the transform and position of the one it
    /// replaces. With `animated`, the surface is asked to cross-fade. Does
    /// nothing if `slot` is not resident.
    pub fn reload_page(&mut self, slot: isize, animated: bool) {
        if self.pages.get(slot).is_none() {
            return;
        }
        let interactive = slot == self.current_slot();
        let Some(source) = self.source.as_mut() else {
            return;
        };
        if animated && let Some(surface) = self.surface.as_mut() {
            surface.begin_transition(Transition::CrossFade);
        }
        if self
            .pages
            .replace(slot, self.page_count, self.viewport, interactive, source)
        {
            tracing::debug!(slot, animated, "reloaded page");
        }
    }

    /// Scrolls the surface so page `index` faces the viewer.
    ///
    /// Under wrap, an index one past either end lands on the wrap-buffer slot
    /// next to it so the cube keeps turning in the same direction; larger
    /// indices are reduced modulo the page count. Without wrap the target is
    /// clamped to the page range, allowing a tenth of a page of overshoot
    /// when animating on a bouncing surface.
    pub fn scroll_to(&mut self, index: isize, animated: bool) {
        let Some(surface) = self.surface.as_ref() else {
            return;
        };
        if self.page_count == 0 {
            return;
        }
        let (count, requested) = (self.page_count as f64, index as f64);
        let target = if self.wraps() {
            let slots = self.page_count as isize;
            let index = if index > slots { index % slots } else { index };
            (index.max(-1) + 1) as f64
        } else if animated && surface.bounces() {
            requested.clamp(-0.1, count - 0.9)
        } else {
            requested.clamp(0.0, count - 1.0)
        };
        let offset = Point::new(self.viewport.width * target, 0.0);
        let mut echo = SurfaceEvents::new();
        if let Some(surface) = self.surface.as_mut() {
            surface.set_content_offset(offset, animated, &mut echo);
        }
        self.dispatch(echo);
    }

    /// Scrolls to the page after the current one.
    pub fn scroll_forward(&mut self, animated: bool) {
        self.scroll_to(self.current_slot() + 1, animated);
    }

    /// Scrolls to the page before the current one.
    pub fn scroll_back(&mut self, animated: bool) {
        self.scroll_to(self.current_slot() - 1, animated);
    }

    /// Jumps to page `index` without animation.
    pub fn set_current_index(&mut self, index: usize) {
        self.scroll_to(isize::try_from(index).unwrap_or(isize::MAX), false);
    }

    /// Processes an event from the scroll surface.
    pub fn handle_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::Scrolled { offset } => self.on_scrolled(offset),
            SurfaceEvent::WillBeginDragging => self.notify(|d| d.will_begin_dragging()),
            SurfaceEvent::DidEndDragging { will_decelerate } => {
                self.notify(|d| d.did_end_dragging(will_decelerate));
            }
            SurfaceEvent::WillBeginDecelerating => self.notify(|d| d.will_begin_decelerating()),
            SurfaceEvent::DidEndDecelerating => self.notify(|d| d.did_end_decelerating()),
            SurfaceEvent::DidEndScrollingAnimation => {
                // Settle an animation that stopped between pages.
                let offset = self.offset.scroll_offset();
                if offset != offset.round() {
                    self.scroll_to(self.current_slot(), true);
                }
                self.notify(|d| d.did_end_scrolling_animation());
            }
        }
    }

    fn on_scrolled(&mut self, offset: Point) {
        if self.suppressing {
            tracing::trace!(x = offset.x, "ignoring scroll caused by the pager");
            return;
        }
        let width = self.viewport.width;
        if !width.is_finite() || width <= 0.0 || !offset.x.is_finite() {
            return;
        }
        self.offset
            .apply_external(offset.x / width, self.page_count, self.config.wrap);
        let index_changed = self.resolve_current_index();

        self.sync_surface_offset();
        self.reconcile_pages();
        self.update_layout();

        let scroll_offset = self.offset.scroll_offset();
        self.notify(|d| d.did_scroll(scroll_offset));
        if index_changed {
            let index = self.current_index;
            self.notify(|d| d.current_index_did_change(index));
        }
        self.update_interaction();
    }

    /// Recomputes the current index; returns whether it changed.
    fn resolve_current_index(&mut self) -> bool {
        let index = resolve_index(self.offset.scroll_offset(), self.page_count);
        if index == self.current_index {
            return false;
        }
        tracing::debug!(from = self.current_index, to = index, "current page changed");
        self.current_index = index;
        true
    }

    /// Writes the canonical offset back to the surface without reacting to it.
    fn sync_surface_offset(&mut self) {
        let raw = self.offset.sync(self.page_count, self.config.wrap);
        let offset = Point::new(self.viewport.width * raw, 0.0);
        self.with_suppressed(|pager| {
            let mut echo = SurfaceEvents::new();
            if let Some(surface) = pager.surface.as_mut() {
                surface.set_content_offset(offset, false, &mut echo);
            }
            pager.dispatch(echo);
        });
    }

    fn reconcile_pages(&mut self) {
        let window = visible_window(self.current_index, self.page_count, self.wraps());
        self.pages
            .reconcile(&window, self.page_count, self.source.as_mut());
        debug_assert!(
            self.pages.len() <= if self.wraps() { 4 } else { 3 },
            "resident window exceeded its bound: {:?}",
            self.pages.slots()
        );
    }

    fn update_layout(&mut self) {
        let bounds = self.viewport;
        let content_x = self.surface.as_ref().map_or(0.0, |s| s.content_offset().x);
        let center = face_center(bounds, content_x);
        let scroll_offset = self.offset.scroll_offset();
        for (slot, page) in self.pages.iter_mut() {
            let transform =
                face_transform(scroll_offset, slot, bounds.width, self.config.perspective);
            debug_assert!(
                !bounds.width.is_finite() || transform.is_finite(),
                "non-finite face transform for slot {slot}"
            );
            place_face(page.view_mut(), bounds, center, transform);
            page.record_geometry(transform, center);
        }
    }

    /// Only the current page accepts input.
    fn update_interaction(&mut self) {
        let current = self.current_slot();
        for (slot, page) in self.pages.iter_mut() {
            page.set_interactive(slot == current);
        }
    }

    fn with_suppressed<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let was = core::mem::replace(&mut self.suppressing, true);
        let out = f(self);
        self.suppressing = was;
        out
    }

    fn dispatch(&mut self, events: SurfaceEvents) {
        for event in events {
            self.handle_event(event);
        }
    }

    fn notify(&mut self, f: impl FnOnce(&mut D)) {
        if self.suppressing {
            return;
        }
        if let Some(delegate) = self.delegate.as_mut() {
            f(delegate);
        }
    }

    fn wraps(&self) -> bool {
        self.config.wrap && self.page_count > 1
    }

    fn current_slot(&self) -> isize {
        isize::try_from(self.current_index).unwrap_or(isize::MAX)
    }
}
