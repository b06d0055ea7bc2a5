// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resident page storage.

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Size};

use crate::layout::place_face;
use crate::window::content_index;
use crate::{PageSource, PageView, Transform3d};

/// A resident page: the host view plus the geometry last applied to it.
#[derive(Debug)]
pub struct PageHandle<V> {
    view: V,
    content_index: usize,
    transform: Transform3d,
    center: Point,
    interactive: bool,
}

impl<V: PageView> PageHandle<V> {
    fn new(mut view: V, content_index: usize) -> Self {
        view.set_double_sided(false);
        view.will_appear();
        view.attach();
        Self {
            view,
            content_index,
            transform: Transform3d::IDENTITY,
            center: Point::ORIGIN,
            interactive: false,
        }
    }

    fn release(mut self) {
        self.view.detach();
        self.view.did_disappear();
    }

    /// Returns the host view.
    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Returns the page index the view was created for.
    #[must_use]
    pub const fn content_index(&self) -> usize {
        self.content_index
    }

    /// Returns the transform last applied to the view.
    #[must_use]
    pub const fn transform(&self) -> Transform3d {
        self.transform
    }

    /// Returns the center last applied to the view.
    #[must_use]
    pub const fn center(&self) -> Point {
        self.center
    }

    /// Returns whether the view currently accepts input.
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub(crate) fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub(crate) fn record_geometry(&mut self, transform: Transform3d, center: Point) {
        self.transform = transform;
        self.center = center;
    }

    pub(crate) fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
        self.view.set_interactive(interactive);
    }
}

/// Slot-keyed map of resident pages.
#[derive(Debug)]
pub(crate) struct PageCache<V> {
    pages: HashMap<isize, PageHandle<V>>,
}

impl<V: PageView> PageCache<V> {
    pub(crate) fn new() -> Self {
        Self {
            pages: HashMap::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.pages.len()
    }

    pub(crate) fn get(&self, slot: isize) -> Option<&PageHandle<V>> {
        self.pages.get(&slot)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (isize, &mut PageHandle<V>)> {
        self.pages.iter_mut().map(|(&slot, page)| (slot, page))
    }

    /// Resident slots in ascending order.
    pub(crate) fn slots(&self) -> Vec<isize> {
        let mut slots: Vec<isize> = self.pages.keys().copied().collect();
        slots.sort_unstable();
        slots
    }

    /// Evicts every page outside `window`, then loads every missing slot of
    /// `window` from `source` (when there is one and it has pages).
    pub(crate) fn reconcile<S>(&mut self, window: &[isize], page_count: usize, source: Option<&mut S>)
    where
        S: PageSource<Page = V>,
    {
        let stale: Vec<isize> = self
            .pages
            .keys()
            .copied()
            .filter(|slot| !window.contains(slot))
            .collect();
        for slot in stale {
            if let Some(page) = self.pages.remove(&slot) {
                tracing::trace!(slot, content = page.content_index, "evicting page");
                page.release();
            }
        }

        let Some(source) = source else {
            return;
        };
        for &slot in window {
            if self.pages.contains_key(&slot) {
                continue;
            }
            let Some(index) = content_index(slot, page_count) else {
                continue;
            };
            tracing::trace!(slot, content = index, "loading page");
            self.pages.insert(slot, PageHandle::new(source.page(index), index));
        }
    }

    /// Swaps the view in `slot` for a fresh one from `source`, placing it
    /// with the geometry of the view it replaces. Returns `false` if `slot`
    /// is not resident.
    pub(crate) fn replace<S>(
        &mut self,
        slot: isize,
        page_count: usize,
        bounds: Size,
        interactive: bool,
        source: &mut S,
    ) -> bool
    where
        S: PageSource<Page = V>,
    {
        let Some(index) = content_index(slot, page_count) else {
            return false;
        };
        let Some(old) = self.pages.remove(&slot) else {
            return false;
        };
        let (transform, center) = (old.transform, old.center);
        old.release();

        let mut page = PageHandle::new(source.page(index), index);
        place_face(&mut page.view, bounds, center, transform);
        page.record_geometry(transform, center);
        page.set_interactive(interactive);
        self.pages.insert(slot, page);
        true
    }

    /// Detaches and drops every resident page.
    pub(crate) fn clear(&mut self) {
        for (_, page) in self.pages.drain() {
            page.release();
        }
    }
}
