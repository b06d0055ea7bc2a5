// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resident-window computation and slot/content index mapping.
//!
//! A *slot* is the position a page occupies on the strip of cube faces. Slots
//! usually coincide with content indices, but in wrap mode the strip grows one
//! buffer slot at each end: slot `-1` shows the last page and slot `page_count`
//! shows the first one.

use smallvec::SmallVec;

/// The set of slots that should be resident for a given current index.
///
/// Holds at most four entries, so it never spills to the heap.
pub type PageWindow = SmallVec<[isize; 4]>;

/// Computes which slots should be resident around `current`.
///
/// The window always contains `current`. The next slot is added when wrapping
/// or when `current` is not the last page. The previous slot is added when
/// `current > 0`; at page 0 under wrap, the buffer slot `-1` is added instead.
///
/// An empty source yields an empty window.
///
/// ```rust
/// use understory_cube_pager::visible_window;
///
/// assert_eq!(visible_window(0, 3, false).as_slice(), &[0, 1]);
/// assert_eq!(visible_window(2, 3, false).as_slice(), &[2, 1]);
/// assert_eq!(visible_window(0, 5, true).as_slice(), &[0, 1, -1]);
/// ```
#[must_use]
pub fn visible_window(current: usize, page_count: usize, wrap: bool) -> PageWindow {
    let mut window = PageWindow::new();
    if page_count == 0 {
        return window;
    }
    let Ok(current) = isize::try_from(current) else {
        return window;
    };
    window.push(current);
    if wrap || current < page_count as isize - 1 {
        window.push(current + 1);
    }
    if current > 0 {
        window.push(current - 1);
    } else if wrap {
        window.push(-1);
    }
    window
}

/// Maps a slot to the content index the page source is asked for.
///
/// The result is always in `0..page_count`. Returns `None` when there are no
/// pages.
///
/// ```rust
/// use understory_cube_pager::content_index;
///
/// assert_eq!(content_index(-1, 5), Some(4));
/// assert_eq!(content_index(5, 5), Some(0));
/// assert_eq!(content_index(2, 0), None);
/// ```
#[must_use]
pub fn content_index(slot: isize, page_count: usize) -> Option<usize> {
    let count = isize::try_from(page_count).ok().filter(|&n| n > 0)?;
    usize::try_from(slot.rem_euclid(count)).ok()
}

#[cfg(test)]
mod tests {
    use super::{content_index, visible_window};

    #[test]
    fn empty_source_has_no_window() {
        assert!(visible_window(0, 0, false).is_empty());
        assert!(visible_window(0, 0, true).is_empty());
    }

    #[test]
    fn single_page_without_wrap_is_alone() {
        assert_eq!(visible_window(0, 1, false).as_slice(), &[0]);
    }

    #[test]
    fn interior_pages_have_both_neighbors() {
        let mut w = visible_window(3, 10, false);
        w.sort_unstable();
        assert_eq!(w.as_slice(), &[2, 3, 4]);
    }

    #[test]
    fn wrap_extends_past_the_last_page() {
        let mut w = visible_window(4, 5, true);
        w.sort_unstable();
        assert_eq!(w.as_slice(), &[3, 4, 5]);
        assert_eq!(content_index(5, 5), Some(0));
    }

    #[test]
    fn window_never_exceeds_bound() {
        for count in 0..8 {
            for current in 0..count.max(1) {
                assert!(visible_window(current, count, false).len() <= 3);
                assert!(visible_window(current, count, true).len() <= 4);
            }
        }
    }

    #[test]
    fn content_index_normalizes_any_slot() {
        for slot in -12_isize..12 {
            let idx = content_index(slot, 4).unwrap();
            assert!(idx < 4, "slot {slot} mapped to {idx}");
        }
        assert_eq!(content_index(-5, 4), Some(3));
    }
}
