// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-offset tracking in page units.
//!
//! The scroll surface reports its position in its own page space, which in
//! wrap mode is shifted by one buffer slot relative to the logical strip. The
//! tracker therefore integrates *deltas* of the raw surface position into a
//! canonical logical offset rather than copying it.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Canonical scroll position of a cube pager, in page units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OffsetTracker {
    scroll_offset: f64,
    previous_offset: f64,
}

impl OffsetTracker {
    /// Creates a tracker resting on page 0.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scroll_offset: 0.0,
            previous_offset: 0.0,
        }
    }

    /// Returns the logical scroll offset.
    #[must_use]
    pub const fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Returns the last raw surface offset observed or written.
    #[must_use]
    pub const fn previous_offset(&self) -> f64 {
        self.previous_offset
    }

    /// Integrates a raw surface offset (in surface page units).
    ///
    /// The delta from the previous raw value is added to the logical offset.
    /// A raw value that sits exactly on a page boundary means the surface has
    /// settled, so the logical offset is snapped to the nearest page. Under
    /// wrap with more than one page the result is folded into
    /// `[0, page_count)`.
    ///
    /// Non-finite input is ignored.
    pub fn apply_external(&mut self, raw: f64, page_count: usize, wrap: bool) {
        if !raw.is_finite() {
            return;
        }
        self.scroll_offset += raw - self.previous_offset;
        self.previous_offset = raw;
        if raw == raw.floor() {
            self.scroll_offset = self.scroll_offset.round();
        }
        if wrap && page_count > 1 {
            self.scroll_offset = wrap_into(self.scroll_offset, page_count as f64);
        }
    }

    /// Returns the raw surface offset that represents the logical offset,
    /// applying the wrap-buffer shift, and records it as the previous offset.
    ///
    /// Under wrap with more than one page the result lies in
    /// `[1, page_count + 1)`.
    pub fn sync(&mut self, page_count: usize, wrap: bool) -> f64 {
        let mut offset = self.scroll_offset;
        if wrap && page_count > 1 {
            offset = 1.0 + wrap_into(offset, page_count as f64);
        }
        self.previous_offset = offset;
        offset
    }

    /// Clamps the logical offset into the range valid for `page_count` pages.
    pub fn clamp_to(&mut self, page_count: usize, wrap: bool) {
        if page_count == 0 {
            self.scroll_offset = 0.0;
        } else if wrap && page_count > 1 {
            self.scroll_offset = wrap_into(self.scroll_offset, page_count as f64);
        } else {
            self.scroll_offset = self.scroll_offset.clamp(0.0, page_count as f64 - 1.0);
        }
    }
}

/// Maps the continuous offset to the nearest page index, clamped to
/// `0..page_count`.
///
/// ```rust
/// use understory_cube_pager::resolve_index;
///
/// assert_eq!(resolve_index(0.49, 3), 0);
/// assert_eq!(resolve_index(0.5, 3), 1);
/// assert_eq!(resolve_index(7.0, 3), 2);
/// assert_eq!(resolve_index(-2.0, 3), 0);
/// ```
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    reason = "Value is rounded and clamped to 0..page_count before the cast"
)]
pub fn resolve_index(scroll_offset: f64, page_count: usize) -> usize {
    if page_count == 0 || !scroll_offset.is_finite() {
        return 0;
    }
    scroll_offset.round().clamp(0.0, page_count as f64 - 1.0) as usize
}

/// Folds `value` into `[0, period)`.
pub(crate) fn wrap_into(value: f64, period: f64) -> f64 {
    let r = value % period;
    let r = if r < 0.0 { r + period } else { r };
    // `r + period` can round up to exactly `period` for tiny negative `r`.
    if r >= period { 0.0 } else { r }
}

#[cfg(test)]
mod tests {
    use super::{OffsetTracker, resolve_index, wrap_into};

    #[test]
    fn deltas_accumulate_and_settle() {
        let mut t = OffsetTracker::new();
        t.apply_external(0.25, 3, false);
        assert_eq!(t.scroll_offset(), 0.25);
        t.apply_external(0.5, 3, false);
        assert_eq!(t.scroll_offset(), 0.5);
        t.apply_external(1.0, 3, false);
        assert_eq!(t.scroll_offset(), 1.0);
        assert_eq!(t.previous_offset(), 1.0);
    }

    #[test]
    fn settled_raw_offset_snaps_drift() {
        let mut t = OffsetTracker::new();
        t.apply_external(0.1, 3, false);
        t.apply_external(0.2, 3, false);
        t.apply_external(0.7, 3, false);
        t.apply_external(1.0, 3, false);
        assert_eq!(t.scroll_offset(), 1.0);
    }

    #[test]
    fn wrap_folds_negative_offsets() {
        let mut t = OffsetTracker::new();
        // Surface rests on slot 1 (page 0) under wrap.
        assert_eq!(t.sync(4, true), 1.0);
        t.apply_external(0.5, 4, true);
        assert_eq!(t.scroll_offset(), 3.5);
        t.apply_external(0.0, 4, true);
        assert_eq!(t.scroll_offset(), 3.0);
        assert_eq!(t.sync(4, true), 4.0);
    }

    #[test]
    fn wrap_is_skipped_for_single_page() {
        let mut t = OffsetTracker::new();
        t.apply_external(-0.5, 1, true);
        assert_eq!(t.scroll_offset(), -0.5);
        assert_eq!(t.sync(1, true), -0.5);
    }

    #[test]
    fn non_finite_raw_offsets_are_ignored() {
        let mut t = OffsetTracker::new();
        t.apply_external(f64::NAN, 3, true);
        t.apply_external(f64::INFINITY, 3, true);
        assert_eq!(t, OffsetTracker::new());
    }

    #[test]
    fn clamp_to_shrinks_range() {
        let mut t = OffsetTracker::new();
        t.apply_external(4.0, 10, false);
        t.clamp_to(3, false);
        assert_eq!(t.scroll_offset(), 2.0);
        t.clamp_to(0, false);
        assert_eq!(t.scroll_offset(), 0.0);
    }

    #[test]
    fn resolve_handles_empty_and_non_finite() {
        assert_eq!(resolve_index(3.0, 0), 0);
        assert_eq!(resolve_index(f64::NAN, 4), 0);
        assert_eq!(resolve_index(3.4, 5), 3);
    }

    #[test]
    fn wrap_into_stays_half_open() {
        assert_eq!(wrap_into(5.0, 5.0), 0.0);
        assert_eq!(wrap_into(-1.0, 5.0), 4.0);
        assert_eq!(wrap_into(-1e-18, 5.0), 0.0);
        assert_eq!(wrap_into(12.5, 5.0), 2.5);
    }
}
