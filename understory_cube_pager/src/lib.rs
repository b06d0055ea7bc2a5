// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_cube_pager --heading-base-level=0

//! Understory Cube Pager: a headless controller that presents pages as the
//! faces of a turning cube.
//!
//! A horizontally paging scroll surface drives the pager. As the surface
//! moves, the pager:
//!
//! - integrates the surface position into a continuous scroll offset in page
//!   units ([`OffsetTracker`]),
//! - derives the discrete current page from it ([`resolve_index`]),
//! - keeps only the current page and its neighbors resident
//!   ([`visible_window`]), creating and dropping page views on demand,
//! - turns every resident page into its cube face ([`face_transform`]),
//! - and lets only the current page receive input.
//!
//! With [`PagerConfig::wrap`] the strip is circular: the last page sits before
//! page 0 and the first page after the last one.
//!
//! This crate deliberately does **not** know about any UI toolkit. Hosts
//! implement three small traits:
//!
//! - [`PageSource`]: the page count and a view for each page.
//! - [`PageView`]: attach/detach, frame, transform, and input gating for a view.
//! - [`ScrollSurface`]: the native paging scroll primitive.
//!
//! and optionally [`PagerDelegate`] to hear about scrolling and page changes.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_cube_pager::{
//!     CubePager, PageSource, PageView, PagerConfig, ScrollSurface, SurfaceEvent,
//!     SurfaceEvents, SurfaceOptions, Transform3d,
//! };
//!
//! struct Label(usize);
//!
//! impl PageView for Label {
//!     fn attach(&mut self) {}
//!     fn detach(&mut self) {}
//!     fn set_frame(&mut self, _bounds: Size, _center: Point) {}
//!     fn set_transform(&mut self, _transform: Transform3d) {}
//!     fn set_interactive(&mut self, _interactive: bool) {}
//! }
//!
//! struct Labels;
//!
//! impl PageSource for Labels {
//!     type Page = Label;
//!     fn page_count(&self) -> usize {
//!         4
//!     }
//!     fn page(&mut self, index: usize) -> Label {
//!         Label(index)
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Scroller {
//!     offset: Point,
//! }
//!
//! impl ScrollSurface for Scroller {
//!     fn configure(&mut self, _options: SurfaceOptions) {}
//!     fn content_offset(&self) -> Point {
//!         self.offset
//!     }
//!     fn set_content_offset(&mut self, offset: Point, _animated: bool, _echo: &mut SurfaceEvents) {
//!         self.offset = offset;
//!     }
//!     fn set_content_size(&mut self, _size: Size, _echo: &mut SurfaceEvents) {}
//!     fn bounces(&self) -> bool {
//!         true
//!     }
//! }
//!
//! let mut pager: CubePager<Labels, Scroller> = CubePager::new(PagerConfig::default());
//! pager.set_source(Labels);
//! pager.set_surface(Scroller::default());
//! pager.set_viewport(Size::new(320.0, 480.0));
//! pager.reload_data();
//! assert_eq!(pager.resident_slots(), vec![0, 1]);
//!
//! // The user drags a little over half a page.
//! pager.handle_event(SurfaceEvent::Scrolled { offset: Point::new(180.0, 0.0) });
//! assert_eq!(pager.current_index(), 1);
//! assert_eq!(pager.resident_slots(), vec![0, 1, 2]);
//! assert!(pager.page(1).unwrap().is_interactive());
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cache;
mod delegate;
mod layout;
mod offset;
mod pager;
mod source;
mod surface;
mod transform;
mod window;

pub use cache::PageHandle;
pub use delegate::PagerDelegate;
pub use layout::{DEFAULT_PERSPECTIVE, face_angle, face_center, face_transform};
pub use offset::{OffsetTracker, resolve_index};
pub use pager::{CubePager, PagerConfig};
pub use source::{PageSource, PageView};
pub use surface::{ScrollSurface, SurfaceEvent, SurfaceEvents, SurfaceOptions, Transition};
pub use transform::Transform3d;
pub use window::{PageWindow, content_index, visible_window};
