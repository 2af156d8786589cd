// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Loop Tabs: a headless tab strip that follows a looping pager.
//!
//! A [`TabStrip`] binds to an [`understory_loop_pager::PagerSurface`] and keeps one tab
//! per page centered under an indicator band, wrapping around the loop together with the
//! pager. It does not render anything itself; [`TabStrip::paint`] describes a frame to a
//! [`StripCanvas`] supplied by the host.
//!
//! - [`TabPool`]: `N + 3` tab views. Slot `s` shows real page `s - 1` modulo `N`, so the
//!   neighbors of the first and last pages always exist side by side.
//! - Scroll sync: every pager scroll is mirrored synchronously. Each tab is a third of
//!   the viewport wide and the strip scrolls so the current page's tab sits in the
//!   middle third, following fractional drags pixel by pixel.
//! - Taps: tapping a tab jumps the pager there with animation, taking the shorter way
//!   round. Taps are ignored while the pager is being dragged.
//! - Lifecycle: [`HostEvent`]s from the host reissue alignment once real dimensions and
//!   focus are known.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_loop_pager::{PageProvider, PagerConfig, PagerSurface};
//! use understory_loop_tabs::{HostEvent, TabStrip};
//!
//! struct Pages;
//!
//! impl PageProvider for Pages {
//!     type Handle = ();
//!     fn count(&self) -> usize { 5 }
//!     fn title_at(&self, index: usize) -> Option<String> { Some(format!("Page {}", index + 1)) }
//!     fn content_at(&self, _index: usize) -> Option<()> { Some(()) }
//! }
//!
//! let mut pager = PagerSurface::new(PagerConfig::default());
//! pager.set_page_width(360.0);
//! pager.bind(Pages).unwrap();
//!
//! let mut strip = TabStrip::default();
//! strip.handle_host_event(HostEvent::Resized { width: 300, height: 48 });
//! strip.bind_to_pager(&mut pager).unwrap();
//! assert_eq!(strip.pool_len(), 8);
//!
//! // The pager jumps; the strip follows before the call returns.
//! pager.set_current_item(2, false).unwrap();
//! assert_eq!(strip.scroll_x(), 200);
//!
//! // Tapping the leading buffer tab selects the last page.
//! assert_eq!(strip.tap_slot(0, &mut pager), Some(4));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

mod lifecycle;
mod paint;
mod pool;
mod strip;

pub use lifecycle::HostEvent;
pub use paint::{Color, StripCanvas};
pub use pool::{TabPool, TabView, VISIBLE_TABS, tab_width_for};
pub use strip::{TabStrip, TabStripConfig};
