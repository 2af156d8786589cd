// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Loop Pager: a headless, endlessly looping page carousel.
//!
//! This crate provides the state machine behind a swipeable pager whose last page is
//! followed by its first. It does not render anything; hosts feed it pointer input and
//! frame ticks and draw pages where it says they are.
//!
//! The core pieces are:
//!
//! - [`PageProvider`]: the host's finite page source, addressed by real index.
//! - [`LoopAdapter`]: serves a provider over the unbounded extended index space, so any
//!   extended index resolves to a real page.
//! - [`PagerSurface`]: owns the scroll position and the
//!   [`ScrollPhase`] (idle, dragging, settling). It handles drags with a touch slop,
//!   settles toward whole pages over [`PagerSurface::advance`] ticks, jumps to a real
//!   page along the shorter way round ([`PagerSurface::set_current_item`]), and silently
//!   re-anchors its coordinate after settling so it never drifts.
//! - [`Listeners`]: an ordered registry of [`PageChangeListener`]s. Every scroll,
//!   selection, and phase change is delivered synchronously to each subscriber.
//! - [`gesture`]: the pointer tracker that separates drags from taps.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_loop_pager::{PageProvider, PagerConfig, PagerSurface, ScrollPhase};
//!
//! struct Pages;
//!
//! impl PageProvider for Pages {
//!     type Handle = usize;
//!     fn count(&self) -> usize { 5 }
//!     fn title_at(&self, index: usize) -> Option<String> { Some(format!("Page {}", index + 1)) }
//!     fn content_at(&self, index: usize) -> Option<usize> { Some(index) }
//! }
//!
//! let mut pager = PagerSurface::new(PagerConfig::default());
//! pager.set_page_width(320.0);
//! pager.bind(Pages).unwrap();
//!
//! // From the first page, the last page is one step back.
//! pager.set_current_item(4, false).unwrap();
//! assert_eq!(pager.current_item(), 4);
//!
//! // Swipe a full page to the left: the last page is followed by the first.
//! pager.pointer_down(None, Point::new(300.0, 10.0), 0);
//! pager.pointer_move(None, Point::new(-20.0, 10.0));
//! pager.pointer_up(None, Point::new(-20.0, 10.0), 120);
//! assert_eq!(pager.current_item(), 0);
//! assert_eq!(pager.phase(), ScrollPhase::Idle);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

mod error;
pub mod gesture;
mod listener;
mod pager;
mod provider;

pub use error::PagerError;
pub use listener::{EventFn, ListenerId, Listeners, PageChangeListener, PagerEvent, ScrollPhase};
pub use pager::{MaterializedPage, PagerConfig, PagerState, PagerSurface, ReanchorPolicy};
pub use provider::{LoopAdapter, PageProvider};
