// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Loop Index: circular page-index algebra for looping pagers.
//!
//! A looping pager shows a finite sequence of `N` pages as if it never ends. Two index
//! spaces are involved:
//!
//! - [`RealIndex`]: a page in `0..N`, the index your data source understands.
//! - [`ExtendedIndex`]: an unbounded signed coordinate the pager scrolls over. Scrolling
//!   forward from page `N - 1` lands on extended index `N`, which is real page `0`.
//!
//! [`PageCount`] owns every piece of wraparound arithmetic: the `real_of` mapping,
//! nearest-congruent selection for jumps ([`PageCount::nearest_extended`]), the shift used
//! when silently re-anchoring a drifting coordinate ([`PageCount::anchor_shift`]), and the
//! slot mapping for a tab pool padded with [`POOL_PADDING`] extra slots.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_loop_index::PageCount;
//!
//! let count = PageCount::new(5).unwrap();
//!
//! // Periodic in the page count.
//! assert_eq!(count.real_of(5), 0);
//! assert_eq!(count.real_of(-1), 4);
//!
//! // Jumping from the last page to the first goes forward one step.
//! assert_eq!(count.nearest_extended(4, 0), 5);
//!
//! // A tab pool has N + 3 slots, and slot 0 shows the page looping in from the left.
//! assert_eq!(count.pool_len(), 8);
//! assert_eq!(count.slot_to_real(0), 4);
//! ```
//!
//! The [`px`] module holds small integer pixel helpers (floor, half-up rounding,
//! ceiling division) shared by the pager and tab strip crates.
//!
//! This crate is `no_std`.

#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

mod count;
mod error;
pub mod px;

pub use count::{LEADING_SLOTS, POOL_PADDING, PageCount, real_of};
pub use error::LoopError;

/// Canonical page index in `0..N`.
pub type RealIndex = usize;

/// Unbounded signed page coordinate; maps to a [`RealIndex`] by Euclidean remainder.
pub type ExtendedIndex = i64;
