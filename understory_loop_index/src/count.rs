// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page count and the wraparound mapping built on it.

use core::num::NonZeroUsize;

use crate::{ExtendedIndex, LoopError, RealIndex};

/// Number of extra tab slots a loop strip keeps beyond the page count.
///
/// Two are boundary duplicates (one page looping in from either side) and one is the
/// transition buffer shown while a forward drag crosses the last page.
pub const POOL_PADDING: usize = 3;

/// Number of slots before the slot bound to real index `0`.
pub const LEADING_SLOTS: usize = 1;

/// A validated, non-zero page count.
///
/// All wraparound arithmetic goes through this type so that the modulo logic lives in
/// one place. It is `Copy` and meant to be passed around by value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PageCount {
    len: NonZeroUsize,
    // Cached signed form of `len`; always equal to it.
    signed: i64,
}

impl PageCount {
    /// Validates `count` as a page count.
    ///
    /// Fails with [`LoopError::InvalidArgument`] when `count` is zero or does not fit the
    /// signed extended-index range.
    pub fn new(count: usize) -> Result<Self, LoopError> {
        let invalid = LoopError::InvalidArgument { count };
        let len = NonZeroUsize::new(count).ok_or(invalid)?;
        let signed = i64::try_from(count).map_err(|_| invalid)?;
        Ok(Self { len, signed })
    }

    /// Returns the count as a plain `usize`.
    #[must_use]
    pub const fn get(self) -> usize {
        self.len.get()
    }

    /// Returns the count as a signed extended-index stride.
    #[must_use]
    pub const fn stride(self) -> ExtendedIndex {
        self.signed
    }

    /// Maps any extended index onto the real index range `0..count`.
    ///
    /// This is periodic in `count` and never fails.
    #[must_use]
    pub fn real_of(self, extended: ExtendedIndex) -> RealIndex {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "rem_euclid result is in 0..count, and count came from a usize"
        )]
        let real = extended.rem_euclid(self.signed) as usize;
        real
    }

    /// Checks that a directly supplied real index is in range.
    pub fn checked_real(self, index: RealIndex) -> Result<RealIndex, LoopError> {
        if index < self.get() {
            Ok(index)
        } else {
            Err(LoopError::IndexOutOfRange {
                index,
                count: self.get(),
            })
        }
    }

    /// Returns the extended index congruent to `real` that is closest to `from`.
    ///
    /// When the forward and backward candidates are equally far away the forward one
    /// wins. `real` is reduced modulo the count first, so out-of-range values wrap.
    #[must_use]
    pub fn nearest_extended(self, from: ExtendedIndex, real: RealIndex) -> ExtendedIndex {
        let n = self.signed;
        let target = self.signed_real(real);
        let forward = (target - from).rem_euclid(n);
        if forward == 0 {
            return from;
        }
        let backward = n - forward;
        if forward <= backward {
            from + forward
        } else {
            from - backward
        }
    }

    /// Signed page delta from `from` to the nearest extended index congruent to `real`.
    #[must_use]
    pub fn shortest_delta(self, from: ExtendedIndex, real: RealIndex) -> ExtendedIndex {
        self.nearest_extended(from, real) - from
    }

    /// Returns the multiple of the count that re-anchoring `extended` must subtract.
    ///
    /// `extended - anchor_shift(extended)` is the real index of `extended`.
    #[must_use]
    pub fn anchor_shift(self, extended: ExtendedIndex) -> ExtendedIndex {
        extended - extended.rem_euclid(self.signed)
    }

    /// Number of slots in a loop tab pool for this count.
    #[must_use]
    pub const fn pool_len(self) -> usize {
        self.get() + POOL_PADDING
    }

    /// Real index bound to pool slot `slot`.
    ///
    /// Slot `0` is the leading buffer and maps to the last page.
    #[must_use]
    pub fn slot_to_real(self, slot: usize) -> RealIndex {
        let slot = i64::try_from(slot).unwrap_or(i64::MAX);
        self.real_of(slot.saturating_sub(LEADING_SLOTS as i64))
    }

    fn signed_real(self, real: RealIndex) -> ExtendedIndex {
        // Anything that does not fit in i64 is reduced in the unsigned domain first.
        let reduced = real % self.get();
        i64::try_from(reduced).unwrap_or(0)
    }
}

/// Maps `extended` onto `0..count`.
///
/// This is the free-function form of [`PageCount::real_of`]. It fails with
/// [`LoopError::InvalidArgument`] when `count` is zero.
///
/// ```rust
/// use understory_loop_index::real_of;
///
/// assert_eq!(real_of(5, 5), Ok(0));
/// assert_eq!(real_of(-1, 5), Ok(4));
/// assert!(real_of(3, 0).is_err());
/// ```
pub fn real_of(extended: ExtendedIndex, count: usize) -> Result<RealIndex, LoopError> {
    Ok(PageCount::new(count)?.real_of(extended))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn five() -> PageCount {
        PageCount::new(5).unwrap()
    }

    #[test]
    fn zero_count_is_invalid() {
        assert_eq!(
            PageCount::new(0),
            Err(LoopError::InvalidArgument { count: 0 })
        );
        assert_eq!(real_of(7, 0), Err(LoopError::InvalidArgument { count: 0 }));
    }

    #[test]
    fn wraps_both_directions() {
        let n = five();
        assert_eq!(n.real_of(0), 0);
        assert_eq!(n.real_of(4), 4);
        assert_eq!(n.real_of(5), 0);
        assert_eq!(n.real_of(-1), 4);
        assert_eq!(n.real_of(-5), 0);
        assert_eq!(n.real_of(-6), 4);
        assert_eq!(n.real_of(12), 2);
    }

    #[test]
    fn checked_real_rejects_out_of_range() {
        let n = five();
        assert_eq!(n.checked_real(4), Ok(4));
        assert_eq!(
            n.checked_real(5),
            Err(LoopError::IndexOutOfRange { index: 5, count: 5 })
        );
    }

    #[test]
    fn nearest_extended_prefers_shorter_path() {
        let n = five();
        // From the last page, page 0 is one step forward.
        assert_eq!(n.nearest_extended(4, 0), 5);
        // From page 0, the last page is one step back.
        assert_eq!(n.nearest_extended(0, 4), -1);
        assert_eq!(n.nearest_extended(2, 2), 2);
        assert_eq!(n.nearest_extended(12, 1), 11);
    }

    #[test]
    fn nearest_extended_ties_go_forward() {
        let n = PageCount::new(4).unwrap();
        // Two steps either way; forward wins.
        assert_eq!(n.nearest_extended(0, 2), 2);
        assert_eq!(n.nearest_extended(3, 1), 5);
    }

    #[test]
    fn slot_mapping_has_one_leading_buffer() {
        let n = five();
        assert_eq!(n.pool_len(), 8);
        assert_eq!(n.slot_to_real(0), 4);
        assert_eq!(n.slot_to_real(1), 0);
        assert_eq!(n.slot_to_real(5), 4);
        assert_eq!(n.slot_to_real(6), 0);
        assert_eq!(n.slot_to_real(7), 1);
    }

    #[test]
    fn anchor_shift_is_a_multiple_of_count() {
        let n = five();
        assert_eq!(n.anchor_shift(3), 0);
        assert_eq!(n.anchor_shift(5), 5);
        assert_eq!(n.anchor_shift(-1), -5);
        assert_eq!(n.anchor_shift(-11), -15);
    }

    proptest! {
        #[test]
        fn real_of_is_periodic(e in -1_000_000_i64..1_000_000, n in 1_usize..500, k in -1_000_i64..1_000) {
            let count = PageCount::new(n).unwrap();
            let shifted = e + k * count.stride();
            prop_assert_eq!(count.real_of(e), count.real_of(shifted));
        }

        #[test]
        fn real_of_stays_in_range(e in any::<i64>(), n in 1_usize..10_000) {
            let count = PageCount::new(n).unwrap();
            prop_assert!(count.real_of(e) < n);
        }

        #[test]
        fn nearest_extended_is_congruent_and_short(from in -10_000_i64..10_000, real in 0_usize..64, n in 1_usize..64) {
            let count = PageCount::new(n).unwrap();
            let target = count.nearest_extended(from, real);
            prop_assert_eq!(count.real_of(target), real % n);
            let delta = target - from;
            prop_assert!(2 * delta.abs() <= count.stride());
            // A tie only ever resolves forward.
            prop_assert!(2 * delta != -count.stride());
        }

        #[test]
        fn shortest_delta_lands_on_the_real_page(from in -10_000_i64..10_000, real in 0_usize..64, n in 1_usize..64) {
            let count = PageCount::new(n).unwrap();
            let delta = count.shortest_delta(from, real);
            prop_assert_eq!(count.real_of(from + delta), real % n);
            prop_assert!(-count.stride() < 2 * delta && 2 * delta <= count.stride());
        }

        #[test]
        fn anchor_shift_preserves_real(e in -1_000_000_i64..1_000_000, n in 1_usize..500) {
            let count = PageCount::new(n).unwrap();
            let shift = count.anchor_shift(e);
            prop_assert_eq!(shift.rem_euclid(count.stride()), 0);
            prop_assert_eq!(count.real_of(e - shift), count.real_of(e));
            prop_assert!((e - shift) >= 0 && (e - shift) < count.stride());
        }
    }
}
