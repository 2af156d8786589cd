// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer pixel helpers that do not need `std` float math.

/// Largest integer not greater than `value`.
///
/// NaN maps to `0`; values outside the `i64` range saturate.
#[must_use]
pub fn floor_to_i64(value: f64) -> i64 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "float-to-int casts saturate, which is the intended clamping"
    )]
    let truncated = value as i64;
    if (truncated as f64) > value {
        truncated - 1
    } else {
        truncated
    }
}

/// Rounds half up, so `0.5` becomes `1` and `-0.5` becomes `0`.
#[must_use]
pub fn round_to_i64(value: f64) -> i64 {
    floor_to_i64(value + 0.5)
}

/// `ceil(numerator / denominator)` for a non-negative numerator and positive denominator.
///
/// Returns `0` when the denominator is not positive.
#[must_use]
pub const fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    if denominator <= 0 || numerator <= 0 {
        return 0;
    }
    (numerator + denominator - 1) / denominator
}
