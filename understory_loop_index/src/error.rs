// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised by the index algebra.

/// Error raised when an index operation is given invalid input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoopError {
    /// The page count was zero (or too large to address with an extended index).
    #[error("page count must be positive and addressable, got {count}")]
    InvalidArgument {
        /// The rejected page count.
        count: usize,
    },
    /// A real index was supplied directly that is not in `0..count`.
    ///
    /// Extended indices never produce this; it means a caller bypassed the mapper.
    #[error("real index {index} is out of range for {count} pages")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// The page count it was checked against.
        count: usize,
    },
}
