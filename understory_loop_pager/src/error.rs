// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_loop_index::LoopError;

/// Error returned by [`PagerSurface`](crate::PagerSurface) operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PagerError {
    /// Index algebra rejected the request (empty provider or out-of-range real index).
    #[error(transparent)]
    Loop(#[from] LoopError),
    /// No page provider is bound.
    #[error("pager has no bound page provider")]
    Unbound,
    /// The operation is only legal while the pager is idle.
    #[error("operation requires an idle pager")]
    NotIdle,
    /// The listener subscription belongs to a different pager.
    #[error("listener is subscribed to a different pager")]
    BoundElsewhere,
}
