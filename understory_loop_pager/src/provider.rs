// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page provider trait and the adapter that serves it over extended indices.

use alloc::string::String;

use understory_loop_index::{ExtendedIndex, LoopError, PageCount, RealIndex};

/// A finite source of pages supplied by the host.
///
/// The provider only ever sees real indices in `0..count()`. The count must stay stable
/// while the provider is bound; changing it requires rebinding.
pub trait PageProvider {
    /// Opaque handle for a page body, owned by the provider.
    type Handle;

    /// Number of pages. Must be positive to bind.
    fn count(&self) -> usize;

    /// Title shown on the page's tab, or `None` if the index is unknown to the provider.
    fn title_at(&self, index: RealIndex) -> Option<String>;

    /// Content handle for a page, or `None` if the index is unknown to the provider.
    fn content_at(&self, index: RealIndex) -> Option<Self::Handle>;
}

/// Serves a [`PageProvider`] over the extended index space.
///
/// Any extended index is reduced to a real index before the provider is consulted, so
/// this layer never reports an out-of-range error on its own. It does report
/// [`LoopError::IndexOutOfRange`] when the provider fails to produce a page it declared
/// through [`PageProvider::count`].
#[derive(Clone, Debug)]
pub struct LoopAdapter<P> {
    provider: P,
    count: PageCount,
}

impl<P: PageProvider> LoopAdapter<P> {
    /// Wraps `provider`, snapshotting its page count.
    ///
    /// Fails with [`LoopError::InvalidArgument`] if the provider has no pages.
    pub fn new(provider: P) -> Result<Self, LoopError> {
        let count = PageCount::new(provider.count())?;
        Ok(Self { provider, count })
    }

    /// The page count captured at construction.
    #[must_use]
    pub fn count(&self) -> PageCount {
        self.count
    }

    /// Returns `true` if the provider now reports a different count than was bound.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.provider.count() != self.count.get()
    }

    /// Shared access to the wrapped provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Unwraps the adapter, returning the provider.
    pub fn into_provider(self) -> P {
        self.provider
    }

    /// Real index served for `extended`.
    #[must_use]
    pub fn real_of(&self, extended: ExtendedIndex) -> RealIndex {
        self.count.real_of(extended)
    }

    /// Page content for an extended index.
    pub fn page_at(&self, extended: ExtendedIndex) -> Result<P::Handle, LoopError> {
        self.content_at_real(self.real_of(extended))
    }

    /// Page title for an extended index.
    pub fn title_at(&self, extended: ExtendedIndex) -> Result<String, LoopError> {
        self.title_at_real(self.real_of(extended))
    }

    /// Page content for a directly supplied real index.
    pub fn content_at_real(&self, index: RealIndex) -> Result<P::Handle, LoopError> {
        let index = self.count.checked_real(index)?;
        self.provider
            .content_at(index)
            .ok_or_else(|| self.missing(index))
    }

    /// Page title for a directly supplied real index.
    pub fn title_at_real(&self, index: RealIndex) -> Result<String, LoopError> {
        let index = self.count.checked_real(index)?;
        self.provider
            .title_at(index)
            .ok_or_else(|| self.missing(index))
    }

    fn missing(&self, index: RealIndex) -> LoopError {
        tracing::warn!(
            index,
            count = self.count.get(),
            "page provider returned no page for a declared index"
        );
        LoopError::IndexOutOfRange {
            index,
            count: self.count.get(),
        }
    }
}
