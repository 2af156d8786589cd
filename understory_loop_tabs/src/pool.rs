// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fixed pool of tab views laid out left to right.

use alloc::string::String;
use alloc::vec::Vec;

use understory_loop_index::px::{ceil_div, floor_to_i64};
use understory_loop_index::{LEADING_SLOTS, LoopError, PageCount, RealIndex};
use understory_loop_pager::{LoopAdapter, PageProvider};

/// Number of tabs that fit across the viewport.
pub const VISIBLE_TABS: i64 = 3;

/// One tab in the pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabView {
    /// Position in the pool, `0..N + 3`.
    pub slot: usize,
    /// Real page this tab selects.
    pub real: RealIndex,
    /// Page title shown on the tab.
    pub title: String,
    /// Width in pixels.
    pub width: i64,
}

/// `N + 3` tab views for a page count `N`.
///
/// Slot `s` is bound to real page `real_of(s - 1)`: slot `0` is the leading buffer showing
/// the last page, slots `N + 1` and `N + 2` repeat the first two pages. All tabs share one
/// width, so slot `s` starts at `s * tab_width`.
#[derive(Clone, Debug)]
pub struct TabPool {
    count: PageCount,
    tab_width: i64,
    views: Vec<TabView>,
}

impl TabPool {
    /// Builds the pool from an adapter's titles.
    pub fn build<P: PageProvider>(
        adapter: &LoopAdapter<P>,
        tab_width: i64,
    ) -> Result<Self, LoopError> {
        let count = adapter.count();
        let tab_width = tab_width.max(0);
        let views = (0..count.pool_len())
            .map(|slot| -> Result<TabView, LoopError> {
                let real = count.slot_to_real(slot);
                Ok(TabView {
                    slot,
                    real,
                    title: adapter.title_at_real(real)?,
                    width: tab_width,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(
            count = count.get(),
            slots = views.len(),
            leading = LEADING_SLOTS,
            "tab pool built"
        );
        Ok(Self {
            count,
            tab_width,
            views,
        })
    }

    /// Page count the pool was built for.
    #[must_use]
    pub fn count(&self) -> PageCount {
        self.count
    }

    /// Number of tab views; always `N + 3`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Always `false`; a pool has at least four slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// All tab views in slot order.
    #[must_use]
    pub fn views(&self) -> &[TabView] {
        &self.views
    }

    /// The tab view in `slot`, if it exists.
    #[must_use]
    pub fn view(&self, slot: usize) -> Option<&TabView> {
        self.views.get(slot)
    }

    /// Width shared by every tab.
    #[must_use]
    pub fn tab_width(&self) -> i64 {
        self.tab_width
    }

    /// Applies the width policy for a viewport: each tab is a third of it, rounded up.
    pub fn fit_viewport(&mut self, viewport_width: i64) {
        let width = tab_width_for(viewport_width);
        self.tab_width = width;
        for view in &mut self.views {
            view.width = width;
        }
    }

    /// Left edge of `slot` in content coordinates.
    #[must_use]
    pub fn tab_left(&self, slot: usize) -> i64 {
        i64::try_from(slot)
            .unwrap_or(i64::MAX)
            .saturating_mul(self.tab_width)
    }

    /// Total width of the laid out pool.
    #[must_use]
    pub fn content_width(&self) -> i64 {
        self.tab_left(self.views.len())
    }

    /// Slot under a content-space x coordinate.
    #[must_use]
    pub fn slot_at(&self, content_x: f64) -> Option<usize> {
        if self.tab_width <= 0 || content_x < 0.0 {
            return None;
        }
        let slot = floor_to_i64(content_x / self.tab_width as f64);
        usize::try_from(slot)
            .ok()
            .filter(|slot| *slot < self.views.len())
    }
}

/// Tab width for a viewport: `ceil(viewport_width / 3)`.
#[must_use]
pub fn tab_width_for(viewport_width: i64) -> i64 {
    ceil_div(viewport_width, VISIBLE_TABS)
}
