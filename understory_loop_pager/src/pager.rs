// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The looping pager surface: drag, settle, jump, and re-anchor.

use alloc::boxed::Box;
use core::ops::RangeInclusive;
use core::time::Duration;

use kurbo::Point;
use smallvec::SmallVec;
use understory_loop_index::px::floor_to_i64;
use understory_loop_index::{ExtendedIndex, PageCount, RealIndex};

use crate::gesture::{DEFAULT_TOUCH_SLOP, GestureState, MoveResult, PointerId};
use crate::{
    ListenerId, Listeners, LoopAdapter, PageChangeListener, PageProvider, PagerError, PagerEvent,
    ScrollPhase,
};

/// When the pager folds its extended coordinate back toward the origin.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReanchorPolicy {
    /// Re-anchor on every settle completion, so the resting coordinate is always a real index.
    EverySettle,
    /// Re-anchor only when the resting coordinate is more than `pages` away from the origin.
    Beyond {
        /// Allowed distance from the origin, in pages.
        pages: u64,
    },
}

/// Tunables for a [`PagerSurface`].
#[derive(Clone, Debug)]
pub struct PagerConfig {
    /// Distance in pixels a press must travel before it drags the pager.
    pub touch_slop: f64,
    /// Fraction of a page that must be crossed on release to advance to the next page.
    pub snap_threshold: f64,
    /// Settle smoothing in `[0, 1)`; higher values settle more slowly.
    pub settle_smoothing: f64,
    /// Remaining distance in pixels below which a settle snaps to its target.
    pub settle_epsilon_px: f64,
    /// Pages kept materialized on each side of the current page.
    pub beyond_viewport_pages: usize,
    /// Re-anchoring policy.
    pub reanchor: ReanchorPolicy,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            touch_slop: DEFAULT_TOUCH_SLOP,
            snap_threshold: 0.5,
            settle_smoothing: 0.12,
            settle_epsilon_px: 0.5,
            beyond_viewport_pages: 1,
            reanchor: ReanchorPolicy::EverySettle,
        }
    }
}

/// Snapshot of the pager's scroll state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PagerState {
    /// Extended index of the page at the leading edge of the viewport.
    pub current: ExtendedIndex,
    /// Fraction of `current` scrolled past, in `[0, 1)`.
    pub offset: f64,
    /// Scroll phase.
    pub phase: ScrollPhase,
}

/// A page the host should keep alive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterializedPage<H> {
    /// Extended index the page occupies.
    pub extended: ExtendedIndex,
    /// Real index it shows.
    pub real: RealIndex,
    /// Content handle from the provider.
    pub handle: H,
}

/// A horizontally scrolling, single-active-page pager over a looping page sequence.
///
/// The pager scrolls over the extended index space: scrolling forward from the last page
/// reaches extended index `N`, which shows real page `0`. Its position is continuous,
/// measured in pages; the raw pixel offset is that position times the page width.
///
/// Hosts drive it with pointer input ([`pointer_down`](Self::pointer_down) and friends),
/// per-frame [`advance`](Self::advance) calls while settling, and programmatic jumps via
/// [`set_current_item`](Self::set_current_item). Every change is reported to the
/// registered [`PageChangeListener`]s before the call returns.
///
/// When a settle completes the pager may silently re-anchor: it subtracts a multiple of
/// `N` from its position so the coordinate stays near zero. The real page is unchanged
/// and the pixel offset moves by exactly the same amount, so nothing visible changes.
#[derive(Debug)]
pub struct PagerSurface<P> {
    config: PagerConfig,
    adapter: Option<LoopAdapter<P>>,
    page_width: f64,
    // Continuous extended position, in pages.
    position: f64,
    // The current item: where the pager rests or is settling toward.
    selected: ExtendedIndex,
    phase: ScrollPhase,
    settle_target: Option<ExtendedIndex>,
    gesture: GestureState<()>,
    listeners: Listeners,
}

impl<P: PageProvider> PagerSurface<P> {
    /// Creates an unbound pager.
    #[must_use]
    pub fn new(config: PagerConfig) -> Self {
        let gesture = GestureState::with_thresholds(config.touch_slop, None);
        Self {
            config,
            adapter: None,
            page_width: 0.0,
            position: 0.0,
            selected: 0,
            phase: ScrollPhase::Idle,
            settle_target: None,
            gesture,
            listeners: Listeners::new(),
        }
    }

    /// Binds a page provider, replacing any previous one.
    ///
    /// The pager resets to real page `0`. Fails with
    /// [`LoopError::InvalidArgument`](understory_loop_index::LoopError::InvalidArgument)
    /// if the provider has no pages; the pager is then left unbound.
    pub fn bind(&mut self, provider: P) -> Result<(), PagerError> {
        self.reset();
        self.adapter = None;
        let adapter = LoopAdapter::new(provider)?;
        tracing::debug!(count = adapter.count().get(), "pager bound");
        self.adapter = Some(adapter);
        self.emit(PagerEvent::Selected(0));
        self.emit_scrolled();
        Ok(())
    }

    /// Unbinds the provider, resetting all scroll state. Listeners stay registered.
    ///
    /// An in-flight drag or settle is ended with [`ScrollPhase::Idle`], then listeners
    /// receive [`PagerEvent::Detached`].
    pub fn detach(&mut self) -> Option<P> {
        if self.adapter.is_none() {
            return None;
        }
        self.gesture.clear();
        self.settle_target = None;
        self.set_phase(ScrollPhase::Idle);
        self.emit(PagerEvent::Detached);
        let adapter = self.adapter.take()?;
        self.reset();
        tracing::debug!("pager detached");
        Some(adapter.into_provider())
    }

    /// The bound adapter, if any.
    #[must_use]
    pub fn adapter(&self) -> Option<&LoopAdapter<P>> {
        self.adapter.as_ref()
    }

    /// Page count of the bound provider, if any.
    #[must_use]
    pub fn page_count(&self) -> Option<PageCount> {
        self.adapter.as_ref().map(LoopAdapter::count)
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Subscribes a listener to page-change events.
    pub fn add_listener(&mut self, listener: Box<dyn PageChangeListener>) -> ListenerId {
        self.listeners.add(listener)
    }

    /// Unsubscribes a listener.
    pub fn remove_listener(&mut self, id: ListenerId) -> Option<Box<dyn PageChangeListener>> {
        self.listeners.remove(id)
    }

    /// Number of subscribed listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Sets the width of one page in pixels. The page position is preserved.
    pub fn set_page_width(&mut self, width: f64) {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        if width != self.page_width {
            self.page_width = width;
            self.emit_scrolled();
        }
    }

    /// Width of one page in pixels.
    #[must_use]
    pub fn page_width(&self) -> f64 {
        self.page_width
    }

    /// Raw scroll offset in pixels.
    #[must_use]
    pub fn scroll_px(&self) -> f64 {
        self.position * self.page_width
    }

    /// Current scroll state.
    #[must_use]
    pub fn state(&self) -> PagerState {
        let (current, offset) = self.split_position();
        PagerState {
            current,
            offset,
            phase: self.phase,
        }
    }

    /// Current scroll phase.
    #[must_use]
    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    /// Real index of the current item, or `0` when unbound.
    #[must_use]
    pub fn current_item(&self) -> RealIndex {
        self.page_count()
            .map_or(0, |count| count.real_of(self.selected))
    }

    /// Extended index of the current item.
    #[must_use]
    pub fn current_extended(&self) -> ExtendedIndex {
        self.selected
    }

    /// Moves to real page `real`, taking the shorter way around the loop.
    ///
    /// With `animate` the pager settles toward the page over subsequent
    /// [`advance`](Self::advance) calls; otherwise it snaps immediately. Any drag or settle
    /// in progress is cancelled; the latest request wins.
    pub fn set_current_item(&mut self, real: RealIndex, animate: bool) -> Result<(), PagerError> {
        let count = self.page_count().ok_or(PagerError::Unbound)?;
        let real = count.checked_real(real)?;
        let target = count.nearest_extended(self.selected, real);
        tracing::debug!(
            real,
            target,
            delta = count.shortest_delta(self.selected, real),
            animate,
            "pager jump"
        );

        if self.gesture.is_pressed() {
            self.gesture.clear();
        }
        self.select(count, target);
        self.settle_target = Some(target);

        if !animate || self.page_width <= 0.0 || self.position == target as f64 {
            self.finish_settle();
        } else {
            self.set_phase(ScrollPhase::Settling);
        }
        Ok(())
    }

    /// Pointer pressed on the pager.
    ///
    /// A press during a settle catches the pages: the settle stops and the press drags
    /// immediately. Additional pointers are ignored while one is down.
    pub fn pointer_down(&mut self, pointer: Option<PointerId>, position: Point, timestamp: u64) {
        if self.adapter.is_none() || self.gesture.is_pressed() {
            return;
        }
        self.gesture.on_down(pointer, (), position, timestamp);
        if self.phase == ScrollPhase::Settling {
            self.settle_target = None;
            self.gesture.begin_drag(pointer);
            self.set_phase(ScrollPhase::Dragging);
        }
    }

    /// Pointer moved.
    pub fn pointer_move(&mut self, pointer: Option<PointerId>, position: Point) {
        let delta = match self.gesture.on_move(pointer, position) {
            MoveResult::Untracked | MoveResult::Pending => return,
            MoveResult::DragStarted { delta } => {
                self.set_phase(ScrollPhase::Dragging);
                delta
            }
            MoveResult::Dragged { delta } => delta,
        };
        if self.page_width <= 0.0 || delta.x == 0.0 {
            return;
        }
        // Content follows the finger: moving right reveals earlier pages.
        self.position -= delta.x / self.page_width;
        self.emit_scrolled();
    }

    /// Pointer released. A drag settles on the nearest page past the snap threshold.
    pub fn pointer_up(&mut self, pointer: Option<PointerId>, position: Point, timestamp: u64) {
        if self.gesture.press(pointer).is_none() {
            return;
        }
        self.pointer_move(pointer, position);
        let _ = self.gesture.on_up(pointer, &(), timestamp);
        if self.phase == ScrollPhase::Dragging {
            self.release_drag();
        }
    }

    /// Pointer cancelled by the host. A drag settles as if released in place.
    pub fn pointer_cancel(&mut self, pointer: Option<PointerId>) {
        if self.gesture.cancel(pointer) && self.phase == ScrollPhase::Dragging {
            self.release_drag();
        }
    }

    /// Advances an in-flight settle by one frame of `frame_time`.
    ///
    /// Does nothing unless the pager is settling.
    pub fn advance(&mut self, frame_time: Duration) {
        if self.phase != ScrollPhase::Settling {
            return;
        }
        let Some(target) = self.settle_target else {
            self.set_phase(ScrollPhase::Idle);
            return;
        };

        let diff = target as f64 - self.position;
        let remaining_px = diff.abs() * self.page_width;
        if remaining_px < self.config.settle_epsilon_px || self.page_width <= 0.0 {
            self.finish_settle();
            return;
        }

        let smoothing = self.config.settle_smoothing.clamp(0.0, 1.0);
        let factor = ((1.0 - smoothing) * frame_time.as_secs_f64() * 60.0).min(1.0);
        self.position += diff * factor;
        if factor >= 1.0 {
            self.finish_settle();
        } else {
            self.emit_scrolled();
        }
    }

    /// Folds the extended coordinate back into `0..N` without visible movement.
    ///
    /// Returns the number of pages subtracted, which is always a multiple of `N`. Only
    /// legal while idle; fails with [`PagerError::NotIdle`] otherwise.
    pub fn reanchor(&mut self) -> Result<ExtendedIndex, PagerError> {
        let count = self.page_count().ok_or(PagerError::Unbound)?;
        if self.phase != ScrollPhase::Idle {
            return Err(PagerError::NotIdle);
        }
        let shift = count.anchor_shift(self.selected);
        if shift != 0 {
            self.selected -= shift;
            self.position -= shift as f64;
            tracing::debug!(
                shift,
                position = self.selected,
                pixel_shift = shift as f64 * self.page_width,
                "pager re-anchored"
            );
            self.emit_scrolled();
        }
        Ok(shift)
    }

    /// Extended indices the host should keep materialized.
    ///
    /// Covers [`PagerConfig::beyond_viewport_pages`] on either side of the leading page,
    /// plus the incoming page while partially scrolled.
    #[must_use]
    pub fn materialized_range(&self) -> RangeInclusive<ExtendedIndex> {
        let (current, offset) = self.split_position();
        let beyond = i64::try_from(self.config.beyond_viewport_pages).unwrap_or(i64::MAX);
        let incoming = i64::from(offset > 0.0);
        current.saturating_sub(beyond)..=current.saturating_add(beyond + incoming)
    }

    /// Pages the host should keep materialized, with their content handles.
    pub fn materialized_pages(
        &self,
    ) -> Result<SmallVec<[MaterializedPage<P::Handle>; 4]>, PagerError> {
        let adapter = self.adapter.as_ref().ok_or(PagerError::Unbound)?;
        self.materialized_range()
            .map(|extended| -> Result<_, PagerError> {
                Ok(MaterializedPage {
                    extended,
                    real: adapter.real_of(extended),
                    handle: adapter.page_at(extended)?,
                })
            })
            .collect()
    }

    fn release_drag(&mut self) {
        let Some(count) = self.page_count() else {
            return;
        };
        let (current, offset) = self.split_position();
        let target = if offset >= self.config.snap_threshold {
            current + 1
        } else {
            current
        };
        self.select(count, target);
        self.settle_target = Some(target);
        if self.position == target as f64 {
            self.finish_settle();
        } else {
            self.set_phase(ScrollPhase::Settling);
        }
    }

    fn select(&mut self, count: PageCount, target: ExtendedIndex) {
        let previous = count.real_of(self.selected);
        self.selected = target;
        let real = count.real_of(target);
        if real != previous {
            self.emit(PagerEvent::Selected(real));
        }
    }

    fn finish_settle(&mut self) {
        let target = self.settle_target.take().unwrap_or(self.selected);
        self.position = target as f64;
        tracing::debug!(position = target, "pager settled");
        self.emit_scrolled();
        self.set_phase(ScrollPhase::Idle);

        let Some(count) = self.page_count() else {
            return;
        };
        let due = match self.config.reanchor {
            ReanchorPolicy::EverySettle => true,
            ReanchorPolicy::Beyond { pages } => self.selected.unsigned_abs() > pages,
        };
        if due && count.anchor_shift(self.selected) != 0 {
            // Idle was just entered, so this cannot fail.
            let _ = self.reanchor();
        }
    }

    fn set_phase(&mut self, phase: ScrollPhase) {
        if self.phase != phase {
            self.phase = phase;
            self.emit(PagerEvent::StateChanged(phase));
        }
    }

    fn split_position(&self) -> (ExtendedIndex, f64) {
        let current = floor_to_i64(self.position);
        let offset = self.position - current as f64;
        if offset >= 1.0 {
            (current + 1, 0.0)
        } else {
            (current, offset.max(0.0))
        }
    }

    fn emit_scrolled(&mut self) {
        if self.adapter.is_none() {
            return;
        }
        let (position, position_offset) = self.split_position();
        self.emit(PagerEvent::Scrolled {
            position,
            position_offset,
            pixel_offset: position_offset * self.page_width,
        });
    }

    fn emit(&mut self, event: PagerEvent) {
        self.listeners.dispatch(&event);
    }

    fn reset(&mut self) {
        self.position = 0.0;
        self.selected = 0;
        self.settle_target = None;
        self.gesture.clear();
        self.phase = ScrollPhase::Idle;
    }
}
