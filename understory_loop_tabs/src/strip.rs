// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tab strip controller and the listener that keeps it in step with a pager.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use kurbo::{Point, Rect};
use understory_loop_index::px::round_to_i64;
use understory_loop_index::{ExtendedIndex, PageCount, RealIndex};
use understory_loop_pager::gesture::{DEFAULT_TOUCH_SLOP, GestureState, PointerId, TapResult};
use understory_loop_pager::{
    ListenerId, Listeners, PageChangeListener, PageProvider, PagerError, PagerEvent,
    PagerSurface, ScrollPhase,
};

use crate::lifecycle::{Alignment, HostEvent, Lifecycle};
use crate::paint::{Color, StripCanvas, paint_strip};
use crate::pool::{TabPool, TabView, tab_width_for};

/// Tunables for a [`TabStrip`].
#[derive(Clone, Debug)]
pub struct TabStripConfig {
    /// Color of the center indicator band.
    pub indicator_color: Color,
    /// Render labels in upper case.
    pub all_caps: bool,
    /// Horizontal padding inside each tab, in pixels.
    pub label_padding: f64,
    /// Distance a press may travel and still count as a tap.
    pub tap_slop: f64,
    /// Longest press (milliseconds) still recognized as a tap.
    pub tap_timeout: Option<u64>,
}

impl Default for TabStripConfig {
    fn default() -> Self {
        Self {
            indicator_color: Color::INDICATOR,
            all_caps: true,
            label_padding: 16.0,
            tap_slop: DEFAULT_TOUCH_SLOP,
            tap_timeout: Some(500),
        }
    }
}

/// State shared between a [`TabStrip`] and the mirror it registers on its pager.
#[derive(Debug)]
pub(crate) struct StripState {
    pub(crate) config: TabStripConfig,
    pub(crate) pool: Option<TabPool>,
    pub(crate) viewport_width: i64,
    pub(crate) viewport_height: i64,
    pub(crate) scroll_x: i64,
    center_slot: Option<usize>,
    current_real: RealIndex,
    pager_phase: ScrollPhase,
    last_scroll: (ExtendedIndex, f64),
    needs_redraw: bool,
    // Bumped on every bind and unbind; mirrors from older bindings ignore events.
    generation: u64,
}

impl StripState {
    fn new(config: TabStripConfig) -> Self {
        Self {
            config,
            pool: None,
            viewport_width: 0,
            viewport_height: 0,
            scroll_x: 0,
            center_slot: None,
            current_real: 0,
            pager_phase: ScrollPhase::Idle,
            last_scroll: (0, 0.0),
            needs_redraw: false,
            generation: 0,
        }
    }

    fn mirror(&mut self, event: &PagerEvent) {
        match *event {
            PagerEvent::Scrolled {
                position,
                position_offset,
                ..
            } => self.apply_scroll(position, position_offset),
            PagerEvent::Selected(real) => self.current_real = real,
            PagerEvent::StateChanged(phase) => self.pager_phase = phase,
            PagerEvent::Detached => {
                tracing::debug!("tab strip cleared by pager detach");
                self.clear();
            }
        }
    }

    fn clear(&mut self) {
        self.pool = None;
        self.scroll_x = 0;
        self.center_slot = None;
        self.current_real = 0;
        self.pager_phase = ScrollPhase::Idle;
        self.last_scroll = (0, 0.0);
        self.needs_redraw = true;
    }

    /// Center slot and unclamped scroll target for a reported pager position.
    fn target_for(&self, position: ExtendedIndex, offset: f64) -> Option<(usize, i64)> {
        let pool = self.pool.as_ref()?;
        let anchor = window_anchor(pool.count(), position, offset);
        let center_slot = usize::try_from(anchor + 1).ok()?;
        let tab_width = pool.tab_width();
        let target = pool.tab_left(center_slot) + round_to_i64(tab_width as f64 * offset)
            - (self.viewport_width - tab_width) / 2;
        Some((center_slot, target))
    }

    fn apply_scroll(&mut self, position: ExtendedIndex, offset: f64) {
        self.last_scroll = (position, offset);
        let Some((center_slot, target)) = self.target_for(position, offset) else {
            return;
        };
        let max_scroll = self
            .pool
            .as_ref()
            .map_or(0, |pool| (pool.content_width() - self.viewport_width).max(0));
        let scroll_x = target.clamp(0, max_scroll);
        if scroll_x != self.scroll_x || self.center_slot != Some(center_slot) {
            self.needs_redraw = true;
        }
        self.scroll_x = scroll_x;
        self.center_slot = Some(center_slot);
        tracing::trace!(position, offset, center_slot, scroll_x, "tab strip mirrored scroll");
    }

    fn align_current(&mut self) {
        // Real indices are far below i64::MAX.
        let real = ExtendedIndex::try_from(self.current_real).unwrap_or(0);
        self.apply_scroll(real, 0.0);
    }

    fn reapply(&mut self) {
        let (position, offset) = self.last_scroll;
        self.apply_scroll(position, offset);
    }

    pub(crate) fn indicator_band(&self) -> Option<Rect> {
        let tab_width = self.pool.as_ref()?.tab_width();
        if tab_width <= 0 {
            return None;
        }
        let left = (self.viewport_width - tab_width) / 2 + self.scroll_x;
        Some(Rect::new(
            left as f64,
            0.0,
            (left + tab_width) as f64,
            self.viewport_height as f64,
        ))
    }
}

/// Picks the extended index whose three-tab window (plus the incoming tab while
/// `offset > 0`) lies inside the `N + 3` pool.
///
/// Positions that already fit are kept as reported; anything else is reduced to its
/// real index, which always fits.
fn window_anchor(count: PageCount, position: ExtendedIndex, offset: f64) -> ExtendedIndex {
    let incoming = i64::from(offset > 0.0);
    if position >= 0 && position + incoming <= count.stride() {
        position
    } else {
        // Real indices are below N, which fits in i64.
        ExtendedIndex::try_from(count.real_of(position)).unwrap_or(0)
    }
}

struct StripMirror {
    state: Rc<RefCell<StripState>>,
    forward: Rc<RefCell<Listeners>>,
    generation: u64,
}

impl PageChangeListener for StripMirror {
    fn handle(&mut self, event: &PagerEvent) {
        {
            let mut state = self.state.borrow_mut();
            if state.generation != self.generation {
                return;
            }
            state.mirror(event);
        }
        self.forward.borrow_mut().dispatch(event);
    }
}

/// A headless tab strip that mirrors a [`PagerSurface`].
///
/// Binding builds a pool of `N + 3` tabs (see [`TabPool`]) and subscribes the strip to
/// the pager. From then on every pager event is applied to the strip before the pager
/// call that produced it returns, keeping the tab for the current page centered under
/// the indicator band. After mirroring, the event is forwarded to listeners added with
/// [`add_scroll_listener`](Self::add_scroll_listener).
///
/// The strip never scrolls on its own. Taps select pages by calling
/// [`PagerSurface::set_current_item`] with animation, and are ignored while the pager is
/// being dragged.
#[derive(Debug)]
pub struct TabStrip {
    state: Rc<RefCell<StripState>>,
    forward: Rc<RefCell<Listeners>>,
    subscription: Option<ListenerId>,
    taps: GestureState<usize>,
    lifecycle: Lifecycle,
}

impl TabStrip {
    /// Creates an unbound strip with a zero-size viewport.
    #[must_use]
    pub fn new(config: TabStripConfig) -> Self {
        let taps = GestureState::with_thresholds(config.tap_slop, config.tap_timeout);
        Self {
            state: Rc::new(RefCell::new(StripState::new(config))),
            forward: Rc::new(RefCell::new(Listeners::new())),
            subscription: None,
            taps,
            lifecycle: Lifecycle::default(),
        }
    }

    /// Binds the strip to `pager`, rebuilding the tab pool from its provider.
    ///
    /// Call again with the same pager after its provider changes. To move the strip to a
    /// different pager, [`unbind_from_pager`](Self::unbind_from_pager) the old one first;
    /// otherwise this fails with [`PagerError::BoundElsewhere`] and the existing binding
    /// is kept. Fails with [`PagerError::Unbound`] if the pager has no provider; the strip
    /// is then left unbound.
    pub fn bind_to_pager<P: PageProvider>(
        &mut self,
        pager: &mut PagerSurface<P>,
    ) -> Result<(), PagerError> {
        self.unbind_from_pager(pager)?;
        let adapter = pager.adapter().ok_or(PagerError::Unbound)?;

        let generation = {
            let mut state = self.state.borrow_mut();
            let pool = TabPool::build(adapter, tab_width_for(state.viewport_width))?;
            tracing::debug!(
                count = pool.count().get(),
                slots = pool.len(),
                "tab strip bound"
            );
            state.pool = Some(pool);
            state.current_real = pager.current_item();
            state.pager_phase = pager.phase();
            let scroll = pager.state();
            state.apply_scroll(scroll.current, scroll.offset);
            state.needs_redraw = true;
            state.generation
        };

        let mirror = StripMirror {
            state: self.state.clone(),
            forward: self.forward.clone(),
            generation,
        };
        self.subscription = Some(pager.add_listener(Box::new(mirror)));
        Ok(())
    }

    /// Stops mirroring and drops the tab pool. Does nothing to an unbound strip.
    ///
    /// Fails with [`PagerError::BoundElsewhere`] if `pager` is not the pager the strip is
    /// bound to; the binding is then left in place.
    pub fn unbind_from_pager<P: PageProvider>(
        &mut self,
        pager: &mut PagerSurface<P>,
    ) -> Result<(), PagerError> {
        let Some(id) = self.subscription else {
            return Ok(());
        };
        if pager.remove_listener(id).is_none() {
            return Err(PagerError::BoundElsewhere);
        }
        self.subscription = None;
        self.taps.clear();
        let mut state = self.state.borrow_mut();
        state.generation += 1;
        state.clear();
        tracing::debug!("tab strip unbound");
        Ok(())
    }

    /// Returns `true` while the strip is bound to a pager.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.subscription.is_some()
    }

    /// Changes the indicator band color, requesting a redraw if it differs.
    pub fn set_indicator_color(&mut self, color: Color) {
        let mut state = self.state.borrow_mut();
        if state.config.indicator_color != color {
            state.config.indicator_color = color;
            state.needs_redraw = true;
        }
    }

    /// Current indicator band color.
    #[must_use]
    pub fn indicator_color(&self) -> Color {
        self.state.borrow().config.indicator_color
    }

    /// Subscribes a listener to pager events, delivered after the strip has mirrored them.
    pub fn add_scroll_listener(&mut self, listener: Box<dyn PageChangeListener>) -> ListenerId {
        self.forward.borrow_mut().add(listener)
    }

    /// Unsubscribes a forwarded listener.
    pub fn remove_scroll_listener(
        &mut self,
        id: ListenerId,
    ) -> Option<Box<dyn PageChangeListener>> {
        self.forward.borrow_mut().remove(id)
    }

    /// Sets the viewport size, refitting the tabs and re-applying the last position.
    pub fn set_viewport(&mut self, width: i64, height: i64) {
        let mut state = self.state.borrow_mut();
        let (width, height) = (width.max(0), height.max(0));
        if (width, height) == (state.viewport_width, state.viewport_height) {
            return;
        }
        state.viewport_width = width;
        state.viewport_height = height;
        if let Some(pool) = state.pool.as_mut() {
            pool.fit_viewport(width);
        }
        state.needs_redraw = true;
        state.reapply();
    }

    /// Feeds a host lifecycle signal.
    pub fn handle_host_event(&mut self, event: HostEvent) {
        if let HostEvent::Resized { width, height } = event {
            self.set_viewport(width, height);
        }
        let mut state = self.state.borrow_mut();
        match self.lifecycle.on_event(event) {
            Alignment::None => {}
            Alignment::Current => {
                tracing::debug!(real = state.current_real, ?event, "tab strip aligned");
                state.align_current();
            }
            Alignment::Reapply => state.reapply(),
        }
    }

    /// Returns `true` between [`HostEvent::Attached`] and [`HostEvent::Detached`].
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.lifecycle.attached
    }

    /// Selects the page under pool `slot`.
    ///
    /// Returns the real index requested, or `None` if the tap was ignored: the strip is
    /// unbound, the slot does not exist, or the pager is being dragged.
    pub fn tap_slot<P: PageProvider>(
        &mut self,
        slot: usize,
        pager: &mut PagerSurface<P>,
    ) -> Option<RealIndex> {
        let real = {
            let state = self.state.borrow();
            if state.pager_phase == ScrollPhase::Dragging {
                tracing::trace!(slot, "tab tap ignored during drag");
                return None;
            }
            state.pool.as_ref()?.view(slot)?.real
        };
        match pager.set_current_item(real, true) {
            Ok(()) => Some(real),
            Err(err) => {
                tracing::warn!(slot, real, %err, "tab tap could not select page");
                None
            }
        }
    }

    /// Selects the page under viewport x coordinate `x`.
    pub fn tap_at<P: PageProvider>(
        &mut self,
        x: f64,
        pager: &mut PagerSurface<P>,
    ) -> Option<RealIndex> {
        let slot = self.slot_at(x)?;
        self.tap_slot(slot, pager)
    }

    /// Pool slot under viewport x coordinate `x`.
    #[must_use]
    pub fn slot_at(&self, x: f64) -> Option<usize> {
        let state = self.state.borrow();
        state.pool.as_ref()?.slot_at(x + state.scroll_x as f64)
    }

    /// Pointer pressed on the strip, in viewport coordinates.
    pub fn pointer_down(&mut self, pointer: Option<PointerId>, position: Point, timestamp: u64) {
        if let Some(slot) = self.slot_at(position.x) {
            self.taps.on_down(pointer, slot, position, timestamp);
        }
    }

    /// Pointer moved over the strip. Travel past the tap slop cancels the tap.
    pub fn pointer_move(&mut self, pointer: Option<PointerId>, position: Point) {
        let _ = self.taps.on_move(pointer, position);
    }

    /// Pointer released. A tap selects the page under it, as [`tap_slot`](Self::tap_slot).
    pub fn pointer_up<P: PageProvider>(
        &mut self,
        pointer: Option<PointerId>,
        position: Point,
        timestamp: u64,
        pager: &mut PagerSurface<P>,
    ) -> Option<RealIndex> {
        let Some(slot) = self.slot_at(position.x) else {
            self.taps.cancel(pointer);
            return None;
        };
        match self.taps.on_up(pointer, &slot, timestamp) {
            TapResult::Tap(slot) => self.tap_slot(slot, pager),
            TapResult::Suppressed(_) => None,
        }
    }

    /// Pointer cancelled by the host.
    pub fn pointer_cancel(&mut self, pointer: Option<PointerId>) {
        self.taps.cancel(pointer);
    }

    /// Horizontal scroll offset of the strip content.
    #[must_use]
    pub fn scroll_x(&self) -> i64 {
        self.state.borrow().scroll_x
    }

    /// Scroll target for a pager position, before clamping to the content.
    ///
    /// `None` while unbound.
    #[must_use]
    pub fn target_scroll_x(&self, position: ExtendedIndex, offset: f64) -> Option<i64> {
        self.state
            .borrow()
            .target_for(position, offset)
            .map(|(_, target)| target)
    }

    /// Pool slot currently centered under the indicator.
    #[must_use]
    pub fn center_slot(&self) -> Option<usize> {
        self.state.borrow().center_slot
    }

    /// Real index of the pager's current item, as last mirrored.
    #[must_use]
    pub fn current_item(&self) -> RealIndex {
        self.state.borrow().current_real
    }

    /// Width of one tab, or `0` while unbound.
    #[must_use]
    pub fn tab_width(&self) -> i64 {
        self.state
            .borrow()
            .pool
            .as_ref()
            .map_or(0, TabPool::tab_width)
    }

    /// Number of tabs in the pool, or `0` while unbound.
    #[must_use]
    pub fn pool_len(&self) -> usize {
        self.state.borrow().pool.as_ref().map_or(0, TabPool::len)
    }

    /// A copy of the tab in `slot`.
    #[must_use]
    pub fn tab(&self, slot: usize) -> Option<TabView> {
        self.state.borrow().pool.as_ref()?.view(slot).cloned()
    }

    /// The indicator band in content coordinates, or `None` while there is nothing to draw.
    #[must_use]
    pub fn indicator_band(&self) -> Option<Rect> {
        self.state.borrow().indicator_band()
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn take_redraw(&mut self) -> bool {
        core::mem::take(&mut self.state.borrow_mut().needs_redraw)
    }

    /// Draws the indicator band, then the labels of every tab in view.
    pub fn paint<C: StripCanvas + ?Sized>(&self, canvas: &mut C) {
        paint_strip(&self.state.borrow(), canvas);
    }
}

impl Default for TabStrip {
    fn default() -> Self {
        Self::new(TabStripConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;
    use core::time::Duration;

    use proptest::prelude::*;
    use understory_loop_pager::{EventFn, PagerConfig, ReanchorPolicy};

    use super::*;

    #[derive(Debug)]
    struct Pages(usize);

    impl PageProvider for Pages {
        type Handle = usize;

        fn count(&self) -> usize {
            self.0
        }

        fn title_at(&self, index: RealIndex) -> Option<String> {
            (index < self.0).then(|| format!("Page {}", index + 1))
        }

        fn content_at(&self, index: RealIndex) -> Option<usize> {
            (index < self.0).then_some(index)
        }
    }

    type Log = Rc<RefCell<Vec<PagerEvent>>>;

    fn bound_with(config: PagerConfig, count: usize) -> (PagerSurface<Pages>, TabStrip) {
        let mut pager = PagerSurface::new(config);
        pager.set_page_width(300.0);
        pager.bind(Pages(count)).unwrap();
        let mut strip = TabStrip::default();
        strip.handle_host_event(HostEvent::Resized {
            width: 300,
            height: 48,
        });
        strip.bind_to_pager(&mut pager).unwrap();
        (pager, strip)
    }

    fn bound(count: usize) -> (PagerSurface<Pages>, TabStrip) {
        bound_with(PagerConfig::default(), count)
    }

    fn forwarded(strip: &mut TabStrip) -> Log {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        strip.add_scroll_listener(Box::new(EventFn(move |event: &PagerEvent| {
            sink.borrow_mut().push(*event);
        })));
        log
    }

    fn drag_by(pager: &mut PagerSurface<Pages>, dx: f64) {
        pager.pointer_down(None, Point::new(150.0, 10.0), 0);
        pager.pointer_move(None, Point::new(150.0 + dx, 10.0));
        pager.pointer_up(None, Point::new(150.0 + dx, 10.0), 100);
    }

    fn settle(pager: &mut PagerSurface<Pages>) {
        for _ in 0..200 {
            if pager.phase() != ScrollPhase::Settling {
                return;
            }
            pager.advance(Duration::from_millis(16));
        }
        panic!("settle did not complete");
    }

    fn scrolled_to(log: &Log, target: ExtendedIndex) -> bool {
        log.borrow().iter().any(|event| {
            matches!(
                event,
                PagerEvent::Scrolled { position, position_offset, .. }
                    if *position == target && *position_offset == 0.0
            )
        })
    }

    #[test]
    fn pool_is_n_plus_three_after_bind_and_rebind() {
        let (mut pager, mut strip) = bound(5);
        assert_eq!(strip.pool_len(), 8);
        assert_eq!(strip.tab(0).unwrap().title, "Page 5");

        pager.bind(Pages(7)).unwrap();
        strip.bind_to_pager(&mut pager).unwrap();
        assert_eq!(strip.pool_len(), 10);

        // Only one mirror stays subscribed: each event is forwarded once.
        let log = forwarded(&mut strip);
        pager.set_current_item(2, false).unwrap();
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn jump_leaves_strip_on_the_directly_computed_target() {
        let (mut pager, strip) = bound(5);
        for real in [3, 0, 4, 1, 2, 0] {
            pager.set_current_item(real, false).unwrap();
            assert_eq!(pager.current_item(), real);
            assert_eq!(strip.current_item(), real);
            let position = ExtendedIndex::try_from(real).unwrap();
            assert_eq!(Some(strip.scroll_x()), strip.target_scroll_x(position, 0.0));
            assert_eq!(strip.scroll_x(), position * 100);
            assert_eq!(strip.center_slot(), Some(real + 1));
        }
    }

    #[test]
    fn forward_drag_from_last_page_centers_the_first_tab() {
        let config = PagerConfig {
            reanchor: ReanchorPolicy::Beyond { pages: 100 },
            ..PagerConfig::default()
        };
        let (mut pager, mut strip) = bound_with(config, 5);
        pager.set_current_item(2, false).unwrap();
        pager.set_current_item(4, false).unwrap();
        assert_eq!(pager.current_extended(), 4);
        let log = forwarded(&mut strip);

        drag_by(&mut pager, -300.0);
        assert!(scrolled_to(&log, 5));
        assert!(log.borrow().contains(&PagerEvent::Selected(0)));
        assert_eq!(pager.current_item(), 0);
        assert_eq!(strip.center_slot(), Some(6));
        assert_eq!(strip.tab(6).unwrap().real, 0);
        assert_eq!(strip.scroll_x(), 500);
    }

    #[test]
    fn reanchor_after_wrap_moves_the_strip_to_the_real_tab() {
        let (mut pager, mut strip) = bound(5);
        pager.set_current_item(4, false).unwrap();
        let log = forwarded(&mut strip);

        drag_by(&mut pager, -300.0);
        assert!(scrolled_to(&log, 5));
        assert!(scrolled_to(&log, 0));
        assert_eq!(strip.center_slot(), Some(1));
        assert_eq!(strip.tab(1).unwrap().real, 0);
        assert_eq!(strip.scroll_x(), 0);
    }

    #[test]
    fn tap_on_leading_buffer_selects_last_page() {
        let (mut pager, mut strip) = bound(5);
        assert_eq!(strip.tap_slot(0, &mut pager), Some(4));
        assert_eq!(pager.phase(), ScrollPhase::Settling);
        settle(&mut pager);
        assert_eq!(pager.current_item(), 4);
        assert_eq!(strip.scroll_x(), 400);
        assert_eq!(strip.center_slot(), Some(5));
    }

    #[test]
    fn three_hundred_pixel_viewport_targets() {
        let (_pager, strip) = bound(5);
        assert_eq!(strip.tab_width(), 100);
        assert_eq!(strip.target_scroll_x(2, 0.5), Some(300 + 50 - 100));
    }

    #[test]
    fn repeated_jump_is_idempotent_for_both_surfaces() {
        let (mut pager, strip) = bound(5);
        pager.set_current_item(3, false).unwrap();
        let first = (pager.state(), strip.scroll_x(), strip.center_slot());
        pager.set_current_item(3, false).unwrap();
        let second = (pager.state(), strip.scroll_x(), strip.center_slot());
        assert_eq!(first, second);
    }

    #[test]
    fn taps_during_a_drag_are_ignored() {
        let (mut pager, mut strip) = bound(5);
        pager.pointer_down(None, Point::new(150.0, 10.0), 0);
        pager.pointer_move(None, Point::new(100.0, 10.0));
        assert_eq!(pager.phase(), ScrollPhase::Dragging);

        assert_eq!(strip.tap_slot(3, &mut pager), None);
        assert_eq!(pager.phase(), ScrollPhase::Dragging);
    }

    #[test]
    fn unbound_strip_ignores_taps() {
        let mut pager = PagerSurface::new(PagerConfig::default());
        let mut strip = TabStrip::default();
        assert_eq!(strip.bind_to_pager(&mut pager), Err(PagerError::Unbound));
        assert!(!strip.is_bound());

        pager.bind(Pages(5)).unwrap();
        assert_eq!(strip.tap_slot(0, &mut pager), None);
        assert_eq!(strip.tap_at(10.0, &mut pager), None);
        assert_eq!(pager.current_item(), 0);
        assert_eq!(strip.indicator_band(), None);
    }

    #[test]
    fn unbinding_stops_mirroring() {
        let (mut pager, mut strip) = bound(5);
        let log = forwarded(&mut strip);
        strip.unbind_from_pager(&mut pager).unwrap();
        pager.set_current_item(2, false).unwrap();
        assert_eq!(strip.scroll_x(), 0);
        assert_eq!(strip.pool_len(), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn moving_between_pagers_leaves_no_stale_subscription() {
        let (mut first, mut strip) = bound(5);
        let mut second = PagerSurface::new(PagerConfig::default());
        second.set_page_width(300.0);
        second.bind(Pages(7)).unwrap();

        assert_eq!(
            strip.bind_to_pager(&mut second),
            Err(PagerError::BoundElsewhere)
        );
        assert_eq!(strip.pool_len(), 8);
        assert_eq!(second.listener_count(), 0);

        for _ in 0..3 {
            strip.unbind_from_pager(&mut first).unwrap();
            strip.bind_to_pager(&mut second).unwrap();
            assert_eq!(first.listener_count(), 0);
            assert_eq!(second.listener_count(), 1);
            assert_eq!(strip.pool_len(), 10);

            strip.unbind_from_pager(&mut second).unwrap();
            strip.bind_to_pager(&mut first).unwrap();
            assert_eq!(second.listener_count(), 0);
            assert_eq!(first.listener_count(), 1);
        }
        first.set_current_item(3, false).unwrap();
        assert_eq!(strip.scroll_x(), 300);
    }

    #[test]
    fn pager_detach_clears_the_strip() {
        let (mut pager, mut strip) = bound(5);
        let log = forwarded(&mut strip);
        pager.set_current_item(3, false).unwrap();
        strip.take_redraw();

        assert!(pager.detach().is_some());
        assert_eq!(log.borrow().last(), Some(&PagerEvent::Detached));
        assert_eq!(strip.current_item(), pager.current_item());
        assert_eq!(strip.scroll_x(), 0);
        assert_eq!(strip.pool_len(), 0);
        assert_eq!(strip.center_slot(), None);
        assert!(strip.take_redraw());
        assert_eq!(strip.tap_slot(1, &mut pager), None);

        pager.bind(Pages(4)).unwrap();
        strip.bind_to_pager(&mut pager).unwrap();
        assert_eq!(strip.pool_len(), 7);
        assert_eq!(pager.listener_count(), 1);
    }

    #[test]
    fn backward_drag_past_first_page_wraps_the_window() {
        let (mut pager, strip) = bound(5);
        pager.pointer_down(None, Point::new(0.0, 10.0), 0);
        pager.pointer_move(None, Point::new(150.0, 10.0));
        // Position -0.5 mirrors onto the copy of the last page at slot 5.
        assert_eq!(strip.center_slot(), Some(5));
        assert_eq!(strip.scroll_x(), 500 + 50 - 100);
    }

    #[test]
    fn pixel_taps_resolve_through_the_scroll_offset() {
        let (mut pager, mut strip) = bound(5);
        assert_eq!(strip.slot_at(250.0), Some(2));
        pager.set_current_item(2, false).unwrap();
        assert_eq!(strip.slot_at(250.0), Some(4));

        strip.pointer_down(None, Point::new(250.0, 10.0), 0);
        strip.pointer_move(None, Point::new(252.0, 12.0));
        assert_eq!(strip.pointer_up(None, Point::new(252.0, 12.0), 80, &mut pager), Some(3));
        settle(&mut pager);
        assert_eq!(pager.current_item(), 3);
    }

    #[test]
    fn dragging_across_the_strip_is_not_a_tap() {
        let (mut pager, mut strip) = bound(5);
        strip.pointer_down(None, Point::new(150.0, 10.0), 0);
        strip.pointer_move(None, Point::new(260.0, 10.0));
        assert_eq!(strip.pointer_up(None, Point::new(260.0, 10.0), 80, &mut pager), None);
        assert_eq!(pager.phase(), ScrollPhase::Idle);
    }

    #[test]
    fn layout_ready_aligns_to_the_current_page() {
        let mut pager = PagerSurface::new(PagerConfig::default());
        pager.set_page_width(300.0);
        pager.bind(Pages(5)).unwrap();
        let mut strip = TabStrip::default();
        strip.bind_to_pager(&mut pager).unwrap();
        strip.handle_host_event(HostEvent::Attached);
        pager.set_current_item(3, false).unwrap();
        assert_eq!(strip.tab_width(), 0);
        assert_eq!(strip.scroll_x(), 0);

        strip.handle_host_event(HostEvent::Resized {
            width: 300,
            height: 48,
        });
        assert!(strip.is_attached());
        assert_eq!(strip.tab_width(), 100);
        assert_eq!(strip.scroll_x(), 300);
        assert_eq!(strip.center_slot(), Some(4));
    }

    #[test]
    fn band_covers_the_middle_third() {
        let (mut pager, strip) = bound(5);
        pager.set_current_item(2, false).unwrap();
        assert_eq!(
            strip.indicator_band(),
            Some(Rect::new(300.0, 0.0, 400.0, 48.0))
        );
    }

    #[test]
    fn indicator_color_change_requests_redraw() {
        let (_pager, mut strip) = bound(5);
        assert!(strip.take_redraw());
        assert!(!strip.take_redraw());

        strip.set_indicator_color(Color::INDICATOR);
        assert!(!strip.take_redraw());
        strip.set_indicator_color(Color(0xFFFF_0000));
        assert_eq!(strip.indicator_color(), Color(0xFFFF_0000));
        assert!(strip.take_redraw());
    }

    #[derive(Debug, PartialEq)]
    enum Op {
        Fill(Rect, Color),
        Label(Rect, String),
    }

    impl StripCanvas for Vec<Op> {
        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.push(Op::Fill(rect, color));
        }

        fn draw_label(&mut self, rect: Rect, text: &str) {
            self.push(Op::Label(rect, text.to_string()));
        }
    }

    #[test]
    fn paint_draws_band_beneath_visible_labels() {
        let (_pager, strip) = bound(5);
        let mut ops: Vec<Op> = Vec::new();
        strip.paint(&mut ops);
        assert_eq!(
            ops,
            [
                Op::Fill(Rect::new(100.0, 0.0, 200.0, 48.0), Color::INDICATOR),
                Op::Label(Rect::new(16.0, 0.0, 84.0, 48.0), "PAGE 5".to_string()),
                Op::Label(Rect::new(116.0, 0.0, 184.0, 48.0), "PAGE 1".to_string()),
                Op::Label(Rect::new(216.0, 0.0, 284.0, 48.0), "PAGE 2".to_string()),
            ]
        );
    }

    #[test]
    fn paint_keeps_label_case_when_all_caps_is_off() {
        let mut pager = PagerSurface::new(PagerConfig::default());
        pager.bind(Pages(5)).unwrap();
        let mut strip = TabStrip::new(TabStripConfig {
            all_caps: false,
            ..TabStripConfig::default()
        });
        strip.set_viewport(300, 48);
        strip.bind_to_pager(&mut pager).unwrap();

        let mut ops: Vec<Op> = Vec::new();
        strip.paint(&mut ops);
        assert_eq!(
            ops[2],
            Op::Label(Rect::new(116.0, 0.0, 184.0, 48.0), "Page 1".to_string())
        );
    }

    #[test]
    fn fewer_than_three_pages_still_center() {
        let (mut pager, strip) = bound(1);
        assert_eq!(strip.pool_len(), 4);
        assert_eq!(strip.scroll_x(), 0);

        drag_by(&mut pager, -300.0);
        assert_eq!(pager.current_item(), 0);
        assert_eq!(strip.center_slot(), Some(1));
        assert_eq!(strip.scroll_x(), 0);

        let (mut pager, strip) = bound(2);
        pager.set_current_item(1, false).unwrap();
        assert_eq!(strip.scroll_x(), 100);
        assert_eq!(strip.tab(2).unwrap().real, 1);
    }

    #[test]
    fn resize_refits_tabs_and_keeps_position() {
        let (mut pager, mut strip) = bound(5);
        pager.set_current_item(2, false).unwrap();
        strip.handle_host_event(HostEvent::Resized {
            width: 600,
            height: 48,
        });
        assert_eq!(strip.tab_width(), 200);
        assert_eq!(strip.scroll_x(), 400);
        assert_eq!(strip.center_slot(), Some(3));
    }

    proptest! {
        #[test]
        fn window_always_fits_the_pool(
            n in 1_usize..40,
            position in -10_000_i64..10_000,
            offset in 0.0_f64..1.0,
        ) {
            let count = PageCount::new(n).unwrap();
            let anchor = window_anchor(count, position, offset);
            prop_assert!(anchor >= 0);
            prop_assert!(anchor + i64::from(offset > 0.0) <= count.stride());
            prop_assert_eq!(count.real_of(anchor), count.real_of(position));
            if position >= 0 && position < count.stride() {
                prop_assert_eq!(anchor, position);
            }
        }
    }
}
