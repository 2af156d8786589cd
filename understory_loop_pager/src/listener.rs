// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page-change events and the multi-subscriber listener registry.
//!
//! Every state change of a [`PagerSurface`](crate::PagerSurface) is delivered to all
//! registered listeners, synchronously and in the order the changes happen. Listeners
//! are called in registration order. Nothing is batched or coalesced: a drag that moves
//! five times produces five [`PagerEvent::Scrolled`] events.

use alloc::boxed::Box;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use smallvec::SmallVec;
use understory_loop_index::{ExtendedIndex, RealIndex};

/// Scroll phase of a pager.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollPhase {
    /// At rest on a whole page.
    #[default]
    Idle,
    /// Following a pointer.
    Dragging,
    /// Animating toward a whole page.
    Settling,
}

/// A single notification from a pager.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PagerEvent {
    /// The scroll position changed.
    Scrolled {
        /// Extended index of the page at the leading edge of the viewport.
        position: ExtendedIndex,
        /// Fraction of `position` scrolled past, in `[0, 1)`.
        position_offset: f64,
        /// `position_offset` in pixels.
        pixel_offset: f64,
    },
    /// A new page became the current item.
    Selected(RealIndex),
    /// The scroll phase changed.
    StateChanged(ScrollPhase),
    /// The provider was unbound and the pager reset. No pages remain until the next bind.
    Detached,
}

/// Receiver of pager notifications.
///
/// All methods default to doing nothing, so implementors only override what they need.
/// [`handle`](Self::handle) routes an event to the matching method; override it instead
/// to receive events whole.
pub trait PageChangeListener {
    /// The pager scrolled. See [`PagerEvent::Scrolled`].
    fn on_scrolled(&mut self, position: ExtendedIndex, position_offset: f64, pixel_offset: f64) {
        let _ = (position, position_offset, pixel_offset);
    }

    /// A new page was selected.
    fn on_selected(&mut self, position: RealIndex) {
        let _ = position;
    }

    /// The scroll phase changed.
    fn on_scroll_state_changed(&mut self, phase: ScrollPhase) {
        let _ = phase;
    }

    /// The pager lost its provider.
    fn on_detached(&mut self) {}

    /// Routes `event` to the matching callback.
    fn handle(&mut self, event: &PagerEvent) {
        match *event {
            PagerEvent::Scrolled {
                position,
                position_offset,
                pixel_offset,
            } => self.on_scrolled(position, position_offset, pixel_offset),
            PagerEvent::Selected(position) => self.on_selected(position),
            PagerEvent::StateChanged(phase) => self.on_scroll_state_changed(phase),
            PagerEvent::Detached => self.on_detached(),
        }
    }
}

/// Adapts a closure over [`PagerEvent`] into a [`PageChangeListener`].
///
/// ```
/// use understory_loop_pager::{EventFn, Listeners, PagerEvent};
///
/// let mut listeners = Listeners::new();
/// listeners.add(Box::new(EventFn(|event: &PagerEvent| {
///     assert_eq!(*event, PagerEvent::Selected(2));
/// })));
/// listeners.dispatch(&PagerEvent::Selected(2));
/// ```
pub struct EventFn<F>(pub F);

impl<F: FnMut(&PagerEvent)> PageChangeListener for EventFn<F> {
    fn handle(&mut self, event: &PagerEvent) {
        (self.0)(event);
    }
}

impl<F> fmt::Debug for EventFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EventFn").finish_non_exhaustive()
    }
}

/// Handle returned by [`Listeners::add`], used to unsubscribe.
///
/// Ids are unique across all registries, so removing an id from a registry that never
/// issued it is a no-op.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(0);

/// Ordered registry of page-change listeners.
#[derive(Default)]
pub struct Listeners {
    // Most pagers have one or two subscribers (a tab strip and the host).
    entries: SmallVec<[(ListenerId, Box<dyn PageChangeListener>); 2]>,
}

impl Listeners {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes a listener. It will be called after every earlier subscriber.
    pub fn add(&mut self, listener: Box<dyn PageChangeListener>) -> ListenerId {
        let id = ListenerId(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed));
        self.entries.push((id, listener));
        id
    }

    /// Unsubscribes a listener, returning it if it was registered.
    pub fn remove(&mut self, id: ListenerId) -> Option<Box<dyn PageChangeListener>> {
        let at = self.entries.iter().position(|(entry, _)| *entry == id)?;
        Some(self.entries.remove(at).1)
    }

    /// Delivers `event` to every listener in registration order.
    pub fn dispatch(&mut self, event: &PagerEvent) {
        for (_, listener) in &mut self.entries {
            listener.handle(event);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}
