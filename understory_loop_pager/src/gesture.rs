// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer gesture tracking: drag slop detection and tap recognition.
//!
//! [`GestureState`] follows each active pointer from down to up and decides whether the
//! interaction is a drag or a tap:
//!
//! - A press becomes a **drag** the first time the pointer travels farther than
//!   [`GestureState::touch_slop`] from where it went down. From then on every move
//!   reports the delta since the previous move.
//! - A release is a **tap** when the press never became a drag, the release target
//!   matches the press target, and (if configured) the press was short enough.
//!
//! ```
//! use kurbo::Point;
//! use understory_loop_pager::gesture::{GestureState, MoveResult, TapResult};
//!
//! let mut state: GestureState<usize> = GestureState::with_thresholds(8.0, None);
//!
//! // A short press on slot 3 is a tap.
//! state.on_down(None, 3, Point::new(10.0, 10.0), 1000);
//! assert_eq!(state.on_up(None, &3, 1040), TapResult::Tap(3));
//!
//! // Moving past the slop turns the press into a drag.
//! state.on_down(None, 3, Point::new(10.0, 10.0), 2000);
//! assert!(matches!(
//!     state.on_move(None, Point::new(30.0, 10.0)),
//!     MoveResult::DragStarted { .. }
//! ));
//! assert_eq!(state.on_up(None, &3, 2100), TapResult::Suppressed(Some(3)));
//! ```

use alloc::collections::BTreeMap;
use core::num::NonZeroU64;

use kurbo::{Point, Vec2};

/// Pointer identifier for tracking multiple concurrent presses.
pub type PointerId = NonZeroU64;

/// Pointer used when the host does not distinguish pointers.
pub const PRIMARY_POINTER: PointerId = NonZeroU64::MIN;

/// Default drag slop in logical pixels.
pub const DEFAULT_TOUCH_SLOP: f64 = 8.0;

/// Per-pointer press and drag tracker.
#[derive(Clone, Debug)]
pub struct GestureState<K> {
    presses: BTreeMap<PointerId, Press<K>>,
    /// Distance a press must travel before it is treated as a drag.
    pub touch_slop: f64,
    /// Longest press (milliseconds) still recognized as a tap, or `None` for no limit.
    pub tap_timeout: Option<u64>,
}

/// State for an active pointer press.
#[derive(Clone, Debug)]
pub struct Press<K> {
    /// Target the press went down on.
    pub target: K,
    /// Pointer position at press time.
    pub down_position: Point,
    /// Pointer position at the most recent move.
    pub last_position: Point,
    /// Timestamp of the press in milliseconds.
    pub down_time: u64,
    /// True once the press has travelled past the slop.
    pub dragging: bool,
}

/// Result of feeding a pointer move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveResult {
    /// No press is active for this pointer.
    Untracked,
    /// The press is still within the slop.
    Pending,
    /// The press crossed the slop on this move; `delta` is the travel since press.
    DragStarted {
        /// Travel since the press went down.
        delta: Vec2,
    },
    /// The press was already dragging; `delta` is the travel since the previous move.
    Dragged {
        /// Travel since the previous move.
        delta: Vec2,
    },
}

/// Result of a pointer release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TapResult<K> {
    /// The release completes a tap on the press target.
    Tap(K),
    /// No tap; carries the press target if a press was active.
    Suppressed(Option<K>),
}

impl<K: PartialEq + Clone> GestureState<K> {
    /// Creates a tracker with [`DEFAULT_TOUCH_SLOP`] and no tap timeout.
    pub fn new() -> Self {
        Self::with_thresholds(DEFAULT_TOUCH_SLOP, None)
    }

    /// Creates a tracker with a custom slop and tap timeout.
    pub fn with_thresholds(touch_slop: f64, tap_timeout: Option<u64>) -> Self {
        Self {
            presses: BTreeMap::new(),
            touch_slop: touch_slop.max(0.0),
            tap_timeout,
        }
    }

    /// Records a pointer down. Replaces any press already active for the pointer.
    pub fn on_down(
        &mut self,
        pointer_id: Option<PointerId>,
        target: K,
        position: Point,
        timestamp: u64,
    ) {
        let pointer_id = pointer_id.unwrap_or(PRIMARY_POINTER);
        self.presses.insert(
            pointer_id,
            Press {
                target,
                down_position: position,
                last_position: position,
                down_time: timestamp,
                dragging: false,
            },
        );
    }

    /// Feeds a pointer move and reports whether it is part of a drag.
    pub fn on_move(&mut self, pointer_id: Option<PointerId>, position: Point) -> MoveResult {
        let pointer_id = pointer_id.unwrap_or(PRIMARY_POINTER);
        let Some(press) = self.presses.get_mut(&pointer_id) else {
            return MoveResult::Untracked;
        };

        if press.dragging {
            let delta = position - press.last_position;
            press.last_position = position;
            return MoveResult::Dragged { delta };
        }

        if press.down_position.distance(position) > self.touch_slop {
            press.dragging = true;
            press.last_position = position;
            MoveResult::DragStarted {
                delta: position - press.down_position,
            }
        } else {
            MoveResult::Pending
        }
    }

    /// Marks an active press as dragging without waiting for the slop.
    ///
    /// Used when a press lands on content that is already in motion.
    /// Returns `false` if no press is active for the pointer.
    pub fn begin_drag(&mut self, pointer_id: Option<PointerId>) -> bool {
        let pointer_id = pointer_id.unwrap_or(PRIMARY_POINTER);
        match self.presses.get_mut(&pointer_id) {
            Some(press) => {
                press.dragging = true;
                true
            }
            None => false,
        }
    }

    /// Processes a pointer release.
    pub fn on_up(
        &mut self,
        pointer_id: Option<PointerId>,
        current_target: &K,
        timestamp: u64,
    ) -> TapResult<K> {
        let pointer_id = pointer_id.unwrap_or(PRIMARY_POINTER);
        let Some(press) = self.presses.remove(&pointer_id) else {
            return TapResult::Suppressed(None);
        };

        if press.dragging || press.target != *current_target {
            return TapResult::Suppressed(Some(press.target));
        }

        let elapsed = timestamp.saturating_sub(press.down_time);
        if self.tap_timeout.is_some_and(|limit| elapsed > limit) {
            return TapResult::Suppressed(Some(press.target));
        }

        TapResult::Tap(press.target)
    }

    /// Drops the press for a pointer. Returns `true` if one was active.
    pub fn cancel(&mut self, pointer_id: Option<PointerId>) -> bool {
        let pointer_id = pointer_id.unwrap_or(PRIMARY_POINTER);
        self.presses.remove(&pointer_id).is_some()
    }

    /// Returns the active press for a pointer, if any.
    pub fn press(&self, pointer_id: Option<PointerId>) -> Option<&Press<K>> {
        self.presses.get(&pointer_id.unwrap_or(PRIMARY_POINTER))
    }

    /// Returns `true` if any active press has become a drag.
    pub fn is_dragging(&self) -> bool {
        self.presses.values().any(|press| press.dragging)
    }

    /// Returns `true` if any press is active.
    pub fn is_pressed(&self) -> bool {
        !self.presses.is_empty()
    }

    /// Clears all active presses.
    pub fn clear(&mut self) {
        self.presses.clear();
    }
}

impl<K: PartialEq + Clone> Default for GestureState<K> {
    fn default() -> Self {
        Self::new()
    }
}
