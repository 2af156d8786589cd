// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host lifecycle signals and the alignment they trigger.
//!
//! The strip can be asked to align before the host knows its real size. Alignment to
//! the current page is therefore reissued on attach, on the first focus gain after each
//! attach, and once when the first non-zero size arrives (the layout-ready signal).

/// A lifecycle signal from the host environment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HostEvent {
    /// The strip was attached to a display surface.
    Attached,
    /// The strip was removed from its display surface.
    Detached,
    /// Input focus was gained (`true`) or lost (`false`).
    FocusChanged(bool),
    /// The strip's viewport was resized.
    Resized {
        /// Viewport width in pixels.
        width: i64,
        /// Viewport height in pixels.
        height: i64,
    },
}

/// What the strip should do in response to a [`HostEvent`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Alignment {
    None,
    /// Center the current page with zero offset.
    Current,
    /// Re-apply the last mirrored scroll position.
    Reapply,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Lifecycle {
    pub(crate) attached: bool,
    focus_aligned: bool,
    pub(crate) layout_ready: bool,
}

impl Lifecycle {
    pub(crate) fn on_event(&mut self, event: HostEvent) -> Alignment {
        match event {
            HostEvent::Attached => {
                self.attached = true;
                self.focus_aligned = false;
                Alignment::Current
            }
            HostEvent::Detached => {
                self.attached = false;
                Alignment::None
            }
            HostEvent::FocusChanged(true) if self.attached && !self.focus_aligned => {
                self.focus_aligned = true;
                Alignment::Current
            }
            HostEvent::FocusChanged(_) => Alignment::None,
            HostEvent::Resized { width, .. } if width > 0 && !self.layout_ready => {
                self.layout_ready = true;
                Alignment::Current
            }
            HostEvent::Resized { .. } => Alignment::Reapply,
        }
    }
}
