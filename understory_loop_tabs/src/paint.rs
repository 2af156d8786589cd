// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing the strip: the center indicator band under the visible tab labels.

use alloc::borrow::Cow;

use kurbo::Rect;
use understory_loop_index::px::ceil_div;

use crate::strip::StripState;

/// A packed `0xAARRGGBB` color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    /// The default indicator color, an opaque light blue.
    pub const INDICATOR: Self = Self(0xFF33_B5E5);

    /// Packs four channels.
    #[must_use]
    pub const fn from_argb(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self(u32::from_be_bytes([alpha, red, green, blue]))
    }

    /// Alpha channel.
    #[must_use]
    pub const fn alpha(self) -> u8 {
        self.0.to_be_bytes()[0]
    }

    /// Red channel.
    #[must_use]
    pub const fn red(self) -> u8 {
        self.0.to_be_bytes()[1]
    }

    /// Green channel.
    #[must_use]
    pub const fn green(self) -> u8 {
        self.0.to_be_bytes()[2]
    }

    /// Blue channel.
    #[must_use]
    pub const fn blue(self) -> u8 {
        self.0.to_be_bytes()[3]
    }
}

/// Drawing backend for [`TabStrip::paint`](crate::TabStrip::paint).
///
/// Coordinates are in strip content space: `x = 0` is the left edge of pool slot `0`.
/// Hosts translate by `-scroll_x` to reach viewport space.
pub trait StripCanvas {
    /// Fills `rect` with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draws a tab label centered in `rect`.
    fn draw_label(&mut self, rect: Rect, text: &str);
}

pub(crate) fn paint_strip<C: StripCanvas + ?Sized>(state: &StripState, canvas: &mut C) {
    let Some(pool) = state.pool.as_ref() else {
        return;
    };
    let Some(band) = state.indicator_band() else {
        return;
    };
    canvas.fill_rect(band, state.config.indicator_color);

    let tab_width = pool.tab_width();
    let first = state.scroll_x / tab_width;
    let end = ceil_div(state.scroll_x + state.viewport_width, tab_width);
    let height = state.viewport_height as f64;
    let padding = state.config.label_padding.clamp(0.0, tab_width as f64 / 2.0);

    for view in pool
        .views()
        .iter()
        .skip(usize::try_from(first).unwrap_or(0))
        .take(usize::try_from(end - first).unwrap_or(0))
    {
        let left = pool.tab_left(view.slot) as f64;
        let rect = Rect::new(
            left + padding,
            0.0,
            left + view.width as f64 - padding,
            height,
        );
        let text = if state.config.all_caps {
            Cow::Owned(view.title.to_uppercase())
        } else {
            Cow::Borrowed(view.title.as_str())
        };
        canvas.draw_label(rect, &text);
    }
}
