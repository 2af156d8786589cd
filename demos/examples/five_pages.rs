// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Five looping pages with a synchronized tab strip.
//!
//! This example wires:
//! - a five-page provider with "Page N" titles,
//! - an `understory_loop_pager` surface driven by simulated pointer input and frame ticks,
//! - an `understory_loop_tabs` strip that mirrors the pager and answers taps.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example five_pages`

use std::time::Duration;

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use understory_loop_index::RealIndex;
use understory_loop_pager::{
    EventFn, PageProvider, PagerConfig, PagerEvent, PagerSurface, ScrollPhase,
};
use understory_loop_tabs::{Color, HostEvent, StripCanvas, TabStrip};

const PAGE_WIDTH: f64 = 360.0;
const FRAME: Duration = Duration::from_millis(16);

struct Pages {
    bodies: Vec<String>,
}

impl Pages {
    fn new(count: usize) -> Self {
        Self {
            bodies: (1..=count).map(|n| format!("Contents of page {n}")).collect(),
        }
    }
}

impl PageProvider for Pages {
    type Handle = String;

    fn count(&self) -> usize {
        self.bodies.len()
    }

    fn title_at(&self, index: RealIndex) -> Option<String> {
        (index < self.bodies.len()).then(|| format!("Page {}", index + 1))
    }

    fn content_at(&self, index: RealIndex) -> Option<String> {
        self.bodies.get(index).cloned()
    }
}

/// Prints paint operations instead of drawing them.
struct LogCanvas {
    scroll_x: f64,
}

impl StripCanvas for LogCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        println!(
            "  band  x={:>6.1}..{:<6.1} color=#{:08X}",
            rect.x0 - self.scroll_x,
            rect.x1 - self.scroll_x,
            color.0
        );
    }

    fn draw_label(&mut self, rect: Rect, text: &str) {
        println!(
            "  label x={:>6.1}..{:<6.1} {text}",
            rect.x0 - self.scroll_x,
            rect.x1 - self.scroll_x
        );
    }
}

fn settle(pager: &mut PagerSurface<Pages>) {
    while pager.phase() == ScrollPhase::Settling {
        pager.advance(FRAME);
    }
}

fn drag(pager: &mut PagerSurface<Pages>, from_x: f64, to_x: f64) {
    let steps = 6;
    pager.pointer_down(None, Point::new(from_x, 20.0), 0);
    for step in 1..=steps {
        let x = from_x + (to_x - from_x) * f64::from(step) / f64::from(steps);
        pager.pointer_move(None, Point::new(x, 20.0));
    }
    pager.pointer_up(None, Point::new(to_x, 20.0), 120);
    settle(pager);
}

fn report(label: &str, pager: &PagerSurface<Pages>, strip: &TabStrip) {
    let state = pager.state();
    println!(
        "{label}: page {} (extended {}), strip scroll {} centered on slot {:?}",
        pager.current_item(),
        state.current,
        strip.scroll_x(),
        strip.center_slot()
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut pager = PagerSurface::new(PagerConfig::default());
    pager.set_page_width(PAGE_WIDTH);
    pager
        .bind(Pages::new(5))
        .expect("five pages is a valid count");

    let mut strip = TabStrip::default();
    strip
        .bind_to_pager(&mut pager)
        .expect("pager has a provider");
    strip.add_scroll_listener(Box::new(EventFn(|event: &PagerEvent| {
        if let PagerEvent::Selected(page) = event {
            tracing::info!(page, "host observed selection");
        }
    })));

    // The host attaches the strip before it knows its size; the first real size aligns it.
    strip.handle_host_event(HostEvent::Attached);
    strip.handle_host_event(HostEvent::Resized {
        width: PAGE_WIDTH as i64,
        height: 48,
    });
    strip.handle_host_event(HostEvent::FocusChanged(true));
    report("start", &pager, &strip);

    // Back one page from the first page lands on the last.
    drag(&mut pager, 40.0, 320.0);
    report("swipe right", &pager, &strip);

    // Forward one page from the last page lands on the first.
    drag(&mut pager, 320.0, 40.0);
    report("swipe left", &pager, &strip);

    // Tap the tab right of center, then the leading buffer tab.
    let right = strip.tap_at(PAGE_WIDTH * 5.0 / 6.0, &mut pager);
    settle(&mut pager);
    report(&format!("tap right ({right:?})"), &pager, &strip);

    let leading = strip.tap_slot(0, &mut pager);
    settle(&mut pager);
    report(&format!("tap slot 0 ({leading:?})"), &pager, &strip);

    match pager.materialized_pages() {
        Ok(pages) => {
            for page in pages {
                println!("  keep extended {} -> {}", page.extended, page.handle);
            }
        }
        Err(err) => tracing::warn!(%err, "no pages to materialize"),
    }

    strip.set_indicator_color(Color::from_argb(0xFF, 0xE9, 0x1E, 0x63));
    if strip.take_redraw() {
        println!("frame:");
        strip.paint(&mut LogCanvas {
            scroll_x: strip.scroll_x() as f64,
        });
    }
}
