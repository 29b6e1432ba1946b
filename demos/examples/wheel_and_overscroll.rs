// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mouse wheel input and overscroll feedback.
//!
//! Wheel notches scroll the chain by the configured factor. Dragging past the
//! end pulls a logging edge effect; a fling into the end is absorbed by it.
//!
//! Run:
//! - `cargo run -p understory_demos --example wheel_and_overscroll`

use kurbo::Size;
use understory_demos::{dispatch, init_tracing, run_frames, swipe};
use understory_scroll_chain::{
    BoundedRegion, EdgeEffect, ScrollChain, ScrollConfig, ScrollRegistry, TouchAction, TouchEvent,
};

/// Edge effect that logs every signal and fades after a few frames.
#[derive(Debug, Default)]
struct LoggingGlow {
    intensity: f64,
}

impl EdgeEffect for LoggingGlow {
    fn pull(&mut self, delta_fraction: f64, displacement: f64) {
        self.intensity = (self.intensity + delta_fraction).min(1.0);
        tracing::info!(delta_fraction, displacement, intensity = self.intensity, "glow pull");
    }

    fn release(&mut self) {
        tracing::info!(intensity = self.intensity, "glow release");
    }

    fn absorb(&mut self, velocity: i32) {
        self.intensity = 1.0;
        tracing::info!(velocity, "glow absorb");
    }

    fn is_finished(&self) -> bool {
        self.intensity <= 0.0
    }

    fn set_size(&mut self, size: Size) {
        tracing::debug!(?size, "glow sized");
    }
}

fn main() {
    init_tracing();

    let registry = ScrollRegistry::from_regions([BoundedRegion::new(120), BoundedRegion::new(480)]);
    let mut chain = ScrollChain::with_edge_effect(registry, ScrollConfig::default(), LoggingGlow::default());
    chain.set_view_size(Size::new(400.0, 800.0));

    for vscroll in [-1.0, -3.0, 1.0, -20.0] {
        let consumed = chain.handle(&TouchEvent::new(TouchAction::GenericScroll { vscroll }, 0));
        tracing::info!(vscroll, consumed, scroll = chain.scroll(), "wheel");
    }

    // Already at the end: dragging further only pulls the glow.
    dispatch(&mut chain, &swipe(100.0, 600.0, 300.0, 8, 1_000));
    let mut frames = 0;
    while !chain.edge_effect().is_finished() {
        chain.draw_edge_effect(|glow, _size| {
            glow.intensity -= 0.25;
            !glow.is_finished()
        });
        frames += 1;
    }
    tracing::info!(frames, "glow faded");

    // Back up a little, then fling into the end.
    chain.scroll_by(-200);
    dispatch(&mut chain, &swipe(100.0, 700.0, 300.0, 4, 2_000));
    run_frames(&mut chain, 2_064);
    tracing::info!(scroll = chain.scroll(), "fling absorbed");
}
