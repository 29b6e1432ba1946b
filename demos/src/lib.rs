// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the scroll chain demos.
//!
//! The demos are headless: they script touch input, drive the chain frame by
//! frame, and report what happened through `tracing`. Set `RUST_LOG` to see the
//! library's own events, e.g. `RUST_LOG=understory_scroll_chain=trace`.

use kurbo::Point;
use tracing_subscriber::EnvFilter;
use understory_scroll_chain::{
    EdgeEffect, HostRequests, PointerId, ScrollChain, ScrollRegion, TouchAction, TouchEvent,
};

/// Length of one animation frame, in milliseconds.
pub const FRAME_MS: u64 = 16;

/// Installs a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

/// A single-finger vertical swipe from `from_y` to `to_y` at `x`.
///
/// The pointer goes down at `start_ms`, moves in `steps` equal increments one
/// frame apart, and lifts at its final position on the last move's timestamp.
pub fn swipe(x: f64, from_y: f64, to_y: f64, steps: u32, start_ms: u64) -> Vec<TouchEvent> {
    let id = PointerId(0);
    let steps = steps.max(1);
    let mut events = vec![TouchEvent::single(
        TouchAction::Down,
        id,
        Point::new(x, from_y),
        start_ms,
    )];
    let mut time = start_ms;
    for i in 1..=steps {
        time += FRAME_MS;
        let y = from_y + (to_y - from_y) * f64::from(i) / f64::from(steps);
        events.push(TouchEvent::single(TouchAction::Move, id, Point::new(x, y), time));
    }
    events.push(TouchEvent::single(TouchAction::Up, id, Point::new(x, to_y), time));
    events
}

/// Sends `events` through the two-phase dispatch the way a container would.
///
/// Every event is offered to [`ScrollChain::should_intercept`]; once the chain
/// claims the gesture, the following events go to [`ScrollChain::handle`].
pub fn dispatch<R: ScrollRegion, E: EdgeEffect>(
    chain: &mut ScrollChain<R, E>,
    events: &[TouchEvent],
) {
    let mut claimed = false;
    for event in events {
        if !claimed && chain.should_intercept(event) {
            claimed = true;
            // A claimed `Down` is redelivered to the handler; other claimed
            // events only switch routing.
            if event.action == TouchAction::Down {
                chain.handle(event);
            }
            continue;
        }
        if claimed {
            chain.handle(event);
        }
    }
}

/// Runs animation frames from `now_ms` while the chain keeps asking for them.
///
/// Returns the time of the last frame.
pub fn run_frames<R: ScrollRegion, E: EdgeEffect>(
    chain: &mut ScrollChain<R, E>,
    mut now_ms: u64,
) -> u64 {
    while chain.take_requests().contains(HostRequests::REDRAW) {
        now_ms += FRAME_MS;
        if !chain.compute_scroll(now_ms) {
            break;
        }
        tracing::info!(time_ms = now_ms, scroll = chain.scroll(), "frame");
    }
    now_ms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swipe_ends_with_up_at_target() {
        let events = swipe(10.0, 500.0, 300.0, 4, 100);
        assert_eq!(events.len(), 6);
        assert_eq!(events[0].action, TouchAction::Down);
        assert_eq!(events[4].primary().map(|p| p.position.y), Some(300.0));
        let up = &events[5];
        assert_eq!(up.action, TouchAction::Up);
        assert_eq!(up.time_ms, 164);
    }
}
