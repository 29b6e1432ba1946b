// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collapsing header above a list.
//!
//! A flexible header collapses as the content scrolls forward, then the list
//! takes over. A fast swipe flings through both; a second touch during the
//! fling catches it.
//!
//! Run:
//! - `cargo run -p understory_demos --example header_and_list`
//! - `RUST_LOG=understory_scroll_chain=debug cargo run -p understory_demos --example header_and_list`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Size};
use understory_demos::{FRAME_MS, dispatch, init_tracing, run_frames, swipe};
use understory_scroll_chain::{
    BoundedRegion, FlexibleSpace, PointerId, ScrollChain, ScrollConfig, ScrollRegion,
    ScrollRegistry, TouchAction, TouchEvent,
};

fn main() {
    init_tracing();

    let header = Rc::new(RefCell::new(FlexibleSpace::new(56, 240)));
    let list = Rc::new(RefCell::new(BoundedRegion::new(3_000)));
    let regions: Vec<Box<dyn ScrollRegion>> =
        vec![Box::new(header.clone()), Box::new(list.clone())];

    let config = ScrollConfig::for_density(2.0);
    let mut chain = ScrollChain::new(ScrollRegistry::from_regions(regions), config);
    chain.set_view_size(Size::new(720.0, 1280.0));

    // Slow drag: collapses part of the header.
    dispatch(&mut chain, &swipe(360.0, 900.0, 800.0, 10, 0));
    let now = run_frames(&mut chain, 160);
    tracing::info!(
        scroll = chain.scroll(),
        header_height = header.borrow().height(),
        "after slow drag"
    );

    // Fast swipe: the fling finishes collapsing the header and moves the list.
    let start = now + 500;
    dispatch(&mut chain, &swipe(360.0, 1100.0, 500.0, 6, start));
    let mut now = start + 6 * FRAME_MS;
    for _ in 0..10 {
        now += FRAME_MS;
        chain.compute_scroll(now);
    }
    tracing::info!(
        scroll = chain.scroll(),
        collapsed = header.borrow().is_collapsed(),
        list_offset = list.borrow().current_offset(),
        phase = ?chain.phase(),
        "mid fling"
    );

    // A tap during the fling catches it.
    now += FRAME_MS;
    let catch = TouchEvent::single(TouchAction::Down, PointerId(0), Point::new(360.0, 600.0), now);
    let intercepted = chain.should_intercept(&catch);
    chain.handle(&catch);
    chain.handle(&TouchEvent::single(
        TouchAction::Up,
        PointerId(0),
        Point::new(360.0, 600.0),
        now + FRAME_MS,
    ));
    tracing::info!(intercepted, phase = ?chain.phase(), "caught fling");

    // Drag back to the top: the list returns first, then the header expands.
    dispatch(&mut chain, &swipe(360.0, 200.0, 1_200.0, 20, now + 200));
    run_frames(&mut chain, now + 200 + 20 * FRAME_MS);
    tracing::info!(
        scroll = chain.scroll(),
        expanded = header.borrow().is_expanded(),
        list_offset = list.borrow().current_offset(),
        "back at the top"
    );
}
