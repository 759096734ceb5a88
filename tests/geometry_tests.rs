// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for bubble geometry

use bubble::BubbleGeometry;
use bubble::app::gestures;
use bubble::constants::ui;
use cosmic::iced::{Point, Size};

#[test]
fn test_resize_clamps_to_bounds() {
    let geometry = BubbleGeometry::new(200.0);

    for requested in [-50.0, 0.0, 99.9, 100.0, 250.0, 400.0, 400.1, 10_000.0] {
        let resized = geometry.resized(requested);
        assert!(
            resized.side >= ui::MIN_BUBBLE_SIDE && resized.side <= ui::MAX_BUBBLE_SIDE,
            "Requested {} produced out-of-bounds side {}",
            requested,
            resized.side
        );
    }
}

#[test]
fn test_resize_preserves_center() {
    let mut geometry = BubbleGeometry::new(200.0);
    geometry.record_moved(Point::new(100.0, 100.0));
    let center_before = geometry.center();

    let resized = geometry.resized(300.0);

    assert_eq!(resized.side, 300.0);
    assert_eq!(resized.origin, Point::new(50.0, 50.0));
    assert!(
        (resized.center().x - center_before.x).abs() < 0.001
            && (resized.center().y - center_before.y).abs() < 0.001,
        "Resize should grow the bubble in place, not from its corner"
    );
}

#[test]
fn test_frame_is_always_square() {
    let geometry = BubbleGeometry::new(250.0);
    let size = geometry.size();
    assert_eq!(size.width, size.height);
}

#[test]
fn test_scroll_resize_scenario() {
    // Initial size 200, scroll delta 10 at sensitivity 3.0 requests 230
    let geometry = BubbleGeometry::new(200.0);
    let requested = gestures::scroll_request(geometry.side, 10.0);
    assert_eq!(requested, 230.0);

    let resized = geometry.resized(requested);
    assert_eq!(resized.side, 230.0, "230 lies within bounds, no clamping");
    assert_eq!(resized.center(), geometry.center());
}

#[test]
fn test_magnify_resize_scenario() {
    // Size 390 magnified by 0.1 requests 429, clamped to the maximum
    let geometry = BubbleGeometry::new(390.0);
    let requested = gestures::magnify_request(geometry.side, 0.1);
    assert!((requested - 429.0).abs() < 0.001);

    let resized = geometry.resized(requested);
    assert_eq!(resized.side, ui::MAX_BUBBLE_SIDE);
    assert_eq!(resized.center(), geometry.center());
}

#[test]
fn test_default_geometry() {
    let geometry = BubbleGeometry::default();
    assert_eq!(geometry.side, ui::DEFAULT_BUBBLE_SIDE);
}

#[test]
fn test_construction_clamps_side() {
    assert_eq!(BubbleGeometry::new(5.0).side, ui::MIN_BUBBLE_SIDE);
    assert_eq!(BubbleGeometry::new(5_000.0).side, ui::MAX_BUBBLE_SIDE);
}

#[test]
fn test_reported_frame_is_recorded() {
    // The compositor owns initial placement; the first reported frame
    // becomes the baseline that later resizes preserve
    let mut geometry = BubbleGeometry::default();
    geometry.record_moved(Point::new(640.0, 360.0));
    geometry.record_resized(Size::new(200.0, 200.0));

    assert_eq!(geometry.center(), Point::new(740.0, 460.0));

    let resized = geometry.resized(100.0);
    assert_eq!(resized.center(), Point::new(740.0, 460.0));
}
