// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for gesture translation and momentum filtering

use std::time::{Duration, Instant};

use bubble::app::gestures::{ScrollFilter, magnify_request, scroll_request};
use bubble::constants::timing;

#[test]
fn test_scroll_request_applies_sensitivity() {
    assert_eq!(scroll_request(200.0, 10.0), 230.0);
    assert_eq!(scroll_request(200.0, -10.0), 170.0);
    assert_eq!(scroll_request(200.0, 0.0), 200.0);
}

#[test]
fn test_magnify_request_scales_current_size() {
    assert!((magnify_request(390.0, 0.1) - 429.0).abs() < 0.001);
    assert!((magnify_request(200.0, -0.5) - 100.0).abs() < 0.001);
}

#[test]
fn test_filter_accepts_first_event() {
    let mut filter = ScrollFilter::default();
    assert!(
        filter.accept(10.0, Instant::now()),
        "The first event of a train is always user input"
    );
}

#[test]
fn test_filter_drops_decaying_tail() {
    let mut filter = ScrollFilter::default();
    let start = Instant::now();

    assert!(filter.accept(10.0, start));

    // Rapid follow-ups with shrinking magnitude are the inertial tail
    assert!(!filter.accept(8.0, start + Duration::from_millis(10)));
    assert!(!filter.accept(5.0, start + Duration::from_millis(20)));
    assert!(!filter.accept(2.0, start + Duration::from_millis(30)));
}

#[test]
fn test_filter_accepts_growing_delta() {
    let mut filter = ScrollFilter::default();
    let start = Instant::now();

    assert!(filter.accept(5.0, start));
    // A delta that grows in magnitude means the fingers are still moving
    assert!(filter.accept(9.0, start + Duration::from_millis(10)));
}

#[test]
fn test_filter_accepts_after_pause() {
    let mut filter = ScrollFilter::default();
    let start = Instant::now();

    assert!(filter.accept(10.0, start));
    assert!(!filter.accept(4.0, start + Duration::from_millis(10)));

    // After a pause longer than the momentum window a new train begins,
    // even at a smaller magnitude
    let later = start + Duration::from_millis(10) + timing::MOMENTUM_WINDOW;
    assert!(filter.accept(1.0, later));
}

#[test]
fn test_filter_direction_does_not_matter() {
    let mut filter = ScrollFilter::default();
    let start = Instant::now();

    assert!(filter.accept(-10.0, start));
    // Magnitude comparison, not signed comparison
    assert!(!filter.accept(-8.0, start + Duration::from_millis(10)));
    assert!(filter.accept(-12.0, start + Duration::from_millis(20)));
}
