// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `ManipulationControl`, the host-facing event surface.

use kurbo::{Point, Rect, Size, Vec2};
use understory_manipulation::{
    GestureEvent, ManipulationConfig, ManipulationControl, Modifiers, Outcome, Phase,
};

const POINTER: Point = Point::new(200.0, 120.0);

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn ctrl_wheel_zooms_by_fixed_steps() {
    let mut control = ManipulationControl::default();

    assert_eq!(control.on_wheel(POINTER, 120.0, Modifiers::CTRL), Outcome::Applied);
    assert!(close(control.engine().scale(), 1.1));

    assert_eq!(control.on_wheel(POINTER, -3.0, Modifiers::CTRL), Outcome::Applied);
    assert!(close(control.engine().scale(), 1.1 * 0.9));
}

#[test]
fn wheel_step_ignores_magnitude() {
    let mut small = ManipulationControl::default();
    let mut large = ManipulationControl::default();
    small.on_wheel(POINTER, 1.0, Modifiers::CTRL);
    large.on_wheel(POINTER, 960.0, Modifiers::CTRL);
    assert_eq!(small.render_transform(), large.render_transform());
}

#[test]
fn ctrl_shift_wheel_rotates_fifteen_degrees() {
    let mut control = ManipulationControl::default();
    let both = Modifiers::CTRL | Modifiers::SHIFT;

    assert_eq!(control.on_wheel(POINTER, 120.0, both), Outcome::Applied);
    assert!(close(control.engine().rotation_degrees(), -15.0));

    control.on_wheel(POINTER, -120.0, both);
    control.on_wheel(POINTER, -120.0, both);
    assert!(close(control.engine().rotation_degrees(), 15.0));
    assert!(close(control.engine().scale(), 1.0));
}

#[test]
fn wheel_without_ctrl_is_left_to_the_host() {
    let mut control = ManipulationControl::default();
    assert_eq!(control.on_wheel(POINTER, 120.0, Modifiers::empty()), Outcome::Ignored);
    assert_eq!(control.on_wheel(POINTER, 120.0, Modifiers::SHIFT), Outcome::Ignored);
    assert_eq!(control.on_wheel(POINTER, 120.0, Modifiers::ALT), Outcome::Ignored);
    assert!(close(control.engine().scale(), 1.0));
}

#[test]
fn zero_and_nan_wheel_deltas_are_ignored() {
    let mut control = ManipulationControl::default();
    assert_eq!(control.on_wheel(POINTER, 0.0, Modifiers::CTRL), Outcome::Ignored);
    assert_eq!(control.on_wheel(POINTER, f64::NAN, Modifiers::CTRL), Outcome::Ignored);
}

#[test]
fn extra_modifiers_do_not_block_the_wheel() {
    let mut control = ManipulationControl::default();
    let outcome = control.on_wheel(POINTER, 120.0, Modifiers::CTRL | Modifiers::ALT);
    assert_eq!(outcome, Outcome::Applied);
    assert!(close(control.engine().scale(), 1.1));
}

#[test]
fn wheel_zoom_steps_follow_the_configuration() {
    let mut config = ManipulationConfig::default();
    config.wheel_zoom_in = 2.0;
    config.wheel_rotate_step = 45.0;
    let mut control = ManipulationControl::new(config);
    control.on_wheel(POINTER, 1.0, Modifiers::CTRL);
    assert!(close(control.engine().scale(), 2.0));
    control.on_wheel(POINTER, -1.0, Modifiers::CTRL | Modifiers::SHIFT);
    assert!(close(control.engine().rotation_degrees(), 45.0));
}

#[test]
fn pinch_stream_keeps_content_under_the_fingers() {
    let mut control = ManipulationControl::default();
    let center = Point::new(300.0, 300.0);
    let content = control.engine().view_to_content(center);

    for _ in 0..10 {
        let outcome = control.on_gesture_delta(center, 2.0, 1.05, Vec2::ZERO);
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(control.engine().phase(), Phase::DeltaInProgress);
    }
    control.on_gesture_completed();

    assert_eq!(control.engine().phase(), Phase::Idle);
    assert!(close(control.engine().rotation_degrees(), 20.0));
    assert!(close(control.engine().scale(), 1.05_f64.powi(10)));
    let back = control.engine().content_to_view(content);
    assert!((back - center).hypot() < 1e-9);
}

#[test]
fn drag_stream_accumulates_translation() {
    let mut control = ManipulationControl::default();
    let mut position = Point::new(10.0, 10.0);
    for _ in 0..4 {
        control.on_gesture_delta(position, 0.0, 1.0, Vec2::new(5.0, 2.5));
        position += Vec2::new(5.0, 2.5);
    }
    control.on_gesture_completed();
    let moved = control.engine().translation();
    assert!((moved - Vec2::new(20.0, 10.0)).hypot() < 1e-9);
}

#[test]
fn pinch_past_the_limit_keeps_panning() {
    let mut control = ManipulationControl::default();
    control.on_wheel(POINTER, 1.0, Modifiers::CTRL);
    for _ in 0..16 {
        control.on_wheel(POINTER, 1.0, Modifiers::CTRL);
    }
    let scale = control.engine().scale();
    assert!(scale <= 5.0);

    let before = control.engine().translation();
    let outcome = control.on_gesture_delta(POINTER, 0.0, 2.0, Vec2::new(10.0, 0.0));
    assert_eq!(outcome, Outcome::ScaleSuppressed);
    assert!(close(control.engine().scale(), scale));
    let moved = control.engine().translation() - before;
    assert!((moved - Vec2::new(10.0, 0.0)).hypot() < 1e-9);
}

#[test]
fn double_tap_toggles_zoom() {
    let mut control = ManipulationControl::default();
    assert_eq!(control.on_double_tap(POINTER), Outcome::Applied);
    assert!(close(control.engine().scale(), 3.0));
    assert_eq!(control.on_double_tap(POINTER), Outcome::Applied);
    assert!(close(control.engine().scale(), 1.0));
}

#[test]
fn resize_updates_the_clip_only() {
    let mut control = ManipulationControl::default();
    assert_eq!(control.clip(), Rect::ZERO);
    control.on_resize(Size::new(640.0, 480.0));
    assert_eq!(control.clip(), Rect::new(0.0, 0.0, 640.0, 480.0));
    assert_eq!(control.render_transform(), kurbo::Affine::IDENTITY);
}

#[test]
fn event_dispatch_matches_direct_calls() {
    let events = [
        GestureEvent::Resize(Size::new(800.0, 600.0)),
        GestureEvent::Delta {
            position: Point::new(400.0, 300.0),
            rotation_degrees: 12.0,
            scale: 1.2,
            translation: Vec2::new(-4.0, 9.0),
        },
        GestureEvent::Completed,
        GestureEvent::Wheel {
            position: POINTER,
            delta: -1.0,
            modifiers: Modifiers::CTRL,
        },
        GestureEvent::DoubleTap {
            position: Point::new(50.0, 60.0),
        },
    ];

    let mut dispatched = ManipulationControl::default();
    let outcomes: Vec<Outcome> = events.iter().map(|e| dispatched.handle(*e)).collect();
    assert_eq!(
        outcomes,
        [
            Outcome::Ignored,
            Outcome::Applied,
            Outcome::Ignored,
            Outcome::Applied,
            Outcome::Applied,
        ]
    );

    let mut direct = ManipulationControl::default();
    direct.on_resize(Size::new(800.0, 600.0));
    direct.on_gesture_delta(Point::new(400.0, 300.0), 12.0, 1.2, Vec2::new(-4.0, 9.0));
    direct.on_gesture_completed();
    direct.on_wheel(POINTER, -1.0, Modifiers::CTRL);
    direct.on_double_tap(Point::new(50.0, 60.0));

    assert_eq!(dispatched.render_transform(), direct.render_transform());
    assert_eq!(dispatched.clip(), direct.clip());
}

#[test]
fn reset_view_returns_to_identity() {
    let mut control = ManipulationControl::default();
    control.on_gesture_delta(POINTER, 30.0, 1.5, Vec2::new(40.0, 40.0));
    control.reset_view();
    assert_eq!(control.render_transform(), kurbo::Affine::IDENTITY);
    assert_eq!(control.engine().phase(), Phase::Idle);
}
