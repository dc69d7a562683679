// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostic hooks for manipulation.
//!
//! The engine reports what it applies, rejects and commits through a
//! [`ManipulationTrace`] sink passed at construction. Sinks are invoked
//! synchronously from the mutating call and carry no behavioral contract: the
//! engine never reads anything back from them.
//!
//! `()` is the no-op sink and the default. With the `log` feature enabled,
//! `LogTrace` forwards every event to the `log` facade.

use kurbo::{Affine, Point};

use crate::{PivotedDelta, Rejection};

/// The kind of interaction being applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// One tick of a continuous pan / pinch / rotate manipulation.
    Continuous,
    /// A discrete wheel zoom step.
    WheelZoom,
    /// A discrete wheel rotation step.
    WheelRotate,
    /// A double-tap zoom toggle.
    DoubleTap,
}

/// A callback sink for manipulation diagnostics.
///
/// All methods default to doing nothing, so implementors only override the
/// events they care about.
pub trait ManipulationTrace {
    /// Called when `gesture` starts being applied about `pivot` (content space).
    fn gesture(&mut self, _gesture: Gesture, _pivot: Point) {}

    /// Called with the effective delta, after flag gating and scale suppression.
    fn delta(&mut self, _delta: &PivotedDelta) {}

    /// Called when `gesture` was rejected and left the engine untouched.
    fn rejected(&mut self, _gesture: Gesture, _reason: Rejection) {}

    /// Called after a delta has been folded into the committed transform.
    fn committed(&mut self, _transform: Affine) {}

    /// Called when the engine is reset to the identity transform.
    fn reset(&mut self) {}
}

impl ManipulationTrace for () {}

impl<T: ManipulationTrace + ?Sized> ManipulationTrace for &mut T {
    fn gesture(&mut self, gesture: Gesture, pivot: Point) {
        (**self).gesture(gesture, pivot);
    }

    fn delta(&mut self, delta: &PivotedDelta) {
        (**self).delta(delta);
    }

    fn rejected(&mut self, gesture: Gesture, reason: Rejection) {
        (**self).rejected(gesture, reason);
    }

    fn committed(&mut self, transform: Affine) {
        (**self).committed(transform);
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

/// Forwards manipulation events to the `log` facade.
///
/// Gestures, rejections and resets are logged at `debug`, deltas and commits
/// at `trace`, all under the `understory_manipulation` target.
#[cfg(feature = "log")]
#[derive(Copy, Clone, Debug, Default)]
pub struct LogTrace;

#[cfg(feature = "log")]
const TARGET: &str = "understory_manipulation";

#[cfg(feature = "log")]
impl ManipulationTrace for LogTrace {
    fn gesture(&mut self, gesture: Gesture, pivot: Point) {
        log::debug!(target: TARGET, "{gesture:?} about ({:.3}, {:.3})", pivot.x, pivot.y);
    }

    fn delta(&mut self, delta: &PivotedDelta) {
        log::trace!(
            target: TARGET,
            "delta rotation={:.3}deg scale={:.5} translation=({:.3}, {:.3})",
            delta.rotation_degrees,
            delta.scale,
            delta.translation.x,
            delta.translation.y
        );
    }

    fn rejected(&mut self, gesture: Gesture, reason: Rejection) {
        log::debug!(target: TARGET, "{gesture:?} rejected: {reason:?}");
    }

    fn committed(&mut self, transform: Affine) {
        log::trace!(target: TARGET, "committed {:?}", transform.as_coeffs());
    }

    fn reset(&mut self) {
        log::debug!(target: TARGET, "reset to identity");
    }
}
