// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Helpers for uniform-scale similarity transforms (rotation + uniform scale + translation).
//!
//! Every transform produced by the engine has the linear part
//! `[k·cos θ, k·sin θ, −k·sin θ, k·cos θ]`, so scale and rotation can be read
//! back from the first column alone.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Vec2};

/// Uniform scale factor, `hypot(m11, m21)`.
///
/// Equal to `|m11|` whenever the rotation component is zero.
pub(crate) fn scale_of(transform: Affine) -> f64 {
    let [a, b, ..] = transform.as_coeffs();
    a.hypot(b)
}

/// Rotation in degrees, `atan2(m21, m11)`.
///
/// Positive angles turn `+x` towards `+y`, which is clockwise in a y-down view.
pub(crate) fn rotation_degrees_of(transform: Affine) -> f64 {
    let [a, b, ..] = transform.as_coeffs();
    b.atan2(a).to_degrees()
}

/// Rotation by `degrees` and uniform `scale` about `pivot`, then `translation`.
pub(crate) fn pivoted(pivot: Point, degrees: f64, scale: f64, translation: Vec2) -> Affine {
    let pivot = pivot.to_vec2();
    Affine::translate(translation + pivot)
        * Affine::rotate(degrees.to_radians())
        * Affine::scale(scale)
        * Affine::translate(-pivot)
}

/// Projects `transform` onto the nearest exact similarity.
///
/// Products of similarities are similarities up to rounding; this removes the
/// rounding so that `m11 == m22` and `m12 == -m21` hold bit for bit.
pub(crate) fn snap(transform: Affine) -> Affine {
    let [a, b, c, d, e, f] = transform.as_coeffs();
    let cos = 0.5 * (a + d);
    let sin = 0.5 * (b - c);
    Affine::new([cos, sin, -sin, cos, e, f])
}

/// Maps a view-space displacement through the inverse linear part of `transform`.
pub(crate) fn inverse_vector(transform: Affine, v: Vec2) -> Vec2 {
    let inv = transform.inverse();
    (inv * v.to_point()) - (inv * Point::ORIGIN)
}
