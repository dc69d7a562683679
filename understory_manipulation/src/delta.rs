// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

use crate::similarity;

/// One gesture increment: rotation and uniform scale about a pivot, then a translation.
///
/// The pivot is expressed in content space, the coordinate space the committed
/// transform maps from (see [`TransformEngine::reset_pivot`]). The translation
/// is expressed in view space so that a pan follows the pointer one to one
/// regardless of the current zoom.
///
/// [`TransformEngine::reset_pivot`]: crate::TransformEngine::reset_pivot
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PivotedDelta {
    /// Fixed point of the rotation and scale, in content space.
    pub pivot: Point,
    /// Signed rotation in degrees; positive is clockwise in a y-down view.
    pub rotation_degrees: f64,
    /// Multiplicative uniform scale; `1.0` is no change.
    pub scale: f64,
    /// Translation in view space.
    pub translation: Vec2,
}

impl PivotedDelta {
    /// A delta that changes nothing, anchored at `pivot`.
    #[must_use]
    pub const fn new(pivot: Point) -> Self {
        Self {
            pivot,
            rotation_degrees: 0.0,
            scale: 1.0,
            translation: Vec2::ZERO,
        }
    }

    /// Returns this delta with the given rotation in degrees.
    #[must_use]
    pub const fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation_degrees = degrees;
        self
    }

    /// Returns this delta with the given scale factor.
    #[must_use]
    pub const fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Returns this delta with the given view-space translation.
    #[must_use]
    pub const fn with_translation(mut self, translation: Vec2) -> Self {
        self.translation = translation;
        self
    }

    /// Returns `true` if every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.pivot.is_finite()
            && self.rotation_degrees.is_finite()
            && self.scale.is_finite()
            && self.translation.is_finite()
    }

    /// The delta as an affine map acting in content space.
    ///
    /// `translation` must already be expressed in content space here; the
    /// engine converts the view-space translation before calling this.
    pub(crate) fn to_content_affine(self, translation: Vec2) -> Affine {
        similarity::pivoted(self.pivot, self.rotation_degrees, self.scale, translation)
    }
}
