// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

use crate::config::{Handles, InvalidZoomLimits, ManipulationConfig};
use crate::delta::PivotedDelta;
use crate::similarity;
use crate::trace::{Gesture, ManipulationTrace};

/// Why an increment was discarded.
///
/// A rejected increment leaves the engine exactly as it was: no flattening,
/// no change to the rendered transform.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// The resulting scale would leave the configured zoom limits.
    OutOfZoomRange,
    /// The input was NaN or infinite, or the resulting transform would be.
    NonFiniteInput,
    /// The scale factor was zero or negative.
    NonPositiveScale,
}

/// Result of feeding one increment to the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The increment was applied in full.
    Applied,
    /// The increment was applied, but its scale component was replaced by `1.0`
    /// because it would have left the zoom limits.
    ScaleSuppressed,
    /// The event does not map to any transform change.
    Ignored,
    /// The increment was discarded.
    Rejected(Rejection),
}

impl Outcome {
    /// Returns `true` if the rendered transform may have changed.
    #[must_use]
    pub fn changed(self) -> bool {
        matches!(self, Self::Applied | Self::ScaleSuppressed)
    }
}

/// Lifecycle of the working delta.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Only the committed transform is live.
    #[default]
    Idle,
    /// A continuous delta is rendered on top of the committed transform but
    /// has not been folded into it yet.
    DeltaInProgress,
}

/// Folds a stream of pivoted gesture increments into one affine transform.
///
/// The engine keeps two pieces of state:
/// - the **committed** transform, mapping content coordinates into view
///   coordinates, which accumulates every finished interaction;
/// - an optional **working delta**, expressed in content space, that is
///   rendered on top of the committed transform while a continuous gesture is
///   in flight.
///
/// The transform to render is always `committed · delta` (the delta applied
/// first, in the committed transform's space). Flattening folds the delta into
/// the committed transform and clears it. Wheel and double-tap steps are
/// atomic: they flatten immediately.
///
/// Every transform the engine produces is a similarity: rotation, uniform
/// scale and translation only, with `m11 == m22` exactly.
///
/// Gestures never fail. Each apply call reports an [`Outcome`]; anything the
/// engine refuses leaves it untouched.
#[derive(Clone, Debug)]
pub struct TransformEngine<T = ()> {
    config: ManipulationConfig,
    committed: Affine,
    delta: Option<Affine>,
    rendered: Affine,
    trace: T,
}

impl TransformEngine {
    /// Creates an engine at the identity transform with no trace sink.
    #[must_use]
    pub fn new(config: ManipulationConfig) -> Self {
        Self::with_trace(config, ())
    }
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self::new(ManipulationConfig::default())
    }
}

impl<T: ManipulationTrace> TransformEngine<T> {
    /// Creates an engine at the identity transform reporting to `trace`.
    pub fn with_trace(config: ManipulationConfig, trace: T) -> Self {
        Self {
            config,
            committed: Affine::IDENTITY,
            delta: None,
            rendered: Affine::IDENTITY,
            trace,
        }
    }

    /// The transform to render content with: committed transform plus any
    /// working delta.
    #[must_use]
    pub fn rendered(&self) -> Affine {
        self.rendered
    }

    /// The transform as of the last flatten.
    #[must_use]
    pub fn committed(&self) -> Affine {
        self.committed
    }

    /// Uniform scale of the rendered transform.
    #[must_use]
    pub fn scale(&self) -> f64 {
        similarity::scale_of(self.rendered)
    }

    /// Rotation of the rendered transform, in degrees.
    #[must_use]
    pub fn rotation_degrees(&self) -> f64 {
        similarity::rotation_degrees_of(self.rendered)
    }

    /// Translation of the rendered transform, in view coordinates.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.rendered.translation()
    }

    /// Returns whether a working delta is waiting to be flattened.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.delta.is_some() {
            Phase::DeltaInProgress
        } else {
            Phase::Idle
        }
    }

    /// Maps a view point onto the content point currently rendered under it.
    #[must_use]
    pub fn view_to_content(&self, pt: Point) -> Point {
        self.rendered.inverse() * pt
    }

    /// Maps a content point to where it is currently rendered in the view.
    #[must_use]
    pub fn content_to_view(&self, pt: Point) -> Point {
        self.rendered * pt
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ManipulationConfig {
        &self.config
    }

    /// Replaces the configuration.
    ///
    /// The current transform is kept as is; new limits and flags only affect
    /// later increments.
    pub fn set_config(&mut self, config: ManipulationConfig) {
        self.config = config;
    }

    /// Sets the inclusive zoom limits. See [`ManipulationConfig::set_zoom_limits`].
    pub fn set_zoom_limits(
        &mut self,
        min_zoom: f64,
        max_zoom: f64,
    ) -> Result<(), InvalidZoomLimits> {
        self.config.set_zoom_limits(min_zoom, max_zoom)
    }

    /// Sets which components continuous deltas may change.
    pub fn set_handles(&mut self, handles: Handles) {
        self.config.handles = handles;
    }

    /// The trace sink.
    pub fn trace(&self) -> &T {
        &self.trace
    }

    /// Mutable access to the trace sink.
    pub fn trace_mut(&mut self) -> &mut T {
        &mut self.trace
    }

    /// Consumes the engine and returns its trace sink.
    pub fn into_trace(self) -> T {
        self.trace
    }

    /// Flattens the working delta and maps a view point into content space.
    ///
    /// Call this at the start of every increment. The returned point is the
    /// content point under `view_point`; using it as the pivot keeps that
    /// content point pinned under the pointer while the delta rotates and
    /// scales around it, however many increments came before.
    pub fn reset_pivot(&mut self, view_point: Point) -> Point {
        self.flatten();
        self.committed.inverse() * view_point
    }

    /// Renders `delta` on top of the committed transform without flattening.
    ///
    /// The pivot must come from [`TransformEngine::reset_pivot`]. Components
    /// whose [`Handles`] flag is unset are neutralized first. If the resulting
    /// scale would leave the zoom limits, the scale component alone is replaced
    /// by `1.0` and the rest of the delta still applies
    /// ([`Outcome::ScaleSuppressed`]); the scale is never clamped to the limit.
    ///
    /// A delta that is non-finite, has a non-positive scale, or would overflow
    /// the transform is rejected. Calling this again before flattening replaces
    /// the working delta.
    pub fn apply_continuous_delta(&mut self, delta: PivotedDelta) -> Outcome {
        let gesture = Gesture::Continuous;
        if let Err(reason) = validate(&delta) {
            return self.reject(gesture, reason);
        }

        let handles = self.config.handles;
        let mut effective = PivotedDelta {
            pivot: delta.pivot,
            rotation_degrees: if handles.contains(Handles::ROTATE) {
                delta.rotation_degrees
            } else {
                0.0
            },
            scale: if handles.contains(Handles::SCALE) {
                delta.scale
            } else {
                1.0
            },
            translation: if handles.contains(Handles::PAN) {
                delta.translation
            } else {
                Vec2::ZERO
            },
        };

        let mut outcome = Outcome::Applied;
        let (mut content, mut rendered) = compose(self.committed, &effective);
        // Rotation and pan alone never count against the zoom limits.
        if effective.scale != 1.0 && !self.config.accepts_scale(similarity::scale_of(rendered)) {
            effective.scale = 1.0;
            (content, rendered) = compose(self.committed, &effective);
            outcome = Outcome::ScaleSuppressed;
        }
        if !rendered.is_finite() {
            return self.reject(gesture, Rejection::NonFiniteInput);
        }

        self.trace.gesture(gesture, effective.pivot);
        self.trace.delta(&effective);
        self.delta = Some(content);
        self.rendered = rendered;
        outcome
    }

    /// Folds the working delta into the committed transform.
    ///
    /// This is the commit boundary of a continuous gesture. Does nothing when
    /// no delta is in progress.
    pub fn flatten(&mut self) {
        if self.delta.take().is_some() {
            self.committed = self.rendered;
            self.trace.committed(self.committed);
        }
    }

    /// Zooms by `multiplier` about a view point and commits immediately.
    ///
    /// If `scale() * multiplier` falls outside the zoom limits the whole step
    /// is rejected and nothing changes, not even a pending flatten.
    pub fn apply_discrete_zoom(&mut self, view_point: Point, multiplier: f64) -> Outcome {
        self.apply_atomic(Gesture::WheelZoom, view_point, 0.0, Some(multiplier))
    }

    /// Rotates by `degrees` about a view point and commits immediately.
    ///
    /// Rotation is unbounded; only non-finite input is rejected.
    pub fn apply_discrete_rotate(&mut self, view_point: Point, degrees: f64) -> Outcome {
        self.apply_atomic(Gesture::WheelRotate, view_point, degrees, None)
    }

    /// Toggles zoom about a view point and commits immediately.
    ///
    /// Below [`ManipulationConfig::double_tap_threshold`] this zooms in by
    /// [`ManipulationConfig::double_tap_zoom`]; otherwise it scales by
    /// `1 / scale()`, returning to unit scale. The zoom limits apply as for
    /// [`TransformEngine::apply_discrete_zoom`].
    pub fn apply_double_tap_zoom(&mut self, view_point: Point) -> Outcome {
        let current = self.scale();
        let factor = if current < self.config.double_tap_threshold {
            self.config.double_tap_zoom
        } else {
            1.0 / current
        };
        self.apply_atomic(Gesture::DoubleTap, view_point, 0.0, Some(factor))
    }

    /// Discards the committed transform and any working delta.
    pub fn reset(&mut self) {
        self.committed = Affine::IDENTITY;
        self.delta = None;
        self.rendered = Affine::IDENTITY;
        self.trace.reset();
    }

    /// Snapshot of the current engine state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> TransformEngineDebugInfo {
        TransformEngineDebugInfo {
            committed: self.committed,
            rendered: self.rendered,
            scale: self.scale(),
            rotation_degrees: self.rotation_degrees(),
            translation: self.translation(),
            phase: self.phase(),
            min_zoom: self.config.min_zoom(),
            max_zoom: self.config.max_zoom(),
            handles: self.config.handles,
        }
    }

    fn apply_atomic(
        &mut self,
        gesture: Gesture,
        view_point: Point,
        degrees: f64,
        scale: Option<f64>,
    ) -> Outcome {
        let factor = scale.unwrap_or(1.0);
        let requested = PivotedDelta::new(view_point)
            .with_rotation(degrees)
            .with_scale(factor);
        if let Err(reason) = validate(&requested) {
            return self.reject(gesture, reason);
        }
        if scale.is_some() && !self.config.accepts_scale(self.scale() * factor) {
            return self.reject(gesture, Rejection::OutOfZoomRange);
        }

        // Compose against the flattened transform, but only flatten once the
        // step is known to apply.
        let base = self.rendered;
        let delta = PivotedDelta {
            pivot: base.inverse() * view_point,
            ..requested
        };
        let (content, rendered) = compose(base, &delta);
        if !rendered.is_finite() {
            return self.reject(gesture, Rejection::NonFiniteInput);
        }
        self.flatten();
        self.trace.gesture(gesture, delta.pivot);
        self.trace.delta(&delta);
        self.delta = Some(content);
        self.rendered = rendered;
        self.flatten();
        Outcome::Applied
    }

    fn reject(&mut self, gesture: Gesture, reason: Rejection) -> Outcome {
        self.trace.rejected(gesture, reason);
        Outcome::Rejected(reason)
    }
}

/// Returns the content-space delta and the transform it produces on top of `base`.
fn compose(base: Affine, delta: &PivotedDelta) -> (Affine, Affine) {
    let translation = similarity::inverse_vector(base, delta.translation);
    let content = delta.to_content_affine(translation);
    (content, similarity::snap(base * content))
}

fn validate(delta: &PivotedDelta) -> Result<(), Rejection> {
    if !delta.is_finite() {
        Err(Rejection::NonFiniteInput)
    } else if delta.scale <= 0.0 {
        Err(Rejection::NonPositiveScale)
    } else {
        Ok(())
    }
}

/// Debug snapshot of a [`TransformEngine`] state.
#[derive(Clone, Copy, Debug)]
pub struct TransformEngineDebugInfo {
    /// Transform as of the last flatten.
    pub committed: Affine,
    /// Transform currently rendered.
    pub rendered: Affine,
    /// Uniform scale of the rendered transform.
    pub scale: f64,
    /// Rotation of the rendered transform, in degrees.
    pub rotation_degrees: f64,
    /// Translation of the rendered transform.
    pub translation: Vec2,
    /// Whether a working delta is pending.
    pub phase: Phase,
    /// Inclusive lower zoom limit.
    pub min_zoom: f64,
    /// Inclusive upper zoom limit.
    pub max_zoom: f64,
    /// Components accepted from continuous deltas.
    pub handles: Handles,
}
