// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-facing surface: map raw gesture callbacks onto engine operations.
//!
//! A host framework delivers already-normalized input (positions in the
//! control's view coordinates, per-tick rotation/scale/translation deltas,
//! wheel ticks with modifier keys) and reads back
//! [`ManipulationControl::render_transform`] after every call.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use understory_manipulation::{ManipulationControl, Modifiers};
//!
//! let mut control = ManipulationControl::default();
//! control.on_resize(Size::new(800.0, 600.0));
//!
//! // Pinch at the center of the view, then release.
//! control.on_gesture_delta(Point::new(400.0, 300.0), 0.0, 1.5, Vec2::ZERO);
//! control.on_gesture_completed();
//!
//! // Ctrl + wheel away from the user zooms in about the pointer.
//! control.on_wheel(Point::new(100.0, 100.0), 120.0, Modifiers::CTRL);
//!
//! let transform = control.render_transform();
//! assert_eq!(transform.as_coeffs()[0], transform.as_coeffs()[3]);
//! ```

use core::cmp::Ordering;

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::engine::{Outcome, TransformEngine};
use crate::trace::ManipulationTrace;
use crate::{ManipulationConfig, PivotedDelta};

bitflags::bitflags! {
    /// Modifier keys held during a wheel event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Control key.
        const CTRL  = 0b0000_0001;
        /// Shift key.
        const SHIFT = 0b0000_0010;
        /// Alt / Option key.
        const ALT   = 0b0000_0100;
        /// Meta / Command / Windows key.
        const META  = 0b0000_1000;
    }
}

/// One inbound event from the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// One tick of a continuous manipulation.
    Delta {
        /// Manipulation origin in view coordinates.
        position: Point,
        /// Rotation since the previous tick, in degrees.
        rotation_degrees: f64,
        /// Scale since the previous tick.
        scale: f64,
        /// Translation since the previous tick, in view coordinates.
        translation: Vec2,
    },
    /// The continuous manipulation ended.
    Completed,
    /// A mouse wheel or trackpad scroll tick.
    Wheel {
        /// Pointer position in view coordinates.
        position: Point,
        /// Wheel delta; only its sign is used.
        delta: f64,
        /// Modifier keys held.
        modifiers: Modifiers,
    },
    /// A double tap or double click.
    DoubleTap {
        /// Tap position in view coordinates.
        position: Point,
    },
    /// The control was resized.
    Resize(Size),
}

/// A manipulable content surface: a [`TransformEngine`] plus the view clip.
///
/// Wheel handling follows the classic control: Ctrl+Shift rotates by a fixed
/// step, Ctrl alone zooms by a fixed multiplier, and an unmodified wheel is
/// left to the host (for scrolling) and reported as [`Outcome::Ignored`].
#[derive(Clone, Debug)]
pub struct ManipulationControl<T = ()> {
    engine: TransformEngine<T>,
    clip: Rect,
}

impl ManipulationControl {
    /// Creates a control with the given configuration and no trace sink.
    #[must_use]
    pub fn new(config: ManipulationConfig) -> Self {
        Self::with_trace(config, ())
    }
}

impl Default for ManipulationControl {
    fn default() -> Self {
        Self::new(ManipulationConfig::default())
    }
}

impl<T: ManipulationTrace> ManipulationControl<T> {
    /// Creates a control reporting to `trace`.
    pub fn with_trace(config: ManipulationConfig, trace: T) -> Self {
        Self {
            engine: TransformEngine::with_trace(config, trace),
            clip: Rect::ZERO,
        }
    }

    /// The underlying engine.
    pub fn engine(&self) -> &TransformEngine<T> {
        &self.engine
    }

    /// Mutable access to the underlying engine.
    pub fn engine_mut(&mut self) -> &mut TransformEngine<T> {
        &mut self.engine
    }

    /// The transform the host should render the content with.
    #[must_use]
    pub fn render_transform(&self) -> Affine {
        self.engine.rendered()
    }

    /// Clip rectangle covering the control, in view coordinates.
    #[must_use]
    pub fn clip(&self) -> Rect {
        self.clip
    }

    /// Dispatches one host event.
    ///
    /// Completion and resize never change the render transform and report
    /// [`Outcome::Ignored`].
    pub fn handle(&mut self, event: GestureEvent) -> Outcome {
        match event {
            GestureEvent::Delta {
                position,
                rotation_degrees,
                scale,
                translation,
            } => self.on_gesture_delta(position, rotation_degrees, scale, translation),
            GestureEvent::Completed => {
                self.on_gesture_completed();
                Outcome::Ignored
            }
            GestureEvent::Wheel {
                position,
                delta,
                modifiers,
            } => self.on_wheel(position, delta, modifiers),
            GestureEvent::DoubleTap { position } => self.on_double_tap(position),
            GestureEvent::Resize(size) => {
                self.on_resize(size);
                Outcome::Ignored
            }
        }
    }

    /// Applies one tick of a continuous manipulation.
    ///
    /// The previous tick is folded first, so every tick pivots about the
    /// content point currently under `position`.
    pub fn on_gesture_delta(
        &mut self,
        position: Point,
        rotation_degrees: f64,
        scale: f64,
        translation: Vec2,
    ) -> Outcome {
        let pivot = self.engine.reset_pivot(position);
        self.engine.apply_continuous_delta(
            PivotedDelta::new(pivot)
                .with_rotation(rotation_degrees)
                .with_scale(scale)
                .with_translation(translation),
        )
    }

    /// Commits the continuous manipulation in progress.
    pub fn on_gesture_completed(&mut self) {
        self.engine.flatten();
    }

    /// Applies one wheel tick.
    ///
    /// Only the sign of `delta` matters: positive (away from the user) zooms
    /// in or rotates counterclockwise, negative zooms out or rotates clockwise.
    /// A zero or NaN delta is ignored.
    pub fn on_wheel(&mut self, position: Point, delta: f64, modifiers: Modifiers) -> Outcome {
        if !modifiers.contains(Modifiers::CTRL) {
            return Outcome::Ignored;
        }
        let away = match delta.partial_cmp(&0.0) {
            Some(Ordering::Greater) => true,
            Some(Ordering::Less) => false,
            _ => return Outcome::Ignored,
        };
        let config = *self.engine.config();
        if modifiers.contains(Modifiers::SHIFT) {
            let step = config.wheel_rotate_step;
            self.engine
                .apply_discrete_rotate(position, if away { -step } else { step })
        } else {
            let multiplier = if away {
                config.wheel_zoom_in
            } else {
                config.wheel_zoom_out
            };
            self.engine.apply_discrete_zoom(position, multiplier)
        }
    }

    /// Applies a double tap.
    pub fn on_double_tap(&mut self, position: Point) -> Outcome {
        self.engine.apply_double_tap_zoom(position)
    }

    /// Updates the clip to cover the resized control.
    pub fn on_resize(&mut self, size: Size) {
        self.clip = size.to_rect();
    }

    /// Returns the content to the identity transform.
    pub fn reset_view(&mut self) {
        self.engine.reset();
    }
}
