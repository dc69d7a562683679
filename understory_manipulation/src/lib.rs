// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_manipulation --heading-base-level=0

//! Understory Manipulation: fold pan, pinch, rotate, wheel and double-tap
//! gestures into a single 2D affine transform.
//!
//! This crate is the headless core of a "manipulable content" control. A host
//! framework feeds it gesture increments and renders its content with the
//! resulting transform. It focuses on:
//! - Composing incremental rotation / scale / translation deltas, each anchored
//!   at a pivot, in strict arrival order.
//! - Keeping the pivot pinned under the pointer across any number of
//!   increments, by re-deriving it in the committed transform's space before
//!   each one.
//! - Enforcing inclusive zoom limits by rejecting offending increments rather
//!   than clamping them.
//! - Discrete wheel zoom / rotate steps and a double-tap zoom toggle.
//!
//! It does **not** own any scene graph, event loop or rendering backend, and it
//! does no inertia or input-device handling. Callers are expected to:
//! - Normalize device input into per-tick deltas in view coordinates.
//! - Treat their own gesture-completion signal as the commit boundary.
//! - Apply [`ManipulationControl::render_transform`] (or
//!   [`TransformEngine::rendered`]) to their content after every call.
//!
//! ## Engine example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use understory_manipulation::{ManipulationConfig, PivotedDelta, TransformEngine};
//!
//! let mut engine = TransformEngine::new(ManipulationConfig::default());
//!
//! // One tick of a two-finger gesture centered at (200, 150) in the view.
//! let pivot = engine.reset_pivot(Point::new(200.0, 150.0));
//! engine.apply_continuous_delta(
//!     PivotedDelta::new(pivot)
//!         .with_rotation(10.0)
//!         .with_scale(1.25)
//!         .with_translation(Vec2::new(4.0, 0.0)),
//! );
//! // The gesture ended: fold it into the committed transform.
//! engine.flatten();
//!
//! assert!((engine.scale() - 1.25).abs() < 1e-12);
//! assert!((engine.rotation_degrees() - 10.0).abs() < 1e-9);
//! ```
//!
//! ## Zoom limits
//!
//! ```rust
//! use kurbo::Point;
//! use understory_manipulation::{Outcome, Rejection, TransformEngine};
//!
//! let mut engine = TransformEngine::default(); // zoom limited to [0.2, 5.0]
//! assert_eq!(engine.apply_discrete_zoom(Point::ZERO, 4.0), Outcome::Applied);
//! assert_eq!(
//!     engine.apply_discrete_zoom(Point::ZERO, 1.5),
//!     Outcome::Rejected(Rejection::OutOfZoomRange)
//! );
//! assert!((engine.scale() - 4.0).abs() < 1e-12);
//! ```
//!
//! ## Design notes
//!
//! - Host positions are in view coordinates. The committed transform maps
//!   content coordinates into view coordinates.
//! - The working delta lives in content space and is applied before the
//!   committed transform; translations are converted so that pans follow the
//!   pointer one to one at any zoom.
//! - Every produced transform is snapped to an exact similarity, so scale and
//!   rotation can be read from `m11` / `m21` and `m11 == m22` always holds.
//! - Diagnostics go through a [`ManipulationTrace`] sink chosen at
//!   construction; `()` is the no-op default.
//!
//! ## Features
//!
//! - `std` (default): forward `std` to Kurbo.
//! - `libm`: forward `libm` to Kurbo for `no_std` builds.
//! - `log`: enable `trace::LogTrace`, a sink that forwards to the
//!   `log` facade.
//!
//! This crate is `no_std`.

#![no_std]

mod config;
mod control;
mod delta;
mod engine;
mod similarity;
pub mod trace;

pub use config::{Handles, InvalidZoomLimits, ManipulationConfig};
pub use control::{GestureEvent, ManipulationControl, Modifiers};
pub use delta::PivotedDelta;
pub use engine::{Outcome, Phase, Rejection, TransformEngine, TransformEngineDebugInfo};
pub use trace::{Gesture, ManipulationTrace};
