// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

bitflags::bitflags! {
    /// Components a continuous manipulation is allowed to change.
    ///
    /// A continuous delta carrying a component whose flag is unset has that
    /// component replaced by its neutral value (no rotation, unit scale, zero
    /// translation) before it is applied.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Handles: u8 {
        /// Accept translation.
        const PAN    = 0b0000_0001;
        /// Accept rotation.
        const ROTATE = 0b0000_0010;
        /// Accept scale.
        const SCALE  = 0b0000_0100;
    }
}

impl Default for Handles {
    fn default() -> Self {
        Self::all()
    }
}

/// Error returned when zoom limits are not finite and strictly positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvalidZoomLimits {
    /// The requested lower bound.
    pub min_zoom: f64,
    /// The requested upper bound.
    pub max_zoom: f64,
}

impl fmt::Display for InvalidZoomLimits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "zoom limits must be finite and greater than zero, got [{}, {}]",
            self.min_zoom, self.max_zoom
        )
    }
}

impl core::error::Error for InvalidZoomLimits {}

/// Tunable behavior of a [`TransformEngine`](crate::TransformEngine).
///
/// The defaults reproduce the classic manipulation control: zoom limited to
/// `[0.2, 5.0]`, every continuous component accepted, wheel ticks of `1.1`/`0.9`
/// and `15°`, and a double tap that toggles between `1×` and `3×`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ManipulationConfig {
    min_zoom: f64,
    max_zoom: f64,
    /// Components accepted from continuous deltas.
    pub handles: Handles,
    /// Scale multiplier for a wheel tick with a positive delta.
    pub wheel_zoom_in: f64,
    /// Scale multiplier for a wheel tick with a negative delta.
    pub wheel_zoom_out: f64,
    /// Rotation step in degrees for a rotate wheel tick.
    ///
    /// A positive wheel delta rotates by `-wheel_rotate_step`, a negative one by
    /// `+wheel_rotate_step`.
    pub wheel_rotate_step: f64,
    /// Scale a double tap zooms to when the content is not already zoomed in.
    pub double_tap_zoom: f64,
    /// Scale below which a double tap zooms in rather than resetting.
    pub double_tap_threshold: f64,
}

impl Default for ManipulationConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.2,
            max_zoom: 5.0,
            handles: Handles::default(),
            wheel_zoom_in: 1.1,
            wheel_zoom_out: 0.9,
            wheel_rotate_step: 15.0,
            double_tap_zoom: 3.0,
            double_tap_threshold: 1.1,
        }
    }
}

impl ManipulationConfig {
    /// Returns the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this configuration with new zoom limits.
    ///
    /// See [`ManipulationConfig::set_zoom_limits`].
    pub fn with_zoom_limits(
        mut self,
        min_zoom: f64,
        max_zoom: f64,
    ) -> Result<Self, InvalidZoomLimits> {
        self.set_zoom_limits(min_zoom, max_zoom)?;
        Ok(self)
    }

    /// Returns this configuration with the given accepted components.
    #[must_use]
    pub fn with_handles(mut self, handles: Handles) -> Self {
        self.handles = handles;
        self
    }

    /// Sets the inclusive zoom limits.
    ///
    /// Both values must be finite and greater than zero. A reversed pair is
    /// normalized so that `min_zoom <= max_zoom`. On error the previous limits
    /// are kept.
    pub fn set_zoom_limits(
        &mut self,
        min_zoom: f64,
        max_zoom: f64,
    ) -> Result<(), InvalidZoomLimits> {
        let valid = |z: f64| z.is_finite() && z > 0.0;
        if !valid(min_zoom) || !valid(max_zoom) {
            return Err(InvalidZoomLimits { min_zoom, max_zoom });
        }
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        Ok(())
    }

    /// Inclusive lower zoom limit.
    #[must_use]
    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    /// Inclusive upper zoom limit.
    #[must_use]
    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// Returns `true` if `scale` lies within the inclusive zoom limits.
    #[must_use]
    pub fn accepts_scale(&self, scale: f64) -> bool {
        (self.min_zoom..=self.max_zoom).contains(&scale)
    }
}
