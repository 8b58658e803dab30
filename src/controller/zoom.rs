//! Provides [`ZoomLimits`] settings.

use bevy_math::prelude::*;
use bevy_reflect::Reflect;

/// Bound the camera's local offset from the rig, and define how far a single zoom step moves it.
///
/// The zoom of a rig is not a projection scale, it is the translation of the camera relative to
/// its parent rig. Zooming in moves the camera along [`ZoomLimits::step`], zooming out moves it
/// back, and the result is always clamped into the box between [`ZoomLimits::min`] and
/// [`ZoomLimits::max`].
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ZoomLimits {
    /// The offset added to the camera's local position for one zoom-in notch.
    ///
    /// With the default rig the camera sits above and behind the rig, so a step that lowers `y`
    /// and pulls `z` toward the rig moves the camera closer to the ground.
    pub step: Vec3,
    /// The per-axis lower bound of the camera's local offset.
    pub min: Vec3,
    /// The per-axis upper bound of the camera's local offset.
    pub max: Vec3,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            step: Vec3::new(0.0, -5.0, -5.0),
            min: Vec3::new(0.0, 50.0, 50.0),
            max: Vec3::new(0.0, 250.0, 250.0),
        }
    }
}

impl ZoomLimits {
    /// Clamp each axis of `offset` independently into `[min, max]`.
    pub fn clamp(&self, offset: Vec3) -> Vec3 {
        clamp_per_axis(offset, self.min, self.max)
    }

    /// Move `offset` by `notches` zoom steps. Positive values zoom in, negative values zoom out.
    pub fn zoom_in(&self, offset: Vec3, notches: f32) -> Vec3 {
        self.clamp(offset + notches * self.step)
    }

    /// Move `offset` away from the rig by `notches` zoom steps.
    pub fn zoom_out(&self, offset: Vec3, notches: f32) -> Vec3 {
        self.clamp(offset - notches * self.step)
    }
}

/// Clamp `value` into the box spanned by `min` and `max`, one axis at a time.
///
/// Unlike [`Vec3::clamp`], this does not panic when `min > max` on some axis; that axis simply
/// resolves to `max`, matching a `value.max(min).min(max)` reading.
pub fn clamp_per_axis(value: Vec3, min: Vec3, max: Vec3) -> Vec3 {
    Vec3::new(
        value.x.max(min.x).min(max.x),
        value.y.max(min.y).min(max.y),
        value.z.max(min.z).min(max.z),
    )
}
