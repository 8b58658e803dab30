//! Frame-rate independent follow of the rig toward its [`RigTarget`].

use bevy_math::prelude::*;
use bevy_reflect::prelude::*;
use bevy_transform::prelude::*;

use super::motion::RigTarget;

/// How quickly the rig catches up with its desired pose and zoom.
///
/// Each frame the rig covers `delta_seconds * movement_time` of the remaining distance to its
/// target. There is no velocity state, so releasing every input stops the rig as soon as it
/// arrives, without overshoot.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Smoothing {
    /// Fraction of the remaining distance covered per second of frame time.
    pub movement_time: f32,
}

impl Default for Smoothing {
    fn default() -> Self {
        Self { movement_time: 5.0 }
    }
}

impl Smoothing {
    /// The interpolation factor for a frame lasting `delta_seconds`, clamped to `[0, 1]`.
    pub fn blend_factor(&self, delta_seconds: f32) -> f32 {
        (delta_seconds * self.movement_time).clamp(0.0, 1.0)
    }

    /// Move the rig transform and camera offset toward `target`, returning the blend factor used.
    pub fn follow(
        &self,
        rig: &mut Transform,
        camera_offset: &mut Vec3,
        target: &RigTarget,
        delta_seconds: f32,
    ) -> f32 {
        let factor = self.blend_factor(delta_seconds);
        if factor <= 0.0 {
            return factor;
        }
        if factor >= 1.0 {
            // Land exactly, lerp at `t = 1` can be off by an ulp.
            rig.translation = target.translation;
            rig.rotation = target.rotation;
            *camera_offset = target.zoom;
            return factor;
        }
        rig.translation = rig.translation.lerp(target.translation, factor);
        rig.rotation = rig.rotation.lerp(target.rotation, factor);
        *camera_offset = camera_offset.lerp(target.zoom, factor);
        factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> RigTarget {
        RigTarget {
            translation: Vec3::new(4.0, 0.0, -8.0),
            rotation: Quat::from_rotation_y(1.0),
            zoom: Vec3::new(0.0, 60.0, 60.0),
        }
    }

    #[test]
    fn zero_delta_is_a_no_op() {
        let smoothing = Smoothing::default();
        let start = Transform::from_xyz(1.0, 2.0, 3.0).with_rotation(Quat::from_rotation_y(0.3));
        let mut rig = start;
        let mut offset = Vec3::new(0.0, 100.0, 100.0);

        let factor = smoothing.follow(&mut rig, &mut offset, &target(), 0.0);

        assert_eq!(factor, 0.0);
        assert_eq!(rig, start);
        assert_eq!(offset, Vec3::new(0.0, 100.0, 100.0));
    }

    #[test]
    fn long_frames_land_exactly_on_target() {
        let smoothing = Smoothing::default();
        let mut rig = Transform::from_xyz(1.0, 2.0, 3.0);
        let mut offset = Vec3::new(0.0, 100.0, 100.0);
        let target = target();

        let factor = smoothing.follow(&mut rig, &mut offset, &target, 10.0);

        assert_eq!(factor, 1.0);
        assert_eq!(rig.translation, target.translation);
        assert_eq!(rig.rotation, target.rotation);
        assert_eq!(offset, target.zoom);
    }

    #[test]
    fn partial_frames_cover_a_fraction_of_the_distance() {
        let smoothing = Smoothing { movement_time: 5.0 };
        let mut rig = Transform::IDENTITY;
        let mut offset = Vec3::ZERO;
        let target = RigTarget {
            translation: Vec3::new(10.0, 0.0, 0.0),
            rotation: Quat::IDENTITY,
            zoom: Vec3::new(0.0, 10.0, 0.0),
        };

        let factor = smoothing.follow(&mut rig, &mut offset, &target, 0.1);

        assert!((factor - 0.5).abs() < 1e-6);
        assert!(rig.translation.abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), 1e-5));
        assert!(offset.abs_diff_eq(Vec3::new(0.0, 5.0, 0.0), 1e-5));
    }

    #[test]
    fn interpolated_rotation_stays_normalized() {
        let smoothing = Smoothing::default();
        let mut rig = Transform::IDENTITY;
        let mut offset = Vec3::ZERO;
        smoothing.follow(&mut rig, &mut offset, &target(), 0.05);
        assert!(rig.rotation.is_normalized());
    }

    #[test]
    fn negative_delta_is_treated_as_zero() {
        assert_eq!(Smoothing::default().blend_factor(-1.0), 0.0);
    }
}
