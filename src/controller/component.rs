//! The primary [`Component`] of the controller, [`CameraRig`].

use std::f32::consts::FRAC_PI_4;

use bevy_ecs::prelude::*;
use bevy_input::{mouse::AccumulatedMouseScroll, prelude::*};
use bevy_log::prelude::*;
use bevy_math::prelude::*;
use bevy_reflect::prelude::*;
use bevy_render::prelude::*;
use bevy_time::prelude::*;
use bevy_transform::prelude::*;
use bevy_window::{PrimaryWindow, RequestRedraw, Window};

use super::{
    input::{ground_point, RigInput, RigKeyBindings},
    motion::{RigMotion, RigMovement, RigTarget},
    smoothing::Smoothing,
    zoom::ZoomLimits,
};

/// Distance under which the rig is considered to have arrived at its target.
const SETTLED_EPSILON: f32 = 1e-4;

/// Tracks all state of a camera rig, including its settings and the pose it is moving toward.
///
/// A rig is two entities: the rig itself, carrying this component and a [`Transform`] that holds
/// the rig's position and yaw, and a camera parented to it. The camera's local translation is the
/// zoom offset, so zooming moves the camera toward or away from the rig without touching the
/// rig's own pose.
///
/// # Controls
///
/// With the default [`RigKeyBindings`]:
///
/// - Left mouse: grab the ground under the pointer and drag it.
/// - Middle mouse: yaw the rig with horizontal pointer motion, dragging right turns right.
/// - Scroll, `R`, `F`: zoom in and out.
/// - Arrow keys: move, hold left shift to move faster.
/// - `Q`, `E`: yaw the rig right and left, swinging the scene left and right.
///
/// # Moving the Camera
///
/// The [`CameraRigPlugin`](crate::controller::CameraRigPlugin) reads Bevy's input resources once
/// per frame and calls [`CameraRig::update_rig`]. To drive a rig manually, build a [`RigInput`]
/// and call [`CameraRig::update_rig`] yourself, or overwrite the target in
/// [`CameraRig::motion_mut`].
#[derive(Debug, Clone, Reflect, Component)]
pub struct CameraRig {
    /// The camera entity whose local translation encodes zoom. Usually a child of the rig.
    pub camera: Entity,
    /// Should the rig respond to input?
    pub enabled: bool,
    /// Keyboard movement speeds and yaw amount.
    pub movement: RigMovement,
    /// How quickly the rig catches up with its target.
    pub smoothing: Smoothing,
    /// Zoom step and the box the camera offset is clamped into.
    pub zoom_limits: ZoomLimits,
    /// Buttons and keys that control the rig.
    pub key_bindings: RigKeyBindings,
    /// The pose used when spawning the rig and when resetting it.
    pub defaults: RigDefaults,
    /// Created from the live transforms on the first frame the rig is updated.
    motion: Option<RigMotion>,
}

impl CameraRig {
    /// Create a new rig component driving `camera`.
    pub fn new(camera: Entity) -> Self {
        Self {
            camera,
            enabled: true,
            movement: Default::default(),
            smoothing: Default::default(),
            zoom_limits: Default::default(),
            key_bindings: Default::default(),
            defaults: Default::default(),
            motion: None,
        }
    }

    /// Set the movement settings of the rig.
    pub fn with_movement(self, movement: RigMovement) -> Self {
        Self { movement, ..self }
    }

    /// Set the smoothing of the rig.
    pub fn with_smoothing(self, smoothing: Smoothing) -> Self {
        Self { smoothing, ..self }
    }

    /// Set the zoom step and limits of the rig.
    pub fn with_zoom_limits(self, zoom_limits: ZoomLimits) -> Self {
        Self {
            zoom_limits,
            ..self
        }
    }

    /// Set the key bindings of the rig.
    pub fn with_key_bindings(self, key_bindings: RigKeyBindings) -> Self {
        Self {
            key_bindings,
            ..self
        }
    }

    /// Set the default pose of the rig.
    pub fn with_defaults(self, defaults: RigDefaults) -> Self {
        Self { defaults, ..self }
    }

    /// Gets the [`RigMotion`], if the rig has been updated at least once.
    pub fn motion(&self) -> Option<&RigMotion> {
        self.motion.as_ref()
    }

    /// Mutable access to the [`RigMotion`], if the rig has been updated at least once.
    pub fn motion_mut(&mut self) -> Option<&mut RigMotion> {
        self.motion.as_mut()
    }

    /// Send the rig back to its [`RigDefaults`]. The rig glides there using its smoothing.
    pub fn reset(&mut self) {
        let target = self.defaults.target();
        match &mut self.motion {
            Some(motion) => motion.retarget(target),
            None => self.motion = Some(RigMotion::from_target(target, &self.movement)),
        }
    }

    /// Apply one frame of `input` and move `rig` and `camera_offset` toward the target.
    ///
    /// Returns `true` while the rig has not yet arrived at its target.
    pub fn update_rig(
        &mut self,
        rig: &mut Transform,
        camera_offset: &mut Vec3,
        input: &RigInput,
        delta_seconds: f32,
    ) -> bool {
        let (current, offset, movement) = (*rig, *camera_offset, self.movement);
        let motion = self.motion.get_or_insert_with(|| {
            debug!("Camera rig activated at {}", current.translation);
            RigMotion::new(&current, offset, &movement)
        });
        if self.enabled {
            motion.update(rig, input, &movement, &self.zoom_limits);
        }
        self.smoothing
            .follow(rig, camera_offset, &motion.target, delta_seconds);
        !motion
            .target
            .is_reached(rig, *camera_offset, SETTLED_EPSILON)
    }

    /// Update the transforms of all rigs and their cameras. Called once per frame.
    #[allow(clippy::too_many_arguments)]
    pub fn update_rigs(
        mut rigs: Query<(&mut CameraRig, &mut Transform)>,
        mut cameras: Query<
            (&mut Transform, Option<&Camera>, Option<&GlobalTransform>),
            Without<CameraRig>,
        >,
        windows: Query<&Window, With<PrimaryWindow>>,
        mouse: Res<ButtonInput<MouseButton>>,
        keys: Res<ButtonInput<KeyCode>>,
        scroll: Res<AccumulatedMouseScroll>,
        time: Res<Time>,
        mut redraw: EventWriter<RequestRedraw>,
    ) {
        let pointer = windows.get_single().ok().and_then(Window::cursor_position);
        let delta_seconds = time.delta_secs();

        for (mut rig, mut rig_transform) in rigs.iter_mut() {
            let Ok((mut camera_transform, camera, camera_global)) = cameras.get_mut(rig.camera)
            else {
                warn_once!(
                    "CameraRig camera {:?} does not exist or has no Transform",
                    rig.camera
                );
                continue;
            };

            let ground = match (pointer, camera, camera_global) {
                (Some(pointer), Some(camera), Some(global)) => {
                    pointer_ground(camera, global, pointer)
                }
                _ => None,
            };
            let input = RigInput::capture(&rig.key_bindings, &mouse, &keys, &scroll)
                .with_pointer(pointer, ground);

            let mut next_rig = *rig_transform;
            let mut next_offset = camera_transform.translation;
            let moving = rig.update_rig(&mut next_rig, &mut next_offset, &input, delta_seconds);

            rig_transform.set_if_neq(next_rig);
            if camera_transform.translation != next_offset {
                camera_transform.translation = next_offset;
            }
            if moving {
                redraw.send(RequestRedraw);
            }
        }
    }
}

/// Cast a ray from `camera` through the viewport position `pointer` onto the ground plane.
fn pointer_ground(camera: &Camera, camera_transform: &GlobalTransform, pointer: Vec2) -> Option<Vec3> {
    match camera.viewport_to_world(camera_transform, pointer) {
        Ok(ray) => ground_point(ray),
        Err(error) => {
            trace!("Unable to cast a ray from the pointer: {error:?}");
            None
        }
    }
}

/// The pose a rig starts in, and returns to when reset.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct RigDefaults {
    /// World position of the rig.
    pub rig_position: Vec3,
    /// World orientation of the rig.
    pub rig_rotation: Quat,
    /// Local offset of the camera from the rig.
    pub camera_offset: Vec3,
    /// Local orientation of the camera relative to the rig. The rig never changes this.
    pub camera_rotation: Quat,
}

impl Default for RigDefaults {
    fn default() -> Self {
        Self {
            rig_position: Vec3::new(10.0, 10.0, 5.0),
            rig_rotation: Quat::IDENTITY,
            camera_offset: Vec3::new(0.0, 250.0, 250.0),
            camera_rotation: Quat::from_rotation_x(-FRAC_PI_4),
        }
    }
}

impl RigDefaults {
    /// The default [`Transform`] of the rig entity.
    pub fn rig_transform(&self) -> Transform {
        Transform::from_translation(self.rig_position).with_rotation(self.rig_rotation)
    }

    /// The default local [`Transform`] of the camera entity.
    pub fn camera_transform(&self) -> Transform {
        Transform::from_translation(self.camera_offset).with_rotation(self.camera_rotation)
    }

    /// The default pose and zoom as a [`RigTarget`].
    pub fn target(&self) -> RigTarget {
        RigTarget {
            translation: self.rig_position,
            rotation: self.rig_rotation,
            zoom: self.camera_offset,
        }
    }
}
