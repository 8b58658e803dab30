//! Turns a frame of [`RigInput`] into a new [`RigTarget`].

use bevy_log::prelude::*;
use bevy_math::prelude::*;
use bevy_reflect::prelude::*;
use bevy_transform::prelude::*;

use super::{input::RigInput, zoom::ZoomLimits};

/// Horizontal pointer pixels per degree of yaw while rotating with the pointer.
pub const POINTER_PIXELS_PER_DEGREE: f32 = 5.0;

/// Radians under which a rig's rotation counts as arrived.
pub const SETTLED_ANGLE: f32 = 1e-3;

/// Keyboard movement and rotation settings.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct RigMovement {
    /// How far ahead of the rig the target is placed while a movement key is held. The rig
    /// covers roughly `speed * movement_time` units per second.
    pub normal_speed: f32,
    /// Lead distance while the fast modifier is also held.
    pub fast_speed: f32,
    /// Degrees of yaw applied per frame while a yaw key is held. See [`yaw`] for the direction.
    pub rotation_amount: f32,
}

impl Default for RigMovement {
    fn default() -> Self {
        Self {
            normal_speed: 1.0,
            fast_speed: 5.0,
            rotation_amount: 1.0,
        }
    }
}

/// The pose and zoom the rig is moving toward.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct RigTarget {
    /// Desired world position of the rig.
    pub translation: Vec3,
    /// Desired world orientation of the rig.
    pub rotation: Quat,
    /// Desired local offset of the camera from the rig.
    pub zoom: Vec3,
}

impl RigTarget {
    /// A target equal to the rig's current state.
    pub fn from_current(rig: &Transform, camera_offset: Vec3) -> Self {
        Self {
            translation: rig.translation,
            rotation: rig.rotation,
            zoom: camera_offset,
        }
    }

    /// Has the rig reached this target? Positions are compared within `epsilon` world units,
    /// rotations within [`SETTLED_ANGLE`].
    pub fn is_reached(&self, rig: &Transform, camera_offset: Vec3, epsilon: f32) -> bool {
        rig.translation.abs_diff_eq(self.translation, epsilon)
            && camera_offset.abs_diff_eq(self.zoom, epsilon)
            && rig.rotation.angle_between(self.rotation) <= SETTLED_ANGLE
    }
}

/// Runtime state of a rig: the target it is chasing and the anchors of in-progress gestures.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct RigMotion {
    /// The pose and zoom the rig is moving toward.
    pub target: RigTarget,
    /// The keyboard movement speed used during the last update.
    pub movement_speed: f32,
    drag_start: Option<Vec3>,
    drag_current: Option<Vec3>,
    rotate_anchor: Option<Vec2>,
}

impl RigMotion {
    /// Start tracking a rig that is currently at `rig`, with its camera at `camera_offset`.
    pub fn new(rig: &Transform, camera_offset: Vec3, movement: &RigMovement) -> Self {
        Self::from_target(RigTarget::from_current(rig, camera_offset), movement)
    }

    /// Start tracking a rig that should move toward `target`.
    pub fn from_target(target: RigTarget, movement: &RigMovement) -> Self {
        Self {
            target,
            movement_speed: movement.normal_speed,
            drag_start: None,
            drag_current: None,
            rotate_anchor: None,
        }
    }

    /// The ground point grabbed when the current drag started, if a drag is in progress.
    pub fn drag_start(&self) -> Option<Vec3> {
        self.drag_start
    }

    /// The ground point under the pointer during the current drag, if a drag is in progress.
    pub fn drag_current(&self) -> Option<Vec3> {
        self.drag_current
    }

    /// Is the user dragging the ground?
    pub fn is_dragging(&self) -> bool {
        self.drag_start.is_some()
    }

    /// The pointer position at the last frame of the current rotate gesture.
    pub fn rotate_anchor(&self) -> Option<Vec2> {
        self.rotate_anchor
    }

    /// Replace the target, cancelling any gesture in progress.
    pub fn retarget(&mut self, target: RigTarget) {
        self.target = target;
        self.drag_start = None;
        self.drag_current = None;
        self.rotate_anchor = None;
    }

    /// Apply one frame of input. `rig` is the rig's live transform, which pointer drags and
    /// keyboard movement are relative to.
    pub fn update(
        &mut self,
        rig: &Transform,
        input: &RigInput,
        movement: &RigMovement,
        zoom: &ZoomLimits,
    ) {
        self.handle_pointer(rig, input, zoom);
        self.handle_keyboard(rig, input, movement, zoom);
    }

    fn handle_pointer(&mut self, rig: &Transform, input: &RigInput, zoom: &ZoomLimits) {
        if input.scroll != 0.0 {
            self.target.zoom = zoom.zoom_in(self.target.zoom, input.scroll);
        }

        if input.drag.just_pressed {
            self.drag_start = input.ground;
            self.drag_current = input.ground;
            debug!("Drag started at {:?}", self.drag_start);
        }
        if input.drag.pressed {
            self.drag(rig, input.ground);
        } else {
            self.drag_start = None;
            self.drag_current = None;
        }

        if input.rotate.just_pressed {
            self.rotate_anchor = input.pointer;
        }
        if input.rotate.pressed {
            self.rotate(input.pointer);
        } else {
            self.rotate_anchor = None;
        }
    }

    fn drag(&mut self, rig: &Transform, ground: Option<Vec3>) {
        let Some(current) = ground else {
            trace!("Pointer ray missed the ground, keeping the last drag anchor");
            return;
        };
        self.drag_current = Some(current);
        match self.drag_start {
            Some(start) => self.target.translation = rig.translation + (start - current),
            // The press missed the ground, grab the first point that hits instead.
            None => self.drag_start = Some(current),
        }
    }

    fn rotate(&mut self, pointer: Option<Vec2>) {
        let Some(pointer) = pointer else {
            return;
        };
        let Some(anchor) = self.rotate_anchor.replace(pointer) else {
            return;
        };
        let delta = anchor - pointer;
        self.target.rotation = yaw(
            self.target.rotation,
            -delta.x / POINTER_PIXELS_PER_DEGREE,
        );
    }

    fn handle_keyboard(
        &mut self,
        rig: &Transform,
        input: &RigInput,
        movement: &RigMovement,
        zoom: &ZoomLimits,
    ) {
        self.movement_speed = if input.fast {
            movement.fast_speed
        } else {
            movement.normal_speed
        };

        // The target leads the live position by one step, so the distance covered per second
        // depends on the smoothing rate rather than on the frame rate.
        let mut direction = Vec3::ZERO;
        if input.forward {
            direction += *rig.forward();
        }
        if input.back {
            direction -= *rig.forward();
        }
        if input.left {
            direction -= *rig.right();
        }
        if input.right {
            direction += *rig.right();
        }
        if input.forward || input.back || input.left || input.right {
            self.target.translation = rig.translation + direction * self.movement_speed;
        }

        if input.yaw_left {
            self.target.rotation = yaw(self.target.rotation, -movement.rotation_amount);
        }
        if input.yaw_right {
            self.target.rotation = yaw(self.target.rotation, movement.rotation_amount);
        }

        if input.zoom_in {
            self.target.zoom = zoom.zoom_in(self.target.zoom, 1.0);
        }
        if input.zoom_out {
            self.target.zoom = zoom.zoom_out(self.target.zoom, 1.0);
        }
    }
}

/// Rotate `rotation` about the world up axis. Positive angles turn clockwise seen from above,
/// which swings the view to the right.
pub fn yaw(rotation: Quat, degrees: f32) -> Quat {
    (Quat::from_rotation_y(-degrees.to_radians()) * rotation).normalize()
}
