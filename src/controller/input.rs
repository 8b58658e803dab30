//! Per-frame input snapshots consumed by the rig controller.
//!
//! The controller never reads Bevy input resources directly. Instead, [`RigInput`] is captured
//! once per frame and handed to [`RigMotion::update`](super::motion::RigMotion::update), which
//! keeps the controller logic usable and testable without a window or a renderer.

use bevy_input::{
    mouse::{AccumulatedMouseScroll, MouseScrollUnit},
    prelude::*,
};
use bevy_math::prelude::*;
use bevy_reflect::prelude::*;

/// Pixel scroll deltas are divided by this to get wheel notches.
pub const PIXELS_PER_SCROLL_LINE: f32 = 100.0;

/// Buttons and keys used to control a rig.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct RigKeyBindings {
    /// Hold to drag the ground under the pointer.
    pub drag: MouseButton,
    /// Hold to yaw the rig with horizontal pointer motion. Dragging right turns the view right.
    pub rotate: MouseButton,
    /// Hold to use the fast movement speed.
    pub fast: KeyCode,
    /// Move along the rig's forward axis.
    pub forward: KeyCode,
    /// Move against the rig's forward axis.
    pub back: KeyCode,
    /// Move against the rig's right axis.
    pub left: KeyCode,
    /// Move along the rig's right axis.
    pub right: KeyCode,
    /// Yaw the rig to the left, counter-clockwise seen from above. Defaults to `E`.
    pub yaw_left: KeyCode,
    /// Yaw the rig to the right, clockwise seen from above. Defaults to `Q`, so the scene swings
    /// to the left.
    pub yaw_right: KeyCode,
    /// Step the camera toward the rig.
    pub zoom_in: KeyCode,
    /// Step the camera away from the rig.
    pub zoom_out: KeyCode,
}

impl Default for RigKeyBindings {
    fn default() -> Self {
        Self {
            drag: MouseButton::Left,
            rotate: MouseButton::Middle,
            fast: KeyCode::ShiftLeft,
            forward: KeyCode::ArrowUp,
            back: KeyCode::ArrowDown,
            left: KeyCode::ArrowLeft,
            right: KeyCode::ArrowRight,
            yaw_left: KeyCode::KeyE,
            yaw_right: KeyCode::KeyQ,
            zoom_in: KeyCode::KeyR,
            zoom_out: KeyCode::KeyF,
        }
    }
}

/// State of a single button for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub struct ButtonState {
    /// The button went down this frame.
    pub just_pressed: bool,
    /// The button is down this frame, including the frame it went down.
    pub pressed: bool,
}

impl ButtonState {
    /// A button that went down this frame.
    pub const JUST_PRESSED: Self = Self {
        just_pressed: true,
        pressed: true,
    };

    /// A button that has been down since an earlier frame.
    pub const HELD: Self = Self {
        just_pressed: false,
        pressed: true,
    };

    /// Read the state of `input` from a Bevy [`ButtonInput`].
    pub fn read<T>(buttons: &ButtonInput<T>, input: T) -> Self
    where
        T: Copy + Eq + std::hash::Hash + Send + Sync + 'static,
    {
        Self {
            just_pressed: buttons.just_pressed(input),
            pressed: buttons.pressed(input),
        }
    }
}

/// Everything the rig controller needs to know about the user's input for one frame.
#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct RigInput {
    /// The pointer position in logical viewport pixels, if the pointer is over the viewport.
    pub pointer: Option<Vec2>,
    /// The point on the ground plane under the pointer, if the pointer ray hits it.
    pub ground: Option<Vec3>,
    /// Wheel notches scrolled this frame. Positive values zoom in.
    pub scroll: f32,
    /// The ground drag button.
    pub drag: ButtonState,
    /// The rotate button.
    pub rotate: ButtonState,
    /// The fast movement modifier.
    pub fast: bool,
    /// Move forward.
    pub forward: bool,
    /// Move back.
    pub back: bool,
    /// Move left.
    pub left: bool,
    /// Move right.
    pub right: bool,
    /// Yaw left.
    pub yaw_left: bool,
    /// Yaw right.
    pub yaw_right: bool,
    /// Zoom in one step.
    pub zoom_in: bool,
    /// Zoom out one step.
    pub zoom_out: bool,
}

impl RigInput {
    /// Capture the buttons, keys, and scroll wheel for this frame using `bindings`.
    ///
    /// The pointer and ground hit depend on the window and camera, and are filled in separately
    /// with [`RigInput::with_pointer`].
    pub fn capture(
        bindings: &RigKeyBindings,
        mouse: &ButtonInput<MouseButton>,
        keys: &ButtonInput<KeyCode>,
        scroll: &AccumulatedMouseScroll,
    ) -> Self {
        Self {
            pointer: None,
            ground: None,
            scroll: scroll_notches(scroll.unit, scroll.delta),
            drag: ButtonState::read(mouse, bindings.drag),
            rotate: ButtonState::read(mouse, bindings.rotate),
            fast: keys.pressed(bindings.fast),
            forward: keys.pressed(bindings.forward),
            back: keys.pressed(bindings.back),
            left: keys.pressed(bindings.left),
            right: keys.pressed(bindings.right),
            yaw_left: keys.pressed(bindings.yaw_left),
            yaw_right: keys.pressed(bindings.yaw_right),
            zoom_in: keys.pressed(bindings.zoom_in),
            zoom_out: keys.pressed(bindings.zoom_out),
        }
    }

    /// Attach the pointer position and the ground point under it.
    pub fn with_pointer(self, pointer: Option<Vec2>, ground: Option<Vec3>) -> Self {
        Self {
            pointer,
            ground,
            ..self
        }
    }
}

/// Convert an accumulated scroll delta into wheel notches.
pub fn scroll_notches(unit: MouseScrollUnit, delta: Vec2) -> f32 {
    match unit {
        MouseScrollUnit::Line => delta.y,
        MouseScrollUnit::Pixel => delta.y / PIXELS_PER_SCROLL_LINE,
    }
}

/// Intersect `ray` with the ground plane, the horizontal plane through the world origin.
///
/// Returns `None` if the ray is parallel to the ground or points away from it.
pub fn ground_point(ray: Ray3d) -> Option<Vec3> {
    let distance = ray.intersect_plane(Vec3::ZERO, InfinitePlane3d { normal: Dir3::Y })?;
    Some(ray.get_point(distance))
}
