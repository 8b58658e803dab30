//! The camera rig controller: input capture, target motion, smoothing, and zoom limits.

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_input::{mouse::AccumulatedMouseScroll, prelude::*};
use bevy_window::RequestRedraw;

pub mod component;
pub mod input;
pub mod motion;
pub mod smoothing;
pub mod zoom;

/// Adds [`CameraRig`](component::CameraRig) functionality to the app.
pub struct CameraRigPlugin;

impl Plugin for CameraRigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<AccumulatedMouseScroll>()
            .add_event::<RequestRedraw>()
            .add_systems(
                Update,
                component::CameraRig::update_rigs.in_set(CameraRigSystems),
            )
            .register_type::<component::CameraRig>();
    }
}

/// System set containing the per-frame rig update.
#[derive(Debug, Clone, PartialEq, Eq, Hash, SystemSet)]
pub struct CameraRigSystems;
