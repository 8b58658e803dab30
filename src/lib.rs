//! A camera rig for strategy and builder games, in the style of a top-down RTS camera.
//!
//! The rig is a parent transform holding position and yaw, with a camera child whose local
//! offset encodes zoom. Input never moves the transforms directly: it moves a target pose, and
//! the rig follows that target with frame-rate independent smoothing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let defaults = RigDefaults::default();
//! let camera = commands
//!     .spawn((Camera3d::default(), defaults.camera_transform()))
//!     .id();
//! commands
//!     .spawn((CameraRig::new(camera), defaults.rig_transform()))
//!     .add_child(camera);
//! ```

pub mod controller;
pub mod extensions;

/// Common imports.
pub mod prelude {
    pub use crate::{
        controller::{
            component::{CameraRig, RigDefaults},
            input::{RigInput, RigKeyBindings},
            motion::{RigMotion, RigMovement, RigTarget},
            smoothing::Smoothing,
            zoom::ZoomLimits,
            CameraRigPlugin, CameraRigSystems,
        },
        extensions::reset::ResetRigTrigger,
        DefaultCameraRigPlugins,
    };
}

use bevy_app::{PluginGroup, PluginGroupBuilder};

/// Adds the camera rig plugin and all enabled extensions.
pub struct DefaultCameraRigPlugins;

impl PluginGroup for DefaultCameraRigPlugins {
    fn build(self) -> PluginGroupBuilder {
        let group = PluginGroupBuilder::start::<Self>()
            .add(controller::CameraRigPlugin)
            .add(extensions::reset::ResetRigPlugin);

        #[cfg(feature = "extension_anchor_indicator")]
        let group = group.add(extensions::anchor_indicator::AnchorIndicatorPlugin);

        group
    }
}
