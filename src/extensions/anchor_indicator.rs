//! A `bevy_camera_rig` extension that draws an indicator on the ground at the drag anchor. This
//! makes it more obvious to users which point of the world they grabbed, and where the pointer
//! has pulled it to.

use std::f32::consts::FRAC_PI_2;

use bevy_app::prelude::*;
use bevy_color::Color;
use bevy_ecs::prelude::*;
use bevy_gizmos::prelude::*;
use bevy_math::{prelude::*, Isometry3d};
use bevy_reflect::prelude::*;

use crate::prelude::*;

/// See the [module](self) docs.
pub struct AnchorIndicatorPlugin;

impl Plugin for AnchorIndicatorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            draw_drag_anchor.after(bevy_transform::systems::propagate_transforms),
        )
        .register_type::<AnchorIndicator>();
    }
}

/// Optional. Configures whether or not a [`CameraRig`] should show an anchor indicator while the
/// ground is being dragged. The indicator will be enabled if this component is not present.
#[derive(Debug, Clone, Component, Reflect)]
pub struct AnchorIndicator {
    /// Should the indicator be visible on this rig?
    pub enabled: bool,
    /// Radius of the ring drawn around the grabbed point, in world units.
    pub radius: f32,
}

impl Default for AnchorIndicator {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 2.0,
        }
    }
}

/// Use gizmos to draw the drag anchors on the ground plane.
pub fn draw_drag_anchor(
    rigs: Query<(&CameraRig, Option<&AnchorIndicator>)>,
    mut gizmos: Gizmos,
) {
    for (rig, indicator) in rigs.iter() {
        let indicator = indicator.cloned().unwrap_or_default();
        if !indicator.enabled {
            continue;
        }
        let Some(motion) = rig.motion() else {
            continue;
        };
        let (Some(start), Some(current)) = (motion.drag_start(), motion.drag_current()) else {
            continue;
        };

        let color = Color::WHITE;
        // Gizmo circles face +Z, lay them flat on the ground.
        let flat = Quat::from_rotation_x(FRAC_PI_2);
        gizmos.circle(Isometry3d::new(start, flat), indicator.radius, color);
        gizmos.circle(Isometry3d::new(current, flat), indicator.radius * 0.5, color);
        gizmos.line(start, current, color);
    }
}
