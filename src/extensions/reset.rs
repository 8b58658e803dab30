//! A `bevy_camera_rig` extension that sends a rig back to its default pose and zoom.
//!
//! The rig is not teleported. Its target is replaced with [`RigDefaults`](crate::prelude::RigDefaults)
//! and it glides there with its usual smoothing.

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_log::prelude::*;
use bevy_window::RequestRedraw;

use crate::prelude::*;

/// See the [module](self) docs.
pub struct ResetRigPlugin;

impl Plugin for ResetRigPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ResetRigTrigger>()
            .add_event::<RequestRedraw>()
            // In PostUpdate so we don't miss users sending this in Update. The rig starts moving
            // on the next frame.
            .add_systems(PostUpdate, ResetRigTrigger::receive);
    }
}

/// Send this event to return a rig to its defaults.
#[derive(Debug, Clone, Copy, Event)]
pub struct ResetRigTrigger {
    /// The rig entity to reset.
    pub rig: Entity,
}

impl ResetRigTrigger {
    fn receive(
        mut events: EventReader<Self>,
        mut rigs: Query<&mut CameraRig>,
        mut redraw: EventWriter<RequestRedraw>,
    ) {
        for event in events.read() {
            let Ok(mut rig) = rigs.get_mut(event.rig) else {
                warn!("Cannot reset {:?}, it has no CameraRig", event.rig);
                continue;
            };
            rig.reset();
            redraw.send(RequestRedraw);
        }
    }
}
