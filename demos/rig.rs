use bevy::{color::palettes, prelude::*};
use bevy_camera_rig::prelude::*;
use rand::Rng;

fn main() {
    App::new()
        .add_plugins((DefaultPlugins, DefaultCameraRigPlugins))
        .add_systems(Startup, (setup, setup_ui))
        .add_systems(Update, reset_on_home)
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut matls: ResMut<Assets<StandardMaterial>>,
) {
    spawn_buildings(&mut commands, &mut meshes, &mut matls, 60.0);

    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(50.0, 100.0, 30.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let defaults = RigDefaults::default();
    let camera = commands
        .spawn((Camera3d::default(), defaults.camera_transform()))
        .id();
    commands
        .spawn((
            CameraRig::new(camera).with_defaults(defaults),
            defaults.rig_transform(),
            Visibility::default(),
        ))
        .add_child(camera);
}

fn spawn_buildings(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    matls: &mut Assets<StandardMaterial>,
    half_width: f32,
) {
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(half_width * 20.0)))),
        MeshMaterial3d(matls.add(StandardMaterial {
            base_color: Color::Srgba(palettes::css::DARK_GRAY),
            ..Default::default()
        })),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));

    let mut rng = rand::thread_rng();
    let mesh = meshes.add(Cuboid::default());
    let material = [
        matls.add(Color::Srgba(palettes::css::GRAY)),
        matls.add(Color::srgb(0.3, 0.6, 0.8)),
        matls.add(Color::srgb(0.55, 0.4, 0.8)),
        matls.add(Color::srgb(0.8, 0.45, 0.5)),
    ];

    let w = half_width as isize;
    for x in (-w..=w).step_by(4) {
        for z in (-w..=w).step_by(4) {
            let x = x as f32 + rng.gen::<f32>() * 2.0 - 1.0;
            let z = z as f32 + rng.gen::<f32>() * 2.0 - 1.0;
            let height = 1.0 + rng.gen::<f32>() * rng.gen::<f32>() * 20.0;

            commands.spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material[rng.gen_range(0..material.len())].clone()),
                Transform::from_xyz(x, height / 2.0, z).with_scale(Vec3::new(
                    (rng.gen::<f32>() + 0.5) * 2.0,
                    height,
                    (rng.gen::<f32>() + 0.5) * 2.0,
                )),
            ));
        }
    }
}

fn reset_on_home(
    keys: Res<ButtonInput<KeyCode>>,
    rigs: Query<Entity, With<CameraRig>>,
    mut reset: EventWriter<ResetRigTrigger>,
) {
    if keys.just_pressed(KeyCode::Home) {
        for rig in &rigs {
            reset.send(ResetRigTrigger { rig });
        }
    }
}

fn setup_ui(mut commands: Commands) {
    let text = "\
        Left Mouse    - Drag ground\n\
        Middle Mouse  - Rotate\n\
        Scroll, R / F - Zoom\n\
        Arrows        - Move (Shift for fast)\n\
        Q / E         - Rotate\n\
        Home          - Reset\n";
    commands.spawn((
        Text::new(text),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        Node {
            margin: UiRect::all(Val::Px(20.0)),
            ..Default::default()
        },
    ));
}
