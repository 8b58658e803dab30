use std::time::Duration;

use bevy_app::prelude::*;
use bevy_ecs::{event::Events, prelude::*};
use bevy_input::prelude::*;
use bevy_math::prelude::*;
use bevy_render::prelude::*;
use bevy_time::prelude::*;
use bevy_transform::prelude::*;
use bevy_window::{PrimaryWindow, RequestRedraw, Window};

use bevy_camera_rig::{extensions::reset::ResetRigPlugin, prelude::*};

fn app() -> App {
    let mut app = App::new();
    app.add_plugins((CameraRigPlugin, ResetRigPlugin))
        .insert_resource(Time::<()>::default());
    app
}

fn spawn_rig(app: &mut App, rig: Transform, camera_offset: Vec3) -> (Entity, Entity) {
    let camera = app
        .world_mut()
        .spawn(Transform::from_translation(camera_offset))
        .id();
    let rig = app.world_mut().spawn((CameraRig::new(camera), rig)).id();
    (rig, camera)
}

fn frame(app: &mut App, seconds: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(seconds));
    app.update();
}

fn press(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
}

fn release(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(key);
}

fn spawn_window(app: &mut App, cursor: Vec2) -> Entity {
    let mut window = Window::default();
    window.set_cursor_position(Some(cursor));
    app.world_mut().spawn((window, PrimaryWindow)).id()
}

fn move_cursor(app: &mut App, window: Entity, cursor: Vec2) {
    app.world_mut()
        .get_mut::<Window>(window)
        .expect("window exists")
        .set_cursor_position(Some(cursor));
}

/// Hold `button` through one frame, then clear its `just_pressed` edge as the input plugin would.
fn press_mouse(app: &mut App, button: MouseButton, seconds: f32) {
    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .press(button);
    frame(app, seconds);
    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .clear();
}

fn translation(app: &App, entity: Entity) -> Vec3 {
    app.world()
        .get::<Transform>(entity)
        .expect("entity has a transform")
        .translation
}

#[test]
fn idle_rig_stays_put() {
    let mut app = app();
    let (rig, camera) = spawn_rig(
        &mut app,
        Transform::from_xyz(10.0, 10.0, 5.0),
        Vec3::new(0.0, 150.0, 150.0),
    );

    frame(&mut app, 0.016);
    frame(&mut app, 0.016);

    assert_eq!(translation(&app, rig), Vec3::new(10.0, 10.0, 5.0));
    assert_eq!(translation(&app, camera), Vec3::new(0.0, 150.0, 150.0));
}

#[test]
fn arrow_key_moves_rig_forward() {
    let mut app = app();
    let (rig, _) = spawn_rig(&mut app, Transform::IDENTITY, Vec3::new(0.0, 150.0, 150.0));
    press(&mut app, KeyCode::ArrowUp);

    // Blend factor of one, the rig lands on its target.
    frame(&mut app, 1.0);

    assert!(translation(&app, rig).abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-6));
}

#[test]
fn zero_time_frames_do_not_move_the_camera() {
    let mut app = app();
    let (_, camera) = spawn_rig(&mut app, Transform::IDENTITY, Vec3::new(0.0, 150.0, 150.0));
    press(&mut app, KeyCode::KeyR);

    app.update();

    assert_eq!(translation(&app, camera), Vec3::new(0.0, 150.0, 150.0));
}

#[test]
fn zoom_key_moves_camera_toward_rig() {
    let mut app = app();
    let (_, camera) = spawn_rig(&mut app, Transform::IDENTITY, Vec3::new(0.0, 150.0, 150.0));
    press(&mut app, KeyCode::KeyR);

    frame(&mut app, 1.0);

    assert_eq!(translation(&app, camera), Vec3::new(0.0, 145.0, 145.0));
}

#[test]
fn moving_rig_requests_redraw() {
    let mut app = app();
    spawn_rig(&mut app, Transform::IDENTITY, Vec3::new(0.0, 150.0, 150.0));
    press(&mut app, KeyCode::ArrowRight);

    frame(&mut app, 0.016);

    assert!(!app.world().resource::<Events<RequestRedraw>>().is_empty());
}

#[test]
fn rig_without_camera_is_skipped() {
    let mut app = app();
    let missing = app.world_mut().spawn_empty().id();
    app.world_mut().despawn(missing);
    let rig = app
        .world_mut()
        .spawn((CameraRig::new(missing), Transform::IDENTITY))
        .id();
    press(&mut app, KeyCode::ArrowUp);

    frame(&mut app, 1.0);

    assert_eq!(translation(&app, rig), Vec3::ZERO);
    assert!(app.world().get::<CameraRig>(rig).unwrap().motion().is_none());
}

#[test]
fn reset_trigger_returns_rig_to_defaults() {
    let mut app = app();
    let (rig, camera) = spawn_rig(&mut app, Transform::IDENTITY, Vec3::new(0.0, 150.0, 150.0));
    press(&mut app, KeyCode::ArrowUp);
    press(&mut app, KeyCode::KeyQ);
    frame(&mut app, 1.0);
    release(&mut app, KeyCode::ArrowUp);
    release(&mut app, KeyCode::KeyQ);
    assert_ne!(translation(&app, rig), Vec3::ZERO);

    app.world_mut().send_event(ResetRigTrigger { rig });
    // The trigger is read after this frame's rig update.
    frame(&mut app, 1.0);
    frame(&mut app, 1.0);

    let defaults = RigDefaults::default();
    let transform = *app.world().get::<Transform>(rig).unwrap();
    assert_eq!(transform.translation, defaults.rig_position);
    assert_eq!(transform.rotation, defaults.rig_rotation);
    assert_eq!(translation(&app, camera), defaults.camera_offset);
}

#[test]
fn middle_drag_right_turns_rig_right() {
    let mut app = app();
    let (rig, _) = spawn_rig(&mut app, Transform::IDENTITY, Vec3::new(0.0, 150.0, 150.0));
    let window = spawn_window(&mut app, Vec2::new(100.0, 100.0));

    press_mouse(&mut app, MouseButton::Middle, 1.0);
    move_cursor(&mut app, window, Vec2::new(150.0, 100.0));
    frame(&mut app, 1.0);

    let rotation = app.world().get::<Transform>(rig).unwrap().rotation;
    assert!(rotation.abs_diff_eq(Quat::from_rotation_y(-10f32.to_radians()), 1e-5));
    assert!((rotation * Vec3::NEG_Z).x > 0.0);
}

#[test]
fn ground_drag_without_viewport_leaves_rig_in_place() {
    let mut app = app();
    let camera = app
        .world_mut()
        .spawn((
            Camera::default(),
            Transform::from_xyz(0.0, 150.0, 150.0),
            GlobalTransform::from_xyz(0.0, 150.0, 150.0),
        ))
        .id();
    let rig = app
        .world_mut()
        .spawn((CameraRig::new(camera), Transform::IDENTITY))
        .id();
    let window = spawn_window(&mut app, Vec2::new(640.0, 360.0));

    // The camera has not been rendered yet, so the pointer ray cannot be cast.
    press_mouse(&mut app, MouseButton::Left, 1.0);
    move_cursor(&mut app, window, Vec2::new(700.0, 400.0));
    frame(&mut app, 1.0);

    assert_eq!(translation(&app, rig), Vec3::ZERO);
    let rig = app.world().get::<CameraRig>(rig).unwrap();
    assert!(!rig.motion().unwrap().is_dragging());
}
