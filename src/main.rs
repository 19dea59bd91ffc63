//! Demo: a formation of travellers sharing one authored path.
//!
//! Run with: `cargo run`

use bevy::prelude::*;
use bevy_path_maker::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins((PathPlugin, PathTravellerPlugin))
        .add_systems(Startup, setup)
        .add_systems(Update, (draw_traveller_paths, log_endpoints, toggle_pause))
        .run();
}

fn dive_path() -> PathData {
    let mut path = PathData::named("dive");
    path.add_straight_segment(Vec3::ZERO, Vec3::new(0.0, -120.0, 0.0), 8.0, false);
    path.add_bezier_segment(
        Vec3::new(0.0, -120.0, 0.0),
        Vec3::new(160.0, -260.0, 0.0),
        Vec3::new(0.0, -240.0, 0.0),
        Vec3::new(60.0, -300.0, 0.0),
        24.0,
        false,
    );
    path.add_catmull_rom_segment(
        Vec3::new(160.0, -260.0, 0.0),
        Vec3::new(260.0, -60.0, 0.0),
        Vec3::new(60.0, -300.0, 0.0),
        Vec3::new(300.0, 80.0, 0.0),
        24.0,
        0.5,
        false,
    );
    path
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);

    let path = commands.spawn(dive_path()).id();

    for (i, mirror_x) in [false, true].into_iter().enumerate() {
        let x = if mirror_x { 60.0 } else { -60.0 };
        commands.spawn((
            Sprite::from_color(Color::srgb(0.9, 0.5 + 0.3 * i as f32, 0.2), Vec2::new(16.0, 24.0)),
            Transform::from_xyz(x, 220.0, 0.0),
            PathTraveller::new(path)
                .with_speed(180.0)
                .with_auto_start(true)
                .with_mirror(mirror_x, false)
                .with_endpoint_behavior(EndpointBehavior::Reverse),
        ));
    }

    commands.spawn((
        Sprite::from_color(Color::srgb(0.3, 0.8, 0.9), Vec2::new(16.0, 24.0)),
        Transform::from_xyz(0.0, 250.0, 0.0),
        PathTraveller::new(path)
            .with_speed(240.0)
            .with_auto_start(true)
            .with_endpoint_behavior(EndpointBehavior::ReturnToOpposite),
    ));
}

fn draw_traveller_paths(travellers: Query<&PathTraveller>, mut gizmos: Gizmos) {
    for traveller in &travellers {
        gizmos.linestrip_2d(
            traveller.points().iter().map(|p| p.truncate()),
            Color::srgba(0.6, 0.6, 0.6, 0.5),
        );
    }
}

fn log_endpoints(mut events: MessageReader<TravellerEvent>) {
    for event in events.read() {
        info!(
            "{} reached {:?} ({:?})",
            event.entity, event.endpoint, event.behavior
        );
    }
}

fn toggle_pause(keyboard: Res<ButtonInput<KeyCode>>, mut settings: ResMut<TravellerSettings>) {
    if keyboard.just_pressed(KeyCode::Space) {
        settings.toggle();
    }
}
