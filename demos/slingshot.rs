//! Slingshot example: knock down a tower with every projectile power.
//!
//! Drag the seated projectile with the mouse (or a finger) and release to
//! launch. Click again mid-flight for tap powers. Arrow keys tilt the glider,
//! F1 toggles debug drawing.

use avian3d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy_slingshot::prelude::*;
use bevy_slingshot::types::presets;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(PhysicsPlugins::default())
        .add_plugins(SlingshotPluginGroup)
        .add_systems(Startup, setup)
        .add_systems(Update, (toggle_debug, log_powers, update_ui))
        .run();
}

#[derive(Component)]
struct UiText;

#[derive(Resource, Default)]
struct DemoStats {
    launched: u32,
    empty: bool,
    last_power: Option<ProjectilePowerType>,
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Camera looking down -Z at the play plane
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 4.0, 22.0).looking_at(Vec3::new(0.0, 3.0, 0.0), Vec3::Y),
    ));

    // Light
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.6, 0.4, 0.0)),
    ));

    // Ground
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(100.0, 20.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.35, 0.5, 0.3),
            ..default()
        })),
        RigidBody::Static,
        Collider::half_space(Vec3::Y),
    ));

    // Slingshot frame
    let anchor_position = Vec3::new(-10.0, 3.0, 0.0);
    let wood = materials.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.3, 0.15),
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(0.3, 2.5, 0.3))),
        MeshMaterial3d(wood.clone()),
        Transform::from_xyz(anchor_position.x, 1.25, 0.0),
    ));
    for side in [-1.0, 1.0] {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(0.2, 1.0, 0.2))),
            MeshMaterial3d(wood.clone()),
            Transform::from_xyz(anchor_position.x + side * 0.4, 2.8, 0.0)
                .with_rotation(Quat::from_rotation_z(-side * 0.35)),
        ));
    }

    let anchor = commands
        .spawn((Name::new("SlingAnchor"), Transform::from_translation(anchor_position)))
        .id();
    commands.spawn((
        Name::new("Slingshot"),
        Transform::from_translation(anchor_position),
        Slingshot::new(
            anchor,
            vec![
                presets::pebble(),
                presets::bomb(),
                presets::cluster(),
                presets::dart(),
                presets::piercer(),
                presets::glider(),
            ],
        )
        .with_total_projectiles(12),
        GrabZone {
            radius: 1.5,
            ..default()
        },
        SlingBands::default()
            .with_fork_offsets(Vec3::new(-0.55, 0.25, 0.0), Vec3::new(0.55, 0.25, 0.0)),
    ));

    // Target tower
    let block_mesh = meshes.add(Cuboid::new(1.0, 1.0, 1.0));
    let block_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.7, 0.65, 0.55),
        ..default()
    });
    for column in 0..3 {
        for row in 0..6 {
            commands.spawn((
                Name::new(format!("Block_{column}_{row}")),
                Mesh3d(block_mesh.clone()),
                MeshMaterial3d(block_material.clone()),
                Transform::from_xyz(8.0 + column as f32 * 1.05, 0.5 + row as f32 * 1.01, 0.0),
                RigidBody::Dynamic,
                Collider::cuboid(1.0, 1.0, 1.0),
                Mass(2.0),
                Explodable::default(),
            ));
        }
    }

    // UI
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        UiText,
    ));

    commands.init_resource::<DemoStats>();
}

fn toggle_debug(keyboard: Res<ButtonInput<KeyCode>>, mut config: ResMut<SlingshotDebugConfig>) {
    if keyboard.just_pressed(KeyCode::F1) {
        config.draw_velocity = !config.draw_velocity;
        config.draw_stretch = config.draw_velocity;
    }
}

fn log_powers(
    mut stats: ResMut<DemoStats>,
    mut launches: MessageReader<ProjectileLaunched>,
    mut powers: MessageReader<PowerActivated>,
    mut empty: MessageReader<SlingshotEmpty>,
) {
    for launch in launches.read() {
        stats.launched += 1;
        info!("Launched {:?} with stretch {:.2}", launch.projectile, launch.stretch);
    }
    for power in powers.read() {
        stats.last_power = Some(power.power);
    }
    if empty.read().count() > 0 {
        stats.empty = true;
    }
}

fn update_ui(
    stats: Res<DemoStats>,
    slingshots: Query<&SlingshotState>,
    mut text: Query<&mut Text, With<UiText>>,
) {
    if !stats.is_changed() {
        return;
    }
    let Ok(mut text) = text.single_mut() else {
        return;
    };

    let remaining: u32 = slingshots.iter().map(|state| state.remaining).sum();
    let power = stats
        .last_power
        .map_or_else(|| "-".to_string(), |power| format!("{power:?}"));
    let status = if stats.empty { "\nOut of projectiles!" } else { "" };

    **text = format!(
        "Drag and release to launch, click mid-flight for tap powers\nArrow keys: glide, F1: debug\n\nLaunched: {}\nRemaining: {}\nLast power: {}{}",
        stats.launched, remaining, power, status
    );
}
