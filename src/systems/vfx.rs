//! VFX system - projectile meshes, activation flashes, sounds and sling bands.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::components::{ActivationFlash, ProjectileShape, SlingBands};
use crate::events::PowerActivated;
use crate::resources::SlingshotAssets;

/// Flashes start at this share of their final radius.
const FLASH_START_SCALE: f32 = 0.1;

/// Create the shared effect meshes.
pub fn setup_slingshot_assets(
    mut assets: ResMut<SlingshotAssets>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    assets.sphere_mesh = meshes.add(Sphere::new(1.0));
}

/// Give new projectiles a sphere mesh of their radius and color.
///
/// The mesh matches the collider size, so the transform keeps a unit scale.
pub fn attach_projectile_meshes(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    shapes: Query<(Entity, &ProjectileShape), Without<Mesh3d>>,
) {
    for (entity, shape) in shapes.iter() {
        let [r, g, b] = shape.color;
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Sphere::new(shape.radius))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(r, g, b),
                perceptual_roughness: 0.6,
                ..default()
            })),
        ));
    }
}

/// Spawn a flash wherever a power with an activation effect fires.
pub fn spawn_activation_flashes(
    mut commands: Commands,
    mut activations: MessageReader<PowerActivated>,
    assets: Res<SlingshotAssets>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for activation in activations.read() {
        let Some(effect) = &activation.effect else {
            continue;
        };

        let [r, g, b] = effect.color;
        commands.spawn((
            Name::new("ActivationFlash"),
            Mesh3d(assets.sphere_mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgba(r, g, b, 0.8),
                emissive: LinearRgba::rgb(r * 5.0, g * 5.0, b * 5.0),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            })),
            Transform::from_translation(activation.point)
                .with_scale(Vec3::splat(effect.radius * FLASH_START_SCALE)),
            ActivationFlash {
                lifetime: effect.lifetime,
                total_lifetime: effect.lifetime,
                max_radius: effect.radius,
            },
        ));
    }
}

/// Expand activation flashes and remove them when their time is up.
pub fn update_activation_flashes(
    mut commands: Commands,
    time: Res<Time>,
    mut flashes: Query<(Entity, &mut ActivationFlash, &mut Transform)>,
) {
    let dt = time.delta_secs();

    for (entity, mut flash, mut transform) in flashes.iter_mut() {
        flash.lifetime -= dt;

        if flash.lifetime <= 0.0 {
            commands.entity(entity).despawn();
        } else {
            transform.scale = Vec3::splat(flash_radius(&flash));
        }
    }
}

/// Current radius of a flash: grows linearly from a tenth of its final size.
pub fn flash_radius(flash: &ActivationFlash) -> f32 {
    let progress = if flash.total_lifetime > 0.0 {
        (1.0 - flash.lifetime / flash.total_lifetime).clamp(0.0, 1.0)
    } else {
        1.0
    };
    flash.max_radius * (FLASH_START_SCALE + (1.0 - FLASH_START_SCALE) * progress)
}

/// Play the activation sound of each power that has one.
///
/// The audio entity removes itself when playback ends.
pub fn play_activation_sounds(
    mut commands: Commands,
    mut activations: MessageReader<PowerActivated>,
    asset_server: Res<AssetServer>,
) {
    for activation in activations.read() {
        if let Some(path) = &activation.sound {
            commands.spawn((
                AudioPlayer::new(asset_server.load(path.clone())),
                PlaybackSettings::DESPAWN,
            ));
        }
    }
}

/// Draw the bands of every slingshot holding a projectile.
pub fn draw_sling_bands(mut gizmos: Gizmos, bands: Query<&SlingBands>) {
    for band in bands.iter().filter(|band| band.visible) {
        for (start, end) in band.segments {
            gizmos.line(start, end, band.color);
        }
    }
}
