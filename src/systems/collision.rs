//! Collision bridge - physics contacts to projectile impacts.

use avian3d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::components::{Projectile, ProjectileShape};
use crate::events::ProjectileImpact;

/// Give new projectiles a sphere collider that reports contacts.
///
/// Only runs while the physics plugins are present.
pub fn attach_projectile_colliders(
    mut commands: Commands,
    shapes: Query<(Entity, &ProjectileShape), Without<Collider>>,
) {
    for (entity, shape) in shapes.iter() {
        commands
            .entity(entity)
            .insert((Collider::sphere(shape.radius), CollisionEventsEnabled));
    }
}

/// Turn collision starts into [`ProjectileImpact`] messages.
///
/// One message is written for each projectile taking part in a contact, so
/// two projectiles hitting each other both react.
///
/// # Arguments
/// * `collisions` - Contacts that began this physics step
/// * `projectiles` - Projectile transforms and shapes
/// * `bodies` - World transforms used to place the contact point
/// * `impacts` - Output messages
pub fn forward_collision_starts(
    mut collisions: MessageReader<CollisionStart>,
    projectiles: Query<(&Transform, Option<&ProjectileShape>), With<Projectile>>,
    bodies: Query<&GlobalTransform>,
    mut impacts: MessageWriter<ProjectileImpact>,
) {
    for collision in collisions.read() {
        let first = collision.body1.unwrap_or(collision.collider1);
        let second = collision.body2.unwrap_or(collision.collider2);

        for (projectile, other) in [(first, second), (second, first)] {
            let Ok((transform, shape)) = projectiles.get(projectile) else {
                continue;
            };

            let point = contact_point(
                transform.translation,
                shape.map_or(0.0, |shape| shape.radius),
                bodies.get(other).ok().map(GlobalTransform::translation),
            );
            impacts.write(ProjectileImpact {
                projectile,
                other,
                point,
            });
        }
    }
}

/// Point on the projectile surface facing the other body.
///
/// Falls back to the projectile center when the other body has no position.
pub fn contact_point(center: Vec3, radius: f32, other: Option<Vec3>) -> Vec3 {
    match other {
        Some(other) => center + (other - center).normalize_or_zero() * radius,
        None => center,
    }
}
