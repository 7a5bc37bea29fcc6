//! Messages for the slingshot system.
//!
//! Note: In Bevy 0.18, buffered events use the `Message` trait instead of `Event`.

use bevy::prelude::*;
use bevy::ecs::message::Message;

use crate::types::{ActivationEffect, ProjectilePowerType};

/// Sent when a slingshot releases its projectile.
///
/// # Fields
/// * `slingshot` - Slingshot that fired
/// * `projectile` - Released projectile
/// * `velocity` - Velocity change given by the launch (m/s)
/// * `stretch` - How far the projectile was pulled from the anchor
#[derive(Message, Clone, Debug)]
pub struct ProjectileLaunched {
    pub slingshot: Entity,
    pub projectile: Entity,
    pub velocity: Vec3,
    pub stretch: f32,
}

/// A projectile started touching another body.
///
/// Produced from physics collision messages by the collision bridge; game code
/// and tests may also write it directly.
#[derive(Message, Clone, Debug)]
pub struct ProjectileImpact {
    pub projectile: Entity,
    pub other: Entity,
    /// World-space contact point
    pub point: Vec3,
}

/// Sent once per projectile when its power fires.
#[derive(Message, Clone, Debug)]
pub struct PowerActivated {
    pub projectile: Entity,
    pub power: ProjectilePowerType,
    /// Where the effect plays
    pub point: Vec3,
    pub effect: Option<ActivationEffect>,
    /// Asset path of the sound to play
    pub sound: Option<String>,
}

/// Explosion that pushes [`Explodable`](crate::components::Explodable) bodies.
///
/// # Fields
/// * `center` - Blast center
/// * `radius` - Blast radius; bodies outside are unaffected
/// * `force` - Peak force at the center (N), falling off linearly to zero at `radius`
/// * `layers` - Only bodies whose layers intersect this mask are pushed
/// * `source` - Projectile that exploded
#[derive(Message, Clone, Debug)]
pub struct ExplosionEvent {
    pub center: Vec3,
    pub radius: f32,
    pub force: f32,
    pub layers: u32,
    pub source: Option<Entity>,
}

/// A projectile broke into fragments.
#[derive(Message, Clone, Debug)]
pub struct ProjectileSplit {
    pub parent: Entity,
    pub fragments: Vec<Entity>,
}

/// A piercing projectile flew through a body.
#[derive(Message, Clone, Debug)]
pub struct ProjectilePierced {
    pub projectile: Entity,
    pub target: Entity,
    /// Pierces used so far
    pub pierces: u32,
    /// Pierces left before the projectile stops piercing
    pub remaining: u32,
}

/// A slingshot ran out of launches.
#[derive(Message, Clone, Debug)]
pub struct SlingshotEmpty {
    pub slingshot: Entity,
}
