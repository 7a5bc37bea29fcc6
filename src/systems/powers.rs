//! Projectile powers - tap and impact dispatch, explosions, splits, speed boosts and piercing.

use avian3d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::components::{Explodable, GlideControl, Projectile, ProjectileShape};
use crate::events::{
    ExplosionEvent, PowerActivated, ProjectileImpact, ProjectilePierced, ProjectileSplit,
};
use crate::resources::PointerState;
use crate::systems::glide;
use crate::types::{ProjectileArchetype, ProjectilePowerType};

/// Fragments inherit this share of the parent's speed.
const SPLIT_SPEED_FACTOR: f32 = 0.8;

/// Below this speed a split fans around the projectile's facing instead of its velocity.
const SPLIT_MIN_SPEED: f32 = 0.1;

/// Spawn a projectile body from an archetype.
///
/// Colliders are attached by the collision bridge once physics is running,
/// meshes by the VFX plugin.
///
/// # Arguments
/// * `commands` - Bevy Commands for spawning
/// * `archetype` - Blueprint of the projectile
/// * `name` - Entity name
/// * `transform` - Initial transform
/// * `body` - `RigidBody::Kinematic` while seated, `RigidBody::Dynamic` in flight
/// * `velocity` - Initial linear velocity
/// * `launched` - Spawn already launched (split fragments)
///
/// # Returns
/// The spawned entity
pub fn spawn_projectile(
    commands: &mut Commands,
    archetype: &ProjectileArchetype,
    name: String,
    transform: Transform,
    body: RigidBody,
    velocity: Vec3,
    launched: bool,
) -> Entity {
    let mut projectile = Projectile::from_archetype(archetype);
    if launched {
        projectile.notify_launched();
    }
    projectile.last_velocity = velocity;

    let mut entity = commands.spawn((
        Name::new(name),
        transform,
        body,
        Mass(archetype.mass),
        LinearVelocity(velocity),
        GravityScale(1.0),
        projectile,
        ProjectileShape {
            radius: archetype.radius,
            color: archetype.color,
        },
    ));
    if let Some(settings) = archetype.glide {
        entity.insert(GlideControl::new(settings));
    }
    entity.id()
}

/// Remember each projectile's velocity before the physics step.
///
/// Piercing projectiles restore it after flying through a body.
pub fn track_projectile_velocity(mut projectiles: Query<(&mut Projectile, &LinearVelocity)>) {
    for (mut projectile, velocity) in projectiles.iter_mut() {
        if projectile.last_velocity != velocity.0 {
            projectile.last_velocity = velocity.0;
        }
    }
}

/// Fire tap powers of every launched projectile when a press begins.
pub fn activate_powers_on_tap(
    mut commands: Commands,
    pointer: Res<PointerState>,
    mut projectiles: Query<(Entity, &mut Projectile, &Transform, &mut LinearVelocity)>,
    mut activated: MessageWriter<PowerActivated>,
    mut explosions: MessageWriter<ExplosionEvent>,
    mut splits: MessageWriter<ProjectileSplit>,
) {
    if !pointer.just_pressed {
        return;
    }

    for (entity, mut projectile, transform, mut velocity) in projectiles.iter_mut() {
        if projectile.awaits_tap() {
            activate_power(
                &mut commands,
                &mut activated,
                &mut explosions,
                &mut splits,
                entity,
                &mut projectile,
                transform,
                &mut velocity,
                None,
            );
        }
    }
}

/// React to projectile impacts.
///
/// Gliding stops on the first impact. Explosive projectiles detonate at the
/// contact point, piercing projectiles count the pierce, everything else
/// just bounces.
pub fn handle_projectile_impacts(
    mut commands: Commands,
    mut impacts: MessageReader<ProjectileImpact>,
    mut projectiles: Query<(
        &mut Projectile,
        &Transform,
        &mut LinearVelocity,
        Option<&mut GlideControl>,
        Option<&mut GravityScale>,
    )>,
    mut activated: MessageWriter<PowerActivated>,
    mut explosions: MessageWriter<ExplosionEvent>,
    mut splits: MessageWriter<ProjectileSplit>,
    mut pierced: MessageWriter<ProjectilePierced>,
) {
    for impact in impacts.read() {
        let Ok((mut projectile, transform, mut velocity, glide, gravity)) =
            projectiles.get_mut(impact.projectile)
        else {
            continue;
        };

        // Seated projectiles brushing the scenery do not burn their power
        if !projectile.launched {
            continue;
        }

        if let (Some(mut glide), Some(mut gravity)) = (glide, gravity) {
            glide::deactivate_glide(&mut glide, &mut gravity, impact.projectile);
        }

        if projectile.power_activated && projectile.power != ProjectilePowerType::PierceThrough {
            continue;
        }

        match projectile.power {
            ProjectilePowerType::ExplodeOnImpact => {
                activate_power(
                    &mut commands,
                    &mut activated,
                    &mut explosions,
                    &mut splits,
                    impact.projectile,
                    &mut projectile,
                    transform,
                    &mut velocity,
                    Some(impact.point),
                );
            }
            ProjectilePowerType::PierceThrough => {
                if let Some(message) =
                    handle_pierce(&mut projectile, &mut velocity, impact.projectile, impact.other)
                {
                    pierced.write(message);
                }
            }
            _ => {}
        }
    }
}

/// Fire a projectile's power.
///
/// Does nothing if the power already fired or the projectile is still seated.
///
/// # Arguments
/// * `point` - Activation point; defaults to the projectile position
///
/// # Returns
/// True if the power fired
#[allow(clippy::too_many_arguments)]
pub fn activate_power(
    commands: &mut Commands,
    activated: &mut MessageWriter<PowerActivated>,
    explosions: &mut MessageWriter<ExplosionEvent>,
    splits: &mut MessageWriter<ProjectileSplit>,
    entity: Entity,
    projectile: &mut Projectile,
    transform: &Transform,
    velocity: &mut LinearVelocity,
    point: Option<Vec3>,
) -> bool {
    if projectile.power_activated || !projectile.launched {
        return false;
    }
    projectile.power_activated = true;

    let point = point.unwrap_or(transform.translation);
    debug!("Projectile {entity:?} activated {:?} at {point}", projectile.power);

    activated.write(PowerActivated {
        projectile: entity,
        power: projectile.power,
        point,
        effect: projectile.activation_effect,
        sound: projectile.activation_sound.clone(),
    });

    match projectile.power {
        ProjectilePowerType::SplitOnTap => {
            let fragments = perform_split(commands, projectile, transform, velocity.0);
            splits.write(ProjectileSplit {
                parent: entity,
                fragments,
            });
            commands.entity(entity).despawn();
        }
        ProjectilePowerType::SpeedBoostOnTap => {
            velocity.0 = speed_boost(velocity.0, projectile.speed_boost.multiplier);
        }
        ProjectilePowerType::ExplodeOnImpact => {
            explosions.write(ExplosionEvent {
                center: point,
                radius: projectile.explosion.radius,
                force: projectile.explosion.force,
                layers: projectile.explosion.layers,
                source: Some(entity),
            });
            commands.entity(entity).despawn();
        }
        ProjectilePowerType::Normal | ProjectilePowerType::PierceThrough => {}
    }

    true
}

/// Spawn the split fragments of a projectile.
fn perform_split(
    commands: &mut Commands,
    projectile: &Projectile,
    transform: &Transform,
    velocity: Vec3,
) -> Vec<Entity> {
    let split = &projectile.split;
    let speed = velocity.length() * SPLIT_SPEED_FACTOR;

    split_directions(
        velocity,
        transform.rotation,
        split.count,
        split.fragments.len(),
        split.spread_angle,
    )
    .into_iter()
    .zip(split.fragments.iter())
    .enumerate()
    .map(|(i, (direction, archetype))| {
        let fragment_transform =
            Transform::from_translation(transform.translation).looking_to(direction, Vec3::Y);
        spawn_projectile(
            commands,
            archetype,
            format!("{}_Fragment_{}", archetype.name, i + 1),
            fragment_transform,
            RigidBody::Dynamic,
            direction * speed,
            true,
        )
    })
    .collect()
}

/// Compute fragment directions for a split.
///
/// Fragments fan evenly across `spread_angle` degrees, centered on the flight
/// direction and rotated about `velocity × up`. A near-stationary projectile
/// fans its facing direction about its own up axis instead.
///
/// # Arguments
/// * `velocity` - Parent velocity
/// * `rotation` - Parent rotation
/// * `count` - Requested number of fragments
/// * `available` - Number of fragment archetypes; indices past it are skipped
/// * `spread_angle` - Total fan angle in degrees
///
/// # Returns
/// Unit directions, one per spawned fragment
pub fn split_directions(
    velocity: Vec3,
    rotation: Quat,
    count: u32,
    available: usize,
    spread_angle: f32,
) -> Vec<Vec3> {
    let step = spread_angle / if count > 1 { (count - 1) as f32 } else { 1.0 };
    let center = (count as f32 - 1.0) / 2.0;

    (0..count as usize)
        .take(available)
        .map(|i| {
            let angle = ((i as f32 - center) * step).to_radians();
            if velocity.length() < SPLIT_MIN_SPEED {
                let up = rotation * Vec3::Y;
                let forward = rotation * Vec3::NEG_Z;
                Quat::from_axis_angle(up, angle) * forward
            } else {
                let direction = velocity.normalize();
                let axis = direction.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::Z);
                Quat::from_axis_angle(axis, angle) * direction
            }
        })
        .collect()
}

/// Velocity after a speed boost: `multiplier` m/s added along the flight direction.
pub fn speed_boost(velocity: Vec3, multiplier: f32) -> Vec3 {
    velocity + velocity.normalize_or_zero() * multiplier
}

/// Count an impact against a piercing projectile.
///
/// While pierces remain the projectile keeps the velocity it had before the
/// impact; once they run out the power is spent and impacts are ignored.
fn handle_pierce(
    projectile: &mut Projectile,
    velocity: &mut LinearVelocity,
    entity: Entity,
    target: Entity,
) -> Option<ProjectilePierced> {
    if projectile.pierces < projectile.pierce.max_pierces {
        projectile.pierces += 1;
        velocity.0 = projectile.last_velocity;
        debug!(
            "Projectile {entity:?} pierced {target:?} ({}/{})",
            projectile.pierces, projectile.pierce.max_pierces
        );
        Some(ProjectilePierced {
            projectile: entity,
            target,
            pierces: projectile.pierces,
            remaining: projectile.pierce.max_pierces - projectile.pierces,
        })
    } else {
        projectile.power_activated = true;
        None
    }
}

/// Push explodable bodies away from explosions.
///
/// The explosion force falls off linearly to zero at the blast radius and is
/// applied over one fixed physics step to the body's rigid-body mass.
pub fn apply_explosion_forces(
    mut explosion_events: MessageReader<ExplosionEvent>,
    fixed_time: Res<Time<Fixed>>,
    mut bodies: Query<(
        Entity,
        &Transform,
        &Explodable,
        &mut LinearVelocity,
        Option<&Mass>,
        Option<&ComputedMass>,
    )>,
) {
    let dt = fixed_time.timestep().as_secs_f32();

    for event in explosion_events.read() {
        for (entity, transform, explodable, mut velocity, mass, computed) in bodies.iter_mut() {
            if Some(entity) == event.source || explodable.layers & event.layers == 0 {
                continue;
            }

            if let Some(change) = explosion_velocity_change(
                event.center,
                event.radius,
                event.force,
                transform.translation,
                body_mass(mass, computed),
                dt,
            ) {
                velocity.0 += change;
            }
        }
    }
}

/// Mass of a rigid body: the configured `Mass`, then the mass computed by the
/// physics engine, then 1 kg.
pub fn body_mass(mass: Option<&Mass>, computed: Option<&ComputedMass>) -> f32 {
    mass.map(|mass| mass.0)
        .filter(|mass| mass.is_finite() && *mass > 0.0)
        .or_else(|| {
            computed
                .map(|computed| computed.value())
                .filter(|mass| mass.is_finite() && *mass > 0.0)
        })
        .unwrap_or(1.0)
}

/// Velocity change of a body caught in an explosion.
///
/// # Arguments
/// * `center` - Blast center
/// * `radius` - Blast radius
/// * `force` - Peak force at the center (N)
/// * `position` - Body position
/// * `mass` - Body mass (non-positive masses count as 1 kg)
/// * `dt` - Duration the force acts for
///
/// # Returns
/// `None` if the body is outside the blast radius
pub fn explosion_velocity_change(
    center: Vec3,
    radius: f32,
    force: f32,
    position: Vec3,
    mass: f32,
    dt: f32,
) -> Option<Vec3> {
    let offset = position - center;
    let distance = offset.length();
    if distance >= radius {
        return None;
    }

    let direction = offset.try_normalize().unwrap_or(Vec3::Y);
    let falloff = 1.0 - distance / radius;
    let mass = if mass > 0.0 { mass } else { 1.0 };

    Some(direction * (force * falloff * dt / mass))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::types::{presets, SplitSettings};
    use crate::SlingshotCorePlugin;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(SlingshotCorePlugin);
        // Keep the fixed schedule from running between updates
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));
        app
    }

    fn spawn_launched(app: &mut App, archetype: &ProjectileArchetype, velocity: Vec3) -> Entity {
        let mut projectile = Projectile::from_archetype(archetype);
        projectile.notify_launched();
        projectile.last_velocity = velocity;
        app.world_mut()
            .spawn((
                Transform::from_xyz(0.0, 1.0, 0.0),
                LinearVelocity(velocity),
                GravityScale(1.0),
                projectile,
            ))
            .id()
    }

    fn projectile_count(app: &mut App) -> usize {
        app.world_mut()
            .query_filtered::<Entity, With<Projectile>>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn test_split_directions_fan_around_velocity() {
        let directions = split_directions(Vec3::X * 10.0, Quat::IDENTITY, 3, 3, 30.0);
        assert_eq!(directions.len(), 3);

        // Middle fragment keeps the flight direction
        assert!(directions[1].abs_diff_eq(Vec3::X, 1e-5));

        // Outer fragments sit 15 degrees either side, in the XY plane
        for outer in [directions[0], directions[2]] {
            assert!((outer.angle_between(Vec3::X).to_degrees() - 15.0).abs() < 1e-3);
            assert!(outer.z.abs() < 1e-5);
        }
        assert!(directions[0].y * directions[2].y < 0.0);
    }

    #[test]
    fn test_split_directions_skip_missing_fragments() {
        let directions = split_directions(Vec3::X * 10.0, Quat::IDENTITY, 3, 2, 30.0);
        assert_eq!(directions.len(), 2);
        assert!((directions[0].angle_between(Vec3::X).to_degrees() - 15.0).abs() < 1e-3);
        assert!(directions[1].abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn test_split_single_fragment_goes_straight() {
        let directions = split_directions(Vec3::new(3.0, 4.0, 0.0), Quat::IDENTITY, 1, 3, 30.0);
        assert_eq!(directions.len(), 1);
        assert!(directions[0].abs_diff_eq(Vec3::new(0.6, 0.8, 0.0), 1e-5));
    }

    #[test]
    fn test_split_when_stationary_uses_facing() {
        let directions = split_directions(Vec3::ZERO, Quat::IDENTITY, 3, 3, 90.0);
        assert!(directions[1].abs_diff_eq(Vec3::NEG_Z, 1e-5));
        // Fans around the up axis, so it stays horizontal
        assert!(directions[0].y.abs() < 1e-5);
        assert!((directions[0].angle_between(Vec3::NEG_Z).to_degrees() - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_speed_boost() {
        let boosted = speed_boost(Vec3::new(10.0, 0.0, 0.0), 1.5);
        assert!(boosted.abs_diff_eq(Vec3::new(11.5, 0.0, 0.0), 1e-5));
        assert_eq!(speed_boost(Vec3::ZERO, 1.5), Vec3::ZERO);
    }

    #[test]
    fn test_explosion_velocity_change() {
        let dt = 1.0 / 64.0;

        // Linear falloff: half force at half radius
        let change =
            explosion_velocity_change(Vec3::ZERO, 2.0, 500.0, Vec3::X, 1.0, dt).unwrap();
        assert!(change.abs_diff_eq(Vec3::X * 250.0 * dt, 1e-4));

        // Heavier bodies move less
        let heavy =
            explosion_velocity_change(Vec3::ZERO, 2.0, 500.0, Vec3::X, 5.0, dt).unwrap();
        assert!((heavy.length() - change.length() / 5.0).abs() < 1e-4);

        // Outside the blast radius
        assert!(explosion_velocity_change(Vec3::ZERO, 2.0, 500.0, Vec3::X * 2.0, 1.0, dt).is_none());

        // At the center the push goes up
        let center = explosion_velocity_change(Vec3::ZERO, 2.0, 500.0, Vec3::ZERO, 1.0, dt).unwrap();
        assert!(center.y > 0.0);
    }

    #[test]
    fn test_bomb_explodes_on_impact() {
        let mut app = test_app();
        app.update();

        let bomb = spawn_launched(&mut app, &presets::bomb(), Vec3::X * 10.0);
        let near = app
            .world_mut()
            .spawn((
                Transform::from_xyz(1.0, 0.0, 0.0),
                Explodable::default(),
                LinearVelocity(Vec3::ZERO),
            ))
            .id();
        let far = app
            .world_mut()
            .spawn((
                Transform::from_xyz(10.0, 0.0, 0.0),
                Explodable::default(),
                LinearVelocity(Vec3::ZERO),
            ))
            .id();
        let other_layer = app
            .world_mut()
            .spawn((
                Transform::from_xyz(0.5, 0.0, 0.0),
                Explodable { layers: 0 },
                LinearVelocity(Vec3::ZERO),
            ))
            .id();

        app.world_mut().write_message(ProjectileImpact {
            projectile: bomb,
            other: near,
            point: Vec3::ZERO,
        });
        app.update();

        assert!(app.world().get_entity(bomb).is_err(), "Bomb should be gone");
        let pushed = app.world().get::<LinearVelocity>(near).unwrap().0;
        assert!(pushed.x > 0.0, "Body should be pushed away from the blast");
        assert_eq!(app.world().get::<LinearVelocity>(far).unwrap().0, Vec3::ZERO);
        assert_eq!(app.world().get::<LinearVelocity>(other_layer).unwrap().0, Vec3::ZERO);
    }

    #[test]
    fn test_explosion_uses_body_mass() {
        let mut app = test_app();
        app.update();

        let light = app
            .world_mut()
            .spawn((
                Transform::from_xyz(1.0, 0.0, 0.0),
                Explodable::default(),
                LinearVelocity(Vec3::ZERO),
                Mass(1.0),
            ))
            .id();
        let heavy = app
            .world_mut()
            .spawn((
                Transform::from_xyz(0.0, 1.0, 0.0),
                Explodable::default(),
                LinearVelocity(Vec3::ZERO),
                Mass(4.0),
            ))
            .id();

        app.world_mut().write_message(ExplosionEvent {
            center: Vec3::ZERO,
            radius: 2.0,
            force: 500.0,
            layers: u32::MAX,
            source: None,
        });
        app.update();

        let dt = 1.0 / 64.0;
        let light = app.world().get::<LinearVelocity>(light).unwrap().0;
        let heavy = app.world().get::<LinearVelocity>(heavy).unwrap().0;
        assert!(light.abs_diff_eq(Vec3::X * 250.0 * dt, 1e-4));
        assert!(heavy.abs_diff_eq(Vec3::Y * 250.0 * dt / 4.0, 1e-4));
    }

    #[test]
    fn test_body_mass_fallbacks() {
        assert_eq!(body_mass(Some(&Mass(3.0)), None), 3.0);
        assert_eq!(body_mass(Some(&Mass(0.0)), None), 1.0);
        assert_eq!(body_mass(None, None), 1.0);
    }

    #[test]
    fn test_impacts_before_launch_are_ignored() {
        let mut app = test_app();
        app.update();

        let bomb = app
            .world_mut()
            .spawn((
                Transform::default(),
                LinearVelocity(Vec3::ZERO),
                Projectile::from_archetype(&presets::bomb()),
            ))
            .id();

        app.world_mut().write_message(ProjectileImpact {
            projectile: bomb,
            other: Entity::PLACEHOLDER,
            point: Vec3::ZERO,
        });
        app.update();

        let projectile = app.world().get::<Projectile>(bomb).unwrap();
        assert!(!projectile.power_activated);
    }

    #[test]
    fn test_cluster_splits_on_tap() {
        let mut app = test_app();
        app.update();

        let cluster = spawn_launched(&mut app, &presets::cluster(), Vec3::X * 10.0);
        app.insert_resource(PointerState {
            just_pressed: true,
            held: true,
            ..Default::default()
        });
        app.update();

        assert!(app.world().get_entity(cluster).is_err());

        let mut fragments = app
            .world_mut()
            .query::<(&Projectile, &LinearVelocity, &RigidBody)>();
        let fragments: Vec<_> = fragments.iter(app.world()).collect();
        assert_eq!(fragments.len(), 3);
        for (projectile, velocity, body) in fragments {
            assert!(projectile.launched);
            assert!((velocity.0.length() - 8.0).abs() < 1e-3);
            assert_eq!(*body, RigidBody::Dynamic);
        }
    }

    #[test]
    fn test_split_respects_fragment_list() {
        let mut app = test_app();
        app.update();

        let archetype = presets::cluster().with_split(SplitSettings {
            fragments: vec![presets::shard()],
            count: 4,
            spread_angle: 45.0,
        });
        spawn_launched(&mut app, &archetype, Vec3::X * 5.0);
        app.insert_resource(PointerState {
            just_pressed: true,
            held: true,
            ..Default::default()
        });
        app.update();

        assert_eq!(projectile_count(&mut app), 1);
    }

    #[test]
    fn test_dart_boosts_once() {
        let mut app = test_app();
        app.update();

        let dart = spawn_launched(&mut app, &presets::dart(), Vec3::X * 10.0);
        app.insert_resource(PointerState {
            just_pressed: true,
            held: true,
            ..Default::default()
        });
        app.update();

        let velocity = app.world().get::<LinearVelocity>(dart).unwrap().0;
        assert!(velocity.abs_diff_eq(Vec3::X * 11.5, 1e-4));

        // A second tap does nothing
        app.insert_resource(PointerState {
            just_pressed: true,
            held: true,
            ..Default::default()
        });
        app.update();
        let velocity = app.world().get::<LinearVelocity>(dart).unwrap().0;
        assert!(velocity.abs_diff_eq(Vec3::X * 11.5, 1e-4));
    }

    #[test]
    fn test_tap_without_press_does_nothing() {
        let mut app = test_app();
        app.update();

        let dart = spawn_launched(&mut app, &presets::dart(), Vec3::X * 10.0);
        app.update();

        assert!(!app.world().get::<Projectile>(dart).unwrap().power_activated);
    }

    #[test]
    fn test_piercer_flies_through_once() {
        let mut app = test_app();
        app.update();

        let piercer = spawn_launched(&mut app, &presets::piercer(), Vec3::X * 12.0);
        let wall = app.world_mut().spawn(Transform::from_xyz(2.0, 0.0, 0.0)).id();

        // Physics bounced the projectile back
        app.world_mut().get_mut::<LinearVelocity>(piercer).unwrap().0 = Vec3::NEG_X * 3.0;
        app.world_mut().write_message(ProjectileImpact {
            projectile: piercer,
            other: wall,
            point: Vec3::new(2.0, 0.0, 0.0),
        });
        app.update();

        {
            let projectile = app.world().get::<Projectile>(piercer).unwrap();
            assert_eq!(projectile.pierces, 1);
            assert!(!projectile.power_activated);
        }
        let velocity = app.world().get::<LinearVelocity>(piercer).unwrap().0;
        assert!(velocity.abs_diff_eq(Vec3::X * 12.0, 1e-5), "Pierce keeps the flight velocity");

        // Second hit exhausts the pierce
        app.world_mut().get_mut::<LinearVelocity>(piercer).unwrap().0 = Vec3::NEG_X * 3.0;
        app.world_mut().write_message(ProjectileImpact {
            projectile: piercer,
            other: wall,
            point: Vec3::new(2.0, 0.0, 0.0),
        });
        app.update();

        let projectile = app.world().get::<Projectile>(piercer).unwrap();
        assert_eq!(projectile.pierces, 1);
        assert!(projectile.power_activated);
        let velocity = app.world().get::<LinearVelocity>(piercer).unwrap().0;
        assert!(velocity.abs_diff_eq(Vec3::NEG_X * 3.0, 1e-5));
    }

    #[test]
    fn test_impact_stops_gliding() {
        let mut app = test_app();
        app.update();

        let glider = spawn_launched(&mut app, &presets::glider(), Vec3::X * 8.0);
        let mut glide = GlideControl::new(Default::default());
        glide.set_gliding(true);
        app.world_mut()
            .entity_mut(glider)
            .insert((glide, GravityScale(0.0)));

        app.world_mut().write_message(ProjectileImpact {
            projectile: glider,
            other: Entity::PLACEHOLDER,
            point: Vec3::ZERO,
        });
        app.update();

        assert!(!app.world().get::<GlideControl>(glider).unwrap().is_gliding());
        assert_eq!(app.world().get::<GravityScale>(glider).unwrap().0, 1.0);
    }
}
