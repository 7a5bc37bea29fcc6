//! Slingshot controller - seating, dragging and releasing projectiles.

use avian3d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::components::{
    GlideControl, GrabZone, Projectile, SlingBands, SlingTether, Slingshot, SlingshotState,
    SlingshotStatus,
};
use crate::events::{ProjectileLaunched, SlingshotEmpty};
use crate::resources::PointerState;
use crate::systems::{glide, powers};
use crate::types::SlingshotError;

/// Validate new slingshots and seat their first projectile.
///
/// Invalid slingshots are logged and disabled.
pub fn setup_slingshots(
    mut commands: Commands,
    mut slingshots: Query<(Entity, &Slingshot, &mut SlingshotState)>,
    placed: Query<&GlobalTransform>,
    mut empty: MessageWriter<SlingshotEmpty>,
) {
    for (entity, slingshot, mut state) in slingshots.iter_mut() {
        if state.status != SlingshotStatus::Uninitialized {
            continue;
        }

        if let Err(err) = check_setup(slingshot, &placed) {
            error!("Slingshot {entity:?} disabled: {err}");
            state.status = SlingshotStatus::Disabled;
            continue;
        }

        match slingshot.spawn_point {
            Some(spawn_point) if placed.get(spawn_point).is_err() => {
                warn!("Slingshot {entity:?}: spawn point {spawn_point:?} has no transform, seating projectiles at the anchor");
            }
            None => debug!("Slingshot {entity:?}: no spawn point, seating projectiles at the anchor"),
            _ => {}
        }

        state.status = SlingshotStatus::Ready;
        state.remaining = slingshot.total_projectiles;
        state.sequence_index = 0;
        state.dragging = false;

        if let Err(err) = prepare_next(&mut commands, entity, slingshot, &mut state, &placed, &mut empty) {
            error!("Slingshot {entity:?} disabled: {err}");
            state.status = SlingshotStatus::Disabled;
        }
    }
}

/// Per-frame slingshot logic: seat pending projectiles, start and follow
/// drags, release on pointer up and keep the bands in sync.
#[allow(clippy::too_many_arguments)]
pub fn update_slingshots(
    mut commands: Commands,
    time: Res<Time>,
    fixed_time: Res<Time<Fixed>>,
    pointer: Res<PointerState>,
    mut slingshots: Query<(
        Entity,
        &Slingshot,
        &mut SlingshotState,
        Option<&GrabZone>,
        Option<&mut SlingBands>,
    )>,
    placed: Query<&GlobalTransform>,
    mut seated: Query<
        (
            &mut Transform,
            &RigidBody,
            &mut LinearVelocity,
            Option<&Mass>,
            Option<&mut Projectile>,
            Option<&mut GlideControl>,
            Option<&mut GravityScale>,
        ),
        With<SlingTether>,
    >,
    mut launched: MessageWriter<ProjectileLaunched>,
    mut empty: MessageWriter<SlingshotEmpty>,
) {
    let dt = time.delta_secs();
    let fixed_dt = fixed_time.timestep().as_secs_f32();

    for (entity, slingshot, mut state, grab_zone, mut bands) in slingshots.iter_mut() {
        if state.status != SlingshotStatus::Ready {
            continue;
        }

        if let Some(wait) = state.prepare_in {
            let wait = wait - dt;
            if wait <= 0.0 {
                state.prepare_in = None;
                if let Err(err) =
                    prepare_next(&mut commands, entity, slingshot, &mut state, &placed, &mut empty)
                {
                    error!("Slingshot {entity:?} disabled: {err}");
                    state.status = SlingshotStatus::Disabled;
                    continue;
                }
            } else {
                state.prepare_in = Some(wait);
            }
        }

        let Some(anchor_position) = anchor_position(slingshot, &placed) else {
            error!("Slingshot {entity:?} disabled: {}", SlingshotError::MissingAnchor);
            state.status = SlingshotStatus::Disabled;
            continue;
        };

        let seated_projectile = state
            .current
            .and_then(|current| seated.get_mut(current).ok().map(|item| (current, item)))
            .filter(|(_, (_, body, ..))| **body == RigidBody::Kinematic);

        let Some((
            current,
            (mut transform, _, mut velocity, mass, projectile, glide_control, gravity),
        )) = seated_projectile
        else {
            state.dragging = false;
            if let Some(bands) = bands.as_deref_mut() {
                bands.visible = false;
            }
            continue;
        };

        if pointer.just_pressed && !state.dragging {
            let can_start = match grab_zone {
                Some(zone) => {
                    let center = placed
                        .get(entity)
                        .map(GlobalTransform::translation)
                        .unwrap_or(anchor_position);
                    pointer
                        .ray
                        .is_some_and(|ray| ray_hits_sphere(ray, center, zone.radius, zone.max_distance))
                }
                None => true,
            };
            if can_start {
                state.dragging = true;
            }
        }

        if state.dragging && pointer.held {
            if let Some(ray) = pointer.ray {
                let target = pointer_world_position(ray, anchor_position);
                transform.translation =
                    anchor_position + clamp_stretch(target - anchor_position, slingshot.max_stretch);
            }
        }

        if state.dragging && !pointer.held {
            state.dragging = false;

            let direction = anchor_position - transform.translation;
            let stretch = direction.length();
            let mass = mass.map_or(1.0, |mass| mass.0);
            let launch = launch_velocity_change(
                direction,
                slingshot.launch_force_multiplier,
                mass,
                fixed_dt,
            );

            velocity.0 += launch;

            match projectile {
                Some(mut projectile) => projectile.notify_launched(),
                None => warn!(
                    "Launched entity {current:?} has no Projectile component, its power will not fire"
                ),
            }

            if let (Some(mut glide_control), Some(mut gravity)) = (glide_control, gravity) {
                let launch_velocity = velocity.0;
                glide::activate_glide(
                    &mut glide_control,
                    &mut transform,
                    &mut velocity,
                    &mut gravity,
                    launch_velocity,
                    current,
                );
            }

            commands
                .entity(current)
                .insert(RigidBody::Dynamic)
                .remove::<SlingTether>();
            state.current = None;
            state.sequence_index = (state.sequence_index + 1) % slingshot.sequence.len().max(1);
            state.prepare_in = Some(slingshot.time_to_prepare_next.max(0.0));

            launched.write(ProjectileLaunched {
                slingshot: entity,
                projectile: current,
                velocity: launch,
                stretch,
            });

            if let Some(bands) = bands.as_deref_mut() {
                bands.visible = false;
            }
            continue;
        }

        if let Some(bands) = bands.as_deref_mut() {
            update_bands(bands, anchor_position, transform.translation);
        }
    }
}

/// Seat the next projectile of the sequence, or report that the slingshot is empty.
fn prepare_next(
    commands: &mut Commands,
    entity: Entity,
    slingshot: &Slingshot,
    state: &mut SlingshotState,
    placed: &Query<&GlobalTransform>,
    empty: &mut MessageWriter<SlingshotEmpty>,
) -> Result<(), SlingshotError> {
    if let Some(previous) = state.current.take() {
        if let Ok(mut previous) = commands.get_entity(previous) {
            previous.remove::<SlingTether>();
        }
    }

    if state.remaining == 0 {
        info!("Slingshot {entity:?}: no launches remaining");
        empty.write(SlingshotEmpty { slingshot: entity });
        return Ok(());
    }

    let anchor = slingshot.anchor.ok_or(SlingshotError::MissingAnchor)?;
    let position = slingshot
        .spawn_point
        .and_then(|spawn_point| placed.get(spawn_point).ok())
        .or_else(|| placed.get(anchor).ok())
        .map(GlobalTransform::translation)
        .ok_or(SlingshotError::MissingAnchor)?;
    let archetype = slingshot
        .sequence
        .get(state.sequence_index)
        .ok_or(SlingshotError::EmptySequence)?;

    let name = format!(
        "{}_Launch_{}",
        archetype.name,
        state.launch_number(slingshot.total_projectiles)
    );
    let projectile = powers::spawn_projectile(
        commands,
        archetype,
        name,
        Transform::from_translation(position),
        RigidBody::Kinematic,
        Vec3::ZERO,
        false,
    );
    commands.entity(projectile).insert(SlingTether {
        slingshot: entity,
        anchor,
        spring: slingshot.spring,
        damper: slingshot.damper,
    });

    state.current = Some(projectile);
    state.remaining -= 1;
    Ok(())
}

fn check_setup(
    slingshot: &Slingshot,
    placed: &Query<&GlobalTransform>,
) -> Result<(), SlingshotError> {
    slingshot.validate()?;
    anchor_position(slingshot, placed)
        .map(|_| ())
        .ok_or(SlingshotError::MissingAnchor)
}

/// World position of the anchor; it is usually a child of the slingshot frame.
fn anchor_position(slingshot: &Slingshot, placed: &Query<&GlobalTransform>) -> Option<Vec3> {
    slingshot
        .anchor
        .and_then(|anchor| placed.get(anchor).ok())
        .map(GlobalTransform::translation)
}

fn update_bands(bands: &mut SlingBands, anchor: Vec3, projectile: Vec3) {
    bands.visible = true;
    bands.segments = [
        (anchor + bands.fork_offsets[0], projectile),
        (anchor + bands.fork_offsets[1], projectile),
    ];
}

/// Limit a pull offset to the maximum stretch.
pub fn clamp_stretch(offset: Vec3, max_stretch: f32) -> Vec3 {
    if offset.length() > max_stretch {
        offset.normalize() * max_stretch
    } else {
        offset
    }
}

/// Project a pointer ray onto the play plane.
///
/// The play plane passes through the anchor and faces +Z. If the ray never
/// reaches it, the point along the ray at the camera-anchor distance is used.
pub fn pointer_world_position(ray: Ray3d, anchor: Vec3) -> Vec3 {
    let plane = InfinitePlane3d { normal: Dir3::Z };
    match ray.intersect_plane(anchor, plane) {
        Some(distance) => ray.get_point(distance),
        None => {
            warn!("Pointer ray misses the play plane, falling back to the anchor depth");
            ray.get_point(ray.origin.distance(anchor))
        }
    }
}

/// Velocity change given by releasing a projectile.
///
/// The launch force `normalize(direction) * |direction| * multiplier` acts for
/// one fixed physics step.
///
/// # Arguments
/// * `direction` - Vector from the projectile back to the anchor
/// * `multiplier` - Force per unit of stretch (N)
/// * `mass` - Projectile mass (kg)
/// * `dt` - Fixed physics timestep (seconds)
pub fn launch_velocity_change(direction: Vec3, multiplier: f32, mass: f32, dt: f32) -> Vec3 {
    let force = direction.normalize_or_zero() * direction.length() * multiplier;
    force * dt / mass.max(f32::EPSILON)
}

/// Test a pointer ray against the grab sphere of a slingshot.
pub fn ray_hits_sphere(ray: Ray3d, center: Vec3, radius: f32, max_distance: f32) -> bool {
    let direction = ray.direction.as_vec3();
    let to_origin = ray.origin - center;
    let b = to_origin.dot(direction);
    let c = to_origin.length_squared() - radius * radius;

    // Origin outside the sphere and pointing away
    if c > 0.0 && b > 0.0 {
        return false;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return false;
    }

    let distance = (-b - discriminant.sqrt()).max(0.0);
    distance <= max_distance
}
