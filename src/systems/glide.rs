//! Glide control - tilt steering for launched projectiles.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::components::GlideControl;
use crate::resources::TiltInput;

/// Start gliding with the given launch velocity.
///
/// Gravity is switched off and the projectile turns to face its velocity.
pub fn activate_glide(
    glide: &mut GlideControl,
    transform: &mut Transform,
    velocity: &mut LinearVelocity,
    gravity: &mut GravityScale,
    launch_velocity: Vec3,
    entity: Entity,
) {
    glide.set_gliding(true);
    gravity.0 = 0.0;
    velocity.0 = launch_velocity;

    if launch_velocity.length_squared() > 0.01 {
        transform.look_to(launch_velocity, Vec3::Y);
    }
    info!("Projectile {entity:?} glide activated with velocity {launch_velocity}");
}

/// Stop gliding and restore gravity.
///
/// # Returns
/// False if the projectile was not gliding
pub fn deactivate_glide(glide: &mut GlideControl, gravity: &mut GravityScale, entity: Entity) -> bool {
    if !glide.is_gliding() {
        return false;
    }

    glide.set_gliding(false);
    gravity.0 = 1.0;
    info!("Projectile {entity:?} glide deactivated");
    true
}

/// Steer gliding projectiles with device tilt.
///
/// Runs in FixedUpdate. Vertical speed follows the tilt, horizontal speed is
/// kept, height stays inside the glide band and the body turns smoothly toward
/// its velocity.
pub fn update_gliding(
    time: Res<Time>,
    tilt: Res<TiltInput>,
    mut gliders: Query<(&GlideControl, &mut Transform, &mut LinearVelocity)>,
) {
    let dt = time.delta_secs();

    for (glide, mut transform, mut velocity) in gliders.iter_mut() {
        if !glide.is_gliding() {
            continue;
        }

        let (new_velocity, new_y) =
            glide_step(glide, velocity.0, transform.translation.y, tilt.acceleration.y);
        velocity.0 = new_velocity;
        if transform.translation.y != new_y {
            transform.translation.y = new_y;
        }

        if new_velocity.length_squared() > 0.1 {
            let target = Transform::IDENTITY.looking_to(new_velocity, Vec3::Y).rotation;
            let t = (dt * glide.rotation_smoothness).clamp(0.0, 1.0);
            transform.rotation = transform.rotation.slerp(target, t);
        }
    }
}

/// One glide step.
///
/// # Arguments
/// * `glide` - Glide tuning
/// * `velocity` - Current velocity
/// * `y` - Current height
/// * `tilt` - Portrait tilt in g
///
/// # Returns
/// The new velocity and the height clamped into `[min_y, max_y]`. At a bound
/// the vertical velocity pointing out of the band is dropped.
pub fn glide_step(glide: &GlideControl, velocity: Vec3, y: f32, tilt: f32) -> (Vec3, f32) {
    let mut velocity = Vec3::new(velocity.x, tilt * glide.move_speed, velocity.z);
    let clamped = y.max(glide.min_y).min(glide.max_y);

    if (clamped >= glide.max_y && velocity.y > 0.0) || (clamped <= glide.min_y && velocity.y < 0.0) {
        velocity.y = 0.0;
    }

    (velocity, clamped)
}
