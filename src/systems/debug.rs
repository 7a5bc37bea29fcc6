use avian3d::prelude::LinearVelocity;
use bevy::prelude::*;

use crate::components::{Projectile, Slingshot};
use crate::resources::SlingshotDebugConfig;

/// Draw debug gizmos for projectiles and slingshots.
///
/// Velocity vectors for projectiles in flight, and the maximum stretch around
/// each anchor.
pub fn draw_slingshot_debug(
    mut gizmos: Gizmos,
    config: Res<SlingshotDebugConfig>,
    projectiles: Query<(&Transform, &LinearVelocity, &Projectile)>,
    slingshots: Query<&Slingshot>,
    anchors: Query<&GlobalTransform>,
) {
    if config.draw_velocity {
        for (transform, velocity, _) in projectiles.iter().filter(|(_, _, p)| p.launched) {
            gizmos.sphere(transform.translation, 0.05, Color::srgb(1.0, 0.0, 0.0));
            // Scaled down for visibility
            let end = transform.translation + velocity.0 * 0.1;
            gizmos.line(transform.translation, end, Color::srgb(0.0, 1.0, 0.0));
        }
    }

    if config.draw_stretch {
        for slingshot in slingshots.iter() {
            let Some(anchor) = slingshot.anchor.and_then(|anchor| anchors.get(anchor).ok()) else {
                continue;
            };
            gizmos.circle(
                Isometry3d::from_translation(anchor.translation()),
                slingshot.max_stretch,
                Color::srgb(1.0, 1.0, 0.0),
            );
        }
    }
}
