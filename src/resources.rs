//! Global resources for the slingshot system.

use bevy::prelude::*;

/// Primary pointer (touch or mouse) for the current frame.
///
/// Written by the input plugin; mobile hosts and tests may fill it directly.
///
/// # Fields
/// * `just_pressed` - A press began this frame
/// * `held` - The pointer is down
/// * `screen_position` - Pointer position in viewport pixels
/// * `ray` - Camera ray through the pointer
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_slingshot::resources::PointerState;
///
/// let pointer = PointerState::pressed(Ray3d::new(Vec3::new(0.0, 0.0, 10.0), Dir3::NEG_Z));
/// assert!(pointer.just_pressed && pointer.held);
/// ```
#[derive(Resource, Clone, Debug, Default, Reflect)]
#[reflect(Resource)]
pub struct PointerState {
    pub just_pressed: bool,
    pub held: bool,
    pub screen_position: Option<Vec2>,
    pub ray: Option<Ray3d>,
}

impl PointerState {
    /// A press that began this frame along `ray`.
    pub fn pressed(ray: Ray3d) -> Self {
        Self {
            just_pressed: true,
            held: true,
            screen_position: None,
            ray: Some(ray),
        }
    }

    /// A pointer held down along `ray`.
    pub fn held(ray: Ray3d) -> Self {
        Self {
            just_pressed: false,
            ..Self::pressed(ray)
        }
    }

    /// No pointer down.
    pub fn released() -> Self {
        Self::default()
    }
}

/// Device tilt, in units of g.
///
/// `acceleration.y` is the portrait tilt (top of the device toward or away
/// from the player). Hosts with an accelerometer write this every frame.
#[derive(Resource, Clone, Copy, Debug, Default, Reflect)]
#[reflect(Resource)]
pub struct TiltInput {
    pub acceleration: Vec3,
}

/// Shared render assets for effects.
#[derive(Resource, Default)]
pub struct SlingshotAssets {
    /// Unit sphere scaled by activation flashes
    pub sphere_mesh: Handle<Mesh>,
}

/// Debug drawing options.
///
/// # Fields
/// * `draw_velocity` - Draw projectile velocity vectors
/// * `draw_stretch` - Draw the maximum stretch circle around each anchor
#[derive(Resource, Clone, Default, Reflect)]
#[reflect(Resource)]
pub struct SlingshotDebugConfig {
    pub draw_velocity: bool,
    pub draw_stretch: bool,
}
