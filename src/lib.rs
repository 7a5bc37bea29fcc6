//! # Bevy Slingshot
//!
//! Slingshot gameplay plugin for Bevy 0.18 and avian3d.
//!
//! ## Features
//! - Drag-and-release slingshot with clamped stretch and elastic bands
//! - Data-driven projectile sequences
//! - Projectile powers: explode on impact, split on tap, speed boost on tap, pierce
//! - Tilt-steered gliding projectiles
//! - Activation flashes and sounds
//!
//! ## Quick Start
//! ```rust,no_run
//! use avian3d::prelude::*;
//! use bevy::prelude::*;
//! use bevy_slingshot::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(PhysicsPlugins::default())
//!         .add_plugins(SlingshotPluginGroup)
//!         .run();
//! }
//! ```

pub mod components;
pub mod events;
pub mod resources;
pub mod systems;
pub mod types;

pub mod prelude {
    pub use crate::components::*;
    pub use crate::events::*;
    pub use crate::resources::*;
    pub use crate::types::*;
    pub use crate::SlingshotPluginGroup;
    pub use crate::SlingshotSet;
    pub use crate::{
        SlingshotCorePlugin, SlingshotDebugPlugin, SlingshotInputPlugin, SlingshotVfxPlugin,
    };
}

use avian3d::prelude::SpatialQueryPipeline;
use bevy::prelude::*;

/// Main plugin group that includes all slingshot subsystems.
///
/// Physics is not included; add avian's `PhysicsPlugins` alongside it.
///
/// # Example
/// ```no_run
/// use avian3d::prelude::*;
/// use bevy::prelude::*;
/// use bevy_slingshot::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(PhysicsPlugins::default())
///     .add_plugins(SlingshotPluginGroup);
/// ```
#[derive(Default)]
pub struct SlingshotPluginGroup;

impl PluginGroup for SlingshotPluginGroup {
    fn build(self) -> bevy::app::PluginGroupBuilder {
        bevy::app::PluginGroupBuilder::start::<Self>()
            .add(SlingshotCorePlugin)
            .add(SlingshotInputPlugin::default())
            .add(SlingshotVfxPlugin)
            .add(SlingshotDebugPlugin)
    }
}

/// Ordering of the slingshot systems inside `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SlingshotSet {
    /// Pointer and tilt sampling
    Input,
    /// Seating, dragging and launching
    Aim,
    /// Impacts, taps and explosions
    Powers,
    /// Meshes, flashes, sounds and bands
    Effects,
}

/// Core gameplay plugin (slingshots, powers, gliding).
///
/// Runs without a window or renderer. Mobile hosts and tests drive it by
/// writing [`resources::PointerState`] and [`resources::TiltInput`].
///
/// # Systems
/// - `setup_slingshots` / `update_slingshots` - Seating, dragging and launching
/// - `forward_collision_starts` - Physics contacts to impacts (needs avian)
/// - `handle_projectile_impacts` / `activate_powers_on_tap` - Power dispatch
/// - `apply_explosion_forces` - Pushes explodable bodies
/// - `track_projectile_velocity` / `update_gliding` - Fixed step upkeep
pub struct SlingshotCorePlugin;

impl Plugin for SlingshotCorePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<components::SlingshotState>()
            .register_type::<components::GrabZone>()
            .register_type::<components::SlingTether>()
            .register_type::<components::GlideControl>()
            .register_type::<components::Explodable>()
            .register_type::<resources::PointerState>()
            .register_type::<resources::TiltInput>()
            .register_type::<resources::SlingshotDebugConfig>()
            .init_resource::<resources::PointerState>()
            .init_resource::<resources::TiltInput>()
            .init_resource::<resources::SlingshotDebugConfig>()
            .add_message::<events::ProjectileLaunched>()
            .add_message::<events::ProjectileImpact>()
            .add_message::<events::PowerActivated>()
            .add_message::<events::ExplosionEvent>()
            .add_message::<events::ProjectileSplit>()
            .add_message::<events::ProjectilePierced>()
            .add_message::<events::SlingshotEmpty>()
            .configure_sets(
                Update,
                (
                    SlingshotSet::Input,
                    SlingshotSet::Aim,
                    SlingshotSet::Powers,
                    SlingshotSet::Effects,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    systems::slingshot::setup_slingshots,
                    systems::slingshot::update_slingshots,
                )
                    .chain()
                    .in_set(SlingshotSet::Aim),
            )
            .add_systems(
                Update,
                (
                    systems::collision::forward_collision_starts
                        .run_if(resource_exists::<SpatialQueryPipeline>),
                    systems::powers::handle_projectile_impacts,
                    systems::powers::activate_powers_on_tap,
                    systems::powers::apply_explosion_forces,
                )
                    .chain()
                    .in_set(SlingshotSet::Powers),
            )
            .add_systems(
                Update,
                systems::collision::attach_projectile_colliders
                    .run_if(resource_exists::<SpatialQueryPipeline>)
                    .in_set(SlingshotSet::Effects),
            )
            .add_systems(
                FixedUpdate,
                (
                    systems::powers::track_projectile_velocity,
                    systems::glide::update_gliding,
                )
                    .chain(),
            );
    }
}

/// Pointer and tilt input plugin.
///
/// Reads touch (preferred) or the left mouse button into
/// [`resources::PointerState`], building the pointer ray from the active
/// camera. With `keyboard_tilt` the arrow keys stand in for the accelerometer.
pub struct SlingshotInputPlugin {
    pub keyboard_tilt: bool,
}

impl Default for SlingshotInputPlugin {
    fn default() -> Self {
        Self {
            keyboard_tilt: true,
        }
    }
}

impl Plugin for SlingshotInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            systems::input::read_pointer_input.in_set(SlingshotSet::Input),
        );
        if self.keyboard_tilt {
            app.add_systems(
                Update,
                systems::input::read_keyboard_tilt.in_set(SlingshotSet::Input),
            );
        }
    }
}

/// VFX and audio plugin (projectile meshes, activation flashes, sounds, bands).
pub struct SlingshotVfxPlugin;

impl Plugin for SlingshotVfxPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<resources::SlingshotAssets>()
            .add_systems(Startup, systems::vfx::setup_slingshot_assets)
            .add_systems(
                Update,
                (
                    systems::vfx::attach_projectile_meshes,
                    systems::vfx::spawn_activation_flashes,
                    systems::vfx::update_activation_flashes,
                    systems::vfx::play_activation_sounds,
                    systems::vfx::draw_sling_bands,
                )
                    .in_set(SlingshotSet::Effects),
            );
    }
}

/// Debug plugin for slingshot visualization.
///
/// Drawing is off until enabled in [`resources::SlingshotDebugConfig`].
pub struct SlingshotDebugPlugin;

impl Plugin for SlingshotDebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            systems::debug::draw_slingshot_debug.in_set(SlingshotSet::Effects),
        );
    }
}
