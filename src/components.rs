//! Core components for the slingshot system.

use bevy::prelude::*;

use crate::types::{
    ActivationEffect, ExplosionSettings, GlideSettings, PierceSettings, ProjectileArchetype,
    ProjectilePowerType, SpeedBoostSettings, SplitSettings, SlingshotError,
};

/// Slingshot controller configuration.
///
/// Place this on the entity the player grabs. The projectile is seated at the
/// spawn point (or the anchor when no spawn point is set), dragged within
/// `max_stretch` of the anchor and launched back toward it on release.
///
/// # Fields
/// * `max_stretch` - Maximum distance the projectile can be pulled from the anchor
/// * `launch_force_multiplier` - Force per unit of stretch applied on release (N)
/// * `total_projectiles` - Number of launches allowed
/// * `time_to_prepare_next` - Delay before the next projectile is seated (seconds)
/// * `spring` / `damper` - Tether tuning copied onto each seated projectile
/// * `anchor` - Entity whose transform is the pull-back center
/// * `spawn_point` - Optional entity where new projectiles appear
/// * `sequence` - Projectile archetypes, cycled launch after launch
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_slingshot::components::Slingshot;
/// use bevy_slingshot::types::presets;
///
/// let slingshot = Slingshot::new(Entity::PLACEHOLDER, vec![presets::pebble(), presets::bomb()])
///     .with_total_projectiles(8)
///     .with_max_stretch(2.5);
/// assert!(slingshot.validate().is_ok());
/// ```
#[derive(Component, Clone)]
#[require(SlingshotState)]
pub struct Slingshot {
    pub max_stretch: f32,
    pub launch_force_multiplier: f32,
    pub total_projectiles: u32,
    pub time_to_prepare_next: f32,
    pub spring: f32,
    pub damper: f32,
    pub anchor: Option<Entity>,
    pub spawn_point: Option<Entity>,
    pub sequence: Vec<ProjectileArchetype>,
}

impl Default for Slingshot {
    fn default() -> Self {
        Self {
            max_stretch: 3.0,
            launch_force_multiplier: 100.0,
            total_projectiles: 5,
            time_to_prepare_next: 0.5,
            spring: 50.0,
            damper: 5.0,
            anchor: None,
            spawn_point: None,
            sequence: Vec::new(),
        }
    }
}

impl Slingshot {
    /// Creates a slingshot pulling around `anchor` with the given projectile sequence.
    pub fn new(anchor: Entity, sequence: Vec<ProjectileArchetype>) -> Self {
        Self {
            anchor: Some(anchor),
            sequence,
            ..Default::default()
        }
    }

    pub fn with_spawn_point(mut self, spawn_point: Entity) -> Self {
        self.spawn_point = Some(spawn_point);
        self
    }

    pub fn with_total_projectiles(mut self, total: u32) -> Self {
        self.total_projectiles = total;
        self
    }

    pub fn with_max_stretch(mut self, max_stretch: f32) -> Self {
        self.max_stretch = max_stretch;
        self
    }

    pub fn with_launch_force(mut self, multiplier: f32) -> Self {
        self.launch_force_multiplier = multiplier;
        self
    }

    pub fn with_prepare_delay(mut self, seconds: f32) -> Self {
        self.time_to_prepare_next = seconds;
        self
    }

    /// Checks the configuration that does not depend on the world.
    ///
    /// Anchor existence is checked by the setup system.
    pub fn validate(&self) -> Result<(), SlingshotError> {
        if self.sequence.is_empty() {
            return Err(SlingshotError::EmptySequence);
        }
        if self.anchor.is_none() {
            return Err(SlingshotError::MissingAnchor);
        }
        self.sequence.iter().try_for_each(ProjectileArchetype::validate)
    }
}

/// Lifecycle of a slingshot.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Reflect)]
pub enum SlingshotStatus {
    #[default]
    /// Not validated yet
    Uninitialized,
    /// Accepting input
    Ready,
    /// Setup failed; the slingshot ignores input
    Disabled,
}

/// Runtime state of a slingshot, inserted automatically with [`Slingshot`].
#[derive(Component, Clone, Default, Debug, Reflect)]
#[reflect(Component)]
pub struct SlingshotState {
    pub status: SlingshotStatus,
    /// Player is currently pulling the projectile
    pub dragging: bool,
    /// Launches left, decremented when a projectile is seated
    pub remaining: u32,
    /// Index into `Slingshot::sequence` of the next archetype to seat
    pub sequence_index: usize,
    /// Projectile currently seated
    pub current: Option<Entity>,
    /// Seconds until the next projectile is seated
    pub prepare_in: Option<f32>,
}

impl SlingshotState {
    /// 1-based number of the launch the next seated projectile will be.
    pub fn launch_number(&self, total: u32) -> u32 {
        total.saturating_sub(self.remaining) + 1
    }
}

/// Optional touch target around the slingshot.
///
/// Without it a drag can start anywhere on screen while a projectile is seated.
#[derive(Component, Clone, Copy, Debug, Reflect)]
#[reflect(Component)]
pub struct GrabZone {
    /// Radius of the grab sphere centered on the slingshot
    pub radius: f32,
    /// Maximum ray distance for the grab test
    pub max_distance: f32,
}

impl Default for GrabZone {
    fn default() -> Self {
        Self {
            radius: 1.0,
            max_distance: 200.0,
        }
    }
}

/// Elastic bands drawn from the fork to the seated projectile.
///
/// The slingshot systems keep `visible` and `segments` up to date; rendering
/// happens in the VFX plugin.
#[derive(Component, Clone, Debug)]
pub struct SlingBands {
    /// Offsets of the left and right fork tips from the anchor
    pub fork_offsets: [Vec3; 2],
    pub color: Color,
    pub visible: bool,
    /// Left and right band endpoints
    pub segments: [(Vec3, Vec3); 2],
}

impl Default for SlingBands {
    fn default() -> Self {
        Self {
            fork_offsets: [Vec3::ZERO; 2],
            color: Color::srgb(0.35, 0.2, 0.1),
            visible: false,
            segments: [(Vec3::ZERO, Vec3::ZERO); 2],
        }
    }
}

impl SlingBands {
    pub fn with_fork_offsets(mut self, left: Vec3, right: Vec3) -> Self {
        self.fork_offsets = [left, right];
        self
    }
}

/// Elastic link between a seated projectile and the slingshot anchor.
///
/// Present only while the projectile sits in the pouch. This is plain data: the
/// seated body is kinematic and follows the pointer, so no joint is created.
/// `spring` and `damper` come from the [`Slingshot`] for hosts that want to
/// build their own joint from them.
#[derive(Component, Clone, Copy, Debug, Reflect)]
#[reflect(Component)]
pub struct SlingTether {
    pub slingshot: Entity,
    pub anchor: Entity,
    pub spring: f32,
    pub damper: f32,
}

/// Projectile with an optional power.
///
/// # Fields
/// * `power` - Power fired by tap or impact
/// * `power_requires_tap` - Power waits for a tap during flight
/// * `launched` - Set once the projectile leaves the slingshot
/// * `power_activated` - Set once the power has fired (or piercing is exhausted)
/// * `pierces` - Impacts already pierced
/// * `last_velocity` - Velocity before the latest physics step
#[derive(Component, Clone, Debug)]
pub struct Projectile {
    pub power: ProjectilePowerType,
    pub power_requires_tap: bool,
    pub activation_effect: Option<ActivationEffect>,
    pub activation_sound: Option<String>,
    pub explosion: ExplosionSettings,
    pub split: SplitSettings,
    pub speed_boost: SpeedBoostSettings,
    pub pierce: PierceSettings,
    pub launched: bool,
    pub power_activated: bool,
    pub pierces: u32,
    pub last_velocity: Vec3,
}

impl Default for Projectile {
    fn default() -> Self {
        Self::from_archetype(&ProjectileArchetype::default())
    }
}

impl Projectile {
    /// Builds the power state described by an archetype.
    pub fn from_archetype(archetype: &ProjectileArchetype) -> Self {
        Self {
            power: archetype.power,
            power_requires_tap: archetype.power_requires_tap,
            activation_effect: archetype.activation_effect,
            activation_sound: archetype.activation_sound.clone(),
            explosion: archetype.explosion,
            split: archetype.split.clone(),
            speed_boost: archetype.speed_boost,
            pierce: archetype.pierce,
            launched: false,
            power_activated: false,
            pierces: 0,
            last_velocity: Vec3::ZERO,
        }
    }

    /// Marks the projectile as launched and rearms its power.
    pub fn notify_launched(&mut self) {
        self.launched = true;
        self.power_activated = false;
        self.pierces = 0;
    }

    /// Whether a tap right now would fire the power.
    pub fn awaits_tap(&self) -> bool {
        self.launched && !self.power_activated && self.power_requires_tap
    }
}

/// Tilt steering for a launched projectile.
///
/// Inactive until the slingshot releases the projectile; while gliding,
/// gravity is off and vertical speed follows device tilt.
///
/// # Example
/// ```
/// use bevy_slingshot::components::GlideControl;
/// use bevy_slingshot::types::GlideSettings;
///
/// let glide = GlideControl::new(GlideSettings { move_speed: 6.0, ..Default::default() });
/// assert!(!glide.is_gliding());
/// ```
#[derive(Component, Clone, Debug, Default, Reflect)]
#[reflect(Component)]
pub struct GlideControl {
    pub move_speed: f32,
    pub max_y: f32,
    pub min_y: f32,
    pub rotation_smoothness: f32,
    gliding: bool,
}

impl GlideControl {
    pub fn new(settings: GlideSettings) -> Self {
        Self {
            move_speed: settings.move_speed,
            max_y: settings.max_y,
            min_y: settings.min_y,
            rotation_smoothness: settings.rotation_smoothness,
            gliding: false,
        }
    }

    pub fn is_gliding(&self) -> bool {
        self.gliding
    }

    pub(crate) fn set_gliding(&mut self, gliding: bool) {
        self.gliding = gliding;
    }
}

/// Body that explosions can push.
///
/// The push is scaled by the body's avian `Mass` (or computed mass).
///
/// # Fields
/// * `layers` - Bitmask matched against the explosion's layer mask
#[derive(Component, Clone, Copy, Debug, Reflect)]
#[reflect(Component)]
pub struct Explodable {
    pub layers: u32,
}

impl Default for Explodable {
    fn default() -> Self {
        Self { layers: 1 }
    }
}

/// Physical shape and color of a projectile.
///
/// The collision bridge attaches a sphere collider and the VFX plugin a mesh.
#[derive(Component, Clone, Copy, Debug)]
pub struct ProjectileShape {
    pub radius: f32,
    pub color: [f32; 3],
}

/// Expanding flash spawned when a power fires.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct ActivationFlash {
    /// Lifetime remaining (seconds)
    pub lifetime: f32,
    /// Lifetime at spawn (seconds)
    pub total_lifetime: f32,
    /// Radius reached at the end of the lifetime
    pub max_radius: f32,
}
