//! Common types and data definitions for the slingshot system.
//!
//! Everything in here is plain data: it derives `serde` so levels can describe
//! their projectile sequences in data files, and it carries the reference
//! tuning values in its `Default` impls.

use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Power carried by a projectile.
///
/// # Variants
/// * `Normal` - No special behavior
/// * `ExplodeOnImpact` - Pushes nearby explodable bodies away on first impact
/// * `SplitOnTap` - Breaks into a fan of fragments when the player taps
/// * `SpeedBoostOnTap` - Gets a velocity kick along its flight direction on tap
/// * `PierceThrough` - Keeps flying through a limited number of impacts
///
/// # Example
/// ```
/// use bevy_slingshot::types::ProjectilePowerType;
///
/// let power = ProjectilePowerType::SplitOnTap;
/// assert!(power.is_tap_power());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Reflect, Serialize, Deserialize)]
pub enum ProjectilePowerType {
    #[default]
    /// Plain projectile
    Normal,
    /// Explodes on first impact
    ExplodeOnImpact,
    /// Splits into fragments on tap
    SplitOnTap,
    /// Speed boost on tap
    SpeedBoostOnTap,
    /// Pierces through a limited number of bodies
    PierceThrough,
}

impl ProjectilePowerType {
    /// Whether this power is normally fired by a tap during flight.
    pub fn is_tap_power(self) -> bool {
        matches!(self, Self::SplitOnTap | Self::SpeedBoostOnTap)
    }
}

/// Explosion tuning for `ExplodeOnImpact` projectiles.
///
/// # Fields
/// * `radius` - Blast radius in world units
/// * `force` - Peak force applied at the blast center (newtons)
/// * `layers` - Bitmask matched against [`Explodable::layers`](crate::components::Explodable)
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionSettings {
    pub radius: f32,
    pub force: f32,
    pub layers: u32,
}

impl Default for ExplosionSettings {
    fn default() -> Self {
        Self {
            radius: 2.0,
            force: 500.0,
            layers: u32::MAX,
        }
    }
}

/// Split tuning for `SplitOnTap` projectiles.
///
/// Fragment `i` is spawned from `fragments[i]`; indices past the end of
/// `fragments` are skipped, so `count` is an upper bound.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitSettings {
    /// Archetypes used for the fragments, in fan order
    pub fragments: Vec<ProjectileArchetype>,
    /// Number of fragments to spawn
    pub count: u32,
    /// Total fan angle in degrees
    pub spread_angle: f32,
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            fragments: Vec::new(),
            count: 3,
            spread_angle: 30.0,
        }
    }
}

/// Speed boost tuning for `SpeedBoostOnTap` projectiles.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedBoostSettings {
    /// Velocity change (m/s) added along the flight direction
    pub multiplier: f32,
}

impl Default for SpeedBoostSettings {
    fn default() -> Self {
        Self { multiplier: 1.5 }
    }
}

/// Pierce tuning for `PierceThrough` projectiles.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PierceSettings {
    /// Impacts the projectile can fly through before it stops piercing
    pub max_pierces: u32,
}

impl Default for PierceSettings {
    fn default() -> Self {
        Self { max_pierces: 1 }
    }
}

/// Tilt-steering tuning for gliding projectiles.
///
/// # Fields
/// * `move_speed` - Vertical speed at full tilt (m/s)
/// * `max_y` / `min_y` - Vertical band the glider is kept inside
/// * `rotation_smoothness` - How quickly the body turns to face its velocity
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GlideSettings {
    pub move_speed: f32,
    pub max_y: f32,
    pub min_y: f32,
    pub rotation_smoothness: f32,
}

impl Default for GlideSettings {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            max_y: 15.0,
            min_y: -5.0,
            rotation_smoothness: 5.0,
        }
    }
}

/// Visual flash spawned where a power fires.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationEffect {
    /// Linear sRGB color
    pub color: [f32; 3],
    /// Radius the flash expands to
    pub radius: f32,
    /// Seconds before the flash is removed
    pub lifetime: f32,
}

impl Default for ActivationEffect {
    fn default() -> Self {
        Self {
            color: [1.0, 0.6, 0.1],
            radius: 1.0,
            lifetime: 0.4,
        }
    }
}

/// Blueprint for a projectile the slingshot (or a split) can spawn.
///
/// # Example
/// ```
/// use bevy_slingshot::types::{ProjectileArchetype, ProjectilePowerType};
///
/// let rock = ProjectileArchetype::new("Rock")
///     .with_mass(2.0)
///     .with_power(ProjectilePowerType::ExplodeOnImpact);
/// assert!(rock.validate().is_ok());
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileArchetype {
    /// Display name, used as the prefix of spawned entity names
    pub name: String,
    /// Collider radius
    pub radius: f32,
    /// Body mass (kg)
    pub mass: f32,
    /// Linear sRGB color of the projectile mesh
    pub color: [f32; 3],
    pub power: ProjectilePowerType,
    /// When set, the power only fires from a tap (impact powers still fire on impact)
    pub power_requires_tap: bool,
    pub activation_effect: Option<ActivationEffect>,
    /// Asset path of the sound played on activation
    pub activation_sound: Option<String>,
    pub explosion: ExplosionSettings,
    pub split: SplitSettings,
    pub speed_boost: SpeedBoostSettings,
    pub pierce: PierceSettings,
    /// Adds tilt steering after launch
    pub glide: Option<GlideSettings>,
}

impl Default for ProjectileArchetype {
    fn default() -> Self {
        Self {
            name: "Projectile".to_string(),
            radius: 0.25,
            mass: 1.0,
            color: [0.8, 0.2, 0.2],
            power: ProjectilePowerType::Normal,
            power_requires_tap: false,
            activation_effect: None,
            activation_sound: None,
            explosion: ExplosionSettings::default(),
            split: SplitSettings::default(),
            speed_boost: SpeedBoostSettings::default(),
            pierce: PierceSettings::default(),
            glide: None,
        }
    }
}

impl ProjectileArchetype {
    /// Creates an archetype with default tuning and the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_power(mut self, power: ProjectilePowerType) -> Self {
        self.power = power;
        self.power_requires_tap = power.is_tap_power();
        self
    }

    pub fn with_split(mut self, split: SplitSettings) -> Self {
        self.split = split;
        self
    }

    pub fn with_glide(mut self, glide: GlideSettings) -> Self {
        self.glide = Some(glide);
        self
    }

    pub fn with_activation_effect(mut self, effect: ActivationEffect) -> Self {
        self.activation_effect = Some(effect);
        self
    }

    pub fn with_activation_sound(mut self, path: impl Into<String>) -> Self {
        self.activation_sound = Some(path.into());
        self
    }

    /// Checks that the archetype can be turned into a physics body.
    ///
    /// Split fragments are validated recursively.
    ///
    /// # Returns
    /// `Err(SlingshotError::InvalidArchetype)` naming the first offending archetype
    pub fn validate(&self) -> Result<(), SlingshotError> {
        let invalid = |reason: &str| SlingshotError::InvalidArchetype {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(invalid("mass must be positive"));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(invalid("radius must be positive"));
        }
        if self.power == ProjectilePowerType::ExplodeOnImpact && self.explosion.radius <= 0.0 {
            return Err(invalid("explosion radius must be positive"));
        }
        if let Some(glide) = &self.glide {
            if glide.min_y > glide.max_y {
                return Err(invalid("glide min_y is above max_y"));
            }
        }
        for fragment in &self.split.fragments {
            fragment.validate()?;
        }
        Ok(())
    }
}

/// Setup errors that disable a slingshot.
#[derive(Clone, PartialEq, Debug)]
pub enum SlingshotError {
    /// The projectile sequence is empty
    EmptySequence,
    /// No anchor entity was assigned, or it has no transform
    MissingAnchor,
    /// An archetype in the sequence cannot be spawned
    InvalidArchetype { name: String, reason: String },
}

impl fmt::Display for SlingshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySequence => write!(f, "projectile sequence is empty"),
            Self::MissingAnchor => write!(f, "anchor is not assigned or has no transform"),
            Self::InvalidArchetype { name, reason } => {
                write!(f, "projectile archetype '{name}' is invalid: {reason}")
            }
        }
    }
}

impl std::error::Error for SlingshotError {}

/// Ready-made archetypes covering every power.
pub mod presets {
    use super::*;

    /// Plain heavy stone.
    pub fn pebble() -> ProjectileArchetype {
        ProjectileArchetype::new("Pebble").with_color([0.55, 0.5, 0.45])
    }

    /// Explodes on first impact.
    pub fn bomb() -> ProjectileArchetype {
        ProjectileArchetype::new("Bomb")
            .with_radius(0.3)
            .with_mass(1.5)
            .with_color([0.1, 0.1, 0.1])
            .with_power(ProjectilePowerType::ExplodeOnImpact)
            .with_activation_effect(ActivationEffect {
                color: [1.0, 0.5, 0.0],
                radius: 2.0,
                lifetime: 0.5,
            })
    }

    /// Small shard spawned by [`cluster`].
    pub fn shard() -> ProjectileArchetype {
        ProjectileArchetype::new("Shard")
            .with_radius(0.12)
            .with_mass(0.3)
            .with_color([0.2, 0.4, 0.9])
    }

    /// Splits into three shards on tap.
    pub fn cluster() -> ProjectileArchetype {
        ProjectileArchetype::new("Cluster")
            .with_color([0.2, 0.3, 1.0])
            .with_power(ProjectilePowerType::SplitOnTap)
            .with_split(SplitSettings {
                fragments: vec![shard(), shard(), shard()],
                ..Default::default()
            })
            .with_activation_effect(ActivationEffect {
                color: [0.4, 0.6, 1.0],
                radius: 0.6,
                lifetime: 0.25,
            })
    }

    /// Gets a speed kick on tap.
    pub fn dart() -> ProjectileArchetype {
        ProjectileArchetype::new("Dart")
            .with_radius(0.18)
            .with_mass(0.6)
            .with_color([1.0, 0.85, 0.1])
            .with_power(ProjectilePowerType::SpeedBoostOnTap)
    }

    /// Flies through the first body it hits.
    pub fn piercer() -> ProjectileArchetype {
        ProjectileArchetype::new("Piercer")
            .with_radius(0.2)
            .with_color([0.7, 0.7, 0.75])
            .with_power(ProjectilePowerType::PierceThrough)
    }

    /// Tilt-steered glider.
    pub fn glider() -> ProjectileArchetype {
        ProjectileArchetype::new("Glider")
            .with_color([0.2, 0.8, 0.3])
            .with_glide(GlideSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tap_powers() {
        assert!(ProjectilePowerType::SplitOnTap.is_tap_power());
        assert!(ProjectilePowerType::SpeedBoostOnTap.is_tap_power());
        assert!(!ProjectilePowerType::ExplodeOnImpact.is_tap_power());
        assert!(!ProjectilePowerType::PierceThrough.is_tap_power());
    }

    #[test]
    fn test_presets_are_valid() {
        for archetype in [
            presets::pebble(),
            presets::bomb(),
            presets::cluster(),
            presets::dart(),
            presets::piercer(),
            presets::glider(),
        ] {
            assert!(archetype.validate().is_ok(), "{} should be valid", archetype.name);
        }
    }

    #[test]
    fn test_invalid_fragment_is_reported() {
        let broken = ProjectileArchetype::new("Broken").with_mass(0.0);
        let parent = presets::cluster().with_split(SplitSettings {
            fragments: vec![presets::shard(), broken],
            ..Default::default()
        });

        match parent.validate() {
            Err(SlingshotError::InvalidArchetype { name, .. }) => assert_eq!(name, "Broken"),
            other => panic!("Expected invalid fragment, got {other:?}"),
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SlingshotError::EmptySequence.to_string(),
            "projectile sequence is empty"
        );
        let err = SlingshotError::InvalidArchetype {
            name: "Rock".into(),
            reason: "mass must be positive".into(),
        };
        assert_eq!(
            err.to_string(),
            "projectile archetype 'Rock' is invalid: mass must be positive"
        );
    }

    #[test]
    fn test_archetype_from_level_data() {
        let json = r#"{
            "name": "Boomer",
            "mass": 2.0,
            "power": "ExplodeOnImpact",
            "explosion": { "radius": 4.0, "force": 900.0, "layers": 2 }
        }"#;

        let archetype: ProjectileArchetype = serde_json::from_str(json).unwrap();
        assert_eq!(archetype.name, "Boomer");
        assert_eq!(archetype.mass, 2.0);
        assert_eq!(archetype.power, ProjectilePowerType::ExplodeOnImpact);
        assert_eq!(archetype.explosion.radius, 4.0);
        assert_eq!(archetype.explosion.layers, 2);
        // Unspecified fields keep their defaults
        assert_eq!(archetype.radius, 0.25);
        assert_eq!(archetype.split.count, 3);
        assert!(archetype.glide.is_none());
    }

    #[test]
    fn test_partial_power_settings_keep_defaults() {
        let json = r#"{
            "name": "Big",
            "power": "ExplodeOnImpact",
            "explosion": { "radius": 4.0 },
            "glide": { "move_speed": 6.0 },
            "activation_effect": { "radius": 2.5 }
        }"#;

        let archetype: ProjectileArchetype = serde_json::from_str(json).unwrap();
        assert_eq!(archetype.explosion.radius, 4.0);
        assert_eq!(archetype.explosion.force, 500.0);
        assert_eq!(archetype.explosion.layers, u32::MAX);

        let glide = archetype.glide.unwrap();
        assert_eq!(glide.move_speed, 6.0);
        assert_eq!(glide.max_y, 15.0);

        let effect = archetype.activation_effect.unwrap();
        assert_eq!(effect.radius, 2.5);
        assert_eq!(effect.lifetime, 0.4);
    }
}
