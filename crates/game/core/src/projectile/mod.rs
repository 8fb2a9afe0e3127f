//! Projectile hit resolution.
//!
//! A projectile moves through three phases:
//!
//! ```text
//! Flying ──first collision──▶ Hit ──immediately or after a delay──▶ Destroyed
//! ```
//!
//! Only the first collision is resolved. The phase acts as a latch: once it
//! leaves `Flying`, every later collision callback on the same instance is a
//! no-op, even while the projectile lingers during deferred destruction.
//! Scale growth runs every tick regardless of phase.

mod growth;
mod resolve;

pub use growth::{SCALE_TOLERANCE, interp_to};

use glam::Vec3;
use strum::IntoStaticStr;

use crate::error::ConfigError;
use crate::state::{ActorId, ComponentId};
use crate::timer::{TimerHandle, TimerService};

/// Perception noise emitted on impact.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NoiseParams {
    pub loudness: f32,
    pub range: f32,
    pub tag: String,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            loudness: 3.0,
            range: 3_000.0,
            tag: "Projectile".to_owned(),
        }
    }
}

/// Tuning of a projectile, fixed at spawn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProjectileParams {
    pub damage: f32,
    /// Area damage around the impact instead of a single target.
    pub explode_on_hit: bool,
    pub explosion_radius: f32,
    /// Whether the firing actor can be hurt by its own projectile.
    pub damage_owner: bool,
    /// Impulse magnitude given to physics-simulating components.
    pub physics_force: f32,
    /// Seconds the projectile lingers after its hit; 0 destroys it at once.
    pub deferred_destruction_delay: f32,
    /// Final scale relative to the spawn scale.
    pub max_size_multiplier: f32,
    /// Interpolation speed of the scale growth.
    pub growth_speed: f32,
    pub noise: NoiseParams,
}

impl Default for ProjectileParams {
    fn default() -> Self {
        Self {
            damage: 25.0,
            explode_on_hit: false,
            explosion_radius: 500.0,
            damage_owner: false,
            physics_force: 1_000.0,
            deferred_destruction_delay: 0.0,
            max_size_multiplier: 1.0,
            growth_speed: 2.0,
            noise: NoiseParams::default(),
        }
    }
}

impl ProjectileParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("damage", self.damage),
            ("explosion_radius", self.explosion_radius),
            ("physics_force", self.physics_force),
            ("deferred_destruction_delay", self.deferred_destruction_delay),
            ("max_size_multiplier", self.max_size_multiplier),
            ("growth_speed", self.growth_speed),
            ("noise.loudness", self.noise.loudness),
            ("noise.range", self.noise.range),
        ];

        match fields
            .into_iter()
            .find(|(_, value)| !(value.is_finite() && *value >= 0.0))
        {
            Some((field, value)) => Err(ConfigError::NegativeProjectileParam { field, value }),
            None => Ok(()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProjectilePhase {
    Flying,
    /// Hit resolved; waiting for deferred destruction.
    Hit,
    Destroyed,
}

/// A blocking collision reported by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitEvent {
    pub actor: ActorId,
    pub component: ComponentId,
    pub impact_point: Vec3,
    /// Surface normal at the impact, pointing away from the struck surface.
    pub impact_normal: Vec3,
}

/// What the host must do with the projectile after a collision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    /// The hit latch was already set; nothing happened.
    Ignored,
    /// Remove the projectile now.
    DestroyNow,
    /// Keep the projectile until `timer` fires.
    DestroyDeferred { timer: TimerHandle },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectileState {
    id: ActorId,
    owner: Option<ActorId>,
    location: Vec3,
    params: ProjectileParams,
    phase: ProjectilePhase,
    collision_enabled: bool,
    initial_scale: Vec3,
    scale: Vec3,
    destruction_timer: Option<TimerHandle>,
}

impl ProjectileState {
    pub fn new(
        id: ActorId,
        owner: Option<ActorId>,
        location: Vec3,
        scale: Vec3,
        params: ProjectileParams,
    ) -> Self {
        Self {
            id,
            owner,
            location,
            params,
            phase: ProjectilePhase::Flying,
            collision_enabled: true,
            initial_scale: scale,
            scale,
            destruction_timer: None,
        }
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn owner(&self) -> Option<ActorId> {
        self.owner
    }

    pub fn location(&self) -> Vec3 {
        self.location
    }

    pub fn set_location(&mut self, location: Vec3) {
        self.location = location;
    }

    pub fn params(&self) -> &ProjectileParams {
        &self.params
    }

    pub fn phase(&self) -> ProjectilePhase {
        self.phase
    }

    /// True once the first collision has been resolved.
    pub fn has_hit(&self) -> bool {
        self.phase != ProjectilePhase::Flying
    }

    pub fn collision_enabled(&self) -> bool {
        self.collision_enabled
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn target_scale(&self) -> Vec3 {
        self.initial_scale * self.params.max_size_multiplier
    }

    pub fn destruction_timer(&self) -> Option<TimerHandle> {
        self.destruction_timer
    }

    /// Handles an expired destruction timer. Returns true if the projectile
    /// is now Destroyed and should be removed.
    pub fn on_destruction_timer(&mut self, timer: TimerHandle) -> bool {
        if self.destruction_timer != Some(timer) {
            return false;
        }

        self.destruction_timer = None;
        self.phase = ProjectilePhase::Destroyed;
        true
    }

    /// Tears the projectile down, cancelling a pending destruction timer.
    pub fn teardown(&mut self, timers: &mut dyn TimerService) {
        if let Some(timer) = self.destruction_timer.take() {
            timers.cancel(timer);
        }
        self.collision_enabled = false;
        self.phase = ProjectilePhase::Destroyed;
    }
}
