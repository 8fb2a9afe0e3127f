//! Combatant state and the Alive → Dead → PendingRespawn state machine.

use glam::Vec3;
use strum::IntoStaticStr;
use tracing::{debug, info};

use super::damage::{DamageEvent, Damageable, apply_damage};
use crate::config::CombatConfig;
use crate::env::{AmmoCount, PhysicsScene, ScoreSink, WeaponRack};
use crate::event::{CombatEvent, Presentation};
use crate::inventory::WeaponInventory;
use crate::state::{ActorId, TeamId, WeaponHandle};
use crate::timer::{TimerCallback, TimerHandle, TimerService};

/// Collaborators touched by damage and death.
pub trait LifecycleEnv: WeaponRack + Presentation + ScoreSink + TimerService {}

impl<T> LifecycleEnv for T where T: WeaponRack + Presentation + ScoreSink + TimerService + ?Sized {}

/// Where a combatant is in its life cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LifeState {
    Alive,
    /// Health depleted; death effects are being applied.
    Dead,
    /// Waiting for the respawn timer.
    PendingRespawn { timer: TimerHandle },
    /// Torn down. Upstream spawns a replacement.
    Removed,
}

/// Capability of carrying and aiming weapons.
pub trait WeaponHolder {
    fn inventory(&self) -> &WeaponInventory;

    fn inventory_mut(&mut self) -> &mut WeaponInventory;

    /// Forwards a weapon's ammo change to the HUD.
    fn update_weapon_hud(&mut self, ammo: AmmoCount, events: &mut dyn Presentation);

    /// Point the active weapon should aim at: the first blocking hit along
    /// `direction` from `eye`, or the end of the aim trace.
    fn weapon_target_location(&self, eye: Vec3, direction: Vec3, scene: &dyn PhysicsScene) -> Vec3;
}

/// A participant with health, a team and weapons.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    id: ActorId,
    team: TeamId,
    max_hp: f32,
    current_hp: f32,
    life: LifeState,
    respawn_delay: f32,
    max_aim_distance: f32,
    inventory: WeaponInventory,
    input_enabled: bool,
    movement_halted: bool,
}

impl Combatant {
    /// Creates an Alive combatant at full health.
    pub fn new(id: ActorId, team: TeamId, config: &CombatConfig) -> Self {
        Self {
            id,
            team,
            max_hp: config.max_hp,
            current_hp: config.max_hp,
            life: LifeState::Alive,
            respawn_delay: config.respawn_delay,
            max_aim_distance: config.max_aim_distance,
            inventory: WeaponInventory::new(id),
            input_enabled: true,
            movement_halted: false,
        }
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn current_hp(&self) -> f32 {
        self.current_hp
    }

    pub fn max_hp(&self) -> f32 {
        self.max_hp
    }

    pub(super) fn set_current_hp(&mut self, hp: f32) {
        self.current_hp = hp;
    }

    pub fn life_state(&self) -> LifeState {
        self.life
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn movement_halted(&self) -> bool {
        self.movement_halted
    }

    /// Pending respawn timer, if the combatant is waiting to be torn down.
    pub fn respawn_timer(&self) -> Option<TimerHandle> {
        match self.life {
            LifeState::PendingRespawn { timer } => Some(timer),
            _ => None,
        }
    }

    /// Brings the combatant back to full health and publishes the full life bar.
    ///
    /// Cancels a pending respawn timer, re-enables input and movement.
    pub fn reset(&mut self, env: &mut dyn LifecycleEnv) {
        if let Some(timer) = self.respawn_timer() {
            env.cancel(timer);
        }

        self.current_hp = self.max_hp;
        self.life = LifeState::Alive;
        self.input_enabled = true;
        self.movement_halted = false;

        env.publish(CombatEvent::LifeChanged {
            actor: self.id,
            fraction: 1.0,
        });
    }

    /// Runs every death effect and schedules the respawn.
    pub(super) fn die(&mut self, killer: Option<ActorId>, env: &mut dyn LifecycleEnv) {
        self.life = LifeState::Dead;

        self.inventory.deactivate_active(env);
        env.increment_score(self.team);

        self.movement_halted = true;
        self.input_enabled = false;

        env.publish(CombatEvent::AmmoUpdated {
            actor: self.id,
            magazine_size: AmmoCount::EMPTY.magazine_size,
            current_ammo: AmmoCount::EMPTY.current_ammo,
        });
        env.publish(CombatEvent::Died {
            actor: self.id,
            team: self.team,
            killer,
        });

        let timer = env.schedule_once(self.respawn_delay, TimerCallback::Respawn(self.id));
        self.life = LifeState::PendingRespawn { timer };

        info!(
            target: "combat_core::lifecycle",
            actor = %self.id,
            team = %self.team,
            killer = ?killer,
            respawn_in = self.respawn_delay,
            "combatant died"
        );
    }

    /// Handles an expired respawn timer.
    ///
    /// Returns true if `timer` was this combatant's pending respawn, in which
    /// case the combatant is now Removed and must be torn down by the host.
    pub fn on_respawn_timer(&mut self, timer: TimerHandle) -> bool {
        if self.respawn_timer() != Some(timer) {
            debug!(
                target: "combat_core::lifecycle",
                actor = %self.id,
                timer = timer.0,
                "ignoring stale respawn timer"
            );
            return false;
        }

        self.life = LifeState::Removed;
        true
    }

    /// Tears the combatant down, cancelling any outstanding timer.
    pub fn teardown(&mut self, timers: &mut dyn TimerService) {
        if let Some(timer) = self.respawn_timer() {
            timers.cancel(timer);
        }
        self.life = LifeState::Removed;
    }

    pub fn start_firing(&mut self, weapons: &mut dyn WeaponRack) {
        if let Some(handle) = self.input_weapon() {
            weapons.start_firing(handle);
        }
    }

    pub fn stop_firing(&mut self, weapons: &mut dyn WeaponRack) {
        if let Some(handle) = self.input_weapon() {
            weapons.stop_firing(handle);
        }
    }

    pub fn reload(&mut self, weapons: &mut dyn WeaponRack) {
        if let Some(handle) = self.input_weapon() {
            weapons.reload(handle);
        }
    }

    /// Input-driven cycle to the next weapon. No-op while input is disabled.
    pub fn switch_weapon_next(&mut self, env: &mut dyn LifecycleEnv) -> bool {
        self.input_enabled && self.inventory.switch_next(env)
    }

    /// Input-driven cycle to the previous weapon. No-op while input is disabled.
    pub fn switch_weapon_previous(&mut self, env: &mut dyn LifecycleEnv) -> bool {
        self.input_enabled && self.inventory.switch_previous(env)
    }

    /// Weapon-wheel selection. No-op while input is disabled.
    pub fn equip_weapon(&mut self, handle: WeaponHandle, env: &mut dyn LifecycleEnv) -> bool {
        self.input_enabled && self.inventory.equip(handle, env)
    }

    fn input_weapon(&self) -> Option<WeaponHandle> {
        if self.input_enabled {
            self.inventory.active_handle()
        } else {
            None
        }
    }
}

impl Damageable for Combatant {
    fn team(&self) -> TeamId {
        self.team
    }

    fn is_alive(&self) -> bool {
        self.current_hp > 0.0
    }

    fn life_fraction(&self) -> f32 {
        (self.current_hp / self.max_hp).clamp(0.0, 1.0)
    }

    fn take_damage(&mut self, event: &DamageEvent, env: &mut dyn LifecycleEnv) -> f32 {
        apply_damage(self, event, env)
    }
}

impl WeaponHolder for Combatant {
    fn inventory(&self) -> &WeaponInventory {
        &self.inventory
    }

    fn inventory_mut(&mut self) -> &mut WeaponInventory {
        &mut self.inventory
    }

    fn update_weapon_hud(&mut self, ammo: AmmoCount, events: &mut dyn Presentation) {
        events.publish(CombatEvent::AmmoUpdated {
            actor: self.id,
            magazine_size: ammo.magazine_size,
            current_ammo: ammo.current_ammo,
        });
    }

    fn weapon_target_location(&self, eye: Vec3, direction: Vec3, scene: &dyn PhysicsScene) -> Vec3 {
        let end = eye + direction.normalize_or_zero() * self.max_aim_distance;
        scene.line_trace(eye, end, &[self.id])
    }
}
