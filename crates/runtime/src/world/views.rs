//! Split-borrow views that present session state as combat collaborators.
//!
//! The session owns combatants, projectiles and services in separate fields.
//! A view borrows only the services an operation needs, leaving the entity
//! being updated free to be borrowed mutably alongside it.

use std::collections::BTreeMap;

use combat_core::{
    ActorId, AmmoCount, CombatEvent, Combatant, ComponentId, DamageEvent, DamageSink, Damageable,
    EventQueue, ManualTimers, Noise, NoiseEmitter, ObjectCategories, Overlap, PhysicsScene,
    Presentation, ScoreSink, TeamId, TeamScoreTable, TimerCallback, TimerHandle, TimerService,
    WeaponHandle, WeaponKind, WeaponRack, WeaponSpawner, WeaponSpec,
};
use glam::Vec3;
use tracing::trace;

use super::{SceneWorld, WeaponRegistry};

/// Weapons, events, scores and timers: what damage and death touch.
pub struct LifecycleView<'a> {
    pub weapons: &'a mut WeaponRegistry,
    pub events: &'a mut EventQueue,
    pub scores: &'a mut TeamScoreTable,
    pub timers: &'a mut ManualTimers,
}

impl WeaponSpawner for LifecycleView<'_> {
    fn spawn_weapon(&mut self, kind: &WeaponKind, owner: ActorId) -> Option<WeaponSpec> {
        self.weapons.spawn_weapon(kind, owner)
    }
}

impl WeaponRack for LifecycleView<'_> {
    fn activate(&mut self, weapon: WeaponHandle) {
        self.weapons.activate(weapon);
    }

    fn deactivate(&mut self, weapon: WeaponHandle) {
        self.weapons.deactivate(weapon);
    }

    fn start_firing(&mut self, weapon: WeaponHandle) {
        self.weapons.start_firing(weapon);
    }

    fn stop_firing(&mut self, weapon: WeaponHandle) {
        self.weapons.stop_firing(weapon);
    }

    fn reload(&mut self, weapon: WeaponHandle) {
        self.weapons.reload(weapon);
    }

    fn ammo(&self, weapon: WeaponHandle) -> Option<AmmoCount> {
        self.weapons.ammo(weapon)
    }
}

impl Presentation for LifecycleView<'_> {
    fn publish(&mut self, event: CombatEvent) {
        self.events.publish(event);
    }
}

impl ScoreSink for LifecycleView<'_> {
    fn increment_score(&mut self, team: TeamId) {
        self.scores.increment_score(team);
    }
}

impl TimerService for LifecycleView<'_> {
    fn schedule_once(&mut self, delay: f32, callback: TimerCallback) -> TimerHandle {
        self.timers.schedule_once(delay, callback)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.timers.cancel(handle)
    }
}

/// Everything a projectile reaches while resolving a hit, including the
/// combatants it may damage.
pub struct HitView<'a> {
    pub scene: &'a mut SceneWorld,
    pub combatants: &'a mut BTreeMap<ActorId, Combatant>,
    pub lifecycle: LifecycleView<'a>,
}

impl PhysicsScene for HitView<'_> {
    fn line_trace(&self, start: Vec3, end: Vec3, ignore: &[ActorId]) -> Vec3 {
        self.scene.line_trace(start, end, ignore)
    }

    fn sphere_overlap(
        &self,
        center: Vec3,
        radius: f32,
        categories: ObjectCategories,
        ignore: &[ActorId],
    ) -> Vec<Overlap> {
        self.scene.sphere_overlap(center, radius, categories, ignore)
    }

    fn actor_location(&self, actor: ActorId) -> Option<Vec3> {
        self.scene.actor_location(actor)
    }

    fn simulates_physics(&self, component: ComponentId) -> bool {
        self.scene.simulates_physics(component)
    }

    fn apply_impulse(&mut self, component: ComponentId, impulse: Vec3, location: Vec3) {
        self.scene.apply_impulse(component, impulse, location);
    }
}

impl DamageSink for HitView<'_> {
    fn is_combatant(&self, actor: ActorId) -> bool {
        self.combatants.contains_key(&actor)
    }

    fn apply_damage_to(&mut self, target: ActorId, event: DamageEvent) -> f32 {
        let Some(combatant) = self.combatants.get_mut(&target) else {
            return 0.0;
        };

        let was_alive = combatant.is_alive();
        let applied = combatant.take_damage(&event, &mut self.lifecycle);
        if was_alive && !combatant.is_alive() {
            self.scene.halt(target);
        }

        trace!(
            target: "runtime::damage",
            target_actor = %target,
            applied,
            damage_type = %event.damage_type,
            "projectile damage routed"
        );
        applied
    }
}

impl NoiseEmitter for HitView<'_> {
    fn emit_noise(&mut self, noise: Noise) {
        self.lifecycle.publish(CombatEvent::NoiseEmitted(noise));
    }
}

impl Presentation for HitView<'_> {
    fn publish(&mut self, event: CombatEvent) {
        self.lifecycle.publish(event);
    }
}

impl TimerService for HitView<'_> {
    fn schedule_once(&mut self, delay: f32, callback: TimerCallback) -> TimerHandle {
        self.lifecycle.schedule_once(delay, callback)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.lifecycle.cancel(handle)
    }
}
