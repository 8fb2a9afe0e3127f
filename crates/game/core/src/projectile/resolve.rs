use glam::Vec3;
use tracing::debug;

use super::{HitEvent, HitOutcome, ProjectilePhase, ProjectileState};
use crate::combat::{DamageEvent, DamageType};
use crate::env::{HitEnv, Noise, ObjectCategories};
use crate::event::CombatEvent;
use crate::state::{ActorId, ComponentId};
use crate::timer::TimerCallback;

impl ProjectileState {
    /// Resolves a blocking collision.
    ///
    /// The first call latches the hit, disables collision, emits the impact
    /// noise, applies direct or area damage and schedules destruction. Any
    /// later call returns [`HitOutcome::Ignored`] without side effects.
    pub fn resolve_hit(&mut self, hit: &HitEvent, env: &mut dyn HitEnv) -> HitOutcome {
        if self.phase != ProjectilePhase::Flying {
            return HitOutcome::Ignored;
        }

        self.phase = ProjectilePhase::Hit;
        self.collision_enabled = false;

        env.emit_noise(Noise {
            location: self.location,
            loudness: self.params.noise.loudness,
            range: self.params.noise.range,
            tag: self.params.noise.tag.clone(),
            instigator: self.owner,
        });

        let exploded = self.params.explode_on_hit;
        if exploded {
            self.explode(env);
        } else {
            self.process_hit(
                hit.actor,
                hit.component,
                hit.impact_point,
                -hit.impact_normal,
                DamageType::Ballistic,
                env,
            );
        }

        env.publish(CombatEvent::ProjectileHit {
            projectile: self.id,
            struck: (!exploded).then_some(hit.actor),
            location: hit.impact_point,
            exploded,
        });

        let delay = self.params.deferred_destruction_delay;
        if delay > 0.0 {
            let timer = env.schedule_once(delay, TimerCallback::DestroyProjectile(self.id));
            self.destruction_timer = Some(timer);
            HitOutcome::DestroyDeferred { timer }
        } else {
            self.phase = ProjectilePhase::Destroyed;
            HitOutcome::DestroyNow
        }
    }

    /// Damages and pushes every distinct actor inside the explosion radius.
    fn explode(&self, env: &mut dyn HitEnv) {
        let center = self.location;

        let mut ignore = vec![self.id];
        if !self.params.damage_owner {
            ignore.extend(self.owner);
        }

        let overlaps = env.sphere_overlap(
            center,
            self.params.explosion_radius,
            ObjectCategories::EXPLOSION,
            &ignore,
        );

        let mut processed: Vec<ActorId> = Vec::with_capacity(overlaps.len());
        for overlap in overlaps {
            if processed.contains(&overlap.actor) {
                continue;
            }
            processed.push(overlap.actor);

            let location = env.actor_location(overlap.actor).unwrap_or(center);
            let direction = (location - center).normalize_or_zero();
            self.process_hit(
                overlap.actor,
                overlap.component,
                center,
                direction,
                DamageType::Explosive,
                env,
            );
        }

        debug!(
            target: "combat_core::projectile",
            projectile = %self.id,
            radius = self.params.explosion_radius,
            affected = processed.len(),
            "explosion resolved"
        );
    }

    /// Applies damage and impulse to a single struck actor.
    fn process_hit(
        &self,
        actor: ActorId,
        component: ComponentId,
        location: Vec3,
        direction: Vec3,
        damage_type: DamageType,
        env: &mut dyn HitEnv,
    ) {
        let is_owner = self.owner == Some(actor);
        if env.is_combatant(actor) && (!is_owner || self.params.damage_owner) {
            let event = DamageEvent::new(self.params.damage)
                .with_instigator(self.owner)
                .with_source(self.id)
                .with_type(damage_type);
            env.apply_damage_to(actor, event);
        }

        if env.simulates_physics(component) {
            env.apply_impulse(component, direction * self.params.physics_force, location);
        }
    }
}
