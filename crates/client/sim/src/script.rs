//! Scripted two-team skirmish.
use anyhow::Result;
use combat_core::{ActorId, CombatEvent, Damageable, PhysicsScene, TeamId, WeaponHolder, WeaponRack};
use glam::Vec3;
use runtime::Session;
use tracing::{debug, info};

use crate::config::SimConfig;

const RED: TeamId = TeamId(1);
const BLUE: TeamId = TeamId(2);

const RED_SPAWN: Vec3 = Vec3::new(0.0, 0.0, 0.0);
const BLUE_SPAWN: Vec3 = Vec3::new(1_500.0, 0.0, 0.0);
/// Sideways spacing between teammates at the start.
const LINE_SPACING: f32 = 150.0;

pub struct Skirmish {
    session: Session,
    switch_every: u32,
    tick: u32,
}

impl Skirmish {
    pub fn new(mut session: Session, config: &SimConfig) -> Result<Self> {
        session.set_spawn_point(RED, RED_SPAWN);
        session.set_spawn_point(BLUE, BLUE_SPAWN);

        for index in 0..config.team_size {
            let offset = Vec3::Y * LINE_SPACING * index as f32;
            session.spawn_combatant_at(RED, RED_SPAWN + offset)?;
            session.spawn_combatant_at(BLUE, BLUE_SPAWN + offset)?;
        }
        session.drain_events();

        Ok(Self {
            session,
            switch_every: config.switch_every,
            tick: 0,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn run(&mut self, ticks: u32, dt: f32) -> Result<()> {
        for _ in 0..ticks {
            self.step(dt)?;
        }

        info!(
            clock = self.session.clock(),
            projectiles = self.session.projectile_count(),
            "skirmish finished"
        );
        Ok(())
    }

    fn step(&mut self, dt: f32) -> Result<()> {
        self.tick += 1;
        let switching = self.switch_every > 0 && self.tick % self.switch_every == 0;

        for (actor, target) in self.targets() {
            if switching {
                self.session.switch_weapon_next(actor)?;
            }
            let origin = self.location(actor);
            self.session.aim(actor, target - origin)?;
            self.trigger(actor)?;
        }

        let report = self.session.tick(dt)?;
        if report.hits > 0 {
            debug!(tick = self.tick, hits = report.hits, "projectiles connected");
        }

        for event in self.session.drain_events() {
            if let CombatEvent::Died { actor, team, killer } = event {
                let killer = killer.map(|k| k.to_string()).unwrap_or_else(|| "world".into());
                info!(tick = self.tick, %actor, %team, %killer, "combatant died");
            }
        }
        Ok(())
    }

    /// Every living combatant paired with the location of its nearest living enemy.
    fn targets(&self) -> Vec<(ActorId, Vec3)> {
        let scene = self.session.scene();
        let living: Vec<(ActorId, TeamId, Vec3)> = self
            .session
            .combatants()
            .filter(|c| c.is_alive())
            .filter_map(|c| Some((c.id(), c.team(), scene.actor_location(c.id())?)))
            .collect();

        living
            .iter()
            .filter_map(|&(actor, team, location)| {
                living
                    .iter()
                    .filter(|(_, other, _)| *other != team)
                    .map(|&(_, _, enemy)| enemy)
                    .min_by(|a, b| a.distance(location).total_cmp(&b.distance(location)))
                    .map(|enemy| (actor, enemy))
            })
            .collect()
    }

    fn location(&self, actor: ActorId) -> Vec3 {
        self.session
            .scene()
            .actor_location(actor)
            .unwrap_or(Vec3::ZERO)
    }

    /// Holds the trigger, reloading first if the magazine ran dry.
    fn trigger(&mut self, actor: ActorId) -> Result<()> {
        let Some(handle) = self
            .session
            .combatant(actor)
            .and_then(|c| c.inventory().active_handle())
        else {
            return Ok(());
        };

        let empty = self
            .session
            .weapons()
            .ammo(handle)
            .is_some_and(|ammo| ammo.current_ammo == 0);
        if empty {
            self.session.reload(actor)?;
        }
        self.session.start_firing(actor)?;
        Ok(())
    }
}
