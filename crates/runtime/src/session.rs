//! Tick-driven combat session.
//!
//! The session owns every combatant, projectile and weapon together with the
//! services the combat core calls out to. Clients drive it by issuing input
//! (aim, fire, switch weapons) and calling [`Session::tick`], then drain the
//! published [`CombatEvent`]s for presentation.
//!
//! Each tick runs in a fixed order:
//!
//! 1. weapons with a held trigger fire projectiles
//! 2. physics bodies integrate their velocity
//! 3. projectiles sweep forward and resolve their first blocking hit
//! 4. projectiles grow toward their target scale
//! 5. the clock advances and due timers are dispatched
//! 6. queued events run through the hooks

use std::collections::BTreeMap;

use combat_content::WeaponCatalog;
use combat_core::{
    ActorId, CombatConfig, CombatEvent, Combatant, DamageEvent, Damageable, EventQueue, HitEvent,
    HitOutcome, ManualTimers, PhysicsScene, Presentation, ProjectileParams, ProjectilePhase,
    ProjectileState, TeamId, TeamScoreTable, TimerCallback, TimerHandle, WeaponHandle,
    WeaponHolder, WeaponKind, WeaponRack,
};
use glam::Vec3;
use tracing::{debug, info, warn};

use crate::api::{Result, RuntimeError};
use crate::hooks::{CombatHook, HookCommand, HookContext, HookRegistry};
use crate::report::{SessionReport, TeamStanding};
use crate::world::{BodyShape, HitView, LifecycleView, SceneWorld, WeaponRegistry};

/// Eye height above the pawn origin; aim traces start here.
const EYE_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 60.0);

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub combat: CombatConfig,
    /// Weapons granted to every spawned combatant, in pickup order.
    pub loadout: Vec<WeaponKind>,
    /// Maximum hook → command → event rounds per flush.
    pub max_hook_passes: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            loadout: Vec::new(),
            max_hook_passes: 8,
        }
    }
}

/// Where and how a projectile enters the world.
#[derive(Debug, Clone)]
pub struct ProjectileSpawn {
    pub owner: Option<ActorId>,
    pub location: Vec3,
    pub velocity: Vec3,
    /// Spawn scale; growth targets `scale * max_size_multiplier`.
    pub scale: Vec3,
    pub params: ProjectileParams,
}

/// What happened during one [`Session::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub shots: usize,
    pub hits: usize,
    pub removed_projectiles: usize,
    pub fired_timers: usize,
}

#[derive(Debug, Clone)]
struct ProjectileBody {
    state: ProjectileState,
    velocity: Vec3,
    travelled: f32,
}

pub struct Session {
    config: SessionConfig,
    timers: ManualTimers,
    scene: SceneWorld,
    weapons: WeaponRegistry,
    combatants: BTreeMap<ActorId, Combatant>,
    aims: BTreeMap<ActorId, Vec3>,
    projectiles: BTreeMap<ActorId, ProjectileBody>,
    spawn_points: BTreeMap<TeamId, Vec3>,
    scores: TeamScoreTable,
    pending: EventQueue,
    published: Vec<CombatEvent>,
    hooks: HookRegistry,
    next_actor: u32,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Session clock in seconds.
    pub fn clock(&self) -> f64 {
        self.timers.now()
    }

    pub fn timers(&self) -> &ManualTimers {
        &self.timers
    }

    pub fn scores(&self) -> &TeamScoreTable {
        &self.scores
    }

    pub fn scene(&self) -> &SceneWorld {
        &self.scene
    }

    pub fn weapons(&self) -> &WeaponRegistry {
        &self.weapons
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    pub fn combatant(&self, actor: ActorId) -> Option<&Combatant> {
        self.combatants.get(&actor)
    }

    pub fn combatants(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.values()
    }

    pub fn projectile(&self, projectile: ActorId) -> Option<&ProjectileState> {
        self.projectiles.get(&projectile).map(|body| &body.state)
    }

    pub fn projectile_count(&self) -> usize {
        self.projectiles.len()
    }

    /// Removes and returns every event that has already been through the hooks.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.published)
    }

    pub fn set_spawn_point(&mut self, team: TeamId, location: Vec3) {
        self.spawn_points.insert(team, location);
    }

    /// Spawns a combatant at its team's spawn point with the configured loadout.
    pub fn spawn_combatant(&mut self, team: TeamId) -> Result<ActorId> {
        let location = self.spawn_points.get(&team).copied().unwrap_or(Vec3::ZERO);
        self.spawn_combatant_at(team, location)
    }

    pub fn spawn_combatant_at(&mut self, team: TeamId, location: Vec3) -> Result<ActorId> {
        let id = self.allocate_actor();
        self.scene.insert(id, location, BodyShape::pawn());
        self.combatants
            .insert(id, Combatant::new(id, team, &self.config.combat));
        self.aims.insert(id, Vec3::X);

        self.with_combatant(id, |combatant, env| combatant.reset(env))?;

        for kind in self.config.loadout.clone() {
            self.give_weapon(id, &kind)?;
        }

        info!(
            target: "runtime::session",
            actor = %id,
            team = %team,
            location = ?location,
            "combatant spawned"
        );

        Ok(id)
    }

    /// Places a loose physics prop.
    pub fn spawn_prop(&mut self, location: Vec3, radius: f32, mass: f32) -> ActorId {
        let id = self.allocate_actor();
        self.scene.insert(id, location, BodyShape::prop(radius, mass));
        id
    }

    /// Places immovable geometry.
    pub fn spawn_wall(&mut self, location: Vec3, radius: f32) -> ActorId {
        let id = self.allocate_actor();
        self.scene.insert(id, location, BodyShape::wall(radius));
        id
    }

    /// Gives `actor` a weapon of `kind` and switches to it.
    ///
    /// Returns `Ok(None)` if the combatant already owns that kind.
    pub fn give_weapon(&mut self, actor: ActorId, kind: &WeaponKind) -> Result<Option<WeaponHandle>> {
        if self.weapons.template(kind).is_none() {
            return Err(RuntimeError::UnknownWeaponKind(kind.clone()));
        }

        self.with_combatant(actor, |combatant, env| {
            combatant.inventory_mut().add_weapon_kind(kind, env)
        })
    }

    pub fn switch_weapon_next(&mut self, actor: ActorId) -> Result<bool> {
        self.with_combatant(actor, |combatant, env| combatant.switch_weapon_next(env))
    }

    pub fn switch_weapon_previous(&mut self, actor: ActorId) -> Result<bool> {
        self.with_combatant(actor, |combatant, env| combatant.switch_weapon_previous(env))
    }

    pub fn equip_weapon(&mut self, actor: ActorId, weapon: WeaponHandle) -> Result<bool> {
        self.with_combatant(actor, |combatant, env| combatant.equip_weapon(weapon, env))
    }

    /// Sets the aim direction used for the next shots.
    pub fn aim(&mut self, actor: ActorId, direction: Vec3) -> Result<()> {
        if !self.combatants.contains_key(&actor) {
            return Err(RuntimeError::UnknownCombatant(actor));
        }
        if let Some(direction) = direction.try_normalize() {
            self.aims.insert(actor, direction);
        }
        Ok(())
    }

    /// Holds the trigger of the active weapon.
    pub fn start_firing(&mut self, actor: ActorId) -> Result<()> {
        let combatant = active_shooter(&mut self.combatants, actor)?;
        combatant.start_firing(&mut self.weapons);
        Ok(())
    }

    pub fn stop_firing(&mut self, actor: ActorId) -> Result<()> {
        let combatant = active_shooter(&mut self.combatants, actor)?;
        combatant.stop_firing(&mut self.weapons);
        Ok(())
    }

    /// Refills the active weapon's magazine and refreshes the ammo counter.
    pub fn reload(&mut self, actor: ActorId) -> Result<()> {
        let combatant = active_shooter(&mut self.combatants, actor)?;
        combatant.reload(&mut self.weapons);

        if let Some(ammo) = combatant
            .inventory()
            .active_handle()
            .and_then(|handle| self.weapons.ammo(handle))
        {
            combatant.update_weapon_hud(ammo, &mut self.pending);
        }
        Ok(())
    }

    /// Point `actor` is currently aiming at.
    pub fn aim_target(&self, actor: ActorId) -> Result<Vec3> {
        let combatant = self
            .combatants
            .get(&actor)
            .ok_or(RuntimeError::UnknownCombatant(actor))?;
        let location = self
            .scene
            .actor_location(actor)
            .ok_or(RuntimeError::UnknownCombatant(actor))?;
        let direction = self.aims.get(&actor).copied().unwrap_or(Vec3::X);

        Ok(combatant.weapon_target_location(location + EYE_OFFSET, direction, &self.scene))
    }

    /// Applies damage to a combatant directly, outside any projectile.
    pub fn apply_damage(&mut self, target: ActorId, event: DamageEvent) -> Result<f32> {
        let combatant = self
            .combatants
            .get_mut(&target)
            .ok_or(RuntimeError::UnknownCombatant(target))?;
        let mut env = LifecycleView {
            weapons: &mut self.weapons,
            events: &mut self.pending,
            scores: &mut self.scores,
            timers: &mut self.timers,
        };

        let was_alive = combatant.is_alive();
        let applied = combatant.take_damage(&event, &mut env);
        if was_alive && !combatant.is_alive() {
            self.scene.halt(target);
        }
        Ok(applied)
    }

    pub fn spawn_projectile(&mut self, spawn: ProjectileSpawn) -> ActorId {
        let id = self.allocate_actor();
        let state =
            ProjectileState::new(id, spawn.owner, spawn.location, spawn.scale, spawn.params);
        self.projectiles.insert(
            id,
            ProjectileBody {
                state,
                velocity: spawn.velocity,
                travelled: 0.0,
            },
        );
        id
    }

    /// Routes a blocking collision reported by the host to a projectile.
    pub fn resolve_projectile_hit(&mut self, projectile: ActorId, hit: HitEvent) -> Result<HitOutcome> {
        let body = self
            .projectiles
            .get_mut(&projectile)
            .ok_or(RuntimeError::UnknownProjectile(projectile))?;
        if body.state.phase() == ProjectilePhase::Flying {
            body.state.set_location(hit.impact_point);
        }

        let mut env = HitView {
            scene: &mut self.scene,
            combatants: &mut self.combatants,
            lifecycle: LifecycleView {
                weapons: &mut self.weapons,
                events: &mut self.pending,
                scores: &mut self.scores,
                timers: &mut self.timers,
            },
        };
        let outcome = body.state.resolve_hit(&hit, &mut env);

        if outcome == HitOutcome::DestroyNow {
            self.remove_projectile(projectile)?;
        }
        Ok(outcome)
    }

    /// Destroys a projectile, cancelling its pending destruction timer.
    pub fn remove_projectile(&mut self, projectile: ActorId) -> Result<()> {
        let mut body = self
            .projectiles
            .remove(&projectile)
            .ok_or(RuntimeError::UnknownProjectile(projectile))?;
        body.state.teardown(&mut self.timers);
        self.pending
            .publish(CombatEvent::ProjectileDestroyed { projectile });
        Ok(())
    }

    /// Removes a combatant and everything it owns, cancelling its respawn timer.
    pub fn remove_combatant(&mut self, actor: ActorId) -> Result<Combatant> {
        let mut combatant = self
            .combatants
            .remove(&actor)
            .ok_or(RuntimeError::UnknownCombatant(actor))?;
        combatant.teardown(&mut self.timers);
        self.weapons.despawn_owned_by(actor);
        self.scene.remove(actor);
        self.aims.remove(&actor);
        Ok(combatant)
    }

    /// Advances the session by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> Result<TickReport> {
        let dt = dt.max(0.0);
        let mut report = TickReport::default();

        for weapon in self.weapons.ready_to_fire(dt) {
            if self.fire_weapon(weapon).is_some() {
                report.shots += 1;
            }
        }

        self.scene.integrate(dt);
        self.move_projectiles(dt, &mut report)?;

        for body in self.projectiles.values_mut() {
            body.state.tick(dt);
        }

        for fired in self.timers.advance(dt) {
            report.fired_timers += 1;
            self.dispatch_timer(fired.handle, fired.callback, &mut report)?;
        }

        self.flush_events()?;
        Ok(report)
    }

    /// Runs queued events through the hooks and executes their commands.
    ///
    /// If a critical hook or a command fails, the event being handled is still
    /// published and the rest of the batch goes back to the front of the queue.
    pub fn flush_events(&mut self) -> Result<()> {
        for _ in 0..self.config.max_hook_passes {
            let events = self.pending.drain();
            if events.is_empty() {
                return Ok(());
            }

            let mut events = events.into_iter();
            while let Some(event) = events.next() {
                if let Err(err) = self.dispatch_event(event) {
                    self.pending.requeue_front(events.collect());
                    return Err(err);
                }
            }
        }

        if !self.pending.is_empty() {
            warn!(
                target: "runtime::hooks",
                deferred = self.pending.len(),
                passes = self.config.max_hook_passes,
                "hook cascade limit reached, deferring events to the next flush"
            );
        }
        Ok(())
    }

    /// Snapshot of scores and survivors for reporting.
    pub fn report(&self) -> SessionReport {
        let mut teams: BTreeMap<TeamId, TeamStanding> = BTreeMap::new();
        for (team, score) in self.scores.iter() {
            teams.entry(team).or_insert_with(|| TeamStanding::new(team)).score = score;
        }
        for combatant in self.combatants.values() {
            let standing = teams
                .entry(combatant.team())
                .or_insert_with(|| TeamStanding::new(combatant.team()));
            if combatant.is_alive() {
                standing.alive += 1;
            }
        }

        SessionReport {
            clock: self.timers.now(),
            teams: teams.into_values().collect(),
            projectiles_in_flight: self.projectiles.len(),
        }
    }

    fn allocate_actor(&mut self) -> ActorId {
        let id = ActorId(self.next_actor);
        self.next_actor += 1;
        id
    }

    fn with_combatant<R>(
        &mut self,
        actor: ActorId,
        f: impl FnOnce(&mut Combatant, &mut LifecycleView<'_>) -> R,
    ) -> Result<R> {
        let combatant = self
            .combatants
            .get_mut(&actor)
            .ok_or(RuntimeError::UnknownCombatant(actor))?;
        let mut env = LifecycleView {
            weapons: &mut self.weapons,
            events: &mut self.pending,
            scores: &mut self.scores,
            timers: &mut self.timers,
        };
        Ok(f(combatant, &mut env))
    }

    /// Spawns one projectile from `weapon` toward its owner's aim target.
    fn fire_weapon(&mut self, weapon: WeaponHandle) -> Option<ActorId> {
        let actor = self.weapons.get(weapon)?;
        let owner = actor.owner;
        let speed = actor.muzzle_speed;
        let params = actor.projectile.clone();

        let combatant = self.combatants.get(&owner)?;
        if !combatant.is_alive() || combatant.inventory().active_handle() != Some(weapon) {
            return None;
        }

        let eye = self.scene.actor_location(owner)? + EYE_OFFSET;
        let direction = self.aims.get(&owner).copied().unwrap_or(Vec3::X);
        let target = combatant.weapon_target_location(eye, direction, &self.scene);
        let heading = (target - eye).try_normalize().unwrap_or(direction);

        if let Some(ammo) = self.weapons.ammo(weapon) {
            self.pending.publish(CombatEvent::AmmoUpdated {
                actor: owner,
                magazine_size: ammo.magazine_size,
                current_ammo: ammo.current_ammo,
            });
        }

        let projectile = self.spawn_projectile(ProjectileSpawn {
            owner: Some(owner),
            location: eye,
            velocity: heading * speed,
            scale: Vec3::ONE,
            params,
        });

        debug!(
            target: "runtime::session",
            weapon = %weapon,
            owner = %owner,
            projectile = %projectile,
            "projectile fired"
        );
        Some(projectile)
    }

    fn move_projectiles(&mut self, dt: f32, report: &mut TickReport) -> Result<()> {
        let max_range = self.config.combat.max_aim_distance;
        let flying: Vec<ActorId> = self
            .projectiles
            .iter()
            .filter(|(_, body)| body.state.phase() == ProjectilePhase::Flying)
            .map(|(&id, _)| id)
            .collect();

        for id in flying {
            let Some(body) = self.projectiles.get_mut(&id) else {
                continue;
            };
            let start = body.state.location();
            let end = start + body.velocity * dt;
            let ignore: Vec<ActorId> = body.state.owner().into_iter().collect();

            if let Some(contact) = self.scene.sweep(start, end, &ignore) {
                report.hits += 1;
                let outcome = self.resolve_projectile_hit(
                    id,
                    HitEvent {
                        actor: contact.actor,
                        component: contact.component,
                        impact_point: contact.point,
                        impact_normal: contact.normal,
                    },
                )?;
                if outcome == HitOutcome::DestroyNow {
                    report.removed_projectiles += 1;
                }
                continue;
            }

            body.state.set_location(end);
            body.travelled += start.distance(end);
            if body.travelled > max_range {
                debug!(target: "runtime::session", projectile = %id, "projectile out of range");
                self.remove_projectile(id)?;
                report.removed_projectiles += 1;
            }
        }

        Ok(())
    }

    fn dispatch_timer(
        &mut self,
        handle: TimerHandle,
        callback: TimerCallback,
        report: &mut TickReport,
    ) -> Result<()> {
        match callback {
            TimerCallback::Respawn(actor) => {
                let Some(combatant) = self.combatants.get_mut(&actor) else {
                    warn!(target: "runtime::session", actor = %actor, "respawn timer for missing combatant");
                    return Ok(());
                };
                if !combatant.on_respawn_timer(handle) {
                    return Ok(());
                }

                let team = combatant.team();
                self.remove_combatant(actor)?;
                self.pending
                    .publish(CombatEvent::RespawnRequested { actor, team });
                info!(target: "runtime::session", actor = %actor, team = %team, "combatant torn down");
            }
            TimerCallback::DestroyProjectile(projectile) => {
                let Some(body) = self.projectiles.get_mut(&projectile) else {
                    warn!(
                        target: "runtime::session",
                        projectile = %projectile,
                        "destruction timer for missing projectile"
                    );
                    return Ok(());
                };
                if body.state.on_destruction_timer(handle) {
                    self.remove_projectile(projectile)?;
                    report.removed_projectiles += 1;
                }
            }
        }

        Ok(())
    }

    fn dispatch_event(&mut self, event: CombatEvent) -> Result<()> {
        let outcome = {
            let ctx = HookContext {
                event: &event,
                scores: &self.scores,
                clock: self.timers.now(),
            };
            self.hooks.execute_hooks(&ctx)
        };
        self.published.push(event);

        for command in outcome? {
            self.execute_command(command)?;
        }
        Ok(())
    }

    fn execute_command(&mut self, command: HookCommand) -> Result<()> {
        match command {
            HookCommand::SpawnCombatant { team } => {
                self.spawn_combatant(team)?;
            }
            HookCommand::GrantWeapon { actor, kind } => {
                self.give_weapon(actor, &kind)?;
            }
        }
        Ok(())
    }
}

fn active_shooter(
    combatants: &mut BTreeMap<ActorId, Combatant>,
    actor: ActorId,
) -> Result<&mut Combatant> {
    let combatant = combatants
        .get_mut(&actor)
        .ok_or(RuntimeError::UnknownCombatant(actor))?;
    if combatant.inventory().active_handle().is_none() {
        return Err(RuntimeError::NoActiveWeapon(actor));
    }
    Ok(combatant)
}

/// Builder for [`Session`].
pub struct SessionBuilder {
    config: SessionConfig,
    catalog: WeaponCatalog,
    hooks: Option<HookRegistry>,
    spawn_points: BTreeMap<TeamId, Vec3>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            config: SessionConfig::default(),
            catalog: WeaponCatalog::default(),
            hooks: None,
            spawn_points: BTreeMap::new(),
        }
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn combat_config(mut self, combat: CombatConfig) -> Self {
        self.config.combat = combat;
        self
    }

    pub fn catalog(mut self, catalog: WeaponCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn loadout(mut self, loadout: Vec<WeaponKind>) -> Self {
        self.config.loadout = loadout;
        self
    }

    pub fn spawn_point(mut self, team: TeamId, location: Vec3) -> Self {
        self.spawn_points.insert(team, location);
        self
    }

    /// Replaces the default hooks.
    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Adds a hook on top of the current set (the defaults if none was set).
    pub fn add_hook(mut self, hook: std::sync::Arc<dyn CombatHook>) -> Self {
        let hooks = self.hooks.take().unwrap_or_default();
        self.hooks = Some(hooks.with_hook(hook));
        self
    }

    /// Validates the configuration and builds the session.
    pub fn build(self) -> Result<Session> {
        self.config.combat.validate()?;
        for kind in &self.config.loadout {
            if self.catalog.get(kind).is_none() {
                return Err(RuntimeError::UnknownWeaponKind(kind.clone()));
            }
        }

        Ok(Session {
            config: self.config,
            timers: ManualTimers::new(),
            scene: SceneWorld::new(),
            weapons: WeaponRegistry::new(self.catalog),
            combatants: BTreeMap::new(),
            aims: BTreeMap::new(),
            projectiles: BTreeMap::new(),
            spawn_points: self.spawn_points,
            scores: TeamScoreTable::new(),
            pending: EventQueue::new(),
            published: Vec::new(),
            hooks: self.hooks.unwrap_or_default(),
            next_actor: 1,
        })
    }
}
