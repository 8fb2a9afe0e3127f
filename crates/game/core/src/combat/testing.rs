//! In-memory collaborators for combat unit tests.

use std::cell::RefCell;

use glam::Vec3;

use super::Combatant;
use crate::config::CombatConfig;
use crate::env::{AmmoCount, ObjectCategories, Overlap, PhysicsScene, ScoreSink, WeaponRack};
use crate::event::{CombatEvent, Presentation};
use crate::inventory::tests::TestRack;
use crate::score::TeamScoreTable;
use crate::state::{ActorId, ComponentId, TeamId, WeaponHandle};
use crate::timer::{ManualTimers, TimerCallback, TimerHandle, TimerService};

pub(crate) fn combatant(id: u32, team: u8, max_hp: f32) -> Combatant {
    Combatant::new(
        ActorId(id),
        TeamId(team),
        &CombatConfig::default().with_max_hp(max_hp),
    )
}

/// Weapons, timers and scores for lifecycle tests, plus an empty scene whose
/// traces never hit anything.
#[derive(Default)]
pub(crate) struct TestWorld {
    pub rack: TestRack,
    pub timers: ManualTimers,
    pub scores: TeamScoreTable,
    traces: RefCell<Vec<Vec<ActorId>>>,
}

impl TestWorld {
    pub fn events(&self) -> &[CombatEvent] {
        self.rack.events.as_slice()
    }

    pub fn last_trace_ignore(&self) -> Vec<ActorId> {
        self.traces.borrow().last().cloned().unwrap_or_default()
    }
}

impl WeaponRack for TestWorld {
    fn activate(&mut self, weapon: WeaponHandle) {
        self.rack.activate(weapon);
    }

    fn deactivate(&mut self, weapon: WeaponHandle) {
        self.rack.deactivate(weapon);
    }

    fn start_firing(&mut self, weapon: WeaponHandle) {
        self.rack.start_firing(weapon);
    }

    fn stop_firing(&mut self, weapon: WeaponHandle) {
        self.rack.stop_firing(weapon);
    }

    fn reload(&mut self, weapon: WeaponHandle) {
        self.rack.reload(weapon);
    }

    fn ammo(&self, weapon: WeaponHandle) -> Option<AmmoCount> {
        self.rack.ammo(weapon)
    }
}

impl Presentation for TestWorld {
    fn publish(&mut self, event: CombatEvent) {
        self.rack.publish(event);
    }
}

impl ScoreSink for TestWorld {
    fn increment_score(&mut self, team: TeamId) {
        self.scores.increment_score(team);
    }
}

impl TimerService for TestWorld {
    fn schedule_once(&mut self, delay: f32, callback: TimerCallback) -> TimerHandle {
        self.timers.schedule_once(delay, callback)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.timers.cancel(handle)
    }
}

impl PhysicsScene for TestWorld {
    fn line_trace(&self, _start: Vec3, end: Vec3, ignore: &[ActorId]) -> Vec3 {
        self.traces.borrow_mut().push(ignore.to_vec());
        end
    }

    fn sphere_overlap(
        &self,
        _center: Vec3,
        _radius: f32,
        _categories: ObjectCategories,
        _ignore: &[ActorId],
    ) -> Vec<Overlap> {
        Vec::new()
    }

    fn actor_location(&self, _actor: ActorId) -> Option<Vec3> {
        None
    }

    fn simulates_physics(&self, _component: ComponentId) -> bool {
        false
    }

    fn apply_impulse(&mut self, _component: ComponentId, _impulse: Vec3, _location: Vec3) {}
}
