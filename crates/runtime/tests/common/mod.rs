#![allow(dead_code)]

use combat_content::{WeaponCatalog, WeaponTemplate};
use combat_core::{CombatConfig, ProjectileParams, TeamId, WeaponKind};
use glam::Vec3;
use runtime::{Session, SessionBuilder};

pub const RED: TeamId = TeamId(1);
pub const BLUE: TeamId = TeamId(2);

pub const BLUE_SPAWN: Vec3 = Vec3::new(1_000.0, 0.0, 0.0);

pub fn rifle() -> WeaponKind {
    WeaponKind::new("rifle")
}

pub fn launcher() -> WeaponKind {
    WeaponKind::new("launcher")
}

pub fn catalog() -> WeaponCatalog {
    WeaponCatalog::new(vec![
        WeaponTemplate::new(rifle(), 1, 30).with_projectile(ProjectileParams {
            damage: 50.0,
            ..ProjectileParams::default()
        }),
        WeaponTemplate::new(launcher(), 2, 4).with_projectile(ProjectileParams {
            damage: 40.0,
            explode_on_hit: true,
            explosion_radius: 300.0,
            ..ProjectileParams::default()
        }),
    ])
}

pub fn builder(max_hp: f32) -> SessionBuilder {
    Session::builder()
        .combat_config(CombatConfig::default().with_max_hp(max_hp))
        .catalog(catalog())
        .loadout(vec![rifle()])
        .spawn_point(RED, Vec3::ZERO)
        .spawn_point(BLUE, BLUE_SPAWN)
}

pub fn session(max_hp: f32) -> Session {
    builder(max_hp).build().unwrap()
}

/// Ticks until `done` holds, failing after `max_ticks`.
pub fn tick_until(session: &mut Session, dt: f32, max_ticks: usize, done: impl Fn(&Session) -> bool) {
    for _ in 0..max_ticks {
        if done(session) {
            return;
        }
        session.tick(dt).unwrap();
    }
    assert!(done(session), "condition not reached within {max_ticks} ticks");
}
