mod common;

use combat_core::{
    ActorId, CombatEvent, ComponentId, HitEvent, HitOutcome, PhysicsScene, ProjectileParams,
    ProjectilePhase,
};
use glam::Vec3;
use runtime::{ProjectileSpawn, Session};

use common::{BLUE, BLUE_SPAWN, RED};

fn spawn(session: &mut Session, owner: Option<ActorId>, params: ProjectileParams) -> ActorId {
    session.spawn_projectile(ProjectileSpawn {
        owner,
        location: Vec3::ZERO,
        velocity: Vec3::ZERO,
        scale: Vec3::ONE,
        params,
    })
}

fn hit_world_at(point: Vec3) -> HitEvent {
    HitEvent {
        actor: ActorId::WORLD,
        component: ComponentId::root(ActorId::WORLD),
        impact_point: point,
        impact_normal: Vec3::Z,
    }
}

fn hit_actor(actor: ActorId, point: Vec3) -> HitEvent {
    HitEvent {
        actor,
        component: ComponentId::root(actor),
        impact_point: point,
        impact_normal: Vec3::NEG_X,
    }
}

#[test]
fn second_collision_does_nothing() {
    let mut session = common::session(100.0);
    let target = session.spawn_combatant(BLUE).unwrap();
    let projectile = spawn(
        &mut session,
        None,
        ProjectileParams {
            damage: 30.0,
            deferred_destruction_delay: 1.0,
            ..ProjectileParams::default()
        },
    );

    let first = session
        .resolve_projectile_hit(projectile, hit_actor(target, BLUE_SPAWN))
        .unwrap();
    let second = session
        .resolve_projectile_hit(projectile, hit_actor(target, BLUE_SPAWN))
        .unwrap();

    assert!(matches!(first, HitOutcome::DestroyDeferred { .. }));
    assert_eq!(second, HitOutcome::Ignored);
    assert_eq!(session.combatant(target).unwrap().current_hp(), 70.0);
}

#[test]
fn explosion_damages_each_pawn_once() {
    let mut session = common::session(100.0);
    let target = session.spawn_combatant(BLUE).unwrap();
    let projectile = spawn(
        &mut session,
        None,
        ProjectileParams {
            damage: 40.0,
            explode_on_hit: true,
            explosion_radius: 300.0,
            ..ProjectileParams::default()
        },
    );

    let outcome = session
        .resolve_projectile_hit(projectile, hit_world_at(BLUE_SPAWN - Vec3::new(50.0, 0.0, 0.0)))
        .unwrap();

    assert_eq!(outcome, HitOutcome::DestroyNow);
    assert!(session.projectile(projectile).is_none());
    assert_eq!(session.combatant(target).unwrap().current_hp(), 60.0);
}

#[test]
fn explosion_spares_owner_and_pushes_props() {
    let mut session = common::session(100.0);
    let owner = session.spawn_combatant(RED).unwrap();
    let prop = session.spawn_prop(Vec3::new(200.0, 0.0, 0.0), 20.0, 10.0);
    let projectile = spawn(
        &mut session,
        Some(owner),
        ProjectileParams {
            explode_on_hit: true,
            explosion_radius: 300.0,
            physics_force: 1_000.0,
            ..ProjectileParams::default()
        },
    );

    session
        .resolve_projectile_hit(projectile, hit_world_at(Vec3::ZERO))
        .unwrap();

    assert_eq!(session.combatant(owner).unwrap().current_hp(), 100.0);
    assert_eq!(session.scene().velocity(prop), Some(Vec3::new(100.0, 0.0, 0.0)));

    session.tick(0.5).unwrap();
    assert_eq!(
        session.scene().actor_location(prop),
        Some(Vec3::new(250.0, 0.0, 0.0))
    );
}

#[test]
fn self_damage_when_enabled() {
    let mut session = common::session(100.0);
    let owner = session.spawn_combatant(RED).unwrap();
    let projectile = spawn(
        &mut session,
        Some(owner),
        ProjectileParams {
            damage: 10.0,
            explode_on_hit: true,
            damage_owner: true,
            ..ProjectileParams::default()
        },
    );

    session
        .resolve_projectile_hit(projectile, hit_world_at(Vec3::new(30.0, 0.0, 0.0)))
        .unwrap();

    assert_eq!(session.combatant(owner).unwrap().current_hp(), 90.0);
}

#[test]
fn deferred_destruction_removes_after_delay() {
    let mut session = common::session(100.0);
    let projectile = spawn(
        &mut session,
        None,
        ProjectileParams {
            deferred_destruction_delay: 1.5,
            max_size_multiplier: 3.0,
            ..ProjectileParams::default()
        },
    );

    session
        .resolve_projectile_hit(projectile, hit_world_at(Vec3::ZERO))
        .unwrap();
    assert_eq!(
        session.projectile(projectile).map(|p| p.phase()),
        Some(ProjectilePhase::Hit)
    );

    session.tick(1.0).unwrap();
    let lingering = session.projectile(projectile).unwrap();
    assert!(lingering.scale().x > 1.0);

    session.tick(1.0).unwrap();
    assert!(session.projectile(projectile).is_none());
    assert!(session
        .drain_events()
        .contains(&CombatEvent::ProjectileDestroyed { projectile }));
}

#[test]
fn removing_a_lingering_projectile_cancels_its_timer() {
    let mut session = common::session(100.0);
    let projectile = spawn(
        &mut session,
        None,
        ProjectileParams {
            deferred_destruction_delay: 2.0,
            ..ProjectileParams::default()
        },
    );
    session
        .resolve_projectile_hit(projectile, hit_world_at(Vec3::ZERO))
        .unwrap();

    session.remove_projectile(projectile).unwrap();

    assert_eq!(session.timers().pending_count(), 0);
    let report = session.tick(3.0).unwrap();
    assert_eq!(report.fired_timers, 0);
}

#[test]
fn flying_projectile_hits_first_body_in_its_path() {
    let mut session = common::session(100.0);
    let target = session.spawn_combatant(BLUE).unwrap();
    let wall = session.spawn_wall(Vec3::new(500.0, 0.0, 0.0), 50.0);
    let projectile = session.spawn_projectile(ProjectileSpawn {
        owner: None,
        location: Vec3::ZERO,
        velocity: Vec3::new(2_000.0, 0.0, 0.0),
        scale: Vec3::ONE,
        params: ProjectileParams::default(),
    });

    let report = session.tick(1.0).unwrap();

    assert_eq!(report.hits, 1);
    assert!(session.projectile(projectile).is_none());
    assert_eq!(session.combatant(target).unwrap().current_hp(), 100.0);

    let hit = session.drain_events().into_iter().find_map(|event| match event {
        CombatEvent::ProjectileHit { struck, location, .. } => Some((struck, location)),
        _ => None,
    });
    assert_eq!(hit, Some((Some(wall), Vec3::new(450.0, 0.0, 0.0))));
}

#[test]
fn projectiles_expire_beyond_range() {
    let mut session = common::session(100.0);
    let projectile = session.spawn_projectile(ProjectileSpawn {
        owner: None,
        location: Vec3::ZERO,
        velocity: Vec3::new(0.0, 6_000.0, 0.0),
        scale: Vec3::ONE,
        params: ProjectileParams::default(),
    });

    session.tick(1.0).unwrap();
    assert!(session.projectile(projectile).is_some());
    session.tick(1.0).unwrap();
    assert!(session.projectile(projectile).is_none());
}

#[test]
fn impact_emits_noise_for_perception() {
    let mut session = common::session(100.0);
    let owner = session.spawn_combatant(RED).unwrap();
    let projectile = spawn(&mut session, Some(owner), ProjectileParams::default());

    session
        .resolve_projectile_hit(projectile, hit_world_at(Vec3::new(10.0, 20.0, 0.0)))
        .unwrap();
    session.flush_events().unwrap();

    let noise = session.drain_events().into_iter().find_map(|event| match event {
        CombatEvent::NoiseEmitted(noise) => Some(noise),
        _ => None,
    });
    let noise = noise.expect("noise emitted");
    assert_eq!(noise.location, Vec3::new(10.0, 20.0, 0.0));
    assert_eq!(noise.instigator, Some(owner));
    assert_eq!(noise.tag, "Projectile");
}

#[test]
fn growth_starts_from_spawn_scale() {
    let mut session = common::session(100.0);
    let projectile = session.spawn_projectile(ProjectileSpawn {
        owner: None,
        location: Vec3::ZERO,
        velocity: Vec3::ZERO,
        scale: Vec3::splat(2.0),
        params: ProjectileParams {
            max_size_multiplier: 2.0,
            growth_speed: 0.0,
            ..ProjectileParams::default()
        },
    });

    let spawned = session.projectile(projectile).unwrap();
    assert_eq!(spawned.scale(), Vec3::splat(2.0));
    assert_eq!(spawned.target_scale(), Vec3::splat(4.0));

    session.tick(0.1).unwrap();
    assert_eq!(session.projectile(projectile).unwrap().scale(), Vec3::splat(4.0));
}
