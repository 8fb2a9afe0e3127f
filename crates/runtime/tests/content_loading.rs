mod common;

use combat_content::ContentFactory;
use combat_core::{WeaponHolder, WeaponKind};
use runtime::{RuntimeError, Session};

use common::RED;

const WEAPONS: &str = r#"(
    weapons: [
        (kind: "pistol", slot_priority: 0, magazine_size: 12),
        (kind: "shotgun", slot_priority: 3, magazine_size: 6,
         projectile: (damage: 80.0, deferred_destruction_delay: 0.2)),
    ],
)"#;

#[test]
fn session_builds_from_data_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("combat.toml"), "max_hp = 150.0\nrespawn_delay = 2.0\n").unwrap();
    std::fs::write(dir.path().join("weapons.ron"), WEAPONS).unwrap();

    let factory = ContentFactory::new(dir.path());
    let catalog = factory.load_weapons().unwrap();
    let loadout: Vec<WeaponKind> = catalog.kinds().cloned().collect();

    let mut session = Session::builder()
        .combat_config(factory.load_config().unwrap())
        .catalog(catalog)
        .loadout(loadout)
        .build()
        .unwrap();
    let actor = session.spawn_combatant(RED).unwrap();

    let combatant = session.combatant(actor).unwrap();
    assert_eq!(combatant.max_hp(), 150.0);
    assert_eq!(combatant.inventory().len(), 2);
    let active = combatant.inventory().active_handle().unwrap();
    assert_eq!(
        session.weapons().get(active).map(|weapon| weapon.kind.clone()),
        Some(WeaponKind::new("shotgun"))
    );
}

#[test]
fn invalid_tuning_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("combat.toml"), "respawn_delay = -1.0\n").unwrap();

    assert!(ContentFactory::new(dir.path()).load_config().is_err());

    let config = combat_core::CombatConfig::default().with_max_hp(0.0);
    let err = Session::builder().combat_config(config).build().err();
    assert!(matches!(err, Some(RuntimeError::InvalidConfig(_))));
}
