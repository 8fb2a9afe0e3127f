//! Weapon actors backing the combat core's weapon collaborators.

use std::collections::BTreeMap;

use combat_content::{WeaponCatalog, WeaponTemplate};
use combat_core::{
    ActorId, AmmoCount, ProjectileParams, WeaponHandle, WeaponKind, WeaponRack, WeaponSpawner,
    WeaponSpec,
};
use tracing::{debug, warn};

/// A spawned weapon and its trigger state.
#[derive(Clone, Debug)]
pub struct WeaponActor {
    pub kind: WeaponKind,
    pub owner: ActorId,
    pub ammo: AmmoCount,
    pub active: bool,
    pub trigger_held: bool,
    /// Seconds until the next shot is allowed.
    pub cooldown: f32,
    pub muzzle_speed: f32,
    pub refire_interval: f32,
    pub projectile: ProjectileParams,
}

/// Spawns weapons from a catalog and tracks their state.
#[derive(Clone, Debug, Default)]
pub struct WeaponRegistry {
    catalog: WeaponCatalog,
    weapons: BTreeMap<WeaponHandle, WeaponActor>,
    next_handle: u32,
}

impl WeaponRegistry {
    pub fn new(catalog: WeaponCatalog) -> Self {
        Self {
            catalog,
            weapons: BTreeMap::new(),
            next_handle: 1,
        }
    }

    pub fn catalog(&self) -> &WeaponCatalog {
        &self.catalog
    }

    pub fn template(&self, kind: &WeaponKind) -> Option<&WeaponTemplate> {
        self.catalog.get(kind)
    }

    pub fn get(&self, handle: WeaponHandle) -> Option<&WeaponActor> {
        self.weapons.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    /// Destroys every weapon owned by `owner`.
    pub fn despawn_owned_by(&mut self, owner: ActorId) -> usize {
        let before = self.weapons.len();
        self.weapons.retain(|_, weapon| weapon.owner != owner);
        before - self.weapons.len()
    }

    /// Advances cooldowns and returns the weapons ready to fire a round,
    /// consuming one round from each.
    pub fn ready_to_fire(&mut self, dt: f32) -> Vec<WeaponHandle> {
        let mut ready = Vec::new();

        for (&handle, weapon) in &mut self.weapons {
            weapon.cooldown = (weapon.cooldown - dt).max(0.0);
            if !(weapon.active && weapon.trigger_held) || weapon.cooldown > 0.0 {
                continue;
            }
            if weapon.ammo.current_ammo == 0 {
                weapon.trigger_held = false;
                debug!(target: "runtime::weapons", weapon = %handle, "magazine empty");
                continue;
            }

            weapon.ammo.current_ammo -= 1;
            weapon.cooldown = weapon.refire_interval;
            ready.push(handle);
        }

        ready
    }

    fn weapon_mut(&mut self, handle: WeaponHandle) -> Option<&mut WeaponActor> {
        let weapon = self.weapons.get_mut(&handle);
        if weapon.is_none() {
            warn!(target: "runtime::weapons", weapon = %handle, "unknown weapon handle");
        }
        weapon
    }
}

impl WeaponSpawner for WeaponRegistry {
    fn spawn_weapon(&mut self, kind: &WeaponKind, owner: ActorId) -> Option<WeaponSpec> {
        let template = self.catalog.get(kind)?.clone();

        let handle = WeaponHandle(self.next_handle);
        self.next_handle += 1;

        self.weapons.insert(
            handle,
            WeaponActor {
                kind: template.kind.clone(),
                owner,
                ammo: AmmoCount::new(template.magazine_size, template.magazine_size),
                active: false,
                trigger_held: false,
                cooldown: 0.0,
                muzzle_speed: template.muzzle_speed,
                refire_interval: template.refire_interval,
                projectile: template.projectile,
            },
        );

        debug!(
            target: "runtime::weapons",
            weapon = %handle,
            kind = %template.kind,
            owner = %owner,
            "weapon spawned"
        );

        Some(WeaponSpec::new(
            handle,
            template.kind,
            template.slot_priority,
            template.magazine_size,
        ))
    }
}

impl WeaponRack for WeaponRegistry {
    fn activate(&mut self, weapon: WeaponHandle) {
        if let Some(weapon) = self.weapon_mut(weapon) {
            weapon.active = true;
        }
    }

    fn deactivate(&mut self, weapon: WeaponHandle) {
        if let Some(weapon) = self.weapon_mut(weapon) {
            weapon.active = false;
            weapon.trigger_held = false;
        }
    }

    fn start_firing(&mut self, weapon: WeaponHandle) {
        if let Some(weapon) = self.weapon_mut(weapon) {
            weapon.trigger_held = weapon.active;
        }
    }

    fn stop_firing(&mut self, weapon: WeaponHandle) {
        if let Some(weapon) = self.weapon_mut(weapon) {
            weapon.trigger_held = false;
        }
    }

    fn reload(&mut self, weapon: WeaponHandle) {
        if let Some(weapon) = self.weapon_mut(weapon) {
            weapon.ammo.current_ammo = weapon.ammo.magazine_size;
        }
    }

    fn ammo(&self, weapon: WeaponHandle) -> Option<AmmoCount> {
        self.weapons.get(&weapon).map(|weapon| weapon.ammo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> WeaponRegistry {
        WeaponRegistry::new(WeaponCatalog::new(vec![
            WeaponTemplate::new("rifle", 1, 3),
            WeaponTemplate::new("launcher", 2, 1),
        ]))
    }

    #[test]
    fn spawns_known_kinds_only() {
        let mut weapons = registry();

        let spec = weapons
            .spawn_weapon(&WeaponKind::new("rifle"), ActorId(1))
            .unwrap();
        assert_eq!(spec.slot_priority, 1);
        assert_eq!(weapons.ammo(spec.handle), Some(AmmoCount::new(3, 3)));

        assert!(weapons
            .spawn_weapon(&WeaponKind::new("shotgun"), ActorId(1))
            .is_none());
        assert_eq!(weapons.len(), 1);
    }

    #[test]
    fn held_trigger_fires_until_empty() {
        let mut weapons = registry();
        let spec = weapons
            .spawn_weapon(&WeaponKind::new("rifle"), ActorId(1))
            .unwrap();
        weapons.activate(spec.handle);
        weapons.start_firing(spec.handle);

        let mut shots = 0;
        for _ in 0..20 {
            shots += weapons.ready_to_fire(0.25).len();
        }

        assert_eq!(shots, 3);
        assert_eq!(weapons.ammo(spec.handle), Some(AmmoCount::new(3, 0)));

        weapons.reload(spec.handle);
        assert_eq!(weapons.ammo(spec.handle), Some(AmmoCount::new(3, 3)));
    }

    #[test]
    fn inactive_weapons_do_not_fire() {
        let mut weapons = registry();
        let spec = weapons
            .spawn_weapon(&WeaponKind::new("rifle"), ActorId(1))
            .unwrap();

        weapons.start_firing(spec.handle);
        assert!(weapons.ready_to_fire(1.0).is_empty());

        weapons.activate(spec.handle);
        weapons.start_firing(spec.handle);
        weapons.deactivate(spec.handle);
        assert!(weapons.ready_to_fire(1.0).is_empty());
    }

    #[test]
    fn despawns_by_owner() {
        let mut weapons = registry();
        weapons.spawn_weapon(&WeaponKind::new("rifle"), ActorId(1));
        weapons.spawn_weapon(&WeaponKind::new("launcher"), ActorId(1));
        weapons.spawn_weapon(&WeaponKind::new("rifle"), ActorId(2));

        assert_eq!(weapons.despawn_owned_by(ActorId(1)), 2);
        assert_eq!(weapons.len(), 1);
    }
}
