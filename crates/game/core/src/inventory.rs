//! Weapon inventory for a single weapon holder.
//!
//! The inventory is an ordered list of weapon handles sorted by slot
//! priority, with at most one active entry. It never creates or destroys
//! weapons; spawning goes through [`WeaponSpawner`] and activation side
//! effects are dispatched to the [`WeaponRack`] and published as events.
//!
//! # Invariants
//!
//! - no two entries share a [`WeaponKind`]
//! - entries are sorted by ascending `slot_priority`; ties keep pickup order
//! - the active handle, if any, is a member of the list

use tracing::debug;

use crate::env::{WeaponRack, WeaponSpawner, WeaponSpec};
use crate::event::{CombatEvent, Presentation};
use crate::state::{ActorId, WeaponHandle, WeaponKind};

/// Alias used where the spec of a weapon is held by an inventory.
pub type OwnedWeapon = WeaponSpec;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponInventory {
    owner: ActorId,
    weapons: Vec<OwnedWeapon>,
    active: Option<WeaponHandle>,
}

impl WeaponInventory {
    pub fn new(owner: ActorId) -> Self {
        Self {
            owner,
            weapons: Vec::new(),
            active: None,
        }
    }

    pub fn owner(&self) -> ActorId {
        self.owner
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    /// Owned weapons in slot order.
    pub fn weapons(&self) -> &[OwnedWeapon] {
        &self.weapons
    }

    pub fn active_handle(&self) -> Option<WeaponHandle> {
        self.active
    }

    pub fn active(&self) -> Option<&OwnedWeapon> {
        let handle = self.active?;
        self.weapons.iter().find(|weapon| weapon.handle == handle)
    }

    pub fn contains(&self, handle: WeaponHandle) -> bool {
        self.position(handle).is_some()
    }

    /// First owned weapon of the given kind.
    pub fn find_by_kind(&self, kind: &WeaponKind) -> Option<&OwnedWeapon> {
        self.weapons.iter().find(|weapon| &weapon.kind == kind)
    }

    /// Adds a spawned weapon and switches to it.
    ///
    /// Returns false without touching anything if a weapon of the same kind
    /// is already owned.
    pub fn add_weapon<E>(&mut self, weapon: WeaponSpec, env: &mut E) -> bool
    where
        E: WeaponRack + Presentation + ?Sized,
    {
        if self.find_by_kind(&weapon.kind).is_some() {
            debug!(
                target: "combat_core::inventory",
                owner = %self.owner,
                kind = %weapon.kind,
                "weapon kind already owned, ignoring pickup"
            );
            return false;
        }

        let handle = weapon.handle;
        self.weapons.push(weapon);
        self.weapons.sort_by_key(|weapon| weapon.slot_priority);

        // Picking up a weapon always switches to it.
        self.deactivate_active(env);
        self.activate(handle, env);
        true
    }

    /// Spawns and adds a weapon of `kind` unless one is already owned.
    ///
    /// Returns the handle of the newly added weapon.
    pub fn add_weapon_kind<E>(&mut self, kind: &WeaponKind, env: &mut E) -> Option<WeaponHandle>
    where
        E: WeaponSpawner + WeaponRack + Presentation + ?Sized,
    {
        if self.find_by_kind(kind).is_some() {
            return None;
        }

        let weapon = env.spawn_weapon(kind, self.owner)?;
        let handle = weapon.handle;
        self.add_weapon(weapon, env).then_some(handle)
    }

    /// Cycles forward, wrapping to the first slot.
    pub fn switch_next<E>(&mut self, env: &mut E) -> bool
    where
        E: WeaponRack + Presentation + ?Sized,
    {
        let count = self.weapons.len();
        if count < 2 {
            return false;
        }

        let next = match self.active_index() {
            Some(index) => (index + 1) % count,
            None => 0,
        };
        self.switch_to_index(next, env);
        true
    }

    /// Cycles backward, wrapping to the last slot.
    pub fn switch_previous<E>(&mut self, env: &mut E) -> bool
    where
        E: WeaponRack + Presentation + ?Sized,
    {
        let count = self.weapons.len();
        if count < 2 {
            return false;
        }

        let previous = match self.active_index() {
            Some(index) => (index + count - 1) % count,
            None => count - 1,
        };
        self.switch_to_index(previous, env);
        true
    }

    /// Equips a specific owned weapon (weapon wheel selection).
    pub fn equip<E>(&mut self, handle: WeaponHandle, env: &mut E) -> bool
    where
        E: WeaponRack + Presentation + ?Sized,
    {
        if self.active == Some(handle) || !self.contains(handle) {
            return false;
        }

        self.deactivate_active(env);
        self.activate(handle, env);
        true
    }

    /// Puts the active weapon away, leaving no weapon active.
    pub fn deactivate_active<E>(&mut self, env: &mut E)
    where
        E: WeaponRack + Presentation + ?Sized,
    {
        if let Some(handle) = self.active.take() {
            env.deactivate(handle);
            env.publish(CombatEvent::WeaponDeactivated {
                actor: self.owner,
                weapon: handle,
            });
        }
    }

    fn switch_to_index<E>(&mut self, index: usize, env: &mut E)
    where
        E: WeaponRack + Presentation + ?Sized,
    {
        let handle = self.weapons[index].handle;
        self.deactivate_active(env);
        self.activate(handle, env);
    }

    fn activate<E>(&mut self, handle: WeaponHandle, env: &mut E)
    where
        E: WeaponRack + Presentation + ?Sized,
    {
        self.active = Some(handle);
        env.activate(handle);
        env.publish(CombatEvent::WeaponActivated {
            actor: self.owner,
            weapon: handle,
        });

        if let Some(ammo) = env.ammo(handle) {
            env.publish(CombatEvent::AmmoUpdated {
                actor: self.owner,
                magazine_size: ammo.magazine_size,
                current_ammo: ammo.current_ammo,
            });
        }

        debug!(
            target: "combat_core::inventory",
            owner = %self.owner,
            weapon = %handle,
            "weapon activated"
        );
    }

    fn active_index(&self) -> Option<usize> {
        self.active.and_then(|handle| self.position(handle))
    }

    fn position(&self, handle: WeaponHandle) -> Option<usize> {
        self.weapons.iter().position(|weapon| weapon.handle == handle)
    }
}
