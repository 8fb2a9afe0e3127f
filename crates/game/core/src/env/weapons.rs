use crate::state::{ActorId, WeaponHandle, WeaponKind};

/// Attributes of a spawned weapon, as reported by the spawn collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponSpec {
    pub handle: WeaponHandle,
    pub kind: WeaponKind,
    /// Position in the inventory; lower values come first.
    pub slot_priority: i32,
    pub magazine_size: u32,
}

impl WeaponSpec {
    pub fn new(
        handle: WeaponHandle,
        kind: impl Into<WeaponKind>,
        slot_priority: i32,
        magazine_size: u32,
    ) -> Self {
        Self {
            handle,
            kind: kind.into(),
            slot_priority,
            magazine_size,
        }
    }
}

/// Ammo counter of a weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmmoCount {
    pub magazine_size: u32,
    pub current_ammo: u32,
}

impl AmmoCount {
    /// The cleared HUD counter shown after death.
    pub const EMPTY: Self = Self {
        magazine_size: 0,
        current_ammo: 0,
    };

    pub const fn new(magazine_size: u32, current_ammo: u32) -> Self {
        Self {
            magazine_size,
            current_ammo,
        }
    }
}

/// Creates weapon actors for a given kind.
pub trait WeaponSpawner {
    /// Spawns a new weapon owned by `owner`. `None` if the kind is unknown or
    /// spawning was refused.
    fn spawn_weapon(&mut self, kind: &WeaponKind, owner: ActorId) -> Option<WeaponSpec>;
}

/// Weapon actors that live outside the core.
///
/// The inventory decides *when* a weapon is activated or deactivated; what
/// that means (showing meshes, arming triggers) is up to the host.
pub trait WeaponRack {
    fn activate(&mut self, weapon: WeaponHandle);

    fn deactivate(&mut self, weapon: WeaponHandle);

    fn start_firing(&mut self, weapon: WeaponHandle);

    fn stop_firing(&mut self, weapon: WeaponHandle);

    fn reload(&mut self, weapon: WeaponHandle);

    /// Current ammo of a weapon, `None` if the handle is unknown.
    fn ammo(&self, weapon: WeaponHandle) -> Option<AmmoCount>;
}
