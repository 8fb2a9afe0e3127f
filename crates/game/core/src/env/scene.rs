use bitflags::bitflags;
use glam::Vec3;

use crate::state::{ActorId, ComponentId};

bitflags! {
    /// Collision object categories a query can be filtered to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ObjectCategories: u8 {
        const WORLD_STATIC  = 1 << 0;
        const WORLD_DYNAMIC = 1 << 1;
        const PAWN          = 1 << 2;
        const PHYSICS_BODY  = 1 << 3;

        /// Categories an explosion can affect.
        const EXPLOSION = Self::PAWN.bits()
            | Self::WORLD_DYNAMIC.bits()
            | Self::PHYSICS_BODY.bits();
    }
}

/// One component reported by an overlap query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Overlap {
    pub actor: ActorId,
    pub component: ComponentId,
}

/// Synchronous spatial queries and physics responses.
pub trait PhysicsScene {
    /// Traces from `start` to `end`, ignoring the listed actors. Returns the
    /// first blocking impact point or `end` if nothing was hit.
    fn line_trace(&self, start: Vec3, end: Vec3, ignore: &[ActorId]) -> Vec3;

    /// Every component within `radius` of `center` whose category intersects
    /// `categories`. An actor appears once per overlapping component.
    fn sphere_overlap(
        &self,
        center: Vec3,
        radius: f32,
        categories: ObjectCategories,
        ignore: &[ActorId],
    ) -> Vec<Overlap>;

    fn actor_location(&self, actor: ActorId) -> Option<Vec3>;

    fn simulates_physics(&self, component: ComponentId) -> bool;

    /// Applies `impulse` to `component` at world-space `location`.
    fn apply_impulse(&mut self, component: ComponentId, impulse: Vec3, location: Vec3);
}
