//! Sphere-based spatial scene used by the session.
//!
//! Every actor is a set of spherical components placed relative to the actor
//! location. That is enough to answer traces, sweeps and overlaps the way the
//! combat core expects, without a physics engine.

use std::collections::BTreeMap;

use combat_core::{ActorId, ComponentId, ObjectCategories, Overlap, PhysicsScene};
use glam::Vec3;
use tracing::trace;

/// One spherical collision component of a body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComponentShape {
    pub offset: Vec3,
    pub radius: f32,
    pub simulates_physics: bool,
}

impl ComponentShape {
    pub fn new(offset: Vec3, radius: f32) -> Self {
        Self {
            offset,
            radius,
            simulates_physics: false,
        }
    }

    pub fn simulated(mut self) -> Self {
        self.simulates_physics = true;
        self
    }
}

/// Collision description of an actor.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyShape {
    pub category: ObjectCategories,
    /// Component 0 is the root.
    pub components: Vec<ComponentShape>,
    pub mass: f32,
}

impl BodyShape {
    /// Pawn hitboxes: torso (root), head and legs.
    pub fn pawn() -> Self {
        Self {
            category: ObjectCategories::PAWN,
            components: vec![
                ComponentShape::new(Vec3::ZERO, 40.0),
                ComponentShape::new(Vec3::new(0.0, 0.0, 60.0), 15.0),
                ComponentShape::new(Vec3::new(0.0, 0.0, -50.0), 25.0),
            ],
            mass: 80.0,
        }
    }

    /// A loose prop pushed around by impulses.
    pub fn prop(radius: f32, mass: f32) -> Self {
        Self {
            category: ObjectCategories::PHYSICS_BODY,
            components: vec![ComponentShape::new(Vec3::ZERO, radius).simulated()],
            mass,
        }
    }

    /// Immovable level geometry.
    pub fn wall(radius: f32) -> Self {
        Self {
            category: ObjectCategories::WORLD_STATIC,
            components: vec![ComponentShape::new(Vec3::ZERO, radius)],
            mass: 0.0,
        }
    }
}

#[derive(Clone, Debug)]
struct Body {
    location: Vec3,
    velocity: Vec3,
    shape: BodyShape,
}

impl Body {
    fn components(&self, actor: ActorId) -> impl Iterator<Item = (ComponentId, Vec3, &ComponentShape)> {
        self.shape.components.iter().enumerate().map(move |(index, shape)| {
            (
                ComponentId::new(actor, index as u16),
                self.location + shape.offset,
                shape,
            )
        })
    }
}

/// First blocking contact of a sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepHit {
    pub actor: ActorId,
    pub component: ComponentId,
    pub point: Vec3,
    pub normal: Vec3,
    /// Distance from the sweep start.
    pub distance: f32,
}

#[derive(Clone, Debug, Default)]
pub struct SceneWorld {
    bodies: BTreeMap<ActorId, Body>,
}

impl SceneWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, actor: ActorId, location: Vec3, shape: BodyShape) {
        self.bodies.insert(
            actor,
            Body {
                location,
                velocity: Vec3::ZERO,
                shape,
            },
        );
    }

    pub fn remove(&mut self, actor: ActorId) -> bool {
        self.bodies.remove(&actor).is_some()
    }

    pub fn contains(&self, actor: ActorId) -> bool {
        self.bodies.contains_key(&actor)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn set_location(&mut self, actor: ActorId, location: Vec3) {
        if let Some(body) = self.bodies.get_mut(&actor) {
            body.location = location;
        }
    }

    pub fn velocity(&self, actor: ActorId) -> Option<Vec3> {
        self.bodies.get(&actor).map(|body| body.velocity)
    }

    /// Zeroes the velocity of `actor`.
    pub fn halt(&mut self, actor: ActorId) {
        if let Some(body) = self.bodies.get_mut(&actor) {
            body.velocity = Vec3::ZERO;
        }
    }

    /// Moves every body along its velocity.
    pub fn integrate(&mut self, dt: f32) {
        for body in self.bodies.values_mut() {
            body.location += body.velocity * dt;
        }
    }

    /// Nearest contact along the segment `start..end`, skipping `ignore`.
    pub fn sweep(&self, start: Vec3, end: Vec3, ignore: &[ActorId]) -> Option<SweepHit> {
        let delta = end - start;
        let length = delta.length();
        let direction = delta.try_normalize()?;

        self.bodies
            .iter()
            .filter(|(actor, _)| !ignore.contains(actor))
            .flat_map(|(&actor, body)| body.components(actor).map(move |c| (actor, c)))
            .filter_map(|(actor, (component, center, shape))| {
                let distance = ray_sphere(start, direction, center, shape.radius)?;
                (distance <= length).then(|| {
                    let point = start + direction * distance;
                    SweepHit {
                        actor,
                        component,
                        point,
                        normal: (point - center).try_normalize().unwrap_or(-direction),
                        distance,
                    }
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// Distance along `direction` (unit) to the first intersection with the
/// sphere, or 0 if `origin` is already inside.
fn ray_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let offset = origin - center;
    let c = offset.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }

    let b = offset.dot(direction);
    if b > 0.0 {
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    Some(-b - discriminant.sqrt())
}

impl PhysicsScene for SceneWorld {
    fn line_trace(&self, start: Vec3, end: Vec3, ignore: &[ActorId]) -> Vec3 {
        self.sweep(start, end, ignore)
            .map_or(end, |hit| hit.point)
    }

    fn sphere_overlap(
        &self,
        center: Vec3,
        radius: f32,
        categories: ObjectCategories,
        ignore: &[ActorId],
    ) -> Vec<Overlap> {
        self.bodies
            .iter()
            .filter(|(actor, body)| {
                !ignore.contains(actor) && body.shape.category.intersects(categories)
            })
            .flat_map(|(&actor, body)| {
                body.components(actor)
                    .filter(move |(_, position, shape)| {
                        position.distance(center) <= radius + shape.radius
                    })
                    .map(move |(component, _, _)| Overlap { actor, component })
            })
            .collect()
    }

    fn actor_location(&self, actor: ActorId) -> Option<Vec3> {
        self.bodies.get(&actor).map(|body| body.location)
    }

    fn simulates_physics(&self, component: ComponentId) -> bool {
        self.bodies
            .get(&component.actor)
            .and_then(|body| body.shape.components.get(usize::from(component.index)))
            .is_some_and(|shape| shape.simulates_physics)
    }

    fn apply_impulse(&mut self, component: ComponentId, impulse: Vec3, location: Vec3) {
        let Some(body) = self.bodies.get_mut(&component.actor) else {
            return;
        };
        if body.shape.mass <= 0.0 {
            return;
        }

        body.velocity += impulse / body.shape.mass;
        trace!(
            target: "runtime::scene",
            component = %component,
            impulse = ?impulse,
            location = ?location,
            "impulse applied"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> SceneWorld {
        let mut scene = SceneWorld::new();
        scene.insert(ActorId(1), Vec3::new(500.0, 0.0, 0.0), BodyShape::pawn());
        scene.insert(ActorId(2), Vec3::new(900.0, 0.0, 0.0), BodyShape::prop(20.0, 10.0));
        scene
    }

    #[test]
    fn trace_stops_at_nearest_surface() {
        let scene = scene();
        let point = scene.line_trace(Vec3::ZERO, Vec3::new(2_000.0, 0.0, 0.0), &[]);
        assert!(point.abs_diff_eq(Vec3::new(460.0, 0.0, 0.0), 1e-3));
    }

    #[test]
    fn trace_skips_ignored_actors() {
        let scene = scene();
        let point = scene.line_trace(Vec3::ZERO, Vec3::new(2_000.0, 0.0, 0.0), &[ActorId(1)]);
        assert!(point.abs_diff_eq(Vec3::new(880.0, 0.0, 0.0), 1e-3));

        let end = Vec3::new(0.0, 2_000.0, 0.0);
        assert_eq!(scene.line_trace(Vec3::ZERO, end, &[]), end);
    }

    #[test]
    fn sweep_reports_component_and_normal() {
        let scene = scene();
        let hit = scene
            .sweep(Vec3::new(500.0, 0.0, 300.0), Vec3::new(500.0, 0.0, 0.0), &[])
            .unwrap();

        assert_eq!(hit.component, ComponentId::new(ActorId(1), 1));
        assert!(hit.normal.abs_diff_eq(Vec3::Z, 1e-5));
    }

    #[test]
    fn overlap_reports_every_component_in_range() {
        let scene = scene();
        let overlaps = scene.sphere_overlap(
            Vec3::new(500.0, 0.0, 0.0),
            100.0,
            ObjectCategories::EXPLOSION,
            &[],
        );
        assert_eq!(overlaps.len(), 3);
        assert!(overlaps.iter().all(|overlap| overlap.actor == ActorId(1)));

        let filtered = scene.sphere_overlap(
            Vec3::new(500.0, 0.0, 0.0),
            1_000.0,
            ObjectCategories::PHYSICS_BODY,
            &[],
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].actor, ActorId(2));
    }

    #[test]
    fn impulses_move_simulated_bodies() {
        let mut scene = scene();
        let prop = ComponentId::root(ActorId(2));
        assert!(scene.simulates_physics(prop));
        assert!(!scene.simulates_physics(ComponentId::root(ActorId(1))));

        scene.apply_impulse(prop, Vec3::new(100.0, 0.0, 0.0), Vec3::ZERO);
        scene.integrate(0.5);

        assert_eq!(scene.velocity(ActorId(2)), Some(Vec3::new(10.0, 0.0, 0.0)));
        assert_eq!(
            scene.actor_location(ActorId(2)),
            Some(Vec3::new(905.0, 0.0, 0.0))
        );
    }
}
