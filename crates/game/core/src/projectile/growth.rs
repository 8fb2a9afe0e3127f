use glam::Vec3;

use super::ProjectileState;

/// Per-component distance at which the scale counts as fully grown.
pub const SCALE_TOLERANCE: f32 = 0.01;

/// Distance below which [`interp_to`] snaps to the target.
const SNAP_DISTANCE_SQUARED: f32 = 1.0e-4;

/// Moves `current` toward `target` by the fraction `dt * speed` of the
/// remaining distance: fast at first, slowing as it closes in.
///
/// A non-positive speed jumps straight to the target.
pub fn interp_to(current: Vec3, target: Vec3, dt: f32, speed: f32) -> Vec3 {
    if speed <= 0.0 {
        return target;
    }

    let remaining = target - current;
    if remaining.length_squared() < SNAP_DISTANCE_SQUARED {
        return target;
    }

    current + remaining * (dt * speed).clamp(0.0, 1.0)
}

impl ProjectileState {
    /// Grows the visual scale toward its target. Runs in every phase.
    pub fn tick(&mut self, dt: f32) {
        let target = self.target_scale();
        if self.scale.abs_diff_eq(target, SCALE_TOLERANCE) {
            return;
        }

        self.scale = interp_to(self.scale, target, dt, self.params.growth_speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projectile::ProjectileParams;
    use crate::state::ActorId;

    fn growing(multiplier: f32, speed: f32) -> ProjectileState {
        let params = ProjectileParams {
            max_size_multiplier: multiplier,
            growth_speed: speed,
            ..ProjectileParams::default()
        };
        ProjectileState::new(ActorId(1), None, Vec3::ZERO, Vec3::ONE, params)
    }

    #[test]
    fn interpolation_covers_fraction_of_remaining_distance() {
        let next = interp_to(Vec3::ONE, Vec3::splat(3.0), 0.25, 2.0);
        assert_eq!(next, Vec3::splat(2.0));
    }

    #[test]
    fn large_steps_clamp_to_target() {
        assert_eq!(interp_to(Vec3::ONE, Vec3::splat(3.0), 1.0, 5.0), Vec3::splat(3.0));
        assert_eq!(interp_to(Vec3::ONE, Vec3::splat(3.0), 0.1, 0.0), Vec3::splat(3.0));
    }

    #[test]
    fn growth_slows_down_and_converges() {
        let mut projectile = growing(4.0, 3.0);
        let mut previous_step = f32::MAX;

        for _ in 0..10 {
            let before = projectile.scale();
            projectile.tick(1.0 / 60.0);
            let step = (projectile.scale() - before).x;
            assert!(step > 0.0 && step < previous_step);
            previous_step = step;
        }

        for _ in 0..2_000 {
            projectile.tick(1.0 / 60.0);
        }
        assert!(projectile.scale().abs_diff_eq(Vec3::splat(4.0), SCALE_TOLERANCE));
    }

    #[test]
    fn stops_adjusting_within_tolerance() {
        let mut projectile = growing(1.005, 10.0);
        projectile.tick(0.5);
        assert_eq!(projectile.scale(), Vec3::ONE);
    }

    #[test]
    fn keeps_growing_after_hit() {
        let mut projectile = growing(2.0, 1.0);
        projectile.phase = crate::projectile::ProjectilePhase::Hit;
        projectile.tick(0.5);
        assert_eq!(projectile.scale(), Vec3::splat(1.5));
    }
}
