use rand::Rng;

use crate::config::{CanvasSize, SimulationConfig};
use crate::geometry::Vector2D;

/// The single wandering point every particle is pulled toward
#[derive(Debug, Clone, PartialEq)]
pub struct Attractor {
    pub position: Vector2D,
    pub velocity: Vector2D,
    /// Frame number the modulo re-roll check runs against. Starts out as a
    /// span and becomes an absolute frame number after the first re-roll.
    pub duration: u64,
    pub force: f32,
}

/// Velocity component in `[-2.0, 2.0]` with 0.01 granularity.
fn random_velocity<R: Rng + ?Sized>(rng: &mut R) -> Vector2D {
    Vector2D::new(
        rng.gen_range(-200i32..=200) as f32 / 100.0,
        rng.gen_range(-200i32..=200) as f32 / 100.0,
    )
}

fn random_duration<R: Rng + ?Sized>(rng: &mut R, config: &SimulationConfig) -> u64 {
    rng.gen_range(config.min_attractor_duration..=config.max_attractor_duration)
}

fn random_force<R: Rng + ?Sized>(rng: &mut R, config: &SimulationConfig) -> f32 {
    rng.gen_range(config.min_force..=config.max_force)
}

impl Attractor {
    pub fn new(position: Vector2D, velocity: Vector2D, duration: u64, force: f32) -> Self {
        Self {
            position,
            velocity,
            duration,
            force,
        }
    }

    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        canvas: CanvasSize,
        config: &SimulationConfig,
    ) -> Self {
        let position = Vector2D::new(
            rng.gen_range(0..=canvas.width) as f32,
            rng.gen_range(0..=canvas.height) as f32,
        );
        let velocity = random_velocity(rng);
        let duration = random_duration(rng, config);
        let force = random_force(rng, config);
        Self::new(position, velocity, duration, force)
    }

    /// Re-roll velocity, force and the next expiry when `frame` is a multiple
    /// of the stored duration. Returns whether a re-roll happened.
    ///
    /// The new duration is stored as `frame + span`, and later checks still
    /// take `frame % duration` against that absolute value.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        frame: u64,
        config: &SimulationConfig,
    ) -> bool {
        if self.duration == 0 || frame % self.duration != 0 {
            return false;
        }

        self.duration = frame + random_duration(rng, config);
        self.force = random_force(rng, config);
        self.velocity = random_velocity(rng);
        log::debug!(
            "attractor re-rolled at frame {}: next check against {}, force {}, velocity ({}, {})",
            frame,
            self.duration,
            self.force,
            self.velocity.x,
            self.velocity.y
        );
        true
    }

    /// Integrate position by velocity with toroidal wraparound.
    pub fn advance(&mut self, canvas: CanvasSize) {
        self.position += self.velocity;
        self.position = self
            .position
            .wrapped(canvas.width_f32(), canvas.height_f32());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config() -> SimulationConfig {
        SimulationConfig {
            min_force: 0.5,
            max_force: 4.0,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_random_attractor_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let canvas = CanvasSize::new(320, 200);
        let config = config();

        for _ in 0..500 {
            let a = Attractor::random(&mut rng, canvas, &config);
            assert!((0.0..=320.0).contains(&a.position.x));
            assert!((0.0..=200.0).contains(&a.position.y));
            assert!((-2.0..=2.0).contains(&a.velocity.x));
            assert!((-2.0..=2.0).contains(&a.velocity.y));
            assert!((120..=480).contains(&a.duration));
            assert!((0.5..=4.0).contains(&a.force));

            // 0.01 granularity
            let scaled = a.velocity.x * 100.0;
            assert!((scaled - scaled.round()).abs() < 1e-3);
        }
    }

    #[test]
    fn test_constant_force_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = Attractor::random(
            &mut rng,
            CanvasSize::new(100, 100),
            &SimulationConfig::default(),
        );
        assert_eq!(a.force, 1.0);
    }

    #[test]
    fn test_update_rerolls_on_multiple() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = config();
        let mut a = Attractor::new(
            Vector2D::new(10.0, 10.0),
            Vector2D::new(5.0, 5.0),
            120,
            100.0,
        );

        assert!(a.update(&mut rng, 120, &config));
        // Velocity is drawn from [-2, 2] and force from [0.5, 4], so both
        // sentinels must have changed.
        assert_ne!(a.velocity, Vector2D::new(5.0, 5.0));
        assert_ne!(a.force, 100.0);
        assert!(a.duration >= 120 + 120);
        assert!(a.duration <= 120 + 480);
    }

    #[test]
    fn test_update_skips_non_multiples() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = config();
        let mut a = Attractor::new(Vector2D::zero(), Vector2D::new(1.0, 0.0), 120, 1.0);
        let before = a.clone();

        for frame in 1..120 {
            assert!(!a.update(&mut rng, frame, &config));
        }
        assert_eq!(a, before);
    }

    #[test]
    fn test_rerolls_against_absolute_frame() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = SimulationConfig {
            min_attractor_duration: 100,
            max_attractor_duration: 100,
            ..SimulationConfig::default()
        };
        let mut a = Attractor::new(Vector2D::zero(), Vector2D::zero(), 100, 1.0);

        let rerolls: Vec<u64> = (1..=1000)
            .filter(|&frame| a.update(&mut rng, frame, &config))
            .collect();

        // The stored frame is always ahead of the current one, so the first
        // multiple reached is the stored frame itself: the cadence stays at
        // one re-roll per span.
        assert_eq!(rerolls, (1..=10u64).map(|n| n * 100).collect::<Vec<_>>());
        assert_eq!(a.duration, 1100);
    }

    #[test]
    fn test_advance_wraps() {
        let canvas = CanvasSize::new(100, 50);
        let mut a = Attractor::new(
            Vector2D::new(99.5, 0.5),
            Vector2D::new(1.0, -1.0),
            120,
            1.0,
        );
        a.advance(canvas);
        assert!((a.position.x - 0.5).abs() < 1e-5);
        assert!((a.position.y - 49.5).abs() < 1e-5);
    }
}
