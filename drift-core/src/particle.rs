use rand::Rng;

use crate::config::{CanvasSize, Color};
use crate::geometry::{direction, distance, Vector2D};

/// A single particle drifting around the attractor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub color: Color,
}

impl Particle {
    pub fn new(position: Vector2D, velocity: Vector2D, color: Color) -> Self {
        Self {
            position,
            velocity,
            color,
        }
    }

    /// Whole-pixel position inside the canvas, velocity in `[-1.0, 1.0]` at
    /// 0.01 granularity.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, canvas: CanvasSize, color: Color) -> Self {
        let position = Vector2D::new(
            rng.gen_range(0..canvas.width.max(1)) as f32,
            rng.gen_range(0..canvas.height.max(1)) as f32,
        );
        let velocity = Vector2D::new(
            rng.gen_range(-100i32..=100) as f32 / 100.0,
            rng.gen_range(-100i32..=100) as f32 / 100.0,
        );
        Self::new(position, velocity, color)
    }

    /// Pull toward `target` with strength `1 / max(distance, floor)`.
    pub fn attract(&mut self, target: Vector2D, floor: f32) {
        let dist = distance(self.position, target).max(floor);
        let normal = direction(self.position, target);
        self.velocity -= normal / dist;
    }

    pub fn apply_friction(&mut self, coefficient: f32) {
        self.velocity *= coefficient;
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

    const WHITE: Color = Color::rgba(255, 255, 255, 255);

    #[test]
    fn test_random_particle_within_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let canvas = CanvasSize::new(64, 48);

        for _ in 0..1000 {
            let p = Particle::random(&mut rng, canvas, WHITE);
            assert!((0.0..=63.0).contains(&p.position.x));
            assert!((0.0..=47.0).contains(&p.position.y));
            assert!((-1.0..=1.0).contains(&p.velocity.x));
            assert!((-1.0..=1.0).contains(&p.velocity.y));
            assert_eq!(p.color, WHITE);
        }
    }

    #[test]
    fn test_attract_inverse_distance() {
        let mut p = Particle::new(Vector2D::new(10.0, 0.0), Vector2D::zero(), WHITE);
        p.attract(Vector2D::zero(), 1.0);
        // Unit direction (1, 0) divided by distance 10, subtracted.
        assert!((p.velocity.x + 0.1).abs() < 1e-6);
        assert_eq!(p.velocity.y, 0.0);
    }

    #[test]
    fn test_attract_clamps_near_distance() {
        let mut p = Particle::new(Vector2D::new(0.25, 0.0), Vector2D::zero(), WHITE);
        p.attract(Vector2D::zero(), 1.0);
        assert!((p.velocity.x + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_attract_on_top_of_target_is_noop() {
        let mut p = Particle::new(Vector2D::new(5.0, 5.0), Vector2D::new(0.3, 0.2), WHITE);
        p.attract(Vector2D::new(5.0, 5.0), 1.0);
        assert_eq!(p.velocity, Vector2D::new(0.3, 0.2));
    }

    #[test]
    fn test_friction_decays_exponentially() {
        let mut p = Particle::new(Vector2D::zero(), Vector2D::new(1.0, 0.0), WHITE);
        for _ in 0..100 {
            p.apply_friction(0.99);
        }
        let expected = 0.99f32.powi(100);
        assert!((p.velocity.magnitude() - expected).abs() < 1e-4);
        assert!((p.velocity.magnitude() - 0.366).abs() < 1e-3);
    }

    #[test]
    fn test_advance_stays_on_canvas() {
        let canvas = CanvasSize::new(100, 80);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..200 {
            let velocity = Vector2D::new(
                rng.gen_range(-500.0..500.0),
                rng.gen_range(-500.0..500.0),
            );
            let mut p = Particle::random(&mut rng, canvas, WHITE);
            p.velocity = velocity;
            for _ in 0..10 {
                p.advance(canvas);
                assert!((0.0..100.0).contains(&p.position.x), "x = {}", p.position.x);
                assert!((0.0..80.0).contains(&p.position.y), "y = {}", p.position.y);
            }
        }
    }
}
