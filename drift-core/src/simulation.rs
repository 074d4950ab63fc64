use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::attractor::Attractor;
use crate::config::{CanvasSize, SimulationConfig};
use crate::particle::Particle;
use crate::progress::{BarReading, ProgressBar};

/// Read-only view of the state after a tick, handed to the renderer
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub index: u64,
    pub particles: &'a [Particle],
    pub attractor: &'a Attractor,
    pub bar: BarReading,
    pub finished: bool,
}

/// Owns the particle field, the attractor and the countdown bar.
pub struct Simulation<R: Rng = StdRng> {
    config: SimulationConfig,
    particles: Vec<Particle>,
    attractor: Attractor,
    progress: ProgressBar,
    frame: u64,
    rng: R,
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

impl Simulation<StdRng> {
    /// Random source seeded from wall-clock seconds.
    pub fn new(config: SimulationConfig, canvas: CanvasSize) -> Self {
        Self::with_seed(config, canvas, wall_clock_seed())
    }

    pub fn with_seed(config: SimulationConfig, canvas: CanvasSize, seed: u64) -> Self {
        log::debug!("seeding simulation rng with {}", seed);
        Self::with_rng(config, canvas, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    pub fn with_rng(config: SimulationConfig, canvas: CanvasSize, mut rng: R) -> Self {
        let particles: Vec<Particle> = (0..config.particle_count)
            .map(|_| Particle::random(&mut rng, canvas, config.particle_color))
            .collect();
        let attractor = Attractor::random(&mut rng, canvas, &config);
        let progress = ProgressBar::new(
            config.total_duration,
            canvas.width_f32(),
            config.smoothing,
            config.easing,
        );

        log::info!(
            "simulation ready: {} particles on {}x{}, {}s countdown",
            particles.len(),
            canvas.width,
            canvas.height,
            config.total_duration
        );

        Self {
            config,
            particles,
            attractor,
            progress,
            frame: 0,
            rng,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn attractor(&self) -> &Attractor {
        &self.attractor
    }

    pub fn progress(&self) -> &ProgressBar {
        &self.progress
    }

    /// Index of the most recent tick, 0 before the first one.
    pub fn frame_index(&self) -> u64 {
        self.frame
    }

    pub fn is_finished(&self) -> bool {
        self.progress.is_finished()
    }

    /// Tick with the next frame index.
    pub fn advance(&mut self, canvas: CanvasSize, delta_time: f32) -> Frame<'_> {
        let next = self.frame + 1;
        self.tick(canvas, delta_time, next)
    }

    /// One frame: attractor update and move, then attract, friction and move
    /// for every particle, then the countdown.
    pub fn tick(&mut self, canvas: CanvasSize, delta_time: f32, frame_index: u64) -> Frame<'_> {
        self.frame = frame_index;

        self.attractor.update(&mut self.rng, frame_index, &self.config);
        self.attractor.advance(canvas);

        step_particles(&mut self.particles, &self.attractor, &self.config, canvas);

        let bar = self.progress.update(delta_time, canvas.width_f32());
        let finished = self.progress.is_finished();
        if finished {
            log::info!(
                "countdown elapsed after {} frames ({}s)",
                frame_index,
                self.progress.total_duration()
            );
        }

        Frame {
            index: frame_index,
            particles: &self.particles,
            attractor: &self.attractor,
            bar,
            finished,
        }
    }
}

fn step_particle(
    particle: &mut Particle,
    attractor: &Attractor,
    config: &SimulationConfig,
    canvas: CanvasSize,
) {
    particle.attract(attractor.position, config.force_floor);
    particle.apply_friction(config.friction);
    particle.advance(canvas);
}

#[cfg(feature = "parallel")]
fn step_particles(
    particles: &mut [Particle],
    attractor: &Attractor,
    config: &SimulationConfig,
    canvas: CanvasSize,
) {
    particles
        .par_iter_mut()
        .for_each(|particle| step_particle(particle, attractor, config, canvas));
}

#[cfg(not(feature = "parallel"))]
fn step_particles(
    particles: &mut [Particle],
    attractor: &Attractor,
    config: &SimulationConfig,
    canvas: CanvasSize,
) {
    for particle in particles.iter_mut() {
        step_particle(particle, attractor, config, canvas);
    }
}
