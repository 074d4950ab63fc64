//! Simulation core for the drift screensaver: one wandering attractor, a
//! large field of particles pulled toward it with friction and toroidal
//! wraparound, and a countdown bar with easing and frame smoothing.
//!
//! The core never touches a window. A frame driver owns the canvas size and
//! frame timing, calls [`Simulation::advance`] (or [`Simulation::tick`] with
//! its own frame counter) once per frame, and draws the returned [`Frame`].

pub mod attractor;
pub mod config;
pub mod geometry;
pub mod particle;
pub mod progress;
pub mod simulation;

pub use attractor::Attractor;
pub use config::{CanvasSize, Color, SimulationConfig};
pub use geometry::{direction, distance, Vector2D};
pub use particle::Particle;
pub use progress::{ease_out_cubic, BarReading, Easing, ProgressBar};
pub use simulation::{Frame, Simulation};
