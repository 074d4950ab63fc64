use crate::progress::Easing;

/// An RGBA display colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Drawable area in pixels, owned by the frame driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Scale a display resolution down by `fraction`, truncating like an
    /// integer cast. Never returns a zero extent.
    pub fn fraction_of(display_width: u32, display_height: u32, fraction: f64) -> Self {
        let scale = |extent: u32| ((extent as f64 * fraction) as u32).max(1);
        Self {
            width: scale(display_width),
            height: scale(display_height),
        }
    }

    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }
}

/// Startup parameters for a simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub particle_count: usize,
    /// Seconds the bar takes to run out
    pub total_duration: f32,
    /// Attractor lifetime bounds, in frames
    pub min_attractor_duration: u64,
    pub max_attractor_duration: u64,
    pub min_force: f32,
    pub max_force: f32,
    /// Minimum distance used by the inverse-distance pull
    pub force_floor: f32,
    pub friction: f32,
    /// Bar smoothing factor between frames (0-1)
    pub smoothing: f32,
    pub easing: Easing,
    pub particle_color: Color,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particle_count: 100_000,
            total_duration: 60.0,
            min_attractor_duration: 60 * 2,
            max_attractor_duration: 60 * 8,
            min_force: 1.0,
            max_force: 1.0,
            force_floor: 1.0,
            friction: 0.99,
            smoothing: 0.85,
            easing: Easing::CubicOut,
            particle_color: Color::rgba(152, 195, 121, 100),
        }
    }
}
