use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use drift_core::{Color, Easing, SimulationConfig};
use serde::{Deserialize, Serialize};

use crate::render::Palette;

/// Command-line values that take precedence over the settings file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    /// Display time in minutes
    pub minutes: Option<f64>,
    pub particles: Option<usize>,
    pub seed: Option<u64>,
    pub easing: Option<i32>,
}

/// Everything a run can be configured with. Missing fields in a settings
/// file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaverSettings {
    pub particle_count: usize,
    /// Countdown length in seconds
    pub total_duration: f32,
    pub min_attractor_duration: u64,
    pub max_attractor_duration: u64,
    pub min_force: f32,
    pub max_force: f32,
    pub force_floor: f32,
    pub friction: f32,
    pub smoothing: f32,
    /// 0 = linear, 1 = cubic ease-out, anything else linear
    pub easing: i32,
    /// Fixed RNG seed; wall-clock seeded when absent
    pub seed: Option<u64>,
    /// Share of the monitor resolution used for the canvas
    pub canvas_fraction: f64,
    pub frame_rate: u32,
    pub bar_height: u32,
    pub particle_color: [u8; 4],
    pub background_color: [u8; 4],
    pub bar_track_color: [u8; 4],
    pub bar_fill_color: [u8; 4],
}

impl Default for SaverSettings {
    fn default() -> Self {
        let core = SimulationConfig::default();
        Self {
            particle_count: core.particle_count,
            total_duration: core.total_duration,
            min_attractor_duration: core.min_attractor_duration,
            max_attractor_duration: core.max_attractor_duration,
            min_force: core.min_force,
            max_force: core.max_force,
            force_floor: core.force_floor,
            friction: core.friction,
            smoothing: core.smoothing,
            easing: core.easing.mode(),
            seed: None,
            canvas_fraction: 0.8,
            frame_rate: 60,
            bar_height: 20,
            particle_color: to_rgba(core.particle_color),
            background_color: [40, 44, 51, 100],
            bar_track_color: [106, 136, 84, 255],
            bar_fill_color: [152, 195, 121, 255],
        }
    }
}

fn to_rgba(color: Color) -> [u8; 4] {
    [color.r, color.g, color.b, color.a]
}

fn to_color([r, g, b, a]: [u8; 4]) -> Color {
    Color::rgba(r, g, b, a)
}

impl SaverSettings {
    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings: SaverSettings = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(minutes) = overrides.minutes {
            self.total_duration = (minutes * 60.0) as f32;
        }
        if let Some(particles) = overrides.particles {
            self.particle_count = particles;
        }
        if let Some(seed) = overrides.seed {
            self.seed = Some(seed);
        }
        if let Some(easing) = overrides.easing {
            self.easing = easing;
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize settings")
    }

    pub fn validate(&self) -> Result<()> {
        if !self.total_duration.is_finite() || self.total_duration <= 0.0 {
            bail!(
                "Display duration must be a positive number of seconds, got {}",
                self.total_duration
            );
        }
        if self.particle_count == 0 {
            bail!("Particle count must be at least 1");
        }
        if self.min_attractor_duration == 0 {
            bail!("Minimum attractor duration must be at least 1 frame");
        }
        if self.min_attractor_duration > self.max_attractor_duration {
            bail!(
                "Attractor duration bounds are inverted: {} > {}",
                self.min_attractor_duration,
                self.max_attractor_duration
            );
        }
        if !self.min_force.is_finite() || !self.max_force.is_finite() {
            bail!("Attractor force bounds must be finite");
        }
        if self.min_force > self.max_force {
            bail!(
                "Attractor force bounds are inverted: {} > {}",
                self.min_force,
                self.max_force
            );
        }
        if !self.force_floor.is_finite() || self.force_floor <= 0.0 {
            bail!("Force floor must be positive, got {}", self.force_floor);
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            bail!("Friction must be in (0, 1], got {}", self.friction);
        }
        if !(0.0..=1.0).contains(&self.smoothing) {
            bail!("Smoothing must be in [0, 1], got {}", self.smoothing);
        }
        if !(self.canvas_fraction > 0.0 && self.canvas_fraction <= 1.0) {
            bail!(
                "Canvas fraction must be in (0, 1], got {}",
                self.canvas_fraction
            );
        }
        if self.frame_rate == 0 {
            bail!("Frame rate must be at least 1");
        }
        if self.bar_height == 0 {
            bail!("Bar height must be at least 1 pixel");
        }
        Ok(())
    }

    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            particle_count: self.particle_count,
            total_duration: self.total_duration,
            min_attractor_duration: self.min_attractor_duration,
            max_attractor_duration: self.max_attractor_duration,
            min_force: self.min_force,
            max_force: self.max_force,
            force_floor: self.force_floor,
            friction: self.friction,
            smoothing: self.smoothing,
            easing: Easing::from_mode(self.easing),
            particle_color: to_color(self.particle_color),
        }
    }

    pub fn palette(&self) -> Palette {
        Palette {
            background: to_color(self.background_color),
            bar_track: to_color(self.bar_track_color),
            bar_fill: to_color(self.bar_fill_color),
            bar_height: self.bar_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_validate() {
        let settings = SaverSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.easing, 1);
        assert_eq!(settings.total_duration, 60.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: SaverSettings =
            serde_json::from_str(r#"{ "particle_count": 250, "easing": 0 }"#).unwrap();
        assert_eq!(settings.particle_count, 250);
        assert_eq!(settings.easing, 0);
        assert_eq!(settings.friction, 0.99);
        assert_eq!(settings.bar_height, 20);
    }

    #[test]
    fn test_simulation_config_mapping() {
        let settings = SaverSettings {
            easing: 5,
            particle_color: [1, 2, 3, 4],
            ..SaverSettings::default()
        };
        let config = settings.simulation_config();
        assert_eq!(config.easing, Easing::Linear);
        assert_eq!(config.particle_color, Color::rgba(1, 2, 3, 4));
        assert_eq!(config.max_attractor_duration, 480);
    }

    #[test]
    fn test_overrides() {
        let mut settings = SaverSettings::default();
        settings.apply(&Overrides {
            minutes: Some(2.5),
            particles: Some(10),
            seed: Some(99),
            easing: None,
        });
        assert_eq!(settings.total_duration, 150.0);
        assert_eq!(settings.particle_count, 10);
        assert_eq!(settings.seed, Some(99));
        assert_eq!(settings.easing, 1);

        settings.apply(&Overrides::default());
        assert_eq!(settings.total_duration, 150.0);
    }

    #[test]
    fn test_negative_minutes_rejected() {
        let mut settings = SaverSettings::default();
        settings.apply(&Overrides {
            minutes: Some(-1.0),
            ..Overrides::default()
        });
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases = [
            SaverSettings {
                total_duration: 0.0,
                ..SaverSettings::default()
            },
            SaverSettings {
                total_duration: f32::NAN,
                ..SaverSettings::default()
            },
            SaverSettings {
                particle_count: 0,
                ..SaverSettings::default()
            },
            SaverSettings {
                min_attractor_duration: 500,
                ..SaverSettings::default()
            },
            SaverSettings {
                min_attractor_duration: 0,
                ..SaverSettings::default()
            },
            SaverSettings {
                min_force: 2.0,
                max_force: 1.0,
                ..SaverSettings::default()
            },
            SaverSettings {
                friction: 1.5,
                ..SaverSettings::default()
            },
            SaverSettings {
                smoothing: -0.1,
                ..SaverSettings::default()
            },
            SaverSettings {
                canvas_fraction: 0.0,
                ..SaverSettings::default()
            },
            SaverSettings {
                frame_rate: 0,
                ..SaverSettings::default()
            },
            SaverSettings {
                bar_height: 0,
                ..SaverSettings::default()
            },
        ];

        for settings in cases {
            assert!(settings.validate().is_err(), "{:?}", settings);
        }
    }
}
