//! Native driver for the drift screensaver: settings, rasterizer and the
//! window loop that feeds frame timing into `drift_core`.

pub mod app;
pub mod render;
pub mod settings;

pub use app::{run, SaverApp};
pub use render::{FrameBuffer, Palette};
pub use settings::{Overrides, SaverSettings};
