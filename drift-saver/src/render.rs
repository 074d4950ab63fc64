//! Software rasterizer: turns a simulation [`Frame`] into RGBA8 pixels.

use drift_core::{Color, Frame};

/// Colours and geometry of everything that is not a particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub bar_track: Color,
    pub bar_fill: Color,
    pub bar_height: u32,
}

/// Row-major RGBA8 view over a pixel buffer
pub struct FrameBuffer<'a> {
    data: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Returns `None` when `data` is not exactly `width * height * 4` bytes.
    pub fn new(data: &'a mut [u8], width: u32, height: u32) -> Option<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.index(x, y)?;
        let mut out = [0; 4];
        out.copy_from_slice(&self.data[i..i + 4]);
        Some(out)
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    /// Fill with `color`, forced opaque.
    pub fn clear(&mut self, color: Color) {
        let rgba = [color.r, color.g, color.b, 255];
        for pixel in self.data.chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
    }

    /// Source-over blend of `color` onto one pixel. Out-of-bounds is a no-op.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Color) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let pixel = &mut self.data[i..i + 4];
        let alpha = color.a as u32;
        let mix = |src: u8, dst: u8| {
            ((src as u32 * alpha + dst as u32 * (255 - alpha) + 127) / 255) as u8
        };
        pixel[0] = mix(color.r, pixel[0]);
        pixel[1] = mix(color.g, pixel[1]);
        pixel[2] = mix(color.b, pixel[2]);
        pixel[3] = 255;
    }

    /// Blend a rectangle, clipped to the buffer.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Color) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for py in y..y_end {
            for px in x..x_end {
                self.blend_pixel(px, py, color);
            }
        }
    }

    /// Background, one pixel per particle, then the countdown bar along the
    /// bottom edge.
    pub fn draw_frame(&mut self, frame: &Frame<'_>, palette: &Palette) {
        self.clear(palette.background);

        for particle in frame.particles {
            let position = particle.position;
            if position.x < 0.0 || position.y < 0.0 {
                continue;
            }
            self.blend_pixel(position.x as u32, position.y as u32, particle.color);
        }

        let bar_top = self.height.saturating_sub(palette.bar_height);
        self.fill_rect(0, bar_top, self.width, palette.bar_height, palette.bar_track);

        let solid_width = frame.bar.solid_width.min(self.width);
        self.fill_rect(0, bar_top, solid_width, palette.bar_height, palette.bar_fill);

        if solid_width < self.width && frame.bar.edge_alpha > 0.0 {
            let edge = Color {
                a: (255.0 * frame.bar.edge_alpha) as u8,
                ..palette.bar_fill
            };
            self.fill_rect(solid_width, bar_top, 1, palette.bar_height, edge);
        }
    }
}
