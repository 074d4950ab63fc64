//! Countdown bar: remaining time -> eased, frame-smoothed bar width.

/// Remapping applied to linear progress before it becomes a bar width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    CubicOut,
}

impl Easing {
    /// Integer mode selector: 1 is cubic ease-out, every other value linear.
    pub fn from_mode(mode: i32) -> Self {
        match mode {
            1 => Easing::CubicOut,
            _ => Easing::Linear,
        }
    }

    pub fn mode(self) -> i32 {
        match self {
            Easing::Linear => 0,
            Easing::CubicOut => 1,
        }
    }

    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::CubicOut => ease_out_cubic(t),
        }
    }
}

pub fn ease_out_cubic(t: f32) -> f32 {
    let f = t - 1.0;
    f * f * f + 1.0
}

pub fn lerp(from: f32, to: f32, amount: f32) -> f32 {
    from + amount * (to - from)
}

/// What the renderer needs to draw the bar for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarReading {
    /// Fully opaque columns, `floor(smoothed_width)`
    pub solid_width: u32,
    /// Coverage of the trailing column, in `[0, 1)`
    pub edge_alpha: f32,
}

/// Tracks remaining display time and the smoothed bar width derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBar {
    total_duration: f32,
    time_remaining: f32,
    smoothed_width: f32,
    smoothing: f32,
    easing: Easing,
}

impl ProgressBar {
    /// The bar starts full: `time_remaining == total_duration` and the
    /// smoothed width equals the canvas width.
    pub fn new(total_duration: f32, canvas_width: f32, smoothing: f32, easing: Easing) -> Self {
        Self {
            total_duration,
            time_remaining: total_duration,
            smoothed_width: canvas_width.max(0.0),
            smoothing,
            easing,
        }
    }

    pub fn total_duration(&self) -> f32 {
        self.total_duration
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    pub fn smoothed_width(&self) -> f32 {
        self.smoothed_width
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn is_finished(&self) -> bool {
        self.time_remaining <= 0.0
    }

    /// Remaining fraction of the countdown, clamped to `[0, 1]`.
    pub fn linear_progress(&self) -> f32 {
        linear_progress(self.time_remaining, self.total_duration)
    }

    pub fn eased_progress(&self) -> f32 {
        self.easing.apply(self.linear_progress())
    }

    /// Advance the countdown by `delta_time` seconds and move the smoothed
    /// width toward the eased target.
    pub fn update(&mut self, delta_time: f32, canvas_width: f32) -> BarReading {
        self.time_remaining -= delta_time;

        let target = self.eased_progress() * canvas_width;
        // A blend above 1 would overshoot the target on long frames.
        let blend = (self.smoothing * delta_time * 10.0).clamp(0.0, 1.0);
        self.smoothed_width =
            lerp(self.smoothed_width, target, blend).clamp(0.0, canvas_width.max(0.0));

        self.reading()
    }

    pub fn reading(&self) -> BarReading {
        let solid = self.smoothed_width.floor();
        BarReading {
            solid_width: solid as u32,
            edge_alpha: (self.smoothed_width - solid).clamp(0.0, 1.0),
        }
    }
}

/// `time_remaining / total_duration` clamped to `[0, 1]`. A non-positive
/// total reads as already elapsed.
pub fn linear_progress(time_remaining: f32, total_duration: f32) -> f32 {
    if total_duration <= 0.0 {
        return 0.0;
    }
    (time_remaining / total_duration).clamp(0.0, 1.0)
}
