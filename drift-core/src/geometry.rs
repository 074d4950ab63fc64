/// A 2D vector used for position, velocity and direction
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(&self, other: &Vector2D) -> f32 {
        distance(*self, *other)
    }

    /// Wrap both coordinates onto the torus `[0, width) x [0, height)`.
    pub fn wrapped(self, width: f32, height: f32) -> Self {
        Self {
            x: wrap_coordinate(self.x, width),
            y: wrap_coordinate(self.y, height),
        }
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::Div<f32> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl core::ops::SubAssign for Vector2D {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl core::ops::MulAssign<f32> for Vector2D {
    fn mul_assign(&mut self, scalar: f32) {
        self.x *= scalar;
        self.y *= scalar;
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Vector2D, b: Vector2D) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Unit vector pointing from `b` toward `a`.
///
/// Coincident points use a divisor of 1, so the result is the zero vector
/// rather than NaN.
pub fn direction(a: Vector2D, b: Vector2D) -> Vector2D {
    let mut dist = distance(a, b);
    if dist == 0.0 {
        dist = 1.0;
    }
    (a - b) / dist
}

/// Map `value` back into `[0, extent)`, re-entering from the opposite edge.
///
/// A single step normally crosses at most one edge, which the add/subtract
/// handles. Anything further out (or a sum that rounds onto `extent`) falls
/// through to the Euclidean remainder.
pub fn wrap_coordinate(value: f32, extent: f32) -> f32 {
    let mut wrapped = value;
    if wrapped < 0.0 {
        wrapped += extent;
    }
    if wrapped >= extent {
        wrapped -= extent;
    }
    if (0.0..extent).contains(&wrapped) {
        return wrapped;
    }

    let rem = wrapped.rem_euclid(extent);
    if rem >= extent {
        0.0
    } else {
        rem
    }
}
