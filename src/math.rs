/// 2D vector with in-place arithmetic
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Vector2 { x, y }
    }

    /// Copies the components of `v` into this vector
    pub fn set(&mut self, v: Vector2) -> &mut Self {
        self.x = v.x;
        self.y = v.y;
        self
    }

    /// Adds `v` scaled by `s`
    pub fn add(&mut self, v: Vector2, s: f64) -> &mut Self {
        self.x += v.x * s;
        self.y += v.y * s;
        self
    }

    /// Overwrites this vector with `a + b`
    pub fn add_vectors(&mut self, a: Vector2, b: Vector2) -> &mut Self {
        self.x = a.x + b.x;
        self.y = a.y + b.y;
        self
    }

    /// Subtracts `v` scaled by `s`
    pub fn subtract(&mut self, v: Vector2, s: f64) -> &mut Self {
        self.x -= v.x * s;
        self.y -= v.y * s;
        self
    }

    /// Overwrites this vector with `a - b`
    pub fn subtract_vectors(&mut self, a: Vector2, b: Vector2) -> &mut Self {
        self.x = a.x - b.x;
        self.y = a.y - b.y;
        self
    }

    pub fn scale(&mut self, s: f64) -> &mut Self {
        self.x *= s;
        self.y *= s;
        self
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn dot(&self, v: Vector2) -> f64 {
        self.x * v.x + self.y * v.y
    }

    /// Rotates by 90 degrees counter-clockwise
    pub fn perp(&self) -> Vector2 {
        Vector2::new(-self.y, self.x)
    }
}

/// Distance between two points
pub fn distance(a: Vector2, b: Vector2) -> f64 {
    let mut d = Vector2::default();
    d.subtract_vectors(a, b);
    d.length()
}
