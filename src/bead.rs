use crate::math::Vector2;

/// Bead kept on the wire by projecting it back after an unconstrained step.
///
/// One step is the sequence `start_step`, `keep_on_wire`, `end_step`.
#[derive(Debug, Clone)]
pub struct Bead {
    /// Disk radius used for drawing
    pub radius: f64,
    pub mass: f64,
    pub pos: Vector2,
    pub prev_pos: Vector2,
    pub vel: Vector2,
}

impl Bead {
    pub fn new(radius: f64, mass: f64, pos: Vector2) -> Self {
        Bead {
            radius,
            mass,
            pos,
            prev_pos: pos,
            vel: Vector2::default(),
        }
    }

    /// Semi-implicit Euler: velocity first, then position from the new velocity
    pub fn start_step(&mut self, dt: f64, gravity: Vector2) {
        self.vel.add(gravity, dt);
        self.prev_pos.set(self.pos);
        self.pos.add(self.vel, dt);
    }

    /// Moves the bead radially onto the wire and returns the signed correction.
    ///
    /// Returns `None` when the bead sits exactly on the centre, in which case
    /// the position is left untouched.
    pub fn keep_on_wire(&mut self, center: Vector2, radius: f64) -> Option<f64> {
        let mut dir = Vector2::default();
        dir.subtract_vectors(self.pos, center);
        let len = dir.length();
        if len == 0.0 {
            return None;
        }
        dir.scale(1.0 / len);
        let lambda = radius - len;
        self.pos.add(dir, lambda);
        Some(lambda)
    }

    /// Velocity is rebuilt from the constrained displacement
    pub fn end_step(&mut self, dt: f64) {
        self.vel.subtract_vectors(self.pos, self.prev_pos);
        self.vel.scale(1.0 / dt);
    }

    /// Angular velocity about `center`, counter-clockwise positive
    pub fn angular_velocity(&self, center: Vector2) -> f64 {
        let mut dir = Vector2::default();
        dir.subtract_vectors(self.pos, center);
        let len2 = dir.dot(dir);
        if len2 == 0.0 {
            return 0.0;
        }
        self.vel.dot(dir.perp()) / len2
    }
}
