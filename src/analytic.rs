use crate::math::Vector2;

/// Bead on the wire tracked by its angle from the downward vertical
#[derive(Debug, Clone)]
pub struct AnalyticBead {
    /// Wire radius
    pub radius: f64,
    pub bead_radius: f64,
    pub mass: f64,
    pub angle: f64,
    pub omega: f64,
}

impl AnalyticBead {
    pub fn new(radius: f64, bead_radius: f64, mass: f64, angle: f64) -> Self {
        AnalyticBead {
            radius,
            bead_radius,
            mass,
            angle,
            omega: 0.0,
        }
    }

    /// Advances the pendulum equation by `dt` and returns the net outward force.
    ///
    /// `gravity` is the downward acceleration magnitude, i.e. the negated
    /// y component of the scene gravity.
    pub fn simulate(&mut self, dt: f64, gravity: f64) -> f64 {
        let acc = -(gravity / self.radius) * self.angle.sin();
        self.omega += acc * dt;
        self.angle += self.omega * dt;

        let centrifugal_force = self.omega * self.omega * self.radius;
        centrifugal_force + self.angle.cos() * gravity.abs()
    }

    /// Position relative to the wire centre; angle 0 is the bottom
    pub fn pos(&self) -> Vector2 {
        Vector2::new(
            self.angle.sin() * self.radius,
            -self.angle.cos() * self.radius,
        )
    }
}
