use crate::analytic::AnalyticBead;
use crate::bead::Bead;
use crate::config::SceneConfig;
use crate::math::{distance, Vector2};

/// Comparison of the two integrators after the last simulated frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Readout {
    /// Constraint force from the projection, `|lambda| / dt^2`
    pub force: f64,
    pub analytic_force: f64,
    /// Distance between the two bead positions
    pub deviation: f64,
    pub constrained_omega: f64,
    pub analytic_omega: f64,
}

/// Scene state: wire, gravity, time stepping and both beads
#[derive(Debug, Clone)]
pub struct PhysicsScene {
    pub gravity: Vector2,
    /// Frame time step
    pub dt: f64,
    /// Substeps per frame
    pub num_steps: u32,
    pub paused: bool,
    pub wire_center: Vector2,
    pub wire_radius: f64,
    pub bead: Bead,
    pub analytic_bead: AnalyticBead,
    /// Simulated time in seconds
    pub time: f64,
    pub readout: Readout,
    config: SceneConfig,
}

impl PhysicsScene {
    pub fn new(config: &SceneConfig) -> Self {
        let (bead, analytic_bead) = Self::make_beads(config);
        let mut scene = PhysicsScene {
            gravity: config.gravity,
            dt: config.dt,
            num_steps: config.num_steps,
            paused: false,
            wire_center: config.wire_center,
            wire_radius: config.wire_radius,
            bead,
            analytic_bead,
            time: 0.0,
            readout: Readout::default(),
            config: config.clone(),
        };
        scene.readout = scene.measure(0.0, 0.0);
        scene
    }

    /// Both beads start at the configured angle, at rest
    fn make_beads(config: &SceneConfig) -> (Bead, AnalyticBead) {
        let analytic_bead = AnalyticBead::new(
            config.wire_radius,
            config.bead_radius,
            config.mass,
            config.initial_angle,
        );
        let mut pos = config.wire_center;
        pos.add(analytic_bead.pos(), 1.0);
        let bead = Bead::new(config.bead_radius, config.mass, pos);
        (bead, analytic_bead)
    }

    /// Puts both beads back at their starting position; the pause flag is kept
    pub fn restart(&mut self) {
        let (bead, analytic_bead) = Self::make_beads(&self.config);
        self.bead = bead;
        self.analytic_bead = analytic_bead;
        self.time = 0.0;
        self.readout = self.measure(0.0, 0.0);
        log::info!("scene restarted at angle {:.3}", self.config.initial_angle);
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::debug!("paused: {}", self.paused);
    }

    /// Advances both beads by one step of `dt` and returns
    /// `(constraint force, analytic force)`
    pub fn substep(&mut self, dt: f64) -> (f64, f64) {
        self.bead.start_step(dt, self.gravity);
        let force = match self.bead.keep_on_wire(self.wire_center, self.wire_radius) {
            Some(lambda) => (lambda / dt / dt).abs(),
            None => {
                log::trace!("bead at wire centre, projection skipped");
                0.0
            }
        };
        self.bead.end_step(dt);
        let analytic_force = self.analytic_bead.simulate(dt, -self.gravity.y);
        (force, analytic_force)
    }

    /// Simulates one frame of `num_steps` substeps unless paused
    pub fn simulate(&mut self) {
        if self.paused {
            return;
        }
        self.advance_frame();
    }

    /// Simulates exactly one frame and leaves the scene paused
    pub fn step(&mut self) {
        self.advance_frame();
        self.paused = true;
        log::debug!("single step to t = {:.4}", self.time);
    }

    fn advance_frame(&mut self) {
        let sdt = self.dt / self.num_steps as f64;
        let mut forces = (0.0, 0.0);
        for _ in 0..self.num_steps {
            forces = self.substep(sdt);
        }
        self.time += self.dt;
        self.readout = self.measure(forces.0, forces.1);
    }

    fn measure(&self, force: f64, analytic_force: f64) -> Readout {
        Readout {
            force,
            analytic_force,
            deviation: distance(self.bead.pos, self.analytic_world_pos()),
            constrained_omega: self.bead.angular_velocity(self.wire_center),
            analytic_omega: self.analytic_bead.omega,
        }
    }

    /// Analytic bead position in scene coordinates
    pub fn analytic_world_pos(&self) -> Vector2 {
        let mut pos = self.wire_center;
        pos.add(self.analytic_bead.pos(), 1.0);
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn config(angle: f64) -> SceneConfig {
        SceneConfig {
            wire_radius: 1.0,
            initial_angle: angle,
            ..SceneConfig::default()
        }
    }

    #[test]
    fn beads_start_together_on_wire() {
        let scene = PhysicsScene::new(&SceneConfig::default());
        assert_abs_diff_eq!(scene.bead.pos.x, 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(scene.bead.pos.y, 0.0, epsilon = 1e-12);
        assert_eq!(scene.bead.vel, Vector2::default());
        assert_eq!(scene.analytic_bead.omega, 0.0);
        assert_eq!(scene.readout.deviation, 0.0);
    }

    #[test]
    fn integrators_agree_after_one_second() {
        let dt = 1.0 / 60.0;
        let mut scene = PhysicsScene::new(&config(0.3));
        for _ in 0..60 {
            scene.substep(dt);
        }
        let deviation = distance(scene.bead.pos, scene.analytic_world_pos());
        assert!(deviation < 0.05, "deviation {}", deviation);
        assert!((distance(scene.bead.pos, scene.wire_center) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn forces_agree_with_substeps() {
        let mut scene = PhysicsScene::new(&SceneConfig::default());
        for _ in 0..120 {
            scene.simulate();
            let r = scene.readout;
            assert!(
                (r.force - r.analytic_force).abs() < 0.1,
                "t = {}: {} vs {}",
                scene.time,
                r.force,
                r.analytic_force
            );
            assert!(r.deviation < 1e-3);
            assert_abs_diff_eq!(r.constrained_omega, r.analytic_omega, epsilon = 0.05);
        }
        assert_abs_diff_eq!(scene.time, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn paused_scene_does_not_move() {
        let mut scene = PhysicsScene::new(&SceneConfig::default());
        scene.toggle_pause();
        let before = scene.bead.pos;
        scene.simulate();
        assert_eq!(scene.bead.pos, before);
        assert_eq!(scene.time, 0.0);
    }

    #[test]
    fn step_advances_one_frame_and_pauses() {
        let mut scene = PhysicsScene::new(&SceneConfig::default());
        scene.paused = true;
        scene.step();
        assert!(scene.paused);
        assert_abs_diff_eq!(scene.time, scene.dt);
        assert!(scene.bead.pos.y < 0.0);
        assert!(scene.analytic_bead.angle < PI / 2.0);
    }

    #[test]
    fn restart_restores_initial_state() {
        let mut scene = PhysicsScene::new(&SceneConfig::default());
        let start = scene.bead.pos;
        for _ in 0..10 {
            scene.simulate();
        }
        scene.toggle_pause();
        scene.restart();
        assert!(scene.paused);
        assert_eq!(scene.bead.pos, start);
        assert_eq!(scene.bead.vel, Vector2::default());
        assert_eq!(scene.analytic_bead.angle, PI / 2.0);
        assert_eq!(scene.analytic_bead.omega, 0.0);
        assert_eq!(scene.time, 0.0);
    }

    #[test]
    fn bead_on_centre_reports_no_force() {
        let mut scene = PhysicsScene::new(&SceneConfig {
            gravity: Vector2::default(),
            ..SceneConfig::default()
        });
        scene.bead = Bead::new(0.1, 1.0, scene.wire_center);
        let (force, _) = scene.substep(0.01);
        assert_eq!(force, 0.0);
        assert_eq!(scene.bead.pos, scene.wire_center);
    }

    #[test]
    fn bead_leaves_centre_and_returns_to_wire() {
        let mut scene = PhysicsScene::new(&SceneConfig {
            gravity: Vector2::default(),
            ..SceneConfig::default()
        });
        scene.bead = Bead::new(0.1, 1.0, scene.wire_center);
        let (force, _) = scene.substep(0.01);
        assert_eq!(force, 0.0);
        assert_eq!(scene.bead.pos, scene.wire_center);

        scene.gravity = Vector2::new(0.0, -10.0);
        let (force, _) = scene.substep(0.01);
        assert!(force > 0.0);
        let off_wire = (distance(scene.bead.pos, scene.wire_center) - scene.wire_radius).abs();
        assert!(off_wire < 1e-9, "off wire by {}", off_wire);
        assert!(scene.bead.pos.y < 0.0);
    }

    #[test]
    fn bead_dropped_from_centre_lands_on_wire() {
        let mut scene = PhysicsScene::new(&SceneConfig::default());
        scene.bead = Bead::new(0.1, 1.0, scene.wire_center);
        scene.substep(0.01);
        scene.substep(0.01);
        let off_wire = (distance(scene.bead.pos, scene.wire_center) - scene.wire_radius).abs();
        assert!(off_wire < 1e-9, "off wire by {}", off_wire);
    }

    #[test]
    fn bottom_force_is_gravity() {
        let mut scene = PhysicsScene::new(&config(0.0));
        let (_, analytic_force) = scene.substep(1.0 / 60.0);
        assert_eq!(analytic_force, 10.0);
    }
}
