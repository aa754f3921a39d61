use crate::error::{Error, Result};
use crate::math::Vector2;
use clap::Parser;
use std::f64::consts::PI;

/// Width of the smallest simulated extent; the wire spans 80% of it
const SIM_MIN_WIDTH: f64 = 2.0;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Frame time step in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f64,

    /// Substeps per frame
    #[arg(long, default_value_t = 1000)]
    pub num_steps: u32,

    /// Vertical gravity acceleration (negative points down)
    #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
    pub gravity: f64,

    /// Wire radius
    #[arg(long, default_value_t = 0.4 * SIM_MIN_WIDTH)]
    pub wire_radius: f64,

    /// Bead disk radius, drawing only
    #[arg(long, default_value_t = 0.1)]
    pub bead_radius: f64,

    /// Bead mass (not used by either integrator)
    #[arg(long, default_value_t = 1.0)]
    pub mass: f64,

    /// Initial angle from the bottom of the wire, in radians
    #[arg(long, default_value_t = 0.5 * PI, allow_negative_numbers = true)]
    pub angle: f64,

    /// Run this many frames without a terminal UI and print the force table
    #[arg(long)]
    pub frames: Option<u32>,

    /// Interactive frame rate
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Start paused
    #[arg(long)]
    pub paused: bool,
}

/// Validated scene parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub dt: f64,
    pub num_steps: u32,
    pub gravity: Vector2,
    pub wire_center: Vector2,
    pub wire_radius: f64,
    pub bead_radius: f64,
    pub mass: f64,
    pub initial_angle: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            dt: 1.0 / 60.0,
            num_steps: 1000,
            gravity: Vector2::new(0.0, -10.0),
            wire_center: Vector2::default(),
            wire_radius: 0.4 * SIM_MIN_WIDTH,
            bead_radius: 0.1,
            mass: 1.0,
            initial_angle: 0.5 * PI,
        }
    }
}

impl Args {
    /// Checks the arguments and builds the scene configuration
    pub fn scene_config(&self) -> Result<SceneConfig> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "dt must be a positive number, got {}",
                self.dt
            )));
        }
        if self.num_steps == 0 {
            return Err(Error::InvalidConfig("num-steps must be at least 1".to_string()));
        }
        if !(self.wire_radius.is_finite() && self.wire_radius > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "wire-radius must be a positive number, got {}",
                self.wire_radius
            )));
        }
        for (name, value) in [
            ("gravity", self.gravity),
            ("angle", self.angle),
            ("bead-radius", self.bead_radius),
            ("mass", self.mass),
        ] {
            if !value.is_finite() {
                return Err(Error::InvalidConfig(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        if self.fps == 0 {
            return Err(Error::InvalidConfig("fps must be at least 1".to_string()));
        }

        Ok(SceneConfig {
            dt: self.dt,
            num_steps: self.num_steps,
            gravity: Vector2::new(0.0, self.gravity),
            wire_center: Vector2::default(),
            wire_radius: self.wire_radius,
            bead_radius: self.bead_radius,
            mass: self.mass,
            initial_angle: self.angle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("beadwire").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_default_scene() {
        let config = parse(&[]).scene_config().unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn parses_negative_values() {
        let args = parse(&["--gravity", "-3.5", "--angle", "-1.0", "--frames", "5"]);
        assert_eq!(args.frames, Some(5));
        let config = args.scene_config().unwrap();
        assert_eq!(config.gravity, Vector2::new(0.0, -3.5));
        assert_eq!(config.initial_angle, -1.0);
    }

    #[test]
    fn rejects_non_positive_dt() {
        let err = parse(&["--dt", "0"]).scene_config().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(parse(&["--dt=-0.1"]).scene_config().is_err());
    }

    #[test]
    fn rejects_zero_substeps() {
        assert!(parse(&["--num-steps", "0"]).scene_config().is_err());
    }

    #[test]
    fn rejects_bad_wire_radius() {
        assert!(parse(&["--wire-radius", "0"]).scene_config().is_err());
        assert!(parse(&["--wire-radius=-1"]).scene_config().is_err());
        assert!(parse(&["--wire-radius", "inf"]).scene_config().is_err());
    }

    #[test]
    fn every_option_has_help_text() {
        use clap::CommandFactory;
        let command = Args::command();
        for arg in command.get_arguments() {
            let id = arg.get_id().as_str();
            if id == "help" || id == "version" {
                continue;
            }
            assert!(arg.get_help().is_some(), "--{} has no help", id);
        }
    }

    #[test]
    fn rejects_non_finite_gravity() {
        assert!(parse(&["--gravity", "NaN"]).scene_config().is_err());
    }
}
