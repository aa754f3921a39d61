use beadwire::widget::SceneWidget;
use beadwire::{Args, PhysicsScene, Result};
use clap::Parser;
use std::io::{self, Write};

/// Runs `frames` frames and prints one comparison line per frame
fn run_headless(scene: &mut PhysicsScene, frames: u32, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "{:>8} {:>14} {:>14} {:>12}",
        "time", "force", "analytic", "deviation"
    )?;
    for _ in 0..frames {
        scene.simulate();
        let r = scene.readout;
        writeln!(
            out,
            "{:>8.3} {:>14.6} {:>14.6} {:>12.3e}",
            scene.time, r.force, r.analytic_force, r.deviation
        )?;
    }
    out.flush()
}

fn run(args: Args) -> Result<()> {
    let config = args.scene_config()?;
    log::info!(
        "wire radius {}, gravity {:?}, dt {:.5} in {} substeps, start angle {:.3}",
        config.wire_radius,
        config.gravity,
        config.dt,
        config.num_steps,
        config.initial_angle
    );

    let mut scene = PhysicsScene::new(&config);
    match args.frames {
        Some(frames) => {
            if args.paused {
                log::warn!("--paused has no effect in headless mode");
            }
            run_headless(&mut scene, frames, &mut io::stdout().lock())?;
        }
        None => {
            scene.paused = args.paused;
            SceneWidget::new().run(&mut scene, args.fps)?;
        }
    }
    Ok(())
}

/// Main function
fn main() {
    env_logger::init();

    if let Err(err) = run(Args::parse()) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
