use anyhow::{anyhow, Context, Result};
use clap::Parser;

use hexapod_kinematics::gait::{Controller, GaitMode};
use hexapod_kinematics::kinematics_impl::{HexapodKinematics, SolverOptions};
use hexapod_kinematics::parameters::RobotParameters;
use hexapod_kinematics::utils::{dump_body, format_leg};

/// Runs a gait on a simulated hexapod and prints the solved joint angles.
#[derive(Parser)]
#[command(name = "hexapod-sim")]
#[command(about = "Headless hexapod leg solver and gait simulator", long_about = None)]
#[command(version)]
struct Cli {
    /// Robot description in YAML. The built-in Adeept hexapod is used if not given.
    #[arg(long, value_name = "FILE")]
    robot: Option<String>,

    /// Gait mode: stand, tripod or taps
    #[arg(long, default_value = "stand")]
    mode: String,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 10)]
    ticks: u32,

    /// Tick duration, seconds
    #[arg(long, default_value_t = 0.1)]
    dt: f64,

    /// Plant feet on the ground when their target is out of reach
    #[arg(long)]
    plant: bool,

    /// Print the robot description as YAML and exit
    #[arg(long)]
    dump_yaml: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let parameters = match &cli.robot {
        Some(path) => RobotParameters::from_yaml_file(path)
            .with_context(|| format!("Failed to load robot description from {}", path))?,
        None => RobotParameters::adeept(),
    };

    if cli.dump_yaml {
        print!("{}", parameters.to_yaml());
        return Ok(());
    }

    let mode = GaitMode::from_key(&cli.mode)
        .ok_or_else(|| anyhow!("Unknown mode '{}', expected stand, tripod or taps", cli.mode))?;
    if !(cli.dt > 0.0 && cli.dt.is_finite()) {
        return Err(anyhow!("Tick duration must be positive, got {}", cli.dt));
    }

    let mut body = parameters.body().context("Invalid robot description")?;
    let kinematics = HexapodKinematics::with_options(SolverOptions {
        plant_unreachable: cli.plant,
        ..SolverOptions::default()
    });
    let mut controller = Controller::new(&body, parameters.gait, kinematics);
    controller.set_mode(mode);

    println!("Mode: {}", controller.mode_name());
    for tick in 1..=cli.ticks {
        controller.update(cli.dt, &mut body);
        println!("t = {:.2}s", controller.elapsed());
        dump_body(&body);
        if tick == cli.ticks {
            let unsolved: Vec<String> = body
                .legs()
                .filter(|leg| !leg.ik.solved)
                .map(format_leg)
                .collect();
            if !unsolved.is_empty() {
                println!("Not solved at the last tick:");
                for line in unsolved {
                    println!("  {}", line);
                }
            }
        }
    }
    Ok(())
}
