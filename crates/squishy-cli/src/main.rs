//! squishy CLI: simulation, benchmarking, and inspection.

use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod scene;

#[derive(Parser)]
#[command(name = "squishy")]
#[command(version, about = "squishy: particle-and-spring soft body simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Procedural meshes available without a scene file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MeshKind {
    Cube,
    Sphere,
    Prism,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a soft body simulation.
    Simulate {
        /// Path to a JSON scene file. Without one a jelly cube is dropped.
        #[arg(short, long)]
        scene: Option<String>,

        /// Override the number of steps.
        #[arg(short = 'n', long)]
        steps: Option<u32>,

        /// Write a bincode state snapshot of the final step.
        #[arg(long)]
        snapshot: Option<String>,

        /// Print every telemetry event as a JSON line.
        #[arg(long)]
        events: bool,
    },

    /// Run benchmark suite.
    Benchmark {
        /// Which scenario to run (cube_drop, sphere_squash, prism_wobble, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Override the number of steps per scenario.
        #[arg(short = 'n', long)]
        steps: Option<u32>,

        /// Output file path (CSV, or JSON with --json).
        #[arg(short, long)]
        output: Option<String>,

        /// Emit JSON instead of CSV.
        #[arg(long)]
        json: bool,
    },

    /// Build a lattice and print its statistics.
    Lattice {
        #[arg(short, long, value_enum, default_value_t = MeshKind::Cube)]
        mesh: MeshKind,

        /// Mesh size (cube edge, sphere or prism radius).
        #[arg(long, default_value_t = 1.0)]
        size: f32,

        /// Particle radius.
        #[arg(short, long, default_value_t = 0.05)]
        radius: f32,

        /// Connection distance override.
        #[arg(short, long)]
        connection: Option<f32>,
    },

    /// Print a sampled damped-oscillator curve.
    Oscillate {
        #[arg(long, default_value_t = 0.0)]
        from: f64,

        #[arg(long, default_value_t = 1.0)]
        to: f64,

        #[arg(long, default_value_t = 1.0)]
        mass: f64,

        #[arg(long, default_value_t = 169.0)]
        stiffness: f64,

        #[arg(long, default_value_t = 26.0)]
        damping: f64,

        /// Seconds to sample.
        #[arg(long, default_value_t = 1.0)]
        duration: f64,

        #[arg(long, default_value_t = 20)]
        samples: u32,
    },

    /// Inspect a state snapshot file.
    Inspect {
        /// Path to snapshot file.
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            scene,
            steps,
            snapshot,
            events,
        } => commands::simulate(scene.as_deref(), steps, snapshot.as_deref(), events),
        Commands::Benchmark {
            scenario,
            steps,
            output,
            json,
        } => commands::benchmark(&scenario, steps, output.as_deref(), json),
        Commands::Lattice {
            mesh,
            size,
            radius,
            connection,
        } => commands::lattice(mesh, size, radius, connection),
        Commands::Oscillate {
            from,
            to,
            mass,
            stiffness,
            damping,
            duration,
            samples,
        } => commands::oscillate(from, to, mass, stiffness, damping, duration, samples),
        Commands::Inspect { path } => commands::inspect(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
