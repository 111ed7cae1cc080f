//! smoothnormal CLI — benchmarking, configuration and demo bakes.

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "smoothnormal")]
#[command(version, about = "Smooth-normal baking for outline shaders")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Benchmark output format.
#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Time the CPU and parallel engines on procedural scenarios.
    Benchmark {
        /// Which scenario to run (flat_grid, hard_cubes, uv_sphere, dense_sphere, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Output file path. Prints to stdout when omitted.
        #[arg(short, long)]
        output: Option<String>,

        /// Output format.
        #[arg(short, long, value_enum, default_value = "csv")]
        format: OutputFormat,

        /// Worker threads for the parallel engine.
        #[arg(short, long)]
        threads: Option<usize>,
    },

    /// Print the resolved bake configuration as TOML.
    Config {
        /// User override file; the default config is used if it does not exist.
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Validate a bake configuration file (TOML).
    Validate {
        /// Path to the config file.
        path: String,
    },

    /// Bake a procedural model and print the report.
    Demo {
        /// Model to bake (flat_quad, hard_cube, shared_cube, uv_sphere).
        #[arg(short, long, default_value = "hard_cube")]
        model: String,

        /// Config file to bake with.
        #[arg(short, long)]
        config: Option<String>,

        /// Write a JSON snapshot of the baked channels here.
        #[arg(short, long)]
        snapshot: Option<String>,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Benchmark {
            scenario,
            output,
            format,
            threads,
        } => commands::benchmark(&scenario, output.as_deref(), format, threads),
        Commands::Config { user } => commands::config(user.as_deref()),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Demo {
            model,
            config,
            snapshot,
        } => commands::demo(&model, config.as_deref(), snapshot.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
