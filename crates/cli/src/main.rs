#![deny(unsafe_code)]
//! CLI binary for metaball contour rendering.
//!
//! Subcommands:
//! - `render` — run a simulation N ticks, write a PNG of the contour
//! - `segments` — run N ticks, print the final contour as JSON
//! - `replay <seed.json>` — re-run a saved `Seed` record, write a PNG
//! - `params` — print the configuration schema

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use metaballs_core::{Renderer, Seed, Simulation, SimulationConfig};
use metaballs_raster::snapshot::write_png;
use metaballs_raster::{RasterCanvas, RasterStyle};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "metaballs", about = "Marching-squares metaball contours")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

/// Options that shape a simulation run.
#[derive(Args)]
struct SimArgs {
    /// Domain width (defaults to 640).
    #[arg(short = 'W', long)]
    width: Option<f64>,

    /// Domain height (defaults to 640).
    #[arg(short = 'H', long)]
    height: Option<f64>,

    /// Distance between grid nodes (defaults to 8).
    #[arg(long)]
    spacing: Option<f64>,

    /// Number of sources (defaults to 5).
    #[arg(short = 'n', long)]
    sources: Option<usize>,

    /// Contour threshold (defaults to 1.0).
    #[arg(long)]
    threshold: Option<f64>,

    /// Number of ticks to run.
    #[arg(short, long, default_value_t = 120)]
    steps: usize,

    /// PRNG seed for deterministic output.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Reset every K ticks (0 disables).
    #[arg(long, default_value_t = 0)]
    reset_every: usize,

    /// Configuration as a JSON object; explicit flags take precedence.
    #[arg(long, default_value = "{}")]
    params: String,
}

#[derive(Subcommand)]
enum Command {
    /// Run a simulation and write a PNG of the final contour.
    Render {
        #[command(flatten)]
        sim: SimArgs,

        /// Draw sources as guide circles under the contour.
        #[arg(long)]
        guides: bool,

        /// Output file path.
        #[arg(short, long, default_value = "metaballs.png")]
        output: PathBuf,

        /// Also save a replayable seed record to this path.
        #[arg(long)]
        save_seed: Option<PathBuf>,
    },
    /// Run a simulation and print the final contour segments as JSON.
    Segments {
        #[command(flatten)]
        sim: SimArgs,
    },
    /// Replay a saved seed record and write a PNG.
    Replay {
        /// Path to a seed JSON file.
        seed_file: PathBuf,

        /// Draw sources as guide circles under the contour.
        #[arg(long)]
        guides: bool,

        /// Output file path.
        #[arg(short, long, default_value = "metaballs.png")]
        output: PathBuf,
    },
    /// Print every configuration parameter with its default.
    Params,
}

impl SimArgs {
    fn config(&self) -> Result<SimulationConfig, CliError> {
        let mut params: serde_json::Value = serde_json::from_str(&self.params)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
        let Some(obj) = params.as_object_mut() else {
            return Err(CliError::Input("--params must be a JSON object".into()));
        };
        // merged before parsing so placement ranges follow the domain
        if let Some(width) = self.width {
            obj.insert("width".into(), width.into());
        }
        if let Some(height) = self.height {
            obj.insert("height".into(), height.into());
        }
        let mut config = SimulationConfig::from_json(&params);
        if let Some(spacing) = self.spacing {
            config.spacing = spacing;
        }
        if let Some(n) = self.sources {
            config.source_count = n;
        }
        if let Some(t) = self.threshold {
            config.threshold = t;
        }
        Ok(config)
    }

    fn run(&self) -> Result<(SimulationConfig, Simulation), CliError> {
        let config = self.config()?;
        let mut sim = Simulation::new(config, self.seed)?;
        sim.run(self.steps, self.reset_every)?;
        debug!(
            ticks = self.steps,
            segments = sim.segments().len(),
            "simulation finished"
        );
        Ok((config, sim))
    }

    /// The replayable record of this run.
    fn seed_record(&self, config: SimulationConfig) -> Seed {
        Seed {
            config,
            seed: self.seed,
            steps: self.steps,
            reset_every: self.reset_every,
        }
    }
}

fn render_png(sim: &Simulation, guides: bool, output: &Path) -> Result<(), CliError> {
    let style = RasterStyle {
        draw_guides: guides,
        ..RasterStyle::default()
    };
    let config = sim.config();
    let mut canvas = RasterCanvas::for_domain(config.width, config.height, style)?;
    canvas.draw(&sim.frame())?;
    write_png(&canvas, output)?;
    Ok(())
}

fn report(json: bool, info: serde_json::Value, text: String) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        info!("{text}");
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Params => {
            let schema = SimulationConfig::schema();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&schema)?);
            } else if let Some(entries) = schema.as_object() {
                for (name, entry) in entries {
                    println!(
                        "  {name:<13} default {:<6} {}",
                        entry["default"],
                        entry["description"].as_str().unwrap_or_default()
                    );
                }
            }
        }
        Command::Render {
            sim: args,
            guides,
            output,
            save_seed,
        } => {
            let (config, sim) = args.run()?;
            render_png(&sim, guides, &output)?;
            if let Some(path) = &save_seed {
                let record = args.seed_record(config);
                std::fs::write(path, serde_json::to_string_pretty(&record)?)?;
            }
            report(
                cli.json,
                serde_json::json!({
                    "config": config.to_json(),
                    "seed": args.seed,
                    "steps": args.steps,
                    "segments": sim.segments().len(),
                    "output": output.display().to_string(),
                }),
                format!(
                    "rendered {} segments ({} ticks, seed {}) -> {}",
                    sim.segments().len(),
                    args.steps,
                    args.seed,
                    output.display()
                ),
            )?;
        }
        Command::Segments { sim: args } => {
            let (_, sim) = args.run()?;
            let out = serde_json::json!({
                "tick": sim.tick(),
                "sources": serde_json::to_value(sim.sources())?,
                "segments": serde_json::to_value(sim.segments())?,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Command::Replay {
            seed_file,
            guides,
            output,
        } => {
            let text = std::fs::read_to_string(&seed_file)?;
            let record: Seed = serde_json::from_str(&text)
                .map_err(|e| CliError::Input(format!("invalid seed file: {e}")))?;
            record.validate()?;
            let sim = record.simulate()?;
            render_png(&sim, guides, &output)?;
            report(
                cli.json,
                serde_json::json!({
                    "seed_file": seed_file.display().to_string(),
                    "steps": record.steps,
                    "segments": sim.segments().len(),
                    "output": output.display().to_string(),
                }),
                format!(
                    "replayed {} ({} ticks) -> {}",
                    seed_file.display(),
                    record.steps,
                    output.display()
                ),
            )?;
        }
    }

    Ok(())
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            tracing::error!("{e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim_args(argv: &[&str]) -> SimArgs {
        let mut full = vec!["metaballs", "segments"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Command::Segments { sim } => sim,
            _ => unreachable!("parsed the segments subcommand"),
        }
    }

    #[test]
    fn flags_override_params_json() {
        let args = sim_args(&["--params", r#"{"spacing": 4, "width": 320}"#, "--spacing", "16"]);
        let config = args.config().unwrap();
        assert_eq!(config.spacing, 16.0);
        assert_eq!(config.width, 320.0);
    }

    #[test]
    fn non_object_params_is_input_error() {
        let args = sim_args(&["--params", "[1, 2]"]);
        assert_eq!(args.config().err().map(|e| e.exit_code()), Some(12));
    }

    #[test]
    fn saved_record_replays_a_run_with_resets() {
        let args = sim_args(&["--steps", "120", "--reset-every", "50", "--seed", "42"]);
        let (config, live) = args.run().unwrap();
        let record = args.seed_record(config);
        assert_eq!(record.reset_every, 50);
        let replay = record.simulate().unwrap();
        assert_eq!(replay.tick(), live.tick());
        assert_eq!(replay.sources(), live.sources());
    }

    #[test]
    fn huge_domain_is_rejected_not_a_panic() {
        let args = sim_args(&["--width", "1e30"]);
        let err = args.run().err().map(|e| e.exit_code());
        assert_eq!(err, Some(10));
    }
}
