#![deny(unsafe_code)]
//! CLI binary for the wavefield spectral ocean simulator.
//!
//! Subcommands:
//! - `render`: configure, tick N frames, write height/normal/displacement PNGs
//! - `schema`: print the parameter schema
//! - `defaults`: print the default configuration

mod error;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use error::CliError;
use log::{info, LevelFilter};
use serde_json::{json, Value};
use wavefield_core::texture::{CHANNEL_FOLD, CHANNEL_HEIGHT};
use wavefield_core::{Simulator, SpectrumConfig};
use wavefield_export::snapshot::write_maps;
use wavefield_export::Encoding;
use wavefield_spectrum::OceanSimulator;

#[derive(Parser)]
#[command(name = "wavefield", about = "Spectral ocean surface simulator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Raise log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate N ticks and write the resulting maps as PNGs.
    Render {
        /// Number of ticks to simulate.
        #[arg(short, long, default_value_t = 60)]
        ticks: usize,

        /// Ticks per second of wall-clock time; each tick advances 1/fps.
        #[arg(long, default_value_t = 30.0)]
        fps: f32,

        /// Parameters as a JSON object; missing keys use defaults.
        #[arg(long, conflicts_with = "config")]
        params: Option<String>,

        /// Path to a JSON parameter file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Seed override.
        #[arg(long)]
        seed: Option<u64>,

        /// Grid side override (power of two, 16..=2048).
        #[arg(short, long)]
        dimension: Option<usize>,

        /// Directory receiving height.png, normal.png and displacement.png.
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Print every parameter with its type, default and range.
    Schema,
    /// Print the default configuration as JSON.
    Defaults,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Parameter JSON from `--params`, `--config`, or an empty object.
fn load_params(params: Option<&str>, config: Option<&Path>) -> Result<Value, CliError> {
    let (text, origin) = match (params, config) {
        (Some(text), _) => (text.to_owned(), "--params".to_owned()),
        (None, Some(path)) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
            (text, path.display().to_string())
        }
        (None, None) => return Ok(json!({})),
    };
    let value: Value = serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid JSON in {origin}: {e}")))?;
    if !value.is_object() {
        return Err(CliError::Input(format!("{origin} must be a JSON object")));
    }
    Ok(value)
}

fn frame_delta(fps: f32) -> Result<f32, CliError> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(CliError::Input(format!("--fps must be positive, got {fps}")));
    }
    Ok(1.0 / fps)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Schema => {
            let schema = SpectrumConfig::schema();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&schema)?);
            } else if let Some(entries) = schema.as_object() {
                for (name, entry) in entries {
                    println!(
                        "{name:<16} {:<8} default {:<12} {}",
                        entry["type"].as_str().unwrap_or("?"),
                        entry["default"].to_string(),
                        entry["description"].as_str().unwrap_or("")
                    );
                }
            }
        }
        Command::Defaults => {
            let defaults = SpectrumConfig::default().to_json();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&defaults)?);
            } else if let Some(entries) = defaults.as_object() {
                for (name, value) in entries {
                    println!("{name} = {value}");
                }
            }
        }
        Command::Render {
            ticks,
            fps,
            params,
            config,
            seed,
            dimension,
            out_dir,
        } => {
            let params = load_params(params.as_deref(), config.as_deref())?;
            let dt = frame_delta(fps)?;

            let mut spectrum = SpectrumConfig::from_json(&params);
            if let Some(seed) = seed {
                spectrum.seed = seed;
            }
            if let Some(dimension) = dimension {
                spectrum.dimension = dimension;
            }

            let mut sim = OceanSimulator::new(spectrum)?;
            info!("simulating {ticks} ticks at {fps} fps");
            (0..ticks).try_for_each(|_| sim.tick(dt))?;

            let height = sim.height_map();
            let normal = sim.normal_map();
            let written = write_maps(
                &out_dir,
                &[
                    (height.as_ref(), Encoding::Height),
                    (normal.as_ref(), Encoding::Normal),
                    (height.as_ref(), Encoding::Displacement),
                ],
            )?;

            let height_stats = height.channel_stats(CHANNEL_HEIGHT);
            let fold_stats = normal.channel_stats(CHANNEL_FOLD);
            if cli.json {
                let info = json!({
                    "config": sim.params(),
                    "ticks": ticks,
                    "simulated_time": sim.simulated_time(),
                    "generation": sim.generation(),
                    "height": {
                        "min": height_stats.min,
                        "max": height_stats.max,
                        "mean": height_stats.mean,
                        "variance": height_stats.variance,
                        "finite": height_stats.finite,
                    },
                    "max_fold": fold_stats.max,
                    "outputs": written.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                let n = sim.config().dimension;
                eprintln!(
                    "rendered {n}x{n} ocean ({ticks} ticks, t = {:.3}s, seed {}) -> {}",
                    sim.simulated_time(),
                    sim.config().seed,
                    out_dir.display()
                );
                eprintln!(
                    "height {:.3}..{:.3} (variance {:.4}), max fold {:.3}",
                    height_stats.min, height_stats.max, height_stats.variance, fold_stats.max
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verbose_flag_counts() {
        let cli = Cli::try_parse_from(["wavefield", "-vv", "schema"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn params_and_config_conflict() {
        let parsed = Cli::try_parse_from([
            "wavefield",
            "render",
            "--params",
            "{}",
            "--config",
            "ocean.json",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn load_params_defaults_to_empty_object() {
        assert_eq!(load_params(None, None).unwrap(), json!({}));
    }

    #[test]
    fn load_params_rejects_malformed_json() {
        let err = load_params(Some("{wind"), None).unwrap_err();
        assert_eq!(err.exit_code(), 12);
        let err = load_params(Some("[1, 2]"), None).unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn load_params_reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ocean.json");
        std::fs::write(&path, r#"{"wind_speed": 42.0}"#).unwrap();
        let params = load_params(None, Some(&path)).unwrap();
        assert_eq!(SpectrumConfig::from_json(&params).wind_speed, 42.0);
    }

    #[test]
    fn load_params_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_params(None, Some(&dir.path().join("absent.json"))).unwrap_err();
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn frame_delta_rejects_non_positive_fps() {
        assert_eq!(frame_delta(0.0).unwrap_err().exit_code(), 12);
        assert_eq!(frame_delta(f32::NAN).unwrap_err().exit_code(), 12);
        assert_eq!(frame_delta(25.0).unwrap(), 0.04);
    }

    #[test]
    fn render_writes_three_maps() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_str().unwrap();
        let cli = Cli::try_parse_from([
            "wavefield",
            "render",
            "--ticks",
            "2",
            "--dimension",
            "32",
            "--params",
            r#"{"patch_length": 200, "wind_speed": 30}"#,
            "--out-dir",
            out,
        ])
        .unwrap();
        run(cli).unwrap();
        for name in ["height.png", "normal.png", "displacement.png"] {
            assert!(dir.path().join(name).is_file(), "{name} missing");
        }
    }

    #[test]
    fn render_with_invalid_dimension_is_simulation_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "wavefield",
            "render",
            "--dimension",
            "100",
            "--out-dir",
            dir.path().to_str().unwrap(),
        ])
        .unwrap();
        assert_eq!(run(cli).unwrap_err().exit_code(), 10);
    }
}
