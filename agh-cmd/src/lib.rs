//! Command implementations for the Alaska Garden Helper CLI.
//!
//! One subcommand per dashboard view. Each command loads the ERA and the
//! selected model series, aggregates them and writes a JSON document to
//! stdout or to `--output`.

use agh_core::loader::LoaderConfig;
use agh_core::{Scenario, YearSpan};
use clap::Subcommand;
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub mod charts;
pub mod summary;

/// Historical years shown for the ERA reanalysis.
pub const ERA_PERIOD: YearSpan = YearSpan::new(1980, 2009);
/// Projected years shown for a model.
pub const MODEL_PERIOD: YearSpan = YearSpan::new(2010, 2099);
/// Length of a climatological window, in years.
pub const CLIMATE_WINDOW: i32 = 30;

#[derive(Subcommand)]
pub enum Command {
    /// Length and timing of the growing season per decade
    GrowingSeason {
        /// Community name (e.g. "Fairbanks")
        #[arg(short, long)]
        community: String,

        /// Daily minimum temperature that must be exceeded, °F
        #[arg(short, long, default_value_t = 32, allow_negative_numbers = true)]
        threshold: i32,

        /// Projection to compare with ERA (GFDL or NCAR)
        #[arg(short, long, default_value = "GFDL")]
        model: Scenario,

        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Coldest daily minimum per day of year over 30-year windows
    AnnualMin {
        #[arg(short, long)]
        community: String,

        #[arg(short, long, default_value = "GFDL")]
        model: Scenario,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Cumulative growing degree days per decade
    Gdd {
        #[arg(short, long)]
        community: String,

        /// Baseline daily mean temperature, °F
        #[arg(short, long, default_value_t = 32, allow_negative_numbers = true)]
        baseline: i32,

        #[arg(short, long, default_value = "GFDL")]
        model: Scenario,

        /// Shift model means toward ERA over the 1980-2010 baseline
        #[arg(long)]
        bias_correct: bool,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// USDA hardiness zone for the ERA period and each model window
    Hardiness {
        #[arg(short, long)]
        community: String,

        #[arg(short, long, default_value = "GFDL")]
        model: Scenario,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the communities with published series
    Communities {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub async fn run(command: Command, config: LoaderConfig) -> anyhow::Result<()> {
    match command {
        Command::GrowingSeason {
            community,
            threshold,
            model,
            output,
        } => charts::run_growing_season(&config, &community, threshold, model, output.as_deref()).await,
        Command::AnnualMin {
            community,
            model,
            output,
        } => charts::run_annual_min(&config, &community, model, output.as_deref()).await,
        Command::Gdd {
            community,
            baseline,
            model,
            bias_correct,
            output,
        } => {
            charts::run_gdd(&config, &community, baseline, model, bias_correct, output.as_deref()).await
        }
        Command::Hardiness {
            community,
            model,
            output,
        } => summary::run_hardiness(&config, &community, model, output.as_deref()).await,
        Command::Communities { output } => summary::run_communities(output.as_deref()),
    }
}

/// Model scenarios only; ERA is always loaded as the reference.
pub(crate) fn ensure_model(model: Scenario) -> anyhow::Result<()> {
    if model.is_reference() {
        anyhow::bail!(
            "{} is the reference dataset; choose a model ({:?})",
            model,
            Scenario::MODELS.map(|m| m.tag())
        );
    }
    Ok(())
}

/// Serialize `value` as pretty JSON to `output`, or to stdout.
pub fn write_output<T: Serialize>(value: &T, output: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path.display(), e))?;
            info!("Output: {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods() {
        assert_eq!(ERA_PERIOD.windows(10).len(), 3);
        assert_eq!(MODEL_PERIOD.windows(10).len(), 9);
        assert_eq!(MODEL_PERIOD.windows(CLIMATE_WINDOW).len(), 3);
    }

    #[test]
    fn test_ensure_model() {
        assert!(ensure_model(Scenario::Gfdl).is_ok());
        assert!(ensure_model(Scenario::Era).is_err());
    }

    #[test]
    fn test_write_output_to_file() {
        let path = std::env::temp_dir().join(format!("agh-cmd-out-{}.json", std::process::id()));
        write_output(&vec![1, 2, 3], Some(&path)).unwrap();
        let back: Vec<i32> = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, vec![1, 2, 3]);
        let _ = std::fs::remove_file(path);
    }
}
