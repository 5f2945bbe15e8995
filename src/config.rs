/*
 * Configuration Module
 *
 * Startup configuration: command-line arguments and an optional JSON file.
 * Every field of the file is optional and falls back to the defaults in the
 * params module; command-line flags override the file.
 *
 * Example file:
 *   { "simulation": { "num_darts": 400, "cursor_coef": 0.05 },
 *     "display": { "trail_alpha": 0.2 } }
 */

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::params::{DisplayParams, SimulationParams};

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Darts steering simulation", long_about = None)]
pub struct Args {
    /// JSON file overriding simulation and display parameters
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of darts to scatter at startup
    #[arg(short = 'n', long)]
    pub darts: Option<usize>,

    /// Seed for the initial dart layout
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationParams,
    pub display: DisplayParams,
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("malformed configuration JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in config file {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        self.simulation
            .validate()
            .context("invalid simulation parameters")?;
        self.display.validate().context("invalid display parameters")?;
        Ok(())
    }
}

impl Args {
    /// Loads the config file if one was given, applies flag overrides and
    /// validates the result.
    pub fn resolve(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(darts) = self.darts {
            config.simulation.num_darts = darts;
        }
        if let Some(seed) = self.seed {
            config.simulation.seed = Some(seed);
        }
        config.validate()?;
        log::info!(
            "Configuration: {} darts, {} subdivisions, seed {:?}",
            config.simulation.num_darts,
            config.simulation.subdivisions,
            config.simulation.seed
        );
        Ok(config)
    }
}
