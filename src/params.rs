/*
 * Simulation Parameters Module
 *
 * This module defines the parameter structs for the dart simulation.
 * Parameters are fixed once the simulation starts; they can be overridden
 * at startup from a JSON file or the command line (see the config module).
 *
 * SimulationParams drives the steering core, DisplayParams only affects
 * how darts and checkpoints are drawn.
 */

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest accepted grid resolution per axis.
pub const MAX_SUBDIVISIONS: usize = 1024;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

// Parameters of the steering simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub num_darts: usize,
    pub subdivisions: usize,
    pub speed: f32,
    pub angle_step: f32,
    pub neighbor_radius: f32,
    pub flee_radius: f32,
    // Steering weights; zero disables a term
    pub cursor_coef: f32,
    pub other_coef: f32,
    pub flee_coef: f32,
    pub checkpoint_coef: f32,
    /// Seed for the initial layout; drawn from entropy when absent.
    pub seed: Option<u64>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_darts: 100,
            subdivisions: 50,
            speed: 0.02,
            angle_step: 0.05,
            neighbor_radius: 0.1,
            flee_radius: 0.05,
            cursor_coef: 0.0,
            other_coef: 0.1,
            flee_coef: 0.2,
            checkpoint_coef: 0.3,
            seed: None,
        }
    }
}

impl SimulationParams {
    /// Same defaults with every steering weight set to zero.
    pub fn without_steering() -> Self {
        Self {
            cursor_coef: 0.0,
            other_coef: 0.0,
            flee_coef: 0.0,
            checkpoint_coef: 0.0,
            ..Self::default()
        }
    }

    pub fn neighbors_enabled(&self) -> bool {
        self.other_coef != 0.0 || self.flee_coef != 0.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.subdivisions == 0 || self.subdivisions > MAX_SUBDIVISIONS {
            return Err(ConfigError::InvalidConfig("subdivisions must be within [1, 1024]"));
        }
        // Wrapping only undoes a single crossing of the plane per tick
        if !self.speed.is_finite() || self.speed < 0.0 || self.speed >= 2.0 {
            return Err(ConfigError::InvalidConfig("speed must be within [0, 2)"));
        }
        if !self.angle_step.is_finite() || self.angle_step.abs() >= std::f32::consts::TAU {
            return Err(ConfigError::InvalidConfig("angle_step must be below a full turn"));
        }
        if !self.neighbor_radius.is_finite() || self.neighbor_radius < 0.0 {
            return Err(ConfigError::InvalidConfig("neighbor_radius must be non-negative"));
        }
        if !self.flee_radius.is_finite() || self.flee_radius < 0.0 {
            return Err(ConfigError::InvalidConfig("flee_radius must be non-negative"));
        }
        if self.flee_radius > self.neighbor_radius {
            return Err(ConfigError::InvalidConfig("flee_radius must not exceed neighbor_radius"));
        }
        let coefs = [
            self.cursor_coef,
            self.other_coef,
            self.flee_coef,
            self.checkpoint_coef,
        ];
        if coefs.iter().any(|coef| !coef.is_finite()) {
            return Err(ConfigError::InvalidConfig("steering coefficients must be finite"));
        }
        Ok(())
    }
}

// Parameters used only when drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayParams {
    pub window_size: u32,
    pub dart_length: f32,
    pub dart_width: f32,
    pub checkpoint_radius: f32,
    /// Opacity of the background wash drawn each frame; below 1.0 leaves trails.
    pub trail_alpha: f32,
}

impl Default for DisplayParams {
    fn default() -> Self {
        Self {
            window_size: 640,
            dart_length: 0.05,
            dart_width: 0.01,
            checkpoint_radius: 0.03,
            trail_alpha: 0.5,
        }
    }
}

impl DisplayParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::InvalidConfig("window_size must be positive"));
        }
        if !(0.0..=1.0).contains(&self.trail_alpha) {
            return Err(ConfigError::InvalidConfig("trail_alpha must be within [0, 1]"));
        }
        Ok(())
    }
}
