/*
 * Darts Simulation - Module Definitions
 *
 * This file defines the module structure for the dart simulation.
 * The simulation core (grid, darts, checkpoints, steering, simulation) does
 * not depend on the windowing modules (app, input, renderer, ui, debug).
 */

// Re-export key components for easier access
pub use checkpoint::{Checkpoint, CheckpointRegistry, Polarity};
pub use config::{Args, Config};
pub use dart::{Dart, Turn};
pub use params::{ConfigError, DisplayParams, SimulationParams};
pub use simulation::Simulation;
pub use spatial_grid::{CellCoord, GridError, SpatialGrid};
pub use steering::{Steering, MIN_DISTANCE};

// Simulation core
pub mod checkpoint;
pub mod dart;
pub mod params;
pub mod simulation;
pub mod spatial_grid;
pub mod steering;

// Startup configuration and display geometry
pub mod config;
pub mod display;

// Windowed host
pub mod app;
pub mod debug;
pub mod input;
pub mod renderer;
pub mod ui;
