/*
 * Application Module
 *
 * This module defines the nannou application model for the dart simulation.
 * It creates the window, polls the pointer once per frame, runs one
 * simulation step per frame and hands the result to the renderer.
 *
 * The simulation has no clock of its own: it advances exactly one step per
 * frame, so its pace follows the frame rate.
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use std::sync::OnceLock;
use std::time::Instant;

use crate::config::Config;
use crate::debug::DebugInfo;
use crate::input;
use crate::params::DisplayParams;
use crate::renderer;
use crate::simulation::Simulation;
use crate::ui;

// nannou builds the model from a plain function, so the startup
// configuration is handed over through this cell.
static CONFIG: OnceLock<Config> = OnceLock::new();

// Main model for the application
pub struct Model {
    pub simulation: Simulation,
    pub display: DisplayParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    /// Pointer position on the simulation plane.
    pub pointer: Point2,
    pub paused: bool,
}

/// Runs the windowed simulation with `config` until the window is closed.
pub fn run(config: Config) {
    if CONFIG.set(config).is_err() {
        log::warn!("Application already configured; keeping the first configuration");
    }
    nannou::app(model).update(update).run();
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let config = CONFIG.get().cloned().unwrap_or_default();
    let size = config.display.window_size;

    let window_id = app
        .new_window()
        .title("Darts")
        .size(size, size)
        .view(renderer::view)
        .mouse_pressed(input::mouse_pressed)
        .raw_event(input::raw_window_event)
        .build()
        .expect("Failed to create window");
    let window = app.window(window_id).expect("Window was just created");
    let egui = Egui::from_window(&window);

    let simulation = Simulation::new(config.simulation).unwrap_or_else(|err| {
        log::error!("{}; falling back to default parameters", err);
        Simulation::default()
    });

    Model {
        simulation,
        display: config.display,
        egui,
        debug_info: DebugInfo::default(),
        pointer: Point2::ZERO,
        paused: false,
    }
}

pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;
    model.egui.set_elapsed_time(update.since_start);

    let actions = ui::update_ui(
        &mut model.egui,
        &mut model.paused,
        &model.simulation,
        &model.debug_info,
    );
    if actions.reset_darts {
        model.simulation.reset_darts();
    }
    if model.paused {
        return;
    }

    model.pointer = input::normalize_pointer(app.mouse.position(), app.window_rect());

    let started = Instant::now();
    if let Err(err) = model.simulation.step(model.pointer) {
        log::error!("Simulation state is corrupt, stopping: {}", err);
        app.quit();
        return;
    }
    model.debug_info.step_time = started.elapsed();
}
