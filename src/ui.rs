/*
 * UI Module
 *
 * Control panel built with nannou_egui. Parameters are fixed for the run,
 * so the panel only offers pause and reset and shows live statistics.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::simulation::Simulation;

/// Requests raised by the panel during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiActions {
    pub reset_darts: bool,
}

pub fn update_ui(
    egui: &mut Egui,
    paused: &mut bool,
    simulation: &Simulation,
    debug_info: &DebugInfo,
) -> UiActions {
    let mut actions = UiActions::default();
    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.checkbox(paused, "Pause Simulation");
            if ui.button("Reset Darts").clicked() {
                actions.reset_darts = true;
            }

            ui.collapsing("Statistics", |ui| {
                let checkpoints = simulation.checkpoints();
                ui.label(format!("Darts: {}", simulation.darts().len()));
                ui.label(format!(
                    "Checkpoints: {} (+{} / -{})",
                    checkpoints.len(),
                    checkpoints.positives(),
                    checkpoints.negatives()
                ));
                ui.label(format!("Tick: {}", simulation.ticks()));
                ui.separator();
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_millis()));
                ui.label(format!("Step time: {:.3} ms", debug_info.step_millis()));
            });

            ui.label("Left click: attracting checkpoint");
            ui.label("Right click: repelling checkpoint");
        });

    actions
}
