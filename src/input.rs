/*
 * Input Module
 *
 * This module handles user input for the dart simulation.
 *
 * Features:
 * - Converting window coordinates into the simulation's [-1, 1) plane
 * - Left click places an attracting checkpoint, right click a repelling one
 * - Forwarding raw window events to egui
 */

use nannou::prelude::*;
use nannou::winit::event::MouseButton;

use crate::app::Model;
use crate::checkpoint::Polarity;

/// Maps a point in nannou window coordinates (origin at the centre, y up)
/// onto the simulation plane.
pub fn normalize_pointer(position: Point2, window_rect: Rect) -> Point2 {
    let half_width = (window_rect.w() / 2.0).max(f32::EPSILON);
    let half_height = (window_rect.h() / 2.0).max(f32::EPSILON);
    pt2(
        (position.x - window_rect.x()) / half_width,
        (position.y - window_rect.y()) / half_height,
    )
}

/// Maps a point of the simulation plane into window coordinates.
pub fn to_window(position: Point2, window_rect: Rect) -> Point2 {
    pt2(
        window_rect.x() + position.x * window_rect.w() / 2.0,
        window_rect.y() + position.y * window_rect.h() / 2.0,
    )
}

pub fn polarity_for(button: MouseButton) -> Option<Polarity> {
    match button {
        MouseButton::Left => Some(Polarity::Attract),
        MouseButton::Right => Some(Polarity::Repel),
        _ => None,
    }
}

// Mouse pressed event handler
pub fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    // Clicks on the control panel belong to egui
    if model.egui.ctx().is_pointer_over_area() {
        return;
    }
    if let Some(polarity) = polarity_for(button) {
        let position = normalize_pointer(app.mouse.position(), app.window_rect());
        model.simulation.add_checkpoint(position, polarity);
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
