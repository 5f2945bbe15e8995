/*
 * Renderer Module
 *
 * This module draws the dart simulation. Geometry comes from the display
 * module in simulation coordinates and is scaled to the window here.
 *
 * Instead of clearing, each frame washes the previous image with a
 * translucent background quad, so moving darts leave fading trails.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::display::{self, Triangle};
use crate::input::to_window;

const BACKGROUND: (f32, f32, f32) = (0.4, 0.3, 0.4);

fn draw_triangles(draw: &Draw, triangles: &[Triangle], window_rect: Rect, color: Rgba) {
    for &[a, b, c] in triangles {
        draw.tri()
            .points(
                to_window(a, window_rect),
                to_window(b, window_rect),
                to_window(c, window_rect),
            )
            .color(color);
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();
    let (r, g, b) = BACKGROUND;

    if frame.nth() == 0 {
        draw.background().color(rgb(r, g, b));
    } else {
        draw.rect()
            .xy(window_rect.xy())
            .wh(window_rect.wh())
            .color(rgba(r, g, b, model.display.trail_alpha));
    }

    let darts = display::dart_triangles(model.simulation.darts(), &model.display);
    draw_triangles(&draw, &darts, window_rect, rgba(1.0, 0.5, 0.2, 1.0));

    let checkpoints = model.simulation.checkpoints();
    if !checkpoints.is_empty() {
        let fans = display::checkpoint_fans(checkpoints, model.display.checkpoint_radius);
        draw_triangles(&draw, &fans.attract, window_rect, rgba(0.0, 1.0, 0.0, 1.0));
        draw_triangles(&draw, &fans.repel, window_rect, rgba(1.0, 0.0, 0.0, 1.0));
    }

    // Finish drawing
    draw.to_frame(app, &frame).unwrap();

    // Draw the egui UI
    model.egui.draw_to_frame(&frame).unwrap();
}
