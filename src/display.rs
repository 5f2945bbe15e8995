/*
 * Display Geometry Module
 *
 * Builds the triangles the renderer draws, in simulation coordinates.
 * Darts are thin triangles with their tip at the dart's position; the body
 * trails along the heading vector, behind the direction of travel.
 * Checkpoints are small triangle fans, split by polarity so each group can be
 * drawn in one colour.
 */

use nannou::prelude::*;
use std::f32::consts::TAU;

use crate::checkpoint::{CheckpointRegistry, Polarity};
use crate::dart::Dart;
use crate::params::DisplayParams;

/// Triangles per checkpoint fan.
pub const CIRCLE_TRIANGLES: usize = 10;

pub type Triangle = [Point2; 3];

pub fn dart_triangle(dart: &Dart, length: f32, width: f32) -> Triangle {
    let p = dart.position;
    let (sin, cos) = dart.heading.sin_cos();
    [
        p,
        pt2(p.x + length * cos - width * sin, p.y + length * sin + width * cos),
        pt2(p.x + length * cos + width * sin, p.y + length * sin - width * cos),
    ]
}

pub fn dart_triangles(darts: &[Dart], display: &DisplayParams) -> Vec<Triangle> {
    darts
        .iter()
        .map(|dart| dart_triangle(dart, display.dart_length, display.dart_width))
        .collect()
}

fn fan(center: Point2, radius: f32) -> impl Iterator<Item = Triangle> {
    (0..CIRCLE_TRIANGLES).map(move |i| {
        let angle = i as f32 * TAU / CIRCLE_TRIANGLES as f32;
        let next = (i + 1) as f32 * TAU / CIRCLE_TRIANGLES as f32;
        [
            center + vec2(angle.cos(), angle.sin()) * radius,
            center + vec2(next.cos(), next.sin()) * radius,
            center,
        ]
    })
}

/// Checkpoint fans grouped by polarity.
pub struct CheckpointFans {
    pub attract: Vec<Triangle>,
    pub repel: Vec<Triangle>,
}

pub fn checkpoint_fans(registry: &CheckpointRegistry, radius: f32) -> CheckpointFans {
    let mut fans = CheckpointFans {
        attract: Vec::with_capacity(registry.positives() * CIRCLE_TRIANGLES),
        repel: Vec::with_capacity(registry.negatives() * CIRCLE_TRIANGLES),
    };
    for checkpoint in registry {
        let target = match checkpoint.polarity {
            Polarity::Attract => &mut fans.attract,
            Polarity::Repel => &mut fans.repel,
        };
        target.extend(fan(checkpoint.position, radius));
    }
    fans
}
