/*
 * Steering Module
 *
 * Pure steering computations. For one dart this module sums the pull of
 * the pointer, the pull or push of every checkpoint and the influence of
 * nearby darts into a desired direction, then turns that direction into a
 * bang-bang turn decision.
 *
 * Only the sign of the desired direction against the dart's lateral axis
 * matters for the turn; its magnitude is irrelevant.
 */

use nannou::prelude::*;

use crate::checkpoint::{Checkpoint, CheckpointRegistry};
use crate::dart::{Dart, Turn};
use crate::params::SimulationParams;
use crate::spatial_grid::SpatialGrid;

/// Floor applied to every distance used as a divisor.
pub const MIN_DISTANCE: f32 = 0.001;

#[inline]
fn floored_length(v: Vec2) -> f32 {
    let length = v.length().max(MIN_DISTANCE);
    debug_assert!(length >= MIN_DISTANCE, "unfloored divisor {}", length);
    length
}

/// Unit pull towards the pointer, scaled by `coef`.
pub fn cursor_pull(position: Point2, pointer: Point2, coef: f32) -> Vec2 {
    if coef == 0.0 {
        return Vec2::ZERO;
    }
    let towards = pointer - position;
    towards * (coef / floored_length(towards))
}

/// Inverse-square pull of every checkpoint; repelling ones push away.
pub fn checkpoint_pull(position: Point2, checkpoints: &[Checkpoint]) -> Vec2 {
    checkpoints
        .iter()
        .filter(|checkpoint| checkpoint.coef != 0.0)
        .fold(Vec2::ZERO, |acc, checkpoint| {
            let towards = checkpoint.position - position;
            let distance = floored_length(towards);
            acc + towards * (checkpoint.coef / distance / distance)
        })
}

/// Read-only view of the world that a dart steers against.
pub struct Steering<'a> {
    pub params: &'a SimulationParams,
    pub darts: &'a [Dart],
    pub grid: &'a SpatialGrid,
    pub checkpoints: &'a CheckpointRegistry,
}

impl<'a> Steering<'a> {
    pub fn new(
        params: &'a SimulationParams,
        darts: &'a [Dart],
        grid: &'a SpatialGrid,
        checkpoints: &'a CheckpointRegistry,
    ) -> Self {
        Self {
            params,
            darts,
            grid,
            checkpoints,
        }
    }

    /// Sum of all steering terms for the dart at `index`.
    pub fn desired_direction(&self, index: usize, pointer: Point2) -> Vec2 {
        let position = self.darts[index].position;
        let mut want = cursor_pull(position, pointer, self.params.cursor_coef);
        want += checkpoint_pull(position, self.checkpoints.as_slice());
        if self.params.neighbors_enabled() {
            want += self.neighbor_push(index);
        }
        want
    }

    /// Flee from darts inside the flee radius, otherwise follow the reversed
    /// heading of darts inside the neighbor radius.
    pub fn neighbor_push(&self, index: usize) -> Vec2 {
        let params = self.params;
        let dart = &self.darts[index];
        let flee_sq = params.flee_radius * params.flee_radius;
        let neighbor_sq = params.neighbor_radius * params.neighbor_radius;

        let mut push = Vec2::ZERO;
        for other_index in self.grid.query_neighbors(dart.position, params.neighbor_radius) {
            if other_index == index {
                continue;
            }
            let other = &self.darts[other_index];
            let away = dart.position - other.position;
            let distance_sq = away.length_squared();

            if distance_sq < flee_sq && params.flee_coef > 0.0 {
                push += away * (params.flee_coef / floored_length(away));
            } else if distance_sq < neighbor_sq {
                push -= other.facing() * params.other_coef;
            }
        }
        push
    }
}

/// Bang-bang decision: positive when `want` leans towards the lateral axis,
/// negative otherwise, including when `want` is zero.
pub fn decide_turn(lateral: Vec2, want: Vec2) -> Turn {
    if want.dot(lateral) > 0.0 {
        Turn::Positive
    } else {
        Turn::Negative
    }
}
