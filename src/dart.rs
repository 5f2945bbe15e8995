/*
 * Dart Module
 *
 * This module defines the Dart struct: a point agent with a heading that
 * turns at a fixed rate and moves at a fixed speed on the wrap-around
 * [-1, 1) x [-1, 1) plane.
 *
 * A dart travels against its heading vector: it moves by
 * -(cos(heading), sin(heading)) * speed each tick. The lateral axis and the
 * turn sign are defined relative to that convention.
 */

use nannou::prelude::*;
use rand::Rng;
use std::f32::consts::{PI, TAU};

use crate::spatial_grid::CellCoord;

/// Direction of a single bang-bang turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// Heading increases by one angular step.
    Positive,
    /// Heading decreases by one angular step.
    Negative,
}

impl Turn {
    pub fn signum(self) -> f32 {
        match self {
            Turn::Positive => 1.0,
            Turn::Negative => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dart {
    pub position: Point2,
    pub heading: f32,
    /// Grid cell the dart is registered in.
    pub cell: CellCoord,
}

impl Dart {
    pub fn new(position: Point2, heading: f32, cell: CellCoord) -> Self {
        Self {
            position,
            heading,
            cell,
        }
    }

    // Uniform position over the plane, uniform heading over a full turn
    pub fn random_placement<R: Rng>(rng: &mut R) -> (Point2, f32) {
        let x = rng.gen_range(-1.0..1.0);
        let y = rng.gen_range(-1.0..1.0);
        let heading = rng.gen_range(0.0..TAU);
        (pt2(x, y), heading)
    }

    /// Unit vector of the heading angle. The dart moves opposite to it.
    pub fn facing(&self) -> Vec2 {
        vec2(self.heading.cos(), self.heading.sin())
    }

    /// Left-hand axis of the direction of travel; turning positively rotates
    /// the direction of travel towards it.
    pub fn lateral(&self) -> Vec2 {
        let flipped = self.heading + PI;
        vec2(-flipped.sin(), flipped.cos())
    }

    pub fn turn(&mut self, turn: Turn, angle_step: f32) {
        self.heading = normalize_heading(self.heading + turn.signum() * angle_step);
    }

    pub fn advance(&mut self, speed: f32) {
        self.position -= self.facing() * speed;
        self.position = pt2(
            wrap_coordinate(self.position.x),
            wrap_coordinate(self.position.y),
        );
    }
}

/// Brings a heading that drifted by less than a full turn back into (0, 2π].
pub fn normalize_heading(mut heading: f32) -> f32 {
    if heading > TAU {
        heading -= TAU;
    }
    if heading <= 0.0 {
        heading += TAU;
    }
    heading
}

/// Brings any finite heading into (0, 2π].
pub fn wrap_heading(heading: f32) -> f32 {
    let wrapped = heading.rem_euclid(TAU);
    if wrapped <= 0.0 {
        TAU
    } else {
        wrapped
    }
}

/// Wraps a coordinate that left [-1, 1) by less than the domain width.
pub fn wrap_coordinate(mut value: f32) -> f32 {
    if value < -1.0 {
        value += 2.0;
    }
    if value >= 1.0 {
        value -= 2.0;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn dart_at(x: f32, y: f32, heading: f32) -> Dart {
        Dart::new(pt2(x, y), heading, CellCoord::new(0, 0))
    }

    #[test]
    fn test_advance_moves_against_heading() {
        let mut dart = dart_at(0.0, 0.0, 0.0);
        dart.advance(0.1);
        assert_relative_eq!(dart.position.x, -0.1);
        assert_relative_eq!(dart.position.y, 0.0);
    }

    #[test]
    fn test_advance_wraps_each_axis() {
        let mut dart = dart_at(-0.99, 0.99, FRAC_PI_2 / 2.0);
        dart.advance(0.1);
        assert!(dart.position.x >= 0.9 && dart.position.x < 1.0);

        let mut dart = dart_at(0.0, 0.99, -FRAC_PI_2 + TAU);
        dart.advance(0.05);
        assert_relative_eq!(dart.position.y, -0.96, epsilon = 1e-5);
    }

    #[test]
    fn test_wrap_coordinate_bounds() {
        assert_eq!(wrap_coordinate(1.0), -1.0);
        assert_eq!(wrap_coordinate(-1.0), -1.0);
        assert_relative_eq!(wrap_coordinate(-1.25), 0.75);
        assert_relative_eq!(wrap_coordinate(1.25), -0.75);
    }

    #[test]
    fn test_wrap_heading_handles_several_turns() {
        assert_relative_eq!(wrap_heading(100.0), 100.0 - 15.0 * TAU, epsilon = 1e-4);
        assert_relative_eq!(wrap_heading(-0.5), TAU - 0.5, epsilon = 1e-6);
        assert_relative_eq!(wrap_heading(0.0), TAU);
        assert_relative_eq!(wrap_heading(1.0), 1.0);
    }

    #[test]
    fn test_normalize_heading_half_open_range() {
        assert_relative_eq!(normalize_heading(0.0), TAU);
        assert_relative_eq!(normalize_heading(TAU), TAU);
        assert_relative_eq!(normalize_heading(TAU + 0.05), 0.05, epsilon = 1e-6);
        assert_relative_eq!(normalize_heading(-0.05), TAU - 0.05);
    }

    #[test]
    fn test_turn_steps_heading() {
        let mut dart = dart_at(0.0, 0.0, 1.0);
        dart.turn(Turn::Positive, 0.05);
        assert_relative_eq!(dart.heading, 1.05, epsilon = 1e-6);
        dart.turn(Turn::Negative, 0.05);
        dart.turn(Turn::Negative, 0.05);
        assert_relative_eq!(dart.heading, 0.95, epsilon = 1e-6);
    }

    #[test]
    fn test_positive_turn_rotates_travel_towards_lateral() {
        let dart = dart_at(0.0, 0.0, 0.3);
        let travel = -dart.facing();
        let lateral = dart.lateral();
        assert_relative_eq!(travel.dot(lateral), 0.0, epsilon = 1e-6);

        let mut turned = dart;
        turned.turn(Turn::Positive, 0.05);
        assert!((-turned.facing()).dot(lateral) > 0.0);
    }
}
