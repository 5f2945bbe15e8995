/*
 * Simulation Module
 *
 * This module owns the whole simulation state: the darts, the spatial grid
 * that buckets them, the checkpoint registry and the random generator used
 * to scatter darts.
 *
 * A tick updates the darts one after another in index order, and each dart
 * is moved and re-registered in the grid before the next one steers. Dart i
 * therefore sees darts j < i at their new positions and darts j > i at
 * their old ones within the same tick.
 */

use nannou::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::checkpoint::{CheckpointRegistry, Polarity};
use crate::dart::{wrap_heading, Dart};
use crate::params::{ConfigError, SimulationParams};
use crate::spatial_grid::{CellCoord, GridError, SpatialGrid};
use crate::steering::{decide_turn, Steering};

pub struct Simulation {
    params: SimulationParams,
    darts: Vec<Dart>,
    grid: SpatialGrid,
    checkpoints: CheckpointRegistry,
    rng: StdRng,
    ticks: u64,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::scattered(SimulationParams::default())
    }
}

impl Simulation {
    /// Validates `params` and scatters `params.num_darts` darts over the plane.
    pub fn new(params: SimulationParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self::scattered(params))
    }

    /// Starts from an explicit population of `(position, heading)` pairs.
    pub fn with_darts<I>(params: SimulationParams, placements: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (Point2, f32)>,
    {
        params.validate()?;
        let placements: Vec<(Point2, f32)> = placements.into_iter().collect();
        let in_plane = |v: f32| (-1.0..1.0).contains(&v);
        if placements
            .iter()
            .any(|(p, heading)| !in_plane(p.x) || !in_plane(p.y) || !heading.is_finite())
        {
            return Err(ConfigError::InvalidConfig(
                "dart positions must lie in [-1, 1) with finite headings",
            ));
        }

        let placements = placements
            .into_iter()
            .map(|(position, heading)| (position, wrap_heading(heading)))
            .collect();

        let mut simulation = Self::empty(params);
        simulation.populate(placements);
        Ok(simulation)
    }

    fn empty(params: SimulationParams) -> Self {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            grid: SpatialGrid::new(params.subdivisions),
            checkpoints: CheckpointRegistry::new(params.checkpoint_coef),
            darts: Vec::with_capacity(params.num_darts),
            params,
            rng,
            ticks: 0,
        }
    }

    fn scattered(params: SimulationParams) -> Self {
        let mut simulation = Self::empty(params);
        simulation.scatter();
        log::info!(
            "Scattered {} darts over a {}x{} grid (seed {:?})",
            simulation.darts.len(),
            simulation.params.subdivisions,
            simulation.params.subdivisions,
            simulation.params.seed
        );
        simulation
    }

    fn scatter(&mut self) {
        let placements: Vec<(Point2, f32)> = (0..self.params.num_darts)
            .map(|_| Dart::random_placement(&mut self.rng))
            .collect();
        self.populate(placements);
    }

    // Replace the population and rebuild the grid from it
    fn populate(&mut self, placements: Vec<(Point2, f32)>) {
        self.darts.clear();
        self.grid.clear();
        for (index, (position, heading)) in placements.into_iter().enumerate() {
            let cell = self.grid.cell_of(position);
            self.grid.insert(index, cell);
            self.darts.push(Dart::new(position, heading, cell));
        }
    }

    /// Scatters a fresh population. Checkpoints are kept.
    pub fn reset_darts(&mut self) {
        self.scatter();
        self.ticks = 0;
        log::info!("Reset {} darts", self.darts.len());
    }

    pub fn add_checkpoint(&mut self, position: Point2, polarity: Polarity) {
        let checkpoint = self.checkpoints.add(position, polarity);
        log::info!(
            "Placed {:?} checkpoint at ({:.3}, {:.3}) with coefficient {}",
            polarity,
            position.x,
            position.y,
            checkpoint.coef
        );
    }

    /// Advances every dart by one tick, steering against `pointer`.
    pub fn step(&mut self, pointer: Point2) -> Result<(), GridError> {
        let mut migrations = 0;
        for index in 0..self.darts.len() {
            if self.step_dart(index, pointer)? {
                migrations += 1;
            }
        }
        self.ticks += 1;
        log::debug!(
            "tick {}: {} of {} darts changed cell",
            self.ticks,
            migrations,
            self.darts.len()
        );
        Ok(())
    }

    // Returns whether the dart moved to another cell
    fn step_dart(&mut self, index: usize, pointer: Point2) -> Result<bool, GridError> {
        let want = Steering::new(&self.params, &self.darts, &self.grid, &self.checkpoints)
            .desired_direction(index, pointer);

        let dart = &mut self.darts[index];
        dart.turn(decide_turn(dart.lateral(), want), self.params.angle_step);
        dart.advance(self.params.speed);

        let cell = self.grid.cell_of(dart.position);
        if cell == dart.cell {
            return Ok(false);
        }
        self.grid.relocate(index, dart.cell, cell)?;
        dart.cell = cell;
        Ok(true)
    }

    /// Checks that every dart caches the cell of its position and is listed
    /// in exactly that cell.
    pub fn check_consistency(&self) -> Result<(), GridError> {
        let mut counts = vec![0usize; self.darts.len()];
        let subdivisions = self.grid.subdivisions();
        for cy in 0..subdivisions {
            for cx in 0..subdivisions {
                let cell = CellCoord::new(cx, cy);
                for &member in self.grid.members(cell) {
                    match counts.get_mut(member) {
                        Some(count) => *count += 1,
                        None => return Err(GridError::UnknownMember { dart: member, cell }),
                    }
                }
            }
        }

        for (dart_index, dart) in self.darts.iter().enumerate() {
            let actual = self.grid.cell_of(dart.position);
            if actual != dart.cell {
                return Err(GridError::StaleCell {
                    dart: dart_index,
                    cached: dart.cell,
                    actual,
                });
            }
            if counts[dart_index] != 1 {
                return Err(GridError::MembershipCount {
                    dart: dart_index,
                    count: counts[dart_index],
                });
            }
            if !self.grid.members(dart.cell).contains(&dart_index) {
                return Err(GridError::MissingMember {
                    dart: dart_index,
                    cell: dart.cell,
                });
            }
        }
        Ok(())
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn darts(&self) -> &[Dart] {
        &self.darts
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn checkpoints(&self) -> &CheckpointRegistry {
        &self.checkpoints
    }

    /// Ticks completed since the population was last scattered.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
