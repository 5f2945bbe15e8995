/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct for neighbor lookups.
 * The [-1, 1) x [-1, 1) plane is divided into S x S square cells and each
 * cell keeps the indices of the darts currently inside it. The grid never
 * owns dart data: it only holds indices into the simulation's dart list.
 *
 * Neighbor queries are bounded by the grid edges. Positions wrap around the
 * plane, but a dart near one edge does not see darts on the opposite edge.
 */

use nannou::prelude::*;
use std::fmt;
use thiserror::Error;

/// Integer coordinates of a grid cell, both in `[0, S)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub cx: usize,
    pub cy: usize,
}

impl CellCoord {
    pub fn new(cx: usize, cy: usize) -> Self {
        Self { cx, cy }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.cx, self.cy)
    }
}

/// Broken grid invariants. None of these can happen while the simulation
/// keeps the grid and the dart list in lockstep.
#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("dart {dart} is not a member of cell {cell}")]
    MissingMember { dart: usize, cell: CellCoord },
    #[error("dart {dart} caches cell {cached} but its position maps to {actual}")]
    StaleCell {
        dart: usize,
        cached: CellCoord,
        actual: CellCoord,
    },
    #[error("dart {dart} appears in {count} cells")]
    MembershipCount { dart: usize, count: usize },
    #[error("cell {cell} lists dart {dart}, which does not exist")]
    UnknownMember { dart: usize, cell: CellCoord },
}

pub struct SpatialGrid {
    subdivisions: usize,
    cell_size: f32,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(subdivisions: usize) -> Self {
        let subdivisions = subdivisions.max(1);
        let mut cells = Vec::with_capacity(subdivisions * subdivisions);

        // Initialize an empty grid
        for _ in 0..(subdivisions * subdivisions) {
            cells.push(Vec::new());
        }

        Self {
            subdivisions,
            cell_size: 2.0 / subdivisions as f32,
            cells,
        }
    }

    pub fn subdivisions(&self) -> usize {
        self.subdivisions
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Total number of memberships over all cells.
    pub fn len(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Vec::is_empty)
    }

    // Map a position in [-1, 1) to its cell
    #[inline]
    pub fn cell_of(&self, position: Vec2) -> CellCoord {
        CellCoord {
            cx: self.axis_cell(position.x),
            cy: self.axis_cell(position.y),
        }
    }

    // f32 rounding can push a coordinate just below 1.0 onto S
    #[inline]
    fn axis_cell(&self, coordinate: f32) -> usize {
        let scaled = ((coordinate + 1.0) / 2.0 * self.subdivisions as f32).floor();
        (scaled.max(0.0) as usize).min(self.subdivisions - 1)
    }

    #[inline]
    fn index(&self, cell: CellCoord) -> usize {
        cell.cy * self.subdivisions + cell.cx
    }

    pub fn members(&self, cell: CellCoord) -> &[usize] {
        &self.cells[self.index(cell)]
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    #[inline]
    pub fn insert(&mut self, dart: usize, cell: CellCoord) {
        let index = self.index(cell);
        self.cells[index].push(dart);
    }

    /// Removes `dart` from `cell`, keeping the order of the other members.
    pub fn remove(&mut self, dart: usize, cell: CellCoord) -> Result<(), GridError> {
        let index = self.index(cell);
        let members = &mut self.cells[index];
        let slot = members
            .iter()
            .position(|&member| member == dart)
            .ok_or(GridError::MissingMember { dart, cell })?;
        members.remove(slot);
        Ok(())
    }

    /// Moves `dart` from one cell to another.
    pub fn relocate(&mut self, dart: usize, from: CellCoord, to: CellCoord) -> Result<(), GridError> {
        self.remove(dart, from)?;
        self.insert(dart, to);
        Ok(())
    }

    /// Every dart whose cell could hold a point within `radius` of `center`.
    ///
    /// The result is conservative: it never misses a dart within `radius`,
    /// but may contain darts farther away, and it contains the dart sitting
    /// at `center` itself if there is one. Callers filter by true distance.
    pub fn query_neighbors(&self, center: Vec2, radius: f32) -> impl Iterator<Item = usize> + '_ {
        self.cells_near(center, radius)
            .flat_map(move |cell| self.members(cell).iter().copied())
    }

    /// Cells within `ceil(radius / cell_size)` steps of the center's cell,
    /// clamped to the grid, minus those whose nearest point is out of reach.
    pub fn cells_near(&self, center: Vec2, radius: f32) -> impl Iterator<Item = CellCoord> + '_ {
        let home = self.cell_of(center);
        let last = self.subdivisions as isize - 1;
        // Any reach beyond the grid width covers the whole grid
        let span = ((radius.max(0.0) / self.cell_size).ceil() as isize).min(last + 1);

        let min_x = (home.cx as isize - span).max(0);
        let max_x = (home.cx as isize + span).min(last);
        let min_y = (home.cy as isize - span).max(0);
        let max_y = (home.cy as isize + span).min(last);
        let radius_sq = radius * radius;

        (min_y..=max_y)
            .flat_map(move |cy| {
                (min_x..=max_x).map(move |cx| CellCoord::new(cx as usize, cy as usize))
            })
            .filter(move |&cell| {
                cell == home || self.nearest_distance_sq(cell, center) <= radius_sq
            })
    }

    // Squared distance from `point` to the closest point of `cell`
    fn nearest_distance_sq(&self, cell: CellCoord, point: Vec2) -> f32 {
        let min_x = cell.cx as f32 * self.cell_size - 1.0;
        let min_y = cell.cy as f32 * self.cell_size - 1.0;
        let dx = point.x - point.x.max(min_x).min(min_x + self.cell_size);
        let dy = point.y - point.y.max(min_y).min(min_y + self.cell_size);
        dx * dx + dy * dy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_cell_of_maps_corners() {
        let grid = SpatialGrid::new(50);
        assert_eq!(grid.cell_of(vec2(-1.0, -1.0)), CellCoord::new(0, 0));
        assert_eq!(grid.cell_of(vec2(0.0, 0.0)), CellCoord::new(25, 25));
        assert_eq!(grid.cell_of(vec2(0.999, -0.999)), CellCoord::new(49, 0));
    }

    #[test]
    fn test_cell_of_never_leaves_grid() {
        let grid = SpatialGrid::new(50);
        let below_one = 1.0f32 - f32::EPSILON / 2.0;
        assert_eq!(grid.cell_of(vec2(below_one, below_one)), CellCoord::new(49, 49));
        assert_eq!(grid.cell_of(vec2(1.0, 1.0)), CellCoord::new(49, 49));
    }

    #[test]
    fn test_insert_and_remove() {
        let mut grid = SpatialGrid::new(4);
        let cell = CellCoord::new(1, 2);
        grid.insert(7, cell);
        grid.insert(3, cell);
        grid.insert(9, cell);
        assert_eq!(grid.members(cell), &[7, 3, 9]);

        grid.remove(3, cell).unwrap();
        assert_eq!(grid.members(cell), &[7, 9]);
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_remove_missing_member_fails() {
        let mut grid = SpatialGrid::new(4);
        let cell = CellCoord::new(0, 0);
        grid.insert(1, cell);

        let err = grid.remove(2, cell).unwrap_err();
        assert_eq!(err, GridError::MissingMember { dart: 2, cell });
        assert_eq!(grid.members(cell), &[1]);
    }

    #[test]
    fn test_relocate_moves_membership() {
        let mut grid = SpatialGrid::new(4);
        let from = CellCoord::new(0, 0);
        let to = CellCoord::new(3, 3);
        grid.insert(5, from);

        grid.relocate(5, from, to).unwrap();
        assert!(grid.members(from).is_empty());
        assert_eq!(grid.members(to), &[5]);
    }

    #[test]
    fn test_query_is_clamped_at_edges() {
        let mut grid = SpatialGrid::new(10);
        grid.insert(0, grid.cell_of(vec2(-0.95, 0.0)));
        // Just across the wrap seam, but the query does not wrap
        grid.insert(1, grid.cell_of(vec2(0.95, 0.0)));

        let found: Vec<usize> = grid.query_neighbors(vec2(-0.95, 0.0), 0.2).collect();
        assert_eq!(found, vec![0]);
    }

    #[test]
    fn test_query_wider_than_plane_returns_everything() {
        let mut grid = SpatialGrid::new(50);
        grid.insert(0, grid.cell_of(vec2(-0.99, -0.99)));
        grid.insert(1, grid.cell_of(vec2(0.99, 0.99)));
        grid.insert(2, grid.cell_of(vec2(0.5, 0.5)));

        let mut found: Vec<usize> = grid.query_neighbors(vec2(0.5, 0.5), 1e20).collect();
        found.sort_unstable();
        assert_eq!(found, vec![0, 1, 2]);
        assert_eq!(grid.cells_near(vec2(0.5, 0.5), f32::MAX).count(), 50 * 50);
    }

    #[test]
    fn test_query_prunes_far_cells() {
        let grid = SpatialGrid::new(50);
        let center = vec2(0.01, 0.01);
        let radius = 0.1;
        let span = (radius / grid.cell_size()).ceil() as usize;
        let bounding_box = (2 * span + 1) * (2 * span + 1);

        let visited = grid.cells_near(center, radius).count();
        assert!(visited < bounding_box);
    }

    #[test]
    fn test_query_finds_every_true_neighbor() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut grid = SpatialGrid::new(50);
        let points: Vec<Vec2> = (0..2000)
            .map(|_| vec2(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect();
        for (i, &p) in points.iter().enumerate() {
            grid.insert(i, grid.cell_of(p));
        }

        for _ in 0..200 {
            let center = vec2(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
            let radius = rng.gen_range(0.01..0.3);
            let found: Vec<usize> = grid.query_neighbors(center, radius).collect();

            for (i, &p) in points.iter().enumerate() {
                if p.distance(center) <= radius {
                    assert!(found.contains(&i), "missed dart {} at {:?}", i, p);
                }
            }
        }
    }
}
