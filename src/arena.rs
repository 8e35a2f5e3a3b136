use log::warn;
use rand::Rng;

use crate::config::{ArenaBounds, ObstacleSpec};
use crate::snake::Position;

/// Obstacle placement gives up after this many candidates per requested obstacle.
const OBSTACLE_ATTEMPTS_PER_CELL: usize = 50;

/// Fixed blocking cells for one round: the perimeter wall plus interior obstacles.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Arena {
    bounds: ArenaBounds,
    walls: Vec<Position>,
    obstacles: Vec<Position>,
}

impl Arena {
    /// Builds the perimeter for `bounds` with no interior obstacles.
    #[must_use]
    pub fn walled(bounds: ArenaBounds) -> Self {
        Self {
            bounds,
            walls: perimeter(bounds),
            obstacles: Vec::new(),
        }
    }

    /// Builds the perimeter and, when `obstacles` is set, scatters interior obstacles
    /// that keep clear of `spawn`.
    #[must_use]
    pub fn build<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: ArenaBounds,
        obstacles: Option<ObstacleSpec>,
        spawn: Position,
    ) -> Self {
        let mut arena = Self::walled(bounds);
        if let Some(spec) = obstacles {
            arena.obstacles = scatter_obstacles(rng, bounds, spec, spawn);
        }
        arena
    }

    /// Replaces the interior obstacles.
    #[must_use]
    pub fn with_obstacles(mut self, obstacles: Vec<Position>) -> Self {
        self.obstacles = obstacles;
        self
    }

    #[must_use]
    pub fn bounds(&self) -> ArenaBounds {
        self.bounds
    }

    #[must_use]
    pub fn walls(&self) -> &[Position] {
        &self.walls
    }

    #[must_use]
    pub fn obstacles(&self) -> &[Position] {
        &self.obstacles
    }

    /// Iterates every blocking cell, perimeter first.
    pub fn blocked_cells(&self) -> impl Iterator<Item = &Position> {
        self.walls.iter().chain(self.obstacles.iter())
    }

    /// Returns the blocking cell within `threshold` of `position`, if any.
    #[must_use]
    pub fn blocker_near(
        &self,
        position: Position,
        cell_size: f32,
        threshold: f32,
    ) -> Option<Blocker> {
        if self
            .walls
            .iter()
            .any(|wall| wall.is_near(position, cell_size, threshold))
        {
            return Some(Blocker::Wall);
        }

        self.obstacles
            .iter()
            .any(|obstacle| obstacle.is_near(position, cell_size, threshold))
            .then_some(Blocker::Obstacle)
    }
}

/// Kind of blocking cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Blocker {
    Wall,
    Obstacle,
}

/// Top and bottom rows span the full width; side columns fill the rows between.
fn perimeter(bounds: ArenaBounds) -> Vec<Position> {
    let mut walls = Vec::new();

    for x in bounds.left..=bounds.right {
        walls.push(Position::new(x, bounds.top));
        walls.push(Position::new(x, bounds.bottom));
    }

    for y in (bounds.bottom + 1)..bounds.top {
        walls.push(Position::new(bounds.left, y));
        walls.push(Position::new(bounds.right, y));
    }

    walls
}

fn scatter_obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: ArenaBounds,
    spec: ObstacleSpec,
    spawn: Position,
) -> Vec<Position> {
    let mut obstacles = Vec::with_capacity(spec.count);
    let max_attempts = spec.count.saturating_mul(OBSTACLE_ATTEMPTS_PER_CELL);
    let mut attempts = 0;

    while obstacles.len() < spec.count && attempts < max_attempts {
        attempts += 1;

        let candidate = Position::new(
            rng.gen_range(bounds.interior_x()),
            rng.gen_range(bounds.interior_y()),
        );
        if candidate.chebyshev_distance(spawn) < spec.min_clearance {
            continue;
        }
        if obstacles.contains(&candidate) {
            continue;
        }

        obstacles.push(candidate);
    }

    if obstacles.len() < spec.count {
        warn!(
            "placed {} of {} obstacles after {attempts} attempts",
            obstacles.len(),
            spec.count
        );
    }

    obstacles
}
