use rand::Rng;

use crate::arena::Arena;
use crate::config::FOOD_FALLBACK_DISTANCE;
use crate::snake::{Position, Snake};

/// Candidates closer than this many cells to anything solid are rejected.
pub const FOOD_CLEARANCE_CELLS: f32 = 0.9;

/// Angular speed of the food pulse, in radians per second.
pub const PULSE_SPEED: f32 = 3.0;

/// The single live food item.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

/// How a food position was chosen.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Placement {
    /// Found by random sampling.
    Sampled(Position),
    /// Random sampling ran out; picked among the remaining free cells.
    Scanned(Position),
    /// No free cell left; placed ahead of the head without checking.
    Fallback(Position),
}

impl Placement {
    #[must_use]
    pub fn position(self) -> Position {
        match self {
            Self::Sampled(position) | Self::Scanned(position) | Self::Fallback(position) => {
                position
            }
        }
    }
}

/// Returns true when `candidate` keeps clear of walls, obstacles and the whole snake.
#[must_use]
pub fn is_free(candidate: Position, arena: &Arena, snake: &Snake, cell_size: f32) -> bool {
    let threshold = cell_size * FOOD_CLEARANCE_CELLS;

    !arena
        .blocked_cells()
        .any(|cell| cell.is_near(candidate, cell_size, threshold))
        && !snake.is_near(candidate, cell_size, threshold)
}

/// Picks a food cell: up to `attempts` uniform samples over the interior,
/// then a uniform pick among every free interior cell, then a cell
/// `FOOD_FALLBACK_DISTANCE` ahead of the head.
#[must_use]
pub fn place<R: Rng + ?Sized>(
    rng: &mut R,
    arena: &Arena,
    snake: &Snake,
    cell_size: f32,
    attempts: usize,
) -> Placement {
    let bounds = arena.bounds();

    for _ in 0..attempts {
        let candidate = Position::new(
            rng.gen_range(bounds.interior_x()),
            rng.gen_range(bounds.interior_y()),
        );
        if is_free(candidate, arena, snake, cell_size) {
            return Placement::Sampled(candidate);
        }
    }

    let free: Vec<Position> = bounds
        .interior_y()
        .flat_map(|y| bounds.interior_x().map(move |x| Position::new(x, y)))
        .filter(|candidate| is_free(*candidate, arena, snake, cell_size))
        .collect();

    if free.is_empty() {
        return Placement::Fallback(snake.head().offset(snake.direction(), FOOD_FALLBACK_DISTANCE));
    }

    Placement::Scanned(free[rng.gen_range(0..free.len())])
}

/// Pulsing opacity for the food sprite at `time_secs`, ranging over `0.2..=1.0`.
#[must_use]
pub fn pulse_alpha(time_secs: f32) -> f32 {
    let wave = ((time_secs * PULSE_SPEED).sin() + 1.0) / 2.0;
    wave * 0.8 + 0.2
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::arena::Arena;
    use crate::config::{ArenaBounds, DEFAULT_BOUNDS, DEFAULT_CELL_SIZE};
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{Placement, is_free, place, pulse_alpha};

    const TINY: ArenaBounds = ArenaBounds {
        left: 0,
        right: 4,
        top: 4,
        bottom: 0,
    };

    #[test]
    fn sampled_food_never_overlaps_anything() {
        let mut rng = StdRng::seed_from_u64(7);
        let arena = Arena::walled(DEFAULT_BOUNDS).with_obstacles(vec![Position::new(3, 3)]);
        let snake = Snake::from_segments(
            Position::new(0, 0),
            vec![Position::new(0, -1), Position::new(0, -2)],
            Direction::Up,
        );

        for _ in 0..200 {
            let placement = place(&mut rng, &arena, &snake, DEFAULT_CELL_SIZE, 100);
            let Placement::Sampled(position) = placement else {
                panic!("open arena should always sample a cell, got {placement:?}");
            };
            assert!(is_free(position, &arena, &snake, DEFAULT_CELL_SIZE));
            assert!(DEFAULT_BOUNDS.interior_x().contains(&position.x));
            assert!(DEFAULT_BOUNDS.interior_y().contains(&position.y));
        }
    }

    #[test]
    fn exhausted_sampling_scans_for_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        // Interior is 3x3; leave only (3, 3) open.
        let arena = Arena::walled(TINY).with_obstacles(vec![
            Position::new(1, 3),
            Position::new(2, 3),
            Position::new(1, 2),
            Position::new(3, 2),
            Position::new(1, 1),
            Position::new(2, 1),
            Position::new(3, 1),
        ]);
        let snake = Snake::new(Position::new(2, 2), Direction::Up);

        let placement = place(&mut rng, &arena, &snake, DEFAULT_CELL_SIZE, 0);

        assert_eq!(placement, Placement::Scanned(Position::new(3, 3)));
    }

    #[test]
    fn full_board_falls_back_ahead_of_head() {
        let mut rng = StdRng::seed_from_u64(3);
        let arena = Arena::walled(TINY).with_obstacles(vec![
            Position::new(1, 3),
            Position::new(2, 3),
            Position::new(3, 3),
            Position::new(1, 2),
            Position::new(3, 2),
            Position::new(1, 1),
            Position::new(2, 1),
            Position::new(3, 1),
        ]);
        let snake = Snake::new(Position::new(2, 2), Direction::Right);

        let placement = place(&mut rng, &arena, &snake, DEFAULT_CELL_SIZE, 10);

        assert_eq!(placement, Placement::Fallback(Position::new(5, 2)));
        assert_eq!(placement.position(), Position::new(5, 2));
    }

    #[test]
    fn pulse_alpha_stays_in_range() {
        for step in 0..200 {
            let alpha = pulse_alpha(step as f32 * 0.05);
            assert!((0.2..=1.0 + f32::EPSILON).contains(&alpha), "alpha {alpha}");
        }

        assert!((pulse_alpha(0.0) - 0.6).abs() < 1e-6);
    }
}
