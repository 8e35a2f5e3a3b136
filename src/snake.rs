use crate::input::Direction;

/// Grid position in logical cell coordinates (`y` grows upwards).
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring position `distance` cells along `direction`.
    #[must_use]
    pub fn offset(self, direction: Direction, distance: i32) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx * distance,
            y: self.y + dy * distance,
        }
    }

    /// Returns the world-space coordinates for a grid of `cell_size`.
    #[must_use]
    pub fn to_world(self, cell_size: f32) -> (f32, f32) {
        (self.x as f32 * cell_size, self.y as f32 * cell_size)
    }

    /// Euclidean distance between two positions in world-space units.
    #[must_use]
    pub fn world_distance(self, other: Self, cell_size: f32) -> f32 {
        let (ax, ay) = self.to_world(cell_size);
        let (bx, by) = other.to_world(cell_size);
        (ax - bx).hypot(ay - by)
    }

    /// Returns true when `other` lies closer than `threshold` world units.
    #[must_use]
    pub fn is_near(self, other: Self, cell_size: f32, threshold: f32) -> bool {
        self.world_distance(other, cell_size) < threshold
    }

    /// Chebyshev (king-move) distance in cells.
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// Snake head plus its ordered, growable body.
///
/// The head is kept apart from the body list; `body[0]` is the segment
/// directly behind the head.
#[derive(Debug, Clone)]
pub struct Snake {
    head: Position,
    body: Vec<Position>,
    direction: Direction,
    previous_head: Position,
}

impl Snake {
    /// Creates a bodiless snake at `start` heading in `direction`.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        Self {
            head: start,
            body: Vec::new(),
            direction,
            previous_head: start,
        }
    }

    /// Creates a snake from a head and explicit body segments (front follows the head).
    #[must_use]
    pub fn from_segments(head: Position, body: Vec<Position>, direction: Direction) -> Self {
        Self {
            head,
            body,
            direction,
            previous_head: head,
        }
    }

    /// Moves the head one cell and drags every segment into its predecessor's old cell.
    pub fn step(&mut self) {
        self.previous_head = self.head;

        // Tail first, so no segment reads a value already overwritten this step.
        for index in (1..self.body.len()).rev() {
            self.body[index] = self.body[index - 1];
        }
        if let Some(first) = self.body.first_mut() {
            *first = self.head;
        }

        self.head = self.head.offset(self.direction, 1);
    }

    /// Appends one segment on the tail, or behind the head when there is no body yet.
    ///
    /// Using the head's pre-move cell keeps the new segment from spawning
    /// under the head and registering a self-collision.
    pub fn grow(&mut self) {
        let position = self.body.last().copied().unwrap_or(self.previous_head);
        self.body.push(position);
    }

    /// Turns towards `direction` unless it would reverse the snake.
    ///
    /// Returns true when the direction was accepted.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.head
    }

    /// Returns the head position before the latest step.
    #[must_use]
    pub fn previous_head(&self) -> Position {
        self.previous_head
    }

    /// Returns the body segments, nearest the head first.
    #[must_use]
    pub fn body(&self) -> &[Position] {
        &self.body
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns true if the head or any body segment lies within `threshold` of `position`.
    #[must_use]
    pub fn is_near(&self, position: Position, cell_size: f32, threshold: f32) -> bool {
        self.head.is_near(position, cell_size, threshold)
            || self
                .body
                .iter()
                .any(|segment| segment.is_near(position, cell_size, threshold))
    }

    /// Returns true if any body segment lies within `threshold` of the head.
    #[must_use]
    pub fn head_touches_body(&self, cell_size: f32, threshold: f32) -> bool {
        self.body
            .iter()
            .any(|segment| segment.is_near(self.head, cell_size, threshold))
    }
}
