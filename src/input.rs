use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the unit grid offset `(dx, dy)`, with `y` growing upwards.
    #[must_use]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Physical keys the game reacts to.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Key {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Restart,
    Quit,
}

impl Key {
    const COUNT: usize = 10;

    fn index(self) -> usize {
        self as usize
    }
}

/// Steering bindings in the order they are checked; the first valid match wins.
pub const DIRECTION_BINDINGS: [(Key, Direction); 8] = [
    (Key::W, Direction::Up),
    (Key::S, Direction::Down),
    (Key::A, Direction::Left),
    (Key::D, Direction::Right),
    (Key::ArrowUp, Direction::Up),
    (Key::ArrowDown, Direction::Down),
    (Key::ArrowLeft, Direction::Left),
    (Key::ArrowRight, Direction::Right),
];

/// Raw pressed/released sample for one frame.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct KeySample {
    pressed: [bool; Key::COUNT],
}

impl KeySample {
    /// Builds a sample where exactly `keys` are held.
    #[must_use]
    pub fn from_keys(keys: &[Key]) -> Self {
        let mut sample = Self::default();
        for key in keys {
            sample.press(*key);
        }
        sample
    }

    /// Marks `key` as held in this sample.
    pub fn press(&mut self, key: Key) {
        self.pressed[key.index()] = true;
    }

    /// Marks `key` as released in this sample.
    pub fn release(&mut self, key: Key) {
        self.pressed[key.index()] = false;
    }

    #[must_use]
    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }
}

/// Edge-detected key state, updated once per frame.
///
/// A key is "just pressed" when it is held in the latest sample but was not
/// held in the one before it.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct KeyState {
    previous: KeySample,
    current: KeySample,
}

impl KeyState {
    /// Shifts the latest sample into history and records `sample`.
    pub fn update(&mut self, sample: KeySample) {
        self.previous = self.current;
        self.current = sample;
    }

    #[must_use]
    pub fn just_pressed(&self, key: Key) -> bool {
        self.current.is_pressed(key) && !self.previous.is_pressed(key)
    }

    #[must_use]
    pub fn is_held(&self, key: Key) -> bool {
        self.current.is_pressed(key)
    }

    /// Returns the first just-pressed steering direction that does not reverse `current`.
    #[must_use]
    pub fn steering(&self, current: Direction) -> Option<Direction> {
        DIRECTION_BINDINGS
            .iter()
            .find(|(key, direction)| {
                self.just_pressed(*key) && direction_change_is_valid(current, *direction)
            })
            .map(|(_, direction)| *direction)
    }
}

/// Maps a terminal key press to a game key. Releases and repeats are ignored.
#[must_use]
pub fn key_from_event(event: KeyEvent) -> Option<Key> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    match event.code {
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(Key::W),
            'a' => Some(Key::A),
            's' => Some(Key::S),
            'd' => Some(Key::D),
            'r' => Some(Key::Restart),
            'q' => Some(Key::Quit),
            _ => None,
        },
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        KeyCode::Esc => Some(Key::Quit),
        _ => None,
    }
}
