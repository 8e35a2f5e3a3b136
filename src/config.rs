use std::ops::RangeInclusive;
use std::time::Duration;

use ratatui::style::Color;
use ratatui::symbols::border;

/// Edge length of one grid cell in world-space units.
pub const DEFAULT_CELL_SIZE: f32 = 0.3;

/// Starting movement speed in cells per second.
pub const DEFAULT_SPEED: f32 = 8.0;

/// Settings-store key holding the persisted high score.
pub const HIGH_SCORE_KEY: &str = "HighScore";

/// Distance (in cells) ahead of the head used when no free food cell exists.
pub const FOOD_FALLBACK_DISTANCE: i32 = 3;

/// Delay between rendered frames of the terminal driver.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Inclusive grid extents of the perimeter wall.
///
/// `y` grows upwards: `top` is the highest wall row, `bottom` the lowest.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ArenaBounds {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl ArenaBounds {
    /// Number of columns including both wall columns.
    #[must_use]
    pub fn width(self) -> i32 {
        self.right - self.left + 1
    }

    /// Number of rows including both wall rows.
    #[must_use]
    pub fn height(self) -> i32 {
        self.top - self.bottom + 1
    }

    /// Columns strictly inside the perimeter.
    #[must_use]
    pub fn interior_x(self) -> RangeInclusive<i32> {
        (self.left + 1)..=(self.right - 1)
    }

    /// Rows strictly inside the perimeter.
    #[must_use]
    pub fn interior_y(self) -> RangeInclusive<i32> {
        (self.bottom + 1)..=(self.top - 1)
    }

    /// Returns the total number of interior cells.
    #[must_use]
    pub fn interior_cells(self) -> usize {
        let width = usize::try_from(self.width() - 2).unwrap_or(0);
        let height = usize::try_from(self.height() - 2).unwrap_or(0);
        width * height
    }
}

/// The 49x26 layout the game has always used, centred on the spawn cell.
pub const DEFAULT_BOUNDS: ArenaBounds = ArenaBounds {
    left: -24,
    right: 24,
    top: 11,
    bottom: -14,
};

/// Periodic speed increase driven by the round clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedRamp {
    pub interval: Duration,
    pub increment: f32,
    pub max_speed: f32,
}

/// A round is won once either threshold is reached.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct WinCondition {
    pub duration: Duration,
    pub score: u32,
}

/// Interior obstacle generation parameters.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ObstacleSpec {
    pub count: usize,
    /// Minimum Chebyshev distance (in cells) from the spawn cell.
    pub min_clearance: i32,
}

/// Which rule revision a round is played with.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Ruleset {
    /// Perimeter only, constant speed, endless.
    Classic,
    /// Obstacles, ramping speed, win by time or score.
    Arena,
}

/// Author-set constants for one game. Not exposed as runtime flags.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub ruleset: Ruleset,
    pub cell_size: f32,
    pub initial_speed: f32,
    pub bounds: ArenaBounds,
    pub food_spawn_attempts: usize,
    pub speed_ramp: Option<SpeedRamp>,
    pub win: Option<WinCondition>,
    pub obstacles: Option<ObstacleSpec>,
}

impl GameConfig {
    /// Walls only, constant speed, no win condition.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            ruleset: Ruleset::Classic,
            cell_size: DEFAULT_CELL_SIZE,
            initial_speed: DEFAULT_SPEED,
            bounds: DEFAULT_BOUNDS,
            food_spawn_attempts: 100,
            speed_ramp: None,
            win: None,
            obstacles: None,
        }
    }

    /// Obstacles, speed ramp and win condition enabled.
    #[must_use]
    pub fn arena() -> Self {
        Self {
            ruleset: Ruleset::Arena,
            food_spawn_attempts: 200,
            speed_ramp: Some(SpeedRamp {
                interval: Duration::from_secs(10),
                increment: 1.0,
                max_speed: 20.0,
            }),
            win: Some(WinCondition {
                duration: Duration::from_secs(120),
                score: 50,
            }),
            obstacles: Some(ObstacleSpec {
                count: 20,
                min_clearance: 3,
            }),
            ..Self::classic()
        }
    }

    /// Returns the preset for `ruleset`.
    #[must_use]
    pub fn for_ruleset(ruleset: Ruleset) -> Self {
        match ruleset {
            Ruleset::Classic => Self::classic(),
            Ruleset::Arena => Self::arena(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::arena()
    }
}

/// Colours applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub wall: Color,
    pub obstacle: Color,
    pub play_bg: Color,
    pub hud_score: Color,
    pub hud_muted: Color,
    pub banner_lost: Color,
    pub banner_won: Color,
}

/// Green snake on dark theme.
pub const THEME_CLASSIC: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    food: Color::Red,
    wall: Color::Gray,
    obstacle: Color::DarkGray,
    play_bg: Color::Black,
    hud_score: Color::White,
    hud_muted: Color::DarkGray,
    banner_lost: Color::LightRed,
    banner_won: Color::LightYellow,
};

/// Plain border set used around banner popups.
pub const BANNER_BORDER: border::Set = border::ROUNDED;

/// Each grid cell is drawn two terminal columns wide to look square.
pub const CELL_COLUMNS: u16 = 2;

/// Full-cell glyph (two columns).
pub const GLYPH_CELL: &str = "██";

/// Food glyph (two columns).
pub const GLYPH_FOOD: &str = "▐▌";
