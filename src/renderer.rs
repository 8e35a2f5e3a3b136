use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{ArenaBounds, CELL_COLUMNS, GLYPH_CELL, GLYPH_FOOD, Theme};
use crate::food::pulse_alpha;
use crate::game::{GameLoop, GameStatus};
use crate::score::SettingsStore;
use crate::snake::Position;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::render_banner;

/// Renders the full game frame from immutable state at monotonic time `now`.
pub fn render<S: SettingsStore>(
    frame: &mut Frame<'_>,
    game: &GameLoop<S>,
    theme: &Theme,
    now: Duration,
) {
    let area = frame.area();
    let hud_info = HudInfo {
        theme,
        speed: game.speed(),
        elapsed: game.elapsed(now),
        time_limit: game.config().win.map(|win| win.duration),
        snake_length: game.snake.body().len() + 1,
    };
    let play_area = render_hud(frame, area, game.labels(), &hud_info);

    frame.render_widget(Block::new().style(Style::new().bg(theme.play_bg)), play_area);
    let board = centered_board(play_area, game.arena.bounds());

    for wall in game.arena.walls() {
        draw_cell(
            frame,
            board,
            game.arena.bounds(),
            *wall,
            GLYPH_CELL,
            Style::new().fg(theme.wall),
        );
    }
    for obstacle in game.arena.obstacles() {
        draw_cell(
            frame,
            board,
            game.arena.bounds(),
            *obstacle,
            GLYPH_CELL,
            Style::new().fg(theme.obstacle),
        );
    }

    if let Some(food) = game.food {
        let color = blend_color(theme.play_bg, theme.food, pulse_alpha(now.as_secs_f32()));
        draw_cell(
            frame,
            board,
            game.arena.bounds(),
            food.position,
            GLYPH_FOOD,
            Style::new().fg(color),
        );
    }

    for segment in game.snake.body() {
        draw_cell(
            frame,
            board,
            game.arena.bounds(),
            *segment,
            GLYPH_CELL,
            Style::new().fg(theme.snake_body),
        );
    }
    draw_cell(
        frame,
        board,
        game.arena.bounds(),
        game.snake.head(),
        GLYPH_CELL,
        Style::new()
            .fg(theme.snake_head)
            .add_modifier(Modifier::BOLD),
    );

    if let Some(banner) = &game.labels().banner {
        let accent = match game.status {
            GameStatus::Victory => theme.banner_won,
            _ => theme.banner_lost,
        };
        render_banner(frame, play_area, banner, accent);
    }
}

/// Centers the board inside `area`, clipping it when the terminal is too small.
fn centered_board(area: Rect, bounds: ArenaBounds) -> Rect {
    let board_width = u16::try_from(bounds.width())
        .unwrap_or(u16::MAX)
        .saturating_mul(CELL_COLUMNS);
    let board_height = u16::try_from(bounds.height()).unwrap_or(u16::MAX);

    let width = board_width.min(area.width);
    let height = board_height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_cell(
    frame: &mut Frame<'_>,
    board: Rect,
    bounds: ArenaBounds,
    position: Position,
    glyph: &str,
    style: Style,
) {
    let Some((x, y)) = grid_to_terminal(board, bounds, position) else {
        return;
    };

    frame.buffer_mut().set_string(x, y, glyph, style);
}

/// Maps a grid cell (y up) onto terminal coordinates (y down).
fn grid_to_terminal(board: Rect, bounds: ArenaBounds, position: Position) -> Option<(u16, u16)> {
    let column = u16::try_from(position.x - bounds.left).ok()?;
    let row = u16::try_from(bounds.top - position.y).ok()?;

    let x = board.x.checked_add(column.checked_mul(CELL_COLUMNS)?)?;
    let y = board.y.checked_add(row)?;
    if x.saturating_add(CELL_COLUMNS) > board.right() || y >= board.bottom() {
        return None;
    }

    Some((x, y))
}

/// Linear blend from `from` (t = 0) to `to` (t = 1).
fn blend_color(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (color_to_rgb(from), color_to_rgb(to)) {
        (Some((fr, fg, fb)), Some((tr, tg, tb))) => {
            Color::Rgb(lerp_u8(fr, tr, t), lerp_u8(fg, tg, t), lerp_u8(fb, tb, t))
        }
        _ => {
            if t < 0.5 {
                from
            } else {
                to
            }
        }
    }
}

fn lerp_u8(from: u8, to: u8, t: f32) -> u8 {
    ((from as f32) + ((to as f32) - (from as f32)) * t).round() as u8
}

fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Black => Some((0, 0, 0)),
        Color::Red => Some((205, 49, 49)),
        Color::Green => Some((13, 188, 121)),
        Color::Yellow => Some((229, 229, 16)),
        Color::Blue => Some((36, 114, 200)),
        Color::Magenta => Some((188, 63, 188)),
        Color::Cyan => Some((17, 168, 205)),
        Color::Gray => Some((229, 229, 229)),
        Color::DarkGray => Some((102, 102, 102)),
        Color::LightRed => Some((241, 76, 76)),
        Color::LightGreen => Some((35, 209, 139)),
        Color::White => Some((255, 255, 255)),
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}
