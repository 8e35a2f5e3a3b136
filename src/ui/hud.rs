use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::ui::labels::HudLabels;

/// Supplemental values shown between the score labels.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub theme: &'a Theme,
    /// Movement speed in cells per second.
    pub speed: f32,
    /// Time spent in the current round.
    pub elapsed: Duration,
    /// Round length limit, when the rules have one.
    pub time_limit: Option<Duration>,
    pub snake_length: usize,
}

/// Renders the one-line HUD at the bottom of `area` and returns the space above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    labels: &HudLabels,
    info: &HudInfo<'_>,
) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
    let [score_area, status_area, high_score_area] = Layout::horizontal([
        Constraint::Percentage(30),
        Constraint::Percentage(40),
        Constraint::Percentage(30),
    ])
    .areas(hud_area);

    // Labels that were never attached are simply not drawn.
    if let Some(label) = labels.score.as_ref().filter(|label| label.is_visible()) {
        frame.render_widget(
            Paragraph::new(label.text())
                .alignment(Alignment::Left)
                .style(
                    Style::default()
                        .fg(info.theme.hud_score)
                        .add_modifier(Modifier::BOLD),
                ),
            score_area,
        );
    }

    frame.render_widget(
        Paragraph::new(status_line(info)).alignment(Alignment::Center),
        status_area,
    );

    if let Some(label) = labels.high_score.as_ref().filter(|label| label.is_visible()) {
        frame.render_widget(
            Paragraph::new(label.text())
                .alignment(Alignment::Right)
                .style(Style::default().fg(info.theme.hud_score)),
            high_score_area,
        );
    }

    play_area
}

fn status_line(info: &HudInfo<'_>) -> Line<'static> {
    let muted = Style::default().fg(info.theme.hud_muted);
    let value = Style::default().fg(Color::Gray);

    let mut spans = vec![
        Span::styled("len ", muted),
        Span::styled(info.snake_length.to_string(), value),
        Span::styled("  speed ", muted),
        Span::styled(format!("{:.0}", info.speed), value),
        Span::styled("  time ", muted),
        Span::styled(clock_text(info.elapsed), value),
    ];

    if let Some(limit) = info.time_limit {
        spans.push(Span::styled(" / ", muted));
        spans.push(Span::styled(clock_text(limit), muted));
    }

    Line::from(spans)
}

/// Formats a duration as `m:ss`.
#[must_use]
pub fn clock_text(duration: Duration) -> String {
    let total = duration.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::clock_text;

    #[test]
    fn clock_text_pads_seconds() {
        assert_eq!(clock_text(Duration::from_secs(0)), "0:00");
        assert_eq!(clock_text(Duration::from_millis(65_900)), "1:05");
        assert_eq!(clock_text(Duration::from_secs(120)), "2:00");
    }
}
